// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A row-major, two-dimensional field.
//!
//! Every intermediate product of the carver is one of these: the pixel
//! grid itself, the energy field, the cost table, and the removal mask
//! used while a seam is cut out.

use crate::cq;
use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field of `width × height` cells.
/// Cells are addressed as `(x, y)`, column first, the same way
/// `image::ImageBuffer` addresses pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Copy> {
    pub width: u32,
    pub height: u32,
    data: Vec<P>,
}

impl<P: Copy> Default for TwoDimensionalMap<P> {
    /// An empty, zero-by-zero map.
    fn default() -> Self {
        TwoDimensionalMap {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map with every cell set to the default value of
    /// its content type.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }
}

impl<P: Copy> TwoDimensionalMap<P> {
    /// Build a map by asking `f` for the value of every cell, row by
    /// row.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        TwoDimensionalMap {
            width,
            height,
            data: iproduct!(0..height, 0..width)
                .map(|(y, x)| f(x, y))
                .collect(),
        }
    }

    /// Wrap an existing row-major buffer.  Returns `None` if the buffer
    /// length does not match the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<P>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    /// Build a map from a list of equally long rows.  Returns `None`
    /// if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<P>>) -> Option<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Self::from_raw(width as u32, height, rows.into_iter().flatten().collect())
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at a single cell's address, if it exists.
    pub fn get(&self, x: u32, y: u32) -> Option<P> {
        cq!(
            x < self.width && y < self.height,
            Some(self[(x, y)]),
            None
        )
    }

    /// A single row as a slice.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Every row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[P]> {
        // chunks() refuses a zero chunk size, and a zero-width map has no
        // cells to hand out anyway.
        self.data.chunks(self.width.max(1) as usize)
    }

    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<P> {
        self.data
    }

    /// Apply `f` to every cell, producing a map of the same shape.
    pub fn map<Q: Copy, F: FnMut(P) -> Q>(&self, f: F) -> TwoDimensionalMap<Q> {
        TwoDimensionalMap {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Swap rows for columns: the result is `height × width`, and the
    /// cell at `(x, y)` moves to `(y, x)`.  Height operations are run
    /// as width operations on the transposed grid.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.height, self.width, |x, y| self[(y, x)])
    }
}

impl<P: Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [u32; 6] = [1, 2, 3, 4, 5, 6];

    #[test]
    fn addresses_column_first() {
        let map = TwoDimensionalMap::from_raw(3, 2, DATA.to_vec()).unwrap();
        assert_eq!(map[(0, 0)], 1);
        assert_eq!(map[(2, 0)], 3);
        assert_eq!(map[(0, 1)], 4);
        assert_eq!(map.row(1), &[4, 5, 6]);
        assert_eq!(map.get(3, 0), None);
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(TwoDimensionalMap::from_raw(4, 2, DATA.to_vec()).is_none());
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        assert!(TwoDimensionalMap::from_rows(vec![vec![1, 2], vec![3]]).is_none());
        let map = TwoDimensionalMap::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(map.dimensions(), (2, 2));
    }

    #[test]
    fn transpose_swaps_axes() {
        let map = TwoDimensionalMap::from_raw(3, 2, DATA.to_vec()).unwrap();
        let flipped = map.transpose();
        assert_eq!(flipped.dimensions(), (2, 3));
        assert_eq!(flipped.as_slice(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(flipped.transpose(), map);
    }

    #[test]
    fn new_fills_with_default() {
        let map: TwoDimensionalMap<f64> = TwoDimensionalMap::new(2, 2);
        assert!(map.as_slice().iter().all(|v| *v == 0.0));
    }
}
