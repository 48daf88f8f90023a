// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cut seams out of a grid, or stitch new ones in.
//!
//! Everything here works on columns: vertical seams and straight
//! columns.  Rows are handled by the carver, which transposes the grid
//! first.

use crate::energy::{column_sums, gradient_field};
use crate::grid::PixelGrid;
use crate::pixelpairs::blend;
use crate::seamfinder::Seam;
use crate::twodmap::TwoDimensionalMap;
use image::Rgb;
use itertools::Itertools;
use tracing::trace;

/// A cell of a grid that is being narrowed.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Slot {
    Present(Rgb<u8>),
    Removed,
}

// Squeeze every removed slot out of its row.  Each row must have lost
// the same number of slots, `removed`.
fn compact(slots: TwoDimensionalMap<Slot>, removed: u32) -> PixelGrid {
    let width = slots.width - removed;
    let height = slots.height;
    let data: Vec<Rgb<u8>> = slots
        .into_raw()
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Present(pixel) => Some(pixel),
            Slot::Removed => None,
        })
        .collect();
    TwoDimensionalMap::from_raw(width, height, data)
        .unwrap_or_else(|| unreachable!("every row loses the same number of cells"))
}

/// Remove one vertical seam.  The grid is consumed; the result is one
/// column narrower.
pub fn remove_seam(grid: PixelGrid, seam: &[u32]) -> PixelGrid {
    let mut slots = grid.map(Slot::Present);
    for (y, x) in seam.iter().enumerate() {
        slots[(*x, y as u32)] = Slot::Removed;
    }
    compact(slots, 1)
}

/// Insert one vertical seam: a new pixel appears immediately right of
/// the seam pixel in every row.  With `interpolate` it is the mean of
/// the seam pixel and its right neighbor; otherwise (or when the seam
/// runs down the last column) the seam pixel is duplicated.
pub fn insert_seam(grid: &PixelGrid, seam: &[u32], interpolate: bool) -> PixelGrid {
    let width = grid.width;
    PixelGrid::from_fn(width + 1, grid.height, |x, y| {
        let at = seam[y as usize];
        if x <= at {
            grid[(x, y)]
        } else if x == at + 1 {
            match grid.get(x, y) {
                Some(right) if interpolate => blend(&grid[(at, y)], &right),
                _ => grid[(at, y)],
            }
        } else {
            grid[(x - 1, y)]
        }
    })
}

/// Insert a whole batch of seams found in one pass over the grid's cost
/// table.  Seam columns refer to the grid as it was; the batch is
/// applied rightmost first so that earlier insertions do not shift the
/// seams still to come.
pub fn insert_seams(grid: PixelGrid, seams: &[Seam], interpolate: bool) -> PixelGrid {
    seams.iter().rev().fold(grid, |grid, seam| {
        trace!(?seam, "inserting seam");
        insert_seam(&grid, seam, interpolate)
    })
}

/// The `count` columns with the lowest total gradient energy, in
/// ascending column order.  Equal sums go to the lower column.
pub fn straight_seams(grid: &PixelGrid, count: usize) -> Vec<u32> {
    let sums = column_sums(&gradient_field(grid));
    (0..grid.width)
        .sorted_by(|a, b| sums[*a as usize].total_cmp(&sums[*b as usize]))
        .take(count)
        .sorted()
        .collect()
}

/// Remove whole columns in one pass.
pub fn remove_columns(grid: PixelGrid, columns: &[u32]) -> PixelGrid {
    let mut slots = grid.map(Slot::Present);
    let columns: Vec<u32> = columns.iter().copied().unique().collect();
    for y in 0..slots.height {
        for x in &columns {
            slots[(*x, y)] = Slot::Removed;
        }
    }
    compact(slots, columns.len() as u32)
}

/// Narrow the grid by `count` columns with straight seams: the lowest
/// energy columns are dropped wholesale, no dynamic programming.
pub fn remove_straight_seams(grid: PixelGrid, count: u32) -> PixelGrid {
    let columns = straight_seams(&grid, count as usize);
    trace!(?columns, "removing straight seams");
    remove_columns(grid, &columns)
}
