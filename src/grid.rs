// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel grid the carver works on, and its conversions to and from
//! the `image` crate's RGB buffer.

use crate::twodmap::TwoDimensionalMap;
use image::{Rgb, RgbImage};

/// A dense, rectangular grid of 8-bit RGB pixels.
pub type PixelGrid = TwoDimensionalMap<Rgb<u8>>;

impl From<&RgbImage> for PixelGrid {
    fn from(image: &RgbImage) -> Self {
        PixelGrid::from_fn(image.width(), image.height(), |x, y| {
            *image.get_pixel(x, y)
        })
    }
}

impl From<RgbImage> for PixelGrid {
    fn from(image: RgbImage) -> Self {
        PixelGrid::from(&image)
    }
}

impl From<&PixelGrid> for RgbImage {
    fn from(grid: &PixelGrid) -> Self {
        RgbImage::from_fn(grid.width, grid.height, |x, y| grid[(x, y)])
    }
}

// Build a grid from rows of `[r, g, b]` triples, for small fixtures.
#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&[[u8; 3]]]) -> Option<PixelGrid> {
    PixelGrid::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|c| Rgb(*c)).collect())
            .collect(),
    )
}
