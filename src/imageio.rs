// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing image files.
//!
//! Anything the `image` crate can decode is accepted and flattened to
//! 8-bit RGB; alpha is dropped.  Output is always JPEG, whatever the
//! extension of the path.

use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbImage};
use std::path::Path;
use tracing::{error, info};

// Sniff the format from the file's contents rather than trusting its
// extension.
fn decode(path: &Path) -> std::result::Result<DynamicImage, ImageError> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// Decode the image at `path` into a pixel grid.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PixelGrid> {
    let path = path.as_ref();
    let name = path.file_name().unwrap_or(path.as_os_str());
    info!("Loading image: {}.", name.to_string_lossy());
    let image = decode(path).map_err(|source| {
        error!(path = %path.display(), %source, "could not load image");
        Error::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let grid = PixelGrid::from(image.to_rgb8());
    info!("Image loaded successfully.");
    Ok(grid)
}

/// Encode the grid as a JPEG at `path`.
pub fn save<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    RgbImage::from(grid)
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(|source| {
            error!(path = %path.display(), %source, "could not save image");
            Error::Encode {
                path: path.to_path_buf(),
                source,
            }
        })
}
