// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Crate-level error type and `Result` alias.
//!
//! The seam finding and editing routines are total over well-formed
//! grids; everything that can go wrong is either in the image file
//! collaborators or in a request the orchestrator refuses up front.

use crate::seamcarver::Stage;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("could not encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("cannot resize {axis} from {current} to {target}")]
    InvalidTarget {
        axis: &'static str,
        current: u32,
        target: u32,
    },

    #[error("straight seams cannot enlarge an image ({current} to {target})")]
    StraightSeamEnlarge { current: u32, target: u32 },

    #[error("energy mode must be 0, 1 or 2, got: {0}")]
    BadEnergyMode(String),

    #[error("carver is {found:?}, expected {expected:?}")]
    OutOfOrder { expected: Stage, found: Stage },
}
