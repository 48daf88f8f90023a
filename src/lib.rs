// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing.
//!
//! Seams, connected top-to-bottom paths of unimportant pixels, are cut
//! out of an image to shrink it, or duplicated to grow it.  The energy
//! of each pixel comes from its gradient, optionally blended with local
//! entropy; seams are found by dynamic programming over that energy,
//! optionally with the forward-energy correction.

mod ternary;

pub mod config;
pub mod costmap;
pub mod energy;
pub mod error;
pub mod grid;
pub mod imageio;
pub mod pixelpairs;
pub mod seamcarver;
pub mod seamedit;
pub mod seamfinder;
pub mod twodmap;

pub use config::{CarveConfig, EnergyMode, SeamMode};
pub use costmap::{calculate_cost, CostTable};
pub use energy::{calculate_energy, EnergyField};
pub use error::{Error, Result};
pub use grid::PixelGrid;
pub use seamcarver::{resize_height, resize_width, seamcarve, SeamCarver, Stage};
pub use seamedit::{insert_seam, insert_seams, remove_seam, remove_straight_seams};
pub use seamfinder::{find_seam, find_seams, Seam};
