// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The carver first brings the grid to its target width, then to its
//! target height.  Height is handled by transposing the grid, running
//! the width logic, and transposing back.

use crate::config::{CarveConfig, SeamMode};
use crate::costmap::calculate_cost;
use crate::cq;
use crate::energy::calculate_energy;
use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use crate::seamedit::{insert_seams, remove_seam, remove_straight_seams};
use crate::seamfinder::{find_seam, find_seams};
use std::cmp::Ordering;
use std::mem;
use tracing::{debug, info, trace};

/// Which dimension of the image is being changed.
#[derive(PartialEq, Copy, Clone, Debug)]
enum Carve {
    Width,
    Height,
}

impl Carve {
    fn name(self) -> &'static str {
        match self {
            Carve::Width => "width",
            Carve::Height => "height",
        }
    }
}

/// Where a [`SeamCarver`] is in its run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Loaded,
    WidthAdjusted,
    HeightAdjusted,
    Done,
}

// Removing a seam changes the neighbors of every pixel next to it, so
// the energy and cost are rebuilt from scratch for each seam.
fn carve_once(grid: PixelGrid, config: &CarveConfig) -> PixelGrid {
    let energy = calculate_energy(&grid, config);
    let mut cost = calculate_cost(&grid, &energy, config.energy.is_forward());
    let seam = find_seam(&mut cost);
    trace!(?seam, "removing seam");
    remove_seam(grid, &seam)
}

// All the seams to insert come out of the one cost table of the
// original grid, in a single batch.
fn enlarge(grid: PixelGrid, count: u32, config: &CarveConfig) -> PixelGrid {
    let energy = calculate_energy(&grid, config);
    let mut cost = calculate_cost(&grid, &energy, config.energy.is_forward());
    let seams = find_seams(&mut cost, count as usize);
    debug!(count = seams.len(), "inserting seam batch");
    insert_seams(grid, &seams, config.interpolate)
}

// Refuse a resize before any work is done on the grid.  A single
// insertion batch cannot hold more seams than there are columns.
fn check_target(current: u32, target: u32, axis: Carve, config: &CarveConfig) -> Result<()> {
    if target == 0 || target.saturating_sub(current) > current {
        return Err(Error::InvalidTarget {
            axis: axis.name(),
            current,
            target,
        });
    }
    if target > current && config.seam_mode == SeamMode::Straight {
        return Err(Error::StraightSeamEnlarge { current, target });
    }
    Ok(())
}

// Width logic proper; the target has already been checked.
fn change_width(grid: PixelGrid, target: u32, config: &CarveConfig) -> PixelGrid {
    let width = grid.width;
    match (target.cmp(&width), config.seam_mode) {
        (Ordering::Equal, _) => grid,
        (Ordering::Less, SeamMode::Straight) => remove_straight_seams(grid, width - target),
        (Ordering::Less, SeamMode::Connected) => {
            let mut scratch = grid;
            while scratch.width > target {
                scratch = carve_once(scratch, config);
                debug!(width = scratch.width, "carved seam");
            }
            scratch
        }
        (Ordering::Greater, _) => enlarge(grid, target - width, config),
    }
}

fn change_height(grid: PixelGrid, target: u32, config: &CarveConfig) -> PixelGrid {
    if grid.height == target {
        return grid;
    }
    change_width(grid.transpose(), target, config).transpose()
}

fn check_grid(grid: &PixelGrid) -> Result<()> {
    cq!(grid.is_empty(), Err(Error::EmptyImage), Ok(()))
}

/// Bring the grid to `target` columns.
pub fn resize_width(grid: PixelGrid, target: u32, config: &CarveConfig) -> Result<PixelGrid> {
    check_grid(&grid)?;
    check_target(grid.width, target, Carve::Width, config)?;
    Ok(change_width(grid, target, config))
}

/// Bring the grid to `target` rows, by way of its transpose.
pub fn resize_height(grid: PixelGrid, target: u32, config: &CarveConfig) -> Result<PixelGrid> {
    check_grid(&grid)?;
    check_target(grid.height, target, Carve::Height, config)?;
    Ok(change_height(grid, target, config))
}

/// A grid on its way to a new size.  The steps run in a fixed order:
/// [`adjust_width`](Self::adjust_width), then
/// [`adjust_height`](Self::adjust_height), then
/// [`finish`](Self::finish).
pub struct SeamCarver {
    grid: PixelGrid,
    config: CarveConfig,
    stage: Stage,
}

impl SeamCarver {
    /// Creates a new SeamCarver with a grid to be carved.
    pub fn new(grid: PixelGrid, config: CarveConfig) -> Result<Self> {
        check_grid(&grid)?;
        Ok(SeamCarver {
            grid,
            config,
            stage: Stage::Loaded,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }

    fn require_stage(&self, expected: Stage) -> Result<()> {
        if self.stage != expected {
            return Err(Error::OutOfOrder {
                expected,
                found: self.stage,
            });
        }
        Ok(())
    }

    pub fn adjust_width(&mut self, target: u32) -> Result<()> {
        self.require_stage(Stage::Loaded)?;
        check_target(self.grid.width, target, Carve::Width, &self.config)?;
        self.grid = change_width(mem::take(&mut self.grid), target, &self.config);
        info!("Width changed to {}.", self.grid.width);
        self.stage = Stage::WidthAdjusted;
        Ok(())
    }

    pub fn adjust_height(&mut self, target: u32) -> Result<()> {
        self.require_stage(Stage::WidthAdjusted)?;
        check_target(self.grid.height, target, Carve::Height, &self.config)?;
        self.grid = change_height(mem::take(&mut self.grid), target, &self.config);
        info!("Height changed to {}.", self.grid.height);
        self.stage = Stage::HeightAdjusted;
        Ok(())
    }

    /// Hand back the carved grid.
    pub fn finish(&mut self) -> Result<PixelGrid> {
        self.require_stage(Stage::HeightAdjusted)?;
        self.stage = Stage::Done;
        Ok(mem::take(&mut self.grid))
    }

    /// Run every step: width, height, done.
    pub fn carve(mut self, width: u32, height: u32) -> Result<PixelGrid> {
        let (w, h) = self.dimensions();
        info!("Changing dimensions from {}x{} to {}x{}...", w, h, width, height);
        self.adjust_width(width)?;
        self.adjust_height(height)?;
        self.finish()
    }
}

/// Given a grid and a desired new width and height, carve or insert
/// seams until the grid has that size.
pub fn seamcarve(
    grid: PixelGrid,
    width: u32,
    height: u32,
    config: &CarveConfig,
) -> Result<PixelGrid> {
    SeamCarver::new(grid, *config)?.carve(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnergyMode;
    use crate::grid::grid_from_rows;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> PixelGrid {
        PixelGrid::from_fn(width, height, |x, y| {
            Rgb([(x * 37 % 256) as u8, (y * 59 % 256) as u8, ((x * y) % 256) as u8])
        })
    }

    #[test]
    fn single_row_drops_the_quietest_pixel() {
        // Energies are 10, 10, 5, 0, so the last pixel goes.
        let b = [0, 0, 0];
        let g = [10, 10, 10];
        let grid = grid_from_rows(&[&[b, g, b, b]]).unwrap();
        let carved = resize_width(grid, 3, &CarveConfig::default()).unwrap();
        assert_eq!(carved, grid_from_rows(&[&[b, g, b]]).unwrap());
    }

    #[test]
    fn shrinks_and_grows_in_every_mode() {
        for energy in [EnergyMode::Basic, EnergyMode::Entropy, EnergyMode::Forward] {
            let config = CarveConfig::new(energy);
            let carved = seamcarve(gradient(12, 9), 8, 12, &config).unwrap();
            assert_eq!(carved.dimensions(), (8, 12));
            let carved = seamcarve(gradient(12, 9), 15, 5, &config).unwrap();
            assert_eq!(carved.dimensions(), (15, 5));
        }
    }

    #[test]
    fn straight_mode_shrinks_both_axes() {
        let config = CarveConfig::default().with_seam_mode(SeamMode::Straight);
        let carved = seamcarve(gradient(10, 10), 7, 4, &config).unwrap();
        assert_eq!(carved.dimensions(), (7, 4));
    }

    #[test]
    fn straight_mode_cannot_grow() {
        let config = CarveConfig::default().with_seam_mode(SeamMode::Straight);
        assert!(matches!(
            resize_width(gradient(4, 4), 5, &config),
            Err(Error::StraightSeamEnlarge {
                current: 4,
                target: 5
            })
        ));
    }

    #[test]
    fn rejects_out_of_range_targets() {
        let config = CarveConfig::default();
        assert!(matches!(
            seamcarve(gradient(4, 4), 0, 4, &config),
            Err(Error::InvalidTarget { axis: "width", .. })
        ));
        assert!(matches!(
            seamcarve(gradient(4, 4), 4, 9, &config),
            Err(Error::InvalidTarget { axis: "height", .. })
        ));
        assert!(seamcarve(gradient(4, 4), 8, 8, &config).is_ok());
        assert!(matches!(
            SeamCarver::new(PixelGrid::default(), config),
            Err(Error::EmptyImage)
        ));
    }

    #[test]
    fn rejects_empty_grids() {
        let config = CarveConfig::default();
        let flat = PixelGrid::from_raw(3, 0, vec![]).unwrap();
        assert!(matches!(
            resize_width(flat, 2, &config),
            Err(Error::EmptyImage)
        ));
        let thin = PixelGrid::from_raw(0, 3, vec![]).unwrap();
        assert!(matches!(
            resize_height(thin, 2, &config),
            Err(Error::EmptyImage)
        ));
        assert!(matches!(
            resize_width(PixelGrid::default(), 1, &config),
            Err(Error::EmptyImage)
        ));
    }

    #[test]
    fn steps_run_in_order() {
        let mut carver = SeamCarver::new(gradient(5, 5), CarveConfig::default()).unwrap();
        assert_eq!(carver.stage(), Stage::Loaded);
        assert!(matches!(
            carver.adjust_height(4),
            Err(Error::OutOfOrder {
                expected: Stage::WidthAdjusted,
                found: Stage::Loaded
            })
        ));
        carver.adjust_width(4).unwrap();
        assert_eq!(carver.stage(), Stage::WidthAdjusted);
        assert!(carver.finish().is_err());
        carver.adjust_height(3).unwrap();
        let grid = carver.finish().unwrap();
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(carver.stage(), Stage::Done);
    }

    #[test]
    fn failed_step_keeps_the_grid() {
        let mut carver = SeamCarver::new(gradient(5, 5), CarveConfig::default()).unwrap();
        assert!(carver.adjust_width(11).is_err());
        assert_eq!(carver.stage(), Stage::Loaded);
        assert_eq!(carver.dimensions(), (5, 5));
    }

    #[test]
    fn grow_then_shrink_restores_width() {
        let config = CarveConfig::default();
        let grown = resize_width(gradient(9, 6), 13, &config).unwrap();
        let back = resize_width(grown, 9, &config).unwrap();
        assert_eq!(back.dimensions(), (9, 6));
    }
}
