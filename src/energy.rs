// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given a pixel grid, calculate how important every pixel is.  The
//! base measure is the average gradient between a pixel and its (up
//! to) eight neighbors; optionally it is blended with the local entropy
//! of the 9×9 window around the pixel, which favors keeping textured
//! regions.

use crate::config::CarveConfig;
use crate::cq;
use crate::grid::PixelGrid;
use crate::pixelpairs::{derivative, grayscale};
use crate::twodmap::TwoDimensionalMap;
use itertools::iproduct;

/// A per-pixel importance score, the same shape as the grid it was
/// computed from.
pub type EnergyField = TwoDimensionalMap<f64>;

const ENTROPY_RADIUS: i64 = 4;
const ENTROPY_WINDOW: usize = 81;

// Every in-bounds address of the square window of the given radius
// around (x, y), optionally without the center itself.
fn window(
    grid: &PixelGrid,
    (x, y): (u32, u32),
    radius: i64,
    with_center: bool,
) -> impl Iterator<Item = (u32, u32)> {
    let (width, height) = (i64::from(grid.width), i64::from(grid.height));
    let (x, y) = (i64::from(x), i64::from(y));
    iproduct!(-radius..=radius, -radius..=radius)
        .filter(move |&(dx, dy)| with_center || dx != 0 || dy != 0)
        .map(move |(dx, dy)| (x + dx, y + dy))
        .filter(move |&(nx, ny)| nx >= 0 && nx < width && ny >= 0 && ny < height)
        .map(|(nx, ny)| (nx as u32, ny as u32))
}

/// The average derivative between the pixel at `(x, y)` and each of its
/// existing neighbors.  Border pixels simply have fewer neighbors; a
/// lone pixel has none and no energy.
pub fn gradient_energy(grid: &PixelGrid, x: u32, y: u32) -> f64 {
    let pixel = grid[(x, y)];
    let (total, count) = window(grid, (x, y), 1, false)
        .fold((0.0, 0u32), |(total, count), pt| {
            (total + derivative(&pixel, &grid[pt]), count + 1)
        });
    cq!(count == 0, 0.0, total / f64::from(count))
}

/// The local entropy of the 9×9 window centered at `(x, y)`.
///
/// Windows clipped by the border are scaled up to a full window by the
/// integer factor `81 / n`, where `n` is the number of pixels actually
/// in the window.  The per-pixel "probabilities" are grey levels over
/// the scaled window sum, so they add up to `n / 81` rather than one.
/// This is not textbook Shannon entropy.
pub fn local_entropy(grid: &PixelGrid, x: u32, y: u32) -> f64 {
    let (sum, count) = window(grid, (x, y), ENTROPY_RADIUS, true)
        .fold((0.0, 0usize), |(sum, count), pt| {
            (sum + grayscale(&grid[pt]), count + 1)
        });
    let scale = (ENTROPY_WINDOW / count) as f64;
    let total = sum * scale;

    let entropy: f64 = window(grid, (x, y), ENTROPY_RADIUS, true)
        .map(|pt| grayscale(&grid[pt]) / total)
        // An all-black window has total == 0 and every p is NaN, which
        // this also skips.
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum();
    entropy * scale
}

/// Compute the energy of every pixel in the grid, blending in local
/// entropy if the configuration asks for it.
pub fn calculate_energy(grid: &PixelGrid, config: &CarveConfig) -> EnergyField {
    if !config.energy.with_entropy() {
        return gradient_field(grid);
    }
    let weight = config.entropy_weight;
    EnergyField::from_fn(grid.width, grid.height, |x, y| {
        (1.0 - weight) * gradient_energy(grid, x, y) + weight * local_entropy(grid, x, y)
    })
}

/// The plain gradient energy of every pixel, never blended.
pub fn gradient_field(grid: &PixelGrid) -> EnergyField {
    EnergyField::from_fn(grid.width, grid.height, |x, y| {
        gradient_energy(grid, x, y)
    })
}

/// The total energy of each column, left to right.
pub fn column_sums(energy: &EnergyField) -> Vec<f64> {
    (0..energy.width)
        .map(|x| (0..energy.height).map(|y| energy[(x, y)]).sum())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnergyMode;
    use crate::grid::grid_from_rows;

    const BLACK: [u8; 3] = [0, 0, 0];
    const GREY: [u8; 3] = [10, 10, 10];

    #[test]
    fn uniform_grid_has_no_energy() {
        let grid = PixelGrid::from_fn(4, 3, |_, _| image::Rgb([77, 12, 200]));
        let energy = gradient_field(&grid);
        assert!(energy.as_slice().iter().all(|e| *e == 0.0));
    }

    #[test]
    fn single_row_energy() {
        let grid = grid_from_rows(&[&[BLACK, GREY, BLACK, BLACK]]).unwrap();
        let energy = gradient_field(&grid);
        assert_eq!(energy.as_slice(), &[10.0, 10.0, 5.0, 0.0]);
    }

    #[test]
    fn corners_average_three_neighbors() {
        // 2x2: the white corner differs by 255 from each of the others.
        let grid = grid_from_rows(&[&[[255, 255, 255], BLACK], &[BLACK, BLACK]]).unwrap();
        let energy = gradient_field(&grid);
        assert_eq!(energy[(0, 0)], 255.0);
        assert_eq!(energy[(1, 1)], 85.0);
    }

    #[test]
    fn lone_pixel_has_no_energy() {
        let grid = grid_from_rows(&[&[GREY]]).unwrap();
        assert_eq!(gradient_energy(&grid, 0, 0), 0.0);
    }

    #[test]
    fn entropy_of_a_black_window_is_zero() {
        let grid = PixelGrid::from_fn(5, 5, |_, _| image::Rgb(BLACK));
        assert_eq!(local_entropy(&grid, 2, 2), 0.0);
    }

    #[test]
    fn entropy_of_a_full_uniform_window() {
        // Every p is 1/81 in a full window of one grey level.
        let grid = PixelGrid::from_fn(9, 9, |_, _| image::Rgb(GREY));
        let expected = -81.0 * (1.0 / 81.0) * (1.0f64 / 81.0).log2();
        assert!((local_entropy(&grid, 4, 4) - expected).abs() < 1e-9);
    }

    #[test]
    fn entropy_uses_integer_window_scale() {
        // A 2x2 grid: n = 4, so the scale is 81 / 4 = 20, not 20.25.
        let grid = PixelGrid::from_fn(2, 2, |_, _| image::Rgb(GREY));
        let p: f64 = 10.0 / (40.0 * 20.0);
        let expected = 4.0 * -p * p.log2() * 20.0;
        assert!((local_entropy(&grid, 0, 0) - expected).abs() < 1e-9);
    }

    #[test]
    fn entropy_blend_uses_configured_weight() {
        let grid = PixelGrid::from_fn(2, 2, |_, _| image::Rgb(GREY));
        let entropy = local_entropy(&grid, 1, 1);
        let config = CarveConfig::new(EnergyMode::Entropy).with_entropy_weight(0.25);
        let energy = calculate_energy(&grid, &config);
        assert!((energy[(1, 1)] - 0.25 * entropy).abs() < 1e-9);
        let plain = calculate_energy(&grid, &CarveConfig::new(EnergyMode::Forward));
        assert_eq!(plain[(1, 1)], 0.0);
    }

    #[test]
    fn sums_columns() {
        let energy = EnergyField::from_raw(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(column_sums(&energy), vec![4.0, 6.0]);
    }
}
