// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a pixel pair
//!
//! Given two pixels, the energy between them is the relative distance
//! between the colors that make them up.  Everything the carver knows
//! about "difference" is built from [`derivative`]: the gradient
//! energy, the forward-energy corrections, and (through [`grayscale`])
//! the local entropy.

use image::Rgb;

/// (Pixel, Pixel) -> Energy
///
/// The mean of the absolute per-channel differences,
/// `D(a, b) = (|Δr| + |Δg| + |Δb|) / 3`.
#[inline]
pub fn derivative(p1: &Rgb<u8>, p2: &Rgb<u8>) -> f64 {
    let sum: u32 = p1
        .0
        .iter()
        .zip(p2.0.iter())
        .map(|(c1, c2)| u32::from(c1.abs_diff(*c2)))
        .sum();
    f64::from(sum) / 3.0
}

/// The grey level of a pixel: the truncating integer mean of its three
/// channels.
#[inline]
pub fn grayscale(p: &Rgb<u8>) -> f64 {
    let [r, g, b] = p.0;
    f64::from((u32::from(r) + u32::from(g) + u32::from(b)) / 3)
}

/// The per-channel truncating mean of two pixels, used to synthesize
/// an inserted seam pixel.
#[inline]
pub fn blend(p1: &Rgb<u8>, p2: &Rgb<u8>) -> Rgb<u8> {
    let mean = |a: u8, b: u8| ((u16::from(a) + u16::from(b)) / 2) as u8;
    Rgb([
        mean(p1[0], p2[0]),
        mean(p1[1], p2[1]),
        mean(p1[2], p2[2]),
    ])
}

/// The three directional corrections of the forward-energy recurrence:
/// how much new gradient is introduced if the path through a pixel
/// arrives from the upper-left, from directly above, or from the
/// upper-right.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ForwardCosts {
    pub left: f64,
    pub up: f64,
    pub right: f64,
}

// Standard differences, with A the pixel above, L and R the left and
// right neighbors in the current row:
//
//  CU = D[R, L]
//  CL = D[R, L] + D[A, L]
//  CR = D[R, L] + D[A, R]
//
// Near edge (no L):   CL = 0,       CU = 0, CR = D[A, R]
// Far edge (no R):    CL = D[A, L], CU = 0, CR = 0
// A single column has neither neighbor and introduces nothing.

/// Given the pixel above and the (possibly missing) left and right
/// neighbors of a pixel, compute the forward-energy corrections.
pub fn forward_costs(
    above: &Rgb<u8>,
    left: Option<&Rgb<u8>>,
    right: Option<&Rgb<u8>>,
) -> ForwardCosts {
    match (left, right) {
        (Some(left), Some(right)) => {
            let up = derivative(right, left);
            ForwardCosts {
                left: up + derivative(above, left),
                up,
                right: up + derivative(above, right),
            }
        }
        (None, Some(right)) => ForwardCosts {
            right: derivative(above, right),
            ..ForwardCosts::default()
        },
        (Some(left), None) => ForwardCosts {
            left: derivative(above, left),
            ..ForwardCosts::default()
        },
        (None, None) => ForwardCosts::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_is_mean_absolute_difference() {
        assert_eq!(derivative(&Rgb([0, 0, 0]), &Rgb([10, 10, 10])), 10.0);
        assert_eq!(derivative(&Rgb([10, 0, 5]), &Rgb([0, 3, 5])), 13.0 / 3.0);
        assert_eq!(derivative(&Rgb([255, 255, 255]), &Rgb([255, 255, 255])), 0.0);
    }

    #[test]
    fn grayscale_truncates() {
        assert_eq!(grayscale(&Rgb([1, 1, 2])), 1.0);
        assert_eq!(grayscale(&Rgb([255, 255, 255])), 255.0);
    }

    #[test]
    fn blend_truncates_per_channel() {
        assert_eq!(blend(&Rgb([0, 255, 3]), &Rgb([255, 255, 4])), Rgb([127, 255, 3]));
    }

    #[test]
    fn interior_forward_costs() {
        let above = Rgb([30, 30, 30]);
        let left = Rgb([0, 0, 0]);
        let right = Rgb([90, 90, 90]);
        let costs = forward_costs(&above, Some(&left), Some(&right));
        assert_eq!(
            costs,
            ForwardCosts {
                left: 90.0 + 30.0,
                up: 90.0,
                right: 90.0 + 60.0,
            }
        );
    }

    #[test]
    fn edge_forward_costs() {
        let above = Rgb([30, 30, 30]);
        let other = Rgb([0, 0, 0]);
        let near = forward_costs(&above, None, Some(&other));
        assert_eq!((near.left, near.up, near.right), (0.0, 0.0, 30.0));
        let far = forward_costs(&above, Some(&other), None);
        assert_eq!((far.left, far.up, far.right), (30.0, 0.0, 0.0));
        assert_eq!(forward_costs(&above, None, None), ForwardCosts::default());
    }
}
