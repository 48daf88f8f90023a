// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cumulative cost table.
//!
//! Every cell holds the cheapest total energy of any 8-connected path
//! from the top row down to that cell.  With forward energy, each step
//! is also charged for the new edges it would create once the path is
//! cut out of the image (Rubinstein, Shamir & Avidan, 2008).

use crate::energy::EnergyField;
use crate::grid::PixelGrid;
use crate::pixelpairs::{forward_costs, ForwardCosts};
use crate::twodmap::TwoDimensionalMap;

/// Minimal cumulative energy per cell.
pub type CostTable = TwoDimensionalMap<f64>;

// The cost of a specific pixel is:
//
//                       ⎧ M(x−1,y−1) + CL(x,y)
//   M(x,y) = E(x,y) + min⎨ M(x,y−1)   + CU(x,y)
//                       ⎩ M(x+1,y−1) + CR(x,y)
//
// where the C terms are all zero for the standard recurrence, and
// neighbors off the edge of the row are unreachable.

fn upper_options(cost: &CostTable, x: u32, y: u32) -> [f64; 3] {
    let above = y - 1;
    [
        x.checked_sub(1)
            .map_or(f64::INFINITY, |left| cost[(left, above)]),
        cost[(x, above)],
        cost.get(x + 1, above).unwrap_or(f64::INFINITY),
    ]
}

fn corrections(grid: &PixelGrid, x: u32, y: u32) -> ForwardCosts {
    let left = x.checked_sub(1).and_then(|left| grid.get(left, y));
    let right = grid.get(x + 1, y);
    forward_costs(&grid[(x, y - 1)], left.as_ref(), right.as_ref())
}

/// Accumulate the energy field into a cost table.  The grid is only
/// consulted when `forward` is set.
pub fn calculate_cost(grid: &PixelGrid, energy: &EnergyField, forward: bool) -> CostTable {
    let (width, height) = energy.dimensions();
    let mut cost = CostTable::new(width, height);

    for x in 0..width {
        cost[(x, 0)] = energy[(x, 0)];
    }

    for y in 1..height {
        for x in 0..width {
            let [mut left, mut up, mut right] = upper_options(&cost, x, y);
            if forward {
                let c = corrections(grid, x, y);
                left += c.left;
                up += c.up;
                right += c.right;
            }
            cost[(x, y)] = energy[(x, y)] + left.min(up).min(right);
        }
    }
    cost
}
