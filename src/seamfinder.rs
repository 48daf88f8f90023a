// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pull seams out of a cost table.
//!
//! A seam is traced from the bottom row upward, always stepping to the
//! cheapest of the three cells above.  Several seams can be taken from
//! one table in a single batch; each cell a seam passes through is
//! overwritten with [`CONSUMED`] so that later seams of the batch steer
//! around it.

use crate::costmap::CostTable;
use crate::cq;
use itertools::Itertools;

/// One column index per row, top to bottom.
pub type Seam = Vec<u32>;

/// The cost of a cell already taken by an earlier seam of the batch.
/// It is finite, so a consumed cell still beats one off the edge of the
/// table.
pub const CONSUMED: f64 = f64::MAX;

// Choose the column at row `y` for a seam that sits at `below` in row
// `y + 1`.  Ties go to the leftmost candidate.  A seam whose straight
// path up is already consumed drifts right if it can.
fn next_column(cost: &CostTable, below: u32, y: u32) -> u32 {
    let right = cost.get(below + 1, y);
    if cost[(below, y)] == CONSUMED && right.is_some() {
        return below + 1;
    }
    let candidates = [
        below
            .checked_sub(1)
            .map_or(f64::INFINITY, |left| cost[(left, y)]),
        cost[(below, y)],
        right.unwrap_or(f64::INFINITY),
    ];
    let best = (1..candidates.len()).fold(0, |best, i| {
        cq!(candidates[i] < candidates[best], i, best)
    });
    below + best as u32 - 1
}

/// Trace `k` cell-disjoint seams through the cost table, ordered left
/// to right by the column they end on.
///
/// The table is spent by this call: every cell on a returned seam is
/// left holding [`CONSUMED`].  `k` must not exceed the table's width.
pub fn find_seams(cost: &mut CostTable, k: usize) -> Vec<Seam> {
    let (width, height) = cost.dimensions();
    if height == 0 {
        return Vec::new();
    }
    let bottom = height - 1;

    // The k cheapest bottom cells, ties to the lower column, then put
    // back in column order so seam i is always left of seam i + 1.
    let ends: Vec<u32> = (0..width)
        .sorted_by(|a, b| cost[(*a, bottom)].total_cmp(&cost[(*b, bottom)]))
        .take(k)
        .sorted()
        .collect();

    ends.into_iter()
        .map(|end| {
            let mut seam = vec![end; height as usize];
            for y in (0..bottom).rev() {
                let x = next_column(cost, seam[y as usize + 1], y);
                seam[y as usize] = x;
                cost[(x, y)] = CONSUMED;
            }
            cost[(end, bottom)] = CONSUMED;
            seam
        })
        .collect()
}

/// The single cheapest seam of the table.
pub fn find_seam(cost: &mut CostTable) -> Seam {
    find_seams(cost, 1).pop().unwrap_or_default()
}
