// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest vertical seam through an energy map.
//!
//! Forward dynamic programming over the map: each cell of the cost
//! table holds the cheapest cumulative energy of any connected path
//! from the top row down to that cell, plus the column of the parent
//! it was reached from.  Backtracking from the cheapest cell of the
//! bottom row then yields the seam.

use crate::energy::EnergyMap;
use crate::error::CarveError;
use crate::twodmap::TwoDimensionalMap;

/// A vertical seam: one column index per row, top to bottom, with
/// neighbouring rows at most one column apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<usize>);

impl Seam {
    /// The column removed from each row.
    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    /// Check that this seam can be cut out of a `width` x `height`
    /// grid.
    pub fn validate(&self, width: usize, height: usize) -> Result<(), CarveError> {
        if self.0.len() != height {
            return Err(CarveError::SeamLength {
                expected: height,
                found: self.0.len(),
            });
        }
        if let Some((row, &column)) = self.0.iter().enumerate().find(|&(_, &c)| c >= width) {
            return Err(CarveError::SeamOutOfBounds { row, column, width });
        }
        if let Some(row) = self
            .0
            .windows(2)
            .position(|pair| (pair[0] as isize - pair[1] as isize).abs() > 1)
        {
            return Err(CarveError::DisconnectedSeam(row, row + 1));
        }
        Ok(())
    }

    /// The sum of the energies along the seam.
    pub fn total_energy(&self, energy: &EnergyMap) -> u64 {
        self.0
            .iter()
            .enumerate()
            .map(|(y, &x)| energy[(x, y)])
            .sum()
    }
}

impl From<Vec<usize>> for Seam {
    fn from(columns: Vec<usize>) -> Self {
        Seam(columns)
    }
}

#[derive(Default, Debug, Copy, Clone)]
struct CostAndBackPointer {
    cost: u64,
    parent: usize,
}

// `min_by_key` keeps the first of several equal minima, so ties
// always resolve to the leftmost column.
fn cheapest_in(costs: &[CostAndBackPointer], from: usize, to: usize) -> usize {
    (from..=to).min_by_key(|x| costs[*x].cost).unwrap_or(from)
}

/// Given an energy map, return the x-coordinate of the cheapest seam
/// in each row, top to bottom.  The map must not be empty.
pub fn find_minimum_seam(energy: &EnergyMap) -> Seam {
    let (width, height) = energy.dimensions();
    let mut target: TwoDimensionalMap<CostAndBackPointer> = TwoDimensionalMap::new(width, height);
    let maxwidth = width - 1;

    // The first row costs exactly its own energy.
    for x in 0..width {
        target[(x, 0)].cost = energy[(x, 0)];
    }

    // Each later cell adds its energy to the cheapest of the (up to)
    // three cells above it, remembering which one that was.
    let mut above = vec![CostAndBackPointer::default(); width];
    for y in 1..height {
        above.copy_from_slice(target.row(y - 1));
        for x in 0..width {
            let from = x.saturating_sub(1);
            let to = if x == maxwidth { maxwidth } else { x + 1 };
            let parent = cheapest_in(&above, from, to);
            target[(x, y)] = CostAndBackPointer {
                cost: above[parent].cost.saturating_add(energy[(x, y)]),
                parent,
            };
        }
    }

    let mut seam_col = cheapest_in(target.row(height - 1), 0, maxwidth);
    let mut columns = vec![0; height];
    for y in (0..height).rev() {
        columns[y] = seam_col;
        seam_col = target[(seam_col, y)].parent;
    }
    Seam(columns)
}
