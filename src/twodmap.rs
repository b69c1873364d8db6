// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An addressable two-dimensional field.
//!
//! Holds one of several kinds of per-pixel values during processing:
//! a plain `u32` for the energy map, or a cumulative cost plus a
//! back-pointer for the seam search table.

use std::ops::{Index, IndexMut};

/// A row-major, fixed-size field of `P` addressed by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: usize,
    height: usize,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map, every cell holding `P::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width * height],
        }
    }

    /// Wrap an existing row-major vector.  Returns `None` if the
    /// vector does not hold exactly `width * height` values.
    pub fn from_vec(width: usize, height: usize, data: Vec<P>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// A single row, left to right.
    pub fn row(&self, y: usize) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width]
    }

    /// Every value, in row-major order.
    pub fn values(&self) -> &[P] {
        &self.data
    }

    // Keep the index math in a singular location and never, ever
    // mess with it anywhere else.
    fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

impl<P: Default + Copy> Index<(usize, usize)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (usize, usize)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(usize, usize)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addressing_is_row_major() {
        let mut map: TwoDimensionalMap<u32> = TwoDimensionalMap::new(3, 2);
        map[(2, 0)] = 7;
        map[(0, 1)] = 4;
        assert_eq!(map.values(), &[0, 0, 7, 4, 0, 0]);
        assert_eq!(map.row(1), &[4, 0, 0]);
        assert_eq!(map[(2, 0)], 7);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(TwoDimensionalMap::from_vec(2, 2, vec![1u32, 2, 3]).is_none());
        let map = TwoDimensionalMap::from_vec(2, 2, vec![1u32, 2, 3, 4]).unwrap();
        assert_eq!(map.dimensions(), (2, 2));
        assert_eq!(map[(1, 1)], 4);
    }
}
