// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the sum of the absolute differences
//! between its intensity and the intensity of each of its (up to
//! four) axis-aligned neighbours.  Edge pixels simply have fewer
//! neighbours; nothing wraps.  Colour pixels are first reduced to a
//! single intensity by averaging their channels.

use crate::error::CarveError;
use crate::grid::{Channels, PixelGrid};
use crate::twodmap::TwoDimensionalMap;
use itertools::iproduct;
use log::trace;

/// One non-negative energy value per pixel.  Four differences of
/// full-range `u32` intensities do not fit in a `u32`.
pub type EnergyMap = TwoDimensionalMap<u64>;

/// Compute the energy of every pixel in a grid.
pub fn compute_energy(grid: &PixelGrid) -> EnergyMap {
    let (width, height) = grid.dimensions();

    let mut intensity = TwoDimensionalMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        intensity[(x, y)] = grid.intensity(x, y);
    }

    let mut emap = EnergyMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let here: u32 = intensity[(x, y)];
        let mut e = 0u64;
        if x > 0 {
            e += u64::from(here.abs_diff(intensity[(x - 1, y)]));
        }
        if x + 1 < width {
            e += u64::from(here.abs_diff(intensity[(x + 1, y)]));
        }
        if y > 0 {
            e += u64::from(here.abs_diff(intensity[(x, y - 1)]));
        }
        if y + 1 < height {
            e += u64::from(here.abs_diff(intensity[(x, y + 1)]));
        }
        emap[(x, y)] = e;
    }

    trace!(
        "energy of {}x{} grid: max {}",
        width,
        height,
        emap.values().iter().max().cloned().unwrap_or(0)
    );
    emap
}

/// Render an energy map as a greyscale grid with a maximum of 255,
/// the hottest pixel mapping to white.
pub fn energy_to_grid(energy: &EnergyMap) -> Result<PixelGrid, CarveError> {
    let factor = energy.values().iter().max().cloned().unwrap_or(0);
    let samples = energy
        .values()
        .iter()
        .map(|&e| {
            if factor == 0 {
                0
            } else {
                (e.saturating_mul(256) / factor).min(255) as u32
            }
        })
        .collect();
    let (width, height) = energy.dimensions();
    PixelGrid::from_samples(width, height, Channels::Gray, 255, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_DATA: [u32; 20] = [9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9];
    const IMAGE_ENERGY: [u64; 20] = [
        0, 17, 27, 10, 0, 8, 32, 18, 4, 10, 0, 8, 0, 19, 27, 0, 0, 9, 27, 18,
    ];

    #[test]
    fn energy_generator_works() {
        let grid = PixelGrid::from_samples(5, 4, Channels::Gray, 9, IMAGE_DATA.to_vec()).unwrap();
        let energy = compute_energy(&grid);
        assert_eq!(energy.dimensions(), (5, 4));
        assert_eq!(energy.values(), &IMAGE_ENERGY[..]);
    }

    #[test]
    fn edges_only_count_existing_neighbours() {
        let grid = PixelGrid::from_gray_rows(&[[1u32, 2, 1], [2, 9, 2], [1, 2, 1]], 9).unwrap();
        let energy = compute_energy(&grid);
        assert_eq!(energy.row(0), &[2, 9, 2]);
        assert_eq!(energy.row(1), &[9, 28, 9]);
        assert_eq!(energy.row(2), &[2, 9, 2]);
    }

    #[test]
    fn colour_pixels_use_the_average_intensity() {
        // Averages are 2 and 5.
        let grid =
            PixelGrid::from_samples(2, 1, Channels::Rgb, 255, vec![1, 2, 4, 5, 5, 6]).unwrap();
        assert_eq!(compute_energy(&grid).values(), &[3, 3]);
    }

    #[test]
    fn uniform_grid_has_no_energy() {
        let grid = PixelGrid::from_samples(4, 3, Channels::Gray, 255, vec![7; 12]).unwrap();
        assert!(compute_energy(&grid).values().iter().all(|&e| e == 0));
    }

    #[test]
    fn full_range_samples_do_not_overflow() {
        let max = u32::MAX;
        let wide = u64::from(max);

        let grid = PixelGrid::from_samples(3, 1, Channels::Gray, max, vec![0, max, 0]).unwrap();
        let energy = compute_energy(&grid);
        assert_eq!(energy.values(), &[wide, 2 * wide, wide]);
        assert_eq!(energy_to_grid(&energy).unwrap().samples(), &[128, 255, 128]);

        let grid = PixelGrid::from_gray_rows(&[[0, max, 0], [max, 0, max]], max).unwrap();
        assert_eq!(compute_energy(&grid).row(0), &[2 * wide, 3 * wide, 2 * wide]);
    }

    #[test]
    fn energy_renders_to_greyscale() {
        let energy = TwoDimensionalMap::from_vec(3, 1, vec![0u64, 2, 4]).unwrap();
        let grid = energy_to_grid(&energy).unwrap();
        assert_eq!(grid.channels(), Channels::Gray);
        assert_eq!(grid.max_value(), 255);
        assert_eq!(grid.samples(), &[0, 128, 255]);

        let flat = TwoDimensionalMap::from_vec(2, 1, vec![0u64, 0]).unwrap();
        assert_eq!(energy_to_grid(&flat).unwrap().samples(), &[0, 0]);
    }
}
