// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel grid
//!
//! An owned, mutable, row-major array of pixels, each pixel holding
//! one (grey) or three (red, green, blue) integer samples.  The grid
//! supports exactly the mutations seam carving needs: deleting one
//! pixel from every row, and swapping rows for columns.

use crate::error::CarveError;
use crate::seam::Seam;
use crate::seamcarver::Carve;
use itertools::iproduct;
use std::fmt;
use std::ops::Index;

/// The number of samples each pixel carries.  Fixed when the grid is
/// created; the energy calculation reduces `Rgb` pixels to a single
/// intensity by averaging.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channels {
    Gray,
    Rgb,
}

impl Channels {
    /// Samples per pixel.
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }

    /// Samples needed for a `width` x `height` grid, or `None` if that
    /// does not fit in a `usize`.
    pub fn samples_for(self, width: usize, height: usize) -> Option<usize> {
        width.checked_mul(height)?.checked_mul(self.count())
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Channels::Gray => write!(f, "greyscale"),
            Channels::Rgb => write!(f, "rgb"),
        }
    }
}

/// A decoded image.  `max_value` is carried for the benefit of the
/// format layer and is never enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    channels: Channels,
    max_value: u32,
    samples: Vec<u32>,
}

impl PixelGrid {
    /// A zero-filled grid.
    pub fn new(
        width: usize,
        height: usize,
        channels: Channels,
        max_value: u32,
    ) -> Result<Self, CarveError> {
        let count = channels
            .samples_for(width, height)
            .ok_or(CarveError::TooLarge { width, height })?;
        PixelGrid::from_samples(width, height, channels, max_value, vec![0; count])
    }

    /// Build a grid from row-major samples, `channels.count()` per
    /// pixel.
    pub fn from_samples(
        width: usize,
        height: usize,
        channels: Channels,
        max_value: u32,
        samples: Vec<u32>,
    ) -> Result<Self, CarveError> {
        if width == 0 || height == 0 {
            return Err(CarveError::EmptyGrid { width, height });
        }
        let expected = channels
            .samples_for(width, height)
            .ok_or(CarveError::TooLarge { width, height })?;
        if samples.len() != expected {
            return Err(CarveError::SampleCount {
                width,
                height,
                channels: channels.count(),
                expected,
                found: samples.len(),
            });
        }
        Ok(PixelGrid {
            width,
            height,
            channels,
            max_value,
            samples,
        })
    }

    /// Build a greyscale grid from a slice of rows.  Every row must be
    /// the same length.
    pub fn from_gray_rows<R: AsRef<[u32]>>(rows: &[R], max_value: u32) -> Result<Self, CarveError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != width)
        {
            return Err(CarveError::RaggedRows {
                row,
                expected: width,
                found: r.as_ref().len(),
            });
        }
        let samples = rows.iter().flat_map(|r| r.as_ref().iter().cloned()).collect();
        PixelGrid::from_samples(width, height, Channels::Gray, max_value, samples)
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

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// All samples, row-major, `channels().count()` per pixel.
    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    /// The samples of a single pixel.
    pub fn pixel(&self, x: usize, y: usize) -> &[u32] {
        let start = self.get_index(x, y);
        &self.samples[start..start + self.channels.count()]
    }

    /// Overwrite a single pixel.  `values` must hold one sample per
    /// channel.
    pub fn put_pixel(&mut self, x: usize, y: usize, values: &[u32]) {
        let start = self.get_index(x, y);
        let end = start + self.channels.count();
        self.samples[start..end].copy_from_slice(values);
    }

    /// The samples of each row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.samples.chunks(self.width * self.channels.count())
    }

    /// The single intensity of a pixel: the truncating average of its
    /// channels.
    pub fn intensity(&self, x: usize, y: usize) -> u32 {
        let pixel = self.pixel(x, y);
        let sum: u64 = pixel.iter().map(|&s| u64::from(s)).sum();
        (sum / pixel.len() as u64) as u32
    }

    /// Delete the pixel at `seam[y]` from every row `y`, shifting the
    /// rest of the row left.  The grid shrinks by one column.
    pub fn remove_seam(&mut self, seam: &Seam) -> Result<(), CarveError> {
        seam.validate(self.width, self.height)?;
        if self.width < 2 {
            return Err(CarveError::too_many_seams(Carve::Width, 1, self.width));
        }

        let (width, channels) = (self.width, self.channels.count());
        let columns = seam.columns();
        let mut position = 0;
        self.samples.retain(|_| {
            let pixel = position / channels;
            position += 1;
            pixel % width != columns[pixel / width]
        });
        self.width -= 1;
        Ok(())
    }

    /// Exchange rows for columns.  Applying this twice restores the
    /// original grid.
    pub fn transpose(&mut self) {
        let transposed: Vec<u32> = iproduct!(0..self.width, 0..self.height)
            .flat_map(|(x, y)| self.pixel(x, y).to_vec())
            .collect();
        self.samples = transposed;
        std::mem::swap(&mut self.width, &mut self.height);
    }

    fn get_index(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels.count()
    }
}

impl Index<(usize, usize)> for PixelGrid {
    type Output = [u32];

    fn index(&self, (x, y): (usize, usize)) -> &[u32] {
        self.pixel(x, y)
    }
}
