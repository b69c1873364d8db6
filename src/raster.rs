// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Bridge to the `image` crate
//!
//! Anything that is not a plain anymap (binary `P5`/`P6`, PNG, and
//! whatever else the `image` crate can decode) is loaded into a
//! `PixelGrid` here, and written back out the same way.

use crate::error::{CarveError, PnmError};
use crate::grid::{Channels, PixelGrid};
use image::{DynamicImage, GenericImageView, ImageBuffer, Luma, Pixel, Primitive, Rgb};
use itertools::iproduct;
use log::debug;
use num_traits::Bounded;
use std::convert::TryFrom;
use std::path::Path;

#[inline]
fn subpixel_to_u32<S: Primitive>(s: S) -> u32 {
    <u32 as num_traits::NumCast>::from(s).unwrap_or(0)
}

/// Copy any image view into a grid with the requested channel layout.
/// The grid's maximum value is the largest value of the subpixel type.
pub fn grid_from_image<I, P, S>(image: &I, channels: Channels) -> Result<PixelGrid, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + Bounded + 'static,
{
    let (width, height) = image.dimensions();
    let samples: Vec<u32> = iproduct!(0..height, 0..width)
        .flat_map(|(y, x)| {
            let pixel = image.get_pixel(x, y);
            match channels {
                Channels::Gray => pixel.to_luma().channels().to_vec(),
                Channels::Rgb => pixel.to_rgb().channels().to_vec(),
            }
        })
        .map(subpixel_to_u32)
        .collect();
    PixelGrid::from_samples(
        width as usize,
        height as usize,
        channels,
        subpixel_to_u32(S::max_value()),
        samples,
    )
}

// Rescale a sample from `0..=max_value` to `0..=255`.
fn scale_to_u8(sample: u32, max_value: u32) -> u8 {
    if max_value == 0 {
        0
    } else if max_value == 255 {
        sample.min(255) as u8
    } else {
        (u64::from(sample.min(max_value)) * 255 / u64::from(max_value)) as u8
    }
}

/// Decode any image format the `image` crate knows.  Greyscale images
/// stay single-channel; everything else becomes RGB.
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<PixelGrid, PnmError> {
    let image = image::open(path).map_err(|e| PnmError::Codec(e.to_string()))?;
    // Convert to a concrete buffer first so grey values are copied
    // rather than run through the RGB luma weights.
    let grid = match &image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_) => {
            grid_from_image(&image.to_luma(), Channels::Gray)?
        }
        _ => grid_from_image(&image.to_rgb(), Channels::Rgb)?,
    };
    debug!(
        "decoded {}x{} {} raster",
        grid.width(),
        grid.height(),
        grid.channels()
    );
    Ok(grid)
}

/// Encode a grid with the `image` crate, picking the format from the
/// file extension.  Samples are rescaled to eight bits.
pub fn save_raster<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> Result<(), PnmError> {
    let too_large = |_| PnmError::Codec(format!("{}x{} is too large", grid.width(), grid.height()));
    let width = u32::try_from(grid.width()).map_err(too_large)?;
    let height = u32::try_from(grid.height()).map_err(too_large)?;
    let max_value = grid.max_value();
    let bytes: Vec<u8> = grid
        .samples()
        .iter()
        .map(|&s| scale_to_u8(s, max_value))
        .collect();

    let mismatch = || PnmError::Codec("sample buffer does not match the image size".to_string());
    let saved = match grid.channels() {
        Channels::Gray => ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(width, height, bytes)
            .ok_or_else(mismatch)?
            .save(path),
        Channels::Rgb => ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(width, height, bytes)
            .ok_or_else(mismatch)?
            .save(path),
    };
    saved.map_err(|e| PnmError::Codec(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage};

    #[test]
    fn greyscale_buffers_convert_directly() {
        let buf: GrayImage = ImageBuffer::from_raw(3, 2, vec![0, 10, 20, 30, 40, 50]).unwrap();
        let grid = grid_from_image(&buf, Channels::Gray).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.max_value(), 255);
        assert_eq!(grid.samples(), &[0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn colour_buffers_keep_their_channels() {
        let buf: RgbImage = ImageBuffer::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let grid = grid_from_image(&buf, Channels::Rgb).unwrap();
        assert_eq!(grid.channels(), Channels::Rgb);
        assert_eq!(grid.pixel(1, 0), &[4, 5, 6]);
    }

    #[test]
    fn scaling_to_eight_bits() {
        assert_eq!(scale_to_u8(200, 255), 200);
        assert_eq!(scale_to_u8(15, 15), 255);
        assert_eq!(scale_to_u8(65535, 65535), 255);
        assert_eq!(scale_to_u8(32768, 65535), 127);
        assert_eq!(scale_to_u8(0, 0), 0);
    }

    #[test]
    fn png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.png");
        let grid = PixelGrid::from_gray_rows(&[[0u32, 100, 255], [7, 8, 9]], 255).unwrap();
        save_raster(&grid, &path).unwrap();
        assert_eq!(load_raster(&path).unwrap(), grid);
    }
}
