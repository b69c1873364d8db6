// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving for portable anymaps.
//!
//! Shrinks an image one pixel at a time by cutting out the connected
//! path of pixels, top to bottom (or side to side), whose contrast
//! with its neighbours is lowest.

pub mod twodmap;

pub mod error;
pub use error::{CarveError, PnmError};

pub mod grid;
pub use grid::{Channels, PixelGrid};

pub mod energy;
pub use energy::{compute_energy, energy_to_grid, EnergyMap};

pub mod seam;
pub use seam::{find_minimum_seam, Seam};

pub mod seamcarver;
pub use seamcarver::{carve, Carve, SeamCarver};

pub mod pnm;
pub use pnm::{is_ascii_pnm, parse_pnm, read_pnm, PnmImage, PnmKind};

pub mod raster;
pub use raster::{load_raster, save_raster};

pub mod outname;
pub use outname::processed_path;
