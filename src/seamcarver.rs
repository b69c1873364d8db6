// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Repeatedly compute the energy of the grid, find the cheapest
//! vertical seam, and cut it out.  Horizontal seams reuse the same
//! machinery: transpose, cut one vertical seam, transpose back.

use crate::energy::compute_energy;
use crate::error::CarveError;
use crate::grid::PixelGrid;
use crate::seam::{find_minimum_seam, Seam};
use log::debug;
use std::fmt;

/// Which dimension a seam removal shrinks.  `Width` removes vertical
/// seams, `Height` removes horizontal ones.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Carve {
    Width,
    Height,
}

impl fmt::Display for Carve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Carve::Width => write!(f, "vertical"),
            Carve::Height => write!(f, "horizontal"),
        }
    }
}

impl Carve {
    /// The word for the dimension this direction shrinks.
    pub fn span(self) -> &'static str {
        match self {
            Carve::Width => "wide",
            Carve::Height => "tall",
        }
    }
}

/// Holds the grid being carved for the length of one session.  The
/// grid is only ever reachable through the carver until it is handed
/// back with `into_grid`.
#[derive(Debug, Clone)]
pub struct SeamCarver {
    grid: PixelGrid,
}

impl SeamCarver {
    /// Takes ownership of the grid to be carved.
    pub fn new(grid: PixelGrid) -> Self {
        SeamCarver { grid }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    // The energy map is rebuilt every time, since cutting a seam
    // changes the neighbours of every pixel that was beside it.
    fn carve_once(&mut self) -> Result<Seam, CarveError> {
        let energy = compute_energy(&self.grid);
        let seam = find_minimum_seam(&energy);
        self.grid.remove_seam(&seam)?;
        Ok(seam)
    }

    fn check_request(&self, direction: Carve, count: usize) -> Result<(), CarveError> {
        let available = match direction {
            Carve::Width => self.grid.width(),
            Carve::Height => self.grid.height(),
        };
        if count >= available {
            return Err(CarveError::too_many_seams(direction, count, available));
        }
        Ok(())
    }

    /// Remove `count` vertical seams, narrowing the grid by `count`
    /// columns.  At least one column must remain.
    pub fn remove_vertical_seams(&mut self, count: usize) -> Result<(), CarveError> {
        self.check_request(Carve::Width, count)?;
        for n in 0..count {
            let seam = self.carve_once()?;
            debug!(
                "vertical seam {}/{}: {:?} -> {}x{}",
                n + 1,
                count,
                seam.columns(),
                self.grid.width(),
                self.grid.height()
            );
        }
        Ok(())
    }

    /// Remove `count` horizontal seams, shortening the grid by `count`
    /// rows.  At least one row must remain.
    pub fn remove_horizontal_seams(&mut self, count: usize) -> Result<(), CarveError> {
        self.check_request(Carve::Height, count)?;
        for n in 0..count {
            self.grid.transpose();
            let carved = self.carve_once();
            self.grid.transpose();
            let seam = carved?;
            debug!(
                "horizontal seam {}/{}: {:?} -> {}x{}",
                n + 1,
                count,
                seam.columns(),
                self.grid.width(),
                self.grid.height()
            );
        }
        Ok(())
    }
}

/// Carve `vertical` columns and then `horizontal` rows out of a grid,
/// returning the smaller grid.
pub fn carve(grid: PixelGrid, vertical: usize, horizontal: usize) -> Result<PixelGrid, CarveError> {
    let mut carver = SeamCarver::new(grid);
    carver.check_request(Carve::Width, vertical)?;
    carver.check_request(Carve::Height, horizontal)?;
    carver.remove_vertical_seams(vertical)?;
    carver.remove_horizontal_seams(horizontal)?;
    Ok(carver.into_grid())
}
