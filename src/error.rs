// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types.
//!
//! The carving core performs no I/O, so `CarveError` only ever reports
//! a violated precondition.  `PnmError` covers reading and writing
//! image files.

use crate::seamcarver::Carve;
use failure::Fail;
use std::io;

/// A precondition violated by a call into the carving core.
#[derive(Debug, Fail)]
pub enum CarveError {
    #[fail(display = "grid dimensions must be positive, got {}x{}", width, height)]
    EmptyGrid { width: usize, height: usize },

    #[fail(display = "a {}x{} grid has more samples than memory can address", width, height)]
    TooLarge { width: usize, height: usize },

    #[fail(
        display = "a {}x{} grid with {} channel(s) needs {} samples, got {}",
        width, height, channels, expected, found
    )]
    SampleCount {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        found: usize,
    },

    #[fail(display = "row {} has {} pixels, expected {}", row, found, expected)]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[fail(display = "seam has {} entries but the grid is {} rows tall", found, expected)]
    SeamLength { expected: usize, found: usize },

    #[fail(
        display = "seam column {} in row {} is outside a grid {} pixels wide",
        column, row, width
    )]
    SeamOutOfBounds {
        row: usize,
        column: usize,
        width: usize,
    },

    #[fail(display = "seam jumps more than one column between rows {} and {}", _0, _1)]
    DisconnectedSeam(usize, usize),

    #[fail(
        display = "cannot remove {} {} seam(s) from an image {} pixels {}",
        requested, direction, available, span
    )]
    TooManySeams {
        direction: Carve,
        requested: usize,
        available: usize,
        span: &'static str,
    },
}

impl CarveError {
    /// Removing `requested` seams in `direction` would leave nothing of
    /// the `available` pixels.
    pub fn too_many_seams(direction: Carve, requested: usize, available: usize) -> Self {
        CarveError::TooManySeams {
            direction,
            requested,
            available,
            span: direction.span(),
        }
    }
}

/// Failures while decoding, encoding, reading or writing an image.
#[derive(Debug, Fail)]
pub enum PnmError {
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),

    #[fail(display = "invalid magic number {:?} (expected 'P2' or 'P3')", _0)]
    BadMagic(String),

    #[fail(display = "missing {} in header", _0)]
    MissingHeader(&'static str),

    #[fail(display = "invalid {} {:?}", what, token)]
    BadToken { what: &'static str, token: String },

    #[fail(display = "invalid image dimensions or max value: {}x{}, max {}", width, height, max_value)]
    BadHeader {
        width: usize,
        height: usize,
        max_value: u32,
    },

    #[fail(display = "insufficient pixel data: expected {} samples, found {}", expected, found)]
    InsufficientData { expected: usize, found: usize },

    #[fail(display = "sample value {} exceeds the declared maximum {}", value, max_value)]
    SampleOutOfRange { value: u32, max_value: u32 },

    #[fail(display = "image codec error: {}", _0)]
    Codec(String),

    #[fail(display = "{}", _0)]
    Grid(#[cause] CarveError),
}

impl From<io::Error> for PnmError {
    fn from(err: io::Error) -> Self {
        PnmError::Io(err)
    }
}

impl From<CarveError> for PnmError {
    fn from(err: CarveError) -> Self {
        PnmError::Grid(err)
    }
}
