// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain (ASCII) portable anymaps
//!
//! Reads and writes `P2` graymaps and `P3` pixmaps.  Comment lines in
//! the header are kept and written back out, and the writer uses the
//! same layout every time (a trailing space after each sample, one
//! line per row) so that a file written here survives a read/write
//! cycle byte for byte.

use crate::error::PnmError;
use crate::grid::{Channels, PixelGrid};
use log::debug;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The two plain anymap flavours.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PnmKind {
    /// `P2`, one sample per pixel.
    Graymap,
    /// `P3`, red, green and blue samples per pixel.
    Pixmap,
}

impl PnmKind {
    pub fn magic(self) -> &'static str {
        match self {
            PnmKind::Graymap => "P2",
            PnmKind::Pixmap => "P3",
        }
    }

    pub fn channels(self) -> Channels {
        match self {
            PnmKind::Graymap => Channels::Gray,
            PnmKind::Pixmap => Channels::Rgb,
        }
    }

    pub fn for_channels(channels: Channels) -> Self {
        match channels {
            Channels::Gray => PnmKind::Graymap,
            Channels::Rgb => PnmKind::Pixmap,
        }
    }

    fn from_magic(magic: &str) -> Option<Self> {
        match magic {
            "P2" => Some(PnmKind::Graymap),
            "P3" => Some(PnmKind::Pixmap),
            _ => None,
        }
    }
}

/// A decoded plain anymap: the pixels plus the header comments that
/// came with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PnmImage {
    comments: Vec<String>,
    grid: PixelGrid,
}

impl PnmImage {
    pub fn new(grid: PixelGrid) -> Self {
        PnmImage {
            comments: Vec::new(),
            grid,
        }
    }

    /// Attach header comment lines.  Each should begin with `#`.
    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    /// Swap in new pixels, keeping the comments.
    pub fn with_grid(self, grid: PixelGrid) -> Self {
        PnmImage {
            comments: self.comments,
            grid,
        }
    }

    pub fn kind(&self) -> PnmKind {
        PnmKind::for_channels(self.grid.channels())
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    /// Encode into any writer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), PnmError> {
        writeln!(out, "{}", self.kind().magic())?;
        for comment in &self.comments {
            writeln!(out, "{}", comment)?;
        }
        writeln!(out, "{} {}", self.grid.width(), self.grid.height())?;
        writeln!(out, "{}", self.grid.max_value())?;
        for row in self.grid.rows() {
            for sample in row {
                write!(out, "{} ", sample)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PnmError> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Write to a file, replacing anything already there.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PnmError> {
        let mut out = BufWriter::new(fs::File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Does this look like the start of a plain `P2` or `P3` file?
pub fn is_ascii_pnm(bytes: &[u8]) -> bool {
    match bytes {
        [b'P', b'2', rest @ ..] | [b'P', b'3', rest @ ..] => match rest.first() {
            None => true,
            Some(c) => c.is_ascii_whitespace() || *c == b'#',
        },
        _ => false,
    }
}

// Split the text into whitespace-separated tokens, pulling out
// comments as we go.  Each comment is paired with the number of
// tokens that preceded it.
fn tokenize(text: &str) -> (Vec<&str>, Vec<(usize, &str)>) {
    let mut tokens = Vec::new();
    let mut comments = Vec::new();
    for line in text.lines() {
        let (content, comment) = match line.find('#') {
            Some(i) => (&line[..i], Some(&line[i..])),
            None => (line, None),
        };
        tokens.extend(content.split_whitespace());
        if let Some(comment) = comment {
            comments.push((tokens.len(), comment));
        }
    }
    (tokens, comments)
}

fn parse_field<T: std::str::FromStr>(
    tokens: &[&str],
    index: usize,
    what: &'static str,
) -> Result<T, PnmError> {
    let token = tokens.get(index).ok_or(PnmError::MissingHeader(what))?;
    token.parse().map_err(|_| PnmError::BadToken {
        what,
        token: (*token).to_string(),
    })
}

const HEADER_TOKENS: usize = 4;

// Plain anymaps allow at most two bytes per sample.
const MAX_SAMPLE: u32 = 65535;

/// Decode a plain anymap held in memory.
pub fn parse_pnm(text: &str) -> Result<PnmImage, PnmError> {
    let (tokens, comments) = tokenize(text);

    let magic = tokens.first().ok_or(PnmError::MissingHeader("magic number"))?;
    let kind = PnmKind::from_magic(magic).ok_or_else(|| PnmError::BadMagic((*magic).to_string()))?;
    let width: usize = parse_field(&tokens, 1, "width")?;
    let height: usize = parse_field(&tokens, 2, "height")?;
    let max_value: u32 = parse_field(&tokens, 3, "max value")?;
    let bad_header = PnmError::BadHeader {
        width,
        height,
        max_value,
    };
    if width == 0 || height == 0 || max_value == 0 || max_value > MAX_SAMPLE {
        return Err(bad_header);
    }

    let channels = kind.channels();
    let expected = match channels.samples_for(width, height) {
        Some(expected) => expected,
        None => return Err(bad_header),
    };
    let raster = &tokens[HEADER_TOKENS..];
    if raster.len() < expected {
        return Err(PnmError::InsufficientData {
            expected,
            found: raster.len(),
        });
    }

    let samples = raster[..expected]
        .iter()
        .map(|token| {
            let value: u32 = token.parse().map_err(|_| PnmError::BadToken {
                what: "sample",
                token: (*token).to_string(),
            })?;
            if value > max_value {
                return Err(PnmError::SampleOutOfRange { value, max_value });
            }
            Ok(value)
        })
        .collect::<Result<Vec<u32>, PnmError>>()?;

    let comments: Vec<String> = comments
        .into_iter()
        .filter(|(preceding, _)| *preceding <= HEADER_TOKENS)
        .map(|(_, comment)| comment.to_string())
        .collect();

    debug!(
        "parsed {} {}x{} (max {}) with {} comment line(s)",
        kind.magic(),
        width,
        height,
        max_value,
        comments.len()
    );
    let grid = PixelGrid::from_samples(width, height, channels, max_value, samples)?;
    Ok(PnmImage::new(grid).with_comments(comments))
}

/// Read and decode a plain anymap file.
pub fn read_pnm<P: AsRef<Path>>(path: P) -> Result<PnmImage, PnmError> {
    parse_pnm(&fs::read_to_string(path)?)
}
