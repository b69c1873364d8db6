// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Naming the carved output file.

use std::path::{Path, PathBuf};

/// `<stem>_processed_<vertical>_<horizontal><ext>`, next to the input.
/// An input without an extension gets `.pgm`.
pub fn processed_path<P: AsRef<Path>>(input: P, vertical: usize, horizontal: usize) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_else(|| ".pgm".to_string());
    input.with_file_name(format!("{}_processed_{}_{}{}", stem, vertical, horizontal, ext))
}
