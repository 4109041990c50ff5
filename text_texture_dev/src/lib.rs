// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Text Texture Dev
//!
//! This crate provides utilities for developing Text Texture.

use std::path::PathBuf;

/// Environment variable that overrides the font directories used by tests.
pub const FONT_DIR_VAR: &str = "TEXT_TEXTURE_FONT_DIR";

/// Font directories searched when [`FONT_DIR_VAR`] is not set.
const FALLBACK_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// The font family that tests render with.
pub const TEST_FAMILY: &str = "DejaVu Sans";

/// A family name that no host is expected to have installed.
pub const MISSING_FAMILY: &str = "Text Texture Missing Family 7f3a";

/// The directories that may contain the test font files.
///
/// Only directories that exist are returned.
pub fn font_dirs() -> impl Iterator<Item = PathBuf> {
    let dirs: Vec<PathBuf> = match std::env::var_os(FONT_DIR_VAR) {
        Some(value) => std::env::split_paths(&value).collect(),
        None => FALLBACK_FONT_DIRS.iter().map(PathBuf::from).collect(),
    };
    dirs.into_iter().filter(|dir| dir.is_dir())
}

/// Returns whether `path` names a font file the test collection can load.
pub fn is_font_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ["ttf", "otf", "ttc", "otc"]
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Short strings used by the pipeline tests.
#[derive(Debug)]
pub struct TextSamples {
    /// Plain Latin text.
    pub latin: &'static str,
    /// Text with a hard line break.
    pub multiline: &'static str,
    /// Text made only of whitespace.
    pub blank: &'static str,
}

impl TextSamples {
    /// Creates the sample set.
    pub const fn new() -> Self {
        Self {
            latin: "Hello, texture!",
            multiline: "First line\nSecond",
            blank: "   ",
        }
    }
}

impl Default for TextSamples {
    fn default() -> Self {
        Self::new()
    }
}
