// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional PNG copies of every synthesized texture, for debugging.

use std::path::{Path, PathBuf};

use tiny_skia::Pixmap;

use crate::error::TextureError;

/// Longest dump folder path accepted, in bytes.
pub const MAX_DUMP_PATH_LEN: usize = 1023;

/// Which synthesis produced a dump; decides the file name prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DumpKind {
    Font,
    Rect,
}

impl DumpKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Font => "font",
            Self::Rect => "rect",
        }
    }
}

/// Whether dumping is on, and where files go.
#[derive(Clone, Debug, Default)]
pub(crate) struct DumpState {
    enabled: bool,
    folder: PathBuf,
}

impl DumpState {
    /// Turns dumping on, writing into `folder`.
    pub(crate) fn enable(&mut self, folder: &Path) -> Result<(), TextureError> {
        let len = folder.as_os_str().len();
        if len > MAX_DUMP_PATH_LEN {
            return Err(TextureError::DumpPathTooLong {
                len,
                max: MAX_DUMP_PATH_LEN,
            });
        }
        self.folder = folder.to_path_buf();
        self.enabled = true;
        Ok(())
    }

    /// Turns dumping off. The folder is kept for a later `enable`.
    pub(crate) fn disable(&mut self) {
        self.enabled = false;
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The first `<prefix>_<n>.png` in the folder that does not exist yet,
    /// counting from zero.
    pub(crate) fn next_free_path(&self, kind: DumpKind) -> PathBuf {
        (0_u32..)
            .map(|index| self.folder.join(format!("{}_{index}.png", kind.prefix())))
            .find(|path| !path.exists())
            .unwrap_or_else(|| self.folder.join(format!("{}.png", kind.prefix())))
    }

    /// Writes `pixmap` as a straight-alpha PNG under the next free name.
    pub(crate) fn write(&self, kind: DumpKind, pixmap: &Pixmap) -> Result<PathBuf, TextureError> {
        let path = self.next_free_path(kind);
        let png = pixmap
            .encode_png()
            .map_err(|err| TextureError::PngEncoding(err.to_string()))?;
        std::fs::write(&path, png)?;
        Ok(path)
    }
}
