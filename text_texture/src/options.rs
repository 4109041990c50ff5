// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings fixed when a manager is created.

/// Construction-time settings of a [`TextureManager`](crate::TextureManager).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManagerOptions {
    /// Width of the drawing canvas in pixels. Also the largest texture width.
    pub canvas_width: u32,
    /// Height of the drawing canvas in pixels. Also the largest texture height.
    pub canvas_height: u32,
    /// How many outline heights below the top are scanned for ink when
    /// trimming a font texture.
    pub trim_scan_factor: u32,
}

impl ManagerOptions {
    /// Default canvas edge length.
    pub const DEFAULT_CANVAS_SIZE: u32 = 2048;
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            canvas_width: Self::DEFAULT_CANVAS_SIZE,
            canvas_height: Self::DEFAULT_CANVAS_SIZE,
            trim_scan_factor: 2,
        }
    }
}
