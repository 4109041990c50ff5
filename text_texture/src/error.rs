// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error type shared by every fallible operation.

use thiserror::Error;

/// Why a texture could not be synthesized.
///
/// Every variant is terminal for the call that produced it; calling again
/// with different input is the only recovery.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The font collection has no family with the requested name.
    #[error("font family `{0}` is not available")]
    FamilyNotFound(String),
    /// Glyph outlines could not be extracted from the font.
    #[error("failed to build glyph outlines: {0}")]
    Outline(String),
    /// Nothing visible was drawn.
    #[error("the rendered surface contains no visible pixels")]
    EmptySurface,
    /// The requested size does not fit the canvas.
    #[error("requested {width}x{height} does not fit the {canvas_width}x{canvas_height} canvas")]
    ExceedsCanvas {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Canvas width.
        canvas_width: u32,
        /// Canvas height.
        canvas_height: u32,
    },
    /// The canvas pixel buffer could not be allocated.
    #[error("failed to allocate a {width}x{height} canvas")]
    CanvasAllocation {
        /// Requested canvas width.
        width: u32,
        /// Requested canvas height.
        height: u32,
    },
    /// The texture provider failed to allocate, describe or map a texture.
    #[error("texture provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// A mapped texture is smaller than the pixels that must be copied into it.
    #[error("mapped texture holds {actual} bytes but {needed} are required")]
    MappingTooSmall {
        /// Bytes required by the copy.
        needed: usize,
        /// Bytes the mapping exposes.
        actual: usize,
    },
    /// The dump folder path exceeds the supported length.
    #[error("dump folder path is {len} bytes long; at most {max} are supported")]
    DumpPathTooLong {
        /// Length of the rejected path in bytes.
        len: usize,
        /// Maximum accepted length in bytes.
        max: usize,
    },
    /// Writing a dump file failed.
    #[error("failed to write texture dump: {0}")]
    Dump(#[from] std::io::Error),
    /// PNG encoding of a dump failed.
    #[error("failed to encode texture dump: {0}")]
    PngEncoding(String),
}

impl TextureError {
    pub(crate) fn provider(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Box::new(error))
    }
}
