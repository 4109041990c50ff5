// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Texture synthesizes GPU textures from styled strings and rounded rectangles.
//!
//! A [`TextureManager`] lays text out with Parley, turns the glyph outlines
//! into one vector path, rasterizes it with Tiny-Skia onto a reusable canvas,
//! trims the result to its visible pixels and copies it into a texture
//! obtained from a [`TextureProvider`].
//!
//! ```no_run
//! use text_texture::{Argb, FontDescriptor, MemoryTextureProvider, TextureManager};
//!
//! let mut manager = TextureManager::new(MemoryTextureProvider::new()).unwrap();
//! let mut desc = FontDescriptor::new("DejaVu Sans", "Hello", 24.0);
//! desc.font_color = Argb(0xFF_FF_CC_00);
//! let result = manager.create_font_texture(&desc);
//! if let Some(texture) = result.texture {
//!     assert_eq!(texture.width(), result.width);
//! }
//! ```
//!
//! ## Features
//!
//! - `system` (enabled by default): Load the installed system fonts.
//! - `wgpu`: Provide `WgpuTextureProvider`, which uploads into `wgpu` textures.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod canvas;
mod color;
mod descriptor;
mod diagnostics;
mod draw;
mod dump;
mod encoding;
mod error;
mod manager;
mod options;
mod outline;
mod region;
mod texture;
#[cfg(feature = "wgpu")]
mod wgpu;

#[cfg(test)]
mod tests;

pub use parley::fontique;
pub use parley::FontContext;

pub use color::{Argb, GradientStyle};
pub use descriptor::{CharRange, ColoredRegion, FontDescriptor, FontStyleFlags, RectDescriptor};
pub use diagnostics::LOG_TARGET;
pub use dump::MAX_DUMP_PATH_LEN;
pub use encoding::{convert_encoding, Codepage};
pub use error::TextureError;
pub use manager::{is_font_available, TextureManager};
pub use options::ManagerOptions;
pub use texture::{
    GeneratedTexture, MappedRect, MemoryTexture, MemoryTextureError, MemoryTextureProvider,
    TextureDescriptor, TextureFormat, TextureProvider, TextureResult,
};

#[cfg(feature = "wgpu")]
pub use self::wgpu::{WgpuTexture, WgpuTextureError, WgpuTextureProvider};
