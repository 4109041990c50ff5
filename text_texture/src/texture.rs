// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the synthesizer and whatever owns GPU memory.

use thiserror::Error;

use crate::color::Argb;

/// Pixel layout of a synthesized texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit blue, green, red, alpha in memory order, straight alpha.
    #[default]
    Bgra8,
}

impl TextureFormat {
    /// Bytes per pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bgra8 => 4,
        }
    }
}

/// Size and format of a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureDescriptor {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel layout.
    pub format: TextureFormat,
}

impl TextureDescriptor {
    /// A BGRA texture of the given size.
    pub const fn bgra8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: TextureFormat::Bgra8,
        }
    }
}

/// CPU-visible storage of a mapped texture.
#[derive(Debug)]
pub struct MappedRect<'a> {
    /// The writable rows.
    pub bytes: &'a mut [u8],
    /// Distance between row starts in bytes.
    pub pitch: usize,
}

/// Allocates textures and exposes their storage for writing.
///
/// A texture is written by mapping it, filling the rows, and unmapping it.
/// Textures are handed to the caller afterwards; the provider keeps no
/// reference that would outlive them.
pub trait TextureProvider {
    /// The texture handle given to callers.
    type Texture;
    /// Failure reported by the provider.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Allocates a texture.
    fn create_texture(&mut self, desc: &TextureDescriptor) -> Result<Self::Texture, Self::Error>;

    /// Reports the size and format a texture was actually allocated with.
    fn describe(&self, texture: &Self::Texture) -> Result<TextureDescriptor, Self::Error>;

    /// Exposes the texture storage for writing.
    fn map<'t>(&mut self, texture: &'t mut Self::Texture) -> Result<MappedRect<'t>, Self::Error>;

    /// Ends a write started by [`map`](Self::map).
    fn unmap(&mut self, texture: &mut Self::Texture) -> Result<(), Self::Error>;
}

/// A texture produced by a successful synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedTexture<T> {
    /// Width of the content in pixels.
    pub width: u32,
    /// Height of the content in pixels.
    pub height: u32,
    /// The texture, now owned by the caller.
    pub texture: T,
}

/// Outcome of a synthesis call: either a texture with its size, or the empty
/// value (`0×0` and no texture).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureResult<T> {
    /// Width of the content in pixels.
    pub width: u32,
    /// Height of the content in pixels.
    pub height: u32,
    /// The texture, now owned by the caller.
    pub texture: Option<T>,
}

impl<T> TextureResult<T> {
    /// The empty result.
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            texture: None,
        }
    }

    /// Returns `true` if no texture was produced.
    pub const fn is_empty(&self) -> bool {
        self.texture.is_none()
    }
}

impl<T> Default for TextureResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<GeneratedTexture<T>> for TextureResult<T> {
    fn from(value: GeneratedTexture<T>) -> Self {
        Self {
            width: value.width,
            height: value.height,
            texture: Some(value.texture),
        }
    }
}

/// A texture living in main memory.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryTexture {
    desc: TextureDescriptor,
    pixels: Vec<u8>,
    mapped: bool,
}

impl core::fmt::Debug for MemoryTexture {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryTexture")
            .field("desc", &self.desc)
            .field("mapped", &self.mapped)
            .finish_non_exhaustive()
    }
}

impl MemoryTexture {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.desc.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.desc.height
    }

    /// Distance between row starts in bytes.
    pub fn pitch(&self) -> usize {
        self.desc.width as usize * self.desc.format.bytes_per_pixel()
    }

    /// The raw BGRA rows.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        if x >= self.desc.width || y >= self.desc.height {
            return None;
        }
        let start = y as usize * self.pitch() + x as usize * 4;
        let [b, g, r, a] = self.pixels.get(start..start + 4)?.try_into().ok()?;
        Some(Argb::from_channels(a, r, g, b))
    }
}

/// Why the memory provider refused a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryTextureError {
    /// Width or height was zero.
    #[error("cannot allocate a {width}x{height} texture")]
    ZeroSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The allocation would exceed the byte budget.
    #[error("allocating {requested} bytes exceeds the remaining budget of {remaining}")]
    OverBudget {
        /// Bytes requested.
        requested: usize,
        /// Bytes still available.
        remaining: usize,
    },
    /// `map` was called on a texture that is already mapped.
    #[error("texture is already mapped")]
    AlreadyMapped,
    /// `unmap` was called on a texture that is not mapped.
    #[error("texture is not mapped")]
    NotMapped,
}

/// Hands out [`MemoryTexture`]s, optionally within a total byte budget.
#[derive(Clone, Debug, Default)]
pub struct MemoryTextureProvider {
    budget: Option<usize>,
    allocated: usize,
}

impl MemoryTextureProvider {
    /// A provider without a budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that fails once `budget` bytes have been handed out.
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            allocated: 0,
        }
    }

    /// Total bytes handed out so far.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated
    }
}

impl TextureProvider for MemoryTextureProvider {
    type Texture = MemoryTexture;
    type Error = MemoryTextureError;

    fn create_texture(&mut self, desc: &TextureDescriptor) -> Result<MemoryTexture, Self::Error> {
        if desc.width == 0 || desc.height == 0 {
            return Err(MemoryTextureError::ZeroSize {
                width: desc.width,
                height: desc.height,
            });
        }
        let requested = desc.width as usize * desc.height as usize * desc.format.bytes_per_pixel();
        if let Some(budget) = self.budget {
            let remaining = budget.saturating_sub(self.allocated);
            if requested > remaining {
                return Err(MemoryTextureError::OverBudget {
                    requested,
                    remaining,
                });
            }
        }
        self.allocated += requested;
        Ok(MemoryTexture {
            desc: *desc,
            pixels: vec![0; requested],
            mapped: false,
        })
    }

    fn describe(&self, texture: &MemoryTexture) -> Result<TextureDescriptor, Self::Error> {
        Ok(texture.desc)
    }

    fn map<'t>(&mut self, texture: &'t mut MemoryTexture) -> Result<MappedRect<'t>, Self::Error> {
        if texture.mapped {
            return Err(MemoryTextureError::AlreadyMapped);
        }
        texture.mapped = true;
        let pitch = texture.pitch();
        Ok(MappedRect {
            bytes: &mut texture.pixels,
            pitch,
        })
    }

    fn unmap(&mut self, texture: &mut MemoryTexture) -> Result<(), Self::Error> {
        if !texture.mapped {
            return Err(MemoryTextureError::NotMapped);
        }
        texture.mapped = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_limits_total_allocation() {
        let mut provider = MemoryTextureProvider::with_budget(64);
        let first = provider.create_texture(&TextureDescriptor::bgra8(2, 4));
        assert!(first.is_ok());
        assert_eq!(provider.allocated_bytes(), 32);
        let over = MemoryTextureError::OverBudget {
            requested: 64,
            remaining: 32,
        };
        let second = provider.create_texture(&TextureDescriptor::bgra8(4, 4));
        assert_eq!(second, Err(over));
    }

    #[test]
    fn map_requires_matching_unmap() {
        let mut provider = MemoryTextureProvider::new();
        let mut texture = provider
            .create_texture(&TextureDescriptor::bgra8(1, 1))
            .unwrap();
        {
            let mapped = provider.map(&mut texture).unwrap();
            assert_eq!(mapped.pitch, 4);
            mapped.bytes.copy_from_slice(&[0x33, 0x22, 0x11, 0x80]);
        }
        assert_eq!(
            provider.map(&mut texture).unwrap_err(),
            MemoryTextureError::AlreadyMapped
        );
        provider.unmap(&mut texture).unwrap();
        assert_eq!(
            provider.unmap(&mut texture),
            Err(MemoryTextureError::NotMapped)
        );
        assert_eq!(texture.pixel(0, 0), Some(Argb(0x80_11_22_33)));
        assert_eq!(texture.pixel(1, 0), None);
    }

    #[test]
    fn zero_sized_textures_are_refused() {
        let mut provider = MemoryTextureProvider::new();
        assert!(matches!(
            provider.create_texture(&TextureDescriptor::bgra8(0, 3)),
            Err(MemoryTextureError::ZeroSize { .. })
        ));
    }

    #[test]
    fn generated_texture_converts_to_result() {
        let generated = GeneratedTexture {
            width: 3,
            height: 2,
            texture: 7_u8,
        };
        let result = TextureResult::from(generated);
        assert!(!result.is_empty());
        assert_eq!((result.width, result.height), (3, 2));
        assert!(TextureResult::<u8>::empty().is_empty());
    }
}
