// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture provider backed by `wgpu`.
//!
//! Pixels are written into a CPU staging buffer while mapped and uploaded
//! with [`wgpu::Queue::write_texture`] when unmapped.

use pollster::block_on;
use thiserror::Error;
use wgpu::{
    Device, ErrorFilter, Extent3d, Origin3d, Queue, TexelCopyBufferLayout, TexelCopyTextureInfo,
    Texture, TextureAspect, TextureDimension, TextureFormat as WgpuFormat, TextureUsages,
};

use crate::texture::{MappedRect, TextureDescriptor, TextureFormat, TextureProvider};

/// Why the `wgpu` provider failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WgpuTextureError {
    /// The device reported an error while creating the texture.
    #[error("texture allocation failed: {0}")]
    Allocation(String),
    /// The device reported an error while uploading the pixels.
    #[error("texture upload failed: {0}")]
    Upload(String),
    /// `map` was called on a texture that is already mapped.
    #[error("texture is already mapped")]
    AlreadyMapped,
    /// `unmap` was called on a texture that is not mapped.
    #[error("texture is not mapped")]
    NotMapped,
}

/// A GPU texture plus the staging rows used while it is mapped.
#[derive(Debug)]
pub struct WgpuTexture {
    texture: Texture,
    staging: Option<Vec<u8>>,
}

impl WgpuTexture {
    /// The underlying `wgpu` texture.
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Consumes the wrapper, returning the `wgpu` texture.
    pub fn into_texture(self) -> Texture {
        self.texture
    }
}

/// Allocates `Bgra8Unorm` textures on a `wgpu` device.
#[derive(Debug, Clone)]
pub struct WgpuTextureProvider {
    device: Device,
    queue: Queue,
}

impl WgpuTextureProvider {
    /// Creates a provider for `device`, uploading through `queue`.
    pub fn new(device: Device, queue: Queue) -> Self {
        Self { device, queue }
    }

    /// The device textures are created on.
    pub fn device(&self) -> &Device {
        &self.device
    }
}

fn wgpu_format(format: TextureFormat) -> WgpuFormat {
    match format {
        TextureFormat::Bgra8 => WgpuFormat::Bgra8Unorm,
    }
}

fn pitch(texture: &Texture) -> usize {
    texture.width() as usize * TextureFormat::Bgra8.bytes_per_pixel()
}

impl TextureProvider for WgpuTextureProvider {
    type Texture = WgpuTexture;
    type Error = WgpuTextureError;

    fn create_texture(&mut self, desc: &TextureDescriptor) -> Result<WgpuTexture, Self::Error> {
        self.device.push_error_scope(ErrorFilter::OutOfMemory);
        self.device.push_error_scope(ErrorFilter::Validation);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("text_texture"),
            size: Extent3d {
                width: desc.width,
                height: desc.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: wgpu_format(desc.format),
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let validation = block_on(self.device.pop_error_scope());
        let out_of_memory = block_on(self.device.pop_error_scope());
        if let Some(err) = validation.or(out_of_memory) {
            return Err(WgpuTextureError::Allocation(err.to_string()));
        }
        Ok(WgpuTexture {
            texture,
            staging: None,
        })
    }

    fn describe(&self, texture: &WgpuTexture) -> Result<TextureDescriptor, Self::Error> {
        Ok(TextureDescriptor::bgra8(
            texture.texture.width(),
            texture.texture.height(),
        ))
    }

    fn map<'t>(&mut self, texture: &'t mut WgpuTexture) -> Result<MappedRect<'t>, Self::Error> {
        if texture.staging.is_some() {
            return Err(WgpuTextureError::AlreadyMapped);
        }
        let pitch = pitch(&texture.texture);
        let rows = texture.texture.height() as usize;
        let bytes = texture.staging.insert(vec![0; pitch * rows]);
        Ok(MappedRect { bytes, pitch })
    }

    fn unmap(&mut self, texture: &mut WgpuTexture) -> Result<(), Self::Error> {
        let staging = texture.staging.take().ok_or(WgpuTextureError::NotMapped)?;
        let size = texture.texture.size();

        self.device.push_error_scope(ErrorFilter::Validation);
        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture.texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            &staging,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(size.width * 4),
                rows_per_image: Some(size.height),
            },
            size,
        );
        match block_on(self.device.pop_error_scope()) {
            Some(err) => Err(WgpuTextureError::Upload(err.to_string())),
            None => Ok(()),
        }
    }
}
