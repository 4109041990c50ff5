// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

use super::utils::{empty_font_context, test_manager_with, text, TEST_OPTIONS};
use crate::{
    MappedRect, MemoryTextureError, MemoryTextureProvider, RectDescriptor, TextureDescriptor,
    TextureError, TextureManager, TextureProvider,
};

fn manager_with<P: TextureProvider>(provider: P) -> TextureManager<P> {
    TextureManager::with_font_context(provider, empty_font_context(), TEST_OPTIONS, None).unwrap()
}

#[test]
fn allocation_failure_gives_the_empty_result() {
    let mut manager = manager_with(MemoryTextureProvider::with_budget(16 * 16 * 4));
    let big = RectDescriptor::new(32, 32, 0xFF_FF_FF_FF);

    assert!(manager.create_rect_texture(&big).is_empty());
    let Err(TextureError::Provider(source)) = manager.try_create_rect_texture(&big) else {
        panic!("expected a provider error");
    };
    assert!(matches!(
        source.downcast_ref::<MemoryTextureError>(),
        Some(MemoryTextureError::OverBudget { .. })
    ));

    let small = RectDescriptor::new(16, 16, 0xFF_FF_FF_FF);
    assert!(!manager.create_rect_texture(&small).is_empty());
}

#[test]
fn font_allocation_failure_gives_the_empty_result() {
    let mut manager = test_manager_with(MemoryTextureProvider::with_budget(4));
    assert!(manager.create_font_texture(&text("Hello")).is_empty());
}

/// Texture that reports how many instances are alive.
#[derive(Debug)]
struct Tracked {
    live: Rc<Cell<usize>>,
    desc: TextureDescriptor,
    bytes: Vec<u8>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Debug, Error)]
#[error("{0} refused")]
struct Refused(&'static str);

/// Provider that fails at a chosen step.
struct FlakyProvider {
    live: Rc<Cell<usize>>,
    fail_describe: bool,
    fail_map: bool,
    fail_unmap: bool,
    unmaps: usize,
}

impl FlakyProvider {
    fn new() -> Self {
        Self {
            live: Rc::new(Cell::new(0)),
            fail_describe: false,
            fail_map: false,
            fail_unmap: false,
            unmaps: 0,
        }
    }
}

impl TextureProvider for FlakyProvider {
    type Texture = Tracked;
    type Error = Refused;

    fn create_texture(&mut self, desc: &TextureDescriptor) -> Result<Tracked, Refused> {
        self.live.set(self.live.get() + 1);
        Ok(Tracked {
            live: self.live.clone(),
            desc: *desc,
            bytes: vec![0; desc.width as usize * desc.height as usize * 4],
        })
    }

    fn describe(&self, texture: &Tracked) -> Result<TextureDescriptor, Refused> {
        if self.fail_describe {
            return Err(Refused("describe"));
        }
        Ok(texture.desc)
    }

    fn map<'t>(&mut self, texture: &'t mut Tracked) -> Result<MappedRect<'t>, Refused> {
        if self.fail_map {
            return Err(Refused("map"));
        }
        let pitch = texture.desc.width as usize * 4;
        Ok(MappedRect {
            bytes: &mut texture.bytes,
            pitch,
        })
    }

    fn unmap(&mut self, _texture: &mut Tracked) -> Result<(), Refused> {
        self.unmaps += 1;
        if self.fail_unmap {
            return Err(Refused("unmap"));
        }
        Ok(())
    }
}

#[test]
fn partial_textures_are_released() {
    for step in ["describe", "map", "unmap"] {
        let mut provider = FlakyProvider::new();
        provider.fail_describe = step == "describe";
        provider.fail_map = step == "map";
        provider.fail_unmap = step == "unmap";
        let live = provider.live.clone();
        let mut manager = manager_with(provider);

        let result = manager.try_create_rect_texture(&RectDescriptor::new(8, 8, 0xFF_FF_FF_FF));
        let Err(TextureError::Provider(source)) = result else {
            panic!("{step}: expected a provider error");
        };
        assert_eq!(source.to_string(), format!("{step} refused"));
        assert_eq!(live.get(), 0, "{step}: texture must be dropped");
    }
}

#[test]
fn successful_upload_unmaps_once_and_hands_over_ownership() {
    let provider = FlakyProvider::new();
    let live = provider.live.clone();
    let mut manager = manager_with(provider);

    let result = manager.create_rect_texture(&RectDescriptor::new(8, 8, 0xFF_00_00_FF));
    assert_eq!(manager.provider().unmaps, 1);
    let texture = result.texture.unwrap();
    assert_eq!(&texture.bytes[..4], &[0xFF, 0x00, 0x00, 0xFF]);

    drop(manager);
    assert_eq!(live.get(), 1, "texture outlives the manager");
    drop(texture);
    assert_eq!(live.get(), 0);
}
