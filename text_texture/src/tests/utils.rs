// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;
use std::sync::Arc;

use parley::fontique::{Blob, Collection, CollectionOptions, SourceCache};
use parley::FontContext;
use text_texture_dev::{font_dirs, is_font_file, FONT_DIR_VAR, TEST_FAMILY};

use crate::{
    Argb, FontDescriptor, ManagerOptions, MemoryTexture, MemoryTextureProvider, TextureManager,
    TextureProvider,
};

/// Canvas used by the pipeline tests; large enough for every sample string.
pub(crate) const TEST_OPTIONS: ManagerOptions = ManagerOptions {
    canvas_width: 512,
    canvas_height: 256,
    trim_scan_factor: 2,
};

pub(crate) fn load_fonts(
    collection: &mut Collection,
    font_dirs: impl Iterator<Item = PathBuf>,
) -> std::io::Result<()> {
    for dir in font_dirs {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.metadata()?.is_file() || !is_font_file(&entry.path()) {
                continue;
            }
            let font_data = std::fs::read(entry.path())?;
            collection.register_fonts(Blob::new(Arc::new(font_data)), None);
        }
    }
    Ok(())
}

/// A private collection with the test fonts.
///
/// Panics when the test family cannot be found, so a host without it fails
/// loudly instead of skipping the pipeline tests.
pub(crate) fn test_font_context() -> FontContext {
    let mut collection = Collection::new(CollectionOptions {
        shared: false,
        system_fonts: false,
    });
    load_fonts(&mut collection, font_dirs()).expect("font directories are readable");
    assert!(
        collection.family_id(TEST_FAMILY).is_some(),
        "{TEST_FAMILY} not found; set {FONT_DIR_VAR} to a directory containing it"
    );
    FontContext {
        collection,
        source_cache: SourceCache::default(),
    }
}

/// A manager over the test fonts.
pub(crate) fn test_manager_with<P: TextureProvider>(provider: P) -> TextureManager<P> {
    TextureManager::with_font_context(provider, test_font_context(), TEST_OPTIONS, None).unwrap()
}

pub(crate) fn test_manager() -> TextureManager<MemoryTextureProvider> {
    test_manager_with(MemoryTextureProvider::new())
}

/// A context without any fonts.
pub(crate) fn empty_font_context() -> FontContext {
    FontContext {
        collection: Collection::new(CollectionOptions {
            shared: false,
            system_fonts: false,
        }),
        source_cache: SourceCache::default(),
    }
}

/// A manager with no fonts at all, for the rectangle pipeline.
pub(crate) fn fontless_manager() -> TextureManager<MemoryTextureProvider> {
    TextureManager::with_font_context(
        MemoryTextureProvider::new(),
        empty_font_context(),
        TEST_OPTIONS,
        None,
    )
    .unwrap()
}

/// Opaque white sample text in the test family.
pub(crate) fn text(text: &str) -> FontDescriptor {
    FontDescriptor::new(TEST_FAMILY, text, 32.0)
}

/// Every pixel of `texture` paired with its coordinates.
pub(crate) fn pixels(texture: &MemoryTexture) -> impl Iterator<Item = (u32, u32, Argb)> + '_ {
    (0..texture.height()).flat_map(move |y| {
        (0..texture.width()).filter_map(move |x| texture.pixel(x, y).map(|p| (x, y, p)))
    })
}

/// Whether `pixel` is mostly `channel` (`0` red, `1` green, `2` blue) at
/// full coverage.
pub(crate) fn is_saturated(pixel: Argb, channel: usize) -> bool {
    let rgb = [pixel.red(), pixel.green(), pixel.blue()];
    pixel.alpha() == 255
        && rgb[channel] >= 250
        && rgb
            .iter()
            .enumerate()
            .all(|(index, &value)| index == channel || value <= 5)
}
