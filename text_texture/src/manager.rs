// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The texture synthesizer and the resources it keeps between calls.

use std::path::Path;

use log::Log;
use parley::fontique::{Collection, CollectionOptions};
use parley::{FontContext, LayoutContext};
use tiny_skia::{Rect, Stroke};

use crate::canvas::{Canvas, Extent};
use crate::color::solid_paint;
use crate::descriptor::{FontDescriptor, RectDescriptor};
use crate::diagnostics::Diagnostics;
use crate::draw::DrawContext;
use crate::dump::{DumpKind, DumpState};
use crate::error::TextureError;
use crate::options::ManagerOptions;
use crate::outline::{
    build_text_outline, measure_ranges, rounded_rect_path, OutlineBrush, TextStyle,
};
use crate::texture::{GeneratedTexture, TextureDescriptor, TextureProvider, TextureResult};

/// Returns `true` if the system font catalog has a family named `family`.
pub fn is_font_available(family: &str) -> bool {
    let mut collection = Collection::new(CollectionOptions {
        shared: false,
        system_fonts: true,
    });
    collection.family_id(family).is_some()
}

/// Turns font and rectangle descriptions into textures.
///
/// The manager owns a large reusable canvas, the font and layout contexts,
/// and the texture provider. Every operation takes `&mut self`, so calls
/// against one manager are serialized; textures handed out are owned by the
/// caller and outlive the manager freely.
pub struct TextureManager<P: TextureProvider> {
    provider: P,
    font_cx: FontContext,
    layout_cx: LayoutContext<OutlineBrush>,
    canvas: Canvas,
    options: ManagerOptions,
    dump: DumpState,
    diagnostics: Diagnostics,
}

impl<P: TextureProvider> core::fmt::Debug for TextureManager<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextureManager")
            .field("canvas", &self.canvas)
            .field("options", &self.options)
            .field("dump", &self.dump)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl<P: TextureProvider> TextureManager<P> {
    /// Creates a manager using the system fonts and default options.
    pub fn new(provider: P) -> Result<Self, TextureError> {
        Self::with_logger(provider, None)
    }

    /// Creates a manager whose diagnostics go to `logger` instead of the
    /// global `log` facade.
    pub fn with_logger(provider: P, logger: Option<Box<dyn Log>>) -> Result<Self, TextureError> {
        Self::with_font_context(
            provider,
            FontContext::new(),
            ManagerOptions::default(),
            logger,
        )
    }

    /// Creates a manager with an explicit font collection and options.
    pub fn with_font_context(
        provider: P,
        font_cx: FontContext,
        options: ManagerOptions,
        logger: Option<Box<dyn Log>>,
    ) -> Result<Self, TextureError> {
        let canvas = Canvas::new(options.canvas_width, options.canvas_height)?;
        let diagnostics = Diagnostics::new(logger);
        diagnostics.debug(format_args!(
            "created texture manager with a {}x{} canvas",
            options.canvas_width, options.canvas_height
        ));
        Ok(Self {
            provider,
            font_cx,
            layout_cx: LayoutContext::new(),
            canvas,
            options,
            dump: DumpState::default(),
            diagnostics,
        })
    }

    /// The texture provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The texture provider, mutably.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// The options the manager was created with.
    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// Returns `true` if the manager's font collection has `family`.
    pub fn is_font_available(&mut self, family: &str) -> bool {
        self.font_cx.collection.family_id(family).is_some()
    }

    /// Writes a PNG copy of every following texture into `folder`.
    ///
    /// Fails only when the path is longer than
    /// [`MAX_DUMP_PATH_LEN`](crate::MAX_DUMP_PATH_LEN) bytes. The folder is
    /// not created or checked here; write problems are logged per texture.
    pub fn enable_texture_dump(&mut self, folder: impl AsRef<Path>) -> Result<(), TextureError> {
        self.dump.enable(folder.as_ref())
    }

    /// Stops writing PNG copies.
    pub fn disable_texture_dump(&mut self) {
        self.dump.disable();
    }

    /// Returns `true` if PNG copies are being written.
    pub fn is_texture_dump_enabled(&self) -> bool {
        self.dump.is_enabled()
    }

    /// Renders `desc` into a texture trimmed to its visible pixels.
    ///
    /// Returns the empty result on any failure; see
    /// [`try_create_font_texture`](Self::try_create_font_texture) for the
    /// reason.
    pub fn create_font_texture(&mut self, desc: &FontDescriptor) -> TextureResult<P::Texture> {
        match self.try_create_font_texture(desc) {
            Ok(texture) => texture.into(),
            Err(err) => {
                self.diagnostics.debug(format_args!(
                    "font texture for {:?} failed: {err}",
                    desc.text
                ));
                TextureResult::empty()
            }
        }
    }

    /// Renders `desc` into a texture trimmed to its visible pixels.
    pub fn try_create_font_texture(
        &mut self,
        desc: &FontDescriptor,
    ) -> Result<GeneratedTexture<P::Texture>, TextureError> {
        let (box_width, box_height) = self.effective_box(desc.box_width, desc.box_height);
        self.diagnostics.debug(format_args!(
            "rendering {:?} in {:?} at {}px into a {box_width}x{box_height} box",
            desc.text, desc.family, desc.font_size
        ));

        let outline = build_text_outline(
            &mut self.font_cx,
            &mut self.layout_cx,
            &desc.text,
            TextStyle {
                family: &desc.family,
                font_size: desc.font_size,
                flags: desc.style,
            },
        )?;
        self.diagnostics
            .trace(format_args!("decoded {} characters", outline.text_len));

        // Bounds include the pen, so miter joins of the outline are covered.
        let pen = Stroke {
            width: if desc.has_outline() {
                desc.outline_width
            } else {
                1.0
            },
            ..Stroke::default()
        };
        let bounds = outline
            .path
            .stroke(&pen, 1.0)
            .map(|stroked| stroked.bounds())
            .ok_or(TextureError::EmptySurface)?;

        self.canvas.clear(box_width, box_height);
        let (box_w, box_h) = (box_width as f32, box_height as f32);
        let mut cx = DrawContext::new(&mut self.canvas, bounds);

        if let Some(range) = desc.clip_range.filter(|range| range.length > 0) {
            let measured = measure_ranges(&outline, &desc.text, &[range], box_w, box_h);
            for region in &measured {
                cx.intersect_base(region);
            }
        }

        for colored in &desc.regions {
            let paint = solid_paint(colored.color);
            let measured = measure_ranges(&outline, &desc.text, &colored.ranges, box_w, box_h);
            for region in &measured {
                cx.fill_claiming(&outline.path, &paint, region);
            }
        }

        if desc.clip_range.is_some() || !desc.regions.is_empty() {
            self.diagnostics.trace(format_args!(
                "default paint clipped to {:?}",
                cx.base().bounds()
            ));
            cx.clip_to_base();
        }

        if desc.has_outline() {
            cx.stroke(&outline.path, &solid_paint(desc.outline_color), &pen);
        }

        let fill = desc.fill_style();
        if fill.is_visible() {
            let paint = fill.to_paint(bounds.width().ceil(), bounds.height().ceil());
            cx.fill(&outline.path, &paint);
        }

        let scan_width = ceil_px(bounds.right()).min(box_width);
        let scan_height = ceil_px(bounds.height())
            .saturating_mul(self.options.trim_scan_factor)
            .max(ceil_px(bounds.bottom()))
            .min(box_height);
        self.diagnostics
            .trace(format_args!("scanning {scan_width}x{scan_height} for ink"));
        let extent = self
            .canvas
            .ink_extent(scan_width, scan_height)
            .ok_or(TextureError::EmptySurface)?;
        self.diagnostics.trace(format_args!(
            "ink spans columns {}..{} and {} rows",
            extent.x,
            extent.x + extent.width,
            extent.height
        ));

        let texture = self.upload(extent)?;
        self.write_dump(DumpKind::Font, extent);
        Ok(GeneratedTexture {
            width: extent.width,
            height: extent.height,
            texture,
        })
    }

    /// Renders `desc` into a texture of exactly the requested size.
    ///
    /// Returns the empty result on any failure; see
    /// [`try_create_rect_texture`](Self::try_create_rect_texture) for the
    /// reason.
    pub fn create_rect_texture(&mut self, desc: &RectDescriptor) -> TextureResult<P::Texture> {
        match self.try_create_rect_texture(desc) {
            Ok(texture) => texture.into(),
            Err(err) => {
                self.diagnostics.debug(format_args!(
                    "{}x{} rect texture failed: {err}",
                    desc.width, desc.height
                ));
                TextureResult::empty()
            }
        }
    }

    /// Renders `desc` into a texture of exactly the requested size.
    ///
    /// A non-zero outline width shrinks the drawn rectangle so the stroke
    /// stays inside the texture.
    pub fn try_create_rect_texture(
        &mut self,
        desc: &RectDescriptor,
    ) -> Result<GeneratedTexture<P::Texture>, TextureError> {
        let (width, height) = (desc.width, desc.height);
        let (canvas_width, canvas_height) = (self.canvas.width(), self.canvas.height());
        if width == 0 || height == 0 || width > canvas_width || height > canvas_height {
            return Err(TextureError::ExceedsCanvas {
                width,
                height,
                canvas_width,
                canvas_height,
            });
        }
        self.diagnostics.debug(format_args!(
            "rendering {width}x{height} rect with radius {}",
            desc.diameter
        ));

        let draw_rect =
            inset_rect(width, height, desc.outline_width).ok_or(TextureError::EmptySurface)?;
        let path = rounded_rect_path(draw_rect, desc.diameter as f32);

        self.canvas.clear(width, height);

        let fill = desc.fill_style();
        if fill.is_visible() {
            let paint = fill.to_paint(width as f32, height as f32);
            self.canvas.fill_path(&path, &paint, None);
        }
        if desc.has_outline() {
            let stroke = Stroke {
                width: desc.outline_width as f32,
                ..Stroke::default()
            };
            self.canvas
                .stroke_path(&path, &solid_paint(desc.outline_color), &stroke, None);
        }

        let extent = Extent {
            x: 0,
            width,
            height,
        };
        let texture = self.upload(extent)?;
        self.write_dump(DumpKind::Rect, extent);
        Ok(GeneratedTexture {
            width,
            height,
            texture,
        })
    }

    /// Resolves a requested box: zero means the whole canvas, anything larger
    /// is clamped to it.
    fn effective_box(&self, width: u32, height: u32) -> (u32, u32) {
        let resolve = |requested: u32, limit: u32| match requested {
            0 => limit,
            requested => requested.min(limit),
        };
        (
            resolve(width, self.canvas.width()),
            resolve(height, self.canvas.height()),
        )
    }

    /// Allocates a texture for `extent` and copies the canvas pixels into it.
    ///
    /// A texture that fails after allocation is dropped, never returned.
    fn upload(&mut self, extent: Extent) -> Result<P::Texture, TextureError> {
        let desc = TextureDescriptor::bgra8(extent.width, extent.height);
        let mut texture = self
            .provider
            .create_texture(&desc)
            .map_err(TextureError::provider)?;
        let actual = self
            .provider
            .describe(&texture)
            .map_err(TextureError::provider)?;
        self.diagnostics.trace(format_args!(
            "copying {}x{} pixels into a {}x{} texture",
            extent.width, extent.height, actual.width, actual.height
        ));

        let copied = {
            let mapped = self
                .provider
                .map(&mut texture)
                .map_err(TextureError::provider)?;
            self.canvas.copy_bgra(extent, mapped.bytes, mapped.pitch)
        };
        let unmapped = self
            .provider
            .unmap(&mut texture)
            .map_err(TextureError::provider);
        copied?;
        unmapped?;
        Ok(texture)
    }

    fn write_dump(&self, kind: DumpKind, extent: Extent) {
        if !self.dump.is_enabled() {
            return;
        }
        let Some(pixmap) = self.canvas.crop(extent) else {
            self.diagnostics.warn(format_args!(
                "could not crop {}x{} pixels for the texture dump",
                extent.width, extent.height
            ));
            return;
        };
        match self.dump.write(kind, &pixmap) {
            Ok(path) => self
                .diagnostics
                .debug(format_args!("dumped texture to {}", path.display())),
            Err(err) => self.diagnostics.warn(format_args!("{err}")),
        }
    }
}

impl<P: TextureProvider> Drop for TextureManager<P> {
    fn drop(&mut self) {
        self.diagnostics
            .debug(format_args!("releasing texture manager"));
        self.diagnostics.flush();
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Float casts saturate; coordinates are clamped to the canvas right after."
)]
fn ceil_px(value: f32) -> u32 {
    value.ceil() as u32
}

/// The area left for a rectangle whose stroke of `outline_width` must fit
/// inside a `width`×`height` texture.
///
/// The inset is half the width rounded up and the total shrink is the width
/// rounded up to even. At least one pixel is always kept.
fn inset_rect(width: u32, height: u32, outline_width: u32) -> Option<Rect> {
    if outline_width == 0 {
        return Rect::from_xywh(0.0, 0.0, width as f32, height as f32);
    }
    let odd = outline_width % 2;
    let inset = outline_width / 2 + odd;
    let shrink = outline_width + odd;
    let fit = |size: u32| {
        let inner = size.saturating_sub(shrink).max(1);
        (inset.min(size - inner), inner)
    };
    let (x, inner_width) = fit(width);
    let (y, inner_height) = fit(height);
    Rect::from_xywh(x as f32, y as f32, inner_width as f32, inner_height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_outline_insets_by_half() {
        let expected = Rect::from_xywh(2.0, 2.0, 96.0, 46.0);
        assert_eq!(inset_rect(100, 50, 4), expected);
    }

    #[test]
    fn odd_outline_rounds_up() {
        let expected = Rect::from_xywh(2.0, 2.0, 96.0, 46.0);
        assert_eq!(inset_rect(100, 50, 3), expected);
        let expected = Rect::from_xywh(1.0, 1.0, 98.0, 48.0);
        assert_eq!(inset_rect(100, 50, 1), expected);
    }

    #[test]
    fn no_outline_keeps_full_rect() {
        assert_eq!(inset_rect(10, 20, 0), Rect::from_xywh(0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn oversized_outline_keeps_one_pixel() {
        let rect = inset_rect(4, 4, 10).unwrap();
        assert_eq!(rect.width(), 1.0);
        assert!(rect.right() <= 4.0, "{rect:?}");
    }
}
