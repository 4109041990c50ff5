// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector outlines for text and rounded rectangles, plus character range
//! measurement over a text layout.
//!
//! Text is laid out with Parley, glyph outlines come from Skrifa, and
//! everything is collected into a single Tiny-Skia path so the whole string
//! can be filled or stroked at once.

use std::borrow::Cow;

use parley::style::{FontFamily, FontStack, FontStyle, FontWeight, StyleProperty};
use parley::FontContext;
use parley::{Alignment, AlignmentOptions, GlyphRun, Layout, LayoutContext, PositionedLayoutItem};
use skrifa::{
    instance::{LocationRef, NormalizedCoord, Size},
    outline::{DrawSettings, OutlinePen},
    raw::FontRef as ReadFontsRef,
    GlyphId,
    MetadataProvider,
};
use tiny_skia::{Path, PathBuilder, Rect};

use crate::descriptor::{CharRange, FontStyleFlags};
use crate::error::TextureError;
use crate::region::Region;

/// Layouts here only produce geometry; paint is applied later.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct OutlineBrush;

/// The outline of a laid out string.
pub(crate) struct TextOutline {
    pub(crate) path: Path,
    pub(crate) layout: Layout<OutlineBrush>,
    /// Length of the text in characters.
    pub(crate) text_len: usize,
}

/// Font parameters for [`build_text_outline`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextStyle<'a> {
    pub(crate) family: &'a str,
    pub(crate) font_size: f32,
    pub(crate) flags: FontStyleFlags,
}

/// Lays out `text` from the origin without wrapping and converts every glyph
/// into one path. Underline and strikeout bars become rectangles of the path.
pub(crate) fn build_text_outline(
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<OutlineBrush>,
    text: &str,
    style: TextStyle<'_>,
) -> Result<TextOutline, TextureError> {
    if font_cx.collection.family_id(style.family).is_none() {
        return Err(TextureError::FamilyNotFound(style.family.to_owned()));
    }

    let family = FontStack::Single(FontFamily::Named(Cow::Borrowed(style.family)));
    let mut builder = layout_cx.ranged_builder(font_cx, text, 1.0, true);
    builder.push_default(StyleProperty::FontStack(family));
    builder.push_default(StyleProperty::FontSize(style.font_size));
    if style.flags.contains(FontStyleFlags::BOLD) {
        builder.push_default(StyleProperty::FontWeight(FontWeight::BOLD));
    }
    if style.flags.contains(FontStyleFlags::ITALIC) {
        builder.push_default(StyleProperty::FontStyle(FontStyle::Italic));
    }
    if style.flags.contains(FontStyleFlags::UNDERLINE) {
        builder.push_default(StyleProperty::Underline(true));
    }
    if style.flags.contains(FontStyleFlags::STRIKEOUT) {
        builder.push_default(StyleProperty::Strikethrough(true));
    }

    let mut layout: Layout<OutlineBrush> = builder.build(text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, AlignmentOptions::default());

    let mut pen = PathPen::default();
    for line in layout.lines() {
        for item in line.items() {
            if let PositionedLayoutItem::GlyphRun(glyph_run) = item {
                append_glyph_run(&glyph_run, &mut pen)?;
            }
        }
    }

    let path = pen.finish().ok_or(TextureError::EmptySurface)?;
    Ok(TextOutline {
        path,
        layout,
        text_len: text.chars().count(),
    })
}

fn append_glyph_run(
    glyph_run: &GlyphRun<'_, OutlineBrush>,
    pen: &mut PathPen,
) -> Result<(), TextureError> {
    let run = glyph_run.run();
    let font = run.font();
    let font_size = run.font_size();

    let normalized_coords = run
        .normalized_coords()
        .iter()
        .map(|coord| NormalizedCoord::from_bits(*coord))
        .collect::<Vec<_>>();

    let font_ref = ReadFontsRef::from_index(font.data.as_ref(), font.index)
        .map_err(|err| TextureError::Outline(err.to_string()))?;
    let outlines = font_ref.outline_glyphs();
    let location = LocationRef::new(&normalized_coords);

    pen.skew = run
        .synthesis()
        .skew()
        .map_or(0.0, |angle| angle.to_radians().tan());
    for glyph in glyph_run.positioned_glyphs() {
        // Glyphs without outlines (spaces, bitmap-only glyphs) leave no ink.
        let Some(outline) = outlines.get(GlyphId::new(u32::from(glyph.id))) else {
            continue;
        };
        pen.set_origin(glyph.x, glyph.y);
        let settings = DrawSettings::unhinted(Size::new(font_size), location);
        outline
            .draw(settings, &mut *pen)
            .map_err(|err| TextureError::Outline(err.to_string()))?;
    }
    pen.skew = 0.0;

    let style = glyph_run.style();
    let metrics = run.metrics();
    if let Some(decoration) = &style.underline {
        let offset = decoration.offset.unwrap_or(metrics.underline_offset);
        let size = decoration.size.unwrap_or(metrics.underline_size);
        push_decoration(pen, glyph_run, offset, size);
    }
    if let Some(decoration) = &style.strikethrough {
        let offset = decoration.offset.unwrap_or(metrics.strikethrough_offset);
        let size = decoration.size.unwrap_or(metrics.strikethrough_size);
        push_decoration(pen, glyph_run, offset, size);
    }
    Ok(())
}

fn push_decoration(
    pen: &mut PathPen,
    glyph_run: &GlyphRun<'_, OutlineBrush>,
    offset: f32,
    size: f32,
) {
    let y = glyph_run.baseline() - offset;
    let x = glyph_run.offset();
    if let Some(rect) = Rect::from_xywh(x, y, glyph_run.advance(), size) {
        pen.path.push_rect(rect);
    }
}

/// Collects glyph outlines, flipping them from font space (y up) into canvas
/// space (y down) around the current origin.
#[derive(Default)]
struct PathPen {
    path: PathBuilder,
    x: f32,
    y: f32,
    /// Horizontal shear for synthetic italics.
    skew: f32,
}

impl PathPen {
    fn set_origin(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x + y * self.skew, self.y - y)
    }

    fn finish(self) -> Option<Path> {
        self.path.finish()
    }
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.map(cx0, cy0);
        let (x, y) = self.map(x, y);
        self.path.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.map(cx0, cy0);
        let (cx1, cy1) = self.map(cx1, cy1);
        let (x, y) = self.map(x, y);
        self.path.cubic_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.path.close();
    }
}

/// Measures the area covered by each of `ranges` inside the
/// `(0, 0)`-`(box_width, box_height)` box.
///
/// Every cluster touching a range contributes its advance times the height of
/// its line. Ranges are clamped to the text length first.
pub(crate) fn measure_ranges(
    outline: &TextOutline,
    text: &str,
    ranges: &[CharRange],
    box_width: f32,
    box_height: f32,
) -> Vec<Region> {
    let layout_box = Region::from_ltrb(0.0, 0.0, box_width, box_height);
    ranges
        .iter()
        .map(|range| {
            let bytes = range.clamp_to(outline.text_len).to_byte_range(text);
            let mut region = measure_bytes(&outline.layout, bytes);
            region.intersect(&layout_box);
            region
        })
        .collect()
}

fn measure_bytes(layout: &Layout<OutlineBrush>, bytes: core::ops::Range<usize>) -> Region {
    let mut region = Region::empty();
    if bytes.is_empty() {
        return region;
    }
    for line in layout.lines() {
        let metrics = line.metrics();
        let (top, bottom) = (metrics.min_coord, metrics.max_coord);
        // Horizontal span being grown from adjacent clusters.
        let mut span: Option<(f32, f32)> = None;
        for item in line.items() {
            let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };
            let mut x = glyph_run.offset();
            let run = glyph_run.run();
            for cluster in run.visual_clusters() {
                let advance = cluster.advance();
                let range = cluster.text_range();
                if range.start < bytes.end && bytes.start < range.end {
                    span = match span {
                        Some((left, right)) if (right - x).abs() < 0.01 => {
                            Some((left, x + advance))
                        }
                        Some((left, right)) => {
                            push_span(&mut region, left, right, top, bottom);
                            Some((x, x + advance))
                        }
                        None => Some((x, x + advance)),
                    };
                }
                x += advance;
            }
        }
        if let Some((left, right)) = span {
            push_span(&mut region, left, right, top, bottom);
        }
    }
    region
}

fn push_span(region: &mut Region, left: f32, right: f32, top: f32, bottom: f32) {
    if let Some(rect) = Rect::from_ltrb(left.min(right), top, left.max(right), bottom) {
        region.union_rect(rect);
    }
}

/// Four-point approximation factor for a quarter circle.
const QUARTER_ARC_K: f32 = 0.552_284_8;

/// Builds the outline of `rect` with rounded corners.
///
/// A zero `radius` gives a plain rectangle. Otherwise each corner is a 90°
/// arc inside a `2 * radius` square anchored at that corner, starting at
/// 180° (top-left), 270° (top-right), 0° (bottom-right) and 90°
/// (bottom-left). The radius is clamped so opposite arcs cannot cross.
pub(crate) fn rounded_rect_path(rect: Rect, radius: f32) -> Path {
    if radius <= 0.0 {
        return PathBuilder::from_rect(rect);
    }
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    let diameter = radius * 2.0;

    let mut builder = PathBuilder::new();
    let (left, top) = (rect.left(), rect.top());
    let (right, bottom) = (rect.right() - diameter, rect.bottom() - diameter);
    push_quarter_arc(&mut builder, left, top, radius, 180.0);
    push_quarter_arc(&mut builder, right, top, radius, 270.0);
    push_quarter_arc(&mut builder, right, bottom, radius, 0.0);
    push_quarter_arc(&mut builder, left, bottom, radius, 90.0);
    builder.close();
    builder
        .finish()
        .unwrap_or_else(|| PathBuilder::from_rect(rect))
}

/// Appends a clockwise 90° arc of the circle inscribed in the square at
/// `(x, y)` with side `2 * radius`, connecting to the current point with a line.
fn push_quarter_arc(builder: &mut PathBuilder, x: f32, y: f32, radius: f32, start_degrees: f32) {
    let (cx, cy) = (x + radius, y + radius);
    let start = start_degrees.to_radians();
    let end = (start_degrees + 90.0).to_radians();
    let (sin0, cos0) = start.sin_cos();
    let (sin1, cos1) = end.sin_cos();

    let p0 = (cx + radius * cos0, cy + radius * sin0);
    let p3 = (cx + radius * cos1, cy + radius * sin1);
    let k = QUARTER_ARC_K * radius;
    let c1 = (p0.0 - k * sin0, p0.1 + k * cos0);
    let c2 = (p3.0 + k * sin1, p3.1 - k * cos1);

    if builder.is_empty() {
        builder.move_to(p0.0, p0.1);
    } else {
        builder.line_to(p0.0, p0.1);
    }
    builder.cubic_to(c1.0, c1.1, c2.0, c2.1, p3.0, p3.1);
}
