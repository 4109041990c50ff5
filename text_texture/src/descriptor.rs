// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-facing descriptions of what to draw.

use crate::color::{Argb, FillStyle, GradientStyle};

/// Style bits for text, using the classic rasterizer encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontStyleFlags(u32);

impl FontStyleFlags {
    /// No styling.
    pub const REGULAR: Self = Self(0);
    /// Bold weight.
    pub const BOLD: Self = Self(1);
    /// Italic style.
    pub const ITALIC: Self = Self(2);
    /// Underline decoration.
    pub const UNDERLINE: Self = Self(4);
    /// Strikeout decoration.
    pub const STRIKEOUT: Self = Self(8);

    const ALL: u32 = 0b1111;

    /// Keeps the known bits of `bits` and drops the rest.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL)
    }

    /// The raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for FontStyleFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for FontStyleFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A run of characters, counted in Unicode scalar values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CharRange {
    /// Index of the first character.
    pub first: usize,
    /// Number of characters.
    pub length: usize,
}

impl CharRange {
    /// Creates a range of `length` characters starting at `first`.
    pub const fn new(first: usize, length: usize) -> Self {
        Self { first, length }
    }

    /// Clamps the range to a text of `text_len` characters.
    ///
    /// The length is shortened so the range never runs past the end.
    pub fn clamp_to(self, text_len: usize) -> Self {
        let first = self.first.min(text_len);
        Self {
            first,
            length: self.length.min(text_len - first),
        }
    }

    /// Converts the range to byte offsets into `text`.
    pub(crate) fn to_byte_range(self, text: &str) -> core::ops::Range<usize> {
        let byte_at = |index: usize| {
            text.char_indices()
                .nth(index)
                .map_or(text.len(), |(offset, _)| offset)
        };
        let start = byte_at(self.first);
        let end = match self.length {
            0 => start,
            len => byte_at(self.first + len),
        };
        start..end
    }
}

/// Characters painted with their own color instead of the font color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColoredRegion {
    /// Fill color for the ranges.
    pub color: Argb,
    /// Ranges receiving the color, in priority order.
    pub ranges: Vec<CharRange>,
}

impl ColoredRegion {
    /// Creates a region painting `ranges` with `color`.
    pub fn new(color: impl Into<Argb>, ranges: impl Into<Vec<CharRange>>) -> Self {
        Self {
            color: color.into(),
            ranges: ranges.into(),
        }
    }
}

/// Everything needed to render a string into a texture.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescriptor {
    /// Layout box width in pixels; `0` uses the whole canvas.
    ///
    /// Text is never wrapped to this width. Lines only break at explicit line
    /// breaks, and anything past the right edge of the box is cut off.
    pub box_width: u32,
    /// Layout box height in pixels; `0` uses the whole canvas.
    pub box_height: u32,
    /// Font family name.
    pub family: String,
    /// Text to render.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Bold, italic, underline and strikeout bits.
    pub style: FontStyleFlags,
    /// Base fill color.
    pub font_color: Argb,
    /// Outline stroke color.
    pub outline_color: Argb,
    /// Outline stroke width in pixels.
    pub outline_width: f32,
    /// Gradient direction of the base fill.
    pub gradient_style: GradientStyle,
    /// End color of the gradient.
    pub gradient_color: Argb,
    /// When set, only these characters are drawn.
    pub clip_range: Option<CharRange>,
    /// Recolored character ranges; earlier entries win over later ones.
    pub regions: Vec<ColoredRegion>,
}

impl FontDescriptor {
    /// A descriptor drawing `text` in opaque white with no outline.
    pub fn new(family: impl Into<String>, text: impl Into<String>, font_size: f32) -> Self {
        Self {
            box_width: 0,
            box_height: 0,
            family: family.into(),
            text: text.into(),
            font_size,
            style: FontStyleFlags::REGULAR,
            font_color: Argb(0xFF_FF_FF_FF),
            outline_color: Argb::TRANSPARENT,
            outline_width: 0.0,
            gradient_style: GradientStyle::None,
            gradient_color: Argb::TRANSPARENT,
            clip_range: None,
            regions: Vec::new(),
        }
    }

    /// Whether the outline stroke should be drawn.
    pub fn has_outline(&self) -> bool {
        self.outline_width > 0.0 && self.outline_color.is_visible()
    }

    pub(crate) fn fill_style(&self) -> FillStyle {
        FillStyle {
            color: self.font_color,
            gradient: self.gradient_style,
            gradient_color: self.gradient_color,
        }
    }
}

/// Everything needed to render a (rounded) rectangle into a texture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectDescriptor {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Corner size handed to the path builder as its radius; each corner arc
    /// spans twice this value. `0` gives square corners.
    pub diameter: u32,
    /// Outline stroke color.
    pub outline_color: Argb,
    /// Outline stroke width in pixels.
    pub outline_width: u32,
    /// Base fill color.
    pub fill_color: Argb,
    /// Gradient direction of the fill.
    pub gradient_style: GradientStyle,
    /// End color of the gradient.
    pub gradient_color: Argb,
}

impl RectDescriptor {
    /// A solid `width`×`height` rectangle of `fill_color`.
    pub fn new(width: u32, height: u32, fill_color: impl Into<Argb>) -> Self {
        Self {
            width,
            height,
            fill_color: fill_color.into(),
            ..Self::default()
        }
    }

    /// Whether the outline stroke should be drawn.
    pub fn has_outline(&self) -> bool {
        self.outline_width > 0 && self.outline_color.is_visible()
    }

    pub(crate) fn fill_style(&self) -> FillStyle {
        FillStyle {
            color: self.fill_color,
            gradient: self.gradient_style,
            gradient_color: self.gradient_color,
        }
    }
}
