// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed colors and the paints built from them.

use tiny_skia::{Color, GradientStop, LinearGradient, Paint, Point, Shader, SpreadMode, Transform};

/// A color packed as `0xAARRGGBB`.
///
/// Malformed bits are accepted as-is; an alpha of zero is simply invisible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Builds a color from its four channels.
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Alpha channel.
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Returns `true` if any paint would land with this color.
    pub const fn is_visible(self) -> bool {
        self.alpha() != 0
    }

    pub(crate) fn to_color(self) -> Color {
        Color::from_rgba8(self.red(), self.green(), self.blue(), self.alpha())
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Direction of a two-color linear gradient across the drawing box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientStyle {
    /// Solid fill, no gradient.
    #[default]
    None,
    /// Left to right.
    LeftToRight,
    /// Top-left to bottom-right.
    TopLeftToBottomRight,
    /// Top to bottom.
    TopToBottom,
    /// Top-right to bottom-left.
    TopRightToBottomLeft,
    /// Right to left.
    RightToLeft,
    /// Bottom-right to top-left.
    BottomRightToTopLeft,
    /// Bottom to top.
    BottomToTop,
    /// Bottom-left to top-right.
    BottomLeftToTopRight,
}

impl GradientStyle {
    /// Decodes the numeric style code used by callers.
    ///
    /// `0` is no gradient, `1..=8` are the compass directions, and any other
    /// value falls back to left to right.
    pub const fn from_code(code: u32) -> Self {
        match code {
            0 => Self::None,
            2 => Self::TopLeftToBottomRight,
            3 => Self::TopToBottom,
            4 => Self::TopRightToBottomLeft,
            5 => Self::RightToLeft,
            6 => Self::BottomRightToTopLeft,
            7 => Self::BottomToTop,
            8 => Self::BottomLeftToTopRight,
            _ => Self::LeftToRight,
        }
    }

    /// The numeric code for this style.
    pub const fn code(self) -> u32 {
        match self {
            Self::None => 0,
            Self::LeftToRight => 1,
            Self::TopLeftToBottomRight => 2,
            Self::TopToBottom => 3,
            Self::TopRightToBottomLeft => 4,
            Self::RightToLeft => 5,
            Self::BottomRightToTopLeft => 6,
            Self::BottomToTop => 7,
            Self::BottomLeftToTopRight => 8,
        }
    }

    /// Start and end points of the gradient axis inside a `width`×`height` box.
    pub fn endpoints(self, width: f32, height: f32) -> Option<((f32, f32), (f32, f32))> {
        let (start, end) = match self {
            Self::None => return None,
            Self::LeftToRight => ((0.0, 0.0), (width, 0.0)),
            Self::TopLeftToBottomRight => ((0.0, 0.0), (width, height)),
            Self::TopToBottom => ((0.0, 0.0), (0.0, height)),
            Self::TopRightToBottomLeft => ((width, 0.0), (0.0, height)),
            Self::RightToLeft => ((width, 0.0), (0.0, 0.0)),
            Self::BottomRightToTopLeft => ((width, height), (0.0, 0.0)),
            Self::BottomToTop => ((0.0, height), (0.0, 0.0)),
            Self::BottomLeftToTopRight => ((0.0, height), (width, 0.0)),
        };
        Some((start, end))
    }
}

/// Fill description shared by the font and rectangle paths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FillStyle {
    pub(crate) color: Argb,
    pub(crate) gradient: GradientStyle,
    pub(crate) gradient_color: Argb,
}

impl FillStyle {
    /// Whether a fill with this style could leave any ink.
    pub(crate) fn is_visible(&self) -> bool {
        self.color.is_visible()
            || (self.gradient != GradientStyle::None && self.gradient_color.is_visible())
    }

    /// Builds the paint for a `width`×`height` drawing box.
    pub(crate) fn to_paint(self, width: f32, height: f32) -> Paint<'static> {
        let mut paint = solid_paint(self.color);
        // A zero-length axis has no direction; the base color is used alone.
        if let Some((start, end)) = self
            .gradient
            .endpoints(width, height)
            .filter(|(start, end)| start != end)
        {
            if let Some(shader) = LinearGradient::new(
                Point::from_xy(start.0, start.1),
                Point::from_xy(end.0, end.1),
                vec![
                    GradientStop::new(0.0, self.color.to_color()),
                    GradientStop::new(1.0, self.gradient_color.to_color()),
                ],
                SpreadMode::Pad,
                Transform::identity(),
            ) {
                paint.shader = shader;
            }
        }
        paint
    }
}

/// An anti-aliased paint of a single color.
pub(crate) fn solid_paint(color: Argb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.shader = Shader::SolidColor(color.to_color());
    paint.anti_alias = true;
    paint.force_hq_pipeline = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channels() {
        let color = Argb(0x80_11_22_33);
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.red(), 0x11);
        assert_eq!(color.green(), 0x22);
        assert_eq!(color.blue(), 0x33);
        assert_eq!(Argb::from_channels(0x80, 0x11, 0x22, 0x33), color);
    }

    #[test]
    fn zero_alpha_is_invisible() {
        assert!(!Argb(0x00_FF_FF_FF).is_visible());
        assert!(Argb(0x01_00_00_00).is_visible());
    }

    #[test]
    fn unknown_codes_fall_back_to_left_to_right() {
        assert_eq!(GradientStyle::from_code(9), GradientStyle::LeftToRight);
        assert_eq!(
            GradientStyle::from_code(u32::MAX),
            GradientStyle::LeftToRight
        );
        for code in 0..=8 {
            assert_eq!(GradientStyle::from_code(code).code(), code, "code {code}");
        }
    }

    #[test]
    fn compass_endpoints() {
        let cases = [
            (1, ((0.0, 0.0), (10.0, 0.0))),
            (2, ((0.0, 0.0), (10.0, 20.0))),
            (3, ((0.0, 0.0), (0.0, 20.0))),
            (4, ((10.0, 0.0), (0.0, 20.0))),
            (5, ((10.0, 0.0), (0.0, 0.0))),
            (6, ((10.0, 20.0), (0.0, 0.0))),
            (7, ((0.0, 20.0), (0.0, 0.0))),
            (8, ((0.0, 20.0), (10.0, 0.0))),
        ];
        for (code, expected) in cases {
            assert_eq!(
                GradientStyle::from_code(code).endpoints(10.0, 20.0),
                Some(expected),
                "style {code}"
            );
        }
        assert_eq!(GradientStyle::None.endpoints(10.0, 20.0), None);
    }

    #[test]
    fn gradient_alone_makes_a_fill_visible() {
        let style = FillStyle {
            color: Argb::TRANSPARENT,
            gradient: GradientStyle::TopToBottom,
            gradient_color: Argb(0xFF_00_00_FF),
        };
        assert!(style.is_visible());

        let hidden = FillStyle {
            gradient: GradientStyle::None,
            ..style
        };
        assert!(!hidden.is_visible());
    }

    #[test]
    fn solid_style_uses_solid_shader() {
        let paint = FillStyle {
            color: Argb(0xFF_FF_00_00),
            gradient: GradientStyle::None,
            gradient_color: Argb::TRANSPARENT,
        }
        .to_paint(10.0, 10.0);
        assert!(paint.anti_alias);
        assert!(matches!(paint.shader, Shader::SolidColor(_)));
    }

    #[test]
    fn degenerate_gradient_falls_back_to_solid() {
        let paint = FillStyle {
            color: Argb(0xFF_FF_00_00),
            gradient: GradientStyle::TopToBottom,
            gradient_color: Argb(0xFF_00_00_FF),
        }
        .to_paint(10.0, 0.0);
        assert!(matches!(paint.shader, Shader::SolidColor(_)));
    }
}
