// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clip regions built from axis-aligned rectangles.

use tiny_skia::{FillRule, Mask, PathBuilder, Rect, Transform};

/// An area made of pairwise disjoint rectangles.
///
/// Supports the two compositions the clip engine needs: intersection and
/// exclusion. An empty region clips everything away.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Region {
    rects: Vec<Rect>,
}

impl Region {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_rect(rect: Rect) -> Self {
        Self { rects: vec![rect] }
    }

    /// A single-rectangle region, or the empty region when the edges do not
    /// enclose any area.
    pub(crate) fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            rects: rect_ltrb(left, top, right, bottom).into_iter().collect(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub(crate) fn bounds(&self) -> Option<Rect> {
        let first = self.rects.first()?;
        let (mut left, mut top, mut right, mut bottom) =
            (first.left(), first.top(), first.right(), first.bottom());
        for rect in &self.rects[1..] {
            left = left.min(rect.left());
            top = top.min(rect.top());
            right = right.max(rect.right());
            bottom = bottom.max(rect.bottom());
        }
        rect_ltrb(left, top, right, bottom)
    }

    #[cfg(test)]
    pub(crate) fn area(&self) -> f32 {
        self.rects.iter().map(|r| r.width() * r.height()).sum()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, x: f32, y: f32) -> bool {
        self.rects
            .iter()
            .any(|r| x >= r.left() && x < r.right() && y >= r.top() && y < r.bottom())
    }

    /// Adds `rect` to the region.
    ///
    /// Parts already covered are dropped so the rectangles stay disjoint.
    pub(crate) fn union_rect(&mut self, rect: Rect) {
        let mut pieces = Self::from_rect(rect);
        pieces.exclude(self);
        self.rects.extend(pieces.rects);
    }

    pub(crate) fn intersect(&mut self, other: &Self) {
        let mut out = Vec::with_capacity(self.rects.len());
        for a in &self.rects {
            out.extend(other.rects.iter().filter_map(|b| intersection(a, b)));
        }
        self.rects = out;
    }

    pub(crate) fn exclude(&mut self, other: &Self) {
        for b in &other.rects {
            if self.rects.is_empty() {
                return;
            }
            let mut out = Vec::with_capacity(self.rects.len() + 3);
            for a in &self.rects {
                subtract(a, b, &mut out);
            }
            self.rects = out;
        }
    }

    /// Rasterizes the region into a hard-edged clip mask.
    pub(crate) fn to_mask(&self, width: u32, height: u32) -> Option<Mask> {
        let mut mask = Mask::new(width, height)?;
        let mut builder = PathBuilder::new();
        for rect in &self.rects {
            builder.push_rect(*rect);
        }
        if let Some(path) = builder.finish() {
            mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
        }
        Some(mask)
    }
}

fn rect_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Option<Rect> {
    if left < right && top < bottom {
        Rect::from_ltrb(left, top, right, bottom)
    } else {
        None
    }
}

fn intersection(a: &Rect, b: &Rect) -> Option<Rect> {
    rect_ltrb(
        a.left().max(b.left()),
        a.top().max(b.top()),
        a.right().min(b.right()),
        a.bottom().min(b.bottom()),
    )
}

/// Pushes the parts of `a` outside `b`: full-width bands above and below,
/// then the left and right slivers beside the overlap.
fn subtract(a: &Rect, b: &Rect, out: &mut Vec<Rect>) {
    let Some(overlap) = intersection(a, b) else {
        out.push(*a);
        return;
    };
    let pieces = [
        rect_ltrb(a.left(), a.top(), a.right(), overlap.top()),
        rect_ltrb(a.left(), overlap.bottom(), a.right(), a.bottom()),
        rect_ltrb(a.left(), overlap.top(), overlap.left(), overlap.bottom()),
        rect_ltrb(overlap.right(), overlap.top(), a.right(), overlap.bottom()),
    ];
    out.extend(pieces.into_iter().flatten());
}
