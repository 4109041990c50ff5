// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipped drawing on the canvas.

use tiny_skia::{Mask, Paint, Path, Rect, Stroke};

use crate::canvas::Canvas;
use crate::region::Region;

/// Draws paths on a canvas through a working clip.
///
/// The base region starts as the outline bounds and shrinks as colored
/// ranges claim their areas. The active clip is either unrestricted or a
/// mask built from some region.
pub(crate) struct DrawContext<'a> {
    canvas: &'a mut Canvas,
    base: Region,
    active: Option<Mask>,
}

impl<'a> DrawContext<'a> {
    pub(crate) fn new(canvas: &'a mut Canvas, bounds: Rect) -> Self {
        Self {
            canvas,
            base: Region::from_rect(bounds),
            active: None,
        }
    }

    pub(crate) fn base(&self) -> &Region {
        &self.base
    }

    /// Narrows the base region to `region`.
    pub(crate) fn intersect_base(&mut self, region: &Region) {
        self.base.intersect(region);
    }

    /// Fills `path` inside `base ∩ region`, then removes `region` from the base
    /// so later draws cannot paint over it.
    pub(crate) fn fill_claiming(&mut self, path: &Path, paint: &Paint<'_>, region: &Region) {
        let mut clip = self.base.clone();
        clip.intersect(region);
        if !clip.is_empty() {
            if let Some(mask) = self.mask_for(&clip) {
                self.canvas.fill_path(path, paint, Some(&mask));
            }
        }
        self.base.exclude(region);
    }

    /// Makes the base region the active clip for the following draws.
    pub(crate) fn clip_to_base(&mut self) {
        self.active = self.mask_for(&self.base);
    }

    pub(crate) fn fill(&mut self, path: &Path, paint: &Paint<'_>) {
        self.canvas.fill_path(path, paint, self.active.as_ref());
    }

    pub(crate) fn stroke(&mut self, path: &Path, paint: &Paint<'_>, stroke: &Stroke) {
        self.canvas
            .stroke_path(path, paint, stroke, self.active.as_ref());
    }

    fn mask_for(&self, region: &Region) -> Option<Mask> {
        region.to_mask(self.canvas.width(), self.canvas.height())
    }
}
