// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reusable CPU surface every texture is drawn on before upload.

use tiny_skia::{FillRule, Mask, Paint, Path, Pixmap, Stroke, Transform};

use crate::error::TextureError;

const BYTES_PER_PIXEL: usize = 4;

/// A column offset plus size inside the canvas, always anchored at row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Extent {
    pub(crate) x: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Fixed-size premultiplied RGBA surface.
///
/// Every draw starts at the origin, so only the top-left working area ever
/// needs clearing between calls.
pub(crate) struct Canvas {
    pixmap: Pixmap,
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl Canvas {
    pub(crate) fn new(width: u32, height: u32) -> Result<Self, TextureError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(TextureError::CanvasAllocation { width, height })?;
        Ok(Self { pixmap })
    }

    pub(crate) fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub(crate) fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn stride(&self) -> usize {
        self.pixmap.width() as usize * BYTES_PER_PIXEL
    }

    /// Zeroes the top-left `width`×`height` area, clamped to the canvas.
    pub(crate) fn clear(&mut self, width: u32, height: u32) {
        let stride = self.stride();
        let row_bytes = width.min(self.width()) as usize * BYTES_PER_PIXEL;
        let rows = height.min(self.height()) as usize;
        for row in self.pixmap.data_mut().chunks_exact_mut(stride).take(rows) {
            row[..row_bytes].fill(0);
        }
    }

    pub(crate) fn fill_path(&mut self, path: &Path, paint: &Paint<'_>, mask: Option<&Mask>) {
        self.pixmap
            .fill_path(path, paint, FillRule::Winding, Transform::identity(), mask);
    }

    pub(crate) fn stroke_path(
        &mut self,
        path: &Path,
        paint: &Paint<'_>,
        stroke: &Stroke,
        mask: Option<&Mask>,
    ) {
        self.pixmap
            .stroke_path(path, paint, stroke, Transform::identity(), mask);
    }

    /// Finds the ink envelope inside the top-left `scan_width`×`scan_height`
    /// area: the first and last columns holding any non-transparent pixel and
    /// the last row holding one. Rows above the ink are kept.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Column and row indices are bounded by the canvas size, which is a u32."
    )]
    pub(crate) fn ink_extent(&self, scan_width: u32, scan_height: u32) -> Option<Extent> {
        let stride = self.stride();
        let row_bytes = scan_width.min(self.width()) as usize * BYTES_PER_PIXEL;
        let rows = scan_height.min(self.height()) as usize;

        let mut first = usize::MAX;
        let mut last = 0;
        let mut height = 0;
        for (y, row) in self
            .pixmap
            .data()
            .chunks_exact(stride)
            .take(rows)
            .enumerate()
        {
            let mut pixels = row[..row_bytes].chunks_exact(BYTES_PER_PIXEL);
            let Some(left) = pixels.position(is_inked) else {
                continue;
            };
            let right = pixels.rposition(is_inked).map_or(left, |r| left + 1 + r);
            first = first.min(left);
            last = last.max(right);
            height = y + 1;
        }

        (height > 0).then(|| Extent {
            x: first as u32,
            width: (last - first + 1) as u32,
            height: height as u32,
        })
    }

    /// Writes `extent` as straight-alpha BGRA rows, `pitch` bytes apart.
    pub(crate) fn copy_bgra(
        &self,
        extent: Extent,
        dest: &mut [u8],
        pitch: usize,
    ) -> Result<(), TextureError> {
        let row_bytes = extent.width as usize * BYTES_PER_PIXEL;
        let needed = match extent.height as usize {
            0 => 0,
            rows => (rows - 1) * pitch + row_bytes,
        };
        if pitch < row_bytes || dest.len() < needed {
            return Err(TextureError::MappingTooSmall {
                needed,
                actual: dest.len(),
            });
        }

        let canvas_width = self.width() as usize;
        let pixels = self.pixmap.pixels();
        for row in 0..extent.height as usize {
            let start = row * canvas_width + extent.x as usize;
            let src = &pixels[start..start + extent.width as usize];
            let dst = &mut dest[row * pitch..row * pitch + row_bytes];
            for (out, pixel) in dst.chunks_exact_mut(BYTES_PER_PIXEL).zip(src) {
                let color = pixel.demultiply();
                out.copy_from_slice(&[color.blue(), color.green(), color.red(), color.alpha()]);
            }
        }
        Ok(())
    }

    /// Copies `extent` into a standalone pixmap.
    pub(crate) fn crop(&self, extent: Extent) -> Option<Pixmap> {
        let mut out = Pixmap::new(extent.width, extent.height)?;
        let row_bytes = extent.width as usize * BYTES_PER_PIXEL;
        let offset = extent.x as usize * BYTES_PER_PIXEL;
        let stride = self.stride();
        let src_rows = self.pixmap.data().chunks_exact(stride);
        for (dst, src) in out.data_mut().chunks_exact_mut(row_bytes).zip(src_rows) {
            dst.copy_from_slice(&src[offset..offset + row_bytes]);
        }
        Some(out)
    }

    #[cfg(test)]
    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

fn is_inked(pixel: &[u8]) -> bool {
    pixel.iter().any(|&channel| channel != 0)
}
