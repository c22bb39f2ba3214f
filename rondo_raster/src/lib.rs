// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate-mode raster surface renderer for Rondo pie charts.
//!
//! The raster target owns an RGBA8 [`Pixmap`] plus a device-pixel-ratio, and redraws
//! by fully clearing and repainting; there is no partial invalidation, matching the
//! "always re-derive" contract of the core. [`RasterSurface::draw_chart`] is the
//! redraw scheduler: it consumes the chart's dirty bit, so pointer-driven
//! active-state transitions and input changes repaint exactly once each.
//!
//! Glyph painting is delegated through [`TextPainter`]; text shaping is out of scope
//! here just as it is in the core, so the default painter draws nothing and hosts
//! plug in their text stack.

mod fill;
mod pixmap;

use kurbo::{Affine, BezPath, Point};
use log::debug;
use peniko::Color;
use rondo_pie::{
    ArcLabel, ArcLabelStyle, ArcLinkLabel, ChartStyle, ComputedSlice, LinkLabelStyle, PieChart,
    PieError, Size, SliceStyle, SurfaceRenderer, TextAnchor, render,
};

pub use pixmap::Pixmap;

/// Paints label glyphs into the pixmap, in device pixels.
pub trait TextPainter {
    /// Draws `text` anchored at `pos`.
    fn paint(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        pos: Point,
        font_size: f64,
        anchor: TextAnchor,
        color: Color,
    );
}

/// The default painter: draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTextPainter;

impl TextPainter for NoopTextPainter {
    fn paint(
        &mut self,
        _pixmap: &mut Pixmap,
        _text: &str,
        _pos: Point,
        _font_size: f64,
        _anchor: TextAnchor,
        _color: Color,
    ) {
    }
}

/// A pixel surface with device-pixel-ratio scaling.
pub struct RasterSurface {
    pixmap: Pixmap,
    pixel_ratio: f64,
    tolerance: f64,
    text: Box<dyn TextPainter>,
}

impl core::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("pixmap", &self.pixmap)
            .field("pixel_ratio", &self.pixel_ratio)
            .field("tolerance", &self.tolerance)
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    /// Creates a surface with the given device-pixel-ratio.
    pub fn new(pixel_ratio: f64) -> Self {
        Self {
            pixmap: Pixmap::default(),
            pixel_ratio: pixel_ratio.max(0.0),
            tolerance: 0.25,
            text: Box::new(NoopTextPainter),
        }
    }

    /// Replaces the glyph painter.
    pub fn with_text_painter(mut self, text: Box<dyn TextPainter>) -> Self {
        self.text = text;
        self
    }

    /// The backing pixel buffer.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// The configured device-pixel-ratio.
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Redraws the chart if any of its inputs changed since the last draw.
    ///
    /// Returns `Ok(true)` when a repaint happened. This is the pixel surface's whole
    /// scheduling policy: every input change (data, dimensions, geometry options,
    /// pointer-driven active transitions) marks the chart dirty, and each dirty frame
    /// triggers exactly one full clear-and-redraw.
    pub fn draw_chart(
        &mut self,
        chart: &mut PieChart,
        style: &ChartStyle,
    ) -> Result<bool, PieError> {
        if !chart.take_dirty() {
            return Ok(false);
        }
        let frame = chart.frame()?;
        render(self, &frame, style);
        debug!(
            "raster redraw: {}x{} device px at ratio {}",
            self.pixmap.width(),
            self.pixmap.height(),
            self.pixel_ratio
        );
        Ok(true)
    }

    fn to_device(&self, path: &BezPath) -> BezPath {
        let mut scaled = path.clone();
        scaled.apply_affine(Affine::scale(self.pixel_ratio));
        scaled
    }

    fn paint_text(&mut self, text: &str, pos: Point, font_size: f64, anchor: TextAnchor, color: Color) {
        let device_pos = Point::new(pos.x * self.pixel_ratio, pos.y * self.pixel_ratio);
        self.text.paint(
            &mut self.pixmap,
            text,
            device_pos,
            font_size * self.pixel_ratio,
            anchor,
            color,
        );
    }
}

impl SurfaceRenderer for RasterSurface {
    fn begin_frame(&mut self, size: Size, background: Color) {
        let width = (size.width.max(0.0) * self.pixel_ratio).round() as usize;
        let height = (size.height.max(0.0) * self.pixel_ratio).round() as usize;
        self.pixmap.clear(width, height, background);
    }

    fn draw_slice(&mut self, slice: &ComputedSlice, path: &BezPath, style: &SliceStyle) {
        let device = self.to_device(path);
        fill::fill_path(&mut self.pixmap, &device, slice.datum.color, self.tolerance);
        if style.border_width > 0.0 {
            fill::stroke_path(
                &mut self.pixmap,
                &device,
                style.border_color,
                style.border_width * self.pixel_ratio,
                self.tolerance,
            );
        }
    }

    fn draw_link_label(&mut self, label: &ArcLinkLabel, style: &LinkLabelStyle) {
        let [start, bend, end] = label.points;
        let mut line = BezPath::new();
        line.move_to(start);
        line.line_to(bend);
        line.line_to(end);
        let device = self.to_device(&line);
        fill::stroke_path(
            &mut self.pixmap,
            &device,
            label.link_color,
            style.thickness * self.pixel_ratio,
            self.tolerance,
        );

        self.paint_text(
            &label.text,
            label.text_position,
            style.font_size,
            label.side.text_anchor(),
            label.text_color,
        );
    }

    fn draw_arc_label(&mut self, label: &ArcLabel, style: &ArcLabelStyle) {
        self.paint_text(
            &label.text,
            label.position,
            style.font_size,
            TextAnchor::Middle,
            label.color,
        );
    }
}
