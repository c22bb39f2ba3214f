// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering seam.
//!
//! Rather than inheriting from a renderer base, both drawing targets (vector and
//! pixel) implement one [`SurfaceRenderer`] capability and consume the same computed
//! frame. [`render`] owns the back-to-front order: slices first, then connector
//! lines, then label text, so labels always sit above connectors and connectors above
//! slices. Text is stored unshaped; shaping and glyph painting belong to the host's
//! text stack.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};
use peniko::Color;
use peniko::color::palette::css;

use crate::arc::sector_path;
use crate::arc_labels::ArcLabel;
use crate::arc_link_labels::{ArcLinkLabel, LinkSide};
use crate::pie::{ComputedSlice, Size};

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor at the start of the text.
    Start,
    /// Anchor at the text's midpoint.
    Middle,
    /// Anchor at the end of the text.
    End,
}

impl LinkSide {
    /// The text anchor a renderer should use for a link label on this side.
    pub fn text_anchor(self) -> TextAnchor {
        match self {
            Self::Right => TextAnchor::Start,
            Self::Left => TextAnchor::End,
        }
    }
}

/// Slice fill/border styling.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceStyle {
    /// Border stroke width; 0 disables the border.
    pub border_width: f64,
    /// Border stroke color.
    pub border_color: Color,
}

impl Default for SliceStyle {
    fn default() -> Self {
        Self {
            border_width: 0.0,
            border_color: css::BLACK,
        }
    }
}

/// Arc label styling.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLabelStyle {
    /// Font size in pixels.
    pub font_size: f64,
}

impl Default for ArcLabelStyle {
    fn default() -> Self {
        Self { font_size: 11.0 }
    }
}

/// Link label styling.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkLabelStyle {
    /// Connector line thickness.
    pub thickness: f64,
    /// Font size in pixels.
    pub font_size: f64,
}

impl Default for LinkLabelStyle {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            font_size: 11.0,
        }
    }
}

/// Chart-wide styling shared by every surface implementation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    /// Surface background, used for the full clear.
    pub background: Color,
    /// Slice styling.
    pub slices: SliceStyle,
    /// Arc label styling.
    pub arc_labels: ArcLabelStyle,
    /// Link label styling.
    pub link_labels: LinkLabelStyle,
    /// Curve flattening tolerance for slice outlines.
    pub tolerance: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: css::WHITE,
            slices: SliceStyle::default(),
            arc_labels: ArcLabelStyle::default(),
            link_labels: LinkLabelStyle::default(),
            tolerance: 0.1,
        }
    }
}

/// One fully derived frame: everything a surface needs to draw, with no back
/// references into the chart that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Drawing area in logical pixels.
    pub size: Size,
    /// Chart center in area coordinates.
    pub center: Point,
    /// Corner rounding passed through to slice outlines.
    pub corner_radius: f64,
    /// Slices, in allocation order.
    pub slices: Vec<ComputedSlice>,
    /// In-slice labels.
    pub arc_labels: Vec<ArcLabel>,
    /// Connector-line labels.
    pub link_labels: Vec<ArcLinkLabel>,
}

/// Drawing capability implemented by each surface.
///
/// Implementations only draw; ordering and geometry derivation stay upstream.
pub trait SurfaceRenderer {
    /// Starts a frame: for pixel surfaces this is a full clear, for vector surfaces a
    /// fresh document.
    fn begin_frame(&mut self, size: Size, background: Color);

    /// Draws one filled (and optionally stroked) slice outline.
    fn draw_slice(&mut self, slice: &ComputedSlice, path: &BezPath, style: &SliceStyle);

    /// Draws one connector line and its label text.
    fn draw_link_label(&mut self, label: &ArcLinkLabel, style: &LinkLabelStyle);

    /// Draws one in-slice label.
    fn draw_arc_label(&mut self, label: &ArcLabel, style: &ArcLabelStyle);

    /// Finishes the frame.
    fn end_frame(&mut self) {}
}

/// Draws a frame onto a surface in back-to-front order.
///
/// Degenerate slices (empty outlines) are skipped, so empty and zero-total datasets
/// reduce to a cleared surface.
pub fn render<S: SurfaceRenderer + ?Sized>(surface: &mut S, frame: &Frame, style: &ChartStyle) {
    surface.begin_frame(frame.size, style.background);

    for slice in &frame.slices {
        let path = sector_path(frame.center, &slice.arc, frame.corner_radius, style.tolerance);
        if path.elements().is_empty() {
            continue;
        }
        surface.draw_slice(slice, &path, &style.slices);
    }

    for label in &frame.link_labels {
        surface.draw_link_label(label, &style.link_labels);
    }
    for label in &frame.arc_labels {
        surface.draw_arc_label(label, &style.arc_labels);
    }

    surface.end_frame();
}
