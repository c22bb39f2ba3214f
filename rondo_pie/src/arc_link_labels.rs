// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector-line (link) label layout.
//!
//! Each link is three segments along the slice's mid-angle: a radial start on the
//! outer radius, a diagonal run further out along the same ray, then a horizontal run
//! toward the side of the chart the slice falls in. Anchoring the horizontal run by
//! half-plane keeps right-side labels from drifting left across the pie and colliding
//! with left-side labels when many thin slices are adjacent.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use core::f64::consts::PI;

use kurbo::{Point, Vec2};
use peniko::Color;

use crate::arc::{normalize_angle, point_on_circle};
use crate::datum::DatumId;
use crate::pie::ComputedSlice;

/// Which horizontal half-plane a link label anchors in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkSide {
    /// The label text runs leftward and is anchored at its end.
    Left,
    /// The label text runs rightward and is anchored at its start.
    Right,
}

/// Link label options.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcLinkLabelsSpec {
    /// Disables the whole layer when false.
    pub enabled: bool,
    /// Slices narrower than this many degrees get no link label.
    pub skip_angle: f64,
    /// Gap in pixels between the outer radius and the link start.
    pub offset: f64,
    /// Length in pixels of the diagonal segment along the mid-angle ray.
    pub diagonal_length: f64,
    /// Length in pixels of the horizontal segment.
    pub straight_length: f64,
    /// Gap in pixels between the link end and the label text.
    pub text_offset: f64,
}

impl Default for ArcLinkLabelsSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            skip_angle: 0.0,
            offset: 0.0,
            diagonal_length: 16.0,
            straight_length: 24.0,
            text_offset: 6.0,
        }
    }
}

impl ArcLinkLabelsSpec {
    /// Sets the skip threshold in degrees.
    pub fn with_skip_angle(mut self, skip_angle: f64) -> Self {
        self.skip_angle = skip_angle;
        self
    }

    /// Sets the gap between the outer radius and the link start.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the diagonal and straight segment lengths.
    pub fn with_lengths(mut self, diagonal_length: f64, straight_length: f64) -> Self {
        self.diagonal_length = diagonal_length;
        self.straight_length = straight_length;
        self
    }

    /// Sets the gap between the link end and the text anchor.
    pub fn with_text_offset(mut self, text_offset: f64) -> Self {
        self.text_offset = text_offset;
        self
    }
}

/// A positioned link label, recomputed every geometry pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLinkLabel {
    /// Original record index.
    pub index: usize,
    /// Record id.
    pub id: DatumId,
    /// Label text.
    pub text: String,
    /// Connector points: radial start, diagonal bend, horizontal end.
    pub points: [Point; 3],
    /// Which half-plane the horizontal run extends into.
    pub side: LinkSide,
    /// Text anchor point, `text_offset` past the horizontal end.
    pub text_position: Point,
    /// Text color.
    pub text_color: Color,
    /// Connector line color.
    pub link_color: Color,
}

/// Lays out link labels for the given slices.
///
/// The side assignment uses the mid-angle's horizontal half-plane: slices whose
/// mid-angle falls in the right half get a rightward run, the rest leftward; a
/// mid-angle exactly on 6 o'clock goes left.
pub fn compute_arc_link_labels(
    center: Point,
    slices: &[ComputedSlice],
    spec: &ArcLinkLabelsSpec,
    label: impl Fn(&ComputedSlice) -> String,
    text_color: impl Fn(&ComputedSlice) -> Color,
    link_color: impl Fn(&ComputedSlice) -> Color,
) -> Vec<ArcLinkLabel> {
    if !spec.enabled {
        return Vec::new();
    }

    slices
        .iter()
        .filter(|slice| slice.arc.angle_deg() >= spec.skip_angle)
        .map(|slice| {
            let mid = slice.arc.mid_angle();
            let start_radius = slice.arc.outer_radius + spec.offset;

            let start = point_on_circle(center, start_radius, mid);
            let bend = point_on_circle(center, start_radius + spec.diagonal_length, mid);

            let side = if normalize_angle(mid) < PI {
                LinkSide::Right
            } else {
                LinkSide::Left
            };
            let direction = match side {
                LinkSide::Right => 1.0,
                LinkSide::Left => -1.0,
            };
            let end = bend + Vec2::new(direction * spec.straight_length, 0.0);
            let text_position = end + Vec2::new(direction * spec.text_offset, 0.0);

            ArcLinkLabel {
                index: slice.datum.index,
                id: slice.datum.id.clone(),
                text: label(slice),
                points: [start, bend, end],
                side,
                text_position,
                text_color: text_color(slice),
                link_color: link_color(slice),
            }
        })
        .collect()
}
