// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-slice label layout.
//!
//! Each label sits on the circle halfway between the slice's inner and outer radius
//! (plus a configurable offset) at the slice's mid-angle. Slices whose angular width
//! falls below the skip threshold get no label, which is what keeps thin adjacent
//! slices from stacking unreadable text.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Color;

use crate::arc::point_on_circle;
use crate::datum::DatumId;
use crate::pie::ComputedSlice;

/// Arc label options.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcLabelsSpec {
    /// Disables the whole layer when false.
    pub enabled: bool,
    /// Slices narrower than this many degrees get no label.
    pub skip_angle: f64,
    /// Radial offset in pixels from the ring midline.
    pub radius_offset: f64,
}

impl Default for ArcLabelsSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            skip_angle: 0.0,
            radius_offset: 0.0,
        }
    }
}

impl ArcLabelsSpec {
    /// Sets the skip threshold in degrees.
    pub fn with_skip_angle(mut self, skip_angle: f64) -> Self {
        self.skip_angle = skip_angle;
        self
    }

    /// Sets the radial offset in pixels.
    pub fn with_radius_offset(mut self, radius_offset: f64) -> Self {
        self.radius_offset = radius_offset;
        self
    }
}

/// A positioned in-slice label, recomputed every geometry pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLabel {
    /// Original record index.
    pub index: usize,
    /// Record id.
    pub id: DatumId,
    /// Label text.
    pub text: String,
    /// Anchor point; text is centered on it.
    pub position: Point,
    /// Text color.
    pub color: Color,
}

/// Lays out arc labels for the given slices.
///
/// `label` and `text_color` are caller-supplied accessors over the computed slice, so
/// hosts control both the string and its themed color without this module knowing
/// about either policy.
pub fn compute_arc_labels(
    center: Point,
    slices: &[ComputedSlice],
    spec: &ArcLabelsSpec,
    label: impl Fn(&ComputedSlice) -> String,
    text_color: impl Fn(&ComputedSlice) -> Color,
) -> Vec<ArcLabel> {
    if !spec.enabled {
        return Vec::new();
    }

    slices
        .iter()
        .filter(|slice| slice.arc.angle_deg() >= spec.skip_angle)
        .map(|slice| {
            let radius =
                (slice.arc.inner_radius + slice.arc.outer_radius) * 0.5 + spec.radius_offset;
            ArcLabel {
                index: slice.datum.index,
                id: slice.datum.id.clone(),
                text: label(slice),
                position: point_on_circle(center, radius, slice.arc.mid_angle()),
                color: text_color(slice),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::pie::{PieSpec, Size};
    use crate::testutil::{Record, data};

    fn slices() -> (Point, Vec<ComputedSlice>) {
        let layout = PieSpec::new()
            .with_fit(false)
            .compute(
                &data(&[Record("a", 25.0), Record("b", 70.0), Record("c", 5.0)]),
                Size::new(200.0, 200.0),
                None,
            )
            .unwrap();
        (layout.center, layout.slices)
    }

    #[test]
    fn labels_sit_on_the_ring_midline_at_the_mid_angle() {
        let (center, slices) = slices();
        let labels = compute_arc_labels(
            center,
            &slices,
            &ArcLabelsSpec::default(),
            |s| s.datum.formatted_value.clone(),
            |_| Color::BLACK,
        );

        assert_eq!(labels.len(), 3);
        let first = &labels[0];
        // 25% of a full turn: mid-angle is 45°, midline radius is half the outer radius.
        let expected = point_on_circle(center, 50.0, FRAC_PI_2 * 0.5);
        assert!((first.position.x - expected.x).abs() < 1e-9);
        assert!((first.position.y - expected.y).abs() < 1e-9);
        assert_eq!(first.text, "25");
    }

    #[test]
    fn skip_angle_drops_thin_slices() {
        let (center, slices) = slices();
        let labels = compute_arc_labels(
            center,
            &slices,
            &ArcLabelsSpec::default().with_skip_angle(20.0),
            |s| s.datum.formatted_value.clone(),
            |_| Color::BLACK,
        );

        // "c" spans 18°, below the 20° threshold.
        assert_eq!(labels.len(), 2);
        assert!(labels.iter().all(|l| l.id != "c".into()));
    }

    #[test]
    fn radius_offset_moves_labels_outward() {
        let (center, slices) = slices();
        let base = compute_arc_labels(
            center,
            &slices,
            &ArcLabelsSpec::default(),
            |_| String::new(),
            |_| Color::BLACK,
        );
        let offset = compute_arc_labels(
            center,
            &slices,
            &ArcLabelsSpec::default().with_radius_offset(10.0),
            |_| String::new(),
            |_| Color::BLACK,
        );

        let d_base = (base[0].position - center).hypot();
        let d_offset = (offset[0].position - center).hypot();
        assert!((d_offset - d_base - 10.0).abs() < 1e-9);
    }

    #[test]
    fn disabled_layer_produces_nothing() {
        let (center, slices) = slices();
        let spec = ArcLabelsSpec {
            enabled: false,
            ..Default::default()
        };
        let labels =
            compute_arc_labels(center, &slices, &spec, |_| String::new(), |_| Color::BLACK);
        assert!(labels.is_empty());
    }
}
