// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slice geometry: angle allocation, box fitting and active-slice radius offsets.
//!
//! [`PieSpec::compute`] is a pure function from normalized data + drawing area +
//! active id to a fresh [`PieLayout`]. Every call produces a brand-new slice set;
//! nothing is patched in place, which keeps the renderer contract to "always
//! re-derive".

extern crate alloc;

use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Point, Rect};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::arc::{Arc, point_on_circle};
use crate::datum::{DatumId, NormalizedDatum};
use crate::error::PieError;

/// A width/height pair for the drawing area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Geometry options for one pie/donut chart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieSpec {
    /// Sweep start angle in radians (0 = 12 o'clock).
    pub start_angle: f64,
    /// Sweep end angle in radians; together with `start_angle` this defaults to one
    /// full turn.
    pub end_angle: f64,
    /// Angular gap reserved between adjacent slices, in radians.
    pub pad_angle: f64,
    /// Orders slices by descending value before angle allocation. Each computed slice
    /// retains its original `index` for color/legend correlation.
    pub sort_by_value: bool,
    /// Inner radius as a ratio of the outer radius: 0 = pie, > 0 = donut.
    pub inner_radius_ratio: f64,
    /// Corner rounding in pixels, clipped to what each slice's angular width permits.
    pub corner_radius: f64,
    /// If true, the radius is the largest that keeps the swept sector, including the
    /// active outer offset, inside the drawing area. If false, the radius uses the
    /// full area regardless of offsets, permitting visual clipping.
    pub fit: bool,
    /// How far the active slice's inner radius moves toward the center, in pixels.
    pub active_inner_radius_offset: f64,
    /// How far the active slice's outer radius pops outward, in pixels.
    pub active_outer_radius_offset: f64,
}

impl Default for PieSpec {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: TAU,
            pad_angle: 0.0,
            sort_by_value: false,
            inner_radius_ratio: 0.0,
            corner_radius: 0.0,
            fit: true,
            active_inner_radius_offset: 0.0,
            active_outer_radius_offset: 0.0,
        }
    }
}

impl PieSpec {
    /// Creates a spec with the default full-turn sweep.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the angular sweep in radians.
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    /// Sets the pad angle in radians.
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    /// Enables or disables descending-value ordering.
    pub fn with_sort_by_value(mut self, sort_by_value: bool) -> Self {
        self.sort_by_value = sort_by_value;
        self
    }

    /// Sets the inner radius ratio (0 = pie, > 0 = donut).
    pub fn with_inner_radius_ratio(mut self, ratio: f64) -> Self {
        self.inner_radius_ratio = ratio;
        self
    }

    /// Sets the corner rounding radius in pixels.
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    /// Enables or disables fit-to-box radius sizing.
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    /// Sets the active-slice radius offsets in pixels.
    pub fn with_active_offsets(mut self, inner: f64, outer: f64) -> Self {
        self.active_inner_radius_offset = inner;
        self.active_outer_radius_offset = outer;
        self
    }

    fn validate(&self) -> Result<(), PieError> {
        let sweep = self.end_angle - self.start_angle;
        if !sweep.is_finite() || sweep <= 0.0 || sweep > TAU + 1e-9 {
            return Err(PieError::InvalidSweep {
                start_angle: self.start_angle,
                end_angle: self.end_angle,
            });
        }
        if !self.pad_angle.is_finite() || self.pad_angle < 0.0 || self.pad_angle >= sweep {
            return Err(PieError::InvalidPadAngle {
                pad_angle: self.pad_angle,
                sweep,
            });
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(PieError::NegativeCornerRadius {
                corner_radius: self.corner_radius,
            });
        }
        if !(0.0..=1.0).contains(&self.inner_radius_ratio) {
            return Err(PieError::InvalidInnerRadiusRatio {
                ratio: self.inner_radius_ratio,
            });
        }
        if !self.active_inner_radius_offset.is_finite() || self.active_inner_radius_offset < 0.0 {
            return Err(PieError::NegativeActiveOffset {
                which: "inner",
                offset: self.active_inner_radius_offset,
            });
        }
        if !self.active_outer_radius_offset.is_finite() || self.active_outer_radius_offset < 0.0 {
            return Err(PieError::NegativeActiveOffset {
                which: "outer",
                offset: self.active_outer_radius_offset,
            });
        }
        Ok(())
    }

    /// Computes the slice set for `data` inside `area`.
    ///
    /// Degenerate inputs are not errors: an empty dataset yields an empty layout, a
    /// zero total collapses every slice to a point at `start_angle`, and a zero-size
    /// area yields zero radii. Negative record values are configuration errors.
    pub fn compute(
        &self,
        data: &[NormalizedDatum],
        area: Size,
        active_id: Option<&DatumId>,
    ) -> Result<PieLayout, PieError> {
        self.validate()?;
        for d in data {
            if d.value < 0.0 {
                return Err(PieError::NegativeValue {
                    index: d.index,
                    value: d.value,
                });
            }
        }

        let width = area.width.max(0.0);
        let height = area.height.max(0.0);
        let mut center = Point::new(width * 0.5, height * 0.5);
        let mut radius = width.min(height) * 0.5;

        if self.fit {
            let bbox = sector_bounding_box(center, radius, self.start_angle, self.end_angle);
            if bbox.width() > 0.0 && bbox.height() > 0.0 {
                let ratio = (width / bbox.width()).min(height / bbox.height());
                let adjusted_x = (width - bbox.width() * ratio) * 0.5;
                let adjusted_y = (height - bbox.height() * ratio) * 0.5;
                center = Point::new(
                    (center.x - bbox.x0) * ratio + adjusted_x,
                    (center.y - bbox.y0) * ratio + adjusted_y,
                );
                radius *= ratio;
            }
            radius = (radius - self.active_outer_radius_offset).max(0.0);
        }

        let outer_radius = radius;
        let inner_radius = outer_radius * self.inner_radius_ratio;

        let mut order: Vec<&NormalizedDatum> = data.iter().collect();
        if self.sort_by_value {
            order.sort_by(|a, b| b.value.total_cmp(&a.value));
        }

        let sweep = self.end_angle - self.start_angle;
        let total: f64 = data.iter().map(|d| d.value).sum();

        let mut slices = Vec::with_capacity(data.len());
        let mut at = self.start_angle;
        for datum in order {
            let angle = if total > 0.0 {
                datum.value / total * sweep
            } else {
                0.0
            };
            let (start_angle, end_angle) = (at, at + angle);
            at = end_angle;

            let is_active = active_id == Some(&datum.id);
            let (slice_inner, slice_outer, active_offset) = if is_active {
                let slice_outer = outer_radius + self.active_outer_radius_offset;
                let slice_inner = (inner_radius - self.active_inner_radius_offset)
                    .max(0.0)
                    .min(slice_outer);
                (slice_inner, slice_outer, self.active_outer_radius_offset)
            } else {
                (inner_radius, outer_radius, 0.0)
            };

            slices.push(ComputedSlice {
                datum: datum.clone(),
                arc: Arc {
                    start_angle,
                    end_angle,
                    pad_angle: self.pad_angle,
                    inner_radius: slice_inner,
                    outer_radius: slice_outer,
                },
                active_offset,
            });
        }

        Ok(PieLayout {
            slices,
            center,
            radius: outer_radius,
            inner_radius,
        })
    }
}

/// One slice: normalized datum plus arc geometry plus the applied active offset.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedSlice {
    /// The normalized record this slice was derived from.
    pub datum: NormalizedDatum,
    /// Angular span and radii.
    pub arc: Arc,
    /// The outward radius offset applied because this slice is active (0 otherwise).
    pub active_offset: f64,
}

impl ComputedSlice {
    /// The slice's record id.
    pub fn id(&self) -> &DatumId {
        &self.datum.id
    }
}

/// Output of one geometry pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PieLayout {
    /// Slices in allocation order (input order, or descending value when sorted).
    pub slices: Vec<ComputedSlice>,
    /// Geometric center of the chart in area coordinates.
    pub center: Point,
    /// Base outer radius, before active offsets.
    pub radius: f64,
    /// Base inner radius, before active offsets.
    pub inner_radius: f64,
}

/// Bounding box of the sector swept between two chart angles at the given radius.
///
/// The extreme points of a circular sector are its two endpoints plus every
/// axis-crossing angle (multiples of a quarter turn) inside the sweep; the center is
/// included so partial sweeps keep the pivot inside the box.
fn sector_bounding_box(center: Point, radius: f64, a0: f64, a1: f64) -> Rect {
    let mut bbox = Rect::from_points(center, center);
    bbox = bbox.union_pt(point_on_circle(center, radius, a0));
    bbox = bbox.union_pt(point_on_circle(center, radius, a1));

    let mut k = -(-a0 / FRAC_PI_2).floor();
    while k * FRAC_PI_2 <= a1 + 1e-12 {
        bbox = bbox.union_pt(point_on_circle(center, radius, k * FRAC_PI_2));
        k += 1.0;
    }
    bbox
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testutil::{Record, data};

    fn area() -> Size {
        Size::new(400.0, 400.0)
    }

    #[test]
    fn thirty_seventy_split_covers_the_full_turn() {
        let layout = PieSpec::new()
            .compute(&data(&[Record("a", 30.0), Record("b", 70.0)]), area(), None)
            .unwrap();

        let a = &layout.slices[0].arc;
        let b = &layout.slices[1].arc;
        assert!((a.start_angle - 0.0).abs() < 1e-9);
        assert!((a.end_angle - 108.0_f64.to_radians()).abs() < 1e-9);
        assert!((b.start_angle - 108.0_f64.to_radians()).abs() < 1e-9);
        assert!((b.end_angle - TAU).abs() < 1e-9);
    }

    #[test]
    fn allocated_widths_match_value_shares() {
        let records = [Record("a", 1.0), Record("b", 2.0), Record("c", 5.0)];
        let layout = PieSpec::new().compute(&data(&records), area(), None).unwrap();

        let total = 8.0;
        for (slice, record) in layout.slices.iter().zip(&records) {
            let expected = record.1 / total * TAU;
            assert!((slice.arc.angle() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn slices_are_contiguous_and_non_overlapping() {
        let layout = PieSpec::new()
            .with_pad_angle(4.0_f64.to_radians())
            .compute(
                &data(&[Record("a", 10.0), Record("b", 20.0), Record("c", 30.0)]),
                area(),
                None,
            )
            .unwrap();

        for pair in layout.slices.windows(2) {
            assert!((pair[0].arc.end_angle - pair[1].arc.start_angle).abs() < 1e-9);
        }
    }

    #[test]
    fn padding_shrinks_visible_span_by_pad_per_slice() {
        let pad = 10.0_f64.to_radians();
        let records = [Record("a", 30.0), Record("b", 70.0)];
        let layout = PieSpec::new()
            .with_pad_angle(pad)
            .compute(&data(&records), area(), None)
            .unwrap();

        let visible: f64 = layout
            .slices
            .iter()
            .map(|s| {
                let (v0, v1) = s.arc.visible_range();
                v1 - v0
            })
            .sum();
        let allocated: f64 = layout.slices.iter().map(|s| s.arc.angle()).sum();

        assert!((allocated - TAU).abs() < 1e-9);
        assert!((visible - (TAU - 2.0 * pad)).abs() < 1e-9);
    }

    #[test]
    fn sorting_by_value_retains_original_indices() {
        let layout = PieSpec::new()
            .with_sort_by_value(true)
            .compute(
                &data(&[Record("small", 1.0), Record("big", 9.0)]),
                area(),
                None,
            )
            .unwrap();

        assert_eq!(*layout.slices[0].id(), "big".into());
        assert_eq!(layout.slices[0].datum.index, 1);
        assert_eq!(*layout.slices[1].id(), "small".into());
        assert_eq!(layout.slices[1].datum.index, 0);
    }

    #[test]
    fn zero_total_collapses_every_slice_to_the_start_angle() {
        let layout = PieSpec::new()
            .compute(&data(&[Record("a", 0.0), Record("b", 0.0)]), area(), None)
            .unwrap();

        for slice in &layout.slices {
            assert_eq!(slice.arc.start_angle, 0.0);
            assert_eq!(slice.arc.end_angle, 0.0);
        }
    }

    #[test]
    fn empty_data_yields_empty_layout() {
        let layout = PieSpec::new().compute(&[], area(), None).unwrap();
        assert!(layout.slices.is_empty());
        assert!(layout.radius > 0.0);
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = PieSpec::new()
            .compute(&data(&[Record("a", -5.0)]), area(), None)
            .unwrap_err();
        assert_eq!(
            err,
            PieError::NegativeValue {
                index: 0,
                value: -5.0
            }
        );
    }

    #[test]
    fn invalid_sweep_is_rejected() {
        let err = PieSpec::new()
            .with_angles(1.0, 1.0)
            .compute(&data(&[Record("a", 1.0)]), area(), None)
            .unwrap_err();
        assert!(matches!(err, PieError::InvalidSweep { .. }));
    }

    #[test]
    fn pad_angle_consuming_the_sweep_is_rejected() {
        let err = PieSpec::new()
            .with_pad_angle(TAU)
            .compute(&data(&[Record("a", 1.0)]), area(), None)
            .unwrap_err();
        assert!(matches!(err, PieError::InvalidPadAngle { .. }));
    }

    #[test]
    fn active_slice_pops_outward() {
        let records = [Record("a", 30.0), Record("b", 70.0)];
        let active: DatumId = "a".into();
        let layout = PieSpec::new()
            .with_fit(false)
            .with_inner_radius_ratio(0.5)
            .with_active_offsets(8.0, 12.0)
            .compute(&data(&records), area(), Some(&active))
            .unwrap();

        let a = &layout.slices[0].arc;
        let b = &layout.slices[1].arc;
        assert!((a.outer_radius - (layout.radius + 12.0)).abs() < 1e-9);
        assert!((a.inner_radius - (layout.inner_radius - 8.0)).abs() < 1e-9);
        assert_eq!(layout.slices[0].active_offset, 12.0);
        assert_eq!(b.outer_radius, layout.radius);
        assert_eq!(layout.slices[1].active_offset, 0.0);
    }

    #[test]
    fn active_inner_offset_clamps_at_zero() {
        let active: DatumId = "a".into();
        let layout = PieSpec::new()
            .with_fit(false)
            .with_inner_radius_ratio(0.1)
            .with_active_offsets(10_000.0, 0.0)
            .compute(&data(&[Record("a", 1.0)]), area(), Some(&active))
            .unwrap();
        assert_eq!(layout.slices[0].arc.inner_radius, 0.0);
    }

    #[test]
    fn recompute_with_same_active_id_is_identical() {
        let records = data(&[Record("a", 30.0), Record("b", 70.0)]);
        let active: DatumId = "b".into();
        let spec = PieSpec::new().with_active_offsets(4.0, 6.0);
        let first = spec.compute(&records, area(), Some(&active)).unwrap();
        let second = spec.compute(&records, area(), Some(&active)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fit_expands_a_half_pie_to_fill_a_wide_box() {
        let half = PieSpec::new().with_angles(-FRAC_PI_2, FRAC_PI_2);
        let layout = half
            .compute(
                &data(&[Record("a", 1.0)]),
                Size::new(100.0, 50.0),
                None,
            )
            .unwrap();

        // The upper semicircle doubles its radius and drops to the bottom edge.
        assert!((layout.radius - 50.0).abs() < 1e-6);
        assert!((layout.center.x - 50.0).abs() < 1e-6);
        assert!((layout.center.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn fit_reserves_room_for_the_active_outer_offset() {
        let spec = PieSpec::new().with_active_offsets(0.0, 10.0);
        let layout = spec
            .compute(&data(&[Record("a", 1.0)]), Size::new(100.0, 100.0), None)
            .unwrap();
        assert!((layout.radius - 40.0).abs() < 1e-6);

        let unfit = spec
            .with_fit(false)
            .compute(&data(&[Record("a", 1.0)]), Size::new(100.0, 100.0), None)
            .unwrap();
        assert!((unfit.radius - 50.0).abs() < 1e-6);
    }

    #[test]
    fn zero_size_area_is_not_an_error() {
        let layout = PieSpec::new()
            .compute(&data(&[Record("a", 1.0)]), Size::new(0.0, 0.0), None)
            .unwrap();
        assert_eq!(layout.radius, 0.0);
        assert_eq!(layout.slices.len(), 1);
    }

    #[test]
    fn sector_bounding_box_covers_axis_extremes() {
        let center = Point::new(0.0, 0.0);
        let b = sector_bounding_box(center, 10.0, 0.0, TAU);
        assert!((b.x0 + 10.0).abs() < 1e-9);
        assert!((b.x1 - 10.0).abs() < 1e-9);
        assert!((b.y0 + 10.0).abs() < 1e-9);
        assert!((b.y1 - 10.0).abs() < 1e-9);

        let quarter = sector_bounding_box(center, 10.0, 0.0, FRAC_PI_2);
        assert!((quarter.x0 - 0.0).abs() < 1e-9);
        assert!((quarter.x1 - 10.0).abs() < 1e-9);
        assert!((quarter.y0 + 10.0).abs() < 1e-9);
        assert!((quarter.y1 - 0.0).abs() < 1e-9);
    }
}
