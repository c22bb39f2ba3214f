// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One chart instance.
//!
//! [`PieChart`] owns the normalized dataset, the geometry/label options, the drawing
//! area and the active-slice controller, and re-derives everything downstream through
//! a single-slot memo keyed on input identity. A pointer event resolves as a discrete
//! step (hit-test against the previous geometry, transition the controller, then
//! recompute lazily), so the geometry/active-state feedback loop never re-enters
//! itself within one event.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;
use peniko::color::palette::css;

use crate::active::ActiveSliceController;
use crate::arc_labels::{ArcLabelsSpec, compute_arc_labels};
use crate::arc_link_labels::{ArcLinkLabelsSpec, compute_arc_link_labels};
use crate::datum::{DatumId, NormalizedDatum, PieDatum, normalize};
use crate::error::PieError;
use crate::format::ValueFormat;
use crate::hit_test::find_slice_under_cursor;
use crate::memo::Memo;
use crate::pie::{ComputedSlice, PieLayout, PieSpec, Size};
use crate::surface::Frame;

type LayoutKey = (u64, Option<DatumId>);

/// A pie/donut chart instance: inputs, active state and memoized derivations.
///
/// All derived structures are recomputed synchronously whenever an upstream input
/// changes; the memo only avoids recomputation when *nothing* changed. The dirty bit
/// tells an immediate-mode surface when a full redraw is due.
#[derive(Debug)]
pub struct PieChart {
    data: Vec<NormalizedDatum>,
    spec: PieSpec,
    arc_labels: ArcLabelsSpec,
    link_labels: ArcLinkLabelsSpec,
    area: Size,
    active: ActiveSliceController,
    revision: u64,
    layout_memo: Memo<LayoutKey, Result<PieLayout, PieError>>,
    dirty: bool,
}

impl PieChart {
    /// Creates an empty chart with the given geometry options.
    pub fn new(spec: PieSpec) -> Self {
        Self {
            data: Vec::new(),
            spec,
            arc_labels: ArcLabelsSpec::default(),
            link_labels: ArcLinkLabelsSpec::default(),
            area: Size::default(),
            active: ActiveSliceController::new(),
            revision: 0,
            layout_memo: Memo::new(),
            dirty: true,
        }
    }

    /// Seeds the active slice, for hosts that open a chart with a selection already
    /// emphasized.
    pub fn with_default_active_id(mut self, id: Option<DatumId>) -> Self {
        self.active = ActiveSliceController::with_default_active(id);
        self
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.dirty = true;
    }

    /// Replaces the dataset by running one normalizer pass over raw records.
    pub fn set_records<D: PieDatum>(
        &mut self,
        records: &[D],
        format: ValueFormat,
        palette: &[Color],
    ) {
        self.data = normalize(records, format, palette);
        self.touch();
    }

    /// Replaces the dataset with already-normalized records.
    pub fn set_data(&mut self, data: Vec<NormalizedDatum>) {
        self.data = data;
        self.touch();
    }

    /// Replaces the geometry options.
    pub fn set_spec(&mut self, spec: PieSpec) {
        self.spec = spec;
        self.touch();
    }

    /// Replaces the arc label options.
    pub fn set_arc_labels(&mut self, spec: ArcLabelsSpec) {
        self.arc_labels = spec;
        self.touch();
    }

    /// Replaces the link label options.
    pub fn set_link_labels(&mut self, spec: ArcLinkLabelsSpec) {
        self.link_labels = spec;
        self.touch();
    }

    /// Resizes the drawing area.
    pub fn resize(&mut self, area: Size) {
        self.area = area;
        self.touch();
    }

    /// The normalized dataset.
    pub fn data(&self) -> &[NormalizedDatum] {
        &self.data
    }

    /// The geometry options.
    pub fn spec(&self) -> &PieSpec {
        &self.spec
    }

    /// The current drawing area.
    pub fn area(&self) -> Size {
        self.area
    }

    /// The currently active slice id, if any.
    pub fn active_id(&self) -> Option<&DatumId> {
        self.active.active_id()
    }

    /// Explicitly selects (or clears) the active slice, overriding pointer state.
    pub fn set_active_id(&mut self, id: Option<DatumId>) {
        if self.active.set_active(id) {
            self.dirty = true;
        }
    }

    /// Computes (or returns the memoized) slice geometry for the current inputs.
    pub fn layout(&mut self) -> Result<&PieLayout, PieError> {
        let key: LayoutKey = (self.revision, self.active.active_id().cloned());
        let data = &self.data;
        let spec = &self.spec;
        let area = self.area;
        let active = key.1.clone();
        let result = self
            .layout_memo
            .get_or_insert_with(key, || spec.compute(data, area, active.as_ref()));
        result.as_ref().map_err(Clone::clone)
    }

    /// Resolves a pointer position to the slice beneath it and transitions the active
    /// state accordingly.
    ///
    /// The hit-test runs against the geometry as it stood *before* the transition;
    /// the next [`layout`](Self::layout) or [`frame`](Self::frame) call re-derives.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<Option<DatumId>, PieError> {
        let hit = {
            let layout = self.layout()?;
            find_slice_under_cursor(
                layout.center,
                layout.radius,
                layout.inner_radius,
                &layout.slices,
                x,
                y,
            )
            .map(|slice| slice.datum.id.clone())
        };

        let changed = match &hit {
            Some(id) => self.active.pointer_over(id.clone()),
            None => self.active.pointer_out(),
        };
        if changed {
            self.dirty = true;
        }
        Ok(hit)
    }

    /// Pointer left the drawing surface.
    pub fn pointer_leave(&mut self) {
        if self.active.pointer_out() {
            self.dirty = true;
        }
    }

    /// True once per batch of input changes; consumed by immediate-mode surfaces to
    /// schedule a full redraw.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Builds a frame with the default label accessors: formatted values inside the
    /// slices, record ids on the links, link lines tinted with the slice color.
    pub fn frame(&mut self) -> Result<Frame, PieError> {
        self.frame_with(
            |slice| slice.datum.formatted_value.clone(),
            |_| css::BLACK,
            |slice| alloc::format!("{}", slice.datum.id),
            |_| css::BLACK,
            |slice| slice.datum.color,
        )
    }

    /// Builds a frame with caller-supplied label text/color accessors.
    ///
    /// Labels are laid out in full on every call; only the slice geometry behind them
    /// is memoized.
    pub fn frame_with(
        &mut self,
        arc_label: impl Fn(&ComputedSlice) -> String,
        arc_label_color: impl Fn(&ComputedSlice) -> Color,
        link_label: impl Fn(&ComputedSlice) -> String,
        link_text_color: impl Fn(&ComputedSlice) -> Color,
        link_color: impl Fn(&ComputedSlice) -> Color,
    ) -> Result<Frame, PieError> {
        let area = self.area;
        let corner_radius = self.spec.corner_radius;
        let arc_labels_spec = self.arc_labels;
        let link_labels_spec = self.link_labels;

        let layout = self.layout()?;
        let arc_labels = compute_arc_labels(
            layout.center,
            &layout.slices,
            &arc_labels_spec,
            arc_label,
            arc_label_color,
        );
        let link_labels = compute_arc_link_labels(
            layout.center,
            &layout.slices,
            &link_labels_spec,
            link_label,
            link_text_color,
            link_color,
        );

        Ok(Frame {
            size: area,
            center: layout.center,
            corner_radius,
            slices: layout.slices.clone(),
            arc_labels,
            link_labels,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::arc::point_on_circle;
    use crate::testutil::Record;

    fn chart() -> PieChart {
        let mut chart = PieChart::new(
            PieSpec::new()
                .with_fit(false)
                .with_active_offsets(0.0, 10.0),
        );
        chart.set_records(
            &[Record("a", 30.0), Record("b", 70.0)],
            ValueFormat::Raw,
            &[],
        );
        chart.resize(Size::new(200.0, 200.0));
        chart
    }

    fn point_in_slice(chart: &mut PieChart, angle_deg: f64) -> (f64, f64) {
        let layout = chart.layout().unwrap();
        let p = point_on_circle(layout.center, 50.0, angle_deg.to_radians());
        (p.x, p.y)
    }

    #[test]
    fn pointer_move_activates_the_hit_slice() {
        let mut chart = chart();
        let (x, y) = point_in_slice(&mut chart, 50.0);

        let hit = chart.pointer_move(x, y).unwrap();
        assert_eq!(hit, Some("a".into()));
        assert_eq!(chart.active_id(), Some(&"a".into()));

        let layout = chart.layout().unwrap();
        assert!((layout.slices[0].arc.outer_radius - (layout.radius + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn repeated_hover_over_the_same_slice_stays_clean() {
        let mut chart = chart();
        let (x, y) = point_in_slice(&mut chart, 50.0);

        chart.pointer_move(x, y).unwrap();
        assert!(chart.take_dirty());

        chart.pointer_move(x + 1.0, y + 1.0).unwrap();
        assert!(!chart.take_dirty(), "idempotent transition must not redraw");
    }

    #[test]
    fn pointer_move_outside_returns_to_idle() {
        let mut chart = chart();
        let (x, y) = point_in_slice(&mut chart, 50.0);
        chart.pointer_move(x, y).unwrap();
        chart.take_dirty();

        let hit = chart.pointer_move(-50.0, -50.0).unwrap();
        assert_eq!(hit, None);
        assert_eq!(chart.active_id(), None);
        assert!(chart.take_dirty());
    }

    #[test]
    fn layout_is_memoized_until_inputs_change() {
        let mut chart = chart();
        let first = chart.layout().unwrap().clone();
        let second = chart.layout().unwrap().clone();
        assert_eq!(first, second);

        chart.resize(Size::new(100.0, 100.0));
        let third = chart.layout().unwrap();
        assert!(third.radius < first.radius);
    }

    #[test]
    fn input_changes_mark_the_chart_dirty() {
        let mut chart = chart();
        chart.take_dirty();

        chart.set_arc_labels(ArcLabelsSpec::default().with_skip_angle(10.0));
        assert!(chart.take_dirty());
        assert!(!chart.take_dirty());
    }

    #[test]
    fn default_active_id_applies_to_the_first_layout() {
        let mut chart = PieChart::new(
            PieSpec::new()
                .with_fit(false)
                .with_active_offsets(0.0, 10.0),
        )
        .with_default_active_id(Some("b".into()));
        chart.set_records(
            &[Record("a", 30.0), Record("b", 70.0)],
            ValueFormat::Raw,
            &[],
        );
        chart.resize(Size::new(200.0, 200.0));

        let layout = chart.layout().unwrap();
        assert_eq!(layout.slices[1].active_offset, 10.0);
    }

    #[test]
    fn external_selection_overrides_pointer_state() {
        let mut chart = chart();
        let (x, y) = point_in_slice(&mut chart, 50.0);
        chart.pointer_move(x, y).unwrap();

        chart.set_active_id(Some("b".into()));
        assert_eq!(chart.active_id(), Some(&"b".into()));

        // The next pointer event wins again.
        chart.pointer_move(x, y).unwrap();
        assert_eq!(chart.active_id(), Some(&"a".into()));
    }

    #[test]
    fn frame_carries_labels_and_slices() {
        let mut chart = chart();
        let frame = chart.frame().unwrap();
        assert_eq!(frame.slices.len(), 2);
        assert_eq!(frame.arc_labels.len(), 2);
        assert_eq!(frame.link_labels.len(), 2);
        assert_eq!(frame.arc_labels[0].text, "30");
        assert_eq!(frame.link_labels[0].text, "a");
    }

    #[test]
    fn negative_values_surface_at_the_layout_boundary() {
        let mut chart = PieChart::new(PieSpec::new());
        chart.set_records(&[Record("bad", -1.0)], ValueFormat::Raw, &[]);
        chart.resize(Size::new(100.0, 100.0));
        assert!(matches!(
            chart.layout(),
            Err(PieError::NegativeValue { .. })
        ));
    }
}
