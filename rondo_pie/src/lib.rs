// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie/donut chart geometry and interaction for data-driven circular charts.
//!
//! This crate is the pure core of the Rondo chart stack:
//! - **Normalization** turns raw records into uniform slices of data.
//! - **Geometry** allocates angular spans under padding/rounding constraints and
//!   fits the radius to the drawing area.
//! - **Labels** are laid out inside the slices and outside on bent connector lines.
//! - **Hit-testing** maps pointer coordinates back to slices analytically.
//! - **Active state** tracks the hovered/selected slice and feeds radius offsets
//!   back into geometry.
//!
//! Rendering targets (SVG, raster pixels) live in sibling crates and implement the
//! [`SurfaceRenderer`] capability. Text shaping and layout are out of scope; labels
//! carry unshaped strings.

#![no_std]

extern crate alloc;

mod active;
mod arc;
mod arc_labels;
mod arc_link_labels;
mod chart;
mod datum;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod memo;
mod pie;
mod surface;
#[cfg(test)]
mod testutil;

pub use active::ActiveSliceController;
pub use arc::{Arc, normalize_angle, point_on_circle, sector_path};
pub use arc_labels::{ArcLabel, ArcLabelsSpec, compute_arc_labels};
pub use arc_link_labels::{ArcLinkLabel, ArcLinkLabelsSpec, LinkSide, compute_arc_link_labels};
pub use chart::PieChart;
pub use datum::{DEFAULT_PALETTE, DatumId, NormalizedDatum, PieDatum, normalize};
pub use error::PieError;
pub use format::ValueFormat;
pub use hit_test::find_slice_under_cursor;
pub use memo::Memo;
pub use pie::{ComputedSlice, PieLayout, PieSpec, Size};
pub use surface::{
    ArcLabelStyle, ChartStyle, Frame, LinkLabelStyle, SliceStyle, SurfaceRenderer, TextAnchor,
    render,
};
