// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors reported at the geometry build boundary.
//!
//! Degenerate *inputs* (empty data, zero total value, a zero-size drawing area) are not
//! errors; they produce empty or zero-width slice sets. Errors are reserved for
//! configurations that would change the semantic meaning of the chart if silently
//! repaired, so they are reported to the caller instead of being clamped.

use thiserror::Error;

/// Errors returned by [`PieSpec::compute`](crate::PieSpec::compute).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PieError {
    /// A record carries a negative value, which makes share-of-total geometry meaningless.
    #[error("record at index {index} has negative value {value}")]
    NegativeValue {
        /// Position of the offending record in input order.
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// The configured sweep is empty, reversed, non-finite, or wider than a full turn.
    #[error("invalid angular sweep: start {start_angle} rad, end {end_angle} rad")]
    InvalidSweep {
        /// Configured start angle in radians.
        start_angle: f64,
        /// Configured end angle in radians.
        end_angle: f64,
    },
    /// The pad angle is negative or consumes the entire sweep.
    #[error("invalid pad angle {pad_angle} rad for sweep {sweep} rad")]
    InvalidPadAngle {
        /// Configured pad angle in radians.
        pad_angle: f64,
        /// Total sweep in radians.
        sweep: f64,
    },
    /// The corner radius is negative.
    ///
    /// An oversized corner radius is clipped to what the slice permits instead; only a
    /// negative one is rejected.
    #[error("negative corner radius {corner_radius}")]
    NegativeCornerRadius {
        /// The rejected corner radius in pixels.
        corner_radius: f64,
    },
    /// The inner radius ratio falls outside `[0, 1]`.
    #[error("inner radius ratio {ratio} is outside [0, 1]")]
    InvalidInnerRadiusRatio {
        /// The rejected ratio.
        ratio: f64,
    },
    /// An active-slice radius offset is negative.
    #[error("negative active {which} radius offset {offset}")]
    NegativeActiveOffset {
        /// Which offset was rejected, `"inner"` or `"outer"`.
        which: &'static str,
        /// The rejected offset in pixels.
        offset: f64,
    },
}
