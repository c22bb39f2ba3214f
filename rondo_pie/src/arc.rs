// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc descriptors and sector path generation.
//!
//! Angles are in radians throughout, in *chart* convention: zero points at
//! 12 o'clock and positive angles sweep clockwise on screen. Conversion to the
//! mathematical convention kurbo uses (zero on the +x axis) happens only at the
//! path-building and trigonometric boundaries.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{BezPath, Circle, Point, Shape, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// One slice's angular span and radii.
///
/// `start_angle`/`end_angle` are the *allocated* angles: contiguous across the slice
/// sequence, covering the configured sweep exactly. The pad angle is carried here and
/// applied as a half-gap on each boundary when the visual path is produced, so visible
/// gaps appear between slices without changing total coverage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// Allocated start angle in radians.
    pub start_angle: f64,
    /// Allocated end angle in radians.
    pub end_angle: f64,
    /// Angular gap reserved around this slice, split evenly on both boundaries.
    pub pad_angle: f64,
    /// Inner radius in pixels (0 for a pie slice).
    pub inner_radius: f64,
    /// Outer radius in pixels.
    pub outer_radius: f64,
}

impl Arc {
    /// Allocated angular width in radians.
    pub fn angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Allocated angular width in degrees, the unit used by label skip policies.
    pub fn angle_deg(&self) -> f64 {
        self.angle().to_degrees()
    }

    /// The angle halfway through the slice.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) * 0.5
    }

    /// Radial thickness of the ring.
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// The visible `[start, end]` angles after applying half the pad angle on each
    /// boundary. A slice narrower than its padding collapses onto its mid-angle.
    pub fn visible_range(&self) -> (f64, f64) {
        let half_pad = self.pad_angle * 0.5;
        let start = self.start_angle + half_pad;
        let end = self.end_angle - half_pad;
        if end < start {
            let mid = self.mid_angle();
            (mid, mid)
        } else {
            (start, end)
        }
    }
}

/// Maps a chart angle to the mathematical convention (zero on the +x axis).
pub(crate) fn to_math_angle(angle: f64) -> f64 {
    angle - FRAC_PI_2
}

/// Point on the circle of the given radius at a chart-convention angle.
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Normalizes an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 { a + TAU } else { a }
}

/// Builds the filled outline for one slice.
///
/// The outline honors the arc's pad angle and, when `corner_radius > 0`, rounds the
/// four corners. The corner radius is clipped to half the ring thickness and to half
/// the slice's angular width in linear terms. Degenerate slices produce an empty path.
pub fn sector_path(center: Point, arc: &Arc, corner_radius: f64, tolerance: f64) -> BezPath {
    let (a0, a1) = arc.visible_range();
    let sweep = a1 - a0;
    if sweep <= 1e-12 || arc.outer_radius <= 0.0 {
        return BezPath::new();
    }

    let outer = arc.outer_radius;
    let inner = arc.inner_radius.max(0.0);

    // Clip the corner radius to what the ring and the angular width permit.
    let sin_half = (sweep * 0.5).min(FRAC_PI_2).sin();
    let rc = corner_radius
        .min(arc.thickness() * 0.5)
        .min(outer * sin_half / (1.0 + sin_half));

    if rc <= 1e-9 {
        let segment = Circle::new(center, outer).segment(inner, to_math_angle(a0), sweep);
        return segment.path_elements(tolerance).collect();
    }

    rounded_sector_path(center, inner, outer, to_math_angle(a0), sweep, rc, tolerance)
}

fn polar(center: Point, radius: f64, theta: f64) -> Point {
    Point::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

/// Appends a circular arc around `c` running from `from` to `to` by the shortest turn.
///
/// Corner arcs are tangent transitions, so the shortest turn is always the right one.
fn append_corner(path: &mut BezPath, c: Point, radius: f64, from: Point, to: Point, tol: f64) {
    let a_from = (from.y - c.y).atan2(from.x - c.x);
    let a_to = (to.y - c.y).atan2(to.x - c.x);
    let mut sweep = a_to - a_from;
    if sweep > PI {
        sweep -= TAU;
    } else if sweep < -PI {
        sweep += TAU;
    }
    let corner = kurbo::Arc::new(c, Vec2::new(radius, radius), a_from, sweep, 0.0);
    path.extend(corner.append_iter(tol));
}

fn rounded_sector_path(
    center: Point,
    inner: f64,
    outer: f64,
    theta0: f64,
    sweep: f64,
    rc: f64,
    tol: f64,
) -> BezPath {
    let theta1 = theta0 + sweep;

    // Outer corner circles sit at radius `outer - rc`, inset from each radial edge by
    // the angle whose sine places them tangent to both the edge and the outer circle.
    let phi_out = (rc / (outer - rc)).asin();
    let outer_sweep = (sweep - 2.0 * phi_out).max(0.0);

    let mut path = BezPath::new();

    // Start-edge outer corner: radial tangent point, then round onto the outer circle.
    let c0 = polar(center, outer - rc, theta0 + phi_out);
    let t0_radial = polar(center, (outer - rc) * phi_out.cos(), theta0);
    let t0_arc = polar(center, outer, theta0 + phi_out);
    path.move_to(t0_radial);
    append_corner(&mut path, c0, rc, t0_radial, t0_arc, tol);

    // Outer circle between the two corners.
    let outer_arc = kurbo::Arc::new(
        center,
        Vec2::new(outer, outer),
        theta0 + phi_out,
        outer_sweep,
        0.0,
    );
    path.extend(outer_arc.append_iter(tol));

    // End-edge outer corner, back onto the radial edge.
    let c1 = polar(center, outer - rc, theta1 - phi_out);
    let t1_arc = polar(center, outer, theta1 - phi_out);
    let t1_radial = polar(center, (outer - rc) * phi_out.cos(), theta1);
    append_corner(&mut path, c1, rc, t1_arc, t1_radial, tol);

    if inner > 1e-9 {
        let sin_half = (sweep * 0.5).min(FRAC_PI_2).sin();
        let rc_in = if sin_half < 1.0 {
            rc.min(inner * sin_half / (1.0 - sin_half))
        } else {
            rc
        };
        if rc_in > 1e-9 {
            let phi_in = (rc_in / (inner + rc_in)).asin();
            let inner_sweep = (sweep - 2.0 * phi_in).max(0.0);

            let c2 = polar(center, inner + rc_in, theta1 - phi_in);
            let t2_radial = polar(center, (inner + rc_in) * phi_in.cos(), theta1);
            let t2_arc = polar(center, inner, theta1 - phi_in);
            path.line_to(t2_radial);
            append_corner(&mut path, c2, rc_in, t2_radial, t2_arc, tol);

            let inner_arc = kurbo::Arc::new(
                center,
                Vec2::new(inner, inner),
                theta1 - phi_in,
                -inner_sweep,
                0.0,
            );
            path.extend(inner_arc.append_iter(tol));

            let c3 = polar(center, inner + rc_in, theta0 + phi_in);
            let t3_arc = polar(center, inner, theta0 + phi_in);
            let t3_radial = polar(center, (inner + rc_in) * phi_in.cos(), theta0);
            append_corner(&mut path, c3, rc_in, t3_arc, t3_radial, tol);
        } else {
            path.line_to(polar(center, inner, theta1));
            let inner_arc = kurbo::Arc::new(center, Vec2::new(inner, inner), theta1, -sweep, 0.0);
            path.extend(inner_arc.append_iter(tol));
        }
    } else {
        path.line_to(center);
    }

    path.close_path();
    path
}
