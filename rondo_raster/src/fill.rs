// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scanline polygon filling for flattened Bézier paths.
//!
//! Slice outlines arrive as closed `BezPath`s; they are flattened to line segments
//! and filled with an even-odd scanline pass sampled at pixel centers. Even-odd is
//! what makes donut outlines (outer contour plus inner hole) come out as rings
//! without tracking winding.

use kurbo::{BezPath, PathEl, Point, Shape};
use peniko::Color;

use crate::pixmap::Pixmap;

/// Fills `path` into `pixmap` with even-odd semantics.
pub(crate) fn fill_path(pixmap: &mut Pixmap, path: &BezPath, color: Color, tolerance: f64) {
    let polygons = flatten_to_polygons(path, tolerance);
    if polygons.is_empty() {
        return;
    }

    let rgba = color.to_rgba8();
    let rgba = [rgba.r, rgba.g, rgba.b, rgba.a];

    let bbox = path.bounding_box();
    let y_start = bbox.y0.floor().max(0.0) as usize;
    let y_end = (bbox.y1.ceil().max(0.0) as usize).min(pixmap.height());

    let mut crossings: Vec<f64> = Vec::new();
    for y in y_start..y_end {
        let scan = y as f64 + 0.5;
        crossings.clear();
        for polygon in &polygons {
            for i in 0..polygon.len() {
                let a = polygon[i];
                let b = polygon[(i + 1) % polygon.len()];
                if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                    let t = (scan - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            // A pixel is covered when its center falls inside the span.
            let x_start = (pair[0] - 0.5).ceil().max(0.0) as usize;
            let x_end = ((pair[1] - 0.5).ceil().max(0.0) as usize).min(pixmap.width());
            for x in x_start..x_end {
                pixmap.blend_pixel(x, y, rgba);
            }
        }
    }
}

/// Strokes `path` by expanding it to an outline and filling that.
pub(crate) fn stroke_path(
    pixmap: &mut Pixmap,
    path: &BezPath,
    color: Color,
    width: f64,
    tolerance: f64,
) {
    if width <= 0.0 {
        return;
    }
    let outline = kurbo::stroke(
        path.elements().iter().copied(),
        &kurbo::Stroke::new(width),
        &kurbo::StrokeOpts::default(),
        tolerance,
    );
    fill_path(pixmap, &outline, color, tolerance);
}

fn flatten_to_polygons(path: &BezPath, tolerance: f64) -> Vec<Vec<Point>> {
    let mut polygons: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    let mut flush = |current: &mut Vec<Point>| {
        if current.len() >= 3 {
            polygons.push(core::mem::take(current));
        } else {
            current.clear();
        }
    };

    kurbo::flatten(path.elements().iter().copied(), tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            flush(&mut current);
            current.push(p);
        }
        PathEl::LineTo(p) => current.push(p),
        PathEl::ClosePath => flush(&mut current),
        // `flatten` only emits the three variants above.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    flush(&mut current);
    polygons
}
