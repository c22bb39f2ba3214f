// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a donut chart to `pie.svg` and mirrors it onto a raster surface,
//! simulating a pointer hover along the way.

use log::info;
use rondo_pie::{
    ArcLabelsSpec, ArcLinkLabelsSpec, ChartStyle, DatumId, PieChart, PieDatum, PieSpec, Size,
    SliceStyle, ValueFormat, render,
};
use rondo_raster::RasterSurface;
use rondo_svg::SvgSurface;

struct LanguageShare {
    language: &'static str,
    share: f64,
}

impl PieDatum for LanguageShare {
    fn id(&self) -> DatumId {
        self.language.into()
    }

    fn value(&self) -> f64 {
        self.share
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let data = [
        LanguageShare {
            language: "rust",
            share: 0.32,
        },
        LanguageShare {
            language: "go",
            share: 0.24,
        },
        LanguageShare {
            language: "python",
            share: 0.21,
        },
        LanguageShare {
            language: "typescript",
            share: 0.17,
        },
        LanguageShare {
            language: "other",
            share: 0.06,
        },
    ];

    let mut chart = PieChart::new(
        PieSpec::new()
            .with_inner_radius_ratio(0.6)
            .with_pad_angle(0.7_f64.to_radians())
            .with_corner_radius(3.0)
            .with_active_offsets(0.0, 8.0),
    );
    chart.set_records(&data, ValueFormat::Percent(0), &[]);
    chart.resize(Size::new(480.0, 360.0));
    chart.set_arc_labels(ArcLabelsSpec::default().with_skip_angle(10.0));
    chart.set_link_labels(ArcLinkLabelsSpec::default().with_skip_angle(10.0).with_offset(4.0));

    // Hover over the middle of the first slice before rendering.
    let layout = chart.layout().expect("valid configuration");
    let mid = layout.slices[0].arc.mid_angle();
    let probe = rondo_pie::point_on_circle(
        layout.center,
        (layout.inner_radius + layout.radius) * 0.5,
        mid,
    );
    let hit = chart.pointer_move(probe.x, probe.y).expect("valid configuration");
    info!("hovering {hit:?}");

    let style = ChartStyle {
        slices: SliceStyle {
            border_width: 1.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let frame = chart.frame().expect("valid configuration");
    let mut svg = SvgSurface::new();
    render(&mut svg, &frame, &style);
    std::fs::write("pie.svg", svg.to_svg_string())?;
    info!("wrote pie.svg");

    let mut raster = RasterSurface::new(2.0);
    let painted = raster
        .draw_chart(&mut chart, &style)
        .expect("valid configuration");
    info!(
        "raster surface: {}x{} device px (painted: {painted})",
        raster.pixmap().width(),
        raster.pixmap().height()
    );

    Ok(())
}
