// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG surface renderer for Rondo pie charts.
//!
//! This is the retained/vector target: a frame renders to a declarative one-shot SVG
//! document. Each [`render`](rondo_pie::render) call starts a fresh document, so the
//! output always reflects exactly one computed frame.

use std::fmt::Write as _;

use kurbo::BezPath;
use peniko::Color;
use rondo_pie::{
    ArcLabel, ArcLabelStyle, ArcLinkLabel, ComputedSlice, LinkLabelStyle, Size, SliceStyle,
    SurfaceRenderer, TextAnchor,
};

/// A surface that accumulates SVG markup.
#[derive(Clone, Debug, Default)]
pub struct SvgSurface {
    size: Size,
    body: String,
}

impl SvgSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current frame as a complete SVG document.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = write!(
            out,
            r#"viewBox="0 0 {} {}" width="{}" height="{}">"#,
            self.size.width, self.size.height, self.size.width, self.size.height
        );
        out.push('\n');
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl SurfaceRenderer for SvgSurface {
    fn begin_frame(&mut self, size: Size, background: Color) {
        self.size = size;
        self.body.clear();
        let _ = write!(
            self.body,
            r#"<rect x="0" y="0" width="{}" height="{}""#,
            size.width, size.height
        );
        write_color_attr(&mut self.body, "fill", background);
        self.body.push_str("/>\n");
    }

    fn draw_slice(&mut self, slice: &ComputedSlice, path: &BezPath, style: &SliceStyle) {
        let d = path.to_svg();
        let _ = write!(self.body, r#"<path d="{d}""#);
        write_color_attr(&mut self.body, "fill", slice.datum.color);
        if style.border_width > 0.0 {
            write_color_attr(&mut self.body, "stroke", style.border_color);
            let _ = write!(self.body, r#" stroke-width="{}""#, style.border_width);
        }
        self.body.push_str("/>\n");
    }

    fn draw_link_label(&mut self, label: &ArcLinkLabel, style: &LinkLabelStyle) {
        let [start, bend, end] = label.points;
        let _ = write!(
            self.body,
            r#"<polyline points="{},{} {},{} {},{}" fill="none""#,
            start.x, start.y, bend.x, bend.y, end.x, end.y
        );
        write_color_attr(&mut self.body, "stroke", label.link_color);
        let _ = write!(self.body, r#" stroke-width="{}""#, style.thickness);
        self.body.push_str("/>\n");

        write_text(
            &mut self.body,
            &label.text,
            label.text_position.x,
            label.text_position.y,
            style.font_size,
            label.side.text_anchor(),
            label.text_color,
        );
    }

    fn draw_arc_label(&mut self, label: &ArcLabel, style: &ArcLabelStyle) {
        write_text(
            &mut self.body,
            &label.text,
            label.position.x,
            label.position.y,
            style.font_size,
            TextAnchor::Middle,
            label.color,
        );
    }
}

fn write_text(
    out: &mut String,
    text: &str,
    x: f64,
    y: f64,
    font_size: f64,
    anchor: TextAnchor,
    color: Color,
) {
    let anchor = match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="central""#,
    );
    write_color_attr(out, "fill", color);
    out.push('>');
    out.push_str(&escape_xml(text));
    out.push_str("</text>\n");
}

fn write_color_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(
        out,
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    );
    if rgba.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
