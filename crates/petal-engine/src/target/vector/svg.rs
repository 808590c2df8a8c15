use std::io::{self, Write};

use kurbo::PathEl;

use crate::coords::Viewport;
use crate::paint::{Color, Paint, RadialGradient};
use crate::target::{DrawOp, Path};

use super::{num, padded_stops};

pub(super) fn write<W: Write>(out: &mut W, size: Viewport, ops: &[DrawOp]) -> io::Result<()> {
    let (w, h) = (num(size.width), num(size.height));
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}pt" height="{h}pt" viewBox="0 0 {w} {h}">"#
    )?;

    let mut gradients = 0usize;
    for op in ops {
        // Gradients are defined right before their first (and only) use.
        let attr = if matches!(op, DrawOp::Stroke { .. }) { "stroke" } else { "fill" };
        let paint = paint_ref(out, op.paint(), attr, &mut gradients)?;
        match op {
            DrawOp::Paint { .. } => {
                writeln!(out, r#"<rect x="0" y="0" width="{w}" height="{h}" {paint}/>"#)?;
            }
            DrawOp::Fill { path, .. } => {
                writeln!(
                    out,
                    r#"<path d="{}" {paint} fill-rule="nonzero"/>"#,
                    path_data(path)
                )?;
            }
            DrawOp::Stroke {
                path, line_width, ..
            } => {
                writeln!(
                    out,
                    r#"<path d="{}" fill="none" {paint} stroke-width="{}"/>"#,
                    path_data(path),
                    num(*line_width)
                )?;
            }
        }
    }

    writeln!(out, "</svg>")
}

/// Writes any needed `<defs>` and returns the `fill`/`stroke` attributes.
fn paint_ref<W: Write>(
    out: &mut W,
    paint: &Paint,
    attr: &str,
    gradients: &mut usize,
) -> io::Result<String> {
    match paint {
        Paint::Solid(c) => Ok(format!(
            r#"{attr}="{}" {attr}-opacity="{}""#,
            hex(*c),
            num(c.a.clamp(0.0, 1.0))
        )),
        Paint::RadialGradient(g) => {
            let id = format!("g{}", *gradients);
            *gradients += 1;
            write_gradient(out, &id, g)?;
            Ok(format!(r#"{attr}="url(#{id})""#))
        }
    }
}

fn write_gradient<W: Write>(out: &mut W, id: &str, g: &RadialGradient) -> io::Result<()> {
    if g.inner_radius > 0.0 {
        log::debug!("SVG 1.1 radial gradient has no focal radius; ignoring {}", g.inner_radius);
    }
    writeln!(out, "<defs>")?;
    writeln!(
        out,
        r#"<radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{}" fx="{}" fy="{}" spreadMethod="pad">"#,
        num(g.outer_center.x),
        num(g.outer_center.y),
        num(g.outer_radius),
        num(g.inner_center.x),
        num(g.inner_center.y),
    )?;
    for stop in padded_stops(g) {
        writeln!(
            out,
            r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
            num(stop.t),
            hex(stop.color),
            num(stop.color.a.clamp(0.0, 1.0))
        )?;
    }
    writeln!(out, "</radialGradient>")?;
    writeln!(out, "</defs>")
}

fn hex(c: Color) -> String {
    let [r, g, b, _] = c.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for el in path.to_bez_path().elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        let part = match *el {
            PathEl::MoveTo(p) => format!("M{} {}", num(p.x), num(p.y)),
            PathEl::LineTo(p) => format!("L{} {}", num(p.x), num(p.y)),
            PathEl::QuadTo(p1, p2) => {
                format!("Q{} {} {} {}", num(p1.x), num(p1.y), num(p2.x), num(p2.y))
            }
            PathEl::CurveTo(p1, p2, p3) => format!(
                "C{} {} {} {} {} {}",
                num(p1.x),
                num(p1.y),
                num(p2.x),
                num(p2.y),
                num(p3.x),
                num(p3.y)
            ),
            PathEl::ClosePath => "Z".to_string(),
        };
        d.push_str(&part);
    }
    d
}
