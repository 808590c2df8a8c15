use std::io::{self, Write};

use crate::coords::Viewport;
use crate::paint::{Color, Paint};
use crate::target::{DrawOp, Path, PathSegment};

use super::{num, radial_shading};

/// Writes a one-page PostScript Level 3 document, or its EPS variant.
pub(super) fn write<W: Write>(out: &mut W, size: Viewport, ops: &[DrawOp], eps: bool) -> io::Result<()> {
    let (w, h) = (num(size.width), num(size.height));
    let (bw, bh) = (size.width.ceil().max(0.0) as u32, size.height.ceil().max(0.0) as u32);

    if eps {
        writeln!(out, "%!PS-Adobe-3.0 EPSF-3.0")?;
    } else {
        writeln!(out, "%!PS-Adobe-3.0")?;
    }
    writeln!(out, "%%Creator: petal")?;
    writeln!(out, "%%BoundingBox: 0 0 {bw} {bh}")?;
    writeln!(out, "%%HiResBoundingBox: 0 0 {w} {h}")?;
    writeln!(out, "%%LanguageLevel: 3")?;
    if !eps {
        writeln!(out, "%%Pages: 1")?;
    }
    writeln!(out, "%%EndComments")?;
    if !eps {
        writeln!(out, "%%Page: 1 1")?;
        writeln!(out, "<< /PageSize [{w} {h}] >> setpagedevice")?;
    }

    writeln!(out, "gsave")?;
    writeln!(out, "0 {h} translate 1 -1 scale")?;

    let translucent = translucent_ops(ops);
    if translucent > 0 {
        log::info!("PostScript has no transparency; {translucent} translucent ops are drawn opaque");
    }

    for op in ops {
        match op {
            DrawOp::Fill { path, paint } => match paint {
                Paint::Solid(c) => {
                    set_color(out, *c)?;
                    write_path(out, path)?;
                    writeln!(out, "fill")?;
                }
                Paint::RadialGradient(g) => {
                    writeln!(out, "gsave")?;
                    write_path(out, path)?;
                    writeln!(out, "clip newpath")?;
                    writeln!(out, "{} shfill", radial_shading(g))?;
                    writeln!(out, "grestore")?;
                }
            },
            DrawOp::Stroke {
                path,
                paint,
                line_width,
            } => {
                writeln!(out, "{} setlinewidth", num(*line_width))?;
                match paint {
                    Paint::Solid(c) => {
                        set_color(out, *c)?;
                        write_path(out, path)?;
                        writeln!(out, "stroke")?;
                    }
                    Paint::RadialGradient(g) => {
                        writeln!(out, "gsave")?;
                        write_path(out, path)?;
                        writeln!(out, "strokepath clip newpath")?;
                        writeln!(out, "{} shfill", radial_shading(g))?;
                        writeln!(out, "grestore")?;
                    }
                }
            }
            DrawOp::Paint { paint } => match paint {
                Paint::Solid(c) => {
                    set_color(out, *c)?;
                    writeln!(out, "0 0 {w} {h} rectfill")?;
                }
                Paint::RadialGradient(g) => {
                    writeln!(out, "gsave")?;
                    writeln!(out, "0 0 {w} {h} rectclip")?;
                    writeln!(out, "{} shfill", radial_shading(g))?;
                    writeln!(out, "grestore")?;
                }
            },
        }
    }

    writeln!(out, "grestore")?;
    writeln!(out, "showpage")?;
    writeln!(out, "%%EOF")
}

/// Ops whose paint carries alpha below 1.
fn translucent_ops(ops: &[DrawOp]) -> usize {
    ops.iter().filter(|op| !op.paint().is_opaque()).count()
}

fn set_color<W: Write>(out: &mut W, c: Color) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {} setrgbcolor",
        num(c.r.clamp(0.0, 1.0)),
        num(c.g.clamp(0.0, 1.0)),
        num(c.b.clamp(0.0, 1.0))
    )
}

/// Emits `newpath` and the path, using the native `arc` operator.
///
/// User space is already flipped to y-down, so `arc` sweeping towards larger
/// angles matches the recorded direction.
fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "newpath")?;
    for seg in path.segments() {
        match *seg {
            PathSegment::MoveTo(p) => writeln!(out, "{} {} moveto", num(p.x), num(p.y))?,
            PathSegment::LineTo(p) => writeln!(out, "{} {} lineto", num(p.x), num(p.y))?,
            PathSegment::Arc(a) => writeln!(
                out,
                "{} {} {} {} {} arc",
                num(a.center.x),
                num(a.center.y),
                num(a.radius),
                num(a.start_angle.to_degrees() as f64),
                num(a.end_angle().to_degrees() as f64)
            )?,
            PathSegment::Close => writeln!(out, "closepath")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::RadialGradient;
    use crate::target::{render_with, RenderTarget, VectorFormat, VectorSurface};

    fn encode(format: VectorFormat, draw: impl FnOnce(&mut dyn RenderTarget)) -> String {
        let mut s = VectorSurface::new(Vec::new(), format, Viewport::new(300.0, 200.0));
        render_with(&mut s, draw);
        String::from_utf8(s.finish().unwrap()).unwrap()
    }

    fn petal(t: &mut dyn RenderTarget) {
        t.set_source(Paint::Solid(Color::new(0.0, 1.0, 0.0, 0.65)));
        t.new_sub_path();
        t.arc(Vec2::new(100.0, 100.0), 20.0, 3.0 * core::f32::consts::FRAC_PI_2, core::f32::consts::FRAC_PI_2);
        t.arc(Vec2::new(100.0, 100.0), 6.0, core::f32::consts::FRAC_PI_2, 3.0 * core::f32::consts::FRAC_PI_2);
        t.close_path();
        t.fill();
    }

    // ── headers ─────────────────────────────────────────────────────────

    #[test]
    fn ps_has_page_structure() {
        let ps = encode(VectorFormat::Ps, |_| {});
        assert!(ps.starts_with("%!PS-Adobe-3.0\n"));
        assert!(ps.contains("%%Pages: 1"));
        assert!(ps.contains("%%Page: 1 1"));
        assert!(ps.contains("%%BoundingBox: 0 0 300 200"));
        assert!(ps.contains("0 200 translate 1 -1 scale"));
    }

    #[test]
    fn eps_has_bounding_box_but_no_pages() {
        let eps = encode(VectorFormat::Eps, |_| {});
        assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
        assert!(eps.contains("%%BoundingBox: 0 0 300 200"));
        assert!(!eps.contains("%%Page"));
        assert!(!eps.contains("setpagedevice"));
    }

    // ── geometry ────────────────────────────────────────────────────────

    #[test]
    fn arcs_use_native_operator_in_degrees() {
        let ps = encode(VectorFormat::Ps, petal);
        assert!(ps.contains("0 1 0 setrgbcolor"));
        assert!(ps.contains("100 100 20 270 450 arc"));
        assert!(ps.contains("100 100 6 90 270 arc"));
        let fill = ps.find("\nfill\n").unwrap();
        assert!(ps.find("closepath").unwrap() < fill);
    }

    #[test]
    fn translucent_paint_is_counted_and_written_opaque() {
        let mut s = VectorSurface::new(Vec::new(), VectorFormat::Eps, Viewport::new(300.0, 200.0));
        render_with(&mut s, |t| {
            t.set_source(Paint::Solid(Color::white()));
            t.paint();
            petal(t);
        });
        assert_eq!(translucent_ops(s.ops()), 1);

        let eps = String::from_utf8(s.finish().unwrap()).unwrap();
        assert!(eps.contains("0 1 0 setrgbcolor"));
        assert!(!eps.contains("0.65"));
    }

    #[test]
    fn gradient_paint_uses_shfill() {
        let c = Vec2::new(150.0, 100.0);
        let g = RadialGradient::new(c, 0.0, c, 300.0)
            .with_stop(0.0, Color::white())
            .with_stop(1.0, Color::rgb(0.6, 0.6, 0.6));
        let ps = encode(VectorFormat::Ps, |t| {
            t.set_source(Paint::RadialGradient(g));
            t.paint();
        });
        assert!(ps.contains("/ShadingType 3"));
        assert!(ps.contains("/Coords [150 100 0 150 100 300]"));
        assert!(ps.contains("shfill"));
    }
}
