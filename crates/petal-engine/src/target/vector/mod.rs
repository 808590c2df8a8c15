//! Document surfaces.
//!
//! A [`VectorSurface`] collects the op stream of one render pass and encodes it
//! as a single-page document when finished. Geometry is written in the same
//! y-down logical pixel space the raster surface uses; PostScript and PDF flip
//! their native y-up space once at the top of the page.

mod pdf;
mod postscript;
mod svg;

use core::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path as FsPath;

use anyhow::{Context as _, Result};

use crate::coords::Viewport;
use crate::paint::{Color, ColorStop, RadialGradient};

use super::{DrawOp, Surface};

/// Output document format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VectorFormat {
    Svg,
    Eps,
    Ps,
    Pdf,
}

impl VectorFormat {
    pub const ALL: [VectorFormat; 4] = [
        VectorFormat::Svg,
        VectorFormat::Eps,
        VectorFormat::Ps,
        VectorFormat::Pdf,
    ];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            VectorFormat::Svg => "svg",
            VectorFormat::Eps => "eps",
            VectorFormat::Ps => "ps",
            VectorFormat::Pdf => "pdf",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VectorFormat::Svg => "SVG",
            VectorFormat::Eps => "EPS",
            VectorFormat::Ps => "PostScript",
            VectorFormat::Pdf => "PDF",
        }
    }
}

impl fmt::Display for VectorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Document surface bound to a writer.
///
/// Ops are buffered until [`VectorSurface::finish`]. A surface dropped without
/// finishing still writes its document; failures are then only logged.
pub struct VectorSurface<W: Write> {
    format: VectorFormat,
    size: Viewport,
    ops: Vec<DrawOp>,
    sink: Option<W>,
}

impl<W: Write> VectorSurface<W> {
    pub fn new(sink: W, format: VectorFormat, size: Viewport) -> Self {
        Self {
            format,
            size,
            ops: Vec::new(),
            sink: Some(sink),
        }
    }

    #[inline]
    pub fn format(&self) -> VectorFormat {
        self.format
    }

    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Encodes the document, flushes, and hands the writer back.
    pub fn finish(mut self) -> Result<W> {
        let mut sink = self
            .sink
            .take()
            .context("vector surface already finished")?;
        let ops = core::mem::take(&mut self.ops);
        encode(self.format, self.size, &ops, &mut sink)?;
        Ok(sink)
    }
}

impl VectorSurface<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and binds a surface to it.
    pub fn create(path: impl AsRef<FsPath>, format: VectorFormat, size: Viewport) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("cannot create {} file {}", format, path.display()))?;
        Ok(Self::new(BufWriter::new(file), format, size))
    }
}

impl<W: Write> Surface for VectorSurface<W> {
    fn size(&self) -> Viewport {
        self.size
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

impl<W: Write> Drop for VectorSurface<W> {
    fn drop(&mut self) {
        let Some(mut sink) = self.sink.take() else { return };
        if let Err(e) = encode(self.format, self.size, &self.ops, &mut sink) {
            log::error!("failed to finalize {} document: {e:#}", self.format);
        }
    }
}

fn encode<W: Write>(format: VectorFormat, size: Viewport, ops: &[DrawOp], out: &mut W) -> Result<()> {
    let written = match format {
        VectorFormat::Svg => svg::write(out, size, ops),
        VectorFormat::Eps => postscript::write(out, size, ops, true),
        VectorFormat::Ps => postscript::write(out, size, ops, false),
        VectorFormat::Pdf => pdf::write(out, size, ops),
    };
    written.with_context(|| format!("writing {format} document"))?;
    out.flush().with_context(|| format!("flushing {format} document"))?;
    log::debug!("encoded {} ops as {format}", ops.len());
    Ok(())
}

/// Compact decimal: at most three fractional digits, no trailing zeros.
pub(crate) struct Num(pub f64);

impl From<f32> for Num {
    fn from(v: f32) -> Self {
        Num(v as f64)
    }
}

impl From<f64> for Num {
    fn from(v: f64) -> Self {
        Num(v)
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = if self.0.abs() < 0.0005 { 0.0 } else { self.0 };
        let s = format!("{v:.3}");
        let s = s.trim_end_matches('0').trim_end_matches('.');
        f.write_str(s)
    }
}

#[inline]
fn num(v: impl Into<Num>) -> Num {
    v.into()
}

/// Stops sorted and padded so the first sits at 0 and the last at 1.
fn padded_stops(g: &RadialGradient) -> Vec<ColorStop> {
    let mut stops = g.sorted_stops();
    if let Some(first) = stops.first().copied() {
        if first.t > 0.0 {
            stops.insert(0, ColorStop::new(0.0, first.color));
        }
    }
    if let Some(last) = stops.last().copied() {
        if last.t < 1.0 {
            stops.push(ColorStop::new(1.0, last.color));
        }
    }
    stops
}

/// PostScript / PDF function dictionary mapping `t` to DeviceRGB.
///
/// Two stops become one exponential (type 2) function; more are stitched
/// together with a type 3 function.
fn color_function(stops: &[ColorStop]) -> String {
    let rgb = |s: &ColorStop| {
        let c = s.color;
        format!("[{} {} {}]", num(c.r), num(c.g), num(c.b))
    };
    let interp = |a: &ColorStop, b: &ColorStop| {
        format!(
            "<< /FunctionType 2 /Domain [0 1] /C0 {} /C1 {} /N 1 >>",
            rgb(a),
            rgb(b)
        )
    };

    match stops {
        [] => {
            let black = ColorStop::new(0.0, Color::black());
            return interp(&black, &black);
        }
        [a] => return interp(a, a),
        [a, b] => return interp(a, b),
        _ => {}
    }

    let functions: Vec<String> = stops.windows(2).map(|w| interp(&w[0], &w[1])).collect();
    let bounds: Vec<String> = stops[1..stops.len() - 1]
        .iter()
        .map(|s| num(s.t).to_string())
        .collect();
    let encode: Vec<&str> = functions.iter().map(|_| "0 1").collect();
    format!(
        "<< /FunctionType 3 /Domain [0 1] /Functions [{}] /Bounds [{}] /Encode [{}] >>",
        functions.join(" "),
        bounds.join(" "),
        encode.join(" ")
    )
}

/// Type 3 (radial) shading dictionary, extended past both circles.
fn radial_shading(g: &RadialGradient) -> String {
    format!(
        "<< /ShadingType 3 /ColorSpace /DeviceRGB /Coords [{} {} {} {} {} {}] /Extend [true true] /Function {} >>",
        num(g.inner_center.x),
        num(g.inner_center.y),
        num(g.inner_radius),
        num(g.outer_center.x),
        num(g.outer_center.y),
        num(g.outer_radius),
        color_function(&padded_stops(g))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Paint;
    use crate::target::{render_with, RenderTarget};

    fn draw_sample(t: &mut dyn RenderTarget) {
        t.set_source(Paint::Solid(Color::rgb(1.0, 0.0, 0.0)));
        t.arc(Vec2::new(10.0, 10.0), 5.0, 0.0, 1.0);
        t.close_path();
        t.fill();
    }

    // ── numbers ─────────────────────────────────────────────────────────

    #[test]
    fn num_trims_trailing_zeros() {
        assert_eq!(num(100.0f32).to_string(), "100");
        assert_eq!(num(0.65f32).to_string(), "0.65");
        assert_eq!(num(-0.0001f64).to_string(), "0");
        assert_eq!(num(1.23456f64).to_string(), "1.235");
    }

    // ── gradients ───────────────────────────────────────────────────────

    #[test]
    fn two_stops_use_a_single_exponential_function() {
        let g = RadialGradient::new(Vec2::zero(), 0.0, Vec2::zero(), 10.0)
            .with_stop(0.0, Color::white())
            .with_stop(1.0, Color::black());
        let f = color_function(&padded_stops(&g));
        assert!(f.starts_with("<< /FunctionType 2"));
        assert!(f.contains("/C0 [1 1 1] /C1 [0 0 0]"));
    }

    #[test]
    fn inner_stops_are_stitched() {
        let g = RadialGradient::new(Vec2::zero(), 0.0, Vec2::zero(), 10.0)
            .with_stop(0.2, Color::white())
            .with_stop(0.5, Color::black());
        let stops = padded_stops(&g);
        assert_eq!(stops.len(), 4);
        let f = color_function(&stops);
        assert!(f.starts_with("<< /FunctionType 3"));
        assert!(f.contains("/Bounds [0.2 0.5]"));
    }

    // ── surface ─────────────────────────────────────────────────────────

    #[test]
    fn finish_returns_the_writer() {
        let mut s = VectorSurface::new(Vec::new(), VectorFormat::Svg, Viewport::new(20.0, 20.0));
        render_with(&mut s, draw_sample);
        assert_eq!(s.ops().len(), 1);
        let out = s.finish().unwrap();
        assert!(String::from_utf8(out).unwrap().contains("<svg"));
    }

    #[test]
    fn drop_finalizes_the_document() {
        let mut buf = Vec::new();
        {
            let mut s = VectorSurface::new(&mut buf, VectorFormat::Ps, Viewport::new(20.0, 20.0));
            render_with(&mut s, draw_sample);
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("%!PS-Adobe-3.0"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let path = std::env::temp_dir()
            .join("petal-no-such-dir")
            .join("nested")
            .join("out.svg");
        let err = VectorSurface::create(&path, VectorFormat::Svg, Viewport::new(1.0, 1.0));
        assert!(err.is_err());
    }

    #[test]
    fn extensions_are_distinct() {
        let exts: Vec<_> = VectorFormat::ALL.iter().map(|f| f.extension()).collect();
        assert_eq!(exts, ["svg", "eps", "ps", "pdf"]);
    }
}
