use std::fmt::Write as _;
use std::io::{self, Write};

use kurbo::PathEl;

use crate::coords::Viewport;
use crate::paint::{Color, Paint, RadialGradient};
use crate::target::{DrawOp, Path};

use super::{num, radial_shading};

/// Named page resources referenced from the content stream.
#[derive(Default)]
struct Resources {
    /// `(stroking, alpha in thousandths)` per `/GSn`.
    alphas: Vec<(bool, u16)>,
    /// Shading dictionaries per `/Pn` pattern.
    patterns: Vec<String>,
}

impl Resources {
    fn alpha(&mut self, stroking: bool, a: f32) -> usize {
        let key = (stroking, (a.clamp(0.0, 1.0) * 1000.0).round() as u16);
        if let Some(i) = self.alphas.iter().position(|k| *k == key) {
            return i;
        }
        self.alphas.push(key);
        self.alphas.len() - 1
    }

    fn pattern(&mut self, g: &RadialGradient) -> usize {
        self.patterns.push(radial_shading(g));
        self.patterns.len() - 1
    }
}

/// Writes a single-page PDF 1.4 document.
pub(super) fn write<W: Write>(out: &mut W, size: Viewport, ops: &[DrawOp]) -> io::Result<()> {
    let mut res = Resources::default();
    let content = content_stream(size, ops, &mut res);

    // 1 catalog, 2 pages, 3 page, 4 content, then graphics states, then patterns.
    let first_gs = 5;
    let first_pattern = first_gs + res.alphas.len();

    let mut objects: Vec<Vec<u8>> = Vec::new();
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec());

    let mut resources = String::from("<< ");
    if !res.alphas.is_empty() {
        resources.push_str("/ExtGState << ");
        for i in 0..res.alphas.len() {
            let _ = write!(resources, "/GS{i} {} 0 R ", first_gs + i);
        }
        resources.push_str(">> ");
    }
    if !res.patterns.is_empty() {
        resources.push_str("/Pattern << ");
        for i in 0..res.patterns.len() {
            let _ = write!(resources, "/P{i} {} 0 R ", first_pattern + i);
        }
        resources.push_str(">> ");
    }
    resources.push_str(">>");

    objects.push(
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources {resources} /Contents 4 0 R >>",
            num(size.width),
            num(size.height)
        )
        .into_bytes(),
    );

    let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    stream.extend_from_slice(content.as_bytes());
    stream.extend_from_slice(b"\nendstream");
    objects.push(stream);

    for (stroking, milli) in &res.alphas {
        let key = if *stroking { "CA" } else { "ca" };
        let a = *milli as f64 / 1000.0;
        objects.push(format!("<< /Type /ExtGState /{key} {} >>", num(a)).into_bytes());
    }
    // Pattern space is the default page space; map it onto the flipped user space.
    for shading in &res.patterns {
        objects.push(
            format!(
                "<< /Type /Pattern /PatternType 2 /Matrix [1 0 0 -1 0 {}] /Shading {shading} >>",
                num(size.height)
            )
            .into_bytes(),
        );
    }

    let mut doc: Vec<u8> = Vec::new();
    doc.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(doc.len());
        doc.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        doc.extend_from_slice(body);
        doc.extend_from_slice(b"\nendobj\n");
    }

    let xref = doc.len();
    doc.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    doc.extend_from_slice(b"0000000000 65535 f \n");
    for off in offsets {
        doc.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    doc.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );

    out.write_all(&doc)
}

fn content_stream(size: Viewport, ops: &[DrawOp], res: &mut Resources) -> String {
    let mut s = String::new();
    let (w, h) = (num(size.width), num(size.height));
    let _ = writeln!(s, "1 0 0 -1 0 {h} cm");

    for op in ops {
        let stroking = matches!(op, DrawOp::Stroke { .. });
        s.push_str("q\n");
        set_paint(&mut s, op.paint(), stroking, res);
        match op {
            DrawOp::Fill { path, .. } => {
                path_ops(&mut s, path);
                s.push_str("f\n");
            }
            DrawOp::Stroke {
                path, line_width, ..
            } => {
                let _ = writeln!(s, "{} w", num(*line_width));
                path_ops(&mut s, path);
                s.push_str("S\n");
            }
            DrawOp::Paint { .. } => {
                let _ = writeln!(s, "0 0 {w} {h} re f");
            }
        }
        s.push_str("Q\n");
    }
    s
}

fn set_paint(s: &mut String, paint: &Paint, stroking: bool, res: &mut Resources) {
    match paint {
        Paint::Solid(c) => {
            if !c.is_opaque() {
                let gs = res.alpha(stroking, c.a);
                let _ = writeln!(s, "/GS{gs} gs");
            }
            let op = if stroking { "RG" } else { "rg" };
            let Color { r, g, b, .. } = *c;
            let _ = writeln!(
                s,
                "{} {} {} {op}",
                num(r.clamp(0.0, 1.0)),
                num(g.clamp(0.0, 1.0)),
                num(b.clamp(0.0, 1.0))
            );
        }
        Paint::RadialGradient(g) => {
            if g.stops.iter().any(|stop| !stop.color.is_opaque()) {
                log::debug!("PDF gradient stops are written opaque");
            }
            let p = res.pattern(g);
            let (space, color) = if stroking { ("CS", "SCN") } else { ("cs", "scn") };
            let _ = writeln!(s, "/Pattern {space} /P{p} {color}");
        }
    }
}

fn path_ops(s: &mut String, path: &Path) {
    let mut last = kurbo::Point::ZERO;
    let mut start = kurbo::Point::ZERO;
    for el in path.to_bez_path().elements() {
        let _ = match *el {
            PathEl::MoveTo(p) => {
                (last, start) = (p, p);
                writeln!(s, "{} {} m", num(p.x), num(p.y))
            }
            PathEl::LineTo(p) => {
                last = p;
                writeln!(s, "{} {} l", num(p.x), num(p.y))
            }
            PathEl::QuadTo(p1, p2) => {
                let c = kurbo::QuadBez::new(last, p1, p2).raise();
                last = p2;
                curve(s, c.p1, c.p2, c.p3)
            }
            PathEl::CurveTo(p1, p2, p3) => {
                last = p3;
                curve(s, p1, p2, p3)
            }
            PathEl::ClosePath => {
                last = start;
                writeln!(s, "h")
            }
        };
    }
}

fn curve(s: &mut String, p1: kurbo::Point, p2: kurbo::Point, p3: kurbo::Point) -> core::fmt::Result {
    writeln!(
        s,
        "{} {} {} {} {} {} c",
        num(p1.x),
        num(p1.y),
        num(p2.x),
        num(p2.y),
        num(p3.x),
        num(p3.y)
    )
}
