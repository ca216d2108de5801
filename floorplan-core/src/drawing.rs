//! Retained drawing model and its SVG serialization.
//!
//! A [`Drawing`] is a list of layers painted in order; each layer is a list of
//! shapes. Numbers are written with two decimals so identical input always
//! serializes to identical bytes.

use std::fmt::Write as _;

use crate::mapper::{Point, PxRect};

pub const SVG_ELEMENT_ID: &str = "concept-plan-svg";

/// Paint layers in back-to-front order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Background,
    Grid,
    Boundary,
    Fills,
    Walls,
    Cuts,
    Symbols,
    Labels,
    Dimensions,
    TitleBlock,
}

impl LayerKind {
    pub fn id(self) -> &'static str {
        match self {
            LayerKind::Background => "layer-background",
            LayerKind::Grid => "layer-grid",
            LayerKind::Boundary => "layer-boundary",
            LayerKind::Fills => "layer-fills",
            LayerKind::Walls => "layer-walls",
            LayerKind::Cuts => "layer-cuts",
            LayerKind::Symbols => "layer-symbols",
            LayerKind::Labels => "layer-labels",
            LayerKind::Dimensions => "layer-dimensions",
            LayerKind::TitleBlock => "layer-title",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub fill: Option<&'static str>,
    pub stroke: Option<&'static str>,
    pub stroke_width: Option<f64>,
    pub dash: Option<&'static str>,
    pub opacity: Option<f64>,
    pub stroke_opacity: Option<f64>,
}

impl Style {
    pub fn fill(color: &'static str) -> Self {
        Style {
            fill: Some(color),
            stroke: Some("none"),
            ..Default::default()
        }
    }

    pub fn stroke(color: &'static str, width: f64) -> Self {
        Style {
            fill: Some("none"),
            stroke: Some(color),
            stroke_width: Some(width),
            ..Default::default()
        }
    }

    pub fn dashed(mut self, pattern: &'static str) -> Self {
        self.dash = Some(pattern);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_stroke_opacity(mut self, opacity: f64) -> Self {
        self.stroke_opacity = Some(opacity);
        self
    }

    fn write_attrs(&self, out: &mut String) {
        if let Some(f) = self.fill {
            let _ = write!(out, " fill=\"{}\"", f);
        }
        if let Some(s) = self.stroke {
            let _ = write!(out, " stroke=\"{}\"", s);
        }
        if let Some(w) = self.stroke_width {
            let _ = write!(out, " stroke-width=\"{:.2}\"", w);
        }
        if let Some(d) = self.dash {
            let _ = write!(out, " stroke-dasharray=\"{}\"", d);
        }
        if let Some(o) = self.opacity {
            let _ = write!(out, " opacity=\"{:.2}\"", o);
        }
        if let Some(o) = self.stroke_opacity {
            let _ = write!(out, " stroke-opacity=\"{:.2}\"", o);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub at: Point,
    pub content: String,
    pub size: f64,
    pub anchor: TextAnchor,
    pub family: &'static str,
    pub bold: bool,
    pub fill: &'static str,
    /// Rotation in degrees about `at`.
    pub rotate: Option<f64>,
}

impl Text {
    pub fn new(at: impl Into<Point>, content: impl Into<String>, size: f64) -> Self {
        Text {
            at: at.into(),
            content: content.into(),
            size,
            anchor: TextAnchor::Start,
            family: "sans-serif",
            bold: false,
            fill: "#111827",
            rotate: None,
        }
    }

    pub fn centered(mut self) -> Self {
        self.anchor = TextAnchor::Middle;
        self
    }

    pub fn family(mut self, family: &'static str) -> Self {
        self.family = family;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn fill(mut self, color: &'static str) -> Self {
        self.fill = color;
        self
    }

    pub fn rotated(mut self, deg: f64) -> Self {
        self.rotate = Some(deg);
        self
    }
}

/// Translate-then-rotate transform of a symbol group.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroupTransform {
    pub translate: Point,
    pub rotate: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect {
        rect: PxRect,
        style: Style,
    },
    Line {
        from: Point,
        to: Point,
        style: Style,
    },
    Path {
        d: String,
        style: Style,
    },
    Text(Text),
    Group {
        transform: GroupTransform,
        children: Vec<Shape>,
    },
}

impl Shape {
    pub fn rect(rect: PxRect, style: Style) -> Self {
        Shape::Rect { rect, style }
    }

    pub fn line(from: impl Into<Point>, to: impl Into<Point>, style: Style) -> Self {
        Shape::Line {
            from: from.into(),
            to: to.into(),
            style,
        }
    }

    pub fn path(d: impl Into<String>, style: Style) -> Self {
        Shape::Path { d: d.into(), style }
    }

    pub fn group(translate: Point, rotate: f64, children: Vec<Shape>) -> Self {
        Shape::Group {
            transform: GroupTransform { translate, rotate },
            children,
        }
    }

    fn write_svg(&self, out: &mut String) {
        match self {
            Shape::Rect { rect, style } => {
                let _ = write!(
                    out,
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"",
                    rect.x, rect.y, rect.w, rect.h
                );
                style.write_attrs(out);
                out.push_str("/>\n");
            }
            Shape::Line { from, to, style } => {
                let _ = write!(
                    out,
                    "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"",
                    from.x, from.y, to.x, to.y
                );
                style.write_attrs(out);
                out.push_str("/>\n");
            }
            Shape::Path { d, style } => {
                let _ = write!(out, "<path d=\"{}\"", d);
                style.write_attrs(out);
                out.push_str("/>\n");
            }
            Shape::Text(t) => {
                let _ = write!(
                    out,
                    "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{:.2}\" fill=\"{}\"",
                    t.at.x, t.at.y, t.family, t.size, t.fill
                );
                if t.anchor == TextAnchor::Middle {
                    out.push_str(" text-anchor=\"middle\"");
                }
                if t.bold {
                    out.push_str(" font-weight=\"bold\"");
                }
                if let Some(r) = t.rotate {
                    let _ = write!(
                        out,
                        " transform=\"rotate({:.2} {:.2} {:.2})\"",
                        r, t.at.x, t.at.y
                    );
                }
                let _ = writeln!(out, ">{}</text>", svg_escape(&t.content));
            }
            Shape::Group {
                transform,
                children,
            } => {
                let _ = write!(
                    out,
                    "<g transform=\"translate({:.2} {:.2})",
                    transform.translate.x, transform.translate.y
                );
                if transform.rotate != 0.0 {
                    let _ = write!(out, " rotate({:.2})", transform.rotate);
                }
                out.push_str("\">\n");
                for c in children {
                    c.write_svg(out);
                }
                out.push_str("</g>\n");
            }
        }
    }
}

/// Tiling pattern referenced by `url(#id)` fills.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub id: &'static str,
    pub width: f64,
    pub height: f64,
    pub rotate: Option<f64>,
    pub children: Vec<Shape>,
}

impl Pattern {
    fn write_svg(&self, out: &mut String) {
        let _ = write!(
            out,
            "<pattern id=\"{}\" width=\"{:.2}\" height=\"{:.2}\" patternUnits=\"userSpaceOnUse\"",
            self.id, self.width, self.height
        );
        if let Some(r) = self.rotate {
            let _ = write!(out, " patternTransform=\"rotate({:.2})\"", r);
        }
        out.push_str(">\n");
        for c in &self.children {
            c.write_svg(out);
        }
        out.push_str("</pattern>\n");
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub shapes: Vec<Shape>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub defs: Vec<Pattern>,
    pub layers: Vec<Layer>,
}

impl Drawing {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Whole-pixel size of the drawing surface.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.max(0.0).ceil() as u32,
            self.height.max(0.0).ceil() as u32,
        )
    }

    /// Standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (w_px, h_px) = self.pixel_size();
        let mut s = String::new();
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            s,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" stroke-linejoin=\"miter\">",
            SVG_ELEMENT_ID, w_px, h_px, w_px, h_px
        );
        if !self.defs.is_empty() {
            s.push_str("<defs>\n");
            for p in &self.defs {
                p.write_svg(&mut s);
            }
            s.push_str("</defs>\n");
        }
        for layer in &self.layers {
            let _ = writeln!(s, "<g id=\"{}\">", layer.kind.id());
            for shape in &layer.shapes {
                shape.write_svg(&mut s);
            }
            s.push_str("</g>\n");
        }
        s.push_str("</svg>\n");
        s
    }
}

pub fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(svg_escape("Bed & <Bath>"), "Bed &amp; &lt;Bath&gt;");
    }

    #[test]
    fn group_writes_translate_then_rotate() {
        let g = Shape::group(
            Point { x: 280.0, y: 480.0 },
            180.0,
            vec![Shape::line(
                (-18.0, 0.0),
                (18.0, 0.0),
                Style::stroke("white", 8.0),
            )],
        );
        let mut out = String::new();
        g.write_svg(&mut out);
        assert!(out.starts_with("<g transform=\"translate(280.00 480.00) rotate(180.00)\">"));
        assert!(out.contains(
            "<line x1=\"-18.00\" y1=\"0.00\" x2=\"18.00\" y2=\"0.00\" fill=\"none\" stroke=\"white\" stroke-width=\"8.00\"/>"
        ));
    }

    #[test]
    fn unrotated_group_omits_rotate() {
        let g = Shape::group(Point { x: 1.0, y: 2.0 }, 0.0, Vec::new());
        let mut out = String::new();
        g.write_svg(&mut out);
        assert_eq!(out, "<g transform=\"translate(1.00 2.00)\">\n</g>\n");
    }

    #[test]
    fn svg_lists_layers_in_order() {
        let d = Drawing {
            width: 99.5,
            height: 40.0,
            defs: Vec::new(),
            layers: vec![
                Layer {
                    kind: LayerKind::Walls,
                    shapes: Vec::new(),
                },
                Layer {
                    kind: LayerKind::Cuts,
                    shapes: Vec::new(),
                },
            ],
        };
        assert_eq!(d.pixel_size(), (100, 40));
        let svg = d.to_svg();
        assert!(svg.contains("width=\"100\" height=\"40\""));
        let walls = svg.find("layer-walls").unwrap();
        let cuts = svg.find("layer-cuts").unwrap();
        assert!(walls < cuts);
    }

    #[test]
    fn text_is_escaped_and_rotated_about_its_anchor() {
        let t = Text::new(Point { x: 10.0, y: 20.0 }, "A&B", 12.0)
            .centered()
            .rotated(-90.0);
        let mut out = String::new();
        Shape::Text(t).write_svg(&mut out);
        assert!(out.contains("text-anchor=\"middle\""));
        assert!(out.contains("transform=\"rotate(-90.00 10.00 20.00)\""));
        assert!(out.contains(">A&amp;B</text>"));
    }
}
