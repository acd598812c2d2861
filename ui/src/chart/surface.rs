//! Drawing primitives used by the passes, and the SVG surface implementing them.

use std::fmt::Write as _;

use super::text::FontWeight;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_svg(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub family: &'a str,
    pub size: f64,
    pub weight: FontWeight,
    pub color: &'a str,
    pub anchor: Anchor,
    /// Degrees, around the anchor point.
    pub rotate: Option<f64>,
    /// Centre the glyphs on the anchor point vertically.
    pub middle_baseline: bool,
}

/// Target of the draw passes. `class` tags the element for styling and inspection.
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: &str, opacity: f64, class: &str);
    /// `stops` are `(offset, colour)` with offset 0 at the bottom of `rect` and 1 at its top.
    fn fill_rect_gradient(&mut self, rect: Rect, stops: &[(f64, &str)], opacity: f64, class: &str);
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke<'_>, class: &str);
    fn polyline(&mut self, points: &[Point], stroke: &Stroke<'_>, class: &str);
    fn circle(&mut self, center: Point, radius: f64, fill: &str, tooltip: Option<&str>, class: &str);
    fn text(&mut self, at: Point, content: &str, style: &TextStyle<'_>, class: &str);
    /// Shortened text that keeps its full form as a hover title.
    fn text_titled(&mut self, at: Point, content: &str, title: &str, style: &TextStyle<'_>, class: &str) {
        let _ = title;
        self.text(at, content, style, class);
    }
}

/// Accumulates SVG markup. Output depends only on the calls made, so equal
/// inputs always give byte-identical documents.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    defs: String,
    body: String,
    gradients: usize,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32, background: &str) -> Self {
        let mut surface = Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
            gradients: 0,
        };
        surface.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                width: f64::from(width),
                height: f64::from(height),
            },
            background,
            1.0,
            "canvas",
        );
        surface
    }

    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.defs.len() + self.body.len() + 256);
        let _ = write!(
            out,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>\n",
            w = self.width,
            h = self.height
        );
        if !self.defs.is_empty() {
            out.push_str("  <defs>\n");
            out.push_str(&self.defs);
            out.push_str("  </defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl DrawSurface for SvgSurface {
    fn fill_rect(&mut self, rect: Rect, color: &str, opacity: f64, class: &str) {
        let _ = writeln!(
            self.body,
            "  <rect class='{class}' x='{}' y='{}' width='{}' height='{}' fill='{}'{}/>",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            escape_xml(color),
            opacity_attr("fill-opacity", opacity),
        );
    }

    fn fill_rect_gradient(&mut self, rect: Rect, stops: &[(f64, &str)], opacity: f64, class: &str) {
        let id = format!("{class}-gradient-{}", self.gradients);
        self.gradients += 1;

        let _ = writeln!(
            self.defs,
            "    <linearGradient id='{id}' x1='0' y1='1' x2='0' y2='0'>"
        );
        for (offset, color) in stops {
            let _ = writeln!(
                self.defs,
                "      <stop offset='{}' stop-color='{}'/>",
                num(offset.clamp(0.0, 1.0)),
                escape_xml(color)
            );
        }
        self.defs.push_str("    </linearGradient>\n");

        let _ = writeln!(
            self.body,
            "  <rect class='{class}' x='{}' y='{}' width='{}' height='{}' fill='url(#{id})'{}/>",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            opacity_attr("fill-opacity", opacity),
        );
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke<'_>, class: &str) {
        let _ = writeln!(
            self.body,
            "  <line class='{class}' x1='{}' y1='{}' x2='{}' y2='{}' stroke='{}' stroke-width='{}'{}/>",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            escape_xml(stroke.color),
            num(stroke.width),
            opacity_attr("stroke-opacity", stroke.opacity),
        );
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke<'_>, class: &str) {
        if points.is_empty() {
            return;
        }
        let coords = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            self.body,
            "  <polyline class='{class}' points='{coords}' fill='none' stroke='{}' stroke-width='{}' stroke-linejoin='round'{}/>",
            escape_xml(stroke.color),
            num(stroke.width),
            opacity_attr("stroke-opacity", stroke.opacity),
        );
    }

    fn circle(&mut self, center: Point, radius: f64, fill: &str, tooltip: Option<&str>, class: &str) {
        let open = format!(
            "  <circle class='{class}' cx='{}' cy='{}' r='{}' fill='{}'",
            num(center.x),
            num(center.y),
            num(radius),
            escape_xml(fill)
        );
        match tooltip {
            Some(tip) => {
                let _ = writeln!(self.body, "{open}><title>{}</title></circle>", escape_xml(tip));
            }
            None => {
                let _ = writeln!(self.body, "{open}/>");
            }
        }
    }

    fn text(&mut self, at: Point, content: &str, style: &TextStyle<'_>, class: &str) {
        self.write_text(at, content, None, style, class);
    }

    fn text_titled(&mut self, at: Point, content: &str, title: &str, style: &TextStyle<'_>, class: &str) {
        self.write_text(at, content, Some(title), style, class);
    }
}

impl SvgSurface {
    fn write_text(
        &mut self,
        at: Point,
        content: &str,
        title: Option<&str>,
        style: &TextStyle<'_>,
        class: &str,
    ) {
        let weight = match style.weight {
            FontWeight::Regular => "normal",
            FontWeight::Bold => "bold",
        };
        let rotate = style
            .rotate
            .map(|deg| format!(" transform='rotate({} {} {})'", num(deg), num(at.x), num(at.y)))
            .unwrap_or_default();
        let baseline = if style.middle_baseline {
            " dominant-baseline='central'"
        } else {
            ""
        };
        let title = title
            .map(|full| format!("<title>{}</title>", escape_xml(full)))
            .unwrap_or_default();
        let _ = writeln!(
            self.body,
            "  <text class='{class}' x='{}' y='{}' font-family='{}' font-size='{}' font-weight='{weight}' fill='{}' text-anchor='{}'{baseline}{rotate}>{title}{}</text>",
            num(at.x),
            num(at.y),
            escape_xml(style.family),
            num(style.size),
            escape_xml(style.color),
            style.anchor.as_svg(),
            escape_xml(content),
        );
    }
}

fn opacity_attr(name: &str, opacity: f64) -> String {
    if opacity >= 1.0 {
        String::new()
    } else {
        format!(" {name}='{}'", num(opacity.max(0.0)))
    }
}

/// Two-decimal coordinates; negative zero prints as `0.00`.
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}

pub(crate) fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
