// This code is a thin Rust wrapper to handle SVG tags
// and render the results to *.svg markup.

use std::fmt::Write;

// ----------------------------------------------------------------------------
//
//
// Rust representation and rendering of SVG tags.
//
//
// ----------------------------------------------------------------------------

/// Attributes and style properties. Ordered, so the markup is stable.
pub type Params = std::collections::BTreeMap<String, String>;

pub trait RenderTag: std::fmt::Debug {
    fn render(&self, buf: &mut String);
}

impl<T> RenderTag for Tag<T>
where
    T: Identifier + std::fmt::Debug,
{
    fn render(&self, buf: &mut String) {
        write!(buf, "<{}", self.kind.identifier()).expect(FAILED_STRING_WRITE);
        for (k, v) in self.parameters.iter() {
            write!(buf, " {k}=\"{}\"", escape(v)).expect(FAILED_STRING_WRITE);
        }
        if !self.style.is_empty() {
            let style: Vec<_> = self
                .style
                .iter()
                .map(|(k, v)| format!("{k}:{}", escape(v)))
                .collect();
            write!(buf, " style=\"{}\"", style.join(";")).expect(FAILED_STRING_WRITE);
        }
        if self.children.is_empty() && !self.closing {
            write!(buf, " />").expect(FAILED_STRING_WRITE);
            return;
        }
        write!(buf, ">").expect(FAILED_STRING_WRITE);
        for c in self.children.iter() {
            c.render(buf);
        }
        write!(buf, "</{}>", self.kind.identifier()).expect(FAILED_STRING_WRITE);
    }
}

impl RenderTag for String {
    fn render(&self, buf: &mut String) {
        buf.push_str(&escape(self));
    }
}

pub fn render(svg_tag: &Tag<SVG>) -> String {
    let mut raw_svg = String::new();
    svg_tag.render(&mut raw_svg);
    raw_svg
}

#[derive(Debug)]
pub struct Tag<T>
where
    T: std::fmt::Debug,
{
    parameters: Params,
    style: Params,
    children: Vec<Box<dyn RenderTag>>,
    closing: bool,
    kind: T,
}

impl<T> Tag<T>
where
    T: std::fmt::Debug,
{
    fn with_parameters(kind: T, parameters: &[(&str, String)], style: Option<Params>) -> Self {
        Self {
            parameters: parameters
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            style: style.unwrap_or_default(),
            children: Vec::new(),
            closing: false,
            kind,
        }
    }

    pub fn add_child(&mut self, child: impl RenderTag + 'static) {
        self.children.push(Box::new(child));
    }

    pub fn add_children(&mut self, children: Vec<Box<dyn RenderTag>>) {
        self.children.extend(children);
    }
}

// ----------------------------------------------------------------------------
//
//
// Creation of `new` tags.
//
//
// ----------------------------------------------------------------------------

impl Tag<SVG> {
    pub fn new(width: u64, height: u64, style: Option<Params>) -> Self {
        let mut tag = Self::with_parameters(
            SVG {},
            &[
                ("width", format!("{width}")),
                ("height", format!("{height}")),
                ("viewBox", format!("0 0 {width} {height}")),
                ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ],
            style,
        );
        tag.closing = true;
        tag
    }
}

impl Tag<Group> {
    pub fn new(dx: f64, dy: f64, style: Option<Params>) -> Self {
        let mut tag = Self::with_parameters(
            Group {},
            &[("transform", format!("translate({dx},{dy})"))],
            style,
        );
        tag.closing = true;
        tag
    }
}

impl Tag<Circle> {
    pub fn new(cx: f64, cy: f64, r: f64, style: Option<Params>) -> Self {
        Self::with_parameters(
            Circle {},
            &[
                ("cx", format!("{cx}")),
                ("cy", format!("{cy}")),
                ("r", format!("{r}")),
            ],
            style,
        )
    }
}

impl Tag<Rect> {
    pub fn new(x: f64, y: f64, width: f64, height: f64, style: Option<Params>) -> Self {
        Self::with_parameters(
            Rect {},
            &[
                ("x", format!("{x}")),
                ("y", format!("{y}")),
                ("width", format!("{width}")),
                ("height", format!("{height}")),
            ],
            style,
        )
    }
}

impl Tag<Text> {
    pub fn new(x: f64, y: f64, angle: f64, text: &str, style: Option<Params>) -> Self {
        let mut res = Self::with_parameters(
            Text {},
            &[("transform", format!("translate({x},{y}) rotate({angle})"))],
            style,
        );
        res.closing = true;
        res.add_child(text.to_string());
        res
    }
}

impl Tag<Line> {
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64, style: Option<Params>) -> Self {
        Self::with_parameters(
            Line {},
            &[
                ("x1", format!("{x1}")),
                ("x2", format!("{x2}")),
                ("y1", format!("{y1}")),
                ("y2", format!("{y2}")),
            ],
            style,
        )
    }
}

impl Tag<Polyline> {
    pub fn new(points: impl IntoIterator<Item = [f64; 2]>, style: Option<Params>) -> Self {
        Self::with_parameters(
            Polyline {},
            &[
                ("points", raw_points(points)),
                ("fill", "none".to_string()),
            ],
            style,
        )
    }
}

impl Tag<Polygon> {
    pub fn new(points: impl IntoIterator<Item = [f64; 2]>, style: Option<Params>) -> Self {
        Self::with_parameters(Polygon {}, &[("points", raw_points(points))], style)
    }
}

fn raw_points(points: impl IntoIterator<Item = [f64; 2]>) -> String {
    points
        .into_iter()
        .map(|[x, y]| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for chr in raw.chars() {
        match chr {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(chr),
        }
    }
    out
}

// ----------------------------------------------------------------------------
//
//
// SVG tag kinds and their str representation (`identifier`)
//
//
// ----------------------------------------------------------------------------

#[derive(Debug)]
pub struct SVG {}
#[derive(Debug)]
pub struct Group {}
#[derive(Debug)]
pub struct Circle {}
#[derive(Debug)]
pub struct Rect {}
#[derive(Debug)]
pub struct Text {}
#[derive(Debug)]
pub struct Line {}
#[derive(Debug)]
pub struct Polyline {}
#[derive(Debug)]
pub struct Polygon {}

pub trait Identifier {
    fn identifier(&self) -> &'static str;
}

macro_rules! identifier {
    ($kind:ty, $name:literal) => {
        impl Identifier for $kind {
            fn identifier(&self) -> &'static str {
                $name
            }
        }
    };
}

identifier!(SVG, "svg");
identifier!(Group, "g");
identifier!(Circle, "circle");
identifier!(Rect, "rect");
identifier!(Text, "text");
identifier!(Line, "line");
identifier!(Polyline, "polyline");
identifier!(Polygon, "polygon");

const FAILED_STRING_WRITE: &str = "Failed to write into string.";

pub fn opts(items: &[(&str, &str)]) -> Option<Params> {
    Some(
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_tags() {
        let mut svg = Tag::<SVG>::new(400, 300, None);
        let mut group = Tag::<Group>::new(10.0, 20.0, None);
        group.add_child(Tag::<Rect>::new(
            0.0,
            0.0,
            40.0,
            30.0,
            opts(&[("fill", "red")]),
        ));
        svg.add_child(group);

        let markup = render(&svg);
        assert!(markup.starts_with("<svg height=\"300\""));
        assert!(markup.contains("<g transform=\"translate(10,20)\">"));
        assert!(markup.contains(
            "<rect height=\"30\" width=\"40\" x=\"0\" y=\"0\" style=\"fill:red\" />"
        ));
        assert!(markup.ends_with("</g></svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let text = Tag::<Text>::new(1.0, 2.0, 0.0, "R&D <draft>", None);
        let mut buf = String::new();
        text.render(&mut buf);
        assert_eq!(
            buf,
            "<text transform=\"translate(1,2) rotate(0)\">R&amp;D &lt;draft&gt;</text>"
        );
    }

    #[test]
    fn test_polygon_points() {
        let polygon = Tag::<Polygon>::new([[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]], None);
        let mut buf = String::new();
        polygon.render(&mut buf);
        assert_eq!(buf, "<polygon points=\"0,1 2,3 4,5\" />");
    }
}
