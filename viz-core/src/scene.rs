//! Declarative visual tree. Chart builders produce a [`Scene`]; drawing is
//! delegated to a [`Renderer`], which receives shapes in absolute canvas
//! coordinates.

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
    Hanging,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub anchor: Anchor,
    pub baseline: Baseline,
    /// Rotation in degrees, clockwise.
    pub angle: f64,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            anchor: Anchor::Start,
            baseline: Baseline::Alphabetic,
            angle: 0.0,
            bold: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Group {
        dx: f64,
        dy: f64,
        children: Vec<Node>,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
    },
    Polygon {
        points: Vec<[f64; 2]>,
    },
    Polyline {
        points: Vec<[f64; 2]>,
    },
    Text {
        pos: [f64; 2],
        text: String,
        style: TextStyle,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identity used to match nodes across re-renders.
    pub key: Option<String>,
    pub class: &'static str,
    pub shape: Shape,
    pub style: Style,
}

impl Node {
    pub fn new(shape: Shape) -> Self {
        Self {
            key: None,
            class: "",
            shape,
            style: Style::default(),
        }
    }

    pub fn group(dx: f64, dy: f64, children: Vec<Node>) -> Self {
        Self::new(Shape::Group { dx, dy, children })
    }

    pub fn line(from: [f64; 2], to: [f64; 2]) -> Self {
        Self::new(Shape::Line { from, to }).stroke(Color::BLACK, 1.0)
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Shape::Rect {
            x,
            y,
            width,
            height,
        })
    }

    pub fn circle(center: [f64; 2], radius: f64) -> Self {
        Self::new(Shape::Circle { center, radius })
    }

    pub fn polygon(points: Vec<[f64; 2]>) -> Self {
        Self::new(Shape::Polygon { points })
    }

    pub fn polyline(points: Vec<[f64; 2]>) -> Self {
        Self::new(Shape::Polyline { points })
    }

    pub fn text(pos: [f64; 2], text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(Shape::Text {
            pos,
            text: text.into(),
            style,
        })
        .fill(Color::TEXT)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.style.stroke = Some(color);
        self.style.stroke_width = width;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = opacity;
        self
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// The drawing capability a scene is handed to.
pub trait Renderer {
    fn line(&mut self, from: [f64; 2], to: [f64; 2], style: &Style);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style);
    fn circle(&mut self, center: [f64; 2], radius: f64, style: &Style);
    fn polygon(&mut self, points: &[[f64; 2]], style: &Style);
    fn polyline(&mut self, points: &[[f64; 2]], style: &Style);
    fn text(&mut self, pos: [f64; 2], text: &str, text_style: &TextStyle, style: &Style);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for node in self.nodes.iter() {
            render_node(node, [0.0, 0.0], renderer);
        }
    }

    /// All non-group nodes with the offset of their enclosing groups.
    pub fn flatten(&self) -> Vec<([f64; 2], &Node)> {
        fn walk<'a>(node: &'a Node, offset: [f64; 2], out: &mut Vec<([f64; 2], &'a Node)>) {
            match &node.shape {
                Shape::Group { dx, dy, children } => {
                    let offset = [offset[0] + dx, offset[1] + dy];
                    for child in children {
                        walk(child, offset, out);
                    }
                }
                _ => out.push((offset, node)),
            }
        }
        let mut out = Vec::new();
        for node in self.nodes.iter() {
            walk(node, [0.0, 0.0], &mut out);
        }
        out
    }

    pub fn find_class(&self, class: &str) -> Vec<&Node> {
        self.flatten()
            .into_iter()
            .filter(|(_, node)| node.class == class)
            .map(|(_, node)| node)
            .collect()
    }

    pub fn find_key(&self, key: &str) -> Option<&Node> {
        self.flatten()
            .into_iter()
            .map(|(_, node)| node)
            .find(|node| node.key.as_deref() == Some(key))
    }

    /// Keys of all keyed nodes in drawing order.
    pub fn keys(&self) -> Vec<&str> {
        self.flatten()
            .into_iter()
            .filter_map(|(_, node)| node.key.as_deref())
            .collect()
    }

    pub fn for_each_keyed_mut(&mut self, mut f: impl FnMut(&mut Node)) {
        fn walk(node: &mut Node, f: &mut impl FnMut(&mut Node)) {
            if let Shape::Group { children, .. } = &mut node.shape {
                for child in children.iter_mut() {
                    walk(child, f);
                }
            } else if node.key.is_some() {
                f(node);
            }
        }
        for node in self.nodes.iter_mut() {
            walk(node, &mut f);
        }
    }
}

fn render_node<R: Renderer + ?Sized>(node: &Node, offset: [f64; 2], renderer: &mut R) {
    let shift = |[x, y]: [f64; 2]| [x + offset[0], y + offset[1]];
    let style = &node.style;
    match &node.shape {
        Shape::Group { dx, dy, children } => {
            let offset = [offset[0] + dx, offset[1] + dy];
            for child in children {
                render_node(child, offset, renderer);
            }
        }
        Shape::Line { from, to } => renderer.line(shift(*from), shift(*to), style),
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => renderer.rect(x + offset[0], y + offset[1], *width, *height, style),
        Shape::Circle { center, radius } => renderer.circle(shift(*center), *radius, style),
        Shape::Polygon { points } => {
            let points: Vec<_> = points.iter().copied().map(shift).collect();
            renderer.polygon(&points, style)
        }
        Shape::Polyline { points } => {
            let points: Vec<_> = points.iter().copied().map(shift).collect();
            renderer.polyline(&points, style)
        }
        Shape::Text {
            pos,
            text,
            style: text_style,
        } => renderer.text(shift(*pos), text, text_style, style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls as strings.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Renderer for Recorder {
        fn line(&mut self, from: [f64; 2], to: [f64; 2], _: &Style) {
            self.0.push(format!("line {from:?} {to:?}"));
        }
        fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, _: &Style) {
            self.0.push(format!("rect {x} {y} {width} {height}"));
        }
        fn circle(&mut self, center: [f64; 2], radius: f64, _: &Style) {
            self.0.push(format!("circle {center:?} {radius}"));
        }
        fn polygon(&mut self, points: &[[f64; 2]], _: &Style) {
            self.0.push(format!("polygon {points:?}"));
        }
        fn polyline(&mut self, points: &[[f64; 2]], _: &Style) {
            self.0.push(format!("polyline {points:?}"));
        }
        fn text(&mut self, pos: [f64; 2], text: &str, _: &TextStyle, _: &Style) {
            self.0.push(format!("text {pos:?} {text}"));
        }
    }

    #[test]
    fn test_group_offsets_accumulate() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.push(Node::group(
            10.0,
            20.0,
            vec![
                Node::rect(1.0, 2.0, 3.0, 4.0),
                Node::group(5.0, 5.0, vec![Node::circle([0.0, 0.0], 2.0)]),
            ],
        ));
        scene.push(Node::text([1.0, 1.0], "hi", TextStyle::default()));

        let mut recorder = Recorder::default();
        scene.render(&mut recorder);
        assert_eq!(
            recorder.0,
            vec![
                "rect 11 22 3 4".to_string(),
                "circle [15.0, 25.0] 2".to_string(),
                "text [1.0, 1.0] hi".to_string(),
            ]
        );
    }

    #[test]
    fn test_lookup_by_key_and_class() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.push(Node::group(
            0.0,
            0.0,
            vec![
                Node::circle([1.0, 1.0], 1.0)
                    .with_key("Austria")
                    .with_class("bubble"),
                Node::circle([2.0, 2.0], 1.0)
                    .with_key("Chile")
                    .with_class("bubble"),
            ],
        ));
        assert_eq!(scene.keys(), vec!["Austria", "Chile"]);
        assert_eq!(scene.find_class("bubble").len(), 2);
        assert!(scene.find_key("Chile").is_some());
        assert!(scene.find_key("Peru").is_none());
    }
}
