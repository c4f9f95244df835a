//! Renders scenes to SVG markup through `svg_export`.

use svg_export::{Circle, Line, Params, Polygon, Polyline, Rect, RenderTag, Tag, Text, SVG};

use crate::scene::{Anchor, Baseline, Renderer, Scene, Style, TextStyle};

const FONT_FAMILY: &str = "sans-serif";

/// Collects one tag per drawn shape, in drawing order.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    tags: Vec<Box<dyn RenderTag>>,
}

impl SvgRenderer {
    pub fn into_tags(self) -> Vec<Box<dyn RenderTag>> {
        self.tags
    }
}

fn style_params(style: &Style) -> Params {
    let mut params = Params::new();
    params.insert(
        "fill".to_string(),
        style
            .fill
            .map(|c| c.to_hex())
            .unwrap_or_else(|| "none".to_string()),
    );
    if let Some(stroke) = style.stroke {
        params.insert("stroke".to_string(), stroke.to_hex());
        params.insert("stroke-width".to_string(), style.stroke_width.to_string());
    }
    if style.opacity < 1.0 {
        params.insert("opacity".to_string(), style.opacity.to_string());
    }
    params
}

impl Renderer for SvgRenderer {
    fn line(&mut self, from: [f64; 2], to: [f64; 2], style: &Style) {
        self.tags.push(Box::new(Tag::<Line>::new(
            from[0],
            to[0],
            from[1],
            to[1],
            Some(style_params(style)),
        )));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) {
        self.tags.push(Box::new(Tag::<Rect>::new(
            x,
            y,
            width,
            height,
            Some(style_params(style)),
        )));
    }

    fn circle(&mut self, center: [f64; 2], radius: f64, style: &Style) {
        self.tags.push(Box::new(Tag::<Circle>::new(
            center[0],
            center[1],
            radius,
            Some(style_params(style)),
        )));
    }

    fn polygon(&mut self, points: &[[f64; 2]], style: &Style) {
        self.tags.push(Box::new(Tag::<Polygon>::new(
            points.iter().copied(),
            Some(style_params(style)),
        )));
    }

    fn polyline(&mut self, points: &[[f64; 2]], style: &Style) {
        // Polylines are never filled; the tag sets fill="none" itself.
        let mut params = style_params(style);
        params.remove("fill");
        self.tags.push(Box::new(Tag::<Polyline>::new(
            points.iter().copied(),
            Some(params),
        )));
    }

    fn text(&mut self, pos: [f64; 2], text: &str, text_style: &TextStyle, style: &Style) {
        let mut params = style_params(style);
        params.insert("font-family".to_string(), FONT_FAMILY.to_string());
        params.insert("font-size".to_string(), format!("{}px", text_style.font_size));
        let anchor = match text_style.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        params.insert("text-anchor".to_string(), anchor.to_string());
        let baseline = match text_style.baseline {
            Baseline::Alphabetic => "alphabetic",
            Baseline::Middle => "central",
            Baseline::Hanging => "hanging",
        };
        params.insert("dominant-baseline".to_string(), baseline.to_string());
        if text_style.bold {
            params.insert("font-weight".to_string(), "bold".to_string());
        }
        self.tags.push(Box::new(Tag::<Text>::new(
            pos[0],
            pos[1],
            text_style.angle,
            text,
            Some(params),
        )));
    }
}

/// Standalone SVG document of the scene.
pub fn to_svg(scene: &Scene) -> String {
    let mut renderer = SvgRenderer::default();
    scene.render(&mut renderer);
    let mut svg = Tag::<SVG>::new(
        scene.width.round().max(0.0) as u64,
        scene.height.round().max(0.0) as u64,
        svg_export::opts(&[("background-color", "white")]),
    );
    svg.add_children(renderer.into_tags());
    svg_export::render(&svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::scene::Node;

    #[test]
    fn test_scene_to_svg_markup() {
        crate::init_test_logger();
        let mut scene = Scene::new(200.0, 100.0);
        scene.push(Node::group(
            10.0,
            10.0,
            vec![
                Node::rect(0.0, 0.0, 20.0, 30.0).fill(Color::REBECCA_PURPLE),
                Node::circle([5.0, 5.0], 2.0)
                    .fill(Color::RED)
                    .opacity(0.5),
            ],
        ));
        scene.push(Node::polyline(vec![[0.0, 0.0], [1.0, 1.0]]).stroke(Color::GREY, 2.0));

        let markup = to_svg(&scene);
        log::debug!("{markup}");
        assert!(markup.starts_with("<svg height=\"100\""));
        assert!(markup.contains("width=\"200\""));
        assert!(markup.contains(
            "<rect height=\"30\" width=\"20\" x=\"10\" y=\"10\" style=\"fill:#663399\" />"
        ));
        assert!(markup.contains(
            "<circle cx=\"15\" cy=\"15\" r=\"2\" style=\"fill:#ff0000;opacity:0.5\" />"
        ));
        assert!(markup.contains(
            "<polyline fill=\"none\" points=\"0,0 1,1\" style=\"stroke:#808080;stroke-width:2\" />"
        ));
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn test_text_attributes() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.push(Node::text(
            [1.0, 2.0],
            "Price (USD)",
            TextStyle {
                angle: -90.0,
                anchor: Anchor::Middle,
                bold: true,
                ..Default::default()
            },
        ));
        let markup = to_svg(&scene);
        assert!(markup.contains("transform=\"translate(1,2) rotate(-90)\""));
        assert!(markup.contains("text-anchor:middle"));
        assert!(markup.contains("font-weight:bold"));
        assert!(markup.contains(">Price (USD)</text>"));
    }
}
