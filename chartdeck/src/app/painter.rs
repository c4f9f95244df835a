//! Draws scenes with the egui painter.

use egui::{epaint::TextShape, Color32, FontId, Pos2, Rect, Shape, Stroke, Vec2};
use viz_core::{
    color::Color,
    scene::{Anchor, Baseline, Renderer, Scene, Style, TextStyle},
};

/// Scene to screen mapping: uniform scale plus offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Pos2,
    pub scale: f32,
}

impl Viewport {
    /// Largest scale at which the scene fits into `rect`, centred
    /// horizontally.
    pub fn fit(scene_size: [f64; 2], rect: Rect) -> Self {
        let [w, h] = scene_size;
        let scale = (rect.width() / w as f32)
            .min(rect.height() / h as f32)
            .max(0.01);
        let slack = rect.width() - w as f32 * scale;
        Self {
            origin: rect.min + Vec2::new(slack.max(0.0) / 2.0, 0.0),
            scale,
        }
    }

    pub fn to_screen(&self, [x, y]: [f64; 2]) -> Pos2 {
        self.origin + Vec2::new(x as f32, y as f32) * self.scale
    }

    pub fn to_scene(&self, pos: Pos2) -> [f64; 2] {
        let local = (pos - self.origin) / self.scale;
        [local.x as f64, local.y as f64]
    }

    fn length(&self, value: f64) -> f32 {
        value as f32 * self.scale
    }
}

pub struct EguiRenderer<'a> {
    painter: &'a egui::Painter,
    viewport: Viewport,
}

impl<'a> EguiRenderer<'a> {
    pub fn new(painter: &'a egui::Painter, viewport: Viewport) -> Self {
        Self { painter, viewport }
    }

    fn stroke(&self, style: &Style) -> Stroke {
        match style.stroke {
            Some(color) => Stroke::new(
                self.viewport.length(style.stroke_width).max(0.5),
                color32(color, style.opacity),
            ),
            None => Stroke::NONE,
        }
    }

    fn fill(&self, style: &Style) -> Color32 {
        style
            .fill
            .map(|color| color32(color, style.opacity))
            .unwrap_or(Color32::TRANSPARENT)
    }
}

fn color32(color: Color, opacity: f64) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

impl Renderer for EguiRenderer<'_> {
    fn line(&mut self, from: [f64; 2], to: [f64; 2], style: &Style) {
        let points = [self.viewport.to_screen(from), self.viewport.to_screen(to)];
        self.painter.line_segment(points, self.stroke(style));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) {
        let rect = Rect::from_min_size(
            self.viewport.to_screen([x, y]),
            Vec2::new(self.viewport.length(width), self.viewport.length(height)),
        );
        self.painter
            .rect(rect, 0.0, self.fill(style), self.stroke(style));
    }

    fn circle(&mut self, center: [f64; 2], radius: f64, style: &Style) {
        self.painter.circle(
            self.viewport.to_screen(center),
            self.viewport.length(radius),
            self.fill(style),
            self.stroke(style),
        );
    }

    fn polygon(&mut self, points: &[[f64; 2]], style: &Style) {
        let points = points.iter().map(|p| self.viewport.to_screen(*p)).collect();
        self.painter.add(Shape::convex_polygon(
            points,
            self.fill(style),
            self.stroke(style),
        ));
    }

    fn polyline(&mut self, points: &[[f64; 2]], style: &Style) {
        let points = points.iter().map(|p| self.viewport.to_screen(*p)).collect();
        self.painter.add(Shape::line(points, self.stroke(style)));
    }

    fn text(&mut self, pos: [f64; 2], text: &str, text_style: &TextStyle, style: &Style) {
        let color = style
            .fill
            .map(|color| color32(color, style.opacity))
            .unwrap_or(Color32::BLACK);
        let font = FontId::proportional(self.viewport.length(text_style.font_size).max(1.0));
        let galley = self.painter.layout_no_wrap(text.to_string(), font, color);

        // Anchor offset in text direction, then rotated with the text.
        let size = galley.size();
        let ax = match text_style.anchor {
            Anchor::Start => 0.0,
            Anchor::Middle => 0.5,
            Anchor::End => 1.0,
        };
        let ay = match text_style.baseline {
            Baseline::Hanging => 0.0,
            Baseline::Middle => 0.5,
            Baseline::Alphabetic => 0.8,
        };
        let angle = (text_style.angle as f32).to_radians();
        let offset = Vec2::new(-size.x * ax, -size.y * ay);
        let (sin, cos) = angle.sin_cos();
        let rotated = Vec2::new(
            offset.x * cos - offset.y * sin,
            offset.x * sin + offset.y * cos,
        );
        let anchor = self.viewport.to_screen(pos) + rotated;
        self.painter
            .add(TextShape::new(anchor, galley, color).with_angle(angle));
    }
}

/// Allocates room for `scene`, draws it and hands back the response and the
/// mapping used.
pub fn show_scene(
    ui: &mut egui::Ui,
    scene: &Scene,
    sense: egui::Sense,
) -> (egui::Response, Viewport) {
    let available = ui.available_size();
    let ratio = (scene.height / scene.width.max(1.0)) as f32;
    let width = available.x.max(1.0);
    let height = (width * ratio).min(available.y.max(1.0));
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), sense);
    let viewport = Viewport::fit([scene.width, scene.height], response.rect);
    painter.rect_filled(response.rect, 0.0, Color32::WHITE);
    scene.render(&mut EguiRenderer::new(&painter, viewport));
    (response, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_maps_both_ways() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(400.0, 250.0));
        let viewport = Viewport::fit([800.0, 500.0], rect);
        assert_eq!(viewport.scale, 0.5);
        assert_eq!(viewport.to_screen([100.0, 40.0]), Pos2::new(60.0, 40.0));
        assert_eq!(viewport.to_scene(Pos2::new(60.0, 40.0)), [100.0, 40.0]);
    }

    #[test]
    fn test_transparent_colors() {
        assert_eq!(color32(Color::RED, 1.0), Color32::from_rgb(255, 0, 0));
        assert_eq!(color32(Color::RED, 0.0).a(), 0);
    }
}
