//! A single-value range slider over an integer domain (e.g. years).
//!
//! The widget is toolkit agnostic: the host feeds it pointer positions,
//! focus changes and arrow keys, and draws [`RangeSlider::to_scene`]. Every
//! user driven change is reported synchronously through the `on_change`
//! callback; [`RangeSlider::set_value`] moves the slider without reporting.

use std::fmt;

use crate::axis::{Axis, Orient, Tick};
use crate::color::Color;
use crate::scale::LinearScale;
use crate::scene::{Anchor, Baseline, Node, Scene, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderGeometry {
    /// Radius of the round handle.
    pub radius: f64,
    /// Gap between handle and track.
    pub padding: f64,
    pub track_height: f64,
    /// Room below the track for the axis.
    pub axis_height: f64,
}

impl Default for SliderGeometry {
    fn default() -> Self {
        Self {
            radius: 50.0,
            padding: 10.0,
            track_height: 5.0,
            axis_height: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKey {
    Left,
    Right,
}

pub struct RangeSlider {
    extent: [i64; 2],
    value: i64,
    width: f64,
    geometry: SliderGeometry,
    scale: LinearScale,
    focused: bool,
    on_change: Box<dyn FnMut(i64)>,
}

impl fmt::Debug for RangeSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSlider")
            .field("extent", &self.extent)
            .field("value", &self.value)
            .field("width", &self.width)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl RangeSlider {
    /// `width` is the pixel length of the track. Without a start value the
    /// slider starts at the lower end of the extent.
    pub fn new(
        extent: [i64; 2],
        start_value: Option<i64>,
        width: f64,
        on_change: impl FnMut(i64) + 'static,
    ) -> Self {
        let [a, b] = extent;
        let extent = [a.min(b), a.max(b)];
        let width = width.max(0.0);
        let value = start_value.unwrap_or(extent[0]).clamp(extent[0], extent[1]);
        Self {
            extent,
            value,
            width,
            geometry: SliderGeometry::default(),
            scale: LinearScale::new([extent[0] as f64, extent[1] as f64], [0.0, width]),
            focused: false,
            on_change: Box::new(on_change),
        }
    }

    pub fn with_geometry(mut self, geometry: SliderGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn extent(&self) -> [i64; 2] {
        self.extent
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn geometry(&self) -> &SliderGeometry {
        &self.geometry
    }

    /// Programmatic update: moves handle, pointer and label, never calls
    /// `on_change`.
    pub fn set_value(&mut self, value: i64) {
        self.value = self.clamp(value);
    }

    /// Pointer moved to `x` (track coordinates) while dragging.
    pub fn drag_to(&mut self, x: f64) -> i64 {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, self.width) };
        let value = self.scale.invert(x).round() as i64;
        self.value = self.clamp(value);
        log::trace!("slider dragged to {x} -> {}", self.value);
        (self.on_change)(self.value);
        self.value
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Arrow key press. Ignored (`None`) unless the handle has focus.
    pub fn key_press(&mut self, key: SliderKey) -> Option<i64> {
        if !self.focused {
            return None;
        }
        let value = match key {
            SliderKey::Left => self.value.saturating_sub(1),
            SliderKey::Right => self.value.saturating_add(1),
        };
        self.value = self.clamp(value);
        (self.on_change)(self.value);
        Some(self.value)
    }

    fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.extent[0], self.extent[1])
    }

    /// Track x position of the handle.
    pub fn handle_x(&self) -> f64 {
        self.scale.scale(self.value as f64)
    }

    fn inner_height(&self) -> f64 {
        let g = &self.geometry;
        2.0 * g.radius + g.track_height + g.padding
    }

    /// Total drawing size including the margins for handle and axis.
    pub fn outer_size(&self) -> [f64; 2] {
        [
            self.width + 2.0 * self.geometry.radius,
            self.inner_height() + self.geometry.axis_height,
        ]
    }

    /// Offset of the track origin inside the drawing.
    pub fn track_origin(&self) -> [f64; 2] {
        [self.geometry.radius, 0.0]
    }

    /// Handle centre in track coordinates.
    pub fn handle_center(&self) -> [f64; 2] {
        let g = &self.geometry;
        [
            self.handle_x(),
            self.inner_height() - g.track_height - g.radius - g.padding,
        ]
    }

    /// Triangle pointing from below the handle down onto the track.
    pub fn pointer_points(&self) -> Vec<[f64; 2]> {
        let g = &self.geometry;
        let x = self.handle_x();
        let tip_y = self.inner_height() - g.track_height;
        let base_y = tip_y - g.padding - g.radius / 10.0;
        vec![
            [x - g.radius / 4.0, base_y],
            [x + g.radius / 4.0, base_y],
            [x, tip_y],
        ]
    }

    /// Whether `point` (track coordinates) grabs the handle or pointer.
    pub fn is_on_dragger(&self, point: [f64; 2]) -> bool {
        let [cx, cy] = self.handle_center();
        let (dx, dy) = (point[0] - cx, point[1] - cy);
        if dx * dx + dy * dy <= self.geometry.radius * self.geometry.radius {
            return true;
        }
        let points = self.pointer_points();
        let (left, right) = (points[0][0], points[1][0]);
        let (top, bottom) = (points[0][1], points[2][1]);
        (left..=right).contains(&point[0]) && (top..=bottom).contains(&point[1])
    }

    pub fn to_scene(&self) -> Scene {
        let [width, height] = self.outer_size();
        let g = &self.geometry;
        let inner_height = self.inner_height();
        let [cx, cy] = self.handle_center();

        let ticks = self
            .scale
            .ticks(((self.width / 70.0).floor() as usize).clamp(2, 10))
            .into_iter()
            .filter(|v| v.fract() == 0.0)
            .map(|v| Tick::new(self.scale.scale(v), format!("{v:.0}")))
            .collect();
        let axis = Axis::new(Orient::Bottom, [0.0, self.width], ticks);

        let handle_stroke = if self.focused {
            Color::REBECCA_PURPLE
        } else {
            Color::GREY
        };
        let children = vec![
            Node::group(0.0, inner_height, axis.to_nodes()).with_class("range-axis"),
            Node::rect(0.0, inner_height - g.track_height, self.width, g.track_height)
                .fill(Color::LIGHT_GREY)
                .with_class("range-body"),
            Node::circle([cx, cy], g.radius)
                .fill(Color::WHITE)
                .stroke(handle_stroke, 2.0)
                .with_class("range-handle"),
            Node::text(
                [cx, cy],
                self.value.to_string(),
                TextStyle {
                    font_size: (g.radius * 0.5).max(10.0),
                    anchor: Anchor::Middle,
                    baseline: Baseline::Middle,
                    ..Default::default()
                },
            )
            .with_class("range-label"),
            Node::polygon(self.pointer_points())
                .fill(handle_stroke)
                .with_class("range-pointer"),
        ];
        let [ox, oy] = self.track_origin();
        let mut scene = Scene::new(width, height);
        scene.push(Node::group(ox, oy, children));
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;
    use std::{cell::RefCell, rc::Rc};

    fn recording_slider(
        extent: [i64; 2],
        start: Option<i64>,
        width: f64,
    ) -> (RangeSlider, Rc<RefCell<Vec<i64>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let slider = RangeSlider::new(extent, start, width, move |v| sink.borrow_mut().push(v));
        (slider, calls)
    }

    #[test]
    fn test_drag_outside_track_clamps_to_boundaries() {
        let (mut slider, _) = recording_slider([1800, 2014], None, 700.0);
        for x in [-1000.0, -0.5, -1e-9, f64::NEG_INFINITY] {
            assert_eq!(slider.drag_to(x), 1800, "x = {x}");
        }
        for x in [700.000001, 701.0, 5000.0, f64::INFINITY] {
            assert_eq!(slider.drag_to(x), 2014, "x = {x}");
        }
    }

    #[test]
    fn test_drag_rounds_to_nearest_value() {
        let (mut slider, calls) = recording_slider([2000, 2010], Some(2000), 100.0);
        // 10 px per year.
        assert_eq!(slider.drag_to(14.9), 2001);
        assert_eq!(slider.drag_to(15.1), 2002);
        assert_eq!(slider.drag_to(99.0), 2010);
        assert_eq!(*calls.borrow(), vec![2001, 2002, 2010]);
    }

    #[test]
    fn test_drag_beyond_width_reports_upper_extent() {
        let (mut slider, calls) = recording_slider([2000, 2010], Some(2000), 800.0);
        slider.drag_to(812.5);
        assert_eq!(*calls.borrow(), vec![2010]);
    }

    #[test]
    fn test_fifteen_right_arrows_stop_at_upper_bound() {
        let (mut slider, calls) = recording_slider([2000, 2010], Some(2000), 800.0);
        slider.focus();
        for _ in 0..15 {
            slider.key_press(SliderKey::Right);
        }
        assert_eq!(slider.value(), 2010);
        assert_eq!(calls.borrow().len(), 15);
        assert_eq!(calls.borrow().last(), Some(&2010));
    }

    #[test]
    fn test_key_sequences_stay_in_extent() {
        let (mut slider, _) = recording_slider([3, 7], Some(5), 40.0);
        slider.focus();
        // Deterministic pseudo random walk over left/right presses.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let key = if seed % 3 == 0 {
                SliderKey::Left
            } else {
                SliderKey::Right
            };
            let value = slider.key_press(key).unwrap();
            assert!((3..=7).contains(&value));
        }
        for _ in 0..20 {
            slider.key_press(SliderKey::Left);
        }
        assert_eq!(slider.value(), 3);
    }

    #[test]
    fn test_keys_ignored_without_focus() {
        let (mut slider, calls) = recording_slider([0, 10], Some(5), 100.0);
        assert_eq!(slider.key_press(SliderKey::Right), None);
        slider.focus();
        slider.blur();
        assert_eq!(slider.key_press(SliderKey::Left), None);
        assert_eq!(slider.value(), 5);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_set_value_moves_visuals_without_callback() {
        let (mut slider, calls) = recording_slider([1800, 2014], None, 642.0);
        let scale = LinearScale::new([1800.0, 2014.0], [0.0, 642.0]);
        for year in [1800, 1850, 1907, 2014] {
            slider.set_value(year);
            let scene = slider.to_scene();

            let handle = scene.find_class("range-handle")[0];
            let Shape::Circle { center, .. } = handle.shape else {
                panic!("handle must be a circle");
            };
            assert_eq!(center[0], scale.scale(year as f64));

            let label = scene.find_class("range-label")[0];
            assert_eq!(label.text_content(), Some(year.to_string().as_str()));

            let pointer = scene.find_class("range-pointer")[0];
            let Shape::Polygon { points } = &pointer.shape else {
                panic!("pointer must be a polygon");
            };
            assert_eq!(points[2][0], scale.scale(year as f64));
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_set_value_clamps() {
        let (mut slider, _) = recording_slider([2000, 2010], None, 100.0);
        slider.set_value(1990);
        assert_eq!(slider.value(), 2000);
        slider.set_value(2020);
        assert_eq!(slider.value(), 2010);
    }

    #[test]
    fn test_start_value_defaults_and_reversed_extent() {
        let (slider, _) = recording_slider([2010, 2000], None, 100.0);
        assert_eq!(slider.extent(), [2000, 2010]);
        assert_eq!(slider.value(), 2000);
    }

    #[test]
    fn test_pointer_geometry() {
        let (slider, _) = recording_slider([0, 10], Some(0), 100.0);
        // inner height = 2 * 50 + 5 + 10 = 115; track top at 110
        assert_eq!(slider.handle_center(), [0.0, 50.0]);
        assert_eq!(
            slider.pointer_points(),
            vec![[-12.5, 95.0], [12.5, 95.0], [0.0, 110.0]]
        );
        assert_eq!(slider.outer_size(), [200.0, 135.0]);
        assert!(slider.is_on_dragger([10.0, 40.0]));
        assert!(slider.is_on_dragger([0.0, 105.0]));
        assert!(!slider.is_on_dragger([60.0, 40.0]));
    }
}
