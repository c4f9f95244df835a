use std::sync::mpsc::{channel, Receiver};

use egui::Key;
use viz_core::slider::{RangeSlider, SliderGeometry, SliderKey};

use crate::app::painter::show_scene;

/// Egui host of a [`RangeSlider`]: feeds it pointer drags, focus and arrow
/// keys and collects what it reports through `on_change`.
pub struct YearSlider {
    slider: RangeSlider,
    changes: Receiver<i64>,
    dragging: bool,
}

impl YearSlider {
    pub fn new(extent: [i64; 2], start: Option<i64>, width: f64, radius: f64) -> Self {
        let (tx, changes) = channel();
        let slider = RangeSlider::new(extent, start, width, move |year| {
            if tx.send(year).is_err() {
                log::warn!("year slider change {year} dropped, receiver gone");
            }
        })
        .with_geometry(SliderGeometry {
            radius,
            ..Default::default()
        });
        Self {
            slider,
            changes,
            dragging: false,
        }
    }

    pub fn value(&self) -> i64 {
        self.slider.value()
    }

    pub fn radius(&self) -> f64 {
        self.slider.geometry().radius
    }

    pub fn set_value(&mut self, value: i64) {
        self.slider.set_value(value);
    }

    /// Draws the slider and handles input. Returns the values reported by the
    /// slider in this frame, oldest first.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Vec<i64> {
        let scene = self.slider.to_scene();
        let (response, viewport) = show_scene(ui, &scene, egui::Sense::click_and_drag());
        let [ox, oy] = self.slider.track_origin();
        let to_track = |pos: egui::Pos2| {
            let [x, y] = viewport.to_scene(pos);
            [x - ox, y - oy]
        };

        if response.drag_started() || response.clicked() {
            let grabbed = response
                .interact_pointer_pos()
                .is_some_and(|pos| self.slider.is_on_dragger(to_track(pos)));
            if grabbed {
                self.slider.focus();
                self.dragging = response.drag_started();
            } else {
                self.slider.blur();
            }
        }
        if self.dragging && response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.slider.drag_to(to_track(pos)[0]);
            }
        }
        if response.drag_stopped() {
            self.dragging = false;
        }
        // Pressing anywhere else takes the focus away.
        if !response.hovered() && ui.input(|i| i.pointer.any_pressed()) {
            self.slider.blur();
        }

        if self.slider.is_focused() {
            let keys = ui.input(|i| {
                [
                    (i.key_pressed(Key::ArrowLeft), SliderKey::Left),
                    (i.key_pressed(Key::ArrowRight), SliderKey::Right),
                ]
            });
            for (pressed, key) in keys {
                if pressed {
                    self.slider.key_press(key);
                }
            }
        }
        self.changes.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_is_not_reported() {
        let mut slider = YearSlider::new([1800, 2014], Some(1900), 700.0, 20.0);
        slider.set_value(1950);
        assert_eq!(slider.value(), 1950);
        assert_eq!(slider.changes.try_iter().count(), 0);
    }

    #[test]
    fn test_drag_and_keys_are_reported() {
        let mut slider = YearSlider::new([2000, 2010], Some(2005), 100.0, 20.0);
        slider.slider.drag_to(100.0);
        slider.slider.focus();
        slider.slider.key_press(SliderKey::Left);
        let reported: Vec<_> = slider.changes.try_iter().collect();
        assert_eq!(reported, vec![2010, 2009]);
        assert_eq!(slider.radius(), 20.0);
    }
}
