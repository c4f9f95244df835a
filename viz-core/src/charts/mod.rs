//! Scene builders for the three demo charts. Builders are pure: the same
//! dataset and state always produce the same scene.

pub mod coins;
pub mod gapminder;
pub mod revenue;

pub use coins::{CoinChart, CoinHover};
pub use gapminder::GapminderChart;
pub use revenue::RevenueChart;

use derive_new::new;

use crate::scene::{Anchor, Baseline, Node, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size and the margin around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Frame {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Converts a canvas position into plot coordinates.
    pub fn to_plot(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        [x - self.margin.left, y - self.margin.top]
    }
}

/// Centered axis title; vertical titles read bottom to top.
fn axis_title(pos: [f64; 2], text: &str, font_size: f64, vertical: bool) -> Node {
    Node::text(
        pos,
        text,
        TextStyle {
            font_size,
            anchor: Anchor::Middle,
            baseline: Baseline::Alphabetic,
            angle: if vertical { -90.0 } else { 0.0 },
            bold: false,
        },
    )
    .with_class("axis-title")
}

/// Placeholder shown instead of marks when nothing can be plotted.
fn empty_notice(frame: &Frame, text: &str) -> Node {
    Node::text(
        [frame.inner_width() / 2.0, frame.inner_height() / 2.0],
        text,
        TextStyle {
            font_size: 16.0,
            anchor: Anchor::Middle,
            baseline: Baseline::Middle,
            ..Default::default()
        },
    )
    .with_class("empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_inner_size() {
        let frame = Frame::new(800.0, 500.0, Margin::new(50.0, 100.0, 100.0, 80.0));
        assert_eq!(frame.inner_width(), 620.0);
        assert_eq!(frame.inner_height(), 350.0);
        assert_eq!(frame.to_plot([90.0, 60.0]), [10.0, 10.0]);
    }
}
