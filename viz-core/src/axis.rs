//! Axis rendering: a domain line plus tick marks and labels, laid out like
//! the classic bottom/left chart axes.

use crate::color::Color;
use crate::scene::{Anchor, Baseline, Node, TextStyle};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const FONT_SIZE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

/// One tick: pixel position along the axis and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub pos: f64,
    pub label: String,
}

impl Tick {
    pub fn new(pos: f64, label: impl Into<String>) -> Self {
        Self {
            pos,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    orient: Orient,
    range: [f64; 2],
    ticks: Vec<Tick>,
}

impl Axis {
    pub fn new(orient: Orient, range: [f64; 2], ticks: Vec<Tick>) -> Self {
        Self {
            orient,
            range,
            ticks,
        }
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Nodes of the axis, placed with the axis line at the origin. Wrap them
    /// in a translated group to position the axis.
    pub fn to_nodes(&self) -> Vec<Node> {
        let [r0, r1] = self.range;
        let mut nodes = Vec::with_capacity(1 + 2 * self.ticks.len());
        let domain = match self.orient {
            Orient::Bottom => Node::line([r0, 0.0], [r1, 0.0]),
            Orient::Left => Node::line([0.0, r0], [0.0, r1]),
        };
        nodes.push(domain.with_class("domain"));

        for tick in self.ticks.iter() {
            let (mark, label) = match self.orient {
                Orient::Bottom => (
                    Node::line([tick.pos, 0.0], [tick.pos, TICK_SIZE]),
                    Node::text(
                        [tick.pos, TICK_SIZE + TICK_PADDING],
                        tick.label.clone(),
                        TextStyle {
                            font_size: FONT_SIZE,
                            anchor: Anchor::Middle,
                            baseline: Baseline::Hanging,
                            ..Default::default()
                        },
                    ),
                ),
                Orient::Left => (
                    Node::line([-TICK_SIZE, tick.pos], [0.0, tick.pos]),
                    Node::text(
                        [-(TICK_SIZE + TICK_PADDING), tick.pos],
                        tick.label.clone(),
                        TextStyle {
                            font_size: FONT_SIZE,
                            anchor: Anchor::End,
                            baseline: Baseline::Middle,
                            ..Default::default()
                        },
                    ),
                ),
            };
            nodes.push(mark.stroke(Color::BLACK, 1.0).with_class("tick"));
            nodes.push(label.with_class("tick-label"));
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Scene, Shape};

    #[test]
    fn test_bottom_axis_layout() {
        let axis = Axis::new(
            Orient::Bottom,
            [0.0, 100.0],
            vec![Tick::new(0.0, "0"), Tick::new(50.0, "50")],
        );
        let mut scene = Scene::new(100.0, 20.0);
        scene.nodes = axis.to_nodes();

        let labels: Vec<_> = scene
            .find_class("tick-label")
            .into_iter()
            .filter_map(|n| n.text_content())
            .collect();
        assert_eq!(labels, vec!["0", "50"]);

        let marks = scene.find_class("tick");
        assert_eq!(
            marks[1].shape,
            Shape::Line {
                from: [50.0, 0.0],
                to: [50.0, 6.0]
            }
        );
    }

    #[test]
    fn test_left_axis_labels_are_right_aligned() {
        let axis = Axis::new(Orient::Left, [400.0, 0.0], vec![Tick::new(200.0, "45")]);
        let nodes = axis.to_nodes();
        let Shape::Text { pos, style, .. } = &nodes[2].shape else {
            panic!("expected a tick label");
        };
        assert_eq!(*pos, [-9.0, 200.0]);
        assert_eq!(style.anchor, Anchor::End);
    }
}
