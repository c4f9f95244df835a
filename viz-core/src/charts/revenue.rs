use std::time::Duration;

use super::{axis_title, empty_notice, Frame, Margin};
use crate::axis::{Axis, Orient, Tick};
use crate::color::Color;
use crate::dataset::{RevenueDataset, RevenueMetric};
use crate::format;
use crate::scale::{BandScale, LinearScale};
use crate::scene::{Node, Scene};
use crate::state::RevenueState;

pub const FRAME: Frame = Frame {
    width: 800.0,
    height: 650.0,
    margin: Margin {
        top: 10.0,
        right: 10.0,
        bottom: 150.0,
        left: 100.0,
    },
};

pub const TRANSITION: Duration = Duration::from_millis(750);

#[derive(Debug, Clone)]
pub struct RevenueChart<'a> {
    dataset: &'a RevenueDataset,
    metric: RevenueMetric,
    x: BandScale,
    y: LinearScale,
}

impl<'a> RevenueChart<'a> {
    pub fn new(dataset: &'a RevenueDataset, state: &RevenueState) -> Option<Self> {
        let max = dataset.max(state.metric)?;
        let months = dataset.months().iter().map(|m| m.month.clone()).collect();
        Some(Self {
            dataset,
            metric: state.metric,
            x: BandScale::new(months, [0.0, FRAME.inner_width()])
                .with_padding_inner(0.3)
                .with_padding_outer(0.3),
            y: LinearScale::new([0.0, max], [FRAME.inner_height(), 0.0]),
        })
    }

    pub fn x(&self) -> &BandScale {
        &self.x
    }

    pub fn y(&self) -> &LinearScale {
        &self.y
    }

    pub fn scene(&self) -> Scene {
        let width = FRAME.inner_width();
        let height = FRAME.inner_height();
        let bandwidth = self.x.bandwidth();

        let x_ticks = self
            .dataset
            .months()
            .iter()
            .filter_map(|m| {
                let x = self.x.scale(&m.month)?;
                Some(Tick::new(x + bandwidth / 2.0, m.month.clone()))
            })
            .collect();
        let y_ticks = self
            .y
            .ticks(10)
            .into_iter()
            .map(|v| Tick::new(self.y.scale(v), format::usd(v)))
            .collect();

        let bars = self
            .dataset
            .months()
            .iter()
            .filter_map(|m| {
                let x = self.x.scale(&m.month)?;
                let y = self.y.scale(m.value(self.metric).max(0.0));
                Some(
                    Node::rect(x, y, bandwidth, (height - y).max(0.0))
                        .fill(Color::REBECCA_PURPLE)
                        .with_key(m.month.clone())
                        .with_class("bar"),
                )
            })
            .collect();

        let children = vec![
            Node::group(
                0.0,
                height,
                Axis::new(Orient::Bottom, [0.0, width], x_ticks).to_nodes(),
            )
            .with_class("x-axis"),
            Node::group(
                0.0,
                0.0,
                Axis::new(Orient::Left, [height, 0.0], y_ticks).to_nodes(),
            )
            .with_class("y-axis"),
            axis_title([width / 2.0, height + 70.0], "Month", 30.0, false),
            axis_title([-75.0, height / 2.0], self.metric.label(), 30.0, true),
            Node::group(0.0, 0.0, bars).with_class("bars"),
        ];

        let mut scene = Scene::new(FRAME.width, FRAME.height);
        scene.push(Node::group(FRAME.margin.left, FRAME.margin.top, children));
        scene
    }
}

pub fn revenue_scene(dataset: &RevenueDataset, state: &RevenueState) -> Scene {
    match RevenueChart::new(dataset, state) {
        Some(chart) => chart.scene(),
        None => {
            let mut scene = Scene::new(FRAME.width, FRAME.height);
            scene.push(Node::group(
                FRAME.margin.left,
                FRAME.margin.top,
                vec![empty_notice(&FRAME, "No months to show")],
            ));
            scene
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;

    fn dataset() -> RevenueDataset {
        RevenueDataset::from_json(
            r#"[
                {"month": "January", "revenue": "10000", "profit": "4000"},
                {"month": "February", "revenue": "20000", "profit": "8000"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_bars_keyed_by_month() {
        let data = dataset();
        let scene = revenue_scene(&data, &RevenueState::default());
        assert_eq!(scene.keys(), vec!["January", "February"]);

        let Shape::Rect { y, height, .. } = scene.find_key("February").unwrap().shape else {
            panic!("expected a bar");
        };
        // The largest value fills the plot height.
        assert_eq!(y, 0.0);
        assert_eq!(height, FRAME.inner_height());
        let Shape::Rect { height: half, .. } = scene.find_key("January").unwrap().shape else {
            panic!("expected a bar");
        };
        assert!((half - FRAME.inner_height() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_profit_rescales_and_relabels() {
        let data = dataset();
        let state = RevenueState {
            metric: RevenueMetric::Profit,
        };
        let chart = RevenueChart::new(&data, &state).unwrap();
        assert_eq!(chart.y().domain(), [0.0, 8000.0]);
        let scene = chart.scene();
        let titles: Vec<_> = scene
            .find_class("axis-title")
            .into_iter()
            .filter_map(|n| n.text_content())
            .collect();
        assert_eq!(titles, vec!["Month", "Profit"]);
        assert!(scene
            .find_class("tick-label")
            .iter()
            .any(|n| n.text_content() == Some("$8,000")));
    }

    #[test]
    fn test_band_padding() {
        let data = dataset();
        let chart = RevenueChart::new(&data, &RevenueState::default()).unwrap();
        // Two bands with 0.3 inner and outer padding: step = 690 / 2.3.
        let step = FRAME.inner_width() / 2.3;
        assert!((chart.x().step() - step).abs() < 1e-9);
        assert!((chart.x().bandwidth() - step * 0.7).abs() < 1e-9);
    }
}
