use std::time::Duration;

use chrono::NaiveDate;

use super::{axis_title, empty_notice, Frame, Margin};
use crate::axis::{Axis, Orient, Tick};
use crate::color::Color;
use crate::dataset::{CoinDataset, CoinSample, CoinStat};
use crate::format;
use crate::scale::{extent, LinearScale, TimeScale};
use crate::scene::{Anchor, Baseline, Node, Scene, TextStyle};
use crate::state::CoinState;

pub const FRAME: Frame = Frame {
    width: 800.0,
    height: 500.0,
    margin: Margin {
        top: 50.0,
        right: 100.0,
        bottom: 100.0,
        left: 80.0,
    },
};

pub const TRANSITION: Duration = Duration::from_millis(500);

const X_TICKS: usize = 4;
const Y_TICKS: usize = 6;
const Y_PADDING: f64 = 1.005;

/// The sample under the pointer and where its marker goes.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinHover {
    pub sample: CoinSample,
    /// Marker position in plot coordinates.
    pub pos: [f64; 2],
    pub label: String,
}

/// Scales and visible samples of the coin line chart.
#[derive(Debug, Clone)]
pub struct CoinChart<'a> {
    samples: &'a [CoinSample],
    stat: CoinStat,
    x: TimeScale,
    y: LinearScale,
}

impl<'a> CoinChart<'a> {
    /// `None` if the coin is unknown or has no samples in the date range.
    pub fn new(dataset: &'a CoinDataset, state: &CoinState) -> Option<Self> {
        let series = dataset.series(&state.coin)?;
        let [start, end] = state.date_range;
        // Series are sorted by date, so the range is a contiguous slice.
        let lo = series.partition_point(|s| s.date < start);
        let hi = series.partition_point(|s| s.date <= end);
        let samples = series.get(lo..hi).filter(|s| !s.is_empty())?;

        let first = samples.first()?.date;
        let last = samples.last()?.date;
        let [min, max] = extent(samples.iter().map(|s| s.stat(state.stat)))?;
        Some(Self {
            samples,
            stat: state.stat,
            x: TimeScale::new([first, last], [0.0, FRAME.inner_width()]),
            y: LinearScale::new(
                [min / Y_PADDING, max * Y_PADDING],
                [FRAME.inner_height(), 0.0],
            ),
        })
    }

    pub fn samples(&self) -> &[CoinSample] {
        self.samples
    }

    pub fn x(&self) -> &TimeScale {
        &self.x
    }

    pub fn y(&self) -> &LinearScale {
        &self.y
    }

    /// Sample closest to `date`, found by bisection.
    pub fn nearest(&self, date: NaiveDate) -> Option<&'a CoinSample> {
        let samples = self.samples;
        if samples.len() < 2 {
            return samples.first();
        }
        let i = samples
            .partition_point(|s| s.date < date)
            .clamp(1, samples.len() - 1);
        let (d0, d1) = (&samples[i - 1], &samples[i]);
        if date - d0.date > d1.date - date {
            Some(d1)
        } else {
            Some(d0)
        }
    }

    /// Hover marker for a pointer at `plot_x`; positions outside the plot
    /// area give nothing.
    pub fn hover(&self, plot_x: f64) -> Option<CoinHover> {
        if !(0.0..=FRAME.inner_width()).contains(&plot_x) {
            return None;
        }
        let sample = *self.nearest(self.x.invert(plot_x))?;
        let value = sample.stat(self.stat);
        Some(CoinHover {
            sample,
            pos: [self.x.scale(sample.date), self.y.scale(value)],
            label: format::plain(value),
        })
    }

    pub fn scene(&self, hover: Option<&CoinHover>) -> Scene {
        let width = FRAME.inner_width();
        let height = FRAME.inner_height();

        let x_ticks = self
            .x
            .tick_labels(X_TICKS)
            .into_iter()
            .map(|(date, label)| Tick::new(self.x.scale(date), label))
            .collect();
        let y_ticks = self
            .y
            .ticks(Y_TICKS)
            .into_iter()
            .map(|v| Tick::new(self.y.scale(v), format::abbreviation(v)))
            .collect();

        let points = self
            .samples
            .iter()
            .map(|s| [self.x.scale(s.date), self.y.scale(s.stat(self.stat))])
            .collect();

        let mut children = vec![
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
            axis_title([-60.0, height / 2.0], self.stat.axis_label(), 20.0, true),
            axis_title([width / 2.0, height + 50.0], "Time", 20.0, false),
            Node::polyline(points)
                .stroke(Color::GREY, 2.0)
                .with_key("line")
                .with_class("line"),
        ];
        if let Some(hover) = hover {
            children.push(focus(hover));
        }

        let mut scene = Scene::new(FRAME.width, FRAME.height);
        scene.push(Node::group(FRAME.margin.left, FRAME.margin.top, children));
        scene
    }
}

fn focus(hover: &CoinHover) -> Node {
    let [x, y] = hover.pos;
    let height = FRAME.inner_height();
    Node::group(
        x,
        y,
        vec![
            Node::line([0.0, 0.0], [0.0, height - y])
                .stroke(Color::LIGHT_GREY, 1.0)
                .with_class("hover-line"),
            Node::line([0.0, 0.0], [-x, 0.0])
                .stroke(Color::LIGHT_GREY, 1.0)
                .with_class("hover-line"),
            Node::circle([0.0, 0.0], 7.5)
                .fill(Color::WHITE)
                .stroke(Color::GREY, 1.5),
            Node::text(
                [0.0, -20.0],
                hover.label.clone(),
                TextStyle {
                    font_size: 12.0,
                    anchor: Anchor::Middle,
                    baseline: Baseline::Middle,
                    ..Default::default()
                },
            )
            .with_class("hover-value"),
        ],
    )
    .with_class("focus")
}

/// Scene of the coin view; a notice replaces the chart when nothing can be
/// plotted. `hover_x` is the pointer position in plot coordinates.
pub fn coin_scene(dataset: &CoinDataset, state: &CoinState, hover_x: Option<f64>) -> Scene {
    match CoinChart::new(dataset, state) {
        Some(chart) => {
            let hover = hover_x.and_then(|x| chart.hover(x));
            chart.scene(hover.as_ref())
        }
        None => {
            let mut scene = Scene::new(FRAME.width, FRAME.height);
            scene.push(Node::group(
                FRAME.margin.left,
                FRAME.margin.top,
                vec![empty_notice(&FRAME, "No data for the selected coin and dates")],
            ));
            scene
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;

    fn dataset() -> CoinDataset {
        CoinDataset::from_json(
            r#"{"bitcoin": [
                {"24h_vol": "100", "date": "1/1/2017", "market_cap": "1000", "price_usd": "10"},
                {"24h_vol": "200", "date": "5/1/2017", "market_cap": "2000", "price_usd": "20"},
                {"24h_vol": "300", "date": "11/1/2017", "market_cap": "3000", "price_usd": "30"},
                {"24h_vol": "400", "date": "1/2/2017", "market_cap": "4000", "price_usd": "40"}
            ]}"#,
        )
        .unwrap()
    }

    fn date(d: u32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, m, d).unwrap()
    }

    fn state(from: NaiveDate, to: NaiveDate) -> CoinState {
        CoinState {
            coin: "bitcoin".into(),
            stat: CoinStat::PriceUsd,
            date_range: [from, to],
        }
    }

    #[test]
    fn test_range_filters_samples_and_pads_y_domain() {
        let data = dataset();
        let chart = CoinChart::new(&data, &state(date(2, 1), date(20, 1))).unwrap();
        assert_eq!(chart.samples().len(), 2);
        let [lo, hi] = chart.y().domain();
        assert!((lo - 20.0 / 1.005).abs() < 1e-9);
        assert!((hi - 30.0 * 1.005).abs() < 1e-9);
        assert_eq!(chart.x().domain(), [date(5, 1), date(11, 1)]);
    }

    #[test]
    fn test_empty_range_shows_notice() {
        let data = dataset();
        assert!(CoinChart::new(&data, &state(date(2, 1), date(3, 1))).is_none());
        let scene = coin_scene(&data, &state(date(2, 1), date(3, 1)), None);
        assert_eq!(scene.find_class("empty").len(), 1);
    }

    #[test]
    fn test_nearest_sample_by_bisection() {
        let data = dataset();
        let chart = CoinChart::new(&data, &state(date(1, 1), date(1, 2))).unwrap();
        assert_eq!(chart.nearest(date(2, 1)).unwrap().date, date(1, 1));
        assert_eq!(chart.nearest(date(4, 1)).unwrap().date, date(5, 1));
        assert_eq!(chart.nearest(date(30, 1)).unwrap().date, date(1, 2));
        assert_eq!(chart.nearest(date(1, 6)).unwrap().date, date(1, 2));
    }

    #[test]
    fn test_hover_marks_sample() {
        let data = dataset();
        let chart = CoinChart::new(&data, &state(date(1, 1), date(1, 2))).unwrap();
        let hover = chart.hover(FRAME.inner_width()).unwrap();
        assert_eq!(hover.label, "40");
        assert_eq!(hover.pos[0], FRAME.inner_width());
        assert!(chart.hover(-5.0).is_none());

        let scene = chart.scene(Some(&hover));
        assert_eq!(scene.find_class("hover-line").len(), 2);
        let value: Vec<_> = scene
            .find_class("hover-value")
            .into_iter()
            .filter_map(|n| n.text_content())
            .collect();
        assert_eq!(value, vec!["40"]);
    }

    #[test]
    fn test_scene_has_line_and_labels() {
        let data = dataset();
        let scene = coin_scene(&data, &state(date(1, 1), date(1, 2)), None);
        let Some(Shape::Polyline { points }) = scene.find_key("line").map(|n| &n.shape) else {
            panic!("expected the price line");
        };
        assert_eq!(points.len(), 4);
        let titles: Vec<_> = scene
            .find_class("axis-title")
            .into_iter()
            .filter_map(|n| n.text_content())
            .collect();
        assert_eq!(titles, vec!["Price (USD)", "Time"]);
        assert!(scene.find_class("focus").is_empty());
    }
}
