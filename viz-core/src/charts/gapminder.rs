use std::time::Duration;

use super::{axis_title, empty_notice, Frame, Margin};
use crate::axis::{Axis, Orient, Tick};
use crate::color::{Color, CATEGORY10};
use crate::dataset::{Country, GapminderDataset};
use crate::format;
use crate::scale::{LinearScale, LogScale, OrdinalScale};
use crate::scene::{Anchor, Baseline, Node, Scene, TextStyle};
use crate::state::GapminderState;

pub const FRAME: Frame = Frame {
    width: 1200.0,
    height: 800.0,
    margin: Margin {
        top: 10.0,
        right: 10.0,
        bottom: 250.0,
        left: 100.0,
    },
};

pub const TRANSITION: Duration = Duration::from_millis(100);

const INCOME_TICKS: [f64; 9] = [
    300.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0, 20000.0, 50000.0, 100000.0,
];
const MIN_LIFE_EXP_DOMAIN: f64 = 90.0;
const RADIUS_RANGE: [f64; 2] = [5.0, 80.0];
const BUBBLE_OPACITY: f64 = 0.5;

const TOOLTIP_WIDTH: f64 = 260.0;
const TOOLTIP_LINE: f64 = 18.0;

/// Scales of the bubble chart. They span all years so bubbles stay
/// comparable during playback.
#[derive(Debug, Clone)]
pub struct GapminderChart<'a> {
    dataset: &'a GapminderDataset,
    x: LogScale,
    y: LinearScale,
    radius: LinearScale,
    color: OrdinalScale,
}

impl<'a> GapminderChart<'a> {
    /// `None` for a dataset without a single valid country.
    pub fn new(dataset: &'a GapminderDataset) -> Option<Self> {
        let income = dataset.income_extent()?;
        let life_exp = dataset.life_exp_max()?;
        let population = dataset.population_extent()?;
        Some(Self {
            dataset,
            x: LogScale::new(income, [0.0, FRAME.inner_width()]),
            y: LinearScale::new(
                [0.0, life_exp.max(MIN_LIFE_EXP_DOMAIN)],
                [FRAME.inner_height(), 0.0],
            ),
            radius: LinearScale::new(population, RADIUS_RANGE),
            color: OrdinalScale::new(dataset.continents(), &CATEGORY10),
        })
    }

    pub fn x(&self) -> &LogScale {
        &self.x
    }

    pub fn y(&self) -> &LinearScale {
        &self.y
    }

    pub fn color(&self, continent: &str) -> Color {
        self.color.scale(continent)
    }

    /// Countries of the current year that pass the continent filter, most
    /// populous first.
    pub fn visible(&self, state: &GapminderState) -> Vec<&'a Country> {
        let Some(snapshot) = state.snapshot(self.dataset) else {
            return Vec::new();
        };
        snapshot
            .countries
            .iter()
            .filter(|c| match &state.continent {
                Some(continent) => &c.continent == continent,
                None => true,
            })
            .collect()
    }

    fn bubble(&self, country: &Country) -> ([f64; 2], f64) {
        (
            [self.x.scale(country.income), self.y.scale(country.life_exp)],
            self.radius.scale(country.population),
        )
    }

    /// Topmost bubble under `point` (plot coordinates).
    pub fn bubble_at(&self, state: &GapminderState, point: [f64; 2]) -> Option<&'a Country> {
        // Smaller bubbles are drawn later and sit on top.
        self.visible(state).into_iter().rev().find(|country| {
            let ([cx, cy], r) = self.bubble(country);
            (point[0] - cx).hypot(point[1] - cy) <= r
        })
    }

    pub fn scene(&self, state: &GapminderState, hovered: Option<&str>) -> Scene {
        let width = FRAME.inner_width();
        let height = FRAME.inner_height();
        let [lo, hi] = self.x.domain();

        let x_ticks = INCOME_TICKS
            .iter()
            .filter(|v| (lo..=hi).contains(*v))
            .map(|v| Tick::new(self.x.scale(*v), format::dollars(*v)))
            .collect();
        let y_ticks = self
            .y
            .ticks(10)
            .into_iter()
            .map(|v| Tick::new(self.y.scale(v), format::truncated_integer(v)))
            .collect();

        let visible = self.visible(state);
        let bubbles = visible
            .iter()
            .map(|country| {
                let (center, radius) = self.bubble(country);
                Node::circle(center, radius)
                    .fill(self.color(&country.continent))
                    .opacity(BUBBLE_OPACITY)
                    .with_key(country.country.clone())
                    .with_class("bubble")
            })
            .collect();

        let year = state
            .year(self.dataset)
            .map(|y| y.to_string())
            .unwrap_or_default();

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
            axis_title([-50.0, height / 2.0], "Life Expectancy", 30.0, true),
            axis_title(
                [width / 2.0, height + 70.0],
                "GDP Per Capita (USD)",
                30.0,
                false,
            ),
            Node::text(
                [width, height - 20.0],
                year.clone(),
                TextStyle {
                    font_size: 30.0,
                    anchor: Anchor::End,
                    bold: true,
                    ..Default::default()
                },
            )
            .with_class("year-label"),
            self.legend(width - 15.0, height - 160.0),
            Node::group(0.0, 0.0, bubbles).with_class("bubbles"),
        ];

        let hovered = hovered.and_then(|name| visible.iter().find(|c| c.country == name));
        if let Some(country) = hovered {
            children.push(self.tooltip(country, &year));
        }

        let mut scene = Scene::new(FRAME.width, FRAME.height);
        scene.push(Node::group(FRAME.margin.left, FRAME.margin.top, children));
        scene
    }

    fn legend(&self, x: f64, y: f64) -> Node {
        let rows = self
            .color
            .domain()
            .iter()
            .enumerate()
            .map(|(i, continent)| {
                Node::group(
                    0.0,
                    i as f64 * 25.0,
                    vec![
                        Node::rect(0.0, 0.0, 15.0, 15.0).fill(self.color(continent)),
                        Node::text(
                            [-10.0, 13.0],
                            capitalize(continent),
                            TextStyle {
                                font_size: 12.0,
                                anchor: Anchor::End,
                                ..Default::default()
                            },
                        )
                        .with_class("legend-label"),
                    ],
                )
            })
            .collect();
        Node::group(x, y, rows).with_class("legend")
    }

    fn tooltip(&self, country: &Country, year: &str) -> Node {
        let ([cx, cy], r) = self.bubble(country);
        let lines = tooltip_lines(country, year);
        let height = TOOLTIP_LINE * lines.len() as f64 + 12.0;
        let x = if cx + r + 10.0 + TOOLTIP_WIDTH > FRAME.inner_width() {
            cx - r - 10.0 - TOOLTIP_WIDTH
        } else {
            cx + r + 10.0
        };
        let y = (cy - height / 2.0).clamp(0.0, (FRAME.inner_height() - height).max(0.0));

        let mut children = vec![Node::rect(0.0, 0.0, TOOLTIP_WIDTH, height)
            .fill(Color::BLACK)
            .opacity(0.8)];
        for (i, (label, value)) in lines.into_iter().enumerate() {
            let baseline_y = 6.0 + TOOLTIP_LINE * (i as f64 + 0.5);
            let style = TextStyle {
                font_size: 12.0,
                baseline: Baseline::Middle,
                ..Default::default()
            };
            children.push(
                Node::text(
                    [10.0, baseline_y],
                    format!("{label}:"),
                    TextStyle {
                        bold: true,
                        ..style.clone()
                    },
                )
                .fill(Color::SKY_BLUE),
            );
            children.push(
                Node::text([120.0, baseline_y], value, style)
                    .fill(Color::WHITE)
                    .with_class("tooltip-value"),
            );
        }
        Node::group(x, y, children).with_class("tooltip")
    }
}

/// Label/value rows shown when hovering a country.
pub fn tooltip_lines(country: &Country, year: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Country", country.country.clone()),
        ("Continent", country.continent.clone()),
        ("Income", format::dollars_grouped(country.income)),
        (
            "Life Expectancy",
            format!("{} years", format::plain(country.life_exp)),
        ),
        ("Population", format::grouped_integer(country.population)),
        ("Year", year.to_string()),
    ]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn gapminder_scene(
    dataset: &GapminderDataset,
    state: &GapminderState,
    hovered: Option<&str>,
) -> Scene {
    match GapminderChart::new(dataset) {
        Some(chart) => chart.scene(state, hovered),
        None => {
            let mut scene = Scene::new(FRAME.width, FRAME.height);
            scene.push(Node::group(
                FRAME.margin.left,
                FRAME.margin.top,
                vec![empty_notice(&FRAME, "No countries to show")],
            ));
            scene
        }
    }
}
