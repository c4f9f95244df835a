use std::time::Instant;

use chrono::{Duration, NaiveDate};
use viz_core::{
    charts::coins::{self, coin_scene},
    dataset::{format_date, CoinDataset, CoinStat},
    dispatch::{self, coin_table, InputEvent},
    scene::Scene,
    state::CoinState,
};

use super::ChartView;
use crate::app::{painter::show_scene, DynRequestSender};
use crate::BackendAppState;

/// Line chart of one coin statistic over a date range.
pub struct CoinView {
    pub view: ChartView<CoinState>,
    /// Pointer position in plot coordinates.
    hover_x: Option<f64>,
}

impl CoinView {
    pub fn new() -> Self {
        Self {
            view: ChartView::new(CoinState::default(), coin_table(), coins::TRANSITION),
            hover_x: None,
        }
    }

    pub fn load(&mut self, request_tx: &mut DynRequestSender) {
        self.view.load(
            "load coin dataset",
            |b: &mut app_core::backend::BackendEventLoop<BackendAppState>| b.state.load_coins(),
            request_tx,
        );
    }

    pub fn try_update(&mut self) -> bool {
        self.view.try_update()
    }

    /// Scene without hover decoration, for export.
    pub fn scene(&self) -> Option<Scene> {
        let dataset = self.view.loaded()?;
        Some(coin_scene(dataset, self.view.state(), None))
    }

    pub fn render(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        self.view.show_status(ui);
        let Some(dataset) = self.view.loaded() else {
            return;
        };
        let events = controls(dataset, self.view.state(), ui);
        for event in events.iter() {
            self.view.dispatch(event);
        }

        let Some(dataset) = self.view.loaded() else {
            return;
        };
        let target = coin_scene(dataset, self.view.state(), self.hover_x);
        let frame = self.view.frame(target, Instant::now());
        let (response, viewport) = show_scene(ui, &frame, egui::Sense::hover());

        let hover_x = response.hover_pos().and_then(|pos| {
            let [x, y] = coins::FRAME.to_plot(viewport.to_scene(pos));
            let inside = (0.0..=coins::FRAME.inner_width()).contains(&x)
                && (0.0..=coins::FRAME.inner_height()).contains(&y);
            inside.then_some(x)
        });
        if hover_x != self.hover_x {
            self.hover_x = hover_x;
            ctx.request_repaint();
        }
        if self.view.is_animating() {
            ctx.request_repaint();
        }
    }
}

/// Coin and statistic pickers plus the date range sliders. Returns the
/// input events of this frame.
fn controls(dataset: &CoinDataset, state: &CoinState, ui: &mut egui::Ui) -> Vec<InputEvent> {
    let mut events = Vec::new();
    ui.horizontal(|ui| {
        let mut coin = state.coin.clone();
        egui::ComboBox::from_id_salt(dispatch::COIN_SELECT)
            .selected_text(&coin)
            .show_ui(ui, |ui| {
                for name in dataset.coin_names() {
                    ui.selectable_value(&mut coin, name.to_string(), name);
                }
            });
        if coin != state.coin {
            events.push(InputEvent::Select {
                control: dispatch::COIN_SELECT,
                value: coin,
            });
        }

        let mut stat = state.stat;
        egui::ComboBox::from_id_salt(dispatch::STAT_SELECT)
            .selected_text(stat.axis_label())
            .show_ui(ui, |ui| {
                for option in CoinStat::ALL {
                    ui.selectable_value(&mut stat, option, option.axis_label());
                }
            });
        if stat != state.stat {
            events.push(InputEvent::Select {
                control: dispatch::STAT_SELECT,
                value: stat.id().to_string(),
            });
        }
    });

    let Some([min, max]) = dataset.date_extent() else {
        return events;
    };
    let span = (max - min).num_days();
    let [from, to] = state.date_range;
    let mut days = [(from - min).num_days(), (to - min).num_days()];
    let mut changed = false;
    ui.horizontal(|ui| {
        for (label, day) in ["From", "To"].into_iter().zip(days.iter_mut()) {
            ui.label(label);
            changed |= ui
                .add(egui::Slider::new(day, 0..=span).show_value(false))
                .changed();
            ui.label(format_date(offset_date(min, *day)));
        }
    });
    if changed {
        events.push(InputEvent::DateRange {
            control: dispatch::DATE_SLIDER,
            from: offset_date(min, days[0]),
            to: offset_date(min, days[1]),
        });
    }
    events
}

fn offset_date(start: NaiveDate, days: i64) -> NaiveDate {
    start + Duration::days(days)
}
