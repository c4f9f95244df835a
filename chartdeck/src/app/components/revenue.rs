use std::time::{Duration, Instant};

use viz_core::{
    charts::revenue::{self, revenue_scene},
    dataset::RevenueMetric,
    dispatch::{self, revenue_table, InputEvent},
    scene::Scene,
    state::RevenueState,
    timer::PlaybackTimer,
};

use super::ChartView;
use crate::app::{painter::show_scene, DynRequestSender};
use crate::BackendAppState;

/// Bar chart of monthly revenue, switching to profit and back on a timer.
pub struct RevenueView {
    pub view: ChartView<RevenueState>,
    timer: PlaybackTimer,
}

impl RevenueView {
    pub fn new(interval: Duration) -> Self {
        Self {
            view: ChartView::new(RevenueState::default(), revenue_table(), revenue::TRANSITION),
            timer: PlaybackTimer::new(interval),
        }
    }

    pub fn load(&mut self, request_tx: &mut DynRequestSender) {
        self.view.load(
            "load revenue dataset",
            |b: &mut app_core::backend::BackendEventLoop<BackendAppState>| b.state.load_revenue(),
            request_tx,
        );
    }

    pub fn try_update(&mut self) -> bool {
        if !self.view.try_update() {
            return false;
        }
        if self.view.loaded().is_some() {
            self.timer.start(Instant::now());
        } else {
            self.timer.stop();
        }
        true
    }

    pub fn set_interval(&mut self, interval: Duration) {
        if interval != self.timer.interval() {
            self.timer.set_interval(interval);
            if self.timer.is_active() {
                self.timer.start(Instant::now());
            }
        }
    }

    /// Runs a due timer tick. Returns the time until the next one.
    pub fn poll_timer(&mut self, now: Instant) -> Option<Duration> {
        if self.timer.poll(now) {
            self.view.dispatch(&InputEvent::Tick);
        }
        self.timer.remaining(now)
    }

    pub fn scene(&self) -> Option<Scene> {
        let dataset = self.view.loaded()?;
        Some(revenue_scene(dataset, self.view.state()))
    }

    pub fn render(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        self.view.show_status(ui);
        let Some(dataset) = self.view.loaded() else {
            return;
        };

        let mut selected = self.view.state().metric;
        ui.horizontal(|ui| {
            for metric in [RevenueMetric::Revenue, RevenueMetric::Profit] {
                ui.radio_value(&mut selected, metric, metric.label());
            }
        });

        let target = revenue_scene(dataset, self.view.state());
        let frame = self.view.frame(target, Instant::now());
        show_scene(ui, &frame, egui::Sense::hover());

        if selected != self.view.state().metric {
            let value = match selected {
                RevenueMetric::Revenue => "revenue",
                RevenueMetric::Profit => "profit",
            };
            self.view.dispatch(&InputEvent::Select {
                control: dispatch::METRIC_SELECT,
                value: value.to_string(),
            });
            // A manual pick gets a full interval before the next switch.
            self.timer.start(Instant::now());
            ctx.request_repaint();
        }
        if self.view.is_animating() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_core::dataset::RevenueDataset;

    fn loaded_view() -> RevenueView {
        let _ = env_logger::builder().is_test(true).try_init();
        let dataset = RevenueDataset::from_json(
            r#"[{"month": "January", "revenue": "13432", "profit": "8342"},
                {"month": "February", "revenue": "19342", "profit": "10342"}]"#,
        )
        .unwrap();
        let mut view = RevenueView::new(Duration::from_millis(1000));
        view.view.dataset.set_value(Ok(dataset));
        view
    }

    #[test]
    fn test_timer_toggles_metric_per_tick() {
        let mut view = loaded_view();
        let t0 = Instant::now();
        view.timer.start(t0);
        assert_eq!(
            view.poll_timer(t0 + Duration::from_millis(1000)),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(view.view.state().metric, RevenueMetric::Profit);
        // Two missed deadlines still toggle only once.
        assert_eq!(
            view.poll_timer(t0 + Duration::from_millis(3000)),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(view.view.state().metric, RevenueMetric::Revenue);
    }

    #[test]
    fn test_scene_needs_dataset() {
        let view = RevenueView::new(Duration::from_millis(1000));
        assert!(view.scene().is_none());
        assert!(loaded_view().scene().is_some());
    }
}
