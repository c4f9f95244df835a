use std::time::{Duration, Instant};

use viz_core::{
    charts::gapminder::{self, gapminder_scene, GapminderChart},
    dispatch::{self, gapminder_table, InputEvent},
    scene::Scene,
    state::GapminderState,
    timer::PlaybackTimer,
};

use super::{year_slider::YearSlider, ChartView};
use crate::app::{painter::show_scene, DynRequestSender};
use crate::BackendAppState;

/// Screen height reserved for the year slider.
const SLIDER_HEIGHT: f32 = 90.0;

/// Bubble chart of income against life expectancy, animated over the years.
pub struct GapminderView {
    pub view: ChartView<GapminderState>,
    slider: Option<YearSlider>,
    slider_radius: f64,
    timer: PlaybackTimer,
    /// Country under the pointer.
    hovered: Option<String>,
}

impl GapminderView {
    pub fn new(interval: Duration, slider_radius: f64) -> Self {
        Self {
            view: ChartView::new(
                GapminderState::default(),
                gapminder_table(),
                gapminder::TRANSITION,
            ),
            slider: None,
            slider_radius,
            timer: PlaybackTimer::new(interval),
            hovered: None,
        }
    }

    pub fn load(&mut self, request_tx: &mut DynRequestSender) {
        self.view.load(
            "load gapminder dataset",
            |b: &mut app_core::backend::BackendEventLoop<BackendAppState>| {
                b.state.load_gapminder()
            },
            request_tx,
        );
    }

    pub fn try_update(&mut self) -> bool {
        if !self.view.try_update() {
            return false;
        }
        self.slider = None;
        self.sync_timer(Instant::now());
        true
    }

    pub fn set_state(&mut self, state: GapminderState) {
        self.view.set_state(state);
        self.sync_timer(Instant::now());
        self.sync_slider();
    }

    pub fn set_interval(&mut self, interval: Duration) {
        if interval != self.timer.interval() {
            self.timer.set_interval(interval);
            self.sync_timer(Instant::now());
        }
    }

    pub fn set_slider_radius(&mut self, radius: f64) {
        if radius != self.slider_radius {
            self.slider_radius = radius;
            self.slider = None;
        }
    }

    pub fn toggle_playback(&mut self) {
        self.handle(&InputEvent::Click {
            control: dispatch::PLAY_PAUSE,
        });
    }

    /// Runs a due timer tick. Returns the time until the next one.
    pub fn poll_timer(&mut self, now: Instant) -> Option<Duration> {
        if self.timer.poll(now) {
            self.view.dispatch(&InputEvent::Tick);
        }
        self.sync_slider();
        self.timer.remaining(now)
    }

    pub fn scene(&self) -> Option<Scene> {
        let dataset = self.view.loaded()?;
        Some(gapminder_scene(dataset, self.view.state(), None))
    }

    fn handle(&mut self, event: &InputEvent) {
        if self.view.dispatch(event) {
            self.sync_timer(Instant::now());
        }
        // A year without data leaves the state alone, so the slider has to
        // snap back even then.
        self.sync_slider();
    }

    /// Keeps the timer running exactly while the state says it is playing.
    fn sync_timer(&mut self, now: Instant) {
        match (self.view.state().is_playing, self.timer.is_active()) {
            (true, false) => self.timer.start(now),
            (false, true) => self.timer.stop(),
            _ => (),
        }
    }

    fn sync_slider(&mut self) {
        let Some(dataset) = self.view.loaded() else {
            return;
        };
        let year = self.view.state().year(dataset);
        if let Some(slider) = &mut self.slider {
            if let Some(year) = year {
                slider.set_value(year);
            }
            return;
        }
        let radius = self.slider_radius;
        self.slider = dataset.year_extent().map(|extent| {
            YearSlider::new(extent, year, gapminder::FRAME.inner_width(), radius)
        });
    }

    pub fn render(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        self.view.show_status(ui);
        let Some(dataset) = self.view.loaded() else {
            return;
        };

        let mut events = Vec::new();
        let state = self.view.state();
        ui.horizontal(|ui| {
            let label = if state.is_playing { "Pause" } else { "Play" };
            if ui.button(label).clicked() {
                events.push(InputEvent::Click {
                    control: dispatch::PLAY_PAUSE,
                });
            }

            let mut continent = state.continent.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt(dispatch::CONTINENT_FILTER)
                .selected_text(if continent.is_empty() {
                    "All continents".to_string()
                } else {
                    capitalize(&continent)
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut continent, String::new(), "All continents");
                    for name in dataset.continents() {
                        let label = capitalize(&name);
                        ui.selectable_value(&mut continent, name, label);
                    }
                });
            if continent != state.continent.as_deref().unwrap_or_default() {
                events.push(InputEvent::Select {
                    control: dispatch::CONTINENT_FILTER,
                    value: continent,
                });
            }
        });

        let target = gapminder_scene(dataset, state, self.hovered.as_deref());
        let frame = self.view.frame(target, Instant::now());

        self.sync_slider();
        if let Some(slider) = &mut self.slider {
            ui.allocate_ui(egui::Vec2::new(ui.available_width(), SLIDER_HEIGHT), |ui| {
                for year in slider.show(ui) {
                    events.push(InputEvent::SliderChanged {
                        control: dispatch::YEAR_SLIDER,
                        value: year,
                    });
                }
            });
        }
        let (response, viewport) = show_scene(ui, &frame, egui::Sense::hover());

        let hovered = self.view.loaded().and_then(|dataset| {
            let point = gapminder::FRAME.to_plot(viewport.to_scene(response.hover_pos()?));
            let chart = GapminderChart::new(dataset)?;
            chart
                .bubble_at(self.view.state(), point)
                .map(|country| country.country.clone())
        });
        if hovered != self.hovered {
            self.hovered = hovered;
            ctx.request_repaint();
        }

        for event in events.iter() {
            self.handle(event);
        }
        if self.view.is_animating() || !events.is_empty() {
            ctx.request_repaint();
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
