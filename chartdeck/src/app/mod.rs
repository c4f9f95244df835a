mod components;
pub mod config;
mod events;
mod painter;
pub mod storage;

use std::{
    path::Path,
    sync::mpsc::Sender,
    thread::JoinHandle,
    time::{Duration, Instant},
};

use app_core::{
    backend::{BackendEventLoop, BackendLink, BackendRequest},
    frontend::UIParameter,
    string_error::ErrorStringExt,
};
use serde::{Deserialize, Serialize};
use viz_core::{scene::Scene, state::ViewStates, svg_renderer::to_svg};

use self::components::{CoinView, GapminderView, RevenueView};
use crate::{BackendAppState, Sources};
use config::{Config, ConfigAction};
use events::{EventQueue, SaveLoadRequested, SavePlotRequested};
use storage::{load_json, save_json};

pub type DynRequestSender = Sender<Box<dyn BackendRequest<BackendAppState>>>;

pub struct EguiApp {
    config: Config,
    backend_thread_handle: Option<JoinHandle<()>>,
    request_tx: DynRequestSender,
    /// Sources the backend is known to use.
    sources: UIParameter<Sources>,
    coins: CoinView,
    gapminder: GapminderView,
    revenue: RevenueView,
    shortcuts_modal_open: bool,
    ui_selection: UISelection,
    event_queue: EventQueue<Self>,
    request_redraw: Option<()>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum UISelection {
    Coins,
    Gapminder,
    Revenue,
    Preferences,
}

impl UISelection {
    fn next(&self) -> Self {
        match self {
            UISelection::Coins => Self::Gapminder,
            UISelection::Gapminder => Self::Revenue,
            UISelection::Revenue => Self::Coins,
            UISelection::Preferences => Self::Coins,
        }
    }
}

impl EguiApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        request_tx: Sender<Box<dyn BackendRequest<BackendAppState>>>,
        backend_thread_handle: JoinHandle<()>,
    ) -> Self {
        let mut app = Self {
            sources: UIParameter::new(config.sources()),
            coins: CoinView::new(),
            gapminder: GapminderView::new(
                Duration::from_millis(config.playback_interval_ms),
                config.slider_radius,
            ),
            revenue: RevenueView::new(Duration::from_millis(config.revenue_interval_ms)),
            config,
            backend_thread_handle: Some(backend_thread_handle),
            request_tx,
            shortcuts_modal_open: false,
            ui_selection: UISelection::Coins,
            event_queue: EventQueue::<Self>::new(),
            request_redraw: None,
        };
        app.apply_config();
        app.reload_datasets();
        app
    }

    /// Requests all datasets again from their current sources.
    pub fn reload_datasets(&mut self) {
        self.coins.load(&mut self.request_tx);
        self.gapminder.load(&mut self.request_tx);
        self.revenue.load(&mut self.request_tx);
    }

    /// Hands the configured sources to the backend and reloads. Requests run
    /// in order, so the loads already see the new sources.
    fn apply_sources(&mut self) {
        let sources = self.config.sources();
        BackendLink::request_parameter_update(
            &mut self.sources,
            "set dataset sources",
            move |b: &mut BackendEventLoop<BackendAppState>| {
                b.state.set_sources(sources.clone());
                b.state.sources().clone()
            },
            &mut self.request_tx,
        );
        self.reload_datasets();
    }

    /// Pushes the non-source settings down to the views.
    fn apply_config(&mut self) {
        let animate = self.config.animate;
        self.coins.view.set_animate(animate);
        self.gapminder.view.set_animate(animate);
        self.revenue.view.set_animate(animate);
        self.gapminder
            .set_interval(Duration::from_millis(self.config.playback_interval_ms));
        self.gapminder.set_slider_radius(self.config.slider_radius);
        self.revenue
            .set_interval(Duration::from_millis(self.config.revenue_interval_ms));
    }

    fn view_states(&self) -> ViewStates {
        ViewStates {
            coins: self.coins.view.state().clone(),
            gapminder: self.gapminder.view.state().clone(),
            revenue: self.revenue.view.state().clone(),
        }
    }

    fn set_view_states(&mut self, states: ViewStates) {
        self.coins.view.set_state(states.coins);
        self.gapminder.set_state(states.gapminder);
        self.revenue.view.set_state(states.revenue);
    }

    /// Scene of the chart on screen, or of the coin chart from the
    /// preferences view.
    fn current_scene(&self) -> Option<Scene> {
        match self.ui_selection {
            UISelection::Coins | UISelection::Preferences => self.coins.scene(),
            UISelection::Gapminder => self.gapminder.scene(),
            UISelection::Revenue => self.revenue.scene(),
        }
    }

    fn export_svg(&self, path: &Path) -> Result<(), String> {
        let scene = self
            .current_scene()
            .ok_or_else(|| "no chart to export, dataset not loaded".to_string())?;
        std::fs::write(path, to_svg(&scene)).err_to_string("could not write svg file")?;
        log::info!("exported chart to {:?}", path);
        Ok(())
    }

    fn update_state(&mut self) {
        self.run_events();
        if self.sources.try_update() {
            log::debug!("backend now uses {:?}", self.sources.value());
        }
        let coins = self.coins.try_update();
        let gapminder = self.gapminder.try_update();
        let revenue = self.revenue.try_update();
        if coins || gapminder || revenue {
            self.request_redraw();
        }
    }

    /// Runs due playback ticks and returns when the next one is due.
    fn poll_timers(&mut self) -> Option<Duration> {
        let now = Instant::now();
        let gapminder = self.gapminder.poll_timer(now);
        let revenue = self.revenue.poll_timer(now);
        match (gapminder, revenue) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn waits_on_backend(&self) -> bool {
        !self.event_queue.is_empty()
            || !self.sources.is_up_to_date()
            || self.coins.view.is_loading()
            || self.gapminder.view.is_loading()
            || self.revenue.view.is_loading()
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.request_redraw.take().is_some() {
            ctx.request_repaint();
        }

        self.update_state();
        if let Some(next_tick) = self.poll_timers() {
            ctx.request_repaint_after(next_tick);
        }
        if self.waits_on_backend() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        let mut should_quit = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            // Circle main window view.
            if i.key_pressed(egui::Key::F3) {
                self.ui_selection = self.ui_selection.next();
            }
            // Quick save app state.
            if i.key_pressed(egui::Key::F6) {
                if let Err(error) = save_json(self, None) {
                    log::error!("{}", error)
                };
            }
            // Quick load app state.
            if i.key_pressed(egui::Key::F5) {
                if let Err(error) = load_json(self, None) {
                    log::error!("{}", error)
                };
            }
            // Close app.
            if i.key_pressed(egui::Key::F10) {
                should_quit = true;
            }
            // Open preferences.
            if i.key_pressed(egui::Key::F12) {
                self.ui_selection = UISelection::Preferences;
            }
            if i.key_pressed(egui::Key::Space) && self.ui_selection == UISelection::Gapminder {
                self.gapminder.toggle_playback();
            }
            if i.key_pressed(egui::Key::S) && i.modifiers.ctrl {
                self.request_save_load(true);
            }
            if i.key_pressed(egui::Key::L) && i.modifiers.ctrl {
                self.request_save_load(false);
            }
            if i.key_pressed(egui::Key::P) && i.modifiers.ctrl {
                self.request_svg_export();
            }
        });

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui, ctx);
        });

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(handle) = self.backend_thread_handle.take() {
            app_core::backend::request_stop(&self.request_tx, handle);
        }
    }
}

impl EguiApp {
    fn request_save_load(&mut self, should_save: bool) {
        log::debug!(
            "open dialog to select {} path",
            if should_save { "save" } else { "load" }
        );
        let handle = if should_save {
            std::thread::spawn(|| {
                rfd::FileDialog::new()
                    .set_file_name("chartdeck_state.json")
                    .save_file()
            })
        } else {
            std::thread::spawn(|| rfd::FileDialog::new().pick_file())
        };
        let event = SaveLoadRequested::new(should_save, Some(handle));
        self.event_queue.queue_event(Box::new(event));
    }

    fn request_svg_export(&mut self) {
        log::debug!("open dialog to select svg plot path");
        let file_name = match self.ui_selection {
            UISelection::Gapminder => "gapminder.svg",
            UISelection::Revenue => "revenue.svg",
            UISelection::Coins | UISelection::Preferences => "coins.svg",
        };
        let handle =
            std::thread::spawn(move || rfd::FileDialog::new().set_file_name(file_name).save_file());
        let event = SavePlotRequested::new(Some(handle));
        self.event_queue.queue_event(Box::new(event));
    }

    fn central_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        use UISelection as U;
        match self.ui_selection {
            U::Coins => self.coins.render(ui, ctx),
            U::Gapminder => self.gapminder.render(ui, ctx),
            U::Revenue => self.revenue.render(ui, ctx),
            U::Preferences => {
                let action = self.config.render(ctx, ui);
                self.apply_config();
                if action == ConfigAction::ApplySources {
                    self.apply_sources();
                }
            }
        }
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Save").clicked() {
                    self.request_save_load(true);
                }
                if ui.button("Load").clicked() {
                    self.request_save_load(false);
                }
                if ui.button("Quick Save").clicked() {
                    if let Err(error) = save_json(self, None) {
                        log::error!("{}", error)
                    };
                }
                if ui.button("Quick Load").clicked() {
                    // Datasets are fetched on the backend, so loading on the
                    // main thread does not block.
                    if let Err(error) = load_json(self, None) {
                        log::error!("{}", error)
                    };
                }
                if ui.button("Reload Datasets").clicked() {
                    self.reload_datasets();
                }
                if ui.button("Preferences").clicked() {
                    self.ui_selection = UISelection::Preferences
                };
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            // Selection of ui view.
            ui.menu_button("View", |ui| {
                ui.selectable_value(&mut self.ui_selection, UISelection::Coins, "Coin Stats");
                ui.selectable_value(
                    &mut self.ui_selection,
                    UISelection::Gapminder,
                    "Gapminder",
                );
                ui.selectable_value(
                    &mut self.ui_selection,
                    UISelection::Revenue,
                    "Monthly Revenue",
                );
            });

            if ui.button("Export").clicked() {
                self.request_svg_export();
            };

            ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("CTRL + S = Open Save Dialog");
                    ui.separator();
                    ui.label("CTRL + L = Open Load Dialog");
                    ui.separator();
                    ui.label("CTRL + P = Export Chart as SVG");
                    ui.separator();
                    ui.label("Space = Play/Pause (Gapminder)");
                    ui.separator();
                    ui.label("Left/Right = Step Year (focused slider)");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F3 = Cycle View");
                    ui.separator();
                    ui.label("F6 = Save App State");
                    ui.separator();
                    ui.label("F5 = Load App State");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                    ui.label("F12 = Open Preferences");
                    ui.separator();
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle_skips_preferences() {
        let mut selection = UISelection::Preferences;
        let mut seen = Vec::new();
        for _ in 0..4 {
            selection = selection.next();
            seen.push(selection);
        }
        assert_eq!(
            seen,
            vec![
                UISelection::Coins,
                UISelection::Gapminder,
                UISelection::Revenue,
                UISelection::Coins
            ]
        );
    }
}
