use std::time::{Duration, Instant};

use app_core::backend::{BackendEventLoop, BackendLink};
use app_core::frontend::UIParameter;
use viz_core::{
    dispatch::{DispatchTable, InputEvent},
    join::SceneAnimator,
    scene::Scene,
    state::{self, ViewState},
};

use crate::{app::DynRequestSender, BackendAppState};

const NOT_LOADED: &str = "dataset not loaded yet";

/// Dataset, state snapshot and animation of one demo view. Input goes
/// through the view's dispatch table, state changes through its reducer.
pub struct ChartView<S: ViewState> {
    pub dataset: UIParameter<Result<S::Dataset, String>>,
    state: S,
    table: DispatchTable<S::Action>,
    animator: SceneAnimator,
}

impl<S> ChartView<S>
where
    S: ViewState + Clone + PartialEq + std::fmt::Debug,
    S::Dataset: Send + 'static,
{
    pub fn new(state: S, table: DispatchTable<S::Action>, transition: Duration) -> Self {
        Self {
            dataset: UIParameter::new(Err(NOT_LOADED.to_string())),
            state,
            table,
            animator: SceneAnimator::new(transition),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn loaded(&self) -> Option<&S::Dataset> {
        self.dataset.value().as_ref().ok()
    }

    pub fn error(&self) -> Option<&str> {
        match self.dataset.value() {
            Err(err) if self.dataset.is_up_to_date() => Some(err.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.dataset.is_up_to_date()
    }

    /// Requests the dataset from the backend; a pending request is dropped.
    pub fn load<F>(&mut self, description: &str, action: F, request_tx: &mut DynRequestSender)
    where
        F: Fn(&mut BackendEventLoop<BackendAppState>) -> Result<S::Dataset, String>
            + Send
            + 'static,
    {
        BackendLink::request_parameter_update(&mut self.dataset, description, action, request_tx);
    }

    /// Picks up a finished load. Returns `true` if a dataset (or error) came
    /// in.
    pub fn try_update(&mut self) -> bool {
        if !self.dataset.try_update() {
            return false;
        }
        if let Ok(dataset) = self.dataset.value() {
            self.state = self.state.sanitize(dataset);
        }
        self.animator.reset();
        true
    }

    /// Replaces the state, e.g. from storage.
    pub fn set_state(&mut self, state: S) {
        self.state = match self.dataset.value() {
            Ok(dataset) => state.sanitize(dataset),
            Err(_) => state,
        };
    }

    /// Runs `event` through the dispatch table. Returns whether the state
    /// changed.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        match self.table.dispatch(event) {
            Some(action) => self.apply(&action),
            None => false,
        }
    }

    pub fn apply(&mut self, action: &S::Action) -> bool {
        let Ok(dataset) = self.dataset.value() else {
            log::debug!("ignoring {action:?}, no dataset");
            return false;
        };
        let next = state::apply(&self.state, action, dataset);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub fn set_animate(&mut self, animate: bool) {
        self.animator.set_animate(animate);
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Spinner while loading, the error if loading failed.
    pub fn show_status(&self, ui: &mut egui::Ui) {
        if self.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("loading dataset");
            });
        }
        if let Some(err) = self.error() {
            ui.colored_label(egui::Color32::RED, err);
        }
    }

    /// Frame to draw now on the way to `target`.
    pub fn frame(&mut self, target: Scene, now: Instant) -> Scene {
        self.animator.frame(target, now)
    }
}
