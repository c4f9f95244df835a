use std::{path::PathBuf, thread::JoinHandle};

use derive_new::new;

use super::{
    storage::{load_json, save_json},
    EguiApp,
};
use app_core::event::{AppEvent, EventState};

// ---------------------------------------------------------------------------
//
//
// EventQueue
//
//
// ---------------------------------------------------------------------------

/// The EventQueue stores events that are processed each iteration
/// of the application GUI event loop.
pub struct EventQueue<App> {
    /// Stores events for later processing.
    queue: Vec<Box<dyn AppEvent<App = App>>>,
    /// Temporarily stores events that have not yet finished running.
    tmp_backlog: Vec<Box<dyn AppEvent<App = App>>>,
}

impl<App> EventQueue<App> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            tmp_backlog: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: Box<dyn AppEvent<App = App>>) {
        self.queue.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty() && self.tmp_backlog.is_empty()
    }
}

impl EguiApp {
    pub fn run_events(&mut self) {
        while let Some(mut event) = self.event_queue.queue.pop() {
            match event.apply(self) {
                Ok(EventState::Finished) => {
                    self.request_redraw();
                }
                Ok(EventState::Busy) => {
                    self.event_queue.tmp_backlog.push(event);
                }
                Err(err) => {
                    log::error!("event failed: {:?}", err)
                }
            }
        }

        // Busy events go back into the queue for the next frame.
        std::mem::swap(
            &mut self.event_queue.queue,
            &mut self.event_queue.tmp_backlog,
        );
    }
}

// ---------------------------------------------------------------------------
//
//
// Events
//
//
// ---------------------------------------------------------------------------

/// Saves or loads the app state, depending on `should_save`, once the file
/// dialog running in `thread_handle` returns a path.
#[derive(new)]
pub struct SaveLoadRequested {
    should_save: bool,
    thread_handle: Option<JoinHandle<Option<PathBuf>>>,
}

/// Writes the current chart as SVG once the file dialog returns a path.
#[derive(new)]
pub struct SavePlotRequested {
    thread_handle: Option<JoinHandle<Option<PathBuf>>>,
}

// ---------------------------------------------------------------------------
//
//
// apply()
//
//
// ---------------------------------------------------------------------------

impl AppEvent for SaveLoadRequested {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let Some(handle) = self.thread_handle.take_if(|handle| handle.is_finished()) else {
            return Ok(EventState::Busy);
        };
        match handle.join() {
            Ok(Some(path)) => {
                if self.should_save {
                    save_json(app, Some(path.as_ref()))?;
                } else {
                    load_json(app, Some(path.as_ref()))?;
                }
            }
            Ok(None) => log::debug!("file dialog cancelled"),
            Err(err) => {
                let msg = if self.should_save { "save" } else { "load" };
                log::error!("unable to {} file: {:?}", msg, err)
            }
        };
        Ok(EventState::Finished)
    }
}

impl AppEvent for SavePlotRequested {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let Some(handle) = self.thread_handle.take_if(|handle| handle.is_finished()) else {
            return Ok(EventState::Busy);
        };
        match handle.join() {
            Ok(Some(path)) => app.export_svg(&path)?,
            Ok(None) => log::debug!("file dialog cancelled"),
            Err(err) => log::error!("unable to save plot: {:?}", err),
        };
        Ok(EventState::Finished)
    }
}
