#![warn(clippy::all, rust_2018_idioms)]

use app_core::backend::BackendEventLoop;
use chartdeck::{BackendAppState, Config, EguiApp};

const WINDOW_NAME: &str = "Chartdeck";
const WINDOW_WIDTH: f32 = 1280.0;
const WINDOW_HEIGHT: f32 = 960.0;
const MIN_WINDOW_WIDTH: f32 = 640.0;
const MIN_WINDOW_HEIGHT: f32 = 480.0;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::from_config_file() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("unable to load config file \".chartdeck\" from home directory: {err}");
            Config::default()
        }
    };

    // start backend loop
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let backend_state = BackendAppState::new(config.sources());
    let eventloop_handle = BackendEventLoop::new(request_rx, backend_state).run();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        native_options,
        Box::new(|cc| {
            Ok(Box::new(EguiApp::new(
                cc,
                config,
                request_tx,
                eventloop_handle,
            )))
        }),
    )
}
