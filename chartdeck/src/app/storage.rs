use std::path::Path;

use app_core::storage::Storage;
use serde::{Deserialize, Serialize};
use viz_core::state::ViewStates;

use super::UISelection;
use crate::EguiApp;

/// Where the backend fetches its datasets from, as typed in the preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BackendStorage {
    coins_source: String,
    gapminder_source: String,
    revenue_source: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct FrontendStorage {
    ui_selection: UISelection,
    states: ViewStates,
}

pub fn save_json(app: &EguiApp, path: Option<&Path>) -> Result<(), String> {
    let backend_storage = BackendStorage {
        coins_source: app.config.coins_source.clone(),
        gapminder_source: app.config.gapminder_source.clone(),
        revenue_source: app.config.revenue_source.clone(),
    };
    let frontend_storage = FrontendStorage {
        ui_selection: app.ui_selection,
        states: app.view_states(),
    };
    Storage::new(backend_storage, frontend_storage).save_json(path)
}

/// Restores sources, view and states. Datasets are reloaded only when the
/// stored sources differ; restored states are checked against the datasets
/// as soon as they are in.
pub fn load_json(app: &mut EguiApp, path: Option<&Path>) -> Result<(), String> {
    let Storage::<BackendStorage, FrontendStorage> {
        backend_storage,
        frontend_storage,
    } = Storage::load_json(path)?;

    let sources_changed = backend_storage.coins_source != app.config.coins_source
        || backend_storage.gapminder_source != app.config.gapminder_source
        || backend_storage.revenue_source != app.config.revenue_source;
    if sources_changed {
        app.config.coins_source = backend_storage.coins_source;
        app.config.gapminder_source = backend_storage.gapminder_source;
        app.config.revenue_source = backend_storage.revenue_source;
        app.apply_sources();
    }

    app.ui_selection = frontend_storage.ui_selection;
    app.set_view_states(frontend_storage.states);
    app.request_redraw();
    Ok(())
}
