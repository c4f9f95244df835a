//! State owned by the backend thread: where the datasets come from. All
//! fetching and parsing happens here, off the UI thread.

use app_core::backend::BackendState;
use viz_core::dataset::{CoinDataset, DataSource, GapminderDataset, RevenueDataset};

/// One source per demo dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Sources {
    pub coins: DataSource,
    pub gapminder: DataSource,
    pub revenue: DataSource,
}

#[derive(Debug)]
pub struct BackendAppState {
    sources: Sources,
}

impl BackendState for BackendAppState {}

impl BackendAppState {
    pub fn new(sources: Sources) -> Self {
        Self { sources }
    }

    pub fn set_sources(&mut self, sources: Sources) {
        log::debug!("dataset sources changed to {sources:?}");
        self.sources = sources;
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    pub fn load_coins(&self) -> Result<CoinDataset, String> {
        log_outcome(
            &self.sources.coins,
            CoinDataset::load(&self.sources.coins),
        )
    }

    pub fn load_gapminder(&self) -> Result<GapminderDataset, String> {
        log_outcome(
            &self.sources.gapminder,
            GapminderDataset::load(&self.sources.gapminder),
        )
    }

    pub fn load_revenue(&self) -> Result<RevenueDataset, String> {
        log_outcome(
            &self.sources.revenue,
            RevenueDataset::load(&self.sources.revenue),
        )
    }
}

fn log_outcome<T>(source: &DataSource, result: Result<T, String>) -> Result<T, String> {
    match &result {
        Ok(_) => log::info!("loaded dataset from {source}"),
        Err(err) => log::error!("failed to load dataset from {source}: {err}"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sources_report_errors() {
        let _ = env_logger::builder().is_test(true).try_init();
        let missing = DataSource::parse("/nonexistent/chartdeck/data.json");
        let state = BackendAppState::new(Sources {
            coins: missing.clone(),
            gapminder: missing.clone(),
            revenue: missing,
        });
        assert!(state.load_coins().is_err());
        assert!(state.load_gapminder().is_err());
        assert!(state.load_revenue().is_err());
    }
}
