use serde::{Deserialize, Serialize};

use super::ViewState;
use crate::dataset::{RevenueDataset, RevenueMetric};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueState {
    pub metric: RevenueMetric,
}

impl Default for RevenueState {
    fn default() -> Self {
        Self {
            metric: RevenueMetric::Revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevenueAction {
    /// Interval elapsed: switch between revenue and profit.
    Tick,
    Show(RevenueMetric),
}

impl ViewState for RevenueState {
    type Action = RevenueAction;
    type Dataset = RevenueDataset;

    fn reduce(&self, action: &RevenueAction, _: &RevenueDataset) -> Self {
        match action {
            RevenueAction::Tick => Self {
                metric: self.metric.toggled(),
            },
            RevenueAction::Show(metric) => Self { metric: *metric },
        }
    }

    fn sanitize(&self, _: &RevenueDataset) -> Self {
        self.clone()
    }
}
