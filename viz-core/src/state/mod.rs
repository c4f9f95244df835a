//! Per-view state snapshots and the pure reducers that advance them.
//!
//! A reducer never mutates its input: it returns the next snapshot, which
//! the view swaps in and re-renders from.

pub mod coins;
pub mod gapminder;
pub mod revenue;

pub use coins::{CoinAction, CoinState};
pub use gapminder::{GapminderAction, GapminderState};
pub use revenue::{RevenueAction, RevenueState};

use serde::{Deserialize, Serialize};

/// A view state advanced by actions against its dataset.
pub trait ViewState: Sized {
    type Action: std::fmt::Debug;
    type Dataset;

    fn reduce(&self, action: &Self::Action, dataset: &Self::Dataset) -> Self;

    /// Brings a restored or stale snapshot back within the dataset.
    fn sanitize(&self, dataset: &Self::Dataset) -> Self;
}

/// Applies `action` and logs the transition.
pub fn apply<S>(state: &S, action: &S::Action, dataset: &S::Dataset) -> S
where
    S: ViewState + std::fmt::Debug,
{
    let next = state.reduce(action, dataset);
    log::debug!("{action:?}: {state:?} -> {next:?}");
    next
}

/// Everything that is persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewStates {
    pub coins: CoinState,
    pub gapminder: GapminderState,
    pub revenue: RevenueState,
}
