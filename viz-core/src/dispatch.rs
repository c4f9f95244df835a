//! Maps control input to view actions. Each view owns one table; controls
//! that are not bound, or values a handler does not understand, produce no
//! action.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::dataset::{CoinStat, RevenueMetric};
use crate::state::{CoinAction, GapminderAction, RevenueAction};

pub const COIN_SELECT: &str = "coin-select";
pub const STAT_SELECT: &str = "stat-select";
pub const DATE_SLIDER: &str = "date-slider";
pub const PLAY_PAUSE: &str = "play-pause";
pub const CONTINENT_FILTER: &str = "filter-continents";
pub const YEAR_SLIDER: &str = "year-slider";
pub const METRIC_SELECT: &str = "metric-select";
/// Control id under which timer ticks are bound.
pub const TIMER: &str = "timer";

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Select {
        control: &'static str,
        value: String,
    },
    Click {
        control: &'static str,
    },
    SliderChanged {
        control: &'static str,
        value: i64,
    },
    DateRange {
        control: &'static str,
        from: NaiveDate,
        to: NaiveDate,
    },
    Tick,
}

impl InputEvent {
    pub fn control(&self) -> &'static str {
        match self {
            InputEvent::Select { control, .. }
            | InputEvent::Click { control }
            | InputEvent::SliderChanged { control, .. }
            | InputEvent::DateRange { control, .. } => *control,
            InputEvent::Tick => TIMER,
        }
    }
}

type Handler<A> = Box<dyn Fn(&InputEvent) -> Option<A>>;

pub struct DispatchTable<A> {
    handlers: HashMap<&'static str, Handler<A>>,
}

impl<A> Default for DispatchTable<A> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<A> std::fmt::Debug for DispatchTable<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut controls: Vec<_> = self.handlers.keys().collect();
        controls.sort();
        f.debug_struct("DispatchTable")
            .field("controls", &controls)
            .finish()
    }
}

impl<A> DispatchTable<A> {
    /// Binds `handler` to `control`, replacing an earlier binding.
    pub fn bind(
        mut self,
        control: &'static str,
        handler: impl Fn(&InputEvent) -> Option<A> + 'static,
    ) -> Self {
        self.handlers.insert(control, Box::new(handler));
        self
    }

    pub fn dispatch(&self, event: &InputEvent) -> Option<A> {
        let Some(handler) = self.handlers.get(event.control()) else {
            log::debug!("no handler bound to {:?}", event.control());
            return None;
        };
        handler(event)
    }

    pub fn is_bound(&self, control: &str) -> bool {
        self.handlers.contains_key(control)
    }
}

fn selected(event: &InputEvent) -> Option<&str> {
    match event {
        InputEvent::Select { value, .. } => Some(value),
        _ => None,
    }
}

pub fn coin_table() -> DispatchTable<CoinAction> {
    DispatchTable::default()
        .bind(COIN_SELECT, |event| {
            selected(event).map(|coin| CoinAction::SelectCoin(coin.to_string()))
        })
        .bind(STAT_SELECT, |event| {
            selected(event)
                .and_then(CoinStat::from_id)
                .map(CoinAction::SelectStat)
        })
        .bind(DATE_SLIDER, |event| match event {
            InputEvent::DateRange { from, to, .. } => Some(CoinAction::SetDateRange(*from, *to)),
            _ => None,
        })
}

pub fn gapminder_table() -> DispatchTable<GapminderAction> {
    DispatchTable::default()
        .bind(TIMER, |_| Some(GapminderAction::Tick))
        .bind(PLAY_PAUSE, |event| {
            matches!(event, InputEvent::Click { .. }).then_some(GapminderAction::TogglePlay)
        })
        .bind(YEAR_SLIDER, |event| match event {
            InputEvent::SliderChanged { value, .. } => Some(GapminderAction::SeekYear(*value)),
            _ => None,
        })
        .bind(CONTINENT_FILTER, |event| {
            selected(event).map(|continent| GapminderAction::FilterContinent(continent.to_string()))
        })
}

pub fn revenue_table() -> DispatchTable<RevenueAction> {
    DispatchTable::default()
        .bind(TIMER, |_| Some(RevenueAction::Tick))
        .bind(METRIC_SELECT, |event| match selected(event)? {
            "revenue" => Some(RevenueAction::Show(RevenueMetric::Revenue)),
            "profit" => Some(RevenueAction::Show(RevenueMetric::Profit)),
            _ => None,
        })
}
