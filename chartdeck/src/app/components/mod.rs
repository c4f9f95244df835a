mod chart_view;
mod coins;
mod gapminder;
mod revenue;
mod year_slider;

pub use chart_view::ChartView;
pub use coins::CoinView;
pub use gapminder::GapminderView;
pub use revenue::RevenueView;
