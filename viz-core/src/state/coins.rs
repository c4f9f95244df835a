use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ViewState;
use crate::dataset::{CoinDataset, CoinStat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinState {
    pub coin: String,
    pub stat: CoinStat,
    /// Inclusive `[start, end]`.
    pub date_range: [NaiveDate; 2],
}

impl Default for CoinState {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2013, 5, 12).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(2017, 10, 31).unwrap_or(NaiveDate::MIN);
        Self {
            coin: "bitcoin".to_string(),
            stat: CoinStat::PriceUsd,
            date_range: [start, end],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoinAction {
    SelectCoin(String),
    SelectStat(CoinStat),
    SetDateRange(NaiveDate, NaiveDate),
}

fn clamp_range(a: NaiveDate, b: NaiveDate, dataset: &CoinDataset) -> [NaiveDate; 2] {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    match dataset.date_extent() {
        Some([min, max]) => [start.clamp(min, max), end.clamp(min, max)],
        None => [start, end],
    }
}

impl ViewState for CoinState {
    type Action = CoinAction;
    type Dataset = CoinDataset;

    fn reduce(&self, action: &CoinAction, dataset: &CoinDataset) -> Self {
        let mut next = self.clone();
        match action {
            CoinAction::SelectCoin(coin) => {
                if dataset.contains(coin) {
                    next.coin = coin.clone();
                } else {
                    log::debug!("ignoring unknown coin {coin:?}");
                }
            }
            CoinAction::SelectStat(stat) => next.stat = *stat,
            CoinAction::SetDateRange(a, b) => next.date_range = clamp_range(*a, *b, dataset),
        }
        next
    }

    fn sanitize(&self, dataset: &CoinDataset) -> Self {
        let mut next = self.clone();
        if !dataset.contains(&next.coin) {
            if let Some(first) = dataset.coin_names().next() {
                next.coin = first.to_string();
            }
        }
        let [a, b] = next.date_range;
        next.date_range = clamp_range(a, b, dataset);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset() -> CoinDataset {
        CoinDataset::from_json(
            r#"{
                "bitcoin": [
                    {"24h_vol": "1", "date": "12/5/2013", "market_cap": "2", "price_usd": "3"},
                    {"24h_vol": "1", "date": "31/10/2017", "market_cap": "2", "price_usd": "3"}
                ],
                "ethereum": [
                    {"24h_vol": "1", "date": "1/1/2016", "market_cap": "2", "price_usd": "3"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_known_coin_and_stat() {
        let data = dataset();
        let state = CoinState::default()
            .reduce(&CoinAction::SelectCoin("ethereum".into()), &data)
            .reduce(&CoinAction::SelectStat(CoinStat::MarketCap), &data);
        assert_eq!(state.coin, "ethereum");
        assert_eq!(state.stat, CoinStat::MarketCap);

        let unchanged = state.reduce(&CoinAction::SelectCoin("dogecoin".into()), &data);
        assert_eq!(unchanged, state);
    }

    #[test]
    fn test_date_range_ordered_and_clamped() {
        let data = dataset();
        let state = CoinState::default().reduce(
            &CoinAction::SetDateRange(date(1, 1, 2020), date(1, 6, 2015)),
            &data,
        );
        assert_eq!(state.date_range, [date(1, 6, 2015), date(31, 10, 2017)]);

        let state = state.reduce(
            &CoinAction::SetDateRange(date(1, 1, 2000), date(1, 1, 2001)),
            &data,
        );
        assert_eq!(state.date_range, [date(12, 5, 2013), date(12, 5, 2013)]);
    }

    #[test]
    fn test_sanitize_replaces_missing_coin() {
        let data = dataset();
        let stale = CoinState {
            coin: "dogecoin".into(),
            ..Default::default()
        };
        assert_eq!(stale.sanitize(&data).coin, "bitcoin");
    }
}
