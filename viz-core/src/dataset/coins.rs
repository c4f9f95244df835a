use std::collections::BTreeMap;

use app_core::string_error::ErrorStringExt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{lenient_f64, lenient_string, parse_date, DataSource};
use crate::scale::extent_by;

/// The statistic plotted in the coin chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinStat {
    Volume24h,
    MarketCap,
    PriceUsd,
}

impl CoinStat {
    pub const ALL: [CoinStat; 3] = [CoinStat::PriceUsd, CoinStat::MarketCap, CoinStat::Volume24h];

    /// Field name in the dataset, also used as control value.
    pub fn id(&self) -> &'static str {
        match self {
            CoinStat::Volume24h => "24h_vol",
            CoinStat::MarketCap => "market_cap",
            CoinStat::PriceUsd => "price_usd",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.id() == id)
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            CoinStat::Volume24h => "24 Hour Trading Volume (USD)",
            CoinStat::MarketCap => "Market Capitalization (USD)",
            CoinStat::PriceUsd => "Price (USD)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinSample {
    pub date: NaiveDate,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub price_usd: f64,
}

impl CoinSample {
    pub fn stat(&self, stat: CoinStat) -> f64 {
        match stat {
            CoinStat::Volume24h => self.volume_24h,
            CoinStat::MarketCap => self.market_cap,
            CoinStat::PriceUsd => self.price_usd,
        }
    }
}

#[derive(Deserialize)]
struct RawCoinRecord {
    #[serde(default, rename = "24h_vol", deserialize_with = "lenient_f64")]
    volume_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    date: Option<String>,
}

impl RawCoinRecord {
    fn clean(self) -> Option<CoinSample> {
        Some(CoinSample {
            date: parse_date(self.date.as_deref()?)?,
            volume_24h: self.volume_24h?,
            market_cap: self.market_cap?,
            price_usd: self.price_usd?,
        })
    }
}

/// Daily samples per coin, each series in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinDataset {
    coins: BTreeMap<String, Vec<CoinSample>>,
}

impl CoinDataset {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let raw: BTreeMap<String, Vec<RawCoinRecord>> =
            serde_json::from_str(raw).err_to_string("could not parse coin dataset")?;
        let coins = raw
            .into_iter()
            .map(|(coin, records)| {
                let total = records.len();
                let mut samples: Vec<_> = records
                    .into_iter()
                    .filter_map(RawCoinRecord::clean)
                    .collect();
                samples.sort_by_key(|sample| sample.date);
                log::debug!(
                    "coin '{coin}': kept {} of {total} records",
                    samples.len()
                );
                (coin, samples)
            })
            .collect();
        Ok(Self { coins })
    }

    pub fn load(source: &DataSource) -> Result<Self, String> {
        Self::from_json(&source.fetch()?)
    }

    pub fn coin_names(&self) -> impl Iterator<Item = &str> {
        self.coins.keys().map(String::as_str)
    }

    pub fn contains(&self, coin: &str) -> bool {
        self.coins.contains_key(coin)
    }

    pub fn series(&self, coin: &str) -> Option<&[CoinSample]> {
        self.coins.get(coin).map(Vec::as_slice)
    }

    /// First and last date over all coins.
    pub fn date_extent(&self) -> Option<[NaiveDate; 2]> {
        extent_by(self.coins.values().flatten().map(|sample| sample.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COINS: &str = r#"{
        "bitcoin": [
            {"24h_vol": "9000", "date": "13/5/2013",
                "market_cap": "1500000000", "price_usd": "118.2"},
            {"24h_vol": null, "date": "14/5/2013",
                "market_cap": "1400000000", "price_usd": "111.0"},
            {"24h_vol": "8000", "date": "12/5/2013", "market_cap": 1400000000, "price_usd": 117.5}
        ],
        "ethereum": [
            {"24h_vol": "1", "date": "not a date", "market_cap": "2", "price_usd": "3"},
            {"24h_vol": "1", "date": "7/8/2015", "market_cap": "2", "price_usd": "3"}
        ]
    }"#;

    #[test]
    fn test_records_with_null_fields_are_dropped() {
        let dataset = CoinDataset::from_json(COINS).unwrap();
        let bitcoin = dataset.series("bitcoin").unwrap();
        assert_eq!(bitcoin.len(), 2);
        assert!(bitcoin
            .iter()
            .all(|s| s.date != NaiveDate::from_ymd_opt(2013, 5, 14).unwrap()));
        assert_eq!(dataset.series("ethereum").unwrap().len(), 1);
    }

    #[test]
    fn test_complete_records_are_coerced_and_sorted() {
        let dataset = CoinDataset::from_json(COINS).unwrap();
        let bitcoin = dataset.series("bitcoin").unwrap();
        assert_eq!(
            bitcoin[0],
            CoinSample {
                date: NaiveDate::from_ymd_opt(2013, 5, 12).unwrap(),
                volume_24h: 8000.0,
                market_cap: 1.4e9,
                price_usd: 117.5,
            }
        );
        assert_eq!(bitcoin[1].price_usd, 118.2);
        assert_eq!(bitcoin[1].stat(CoinStat::Volume24h), 9000.0);
    }

    #[test]
    fn test_names_and_extent() {
        let dataset = CoinDataset::from_json(COINS).unwrap();
        assert_eq!(dataset.coin_names().collect::<Vec<_>>(), vec!["bitcoin", "ethereum"]);
        assert_eq!(
            dataset.date_extent(),
            Some([
                NaiveDate::from_ymd_opt(2013, 5, 12).unwrap(),
                NaiveDate::from_ymd_opt(2015, 8, 7).unwrap()
            ])
        );
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = CoinDataset::from_json("[1, 2").unwrap_err();
        assert!(err.starts_with("could not parse coin dataset"));
    }

    #[test]
    fn test_stat_ids() {
        for stat in CoinStat::ALL {
            assert_eq!(CoinStat::from_id(stat.id()), Some(stat));
        }
        assert_eq!(CoinStat::from_id("volume"), None);
    }
}
