//! Loading and cleaning of the demo datasets.
//!
//! Records missing a required field are dropped silently (with a debug log),
//! never reported as errors. Only I/O and malformed JSON fail a load.

mod coins;
mod gapminder;
mod revenue;
mod source;

pub use coins::{CoinDataset, CoinSample, CoinStat};
pub use gapminder::{Country, GapminderDataset, YearSnapshot};
pub use revenue::{MonthRevenue, RevenueDataset, RevenueMetric};
pub use source::DataSource;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses `day/month/year`; day and month may omit the leading zero.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Accepts a JSON number or a numeric string. Anything else (null, missing,
/// text, non-finite) becomes `None`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
    .filter(|x| x.is_finite()))
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?
        .filter(|x| x.fract() == 0.0)
        .map(|x| x as i64))
}

/// Non-empty string, numbers are taken verbatim.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        x: Option<f64>,
    }

    fn parse_x(json: &str) -> Option<f64> {
        serde_json::from_str::<Probe>(json).unwrap().x
    }

    #[test]
    fn test_lenient_numbers() {
        assert_eq!(parse_x(r#"{"x": 12.5}"#), Some(12.5));
        assert_eq!(parse_x(r#"{"x": "1234"}"#), Some(1234.0));
        assert_eq!(parse_x(r#"{"x": " 7 "}"#), Some(7.0));
        assert_eq!(parse_x(r#"{"x": null}"#), None);
        assert_eq!(parse_x(r#"{}"#), None);
        assert_eq!(parse_x(r#"{"x": "n/a"}"#), None);
        assert_eq!(parse_x(r#"{"x": true}"#), None);
    }

    #[test]
    fn test_dates_without_leading_zeros() {
        assert_eq!(parse_date("12/5/2013"), NaiveDate::from_ymd_opt(2013, 5, 12));
        assert_eq!(parse_date("31/10/2017"), NaiveDate::from_ymd_opt(2017, 10, 31));
        assert_eq!(parse_date("2017-10-31"), None);
        let date = NaiveDate::from_ymd_opt(2013, 5, 2).unwrap();
        assert_eq!(format_date(date), "02/05/2013");
    }
}
