use app_core::string_error::ErrorStringExt;
use serde::{Deserialize, Serialize};

use super::{lenient_f64, lenient_string, DataSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueMetric {
    Revenue,
    Profit,
}

impl RevenueMetric {
    pub fn toggled(self) -> Self {
        match self {
            RevenueMetric::Revenue => RevenueMetric::Profit,
            RevenueMetric::Profit => RevenueMetric::Revenue,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RevenueMetric::Revenue => "Revenue",
            RevenueMetric::Profit => "Profit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthRevenue {
    pub month: String,
    pub revenue: f64,
    pub profit: f64,
}

impl MonthRevenue {
    pub fn value(&self, metric: RevenueMetric) -> f64 {
        match metric {
            RevenueMetric::Revenue => self.revenue,
            RevenueMetric::Profit => self.profit,
        }
    }
}

#[derive(Deserialize)]
struct RawMonth {
    #[serde(default, deserialize_with = "lenient_string")]
    month: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    profit: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueDataset {
    months: Vec<MonthRevenue>,
}

impl RevenueDataset {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let raw: Vec<RawMonth> =
            serde_json::from_str(raw).err_to_string("could not parse revenue dataset")?;
        let months = raw
            .into_iter()
            .filter_map(|m| {
                Some(MonthRevenue {
                    month: m.month?,
                    revenue: m.revenue?,
                    profit: m.profit?,
                })
            })
            .collect();
        Ok(Self { months })
    }

    pub fn load(source: &DataSource) -> Result<Self, String> {
        Self::from_json(&source.fetch()?)
    }

    pub fn months(&self) -> &[MonthRevenue] {
        &self.months
    }

    pub fn max(&self, metric: RevenueMetric) -> Option<f64> {
        self.months
            .iter()
            .map(|m| m.value(metric))
            .reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_coerced_and_incomplete_dropped() {
        let dataset = RevenueDataset::from_json(
            r#"[
                {"month": "January", "revenue": "13432", "profit": "8342"},
                {"month": "February", "revenue": "19342", "profit": null},
                {"month": "March", "revenue": 17443, "profit": "10342"}
            ]"#,
        )
        .unwrap();
        let months: Vec<_> = dataset.months().iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["January", "March"]);
        assert_eq!(dataset.months()[0].revenue, 13432.0);
        assert_eq!(dataset.max(RevenueMetric::Revenue), Some(17443.0));
        assert_eq!(dataset.max(RevenueMetric::Profit), Some(10342.0));
    }

    #[test]
    fn test_metric_toggle() {
        assert_eq!(RevenueMetric::Revenue.toggled(), RevenueMetric::Profit);
        assert_eq!(RevenueMetric::Profit.toggled().label(), "Revenue");
    }
}
