use std::collections::HashMap;

use app_core::string_error::ErrorStringExt;
use serde::Deserialize;

use super::{lenient_f64, lenient_i64, lenient_string, DataSource};
use crate::scale::{extent, extent_by};

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub country: String,
    pub continent: String,
    pub income: f64,
    pub life_exp: f64,
    pub population: f64,
}

/// All countries of one year, most populous first.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSnapshot {
    pub year: i64,
    pub countries: Vec<Country>,
}

#[derive(Deserialize)]
struct RawYear {
    #[serde(default, deserialize_with = "lenient_i64")]
    year: Option<i64>,
    #[serde(default)]
    countries: Vec<RawCountry>,
}

#[derive(Deserialize)]
struct RawCountry {
    #[serde(default, deserialize_with = "lenient_string")]
    country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    continent: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    income: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    life_exp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    population: Option<f64>,
}

impl RawCountry {
    fn clean(self) -> Option<Country> {
        // Zero income or life expectancy counts as missing; income also
        // feeds a log scale.
        let income = self.income.filter(|v| *v > 0.0)?;
        let life_exp = self.life_exp.filter(|v| *v != 0.0)?;
        Some(Country {
            country: self.country?,
            continent: self.continent?,
            income,
            life_exp,
            population: self.population?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapminderDataset {
    years: Vec<YearSnapshot>,
    year_to_index: HashMap<i64, usize>,
}

impl GapminderDataset {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let raw: Vec<RawYear> =
            serde_json::from_str(raw).err_to_string("could not parse gapminder dataset")?;
        let years: Vec<_> = raw
            .into_iter()
            .filter_map(|raw_year| {
                let Some(year) = raw_year.year else {
                    log::debug!("dropping entry without year");
                    return None;
                };
                let mut countries: Vec<_> = raw_year
                    .countries
                    .into_iter()
                    .filter_map(RawCountry::clean)
                    .collect();
                countries.sort_by(|a, b| b.population.total_cmp(&a.population));
                Some(YearSnapshot { year, countries })
            })
            .collect();
        Ok(Self::from_years(years))
    }

    pub fn from_years(years: Vec<YearSnapshot>) -> Self {
        let year_to_index = years
            .iter()
            .enumerate()
            .map(|(index, snapshot)| (snapshot.year, index))
            .collect();
        Self {
            years,
            year_to_index,
        }
    }

    pub fn load(source: &DataSource) -> Result<Self, String> {
        Self::from_json(&source.fetch()?)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&YearSnapshot> {
        self.years.get(index)
    }

    pub fn years(&self) -> &[YearSnapshot] {
        &self.years
    }

    pub fn index_of_year(&self, year: i64) -> Option<usize> {
        self.year_to_index.get(&year).copied()
    }

    pub fn year_extent(&self) -> Option<[i64; 2]> {
        extent_by(self.years.iter().map(|snapshot| snapshot.year))
    }

    fn all_countries(&self) -> impl Iterator<Item = &Country> {
        self.years.iter().flat_map(|snapshot| snapshot.countries.iter())
    }

    /// Continents in order of first appearance.
    pub fn continents(&self) -> Vec<String> {
        let mut continents: Vec<String> = Vec::new();
        for country in self.all_countries() {
            if !continents.contains(&country.continent) {
                continents.push(country.continent.clone());
            }
        }
        continents
    }

    pub fn income_extent(&self) -> Option<[f64; 2]> {
        extent(self.all_countries().map(|c| c.income))
    }

    pub fn life_exp_max(&self) -> Option<f64> {
        extent(self.all_countries().map(|c| c.life_exp)).map(|[_, max]| max)
    }

    pub fn population_extent(&self) -> Option<[f64; 2]> {
        extent(self.all_countries().map(|c| c.population))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEARS: &str = r#"[
        {"year": "1800", "countries": [
            {"continent": "europe", "country": "Austria",
                "income": 1000, "life_exp": 34, "population": 3000000},
            {"continent": "asia", "country": "China",
                "income": 600, "life_exp": 32, "population": 321675013},
            {"continent": "asia", "country": "Nowhere",
                "income": null, "life_exp": 30, "population": 5},
            {"continent": "africa", "country": "Zeroland",
                "income": 500, "life_exp": 0, "population": 5}
        ]},
        {"year": "1801", "countries": [
            {"continent": "americas", "country": "Chile",
                "income": "1200", "life_exp": "35.5", "population": "800000"}
        ]},
        {"countries": []}
    ]"#;

    #[test]
    fn test_invalid_countries_dropped_and_sorted_by_population() {
        let dataset = GapminderDataset::from_json(YEARS).unwrap();
        assert_eq!(dataset.len(), 2);
        let names: Vec<_> = dataset
            .get(0)
            .unwrap()
            .countries
            .iter()
            .map(|c| c.country.as_str())
            .collect();
        assert_eq!(names, vec!["China", "Austria"]);
    }

    #[test]
    fn test_string_fields_are_coerced() {
        let dataset = GapminderDataset::from_json(YEARS).unwrap();
        let chile = &dataset.get(1).unwrap().countries[0];
        assert_eq!(dataset.get(1).unwrap().year, 1801);
        assert_eq!(chile.income, 1200.0);
        assert_eq!(chile.life_exp, 35.5);
        assert_eq!(chile.population, 800_000.0);
    }

    #[test]
    fn test_derived_domains() {
        let dataset = GapminderDataset::from_json(YEARS).unwrap();
        assert_eq!(dataset.year_extent(), Some([1800, 1801]));
        assert_eq!(dataset.index_of_year(1801), Some(1));
        assert_eq!(dataset.index_of_year(1802), None);
        assert_eq!(dataset.continents(), vec!["europe", "asia", "americas"]);
        assert_eq!(dataset.income_extent(), Some([600.0, 1200.0]));
        assert_eq!(dataset.life_exp_max(), Some(35.5));
        assert_eq!(dataset.population_extent(), Some([800_000.0, 321_675_013.0]));
    }
}
