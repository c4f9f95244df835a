use serde::{Deserialize, Serialize};

use super::ViewState;
use crate::dataset::{GapminderDataset, YearSnapshot};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapminderState {
    pub current_index: usize,
    /// `None` shows all continents.
    pub continent: Option<String>,
    pub is_playing: bool,
}

impl GapminderState {
    pub fn snapshot<'a>(&self, dataset: &'a GapminderDataset) -> Option<&'a YearSnapshot> {
        dataset.get(self.current_index)
    }

    pub fn year(&self, dataset: &GapminderDataset) -> Option<i64> {
        self.snapshot(dataset).map(|snapshot| snapshot.year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GapminderAction {
    /// Playback timer fired.
    Tick,
    /// The year slider moved; stops playback.
    SeekYear(i64),
    TogglePlay,
    Stop,
    /// Empty string shows all continents.
    FilterContinent(String),
}

impl ViewState for GapminderState {
    type Action = GapminderAction;
    type Dataset = GapminderDataset;

    fn reduce(&self, action: &GapminderAction, dataset: &GapminderDataset) -> Self {
        let mut next = self.clone();
        match action {
            GapminderAction::Tick => {
                if !dataset.is_empty() {
                    next.current_index = (self.current_index + 1) % dataset.len();
                }
            }
            GapminderAction::SeekYear(year) => {
                match dataset.index_of_year(*year) {
                    Some(index) => next.current_index = index,
                    None => log::debug!("no data for year {year}"),
                }
                next.is_playing = false;
            }
            GapminderAction::TogglePlay => next.is_playing = !self.is_playing,
            GapminderAction::Stop => next.is_playing = false,
            GapminderAction::FilterContinent(continent) => {
                next.continent = Some(continent.trim())
                    .filter(|c| !c.is_empty())
                    .filter(|c| dataset.continents().iter().any(|known| known == c))
                    .map(str::to_string);
            }
        }
        next
    }

    fn sanitize(&self, dataset: &GapminderDataset) -> Self {
        let mut next = self.clone();
        if next.current_index >= dataset.len() {
            next.current_index = 0;
        }
        next.is_playing = false;
        if let Some(continent) = &self.continent {
            next = next.reduce(&GapminderAction::FilterContinent(continent.clone()), dataset);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Country;

    fn dataset() -> GapminderDataset {
        let country = |name: &str, continent: &str| Country {
            country: name.into(),
            continent: continent.into(),
            income: 1000.0,
            life_exp: 40.0,
            population: 1e6,
        };
        GapminderDataset::from_years(
            (1800..1803)
                .map(|year| YearSnapshot {
                    year,
                    countries: vec![country("Chile", "americas"), country("China", "asia")],
                })
                .collect(),
        )
    }

    #[test]
    fn test_tick_wraps_to_first_year() {
        let data = dataset();
        let mut state = GapminderState::default();
        for _ in 0..3 {
            state = state.reduce(&GapminderAction::Tick, &data);
        }
        assert_eq!(state.current_index, 0);
        state = state.reduce(&GapminderAction::Tick, &data);
        assert_eq!(state.year(&data), Some(1801));
    }

    #[test]
    fn test_seek_stops_playback() {
        let data = dataset();
        let playing = GapminderState::default().reduce(&GapminderAction::TogglePlay, &data);
        assert!(playing.is_playing);
        let seeked = playing.reduce(&GapminderAction::SeekYear(1802), &data);
        assert_eq!(seeked.current_index, 2);
        assert!(!seeked.is_playing);

        let unknown = seeked.reduce(&GapminderAction::SeekYear(1900), &data);
        assert_eq!(unknown.current_index, 2);
    }

    #[test]
    fn test_continent_filter() {
        let data = dataset();
        let state = GapminderState::default()
            .reduce(&GapminderAction::FilterContinent("asia".into()), &data);
        assert_eq!(state.continent.as_deref(), Some("asia"));
        let cleared = state.reduce(&GapminderAction::FilterContinent(String::new()), &data);
        assert_eq!(cleared.continent, None);
        let unknown = state.reduce(&GapminderAction::FilterContinent("atlantis".into()), &data);
        assert_eq!(unknown.continent, None);
    }

    #[test]
    fn test_sanitize_resets_out_of_range_index() {
        let data = dataset();
        let stale = GapminderState {
            current_index: 40,
            continent: Some("europe".into()),
            is_playing: true,
        };
        assert_eq!(stale.sanitize(&data), GapminderState::default());
    }
}
