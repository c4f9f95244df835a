use app_core::string_error::ErrorStringExt;
use std::{
    io::Read,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};
use viz_core::dataset::DataSource;

use crate::Sources;

pub const CONFIG_FILE: &str = ".chartdeck";

const PLAYBACK_INTERVAL_RANGE: RangeInclusive<u64> = 10..=5000;
const REVENUE_INTERVAL_RANGE: RangeInclusive<u64> = 100..=60000;
const SLIDER_RADIUS_RANGE: RangeInclusive<f64> = 10.0..=80.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub coins_source: String,
    pub gapminder_source: String,
    pub revenue_source: String,
    pub playback_interval_ms: u64,
    pub revenue_interval_ms: u64,
    pub animate: bool,
    pub slider_radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coins_source: "data/coins.json".to_string(),
            gapminder_source: "data/gapminder.json".to_string(),
            revenue_source: "data/revenues.json".to_string(),
            playback_interval_ms: 100,
            revenue_interval_ms: 1000,
            animate: true,
            slider_radius: 50.0,
        }
    }
}

/// What the user asked for in the preferences view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    None,
    /// Sources changed: hand them to the backend and reload.
    ApplySources,
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        Self::from_file(&home.join(PathBuf::from(CONFIG_FILE)))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let config_raw = {
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        Ok(Self::parse(&config_raw))
    }

    /// Reads `key=value` lines on top of the defaults. Unknown keys are
    /// skipped, unparsable values keep the default and numbers are clamped
    /// to what the preferences view allows.
    pub fn parse(raw: &str) -> Self {
        let mut config = Self::default();
        for line in raw.lines() {
            let line = line.trim();
            // Lines starting with "#" are considered comments.
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                log::warn!("ignoring config line without '=': {line:?}");
                continue;
            };
            let val = val.trim();
            match key.trim() {
                "coins_source" => config.coins_source = val.to_string(),
                "gapminder_source" => config.gapminder_source = val.to_string(),
                "revenue_source" => config.revenue_source = val.to_string(),
                "playback_interval_ms" => {
                    parse_into(val, "playback_interval_ms", &mut config.playback_interval_ms)
                }
                "revenue_interval_ms" => {
                    parse_into(val, "revenue_interval_ms", &mut config.revenue_interval_ms)
                }
                "animate" => parse_into(val, "animate", &mut config.animate),
                "slider_radius" => parse_into(val, "slider_radius", &mut config.slider_radius),
                other => log::debug!("unknown config key {other:?}"),
            }
        }
        config.clamp_values();
        config
    }

    fn clamp_values(&mut self) {
        clamp_into(
            "playback_interval_ms",
            &mut self.playback_interval_ms,
            &PLAYBACK_INTERVAL_RANGE,
        );
        clamp_into(
            "revenue_interval_ms",
            &mut self.revenue_interval_ms,
            &REVENUE_INTERVAL_RANGE,
        );
        if self.slider_radius.is_nan() {
            log::warn!("'slider_radius' is not a number, keeping default");
            self.slider_radius = Self::default().slider_radius;
        }
        clamp_into("slider_radius", &mut self.slider_radius, &SLIDER_RADIUS_RANGE);
    }

    pub fn sources(&self) -> Sources {
        Sources {
            coins: DataSource::parse(&self.coins_source),
            gapminder: DataSource::parse(&self.gapminder_source),
            revenue: DataSource::parse(&self.revenue_source),
        }
    }

    pub fn render(&mut self, _ctx: &egui::Context, ui: &mut egui::Ui) -> ConfigAction {
        let mut action = ConfigAction::None;
        ui.heading("Preferences");
        ui.separator();

        ui.label("Datasets (file path or http(s) URL):");
        egui::Grid::new("dataset_sources")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Coins");
                ui.text_edit_singleline(&mut self.coins_source);
                ui.end_row();
                ui.label("Gapminder");
                ui.text_edit_singleline(&mut self.gapminder_source);
                ui.end_row();
                ui.label("Revenue");
                ui.text_edit_singleline(&mut self.revenue_source);
                ui.end_row();
            });
        if ui.button("Apply and reload").clicked() {
            action = ConfigAction::ApplySources;
        }
        ui.separator();

        ui.label("Playback interval (ms):");
        ui.add(
            egui::DragValue::new(&mut self.playback_interval_ms).range(PLAYBACK_INTERVAL_RANGE),
        );
        ui.label("Revenue toggle interval (ms):");
        ui.add(egui::DragValue::new(&mut self.revenue_interval_ms).range(REVENUE_INTERVAL_RANGE));
        ui.checkbox(&mut self.animate, "Animate transitions");
        ui.label("Year slider handle radius:");
        ui.add(egui::Slider::new(&mut self.slider_radius, SLIDER_RADIUS_RANGE));
        action
    }
}

fn parse_into<T: std::str::FromStr>(raw: &str, key: &str, target: &mut T) {
    match raw.parse::<T>() {
        Ok(value) => *target = value,
        Err(_) => log::warn!("could not parse '{key}' from {raw:?}, keeping default"),
    }
}

fn clamp_into<T: PartialOrd + Copy + std::fmt::Debug>(
    key: &str,
    value: &mut T,
    range: &RangeInclusive<T>,
) {
    let clamped = if *value < *range.start() {
        *range.start()
    } else if *value > *range.end() {
        *range.end()
    } else {
        return;
    };
    log::warn!("'{key}' = {value:?} is out of range {range:?}, using {clamped:?}");
    *value = clamped;
}
