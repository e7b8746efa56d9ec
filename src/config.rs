//! Application configuration.
//!
//! Every field has a default matching the Pasir Ris / Singapore page, so a
//! TOML file only needs the values it overrides.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dataset::parse_number;
use crate::error::{Error, Result};
use crate::normalizer::RenameTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tick_rate_ms: u64,
    pub initial_year: String,
    pub years: Vec<YearConfig>,
    pub columns: RenameTable,
    pub chart: ChartConfig,
    pub series: Vec<SeriesConfig>,
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearConfig {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub x_domain: [f64; 2],
    pub x_ticks: usize,
    pub band_padding: f64,
    pub bar_duration_ms: u64,
    pub median_duration_ms: u64,
}

/// One chart: its source files and median ages, both keyed by year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub id: String,
    pub title: String,
    pub files: BTreeMap<String, PathBuf>,
    pub median_ages: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub title: String,
    pub body: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 600.0,
            height: 400.0,
            margin: Margin {
                top: 40.0,
                right: 50.0,
                bottom: 40.0,
                left: 120.0,
            },
            x_domain: [-20.0, 20.0],
            x_ticks: 5,
            band_padding: 0.1,
            bar_duration_ms: 1000,
            median_duration_ms: 800,
        }
    }
}

impl ChartConfig {
    /// Width of the plotting area inside the margins.
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn bar_duration(&self) -> Duration {
        Duration::from_millis(self.bar_duration_ms)
    }

    pub fn median_duration(&self) -> Duration {
        Duration::from_millis(self.median_duration_ms)
    }
}

fn year_files(prefix: &str) -> BTreeMap<String, PathBuf> {
    ["2000", "2010", "2020"]
        .iter()
        .enumerate()
        .map(|(i, year)| {
            (
                i.to_string(),
                PathBuf::from(format!("data/Resident_Population_{}_{}.csv", prefix, year)),
            )
        })
        .collect()
}

fn medians(values: [&str; 3]) -> BTreeMap<String, String> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i.to_string(), v.to_string()))
        .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tick_rate_ms: 50,
            initial_year: "0".to_string(),
            years: ["2000", "2010", "2020"]
                .iter()
                .enumerate()
                .map(|(i, label)| YearConfig {
                    key: i.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            columns: RenameTable::default(),
            chart: ChartConfig::default(),
            series: vec![
                SeriesConfig {
                    id: "1".to_string(),
                    title: "Population Pyramid (Pasir Ris, Singapore)".to_string(),
                    files: year_files("PasirRis"),
                    median_ages: medians(["31.5", "35.4", "40.2"]),
                },
                SeriesConfig {
                    id: "2".to_string(),
                    title: "Population Pyramid (Singapore)".to_string(),
                    files: year_files("Singapore"),
                    median_ages: medians(["33.9", "37.3", "41.5"]),
                },
            ],
            sections: vec![
                SectionConfig {
                    title: "Reading the chart".to_string(),
                    body: "Male shares extend left of the axis and female shares right, one row per age group. \
                           The red line marks the age group nearest the median age of the selected year."
                        .to_string(),
                },
                SectionConfig {
                    title: "Data".to_string(),
                    body: "Resident population by age group and sex for Pasir Ris and for Singapore as a whole, \
                           census years 2000, 2010 and 2020. Percentages are shares of each area's total."
                        .to_string(),
                },
            ],
        }
    }
}

impl AppConfig {
    /// Defaults when `path` is `None`, otherwise the parsed file.
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        let config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                AppConfig::from_toml_str(&contents)?
            }
            None => AppConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<AppConfig> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.years.is_empty() {
            return Err(Error::Config("at least one year is required".to_string()));
        }
        if !self.years.iter().any(|y| y.key == self.initial_year) {
            return Err(Error::Config(format!(
                "initial year {:?} is not one of the configured years",
                self.initial_year
            )));
        }
        if self.series.is_empty() {
            return Err(Error::Config("at least one series is required".to_string()));
        }
        for series in &self.series {
            for year in &self.years {
                if !series.files.contains_key(&year.key) {
                    return Err(Error::Config(format!(
                        "series {:?} has no file for year {:?}",
                        series.id, year.key
                    )));
                }
                match series.median_ages.get(&year.key) {
                    None => {
                        return Err(Error::Config(format!(
                            "series {:?} has no median age for year {:?}",
                            series.id, year.key
                        )));
                    }
                    Some(value) if parse_number(value).is_none() => {
                        return Err(Error::Config(format!(
                            "series {:?} has invalid median age {:?} for year {:?}",
                            series.id, value, year.key
                        )));
                    }
                    Some(_) => {}
                }
            }
        }
        if self.chart.inner_width() <= 0.0 || self.chart.inner_height() <= 0.0 {
            return Err(Error::Config("chart margins leave no room to draw".to_string()));
        }
        Ok(())
    }

    /// Anchors relative input paths at `data_dir`.
    pub fn resolve_paths(&mut self, data_dir: &Path) {
        for series in &mut self.series {
            for path in series.files.values_mut() {
                if path.is_relative() {
                    *path = data_dir.join(&*path);
                }
            }
        }
    }
}
