//! Loads both series and keeps the two charts in step with the year selector.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, error, info};
use tui::layout::Rect;

use crate::chart::{ChartSnapshot, PyramidChart};
use crate::config::{AppConfig, SectionConfig, YearConfig};
use crate::csv_reader;
use crate::dataset::{Dataset, MedianAgeTable};
use crate::error::{Error, Result};
use crate::normalizer::RawRecord;
use crate::tooltip::Tooltip;

/// A chart with the data it draws from.
pub struct Panel {
    pub chart: PyramidChart,
    dataset: Dataset,
    medians: MedianAgeTable,
}

/// Collapsible text section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure {
    pub title: String,
    pub body: String,
    expanded: bool,
}

impl Disclosure {
    fn new(section: &SectionConfig) -> Self {
        Disclosure {
            title: section.title.clone(),
            body: section.body.clone(),
            expanded: false,
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }
}

pub struct App {
    years: Vec<YearConfig>,
    selected: usize,
    panels: Vec<Panel>,
    tooltip: Tooltip,
    sections: Vec<Disclosure>,
    focused_section: usize,
    chart_areas: Vec<Rect>,
    status: Option<String>,
    loaded_at: DateTime<Local>,
}

impl App {
    /// Reads every series for every year, then draws the initial year.
    pub fn load(config: &AppConfig, now: Instant) -> Result<App> {
        let mut paths = Vec::<PathBuf>::new();
        for series in &config.series {
            for year in &config.years {
                let path = series.files.get(&year.key).ok_or_else(|| {
                    Error::Config(format!("series {:?} has no file for year {:?}", series.id, year.key))
                })?;
                paths.push(path.clone());
            }
        }
        info!(files = paths.len(), columns = config.columns.len(), "loading population tables");
        let mut tables = csv_reader::read_all(&paths)?.into_iter();

        let per_series: Vec<Vec<(String, Vec<RawRecord>)>> = config
            .series
            .iter()
            .map(|_| {
                config
                    .years
                    .iter()
                    .map(|year| (year.key.clone(), tables.next().unwrap_or_default()))
                    .collect()
            })
            .collect();
        Ok(App::from_tables(config, per_series, now))
    }

    /// `tables[i]` holds series `i`'s raw tables keyed by year.
    pub fn from_tables(config: &AppConfig, tables: Vec<Vec<(String, Vec<RawRecord>)>>, now: Instant) -> App {
        let first_year = config.years.first().map(|y| y.key.as_str()).unwrap_or_default();
        let panels = config
            .series
            .iter()
            .zip(tables)
            .map(|(series, tables)| {
                let dataset = Dataset::from_tables(tables, &config.columns);
                for year in &config.years {
                    debug!(
                        series = %series.id,
                        year = %year.key,
                        first = ?dataset.records(&year.key).and_then(|r| r.first()),
                        "normalized table"
                    );
                }
                let chart = PyramidChart::new(&series.id, &series.title, &config.chart, dataset.age_groups(first_year));
                Panel {
                    chart,
                    dataset,
                    medians: MedianAgeTable::new(series.median_ages.clone()),
                }
            })
            .collect();

        let mut app = App {
            years: config.years.clone(),
            selected: 0,
            panels,
            tooltip: Tooltip::default(),
            sections: config.sections.iter().map(Disclosure::new).collect(),
            focused_section: 0,
            chart_areas: Vec::new(),
            status: None,
            loaded_at: Local::now(),
        };
        // failures are already on the status line
        let _ = app.select_year(&config.initial_year, now);
        app
    }

    /// Redraws every chart for `key`.
    ///
    /// A chart that cannot draw the year keeps its previous picture; the
    /// first error is returned and shown on the status line. The selector
    /// only moves when at least one chart drew the year.
    pub fn select_year(&mut self, key: &str, now: Instant) -> Result<()> {
        let Some(index) = self.years.iter().position(|y| y.key == key) else {
            return self.fail(Error::UnknownYear(key.to_string()));
        };
        let mut first_error = None;
        let mut rendered = false;
        for panel in &mut self.panels {
            match panel.chart.render(key, &panel.dataset, &panel.medians, now) {
                Ok(outcome) => {
                    rendered = true;
                    debug!(chart = %panel.chart.id(), year = key, median = ?outcome.median_bucket, "median bucket");
                }
                Err(e) => {
                    error!(chart = %panel.chart.id(), year = key, "render failed: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }
        if rendered {
            self.selected = index;
        }
        self.tooltip.hide();
        match first_error {
            Some(e) => self.fail(e),
            None => {
                info!(year = key, "selected year");
                self.status = None;
                Ok(())
            }
        }
    }

    fn fail(&mut self, e: Error) -> Result<()> {
        error!("{}", e);
        self.status = Some(e.to_string());
        Err(e)
    }

    pub fn select_year_index(&mut self, index: usize, now: Instant) -> Result<()> {
        match self.years.get(index) {
            Some(year) => {
                let key = year.key.clone();
                self.select_year(&key, now)
            }
            None => Ok(()),
        }
    }

    pub fn next_year(&mut self, now: Instant) -> Result<()> {
        let count = self.years.len().max(1);
        self.select_year_index((self.selected + 1) % count, now)
    }

    pub fn previous_year(&mut self, now: Instant) -> Result<()> {
        let count = self.years.len().max(1);
        self.select_year_index((self.selected + count - 1) % count, now)
    }

    /// Shows, moves or hides the tooltip for the pointer at (`column`, `row`).
    pub fn pointer_moved(&mut self, column: u16, row: u16, now: Instant) {
        for (panel, area) in self.panels.iter().zip(&self.chart_areas) {
            let chart = &panel.chart;
            let Some((x, y)) = cell_to_chart(*area, chart.x_bounds(), chart.y_bounds(), column, row) else {
                continue;
            };
            if let Some(hit) = chart.hit_test(x, y, now) {
                self.tooltip.show(hit.tooltip_lines());
                self.tooltip.move_to(column, row);
                return;
            }
        }
        self.tooltip.hide();
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip.hide();
    }

    pub fn focus_next_section(&mut self) {
        if !self.sections.is_empty() {
            self.focused_section = (self.focused_section + 1) % self.sections.len();
        }
    }

    pub fn toggle_focused_section(&mut self) {
        if let Some(section) = self.sections.get_mut(self.focused_section) {
            section.toggle();
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.panels.iter().any(|p| p.chart.is_animating(now))
    }

    pub fn tick(&mut self, now: Instant) {
        for panel in &mut self.panels {
            panel.chart.tick(now);
        }
    }

    /// Snapshots after every running transition has finished.
    pub fn settled_snapshots(&mut self, now: Instant) -> Vec<ChartSnapshot> {
        let settle = self
            .panels
            .iter()
            .map(|p| p.chart.bar_settle_time())
            .max()
            .unwrap_or_default();
        let later = now + settle;
        self.tick(later);
        self.panels.iter().map(|p| p.chart.snapshot(later)).collect()
    }

    /// Where each chart's plotting canvas was last drawn.
    pub fn set_chart_areas(&mut self, areas: Vec<Rect>) {
        self.chart_areas = areas;
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn years(&self) -> &[YearConfig] {
        &self.years
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn sections(&self) -> &[Disclosure] {
        &self.sections
    }

    pub fn focused_section(&self) -> usize {
        self.focused_section
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }
}

/// Maps a terminal cell inside `area` to chart coordinates.
pub fn cell_to_chart(area: Rect, x_bounds: [f64; 2], y_bounds: [f64; 2], column: u16, row: u16) -> Option<(f64, f64)> {
    let inside = column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height);
    if !inside {
        return None;
    }
    let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
    let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
    Some((
        x_bounds[0] + fx * (x_bounds[1] - x_bounds[0]),
        y_bounds[0] + fy * (y_bounds[1] - y_bounds[0]),
    ))
}
