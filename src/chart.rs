//! One population pyramid and its animated state.
//!
//! Coordinates are chart units inside the margins: `x` grows to the right
//! from the left edge of the plotting area, `y` grows downwards from its top
//! edge. Bars are keyed by age group so that a year change moves existing
//! bars instead of replacing them.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::age_bucket;
use crate::config::{ChartConfig, Margin};
use crate::dataset::{Dataset, MedianAgeTable, PyramidRow};
use crate::error::Result;
use crate::scale::{BandScale, LinearScale};
use crate::transition::Tween;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartState {
    Uninitialized,
    Rendered(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub label: String,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub side: Side,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Title, axes and legend. Built on the first render and never touched again.
#[derive(Debug, Clone, PartialEq)]
pub struct Chrome {
    pub title: String,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone)]
struct Bar {
    id: u64,
    row: PyramidRow,
    y: f64,
    height: f64,
    x: Tween,
    width: Tween,
    exiting: bool,
}

#[derive(Debug, Clone)]
struct MedianMarker {
    age_group: String,
    y: Tween,
    label: String,
}

/// Bar geometry sampled at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub id: u64,
    pub side: Side,
    pub age_group: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub exiting: bool,
}

impl BarGeometry {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (left, right) = if self.width < 0.0 {
            (self.x + self.width, self.x)
        } else {
            (self.x, self.x + self.width)
        };
        x >= left && x <= right && y >= self.y && y <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedianGeometry {
    pub age_group: String,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub bars: Vec<BarGeometry>,
    pub median: Option<MedianGeometry>,
}

/// Which keys a render created, kept or scheduled for removal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutcome {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
    pub median_bucket: Option<String>,
}

/// The bar under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<'a> {
    pub side: Side,
    pub row: &'a PyramidRow,
}

impl Hit<'_> {
    pub fn tooltip_lines(&self) -> Vec<String> {
        let value = match self.side {
            Side::Male => format!("Male: {}%", self.row.percent_male.abs()),
            Side::Female => format!("Female: {}%", self.row.percent_female),
        };
        vec![self.row.age_group.clone(), value]
    }
}

pub struct PyramidChart {
    id: String,
    title: String,
    config: ChartConfig,
    x: LinearScale,
    y: BandScale,
    state: ChartState,
    chrome: Option<Chrome>,
    male: Vec<Bar>,
    female: Vec<Bar>,
    median: Option<MedianMarker>,
    next_id: u64,
}

impl PyramidChart {
    /// `age_groups` fixes the vertical bands for the life of the chart.
    pub fn new(id: &str, title: &str, config: &ChartConfig, age_groups: Vec<String>) -> Self {
        let x = LinearScale::new(config.x_domain, [0.0, config.inner_width()]);
        let y = BandScale::new(age_groups, [config.inner_height(), 0.0], config.band_padding);
        PyramidChart {
            id: id.to_string(),
            title: title.to_string(),
            config: config.clone(),
            x,
            y,
            state: ChartState::Uninitialized,
            chrome: None,
            male: Vec::new(),
            female: Vec::new(),
            median: None,
            next_id: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn chrome(&self) -> Option<&Chrome> {
        self.chrome.as_ref()
    }

    pub fn inner_size(&self) -> (f64, f64) {
        (self.config.inner_width(), self.config.inner_height())
    }

    pub fn margin(&self) -> Margin {
        self.config.margin
    }

    /// Horizontal extent including margins, in chart coordinates.
    pub fn x_bounds(&self) -> [f64; 2] {
        let margin = self.config.margin;
        [-margin.left, self.config.inner_width() + margin.right]
    }

    /// Vertical extent including margins, top first.
    pub fn y_bounds(&self) -> [f64; 2] {
        let margin = self.config.margin;
        [-margin.top, self.config.inner_height() + margin.bottom]
    }

    pub fn bar_settle_time(&self) -> Duration {
        self.config.bar_duration().max(self.config.median_duration())
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x
    }

    /// Draws `year` from `dataset`, animating from whatever is on screen.
    ///
    /// Fails with `UnknownYear` when either table lacks the year; the chart is
    /// left untouched in that case.
    pub fn render(
        &mut self,
        year: &str,
        dataset: &Dataset,
        medians: &MedianAgeTable,
        now: Instant,
    ) -> Result<RenderOutcome> {
        let rows = dataset.rows(year)?;
        let median_age = medians.age(year)?;
        let median_label = medians.label(year).unwrap_or_default().to_string();

        if self.chrome.is_none() {
            self.chrome = Some(self.build_chrome());
        }

        let placed: Vec<(PyramidRow, f64)> = rows
            .into_iter()
            .filter_map(|row| match self.y.position(&row.age_group) {
                Some(y) => Some((row, y)),
                None => {
                    warn!(chart = %self.id, age_group = %row.age_group, "age group outside chart bands");
                    None
                }
            })
            .collect();

        let zero = self.x.scale(0.0);
        let x = self.x;
        let duration = self.config.bar_duration();
        let height = self.y.bandwidth();

        let outcome = reconcile(
            &mut self.male,
            &placed,
            |row| {
                let left = x.scale(row.percent_male_negative);
                (left, zero - left)
            },
            BarPlacement { zero, height, duration, now },
            &mut self.next_id,
        );
        reconcile(
            &mut self.female,
            &placed,
            |row| (zero, x.scale(row.percent_female) - zero),
            BarPlacement { zero, height, duration, now },
            &mut self.next_id,
        );

        let labels: Vec<&str> = placed.iter().map(|(row, _)| row.age_group.as_str()).collect();
        let bucket = age_bucket::closest(median_age, &labels).map(str::to_string);
        self.place_median(bucket.as_deref(), median_label, now);

        debug!(
            chart = %self.id,
            year,
            entered = outcome.entered.len(),
            updated = outcome.updated.len(),
            exited = outcome.exited.len(),
            median = ?bucket,
            "rendered"
        );
        self.state = ChartState::Rendered(year.to_string());
        Ok(RenderOutcome {
            median_bucket: bucket,
            ..outcome
        })
    }

    fn place_median(&mut self, bucket: Option<&str>, label: String, now: Instant) {
        let centre = bucket.and_then(|b| self.y.position(b).map(|y| (b, y + self.y.bandwidth() / 2.0)));
        let Some((bucket, y)) = centre else {
            self.median = None;
            return;
        };
        let duration = self.config.median_duration();
        if let Some(marker) = self.median.as_mut() {
            marker.y.retarget(y, now, duration);
            marker.age_group = bucket.to_string();
            marker.label = label;
            return;
        }
        self.median = Some(MedianMarker {
            age_group: bucket.to_string(),
            y: Tween::fixed(y, now),
            label,
        });
    }

    fn build_chrome(&self) -> Chrome {
        let width = self.config.inner_width();
        let x_ticks = self
            .x
            .ticks(self.config.x_ticks)
            .into_iter()
            .map(|v| Tick {
                label: format!("{}%", v.abs()),
                position: self.x.scale(v),
            })
            .collect();
        let y_ticks = self
            .y
            .domain()
            .iter()
            .filter_map(|label| {
                self.y.position(label).map(|y| Tick {
                    label: label.clone(),
                    position: y + self.y.bandwidth() / 2.0,
                })
            })
            .collect();
        Chrome {
            title: self.title.clone(),
            x_ticks,
            y_ticks,
            legend: vec![
                LegendEntry {
                    label: "Male",
                    side: Side::Male,
                    x: width - 100.0,
                    y: 0.0,
                    size: 15.0,
                },
                LegendEntry {
                    label: "Female",
                    side: Side::Female,
                    x: width - 100.0,
                    y: 20.0,
                    size: 15.0,
                },
            ],
        }
    }

    /// Drops exiting bars whose shrink animation has finished.
    pub fn tick(&mut self, now: Instant) {
        let finished = |bar: &Bar| bar.exiting && bar.width.is_settled(now);
        self.male.retain(|bar| !finished(bar));
        self.female.retain(|bar| !finished(bar));
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.male
            .iter()
            .chain(self.female.iter())
            .any(|bar| !bar.x.is_settled(now) || !bar.width.is_settled(now))
            || self.median.as_ref().map_or(false, |m| !m.y.is_settled(now))
    }

    pub fn bars(&self, now: Instant) -> Vec<BarGeometry> {
        self.male
            .iter()
            .map(|bar| bar.sample(Side::Male, now))
            .chain(self.female.iter().map(|bar| bar.sample(Side::Female, now)))
            .collect()
    }

    pub fn median(&self, now: Instant) -> Option<MedianGeometry> {
        self.median.as_ref().map(|m| MedianGeometry {
            age_group: m.age_group.clone(),
            y: m.y.value_at(now),
            label: format!("Median Age: {}", m.label),
        })
    }

    /// Bar under chart coordinate (`x`, `y`). Exiting bars are ignored.
    pub fn hit_test(&self, x: f64, y: f64, now: Instant) -> Option<Hit<'_>> {
        hit_side(&self.male, Side::Male, x, y, now).or_else(|| hit_side(&self.female, Side::Female, x, y, now))
    }

    pub fn snapshot(&self, now: Instant) -> ChartSnapshot {
        ChartSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            year: match &self.state {
                ChartState::Rendered(year) => Some(year.clone()),
                ChartState::Uninitialized => None,
            },
            bars: self.bars(now),
            median: self.median(now),
        }
    }
}

impl Bar {
    fn sample(&self, side: Side, now: Instant) -> BarGeometry {
        BarGeometry {
            id: self.id,
            side,
            age_group: self.row.age_group.clone(),
            x: self.x.value_at(now),
            y: self.y,
            width: self.width.value_at(now),
            height: self.height,
            exiting: self.exiting,
        }
    }
}

fn hit_side(bars: &[Bar], side: Side, x: f64, y: f64, now: Instant) -> Option<Hit<'_>> {
    bars.iter()
        .filter(|bar| !bar.exiting)
        .find(|bar| bar.sample(side, now).contains(x, y))
        .map(|bar| Hit { side, row: &bar.row })
}

#[derive(Clone, Copy)]
struct BarPlacement {
    zero: f64,
    height: f64,
    duration: Duration,
    now: Instant,
}

/// Keyed enter / update / exit of one side's bars.
fn reconcile<F>(
    bars: &mut Vec<Bar>,
    rows: &[(PyramidRow, f64)],
    extent: F,
    placement: BarPlacement,
    next_id: &mut u64,
) -> RenderOutcome
where
    F: Fn(&PyramidRow) -> (f64, f64),
{
    let BarPlacement {
        zero,
        height,
        duration,
        now,
    } = placement;
    let mut outcome = RenderOutcome::default();

    for (row, y) in rows {
        let (x, width) = extent(row);
        match bars.iter_mut().find(|bar| bar.row.age_group == row.age_group) {
            Some(bar) => {
                bar.row = row.clone();
                bar.y = *y;
                bar.height = height;
                bar.exiting = false;
                bar.x.retarget(x, now, duration);
                bar.width.retarget(width, now, duration);
                outcome.updated.push(row.age_group.clone());
            }
            None => {
                let mut bar = Bar {
                    id: *next_id,
                    row: row.clone(),
                    y: *y,
                    height,
                    x: Tween::fixed(zero, now),
                    width: Tween::fixed(0.0, now),
                    exiting: false,
                };
                *next_id += 1;
                bar.x.retarget(x, now, duration);
                bar.width.retarget(width, now, duration);
                bars.push(bar);
                outcome.entered.push(row.age_group.clone());
            }
        }
    }

    for bar in bars.iter_mut() {
        let keep = rows.iter().any(|(row, _)| row.age_group == bar.row.age_group);
        if !keep && !bar.exiting {
            bar.exiting = true;
            bar.width.retarget(0.0, now, duration);
            outcome.exited.push(bar.row.age_group.clone());
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::normalizer::{RawRecord, RenameTable};
    use std::collections::BTreeMap;

    const SETTLED: Duration = Duration::from_secs(5);

    fn row(age_group: &str, male: f64, female: f64) -> RawRecord {
        [
            ("Age Group", age_group.to_string()),
            ("Percent Male", male.to_string()),
            ("Percent Male (Negative)", (-male).to_string()),
            ("Percent Female", female.to_string()),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }

    fn fixture() -> (Dataset, MedianAgeTable) {
        let dataset = Dataset::from_tables(
            vec![
                (
                    "0".to_string(),
                    vec![
                        row("Under 5 years", 10.0, 10.0),
                        row("35 to 39 years", 8.0, 9.0),
                        row("85 years and over", 1.0, 2.0),
                    ],
                ),
                (
                    "1".to_string(),
                    vec![row("35 to 39 years", 7.0, 7.5), row("85 years and over", 2.0, 3.0)],
                ),
                ("2".to_string(), vec![]),
                (
                    "3".to_string(),
                    vec![row("Under 5 years", 5.0, 5.0), row("35 to 39 years", 6.0, 6.0)],
                ),
            ],
            &RenameTable::default(),
        );
        let medians: BTreeMap<String, String> = [("0", "37.3"), ("1", "80"), ("2", "40"), ("3", "1.0")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        (dataset, MedianAgeTable::new(medians))
    }

    fn chart(dataset: &Dataset) -> PyramidChart {
        PyramidChart::new("1", "Test", &ChartConfig::default(), dataset.age_groups("0"))
    }

    fn bar<'a>(bars: &'a [BarGeometry], side: Side, age_group: &str) -> Option<&'a BarGeometry> {
        bars.iter().find(|b| b.side == side && b.age_group == age_group)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_render_draws_bars_at_scaled_extents() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();
        let outcome = chart.render("0", &dataset, &medians, t0).unwrap();

        assert_eq!(outcome.entered.len(), 3);
        assert_eq!(chart.state(), &ChartState::Rendered("0".to_string()));

        let x = *chart.x_scale();
        let bars = chart.bars(t0 + SETTLED);
        let male = bar(&bars, Side::Male, "Under 5 years").unwrap();
        assert!(close(male.x, x.scale(-10.0)));
        assert!(close(male.x + male.width, x.scale(0.0)));
        let female = bar(&bars, Side::Female, "Under 5 years").unwrap();
        assert!(close(female.x, x.scale(0.0)));
        assert!(close(female.x + female.width, x.scale(10.0)));

        let median = chart.median(t0).unwrap();
        assert_eq!(median.age_group, "35 to 39 years");
        assert_eq!(median.label, "Median Age: 37.3");
        let band = bar(&bars, Side::Male, "35 to 39 years").unwrap();
        assert!(close(median.y, band.y + band.height / 2.0));
    }

    #[test]
    fn entering_bars_grow_from_zero() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();
        chart.render("0", &dataset, &medians, t0).unwrap();

        let zero = chart.x_scale().scale(0.0);
        for geometry in chart.bars(t0) {
            assert!(close(geometry.x, zero));
            assert_eq!(geometry.width, 0.0);
        }
        assert!(chart.is_animating(t0));
        assert!(!chart.is_animating(t0 + SETTLED));
    }

    #[test]
    fn year_change_enters_updates_and_exits_by_age_group() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();
        chart.render("1", &dataset, &medians, t0).unwrap();
        let before = chart.bars(t0 + SETTLED);

        let t1 = t0 + SETTLED;
        let outcome = chart.render("3", &dataset, &medians, t1).unwrap();
        assert_eq!(outcome.entered, vec!["Under 5 years"]);
        assert_eq!(outcome.updated, vec!["35 to 39 years"]);
        assert_eq!(outcome.exited, vec!["85 years and over"]);

        let during = chart.bars(t1);
        let kept_before = bar(&before, Side::Female, "35 to 39 years").unwrap();
        let kept_during = bar(&during, Side::Female, "35 to 39 years").unwrap();
        assert_eq!(kept_before.id, kept_during.id);
        assert!(close(kept_before.width, kept_during.width));

        let entering = bar(&during, Side::Male, "Under 5 years").unwrap();
        assert_eq!(entering.width, 0.0);
        assert!(bar(&during, Side::Male, "85 years and over").unwrap().exiting);

        let t2 = t1 + SETTLED;
        chart.tick(t2);
        let after = chart.bars(t2);
        assert!(bar(&after, Side::Male, "85 years and over").is_none());
        assert!(bar(&after, Side::Female, "85 years and over").is_none());
        assert_eq!(after.len(), 4);
    }

    #[test]
    fn returning_bar_is_revived_before_removal() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();
        chart.render("0", &dataset, &medians, t0).unwrap();
        let id = bar(&chart.bars(t0), Side::Male, "Under 5 years").unwrap().id;

        let t1 = t0 + SETTLED;
        chart.render("1", &dataset, &medians, t1).unwrap();
        let t2 = t1 + Duration::from_millis(200);
        let outcome = chart.render("0", &dataset, &medians, t2).unwrap();
        chart.tick(t2 + SETTLED);

        assert!(outcome.updated.contains(&"Under 5 years".to_string()));
        let revived = chart.bars(t2 + SETTLED);
        let revived = bar(&revived, Side::Male, "Under 5 years").unwrap();
        assert_eq!(revived.id, id);
        assert!(!revived.exiting);
    }

    #[test]
    fn rendering_same_year_twice_matches_once() {
        let (dataset, medians) = fixture();
        let t0 = Instant::now();

        let mut once = chart(&dataset);
        once.render("0", &dataset, &medians, t0).unwrap();

        let mut twice = chart(&dataset);
        twice.render("0", &dataset, &medians, t0).unwrap();
        twice
            .render("0", &dataset, &medians, t0 + Duration::from_millis(300))
            .unwrap();

        let done = t0 + SETTLED;
        once.tick(done);
        twice.tick(done);
        assert_eq!(once.snapshot(done), twice.snapshot(done));
    }

    #[test]
    fn empty_year_renders_nothing() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();
        chart.render("0", &dataset, &medians, t0).unwrap();
        let outcome = chart.render("2", &dataset, &medians, t0 + SETTLED).unwrap();

        assert_eq!(outcome.exited.len(), 3);
        assert_eq!(outcome.median_bucket, None);
        chart.tick(t0 + SETTLED * 2);
        assert!(chart.bars(t0 + SETTLED * 2).is_empty());
        assert!(chart.median(t0 + SETTLED * 2).is_none());
    }

    #[test]
    fn unknown_year_leaves_chart_untouched() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();

        assert!(matches!(
            chart.render("9", &dataset, &medians, t0),
            Err(Error::UnknownYear(year)) if year == "9"
        ));
        assert_eq!(chart.state(), &ChartState::Uninitialized);
        assert!(chart.chrome().is_none());

        chart.render("0", &dataset, &medians, t0).unwrap();
        let before = chart.snapshot(t0 + SETTLED);
        let only_in_medians = MedianAgeTable::new(
            [("7".to_string(), "30".to_string())].into_iter().collect(),
        );
        assert!(chart.render("7", &dataset, &only_in_medians, t0).is_err());
        assert_eq!(chart.snapshot(t0 + SETTLED), before);
    }

    #[test]
    fn chrome_is_built_once() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();
        chart.render("0", &dataset, &medians, t0).unwrap();
        let chrome = chart.chrome().unwrap().clone();
        chart.render("1", &dataset, &medians, t0).unwrap();

        assert_eq!(chart.chrome(), Some(&chrome));
        assert_eq!(chrome.title, "Test");
        let labels: Vec<&str> = chrome.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["20%", "10%", "0%", "10%", "20%"]);
        assert_eq!(chrome.y_ticks.len(), 3);
        assert_eq!(chrome.legend.len(), 2);
    }

    #[test]
    fn median_line_moves_on_year_change() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();
        chart.render("0", &dataset, &medians, t0).unwrap();
        let start = chart.median(t0).unwrap().y;

        let t1 = t0 + SETTLED;
        chart.render("1", &dataset, &medians, t1).unwrap();
        let moving = chart.median(t1).unwrap();
        assert_eq!(moving.label, "Median Age: 80");
        assert_eq!(moving.age_group, "85 years and over");
        assert!(close(moving.y, start));

        let end = chart.median(t1 + Duration::from_millis(800)).unwrap().y;
        assert!(end < start);
    }

    #[test]
    fn hit_test_finds_bar_and_builds_tooltip() {
        let (dataset, medians) = fixture();
        let mut chart = chart(&dataset);
        let t0 = Instant::now();
        chart.render("0", &dataset, &medians, t0).unwrap();
        let done = t0 + SETTLED;
        let bars = chart.bars(done);
        let male = bar(&bars, Side::Male, "Under 5 years").unwrap();
        let female = bar(&bars, Side::Female, "Under 5 years").unwrap();

        let hit = chart
            .hit_test(male.x + 1.0, male.y + male.height / 2.0, done)
            .unwrap();
        assert_eq!(hit.side, Side::Male);
        assert_eq!(hit.tooltip_lines(), vec!["Under 5 years", "Male: 10%"]);

        let hit = chart
            .hit_test(female.x + female.width - 1.0, female.y + 1.0, done)
            .unwrap();
        assert_eq!(hit.tooltip_lines(), vec!["Under 5 years", "Female: 10%"]);

        assert!(chart.hit_test(-50.0, -50.0, done).is_none());
    }

    #[test]
    fn rows_outside_the_bands_are_skipped() {
        let (dataset, medians) = fixture();
        let mut chart = PyramidChart::new(
            "2",
            "Narrow",
            &ChartConfig::default(),
            vec!["35 to 39 years".to_string()],
        );
        let outcome = chart.render("0", &dataset, &medians, Instant::now()).unwrap();

        assert_eq!(outcome.entered, vec!["35 to 39 years"]);
        assert_eq!(outcome.median_bucket.as_deref(), Some("35 to 39 years"));
    }
}
