use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{Error, Result};
use crate::normalizer::{
    normalize_all, NormalizedRecord, RawRecord, RenameTable, AGE_GROUP, PERCENT_FEMALE, PERCENT_MALE,
    PERCENT_MALE_NEGATIVE,
};

/// Normalized tables of one series, keyed by year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    years: BTreeMap<String, Vec<NormalizedRecord>>,
}

impl Dataset {
    pub fn from_tables<I>(tables: I, columns: &RenameTable) -> Self
    where
        I: IntoIterator<Item = (String, Vec<RawRecord>)>,
    {
        Dataset {
            years: tables
                .into_iter()
                .map(|(year, records)| (year, normalize_all(&records, columns)))
                .collect(),
        }
    }

    pub fn records(&self, year: &str) -> Option<&[NormalizedRecord]> {
        self.years.get(year).map(Vec::as_slice)
    }

    /// Drawable rows for `year` in source order.
    ///
    /// Records lacking an age group or a numeric percentage are skipped.
    pub fn rows(&self, year: &str) -> Result<Vec<PyramidRow>> {
        let records = self
            .records(year)
            .ok_or_else(|| Error::UnknownYear(year.to_string()))?;
        Ok(records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| {
                let row = PyramidRow::from_record(record);
                if row.is_none() {
                    warn!(year, row = i, ?record, "skipping record without usable pyramid fields");
                }
                row
            })
            .collect())
    }

    pub fn age_groups(&self, year: &str) -> Vec<String> {
        self.records(year)
            .unwrap_or_default()
            .iter()
            .filter_map(|record| record.get(AGE_GROUP).cloned())
            .collect()
    }
}

/// Median age per year, kept as text until it is needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedianAgeTable {
    values: BTreeMap<String, String>,
}

impl MedianAgeTable {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        MedianAgeTable { values }
    }

    pub fn label(&self, year: &str) -> Option<&str> {
        self.values.get(year).map(String::as_str)
    }

    pub fn age(&self, year: &str) -> Result<f64> {
        let value = self
            .label(year)
            .ok_or_else(|| Error::UnknownYear(year.to_string()))?;
        parse_number(value).ok_or_else(|| Error::InvalidMedianAge {
            year: year.to_string(),
            value: value.to_string(),
        })
    }
}

/// The fields of a record that a pyramid chart draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidRow {
    pub age_group: String,
    pub percent_male: f64,
    pub percent_female: f64,
    pub percent_male_negative: f64,
}

impl PyramidRow {
    pub fn from_record(record: &NormalizedRecord) -> Option<PyramidRow> {
        let number = |field: &str| record.get(field).and_then(|v| parse_number(v));
        let age_group = record.get(AGE_GROUP)?.clone();
        let percent_male = number(PERCENT_MALE)?;
        let percent_female = number(PERCENT_FEMALE)?;
        let percent_male_negative = number(PERCENT_MALE_NEGATIVE).unwrap_or(-percent_male.abs());
        Some(PyramidRow {
            age_group,
            percent_male,
            percent_female,
            percent_male_negative,
        })
    }
}

/// Lenient number parsing: ignores surrounding blanks and a trailing `%`.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
