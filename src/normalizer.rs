use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One CSV row keyed by its source column header.
pub type RawRecord = BTreeMap<String, String>;
/// One CSV row keyed by canonical field names.
pub type NormalizedRecord = BTreeMap<String, String>;

pub const AGE_GROUP: &str = "age_group";
pub const PERCENT_MALE: &str = "percent_male";
pub const PERCENT_FEMALE: &str = "percent_female";
pub const PERCENT_MALE_NEGATIVE: &str = "percent_male_negative";

const DEFAULT_COLUMNS: [(&str, &str); 8] = [
    ("Age Group", AGE_GROUP),
    ("Total", "total"),
    ("Percent", "percent"),
    ("Male", "male"),
    ("Percent Male", PERCENT_MALE),
    ("Female", "female"),
    ("Percent Female", PERCENT_FEMALE),
    ("Percent Male (Negative)", PERCENT_MALE_NEGATIVE),
];

/// Source header to canonical field name lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameTable {
    entries: BTreeMap<String, String>,
}

impl Default for RenameTable {
    fn default() -> Self {
        RenameTable::from_entries(DEFAULT_COLUMNS.iter().map(|(from, to)| (from.to_string(), to.to_string())))
    }
}

impl RenameTable {
    pub fn from_entries<I: IntoIterator<Item = (String, String)>>(entries: I) -> Self {
        RenameTable {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn canonical_name<'a>(&'a self, header: &'a str) -> &'a str {
        self.entries.get(header).map(String::as_str).unwrap_or(header)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub fn normalize(record: &RawRecord, table: &RenameTable) -> NormalizedRecord {
    record
        .iter()
        .map(|(key, value)| (table.canonical_name(key).to_string(), value.clone()))
        .collect()
}

pub fn normalize_all(records: &[RawRecord], table: &RenameTable) -> Vec<NormalizedRecord> {
    records.iter().map(|record| normalize(record, table)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn default_table_has_eight_columns() {
        assert_eq!(RenameTable::default().len(), 8);
    }

    #[test]
    fn mapped_headers_are_renamed_with_values_kept() {
        let table = RenameTable::default();
        let record = raw(&[
            ("Age Group", "20 to 24 years"),
            ("Percent Male", "3.1"),
            ("Percent Male (Negative)", "-3.1"),
            ("Percent Female", "3.4"),
        ]);
        let normalized = normalize(&record, &table);

        assert_eq!(normalized[AGE_GROUP], "20 to 24 years");
        assert_eq!(normalized[PERCENT_MALE], "3.1");
        assert_eq!(normalized[PERCENT_MALE_NEGATIVE], "-3.1");
        assert_eq!(normalized[PERCENT_FEMALE], "3.4");
        assert!(!normalized.contains_key("Age Group"));
    }

    #[test]
    fn unmapped_headers_pass_through() {
        let table = RenameTable::default();
        let record = raw(&[("Age Group", "Under 5 years"), ("Planning Area", "Pasir Ris")]);
        let normalized = normalize(&record, &table);

        assert_eq!(normalized["Planning Area"], "Pasir Ris");
        assert_eq!(normalized.len(), 2);
    }

    #[test]
    fn normalizing_canonical_record_is_identity() {
        let table = RenameTable::default();
        let record = raw(&[("Age Group", "Under 5 years"), ("Total", "1200"), ("Female", "590")]);
        let once = normalize(&record, &table);
        let twice = normalize(&once, &table);

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_record_normalizes_to_empty() {
        assert!(normalize(&RawRecord::new(), &RenameTable::default()).is_empty());
    }

    #[test]
    fn custom_table_is_honoured() {
        let table = RenameTable::from_entries(vec![("Group".to_string(), AGE_GROUP.to_string())]);
        let all = normalize_all(&[raw(&[("Group", "a")]), raw(&[("Group", "b")])], &table);

        assert_eq!(all.len(), 2);
        assert_eq!(all[1][AGE_GROUP], "b");
    }
}
