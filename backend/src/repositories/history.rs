//! History repository backed by an XML file
//!
//! The file holds one `<history>` root with an `<entry>` child per result.
//! Every field is stored as text and parsed on read, which keeps files
//! written with Polish labels readable.
//!
//! The store owns the in-memory list. `record` and `clear` are the only
//! ways to change it, and both rewrite the whole file.

use bmi_calculator_shared::{
    decimal_text, BmiCategory, Gender, HistoryEntry, HISTORY_DATE_FORMAT,
};
use chrono::NaiveDateTime;
use quick_xml::de::DeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// History file could not be read or written
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to read history file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write history file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed history file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: DeError,
    },

    #[error("Failed to encode history: {0}")]
    Encode(#[source] DeError),
}

/// `<entry>` element as it appears on disk
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct HistoryRecord {
    date: String,
    bmi: String,
    category: String,
    weight: String,
    height: String,
    age: String,
    gender: String,
}

/// `<history>` root element
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "history")]
struct HistoryDocument {
    #[serde(rename = "entry", default)]
    entries: Vec<HistoryRecord>,
}

impl From<&HistoryEntry> for HistoryRecord {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            date: entry.date_text(),
            bmi: decimal_text(entry.bmi),
            category: entry.category.label().to_string(),
            weight: decimal_text(entry.weight_kg),
            height: decimal_text(entry.height_cm),
            age: entry.age_years.to_string(),
            gender: entry.gender.label().to_string(),
        }
    }
}

impl HistoryRecord {
    fn into_entry(self) -> Result<HistoryEntry, String> {
        let number = |name: &str, value: &str| -> Result<f64, String> {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid {}: {:?}", name, value))
        };

        Ok(HistoryEntry {
            recorded_at: NaiveDateTime::parse_from_str(self.date.trim(), HISTORY_DATE_FORMAT)
                .map_err(|_| format!("invalid date: {:?}", self.date))?,
            bmi: number("bmi", &self.bmi)?,
            category: self.category.parse::<BmiCategory>()?,
            weight_kg: number("weight", &self.weight)?,
            height_cm: number("height", &self.height)?,
            age_years: self
                .age
                .trim()
                .parse()
                .map_err(|_| format!("invalid age: {:?}", self.age))?,
            gender: self.gender.parse::<Gender>()?,
        })
    }
}

/// Bounded, file-backed list of past results
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Open the store and load whatever the file currently holds
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let mut store = Self {
            path: path.into(),
            capacity,
            entries: Vec::new(),
        };
        store.entries = store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Read the file. A missing or blank file is an empty history.
    ///
    /// Entries that fail to parse are skipped with a warning; a file that
    /// is not valid XML fails as a whole.
    pub fn read_entries(&self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: HistoryDocument =
            quick_xml::de::from_str(&text).map_err(|source| PersistenceError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        let entries = document
            .entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match record.into_entry() {
                Ok(entry) => Some(entry),
                Err(reason) => {
                    warn!(path = %self.path.display(), index, %reason, "Skipping malformed history entry");
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    /// Read the file, falling back to an empty history on failure
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.read_entries() {
            Ok(entries) => {
                debug!(path = %self.path.display(), count = entries.len(), "History loaded");
                entries
            }
            Err(e) => {
                warn!(error = %e, "Could not load history, starting empty");
                Vec::new()
            }
        }
    }

    /// Add an entry at the end and drop the oldest beyond `capacity`
    pub fn append(
        entry: HistoryEntry,
        mut current: Vec<HistoryEntry>,
        capacity: usize,
    ) -> Vec<HistoryEntry> {
        current.push(entry);
        if current.len() > capacity {
            let excess = current.len() - capacity;
            current.drain(..excess);
        }
        current
    }

    /// Overwrite the file with the given entries (at most `capacity`, newest kept)
    pub fn persist(&self, entries: &[HistoryEntry]) -> Result<(), PersistenceError> {
        let start = entries.len().saturating_sub(self.capacity);
        let document = HistoryDocument {
            entries: entries[start..].iter().map(HistoryRecord::from).collect(),
        };

        let body = quick_xml::se::to_string(&document).map_err(PersistenceError::Encode)?;
        let mut xml = String::with_capacity(XML_DECLARATION.len() + body.len() + 1);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&body);
        xml.push('\n');

        // Write next to the target and rename over it
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let write_error = |source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, xml).map_err(write_error)?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_error(source));
        }

        debug!(path = %self.path.display(), count = document.entries.len(), "History persisted");
        Ok(())
    }

    /// Append an entry and persist. Memory is only updated once the file
    /// has been written.
    pub fn record(&mut self, entry: HistoryEntry) -> Result<(), PersistenceError> {
        let updated = Self::append(entry, self.entries.clone(), self.capacity);
        self.persist(&updated)?;
        self.entries = updated;
        Ok(())
    }

    /// Remove every entry
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.persist(&[])?;
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmi_calculator_shared::HISTORY_CAPACITY;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn entry(minute: u32) -> HistoryEntry {
        HistoryEntry {
            recorded_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(10, minute, 0)
                .unwrap(),
            bmi: 20.0 + minute as f64 / 10.0,
            category: BmiCategory::Normal,
            weight_kg: 70.5,
            height_cm: 175.0,
            age_years: 30,
            gender: Gender::Female,
        }
    }

    fn store_in(dir: &TempDir) -> HistoryStore {
        HistoryStore::open(dir.path().join("bmi_history.xml"), HISTORY_CAPACITY)
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.entries().is_empty());
        assert!(store.read_entries().unwrap().is_empty());
    }

    #[test]
    fn test_record_then_reload_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.record(entry(1)).unwrap();
        store.record(entry(2)).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.entries(), &[entry(1), entry(2)]);
    }

    #[test]
    fn test_whole_numbers_are_written_with_one_decimal() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.record(entry(0)).unwrap();

        let xml = fs::read_to_string(store.path()).unwrap();
        assert!(xml.contains("<bmi>20.0</bmi>"));
        assert!(xml.contains("<weight>70.5</weight>"));
        assert!(xml.contains("<height>175.0</height>"));
    }

    #[test]
    fn test_eleventh_entry_evicts_oldest() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        for minute in 0..11 {
            store.record(entry(minute)).unwrap();
        }

        let expected: Vec<_> = (1..11).map(entry).collect();
        assert_eq!(store.entries(), expected.as_slice());
        assert_eq!(store.load(), expected);
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.record(entry(1)).unwrap();

        store.clear().unwrap();

        assert!(store.entries().is_empty());
        assert!(store.load().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn test_reads_file_written_by_desktop_app() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bmi_history.xml");
        fs::write(
            &path,
            "<history><entry><date>2024-03-02 18:21:07</date><bmi>26.12</bmi>\
             <category>Nadwaga</category><weight>80.0</weight><height>175.0</height>\
             <age>41</age><gender>M&#281;&#380;czyzna</gender></entry></history>",
        )
        .unwrap();

        let store = HistoryStore::open(&path, HISTORY_CAPACITY);

        assert_eq!(store.entries().len(), 1);
        let legacy = &store.entries()[0];
        assert_eq!(legacy.category, BmiCategory::Overweight);
        assert_eq!(legacy.gender, Gender::Male);
        assert_eq!(legacy.bmi, 26.12);
        assert_eq!(legacy.weight_kg, 80.0);
        assert_eq!(legacy.age_years, 41);
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bmi_history.xml");
        fs::write(
            &path,
            "<history>\
             <entry><date>yesterday</date><bmi>22</bmi><category>Normal</category>\
             <weight>70</weight><height>175</height><age>30</age><gender>Male</gender></entry>\
             <entry><date>2024-05-01 10:00:00</date><bmi>22</bmi><category>Normal</category>\
             <weight>70</weight><height>175</height><age>30</age><gender>Male</gender></entry>\
             </history>",
        )
        .unwrap();

        let store = HistoryStore::open(&path, HISTORY_CAPACITY);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].date_text(), "2024-05-01 10:00:00");
    }

    #[test]
    fn test_broken_xml_is_reported_and_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bmi_history.xml");
        fs::write(&path, "<history><entry><date>2024-05-01 10:00:00</date>").unwrap();

        let store = HistoryStore::open(&path, HISTORY_CAPACITY);

        assert!(store.entries().is_empty());
        assert!(matches!(
            store.read_entries(),
            Err(PersistenceError::Malformed { .. })
        ));
    }

    #[test]
    fn test_blank_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bmi_history.xml");
        fs::write(&path, "  \n").unwrap();

        assert!(HistoryStore::open(&path, HISTORY_CAPACITY)
            .read_entries()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("bmi_history.xml");
        let mut store = HistoryStore::open(&path, HISTORY_CAPACITY);

        let err = store.record(entry(1)).unwrap_err();

        assert!(matches!(err, PersistenceError::Write { .. }));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_persist_keeps_newest_when_given_too_many() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::open(dir.path().join("h.xml"), 3);
        let entries: Vec<_> = (0..5).map(entry).collect();

        store.persist(&entries).unwrap();

        assert_eq!(store.load(), entries[2..].to_vec());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: append never exceeds capacity and keeps the newest entries in order
        #[test]
        fn prop_append_bounded(existing in 0usize..15, capacity in 1usize..12) {
            let current: Vec<_> = (0..existing as u32).map(entry).collect();
            let added = entry(existing as u32);

            let result = HistoryStore::append(added.clone(), current.clone(), capacity);

            let mut all = current;
            all.push(added);
            let keep = all.len().min(capacity);
            prop_assert_eq!(result.len(), keep);
            prop_assert_eq!(&result[..], &all[all.len() - keep..]);
        }
    }
}
