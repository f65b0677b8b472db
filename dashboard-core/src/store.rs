use serde::Serialize;
use std::fmt;

use crate::model::WeatherRecord;

/// Identity of one appended record. Two records with the same city name still
/// get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId(u64);

impl RecordId {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: RecordId,
    pub record: WeatherRecord,
}

/// Insertion-ordered list of fetched records.
#[derive(Debug, Clone, Default)]
pub struct CityList {
    entries: Vec<Entry>,
    next_id: u64,
}

impl CityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the end. Name uniqueness is not checked.
    pub fn push(&mut self, record: WeatherRecord) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, record });
        id
    }

    /// Remove every entry named `name`, keeping the rest in order.
    /// Returns how many were removed.
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.record.name != name);
        before - self.entries.len()
    }

    pub fn get(&self, id: RecordId) -> Option<&WeatherRecord> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.record)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}
