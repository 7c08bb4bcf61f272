//! Pet stat records and the ordered record set.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Which of the two stat snapshots a line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    /// Level 1 stats.
    Initial,
    /// Per-level growth.
    Growth,
}

impl StatKind {
    /// Key used for this snapshot in the persisted JSON.
    #[must_use]
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::Initial => "s0",
            Self::Growth => "sg",
        }
    }
}

/// The four tracked attributes: hp, attack, defense and agility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: f64,
    pub atk: f64,
    pub def: f64,
    pub agi: f64,
}

impl StatBlock {
    /// Attribute names in serialization order.
    pub const FIELDS: [&'static str; 4] = ["hp", "atk", "def", "agi"];

    #[must_use]
    pub const fn new(hp: f64, atk: f64, def: f64, agi: f64) -> Self {
        Self { hp, atk, def, agi }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub s0: StatBlock,
    pub sg: StatBlock,
}

impl PetRecord {
    #[must_use]
    pub const fn get(&self, kind: StatKind) -> &StatBlock {
        match kind {
            StatKind::Initial => &self.s0,
            StatKind::Growth => &self.sg,
        }
    }
}

/// Records keyed by pet name, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    entries: Vec<(String, PetRecord)>,
    index: HashMap<String, usize>,
}

impl RecordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `name`. A replaced record keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, record: PetRecord) {
        let name = name.into();
        if let Some(&idx) = self.index.get(&name) {
            self.entries[idx].1 = record;
        } else {
            self.index.insert(name.clone(), self.entries.len());
            self.entries.push((name, record));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PetRecord> {
        self.index.get(name).map(|&idx| &self.entries[idx].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PetRecord)> {
        self.entries.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, PetRecord)> for RecordSet {
    fn from_iter<I: IntoIterator<Item = (String, PetRecord)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, record) in iter {
            set.insert(name, record);
        }
        set
    }
}

impl Serialize for RecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}
