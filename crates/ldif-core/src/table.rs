//! Core types for representing parsed LDIF entries

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Attribute that opens a new entry
pub const DN: &str = "dn";

/// A single directory entry: attribute names mapped to values, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    attributes: Vec<(String, String)>,
}

impl Entry {
    /// Create a new empty entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the entry holds no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Look up an attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if an attribute is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The distinguished name, if one has been set
    pub fn dn(&self) -> Option<&str> {
        self.get(DN)
    }

    /// Set an attribute. A repeated name replaces the value but keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Attribute names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(k, _)| k.as_str())
    }

    /// Attribute pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// How columns are ordered when the attribute set is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Order of first appearance across all entries
    #[default]
    FirstSeen,
    /// Lexicographic by attribute name
    Sorted,
}

/// Union of all attribute names seen across a set of entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet {
    names: Vec<String>,
}

impl AttributeSet {
    /// Build the set from entries, keeping first-seen order
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut names: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for entry in entries {
            for key in entry.keys() {
                if seen.insert(key) {
                    names.push(key.to_string());
                }
            }
        }

        Self { names }
    }

    /// Get the number of distinct names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no names were seen
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check if a name is in the set
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Fix a column order for rendering
    pub fn columns(&self, order: ColumnOrder) -> Vec<&str> {
        let mut columns: Vec<&str> = self.iter().collect();
        if order == ColumnOrder::Sorted {
            columns.sort_unstable();
        }
        columns
    }
}

/// Parsed entries plus the union of their attribute names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Directory {
    /// Entries in the order they were closed, ending with the trailing entry
    pub entries: Vec<Entry>,
    /// All attribute names across `entries`
    pub attributes: AttributeSet,
}

impl Directory {
    /// Create a directory, deriving the attribute set from the entries
    pub fn new(entries: Vec<Entry>) -> Self {
        let attributes = AttributeSet::from_entries(&entries);
        Self {
            entries,
            attributes,
        }
    }

    /// Get the number of entries, including the trailing one
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Find an entry by distinguished name
    pub fn find_entry(&self, dn: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.dn() == Some(dn))
    }
}
