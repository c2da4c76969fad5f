//! Ordered select options.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::registry::ClassMap;

/// Value of the empty placeholder option.
pub const PLACEHOLDER_VALUE: &str = "";

/// A labelled group of class options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Unique key of the group within an option set.
    #[serde(skip)]
    pub key: String,
    /// Display label.
    pub label: String,
    /// Class name to option label.
    pub options: ClassMap,
}

impl OptionGroup {
    /// Create a group.
    pub fn new(key: impl Into<String>, label: impl Into<String>, options: ClassMap) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            options,
        }
    }
}

/// One entry of an option set: a single option or a group of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionEntry {
    /// A single selectable value.
    Single { value: String, label: String },
    /// A group of options.
    Group(OptionGroup),
}

impl OptionEntry {
    /// The empty placeholder option.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::Single {
            value: PLACEHOLDER_VALUE.to_string(),
            label: label.into(),
        }
    }

    /// Key of this entry within its option set.
    pub fn key(&self) -> &str {
        match self {
            Self::Single { value, .. } => value,
            Self::Group(group) => &group.key,
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Single { label, .. } => label,
            Self::Group(group) => &group.label,
        }
    }

    /// Check whether this is the empty placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Single { value, .. } if value == PLACEHOLDER_VALUE)
    }
}

/// An ordered collection of option entries with unique keys.
///
/// Adding an entry whose key is already present keeps the existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    entries: Vec<OptionEntry>,
}

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry unless its key is taken. Returns whether it was added.
    pub fn push(&mut self, entry: OptionEntry) -> bool {
        if self.contains_key(entry.key()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Append a group, or fold its options into the group already holding
    /// its key. Options already in that group keep their labels. Returns
    /// whether a new entry was added.
    pub fn push_group(&mut self, group: OptionGroup) -> bool {
        let existing = self.entries.iter_mut().find_map(|entry| match entry {
            OptionEntry::Group(existing) if existing.key == group.key => Some(existing),
            _ => None,
        });
        match existing {
            Some(existing) => {
                for (class, label) in group.options {
                    existing.options.entry(class).or_insert(label);
                }
                false
            }
            None => self.push(OptionEntry::Group(group)),
        }
    }

    /// Append every entry of `other` whose key is not already present.
    pub fn merge(&mut self, other: OptionSet) {
        for entry in other.entries {
            self.push(entry);
        }
    }

    /// Put the placeholder first, unless a placeholder already exists.
    pub fn prepend_placeholder(&mut self, label: impl Into<String>) {
        if self.placeholder().is_none() {
            self.entries.insert(0, OptionEntry::placeholder(label));
        }
    }

    /// Remove and return the placeholder.
    pub fn take_placeholder(&mut self) -> Option<OptionEntry> {
        let index = self.entries.iter().position(OptionEntry::is_placeholder)?;
        Some(self.entries.remove(index))
    }

    /// The placeholder entry, if present.
    pub fn placeholder(&self) -> Option<&OptionEntry> {
        self.entries.iter().find(|entry| entry.is_placeholder())
    }

    /// Check whether an entry with `key` exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key() == key)
    }

    /// Get an entry by key.
    pub fn get(&self, key: &str) -> Option<&OptionEntry> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Get a group by key.
    pub fn group(&self, key: &str) -> Option<&OptionGroup> {
        self.groups().find(|group| group.key == key)
    }

    /// Iterate over the groups in order.
    pub fn groups(&self) -> impl Iterator<Item = &OptionGroup> {
        self.entries.iter().filter_map(|entry| match entry {
            OptionEntry::Group(group) => Some(group),
            OptionEntry::Single { .. } => None,
        })
    }

    /// Check whether `class` is offered by any group.
    pub fn offers_class(&self, class: &str) -> bool {
        self.groups().any(|group| group.options.contains_key(class))
    }

    /// Keys of all entries in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(OptionEntry::key)
    }

    /// Iterate over all entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionEntry> {
        self.entries.iter()
    }

    /// Reverse the entry order.
    pub fn reverse(&mut self) {
        self.entries.reverse();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for OptionSet {
    type Item = OptionEntry;
    type IntoIter = std::vec::IntoIter<OptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<OptionEntry> for OptionSet {
    fn from_iter<I: IntoIterator<Item = OptionEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.push(entry);
        }
        set
    }
}

/// Serialized as an ordered object: `key -> label` for single options and
/// `key -> { "label": …, "options": { … } }` for groups.
impl Serialize for OptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            match entry {
                OptionEntry::Single { value, label } => map.serialize_entry(value, label)?,
                OptionEntry::Group(group) => map.serialize_entry(&group.key, group)?,
            }
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryValue {
    Label(String),
    Group { label: String, options: ClassMap },
}

struct OptionSetVisitor;

impl<'de> Visitor<'de> for OptionSetVisitor {
    type Value = OptionSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of option labels or option groups")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = OptionSet::new();
        while let Some((key, value)) = access.next_entry::<String, EntryValue>()? {
            let entry = match value {
                EntryValue::Label(label) => OptionEntry::Single { value: key, label },
                EntryValue::Group { label, options } => {
                    OptionEntry::Group(OptionGroup::new(key, label, options))
                }
            };
            set.push(entry);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OptionSetVisitor)
    }
}
