//! The scope-keyed class registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ScopeKey;
use crate::parser::{ClassAttributes, DeclarationScanner, parse_class_attributes};

/// Class name to option label, sorted by class name.
pub type ClassMap = BTreeMap<String, String>;

/// Every declared class, bucketed by scope key and by group.
///
/// A registry is built from the complete stylesheet text in one go and is
/// never updated in place. A changed stylesheet means a new registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRegistry {
    scopes: BTreeMap<ScopeKey, ClassMap>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    optgroups: BTreeMap<String, ClassMap>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every `marker` declaration in `text`.
    pub fn build(text: &str, marker: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }

        let scanner = DeclarationScanner::new(marker);
        let mut found = 0usize;
        let declarations = scanner.scan(text).filter_map(|body| {
            found += 1;
            let atts = parse_class_attributes(body);
            if atts.is_none() {
                tracing::trace!("Skipping declaration without a usable class: {:?}", body);
            }
            atts
        });
        let registry = Self::from_declarations(declarations);

        tracing::debug!(
            "Built class registry for '{}': {} declarations, {} scopes, {} groups",
            marker,
            found,
            registry.scopes.len(),
            registry.optgroups.len()
        );

        registry
    }

    /// Build a registry from already parsed declarations.
    ///
    /// Later declarations of the same class in the same bucket replace the
    /// label of earlier ones.
    pub fn from_declarations(declarations: impl IntoIterator<Item = ClassAttributes>) -> Self {
        let mut registry = Self::new();

        for atts in declarations {
            for key in atts.scope_keys() {
                registry
                    .scopes
                    .entry(key)
                    .or_default()
                    .insert(atts.class.clone(), atts.label.clone());
            }
            if let Some(group) = &atts.group {
                registry
                    .optgroups
                    .entry(group.clone())
                    .or_default()
                    .insert(atts.class.clone(), atts.label.clone());
            }
        }

        registry
    }

    /// Get the bucket for an exact scope key.
    pub fn get(&self, key: &ScopeKey) -> Option<&ClassMap> {
        self.scopes.get(key)
    }

    /// Get a copy of the bucket for an exact scope key, empty if absent.
    pub fn lookup(&self, key: &ScopeKey) -> ClassMap {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Classes available everywhere.
    pub fn global(&self) -> ClassMap {
        self.lookup(&ScopeKey::Global)
    }

    /// Named groups, sorted by group name.
    pub fn optgroups(&self) -> &BTreeMap<String, ClassMap> {
        &self.optgroups
    }

    /// Iterate over all scope buckets in key order.
    pub fn scopes(&self) -> impl Iterator<Item = (&ScopeKey, &ClassMap)> {
        self.scopes.iter()
    }

    /// Number of scope buckets.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Check if the registry holds no classes at all.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty() && self.optgroups.is_empty()
    }
}
