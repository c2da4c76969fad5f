//! Configuration.
//!
//! ```toml
//! variable_prefix = "theme"
//! declaration_name = "theme_class"
//! cache_name = "theme_classes"
//!
//! [texts]
//! "label-option-empty" = "- No class -"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parser::sanitize::sanitize_title;
use crate::texts::Texts;
use crate::{Error, Result};

/// Default variable prefix.
pub const DEFAULT_VARIABLE_PREFIX: &str = "custom_class";

/// Suffix appended to the variable prefix to form the default cache name.
pub const CACHE_NAME_SUFFIX: &str = "custom_css_class_select";

/// Settings of a class select setup. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Prefix used in option group keys and the default cache name.
    pub variable_prefix: String,
    /// Marker name of declarations, the variable prefix when unset.
    pub declaration_name: Option<String>,
    /// Cache key, `<prefix>_custom_css_class_select` when unset.
    pub cache_name: Option<String>,
    /// Text overrides keyed by text id.
    pub texts: HashMap<String, String>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            variable_prefix: DEFAULT_VARIABLE_PREFIX.to_string(),
            declaration_name: None,
            cache_name: None,
            texts: HashMap::new(),
        }
    }
}

impl SelectConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Set the variable prefix.
    pub fn with_variable_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.variable_prefix = prefix.into();
        self
    }

    /// Set the declaration marker name.
    pub fn with_declaration_name(mut self, name: impl Into<String>) -> Self {
        self.declaration_name = Some(name.into());
        self
    }

    /// Set the cache name.
    pub fn with_cache_name(mut self, name: impl Into<String>) -> Self {
        self.cache_name = Some(name.into());
        self
    }

    /// Override one text.
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.texts.insert(key.into(), value.into());
        self
    }

    /// The variable prefix, slugified.
    pub fn variable_prefix(&self) -> String {
        sanitize_title(&self.variable_prefix)
    }

    /// The marker name declarations are introduced by.
    pub fn declaration_name(&self) -> String {
        self.declaration_name
            .clone()
            .unwrap_or_else(|| self.variable_prefix())
    }

    /// The key the registry is cached under.
    pub fn cache_name(&self) -> String {
        self.cache_name
            .clone()
            .unwrap_or_else(|| format!("{}_{}", self.variable_prefix(), CACHE_NAME_SUFFIX))
    }

    /// Text provider with this configuration's overrides.
    pub fn texts(&self) -> Texts {
        Texts::with_overrides(self.texts.clone())
    }
}
