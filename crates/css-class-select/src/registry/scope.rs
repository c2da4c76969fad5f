//! Scope keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a declared class applies.
///
/// Variant order matches the lexicographic order of the string forms
/// (`context:…` < `context_not:…` < `global`), so derived `Ord` sorts keys
/// the same way their names sort.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ScopeKey {
    /// Offered only to the named context.
    Context(String),
    /// Withheld from the named context.
    ContextNot(String),
    /// Offered everywhere.
    Global,
}

impl ScopeKey {
    /// Resolve a single raw scope token.
    ///
    /// `global` is the global scope, `!id` excludes context `id`, anything
    /// else names a context. Context ids are opaque and never validated.
    pub fn from_token(token: &str) -> Self {
        if token == "global" {
            Self::Global
        } else if let Some(id) = token.strip_prefix('!') {
            Self::ContextNot(id.to_string())
        } else {
            Self::Context(token.to_string())
        }
    }

    /// Key of the classes offered to `context`.
    pub fn context(context: impl Into<String>) -> Self {
        Self::Context(context.into())
    }

    /// Key of the classes withheld from `context`.
    pub fn context_not(context: impl Into<String>) -> Self {
        Self::ContextNot(context.into())
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context(id) => write!(f, "context:{}", id),
            Self::ContextNot(id) => write!(f, "context_not:{}", id),
            Self::Global => f.write_str("global"),
        }
    }
}

/// Error for a string that is not a scope key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid scope key '{0}'")]
pub struct InvalidScopeKey(pub String);

impl FromStr for ScopeKey {
    type Err = InvalidScopeKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "global" {
            Ok(Self::Global)
        } else if let Some(id) = s.strip_prefix("context_not:") {
            Ok(Self::ContextNot(id.to_string()))
        } else if let Some(id) = s.strip_prefix("context:") {
            Ok(Self::Context(id.to_string()))
        } else {
            Err(InvalidScopeKey(s.to_string()))
        }
    }
}

impl From<ScopeKey> for String {
    fn from(key: ScopeKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ScopeKey {
    type Error = InvalidScopeKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Resolve raw scope tokens into scope keys, keeping their order.
pub fn resolve_scopes<S: AsRef<str>>(tokens: &[S]) -> Vec<ScopeKey> {
    tokens
        .iter()
        .map(|token| ScopeKey::from_token(token.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tokens() {
        let keys = resolve_scopes(&["global", "row", "!rich-text"]);

        assert_eq!(
            keys,
            vec![
                ScopeKey::Global,
                ScopeKey::context("row"),
                ScopeKey::context_not("rich-text"),
            ]
        );
    }

    #[test]
    fn global_is_never_a_context() {
        assert_eq!(ScopeKey::from_token("global"), ScopeKey::Global);
        assert_eq!(ScopeKey::from_token("!global"), ScopeKey::context_not("global"));
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(resolve_scopes(&["row", "row"]).len(), 2);
    }

    #[test]
    fn display_and_parse() {
        for key in [
            ScopeKey::Global,
            ScopeKey::context("html"),
            ScopeKey::context_not("rich-text"),
        ] {
            assert_eq!(key.to_string().parse::<ScopeKey>(), Ok(key));
        }
        assert_eq!(ScopeKey::context_not("row").to_string(), "context_not:row");
        assert!("module:row".parse::<ScopeKey>().is_err());
    }

    #[test]
    fn ordering_matches_names() {
        let mut keys = vec![
            ScopeKey::Global,
            ScopeKey::context_not("a"),
            ScopeKey::context("z"),
            ScopeKey::context("b"),
        ];
        keys.sort();

        let names: Vec<String> = keys.iter().map(ToString::to_string).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
