//! Shortcode-style attribute tokenizer.
//!
//! Declarations use the same attribute grammar as text shortcodes:
//!
//! ```text
//! key="value"  key='value'  key=value  "value"  'value'  value
//! ```
//!
//! Every token must be followed by whitespace or the end of the input. Keys
//! are case-insensitive and stored lowercased.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static ATTRIBUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"([A-Za-z0-9_-]+)\s*=\s*"([^"]*)"(?:\s|$)"#,
        r#"|([A-Za-z0-9_-]+)\s*=\s*'([^']*)'(?:\s|$)"#,
        r#"|([A-Za-z0-9_-]+)\s*=\s*([^\s'"]+)(?:\s|$)"#,
        r#"|"([^"]*)"(?:\s|$)"#,
        r#"|'([^']*)'(?:\s|$)"#,
        r#"|(\S+)(?:\s|$)"#,
    ))
    .expect("attribute pattern is valid")
});

/// Attributes tokenized from a declaration body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAtts {
    named: HashMap<String, String>,
    positional: Vec<String>,
}

impl ShortcodeAtts {
    /// Tokenize a raw attribute string.
    ///
    /// A repeated key keeps its last value.
    pub fn parse(text: &str) -> Self {
        let text = normalize_spaces(text);
        let mut atts = Self::default();

        for caps in ATTRIBUTE_PATTERN.captures_iter(&text) {
            let named = [(1, 2), (3, 4), (5, 6)]
                .into_iter()
                .find_map(|(k, v)| Some((caps.get(k)?, caps.get(v)?)));

            if let Some((key, value)) = named {
                atts.named
                    .insert(key.as_str().to_lowercase(), strip_slashes(value.as_str()));
                continue;
            }

            if let Some(value) = [7, 8, 9].into_iter().find_map(|i| caps.get(i)) {
                atts.positional.push(value.as_str().to_string());
            }
        }

        atts
    }

    /// Get a named attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Bare values, in source order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Drop every named attribute whose value is falsy (`""` or `"0"`).
    pub fn without_empty(mut self) -> Self {
        self.named.retain(|_, value| !is_falsy(value));
        self.positional.retain(|value| !is_falsy(value));
        self
    }

    /// Number of named attributes.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// Check if there are no named attributes.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }
}

fn is_falsy(value: &str) -> bool {
    value.is_empty() || value == "0"
}

/// Non-breaking and zero-width spaces count as plain whitespace.
fn normalize_spaces(text: &str) -> String {
    text.replace(['\u{00a0}', '\u{200b}'], " ")
}

/// Resolve backslash escapes inside a named value.
fn strip_slashes(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quoted_and_bare_values() {
        let atts = ShortcodeAtts::parse(r#"class="foo" label='Foo Bar' scope=global extra"#);

        assert_eq!(atts.get("class"), Some("foo"));
        assert_eq!(atts.get("label"), Some("Foo Bar"));
        assert_eq!(atts.get("scope"), Some("global"));
        assert_eq!(atts.positional(), &["extra".to_string()]);
    }

    #[test]
    fn keys_are_lowercased() {
        let atts = ShortcodeAtts::parse(r#"CLASS="foo""#);
        assert_eq!(atts.get("class"), Some("foo"));
    }

    #[test]
    fn last_duplicate_wins() {
        let atts = ShortcodeAtts::parse(r#"class="first" class="second""#);
        assert_eq!(atts.get("class"), Some("second"));
        assert_eq!(atts.len(), 1);
    }

    #[test]
    fn spaces_around_equals_and_newlines() {
        let atts = ShortcodeAtts::parse("\n  class = \"foo\"\n  label=\"Multi\nLine\"\n");
        assert_eq!(atts.get("class"), Some("foo"));
        assert_eq!(atts.get("label"), Some("Multi\nLine"));
    }

    #[test]
    fn non_breaking_space_separates_tokens() {
        let atts = ShortcodeAtts::parse("class=\"foo\"\u{00a0}label=\"Foo\"");
        assert_eq!(atts.get("label"), Some("Foo"));
    }

    #[test]
    fn falsy_values_are_dropped() {
        let atts = ShortcodeAtts::parse(r#"class="foo" label="" group="0""#).without_empty();
        assert_eq!(atts.get("class"), Some("foo"));
        assert_eq!(atts.get("label"), None);
        assert_eq!(atts.get("group"), None);
    }

    #[test]
    fn backslash_escapes_in_values() {
        let atts = ShortcodeAtts::parse(r#"label="Tab\there" note="a\\b""#);
        assert_eq!(atts.get("label"), Some("Tab\there"));
        assert_eq!(atts.get("note"), Some("a\\b"));
    }

    #[test]
    fn empty_input() {
        let atts = ShortcodeAtts::parse("   ");
        assert!(atts.is_empty());
        assert!(atts.positional().is_empty());
    }
}
