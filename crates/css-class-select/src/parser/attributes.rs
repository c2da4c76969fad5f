//! Class declaration attributes.

use super::sanitize::{escape_attr, escape_html, filter_scope, sanitize_html_class};
use super::shortcode::ShortcodeAtts;
use crate::registry::{ScopeKey, resolve_scopes};

/// Scope applied when a declaration does not name one.
pub const DEFAULT_SCOPE: &str = "global";

/// The validated attributes of one class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAttributes {
    /// Sanitized class name, never empty.
    pub class: String,
    /// Escaped option label.
    pub label: String,
    /// Scope tokens in declaration order, without duplicates.
    pub scopes: Vec<String>,
    /// Optional presentation group.
    pub group: Option<String>,
}

impl ClassAttributes {
    /// Resolve the scope tokens into registry keys.
    pub fn scope_keys(&self) -> Vec<ScopeKey> {
        resolve_scopes(self.scopes.as_slice())
    }
}

/// Parse one raw declaration body into class attributes.
///
/// Returns `None` when the declaration has no `class` attribute or the class
/// name is empty once dots, whitespace and invalid characters are removed.
/// Such declarations are simply not class declarations.
///
/// # Example
///
/// ```
/// use css_class_select::parser::parse_class_attributes;
///
/// let atts = parse_class_attributes(r#" class=".bar" label="Bar" scope="global,!row" /"#).unwrap();
/// assert_eq!(atts.class, "bar");
/// assert_eq!(atts.scopes, vec!["global", "!row"]);
/// ```
pub fn parse_class_attributes(declaration: &str) -> Option<ClassAttributes> {
    let cleaned = declaration.replace(['/', '*', ';'], "");
    let atts = ShortcodeAtts::parse(&cleaned).without_empty();

    let class = atts.get("class")?;
    let class = class.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if class.is_empty() {
        return None;
    }

    let label = atts.get("label").unwrap_or(class);

    let group = atts
        .get("group")
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string);

    let scope = atts.get("scope").unwrap_or(DEFAULT_SCOPE);
    let mut scopes: Vec<String> = Vec::new();
    for token in filter_scope(scope).split(',').filter(|t| !t.is_empty()) {
        let token = escape_attr(token);
        if !scopes.contains(&token) {
            scopes.push(token);
        }
    }

    let class = sanitize_html_class(class);
    if class.is_empty() {
        return None;
    }

    Some(ClassAttributes {
        class,
        label: escape_html(label.trim()),
        scopes,
        group,
    })
}
