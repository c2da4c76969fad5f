//! Option label texts and context names.

use std::collections::HashMap;

use crate::parser::sanitize::escape_html;

/// Label of the global classes group.
pub const LABEL_OPTGROUP_GLOBAL: &str = "label-optgroup-global";
/// Label of the context classes group, `%s` is the context name.
pub const LABEL_OPTGROUP_MODULE: &str = "label-optgroup-module";
/// Name of the column context.
pub const LABEL_OPTION_COLUMN: &str = "label-option-column";
/// Label of the empty placeholder option.
pub const LABEL_OPTION_EMPTY: &str = "label-option-empty";
/// Name of the row context.
pub const LABEL_OPTION_ROW: &str = "label-option-row";

const DEFAULT_TEXTS: [(&str, &str); 5] = [
    (LABEL_OPTGROUP_GLOBAL, "Custom global classes:"),
    (LABEL_OPTGROUP_MODULE, "Custom %s classes:"),
    (LABEL_OPTION_COLUMN, "Column"),
    (LABEL_OPTION_EMPTY, "- Choose a class -"),
    (LABEL_OPTION_ROW, "Row"),
];

/// Text strings used for option labels.
///
/// Each key has a built-in default that can be overridden. Unknown keys
/// resolve to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Texts {
    overrides: HashMap<String, String>,
}

impl Texts {
    /// Create a provider with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with the given overrides on top of the defaults.
    pub fn with_overrides<K, V>(overrides: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut texts = Self::new();
        for (key, value) in overrides {
            texts.set(key, value);
        }
        texts
    }

    /// Override a single text.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.overrides.insert(key.into(), value.into());
    }

    /// Get the text for `key`.
    pub fn get(&self, key: &str) -> String {
        if let Some(text) = self.overrides.get(key) {
            return text.clone();
        }
        DEFAULT_TEXTS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| text.to_string())
            .unwrap_or_default()
    }

    /// Get the text for `key` with `%s` replaced by `arg`.
    pub fn format(&self, key: &str, arg: &str) -> String {
        self.get(key).replacen("%s", arg, 1)
    }

    /// Like [`format`](Self::format), but the text is HTML-escaped before
    /// `arg` is substituted. `arg` is inserted as given.
    pub fn format_escaped(&self, key: &str, arg: &str) -> String {
        escape_html(&self.get(key)).replacen("%s", arg, 1)
    }
}

/// Source of human-readable context names.
///
/// The host knows the names of its own components; returning `None` falls
/// back to the built-in row/column names and then to the id itself.
pub trait ContextNames: Send + Sync {
    /// Name of the context with the given id, if known.
    fn context_name(&self, id: &str) -> Option<String>;
}

impl<F> ContextNames for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn context_name(&self, id: &str) -> Option<String> {
        self(id)
    }
}

impl ContextNames for HashMap<String, String> {
    fn context_name(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// Resolve the display name of a context.
pub fn context_label(id: &str, names: Option<&dyn ContextNames>, texts: &Texts) -> String {
    if let Some(name) = names.and_then(|names| names.context_name(id)) {
        return name;
    }
    match id {
        "row" => texts.get(LABEL_OPTION_ROW),
        "col" | "column" => texts.get(LABEL_OPTION_COLUMN),
        _ => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let texts = Texts::new();
        assert_eq!(texts.get(LABEL_OPTGROUP_GLOBAL), "Custom global classes:");
        assert_eq!(texts.get(LABEL_OPTION_EMPTY), "- Choose a class -");
    }

    #[test]
    fn unknown_key_is_empty() {
        assert_eq!(Texts::new().get("label-nope"), "");
    }

    #[test]
    fn overrides_win() {
        let texts = Texts::with_overrides([(LABEL_OPTION_ROW, "Zeile"), ("extra", "Extra")]);
        assert_eq!(texts.get(LABEL_OPTION_ROW), "Zeile");
        assert_eq!(texts.get("extra"), "Extra");
        assert_eq!(texts.get(LABEL_OPTION_COLUMN), "Column");
    }

    #[test]
    fn format_module_label() {
        let texts = Texts::new();
        assert_eq!(texts.format(LABEL_OPTGROUP_MODULE, "Row"), "Custom Row classes:");
    }

    #[test]
    fn format_escaped_escapes_template_only() {
        let texts = Texts::with_overrides([(LABEL_OPTGROUP_MODULE, "<i>%s</i> & more")]);
        assert_eq!(
            texts.format_escaped(LABEL_OPTGROUP_MODULE, "<b>Row</b>"),
            "&lt;i&gt;<b>Row</b>&lt;/i&gt; &amp; more"
        );
        assert_eq!(
            texts.format(LABEL_OPTGROUP_MODULE, "Row"),
            "<i>Row</i> & more"
        );
    }

    #[test]
    fn context_label_fallbacks() {
        let texts = Texts::new();
        assert_eq!(context_label("row", None, &texts), "Row");
        assert_eq!(context_label("col", None, &texts), "Column");
        assert_eq!(context_label("column", None, &texts), "Column");
        assert_eq!(context_label("rich-text", None, &texts), "rich-text");
    }

    #[test]
    fn context_label_prefers_host_names() {
        let texts = Texts::new();
        let names = |id: &str| (id == "rich-text").then(|| "Text Editor".to_string());

        assert_eq!(context_label("rich-text", Some(&names), &texts), "Text Editor");
        assert_eq!(context_label("row", Some(&names), &texts), "Row");

        let map: HashMap<String, String> = [("row".to_string(), "Section".to_string())].into();
        assert_eq!(context_label("row", Some(&map), &texts), "Section");
    }
}
