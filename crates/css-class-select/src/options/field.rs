//! Host form field integration.

use serde::{Deserialize, Serialize};

use super::OptionSet;

/// Key of the form field that receives class options.
pub const CLASS_FIELD_KEY: &str = "class";

/// Setup data of a host form field.
///
/// Only `options` is interpreted; every other setting is carried through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Select options of the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionSet>,
    /// Any other field settings.
    #[serde(flatten)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

impl FieldConfig {
    /// Create a field with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge computed options into the field.
    ///
    /// Existing options win over computed ones with the same key. When
    /// anything was computed, the placeholder ends up first unless the field
    /// already had one.
    pub fn apply_options(&mut self, mut computed: OptionSet) {
        let placeholder = computed.take_placeholder();
        if computed.is_empty() {
            return;
        }

        let options = self.options.get_or_insert_with(OptionSet::new);
        options.merge(computed);

        if let Some(placeholder) = placeholder {
            options.prepend_placeholder(placeholder.label().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OptionEntry, OptionGroup};
    use crate::registry::ClassMap;

    fn computed() -> OptionSet {
        let options: ClassMap = [("a".to_string(), "A".to_string())].into();
        let mut set: OptionSet = [OptionEntry::Group(OptionGroup::new("g", "G", options))]
            .into_iter()
            .collect();
        set.prepend_placeholder("- Choose a class -");
        set
    }

    #[test]
    fn apply_to_field_without_options() {
        let mut field = FieldConfig::new();
        field.apply_options(computed());

        let options = field.options.unwrap();
        assert_eq!(options.keys().collect::<Vec<_>>(), vec!["", "g"]);
    }

    #[test]
    fn existing_options_are_kept_and_placeholder_goes_first() {
        let mut field: FieldConfig = serde_json::from_str(
            r#"{"type":"text","options":{"keep":"Keep","g":{"label":"Old","options":{}}}}"#,
        )
        .unwrap();
        field.apply_options(computed());

        let options = field.options.as_ref().unwrap();
        assert_eq!(options.keys().collect::<Vec<_>>(), vec!["", "keep", "g"]);
        assert_eq!(options.group("g").unwrap().label, "Old");
        assert_eq!(field.settings["type"], "text");
    }

    #[test]
    fn existing_placeholder_is_not_replaced() {
        let mut field: FieldConfig =
            serde_json::from_str(r#"{"options":{"":"None"}}"#).unwrap();
        field.apply_options(computed());

        let options = field.options.unwrap();
        assert_eq!(options.placeholder().unwrap().label(), "None");
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn empty_computed_set_leaves_field_alone() {
        let mut field = FieldConfig::new();
        field.apply_options(OptionSet::new());
        assert_eq!(field, FieldConfig::new());
    }
}
