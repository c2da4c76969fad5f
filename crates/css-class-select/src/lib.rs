//! CSS class select options from declarations embedded in stylesheets.
//!
//! Stylesheet authors declare selectable classes inside CSS comments:
//!
//! ```text
//! /* [custom_class
//!      class="my-custom-class-name"
//!      label="My custom CSS class label"
//!      scope="global, !rich-text, !html"
//!      group="Effects"
//!      /] */
//! ```
//!
//! This crate provides:
//!
//! - **Scanning and parsing**: find the declarations in any CSS text and read
//!   their attributes ([`parser`])
//! - **Scopes**: classes available everywhere, only in one context, or
//!   withheld from a context ([`registry::ScopeKey`])
//! - **Registry**: classes keyed by scope and group, cached between requests
//!   ([`registry`])
//! - **Options**: a grouped, ordered option list for one requesting context,
//!   ready to merge into a host form field ([`options`])
//!
//! # Example
//!
//! ```
//! use css_class_select::prelude::*;
//!
//! let css = r#"/* [custom_class class="my-cls" label="My Class" scope="global, !rich-text" /] */"#;
//! let select = ClassSelect::from_css(SelectConfig::default(), css);
//!
//! let options = select.options_for("row");
//! let global = options.group("optgroup-custom_class-global").unwrap();
//! assert_eq!(global.options["my-cls"], "My Class");
//!
//! assert!(select.options_for("rich-text").is_empty());
//! ```

pub mod config;
pub mod options;
pub mod parser;
pub mod registry;
pub mod select;
pub mod texts;

mod error;

pub use config::SelectConfig;
pub use error::{Error, Result};
pub use select::ClassSelect;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::SelectConfig;
    pub use crate::options::{FieldConfig, OptionEntry, OptionGroup, OptionSet, assemble_options};
    pub use crate::parser::{ClassAttributes, DeclarationScanner, parse_class_attributes};
    pub use crate::registry::{
        ClassMap, ClassRegistry, FileCache, MemoryCache, NoCache, RegistryCache, ScopeKey,
    };
    pub use crate::select::ClassSelect;
    pub use crate::texts::{ContextNames, Texts};
}
