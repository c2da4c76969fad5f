//! Declaration parsing.
//!
//! Class declarations live inside ordinary CSS comments:
//!
//! ```text
//! /* [custom_class class="my-class" label="My class" scope="global, !rich-text" group="Effects" /] */
//! ```
//!
//! [`DeclarationScanner`] finds the declaration bodies and
//! [`parse_class_attributes`] turns each body into [`ClassAttributes`].

mod attributes;
mod scanner;
mod shortcode;
pub mod sanitize;

pub use attributes::{ClassAttributes, DEFAULT_SCOPE, parse_class_attributes};
pub use scanner::{DeclarationScanner, scan_declarations};
pub use shortcode::ShortcodeAtts;
