//! Select options built from the class registry.

mod assembler;
mod field;
mod option_set;

pub use assembler::assemble_options;
pub use field::{CLASS_FIELD_KEY, FieldConfig};
pub use option_set::{OptionEntry, OptionGroup, OptionSet, PLACEHOLDER_VALUE};
