//! Option assembly for one requesting context.

use super::{OptionGroup, OptionSet};
use crate::parser::sanitize::{escape_html, sanitize_title};
use crate::registry::{ClassRegistry, ScopeKey};
use crate::texts::{
    ContextNames, LABEL_OPTGROUP_GLOBAL, LABEL_OPTGROUP_MODULE, LABEL_OPTION_EMPTY, Texts,
    context_label,
};

/// Compose the grouped options offered to `context`.
///
/// The result lists, in order: the placeholder, the classes declared for
/// `context`, the global classes, then the named groups in reverse name
/// order. Classes excluded from `context` disappear from the global classes
/// and from every named group. A class shown in a named group is not repeated
/// among the global classes, though it may show up in several named groups.
///
/// Named groups are filtered by exclusion only; a class scoped to some other
/// context still appears in its group.
///
/// Groups whose keys coincide are shown as one group under the label of the
/// first one built (named groups first, then global, then context), so no
/// class is lost to a key collision.
pub fn assemble_options(
    registry: &ClassRegistry,
    context: &str,
    names: Option<&dyn ContextNames>,
    variable_prefix: &str,
    texts: &Texts,
) -> OptionSet {
    let mut global = registry.global();
    let contextual = registry.lookup(&ScopeKey::context(context));
    let excluded: Vec<String> = registry
        .get(&ScopeKey::context_not(context))
        .map(|classes| classes.keys().cloned().collect())
        .unwrap_or_default();

    if global.is_empty() && contextual.is_empty() && excluded.is_empty() {
        return OptionSet::new();
    }

    let mut optgroups = registry.optgroups().clone();
    for class in &excluded {
        global.remove(class);
        for classes in optgroups.values_mut() {
            classes.remove(class);
        }
    }
    optgroups.retain(|_, classes| !classes.is_empty());

    let mut options = OptionSet::new();

    for (name, classes) in optgroups {
        for class in classes.keys() {
            global.remove(class);
        }
        let key = format!("optgroup-{}-{}", variable_prefix, sanitize_title(&name));
        options.push_group(OptionGroup::new(key, escape_html(&name), classes));
    }

    if !global.is_empty() {
        let key = format!("optgroup-{}-global", variable_prefix);
        let label = escape_html(&texts.get(LABEL_OPTGROUP_GLOBAL));
        options.push_group(OptionGroup::new(key, label, global));
    }

    if !contextual.is_empty() {
        let key = format!("optgroup-{}-{}", variable_prefix, context);
        let name = context_label(context, names, texts);
        let label = texts.format_escaped(LABEL_OPTGROUP_MODULE, &name);
        options.push_group(OptionGroup::new(key, label, contextual));
    }

    options.reverse();

    if !options.is_empty() {
        options.prepend_placeholder(texts.get(LABEL_OPTION_EMPTY));
    }

    options
}
