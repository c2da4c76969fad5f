//! The cache-backed class select holder.

use std::fmt;
use std::path::Path;

use crate::config::SelectConfig;
use crate::options::{CLASS_FIELD_KEY, FieldConfig, OptionSet, assemble_options};
use crate::registry::{ClassMap, ClassRegistry, FileCache, MemoryCache, RegistryCache, ScopeKey};
use crate::texts::{ContextNames, Texts};

/// Supplies the stylesheet text declarations are read from.
pub type CssSource = Box<dyn Fn() -> String + Send + Sync>;

/// Post-processes the options assembled for a context.
pub type OptionsFilter = Box<dyn Fn(OptionSet, &str) -> OptionSet + Send + Sync>;

/// Turns declarations in a stylesheet into class options for form fields.
///
/// The registry is built from the stylesheet on the first lookup after a
/// cache miss and written back to the cache. It stays cached until
/// [`flush`](Self::flush) is called. Cache failures never surface: a broken
/// backend just means every lookup rebuilds.
///
/// # Example
///
/// ```
/// use css_class_select::{ClassSelect, SelectConfig};
///
/// let select = ClassSelect::new(SelectConfig::default(), || {
///     r#"/* [custom_class class="my-cls" label="My Class" scope="global, !rich-text" /] */"#.to_string()
/// });
///
/// let options = select.options_for("row");
/// assert!(options.offers_class("my-cls"));
/// assert!(!select.options_for("rich-text").offers_class("my-cls"));
/// ```
pub struct ClassSelect {
    config: SelectConfig,
    prefix: String,
    marker: String,
    texts: Texts,
    source: CssSource,
    cache: Box<dyn RegistryCache>,
    names: Option<Box<dyn ContextNames>>,
    filter: Option<OptionsFilter>,
}

impl ClassSelect {
    /// Create a holder reading stylesheet text from `source`, cached in memory.
    pub fn new<F>(config: SelectConfig, source: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        let cache = MemoryCache::new(config.cache_name());
        Self {
            prefix: config.variable_prefix(),
            marker: config.declaration_name(),
            texts: config.texts(),
            config,
            source: Box::new(source),
            cache: Box::new(cache),
            names: None,
            filter: None,
        }
    }

    /// Create a holder over a fixed stylesheet text.
    pub fn from_css(config: SelectConfig, css: impl Into<String>) -> Self {
        let css = css.into();
        Self::new(config, move || css.clone())
    }

    /// Use a different cache backend.
    pub fn with_cache(mut self, cache: impl RegistryCache + 'static) -> Self {
        self.cache = Box::new(cache);
        self
    }

    /// Cache the registry as a JSON file in `dir`, named after the cache name.
    pub fn with_file_cache(self, dir: impl AsRef<Path>) -> Self {
        let cache = FileCache::new(dir, self.config.cache_name());
        self.with_cache(cache)
    }

    /// Resolve context names through the host.
    pub fn with_context_names(mut self, names: impl ContextNames + 'static) -> Self {
        self.names = Some(Box::new(names));
        self
    }

    /// Post-process assembled options.
    pub fn with_options_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(OptionSet, &str) -> OptionSet + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// The configuration this holder was created with.
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// The marker name declarations are recognized by.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// The slugified variable prefix.
    pub fn variable_prefix(&self) -> &str {
        &self.prefix
    }

    /// The text provider.
    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    /// The full class registry, from the cache or freshly built.
    pub fn registry(&self) -> ClassRegistry {
        match self.cache.get() {
            Ok(Some(registry)) => {
                tracing::debug!("Class registry cache hit: {}", self.cache.name());
                return registry;
            }
            Ok(None) => tracing::debug!("Class registry cache miss: {}", self.cache.name()),
            Err(e) => tracing::warn!("Class registry cache unavailable: {}", e),
        }

        let css = (self.source)();
        let registry = ClassRegistry::build(&css, &self.marker);

        if let Err(e) = self.cache.set(&registry) {
            tracing::warn!("Failed to cache class registry: {}", e);
        }

        registry
    }

    /// Classes stored under one exact scope key.
    pub fn classes(&self, scope: &ScopeKey) -> ClassMap {
        self.registry().lookup(scope)
    }

    /// The grouped options offered to `context`.
    pub fn options_for(&self, context: &str) -> OptionSet {
        let registry = self.registry();
        let options = assemble_options(
            &registry,
            context,
            self.names.as_deref(),
            &self.prefix,
            &self.texts,
        );

        match &self.filter {
            Some(filter) => filter(options, context),
            None => options,
        }
    }

    /// Fill the options of the host's class field.
    ///
    /// Fields with any other key are returned unchanged. `form_key` is the
    /// requesting context.
    pub fn set_class_options(
        &self,
        mut field: FieldConfig,
        field_key: &str,
        form_key: &str,
    ) -> FieldConfig {
        if field_key == CLASS_FIELD_KEY {
            field.apply_options(self.options_for(form_key));
        }
        field
    }

    /// Drop the cached registry so the next lookup rebuilds it.
    pub fn flush(&self) {
        tracing::debug!("Flushing class registry cache: {}", self.cache.name());
        if let Err(e) = self.cache.delete() {
            tracing::warn!("Failed to flush class registry cache: {}", e);
        }
    }
}

impl fmt::Debug for ClassSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassSelect")
            .field("config", &self.config)
            .field("marker", &self.marker)
            .field("cache", &self.cache.name())
            .field("context_names", &self.names.is_some())
            .field("options_filter", &self.filter.is_some())
            .finish()
    }
}
