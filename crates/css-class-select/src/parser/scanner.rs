//! Declaration scanning.
//!
//! Finds every `[<marker> ...]` unit in a stylesheet. Everything else in the
//! text, including the CSS around the declarations, is ignored.

use regex::{Regex, RegexBuilder};

/// Compiled size limit of the declaration pattern.
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Scanner for class declarations introduced by one marker name.
#[derive(Debug, Clone)]
pub struct DeclarationScanner {
    marker: String,
    pattern: Option<Regex>,
}

impl DeclarationScanner {
    /// Create a scanner for the given marker name.
    ///
    /// The marker is matched literally and case-sensitively.
    pub fn new(marker: impl Into<String>) -> Self {
        Self::with_size_limit(marker, DEFAULT_SIZE_LIMIT)
    }

    /// Create a scanner whose pattern may compile to at most `limit` bytes.
    ///
    /// A marker too long for the limit yields a scanner that finds nothing.
    pub fn with_size_limit(marker: impl Into<String>, limit: usize) -> Self {
        let marker = marker.into();
        let source = format!(r"(?s)\[{}(.*?)\]", regex::escape(&marker));
        let pattern = match RegexBuilder::new(&source).size_limit(limit).build() {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("Unusable declaration marker, no declarations will be found: {}", e);
                None
            }
        };
        Self { marker, pattern }
    }

    /// Check whether the marker compiled into a usable pattern.
    pub fn is_usable(&self) -> bool {
        self.pattern.is_some()
    }

    /// The marker name this scanner looks for.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Iterate over the raw bodies of all declarations in `text`.
    ///
    /// The body is everything between the marker and the first closing
    /// bracket, newlines included. Adjacent declarations need no separator.
    pub fn scan<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.pattern
            .iter()
            .flat_map(move |pattern| pattern.captures_iter(text))
            .filter_map(|caps| caps.get(1))
            .map(|body| body.as_str())
    }
}

/// Collect the raw declaration bodies for `marker` found in `text`.
pub fn scan_declarations(text: &str, marker: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    DeclarationScanner::new(marker)
        .scan(text)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_single_declaration() {
        let css = r#"/* [custom_class class="foo" /] */ .foo { color: red; }"#;
        let bodies = scan_declarations(css, "custom_class");

        assert_eq!(bodies, vec![r#" class="foo" /"#.to_string()]);
    }

    #[test]
    fn scan_multiline_declaration() {
        let css = "/*\n[custom_class\n  class=\"foo\"\n  label=\"Foo\"\n  /]\n*/";
        let bodies = scan_declarations(css, "custom_class");

        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("label=\"Foo\""));
        assert!(bodies[0].contains('\n'));
    }

    #[test]
    fn scan_adjacent_declarations() {
        let css = r#"[custom_class class="a"][custom_class class="b"]"#;
        let bodies = scan_declarations(css, "custom_class");

        assert_eq!(bodies, vec![r#" class="a""#, r#" class="b""#]);
    }

    #[test]
    fn marker_is_case_sensitive() {
        let css = r#"[Custom_Class class="a"] [custom_class class="b"]"#;
        let bodies = scan_declarations(css, "custom_class");

        assert_eq!(bodies, vec![r#" class="b""#]);
    }

    #[test]
    fn marker_is_matched_literally() {
        let css = r#"[my.marker class="a"] [myXmarker class="b"]"#;
        let bodies = scan_declarations(css, "my.marker");

        assert_eq!(bodies, vec![r#" class="a""#]);
    }

    #[test]
    fn ignores_other_brackets() {
        let css = r#"a[href] { color: blue; } input[type="text"] { border: 0; }"#;
        assert!(scan_declarations(css, "custom_class").is_empty());
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(scan_declarations("", "custom_class").is_empty());
    }

    #[test]
    fn rescanning_is_stable() {
        let scanner = DeclarationScanner::new("custom_class");
        let css = r#"[custom_class class="a"] [custom_class class="b"]"#;

        let first: Vec<_> = scanner.scan(css).collect();
        let second: Vec<_> = scanner.scan(css).collect();
        assert_eq!(first, second);
        assert_eq!(scanner.marker(), "custom_class");
    }

    #[test]
    fn oversized_marker_finds_nothing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let css = r#"[custom_class class="a"]"#;

        let scanner = DeclarationScanner::with_size_limit("custom_class", 16);
        assert!(!scanner.is_usable());
        assert_eq!(scanner.scan(css).count(), 0);

        let scanner = DeclarationScanner::new("custom_class");
        assert!(scanner.is_usable());
        assert_eq!(scanner.scan(css).count(), 1);
    }
}
