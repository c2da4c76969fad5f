//! Sanitizing and escaping helpers for declaration values.
//!
//! These mirror the rules the host form applies to class names, slugs and
//! labels so that the produced option keys and labels are safe to embed in
//! markup without further processing.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Reduce a class name to a safe identifier token.
///
/// Percent-encoded octets are removed first, then every character outside
/// `[A-Za-z0-9_-]`. The result is lowercased and may be empty.
pub fn sanitize_html_class(class: &str) -> String {
    let without_octets = strip_percent_octets(class);
    without_octets
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Turn free text into a slug usable inside an option group key.
///
/// Tags and character entities are dropped and accented letters are folded to
/// their base letters. Remaining non-ASCII characters are percent-encoded as
/// lowercase UTF-8 octets, existing octets are kept and lone `%` removed.
/// Whitespace and dots become dashes, other characters outside
/// `[%a-z0-9_-]` are removed, dash runs are collapsed and dashes at either
/// end are trimmed.
pub fn sanitize_title(title: &str) -> String {
    let plain = remove_accents(&strip_entities(&strip_tags(title)));
    let bytes = plain.as_bytes();
    let is_hex = |at: usize| bytes.get(at).is_some_and(u8::is_ascii_hexdigit);

    let mut slug = String::with_capacity(plain.len());
    for (i, c) in plain.char_indices() {
        match c {
            'a'..='z' | '0'..='9' | '_' => slug.push(c),
            'A'..='Z' => slug.push(c.to_ascii_lowercase()),
            '%' if is_hex(i + 1) && is_hex(i + 2) => slug.push('%'),
            '-' | '.' => push_dash(&mut slug),
            c if c.is_whitespace() => push_dash(&mut slug),
            c if !c.is_ascii() => {
                let mut buf = [0; 4];
                slug.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)).to_ascii_lowercase());
            }
            _ => {}
        }
    }

    slug.trim_matches('-').to_string()
}

/// Fold accented Latin letters to their unaccented base.
///
/// A character is folded when its canonical decomposition is one ASCII letter
/// followed by combining marks. Ligatures and letters with a stroke that have
/// no decomposition are spelled out. Everything else is kept as is.
pub fn remove_accents(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        if let Some(spelled) = spell_out(c) {
            out.push_str(spelled);
            continue;
        }
        let mut parts = std::iter::once(c).nfd();
        match parts.next() {
            Some(base) if base.is_ascii_alphabetic() && parts.all(is_combining_mark) => {
                out.push(base)
            }
            _ => out.push(c),
        }
    }
    out
}

fn push_dash(slug: &mut String) {
    if !slug.ends_with('-') {
        slug.push('-');
    }
}

fn spell_out(c: char) -> Option<&'static str> {
    let spelled = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'ħ' => "h",
        'Ħ' => "H",
        'ł' => "l",
        'Ł' => "L",
        'ŧ' => "t",
        'Ŧ' => "T",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        'ĳ' => "ij",
        'Ĳ' => "IJ",
        'ŀ' => "l",
        'Ŀ' => "L",
        'ŉ' => "n",
        'ĸ' => "k",
        'ſ' => "s",
        _ => return None,
    };
    Some(spelled)
}

/// Escape text for HTML element content.
///
/// `&`, `<`, `>`, `"` and `'` are encoded. Ampersands that already start a
/// valid character entity are left alone, so escaping twice is a no-op.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            '&' => match entity_len(rest) {
                Some(len) => {
                    out.push_str(&rest[..len]);
                    rest = &rest[len..];
                    continue;
                }
                None => out.push_str("&amp;"),
            },
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Escape text for use inside an HTML attribute value.
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Keep only the characters a scope list may contain: `a-z`, `,`, `-`, `!`.
pub fn filter_scope(scope: &str) -> String {
    scope
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | ',' | '-' | '!'))
        .collect()
}

/// Length of the character entity at the start of `s`, if there is one.
fn entity_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];

    let valid = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(dec) = name.strip_prefix('#') {
        !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit())
    } else {
        let mut chars = name.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric())
    };

    valid.then_some(end + 2)
}

fn strip_percent_octets(s: &str) -> String {
    let bytes = s.as_bytes();
    let is_hex = |at: usize| bytes.get(at).is_some_and(u8::is_ascii_hexdigit);

    let mut out = String::with_capacity(s.len());
    let mut skip_until = 0;
    for (i, c) in s.char_indices() {
        if i < skip_until {
            continue;
        }
        if c == '%' && is_hex(i + 1) && is_hex(i + 2) {
            skip_until = i + 3;
            continue;
        }
        out.push(c);
    }
    out
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn strip_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        if c == '&' {
            if let Some(len) = entity_len(rest) {
                rest = &rest[len..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_class_drops_invalid_characters() {
        assert_eq!(sanitize_html_class("My-Class_2"), "my-class_2");
        assert_eq!(sanitize_html_class("a b.c!d"), "abcd");
        assert_eq!(sanitize_html_class("foo%20bar"), "foobar");
        assert_eq!(sanitize_html_class("!!!"), "");
        assert_eq!(sanitize_html_class("ünï"), "n");
    }

    #[test]
    fn title_slugs() {
        assert_eq!(sanitize_title("Effects"), "effects");
        assert_eq!(sanitize_title("Text & Colors"), "text-colors");
        assert_eq!(sanitize_title("  Hello   World.v2 "), "hello-world-v2");
        assert_eq!(sanitize_title("<b>Bold</b> &amp; more"), "bold-more");
        assert_eq!(sanitize_title("custom_class"), "custom_class");
    }

    #[test]
    fn title_slugs_fold_accents() {
        assert_eq!(sanitize_title("Café"), "cafe");
        assert_eq!(sanitize_title("Crème Brûlée"), "creme-brulee");
        assert_eq!(sanitize_title("Straße Œuvre"), "strasse-oeuvre");
        assert_eq!(sanitize_title("ÉTÉ"), "ete");
        assert_ne!(sanitize_title("Café"), sanitize_title("Caf"));
    }

    #[test]
    fn title_slugs_encode_other_characters() {
        assert_eq!(sanitize_title("日本"), "%e6%97%a5%e6%9c%ac");
        assert_eq!(sanitize_title("中文"), "%e4%b8%ad%e6%96%87");
        assert_eq!(sanitize_title("Red ❤ Blue"), "red-%e2%9d%a4-blue");
        assert_eq!(sanitize_title("no\u{a0}break"), "no-break");
    }

    #[test]
    fn title_slugs_keep_octets_only() {
        assert_eq!(sanitize_title("50%20off"), "50%20off");
        assert_eq!(sanitize_title("100% cotton"), "100-cotton");
        assert_eq!(sanitize_title("%zz"), "zz");
    }

    #[test]
    fn accents_are_removed() {
        assert_eq!(remove_accents("Ångström"), "Angstrom");
        assert_eq!(remove_accents("Łódź"), "Lodz");
        assert_eq!(remove_accents("naïve façade"), "naive facade");
        assert_eq!(remove_accents("plain"), "plain");
        assert_eq!(remove_accents("日本"), "日本");
    }

    #[test]
    fn html_escaping() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html(r#"say "hi" it's"#), "say &quot;hi&quot; it&#039;s");
        assert_eq!(escape_html("fish &amp; chips"), "fish &amp; chips");
        assert_eq!(escape_html("&#38; &#x26; &bogus"), "&#38; &#x26; &amp;bogus");
    }

    #[test]
    fn html_escaping_is_idempotent() {
        let once = escape_html("<Tom & Jerry's>");
        assert_eq!(escape_html(&once), once);
    }

    #[test]
    fn scope_filter_keeps_allowed_alphabet() {
        assert_eq!(filter_scope("global, !rich-text"), "global,!rich-text");
        assert_eq!(filter_scope("Row_1"), "ow");
    }
}
