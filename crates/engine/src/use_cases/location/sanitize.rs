//! Input sanitization for location text fields.
//!
//! Runs before validation. Markup is removed, never escaped, and the result
//! is trimmed; applying the stage twice gives the same output as applying it
//! once.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Strip markup and surrounding whitespace from a text field.
pub fn sanitize_text(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let stripped = strip_tags(&current);
        if stripped == current {
            break;
        }
        current = stripped;
    }
    current.trim().to_string()
}

/// Image values are only trimmed; blank means absent.
pub fn sanitize_image(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A tag opens at `<` followed by a letter, `/`, `!` or `?` and closes at the
/// first `>` outside a quoted attribute value; an unclosed tag or quote runs to
/// the end of the input.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[A-Za-z/!?](?:"[^"]*"?|'[^']*'?|[^"'>])*(?:>|$)"#).expect("valid regex")
});

/// One pass of tag removal.
fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}
