//! Whitespace normalizer.
//!
//! [`normalize`] canonicalizes rendered text for structural-equality
//! comparison in tests: whitespace runs collapse to single spaces and
//! blank lines disappear. It is never the form returned to an end caller;
//! the renderer's indented output is the shipped text.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("static pattern"));

/// Collapses whitespace runs and drops blank lines, yielding a canonical
/// form. Idempotent: `normalize(normalize(s)) == normalize(s)`.
///
/// # Examples
///
/// ```rust
/// use swiftpen::normalize::normalize;
/// let canonical = normalize("if x {\n\n    f()   \n}\n");
/// assert_eq!(canonical, "if x {\nf()\n}\n");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let collapsed = WHITESPACE_RUN.replace_all(line, " ");
        let trimmed = collapsed.trim();
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(trimmed);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_blank_lines() {
        assert_eq!(normalize("a   b\t\tc\n\n\nd\n"), "a b c\nd\n");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize("  x  \n\n  y\n");
        assert_eq!(normalize(&once), once);
    }
}
