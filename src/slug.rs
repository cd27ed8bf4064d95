use once_cell::sync::Lazy;
use regex::Regex;

// ASCII word characters and the CJK unified ideographs block survive; everything else collapses.
static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\x{4e00}-\x{9fa5}]+").unwrap());

/// Derive an anchor identifier from a heading label.
///
/// The label is lowercased, every run of characters outside `[A-Za-z0-9_]`
/// and the CJK range is replaced by a single `-`, and leading/trailing
/// dashes are trimmed. The result may be empty (e.g. for `"!!!"`).
pub fn slugify(label: &str) -> String {
    let lowered = label.to_lowercase();
    let dashed = NON_SLUG_RUN.replace_all(&lowered, "-");
    dashed.trim_matches('-').to_string()
}

/// Like [`slugify`], but never empty: falls back to `section-<position>`.
pub fn slugify_or(label: &str, position: usize) -> String {
    let slug = slugify(label);
    if slug.is_empty() {
        format!("section-{position}")
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Intro Section"), "intro-section");
        assert_eq!(slugify("  Getting   Started!  "), "getting-started");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("What's new? (v2.0)"), "what-s-new-v2-0");
        assert_eq!(slugify("--leading and trailing--"), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_keeps_cjk() {
        assert_eq!(slugify("第一章 概述"), "第一章-概述");
        assert_eq!(slugify("Rust 入门"), "rust-入门");
    }

    #[test]
    fn test_slugify_drops_other_non_ascii() {
        // Accented letters are not word characters in the ASCII sense.
        assert_eq!(slugify("Café Menu"), "caf-menu");
    }

    #[test]
    fn test_slugify_or_fallback() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify_or("!!!", 3), "section-3");
        assert_eq!(slugify_or("Overview", 3), "overview");
    }
}
