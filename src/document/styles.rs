//! Critical style extraction.
//!
//! # Responsibilities
//! - Hold the style rules the markup layer can produce
//! - Inline only the rules whose classes appear in a rendered document
//!
//! # Design Decisions
//! - Extraction is a pure function of the markup: it scans the actual
//!   `class` attributes, so unrelated rules cannot leak in and partial
//!   class-name collisions ("promo" vs "promo-list") do not match

use std::collections::HashSet;

/// Every style rule the markup layer can emit, keyed by class name.
const STYLE_REGISTRY: &[(&str, &str)] = &[
    (
        "page-main",
        ".page-main{max-width:45rem;margin:0 auto;padding:0 1rem;font-family:Helvetica,Arial,sans-serif}",
    ),
    (
        "page-title",
        ".page-title{font-size:2rem;line-height:1.15;margin:1rem 0 0.5rem}",
    ),
    (
        "topic-description",
        ".topic-description{color:#404040;margin:0 0 1rem}",
    ),
    (
        "promo-list",
        ".promo-list{list-style:none;margin:0;padding:0}",
    ),
    (
        "promo",
        ".promo{padding:1rem 0;border-bottom:0.0625rem solid #e6e8ea}",
    ),
    (
        "promo-heading",
        ".promo-heading{font-size:1.25rem;margin:0}",
    ),
    (
        "promo-link",
        ".promo-link{color:#222;text-decoration:none}.promo-link:hover{text-decoration:underline}",
    ),
    (
        "promo-timestamp",
        ".promo-timestamp{display:block;color:#696969;font-size:0.875rem;margin-top:0.25rem}",
    ),
    (
        "promo-image",
        ".promo-image{width:100%;height:auto;margin-top:0.5rem}",
    ),
    (
        "pagination",
        ".pagination{margin:1.5rem 0}",
    ),
    (
        "pagination-list",
        ".pagination-list{list-style:none;display:flex;gap:0.5rem;margin:0;padding:0}",
    ),
    (
        "pagination-item",
        ".pagination-item{min-width:2rem;text-align:center}",
    ),
    (
        "pagination-active",
        ".pagination-active{font-weight:bold;text-decoration:underline}",
    ),
    (
        "error-page",
        ".error-page{text-align:center;padding:3rem 1rem}",
    ),
    (
        "error-status",
        ".error-status{font-size:3rem;margin:0}",
    ),
    (
        "error-message",
        ".error-message{color:#404040}",
    ),
];

/// Inline style text containing only the rules whose classes occur in
/// the markup.
pub fn extract_critical(markup: &str) -> String {
    let used = class_tokens(markup);
    STYLE_REGISTRY
        .iter()
        .filter(|(class, _)| used.contains(*class))
        .map(|(_, rule)| *rule)
        .collect()
}

/// All class tokens appearing in `class="..."` attributes.
fn class_tokens(markup: &str) -> HashSet<&str> {
    let mut tokens = HashSet::new();
    let mut rest = markup;
    while let Some(start) = rest.find("class=\"") {
        rest = &rest[start + 7..];
        if let Some(end) = rest.find('"') {
            tokens.extend(rest[..end].split_whitespace());
            rest = &rest[end + 1..];
        } else {
            break;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_only_used_rules() {
        let markup = r#"<ul class="promo-list"><li class="promo">x</li></ul>"#;
        let styles = extract_critical(markup);

        assert!(styles.contains(".promo-list{"));
        assert!(styles.contains(".promo{"));
        assert!(!styles.contains(".pagination"));
        assert!(!styles.contains(".error-page"));
    }

    #[test]
    fn partial_class_names_do_not_match() {
        let markup = r#"<ul class="promo-list">x</ul>"#;
        let styles = extract_critical(markup);

        assert!(styles.contains(".promo-list{"));
        assert!(!styles.contains(".promo{"));
    }

    #[test]
    fn no_classes_yields_empty_styles() {
        assert_eq!(extract_critical("<p>plain</p>"), "");
    }

    #[test]
    fn extraction_is_deterministic() {
        let markup = r#"<main class="error-page page-main"><h1 class="error-status">500</h1></main>"#;
        assert_eq!(extract_critical(markup), extract_critical(markup));
    }
}
