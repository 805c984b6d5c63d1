//! Page-title namespace filtering.
//!
//! MediaWiki dumps mix article prose with administrative pages (talk pages,
//! templates, categories, user pages, …) that carry the same `<page>`
//! structure but aren't encyclopedia content. [`accepts`] is the single
//! gate the driver runs every title through before bothering to parse its
//! wikitext.

/// Namespace prefixes whose pages are never treated as articles.
///
/// Exact ASCII string comparison, case-sensitive: a title has to spell the
/// namespace exactly as MediaWiki does, colon included, to be rejected.
const DROP_NAMESPACES: &[&str] = &[
    "User",
    "Wikipedia",
    "File",
    "MediaWiki",
    "Template",
    "Help",
    "Category",
    "Portal",
    "Book",
    "Draft",
    "TimedText",
    "Module",
    "Education Program",
    "Gadget",
    "Gadget definition",
    "Special",
    "Media",
];

/// Returns `false` if `title` carries one of the administrative namespace
/// prefixes in [`DROP_NAMESPACES`], `true` otherwise.
///
/// A title with no `:` has no namespace and is always accepted.
pub(crate) fn accepts(title: &str) -> bool {
    match title.split_once(':') {
        Some((ns, _)) => !DROP_NAMESPACES.contains(&ns),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_article_titles_are_accepted() {
        assert!(accepts("Rust (programming language)"));
        assert!(accepts("Paris"));
    }

    #[test]
    fn administrative_namespaces_are_rejected() {
        assert!(!accepts("User:Alice"));
        assert!(!accepts("Template:Infobox"));
        assert!(!accepts("Category:Rust"));
        assert!(!accepts("Education Program:Example"));
    }

    #[test]
    fn comparison_is_case_sensitive_and_exact() {
        assert!(accepts("user:Alice"));
        assert!(accepts("TEMPLATE:Infobox"));
    }

    #[test]
    fn colon_outside_a_known_namespace_is_not_special() {
        assert!(accepts("Dr. Strangelove: Or How I Learned to Stop Worrying"));
    }
}
