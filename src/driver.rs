//! Two-pass orchestration turning a `(title, wikitext)` pair into an
//! emittable abstract line.

use crate::common::decode_html;
use crate::title;
use crate::wikitext;

/// The number of leading paragraphs an abstract may contain.
const MAX_PARAGRAPHS: u32 = 10;

/// Runs the state machine twice with an entity-decode step between passes,
/// then gates the result through the page filter.
///
/// Returns `None` when the page is skipped: an administrative namespace, an
/// empty abstract (redirect, disambiguation, or genuinely content-free
/// body).
pub(crate) fn abstract_for(title: &str, wikitext: &str) -> Option<(String, String)> {
    let stripped = wikitext::parse(wikitext.as_bytes(), MAX_PARAGRAPHS, true);
    // The entity decoder works on `&str`; dumps are overwhelmingly valid
    // UTF-8, so a handful of replacement characters on the rare malformed
    // byte is preferable to rejecting the whole page.
    let decoded = decode_html(&String::from_utf8_lossy(&stripped));
    let decoded = decode_html(&decoded);
    let abstract_text = wikitext::parse(decoded.as_bytes(), MAX_PARAGRAPHS, false);

    if abstract_text.is_empty() {
        return None;
    }
    if !title::accepts(title) {
        return None;
    }

    let abstract_text = String::from_utf8_lossy(&abstract_text).into_owned();
    let decoded_title = decode_html(title).into_owned();
    Some((decoded_title, abstract_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_a_clean_lead_paragraph() {
        let (title, text) = abstract_for(
            "Paris",
            "Paris is the capital of [[France]].\n\n== History ==\nstuff",
        )
        .expect("should produce an abstract");
        assert_eq!(title, "Paris");
        assert_eq!(text, "Paris is the capital of France. ");
    }

    #[test]
    fn drops_administrative_namespaces() {
        assert!(abstract_for("User:Alice", "anything").is_none());
    }

    #[test]
    fn drops_redirects() {
        assert!(abstract_for("Atlantis (mythical)", "#REDIRECT [[Atlantis]]").is_none());
    }

    #[test]
    fn drops_disambiguation_pages() {
        assert!(abstract_for("Mercury", "Mercury can refer to: {{disambiguation}}").is_none());
    }

    #[test]
    fn decodes_entities_before_the_second_pass() {
        let (_, text) = abstract_for("Example", "a &amp;lt;ref&amp;gt;hidden&amp;lt;/ref&amp;gt; b")
            .expect("should produce an abstract");
        assert_eq!(text, "a b");
    }
}
