//! Pure transforms applied to the captured contents of a closed span.
//!
//! Each function takes the raw bytes between a span's delimiters and
//! returns the text that should be spliced into the enclosing parse's
//! output. Link and parenthetical handlers recurse back into
//! [`super::parse`] on whichever sub-field they keep; this is the only
//! recursion the parser performs.

use super::parse;

/// Case variants of the two disambiguation template names that abort the
/// enclosing parse entirely.
const DISAMBIGUATION_MARKERS: &[&str] = &[
    "disambiguation",
    "DISAMBIGUATION",
    "Disambiguation",
    "human name disambiguation",
    "HUMAN NAME DISAMBIGUATION",
    "Human Name Disambiguation",
];

/// The result of invoking the template handler.
pub(super) struct TemplateOutcome {
    /// Text to splice into the enclosing output.
    pub(super) text: Vec<u8>,
    /// When set, the page is a disambiguation page and the whole parse
    /// returns empty.
    pub(super) abort: bool,
}

/// `[[ … ]]` — an internal link. Splits on `|`; a `File:`/`Image:`-prefixed
/// first field hides the whole link, a single field drops its namespace
/// prefix and any post-comma suffix, multiple fields keep only the last
/// (the piped display text).
pub(super) fn internal_link(inner: &[u8]) -> Vec<u8> {
    let fields = split(inner, b'|');
    let Some(&first) = fields.first() else {
        return Vec::new();
    };

    if let Some(colon) = first.iter().position(|&b| b == b':') {
        if matches!(&first[..colon], b"File" | b"Image" | b"file" | b"image") {
            return Vec::new();
        }
    }

    if fields.len() == 1 {
        let mut target = first;
        if let Some(colon) = target.iter().position(|&b| b == b':') {
            target = &target[colon + 1..];
        }
        if let Some(comma) = target.iter().position(|&b| b == b',') {
            target = &target[..comma];
        }
        parse(target, 1, true)
    } else {
        parse(fields[fields.len() - 1], 1, true)
    }
}

/// `[ … ]` — an external link. Splits on a plain space and keeps only the
/// last segment, discarding the URL and keeping the display text.
pub(super) fn external_link(inner: &[u8]) -> Vec<u8> {
    match split(inner, b' ').last() {
        Some(&last) => parse(last, 1, true),
        None => Vec::new(),
    }
}

/// `{{ … }}` — a template invocation. Disambiguation markers abort the
/// parse; `{{math|…}}` keeps its second field; everything else vanishes.
pub(super) fn template(inner: &[u8]) -> TemplateOutcome {
    if DISAMBIGUATION_MARKERS
        .iter()
        .any(|marker| inner == marker.as_bytes())
    {
        return TemplateOutcome {
            text: Vec::new(),
            abort: true,
        };
    }

    let fields = split(inner, b'|');
    if fields.len() > 1 && fields[0] == b"math" {
        return TemplateOutcome {
            text: parse(fields[1], 1, false),
            abort: false,
        };
    }

    TemplateOutcome {
        text: Vec::new(),
        abort: false,
    }
}

/// `( … )` — a parenthetical group. Dropped entirely when `drop_parens` is
/// set; otherwise re-parsed and re-wrapped with a leading space.
pub(super) fn parenthetical(inner: &[u8], drop_parens: bool) -> Vec<u8> {
    if drop_parens {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(inner.len() + 3);
    out.push(b' ');
    out.push(b'(');
    out.extend(parse(inner, 1, false));
    out.push(b')');
    out
}

/// An inline `<name>body</name>` pair. `ref` bodies are dropped; `math` and
/// `var` bodies pass through verbatim; everything else vanishes.
pub(super) fn tag(name: &[u8], body: &[u8]) -> Vec<u8> {
    match name {
        b"math" | b"var" => body.to_vec(),
        _ => Vec::new(),
    }
}

/// Splits `bytes` on every occurrence of the single-byte separator `sep`,
/// always yielding at least one (possibly empty) field.
fn split(bytes: &[u8], sep: u8) -> Vec<&[u8]> {
    let mut fields = Vec::new();
    let mut start = 0;
    loop {
        match bytes[start..].iter().position(|&b| b == sep) {
            Some(rel) => {
                fields.push(&bytes[start..start + rel]);
                start += rel + 1;
            }
            None => {
                fields.push(&bytes[start..]);
                break;
            }
        }
    }
    fields
}
