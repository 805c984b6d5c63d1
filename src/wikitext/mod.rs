//! Single-pass wikitext-to-plaintext stripper.
//!
//! [`parse`] walks raw wikitext one byte at a time with a flat state
//! machine: a current [`Mode`] plus six independent nesting-depth counters,
//! one per bracketed construct. Link, template, and parenthetical contents
//! are handed to the pure functions in [`spans`], which may themselves call
//! back into [`parse`] on a captured sub-span — the only recursion in this
//! module. The parser never fails: unbalanced or truncated markup is
//! recovered by discarding whatever was captured and falling back to `Text`
//! mode at the next safe byte — except a mismatched closing tag, whose
//! candidate name keeps accumulating past every failed closer until one
//! finally matches or input runs out, which can consume the remainder of
//! the article without returning to `Text` mode (see [`Mode::InTag`]).

mod spans;
#[cfg(test)]
mod tests;

/// The state of the byte scanner.
///
/// A depth counter being zero is equivalent to `mode` not being the
/// corresponding `In*` variant; there is no explicit stack because the
/// six nesting kinds can't interleave with each other's boundaries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    LineBegin,
    Text,
    InHeading,
    InHeadingTitle,
    InHeadingClose,
    InTemplate,
    InTable,
    InDoubleLink,
    InSingleLink,
    InParen,
    InTag,
}

/// Parses `input` wikitext into a flattened plain-text prefix.
///
/// `max_paras` caps the number of newline-terminated paragraph lines
/// collected before returning early. `drop_parens` controls whether
/// parenthetical groups are elided (`true`) or re-parsed and re-emitted
/// surrounded by a leading space and `(…)` (`false`).
///
/// The result is never valid-UTF-8-checked: wikitext need not be valid
/// UTF-8, and bytes pass through untouched except where they form
/// recognized markup.
pub(crate) fn parse(input: &[u8], max_paras: u32, drop_parens: bool) -> Vec<u8> {
    let len = input.len();
    let mut pos = 0usize;
    let mut mode = Mode::LineBegin;

    let mut head_depth = 0u32;
    let mut head_depth_saved = 0u32;
    let mut template_depth = 0u32;
    let mut table_depth = 0u32;
    let mut double_link_depth = 0u32;
    let mut single_link_depth = 0u32;
    let mut paren_depth = 0u32;

    let mut capture_a: Vec<u8> = Vec::new();
    let mut capture_b: Vec<u8> = Vec::new();
    let mut output: Vec<u8> = Vec::new();
    let mut paragraphs = 0u32;

    while pos < len {
        let byte = input[pos];
        match mode {
            Mode::LineBegin => {
                if byte == b'\n' {
                    if !output.is_empty() {
                        paragraphs += 1;
                        if paragraphs >= max_paras {
                            return output;
                        }
                    }
                    pos += 1;
                } else if byte.is_ascii_whitespace() {
                    mode = Mode::Text;
                } else if byte == b'=' {
                    head_depth = 1;
                    mode = Mode::InHeading;
                    pos += 1;
                } else if matches!(byte, b'*' | b'#' | b':' | b';') {
                    if input[pos..].starts_with(b"#REDIRECT")
                        || input[pos..].starts_with(b"#redirect")
                        || input[pos..].starts_with(b"#Redirect")
                    {
                        return Vec::new();
                    }
                    pos += 1;
                } else {
                    mode = Mode::Text;
                }
            }

            Mode::InHeading => {
                if byte.is_ascii_whitespace() {
                    pos += 1;
                } else if byte == b'=' {
                    head_depth += 1;
                    pos += 1;
                } else {
                    mode = Mode::InHeadingTitle;
                    pos += 1;
                }
            }

            Mode::InHeadingTitle => {
                if byte == b'=' {
                    head_depth_saved = head_depth;
                    head_depth -= 1;
                    mode = Mode::InHeadingClose;
                }
                pos += 1;
            }

            Mode::InHeadingClose => {
                if byte == b'=' {
                    head_depth -= 1;
                    if head_depth == 0 {
                        return output;
                    }
                    pos += 1;
                } else {
                    head_depth = head_depth_saved;
                    mode = Mode::InHeadingTitle;
                }
            }

            Mode::InTable => {
                if input[pos..].starts_with(b"|}") {
                    table_depth -= 1;
                    pos += 2;
                    if table_depth == 0 {
                        mode = Mode::Text;
                    }
                } else if input[pos..].starts_with(b"{|") {
                    table_depth += 1;
                    pos += 2;
                } else {
                    pos += 1;
                }
            }

            Mode::InTemplate => {
                if input[pos..].starts_with(b"}}") {
                    let outcome = spans::template(&capture_a);
                    if outcome.abort {
                        return Vec::new();
                    }
                    output.extend(outcome.text);
                    pos += 2;
                    template_depth -= 1;
                    if template_depth == 0 {
                        mode = Mode::Text;
                    }
                } else if input[pos..].starts_with(b"{{") {
                    capture_a.extend_from_slice(b"{{");
                    template_depth += 1;
                    pos += 2;
                } else {
                    capture_a.push(byte);
                    pos += 1;
                }
            }

            Mode::InDoubleLink => {
                if input[pos..].starts_with(b"]]") {
                    output.extend(spans::internal_link(&capture_a));
                    pos += 2;
                    double_link_depth -= 1;
                    if double_link_depth == 0 {
                        mode = Mode::Text;
                    }
                } else if input[pos..].starts_with(b"[[") {
                    capture_a.extend_from_slice(b"[[");
                    double_link_depth += 1;
                    pos += 2;
                } else {
                    capture_a.push(byte);
                    pos += 1;
                }
            }

            Mode::InSingleLink => {
                if byte == b']' {
                    output.extend(spans::external_link(&capture_a));
                    pos += 1;
                    single_link_depth -= 1;
                    if single_link_depth == 0 {
                        mode = Mode::Text;
                    }
                } else if byte == b'[' {
                    capture_a.push(b'[');
                    single_link_depth += 1;
                    pos += 1;
                } else {
                    capture_a.push(byte);
                    pos += 1;
                }
            }

            Mode::InParen => {
                if byte == b')' {
                    if output.last() == Some(&b' ') {
                        output.pop();
                    }
                    output.extend(spans::parenthetical(&capture_a, drop_parens));
                    pos += 1;
                    paren_depth -= 1;
                    if paren_depth == 0 {
                        mode = Mode::Text;
                    }
                } else if byte == b'(' {
                    capture_a.push(b'(');
                    paren_depth += 1;
                    pos += 1;
                } else {
                    capture_a.push(byte);
                    pos += 1;
                }
            }

            Mode::InTag => {
                if byte == b'<' && input.get(pos + 1) == Some(&b'/') {
                    let mut name = Vec::new();
                    let mut p = pos + 1;
                    loop {
                        if p >= len {
                            break;
                        }
                        p += 1;
                        let at_end = p >= len;
                        if !at_end && input[p] == b'\n' {
                            // Unterminated closing tag: drop the whole attempt
                            // and resume scanning from the `</` that started it.
                            log::trace!(
                                "unterminated closing tag for <{}>, dropping capture",
                                String::from_utf8_lossy(&capture_a)
                            );
                            capture_a.clear();
                            capture_b.clear();
                            mode = Mode::Text;
                            break;
                        } else if at_end || input[p] == b'>' {
                            pos = p;
                            if name == capture_a {
                                output.extend(spans::tag(&capture_a, &capture_b));
                                capture_a.clear();
                                capture_b.clear();
                                pos = p + 1;
                                mode = Mode::Text;
                                break;
                            } else if at_end {
                                log::trace!(
                                    "reached end of input hunting a closer for <{}>, dropping",
                                    String::from_utf8_lossy(&capture_a)
                                );
                            }
                            // Not our closer: the candidate name buffer is not
                            // reset, so bytes from here on (including further
                            // `<`/`/`/`>` bytes) keep feeding the same match
                            // attempt until it succeeds or input runs out.
                        } else {
                            name.push(input[p]);
                        }
                    }
                } else {
                    capture_b.push(byte);
                    pos += 1;
                }
            }

            Mode::Text => {
                if byte == b'\n' {
                    if output.last() != Some(&b' ') {
                        output.push(b' ');
                    }
                    pos += 1;
                    mode = Mode::LineBegin;
                } else if input[pos..].starts_with(b"__TOC__") || input[pos..].starts_with(b"__FORCETOC__") {
                    return output;
                } else if input[pos..].starts_with(b"__NOTOC__") {
                    pos += 9;
                } else if byte == b'\'' {
                    pos += 1;
                } else if input[pos..].starts_with(b"<!--") {
                    pos = match find(&input[pos + 4..], b"-->") {
                        Some(rel) => pos + 4 + rel + 3,
                        None => {
                            log::trace!("unterminated comment at byte {pos}, consuming to end");
                            len
                        }
                    };
                } else if byte == b'<' {
                    let start = pos;
                    let mut p = start + 1;
                    let mut name_end = None;
                    let mut resolved = false;
                    while p < len {
                        match input[p] {
                            b'\n' => {
                                // Dangling `<`: silently dropped, no output.
                                pos = start + 1;
                                resolved = true;
                                break;
                            }
                            b'>' => {
                                let name = &input[start + 1..p];
                                capture_a = match name_end {
                                    Some(space) => name[..space - (start + 1)].to_vec(),
                                    None => name.to_vec(),
                                };
                                capture_b.clear();
                                pos = p + 1;
                                mode = Mode::InTag;
                                resolved = true;
                                break;
                            }
                            b'/' if input.get(p + 1) == Some(&b'>') => {
                                capture_a.clear();
                                capture_b.clear();
                                pos = p + 1 + 1;
                                resolved = true;
                                break;
                            }
                            b' ' if name_end.is_none() => {
                                name_end = Some(p);
                                p += 1;
                            }
                            _ => p += 1,
                        }
                    }
                    if !resolved {
                        // Ran off the end of input mid-tag: drop the `<` and
                        // let the remainder flow through as ordinary text.
                        log::trace!("unterminated tag open at byte {start}, dropping `<`");
                        pos = start + 1;
                    }
                } else if input[pos..].starts_with(b"{{") {
                    mode = Mode::InTemplate;
                    template_depth = 1;
                    capture_a.clear();
                    pos += 2;
                } else if input[pos..].starts_with(b"{|") {
                    mode = Mode::InTable;
                    table_depth = 1;
                    pos += 2;
                } else if input[pos..].starts_with(b"[[") {
                    mode = Mode::InDoubleLink;
                    double_link_depth = 1;
                    capture_a.clear();
                    pos += 2;
                } else if byte == b'[' {
                    mode = Mode::InSingleLink;
                    single_link_depth = 1;
                    capture_a.clear();
                    pos += 1;
                } else if byte == b'(' {
                    mode = Mode::InParen;
                    paren_depth = 1;
                    capture_a.clear();
                    pos += 1;
                } else {
                    if byte != b' ' || output.last() != Some(&b' ') {
                        output.push(byte);
                    }
                    pos += 1;
                }
            }
        }
    }

    if paragraphs > 1 && max_paras > 1 {
        return parse(input, 1, drop_parens);
    }
    output
}

/// Finds the first occurrence of `needle` in `haystack`, byte-wise.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
