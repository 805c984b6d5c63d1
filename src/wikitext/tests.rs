use super::parse;

fn strip(input: &str) -> String {
    String::from_utf8(parse(input.as_bytes(), 10, true)).expect("test fixtures are ASCII")
}

#[test]
fn plain_text_passes_through() {
    assert_eq!(strip("Hello world."), "Hello world.");
}

#[test]
fn internal_link_keeps_display_text() {
    assert_eq!(strip("Hello [[World]]."), "Hello World.");
    assert_eq!(strip("See [[Earth|the planet]]."), "See the planet.");
}

#[test]
fn internal_link_drops_namespace_prefix() {
    assert_eq!(strip("[[Category:People]] is dropped"), "People is dropped");
}

#[test]
fn internal_link_to_file_is_hidden() {
    assert_eq!(strip("A [[File:Example.png|thumb|caption]] image."), "A image.");
}

#[test]
fn external_link_keeps_label_only() {
    assert_eq!(strip("Visit [https://example.com site] today."), "Visit site today.");
}

#[test]
fn external_link_without_label_keeps_bare_url() {
    assert_eq!(strip("Bare [https://example.com] link."), "Bare https://example.com link.");
}

#[test]
fn template_is_dropped() {
    assert_eq!(strip("Intro {{infobox|x=1}} continues."), "Intro continues.");
}

#[test]
fn disambiguation_template_empties_whole_page() {
    assert_eq!(strip("Some text. {{disambiguation}}"), "");
    assert_eq!(strip("Some text. {{Disambiguation}}"), "");
}

#[test]
fn math_template_keeps_second_field() {
    assert_eq!(strip("Energy {{math|E=mc^2}} is famous."), "Energy E=mc^2 is famous.");
}

#[test]
fn nested_templates_collapse() {
    assert_eq!(strip("A {{outer|{{inner}}}} B"), "A B");
}

#[test]
fn parenthetical_is_dropped_by_default() {
    assert_eq!(strip("Rome (the capital) is old."), "Rome is old.");
}

#[test]
fn parenthetical_is_kept_on_second_pass() {
    let out = parse(b"Rome (the capital) is old.", 10, false);
    assert_eq!(String::from_utf8(out).unwrap(), "Rome (the capital) is old.");
}

#[test]
fn ref_tag_is_dropped() {
    assert_eq!(strip("a<ref>note</ref>b"), "ab");
}

#[test]
fn math_tag_keeps_body() {
    assert_eq!(strip("a<math>x^2</math>b"), "ax^2b");
}

#[test]
fn mismatched_closing_tag_consumes_to_the_real_closer_or_end() {
    // A closer that doesn't name the open tag is not kept as body and does
    // not abort the tag: the candidate name buffer keeps accumulating past
    // it (swallowing further markup bytes, `</math>` included) until a
    // closer finally matches or input runs out, at which point everything
    // since the open tag — captured body included — is dropped.
    assert_eq!(strip("a<math>x</i>y</math>b"), "a");
}

#[test]
fn unterminated_closing_tag_still_matches_at_end_of_input() {
    assert_eq!(strip("a<math>x</math"), "ax");
}

#[test]
fn self_closing_tag_is_dropped() {
    assert_eq!(strip("a<br/>b"), "ab");
}

#[test]
fn comment_is_removed() {
    assert_eq!(strip("before<!-- hidden -->after"), "beforeafter");
}

#[test]
fn unterminated_comment_consumes_rest_of_input() {
    assert_eq!(strip("before<!-- never closed"), "before");
}

#[test]
fn heading_ends_the_parse() {
    assert_eq!(strip("Intro text.\n== Section ==\nmore"), "Intro text. ");
}

#[test]
fn toc_marker_ends_the_parse() {
    assert_eq!(strip("Intro.\n__TOC__\nmore"), "Intro. ");
}

#[test]
fn notoc_marker_is_skipped() {
    assert_eq!(strip("Intro __NOTOC__ text."), "Intro text.");
}

#[test]
fn redirect_line_empties_the_page() {
    assert_eq!(strip("#REDIRECT [[Target]]"), "");
}

#[test]
fn bullet_list_markers_are_dropped() {
    assert_eq!(strip("* one\n* two"), " one two");
}

#[test]
fn table_is_skipped() {
    assert_eq!(strip("Before {| class=wikitable\n|-\n| cell\n|} after"), "Before after");
}

#[test]
fn apostrophes_are_stripped_for_bold_and_italic() {
    assert_eq!(strip("''italic'' and '''bold'''"), "italic and bold");
}

#[test]
fn multiple_paragraphs_are_truncated_to_max() {
    let out = parse(b"first para\n\nsecond para\n\nthird para", 2, true);
    assert_eq!(String::from_utf8(out).unwrap(), "first para second para ");
}

#[test]
fn single_paragraph_pages_keep_full_output() {
    assert_eq!(strip("Just one paragraph, no breaks."), "Just one paragraph, no breaks.");
}

#[test]
fn whitespace_collapses_across_newlines() {
    assert_eq!(strip("line one\nline two"), "line one line two");
}
