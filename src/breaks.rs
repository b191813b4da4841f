//! Break markers: spacing semantics encoded directly in the character stream.
//!
//! A renderer that walks segments by character offset has no notion of
//! paragraphs or headings, so structure is expressed as runs of U+00A0,
//! which layout engines do not collapse. Longer runs mean longer pauses.

/// The marker character. Non-breaking space keeps its width in layout.
pub const BREAK_CHAR: char = '\u{a0}';

/// Inserted after terminal punctuation, and after every emitted line.
pub const SENTENCE_BREAK: &str = "\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}";

/// Stands in for a blank line or the end of a paragraph element.
pub const PARAGRAPH_BREAK: &str = "\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}";

/// Surrounds heading content.
pub const HEADING_GAP: &str = "\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}";

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Replace every whitespace run that follows `.`, `!` or `?` with
/// [`SENTENCE_BREAK`], keeping the punctuation.
///
/// A single left-to-right pass; markers it inserts are never rescanned.
pub fn add_sentence_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if !is_terminal(c) || !chars.peek().is_some_and(|n| n.is_whitespace()) {
            continue;
        }
        while chars.next_if(|n| n.is_whitespace()).is_some() {}
        out.push_str(SENTENCE_BREAK);
    }

    out
}

/// Whether `text` ends with terminal punctuation.
pub fn ends_sentence(text: &str) -> bool {
    text.chars().next_back().is_some_and(is_terminal)
}
