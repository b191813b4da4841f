//! Plain-text importer.

use crate::breaks::{SENTENCE_BREAK, add_sentence_breaks};
use crate::error::Result;
use crate::model::TextSegment;
use crate::util::decode_strict;

/// Decode `bytes` as UTF-8 and import them as plain text.
pub fn import_text_bytes(bytes: &[u8]) -> Result<Vec<TextSegment>> {
    let content = decode_strict(bytes)?;
    Ok(import_text(&content))
}

/// Split `content` into lines and emit one segment per non-blank line.
///
/// A run of blank lines between two non-blank lines becomes a single
/// paragraph break. Blank lines before the first or after the last
/// non-blank line produce nothing.
pub fn import_text(content: &str) -> Vec<TextSegment> {
    let lines: Vec<&str> = content.split('\n').map(str::trim).collect();
    let mut segments = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            let next_has_text = lines.get(i + 1).is_some_and(|next| !next.is_empty());
            if next_has_text && !segments.is_empty() {
                segments.push(TextSegment::paragraph_break());
            }
            continue;
        }

        let mut text = add_sentence_breaks(line);
        text.push_str(SENTENCE_BREAK);
        segments.push(TextSegment::text(text));
    }

    segments
}
