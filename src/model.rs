//! The normalized output unit shared by every importer.

use crate::breaks::{HEADING_GAP, PARAGRAPH_BREAK};

/// One run of text with optional style and structure flags.
///
/// Concatenating `text` across a book's segments, in order, gives the exact
/// character stream a renderer indexes by offset. Break segments are plain
/// runs of U+00A0 and count toward that stream like any other text.
///
/// Unset flags (`None`) mean "not specified" and read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TextSegment {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub bold: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub italic: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub underline: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_heading: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_paragraph_break: Option<bool>,
}

impl TextSegment {
    /// Unstyled text with every flag left unset.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Text emitted from a markup tree, with every style flag stated explicitly.
    pub fn styled(
        text: impl Into<String>,
        bold: bool,
        italic: bool,
        underline: bool,
        is_heading: bool,
    ) -> Self {
        Self {
            text: text.into(),
            bold: Some(bold),
            italic: Some(italic),
            underline: Some(underline),
            is_heading: Some(is_heading),
            is_paragraph_break: None,
        }
    }

    /// A paragraph-break marker segment.
    pub fn paragraph_break() -> Self {
        Self::marker(PARAGRAPH_BREAK)
    }

    /// A heading-gap marker segment, emitted on both sides of a heading.
    pub fn heading_gap() -> Self {
        Self::marker(HEADING_GAP)
    }

    fn marker(run: &str) -> Self {
        Self {
            text: run.to_string(),
            is_paragraph_break: Some(true),
            ..Self::default()
        }
    }

    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }

    pub fn is_italic(&self) -> bool {
        self.italic.unwrap_or(false)
    }

    pub fn is_underline(&self) -> bool {
        self.underline.unwrap_or(false)
    }

    pub fn is_heading(&self) -> bool {
        self.is_heading.unwrap_or(false)
    }

    pub fn is_break(&self) -> bool {
        self.is_paragraph_break.unwrap_or(false)
    }

    /// Length in characters, the unit renderers use for offsets.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
