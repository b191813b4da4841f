//! FictionBook 2 importer.

use tracing::debug;

use crate::dom::{Dom, NodeData, NodeId, parse_xml};
use crate::error::Result;
use crate::model::TextSegment;
use crate::util::decode_strict;
use crate::walk::{Vocabulary, walk_body};

/// FictionBook tag names.
///
/// Headings are `title`, `subtitle` or any name starting with `h`. Blank
/// lines are `empty-line`. Names compare case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct FictionBook;

impl Vocabulary for FictionBook {
    fn is_heading(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case("title")
            || tag.eq_ignore_ascii_case("subtitle")
            || tag.starts_with(['h', 'H'])
    }

    fn is_paragraph(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case("p")
    }

    fn is_empty_line(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case("empty-line")
    }

    fn is_bold(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case("strong") || tag.eq_ignore_ascii_case("b")
    }

    fn is_italic(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case("emphasis") || tag.eq_ignore_ascii_case("i")
    }

    fn is_underline(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case("u")
    }

    fn body(&self, dom: &Dom) -> Option<NodeId> {
        dom.find(|node| match &node.data {
            NodeData::Element { name, .. } => name.local.as_ref().eq_ignore_ascii_case("body"),
            _ => false,
        })
    }
}

/// Import a FictionBook document.
///
/// Only the first `<body>` is read; later bodies hold notes and comments.
/// A document without a body yields no segments.
pub fn import_fb2(bytes: &[u8]) -> Result<Vec<TextSegment>> {
    let content = decode_strict(bytes)?;
    let dom = parse_xml(&content)?;
    debug!(nodes = dom.node_count(), "Parsed FictionBook tree");

    Ok(walk_body(&dom, &FictionBook).unwrap_or_default())
}
