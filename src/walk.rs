//! Tree walk shared by the markup importers.
//!
//! The walk visits nodes in document order and emits one segment per
//! non-blank text node, plus break markers at heading and paragraph
//! boundaries. Formats differ only in which tag names mean what; that is
//! captured by a [`Vocabulary`].

use crate::breaks::{SENTENCE_BREAK, add_sentence_breaks, ends_sentence};
use crate::dom::{Dom, NodeData, NodeId};
use crate::model::TextSegment;

/// Tag-name predicates for one markup format.
///
/// Tag names arrive as local names (namespace prefix removed).
pub trait Vocabulary {
    /// Elements whose content is a heading.
    fn is_heading(&self, tag: &str) -> bool;

    /// Elements that end with a paragraph break.
    fn is_paragraph(&self, tag: &str) -> bool;

    /// Elements that stand for a blank line and have no content of their own.
    fn is_empty_line(&self, _tag: &str) -> bool {
        false
    }

    fn is_bold(&self, tag: &str) -> bool;

    fn is_italic(&self, tag: &str) -> bool;

    fn is_underline(&self, tag: &str) -> bool;

    /// The element the walk starts from.
    fn body(&self, dom: &Dom) -> Option<NodeId> {
        dom.find_by_tag("body")
    }
}

/// Formatting context inherited from ancestors.
///
/// Passed by value; each level derives its children's context with
/// [`Inherited::within`] and never mutates its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inherited {
    pub heading: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Inherited {
    /// Context for the children of an inline element named `tag`.
    ///
    /// Flags only ever turn on.
    pub fn within<V: Vocabulary + ?Sized>(self, vocab: &V, tag: &str) -> Self {
        Self {
            bold: self.bold || vocab.is_bold(tag),
            italic: self.italic || vocab.is_italic(tag),
            underline: self.underline || vocab.is_underline(tag),
            ..self
        }
    }

    /// Context for the content of a heading.
    pub fn heading(self) -> Self {
        Self {
            heading: true,
            bold: true,
            ..self
        }
    }
}

/// Walk the vocabulary's body element, if the document has one.
pub fn walk_body<V: Vocabulary + ?Sized>(dom: &Dom, vocab: &V) -> Option<Vec<TextSegment>> {
    let body = vocab.body(dom)?;
    let mut out = Vec::new();
    walk(dom, body, vocab, Inherited::default(), &mut out);
    Some(out)
}

/// Pending work on the explicit walk stack.
enum Frame {
    /// Visit a node with the context inherited from its parent.
    Enter(NodeId, Inherited),
    /// All children of a heading have been visited.
    ExitHeading,
    /// All children of a paragraph have been visited.
    ExitParagraph,
}

/// Append the segments for `node` and its descendants to `out`.
///
/// Runs on an explicit stack, so nesting depth is bounded only by memory.
pub fn walk<V: Vocabulary + ?Sized>(
    dom: &Dom,
    node: NodeId,
    vocab: &V,
    ctx: Inherited,
    out: &mut Vec<TextSegment>,
) {
    let mut stack = vec![Frame::Enter(node, ctx)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id, ctx) => enter(dom, id, vocab, ctx, out, &mut stack),
            Frame::ExitHeading => {
                out.push(TextSegment::heading_gap());
                out.push(TextSegment::paragraph_break());
            }
            Frame::ExitParagraph => out.push(TextSegment::paragraph_break()),
        }
    }
}

fn enter<V: Vocabulary + ?Sized>(
    dom: &Dom,
    node: NodeId,
    vocab: &V,
    ctx: Inherited,
    out: &mut Vec<TextSegment>,
    stack: &mut Vec<Frame>,
) {
    let Some(data) = dom.get(node).map(|n| &n.data) else {
        return;
    };

    match data {
        NodeData::Text(text) => {
            if let Some(segment) = text_segment(text, ctx) {
                out.push(segment);
            }
        }
        NodeData::Element { name, .. } => {
            let tag = name.local.as_ref();

            if vocab.is_heading(tag) {
                out.push(TextSegment::heading_gap());
                stack.push(Frame::ExitHeading);
                push_children(dom, node, ctx.heading(), stack);
            } else if vocab.is_empty_line(tag) {
                out.push(TextSegment::paragraph_break());
            } else if vocab.is_paragraph(tag) {
                stack.push(Frame::ExitParagraph);
                push_children(dom, node, ctx, stack);
            } else {
                push_children(dom, node, ctx.within(vocab, tag), stack);
            }
        }
        NodeData::Document | NodeData::Other => {}
    }
}

/// Schedule `node`'s children so they pop in document order.
fn push_children(dom: &Dom, node: NodeId, ctx: Inherited, stack: &mut Vec<Frame>) {
    let start = stack.len();
    stack.extend(dom.children(node).map(|child| Frame::Enter(child, ctx)));
    stack[start..].reverse();
}

/// Segment for one text node, or `None` when it is blank.
fn text_segment(raw: &str, ctx: Inherited) -> Option<TextSegment> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut text = add_sentence_breaks(trimmed);
    if ends_sentence(trimmed) {
        text.push_str(SENTENCE_BREAK);
    }
    text.push(' ');

    Some(TextSegment::styled(
        text,
        ctx.heading || ctx.bold,
        ctx.italic,
        ctx.underline,
        ctx.heading,
    ))
}
