//! Document trees for the markup formats.
//!
//! FictionBook files are parsed as XML. EPUB content documents are parsed
//! as XHTML first and with a lenient HTML5 tree builder when that fails.
//! Both end up as a [`Dom`].

mod arena;
mod tree_sink;
mod xml;

pub use arena::{Attribute, Children, Dom, Node, NodeData, NodeId};
pub use xml::{parse_xhtml, parse_xml};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DomSink;

/// Parse (X)HTML into a tree. Never fails; malformed markup is repaired.
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}
