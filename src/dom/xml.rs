//! Build a [`Dom`] from well-formed XML with quick-xml.

use html5ever::{LocalName, QualName, ns};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::arena::{Attribute, Dom, NodeId};
use crate::error::{Error, Result};
use crate::util::local_name;

/// Parse XML into a tree.
///
/// Element and attribute names are reduced to their local part, so `fb:p`
/// and `p` look the same to the walker. Entity and character references are
/// resolved into the surrounding text, CDATA becomes text, and comments,
/// processing instructions and the declaration become [`NodeData::Other`].
/// Unknown named entities are dropped and unclosed elements are closed at
/// the end of input.
///
/// [`NodeData::Other`]: super::NodeData::Other
pub fn parse_xml(content: &str) -> Result<Dom> {
    build(content, false)
}

/// Parse an XHTML document as XML, refusing anything XML alone cannot
/// represent faithfully.
///
/// Unlike [`parse_xml`], an unknown named entity (an HTML entity such as
/// `&mdash;` with no DTD) or an element left open at the end of input is an
/// error, so the caller can fall back to an HTML parser.
pub fn parse_xhtml(content: &str) -> Result<Dom> {
    build(content, true)
}

fn build(content: &str, strict: bool) -> Result<Dom> {
    let mut reader = Reader::from_str(content);
    // Text inside inline markup is significant; never let the reader trim it
    reader.config_mut().trim_text(false);

    let mut dom = Dom::new();
    let mut open: Vec<NodeId> = vec![dom.document()];

    loop {
        let parent = open.last().copied().unwrap_or_else(|| dom.document());
        match reader.read_event()? {
            Event::Start(e) => {
                let id = create_element(&mut dom, &e)?;
                dom.append(parent, id);
                open.push(id);
            }
            Event::Empty(e) => {
                let id = create_element(&mut dom, &e)?;
                dom.append(parent, id);
            }
            Event::End(_) => {
                if open.len() > 1 {
                    open.pop();
                }
            }
            Event::Text(e) => {
                let raw = String::from_utf8_lossy(e.as_ref());
                dom.append_text(parent, &raw);
            }
            Event::CData(e) => {
                let raw = String::from_utf8_lossy(&e);
                dom.append_text(parent, &raw);
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&entity) {
                    Some(resolved) => dom.append_text(parent, &resolved),
                    None if strict => {
                        return Err(Error::Markup(format!("unknown entity &{entity};")));
                    }
                    None => {}
                }
            }
            Event::Eof if strict && open.len() > 1 => {
                return Err(Error::Markup("unclosed element at end of input".into()));
            }
            Event::Eof => break,
            _ => {
                let other = dom.create_other();
                dom.append(parent, other);
            }
        }
    }

    Ok(dom)
}

fn create_element(dom: &mut Dom, e: &BytesStart<'_>) -> Result<NodeId> {
    let name = e.name();
    let tag = std::str::from_utf8(local_name(name.as_ref()))?;

    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(local_name(attr.key.as_ref()))?;
        attrs.push(Attribute {
            name: qualify(key),
            value: String::from_utf8_lossy(&attr.value).into_owned(),
        });
    }

    Ok(dom.create_element(qualify(tag), attrs))
}

fn qualify(local: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(local))
}

/// Resolve a predefined entity or a numeric character reference.
fn resolve_entity(entity: &str) -> Option<String> {
    let resolved = match entity {
        "apos" => "'",
        "quot" => "\"",
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "nbsp" => "\u{a0}",
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            return char::from_u32(code).map(String::from);
        }
    };
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;

    fn texts(dom: &Dom, id: NodeId) -> Vec<String> {
        dom.children(id)
            .filter_map(|c| dom.text_content(c).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_entities_merge_into_one_text_node() {
        let dom = parse_xml("<p>Don&apos;t &amp; won&#39;t &#x2014; ok</p>").unwrap();
        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(texts(&dom, p), vec!["Don't & won't \u{2014} ok"]);
    }

    #[test]
    fn test_namespaced_names_reduced() {
        let dom = parse_xml(r##"<fb:body xmlns:fb="x"><fb:p l:href="#n1">a</fb:p></fb:body>"##)
            .unwrap();
        let p = dom.find_by_tag("p").expect("prefix stripped");
        assert_eq!(dom.get_attr(p, "href"), Some("#n1"));
        assert!(dom.find_by_tag("body").is_some());
    }

    #[test]
    fn test_empty_elements_and_cdata() {
        let dom = parse_xml("<body><empty-line/><p><![CDATA[a < b]]></p></body>").unwrap();
        let body = dom.find_by_tag("body").unwrap();
        let children: Vec<_> = dom.children(body).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(dom.element_name(children[0]).unwrap().as_ref(), "empty-line");
        assert_eq!(texts(&dom, children[1]), vec!["a < b"]);
    }

    #[test]
    fn test_comments_become_other() {
        let dom = parse_xml("<?xml version=\"1.0\"?><body><!-- note --><p>x</p></body>").unwrap();
        let body = dom.find_by_tag("body").unwrap();
        let first = dom.children(body).next().unwrap();
        assert!(matches!(dom.get(first).unwrap().data, NodeData::Other));
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        assert!(parse_xml("<body><p>x</b></body>").is_err());
    }

    #[test]
    fn test_xhtml_self_closed_elements() {
        let dom = parse_xhtml(
            r#"<?xml version="1.0"?><html xmlns="http://www.w3.org/1999/xhtml"><head><title/></head><body><a id="x"/><p>after</p></body></html>"#,
        )
        .unwrap();
        let body = dom.find_by_tag("body").unwrap();
        let children: Vec<_> = dom.children(body).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(dom.element_name(children[0]).unwrap().as_ref(), "a");
        assert_eq!(texts(&dom, children[1]), vec!["after"]);
    }

    #[test]
    fn test_xhtml_rejects_what_html_must_handle() {
        assert!(parse_xhtml("<body><p>a &mdash; b</p></body>").is_err());
        assert!(parse_xhtml("<body><p>unclosed").is_err());

        let dom = parse_xml("<body><p>a &mdash; b</p></body>").unwrap();
        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(texts(&dom, p), vec!["a  b"]);
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("#65").as_deref(), Some("A"));
        assert_eq!(resolve_entity("#x41").as_deref(), Some("A"));
        assert_eq!(resolve_entity("bogus"), None);
        assert_eq!(resolve_entity("#xZZ"), None);
    }
}
