//! EPUB importer.
//!
//! Resolution is two-level: `META-INF/container.xml` names the package
//! document (OPF), whose manifest maps ids to paths and whose spine lists
//! those ids in reading order. Each spine document's `<body>` is walked in
//! turn and the results are concatenated. Content documents are read as
//! XHTML, or as HTML when they are not well-formed.

use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::dom::{Dom, parse_html, parse_xhtml};
use crate::error::{Error, Result};
use crate::model::TextSegment;
use crate::util::{
    decode_strict, decode_text, extract_xml_encoding, local_name, parent_dir,
    resolve_relative_path,
};
use crate::walk::{Vocabulary, walk_body};

const CONTAINER_PATH: &str = "META-INF/container.xml";

/// XHTML tag names used by EPUB content documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xhtml;

impl Vocabulary for Xhtml {
    fn is_heading(&self, tag: &str) -> bool {
        matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
    }

    fn is_paragraph(&self, tag: &str) -> bool {
        tag == "p"
    }

    fn is_bold(&self, tag: &str) -> bool {
        matches!(tag, "strong" | "b")
    }

    fn is_italic(&self, tag: &str) -> bool {
        matches!(tag, "em" | "i")
    }

    fn is_underline(&self, tag: &str) -> bool {
        tag == "u"
    }
}

/// The parts of a package document needed to find the reading order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Package {
    /// Manifest id -> archive path, resolved against the package directory.
    pub manifest: HashMap<String, String>,
    /// Spine `idref`s in reading order.
    pub spine: Vec<String>,
}

impl Package {
    /// Spine `idref`s in order, each paired with its archive path when the
    /// manifest has one.
    pub fn reading_order(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.spine
            .iter()
            .map(|id| (id.as_str(), self.manifest.get(id).map(String::as_str)))
    }
}

/// Import an EPUB from any [`Read`] + [`Seek`] source.
///
/// Missing container descriptor, package path or package document abort the
/// import. Spine entries that cannot be resolved, read or parsed are skipped.
pub fn import_epub<R: Read + Seek>(reader: R) -> Result<Vec<TextSegment>> {
    let mut archive = ZipArchive::new(reader)?;

    let opf_path = find_opf_path(&mut archive)?;
    debug!(opf_path = %opf_path, "Found package document");

    let opf_bytes = match read_archive_file_bytes(&mut archive, &opf_path) {
        Ok(bytes) => bytes,
        Err(Error::Zip(ZipError::FileNotFound)) => return Err(Error::missing("package document")),
        Err(e) => return Err(e),
    };
    let opf_content = decode_strict(&opf_bytes)?;
    let package = parse_opf(&opf_content, parent_dir(&opf_path))?;
    debug!(
        manifest = package.manifest.len(),
        spine = package.spine.len(),
        "Parsed package document"
    );

    let mut segments = Vec::new();
    for (idref, path) in package.reading_order() {
        let Some(path) = path else {
            warn!(idref, "Skipping spine item with no manifest entry");
            continue;
        };

        let bytes = match read_archive_file_bytes(&mut archive, path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(idref, path, "Skipping unreadable spine item: {e}");
                continue;
            }
        };

        let html = decode_text(&bytes, extract_xml_encoding(&bytes));
        let dom = parse_content(&html, path);
        match walk_body(&dom, &Xhtml) {
            Some(chapter) => {
                debug!(path, segments = chapter.len(), "Walked spine item");
                segments.extend(chapter);
            }
            None => warn!(idref, path, "Skipping spine item without a body"),
        }
    }

    Ok(segments)
}

/// Parse a content document as XHTML, falling back to HTML5 rules when it
/// is not well-formed XML.
fn parse_content(html: &str, path: &str) -> Dom {
    match parse_xhtml(html) {
        Ok(dom) => dom,
        Err(e) => {
            debug!(path, "Parsing as HTML: {e}");
            parse_html(html)
        }
    }
}

fn find_opf_path<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String> {
    let container_bytes = match read_archive_file_bytes(archive, CONTAINER_PATH) {
        Ok(bytes) => bytes,
        Err(Error::Zip(ZipError::FileNotFound)) => {
            return Err(Error::missing("container descriptor"));
        }
        Err(e) => return Err(e),
    };
    let container = decode_strict(&container_bytes)?;

    parse_container(&container)?.ok_or_else(|| Error::missing("package path"))
}

/// The `full-path` of the first `<rootfile>` in a container descriptor.
fn parse_container(content: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if local_name(e.name().as_ref()) == b"rootfile" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"full-path" {
                        let path = std::str::from_utf8(&attr.value)?.trim();
                        return Ok((!path.is_empty()).then(|| path.to_string()));
                    }
                }
                return Ok(None);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Parse the manifest and spine of a package document.
///
/// Manifest hrefs are resolved against `opf_dir`. Items missing an id or
/// an href are ignored.
pub fn parse_opf(content: &str, opf_dir: &str) -> Result<Package> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut package = Package::default();

    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"item" => {
                        let mut id = None;
                        let mut href = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"id" => id = Some(std::str::from_utf8(&attr.value)?.to_string()),
                                b"href" => {
                                    href = Some(std::str::from_utf8(&attr.value)?.to_string())
                                }
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(href)) = (id, href)
                            && !id.is_empty()
                            && !href.is_empty()
                        {
                            let path = resolve_relative_path(opf_dir, &href);
                            package.manifest.insert(id, path);
                        }
                    }
                    b"itemref" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"idref" {
                                package
                                    .spine
                                    .push(std::str::from_utf8(&attr.value)?.to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(package)
}

fn read_archive_file_bytes<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Vec<u8>> {
    match archive.by_name(path) {
        Ok(mut file) => {
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            return Ok(contents);
        }
        Err(ZipError::FileNotFound) => {}
        Err(e) => return Err(e.into()),
    }

    // Fallback: manifests sometimes percent-encode names stored literally
    let decoded = percent_encoding::percent_decode_str(path).decode_utf8()?;
    if decoded == path {
        return Err(ZipError::FileNotFound.into());
    }

    let mut file = archive.by_name(&decoded)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}
