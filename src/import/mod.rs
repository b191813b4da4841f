//! Format importers.
//!
//! Each importer turns one source format into a flat, ordered
//! [`TextSegment`](crate::TextSegment) sequence:
//! - [`text`]: line-oriented plain text
//! - [`fb2`]: FictionBook XML, walked with the [`FictionBook`] vocabulary
//! - [`epub`]: zipped XHTML, resolved through container, manifest and spine,
//!   each document walked with the [`Xhtml`] vocabulary

pub mod epub;
pub mod fb2;
pub mod text;

pub use epub::{Package, Xhtml, import_epub, parse_opf};
pub use fb2::{FictionBook, import_fb2};
pub use text::{import_text, import_text_bytes};
