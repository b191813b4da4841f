//! # scrollbook
//!
//! Normalizes books into a single flat sequence of styled text segments
//! for character-offset rendering, such as a display that reveals text up
//! to an arbitrary position.
//!
//! ## Formats
//!
//! - Plain text (`.txt`)
//! - FictionBook 2 (`.fb2`)
//! - EPUB 2/3 (`.epub`)
//!
//! ## Quick Start
//!
//! ```no_run
//! use scrollbook::Book;
//!
//! let book = Book::open("input.epub")?;
//! for segment in book.segments() {
//!     print!("{}", segment.text);
//! }
//! # Ok::<(), scrollbook::Error>(())
//! ```
//!
//! ## Break markers
//!
//! Structure is encoded in the text itself as runs of U+00A0: 10 after a
//! sentence, 25 for a paragraph break, 30 around a heading. Break
//! segments have `is_paragraph_break` set and no style flags, but still
//! count toward character offsets.
//!
//! ```
//! use scrollbook::{Book, Format, breaks::SENTENCE_BREAK};
//!
//! let book = Book::from_bytes(b"Hello world. Next line.", Format::Text)?;
//! assert_eq!(
//!     book.segments()[0].text,
//!     format!("Hello world.{SENTENCE_BREAK}Next line.{SENTENCE_BREAK}")
//! );
//! # Ok::<(), scrollbook::Error>(())
//! ```

pub mod book;
pub mod breaks;
pub mod dom;
pub mod error;
pub mod format;
pub mod import;
pub mod model;
pub(crate) mod util;
pub mod walk;

pub use book::{Book, Reveal, parse};
pub use error::{Error, ErrorKind, Result};
pub use format::Format;
pub use model::TextSegment;
pub use walk::{Inherited, Vocabulary};
