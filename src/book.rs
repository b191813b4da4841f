//! Format dispatch and the parsed book handle.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::format::Format;
use crate::import::{import_epub, import_fb2, import_text_bytes};
use crate::model::TextSegment;

/// A fully parsed book: its format and its frozen segment sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    format: Format,
    segments: Vec<TextSegment>,
}

impl Book {
    /// Open a book from disk, detecting the format from the file name.
    ///
    /// ```no_run
    /// use scrollbook::Book;
    ///
    /// let book = Book::open("path/to/book.epub")?;
    /// println!("{} characters", book.char_len());
    /// # Ok::<(), scrollbook::Error>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        info!(path = %path.display(), %format, "Opening book");

        let file = File::open(path)?;
        Self::from_reader(file, format)
    }

    /// Parse a book of a known format from any [`Read`] + [`Seek`] source.
    pub fn from_reader<R: Read + Seek>(mut reader: R, format: Format) -> Result<Self> {
        let segments = match format {
            Format::Epub => import_epub(reader)?,
            Format::Text => import_text_bytes(&read_all(&mut reader)?)?,
            Format::FictionBook => import_fb2(&read_all(&mut reader)?)?,
        };

        let book = Self { format, segments };
        info!(
            %format,
            segments = book.segments.len(),
            chars = book.char_len(),
            "Finished parsing book"
        );
        Ok(book)
    }

    /// Parse an in-memory book of a known format.
    pub fn from_bytes(bytes: &[u8], format: Format) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes), format)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<TextSegment> {
        self.segments
    }

    /// Total length in characters of all segments, break markers included.
    pub fn char_len(&self) -> usize {
        self.segments.iter().map(TextSegment::char_len).sum()
    }

    /// The visible part of the book at a character offset.
    ///
    /// Yields every segment that ends at or before `offset` in full, then
    /// the prefix of the segment straddling it, then stops. Fractional
    /// offsets are floored; negative and NaN offsets reveal nothing.
    pub fn reveal(&self, offset: f64) -> Reveal<'_> {
        let budget = if offset.is_nan() || offset <= 0.0 {
            0
        } else {
            // `as` saturates, so infinity reveals everything
            offset.floor() as usize
        };
        Reveal {
            segments: self.segments.iter(),
            budget,
        }
    }
}

/// Iterator returned by [`Book::reveal`]: `(segment, visible text)` pairs.
pub struct Reveal<'a> {
    segments: std::slice::Iter<'a, TextSegment>,
    budget: usize,
}

impl<'a> Iterator for Reveal<'a> {
    type Item = (&'a TextSegment, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.budget == 0 {
            return None;
        }
        let segment = self.segments.next()?;

        let visible = match segment.text.char_indices().nth(self.budget) {
            Some((end, _)) => {
                self.budget = 0;
                &segment.text[..end]
            }
            None => {
                self.budget -= segment.char_len();
                segment.text.as_str()
            }
        };
        Some((segment, visible))
    }
}

fn read_all<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Detect the format from `file_name` and parse `reader` with it.
///
/// An unrecognized name fails before any bytes are read.
pub fn parse<R: Read + Seek>(file_name: &str, reader: R) -> Result<Vec<TextSegment>> {
    let format = Format::from_file_name(file_name)?;
    Ok(Book::from_reader(reader, format)?.into_segments())
}
