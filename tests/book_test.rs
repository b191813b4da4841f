//! Format dispatch, file access and offset reveal.

use std::fs;
use std::io::Cursor;

use tempfile::TempDir;

use scrollbook::breaks::SENTENCE_BREAK;
use scrollbook::{Book, ErrorKind, Format, TextSegment, parse};

const FB2: &str = "<FictionBook><body><title>Intro</title><p>Text here.</p></body></FictionBook>";

#[test]
fn test_open_detects_format_from_extension() {
    let dir = TempDir::new().unwrap();

    let txt = dir.path().join("notes.TXT");
    fs::write(&txt, "Hello world. Next line.\n\nSecond line here").unwrap();
    let book = Book::open(&txt).unwrap();
    assert_eq!(book.format(), Format::Text);
    assert_eq!(book.segments().len(), 3);

    let fb2 = dir.path().join("story.fb2");
    fs::write(&fb2, FB2).unwrap();
    let book = Book::open(&fb2).unwrap();
    assert_eq!(book.format(), Format::FictionBook);
    assert!(book.segments()[1].is_heading());
}

#[test]
fn test_open_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("book.pdf");
    fs::write(&path, "%PDF-1.7").unwrap();

    let err = Book::open(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedFormat);
    assert!(err.to_string().contains("book.pdf"));
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Book::open(dir.path().join("absent.txt")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodingFailure);
}

#[test]
fn test_open_epub_with_wrong_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake.epub");
    fs::write(&path, "plain text pretending").unwrap();

    let err = Book::open(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodingFailure);
}

#[test]
fn test_parse_dispatches_by_name() {
    let text = parse("a.txt", Cursor::new(b"Line.".to_vec())).unwrap();
    assert_eq!(text, vec![TextSegment::text(format!("Line.{SENTENCE_BREAK}"))]);

    let fb2 = parse("a.fb2", Cursor::new(FB2.as_bytes())).unwrap();
    assert_eq!(fb2.len(), 6);

    for name in ["a.pdf", "README", "archive.epub.zip", ""] {
        let err = parse(name, Cursor::new(Vec::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedFormat, "{name}");
    }
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse("a.fb2", Cursor::new(FB2.as_bytes())).unwrap();
    let second = parse("a.fb2", Cursor::new(FB2.as_bytes())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_reveal_walks_into_book() {
    let book = Book::from_bytes(b"abc\n\nxyz", Format::Text).unwrap();
    // "abc" + 10 sentence, 25 paragraph, "xyz" + 10 sentence
    assert_eq!(book.char_len(), 13 + 25 + 13);

    let visible: Vec<_> = book.reveal(14.0).collect();
    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].1, book.segments()[0].text);
    assert_eq!(visible[1].1, "\u{a0}");
    assert!(visible[1].0.is_break());

    let everything: String = book.reveal(book.char_len() as f64).map(|(_, t)| t).collect();
    let concatenated: String = book.segments().iter().map(|s| s.text.as_str()).collect();
    assert_eq!(everything, concatenated);
}
