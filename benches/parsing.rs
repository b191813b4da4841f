//! Benchmarks for book parsing.
//!
//! Run with: cargo bench

use std::io::{Cursor, Write};

use criterion::{Criterion, criterion_group, criterion_main};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use scrollbook::dom::{parse_html, parse_xml};
use scrollbook::import::{Xhtml, import_text};
use scrollbook::walk::walk_body;
use scrollbook::{Book, Format};

const PARAGRAPH: &str = "It was a bright cold day in April. The clocks were striking thirteen! \
Was anyone <emphasis>listening</emphasis>? Nobody answered.";

const CHAPTERS: usize = 20;
const PARAGRAPHS_PER_CHAPTER: usize = 200;

fn sample_text() -> String {
    let plain = PARAGRAPH
        .replace("<emphasis>", "")
        .replace("</emphasis>", "");
    (0..CHAPTERS * PARAGRAPHS_PER_CHAPTER)
        .map(|_| plain.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn sample_fb2() -> String {
    let mut body = String::new();
    for chapter in 0..CHAPTERS {
        body.push_str(&format!("<section><title><p>Chapter {chapter}</p></title>"));
        for _ in 0..PARAGRAPHS_PER_CHAPTER {
            body.push_str("<p>");
            body.push_str(PARAGRAPH);
            body.push_str("</p>");
        }
        body.push_str("</section>");
    }
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?><FictionBook><body>{body}</body></FictionBook>")
}

fn sample_chapter(n: usize) -> String {
    let paragraph = PARAGRAPH
        .replace("<emphasis>", "<em>")
        .replace("</emphasis>", "</em>");
    let mut body = format!("<h2>Chapter {n}</h2>");
    for _ in 0..PARAGRAPHS_PER_CHAPTER {
        body.push_str("<p>");
        body.push_str(&paragraph);
        body.push_str("</p>");
    }
    format!("<html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>c</title></head><body>{body}</body></html>")
}

fn sample_epub() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/epub+zip").unwrap();

    zip.start_file("META-INF/container.xml", deflated).unwrap();
    zip.write_all(
        br#"<container><rootfiles><rootfile full-path="OEBPS/content.opf"/></rootfiles></container>"#,
    )
    .unwrap();

    let mut manifest = String::new();
    let mut spine = String::new();
    for n in 0..CHAPTERS {
        manifest.push_str(&format!(r#"<item id="c{n}" href="c{n}.xhtml"/>"#));
        spine.push_str(&format!(r#"<itemref idref="c{n}"/>"#));
    }
    zip.start_file("OEBPS/content.opf", deflated).unwrap();
    zip.write_all(format!("<package><manifest>{manifest}</manifest><spine>{spine}</spine></package>").as_bytes())
        .unwrap();

    for n in 0..CHAPTERS {
        zip.start_file(format!("OEBPS/c{n}.xhtml"), deflated).unwrap();
        zip.write_all(sample_chapter(n).as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

// ============================================================================
// Whole-book parsing
// ============================================================================

fn bench_parse_text(c: &mut Criterion) {
    let text = sample_text();
    c.bench_function("parse_text", |b| {
        b.iter(|| Book::from_bytes(text.as_bytes(), Format::Text).unwrap());
    });
}

fn bench_parse_fb2(c: &mut Criterion) {
    let fb2 = sample_fb2();
    c.bench_function("parse_fb2", |b| {
        b.iter(|| Book::from_bytes(fb2.as_bytes(), Format::FictionBook).unwrap());
    });
}

fn bench_parse_epub(c: &mut Criterion) {
    let epub = sample_epub();
    c.bench_function("parse_epub", |b| {
        b.iter(|| Book::from_bytes(&epub, Format::Epub).unwrap());
    });
}

// ============================================================================
// Pipeline stages
// ============================================================================

fn bench_import_text_lines(c: &mut Criterion) {
    let text = sample_text();
    c.bench_function("import_text_lines", |b| {
        b.iter(|| import_text(&text));
    });
}

fn bench_parse_xml_tree(c: &mut Criterion) {
    let fb2 = sample_fb2();
    c.bench_function("parse_xml_tree", |b| {
        b.iter(|| parse_xml(&fb2).unwrap());
    });
}

fn bench_walk_html_chapter(c: &mut Criterion) {
    let dom = parse_html(&sample_chapter(0));
    c.bench_function("walk_html_chapter", |b| {
        b.iter(|| walk_body(&dom, &Xhtml).unwrap());
    });
}

fn bench_reveal_midpoint(c: &mut Criterion) {
    let book = Book::from_bytes(sample_fb2().as_bytes(), Format::FictionBook).unwrap();
    let offset = (book.char_len() / 2) as f64;
    c.bench_function("reveal_midpoint", |b| {
        b.iter(|| book.reveal(offset).count());
    });
}

criterion_group!(
    benches,
    // Whole books
    bench_parse_text,
    bench_parse_fb2,
    bench_parse_epub,
    // Stages
    bench_import_text_lines,
    bench_parse_xml_tree,
    bench_walk_html_chapter,
    bench_reveal_midpoint,
);
criterion_main!(benches);
