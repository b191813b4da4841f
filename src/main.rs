//! scrollbook - inspect how a book normalizes into text segments

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scrollbook::Book;
use scrollbook::breaks::{BREAK_CHAR, HEADING_GAP, PARAGRAPH_BREAK};

#[derive(Parser)]
#[command(name = "scrollbook")]
#[command(version, about = "Normalize TXT, FB2 and EPUB books into styled text segments", long_about = None)]
#[command(after_help = "EXAMPLES:
    scrollbook book.epub                Show a segment summary
    scrollbook book.fb2 --json          Dump all segments as JSON
    scrollbook notes.txt --reveal 500   Print the first 500 characters")]
struct Cli {
    /// Input file (TXT, FB2, or EPUB)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Print every segment as JSON
    #[arg(long, conflicts_with = "reveal")]
    json: bool,

    /// Print the text visible at this character offset
    #[arg(long, value_name = "OFFSET")]
    reveal: Option<f64>,

    /// Log progress (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default = match (cli.verbose, cli.quiet) {
        (true, _) => "info",
        (_, true) => "error",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let book = Book::open(&cli.input).map_err(|e| e.to_string())?;

    if cli.json {
        let json = serde_json::to_string_pretty(book.segments()).map_err(|e| e.to_string())?;
        println!("{json}");
    } else if let Some(offset) = cli.reveal {
        let visible: String = book.reveal(offset).map(|(_, text)| text).collect();
        println!("{}", render_breaks(&visible));
    } else {
        show_info(&cli.input, &book);
    }

    Ok(())
}

fn show_info(path: &str, book: &Book) {
    let segments = book.segments();
    let headings = segments.iter().filter(|s| s.is_heading()).count();
    let breaks = segments.iter().filter(|s| s.is_break()).count();

    println!("File: {path}");
    println!("Format: {} (.{})", book.format(), book.format().extension());
    println!("Segments: {}", segments.len());
    println!("Characters: {}", book.char_len());
    println!("Heading segments: {headings}");
    println!("Paragraph-break segments: {breaks}");
}

/// Make break runs readable on a terminal: long runs become line breaks,
/// shorter ones a single space.
fn render_breaks(text: &str) -> String {
    let paragraph = PARAGRAPH_BREAK.chars().count();
    let heading = HEADING_GAP.chars().count();

    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    let flush = |out: &mut String, run: usize| match run {
        0 => {}
        n if n >= heading => out.push_str("\n\n"),
        n if n >= paragraph => out.push('\n'),
        _ => out.push(' '),
    };

    for c in text.chars() {
        if c == BREAK_CHAR {
            run += 1;
            continue;
        }
        flush(&mut out, run);
        run = 0;
        out.push(c);
    }
    flush(&mut out, run);
    out
}
