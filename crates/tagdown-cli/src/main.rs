//! tagdown CLI - convert HTML to Markdown.
//!
//! Reads an HTML file (or stdin) and writes Markdown to stdout or a file,
//! one top-level block at a time.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tagdown::{
    CodeBlockStyle, HeadingStyle, LinkReferenceStyle, LinkStyle, Options, TagdownService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Convert HTML to Markdown.
#[derive(Debug, Parser)]
#[command(name = "tagdown", version, about)]
struct Cli {
    /// HTML file to convert; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Write Markdown to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use the lol_html streaming walker instead of building a DOM
    #[arg(long)]
    streaming: bool,

    /// Heading style: atx or setext
    #[arg(long, value_name = "STYLE")]
    heading_style: Option<HeadingStyle>,

    /// Horizontal rule string
    #[arg(long, value_name = "STRING")]
    hr: Option<String>,

    /// Bullet list marker
    #[arg(long, value_name = "CHAR")]
    bullet_list_marker: Option<char>,

    /// Code block style: indented or fenced
    #[arg(long, value_name = "STYLE")]
    code_block_style: Option<CodeBlockStyle>,

    /// Fence for fenced code blocks
    #[arg(long, value_name = "STRING")]
    fence: Option<String>,

    /// Emphasis delimiter
    #[arg(long, value_name = "CHAR")]
    em_delimiter: Option<char>,

    /// Strong delimiter
    #[arg(long, value_name = "STRING")]
    strong_delimiter: Option<String>,

    /// Link style: referenced or inlined
    #[arg(long, value_name = "STYLE")]
    link_style: Option<LinkStyle>,

    /// Reference style for referenced links: full, collapsed or shortcut
    #[arg(long, value_name = "STYLE")]
    link_reference_style: Option<LinkReferenceStyle>,

    /// Drop elements with this tag and their content (repeatable)
    #[arg(long, value_name = "TAG")]
    remove: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let defaults = Options::default();
        Options {
            heading_style: self.heading_style.unwrap_or(defaults.heading_style),
            hr: self.hr.clone().unwrap_or(defaults.hr),
            bullet_list_marker: self.bullet_list_marker.unwrap_or(defaults.bullet_list_marker),
            code_block_style: self.code_block_style.unwrap_or(defaults.code_block_style),
            fence: self.fence.clone().unwrap_or(defaults.fence),
            em_delimiter: self.em_delimiter.unwrap_or(defaults.em_delimiter),
            strong_delimiter: self.strong_delimiter.clone().unwrap_or(defaults.strong_delimiter),
            link_style: self.link_style.unwrap_or(defaults.link_style),
            link_reference_style: self
                .link_reference_style
                .unwrap_or(defaults.link_reference_style),
        }
    }

    fn service(&self) -> TagdownService {
        let mut service = TagdownService::with_options(self.options());
        for tag in &self.remove {
            service.remove(tag);
        }
        service
    }
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> tagdown::Result<()> {
    let html = read_input(cli.input.as_deref())?;
    info!(bytes = html.len(), streaming = cli.streaming, "converting");

    let service = cli.service();
    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let mut output = if cli.streaming {
        service.convert_html_streaming_to(&html, output)?
    } else {
        service.convert_html_to(&html, output)?
    };
    output.flush()?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut html = String::new();
            io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
    }
}
