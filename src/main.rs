#![warn(
    clippy::pedantic,
    clippy::missing_docs_in_private_items,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::missing_errors_doc)]

//! Extracts short plain-text article abstracts from a MediaWiki XML dump.

use dump::{DumpError, DumpIterator};
use std::io::Write as _;
use std::path::PathBuf;

mod common;
mod driver;
mod dump;
mod title;
mod wikitext;

/// How often, in pages scanned, to emit a progress log line.
const PROGRESS_INTERVAL: u64 = 100_000;

/// Errors that may occur when parsing arguments.
#[derive(Debug, thiserror::Error)]
enum ArgsError {
    /// Missing the dump path argument.
    #[error("missing <dump.xml[.bz2]> argument")]
    MissingDump,
    /// Extra unknown junk on the command line.
    #[error("unknown arguments: {}", _0.display())]
    Extra(std::ffi::OsString),
    /// Some other parsing error.
    #[error(transparent)]
    Pico(#[from] pico_args::Error),
}

/// Command-line arguments.
struct Args {
    /// The path to the MediaWiki XML dump, optionally `.bz2`-compressed.
    dump_path: PathBuf,
}

impl Args {
    /// Parses the process's command-line arguments.
    fn new() -> Result<Self, ArgsError> {
        let mut args = pico_args::Arguments::from_env();

        if args.contains(["-h", "--help"]) {
            usage();
            std::process::exit(0);
        }

        let dump_path = args
            .opt_free_from_str::<PathBuf>()?
            .ok_or(ArgsError::MissingDump)?;

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(ArgsError::Extra(rest.join(std::ffi::OsStr::new(" "))));
        }

        Ok(Self { dump_path })
    }
}

/// Command line usage instructions.
fn usage() {
    let exe = std::env::args().next().unwrap_or_default();
    eprintln!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    eprintln!("Usage: {exe} <dump.xml[.bz2]>\n");
    eprintln!("Extracts one `<title>\\t<abstract>` line per article to standard output.");
}

/// Counters accumulated over a full run, logged as a summary on exit.
#[derive(Default)]
struct Summary {
    /// Total `<page>` elements read from the dump.
    scanned: u64,
    /// Abstracts written to standard output.
    emitted: u64,
    /// Pages rejected by the namespace filter.
    dropped_namespace: u64,
    /// Pages whose abstract came out empty (redirect, disambiguation, or
    /// otherwise content-free).
    skipped_empty: u64,
}

impl core::fmt::Display for Summary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "scanned {} pages, emitted {} abstracts, dropped {} by namespace, skipped {} as empty",
            self.scanned, self.emitted, self.dropped_namespace, self.skipped_empty
        )
    }
}

/// Reads every page out of the dump at `dump_path`, writing one abstract
/// line per accepted, non-empty article to standard output.
fn extract(dump_path: &std::path::Path) -> Result<Summary, DumpError> {
    let mut iterator = DumpIterator::open(dump_path)?;
    let mut summary = Summary::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    while let Some(page) = iterator.next_page()? {
        summary.scanned += 1;
        if summary.scanned % PROGRESS_INTERVAL == 0 {
            log::info!("scanned {} pages so far", summary.scanned);
        }

        let accepted = title::accepts(&page.title);
        match driver::abstract_for(&page.title, &page.wikitext) {
            Some((title, abstract_text)) => {
                writeln!(out, "{title}\t{abstract_text}").map_err(DumpError::Io)?;
                out.flush().map_err(DumpError::Io)?;
                summary.emitted += 1;
            }
            None if !accepted => summary.dropped_namespace += 1,
            None => summary.skipped_empty += 1,
        }
    }

    Ok(summary)
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = match Args::new() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            usage();
            std::process::exit(1);
        }
    };

    log::info!("processing dump {}", args.dump_path.display());

    match extract(&args.dump_path) {
        Ok(summary) => log::info!("{summary}"),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(2);
        }
    }
}
