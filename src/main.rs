//! CLI for bibfilter - Generate citation-ordered BibTeX files from LaTeX documents.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use bibfilter::{extract_citations, load_bib, render_bibliography, select_entries, BibError};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Generate a citation-ordered BibTeX file from a LaTeX document
#[derive(Parser)]
#[command(name = "bibfilter")]
#[command(version)]
#[command(after_help = "\
Examples:
  bibfilter --tex paper.tex --bib library.bib --output paper.bib
  bibfilter --tex paper.tex --verbose
  echo '\\cite{doe2021}' | bibfilter --tex - --bib library.bib --output cited.bib")]
struct Cli {
    /// LaTeX document to scan for citations (use '-' for stdin)
    #[arg(long, default_value = "mainTemplatePDF.tex")]
    tex: PathBuf,

    /// BibTeX bibliography database to filter
    #[arg(long, default_value = "refs.bib")]
    bib: PathBuf,

    /// Destination for the filtered bibliography
    #[arg(long, default_value = "mainTemplatePDF.bib")]
    output: PathBuf,

    /// Print per-key and per-entry diagnostics to standard output
    #[arg(long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — LaTeX document not found / unreadable
    TexFile(String),
    /// Exit 11 — bibliography not found / unreadable
    BibFile(String),
    /// Exit 12 — bibliography is malformed
    BibParse(String),
    /// Exit 13 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::TexFile(_) => 10,
            AppError::BibFile(_) => 11,
            AppError::BibParse(_) => 12,
            AppError::OutputFile(_) => 13,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::TexFile(msg) | AppError::BibFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::BibParse(msg) => {
                write!(
                    f,
                    "{}\n  hint: every field line must sit inside an @type{{key, ...}} entry",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    generate_command(&cli.tex, &cli.bib, &cli.output, cli.verbose)
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Scan the document, filter the bibliography, write the result.
fn generate_command(
    tex: &Path,
    bib: &Path,
    output: &Path,
    verbose: bool,
) -> Result<(), AppError> {
    // 1. Read the LaTeX document (support '-' for stdin)
    let document = if tex == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::TexFile(format!("failed to read from stdin: {}", e)))?;
        buf
    } else {
        if !tex.exists() {
            return Err(AppError::TexFile(format!("'{}' not found", tex.display())));
        }
        fs::read_to_string(tex)
            .map_err(|e| AppError::TexFile(format!("'{}': {}", tex.display(), e)))?
    };

    // 2. Both input paths are checked before any other work
    if !bib.exists() {
        return Err(AppError::BibFile(format!("'{}' not found", bib.display())));
    }

    // 3. Extract citation keys in order of first appearance
    let citations = extract_citations(&document);
    if verbose {
        for key in &citations {
            println!("found citation key: {}", key);
        }
    }

    // 4. Parse the bibliography database
    let db = load_bib(bib).map_err(|e| map_bib_error(bib, e))?;

    // 5. Select cited entries, skipping keys the bibliography does not hold
    let entries = select_entries(&citations, &db);
    if verbose {
        for key in &citations {
            if db.contains_key(key) {
                println!("adding entry for key: {}", key);
            } else {
                println!("key not found in bibliography: {}", key);
            }
        }
    }

    // 6. Render and write, overwriting any existing output
    let rendered = render_bibliography(&entries);
    fs::write(output, rendered)
        .map_err(|e| AppError::OutputFile(format!("'{}': {}", output.display(), e)))?;

    println!("wrote {} with {} entries", output.display(), entries.len());

    Ok(())
}

/// Maps a BibError to an AppError using type-safe matching.
fn map_bib_error(path: &Path, e: BibError) -> AppError {
    match e {
        BibError::Io(_) => AppError::BibFile(format!("'{}': {}", path.display(), e)),
        BibError::FieldOutsideEntry { .. } => {
            AppError::BibParse(format!("'{}': {}", path.display(), e))
        }
    }
}
