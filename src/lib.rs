//! bibfilter: CLI for generating citation-ordered BibTeX files from LaTeX documents.
//!
//! This library provides functionality to:
//! - Extract citation keys from LaTeX documents
//! - Parse BibTeX bibliography databases
//! - Select cited entries and render them in citation order

pub mod bib;
pub mod latex;
pub mod render;

pub use bib::{load_bib, parse_bib, BibDatabase, BibEntry, BibError};
pub use latex::extract_citations;
pub use render::{render_bibliography, render_entry, select_entries};
