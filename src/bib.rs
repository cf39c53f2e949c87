//! BibTeX database parsing.
//!
//! A line-oriented parser for the BibTeX entry format. Entries and fields
//! are delimited by tracking brace depth across physical lines, so field
//! values may contain balanced nested braces and span multiple lines.
//! Field values are kept as raw `name = value` strings; no interpretation
//! of the value content is attempted.

use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing a bibliography.
#[derive(Error, Debug)]
pub enum BibError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Field found outside of an entry at line {line}")]
    FieldOutsideEntry { line: usize },
}

/// One bibliography record.
#[derive(Debug, Clone, PartialEq)]
pub struct BibEntry {
    /// Entry type tag (e.g. "article", "book")
    pub entry_type: String,
    /// Citation key; equal to the key this entry is stored under
    pub key: String,
    /// Complete `name = value` field strings, in source order.
    /// Multi-line values are collapsed to a single line.
    pub fields: Vec<String>,
}

/// Mapping from citation key to entry. When the source contains several
/// entries with the same key, the last one parsed wins.
pub type BibDatabase = HashMap<String, BibEntry>;

/// A field currently being accumulated (value may still grow).
struct PendingField {
    name: String,
    value: String,
}

/// An entry whose closing brace has not been seen yet.
struct OpenEntry {
    entry_type: String,
    key: String,
    /// Unmatched opening braces, counting the one from the entry header.
    depth: i32,
    fields: Vec<String>,
    pending: Option<PendingField>,
}

impl OpenEntry {
    /// Moves the in-progress field, if any, into the field list.
    fn flush_pending(&mut self) {
        if let Some(field) = self.pending.take() {
            self.fields.push(format!("{} = {}", field.name, field.value));
        }
    }

    fn close(mut self) -> BibEntry {
        self.flush_pending();
        BibEntry {
            entry_type: self.entry_type,
            key: self.key,
            fields: self.fields,
        }
    }
}

/// Parser state between two physical lines.
enum State {
    Outside,
    Inside(OpenEntry),
}

/// Loads and parses a BibTeX bibliography from a file.
///
/// # Arguments
///
/// * `path` - Path to the .bib file
///
/// # Errors
///
/// Returns an error if the file cannot be read or if a field line occurs
/// outside of any entry.
pub fn load_bib(path: &Path) -> Result<BibDatabase, BibError> {
    let content = fs::read_to_string(path)?;
    parse_bib(&content)
}

/// Parses BibTeX text into a [`BibDatabase`].
///
/// The input is processed one physical line at a time, each trimmed of
/// surrounding whitespace. An entry opens at a `@type{key,` header line and
/// closes at a lone `}` line that returns the brace depth to zero; only the
/// closing brace commits the entry, so a truncated entry at end of input is
/// dropped. Field values continue across lines until the depth drops back
/// to one, with continuation lines joined by single spaces.
///
/// # Errors
///
/// Returns [`BibError::FieldOutsideEntry`] when a line containing `=` is
/// found while no entry is open.
pub fn parse_bib(text: &str) -> Result<BibDatabase, BibError> {
    // Regex for an entry header: @type{key,
    // Group 1: entry type, group 2: citation key
    let header = Regex::new(r"^@(\w+)\{([^,]+),").unwrap();

    let mut db = BibDatabase::new();
    let mut state = State::Outside;

    for (idx, raw) in text.lines().enumerate() {
        state = step(state, raw.trim(), idx + 1, &header, &mut db)?;
    }

    // End of input while an entry is still open: the pending field is
    // folded into the entry, but only a closing-brace line commits, so
    // the truncated entry never reaches the database.
    if let State::Inside(mut open) = state {
        open.flush_pending();
    }

    Ok(db)
}

/// Consumes one trimmed line and returns the next parser state.
fn step(
    state: State,
    line: &str,
    line_no: usize,
    header: &Regex,
    db: &mut BibDatabase,
) -> Result<State, BibError> {
    // An entry header opens a fresh entry from any state; an uncommitted
    // open entry is lost. Header-like lines that do not parse are dropped.
    if line.starts_with('@') {
        return Ok(match header.captures(line) {
            Some(cap) => State::Inside(OpenEntry {
                entry_type: cap.get(1).unwrap().as_str().to_string(),
                key: cap.get(2).unwrap().as_str().to_string(),
                depth: 1,
                fields: Vec::new(),
                pending: None,
            }),
            None => state,
        });
    }

    match state {
        State::Outside => {
            if line.contains('=') {
                return Err(BibError::FieldOutsideEntry { line: line_no });
            }
            Ok(State::Outside)
        }
        State::Inside(mut entry) => {
            if line == "}" && entry.depth == 1 {
                // Closing brace at depth one commits the entry, replacing
                // any earlier entry stored under the same key.
                let done = entry.close();
                db.insert(done.key.clone(), done);
                return Ok(State::Outside);
            }

            if entry.depth == 1 {
                if let Some((name, value)) = line.split_once('=') {
                    // New field: the previous one is complete.
                    entry.flush_pending();
                    let value = value.trim();
                    entry.depth += brace_delta(value);
                    entry.pending = Some(PendingField {
                        name: name.trim().to_string(),
                        value: value.to_string(),
                    });
                    return Ok(State::Inside(entry));
                }
            }

            // Continuation of the current field value. This also covers a
            // lone '}' while nested inside a value, which is counted and
            // kept as content.
            if let Some(field) = entry.pending.as_mut() {
                field.value.push(' ');
                field.value.push_str(line);
            }
            entry.depth += brace_delta(line);
            Ok(State::Inside(entry))
        }
    }
}

/// Net brace count of a line: `{` occurrences minus `}` occurrences.
/// Braces inside quoted strings are not distinguished.
fn brace_delta(s: &str) -> i32 {
    let open = s.chars().filter(|&c| c == '{').count() as i32;
    let close = s.chars().filter(|&c| c == '}').count() as i32;
    open - close
}
