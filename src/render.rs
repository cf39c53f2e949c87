//! BibTeX output rendering.
//!
//! Selects cited entries from a parsed database and serializes them back
//! to BibTeX text, normalized to two-space field indentation with one
//! blank line between entries.

use crate::bib::{BibDatabase, BibEntry};

/// Selects entries from the database in citation order.
///
/// Keys absent from the database are skipped silently; the caller decides
/// whether to report them.
///
/// # Arguments
///
/// * `citations` - Citation keys in order of first appearance
/// * `db` - The parsed bibliography
///
/// # Returns
///
/// References to the matching entries, in citation order.
pub fn select_entries<'a>(citations: &[String], db: &'a BibDatabase) -> Vec<&'a BibEntry> {
    citations.iter().filter_map(|key| db.get(key)).collect()
}

/// Renders a single entry back to BibTeX text.
///
/// The output is a `@type{key,` header line, one two-space-indented line
/// per field, and a closing `}` line.
pub fn render_entry(entry: &BibEntry) -> String {
    let mut out = format!("@{}{{{},\n", entry.entry_type, entry.key);
    let fields: Vec<String> = entry.fields.iter().map(|f| format!("  {}", f)).collect();
    out.push_str(&fields.join("\n"));
    out.push_str("\n}\n");
    out
}

/// Renders the selected entries as one bibliography document.
///
/// Entries are separated by a blank line, with a trailing blank line after
/// the last one. An empty selection renders to the empty string.
pub fn render_bibliography(entries: &[&BibEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    out
}
