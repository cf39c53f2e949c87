//! LaTeX citation extraction.
//!
//! Extracts citation keys from `\cite{...}` and `\citep{...}` commands
//! in LaTeX text. A single command may carry several comma-separated keys.

use regex::Regex;
use std::collections::HashSet;

/// Extracts all citation keys from the given LaTeX text.
///
/// Keys are returned in order of first appearance across the whole document
/// (left-to-right, top-to-bottom). A key cited more than once appears only
/// once, at the position of its first occurrence. Commands that do not match
/// the citation pattern are ignored.
///
/// # Arguments
///
/// * `tex` - The LaTeX text to scan
///
/// # Returns
///
/// The ordered, deduplicated list of citation keys.
///
/// # Examples
///
/// ```
/// use bibfilter::extract_citations;
///
/// let keys = extract_citations(r"Shown in \cite{doe2021} and \citep{doe2021, smith2020}.");
/// assert_eq!(keys, vec!["doe2021", "smith2020"]);
/// ```
pub fn extract_citations(tex: &str) -> Vec<String> {
    // Regex for a citation command: \cite{...} or \citep{...}
    // Group 1: the comma-separated key list between the braces
    let re = Regex::new(r"\\cite(?:p)?\{([^}]+)\}").unwrap();

    let mut seen: HashSet<String> = HashSet::new();
    let mut keys: Vec<String> = Vec::new();

    for cap in re.captures_iter(tex) {
        let arg_list = cap.get(1).unwrap().as_str();

        for raw in arg_list.split(',') {
            let key = raw.trim();
            if key.is_empty() {
                continue;
            }
            if seen.insert(key.to_string()) {
                keys.push(key.to_string());
            }
        }
    }

    keys
}
