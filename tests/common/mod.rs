//! Shared test constants and helpers for integration tests.

/// Build a BibTeX database from a list of citation keys.
///
/// Each key gets an `@article` entry with an auto-generated author and
/// title, all dated 2020. Entries appear in the order the keys are given.
pub fn build_bib(keys: &[&str]) -> String {
    keys.iter()
        .map(|key| {
            format!(
                "@article{{{},\n  author = {{Author, {}}},\n  title = {{Title {}}},\n  year = {{2020}}\n}}\n\n",
                key, key, key
            )
        })
        .collect()
}

/// A bibliography exercising nested braces and multi-line field values.
///
/// Holds entries `foo`, `bar` and `qux`; `bar` carries a nested-brace title
/// and `qux` a value spanning two physical lines.
pub const SAMPLE_BIB: &str = "\
@article{foo,
  author = {First, F.},
  year = {2019}
}

@book{bar,
  title = {A {Nested} Title},
  year = {2020}
}

@misc{qux,
  note = {spans
    two lines}
}
";
