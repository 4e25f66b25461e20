//! Plain-text corpus export.
//!
//! Emits the whole documentation set as one markdown-ish text file, meant
//! to be handed to language models or indexed by tools that cannot run the
//! HTML shell. Bodies come from the search index, so markup is already
//! stripped.

use std::fmt::Write as _;

use docweave_engine::SearchIndex;

/// Renders the corpus as a single plain-text document.
pub fn render_llms(title: &str, index: &SearchIndex) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title}\n");
    for entry in index.entries() {
        let _ = writeln!(out, "## {}", entry.title);
        let _ = writeln!(out, "id: {} | section: {}\n", entry.id, entry.section);
        if !entry.body.is_empty() {
            let _ = writeln!(out, "{}\n", entry.body);
        }
    }
    out
}
