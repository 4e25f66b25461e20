//! Rendered fragment types.
//!
//! The block parser's output contract: an ordered sequence of block nodes,
//! a pure function of the document's raw text. The shell renderer consumes
//! these; the engine decides block structure and anchor ids only, never
//! page chrome.

use serde::Serialize;

/// One structural unit of rendered output.
///
/// Inline-formatted fields (`html`, list items, table cells) hold the HTML
/// produced by [`crate::format_inline`]; `code` holds literal, unescaped
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    /// Heading with a generated anchor id, level 1-4.
    Heading {
        /// Heading level (1-4).
        level: u8,
        /// Anchor id derived from the heading text.
        id: String,
        /// Plain heading text, before inline formatting.
        text: String,
        /// Inline-formatted heading content.
        html: String,
    },
    /// A single paragraph line.
    Paragraph {
        /// Inline-formatted paragraph content.
        html: String,
    },
    /// Unordered list; each item is inline-formatted.
    List {
        /// Inline-formatted list items.
        items: Vec<String>,
    },
    /// Block quote with space-joined quoted text.
    Blockquote {
        /// Inline-formatted quote content.
        html: String,
    },
    /// Fenced code block with literal content.
    CodeBlock {
        /// Declared language tag; may be empty.
        lang: String,
        /// Literal code text, not escaped or formatted.
        code: String,
    },
    /// Table with an optional marked header row.
    Table {
        /// Header cells, when a separator row marked the first row.
        header: Option<Vec<String>>,
        /// Body rows of inline-formatted cells.
        rows: Vec<Vec<String>>,
    },
    /// Horizontal rule.
    Rule,
    /// On-page outline, inserted by the TOC extractor.
    Toc {
        /// Ordered outline entries.
        entries: Vec<TocEntry>,
    },
}

/// One entry of an on-page table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (2 or 3).
    pub level: u8,
    /// Anchor id of the heading.
    pub id: String,
    /// Plain heading text.
    pub text: String,
}
