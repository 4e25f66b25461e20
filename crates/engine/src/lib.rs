#![deny(missing_docs)]
//! docweave engine: a line-oriented markdown renderer and the services
//! derived from its output (anchor id assignment, table-of-contents
//! extraction, cross-document link rewriting, and a scored full-text
//! search index).
//!
//! Every transformation is a pure, synchronous function of in-memory text:
//! the link rewriter runs over a document's raw text first, the block
//! parser second, the TOC extractor over the parser's output on demand,
//! and the search indexer once over all raw documents at load. Malformed
//! input never aborts a build; the parser and rewriter always pick the
//! most conservative interpretation and continue.

/// Rendered fragment block types.
pub mod block;
/// Documents and the corpus id registry.
pub mod corpus;
/// Engine error types.
pub mod error;
/// Code block syntax highlighting.
pub mod highlight;
/// Inline markup formatting.
pub mod inline;
/// Cross-document link rewriting.
pub mod links;
/// Line-oriented block parser.
pub mod parser;
/// Search indexing and ranked queries.
pub mod search;
/// Anchor id generation.
pub mod slug;
/// Table-of-contents extraction.
pub mod toc;

pub use block::{Block, TocEntry};
pub use corpus::{Corpus, Document};
pub use error::WeaveError;
pub use highlight::highlight_code;
pub use inline::format_inline;
pub use links::rewrite_links;
pub use parser::parse;
pub use search::{IndexEntry, SearchIndex, SearchResult};
pub use slug::slug;
pub use toc::insert_toc;
