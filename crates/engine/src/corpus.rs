//! Documents and the corpus id registry.
//!
//! The collector hands the engine an ordered set of documents; the corpus
//! validates id uniqueness once at registration instead of relying on
//! load-order side effects. Documents are immutable after registration.

use serde::Serialize;

use crate::block::Block;
use crate::error::WeaveError;
use crate::links::rewrite_links;
use crate::parser::parse;
use crate::toc::insert_toc;

/// One documentation page as supplied by the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Display title.
    pub title: String,
    /// Corpus-unique id, `{section}-{stem}` for sectioned pages. The
    /// addressing key for navigation, cross-links, and search results.
    pub id: String,
    /// Section directory label; root-level pages carry their own stem.
    /// Used as the resolution context for bare-filename links.
    pub section: String,
    /// Sort rank assigned by the collector.
    pub order: u32,
    /// Raw markdown text, UTF-8 with `\n` line separators.
    pub raw_text: String,
}

impl Document {
    /// Renders this document to its block fragment: links are rewritten
    /// against the document's section first, the block parser runs second,
    /// and the TOC extractor post-processes the result.
    pub fn render(&self) -> Vec<Block> {
        let rewritten = rewrite_links(&self.raw_text, &self.section);
        let mut blocks = parse(&rewritten);
        insert_toc(&mut blocks);
        blocks
    }
}

/// The full ordered document set for one build or language activation.
///
/// Construction validates the global id namespace; everything downstream
/// may assume ids are unique.
#[derive(Debug, Clone)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    /// Registers an ordered document set, failing on the first duplicate
    /// id encountered.
    pub fn new(docs: Vec<Document>) -> Result<Self, WeaveError> {
        let mut seen = std::collections::HashSet::new();
        for doc in &docs {
            if !seen.insert(doc.id.as_str()) {
                return Err(WeaveError::DuplicateId {
                    id: doc.id.clone(),
                });
            }
        }
        log::debug!("registered corpus of {} documents", docs.len());
        Ok(Self { docs })
    }

    /// Documents in collector order.
    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    /// Looks a document up by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == id)
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
