//! docweave bundler.
//!
//! Turns a directory of markdown documentation into a single offline HTML
//! file: collect pages into a corpus, build the search index, render the
//! shell. The rendering pipeline itself lives in `docweave-engine`; this
//! crate owns everything that touches the filesystem.

#![deny(missing_docs)]

pub mod collect;
pub mod error;
pub mod llms;
pub mod shell;

use std::path::Path;

use docweave_engine::SearchIndex;

pub use collect::collect_docs;
pub use error::BundleError;
pub use llms::render_llms;
pub use shell::{render_blocks, render_navigation, render_page};

/// Inputs for one bundle build.
pub struct BuildConfig<'a> {
    /// Documentation root directory.
    pub docs_root: &'a Path,
    /// Site title shown in the header and the `<title>` element.
    pub title: &'a str,
    /// Localization variant, `None` for the base language.
    pub lang: Option<&'a str>,
    /// Logo as a data URL, empty for no logo.
    pub logo_data: &'a str,
}

/// Rendered artifacts of one build.
pub struct BuildArtifacts {
    /// The self-contained HTML document.
    pub html: String,
    /// The plain-text corpus export.
    pub llms: String,
}

/// Runs a full build: collect, index, render.
pub fn build(config: &BuildConfig<'_>) -> Result<BuildArtifacts, BundleError> {
    let corpus = collect_docs(config.docs_root, config.lang)?;
    let index = SearchIndex::build(&corpus);
    log::info!(
        "indexed {} pages ({} search entries)",
        corpus.len(),
        index.entries().len()
    );
    Ok(BuildArtifacts {
        html: render_page(config.title, &corpus, &index, config.logo_data),
        llms: render_llms(config.title, &index),
    })
}
