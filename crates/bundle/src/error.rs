//! Bundler error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a documentation build.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The documentation root directory does not exist.
    #[error("documentation root not found: {0}")]
    MissingRoot(PathBuf),
    /// The collector found no documentation pages at all.
    #[error("no documentation pages found under {0}")]
    EmptyCorpus(PathBuf),
    /// Corpus registration failed (duplicate document ids).
    #[error(transparent)]
    Engine(#[from] docweave_engine::WeaveError),
    /// Filesystem failure while reading sources or writing artifacts.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
