//! Engine error types.
//!
//! Parsing, rewriting, and querying never fail; malformed input always
//! degrades to a conservative interpretation. Errors exist only where the
//! corpus contract can be violated.

use thiserror::Error;

/// Errors surfaced by the docweave engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeaveError {
    /// Two documents resolved to the same corpus id. Ids address
    /// navigation, cross-links, and search results, so a collision would
    /// silently shadow a page; the build fails loudly instead.
    #[error("duplicate document id: {id:?}")]
    DuplicateId {
        /// The colliding id.
        id: String,
    },
}
