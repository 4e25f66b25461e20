//! Anchor id generation.
//!
//! Heading anchors, TOC links, and cross-document references all derive
//! their fragment ids from the same function so that generation and
//! resolution never diverge.

/// Computes a URL-fragment-safe anchor id from heading text.
///
/// Lowercases the input, drops every character that is not a letter, digit,
/// whitespace, or hyphen, collapses whitespace runs into a single hyphen,
/// and trims hyphens from both ends. Total function: never fails, and empty
/// input yields an empty string.
///
/// # Examples
///
/// ```
/// use docweave_engine::slug;
///
/// assert_eq!(slug("Getting Started!"), "getting-started");
/// assert_eq!(slug(""), "");
/// ```
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_gap = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '-' {
            if pending_gap && !out.is_empty() {
                out.push('-');
            }
            pending_gap = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else if ch.is_whitespace() {
            pending_gap = true;
        }
        // Punctuation and symbols are silently dropped.
    }

    out.trim_matches('-').to_string()
}
