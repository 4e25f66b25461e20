//! Cross-document link rewriting.
//!
//! Intra-corpus markdown links are rewritten into internal anchor targets
//! before a document reaches the block parser, matching the id scheme used
//! when documents are registered (`{section}-{stem}`). Anything the
//! rewriter does not recognize passes through untouched: a broken link must
//! never break the build.

/// Rewrites intra-corpus markdown links in `text` to `#{section}-{stem}`
/// anchor targets, resolving bare filenames against `current_section`.
///
/// Left unchanged: scheme-prefixed URLs, same-page anchors (`#...`),
/// `mailto:` targets, non-`.md` paths, and any path shape the rules below
/// do not cover.
///
/// # Examples
///
/// ```
/// use docweave_engine::rewrite_links;
///
/// assert_eq!(
///     rewrite_links("[Tutorial](tutorial.md)", "getting-started"),
///     "[Tutorial](#getting-started-tutorial)"
/// );
/// assert_eq!(
///     rewrite_links("[Syntax](../language-guide/syntax.md)", "advanced"),
///     "[Syntax](#language-guide-syntax)"
/// );
/// ```
pub fn rewrite_links(text: &str, current_section: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(i) = text[pos..].find('[').map(|o| o + pos) {
        let Some(close) = text[i + 1..].find(']').map(|o| o + i + 1) else {
            break;
        };
        if close == i + 1 || !text[close + 1..].starts_with('(') {
            out.push_str(&text[pos..i + 1]);
            pos = i + 1;
            continue;
        }
        let target_start = close + 2;
        let Some(tclose) = text[target_start..].find(')').map(|o| o + target_start) else {
            out.push_str(&text[pos..i + 1]);
            pos = i + 1;
            continue;
        };
        if tclose == target_start {
            out.push_str(&text[pos..i + 1]);
            pos = i + 1;
            continue;
        }

        let label = &text[i + 1..close];
        let path = &text[target_start..tclose];
        out.push_str(&text[pos..i]);
        match rewrite_target(path, current_section) {
            Some(anchor) => {
                out.push('[');
                out.push_str(label);
                out.push_str("](");
                out.push_str(&anchor);
                out.push(')');
            }
            None => out.push_str(&text[i..tclose + 1]),
        }
        pos = tclose + 1;
    }

    out.push_str(&text[pos..]);
    out
}

/// Resolves one link target to an internal anchor, or `None` to leave the
/// link untouched.
fn rewrite_target(path: &str, current_section: &str) -> Option<String> {
    if path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with('#')
        || path.starts_with("mailto:")
    {
        return None;
    }
    if !path.ends_with(".md") {
        return None;
    }

    let path = path.replace('\\', "/");

    if path.starts_with("../") {
        // Up through parent segments, then into another section:
        // ../language-guide/syntax.md
        let parts: Vec<&str> = path.split('/').collect();
        let section_idx = parts.iter().position(|p| *p != "..").unwrap_or(0);
        if section_idx < parts.len() - 1 {
            let section = parts[section_idx];
            let stem = parts.last()?.strip_suffix(".md")?;
            return Some(format!("#{section}-{stem}"));
        }
        log::debug!("link target {path:?} has no section segment, leaving untouched");
        None
    } else if path.contains('/') {
        // Direct path like language-guide/syntax.md: second-to-last segment
        // is the section.
        let parts: Vec<&str> = path.split('/').collect();
        let section = parts[parts.len() - 2];
        let stem = parts.last()?.strip_suffix(".md")?;
        Some(format!("#{section}-{stem}"))
    } else {
        // Bare filename resolves against the current section.
        let stem = path.strip_suffix(".md")?;
        Some(format!("#{current_section}-{stem}"))
    }
}
