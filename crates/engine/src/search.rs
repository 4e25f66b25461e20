//! Search indexing and ranked substring queries.
//!
//! The indexer runs once over all raw documents at load and derives one
//! value-object entry per document: title, section, ordered heading texts,
//! and a markup-stripped body. Entries are rebuilt wholesale when the
//! active document set changes (a language switch is a cold rebuild) and
//! never mutated in place.
//!
//! Queries score each entry by the highest applicable tier rather than a
//! sum: exact title, title prefix, title substring, exact heading, heading
//! substring, body substring. Results are ephemeral and recomputed per
//! query.

use regex::Regex;
use serde::Serialize;

use crate::corpus::Corpus;
use crate::parser::heading_line;

/// Maximum number of results returned per query.
const MAX_RESULTS: usize = 10;
/// Characters of stripped body retained as the fallback preview.
const PREVIEW_PREFIX_CHARS: usize = 160;
/// Preview window characters kept before the first body match.
const WINDOW_BEFORE: usize = 40;
/// Preview window characters kept after the matched substring.
const WINDOW_AFTER: usize = 60;

const SCORE_TITLE_EXACT: u32 = 100;
const SCORE_TITLE_PREFIX: u32 = 80;
const SCORE_TITLE_SUBSTRING: u32 = 60;
const SCORE_HEADING_EXACT: u32 = 40;
const SCORE_HEADING_SUBSTRING: u32 = 30;
const SCORE_BODY_SUBSTRING: u32 = 10;

/// The precomputed, searchable representation of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Document display title.
    pub title: String,
    /// Document id; the key carried into search results.
    pub id: String,
    /// Section label of the document.
    pub section: String,
    /// Ordered heading texts, kept verbatim for separate matching.
    pub headings: Vec<String>,
    /// Markup-stripped, whitespace-collapsed body text (original case).
    pub body: String,
    /// Fixed-length body prefix used when no body offset is available.
    pub preview: String,
    #[serde(skip)]
    title_lower: String,
    #[serde(skip)]
    headings_lower: Vec<String>,
    #[serde(skip)]
    body_lower: String,
}

/// One ranked hit, recomputed per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Id of the matched document.
    pub document_id: String,
    /// Title of the matched document.
    pub title: String,
    /// Tier score; higher ranks first.
    pub score: u32,
    /// The matching heading, for heading-tier hits.
    pub matched_heading: Option<String>,
    /// HTML-escaped preview text with `<mark>` highlighting.
    pub preview: String,
}

/// Per-corpus search index.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Builds the index from every document in the corpus, in corpus
    /// order. Input order is the stable tie-break at query time.
    pub fn build(corpus: &Corpus) -> Self {
        let entries = corpus
            .documents()
            .iter()
            .map(IndexEntry::from_document)
            .collect::<Vec<_>>();
        log::debug!("built search index over {} documents", entries.len());
        Self { entries }
    }

    /// The indexed entries, in corpus order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Answers a ranked substring query.
    ///
    /// Queries shorter than two characters yield an empty result set, an
    /// explicit no-results outcome rather than an error. Results are sorted by
    /// score descending with input order as the stable tie-break and
    /// truncated to [`MAX_RESULTS`].
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.chars().count() < 2 {
            return Vec::new();
        }
        let q = query.to_lowercase();
        // The literal query, matched case-insensitively over the raw preview
        // text; escaping happens per segment afterwards. Escaped literals
        // always compile; fall back to an unhighlighted preview if this one
        // somehow does not.
        let highlighter = Regex::new(&format!("(?i){}", regex::escape(query))).ok();

        let mut hits = Vec::new();
        for entry in &self.entries {
            let body_hit = entry.body_lower.find(&q);
            let (score, matched_heading) = entry.score(&q, body_hit.is_some());
            if score == 0 {
                continue;
            }
            let raw_preview = match body_hit {
                Some(offset) => window(&entry.body, offset, q.len()),
                None => entry.preview.clone(),
            };
            hits.push(SearchResult {
                document_id: entry.id.clone(),
                title: entry.title.clone(),
                score,
                matched_heading,
                preview: highlight(&raw_preview, highlighter.as_ref()),
            });
        }

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(MAX_RESULTS);
        hits
    }
}

impl IndexEntry {
    fn from_document(doc: &crate::corpus::Document) -> Self {
        let (body, headings) = strip_markup(&doc.raw_text);
        let preview = body.chars().take(PREVIEW_PREFIX_CHARS).collect();
        Self {
            title: doc.title.clone(),
            id: doc.id.clone(),
            section: doc.section.clone(),
            title_lower: doc.title.to_lowercase(),
            headings_lower: headings.iter().map(|h| h.to_lowercase()).collect(),
            body_lower: body.to_lowercase(),
            headings,
            body,
            preview,
        }
    }

    /// Maximum applicable tier for a lowercased query.
    fn score(&self, q: &str, body_hit: bool) -> (u32, Option<String>) {
        if self.title_lower == q {
            return (SCORE_TITLE_EXACT, None);
        }
        if self.title_lower.starts_with(q) {
            return (SCORE_TITLE_PREFIX, None);
        }
        if self.title_lower.contains(q) {
            return (SCORE_TITLE_SUBSTRING, None);
        }
        if let Some(i) = self.headings_lower.iter().position(|h| h == q) {
            return (SCORE_HEADING_EXACT, Some(self.headings[i].clone()));
        }
        if let Some(i) = self.headings_lower.iter().position(|h| h.contains(q)) {
            return (SCORE_HEADING_SUBSTRING, Some(self.headings[i].clone()));
        }
        if body_hit {
            return (SCORE_BODY_SUBSTRING, None);
        }
        (0, None)
    }
}

/// Strips markup from raw markdown: fenced code is dropped, heading
/// markers removed (heading texts are also collected verbatim), links
/// collapse to their label, and bold/italic/code markers disappear.
/// Whitespace is collapsed to single spaces.
fn strip_markup(raw: &str) -> (String, Vec<String>) {
    let mut body = String::with_capacity(raw.len());
    let mut headings = Vec::new();
    let mut in_fence = false;

    for line in raw.lines() {
        if line.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let text = match heading_line(line) {
            Some((_, heading)) => {
                headings.push(heading.to_string());
                heading
            }
            None => line,
        };
        strip_inline(text, &mut body);
        body.push(' ');
    }

    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    (collapsed, headings)
}

/// Appends `text` to `out` with inline markup removed.
fn strip_inline(text: &str, out: &mut String) {
    let mut pos = 0;
    while pos < text.len() {
        if text[pos..].starts_with('[')
            && let Some((label, end)) = link_label(&text[pos..])
        {
            // Labels may themselves carry emphasis markers.
            for ch in label.chars() {
                if ch != '*' && ch != '`' {
                    out.push(ch);
                }
            }
            pos += end;
            continue;
        }
        // `pos` is always on a char boundary here.
        let Some(ch) = text[pos..].chars().next() else {
            break;
        };
        if ch != '*' && ch != '`' {
            out.push(ch);
        }
        pos += ch.len_utf8();
    }
}

/// Parses a leading `[label](target)` and returns the label plus the byte
/// length of the whole link.
fn link_label(text: &str) -> Option<(&str, usize)> {
    let close = text.find(']')?;
    if close < 2 || !text[close + 1..].starts_with('(') {
        return None;
    }
    let tclose = text[close + 2..].find(')')? + close + 2;
    if tclose == close + 2 {
        return None;
    }
    Some((&text[1..close], tclose + 1))
}

/// Fixed-width preview window over the stripped body, centered on the
/// first match, with ellipsis markers when truncated at either end.
/// The window is counted in characters on either side of the match.
fn window(body: &str, offset: usize, match_len: usize) -> String {
    let match_start = floor_boundary(body, offset);
    let match_end = floor_boundary(body, offset + match_len);
    let start = body[..match_start]
        .char_indices()
        .rev()
        .take(WINDOW_BEFORE)
        .last()
        .map_or(match_start, |(i, _)| i);
    let end = body[match_end..]
        .char_indices()
        .nth(WINDOW_AFTER)
        .map_or(body.len(), |(i, _)| match_end + i);
    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.push_str(&body[start..end]);
    if end < body.len() {
        out.push_str("...");
    }
    out
}

/// Clamps a byte index down to the nearest char boundary.
fn floor_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Wraps matched substrings of the raw preview text in `<mark>`, escaping
/// the match and the gaps between matches separately. Matching before
/// escaping keeps the pattern away from entity text the escaper produces.
fn highlight(text: &str, pattern: Option<&Regex>) -> String {
    let Some(re) = pattern else {
        return html_escape::encode_text(text).into_owned();
    };
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for m in re.find_iter(text) {
        out.push_str(&html_escape::encode_text(&text[pos..m.start()]));
        out.push_str("<mark>");
        out.push_str(&html_escape::encode_text(m.as_str()));
        out.push_str("</mark>");
        pos = m.end();
    }
    out.push_str(&html_escape::encode_text(&text[pos..]));
    out
}
