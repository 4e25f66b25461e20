//! Inline markup formatting.
//!
//! Converts one line's inline markup (bold, italic, code span, link) to
//! HTML. Matching is span-based: each pattern contributes candidate spans
//! in a fixed priority order (bold, italic, code, link), overlapping
//! candidates lose to earlier writers, and the survivors are spliced back
//! in start-offset order. Later substitutions therefore never re-enter an
//! earlier matched span. Literal text between spans is HTML-escaped, so
//! document content cannot inject markup.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// One matched inline span, carrying its rendered replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    html: String,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Formats a single line of inline markup as HTML.
///
/// Supported syntax: `**bold**`, `*italic*`, `` `code` ``, and
/// `[label](target)`. The link target is emitted verbatim (modulo attribute
/// escaping); internal targets are expected to have been normalized by the
/// link rewriter before this stage runs.
///
/// # Examples
///
/// ```
/// use docweave_engine::format_inline;
///
/// assert_eq!(format_inline("**hi**"), "<strong>hi</strong>");
/// assert_eq!(format_inline("a < b"), "a &lt; b");
/// ```
pub fn format_inline(text: &str) -> String {
    let mut accepted: Vec<Span> = Vec::new();

    // Priority order: first writer wins on overlap.
    for candidates in [
        bold_spans(text),
        italic_spans(text),
        code_spans(text),
        link_spans(text),
    ] {
        for candidate in candidates {
            if accepted.iter().all(|s| !s.overlaps(&candidate)) {
                accepted.push(candidate);
            }
        }
    }

    accepted.sort_by_key(|s| s.start);

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for span in &accepted {
        out.push_str(&encode_text(&text[pos..span.start]));
        out.push_str(&span.html);
        pos = span.end;
    }
    out.push_str(&encode_text(&text[pos..]));
    out
}

/// `**x**` with a non-empty, lazily matched interior.
fn bold_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(i) = text[pos..].find("**").map(|o| o + pos) {
        let inner_start = i + 2;
        let Some(first) = text[inner_start..].chars().next() else {
            break;
        };
        let search_from = inner_start + first.len_utf8();
        if let Some(j) = text[search_from..].find("**").map(|o| o + search_from) {
            spans.push(Span {
                start: i,
                end: j + 2,
                html: format!("<strong>{}</strong>", encode_text(&text[inner_start..j])),
            });
            pos = j + 2;
        } else {
            pos = inner_start;
        }
    }
    spans
}

/// `*x*` where the interior contains no `*`.
fn italic_spans(text: &str) -> Vec<Span> {
    delimited_spans(text, '*', |inner| format!("<em>{}</em>", encode_text(inner)))
}

/// `` `x` `` where the interior contains no backtick.
fn code_spans(text: &str) -> Vec<Span> {
    delimited_spans(text, '`', |inner| {
        format!("<code>{}</code>", encode_text(inner))
    })
}

/// Collects spans delimited by a single character with a non-empty interior
/// that does not itself contain the delimiter.
fn delimited_spans(text: &str, delim: char, render: impl Fn(&str) -> String) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(i) = text[pos..].find(delim).map(|o| o + pos) {
        let inner_start = i + delim.len_utf8();
        match text[inner_start..].find(delim) {
            Some(0) | None => {
                // Empty interior or no closer; resume after this delimiter.
                pos = inner_start;
            }
            Some(off) => {
                let j = inner_start + off;
                spans.push(Span {
                    start: i,
                    end: j + delim.len_utf8(),
                    html: render(&text[inner_start..j]),
                });
                pos = j + delim.len_utf8();
            }
        }
    }
    spans
}

/// `[label](target)` with non-empty label and target.
fn link_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(i) = text[pos..].find('[').map(|o| o + pos) {
        let Some(close) = text[i + 1..].find(']').map(|o| o + i + 1) else {
            break;
        };
        if close == i + 1 || !text[close + 1..].starts_with('(') {
            pos = i + 1;
            continue;
        }
        let target_start = close + 2;
        let Some(tclose) = text[target_start..].find(')').map(|o| o + target_start) else {
            pos = i + 1;
            continue;
        };
        if tclose == target_start {
            pos = i + 1;
            continue;
        }
        let label = &text[i + 1..close];
        let target = &text[target_start..tclose];
        spans.push(Span {
            start: i,
            end: tclose + 1,
            html: format!(
                "<a href=\"{}\">{}</a>",
                encode_double_quoted_attribute(target),
                encode_text(label)
            ),
        });
        pos = tclose + 1;
    }
    spans
}
