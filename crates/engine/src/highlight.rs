//! Code block syntax highlighting.
//!
//! An ordered list of (pattern, token kind) pairs per language, evaluated
//! over the raw code text. All matches are collected, sorted by start
//! offset, and overlaps are resolved first-writer-wins (a string matched
//! earlier in the table swallows the comment marker inside it). Matched
//! tokens are emitted as `<span class="token-KIND">`; everything, matched
//! or not, is HTML-escaped on the way out.

use once_cell::sync::Lazy;
use regex::Regex;

use html_escape::encode_text;

type PatternTable = Vec<(Regex, &'static str)>;

/// Highlights literal code text for the given fence language tag.
///
/// An empty tag yields the escaped code with no token spans. Unknown
/// languages fall back to the hemlock table; `hml` is an alias for it.
/// Never fails: a pattern that does not compile is simply skipped.
pub fn highlight_code(lang: &str, code: &str) -> String {
    if lang.is_empty() {
        return encode_text(code).into_owned();
    }

    let table = match lang.to_lowercase().as_str() {
        "hemlock" | "hml" => &*HEMLOCK,
        "javascript" | "js" => &*JAVASCRIPT,
        "python" | "py" => &*PYTHON,
        "bash" | "sh" | "shell" => &*BASH,
        "json" => &*JSON,
        _ => &*HEMLOCK,
    };

    let mut tokens: Vec<(usize, usize, &'static str)> = Vec::new();
    for (pattern, kind) in table {
        for m in pattern.find_iter(code) {
            tokens.push((m.start(), m.end(), kind));
        }
    }
    // Stable sort keeps table order among same-offset candidates, so the
    // earlier pattern wins the overlap filter below.
    tokens.sort_by_key(|t| t.0);

    let mut out = String::with_capacity(code.len());
    let mut pos = 0;
    for (start, end, kind) in tokens {
        if start < pos {
            continue;
        }
        out.push_str(&encode_text(&code[pos..start]));
        out.push_str("<span class=\"token-");
        out.push_str(kind);
        out.push_str("\">");
        out.push_str(&encode_text(&code[start..end]));
        out.push_str("</span>");
        pos = end;
    }
    out.push_str(&encode_text(&code[pos..]));
    out
}

fn table(specs: &[(&str, &'static str)]) -> PatternTable {
    specs
        .iter()
        .filter_map(|(pattern, kind)| match Regex::new(pattern) {
            Ok(re) => Some((re, *kind)),
            Err(err) => {
                log::warn!("skipping highlight pattern {pattern:?}: {err}");
                None
            }
        })
        .collect()
}

static HEMLOCK: Lazy<PatternTable> = Lazy::new(|| {
    table(&[
        (r"(?m)//.*$", "comment"),
        (r"(?s)/\*.*?\*/", "comment"),
        (r#""(?:[^"\\]|\\.)*""#, "string"),
        (r"'(?:[^'\\]|\\.)*'", "string"),
        (
            r"\b(fn|let|mut|if|else|while|for|in|return|match|struct|enum|impl|trait|pub|use|mod|const|type|self|true|false|nil|and|or|not)\b",
            "keyword",
        ),
        (
            r"\b(i8|i16|i32|i64|u8|u16|u32|u64|f32|f64|bool|str|char|void|any)\b",
            "type",
        ),
        (r"\b\d+\.?\d*\b", "number"),
        (r"\b[A-Z][a-zA-Z0-9_]*\b", "type"),
        (r"\b[a-z_][a-zA-Z0-9_]*\s*\(", "function"),
        (r"[+\-*/%=<>!&|^~]+", "operator"),
        (r"[{}\[\]();,.:]", "punctuation"),
    ])
});

static JAVASCRIPT: Lazy<PatternTable> = Lazy::new(|| {
    table(&[
        (r"(?m)//.*$", "comment"),
        (r"(?s)/\*.*?\*/", "comment"),
        (r#""(?:[^"\\]|\\.)*""#, "string"),
        (r"'(?:[^'\\]|\\.)*'", "string"),
        (r"`(?:[^`\\]|\\.)*`", "string"),
        (
            r"\b(const|let|var|function|return|if|else|for|while|do|switch|case|break|continue|try|catch|throw|new|class|extends|import|export|default|async|await|typeof|instanceof)\b",
            "keyword",
        ),
        (r"\b(true|false|null|undefined|NaN|Infinity)\b", "builtin"),
        (r"\b\d+\.?\d*\b", "number"),
        (r"\b[a-z_][a-zA-Z0-9_]*\s*\(", "function"),
        (r"[+\-*/%=<>!&|^~?:]+", "operator"),
    ])
});

static PYTHON: Lazy<PatternTable> = Lazy::new(|| {
    table(&[
        (r"(?m)#.*$", "comment"),
        (r#"(?s)""".*?""""#, "string"),
        (r"(?s)'''.*?'''", "string"),
        (r#""(?:[^"\\]|\\.)*""#, "string"),
        (r"'(?:[^'\\]|\\.)*'", "string"),
        (
            r"\b(def|class|if|elif|else|for|while|try|except|finally|with|return|yield|import|from|as|pass|break|continue|raise|lambda|and|or|not|in|is|True|False|None)\b",
            "keyword",
        ),
        (r"\b\d+\.?\d*\b", "number"),
        (r"\b[a-z_][a-zA-Z0-9_]*\s*\(", "function"),
    ])
});

static BASH: Lazy<PatternTable> = Lazy::new(|| {
    table(&[
        (r"(?m)#.*$", "comment"),
        (r#""(?:[^"\\]|\\.)*""#, "string"),
        (r"'[^']*'", "string"),
        (
            r"\b(if|then|else|elif|fi|for|while|do|done|case|esac|function|return|exit|echo|cd|ls|cat|grep|sed|awk|export|source)\b",
            "keyword",
        ),
        (r"\$\{[^}]+\}", "property"),
        (r"\$[a-zA-Z_][a-zA-Z0-9_]*", "property"),
    ])
});

static JSON: Lazy<PatternTable> = Lazy::new(|| {
    table(&[
        (r#""(?:[^"\\]|\\.)*"\s*:"#, "property"),
        (r#""(?:[^"\\]|\\.)*""#, "string"),
        (r"\b(true|false|null)\b", "keyword"),
        (r"-?\b\d+\.?\d*\b", "number"),
    ])
});
