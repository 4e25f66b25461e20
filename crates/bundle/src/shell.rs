//! HTML shell rendering.
//!
//! Wraps the engine's output in page chrome: block fragments become HTML
//! strings, the sidebar navigation is grouped by section, and everything
//! is embedded into one self-contained HTML document. The engine decides
//! block structure and anchor ids; everything here is templating.

use std::fmt::Write as _;

use docweave_engine::{Block, Corpus, SearchIndex, highlight_code};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::collect::{is_known_section, section_title};

/// Renders a block fragment to an HTML string.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading {
                level, id, html, ..
            } => {
                let _ = writeln!(
                    out,
                    "<h{level} class=\"section-anchor\" id=\"{id}\">{html}</h{level}>"
                );
            }
            Block::Paragraph { html } => {
                let _ = writeln!(out, "<p>{html}</p>");
            }
            Block::List { items } => {
                out.push_str("<ul>\n");
                for item in items {
                    let _ = writeln!(out, "<li>{item}</li>");
                }
                out.push_str("</ul>\n");
            }
            Block::Blockquote { html } => {
                let _ = writeln!(out, "<blockquote>{html}</blockquote>");
            }
            Block::CodeBlock { lang, code } => {
                let display = if lang.is_empty() { "code" } else { lang };
                let _ = writeln!(
                    out,
                    "<div class=\"code-block\"><div class=\"code-header\"><span class=\"code-lang\">{}</span></div><pre><code>{}</code></pre></div>",
                    encode_text(display),
                    highlight_code(lang, code)
                );
            }
            Block::Table { header, rows } => {
                out.push_str("<table>\n");
                if let Some(cells) = header {
                    out.push_str("<thead><tr>");
                    for cell in cells {
                        let _ = write!(out, "<th>{cell}</th>");
                    }
                    out.push_str("</tr></thead>\n");
                }
                out.push_str("<tbody>\n");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        let _ = write!(out, "<td>{cell}</td>");
                    }
                    out.push_str("</tr>\n");
                }
                out.push_str("</tbody>\n</table>\n");
            }
            Block::Rule => out.push_str("<hr>\n"),
            Block::Toc { entries } => {
                out.push_str(
                    "<nav class=\"toc\" aria-label=\"Table of Contents\">\n<div class=\"toc-title\">On this page</div>\n<ul class=\"toc-list\">\n",
                );
                for entry in entries {
                    let _ = writeln!(
                        out,
                        "<li><a href=\"#{}\" class=\"toc-h{}\">{}</a></li>",
                        entry.id,
                        entry.level,
                        encode_text(&entry.text)
                    );
                }
                out.push_str("</ul>\n</nav>\n");
            }
        }
    }
    out
}

/// Builds the sidebar navigation, grouping pages of known sections under a
/// section title and leaving root-level pages ungrouped.
pub fn render_navigation(corpus: &Corpus) -> String {
    let mut out = String::new();
    let mut open_section: Option<String> = None;

    for doc in corpus.documents() {
        let section = if is_known_section(&doc.section) {
            Some(doc.section.clone())
        } else {
            None
        };
        if section != open_section || open_section.is_none() && out.is_empty() {
            if !out.is_empty() {
                out.push_str("</div>\n");
            }
            out.push_str("<div class=\"nav-section\">\n");
            if let Some(section) = &section {
                let _ = writeln!(
                    out,
                    "<div class=\"nav-section-title\">{}</div>",
                    encode_text(&section_title(section))
                );
            }
            open_section = section;
        }
        let _ = writeln!(
            out,
            "<a href=\"#{id}\" class=\"nav-link\" data-page=\"{id}\">{title}</a>",
            id = doc.id,
            title = encode_text(&doc.title)
        );
    }

    if !out.is_empty() {
        out.push_str("</div>\n");
    }
    out
}

/// Assembles the complete single-file HTML document.
///
/// Page fragments and the search index are embedded as JSON; the shell's
/// script only switches pages and filters the embedded index, all offline.
pub fn render_page(title: &str, corpus: &Corpus, index: &SearchIndex, logo_data: &str) -> String {
    let navigation = render_navigation(corpus);

    let mut pages = serde_json::Map::new();
    for doc in corpus.documents() {
        let mut page = serde_json::Map::new();
        page.insert("title".into(), doc.title.clone().into());
        page.insert("section".into(), doc.section.clone().into());
        page.insert("html".into(), render_blocks(&doc.render()).into());
        pages.insert(doc.id.clone(), serde_json::Value::Object(page));
    }
    let pages_json = embed_json(&serde_json::Value::Object(pages));
    let index_json = serde_json::to_string(index.entries())
        .map(|s| s.replace("</", "<\\/"))
        .unwrap_or_else(|_| "[]".to_string());

    let logo_html = if logo_data.is_empty() {
        String::new()
    } else {
        format!(
            "<img class=\"header-logo\" src=\"{}\" alt=\"\">",
            encode_double_quoted_attribute(logo_data)
        )
    };

    let first_page = corpus
        .documents()
        .first()
        .map(|d| d.id.as_str())
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
:root {{ --sage: #9CAF88; --pine: #2F4F4F; --light-sage: #E8F4E1; --cream: #FAF9F6;
  --text: #2C3E2C; --border: #D4E4CB; --code-bg: #F5F9F3; }}
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{ font-family: -apple-system, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
  line-height: 1.7; color: var(--text); background: var(--cream); }}
.header {{ position: fixed; top: 0; left: 0; right: 0; height: 60px; background: var(--pine);
  color: white; display: flex; align-items: center; padding: 0 2rem; z-index: 1000; }}
.header-logo {{ height: 40px; margin-right: 1rem; }}
.sidebar {{ position: fixed; left: 0; top: 60px; width: 280px; height: calc(100vh - 60px);
  background: var(--light-sage); border-right: 2px solid var(--border); overflow-y: auto;
  padding: 1rem 0; }}
.nav-section {{ margin-bottom: 1.5rem; }}
.nav-section-title {{ font-size: 0.75rem; font-weight: 700; text-transform: uppercase;
  color: var(--pine); padding: 0 1.5rem; margin-bottom: 0.5rem; }}
.nav-link {{ display: block; padding: 0.4rem 1.5rem; color: var(--text);
  text-decoration: none; font-size: 0.9rem; border-left: 3px solid transparent; }}
.nav-link.active {{ border-left-color: var(--pine); font-weight: 600; color: var(--pine); }}
.main-content {{ margin-left: 280px; margin-top: 60px; padding: 3rem 2rem; max-width: 900px; }}
.toc {{ background: var(--light-sage); border: 1px solid var(--border); border-radius: 8px;
  padding: 1rem 1.5rem; margin-bottom: 2rem; }}
.toc-title {{ font-weight: 700; color: var(--pine); font-size: 0.9rem; margin-bottom: 0.75rem; }}
.toc-list {{ list-style: none; }}
.toc-h3 {{ padding-left: 1rem; }}
.code-block {{ background: var(--code-bg); border: 1px solid var(--border); border-radius: 8px;
  margin: 1rem 0; overflow: hidden; }}
.code-header {{ background: var(--light-sage); padding: 0.3rem 1rem; font-size: 0.8rem; }}
.code-block pre {{ padding: 1rem; overflow-x: auto; }}
blockquote {{ border-left: 4px solid var(--sage); padding: 0.5rem 1rem; margin: 1rem 0;
  background: var(--light-sage); }}
table {{ border-collapse: collapse; margin: 1rem 0; }}
th, td {{ border: 1px solid var(--border); padding: 0.4rem 0.8rem; }}
mark {{ background: rgba(156, 175, 136, 0.4); }}
.token-keyword {{ color: #7c4dbd; }} .token-string {{ color: #2e7d32; }}
.token-comment {{ color: #8a8a8a; font-style: italic; }} .token-number {{ color: #b26a00; }}
.token-type {{ color: #00695c; }} .token-function {{ color: #1565c0; }}
.token-operator, .token-punctuation {{ color: #546e7a; }}
.token-builtin, .token-property {{ color: #ad1457; }}
</style>
</head>
<body>
<header class="header">{logo_html}<h1>{title}</h1></header>
<nav class="sidebar">
{navigation}</nav>
<main class="main-content" id="content"></main>
<script>
const PAGES = {pages_json};
const SEARCH_INDEX = {index_json};
function loadPage(id) {{
    const page = PAGES[id] || PAGES[{first_page_json}];
    if (!page) return;
    document.getElementById('content').innerHTML = page.html;
    document.querySelectorAll('.nav-link').forEach(link => {{
        link.classList.toggle('active', link.dataset.page === id);
    }});
    window.scrollTo(0, 0);
}}
document.querySelectorAll('.nav-link').forEach(link => {{
    link.addEventListener('click', e => {{
        e.preventDefault();
        window.location.hash = link.dataset.page;
    }});
}});
window.addEventListener('hashchange', () => {{
    loadPage(window.location.hash.substring(1));
}});
loadPage(window.location.hash.substring(1) || {first_page_json});
</script>
</body>
</html>
"#,
        title = encode_text(title),
        logo_html = logo_html,
        navigation = navigation,
        pages_json = pages_json,
        index_json = index_json,
        first_page_json = serde_json::Value::String(first_page.to_string()),
    )
}

/// Serializes a JSON value for embedding inside a `<script>` element.
fn embed_json(value: &serde_json::Value) -> String {
    // `</` must not appear literally inside a script element.
    value.to_string().replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docweave_engine::{Document, parse};

    fn corpus(docs: Vec<Document>) -> Corpus {
        Corpus::new(docs).expect("unique ids")
    }

    fn doc(title: &str, id: &str, section: &str, raw: &str) -> Document {
        Document {
            title: title.to_string(),
            id: id.to_string(),
            section: section.to_string(),
            order: 1,
            raw_text: raw.to_string(),
        }
    }

    #[test]
    fn heading_blocks_carry_ids_into_html() {
        let html = render_blocks(&parse("## Getting Started!"));
        assert_eq!(
            html,
            "<h2 class=\"section-anchor\" id=\"getting-started\">Getting Started!</h2>\n"
        );
    }

    #[test]
    fn code_blocks_show_language_header() {
        let html = render_blocks(&parse("```rust\nlet x = 1;\n```"));
        assert!(html.contains("<span class=\"code-lang\">rust</span>"), "got {html}");
        assert!(html.contains("token-keyword"), "got {html}");

        let plain = render_blocks(&parse("```\ntext\n```"));
        assert!(plain.contains("<span class=\"code-lang\">code</span>"), "got {plain}");
    }

    #[test]
    fn tables_render_header_and_body() {
        let html = render_blocks(&parse("| A | B |\n|---|---|\n| 1 | 2 |"));
        assert!(html.contains("<th>A</th><th>B</th>"), "got {html}");
        assert!(html.contains("<td>1</td><td>2</td>"), "got {html}");
    }

    #[test]
    fn navigation_groups_known_sections() {
        let c = corpus(vec![
            doc("Intro", "getting-started-intro", "getting-started", ""),
            doc("Tour", "getting-started-tour", "getting-started", ""),
            doc("Syntax", "language-guide-syntax", "language-guide", ""),
        ]);
        let nav = render_navigation(&c);
        assert_eq!(nav.matches("nav-section-title").count(), 2);
        assert!(nav.contains(">Getting Started</div>"), "got {nav}");
        assert!(nav.contains("data-page=\"language-guide-syntax\""), "got {nav}");
    }

    #[test]
    fn full_page_embeds_rendered_fragments() {
        let c = corpus(vec![doc(
            "Intro",
            "getting-started-intro",
            "getting-started",
            "# Intro\nhello world",
        )]);
        let index = SearchIndex::build(&c);
        let page = render_page("Manual", &c, &index, "");
        assert!(page.contains("const PAGES = {"), "missing page map");
        assert!(page.contains("hello world"));
        assert!(page.contains("const SEARCH_INDEX = ["), "missing index");
        assert!(!page.contains("</script>\\"), "script embedding corrupt");
    }

    #[test]
    fn logo_data_url_is_attribute_escaped() {
        let c = corpus(vec![doc("Intro", "i", "i", "body")]);
        let index = SearchIndex::build(&c);
        let page = render_page("T", &c, &index, "data:image/png;base64,AA\"A");
        assert!(
            page.contains("src=\"data:image/png;base64,AA&quot;A\""),
            "logo attribute not escaped"
        );
    }

    #[test]
    fn embedded_json_never_closes_the_script_element() {
        let c = corpus(vec![doc(
            "Evil",
            "x",
            "x",
            "text with </script> inside",
        )]);
        let index = SearchIndex::build(&c);
        let page = render_page("T", &c, &index, "");
        let script = page.split("<script>").nth(1).expect("script element");
        let body = script.split("</script>").next().expect("script body");
        assert!(body.contains("PAGES"), "page map must be inside the script body");
        assert!(!body.contains("</script"), "unescaped close tag in JSON");
    }
}
