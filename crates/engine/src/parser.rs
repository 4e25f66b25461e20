//! Line-oriented block parser.
//!
//! A single-pass state machine over a document's lines. Per line, rules are
//! checked in a fixed order (fence, table row, heading, rule, blockquote,
//! list, blank, paragraph) and the first match wins. Open fences suspend
//! all other recognition. Once a block is flushed into the output it is
//! never revisited.
//!
//! The parser never fails: malformed input degrades to the most
//! conservative interpretation (an unterminated fence captures everything
//! to end-of-input), and all pending state is flushed unconditionally when
//! input ends.

use crate::block::Block;
use crate::inline::format_inline;
use crate::slug::slug;

/// Parses a document's raw markdown text into an ordered block sequence.
///
/// Pure function of `text`; callers must normalize line endings to `\n`
/// beforehand.
pub fn parse(text: &str) -> Vec<Block> {
    text.lines().fold(ParserState::default(), step).finish()
}

/// Accumulated parser state threaded through the fold over input lines.
///
/// A fence, once open, is exclusive; list, blockquote, and table
/// accumulators coexist with normal recognition and flush at the points
/// the transition rules dictate.
#[derive(Debug, Default)]
struct ParserState {
    fence: Option<FenceBuffer>,
    list: Vec<String>,
    quote: String,
    table: TableBuffer,
    out: Vec<Block>,
}

/// Buffered content of an open code fence.
#[derive(Debug)]
struct FenceBuffer {
    lang: String,
    lines: Vec<String>,
}

/// Pending table rows; `header_marked` records that a separator row
/// followed the single first row.
#[derive(Debug, Default)]
struct TableBuffer {
    rows: Vec<Vec<String>>,
    header_marked: bool,
}

/// Advances the parser by one line.
fn step(mut st: ParserState, line: &str) -> ParserState {
    // Rule 1: fences. An open fence captures everything verbatim until a
    // matching closing marker.
    if let Some(mut fence) = st.fence.take() {
        if line.starts_with("```") {
            st.out.push(Block::CodeBlock {
                lang: fence.lang,
                code: fence.lines.join("\n"),
            });
        } else {
            fence.lines.push(line.to_string());
            st.fence = Some(fence);
        }
        return st;
    }
    if let Some(rest) = line.strip_prefix("```") {
        st.flush_table();
        st.flush_list();
        st.flush_quote();
        st.fence = Some(FenceBuffer {
            lang: rest.trim().to_string(),
            lines: Vec::new(),
        });
        return st;
    }

    // Rule 2: table rows accumulate; a separator row directly after exactly
    // one prior row marks that row as the header.
    if is_table_row(line) {
        st.flush_list();
        st.flush_quote();
        if st.table.rows.len() == 1 && !st.table.header_marked && is_table_separator(line) {
            st.table.header_marked = true;
        } else {
            st.table.rows.push(split_cells(line));
        }
        return st;
    }

    let trimmed = line.trim();

    // Rule 3: headings, levels 1-4.
    if let Some((level, text)) = heading_line(line) {
        st.flush_table();
        st.flush_list();
        st.flush_quote();
        st.out.push(Block::Heading {
            level,
            id: slug(text),
            text: text.to_string(),
            html: format_inline(text),
        });
        return st;
    }

    // Rule 4: horizontal rule.
    if trimmed == "---" {
        st.flush_table();
        st.flush_list();
        st.flush_quote();
        st.out.push(Block::Rule);
        return st;
    }

    // Rule 5: blockquote lines accumulate space-joined.
    if let Some(rest) = line.strip_prefix("> ") {
        st.flush_table();
        st.flush_list();
        st.quote.push_str(rest);
        st.quote.push(' ');
        return st;
    }

    // Rule 6: list items, with lazy continuation: a non-blank line while a
    // list is open extends the last item instead of starting a paragraph.
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        st.flush_table();
        st.flush_quote();
        st.list.push(format_inline(rest.trim()));
        return st;
    }
    if !st.list.is_empty() && !trimmed.is_empty() {
        st.flush_table();
        if let Some(last) = st.list.last_mut() {
            last.push(' ');
            last.push_str(&format_inline(trimmed));
        }
        return st;
    }

    // Rule 7: blank lines flush list and blockquote but leave an open table
    // pending; only a genuine non-table line closes a table.
    if trimmed.is_empty() {
        st.flush_list();
        st.flush_quote();
        return st;
    }

    // Rule 8: paragraph.
    st.flush_table();
    st.flush_list();
    st.flush_quote();
    st.out.push(Block::Paragraph {
        html: format_inline(line),
    });
    st
}

impl ParserState {
    fn flush_list(&mut self) {
        if !self.list.is_empty() {
            let items = std::mem::take(&mut self.list);
            self.out.push(Block::List { items });
        }
    }

    fn flush_quote(&mut self) {
        if !self.quote.is_empty() {
            let text = std::mem::take(&mut self.quote);
            self.out.push(Block::Blockquote {
                html: format_inline(text.trim()),
            });
        }
    }

    fn flush_table(&mut self) {
        if self.table.rows.is_empty() {
            self.table.header_marked = false;
            return;
        }
        let table = std::mem::take(&mut self.table);
        let mut rows = table.rows.into_iter().map(|row| {
            row.iter()
                .map(|cell| format_inline(cell))
                .collect::<Vec<_>>()
        });
        let header = if table.header_marked { rows.next() } else { None };
        self.out.push(Block::Table {
            header,
            rows: rows.collect(),
        });
    }

    /// Flushes everything at end of input; nothing is silently dropped.
    fn finish(mut self) -> Vec<Block> {
        if let Some(fence) = self.fence.take() {
            log::warn!("unterminated code fence captured to end of input");
            self.out.push(Block::CodeBlock {
                lang: fence.lang,
                code: fence.lines.join("\n"),
            });
        }
        self.flush_table();
        self.flush_list();
        self.flush_quote();
        self.out
    }
}

/// Recognizes a heading line: 1-4 leading `#` markers followed by a space.
pub(crate) fn heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if (1..=4).contains(&hashes) && line[hashes..].starts_with(' ') {
        Some((hashes as u8, line[hashes + 1..].trim()))
    } else {
        None
    }
}

/// A table row contains a column separator and starts or ends with one.
fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('|') && (trimmed.starts_with('|') || trimmed.ends_with('|'))
}

/// A separator row consists solely of pipes, dashes, colons, and
/// whitespace, with at least one dash.
fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| c == '|' || c == '-' || c == ':' || c.is_whitespace())
}

/// Splits a table row into trimmed cell texts, dropping the boundary pipes.
fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|c| c.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(html: &str) -> Block {
        Block::Paragraph {
            html: html.to_string(),
        }
    }

    #[test]
    fn headings_levels_one_through_four() {
        let blocks = parse("# One\n## Two\n### Three\n#### Four");
        let levels: Vec<u8> = blocks
            .iter()
            .map(|b| match b {
                Block::Heading { level, .. } => *level,
                other => panic!("expected heading, got {other:?}"),
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn heading_carries_anchor_id() {
        let blocks = parse("## Getting Started!");
        assert_eq!(
            blocks,
            vec![Block::Heading {
                level: 2,
                id: "getting-started".into(),
                text: "Getting Started!".into(),
                html: "Getting Started!".into(),
            }]
        );
    }

    #[test]
    fn five_hashes_is_a_paragraph() {
        let blocks = parse("##### not a heading");
        assert_eq!(blocks, vec![paragraph("##### not a heading")]);
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        let blocks = parse("#nospace");
        assert_eq!(blocks, vec![paragraph("#nospace")]);
    }

    #[test]
    fn paragraphs_round_trip_text() {
        // Rendering prose with no tables/lists/quotes/code recovers the
        // original text modulo inline substitution.
        let blocks = parse("first line\n\nsecond line");
        assert_eq!(
            blocks,
            vec![paragraph("first line"), paragraph("second line")]
        );
    }

    #[test]
    fn horizontal_rule() {
        assert_eq!(parse("---"), vec![Block::Rule]);
        // Only a lone --- counts.
        assert_eq!(parse("--- x"), vec![paragraph("--- x")]);
    }

    #[test]
    fn code_fence_with_language_tag() {
        let blocks = parse("```rust\nfn main() {}\nlet x = 1;\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                lang: "rust".into(),
                code: "fn main() {}\nlet x = 1;".into(),
            }]
        );
    }

    #[test]
    fn fence_suspends_all_recognition() {
        let blocks = parse("```\n# not a heading\n- not a list\n| not | a table |\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                lang: String::new(),
                code: "# not a heading\n- not a list\n| not | a table |".into(),
            }]
        );
    }

    #[test]
    fn unterminated_fence_captures_to_end_of_input() {
        let blocks = parse("before\n```sh\necho hi\nno closer");
        assert_eq!(
            blocks,
            vec![
                paragraph("before"),
                Block::CodeBlock {
                    lang: "sh".into(),
                    code: "echo hi\nno closer".into(),
                },
            ]
        );
    }

    #[test]
    fn blockquote_lines_join_with_spaces() {
        let blocks = parse("> first\n> second\n\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::Blockquote {
                    html: "first second".into()
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn list_items_collect() {
        let blocks = parse("- a\n- b\n* c");
        assert_eq!(
            blocks,
            vec![Block::List {
                items: vec!["a".into(), "b".into(), "c".into()]
            }]
        );
    }

    #[test]
    fn list_lazy_continuation_extends_last_item() {
        // Boundary case, reproduced deliberately: a non-blank, non-heading
        // line directly after a list item is absorbed into that item even
        // when the author meant a new paragraph.
        let blocks = parse("- item one\nwrapped tail\n\npara");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    items: vec!["item one wrapped tail".into()]
                },
                paragraph("para"),
            ]
        );
    }

    #[test]
    fn heading_interrupts_list() {
        let blocks = parse("- item\n## Next");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::List { .. }));
        assert!(matches!(blocks[1], Block::Heading { level: 2, .. }));
    }

    #[test]
    fn blank_line_flushes_list_and_quote() {
        let blocks = parse("- a\n\n- b");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    items: vec!["a".into()]
                },
                Block::List {
                    items: vec!["b".into()]
                },
            ]
        );
    }

    #[test]
    fn table_with_marked_header() {
        let blocks = parse("| A | B |\n|---|---|\n| 1 | 2 |\n\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::Table {
                    header: Some(vec!["A".into(), "B".into()]),
                    rows: vec![vec!["1".into(), "2".into()]],
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn table_without_separator_has_no_header() {
        let blocks = parse("| 1 | 2 |\n| 3 | 4 |\n\nx");
        assert_eq!(
            blocks,
            vec![
                Block::Table {
                    header: None,
                    rows: vec![
                        vec!["1".into(), "2".into()],
                        vec!["3".into(), "4".into()]
                    ],
                },
                paragraph("x"),
            ]
        );
    }

    #[test]
    fn blank_line_does_not_close_table() {
        let blocks = parse("| A | B |\n|---|---|\n\n| 1 | 2 |\nend");
        assert_eq!(
            blocks,
            vec![
                Block::Table {
                    header: Some(vec!["A".into(), "B".into()]),
                    rows: vec![vec!["1".into(), "2".into()]],
                },
                paragraph("end"),
            ]
        );
    }

    #[test]
    fn separator_after_multiple_rows_is_a_plain_row() {
        // Header marking requires exactly one prior row.
        let blocks = parse("| a |\n| b |\n|---|\nx");
        assert_eq!(
            blocks,
            vec![
                Block::Table {
                    header: None,
                    rows: vec![vec!["a".into()], vec!["b".into()], vec!["---".into()]],
                },
                paragraph("x"),
            ]
        );
    }

    #[test]
    fn table_cells_are_inline_formatted() {
        let blocks = parse("| **A** | `b` |\nx");
        assert_eq!(
            blocks,
            vec![
                Block::Table {
                    header: None,
                    rows: vec![vec![
                        "<strong>A</strong>".into(),
                        "<code>b</code>".into()
                    ]],
                },
                paragraph("x"),
            ]
        );
    }

    #[test]
    fn end_of_input_flushes_everything() {
        let blocks = parse("- pending item");
        assert_eq!(
            blocks,
            vec![Block::List {
                items: vec!["pending item".into()]
            }]
        );

        let blocks = parse("> pending quote");
        assert_eq!(
            blocks,
            vec![Block::Blockquote {
                html: "pending quote".into()
            }]
        );

        let blocks = parse("| pending | table |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                header: None,
                rows: vec![vec!["pending".into(), "table".into()]],
            }]
        );
    }

    #[test]
    fn fence_interrupts_pending_blocks() {
        let blocks = parse("- item\n```\ncode\n```");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    items: vec!["item".into()]
                },
                Block::CodeBlock {
                    lang: String::new(),
                    code: "code".into()
                },
            ]
        );
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n").is_empty());
    }
}
