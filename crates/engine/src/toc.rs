//! Table-of-contents extraction.
//!
//! Post-processes a rendered fragment into an on-page outline built from
//! its level-2 and level-3 headings. Short pages get no TOC; that is an
//! explicit empty outcome, not an error.

use crate::block::{Block, TocEntry};

/// Minimum number of level-2/3 headings before a page earns an outline.
const MIN_HEADINGS: usize = 3;

/// Builds an outline from the fragment's level-2 and level-3 headings and
/// inserts it as a [`Block::Toc`] immediately after the first level-1
/// heading, or at the very start when no level-1 heading exists.
///
/// Returns the outline entries, or `None` (fragment unchanged) when fewer
/// than three qualifying headings exist.
pub fn insert_toc(blocks: &mut Vec<Block>) -> Option<Vec<TocEntry>> {
    let entries: Vec<TocEntry> = blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading {
                level, id, text, ..
            } if *level == 2 || *level == 3 => Some(TocEntry {
                level: *level,
                id: id.clone(),
                text: text.clone(),
            }),
            _ => None,
        })
        .collect();

    if entries.len() < MIN_HEADINGS {
        return None;
    }

    let insert_at = blocks
        .iter()
        .position(|block| matches!(block, Block::Heading { level: 1, .. }))
        .map_or(0, |i| i + 1);
    blocks.insert(
        insert_at,
        Block::Toc {
            entries: entries.clone(),
        },
    );
    Some(entries)
}
