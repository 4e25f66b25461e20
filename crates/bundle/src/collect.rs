//! Document collection and localization lookup.
//!
//! Walks a documentation root, turning markdown files into engine
//! [`Document`]s: root-level pages first, then a fixed table of section
//! directories in rank order. Unreadable files are logged and skipped;
//! only a missing root or an empty corpus aborts the build.

use std::fs;
use std::path::{Path, PathBuf};

use docweave_engine::{Corpus, Document};

use crate::error::BundleError;

/// Section directories recognized under the docs root, with display names
/// and sort ranks. Root-level pages rank 0.
const SECTIONS: &[(&str, &str, u32)] = &[
    ("getting-started", "Getting Started", 1),
    ("language-guide", "Language Guide", 2),
    ("advanced", "Advanced Topics", 3),
    ("reference", "API Reference", 4),
    ("design", "Design & Philosophy", 5),
    ("contributing", "Contributing", 6),
];

/// Display name for a section directory.
pub fn section_title(section: &str) -> String {
    SECTIONS
        .iter()
        .find(|(dir, ..)| *dir == section)
        .map_or_else(|| title_case(section), |(_, name, _)| (*name).to_string())
}

/// Whether a section label is one of the grouped navigation sections.
pub fn is_known_section(section: &str) -> bool {
    SECTIONS.iter().any(|(dir, ..)| *dir == section)
}

/// Collects the corpus for one build.
///
/// `lang` selects a localization variant: when set, a translated file at
/// `<root>/i18n/<lang>/<relative path>` replaces the base text of any page
/// that has one; pages without a translation fall back to the base text.
/// A language switch is therefore a full re-collect.
pub fn collect_docs(root: &Path, lang: Option<&str>) -> Result<Corpus, BundleError> {
    if !root.is_dir() {
        return Err(BundleError::MissingRoot(root.to_path_buf()));
    }

    let mut docs = Vec::new();

    for path in markdown_files(root)? {
        let Some(stem) = file_stem(&path) else {
            continue;
        };
        let Some(raw) = read_page(root, &path, lang) else {
            continue;
        };
        docs.push(Document {
            title: title_case(&stem),
            id: stem.clone(),
            section: stem,
            order: 0,
            raw_text: raw,
        });
    }

    for (dir, _, order) in SECTIONS {
        let section_dir = root.join(dir);
        if !section_dir.is_dir() {
            continue;
        }
        for path in markdown_files(&section_dir)? {
            if path.to_string_lossy().contains("development") {
                continue;
            }
            let Some(stem) = file_stem(&path) else {
                continue;
            };
            let Some(raw) = read_page(root, &path, lang) else {
                continue;
            };
            docs.push(Document {
                title: title_case(&stem),
                id: format!("{dir}-{stem}"),
                section: (*dir).to_string(),
                order: *order,
                raw_text: raw,
            });
        }
    }

    if docs.is_empty() {
        return Err(BundleError::EmptyCorpus(root.to_path_buf()));
    }

    docs.sort_by(|a, b| (a.order, &a.title).cmp(&(b.order, &b.title)));
    log::info!("collected {} documentation pages", docs.len());
    Ok(Corpus::new(docs)?)
}

/// Markdown files directly inside `dir`, sorted by file name.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, BundleError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Reads one page, preferring the localized variant when `lang` is set.
/// Unreadable pages log a warning and are skipped rather than aborting.
fn read_page(root: &Path, path: &Path, lang: Option<&str>) -> Option<String> {
    if let Some(lang) = lang.filter(|l| !l.is_empty() && *l != "en")
        && let Ok(rel) = path.strip_prefix(root)
    {
        let translated = root.join("i18n").join(lang).join(rel);
        match fs::read_to_string(&translated) {
            Ok(text) => return Some(text.replace("\r\n", "\n")),
            Err(_) => {
                log::debug!("no {lang} translation for {}, using base text", rel.display());
            }
        }
    }
    match fs::read_to_string(path) {
        Ok(text) => Some(text.replace("\r\n", "\n")),
        Err(err) => {
            log::warn!("could not read {}: {err}, skipping", path.display());
            None
        }
    }
}

/// Converts a file stem into a display title: separators become spaces and
/// each word is capitalized.
fn title_case(stem: &str) -> String {
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
