//! End-to-end checks over the rewrite -> parse -> toc -> index pipeline.

use docweave_engine::{Block, Corpus, Document, SearchIndex, slug};

fn doc(title: &str, id: &str, section: &str, raw: &str) -> Document {
    Document {
        title: title.to_string(),
        id: id.to_string(),
        section: section.to_string(),
        order: 0,
        raw_text: raw.to_string(),
    }
}

#[test]
fn anchor_ids_agree_between_headings_and_toc() {
    let page = doc(
        "Guide",
        "guide-intro",
        "guide",
        "# Intro\n## First Steps!\n## Second Steps\n### Side Notes\ndone",
    );
    let blocks = page.render();

    let Block::Toc { entries } = &blocks[1] else {
        panic!("expected toc after the level-1 heading, got {:?}", blocks[1]);
    };
    let heading_ids: Vec<&str> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Heading { level, id, .. } if *level > 1 => Some(id.as_str()),
            _ => None,
        })
        .collect();
    let toc_ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(heading_ids, toc_ids);
    // Ids come from the same generator as standalone slugs.
    assert_eq!(toc_ids[0], slug("First Steps!"));
}

#[test]
fn cross_document_links_resolve_to_registered_ids() {
    let tutorial = doc(
        "Tutorial",
        "getting-started-tutorial",
        "getting-started",
        "# Tutorial\nnext: [Syntax](../language-guide/syntax.md)",
    );
    let syntax = doc(
        "Syntax",
        "language-guide-syntax",
        "language-guide",
        "# Syntax\nback: [Tutorial](../getting-started/tutorial.md)",
    );
    let corpus = Corpus::new(vec![tutorial, syntax]).expect("unique ids");

    for page in corpus.documents() {
        for block in page.render() {
            if let Block::Paragraph { html } = block {
                let anchor = html
                    .split("href=\"#")
                    .nth(1)
                    .and_then(|rest| rest.split('"').next())
                    .expect("paragraph carries a rewritten link");
                assert!(
                    corpus.get(anchor).is_some(),
                    "anchor {anchor:?} is not a registered document id"
                );
            }
        }
    }
}

#[test]
fn rendering_is_a_pure_function_of_raw_text() {
    let page = doc("P", "s-p", "s", "# A\ntext\n- one\n- two\n\n> note");
    assert_eq!(page.render(), page.render());
}

#[test]
fn search_spans_the_whole_corpus() {
    let corpus = Corpus::new(vec![
        doc("Tutorial", "gs-tutorial", "gs", "Start with variables here."),
        doc("Variables", "lg-variables", "lg", "## Declaring\nuse let."),
    ])
    .expect("unique ids");
    let index = SearchIndex::build(&corpus);

    let results = index.search("variables");
    assert_eq!(results.len(), 2);
    // Exact title beats body substring.
    assert_eq!(results[0].document_id, "lg-variables");
    assert_eq!(results[1].document_id, "gs-tutorial");
    // Every result id resolves back to a document.
    for result in &results {
        assert!(corpus.get(&result.document_id).is_some());
    }
}

#[test]
fn language_switch_is_a_full_rebuild() {
    let english = Corpus::new(vec![doc("Guide", "g-guide", "g", "english body")]).expect("ids");
    let translated = Corpus::new(vec![doc("Guide", "g-guide", "g", "cuerpo traducido")])
        .expect("ids");

    let index = SearchIndex::build(&english);
    assert_eq!(index.search("english").len(), 1);

    // Rebuilding from the translated corpus replaces entries wholesale.
    let index = SearchIndex::build(&translated);
    assert!(index.search("english").is_empty());
    assert_eq!(index.search("traducido").len(), 1);
}
