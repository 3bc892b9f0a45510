//! End-to-end ranking tests: terminology + corpus → ranked candidates
//! and accuracy.

use termlink::config::RankConfig;
use termlink::{Corpus, DictEntry, Document, Mention, Ranker, Section, Terminology};

fn terminology() -> Terminology {
    Terminology::new([
        DictEntry::new("Colonic Neoplasms", "MESH:D003110").with_syn(["Colon Cancer"]),
        DictEntry::new("Breast Neoplasms", "MESH:D001943")
            .with_syn(["Breast Cancer", "Breast Carcinoma"]),
        DictEntry::new("Anemia", "MESH:D000740").with_syn(["Anaemia"]),
    ])
}

fn corpus(mentions: &[(&str, &[&str])]) -> Corpus {
    let mut section = Section::new("synthetic", 0);
    for (text, ids) in mentions {
        section
            .mentions
            .push(Mention::new(*text, 0, 0, ids.iter().copied()));
    }
    let mut doc = Document::new("doc1");
    doc.sections.push(section);
    let mut corpus = Corpus::new();
    corpus.push(doc);
    corpus
}

fn default_ranker() -> Ranker {
    Ranker::from_config(&RankConfig::default()).unwrap()
}

#[test]
fn exact_hits_rank_above_fuzzy_ones() {
    let term = terminology();
    let ranked = default_ranker().rank(&term, "breast cancer");
    assert_eq!(ranked[0].name, "Breast Cancer");
    assert!(ranked[0].ids.contains("MESH:D001943"));
    // Fuzzy-only variants come later but still resolve to the same id.
    if let Some(carcinoma) = ranked.iter().find(|c| c.name == "Breast Carcinoma") {
        assert!(carcinoma.score < ranked[0].score);
        assert!(carcinoma.ids.contains("MESH:D001943"));
    }
}

#[test]
fn spelling_variant_links_through_synonym() {
    let term = terminology();
    let ranked = default_ranker().rank(&term, "anaemia");
    assert!(!ranked.is_empty());
    assert!(ranked[0].ids.contains("MESH:D000740"));
}

#[test]
fn predictions_carry_gold_and_predicted_ids() {
    let term = terminology();
    let corpus = corpus(&[
        ("colon cancer", &["MESH:D003110"]),
        ("unrelated term", &["MESH:D999999"]),
    ]);
    let predictions = default_ranker().predict(&term, &corpus);
    assert_eq!(predictions.len(), 2);
    assert!(predictions[0].is_correct());
    assert!(!predictions[1].is_correct());
    assert!(predictions[1].predicted_ids.is_empty());
}

#[test]
fn accuracy_over_mixed_corpus() {
    let term = terminology();
    let corpus = corpus(&[
        ("colon cancer", &["MESH:D003110"]),
        ("breast carcinoma", &["MESH:D001943"]),
        ("anaemia", &["MESH:D000740"]),
        ("fracture", &["MESH:D050723"]), // not in the terminology
    ]);
    let accuracy = default_ranker().evaluate(&term, &corpus);
    assert_eq!(accuracy.total, 4);
    assert_eq!(accuracy.reachable, 3);
    assert_eq!(accuracy.correct, 3);
    assert!((accuracy.accuracy() - 0.75).abs() < 1e-9);
    assert!((accuracy.reachability() - 0.75).abs() < 1e-9);
}

#[test]
fn mention_without_gold_ids_counts_as_incorrect() {
    // CUI-less-style mentions stay in the denominator.
    let term = terminology();
    let corpus = corpus(&[("colon cancer", &[])]);
    let accuracy = default_ranker().evaluate(&term, &corpus);
    assert_eq!(accuracy.total, 1);
    assert_eq!(accuracy.correct, 0);
    assert_eq!(accuracy.reachable, 0);
}

#[test]
fn empty_corpus_has_zero_accuracy() {
    let term = terminology();
    let accuracy = default_ranker().evaluate(&term, &Corpus::new());
    assert_eq!(accuracy.total, 0);
    assert_eq!(accuracy.accuracy(), 0.0);
    assert_eq!(accuracy.reachability(), 0.0);
}
