//! Candidate ranking and ranking-accuracy evaluation.
//!
//! For every mention the ranker collects candidate names from its
//! generator stack, computes a feature vector per candidate — one score
//! per generator plus the token overlap between mention and candidate —
//! and ranks candidates by a weighted sum of those features. Evaluation
//! checks whether the top candidate resolves to one of the mention's
//! gold ids.

use std::collections::HashSet;

use crate::candidates::GeneratorSet;
use crate::config::RankConfig;
use crate::corpus::Corpus;
use crate::similarity::token_overlap;
use crate::terminology::Terminology;
use crate::{Error, Result};

/// A ranked candidate: a terminology name resolved to canonical ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Candidate name or synonym.
    pub name: String,
    /// Canonical ids of all entries indexed under that name.
    pub ids: HashSet<String>,
    /// Combined feature score.
    pub score: f64,
}

/// One evaluated mention.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Mention surface text.
    pub mention: String,
    /// Gold terminology ids from the corpus.
    pub gold_ids: Vec<String>,
    /// Ids of the top-ranked candidate; empty when no candidate was
    /// generated.
    pub predicted_ids: HashSet<String>,
    /// Score of the top-ranked candidate.
    pub score: f64,
}

impl Prediction {
    /// Whether the top candidate resolves to a gold id.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.gold_ids.iter().any(|id| self.predicted_ids.contains(id))
    }
}

/// Ranking accuracy over a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankingAccuracy {
    /// Mentions whose top candidate resolved to a gold id.
    pub correct: usize,
    /// All evaluated mentions.
    pub total: usize,
    /// Mentions whose gold ids exist in the terminology at all — the
    /// upper bound for any ranker over this candidate space.
    pub reachable: usize,
}

impl RankingAccuracy {
    /// Fraction of mentions ranked correctly; 0.0 for an empty corpus.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    /// Fraction of mentions whose gold ids are reachable.
    #[must_use]
    pub fn reachability(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.reachable as f64 / self.total as f64
        }
    }
}

/// Ranks terminology candidates for mentions.
pub struct Ranker {
    generators: GeneratorSet,
    /// One weight per generator column, plus one for token overlap.
    weights: Vec<f64>,
}

impl Ranker {
    /// Build a ranker from config.
    ///
    /// # Errors
    ///
    /// Fails on unknown generator specs or a weight vector whose length
    /// is not `generators + 1`.
    pub fn from_config(config: &RankConfig) -> Result<Self> {
        let generators = GeneratorSet::from_specs(&config.generators)?;
        let columns = generators.len() + 1;
        let weights = match &config.weights {
            Some(weights) if weights.len() != columns => {
                return Err(Error::config(format!(
                    "expected {} feature weights ({} generators + overlap), got {}",
                    columns,
                    generators.len(),
                    weights.len()
                )))
            }
            Some(weights) => weights.clone(),
            None => vec![1.0; columns],
        };
        Ok(Self {
            generators,
            weights,
        })
    }

    /// Rank all candidates for one mention, best first.
    ///
    /// Ties keep generation order, so ranking is deterministic.
    #[must_use]
    pub fn rank(&self, terminology: &Terminology, mention: &str) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = self
            .generators
            .generate(terminology, mention)
            .into_iter()
            .map(|candidate| {
                let overlap = token_overlap(mention, &candidate.name);
                let score = candidate
                    .scores
                    .iter()
                    .chain(std::iter::once(&overlap))
                    .zip(&self.weights)
                    .map(|(feature, weight)| feature * weight)
                    .sum();
                RankedCandidate {
                    ids: terminology.ids([candidate.name.as_str()]),
                    name: candidate.name,
                    score,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Rank every mention of a corpus and record the top candidate.
    #[must_use]
    pub fn predict(&self, terminology: &Terminology, corpus: &Corpus) -> Vec<Prediction> {
        corpus
            .mentions()
            .map(|mention| {
                let ranked = self.rank(terminology, &mention.text);
                let (predicted_ids, score) = match ranked.into_iter().next() {
                    Some(top) => (top.ids, top.score),
                    None => (HashSet::new(), 0.0),
                };
                Prediction {
                    mention: mention.text.clone(),
                    gold_ids: mention.ids.clone(),
                    predicted_ids,
                    score,
                }
            })
            .collect()
    }

    /// Rank a corpus and compute ranking accuracy.
    #[must_use]
    pub fn evaluate(&self, terminology: &Terminology, corpus: &Corpus) -> RankingAccuracy {
        let mut accuracy = RankingAccuracy::default();
        for prediction in self.predict(terminology, corpus) {
            accuracy.total += 1;
            if prediction
                .gold_ids
                .iter()
                .any(|id| terminology.has_id(id))
            {
                accuracy.reachable += 1;
            }
            if prediction.is_correct() {
                accuracy.correct += 1;
            }
        }
        log::info!(
            "ranking accuracy: {}/{} = {:.4} (reachable: {:.4})",
            accuracy.correct,
            accuracy.total,
            accuracy.accuracy(),
            accuracy.reachability()
        );
        accuracy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Document, Mention, Section};
    use crate::terminology::DictEntry;

    fn terminology() -> Terminology {
        Terminology::new([
            DictEntry::new("Colorectal Neoplasms", "MESH:D015179")
                .with_syn(["Colorectal Cancer", "Colon Cancer"]),
            DictEntry::new("Breast Neoplasms", "MESH:D001943").with_syn(["Breast Cancer"]),
            DictEntry::new("Anemia", "MESH:D000740"),
        ])
    }

    fn ranker() -> Ranker {
        Ranker::from_config(&RankConfig {
            generators: vec!["exact".into(), "trigram:0.4".into()],
            weights: None,
        })
        .unwrap()
    }

    fn corpus_of(mentions: &[(&str, &str)]) -> Corpus {
        let mut section = Section::new("", 0);
        for (text, id) in mentions {
            section.mentions.push(Mention::new(*text, 0, 0, [*id]));
        }
        let mut doc = Document::new("doc1");
        doc.sections.push(section);
        let mut corpus = Corpus::new();
        corpus.push(doc);
        corpus
    }

    #[test]
    fn exact_mention_ranks_first() {
        let term = terminology();
        let ranked = ranker().rank(&term, "colon cancer");
        assert!(!ranked.is_empty());
        assert_eq!(ranked[0].name, "Colon Cancer");
        assert!(ranked[0].ids.contains("MESH:D015179"));
        // Best-first ordering.
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn no_candidates_for_far_off_mention() {
        let term = terminology();
        let ranked = ranker().rank(&term, "xyzzy");
        assert!(ranked.is_empty());
    }

    #[test]
    fn evaluate_counts_correct_and_reachable() {
        let term = terminology();
        let corpus = corpus_of(&[
            ("colon cancer", "MESH:D015179"),  // correct
            ("breast cancer", "MESH:D001943"), // correct
            ("anemias", "MESH:D000740"),       // trigram should still hit
            ("lung cancer", "MESH:D008175"),   // unreachable gold id
        ]);
        let accuracy = ranker().evaluate(&term, &corpus);
        assert_eq!(accuracy.total, 4);
        assert_eq!(accuracy.reachable, 3);
        assert!(accuracy.correct >= 3);
        assert!(accuracy.accuracy() <= 1.0);
    }

    #[test]
    fn weight_vector_length_is_checked() {
        let config = RankConfig {
            generators: vec!["exact".into()],
            weights: Some(vec![1.0]), // needs 2: exact + overlap
        };
        assert!(matches!(Ranker::from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn custom_weights_change_ranking() {
        let term = terminology();
        // Overlap-only ranker: exact and trigram columns zeroed out.
        let overlap_only = Ranker::from_config(&RankConfig {
            generators: vec!["exact".into(), "trigram:0.4".into()],
            weights: Some(vec![0.0, 0.0, 1.0]),
        })
        .unwrap();
        let ranked = overlap_only.rank(&term, "cancer of the colon");
        // "Colon Cancer" shares more tokens than "Colorectal Cancer".
        if let Some(top) = ranked.first() {
            assert_eq!(top.name, "Colon Cancer");
        }
    }
}
