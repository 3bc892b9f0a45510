//! Candidate generation: proposing terminology names for a mention.
//!
//! A [`CandidateGenerator`] maps a mention string to scored terminology
//! names. Generators are interchangeable behind the trait and are
//! stacked in a [`GeneratorSet`], which produces one score column per
//! generator — the feature layout the ranker consumes.

use std::collections::HashMap;

use crate::similarity::{normalize_term, trigram_dice};
use crate::terminology::Terminology;
use crate::{Error, Result};

/// A terminology name proposed for a mention, with the generator's score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Terminology name or synonym, as indexed.
    pub name: String,
    /// Generator score in `[0.0, 1.0]`.
    pub score: f64,
}

/// Proposes terminology names for a mention.
pub trait CandidateGenerator {
    /// Short name used in config and feature reports.
    fn name(&self) -> &str;

    /// Scored candidate names for a mention.
    fn generate(&self, terminology: &Terminology, mention: &str) -> Vec<Candidate>;
}

/// Proposes names that equal the mention after normalization.
///
/// Score is always 1.0; the point of this generator is the feature
/// column (exact hit or not), not a graded score.
#[derive(Debug, Default)]
pub struct ExactMatchGenerator;

impl ExactMatchGenerator {
    /// Create the generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CandidateGenerator for ExactMatchGenerator {
    fn name(&self) -> &str {
        "exact"
    }

    fn generate(&self, terminology: &Terminology, mention: &str) -> Vec<Candidate> {
        let needle = normalize_term(mention);
        terminology
            .iter_names()
            .filter(|name| normalize_term(name) == needle)
            .map(|name| Candidate {
                name: name.to_string(),
                score: 1.0,
            })
            .collect()
    }
}

/// Proposes names by character-trigram Dice similarity.
///
/// Scans all indexed names and keeps those scoring at least `cutoff`.
/// Terminology resources are small enough (tens of thousands of names)
/// that a linear scan per mention is acceptable for research runs.
#[derive(Debug)]
pub struct TrigramGenerator {
    cutoff: f64,
}

impl TrigramGenerator {
    /// Create a generator with the given score cutoff.
    #[must_use]
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }
}

impl CandidateGenerator for TrigramGenerator {
    fn name(&self) -> &str {
        "trigram"
    }

    fn generate(&self, terminology: &Terminology, mention: &str) -> Vec<Candidate> {
        terminology
            .iter_names()
            .filter_map(|name| {
                let score = trigram_dice(mention, name);
                (score >= self.cutoff).then(|| Candidate {
                    name: name.to_string(),
                    score,
                })
            })
            .collect()
    }
}

/// An ordered stack of generators producing per-candidate score columns.
pub struct GeneratorSet {
    generators: Vec<Box<dyn CandidateGenerator>>,
}

/// A candidate name with one score per generator (0.0 where a
/// generator did not propose it).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Terminology name or synonym.
    pub name: String,
    /// Score columns, in generator order.
    pub scores: Vec<f64>,
}

impl GeneratorSet {
    /// Build a generator stack from config specs.
    ///
    /// Recognized specs: `exact`, `trigram:<cutoff>` (cutoff optional,
    /// default 0.7).
    ///
    /// # Errors
    ///
    /// Fails on unknown generator names or malformed cutoffs.
    pub fn from_specs<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut generators: Vec<Box<dyn CandidateGenerator>> = Vec::new();
        for spec in specs {
            let spec = spec.as_ref();
            let (kind, arg) = match spec.split_once(':') {
                Some((kind, arg)) => (kind, Some(arg)),
                None => (spec, None),
            };
            match kind {
                "exact" => generators.push(Box::new(ExactMatchGenerator::new())),
                "trigram" => {
                    let cutoff = match arg {
                        Some(raw) => raw.parse::<f64>().map_err(|_| {
                            Error::config(format!("bad trigram cutoff: '{}'", raw))
                        })?,
                        None => 0.7,
                    };
                    generators.push(Box::new(TrigramGenerator::new(cutoff)));
                }
                other => {
                    return Err(Error::config(format!("unknown candidate generator: '{}'", other)))
                }
            }
        }
        if generators.is_empty() {
            return Err(Error::config("no candidate generators configured"));
        }
        Ok(Self { generators })
    }

    /// Number of score columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether the stack is empty (never true for a constructed set).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generator names, in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.iter().map(|g| g.name())
    }

    /// Union of all generators' candidates for a mention, with one
    /// score column per generator.
    ///
    /// Candidates keep the order in which they were first proposed
    /// (generator order, then each generator's own order), so ranking
    /// ties break deterministically.
    #[must_use]
    pub fn generate(&self, terminology: &Terminology, mention: &str) -> Vec<ScoredCandidate> {
        let columns = self.generators.len();
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut candidates: Vec<ScoredCandidate> = Vec::new();

        for (column, generator) in self.generators.iter().enumerate() {
            for candidate in generator.generate(terminology, mention) {
                let idx = *by_name.entry(candidate.name.clone()).or_insert_with(|| {
                    candidates.push(ScoredCandidate {
                        name: candidate.name.clone(),
                        scores: vec![0.0; columns],
                    });
                    candidates.len() - 1
                });
                // Keep the best score a generator assigns to a name.
                if candidate.score > candidates[idx].scores[column] {
                    candidates[idx].scores[column] = candidate.score;
                }
            }
        }
        log::debug!("'{}': {} candidates", mention, candidates.len());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminology::DictEntry;

    fn sample() -> Terminology {
        Terminology::new([
            DictEntry::new("Colorectal Neoplasms", "MESH:D015179")
                .with_syn(["Colorectal Cancer"]),
            DictEntry::new("Breast Neoplasms", "MESH:D001943").with_syn(["Breast Cancer"]),
        ])
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let term = sample();
        let gen = ExactMatchGenerator::new();
        let candidates = gen.generate(&term, "colorectal cancer");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Colorectal Cancer");
        assert_eq!(candidates[0].score, 1.0);
        assert!(gen.generate(&term, "melanoma").is_empty());
    }

    #[test]
    fn trigram_finds_near_matches() {
        let term = sample();
        let gen = TrigramGenerator::new(0.5);
        let candidates = gen.generate(&term, "colorectal cancers");
        assert!(candidates.iter().any(|c| c.name == "Colorectal Cancer"));
        // Cutoff keeps unrelated names out.
        assert!(!candidates.iter().any(|c| c.name == "Breast Neoplasms"));
    }

    #[test]
    fn generator_set_merges_columns() {
        let term = sample();
        let set = GeneratorSet::from_specs(["exact", "trigram:0.5"]).unwrap();
        let candidates = set.generate(&term, "breast cancer");
        let hit = candidates
            .iter()
            .find(|c| c.name == "Breast Cancer")
            .expect("exact hit present");
        assert_eq!(hit.scores.len(), 2);
        assert_eq!(hit.scores[0], 1.0);
        assert!(hit.scores[1] > 0.9);
        // Names only the trigram generator proposed score 0.0 in the
        // exact column.
        for c in &candidates {
            if c.name != "Breast Cancer" {
                assert_eq!(c.scores[0], 0.0);
            }
        }
    }

    #[test]
    fn bad_specs_are_config_errors() {
        assert!(GeneratorSet::from_specs(["levenshtein"]).is_err());
        assert!(GeneratorSet::from_specs(["trigram:abc"]).is_err());
        assert!(GeneratorSet::from_specs(Vec::<String>::new()).is_err());
    }
}
