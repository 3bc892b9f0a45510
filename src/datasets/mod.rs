//! Dataset loading: per-corpus parsers and the dispatch that picks them.
//!
//! Each supported dataset contributes two parsers: one producing a
//! [`Corpus`] of mentions and one producing the [`DictEntry`] records
//! its terminology resource ships. [`load_corpus`] and
//! [`load_terminology`] pick the right pair from the configured
//! dataset name.

pub mod ncbi_disease;
pub mod share_clef;

use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::terminology::Terminology;
use crate::{Error, Result};

/// Supported datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Dataset {
    /// NCBI Disease corpus with the CTD MEDIC disease vocabulary.
    NcbiDisease,
    /// ShARe/CLEF eHealth corpus with a SNOMED CT terminology extract.
    ShareClef,
}

impl Dataset {
    /// Canonical config name of this dataset.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Dataset::NcbiDisease => "ncbi-disease",
            Dataset::ShareClef => "share-clef",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ncbi-disease" | "ncbi_disease" | "ncbi" => Ok(Dataset::NcbiDisease),
            "share-clef" | "share_clef" | "shareclef" => Ok(Dataset::ShareClef),
            _ => Err(Error::invalid_input(format!("unknown dataset: {}", s))),
        }
    }
}

/// A corpus subset selector.
///
/// `Train(1)`/`Dev(1)` are the split shipped by the corpus creators;
/// folds 2 and up re-split the training file along frozen document
/// lists (see [`ncbi_disease::subsets`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    /// Training documents of the given fold.
    Train(u8),
    /// Development documents of the given fold.
    Dev(u8),
    /// The held-out test set.
    Test,
}

impl Subset {
    /// Fold number; 1 for `Test`.
    #[must_use]
    pub fn fold(&self) -> u8 {
        match self {
            Subset::Train(n) | Subset::Dev(n) => *n,
            Subset::Test => 1,
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subset::Train(1) => f.write_str("train"),
            Subset::Train(n) => write!(f, "train{}", n),
            Subset::Dev(1) => f.write_str("dev"),
            Subset::Dev(n) => write!(f, "dev{}", n),
            Subset::Test => f.write_str("test"),
        }
    }
}

impl FromStr for Subset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parse_fold = |digits: &str| -> Result<u8> {
            if digits.is_empty() {
                return Ok(1);
            }
            digits
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=7).contains(n))
                .ok_or_else(|| Error::invalid_input(format!("invalid subset: {}", s)))
        };

        if s == "test" {
            Ok(Subset::Test)
        } else if let Some(digits) = s.strip_prefix("train") {
            Ok(Subset::Train(parse_fold(digits)?))
        } else if let Some(digits) = s.strip_prefix("dev") {
            Ok(Subset::Dev(parse_fold(digits)?))
        } else {
            Err(Error::invalid_input(format!("invalid subset: {}", s)))
        }
    }
}

/// Parse the configured dataset's corpus subset.
pub fn load_corpus(config: &Config, subset: Subset) -> Result<Corpus> {
    let dataset: Dataset = config.general.dataset.parse()?;
    let paths = config.active_paths()?;
    log::info!("loading {} corpus, subset {}", dataset, subset);
    let corpus = match dataset {
        Dataset::NcbiDisease => ncbi_disease::load_corpus(&paths.corpus_dir, subset)?,
        Dataset::ShareClef => share_clef::load_corpus(paths, subset)?,
    };
    log::debug!(
        "loaded {} documents, {} mentions",
        corpus.document_count(),
        corpus.mention_count()
    );
    Ok(corpus)
}

/// Parse the configured dataset's terminology resource into an index.
pub fn load_terminology(config: &Config) -> Result<Terminology> {
    let dataset: Dataset = config.general.dataset.parse()?;
    let paths = config.active_paths()?;
    log::info!(
        "loading {} terminology from {}",
        dataset,
        paths.dict_fn.display()
    );
    let entries = match dataset {
        Dataset::NcbiDisease => ncbi_disease::load_medic_terminology(&paths.dict_fn)?,
        Dataset::ShareClef => share_clef::load_snomed_terminology(&paths.dict_fn)?,
    };
    let terminology = Terminology::new(entries);
    log::debug!(
        "indexed {} entries ({} distinct names, {} distinct ids)",
        terminology.len(),
        terminology.iter_names().count(),
        terminology.iter_ids().count()
    );
    Ok(terminology)
}
