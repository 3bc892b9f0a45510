//! Run configuration.
//!
//! A [`Config`] names the active dataset and the file locations of its
//! corpus subsets and terminology resource, plus ranker settings. Loaded
//! from JSON:
//!
//! ```json
//! {
//!   "general": { "dataset": "ncbi-disease" },
//!   "datasets": {
//!     "ncbi-disease": {
//!       "corpus_dir": "data/ncbi-disease",
//!       "dict_fn": "data/ncbi-disease/CTD_diseases.tsv"
//!     }
//!   },
//!   "rank": { "generators": ["exact", "trigram:0.7"] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Global settings.
    pub general: GeneralConfig,
    /// Per-dataset file locations, keyed by dataset name.
    pub datasets: HashMap<String, DatasetPaths>,
    /// Ranker settings.
    #[serde(default)]
    pub rank: RankConfig,
}

/// Global settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Name of the active dataset (e.g. `ncbi-disease`, `share-clef`).
    pub dataset: String,
}

/// File locations for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetPaths {
    /// Directory holding the corpus subset files.
    pub corpus_dir: PathBuf,
    /// Terminology resource file.
    pub dict_fn: PathBuf,
    /// Directory of plain-text reports (ShARe/CLEF only).
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
    /// Standoff annotation file per subset (ShARe/CLEF only), keyed by
    /// `train`/`dev`/`test`.
    #[serde(default)]
    pub annotation_fns: HashMap<String, PathBuf>,
}

/// Ranker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Candidate generator specs, in feature-column order
    /// (e.g. `exact`, `trigram:0.7`).
    pub generators: Vec<String>,
    /// Feature weights: one per generator, plus one trailing weight for
    /// the token-overlap feature. Uniform when absent.
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            generators: vec!["exact".into(), "trigram:0.7".into()],
            weights: None,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| Error::config(format!("cannot parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// File locations of the active dataset.
    ///
    /// # Errors
    ///
    /// Fails when the active dataset has no entry in `datasets`.
    pub fn active_paths(&self) -> Result<&DatasetPaths> {
        self.datasets.get(&self.general.dataset).ok_or_else(|| {
            Error::config(format!(
                "no paths configured for dataset '{}'",
                self.general.dataset
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let raw = r#"{
            "general": { "dataset": "ncbi-disease" },
            "datasets": {
                "ncbi-disease": {
                    "corpus_dir": "data/ncbi",
                    "dict_fn": "data/ncbi/CTD_diseases.tsv"
                }
            }
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.general.dataset, "ncbi-disease");
        let paths = config.active_paths().unwrap();
        assert_eq!(paths.dict_fn, PathBuf::from("data/ncbi/CTD_diseases.tsv"));
        // Defaults
        assert_eq!(config.rank.generators, ["exact", "trigram:0.7"]);
        assert!(config.rank.weights.is_none());
    }

    #[test]
    fn missing_dataset_paths_is_config_error() {
        let raw = r#"{
            "general": { "dataset": "share-clef" },
            "datasets": {}
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            config.active_paths(),
            Err(Error::Config(_))
        ));
    }
}
