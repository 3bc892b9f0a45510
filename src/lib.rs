//! # termlink
//!
//! Biomedical entity linking: map mentions of medical concepts in text
//! to canonical terminology identifiers.
//!
//! - **Terminology**: bidirectional name ↔ id index over dictionary
//!   entries, with multimap semantics
//! - **Datasets**: parsers for the NCBI Disease corpus (with the CTD
//!   MEDIC vocabulary) and the ShARe/CLEF eHealth corpus (with a
//!   SNOMED CT extract), including the frozen fold re-splits
//! - **Ranking**: candidate generation over the terminology plus a
//!   feature-weighted ranker and ranking-accuracy evaluation
//!
//! ## Quick start
//!
//! ```rust
//! use termlink::{DictEntry, Terminology};
//!
//! let term = Terminology::new([
//!     DictEntry::new("Colorectal Neoplasms", "MESH:D015179")
//!         .with_syn(["Colorectal Cancer", "CRC"]),
//! ]);
//!
//! assert!(term.has_name("CRC"));
//! let ids = term.ids(["Colorectal Cancer"]);
//! assert!(ids.contains("MESH:D015179"));
//! ```
//!
//! ## Linking mentions
//!
//! ```rust
//! use termlink::config::RankConfig;
//! use termlink::{DictEntry, Ranker, Terminology};
//!
//! let term = Terminology::new([
//!     DictEntry::new("Anemia", "MESH:D000740").with_syn(["Anaemia"]),
//! ]);
//! let ranker = Ranker::from_config(&RankConfig::default()).unwrap();
//! let ranked = ranker.rank(&term, "anaemia");
//! assert!(ranked[0].ids.contains("MESH:D000740"));
//! ```
//!
//! ## Design notes
//!
//! - The index is built once from a static resource and read-only
//!   afterwards; `&Terminology` queries are freely shareable across
//!   threads.
//! - [`Terminology::canonical_ids`] errors on ids absent from the
//!   index, while the set-valued queries degrade to empty sets; see
//!   its documentation for the rationale.

#![warn(missing_docs)]

pub mod candidates;
pub mod config;
pub mod corpus;
pub mod datasets;
mod error;
pub mod rank;
pub mod similarity;
pub mod terminology;

pub use candidates::{Candidate, CandidateGenerator, GeneratorSet, ScoredCandidate};
pub use config::Config;
pub use corpus::{Corpus, Document, Mention, Section};
pub use datasets::{load_corpus, load_terminology, Dataset, Subset};
pub use error::{Error, Result};
pub use rank::{Prediction, RankedCandidate, Ranker, RankingAccuracy};
pub use terminology::{DictEntry, Terminology};
