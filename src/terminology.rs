//! Terminology indexed by names and by identifiers.
//!
//! A [`Terminology`] is built once from a stream of [`DictEntry`] records
//! and then queried read-only for the rest of a linking session. It keeps
//! two multimaps over shared entries:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       Terminology                         │
//! ├───────────────────────────────────────────────────────────┤
//! │  by_name: name / synonym  → [entry, …]                    │
//! │  by_id:   id / alt id     → [entry, …]                    │
//! │                                                           │
//! │  entries are Arc-shared: every key of an entry points     │
//! │  at the same record                                       │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Multiple entries may share a key (duplicate names across concepts,
//! merged identifiers), so every key maps to a *list* of entries rather
//! than a single one.
//!
//! # Example
//!
//! ```rust
//! use termlink::{DictEntry, Terminology};
//!
//! let entry = DictEntry::new("adenomatous polyposis coli", "MESH:D011125")
//!     .with_alt(["MESH:D044483"])
//!     .with_syn(["polyposis coli", "familial polyposis"]);
//! let term = Terminology::new([entry]);
//!
//! assert!(term.has_name("polyposis coli"));
//! assert!(term.has_id("MESH:D044483"));
//! let ids = term.ids(["familial polyposis"]);
//! assert!(ids.contains("MESH:D011125"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::{Error, Result};

/// One terminology entry: a concept with its names and identifiers.
///
/// Entries are immutable once constructed. The `alt` identifiers are
/// considered synonymous with `id` for lookup purposes (deprecated or
/// merged ids), and every `syn` string is an alternative surface name
/// for `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    /// Canonical name of the concept.
    pub name: String,
    /// Canonical (preferred) identifier.
    pub id: String,
    /// Alternative identifiers, synonymous with `id`.
    pub alt: Vec<String>,
    /// Free-text definition; empty when the resource provides none.
    pub definition: String,
    /// Synonyms of `name`.
    pub syn: Vec<String>,
}

impl DictEntry {
    /// Create an entry with just a name and a canonical id.
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            alt: Vec::new(),
            definition: String::new(),
            syn: Vec::new(),
        }
    }

    /// Set the alternative identifiers.
    #[must_use]
    pub fn with_alt<I, S>(mut self, alt: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt = alt.into_iter().map(Into::into).collect();
        self
    }

    /// Set the definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Set the synonyms.
    #[must_use]
    pub fn with_syn<I, S>(mut self, syn: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.syn = syn.into_iter().map(Into::into).collect();
        self
    }
}

/// One side of the bidirectional index: key → entries, with keys kept
/// in first-insertion order so iteration is deterministic.
#[derive(Debug, Default, Clone)]
struct MultiIndex {
    map: HashMap<String, Vec<Arc<DictEntry>>>,
    /// Distinct keys in order of first occurrence.
    order: Vec<String>,
}

impl MultiIndex {
    fn insert(&mut self, key: &str, entry: &Arc<DictEntry>) {
        let Self { map, order } = self;
        let slot = map.entry(key.to_owned()).or_insert_with(|| {
            order.push(key.to_owned());
            Vec::new()
        });
        slot.push(Arc::clone(entry));
    }

    fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn get(&self, key: &str) -> &[Arc<DictEntry>] {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Bidirectional terminology index.
///
/// Maps between entity names/synonyms and canonical/alternative
/// identifiers with multimap semantics. Constructed once from a static
/// resource; mutation only through [`add`](Terminology::add), no
/// deletion.
///
/// All `&self` queries are safe to share across threads once
/// construction is done — the index has no interior mutability.
#[derive(Debug, Default, Clone)]
pub struct Terminology {
    by_name: MultiIndex,
    by_id: MultiIndex,
    len: usize,
}

impl Terminology {
    /// Build a terminology from a stream of entries.
    ///
    /// Entries are inserted in input order; insertion order determines
    /// iteration order but not query semantics.
    #[must_use]
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DictEntry>,
    {
        let mut term = Self::default();
        for entry in entries {
            term.add(entry);
        }
        term
    }

    /// Insert one entry under all of its keys.
    ///
    /// The entry becomes reachable from its name and every synonym in
    /// the name index, and from its id and every alternative id in the
    /// id index. Insertion is total: there is no partial indexing.
    ///
    /// Re-adding an equal entry duplicates list membership rather than
    /// deduplicating; set-valued queries hide the duplicates.
    pub fn add(&mut self, entry: DictEntry) {
        let entry = Arc::new(entry);
        self.by_name.insert(&entry.name, &entry);
        for syn in &entry.syn {
            self.by_name.insert(syn, &entry);
        }
        self.by_id.insert(&entry.id, &entry);
        for alt in &entry.alt {
            self.by_id.insert(alt, &entry);
        }
        self.len += 1;
    }

    /// Is there an entry with this id (canonical or alternative)?
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.by_id.contains(id)
    }

    /// Is there an entry mentioning this name (canonical or synonym)?
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.by_name.contains(name)
    }

    /// All canonical ids of entries reachable from any of these names.
    ///
    /// Names absent from the index contribute nothing.
    #[must_use]
    pub fn ids<I, S>(&self, names: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .flat_map(|name| self.by_name.get(name.as_ref()).iter())
            .map(|e| e.id.clone())
            .collect()
    }

    /// All names and synonyms of entries reachable from any of these ids.
    ///
    /// Unknown ids contribute nothing.
    #[must_use]
    pub fn names<I, S>(&self, ids: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = HashSet::new();
        for id in ids {
            for entry in self.by_id.get(id.as_ref()) {
                names.insert(entry.name.clone());
                names.extend(entry.syn.iter().cloned());
            }
        }
        names
    }

    /// All non-empty definitions of entries reachable from this name.
    ///
    /// Unknown name → empty set. Entries without a definition
    /// contribute nothing.
    #[must_use]
    pub fn definitions(&self, name: &str) -> HashSet<String> {
        self.by_name
            .get(name)
            .iter()
            .filter(|e| !e.definition.is_empty())
            .map(|e| e.definition.clone())
            .collect()
    }

    /// Canonical ids of all entries that list `id` as their own id or
    /// as an alternative.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownId`] when `id` is entirely absent
    /// from the id index. This is deliberately stricter than
    /// [`ids`](Terminology::ids) and [`names`](Terminology::names),
    /// which degrade silently: an id that occurs in a corpus but not in
    /// the terminology is an id-space mismatch worth surfacing.
    pub fn canonical_ids(&self, id: &str) -> Result<HashSet<String>> {
        if !self.by_id.contains(id) {
            return Err(Error::unknown_id(id));
        }
        Ok(self.by_id.get(id).iter().map(|e| e.id.clone()).collect())
    }

    /// Iterate over all distinct ids (canonical and alternative), in
    /// first-insertion order. Restartable: each call yields the same
    /// sequence absent mutation.
    pub fn iter_ids(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys()
    }

    /// Iterate over all distinct names and synonyms, in first-insertion
    /// order. Restartable.
    pub fn iter_names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys()
    }

    /// Entries indexed under this name or synonym.
    #[must_use]
    pub fn entries_for_name(&self, name: &str) -> &[Arc<DictEntry>] {
        self.by_name.get(name)
    }

    /// Entries indexed under this id or alternative id.
    #[must_use]
    pub fn entries_for_id(&self, id: &str) -> &[Arc<DictEntry>] {
        self.by_id.get(id)
    }

    /// Number of entries added (counting duplicates).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no entries have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl FromIterator<DictEntry> for Terminology {
    fn from_iter<I: IntoIterator<Item = DictEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Extend<DictEntry> for Terminology {
    fn extend<I: IntoIterator<Item = DictEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.add(entry);
        }
    }
}
