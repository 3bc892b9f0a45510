//! Corpus data model: documents, sections, and concept mentions.
//!
//! Dataset parsers produce this structure; the sampler/ranker consumes
//! it. A mention is a text span linked to zero or more terminology ids
//! (zero for annotations the resource could not map, e.g. `CUI-less`).

use serde::{Deserialize, Serialize};

/// A parsed corpus: an ordered collection of documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// Documents in file order.
    pub documents: Vec<Document>,
}

impl Corpus {
    /// Create an empty corpus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document.
    pub fn push(&mut self, doc: Document) {
        self.documents.push(doc);
    }

    /// Number of documents.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Total number of mentions across all documents.
    #[must_use]
    pub fn mention_count(&self) -> usize {
        self.documents
            .iter()
            .flat_map(|d| &d.sections)
            .map(|s| s.mentions.len())
            .sum()
    }

    /// Iterate over all mentions in document order.
    pub fn mentions(&self) -> impl Iterator<Item = &Mention> {
        self.documents
            .iter()
            .flat_map(|d| &d.sections)
            .flat_map(|s| &s.mentions)
    }

    /// Iterate over `(text, ids)` pairs for every mention.
    pub fn mention_pairs(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.mentions().map(|m| (m.text.as_str(), m.ids.as_slice()))
    }
}

/// One document (e.g. a PubMed abstract or a clinical report).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier (PMID, report name, …).
    pub id: String,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a document with no sections yet.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sections: Vec::new(),
        }
    }
}

/// A contiguous text section of a document (title, abstract, body).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section text.
    pub text: String,
    /// Start of this section in document-wide character coordinates.
    pub offset: usize,
    /// Mentions anchored in this section.
    pub mentions: Vec<Mention>,
}

impl Section {
    /// Create a section with no mentions yet.
    #[must_use]
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
            mentions: Vec::new(),
        }
    }

    /// End of this section in document-wide character coordinates.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.text.chars().count()
    }

    /// Whether a document-wide character offset falls inside this section.
    #[must_use]
    pub fn contains(&self, doc_offset: usize) -> bool {
        (self.offset..self.end()).contains(&doc_offset)
    }
}

/// A concept mention: a text span linked to terminology ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Surface text of the mention.
    pub text: String,
    /// Start offset, section-relative, in characters.
    pub start: usize,
    /// End offset (exclusive), section-relative, in characters.
    pub end: usize,
    /// Gold terminology ids; empty when the annotation is unmapped.
    pub ids: Vec<String>,
}

impl Mention {
    /// Create a mention.
    #[must_use]
    pub fn new<I, S>(text: impl Into<String>, start: usize, end: usize, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            start,
            end,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}
