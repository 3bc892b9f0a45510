//! ShARe/CLEF eHealth corpus and SNOMED terminology parsers.
//!
//! Annotations come as standoff lines over a directory of plain-text
//! clinical reports:
//!
//! ```text
//! 00098-016139.txt||Disease_Disorder||C0018681||13||21
//! 00098-016139.txt||Disease_Disorder||CUI-less||34||41||50||58
//! ```
//!
//! Each line names the report file, the annotation class, a UMLS CUI
//! (or `CUI-less` for unmapped annotations), and one or more
//! `start||end` character-offset pairs. Discontinuous annotations are
//! collapsed to their outer span.
//!
//! The terminology is a SNOMED CT extract as TSV: one concept per
//! line, `cui<TAB>preferred name<TAB>synonyms`, synonyms `|`-separated
//! and optional.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::DatasetPaths;
use crate::corpus::{Corpus, Document, Mention, Section};
use crate::datasets::Subset;
use crate::terminology::DictEntry;
use crate::{Error, Result};

/// Marker for annotations without a terminology mapping.
pub const CUI_LESS: &str = "CUI-less";

/// Load a corpus subset using the configured annotation files and
/// report directory.
///
/// Fold-based subsets are NCBI-specific; only `train`, `dev`, and
/// `test` exist here.
pub fn load_corpus(paths: &DatasetPaths, subset: Subset) -> Result<Corpus> {
    let base = match subset {
        Subset::Train(1) => "train",
        Subset::Dev(1) => "dev",
        Subset::Test => "test",
        other => {
            return Err(Error::invalid_input(format!(
                "share-clef has no fold subsets (got {})",
                other
            )))
        }
    };
    let annotation_fn = paths.annotation_fns.get(base).ok_or_else(|| {
        Error::config(format!("share-clef: no annotation file for '{}'", base))
    })?;
    let report_dir = paths
        .report_dir
        .as_ref()
        .ok_or_else(|| Error::config("share-clef: report_dir not configured"))?;

    let content = fs::read_to_string(annotation_fn).map_err(|e| {
        Error::parse(format!("cannot read {}: {}", annotation_fn.display(), e))
    })?;
    let annotations = parse_annotations(&content)?;
    build_corpus(&annotations, report_dir)
}

/// One parsed standoff annotation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeAnnotation {
    /// Report file name the annotation belongs to.
    pub report: String,
    /// Annotation class (e.g. `Disease_Disorder`).
    pub class: String,
    /// UMLS CUI; `None` for `CUI-less` annotations.
    pub cui: Option<String>,
    /// Character-offset spans, in line order.
    pub spans: Vec<(usize, usize)>,
}

impl PipeAnnotation {
    /// Outer span covering all segments.
    #[must_use]
    pub fn outer_span(&self) -> (usize, usize) {
        let start = self.spans.iter().map(|s| s.0).min().unwrap_or(0);
        let end = self.spans.iter().map(|s| s.1).max().unwrap_or(0);
        (start, end)
    }
}

/// Parse a `||`-delimited standoff annotation file.
pub fn parse_annotations(content: &str) -> Result<Vec<PipeAnnotation>> {
    let mut annotations = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split("||").collect();
        if fields.len() < 5 || fields.len() % 2 == 0 {
            return Err(Error::parse(format!(
                "annotation line {}: expected report||class||cui||start||end…, got {} fields",
                lineno + 1,
                fields.len()
            )));
        }
        let cui = match fields[2] {
            CUI_LESS => None,
            cui => Some(cui.to_string()),
        };
        let mut spans = Vec::new();
        for pair in fields[3..].chunks(2) {
            let parse = |s: &str| {
                s.trim().parse::<usize>().map_err(|_| {
                    Error::parse(format!("annotation line {}: bad offset '{}'", lineno + 1, s))
                })
            };
            spans.push((parse(pair[0])?, parse(pair[1])?));
        }
        annotations.push(PipeAnnotation {
            report: fields[0].to_string(),
            class: fields[1].to_string(),
            cui,
            spans,
        });
    }
    Ok(annotations)
}

/// Group annotations by report and anchor them in the report texts.
fn build_corpus(annotations: &[PipeAnnotation], report_dir: &Path) -> Result<Corpus> {
    let mut by_report: HashMap<&str, Vec<&PipeAnnotation>> = HashMap::new();
    let mut report_order: Vec<&str> = Vec::new();
    for ann in annotations {
        let slot = by_report.entry(&ann.report).or_insert_with(|| {
            report_order.push(&ann.report);
            Vec::new()
        });
        slot.push(ann);
    }

    let mut corpus = Corpus::new();
    for report in report_order {
        let path = report_dir.join(report);
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::parse(format!("cannot read {}: {}", path.display(), e)))?;
        let chars: Vec<char> = text.chars().collect();

        let mut section = Section::new(text.as_str(), 0);
        for ann in &by_report[report] {
            let (start, end) = ann.outer_span();
            if end > chars.len() || start > end {
                return Err(Error::parse(format!(
                    "{}: annotation span {}..{} outside report ({} chars)",
                    report,
                    start,
                    end,
                    chars.len()
                )));
            }
            let mention_text: String = chars[start..end].iter().collect();
            if ann.spans.len() > 1 {
                log::debug!(
                    "{}: discontinuous annotation collapsed to {}..{}",
                    report,
                    start,
                    end
                );
            }
            section
                .mentions
                .push(Mention::new(mention_text, start, end, ann.cui.clone()));
        }

        let mut doc = Document::new(report);
        doc.sections.push(section);
        corpus.push(doc);
    }
    Ok(corpus)
}

/// Read and parse a SNOMED terminology extract.
pub fn load_snomed_terminology(path: &Path) -> Result<Vec<DictEntry>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::parse(format!("cannot read {}: {}", path.display(), e)))?;
    parse_snomed_terminology(&content)
}

/// Parse the TSV terminology extract into entries.
///
/// SNOMED extracts carry no alternative ids and no definitions; those
/// fields stay empty.
pub fn parse_snomed_terminology(content: &str) -> Result<Vec<DictEntry>> {
    let mut entries = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(Error::parse(format!(
                "SNOMED line {}: expected cui<TAB>name, got {} columns",
                lineno + 1,
                fields.len()
            )));
        }
        let syn = fields
            .get(2)
            .copied()
            .unwrap_or("")
            .split('|')
            .filter(|s| !s.is_empty());
        entries.push(DictEntry::new(fields[1], fields[0]).with_syn(syn));
    }
    Ok(entries)
}
