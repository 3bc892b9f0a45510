//! NCBI Disease corpus and CTD MEDIC terminology parsers.
//!
//! The corpus comes in PubTator format: per document, a `PMID|t|…`
//! title line and a `PMID|a|…` abstract line, followed by TAB-separated
//! annotation lines
//!
//! ```text
//! 10021369|t|Identification of APC2, a homologue of the …
//! 10021369|a|The adenomatous polyposis coli (APC) tumour …
//! 10021369	466	478	colon cancer	Modifier	D003110
//! ```
//!
//! Annotation offsets are document-wide characters (title, one
//! separator, abstract). Gold ids are normalized to the MEDIC id space:
//! bare MeSH ids get a `MESH:` prefix, `OMIM:` ids pass through,
//! alternative (`|`) and composite (`+`) annotations are split into
//! their parts.
//!
//! The MEDIC disease vocabulary is the CTD TSV export: `#`-prefixed
//! header comments, then eight columns per row (name, id, alt ids,
//! definition, parent ids, tree numbers, parent tree numbers,
//! synonyms), with `|`-separated list columns.

pub mod subsets;

use std::fs;
use std::path::Path;

use crate::corpus::{Corpus, Document, Mention, Section};
use crate::datasets::Subset;
use crate::terminology::DictEntry;
use crate::{Error, Result};

/// Load a corpus subset from the corpus directory.
///
/// Resolves the subset to its file/fold plan (see [`subsets::prepare`])
/// and parses each file, keeping only the selected documents.
pub fn load_corpus(dir: &Path, subset: Subset) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    for (path, filter) in subsets::prepare(dir, subset)? {
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::parse(format!("cannot read {}: {}", path.display(), e)))?;
        let docs = parse_corpus(&content)?;
        corpus
            .documents
            .extend(docs.into_iter().enumerate().filter_map(|(i, doc)| {
                filter.selects(i).then_some(doc)
            }));
    }
    Ok(corpus)
}

/// Parse a PubTator-format corpus file.
///
/// Documents are delimited by their title lines; blank lines between
/// documents are ignored. Annotation lines that do not belong to any
/// seen document, or that cannot be anchored in a section, are
/// reported as parse errors.
pub fn parse_corpus(content: &str) -> Result<Vec<Document>> {
    let mut docs: Vec<PubtatorDoc> = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if let Some((pmid, text)) = split_text_line(line, "|t|") {
            docs.push(PubtatorDoc::new(pmid, text));
        } else if let Some((pmid, text)) = split_text_line(line, "|a|") {
            let doc = docs
                .iter_mut()
                .rev()
                .find(|d| d.pmid == pmid)
                .ok_or_else(|| {
                    Error::parse(format!("line {}: abstract before title for {}", lineno + 1, pmid))
                })?;
            doc.set_abstract(text);
        } else {
            let ann = parse_annotation(line, lineno)?;
            let doc = docs
                .iter_mut()
                .rev()
                .find(|d| d.pmid == ann.pmid)
                .ok_or_else(|| {
                    Error::parse(format!(
                        "line {}: annotation for unseen document {}",
                        lineno + 1,
                        ann.pmid
                    ))
                })?;
            doc.add_mention(ann, lineno)?;
        }
    }

    Ok(docs.into_iter().map(PubtatorDoc::into_document).collect())
}

/// Read and parse the MEDIC disease vocabulary.
pub fn load_medic_terminology(path: &Path) -> Result<Vec<DictEntry>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::parse(format!("cannot read {}: {}", path.display(), e)))?;
    parse_medic_terminology(&content)
}

/// Parse the CTD MEDIC TSV export into terminology entries.
pub fn parse_medic_terminology(content: &str) -> Result<Vec<DictEntry>> {
    let mut entries = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(Error::parse(format!(
                "MEDIC line {}: expected at least 2 columns, got {}",
                lineno + 1,
                fields.len()
            )));
        }
        let column = |i: usize| fields.get(i).copied().unwrap_or("");
        entries.push(
            DictEntry::new(fields[0], fields[1])
                .with_alt(split_list(column(2)))
                .with_definition(column(3))
                .with_syn(split_list(column(7))),
        );
    }
    Ok(entries)
}

/// Normalize one gold annotation id field into individual terminology ids.
///
/// `D054198|D018311` lists alternative annotations, `D006938+D008113`
/// composite ones; both are flattened. Bare MeSH ids (and the `MESH:`-
/// less `C`/`D` forms MEDIC uses) get the `MESH:` prefix.
#[must_use]
pub fn normalize_gold_ids(raw: &str) -> Vec<String> {
    raw.split(['|', '+'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part.contains(':') {
                part.to_string()
            } else {
                format!("MESH:{}", part)
            }
        })
        .collect()
}

/// `|`-separated list column; empty column → no items.
fn split_list(column: &str) -> impl Iterator<Item = &str> {
    column.split('|').filter(|s| !s.is_empty())
}

fn split_text_line<'a>(line: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let pos = line.find(marker)?;
    Some((&line[..pos], &line[pos + marker.len()..]))
}

struct RawAnnotation {
    pmid: String,
    start: usize,
    end: usize,
    text: String,
    ids: Vec<String>,
}

fn parse_annotation(line: &str, lineno: usize) -> Result<RawAnnotation> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 6 {
        return Err(Error::parse(format!(
            "line {}: expected 6 TAB-separated annotation fields, got {}",
            lineno + 1,
            fields.len()
        )));
    }
    let parse_offset = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| Error::parse(format!("line {}: bad offset '{}'", lineno + 1, s)))
    };
    Ok(RawAnnotation {
        pmid: fields[0].to_string(),
        start: parse_offset(fields[1])?,
        end: parse_offset(fields[2])?,
        text: fields[3].to_string(),
        ids: normalize_gold_ids(fields[5]),
    })
}

/// A document under construction: title plus optional abstract.
struct PubtatorDoc {
    pmid: String,
    sections: Vec<Section>,
}

impl PubtatorDoc {
    fn new(pmid: &str, title: &str) -> Self {
        Self {
            pmid: pmid.to_string(),
            sections: vec![Section::new(title, 0)],
        }
    }

    fn set_abstract(&mut self, text: &str) {
        // Abstract offsets continue after the title and one separator.
        let offset = self.sections[0].end() + 1;
        self.sections.push(Section::new(text, offset));
    }

    fn add_mention(&mut self, ann: RawAnnotation, lineno: usize) -> Result<()> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.contains(ann.start))
            .ok_or_else(|| {
                Error::parse(format!(
                    "line {}: offset {} outside document {}",
                    lineno + 1,
                    ann.start,
                    ann.pmid
                ))
            })?;
        let start = ann.start - section.offset;
        let end = ann.end - section.offset;

        let spanned: String = section
            .text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect();
        if spanned != ann.text {
            log::warn!(
                "{}: annotation text mismatch at {}..{}: file says '{}', section has '{}'",
                ann.pmid,
                ann.start,
                ann.end,
                ann.text,
                spanned
            );
        }

        section.mentions.push(Mention::new(ann.text, start, end, ann.ids));
        Ok(())
    }

    fn into_document(self) -> Document {
        Document {
            id: self.pmid,
            sections: self.sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
10021369|t|Identification of APC2 in colon cancer
10021369|a|The adenomatous polyposis coli tumour suppressor.
10021369\t26\t38\tcolon cancer\tDiseaseClass\tD003110
10021369\t43\t69\tadenomatous polyposis coli\tModifier\tD011125

10021370|t|Hereditary breast cancer study
10021370\t11\t24\tbreast cancer\tSpecificDisease\tOMIM:114480
";

    #[test]
    fn parses_documents_and_sections() {
        let docs = parse_corpus(SAMPLE).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "10021369");
        assert_eq!(docs[0].sections.len(), 2);
        assert_eq!(docs[1].sections.len(), 1);
    }

    #[test]
    fn anchors_mentions_in_their_sections() {
        let docs = parse_corpus(SAMPLE).unwrap();
        let title = &docs[0].sections[0];
        assert_eq!(title.mentions.len(), 1);
        assert_eq!(title.mentions[0].text, "colon cancer");
        assert_eq!(title.mentions[0].start, 26);

        // Abstract mention is re-anchored section-relative.
        let abstr = &docs[0].sections[1];
        assert_eq!(abstr.offset, 39);
        assert_eq!(abstr.mentions.len(), 1);
        assert_eq!(abstr.mentions[0].start, 43 - 39);
        assert_eq!(abstr.mentions[0].end, 69 - 39);
    }

    #[test]
    fn normalizes_mesh_and_omim_ids() {
        let docs = parse_corpus(SAMPLE).unwrap();
        assert_eq!(
            docs[0].sections[0].mentions[0].ids,
            ["MESH:D003110".to_string()]
        );
        assert_eq!(
            docs[1].sections[0].mentions[0].ids,
            ["OMIM:114480".to_string()]
        );
    }

    #[test]
    fn splits_alternative_and_composite_ids() {
        assert_eq!(
            normalize_gold_ids("D054198|D018311"),
            ["MESH:D054198", "MESH:D018311"]
        );
        assert_eq!(
            normalize_gold_ids("D006938+OMIM:235200"),
            ["MESH:D006938", "OMIM:235200"]
        );
        assert!(normalize_gold_ids("").is_empty());
    }

    #[test]
    fn annotation_for_unseen_pmid_is_an_error() {
        let bad = "999\t0\t4\ttext\tSpecificDisease\tD000001\n";
        assert!(parse_corpus(bad).is_err());
    }

    #[test]
    fn short_annotation_line_is_an_error() {
        let bad = "10021369|t|Title\n10021369\t0\t5\n";
        let err = parse_corpus(bad).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    const MEDIC_SAMPLE: &str = "\
# DiseaseName\tDiseaseID\tAltDiseaseIDs\tDefinition\tParentIDs\tTreeNumbers\tParentTreeNumbers\tSynonyms
Colorectal Neoplasms\tMESH:D015179\tMESH:D003123|MESH:D003110\tTumors of the colon or rectum.\tMESH:D004067\tC04.588\tC04\tColorectal Cancer|Colorectal Carcinoma
Breast Neoplasms\tMESH:D001943\t\t\tMESH:D009371\tC04.588.180\tC04.588\tBreast Cancer
";

    #[test]
    fn parses_medic_rows() {
        let entries = parse_medic_terminology(MEDIC_SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);
        let first = &entries[0];
        assert_eq!(first.name, "Colorectal Neoplasms");
        assert_eq!(first.id, "MESH:D015179");
        assert_eq!(first.alt, ["MESH:D003123", "MESH:D003110"]);
        assert_eq!(first.definition, "Tumors of the colon or rectum.");
        assert_eq!(first.syn, ["Colorectal Cancer", "Colorectal Carcinoma"]);
        // Empty list columns stay empty.
        assert!(entries[1].alt.is_empty());
        assert!(entries[1].definition.is_empty());
    }

    #[test]
    fn medic_short_row_is_an_error() {
        assert!(parse_medic_terminology("just one column\n").is_err());
    }
}
