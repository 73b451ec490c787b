//! Per-document pipeline: normalize, extract, parse, classify
//!
//! [`parse_document`] touches no shared state, so documents can be parsed on
//! worker threads and merged into a [`crate::RecordStore`] afterwards.

use crate::attributes::{known, parse_attributes};
use crate::block::{extract_blocks, Extracted, MalformedReason};
use crate::classify::classify_record;
use crate::normalize::normalize;
use crate::record::Record;
use crate::Error;

/// Non-fatal problems found while parsing a document
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("Malformed block `{header}` at offset {offset}: {reason}")]
    MalformedBlock {
        header: String,
        reason: MalformedReason,
        offset: usize,
    },

    #[error("Duplicate attribute `{name}` in `{id}`: `{previous}` replaced by `{replacement}`")]
    DuplicateAttribute {
        id: String,
        name: String,
        previous: String,
        replacement: String,
    },
}

/// Records and diagnostics from one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub source_tag: String,
    /// One record per well-formed block, in document order (skipped ones included)
    pub records: Vec<Record>,
    pub warnings: Vec<Warning>,
    /// Set when the document was abandoned part-way
    pub failure: Option<Error>,
}

/// Run the per-document pipeline over raw (already decoded) text
pub fn parse_document(text: &str, source_tag: &str) -> ParsedDocument {
    let normalized = normalize(text);
    let extraction = extract_blocks(&normalized);

    let mut document = ParsedDocument {
        source_tag: source_tag.to_string(),
        failure: extraction.failure,
        ..Default::default()
    };

    for item in extraction.items {
        let block = match item {
            Extracted::Block(block) => block,
            Extracted::Malformed {
                header,
                reason,
                offset,
            } => {
                let warning = Warning::MalformedBlock {
                    header,
                    reason,
                    offset,
                };
                tracing::warn!(source = source_tag, "{warning}");
                document.warnings.push(warning);
                continue;
            }
        };

        for nested in block.nested.iter().filter(|n| n.is_item()) {
            let warning = Warning::MalformedBlock {
                header: nested.header.clone(),
                reason: MalformedReason::NestedInItem,
                offset: nested.offset,
            };
            tracing::warn!(source = source_tag, id = %block.id, "{warning}");
            document.warnings.push(warning);
        }

        let parsed = parse_attributes(&block.body);
        for duplicate in parsed.duplicates {
            let warning = Warning::DuplicateAttribute {
                id: block.id.clone(),
                name: duplicate.name,
                previous: duplicate.previous,
                replacement: duplicate.replacement,
            };
            tracing::warn!(source = source_tag, "{warning}");
            document.warnings.push(warning);
        }

        let mut attributes = parsed.attributes;
        let category = classify_record(&block.id, &mut attributes);
        if category.is_exported() {
            attributes.insert(known::FROM_MOD.to_string(), source_tag.to_string());
        }

        document.records.push(Record {
            id: block.id,
            category,
            attributes,
            source_tag: source_tag.to_string(),
        });
    }

    if let Some(failure) = &document.failure {
        tracing::warn!(source = source_tag, "Abandoning rest of document: {failure}");
    }

    document
}
