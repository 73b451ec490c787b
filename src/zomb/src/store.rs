//! Record aggregation across documents
//!
//! [`RecordStore`] accumulates records from any number of documents. Once
//! every document is in, [`RecordStore::finalize`] consumes it, runs the
//! attachment resolver exactly once, and returns a read-only
//! [`FinalizedStore`]. Because `finalize` takes the store by value, ingesting
//! after finalization or finalizing twice cannot compile.
//!
//! Merge policy: a record replaces any earlier record with the same id in
//! full (no field-level merge), whatever category either of them landed in.
//! Within one category the replacement keeps the discovery position of the
//! record it replaces; a record that changes category moves to the end of its
//! new table.

use crate::document::{parse_document, ParsedDocument, Warning};
use crate::record::{Category, Record};
use crate::resolve::{self, attachment_links, ResolveSummary};
use crate::Error;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Records of one category, unique by id, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl CategoryTable {
    /// Insert a record, replacing (in place) any record with the same id
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        match self.index.get(&record.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index.insert(record.id.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.index.get(id).map(|&slot| &mut self.records[slot])
    }

    /// Remove a record, keeping the others in order
    pub fn remove(&mut self, id: &str) -> Option<Record> {
        let slot = self.index.remove(id)?;
        for later in self.index.values_mut().filter(|s| **s > slot) {
            *later -= 1;
        }
        Some(self.records.remove(slot))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a CategoryTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for CategoryTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.records)
    }
}

/// Outcome of merging one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub source_tag: String,
    /// Records whose id was not in the store yet, skipped ones included
    pub added: usize,
    /// Records that replaced an earlier record with the same id
    pub replaced: usize,
    pub warnings: Vec<Warning>,
    /// Structural fault that cut the document short; earlier records stay merged
    pub failure: Option<Error>,
}

type Tables = BTreeMap<Category, CategoryTable>;

/// Open store, accepting documents
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    tables: Tables,
    /// Category each live id is stored under
    locations: HashMap<String, Category>,
    documents: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document and merge its records
    pub fn ingest(&mut self, text: &str, source_tag: &str) -> IngestReport {
        self.merge(parse_document(text, source_tag))
    }

    /// Merge a document parsed elsewhere (e.g. on a worker thread)
    pub fn merge(&mut self, document: ParsedDocument) -> IngestReport {
        let mut added = 0;
        let mut replaced = 0;

        for record in document.records {
            let category = record.category;
            let moved_from = match self.locations.insert(record.id.clone(), category) {
                Some(old) if old != category => self
                    .tables
                    .get_mut(&old)
                    .and_then(|table| table.remove(&record.id)),
                _ => None,
            };
            let overwritten = self.tables.entry(category).or_default().insert(record);

            match moved_from.or(overwritten) {
                Some(previous) => {
                    tracing::debug!(
                        id = %previous.id,
                        from = %previous.category,
                        to = %category,
                        replaced_from = %previous.source_tag,
                        by = %document.source_tag,
                        "replacing earlier record"
                    );
                    replaced += 1;
                }
                None => added += 1,
            }
        }
        self.documents += 1;

        IngestReport {
            source_tag: document.source_tag,
            added,
            replaced,
            warnings: document.warnings,
            failure: document.failure,
        }
    }

    /// Number of documents merged so far
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn len(&self) -> usize {
        self.tables.values().map(CategoryTable::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, category: Category, id: &str) -> Option<&Record> {
        self.tables.get(&category)?.get(id)
    }

    /// Close the store and link attachments to guns
    pub fn finalize(mut self) -> FinalizedStore {
        let links = attachment_links(
            self.tables
                .get(&Category::Attachment)
                .into_iter()
                .flat_map(CategoryTable::iter),
        );
        let summary = resolve::apply(&links, self.tables.entry(Category::Gun).or_default());

        tracing::info!(
            documents = self.documents,
            records = self.len(),
            linked_guns = summary.linked,
            dangling = summary.dangling,
            "record store finalized"
        );

        FinalizedStore {
            tables: self.tables,
            documents: self.documents,
            summary,
        }
    }
}

/// Read-only store with attachments resolved
#[derive(Debug, Clone)]
pub struct FinalizedStore {
    tables: Tables,
    documents: usize,
    summary: ResolveSummary,
}

impl Serialize for FinalizedStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tables.serialize(serializer)
    }
}

impl FinalizedStore {
    /// Records of a category in discovery order
    pub fn records(&self, category: Category) -> impl Iterator<Item = &Record> {
        self.tables.get(&category).into_iter().flat_map(CategoryTable::iter)
    }

    pub fn table(&self, category: Category) -> Option<&CategoryTable> {
        self.tables.get(&category)
    }

    pub fn get(&self, category: Category, id: &str) -> Option<&Record> {
        self.tables.get(&category)?.get(id)
    }

    /// Record count per category, zero counts included
    pub fn counts(&self) -> BTreeMap<Category, usize> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.tables.get(&c).map_or(0, CategoryTable::len)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.values().map(CategoryTable::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn documents(&self) -> usize {
        self.documents
    }

    /// What the attachment resolver did at finalization
    pub fn resolve_summary(&self) -> ResolveSummary {
        self.summary
    }
}
