//! Export-to-record import pipeline
//!
//! # Error Handling Strategy
//!
//! - **Fatal**: an unreadable or structurally malformed export aborts the
//!   whole import before anything is written.
//! - **Excluded, not fatal**: conversations with an empty mapping, an empty
//!   timeline, or no extractable text on any node are dropped and logged at
//!   debug level.
//! - **Persistence**: a store failure stops the import at that record.
//!   Records committed before it stay committed; there is no batch rollback.

pub mod normalize;
pub mod text;

use std::io::Read;
use std::path::Path;

use rayon::prelude::*;

use crate::errors::{ArchiveError, Result};
use crate::models::{Conversation, ExportConversation};
use crate::parsers::{read_export, read_export_file};
use crate::store::{ConversationStore, MergeOutcome};

pub use normalize::convert_conversation;

/// Counts reported after merging an import into the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
}

/// Read an export file and convert it into archive records, in export order
pub fn load_and_convert(path: &Path) -> Result<Vec<Conversation>> {
    let raw = read_export_file(path)?;
    Ok(convert_all(&raw))
}

/// Same as [`load_and_convert`] for an arbitrary byte stream
pub fn convert_export<R: Read>(reader: R) -> Result<Vec<Conversation>> {
    let raw = read_export(reader)?;
    Ok(convert_all(&raw))
}

/// Convert every export conversation, dropping the ones with nothing to archive.
///
/// Conversations are independent, so they are converted in parallel; the
/// output keeps the input order.
pub fn convert_all(raw: &[ExportConversation]) -> Vec<Conversation> {
    let converted: Vec<Option<Conversation>> = raw.par_iter().map(convert_conversation).collect();

    let mut records = Vec::with_capacity(converted.len());
    for (index, item) in converted.into_iter().enumerate() {
        match item {
            Some(record) => records.push(record),
            None => tracing::debug!(
                index,
                id = %raw[index].conversation_id,
                title = %raw[index].title,
                "Skipping conversation with nothing to archive"
            ),
        }
    }

    tracing::info!(
        exported = raw.len(),
        converted = records.len(),
        skipped = raw.len() - records.len(),
        "Converted export"
    );

    records
}

/// Merge converted records into the store one at a time.
///
/// Stops at the first persistence error, reported as [`ArchiveError::Persist`]
/// with the failing id; earlier records stay committed.
pub fn import_into(store: &ConversationStore, records: Vec<Conversation>) -> Result<ImportReport> {
    let mut report = ImportReport { total: records.len(), ..Default::default() };

    for record in records {
        let id = record.id.clone();
        let outcome = store.upsert(record).map_err(|source| {
            tracing::error!(id = %id, error = %source, "Failed to persist conversation");
            ArchiveError::Persist { id, source: Box::new(source) }
        })?;

        match outcome {
            MergeOutcome::Created => report.created += 1,
            MergeOutcome::Updated => report.updated += 1,
        }
    }

    tracing::info!(
        total = report.total,
        created = report.created,
        updated = report.updated,
        "Import merged into store"
    );

    Ok(report)
}
