use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::errors::{ArchiveError, Result};
use crate::models::ExportConversation;

/// Parse an export stream into its conversations.
///
/// The top level must be a JSON array. Decoding is all-or-nothing: any
/// structural problem fails the whole read with [`ArchiveError::MalformedExport`],
/// while a failure of the underlying reader surfaces as [`ArchiveError::Io`].
pub fn read_export<R: Read>(reader: R) -> Result<Vec<ExportConversation>> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() { ArchiveError::Io(e.into()) } else { ArchiveError::MalformedExport(e) }
    })
}

/// Open and parse an export file. A missing file is an I/O error.
pub fn read_export_file(path: &Path) -> Result<Vec<ExportConversation>> {
    let file = File::open(path)?;
    let conversations = read_export(BufReader::new(file))?;

    tracing::debug!(
        path = %path.display(),
        conversations = conversations.len(),
        "Read export file"
    );

    Ok(conversations)
}
