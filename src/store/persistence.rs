//! Store file persistence: load/save with atomic writes

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ArchiveError, Result};
use crate::models::Conversation;

/// On-disk shape: `{"conversations": [...]}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    conversations: Vec<Conversation>,
}

/// Borrowed counterpart of [`StoreFile`] so saving never clones the record set
#[derive(Serialize)]
struct StoreFileRef<'a> {
    conversations: &'a [Conversation],
}

/// Load all records from `path`.
///
/// Creates the parent directory if needed. A missing file is an empty store;
/// a file that does not decode is [`ArchiveError::CorruptStore`].
pub fn load_records(path: &Path) -> Result<Vec<Conversation>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Store file absent, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let payload: StoreFile = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            ArchiveError::Io(e.into())
        } else {
            ArchiveError::CorruptStore { path: path.to_path_buf(), source: e }
        }
    })?;

    Ok(payload.conversations)
}

/// Save records atomically: write a sibling temp file, fsync, then rename over `path`
pub fn save_records(path: &Path, conversations: &[Conversation]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &StoreFileRef { conversations })
        .map_err(ArchiveError::Serialize)?;
    writer.write_all(b"\n")?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    tracing::debug!(
        path = %path.display(),
        conversations = conversations.len(),
        "Persisted store"
    );

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
