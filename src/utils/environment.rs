use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable that overrides the store location
pub const DATA_PATH_ENV: &str = "CHAT_ARCHIVE_DATA";

const APP_DIR: &str = "chat-archive";
const STORE_FILENAME: &str = "conversations_store.json";

/// Get the default store file path (`<data dir>/chat-archive/conversations_store.json`)
///
/// Resolution order: `CHAT_ARCHIVE_DATA`, then the platform data directory
/// (e.g. `~/.local/share` on Linux, `~/Library/Application Support` on macOS).
pub fn get_default_store_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(DATA_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(data_dir.join(APP_DIR).join(STORE_FILENAME))
}
