//! Session file location.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use casedesk::FileStore;

/// Get the session file path.
pub fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "casedesk").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Open the credential store backing the CLI session.
pub fn open_store() -> Result<Arc<FileStore>> {
    Ok(Arc::new(FileStore::new(session_path()?)))
}
