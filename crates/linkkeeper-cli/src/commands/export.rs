//! Export command handler

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use linkkeeper_core::{Store, StoreError};

use crate::output::Output;

/// Default export file name
pub const DEFAULT_EXPORT_FILE: &str = "linkkeeper-export.json";

/// Write the whole collection to a pretty-printed JSON file
pub fn run(store: &Store, file: Option<PathBuf>, output: &Output) -> Result<()> {
    let json = match store.export_json() {
        Ok(json) => json,
        Err(StoreError::EmptyCollection) => {
            output.message("There are no links to export.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let path = file.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
    fs::write(&path, json).with_context(|| format!("Failed to write export file {:?}", path))?;

    output.success(&format!(
        "Exported {} link(s) to {}",
        store.link_count(),
        path.display()
    ));
    Ok(())
}
