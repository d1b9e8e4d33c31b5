//! Import command handler

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use linkkeeper_core::{Store, StoreError};

use crate::output::Output;

/// Merge links from a JSON export file into the store
///
/// Invalid records inside a well-formed file are dropped silently; a
/// file that is not shaped like an export, or that yields no admissible
/// links, fails without touching the collection.
pub fn run(store: &mut Store, file: PathBuf, output: &Output) -> Result<()> {
    let raw = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read import file {:?}", file))?;

    match store.merge_import(&raw) {
        Ok(count) => {
            output.success(&format!("Imported {} link(s)", count));
            Ok(())
        }
        Err(err @ StoreError::InvalidFormat(_)) => bail!("Import failed: {}", err),
        Err(StoreError::NoValidRecords) => {
            bail!("Import failed: the file contains no valid links")
        }
        Err(err) => Err(err.into()),
    }
}
