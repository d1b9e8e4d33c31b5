//! Category command handlers

use anyhow::Result;

use linkkeeper_core::Store;

use crate::output::Output;

/// List all categories in presentation order
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let categories = store.categories();
    output.print_categories(&categories);
    Ok(())
}
