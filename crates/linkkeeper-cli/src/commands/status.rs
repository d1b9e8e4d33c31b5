//! Status command handler

use anyhow::Result;

use linkkeeper_core::Store;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let config = store.config();
    let data_path = config.data_path();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_file": data_path,
                    "data_file_exists": data_path.exists(),
                    "counts": {
                        "links": store.link_count(),
                        "categories": store.categories().len()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.link_count());
        }
        OutputFormat::Human => {
            println!("linkkeeper Status");
            println!("=================");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Data:     {}", data_path.display());
            println!();
            println!("Contents:");
            println!("  Links:      {}", store.link_count());
            println!("  Categories: {}", store.categories().len());
        }
    }

    Ok(())
}
