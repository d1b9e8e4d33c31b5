//! Link command handlers

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use linkkeeper_core::{CategoryFilter, Link, LinkDraft, LinkFilter, LinkImage, Store};

use crate::images::read_inline_image;
use crate::output::{short_id, Output};
use crate::{AddArgs, EditArgs};

/// Save a new link
pub fn add(store: &mut Store, args: AddArgs, output: &Output) -> Result<()> {
    let image = resolve_image(args.image_url, args.image_file.as_deref())?;

    let draft = LinkDraft {
        title: args.title,
        url: args.url,
        category: args.category,
        description: args.description.unwrap_or_default(),
        image,
    };

    let link = store.create(draft).context("Failed to save link")?;

    output.success(&format!("Saved link: {}", link.id));
    output.print_link(&link);

    Ok(())
}

/// List links, optionally filtered by category and search text
pub fn list(
    store: &Store,
    category: Option<String>,
    search: Option<String>,
    output: &Output,
) -> Result<()> {
    let filter = LinkFilter {
        category: match category {
            Some(category) => CategoryFilter::Category(category),
            None => CategoryFilter::All,
        },
        search: search.unwrap_or_default(),
    };

    let links = store.query(&filter);
    output.print_links(&links);
    Ok(())
}

/// Show a single link
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &id)?;
    let link = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Link not found: {}", id))?;

    output.print_link(link);
    Ok(())
}

/// Edit a link
///
/// With field flags the edit is applied directly; without any, each
/// field is prompted for with its current value as the default.
pub fn edit(store: &mut Store, args: EditArgs, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &args.id)?;
    let link = store
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Link not found: {}", id))?;

    let interactive = args.title.is_none()
        && args.url.is_none()
        && args.category.is_none()
        && args.description.is_none()
        && args.image_url.is_none()
        && args.image_file.is_none()
        && !args.clear_image;

    let mut draft = LinkDraft {
        title: link.title.clone(),
        url: link.url.clone(),
        category: link.category.clone(),
        description: link.description.clone(),
        image: link.image.clone(),
    };

    if interactive {
        println!("Editing link: {}", link.id);
        println!("Press Enter to keep current value, or type new value.\n");

        if let Some(title) = prompt_with_default("Title", &link.title)? {
            draft.title = title;
        }
        if let Some(url) = prompt_with_default("URL", &link.url)? {
            draft.url = url;
        }
        if let Some(category) = prompt_with_default("Category", &link.category)? {
            draft.category = category;
        }
        if let Some(description) = prompt_with_default("Description", &link.description)? {
            draft.description = description;
        }
    } else {
        if let Some(title) = args.title {
            draft.title = title;
        }
        if let Some(url) = args.url {
            draft.url = url;
        }
        if let Some(category) = args.category {
            draft.category = category;
        }
        if let Some(description) = args.description {
            draft.description = description;
        }
        if args.clear_image {
            draft.image = None;
        } else if let Some(image) = resolve_image(args.image_url, args.image_file.as_deref())? {
            draft.image = Some(image);
        }
    }

    let link = store.update(&id, draft).context("Failed to update link")?;

    output.success("Link updated");
    output.print_link(&link);

    Ok(())
}

/// Delete a link
pub fn delete(store: &mut Store, id: String, force: bool, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &id)?;
    let link = store
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Link not found: {}", id))?;

    if !force && output.should_prompt() {
        println!("Delete link: {} - {}", short_id(&link.id), link.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(&id).context("Failed to delete link")?;

    output.success(&format!("Deleted link: {}", id));
    Ok(())
}

/// Open a link in the browser
pub fn open(store: &Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &id)?;
    let link = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Link not found: {}", id))?;

    open::that(&link.url).with_context(|| format!("Failed to open {}", link.url))?;

    output.success(&format!("Opened {}", link.url));
    Ok(())
}

/// The image field from add/edit flags, if any
fn resolve_image(
    image_url: Option<String>,
    image_file: Option<&Path>,
) -> Result<Option<LinkImage>> {
    if let Some(url) = image_url {
        return Ok(Some(LinkImage::Url(url)));
    }
    if let Some(path) = image_file {
        return Ok(Some(read_inline_image(path)?));
    }
    Ok(None)
}

/// Resolve a link ID (supports full id or prefix)
fn resolve_link_id(store: &Store, id: &str) -> Result<String> {
    // Try exact match first
    if store.get(id).is_some() {
        return Ok(id.to_string());
    }

    // Try prefix match
    let matches: Vec<&Link> = store
        .links()
        .iter()
        .filter(|link| link.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No link found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple links match '{}':", id);
            for link in &matches {
                eprintln!("  {} - {}", link.id, link.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Prompt with a default value, returns None if user keeps default
fn prompt_with_default(prompt: &str, default: &str) -> Result<Option<String>> {
    if default.is_empty() {
        print!("{}: ", prompt);
    } else {
        print!("{} [{}]: ", prompt, default);
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}

/// Ask a yes/no question, defaulting to no
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_lowercase();

    Ok(input == "y" || input == "yes")
}
