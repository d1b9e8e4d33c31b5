//! Inline image payloads
//!
//! Reads a local image file and encodes it as a `data:` URL, the inline
//! form stored on a link's `image` field.

use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use linkkeeper_core::LinkImage;

/// Media type for a supported image file extension
fn media_type(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Read an image file and inline it as a base64 data URL payload
pub fn read_inline_image(path: &Path) -> Result<LinkImage> {
    let Some(media_type) = media_type(path) else {
        bail!(
            "'{}' is not a supported image file (png, jpg, jpeg, gif, webp, svg)",
            path.display()
        );
    };

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file {:?}", path))?;

    let encoded = STANDARD.encode(bytes);
    Ok(LinkImage::Base64(format!(
        "data:{};base64,{}",
        media_type, encoded
    )))
}
