//! Clipboard paste source for the media pipeline.

use std::io::Cursor;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::{ClipboardContent, ClipboardItem, MediaCandidate};
use crate::domain::errors::GalleryError;

/// Extracts the first image-typed item from paste data as a candidate.
///
/// Pasted images usually arrive without a file name, so one is generated
/// from the item's MIME type.
///
/// # Errors
/// Returns [`GalleryError::NoImageInClipboard`] when no image-typed item
/// is present.
pub fn extract_image(content: &ClipboardContent) -> Result<MediaCandidate, GalleryError> {
    let item = content
        .first_image()
        .ok_or(GalleryError::NoImageInClipboard)?;

    let name = format!("pasted-{}.{}", Uuid::new_v4(), extension_for(&item.mime_type));
    debug!(mime = %item.mime_type, name = %name, "Extracted image from clipboard");

    Ok(MediaCandidate::new(
        item.bytes.clone(),
        item.mime_type.clone(),
        name,
    ))
}

/// Reads the system clipboard into platform-independent paste data.
///
/// Images come back as a PNG-encoded `image/png` item; plain text becomes
/// a `text/plain` item. Runs on the blocking pool since clipboard access
/// is synchronous.
///
/// # Errors
/// Returns [`GalleryError::Decode`] when the clipboard cannot be opened
/// or its image data cannot be re-encoded.
pub async fn read_system_clipboard() -> Result<ClipboardContent, GalleryError> {
    tokio::task::spawn_blocking(|| {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| {
            warn!(error = %e, "Failed to open system clipboard");
            GalleryError::decode(format!("could not open clipboard: {e}"))
        })?;

        let mut items = Vec::new();

        if let Ok(image) = clipboard.get_image() {
            items.push(ClipboardItem::new("image/png", png_from_rgba(&image)?));
        }

        if let Ok(text) = clipboard.get_text() {
            items.push(ClipboardItem::new("text/plain", text.into_bytes()));
        }

        Ok(ClipboardContent::new(items))
    })
    .await
    .map_err(|e| GalleryError::unexpected(format!("clipboard task failed: {e}")))?
}

/// Re-encodes raw RGBA clipboard data as PNG bytes.
fn png_from_rgba(data: &arboard::ImageData<'_>) -> Result<Vec<u8>, GalleryError> {
    let width = u32::try_from(data.width)
        .map_err(|_| GalleryError::decode("clipboard image width out of range"))?;
    let height = u32::try_from(data.height)
        .map_err(|_| GalleryError::decode("clipboard image height out of range"))?;

    let buffer = image::RgbaImage::from_raw(width, height, data.bytes.clone().into_owned())
        .ok_or_else(|| GalleryError::decode("clipboard image data is truncated"))?;

    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(buffer)
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(|e| GalleryError::decode(format!("could not encode clipboard image: {e}")))?;

    Ok(png.into_inner())
}

/// Maps an image MIME type to a file extension for generated names.
fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "png",
    }
}
