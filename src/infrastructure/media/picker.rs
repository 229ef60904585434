//! File-picker source: reads a selected file into a media candidate.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::entities::MediaCandidate;
use crate::domain::errors::GalleryError;

/// Reads a picked file from disk into a candidate.
///
/// The MIME type is sniffed from the file content where possible and
/// falls back to the extension; the file name becomes the suggested name.
///
/// # Errors
/// Returns [`GalleryError::Decode`] when the file cannot be read.
pub async fn read_picked_file(path: impl AsRef<Path>) -> Result<MediaCandidate, GalleryError> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to read picked file");
        GalleryError::decode(format!("could not read {}: {e}", path.display()))
    })?;

    let mime_type = sniff_mime(&bytes)
        .or_else(|| mime_from_extension(path))
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let suggested_name = path
        .file_name()
        .map_or_else(|| "upload.bin".to_string(), |n| n.to_string_lossy().into_owned());

    debug!(
        name = %suggested_name,
        mime = %mime_type,
        size = bytes.len(),
        "Read picked file"
    );

    Ok(MediaCandidate::new(bytes, mime_type, suggested_name))
}

/// Sniffs an image MIME type from magic bytes.
fn sniff_mime(bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

/// Maps a file extension to a MIME type for non-sniffable content.
fn mime_from_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",
        _ => return None,
    };
    Some(mime.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[tokio::test]
    async fn test_reads_png_and_sniffs_mime() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("pixel.png");

        // 1x1 white PNG written through the image crate so the magic bytes are real.
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        img.save(&path)?;

        let candidate = read_picked_file(&path).await?;
        assert_eq!(candidate.mime_type, "image/png");
        assert_eq!(candidate.suggested_name, "pixel.png");
        assert!(candidate.size_bytes() > 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_falls_back_to_extension_for_video() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("clip.mp4");
        let mut file = std::fs::File::create(&path)?;
        file.write_all(&[0u8; 64])?;

        let candidate = read_picked_file(&path).await?;
        assert_eq!(candidate.mime_type, "video/mp4");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_is_a_decode_error() {
        let err = read_picked_file("/nonexistent/ghost.png").await.unwrap_err();
        assert!(matches!(err, GalleryError::Decode { .. }));
        assert!(err.to_string().contains("ghost.png"));
    }
}
