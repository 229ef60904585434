//! Pre-flight media validation.
//!
//! Runs synchronously, before the encoder and before any network call.
//! A candidate that fails here never leaves the process.

use crate::domain::entities::MediaCandidate;
use crate::domain::errors::GalleryError;

/// Image MIME types accepted on every upload surface.
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Video MIME types accepted only where the surface takes video.
pub const VIDEO_MIME_TYPES: &[&str] = &["video/mp4", "video/webm", "video/ogg"];

/// Byte ceiling for the public-facing upload path.
pub const PUBLIC_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Byte ceiling for admin-only upload surfaces.
pub const ADMIN_MAX_BYTES: u64 = 25 * 1024 * 1024;

/// The upload surface a candidate is headed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSurface {
    /// Public-facing uploads: images only, 10 MiB ceiling.
    Public,
    /// Admin panel uploads: video allowed, 25 MiB ceiling.
    Admin,
}

impl UploadSurface {
    /// Returns the byte ceiling enforced on this surface.
    #[must_use]
    pub const fn max_bytes(self) -> u64 {
        match self {
            Self::Public => PUBLIC_MAX_BYTES,
            Self::Admin => ADMIN_MAX_BYTES,
        }
    }

    /// Returns whether video MIME types are accepted on this surface.
    #[must_use]
    pub const fn accepts_video(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Validates a candidate against the surface's rules.
///
/// Rules apply in order and the first failure wins: MIME allow-list,
/// then byte ceiling.
///
/// # Errors
/// Returns [`GalleryError::Validation`] with a reason naming the allowed
/// types or the ceiling.
pub fn validate(candidate: &MediaCandidate, surface: UploadSurface) -> Result<(), GalleryError> {
    let mime = candidate.mime_type.as_str();

    let allowed = IMAGE_MIME_TYPES.contains(&mime)
        || (surface.accepts_video() && VIDEO_MIME_TYPES.contains(&mime));
    if !allowed {
        let mut names: Vec<&str> = IMAGE_MIME_TYPES.to_vec();
        if surface.accepts_video() {
            names.extend_from_slice(VIDEO_MIME_TYPES);
        }
        return Err(GalleryError::validation(format!(
            "unsupported file type {mime}; allowed types: {}",
            names.join(", ")
        )));
    }

    let size = candidate.size_bytes();
    if size > surface.max_bytes() {
        return Err(GalleryError::validation(format!(
            "file is {size} bytes, over the {} MiB ceiling",
            surface.max_bytes() / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Validates an image file bound for the public upload path.
///
/// # Errors
/// Returns [`GalleryError::Validation`] on a disallowed type or oversize file.
pub fn validate_image_file(candidate: &MediaCandidate) -> Result<(), GalleryError> {
    validate(candidate, UploadSurface::Public)
}
