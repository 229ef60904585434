//! Asynchronous binary-to-data-URI encoder.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::entities::{EncodedMedia, MediaCandidate, UploadPhase, UploadProgress};
use crate::domain::errors::GalleryError;

/// Portion of the 0-100 progress range owned by the encode step; the
/// network upload owns the remainder.
pub const ENCODE_PROGRESS_CEILING: u8 = 80;

/// Chunk size for incremental encoding. A multiple of 3 so no chunk
/// boundary ever introduces base64 padding mid-stream.
const ENCODE_CHUNK_BYTES: usize = 3 * 64 * 1024;

/// Encodes a candidate into a base64 data URI.
///
/// Encoding runs on the blocking pool so multi-megabyte payloads never
/// stall the async runtime. When a progress sender is supplied, events in
/// the `Encoding` phase are emitted up to [`ENCODE_PROGRESS_CEILING`]
/// percent as chunks complete.
///
/// # Errors
/// Returns [`GalleryError::Unexpected`] if the encode task is cancelled.
pub async fn encode(
    candidate: MediaCandidate,
    progress: Option<mpsc::UnboundedSender<UploadProgress>>,
) -> Result<EncodedMedia, GalleryError> {
    let size_bytes = candidate.size_bytes();
    debug!(
        name = %candidate.suggested_name,
        mime = %candidate.mime_type,
        size = size_bytes,
        "Encoding media to data URI"
    );

    let MediaCandidate {
        bytes,
        mime_type,
        suggested_name,
    } = candidate;

    let mime_for_uri = mime_type.clone();
    let data_uri = tokio::task::spawn_blocking(move || {
        let mut encoded = String::with_capacity(bytes.len() / 3 * 4 + mime_for_uri.len() + 32);
        encoded.push_str("data:");
        encoded.push_str(&mime_for_uri);
        encoded.push_str(";base64,");

        let total = bytes.len().max(1);
        let mut processed = 0usize;
        for chunk in bytes.chunks(ENCODE_CHUNK_BYTES) {
            STANDARD.encode_string(chunk, &mut encoded);
            processed += chunk.len();
            if let Some(tx) = &progress {
                let percent = u8::try_from(
                    processed * usize::from(ENCODE_PROGRESS_CEILING) / total,
                )
                .unwrap_or(ENCODE_PROGRESS_CEILING);
                let _ = tx.send(UploadProgress::new(UploadPhase::Encoding, percent));
                trace!(percent = percent, "Encode progress");
            }
        }

        encoded
    })
    .await
    .map_err(|e| GalleryError::unexpected(format!("encode task failed: {e}")))?;

    Ok(EncodedMedia {
        data_uri,
        name: suggested_name,
        mime_type,
        size_bytes,
    })
}
