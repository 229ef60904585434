//! Media candidates flowing through the validation and encoding pipeline.

use bytes::Bytes;

/// A file the user selected or pasted, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCandidate {
    /// Raw file content.
    pub bytes: Bytes,
    /// Declared MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Name to suggest for the stored file.
    pub suggested_name: String,
}

impl MediaCandidate {
    /// Creates a candidate from raw bytes and a declared MIME type.
    #[must_use]
    pub fn new(
        bytes: impl Into<Bytes>,
        mime_type: impl Into<String>,
        suggested_name: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            suggested_name: suggested_name.into(),
        }
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// The encoder's output, ready for the write path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMedia {
    /// Base64 data URI embedding the file content.
    pub data_uri: String,
    /// Name to store the file under.
    pub name: String,
    /// MIME type carried into the data URI.
    pub mime_type: String,
    /// Size of the original binary payload.
    pub size_bytes: u64,
}

/// Upload pipeline phase for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// Binary-to-text encoding is running.
    Encoding,
    /// The network upload is in flight.
    Uploading,
    /// The upload completed.
    Done,
}

/// A progress event emitted while encoding and uploading media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Current pipeline phase.
    pub phase: UploadPhase,
    /// Overall completion, 0 to 100.
    pub percent: u8,
}

impl UploadProgress {
    /// Creates a progress event, clamping the percentage to 100.
    #[must_use]
    pub fn new(phase: UploadPhase, percent: u8) -> Self {
        Self {
            phase,
            percent: percent.min(100),
        }
    }
}

/// One item found in paste data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    /// MIME type of the item, e.g. `text/plain` or `image/png`.
    pub mime_type: String,
    /// Raw item content.
    pub bytes: Bytes,
}

impl ClipboardItem {
    /// Creates a clipboard item.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Returns true when the item carries image data.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Everything found on the clipboard during one paste.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardContent {
    /// Items in the order the platform reported them.
    pub items: Vec<ClipboardItem>,
}

impl ClipboardContent {
    /// Creates clipboard content from a list of items.
    #[must_use]
    pub fn new(items: Vec<ClipboardItem>) -> Self {
        Self { items }
    }

    /// Returns the first image-typed item, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| item.is_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_size() {
        let candidate = MediaCandidate::new(vec![0u8; 1024], "image/png", "a.png");
        assert_eq!(candidate.size_bytes(), 1024);
    }

    #[test]
    fn test_progress_clamps_to_100() {
        let progress = UploadProgress::new(UploadPhase::Done, 130);
        assert_eq!(progress.percent, 100);
    }

    #[test]
    fn test_first_image_skips_text_items() {
        let content = ClipboardContent::new(vec![
            ClipboardItem::new("text/plain", "hello".as_bytes().to_vec()),
            ClipboardItem::new("image/png", vec![1, 2, 3]),
            ClipboardItem::new("image/jpeg", vec![4, 5, 6]),
        ]);

        let first = content.first_image().expect("an image is present");
        assert_eq!(first.mime_type, "image/png");
    }

    #[test]
    fn test_first_image_absent_for_text_only_content() {
        let content = ClipboardContent::new(vec![ClipboardItem::new(
            "text/plain",
            "just text".as_bytes().to_vec(),
        )]);
        assert!(content.first_image().is_none());
    }
}
