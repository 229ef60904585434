//! Request and response shapes for gallery mutations.

use serde::{Deserialize, Serialize};

/// Fields for creating a gallery item.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryItemDraft {
    /// Display title.
    pub title: String,
    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category slug.
    pub category: String,
    /// URL of the uploaded image backing the item.
    pub image_url: String,
    /// Whether to feature the item immediately.
    #[serde(default)]
    pub is_featured: bool,
}

/// Partial update for an existing gallery item.
///
/// Only set fields are serialized, so unset fields stay untouched
/// server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GalleryItemUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Server response to a successful image upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    /// Public URL of the stored image.
    pub image_url: String,
    /// Name the image was stored under.
    pub image_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = GalleryItemUpdate {
            title: Some("Evening Aarti".to_string()),
            ..GalleryItemUpdate::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"title": "Evening Aarti"}));
    }
}
