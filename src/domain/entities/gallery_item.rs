//! Gallery entities returned by the shrine CMS API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single gallery item as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Unique item identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category slug, e.g. `festivals` or `daily-darshan`.
    pub category: String,
    /// URL of the stored image.
    pub image_url: String,
    /// Whether the item is visible on the public site.
    #[serde(default)]
    pub is_active: bool,
    /// Whether the item appears in the featured slice.
    #[serde(default)]
    pub is_featured: bool,
    /// Creation timestamp, when the server reports one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate gallery statistics for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryStats {
    /// Total number of items.
    pub total: u64,
    /// Number of publicly visible items.
    pub active: u64,
    /// Number of featured items.
    pub featured: u64,
    /// Item counts grouped by category slug.
    #[serde(default)]
    pub by_category: BTreeMap<String, u64>,
}
