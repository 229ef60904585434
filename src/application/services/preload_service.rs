//! Best-effort cache warm-up for common gallery queries.

use std::sync::Arc;

use futures_util::future::{BoxFuture, join_all};
use tracing::{debug, warn};

use crate::application::services::GalleryService;

/// Number of items in the warmed first page.
const FIRST_PAGE_LIMIT: u32 = 12;

/// Number of items in the warmed featured slice.
const FEATURED_LIMIT: u32 = 4;

/// Warms the read cache ahead of user navigation.
#[derive(Clone)]
pub struct PreloadService {
    gallery: Arc<GalleryService>,
}

impl PreloadService {
    /// Creates a preloader over the gallery service.
    #[must_use]
    pub const fn new(gallery: Arc<GalleryService>) -> Self {
        Self { gallery }
    }

    /// Fires the common read-path queries concurrently.
    ///
    /// Individual failures are logged and swallowed: a failed warm-up
    /// must never block page render.
    pub async fn preload_critical_data(&self) {
        let jobs: Vec<BoxFuture<'_, (&'static str, Result<(), crate::domain::GalleryError>)>> = vec![
            Box::pin(async {
                let result = self
                    .gallery
                    .get_public_gallery(None, Some(FIRST_PAGE_LIMIT))
                    .await;
                ("first page", result.map(|_| ()))
            }),
            Box::pin(async {
                let result = self.gallery.get_featured_gallery(Some(FEATURED_LIMIT)).await;
                ("featured slice", result.map(|_| ()))
            }),
            Box::pin(async {
                let result = self.gallery.get_gallery_stats().await;
                ("gallery stats", result.map(|_| ()))
            }),
        ];

        for (name, result) in join_all(jobs).await {
            match result {
                Ok(()) => debug!(query = name, "Preloaded"),
                Err(e) => warn!(query = name, error = %e, "Preload failed, continuing"),
            }
        }
    }
}
