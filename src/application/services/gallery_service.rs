//! Gallery read/write paths over the cache and transport.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::dto::{GalleryItemDraft, GalleryItemUpdate, UploadedImage};
use crate::domain::entities::{
    CacheKey, ClipboardContent, EndpointFamily, GALLERY_PREFIX, GalleryItem, GalleryStats,
    MediaCandidate, PUBLIC_GALLERY_PREFIX, QueryParams, UploadPhase, UploadProgress,
};
use crate::domain::errors::GalleryError;
use crate::domain::ports::{CacheStorePort, TransportPort};
use crate::domain::services::media_validator::{self, UploadSurface};
use crate::infrastructure::media::{ENCODE_PROGRESS_CEILING, clipboard, encoder};

/// Path accepting data-URI image uploads.
const UPLOAD_PATH: &str = "/gallery/admin/upload";

/// Gallery data service: cached reads, invalidating writes, media uploads.
///
/// Reads for one key do not serialize: two concurrent misses may both
/// fetch, and the last successful store wins. Fetches are idempotent
/// GETs, so the duplicate work is accepted instead of keeping an
/// in-flight request map.
#[derive(Clone)]
pub struct GalleryService {
    transport: Arc<dyn TransportPort>,
    cache: Arc<dyn CacheStorePort>,
}

impl GalleryService {
    /// Creates a gallery service over the given transport and cache.
    #[must_use]
    pub fn new(transport: Arc<dyn TransportPort>, cache: Arc<dyn CacheStorePort>) -> Self {
        Self { transport, cache }
    }

    // --- read path ---

    /// Fetches public gallery items, serving from cache when fresh.
    ///
    /// An empty result set is a success and is cached like any other;
    /// fetch failures are never cached.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the fetch fails.
    pub async fn get_public_gallery(
        &self,
        category: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<GalleryItem>, GalleryError> {
        let params = QueryParams::new()
            .set_opt("category", category)
            .set_opt("limit", limit);
        let payload = self
            .read_through(EndpointFamily::PublicGallery, &params)
            .await?;
        Self::items_from(payload)
    }

    /// Fetches the featured slice of the public gallery.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the fetch fails.
    pub async fn get_featured_gallery(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<GalleryItem>, GalleryError> {
        let params = QueryParams::new()
            .set("featured", true)
            .set_opt("limit", limit);
        let payload = self
            .read_through(EndpointFamily::PublicGallery, &params)
            .await?;
        Self::items_from(payload)
    }

    /// Fetches the admin gallery listing, serving from cache when fresh.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the fetch fails.
    pub async fn get_admin_gallery(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<GalleryItem>, GalleryError> {
        let params = QueryParams::new().set_opt("category", category);
        let payload = self
            .read_through(EndpointFamily::AdminGallery, &params)
            .await?;
        Self::items_from(payload)
    }

    /// Fetches aggregate gallery statistics, cached on the short TTL.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the fetch fails.
    pub async fn get_gallery_stats(&self) -> Result<GalleryStats, GalleryError> {
        let payload = self
            .read_through(EndpointFamily::GalleryStats, &QueryParams::new())
            .await?;
        serde_json::from_value(payload)
            .map_err(|e| GalleryError::unexpected(format!("malformed stats payload: {e}")))
    }

    /// Cache-aside read: lookup, fetch on miss, store on success only.
    async fn read_through(
        &self,
        family: EndpointFamily,
        params: &QueryParams,
    ) -> Result<Value, GalleryError> {
        let key = CacheKey::derive(family, params);

        if let Some(payload) = self.cache.get(&key).await {
            return Ok(payload);
        }

        // The canonical key doubles as the request path.
        let body = self.transport.get(key.as_str()).await.map_err(|e| {
            warn!(key = %key, error = %e, "Gallery fetch failed");
            e
        })?;
        let payload = Self::extract_data(body)?;

        self.cache.set(key, payload.clone()).await;
        Ok(payload)
    }

    // --- write path ---

    /// Creates a gallery item and invalidates the read cache.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the call fails.
    pub async fn create_gallery_item(
        &self,
        draft: GalleryItemDraft,
    ) -> Result<GalleryItem, GalleryError> {
        let body = serde_json::to_value(&draft)
            .map_err(|e| GalleryError::unexpected(format!("unserializable draft: {e}")))?;
        let response = self
            .transport
            .post(EndpointFamily::AdminGallery.path(), body)
            .await?;
        let item = Self::item_from(Self::extract_data(response)?)?;

        info!(id = item.id, title = %item.title, "Created gallery item");
        self.invalidate_after_write().await;
        Ok(item)
    }

    /// Updates a gallery item and invalidates the read cache.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the call fails.
    pub async fn update_gallery_item(
        &self,
        id: u64,
        update: GalleryItemUpdate,
    ) -> Result<GalleryItem, GalleryError> {
        let body = serde_json::to_value(&update)
            .map_err(|e| GalleryError::unexpected(format!("unserializable update: {e}")))?;
        let response = self
            .transport
            .put(&format!("{}/{id}", EndpointFamily::AdminGallery.path()), body)
            .await?;
        let item = Self::item_from(Self::extract_data(response)?)?;

        info!(id = id, "Updated gallery item");
        self.invalidate_after_write().await;
        Ok(item)
    }

    /// Deletes a gallery item and invalidates the read cache.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the call fails.
    pub async fn delete_gallery_item(&self, id: u64) -> Result<(), GalleryError> {
        self.transport
            .delete(&format!("{}/{id}", EndpointFamily::AdminGallery.path()))
            .await?;

        info!(id = id, "Deleted gallery item");
        self.invalidate_after_write().await;
        Ok(())
    }

    /// Toggles an item's public visibility and invalidates the read cache.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the call fails.
    pub async fn toggle_active(&self, id: u64) -> Result<GalleryItem, GalleryError> {
        self.toggle(id, "active").await
    }

    /// Toggles an item's featured flag and invalidates the read cache.
    ///
    /// # Errors
    /// Returns a normalized [`GalleryError`] when the call fails.
    pub async fn toggle_featured(&self, id: u64) -> Result<GalleryItem, GalleryError> {
        self.toggle(id, "featured").await
    }

    async fn toggle(&self, id: u64, flag: &str) -> Result<GalleryItem, GalleryError> {
        let response = self
            .transport
            .patch(
                &format!("{}/{id}/{flag}", EndpointFamily::AdminGallery.path()),
                json!({}),
            )
            .await?;
        let item = Self::item_from(Self::extract_data(response)?)?;

        info!(id = id, flag = flag, "Toggled gallery item");
        self.invalidate_after_write().await;
        Ok(item)
    }

    // --- media ingestion ---

    /// Validates, encodes and uploads a media candidate.
    ///
    /// Progress events span the whole pipeline: encoding up to
    /// [`ENCODE_PROGRESS_CEILING`] percent, the upload request the rest.
    ///
    /// # Errors
    /// Returns [`GalleryError::Validation`] before any encode or network
    /// work when the candidate is disallowed, and a normalized transport
    /// error when the upload itself fails.
    pub async fn upload_image(
        &self,
        mut candidate: MediaCandidate,
        name: Option<String>,
        progress: Option<mpsc::UnboundedSender<UploadProgress>>,
    ) -> Result<UploadedImage, GalleryError> {
        media_validator::validate(&candidate, UploadSurface::Admin)?;

        if let Some(name) = name {
            candidate.suggested_name = name;
        }

        let encoded = encoder::encode(candidate, progress.clone()).await?;

        Self::send_progress(progress.as_ref(), UploadPhase::Uploading, ENCODE_PROGRESS_CEILING);
        let response = self
            .transport
            .post(
                UPLOAD_PATH,
                json!({ "image": encoded.data_uri, "name": encoded.name }),
            )
            .await?;
        let uploaded: UploadedImage = serde_json::from_value(Self::extract_data(response)?)
            .map_err(|e| GalleryError::unexpected(format!("malformed upload response: {e}")))?;

        Self::send_progress(progress.as_ref(), UploadPhase::Done, 100);
        info!(name = %uploaded.image_name, "Uploaded image");
        self.invalidate_after_write().await;
        Ok(uploaded)
    }

    /// Uploads the first image found in paste data.
    ///
    /// # Errors
    /// Returns [`GalleryError::NoImageInClipboard`] when the paste data
    /// holds no image-typed item.
    pub async fn upload_image_from_clipboard(
        &self,
        content: &ClipboardContent,
        progress: Option<mpsc::UnboundedSender<UploadProgress>>,
    ) -> Result<UploadedImage, GalleryError> {
        let candidate = clipboard::extract_image(content)?;
        self.upload_image(candidate, None, progress).await
    }

    // --- cache lifecycle ---

    /// Drops cached public-read entries; admin views keep theirs.
    pub async fn clear_public_cache(&self) {
        let removed = self.cache.invalidate_prefix(PUBLIC_GALLERY_PREFIX).await;
        debug!(removed = removed, "Cleared public gallery cache");
    }

    /// Drops every cached entry, for logout or hard refresh.
    pub async fn clear_all_cache(&self) {
        self.cache.clear().await;
        debug!("Cleared all gallery cache entries");
    }

    // --- helpers ---

    async fn invalidate_after_write(&self) {
        let removed = self.cache.invalidate_prefix(GALLERY_PREFIX).await;
        debug!(removed = removed, "Invalidated gallery cache after write");
    }

    fn send_progress(
        progress: Option<&mpsc::UnboundedSender<UploadProgress>>,
        phase: UploadPhase,
        percent: u8,
    ) {
        if let Some(tx) = progress {
            let _ = tx.send(UploadProgress::new(phase, percent));
        }
    }

    /// Unwraps the `data` envelope every API response carries.
    fn extract_data(mut body: Value) -> Result<Value, GalleryError> {
        match body.get_mut("data") {
            Some(data) => Ok(data.take()),
            None => Err(GalleryError::unexpected("response body missing `data` field")),
        }
    }

    fn items_from(payload: Value) -> Result<Vec<GalleryItem>, GalleryError> {
        serde_json::from_value(payload)
            .map_err(|e| GalleryError::unexpected(format!("malformed gallery payload: {e}")))
    }

    fn item_from(payload: Value) -> Result<GalleryItem, GalleryError> {
        serde_json::from_value(payload)
            .map_err(|e| GalleryError::unexpected(format!("malformed gallery item: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::domain::ports::mocks::RecordingTransport;
    use crate::infrastructure::cache::TtlCache;

    use super::*;

    fn service_with(transport: Arc<RecordingTransport>) -> GalleryService {
        GalleryService::new(transport, Arc::new(TtlCache::with_defaults()))
    }

    fn item_json(id: u64) -> Value {
        json!({
            "id": id,
            "title": format!("Item {id}"),
            "category": "festivals",
            "image_url": format!("https://cdn.example.org/{id}.jpg"),
            "is_active": true,
            "is_featured": false
        })
    }

    fn list_response(ids: &[u64]) -> Value {
        json!({ "data": ids.iter().map(|id| item_json(*id)).collect::<Vec<_>>() })
    }

    #[tokio::test]
    async fn test_cache_hit_avoids_network() {
        let transport = Arc::new(RecordingTransport::new());
        transport.enqueue_ok(list_response(&[1, 2, 3])).await;
        let service = service_with(transport.clone());

        let first = service
            .get_public_gallery(Some("festivals"), Some(12))
            .await
            .unwrap();
        let second = service
            .get_public_gallery(Some("festivals"), Some(12))
            .await
            .unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_different_filters_fetch_separately() {
        let transport = Arc::new(RecordingTransport::new());
        transport.enqueue_ok(list_response(&[1])).await;
        transport.enqueue_ok(list_response(&[2])).await;
        let service = service_with(transport.clone());

        let festivals = service.get_public_gallery(Some("festivals"), None).await.unwrap();
        let events = service.get_public_gallery(Some("events"), None).await.unwrap();

        assert_eq!(festivals[0].id, 1);
        assert_eq!(events[0].id, 2);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiry_forces_refetch() {
        let transport = Arc::new(RecordingTransport::new());
        transport.enqueue_ok(list_response(&[1])).await;
        transport.enqueue_ok(list_response(&[1, 2])).await;
        let service = service_with(transport.clone());

        let _ = service.get_public_gallery(None, None).await.unwrap();
        tokio::time::advance(Duration::from_secs(5 * 60 + 1)).await;
        let refreshed = service.get_public_gallery(None, None).await.unwrap();

        assert_eq!(refreshed.len(), 2);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_never_cached() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .enqueue_err(GalleryError::transport("the gallery service is temporarily unavailable"))
            .await;
        transport.enqueue_ok(list_response(&[9])).await;
        let service = service_with(transport.clone());

        let failed = service.get_public_gallery(Some("festivals"), None).await;
        assert!(failed.is_err());

        let retried = service
            .get_public_gallery(Some("festivals"), None)
            .await
            .unwrap();
        assert_eq!(retried[0].id, 9);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_set_is_cached() {
        let transport = Arc::new(RecordingTransport::new());
        transport.enqueue_ok(json!({ "data": [] })).await;
        let service = service_with(transport.clone());

        let first = service.get_public_gallery(Some("quiet"), None).await.unwrap();
        let second = service.get_public_gallery(Some("quiet"), None).await.unwrap();

        assert!(first.is_empty());
        assert!(second.is_empty());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_create_invalidates_cached_reads() {
        let transport = Arc::new(RecordingTransport::new());
        transport.enqueue_ok(list_response(&[1])).await;
        transport.enqueue_ok(json!({ "data": item_json(2) })).await;
        transport.enqueue_ok(list_response(&[1, 2])).await;
        let service = service_with(transport.clone());

        let _ = service.get_public_gallery(Some("festivals"), None).await.unwrap();
        let created = service
            .create_gallery_item(GalleryItemDraft {
                title: "Item 2".to_string(),
                description: None,
                category: "festivals".to_string(),
                image_url: "https://cdn.example.org/2.jpg".to_string(),
                is_featured: false,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 2);

        let after = service.get_public_gallery(Some("festivals"), None).await.unwrap();
        assert_eq!(after.len(), 2);
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_intact() {
        let transport = Arc::new(RecordingTransport::new());
        transport.enqueue_ok(list_response(&[1])).await;
        transport.enqueue_err(GalleryError::transport("boom")).await;
        let service = service_with(transport.clone());

        let _ = service.get_public_gallery(None, None).await.unwrap();
        let failed = service.delete_gallery_item(1).await;
        assert!(failed.is_err());

        // Cached read still serves without another fetch.
        let _ = service.get_public_gallery(None, None).await.unwrap();
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_toggle_hits_flag_endpoint_and_invalidates_stats() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .enqueue_ok(json!({ "data": { "total": 5, "active": 4, "featured": 1 } }))
            .await;
        transport.enqueue_ok(json!({ "data": item_json(3) })).await;
        transport
            .enqueue_ok(json!({ "data": { "total": 5, "active": 3, "featured": 1 } }))
            .await;
        let service = service_with(transport.clone());

        let _ = service.get_gallery_stats().await.unwrap();
        let _ = service.toggle_active(3).await.unwrap();
        let stats = service.get_gallery_stats().await.unwrap();

        assert_eq!(stats.active, 3);
        assert_eq!(transport.call_count(), 3);
        let paths = transport.seen_paths().await;
        assert_eq!(paths[1], "PATCH /gallery/admin/3/active");
    }

    #[tokio::test]
    async fn test_clear_public_cache_keeps_admin_entries() {
        let transport = Arc::new(RecordingTransport::new());
        transport.enqueue_ok(list_response(&[1])).await;
        transport.enqueue_ok(list_response(&[1, 2])).await;
        transport.enqueue_ok(list_response(&[3])).await;
        let service = service_with(transport.clone());

        let _ = service.get_public_gallery(None, None).await.unwrap();
        let _ = service.get_admin_gallery(None).await.unwrap();
        service.clear_public_cache().await;

        // Public refetches, admin still cached.
        let _ = service.get_public_gallery(None, None).await.unwrap();
        let _ = service.get_admin_gallery(None).await.unwrap();
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_upload_validates_before_any_network_call() {
        let transport = Arc::new(RecordingTransport::new());
        let service = service_with(transport.clone());

        let candidate = MediaCandidate::new(vec![0u8; 64], "text/plain", "notes.txt");
        let err = service.upload_image(candidate, None, None).await.unwrap_err();

        assert!(matches!(err, GalleryError::Validation { .. }));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_reports_full_progress_range() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .enqueue_ok(json!({ "data": {
                "image_url": "https://cdn.example.org/deity.png",
                "image_name": "deity.png"
            }}))
            .await;
        let service = service_with(transport.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let candidate = MediaCandidate::new(vec![0u8; 256 * 1024], "image/png", "deity.png");
        let uploaded = service
            .upload_image(candidate, None, Some(tx))
            .await
            .unwrap();
        assert_eq!(uploaded.image_name, "deity.png");

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.first().unwrap().phase, UploadPhase::Encoding);
        assert!(events.iter().any(|e| e.phase == UploadPhase::Uploading));
        let last = events.last().unwrap();
        assert_eq!(last.phase, UploadPhase::Done);
        assert_eq!(last.percent, 100);
    }

    #[tokio::test]
    async fn test_upload_name_override() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .enqueue_ok(json!({ "data": {
                "image_url": "https://cdn.example.org/renamed.png",
                "image_name": "renamed.png"
            }}))
            .await;
        let service = service_with(transport.clone());

        let candidate = MediaCandidate::new(vec![0u8; 16], "image/png", "original.png");
        let uploaded = service
            .upload_image(candidate, Some("renamed.png".to_string()), None)
            .await
            .unwrap();

        assert_eq!(uploaded.image_name, "renamed.png");
    }

    #[tokio::test]
    async fn test_clipboard_upload_without_image_fails_named() {
        let transport = Arc::new(RecordingTransport::new());
        let service = service_with(transport.clone());

        let content = ClipboardContent::new(vec![crate::domain::entities::ClipboardItem::new(
            "text/plain",
            b"only text here".to_vec(),
        )]);
        let err = service
            .upload_image_from_clipboard(&content, None)
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::NoImageInClipboard));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_data_envelope_is_an_error() {
        let transport = Arc::new(RecordingTransport::new());
        transport.enqueue_ok(json!({ "items": [] })).await;
        let service = service_with(transport.clone());

        let err = service.get_public_gallery(None, None).await.unwrap_err();
        assert!(matches!(err, GalleryError::Unexpected { .. }));
    }
}
