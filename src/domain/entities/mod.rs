//! Entity definitions.

mod cache_key;
mod gallery_item;
mod media;

pub use cache_key::{
    CacheKey, EndpointFamily, GALLERY_PREFIX, PUBLIC_GALLERY_PREFIX, QueryParams,
};
pub use gallery_item::{GalleryItem, GalleryStats};
pub use media::{
    ClipboardContent, ClipboardItem, EncodedMedia, MediaCandidate, UploadPhase, UploadProgress,
};
