//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{
    CacheKey, ClipboardContent, ClipboardItem, EncodedMedia, EndpointFamily, GalleryItem,
    GalleryStats, MediaCandidate, QueryParams, UploadPhase, UploadProgress,
};
pub use errors::GalleryError;
pub use ports::{CacheStorePort, TransportPort};
pub use services::media_validator;
