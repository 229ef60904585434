//! Application layer with services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Service implementations.
pub mod services;

pub use dto::{GalleryItemDraft, GalleryItemUpdate, UploadedImage};
pub use services::{GalleryService, PreloadService};
