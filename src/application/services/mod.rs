//! Application services.

mod gallery_service;
mod preload_service;

pub use gallery_service::GalleryService;
pub use preload_service::PreloadService;
