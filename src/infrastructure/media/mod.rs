//! Media ingestion: encoding, file-picker and clipboard sources.

/// Clipboard paste handling.
pub mod clipboard;
/// Data-URI encoding.
pub mod encoder;
/// File-picker reads.
pub mod picker;

pub use encoder::ENCODE_PROGRESS_CEILING;
