//! Darshan - cached gallery client and media ingestion pipeline for the shrine CMS.
//!
//! This crate provides the client-side data layer for the shrine gallery:
//! a TTL read cache keyed by request shape, coordinated invalidation on
//! mutation, and an asynchronous file/clipboard-to-data-URI encoding
//! pipeline with validation and progress reporting.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "darshan";
