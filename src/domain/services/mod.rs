//! Pure domain services.

/// Pre-flight media validation rules.
pub mod media_validator;
