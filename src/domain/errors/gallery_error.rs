//! Gallery pipeline error types.

use thiserror::Error;

/// Gallery client error variants.
///
/// Every public service method returns one of these instead of letting a
/// raw transport error escape to callers.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum GalleryError {
    #[error("invalid media: {reason}")]
    Validation { reason: String },

    #[error("gallery request failed: {message}")]
    Transport { message: String },

    #[error("rate limited by the gallery API, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("could not read media: {message}")]
    Decode { message: String },

    #[error("no image found in clipboard data")]
    NoImageInClipboard,

    #[error("unexpected gallery error: {message}")]
    Unexpected { message: String },
}

impl GalleryError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a media decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether retrying the same operation may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::RateLimited { .. })
    }

    /// Returns whether the error originated on the network path.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::RateLimited { .. })
    }

    /// Returns whether the error was caught before any network activity.
    #[must_use]
    pub const fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Decode { .. } | Self::NoImageInClipboard
        )
    }
}
