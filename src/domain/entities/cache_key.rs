//! Cache key derivation for gallery queries.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Prefix shared by every gallery endpoint family.
pub const GALLERY_PREFIX: &str = "/gallery";

/// Prefix of the public read endpoint family.
pub const PUBLIC_GALLERY_PREFIX: &str = "/gallery/public";

/// Query parameter names that are allowed to influence a cache key.
///
/// Anything else a caller passes is dropped during canonicalization so
/// caller-supplied noise cannot grow the key space without bound.
const ACCEPTED_PARAMS: &[&str] = &["category", "limit", "page", "featured"];

/// The endpoint families the read cache serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointFamily {
    /// Public gallery listing, filterable by category/limit.
    PublicGallery,
    /// Admin gallery listing.
    AdminGallery,
    /// Aggregate gallery statistics.
    GalleryStats,
}

impl EndpointFamily {
    /// Returns the request path for this family.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::PublicGallery => "/gallery/public",
            Self::AdminGallery => "/gallery/admin",
            Self::GalleryStats => "/gallery/admin/stats",
        }
    }

    /// Returns the default time-to-live for entries of this family.
    ///
    /// List views tolerate minutes of staleness; statistics are consulted
    /// right after edits and get a much shorter window.
    #[must_use]
    pub const fn default_ttl(self) -> Duration {
        match self {
            Self::PublicGallery | Self::AdminGallery => Duration::from_secs(5 * 60),
            Self::GalleryStats => Duration::from_secs(60),
        }
    }
}

impl fmt::Display for EndpointFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// An ordered, whitelisted set of query parameters.
///
/// Parameters are held in a sorted map so that two calls supplying the
/// same parameters in different order canonicalize to the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, silently dropping names outside the whitelist.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl fmt::Display) -> Self {
        if ACCEPTED_PARAMS.contains(&name) {
            self.params.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Sets a parameter only when a value is present.
    #[must_use]
    pub fn set_opt(self, name: &str, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    /// Returns true when no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serializes the parameters as a canonical query string (no leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Canonical identifier for one cacheable gallery query.
///
/// The rendered form is the family path plus the canonical query string,
/// so prefix matching against an endpoint family stays a plain string
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    rendered: String,
    family: EndpointFamily,
}

impl CacheKey {
    /// Derives a key from an endpoint family and its query parameters.
    #[must_use]
    pub fn derive(family: EndpointFamily, params: &QueryParams) -> Self {
        let rendered = if params.is_empty() {
            family.path().to_string()
        } else {
            format!("{}?{}", family.path(), params.to_query_string())
        };
        Self { rendered, family }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// Returns the endpoint family this key belongs to.
    #[must_use]
    pub const fn family(&self) -> EndpointFamily {
        self.family
    }

    /// Returns true when the key belongs to the given endpoint-family prefix.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.rendered.starts_with(prefix)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
