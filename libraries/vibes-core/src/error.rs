/// Core error types for Summery Vibes
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading the album catalog
///
/// These never reach the user: catalog loading substitutes the fallback
/// catalog instead. They are returned by the strict loaders so callers and
/// tests can see why the fallback was used.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed catalog document
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Album not found
    #[error("Album not found: {0}")]
    AlbumNotFound(String),
}
