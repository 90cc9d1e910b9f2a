//! Summery Vibes Core
//!
//! Platform-agnostic catalog types and error handling for Summery Vibes.
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `Track`
//! - **Catalog Store**: the loaded album list plus the search-filtered subset
//! - **Error Handling**: `CatalogError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use vibes_core::Catalog;
//!
//! let json = r#"{"albums":[{"id":"a1","title":"Tide Lines","artist":"Marea",
//!     "year":2024,"cover":"covers/tide.jpg",
//!     "tracks":[{"title":"Low Sun","duration":"3:12","audio":"audio/low-sun.mp3"}]}]}"#;
//!
//! let mut catalog = Catalog::from_json_or_fallback(json);
//! assert_eq!(catalog.albums().len(), 1);
//!
//! catalog.search("marea");
//! assert_eq!(catalog.filtered().len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod cover;
pub mod error;
pub mod types;

pub use catalog::Catalog;
pub use cover::placeholder_cover;
pub use error::{CatalogError, Result};
pub use types::{Album, AlbumId, Track};
