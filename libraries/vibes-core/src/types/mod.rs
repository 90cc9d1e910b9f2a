mod album;
mod track;

pub use album::{Album, AlbumId};
pub use track::Track;
