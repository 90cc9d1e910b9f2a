//! WASM bindings for vibes-playback
//!
//! Drives the page's `<audio>` element from the playback controller so the
//! whole player can run in a browser.

pub mod output;
pub mod player;
pub mod types;

pub use output::HtmlAudioOutput;
pub use player::WasmPlayer;
pub use types::{WasmAlbum, WasmSnapshot};
