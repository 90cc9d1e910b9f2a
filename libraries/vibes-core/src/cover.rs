//! Placeholder cover art
//!
//! Used by the fallback catalog and by views when a cover image fails to load.

use base64::{engine::general_purpose::STANDARD, Engine as _};

const PLACEHOLDER_SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 600 600'>\
<defs><linearGradient id='g' x1='0' y1='0' x2='1' y2='1'>\
<stop stop-color='#ff6f61'/><stop offset='1' stop-color='#2ec4b6'/>\
</linearGradient></defs>\
<rect width='600' height='600' fill='url(#g)'/>\
<circle cx='300' cy='300' r='160' fill='rgba(255,255,255,.3)'/>\
</svg>";

/// Coral-to-turquoise gradient square as an inline `data:` URI
pub fn placeholder_cover() -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(PLACEHOLDER_SVG))
}
