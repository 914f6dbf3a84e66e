use std::path::Path;

use image::RgbaImage;
use tracing::{info, warn};

/// Loads the overlay glyph; any failure leaves the overlay disabled.
pub fn load(path: Option<&Path>) -> Option<RgbaImage> {
    let path = path?;
    match image::open(path) {
        Ok(img) => {
            let img = img.to_rgba8();
            info!(path = %path.display(), width = img.width(), height = img.height(), "loaded glyph");
            Some(img)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "glyph unavailable, overlay disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_no_glyph() {
        assert!(load(None).is_none());
    }

    #[test]
    fn unreadable_asset_degrades() {
        assert!(load(Some(Path::new("does/not/exist.png"))).is_none());
    }
}
