use std::{fs, io::Cursor, path::Path};

use anyhow::Context as _;
use base64::{Engine as _, engine::general_purpose};

use crate::error::EmberfarmResult;

/// Aspect ratio used when the dragon image's dimensions cannot be read.
pub const DEFAULT_DRAGON_RATIO: f64 = 1.5;

/// A raster dragon figure ready for embedding: a self-contained data URI plus
/// its natural width/height ratio.
#[derive(Clone, Debug)]
pub struct DragonAsset {
    pub data_uri: String,
    pub ratio: f64,
}

/// Build a dragon asset from raw PNG bytes. Undecodable dimensions fall back
/// to [`DEFAULT_DRAGON_RATIO`]; the bytes are embedded either way.
pub fn dragon_from_png(bytes: &[u8]) -> DragonAsset {
    let ratio = probe_ratio(bytes).unwrap_or(DEFAULT_DRAGON_RATIO);
    DragonAsset {
        data_uri: format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(bytes)
        ),
        ratio,
    }
}

// Header-only dimension probe; the scene never needs decoded pixels.
fn probe_ratio(bytes: &[u8]) -> Option<f64> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let (width, height) = reader.into_dimensions().ok()?;
    (width > 0 && height > 0).then(|| f64::from(width) / f64::from(height))
}

/// Read a dragon PNG from disk. A missing file is not an error: the scene
/// falls back to the vector figure.
pub fn load_dragon(path: &Path) -> EmberfarmResult<Option<DragonAsset>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(dragon_from_png(&bytes))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(anyhow::Error::new(err)
            .context(format!("read dragon asset '{}'", path.display()))
            .into()),
    }
}
