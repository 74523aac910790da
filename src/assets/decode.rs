use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::foundation::error::{SpriteError, SpriteResult};

/// Open and decode an image file without touching its channel layout.
pub fn open_image(path: &Path) -> SpriteResult<DynamicImage> {
    image::open(path).map_err(|e| {
        SpriteError::asset_load(format!("could not load image '{}': {e}", path.display()))
    })
}

/// Decode an image file and normalize it to 4-channel RGBA.
///
/// Sources without an alpha channel come back fully opaque.
pub fn load_rgba(path: &Path) -> SpriteResult<RgbaImage> {
    open_image(path).map(|img| to_rgba(&img))
}

/// Decode encoded image bytes (PNG, JPEG, ...) into RGBA.
pub fn decode_rgba(bytes: &[u8]) -> SpriteResult<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| SpriteError::asset_load(format!("decode image from memory: {e}")))?;
    Ok(to_rgba(&img))
}

/// Re-express any decoded image as RGBA8.
pub fn to_rgba(img: &DynamicImage) -> RgbaImage {
    match img {
        DynamicImage::ImageRgba8(rgba) => rgba.clone(),
        other => other.to_rgba8(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
