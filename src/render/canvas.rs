use std::{io::Cursor, path::Path};

use anyhow::Context as _;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use crate::{
    assets::decode::open_image,
    foundation::error::{SpriteError, SpriteResult},
};

/// Channel layout of a [`Canvas`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels {
    /// Three colour channels, no alpha.
    Rgb,
    /// Three colour channels plus alpha.
    Rgba,
}

impl Channels {
    /// Bytes per pixel.
    pub fn count(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Fixed-size 8-bit frame buffer that scene nodes are composited onto.
///
/// Pixels are row-major with no padding, in R, G, B[, A] order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a black canvas; RGBA canvases start opaque.
    pub fn new(width: u32, height: u32, channels: Channels) -> Self {
        let mut data = vec![0u8; width as usize * height as usize * channels.count()];
        if channels == Channels::Rgba {
            for px in data.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Wrap a decoded image, keeping an alpha channel only if the source has one.
    pub fn from_image(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self {
                width,
                height,
                channels: Channels::Rgba,
                data: rgba.into_raw(),
            }
        } else {
            let rgb = img.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self {
                width,
                height,
                channels: Channels::Rgb,
                data: rgb.into_raw(),
            }
        }
    }

    /// Load a canvas (typically a background) from an image file.
    pub fn open(path: &Path) -> SpriteResult<Self> {
        open_image(path).map(Self::from_image)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw pixel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of pixel `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let offset = self.offset(x, y)?;
        Some(&self.data[offset..offset + self.channels.count()])
    }

    /// Mutable bytes of pixel `(x, y)`, or `None` outside the canvas.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let offset = self.offset(x, y)?;
        let n = self.channels.count();
        Some(&mut self.data[offset..offset + n])
    }

    /// Mutable view over `len` pixels of row `y` starting at column `x`.
    ///
    /// The caller clips; out-of-range spans panic.
    pub fn span_mut(&mut self, x: u32, y: u32, len: u32) -> &mut [u8] {
        let n = self.channels.count();
        let start = (y as usize * self.width as usize + x as usize) * n;
        &mut self.data[start..start + len as usize * n]
    }

    /// Overwrite a pixel's colour, forcing alpha opaque on RGBA canvases.
    ///
    /// Returns `false` (and does nothing) outside the canvas.
    pub fn stamp(&mut self, x: i64, y: i64, rgb: [u8; 3]) -> bool {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return false;
        };
        let Some(px) = self.pixel_mut(x, y) else {
            return false;
        };
        px[..3].copy_from_slice(&rgb);
        if let Some(a) = px.get_mut(3) {
            *a = 255;
        }
        true
    }

    /// Copy the canvas into an owned image of matching layout.
    pub fn to_image(&self) -> SpriteResult<DynamicImage> {
        let img = match self.channels {
            Channels::Rgb => RgbImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgb8),
            Channels::Rgba => RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgba8),
        };
        img.ok_or_else(|| SpriteError::validation("canvas buffer does not match its dimensions"))
    }

    /// Persist the canvas; see [`save`].
    pub fn save(&self, path: &Path) -> SpriteResult<()> {
        save(self, path)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels.count())
    }
}

/// Encode `canvas` in the format implied by the extension of `path` and write it there.
///
/// Missing parent directories are created. The image is encoded in memory first, so an encoding
/// failure never leaves a truncated file behind.
pub fn save(canvas: &Canvas, path: &Path) -> SpriteResult<()> {
    let format = ImageFormat::from_path(path).map_err(|e| {
        SpriteError::unsupported_format(format!(
            "cannot infer image format for '{}': {e}",
            path.display()
        ))
    })?;

    let mut buf = Vec::new();
    canvas
        .to_image()?
        .write_to(&mut Cursor::new(&mut buf), format)
        .map_err(|e| SpriteError::encode(format!("encode '{}': {e}", path.display())))?;

    ensure_parent_dir(path)?;
    std::fs::write(path, &buf).with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> SpriteResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
