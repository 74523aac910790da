use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{DynamicImage, RgbImage};

use crate::{
    foundation::core::Fps,
    foundation::error::{SpriteError, SpriteResult},
    render::canvas::{Canvas, save},
};

/// Byte order of the colour channels in a [`RawFrame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red.
    Bgr,
}

/// Pixel rows read back from a live renderer.
///
/// Rows are stored bottom-up (OpenGL read-back convention), 3 bytes per pixel, no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channel order of `data`.
    pub order: ChannelOrder,
    /// Bottom-up rows.
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Flip to top-down rows and reorder channels to RGB.
    pub fn to_image(&self) -> SpriteResult<RgbImage> {
        let stride = self.width as usize * 3;
        let expected = stride * self.height as usize;
        if self.data.len() != expected {
            return Err(SpriteError::validation(format!(
                "raw frame holds {} bytes, expected {expected} for {}x{} rgb",
                self.data.len(),
                self.width,
                self.height
            )));
        }

        let mut out = Vec::with_capacity(expected);
        for row in self.data.chunks_exact(stride.max(1)).rev() {
            match self.order {
                ChannelOrder::Rgb => out.extend_from_slice(row),
                ChannelOrder::Bgr => {
                    for px in row.chunks_exact(3) {
                        out.extend_from_slice(&[px[2], px[1], px[0]]);
                    }
                }
            }
        }
        RgbImage::from_raw(self.width, self.height, out)
            .ok_or_else(|| SpriteError::validation("raw frame dimensions overflow"))
    }
}

/// Anything that can hand over the current rendered frame on demand.
pub trait FrameSource {
    /// Read the frame currently on screen.
    fn read_frame(&mut self) -> SpriteResult<RawFrame>;
}

/// Writes a bounded run of frames as `frame_NNNN.png` into one directory.
///
/// Indices are zero-padded wide enough that file-name order equals frame order.
#[derive(Clone, Debug)]
pub struct FrameSaver {
    out_dir: PathBuf,
    total_frames: usize,
    frame_count: usize,
    digits: usize,
}

impl FrameSaver {
    /// Prepare `out_dir` (created if missing) for `fps × seconds` frames.
    pub fn new(out_dir: impl Into<PathBuf>, fps: Fps, seconds: u32) -> SpriteResult<Self> {
        Self::with_budget(out_dir, fps.frames_in(seconds))
    }

    /// Prepare `out_dir` for exactly `total_frames` frames.
    pub fn with_budget(out_dir: impl Into<PathBuf>, total_frames: usize) -> SpriteResult<Self> {
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("create frame directory '{}'", out_dir.display()))?;
        let digits = total_frames.saturating_sub(1).to_string().len().max(4);
        Ok(Self {
            out_dir,
            total_frames,
            frame_count: 0,
            digits,
        })
    }

    /// Directory frames are written to.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> usize {
        self.frame_count
    }

    /// Total frame budget.
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// `true` once the budget is used up.
    pub fn is_complete(&self) -> bool {
        self.frame_count >= self.total_frames
    }

    /// File path used for frame `index`.
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.out_dir
            .join(format!("frame_{index:0width$}.png", width = self.digits))
    }

    /// Flip, reorder and save a raw frame. Returns `None` once the budget is exhausted.
    pub fn save_frame(&mut self, frame: &RawFrame) -> SpriteResult<Option<PathBuf>> {
        if self.is_complete() {
            return Ok(None);
        }
        let canvas = Canvas::from_image(DynamicImage::ImageRgb8(frame.to_image()?));
        self.save_canvas(&canvas)
    }

    /// Save a composited canvas as the next frame. Returns `None` once the budget is exhausted.
    pub fn save_canvas(&mut self, canvas: &Canvas) -> SpriteResult<Option<PathBuf>> {
        if self.is_complete() {
            return Ok(None);
        }
        let path = self.frame_path(self.frame_count);
        save(canvas, &path)?;
        self.frame_count += 1;
        tracing::debug!(path = %path.display(), frame = self.frame_count, "saved frame");
        Ok(Some(path))
    }

    /// Pull one frame from `source` and save it, unless the budget is exhausted.
    pub fn capture(&mut self, source: &mut dyn FrameSource) -> SpriteResult<Option<PathBuf>> {
        if self.is_complete() {
            return Ok(None);
        }
        let frame = source.read_frame()?;
        self.save_frame(&frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/frame.rs"]
mod tests;
