use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    assets::decode::open_image,
    encode::container::ContainerFormat,
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder},
    foundation::core::Fps,
    foundation::error::{SpriteError, SpriteResult},
};

/// Files in `dir` ending in `.{ext}`, sorted by file name.
///
/// An empty result is an error: there is nothing to encode.
pub fn collect_frames(dir: &Path, ext: &str) -> SpriteResult<Vec<PathBuf>> {
    let ext = ext.trim_start_matches('.');
    let mut frames = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read frame directory '{}'", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("read frame directory '{}'", dir.display()))?
            .path();
        let matches = path.is_file()
            && path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches {
            frames.push(path);
        }
    }
    frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if frames.is_empty() {
        return Err(SpriteError::encode(format!(
            "no .{ext} images found in '{}'",
            dir.display()
        )));
    }
    Ok(frames)
}

/// What a finished [`SequenceEncoder::encode`] run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Written video.
    pub output: PathBuf,
    /// Frames handed to the encoder.
    pub frames_written: usize,
    /// Frames that could not be read or had the wrong size.
    pub frames_skipped: usize,
}

/// Turns a directory of sequentially named images into one video file.
#[derive(Clone, Debug)]
pub struct SequenceEncoder {
    input_dir: PathBuf,
    output: PathBuf,
    image_ext: String,
    container: ContainerFormat,
    fps: Fps,
}

impl SequenceEncoder {
    /// Configure an encode run. `output_format` must name a supported container.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        image_ext: &str,
        output_format: &str,
        fps: Fps,
    ) -> SpriteResult<Self> {
        let container = output_format.parse::<ContainerFormat>()?;
        fps.validate()?;
        Ok(Self {
            input_dir: input_dir.into(),
            output: output.into(),
            image_ext: image_ext.trim_start_matches('.').to_string(),
            container,
            fps,
        })
    }

    /// Selected container.
    pub fn container(&self) -> ContainerFormat {
        self.container
    }

    /// Frames this run would encode, in order.
    pub fn frames(&self) -> SpriteResult<Vec<PathBuf>> {
        collect_frames(&self.input_dir, &self.image_ext)
    }

    /// Encode every frame; the first readable one fixes the video size.
    #[tracing::instrument(skip(self), fields(input = %self.input_dir.display(), output = %self.output.display()))]
    pub fn encode(&self) -> SpriteResult<EncodeSummary> {
        let frames = self.frames()?;

        let mut encoder: Option<(FfmpegEncoder, (u32, u32))> = None;
        let mut skipped = 0;
        for path in &frames {
            let frame = match open_image(path) {
                Ok(img) => img.into_rgb8(),
                Err(e) => {
                    tracing::warn!(frame = %path.display(), error = %e, "skipping unreadable frame");
                    skipped += 1;
                    continue;
                }
            };
            if encoder.is_none() {
                let (width, height) = frame.dimensions();
                let enc = FfmpegEncoder::new(EncodeConfig {
                    width,
                    height,
                    fps: self.fps,
                    out_path: self.output.clone(),
                    container: self.container,
                    overwrite: true,
                })?;
                encoder = Some((enc, (width, height)));
            }
            let Some((enc, size)) = encoder.as_mut() else {
                continue;
            };
            if frame.dimensions() != *size {
                tracing::warn!(
                    frame = %path.display(),
                    width = frame.width(),
                    height = frame.height(),
                    "skipping frame with mismatched size"
                );
                skipped += 1;
                continue;
            }
            enc.encode_frame(&frame)?;
        }

        let Some((encoder, _)) = encoder else {
            return Err(SpriteError::encode(format!(
                "no readable .{} images in '{}'",
                self.image_ext,
                self.input_dir.display()
            )));
        };
        let frames_written = encoder.frames_written();
        let output = encoder.finish()?;
        tracing::info!(frames_written, frames_skipped = skipped, "video written");
        Ok(EncodeSummary {
            output,
            frames_written,
            frames_skipped: skipped,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sequence.rs"]
mod tests;
