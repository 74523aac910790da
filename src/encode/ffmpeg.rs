use std::{
    io::{Read as _, Write as _},
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
    thread::JoinHandle,
};

use image::RgbImage;

use crate::{
    encode::container::ContainerFormat,
    foundation::core::Fps,
    foundation::error::{SpriteError, SpriteResult},
    render::canvas::ensure_parent_dir,
};

/// Output settings for [`FfmpegEncoder`].
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate.
    pub fps: Fps,
    /// Final video path.
    pub out_path: PathBuf,
    /// Container/codec pairing.
    pub container: ContainerFormat,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Reject sizes and rates the encoder cannot work with.
    pub fn validate(&self) -> SpriteResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SpriteError::validation(
                "encode width/height must be non-zero",
            ));
        }
        self.fps.validate()
    }

    /// Sibling path that receives output until encoding succeeds.
    pub fn partial_path(&self) -> PathBuf {
        let name = self
            .out_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("video.{}", self.container.extension()));
        self.out_path.with_file_name(format!(".{name}.partial"))
    }
}

/// Check whether an `ffmpeg` binary can be spawned.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Streams RGB frames to a system `ffmpeg` process.
///
/// Output goes to a hidden sibling of the target and is renamed into place only after `ffmpeg`
/// exits successfully; on failure, or when dropped unfinished, the partial file is removed.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    partial: PathBuf,
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    frames: usize,
    done: bool,
}

impl FfmpegEncoder {
    /// Validate `cfg` and spawn `ffmpeg`.
    pub fn new(cfg: EncodeConfig) -> SpriteResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(SpriteError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SpriteError::encode(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }

        let partial = cfg.partial_path();
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.rounded().to_string(),
            "-i",
            "pipe:0",
            "-an",
            // yuv420p needs even dimensions.
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-c:v",
            cfg.container.codec(),
            "-pix_fmt",
            cfg.container.pix_fmt(),
        ]);
        if let Some(tag) = cfg.container.fourcc() {
            cmd.args(["-tag:v", tag]);
        }
        cmd.args(["-f", cfg.container.muxer()]).arg(&partial);

        let mut child = cmd.spawn().map_err(|e| {
            SpriteError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SpriteError::encode("failed to open ffmpeg stdin (unexpected)"))?;

        let stderr_drain = drain_stderr(&mut child)?;

        Ok(Self {
            cfg,
            partial,
            child,
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            frames: 0,
            done: false,
        })
    }

    /// Frames accepted so far.
    pub fn frames_written(&self) -> usize {
        self.frames
    }

    /// Push one frame; its size must match the configuration.
    pub fn encode_frame(&mut self, frame: &RgbImage) -> SpriteResult<()> {
        if frame.dimensions() != (self.cfg.width, self.cfg.height) {
            return Err(SpriteError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.cfg.width,
                self.cfg.height
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SpriteError::encode("ffmpeg encoder is already finalized"));
        };
        stdin.write_all(frame.as_raw()).map_err(|e| {
            SpriteError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames += 1;
        Ok(())
    }

    /// Close the stream, wait for `ffmpeg` and move the result into place.
    pub fn finish(mut self) -> SpriteResult<PathBuf> {
        drop(self.stdin.take());

        let status = self.child.wait().map_err(|e| {
            SpriteError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        self.done = true;

        let stderr_bytes = match self.stderr_drain.take().map(JoinHandle::join) {
            Some(Ok(Ok(bytes))) => bytes,
            Some(Ok(Err(e))) => {
                tracing::warn!(error = %e, "ffmpeg stderr read failed");
                Vec::new()
            }
            Some(Err(_)) => {
                tracing::warn!("ffmpeg stderr drain thread panicked");
                Vec::new()
            }
            None => Vec::new(),
        };
        let stderr = String::from_utf8_lossy(&stderr_bytes);

        if !status.success() {
            discard(&self.partial);
            return Err(SpriteError::encode(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }

        if let Err(e) = std::fs::rename(&self.partial, &self.cfg.out_path) {
            discard(&self.partial);
            return Err(SpriteError::encode(format!(
                "failed to move encoded video to '{}': {e}",
                self.cfg.out_path.display()
            )));
        }
        Ok(self.cfg.out_path.clone())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        drop(self.stdin.take());
        let _ = self.child.kill();
        let _ = self.child.wait();
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        discard(&self.partial);
    }
}

/// Read the child's stderr to the end on a separate thread.
///
/// Left unread, a full stderr pipe stalls the child, which then stops consuming stdin.
fn drain_stderr(child: &mut Child) -> SpriteResult<JoinHandle<std::io::Result<Vec<u8>>>> {
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| SpriteError::encode("failed to open ffmpeg stderr (unexpected)"))?;
    Ok(std::thread::spawn(move || {
        let mut bytes = Vec::new();
        stderr.read_to_end(&mut bytes)?;
        Ok(bytes)
    }))
}

fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), error = %e, "could not remove partial video");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
