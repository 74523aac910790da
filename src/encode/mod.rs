//! Video encoding of rendered frame sequences.
//!
//! Frames are streamed to the system `ffmpeg` binary; output lands atomically at the target path.

/// Supported container formats and their codec settings.
pub(crate) mod container;
/// `ffmpeg` child-process encoder.
pub(crate) mod ffmpeg;
/// Directory-of-images to video.
pub(crate) mod sequence;
