use std::{fmt, str::FromStr};

use crate::foundation::error::SpriteError;

/// Video containers the sequence encoder can produce, each paired with one codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    /// MPEG-4 Part 2 (`mp4v`) in MP4.
    Mp4,
    /// MPEG-4 Part 2 tagged `DIVX` in AVI.
    Avi,
    /// H.264 in Matroska.
    Mkv,
    /// Motion JPEG in QuickTime.
    Mov,
    /// Windows Media Video 8 in ASF.
    Wmv,
}

impl ContainerFormat {
    /// Every supported container.
    pub const ALL: [Self; 5] = [Self::Mp4, Self::Avi, Self::Mkv, Self::Mov, Self::Wmv];

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Avi => "avi",
            Self::Mkv => "mkv",
            Self::Mov => "mov",
            Self::Wmv => "wmv",
        }
    }

    /// `ffmpeg` muxer name (`-f`).
    pub fn muxer(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Avi => "avi",
            Self::Mkv => "matroska",
            Self::Mov => "mov",
            Self::Wmv => "asf",
        }
    }

    /// `ffmpeg` encoder name (`-c:v`).
    pub fn codec(self) -> &'static str {
        match self {
            Self::Mp4 | Self::Avi => "mpeg4",
            Self::Mkv => "libx264",
            Self::Mov => "mjpeg",
            Self::Wmv => "wmv2",
        }
    }

    /// FourCC override (`-tag:v`), where the container default is not wanted.
    pub fn fourcc(self) -> Option<&'static str> {
        match self {
            Self::Mp4 => Some("mp4v"),
            Self::Avi => Some("DIVX"),
            _ => None,
        }
    }

    /// Output pixel format handed to the encoder.
    pub fn pix_fmt(self) -> &'static str {
        match self {
            Self::Mov => "yuvj420p",
            _ => "yuv420p",
        }
    }
}

impl FromStr for ContainerFormat {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.extension() == wanted)
            .ok_or_else(|| {
                SpriteError::unsupported_format(format!(
                    "video container '{s}' is not supported (expected one of mp4, avi, mkv, mov, wmv)"
                ))
            })
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/container.rs"]
mod tests;
