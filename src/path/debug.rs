use std::path::Path;

use crate::{
    foundation::core::{Fps, Point},
    foundation::error::SpriteResult,
    path::interpolate::{AnchorPath, Interpolation},
    render::canvas::Canvas,
};

/// Colour stamped for anchor points.
pub const ANCHOR_COLOR: [u8; 3] = [0, 255, 0];
/// Colour stamped for interpolated samples.
pub const SAMPLE_COLOR: [u8; 3] = [0, 0, 255];

/// Background image that anchors and samples are stamped onto for visual checks.
#[derive(Clone, Debug)]
pub struct AnchorCanvas {
    canvas: Canvas,
    path: AnchorPath,
}

impl AnchorCanvas {
    /// Load `background` and budget one sample per frame of a `seconds`-long clip.
    pub fn open(background: &Path, fps: Fps, seconds: u32) -> SpriteResult<Self> {
        Ok(Self::new(Canvas::open(background)?, fps.frames_in(seconds)))
    }

    /// Wrap an existing canvas.
    pub fn new(canvas: Canvas, sample_count: usize) -> Self {
        Self {
            canvas,
            path: AnchorPath::new(sample_count),
        }
    }

    /// Record an anchor and stamp it, when it lies on the canvas.
    ///
    /// Anchors outside the canvas are ignored and `false` is returned.
    pub fn add_anchor(&mut self, x: i64, y: i64) -> bool {
        if !self.canvas.stamp(x, y, ANCHOR_COLOR) {
            return false;
        }
        self.path.push(Point::new(x as f64, y as f64));
        true
    }

    /// Interpolate the recorded anchors and stamp every on-canvas sample.
    pub fn interpolate(&mut self) -> SpriteResult<Interpolation> {
        let out = self.path.interpolate()?;
        for p in out.points() {
            self.canvas
                .stamp(p.x.trunc() as i64, p.y.trunc() as i64, SAMPLE_COLOR);
        }
        Ok(out)
    }

    /// Anchor path collected so far.
    pub fn path(&self) -> &AnchorPath {
        &self.path
    }

    /// Canvas with the stamps applied.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Save the stamped canvas.
    pub fn save(&self, path: &Path) -> SpriteResult<()> {
        self.canvas.save(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/debug.rs"]
mod tests;
