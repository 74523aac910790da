use crate::foundation::error::{SpriteError, SpriteResult};

pub use kurbo::{Affine, Point, Vec2};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SpriteResult<Self> {
        if den == 0 {
            return Err(SpriteError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SpriteError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole frames per second, e.g. `Fps::whole(24)`.
    pub fn whole(num: u32) -> SpriteResult<Self> {
        Self::new(num, 1)
    }

    /// Re-check invariants on values that bypassed [`Fps::new`] (e.g. deserialized ones).
    pub fn validate(self) -> SpriteResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Frame budget for a clip of `seconds`, using floor semantics.
    pub fn frames_in(self, seconds: u32) -> usize {
        if self.den == 0 {
            return 0;
        }
        (u64::from(self.num) * u64::from(seconds) / u64::from(self.den)) as usize
    }

    /// Integral rate handed to encoders; fractional rates round to nearest.
    pub fn rounded(self) -> u32 {
        self.as_f64().round().max(1.0) as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
