use crate::{
    foundation::core::{Fps, Point},
    foundation::error::SpriteResult,
    path::spline::NaturalCubicSpline,
};

/// Outcome of [`interpolate`].
#[derive(Clone, Debug, PartialEq)]
pub enum Interpolation {
    /// Samples along the fitted curve, ordered by x.
    Sampled(Vec<Point>),
    /// Fewer than two anchors were supplied; nothing was fitted.
    InsufficientAnchors {
        /// How many anchors were available.
        supplied: usize,
    },
}

impl Interpolation {
    /// Sampled points; empty when no path could be produced.
    pub fn points(&self) -> &[Point] {
        match self {
            Self::Sampled(points) => points,
            Self::InsufficientAnchors { .. } => &[],
        }
    }

    /// `true` when a curve was fitted and sampled.
    pub fn is_sampled(&self) -> bool {
        matches!(self, Self::Sampled(_))
    }

    /// Consume into the sampled points (empty when no path could be produced).
    pub fn into_points(self) -> Vec<Point> {
        match self {
            Self::Sampled(points) => points,
            Self::InsufficientAnchors { .. } => Vec::new(),
        }
    }
}

/// Fit a natural cubic spline through `anchors` and sample it `sample_count` times.
///
/// Sample abscissae are evenly spaced over `[min x, max x]`, both ends included. Anchors may be
/// in any order but must not repeat an x value.
pub fn interpolate(anchors: &[Point], sample_count: usize) -> SpriteResult<Interpolation> {
    if anchors.len() < 2 {
        tracing::warn!(
            supplied = anchors.len(),
            "at least 2 anchor points are needed to interpolate"
        );
        return Ok(Interpolation::InsufficientAnchors {
            supplied: anchors.len(),
        });
    }

    let spline = NaturalCubicSpline::fit(anchors)?;
    let (lo, hi) = spline.domain();
    let points = linspace(lo, hi, sample_count)
        .map(|x| Point::new(x, spline.eval(x)))
        .collect();
    Ok(Interpolation::Sampled(points))
}

fn linspace(lo: f64, hi: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (hi - lo) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| if i + 1 == n && n > 1 { hi } else { lo + step * i as f64 })
}

/// Sparse anchors plus the number of frames they should be stretched over.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnchorPath {
    anchors: Vec<Point>,
    sample_count: usize,
}

impl AnchorPath {
    /// Empty path sampled `sample_count` times.
    pub fn new(sample_count: usize) -> Self {
        Self {
            anchors: Vec::new(),
            sample_count,
        }
    }

    /// Empty path with one sample per frame of a `seconds`-long clip.
    pub fn for_clip(fps: Fps, seconds: u32) -> Self {
        Self::new(fps.frames_in(seconds))
    }

    /// Builder-style anchor list.
    pub fn with_anchors(mut self, anchors: impl IntoIterator<Item = Point>) -> Self {
        self.anchors.extend(anchors);
        self
    }

    /// Append an anchor.
    pub fn push(&mut self, anchor: Point) {
        self.anchors.push(anchor);
    }

    /// Anchors in insertion order.
    pub fn anchors(&self) -> &[Point] {
        &self.anchors
    }

    /// Number of samples [`AnchorPath::interpolate`] produces.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// See [`interpolate`].
    pub fn interpolate(&self) -> SpriteResult<Interpolation> {
        interpolate(&self.anchors, self.sample_count)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/interpolate.rs"]
mod tests;
