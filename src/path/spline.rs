use crate::{
    foundation::core::Point,
    foundation::error::{SpriteError, SpriteResult},
};

/// Natural cubic spline `y(x)` through a set of knots.
///
/// Second derivatives vanish at both end knots. Outside the knot range the end segments are
/// extended.
#[derive(Clone, Debug, PartialEq)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot.
    m: Vec<f64>,
}

impl NaturalCubicSpline {
    /// Fit through `points`, which may come in any x order.
    ///
    /// Needs at least two points with finite coordinates and pairwise distinct x.
    pub fn fit(points: &[Point]) -> SpriteResult<Self> {
        if points.len() < 2 {
            return Err(SpriteError::validation(format!(
                "spline needs at least 2 knots, got {}",
                points.len()
            )));
        }
        if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(SpriteError::validation(format!(
                "spline knot ({}, {}) is not finite",
                p.x, p.y
            )));
        }

        let mut knots = points.to_vec();
        knots.sort_by(|a, b| a.x.total_cmp(&b.x));
        if let Some(w) = knots.windows(2).find(|w| w[0].x == w[1].x) {
            return Err(SpriteError::degenerate_anchors(format!(
                "x = {} appears more than once",
                w[0].x
            )));
        }

        let xs: Vec<f64> = knots.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = knots.iter().map(|p| p.y).collect();
        let m = second_derivatives(&xs, &ys);
        Ok(Self { xs, ys, m })
    }

    /// Smallest and largest knot abscissa.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let last = self.xs.len() - 2;
        let i = self.xs.partition_point(|&k| k <= x).saturating_sub(1).min(last);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let h = x1 - x0;
        let (a, b) = (x1 - x, x - x0);

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}

/// Tridiagonal solve (Thomas algorithm) for the interior second derivatives.
fn second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let interior = n - 2;
    let mut diag = vec![0.0; interior];
    let mut rhs = vec![0.0; interior];
    for k in 0..interior {
        let i = k + 1;
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        rhs[k] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    // Sub- and super-diagonal entries are h[k] for row k+1 / h[k+1] for row k.
    for k in 1..interior {
        let w = h[k] / diag[k - 1];
        diag[k] -= w * h[k];
        rhs[k] -= w * rhs[k - 1];
    }

    m[interior] = rhs[interior - 1] / diag[interior - 1];
    for k in (0..interior - 1).rev() {
        m[k + 1] = (rhs[k] - h[k + 1] * m[k + 2]) / diag[k];
    }
    m
}

#[cfg(test)]
#[path = "../../tests/unit/path/spline.rs"]
mod tests;
