//! Sample statistics over terminal positions.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Sample mean and (unbiased) covariance of a set of `(x, y)` points.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionStats {
    /// Number of points.
    pub count: usize,
    /// Mean x (m).
    pub mean_x: f64,
    /// Mean y (m).
    pub mean_y: f64,
    /// Sample variance of x (m²).
    pub var_x: f64,
    /// Sample variance of y (m²).
    pub var_y: f64,
    /// Sample covariance of x and y (m²).
    pub cov_xy: f64,
}

impl PositionStats {
    /// Computes the statistics of `points`. Returns `None` for an empty slice.
    ///
    /// A single point, or any number of identical points, has exactly zero
    /// variance. Deviations are taken relative to the first point so that a
    /// mean rounded one ulp off cannot leak into the spread.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let &(x0, y0) = points.first()?;
        let count = points.len();
        let n = count as f64;
        let shift_x = points.iter().map(|p| p.0 - x0).sum::<f64>() / n;
        let shift_y = points.iter().map(|p| p.1 - y0).sum::<f64>() / n;

        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for &(x, y) in points {
            let dx = (x - x0) - shift_x;
            let dy = (y - y0) - shift_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        let denom = if count > 1 { n - 1.0 } else { 1.0 };

        Some(PositionStats {
            count,
            mean_x: x0 + shift_x,
            mean_y: y0 + shift_y,
            var_x: sxx / denom,
            var_y: syy / denom,
            cov_xy: sxy / denom,
        })
    }

    /// `var_x + var_y`, the trace of the covariance matrix.
    pub fn total_variance(&self) -> f64 {
        self.var_x + self.var_y
    }

    /// Standard deviations `(σx, σy)`.
    pub fn std_dev(&self) -> (f64, f64) {
        (self.var_x.sqrt(), self.var_y.sqrt())
    }
}

/// Pearson correlation of two equally long samples.
///
/// Returns `0.0` if either sample is constant or the lengths differ.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return 0.0;
    }
    let n = a.len() as f64;
    let (a0, b0) = (a[0], b[0]);
    let shift_a = a.iter().map(|x| x - a0).sum::<f64>() / n;
    let shift_b = b.iter().map(|y| y - b0).sum::<f64>() / n;

    let (mut saa, mut sbb, mut sab) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let da = (x - a0) - shift_a;
        let db = (y - b0) - shift_b;
        saa += da * da;
        sbb += db * db;
        sab += da * db;
    }
    if saa == 0.0 || sbb == 0.0 {
        return 0.0;
    }
    sab / (saa * sbb).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        assert!(PositionStats::from_points(&[]).is_none());
    }

    #[test]
    fn test_single_point() {
        let stats = PositionStats::from_points(&[(2.0, -1.0)]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!((stats.mean_x, stats.mean_y), (2.0, -1.0));
        assert_eq!(stats.total_variance(), 0.0);
    }

    #[test]
    fn test_identical_points_have_zero_variance() {
        let point = (0.05013314352068598, -0.0017765049455937367);
        let stats = PositionStats::from_points(&[point; 400]).unwrap();
        assert_eq!((stats.mean_x, stats.mean_y), point);
        assert_eq!(stats.var_x, 0.0);
        assert_eq!(stats.var_y, 0.0);
        assert_eq!(stats.cov_xy, 0.0);
        assert_eq!(stats.total_variance(), 0.0);
    }

    #[test]
    fn test_known_values() {
        let points = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0)];
        let stats = PositionStats::from_points(&points).unwrap();
        assert_relative_eq!(stats.mean_x, 2.5);
        assert_relative_eq!(stats.mean_y, 5.0);
        assert_relative_eq!(stats.var_x, 5.0 / 3.0);
        assert_relative_eq!(stats.var_y, 20.0 / 3.0);
        assert_relative_eq!(stats.cov_xy, 10.0 / 3.0);
        assert_relative_eq!(stats.std_dev().0, (5.0f64 / 3.0).sqrt());
    }

    #[test]
    fn test_correlation() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        let c = [8.0, 6.0, 4.0, 2.0];
        assert_relative_eq!(correlation(&a, &b), 1.0);
        assert_relative_eq!(correlation(&a, &c), -1.0);
        assert_eq!(correlation(&a, &[1.0, 1.0, 1.0, 1.0]), 0.0);
        assert_eq!(correlation(&a, &[0.1; 4]), 0.0);
        assert_eq!(correlation(&a, &b[..2]), 0.0);
    }
}
