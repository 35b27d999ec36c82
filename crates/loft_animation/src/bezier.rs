//! Cubic Bezier path sampling
//!
//! Pure position interpolation along a curve defined by four control
//! points. The sampler holds no animation state; the engine calls it once
//! per tick with the current eased fraction.

use loft_core::Point;

/// A cubic Bezier curve through four control points.
///
/// `p0` is the start position, `p3` the end position; `p1` and `p2` shape
/// the path between them without lying on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub const fn from_points(points: [Point; 4]) -> Self {
        Self::new(points[0], points[1], points[2], points[3])
    }

    /// Position on the curve at fraction `t`.
    ///
    /// Evaluates `p0(1-t)^3 + 3 p1 t(1-t)^2 + 3 p2 t^2(1-t) + p3 t^3` per
    /// axis. `t` must already be clamped to [0.0, 1.0].
    pub fn sample(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;

        Point::new(
            b0 * self.p0.x + b1 * self.p1.x + b2 * self.p2.x + b3 * self.p3.x,
            b0 * self.p0.y + b1 * self.p1.y + b2 * self.p2.y + b3 * self.p3.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_curve() -> CubicBezier {
        CubicBezier::new(
            Point::new(450.0, 1900.0),
            Point::new(100.0, 1200.0),
            Point::new(800.0, 400.0),
            Point::new(500.0, 0.0),
        )
    }

    #[test]
    fn test_endpoint_interpolation() {
        let curve = test_curve();
        assert_eq!(curve.sample(0.0), curve.p0);
        assert_eq!(curve.sample(1.0), curve.p3);
    }

    #[test]
    fn test_midpoint_matches_bernstein_weights() {
        // At t = 0.5 the weights are 1/8, 3/8, 3/8, 1/8.
        let mid = test_curve().sample(0.5);
        assert!((mid.x - 456.25).abs() < 1e-3);
        assert!((mid.y - 837.5).abs() < 1e-3);
    }

    #[test]
    fn test_sampling_is_continuous() {
        // Consecutive samples stay within a bound implied by the control
        // polygon (max speed of a cubic is 3 * max control-leg length).
        let curve = test_curve();
        let mut prev = curve.sample(0.0);
        for i in 1..=100 {
            let next = curve.sample(i as f32 / 100.0);
            let step = ((next.x - prev.x).powi(2) + (next.y - prev.y).powi(2)).sqrt();
            assert!(step < 60.0, "discontinuity at step {i}: {step}");
            prev = next;
        }
    }
}
