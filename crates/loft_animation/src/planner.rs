//! Motion planning
//!
//! Produces one immutable `MotionPlan` per spawned balloon: a cubic Bezier
//! from the bottom-center of the viewport to a random point on the top edge,
//! with randomized interior control points and a randomly selected easing.
//!
//! The planner draws from a caller-supplied random source, so a seeded RNG
//! yields fully deterministic plans under test.

use crate::bezier::CubicBezier;
use crate::easing::Easing;
use loft_core::{Point, Size};
use rand::Rng;

/// Default traversal stage duration.
pub const TRAVERSAL_DURATION_MS: u32 = 3000;

/// Immutable flight path for one balloon.
///
/// Produced once per spawn, consumed by the traversal stage, then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPlan {
    curve: CubicBezier,
    easing: Easing,
    duration_ms: u32,
}

impl MotionPlan {
    pub const fn new(points: [Point; 4], easing: Easing, duration_ms: u32) -> Self {
        Self {
            curve: CubicBezier::from_points(points),
            easing,
            duration_ms,
        }
    }

    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Start position (bottom-center of the viewport).
    pub fn start(&self) -> Point {
        self.curve.p0
    }

    /// End position (on the top edge).
    pub fn end(&self) -> Point {
        self.curve.p3
    }
}

/// Builds randomized motion plans for a given viewport.
#[derive(Debug, Clone, Copy)]
pub struct MotionPlanner {
    duration_ms: u32,
}

impl MotionPlanner {
    pub fn new() -> Self {
        Self {
            duration_ms: TRAVERSAL_DURATION_MS,
        }
    }

    pub fn with_duration(duration_ms: u32) -> Self {
        Self { duration_ms }
    }

    /// Plan one flight across `viewport` for a sprite of `sprite` size.
    ///
    /// Control points:
    /// - P0: horizontally centered on the bottom edge
    /// - P1: random x, random y in the lower half offset down by the sprite
    ///   height
    /// - P2: random x, random y in the upper half
    /// - P3: random x on the top edge
    ///
    /// An unmeasured viewport (either dimension zero) degenerates to an
    /// all-zero plan; callers are expected not to spawn in that state.
    pub fn plan<R: Rng>(&self, rng: &mut R, viewport: Size, sprite: Size) -> MotionPlan {
        if viewport.is_empty() {
            return MotionPlan::new([Point::ZERO; 4], Easing::default(), self.duration_ms);
        }

        let half_height = viewport.height / 2.0;

        let p0 = Point::new(
            (viewport.width - sprite.width) / 2.0,
            viewport.height - sprite.height,
        );
        let p1 = Point::new(
            rng.gen_range(0.0..viewport.width),
            rng.gen_range(0.0..half_height) + half_height + sprite.height,
        );
        let p2 = Point::new(
            rng.gen_range(0.0..viewport.width),
            rng.gen_range(0.0..half_height),
        );
        let p3 = Point::new(rng.gen_range(0.0..viewport.width), 0.0);

        let easing = Easing::ALL[rng.gen_range(0..Easing::ALL.len())];

        MotionPlan::new([p0, p1, p2, p3], easing, self.duration_ms)
    }
}

impl Default for MotionPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VIEWPORT: Size = Size::new(1000.0, 2000.0);
    const SPRITE: Size = Size::new(100.0, 100.0);

    #[test]
    fn test_start_is_bottom_center() {
        let planner = MotionPlanner::new();
        let mut rng = StdRng::seed_from_u64(1);

        let plan = planner.plan(&mut rng, VIEWPORT, SPRITE);
        assert_eq!(plan.start(), Point::new(450.0, 1900.0));
    }

    #[test]
    fn test_control_points_stay_in_their_bands() {
        let planner = MotionPlanner::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let plan = planner.plan(&mut rng, VIEWPORT, SPRITE);
            let c = plan.curve();

            assert!(c.p1.x >= 0.0 && c.p1.x < 1000.0);
            assert!(c.p1.y >= 1100.0 && c.p1.y < 2100.0, "p1.y = {}", c.p1.y);

            assert!(c.p2.x >= 0.0 && c.p2.x < 1000.0);
            assert!(c.p2.y >= 0.0 && c.p2.y < 1000.0, "p2.y = {}", c.p2.y);

            assert!(c.p3.x >= 0.0 && c.p3.x < 1000.0);
            assert_eq!(c.p3.y, 0.0);

            assert_eq!(plan.duration_ms(), TRAVERSAL_DURATION_MS);
        }
    }

    #[test]
    fn test_seeded_plans_are_deterministic() {
        let planner = MotionPlanner::new();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(
                planner.plan(&mut a, VIEWPORT, SPRITE),
                planner.plan(&mut b, VIEWPORT, SPRITE)
            );
        }
    }

    #[test]
    fn test_unmeasured_viewport_degenerates() {
        let planner = MotionPlanner::new();
        let mut rng = StdRng::seed_from_u64(3);

        for viewport in [Size::ZERO, Size::new(1000.0, 0.0), Size::new(0.0, 2000.0)] {
            let plan = planner.plan(&mut rng, viewport, SPRITE);
            let c = plan.curve();
            assert_eq!(c.p0, Point::ZERO);
            assert_eq!(c.p1, Point::ZERO);
            assert_eq!(c.p2, Point::ZERO);
            assert_eq!(c.p3, Point::ZERO);
        }
    }

    #[test]
    fn test_every_easing_gets_selected() {
        let planner = MotionPlanner::new();
        let mut rng = StdRng::seed_from_u64(11);

        let mut seen = [false; 4];
        for _ in 0..200 {
            let plan = planner.plan(&mut rng, VIEWPORT, SPRITE);
            let idx = Easing::ALL
                .iter()
                .position(|e| *e == plan.easing())
                .unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
