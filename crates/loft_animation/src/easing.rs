//! Easing functions
//!
//! The fixed set of rate curves a flight's traversal stage can use. One is
//! picked uniformly at random per motion plan; the entrance stage always
//! uses the default.

/// Rate curve applied to an elapsed-time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate.
    Linear,
    /// Slow start, accelerating towards the end.
    EaseIn,
    /// Fast start, decelerating towards the end.
    EaseOut,
    /// Slow at both ends, fastest in the middle.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Every variant, for uniform random selection.
    pub const ALL: [Easing; 4] = [
        Easing::EaseInOut,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::Linear,
    ];

    /// Map a progress fraction through this curve.
    ///
    /// `t` must already be clamped to [0.0, 1.0]; every curve maps 0 to 0
    /// and 1 to 1.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => 0.5 - (std::f32::consts::PI * t).cos() * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in Easing::ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((Easing::Linear.apply(t) - t).abs() < 1e-6);
        }
    }

    #[test]
    fn test_accelerate_lags_then_leads() {
        // EaseIn stays below the diagonal, EaseOut above it.
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        // EaseInOut crosses the diagonal at the midpoint.
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_default_is_ease_in_out() {
        assert_eq!(Easing::default(), Easing::EaseInOut);
    }
}
