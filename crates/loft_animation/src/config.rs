//! Engine configuration

/// Tunable parameters of the balloon engine.
///
/// `Default` gives a 500 ms entrance fading from 0.3 opacity and 0.2 scale
/// up to full, then a 3000 ms traversal, with an unbounded sprite pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Entrance stage duration in milliseconds.
    pub entrance_ms: u32,
    /// Traversal stage duration in milliseconds.
    pub traversal_ms: u32,
    /// Opacity at the start of the entrance stage; the stage ends fully
    /// opaque.
    pub entrance_opacity: f32,
    /// Uniform scale at the start of the entrance stage; the stage ends at
    /// natural size.
    pub entrance_scale: f32,
    /// Frame rate of the optional background tick driver.
    pub target_fps: u32,
    /// Maximum pooled sprite handles; `None` keeps every returned handle.
    pub pool_capacity: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            entrance_ms: 500,
            traversal_ms: 3000,
            entrance_opacity: 0.3,
            entrance_scale: 0.2,
            target_fps: 120,
            pool_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.entrance_ms, 500);
        assert_eq!(config.traversal_ms, 3000);
        assert!((config.entrance_opacity - 0.3).abs() < 1e-6);
        assert!((config.entrance_scale - 0.2).abs() < 1e-6);
        assert_eq!(config.pool_capacity, None);
    }
}
