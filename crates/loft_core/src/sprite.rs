//! Sprite handles
//!
//! A sprite is one visible balloon instance. The engine owns a sprite while
//! it is in flight and returns it to a recycle pool afterwards; the host
//! surface holds the same handle while the sprite is one of its children.
//! Handles are cheap clones of shared state with pointer identity, so every
//! holder observes the geometry the engine writes on each animation tick.

use crate::geometry::{Point, Size, Vec2};
use crate::icon::ImageId;
use std::sync::{Arc, Mutex};

/// Mutable visual state of one sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteState {
    /// Which icon variant the sprite currently displays.
    pub image: ImageId,
    pub size: Size,
    pub position: Point,
    pub opacity: f32,
    pub scale: Vec2,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            image: ImageId::default(),
            size: Size::ZERO,
            position: Point::ZERO,
            opacity: 1.0,
            scale: Vec2::ONE,
        }
    }
}

/// Shared handle to one sprite.
///
/// Clones refer to the same underlying state; `same()` compares that
/// identity. A handle is in exactly one place at a time: the recycle pool,
/// or an in-flight animation (which also makes it a surface child).
#[derive(Debug, Clone)]
pub struct SpriteHandle {
    state: Arc<Mutex<SpriteState>>,
}

impl SpriteHandle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SpriteState::default())),
        }
    }

    /// Whether two handles refer to the same sprite.
    pub fn same(&self, other: &SpriteHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Copy of the current state, for rendering or assertions.
    pub fn snapshot(&self) -> SpriteState {
        *self.state.lock().unwrap()
    }

    /// Restore the default state before a pooled handle is reused.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = SpriteState::default();
    }

    /// Assign the icon variant and on-screen size for the next flight.
    pub fn assign(&self, image: ImageId, size: Size) {
        let mut state = self.state.lock().unwrap();
        state.image = image;
        state.size = size;
    }

    pub fn set_position(&self, position: Point) {
        self.state.lock().unwrap().position = position;
    }

    pub fn set_opacity(&self, opacity: f32) {
        self.state.lock().unwrap().opacity = opacity;
    }

    pub fn set_scale(&self, scale: Vec2) {
        self.state.lock().unwrap().scale = scale;
    }
}

impl Default for SpriteHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_identity() {
        let a = SpriteHandle::new();
        let b = a.clone();
        let c = SpriteHandle::new();

        assert!(a.same(&b));
        assert!(!a.same(&c));
    }

    #[test]
    fn test_clones_share_state() {
        let a = SpriteHandle::new();
        let b = a.clone();

        a.set_position(Point::new(4.0, 8.0));
        assert_eq!(b.snapshot().position, Point::new(4.0, 8.0));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let sprite = SpriteHandle::new();
        sprite.assign(ImageId::new(7), Size::new(32.0, 32.0));
        sprite.set_opacity(0.25);
        sprite.set_scale(Vec2::splat(0.5));

        sprite.reset();

        let state = sprite.snapshot();
        assert_eq!(state, SpriteState::default());
    }
}
