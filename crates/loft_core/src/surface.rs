//! Surface boundary
//!
//! The host container is an external collaborator: it owns the real paint
//! surface, measures itself, and reports its size to the engine via
//! `on_viewport_resize`. The engine only needs to attach and detach sprite
//! children, which this trait expresses.

use crate::sprite::SpriteHandle;

/// Host viewport that sprites fly across.
///
/// Implementations must tolerate being called from the engine's tick
/// context (which may be a background thread) and must not call back into
/// the engine from within these methods.
pub trait FlyingSurface: Send + Sync {
    /// Make the sprite a visible child of the surface.
    fn add_child(&self, sprite: &SpriteHandle);

    /// Detach the sprite from the surface.
    ///
    /// Called with handles previously passed to `add_child`; removing an
    /// unknown handle must be a no-op.
    fn remove_child(&self, sprite: &SpriteHandle);
}
