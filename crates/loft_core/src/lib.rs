//! Loft Core Types
//!
//! Foundational value types shared by the Loft effect crates:
//!
//! - **Geometry**: `Point`, `Size`, `Vec2` primitives
//! - **Icon Catalog**: opaque drawable references with intrinsic dimensions
//! - **Sprite Handles**: shared, recyclable handles to animated sprites
//! - **Surface Boundary**: the `FlyingSurface` trait implemented by hosts
//!
//! This crate carries no animation logic; the engine lives in
//! `loft_animation` and drives sprites through the handles defined here.

pub mod geometry;
pub mod icon;
pub mod sprite;
pub mod surface;

pub use geometry::{Point, Size, Vec2};
pub use icon::{Icon, IconCatalog, ImageId};
pub use sprite::{SpriteHandle, SpriteState};
pub use surface::FlyingSurface;
