//! Loft Animation Engine
//!
//! Animates a bounded stream of icon sprites ("balloons") that rise from the
//! bottom of a host surface along randomized cubic Bezier paths, fading and
//! scaling in as they go. Sprites are recycled, never destroyed.
//!
//! # Features
//!
//! - **Bezier Paths**: pure cubic Bezier sampling per animation tick
//! - **Motion Planning**: randomized control points and easing per flight
//! - **Two-Stage Flights**: fade/scale entrance, then path traversal
//! - **Sprite Recycling**: completed flights return handles to a pool
//! - **Cancel-All**: drains every in-flight balloon through the normal
//!   completion path
//! - **Headless**: the engine owns no paint surface; hosts implement
//!   `loft_core::FlyingSurface` and read sprite state each frame

pub mod bezier;
pub mod config;
pub mod easing;
pub mod engine;
pub mod planner;
pub mod pool;

pub use bezier::CubicBezier;
pub use config::EngineConfig;
pub use easing::Easing;
pub use engine::{BalloonEngine, EngineHandle, FlightId, SpawnError};
pub use planner::{MotionPlan, MotionPlanner};
pub use pool::RecyclePool;
