//! Balloon engine
//!
//! Orchestrates the full life of every balloon: acquire a sprite handle from
//! the recycle pool (or allocate one on a miss), plan a flight, drive the
//! two animation stages each tick, and return the handle to the pool when
//! the flight ends, naturally or by cancellation.
//!
//! The engine is headless. The host implements `FlyingSurface`, pushes its
//! measured size through `on_viewport_resize`, and drives time either by
//! calling `advance`/`tick` from its own frame clock or by starting the
//! built-in background driver.

use crate::config::EngineConfig;
use crate::easing::Easing;
use crate::planner::{MotionPlan, MotionPlanner};
use crate::pool::RecyclePool;
use loft_core::{FlyingSurface, IconCatalog, Size, SpriteHandle, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, trace};

new_key_type! {
    /// Handle to one in-flight balloon animation.
    pub struct FlightId;
}

/// Why a `spawn()` call was skipped.
///
/// Skips are benign: the effect shows one balloon fewer and nothing else
/// happens. The next spawn attempt is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("icon catalog is empty")]
    EmptyCatalog,
    #[error("viewport has not reported a nonzero size")]
    UnmeasuredViewport,
    #[error("engine has been shut down")]
    ShutDown,
}

/// Animation stage of a flight.
///
/// Completion has no variant: a finished flight leaves the registry, which
/// is what makes the terminal cleanup run exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlightStage {
    Entrance,
    Traversal,
}

/// One in-flight balloon.
struct Flight {
    sprite: SpriteHandle,
    plan: MotionPlan,
    stage: FlightStage,
    elapsed_ms: f32,
    cancelled: bool,
}

impl Flight {
    fn new(sprite: SpriteHandle, plan: MotionPlan) -> Self {
        Self {
            sprite,
            plan,
            stage: FlightStage::Entrance,
            elapsed_ms: 0.0,
            cancelled: false,
        }
    }

    /// Advance by `dt_ms`. Returns true once the flight has ended and
    /// should be reaped by the caller.
    ///
    /// A cancelled flight reports ended without touching the sprite again.
    fn step(&mut self, dt_ms: f32, config: &EngineConfig) -> bool {
        if self.cancelled {
            return true;
        }
        self.elapsed_ms += dt_ms;

        match self.stage {
            FlightStage::Entrance => {
                let t = if config.entrance_ms == 0 {
                    1.0
                } else {
                    (self.elapsed_ms / config.entrance_ms as f32).min(1.0)
                };
                let eased = Easing::default().apply(t);
                let opacity = config.entrance_opacity + (1.0 - config.entrance_opacity) * eased;
                let scale = config.entrance_scale + (1.0 - config.entrance_scale) * eased;
                self.sprite.set_opacity(opacity);
                self.sprite.set_scale(Vec2::splat(scale));

                if t >= 1.0 {
                    // Traversal starts only after the entrance fully
                    // completes; overshoot carries across the boundary.
                    self.elapsed_ms -= config.entrance_ms as f32;
                    self.stage = FlightStage::Traversal;
                    return self.apply_traversal();
                }
                false
            }
            FlightStage::Traversal => self.apply_traversal(),
        }
    }

    /// Place the sprite along the plan at the current eased fraction and
    /// fade it out as it rises.
    fn apply_traversal(&mut self) -> bool {
        let duration = self.plan.duration_ms() as f32;
        let t = if duration <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / duration).clamp(0.0, 1.0)
        };
        let fraction = self.plan.easing().apply(t);
        self.sprite.set_position(self.plan.curve().sample(fraction));
        self.sprite.set_opacity(1.0 - fraction);
        t >= 1.0
    }
}

struct EngineInner {
    flights: SlotMap<FlightId, Flight>,
    pool: Arc<RecyclePool<SpriteHandle>>,
    surface: Arc<dyn FlyingSurface>,
    catalog: IconCatalog,
    viewport: Size,
    planner: MotionPlanner,
    rng: StdRng,
    config: EngineConfig,
    last_frame: Instant,
}

/// The balloon animation engine.
///
/// Cheap to clone; clones share all state but never own the background
/// thread. Use `handle()` for call sites that must not keep the engine
/// alive.
pub struct BalloonEngine {
    inner: Arc<Mutex<EngineInner>>,
    /// Stop signal for the background driver thread.
    stop_flag: Arc<AtomicBool>,
    /// Set by the background driver whenever flights advanced; the host
    /// checks and clears it to schedule repaints.
    needs_redraw: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl BalloonEngine {
    pub fn new(surface: Arc<dyn FlyingSurface>) -> Self {
        Self::with_config(surface, EngineConfig::default())
    }

    pub fn with_config(surface: Arc<dyn FlyingSurface>, config: EngineConfig) -> Self {
        Self::build(surface, config, StdRng::from_entropy())
    }

    /// An engine whose icon choices and motion plans are fully determined
    /// by `seed`.
    pub fn seeded(surface: Arc<dyn FlyingSurface>, config: EngineConfig, seed: u64) -> Self {
        Self::build(surface, config, StdRng::seed_from_u64(seed))
    }

    fn build(surface: Arc<dyn FlyingSurface>, config: EngineConfig, rng: StdRng) -> Self {
        let pool = Arc::new(match config.pool_capacity {
            Some(capacity) => RecyclePool::bounded(capacity),
            None => RecyclePool::new(),
        });
        Self {
            inner: Arc::new(Mutex::new(EngineInner {
                flights: SlotMap::with_key(),
                pool,
                surface,
                catalog: IconCatalog::empty(),
                viewport: Size::ZERO,
                planner: MotionPlanner::with_duration(config.traversal_ms),
                rng,
                config,
                last_frame: Instant::now(),
            })),
            stop_flag: Arc::new(AtomicBool::new(false)),
            needs_redraw: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Replace the icon set wholesale, effective on the next spawn.
    pub fn set_icons(&self, catalog: IconCatalog) {
        self.inner.lock().unwrap().catalog = catalog;
    }

    /// Record the host viewport size reported by layout.
    pub fn on_viewport_resize(&self, width: f32, height: f32) {
        self.inner.lock().unwrap().viewport = Size::new(width, height);
    }

    /// Fire one balloon.
    pub fn spawn(&self) -> Result<FlightId, SpawnError> {
        Self::spawn_inner(&self.inner)
    }

    /// Cancel every in-flight balloon.
    ///
    /// Cancelled flights drain through the same completion path as natural
    /// completion (remove from surface, recycle the handle) before this
    /// call returns. Calling with nothing in flight is a no-op.
    pub fn cancel_all(&self) {
        Self::cancel_all_inner(&self.inner)
    }

    /// Advance all flights by `dt_ms` milliseconds.
    ///
    /// Returns true while any flight is still active.
    pub fn advance(&self, dt_ms: f32) -> bool {
        Self::advance_inner(&self.inner, dt_ms)
    }

    /// Advance all flights by the wall-clock time since the previous tick.
    pub fn tick(&self) -> bool {
        Self::step_clock(&self.inner)
    }

    /// Number of balloons currently in flight.
    pub fn active_count(&self) -> usize {
        self.inner.lock().unwrap().flights.len()
    }

    /// Number of sprite handles waiting in the recycle pool.
    pub fn pooled_count(&self) -> usize {
        self.inner.lock().unwrap().pool.len()
    }

    pub fn has_active_flights(&self) -> bool {
        !self.inner.lock().unwrap().flights.is_empty()
    }

    /// Check and clear the redraw flag set by the background driver.
    pub fn take_needs_redraw(&self) -> bool {
        self.needs_redraw.swap(false, Ordering::Acquire)
    }

    /// Get a weak handle for spawning from UI callbacks.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Drop pooled handles and abandon in-flight state.
    ///
    /// In-use handles are not inspected or force-completed; the host keeps
    /// whatever children it still holds.
    pub fn teardown(&self) {
        let mut guard = self.inner.lock().unwrap();
        let abandoned = guard.flights.len();
        guard.flights.clear();
        guard.pool.clear();
        if abandoned > 0 {
            debug!(abandoned, "engine torn down with flights in progress");
        }
    }

    /// Start driving ticks from a background thread at the configured FPS.
    ///
    /// The thread sets the redraw flag whenever flights advanced; the host
    /// polls it via `take_needs_redraw()`.
    pub fn start_background(&mut self) {
        if self.thread_handle.is_some() {
            return; // already running
        }

        let inner = Arc::clone(&self.inner);
        let stop_flag = Arc::clone(&self.stop_flag);
        let needs_redraw = Arc::clone(&self.needs_redraw);
        let fps = self.inner.lock().unwrap().config.target_fps.max(1);

        self.thread_handle = Some(thread::spawn(move || {
            let frame_duration = Duration::from_micros(1_000_000 / fps as u64);

            while !stop_flag.load(Ordering::Relaxed) {
                let start = Instant::now();

                if Self::step_clock(&inner) {
                    needs_redraw.store(true, Ordering::Release);
                }

                let elapsed = start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }));
    }

    /// Stop the background driver thread.
    pub fn stop_background(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        self.stop_flag.store(false, Ordering::Relaxed);
    }

    pub fn is_background_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    fn spawn_inner(inner: &Mutex<EngineInner>) -> Result<FlightId, SpawnError> {
        let (surface, sprite, id) = {
            let mut guard = inner.lock().unwrap();
            let inner = &mut *guard;

            if inner.catalog.is_empty() {
                debug!("spawn skipped: icon catalog is empty");
                return Err(SpawnError::EmptyCatalog);
            }
            if inner.viewport.is_empty() {
                debug!("spawn skipped: viewport not measured yet");
                return Err(SpawnError::UnmeasuredViewport);
            }

            let index = inner.rng.gen_range(0..inner.catalog.len());
            let icon = match inner.catalog.get(index) {
                Some(icon) => *icon,
                None => return Err(SpawnError::EmptyCatalog),
            };

            // Both dimensions follow the icon's intrinsic width; sprites
            // stay square regardless of the source art.
            let width = icon.intrinsic.width;
            let height = icon.intrinsic.width;
            let size = Size::new(width, height);

            let sprite = match inner.pool.take() {
                Some(sprite) => {
                    trace!("reusing pooled sprite handle");
                    sprite
                }
                None => {
                    trace!("allocating new sprite handle");
                    SpriteHandle::new()
                }
            };
            sprite.reset();
            sprite.assign(icon.image, size);

            let planner = inner.planner;
            let plan = planner.plan(&mut inner.rng, inner.viewport, size);

            // First frame shows the entrance start state at the path origin.
            sprite.set_position(plan.start());
            sprite.set_opacity(inner.config.entrance_opacity);
            sprite.set_scale(Vec2::splat(inner.config.entrance_scale));

            let id = inner.flights.insert(Flight::new(sprite.clone(), plan));

            // Reset the frame clock so the first tick after an idle stretch
            // does not see a huge dt.
            inner.last_frame = Instant::now();

            (inner.surface.clone(), sprite, id)
        };

        // Surface callbacks run outside the engine lock.
        surface.add_child(&sprite);
        debug!(flight = ?id, "balloon spawned");
        Ok(id)
    }

    fn advance_inner(inner: &Mutex<EngineInner>, dt_ms: f32) -> bool {
        let (surface, pool, finished, active) = {
            let mut guard = inner.lock().unwrap();
            let inner = &mut *guard;
            let config = inner.config;

            let mut done: SmallVec<[FlightId; 4]> = SmallVec::new();
            for (id, flight) in inner.flights.iter_mut() {
                if flight.step(dt_ms, &config) {
                    done.push(id);
                }
            }

            let mut finished: SmallVec<[SpriteHandle; 4]> = SmallVec::new();
            for id in done {
                if let Some(flight) = inner.flights.remove(id) {
                    finished.push(flight.sprite);
                }
            }

            (
                inner.surface.clone(),
                inner.pool.clone(),
                finished,
                !inner.flights.is_empty(),
            )
        };

        for sprite in finished {
            surface.remove_child(&sprite);
            pool.put(sprite);
            trace!("balloon recycled");
        }
        active
    }

    fn cancel_all_inner(inner: &Mutex<EngineInner>) {
        let marked = {
            let mut guard = inner.lock().unwrap();
            let mut marked = 0usize;
            for (_, flight) in guard.flights.iter_mut() {
                flight.cancelled = true;
                marked += 1;
            }
            marked
        };
        if marked == 0 {
            return;
        }

        // Cancelled flights drain through the normal completion path.
        Self::advance_inner(inner, 0.0);
        debug!(count = marked, "cancelled in-flight balloons");
    }

    fn step_clock(inner: &Mutex<EngineInner>) -> bool {
        let dt_ms = {
            let mut guard = inner.lock().unwrap();
            let now = Instant::now();
            let dt = (now - guard.last_frame).as_secs_f32() * 1000.0;
            guard.last_frame = now;
            dt
        };
        Self::advance_inner(inner, dt_ms)
    }
}

impl Clone for BalloonEngine {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            stop_flag: Arc::clone(&self.stop_flag),
            needs_redraw: Arc::clone(&self.needs_redraw),
            // Clones never own the background thread.
            thread_handle: None,
        }
    }
}

impl Drop for BalloonEngine {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            self.stop_background();
        }
    }
}

/// A weak handle to the engine.
///
/// Lets UI callbacks fire balloons without keeping the engine alive; every
/// operation is a safe no-op once the engine is dropped.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Weak<Mutex<EngineInner>>,
}

impl EngineHandle {
    pub fn spawn(&self) -> Result<FlightId, SpawnError> {
        match self.inner.upgrade() {
            Some(inner) => BalloonEngine::spawn_inner(&inner),
            None => Err(SpawnError::ShutDown),
        }
    }

    pub fn cancel_all(&self) {
        if let Some(inner) = self.inner.upgrade() {
            BalloonEngine::cancel_all_inner(&inner);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
