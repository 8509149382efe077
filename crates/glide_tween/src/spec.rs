//! Tween playback description
//!
//! A [`TweenSpec`] says how long a tween runs, how it wraps at its ends, which
//! easing it uses and which callbacks fire along the way. Callers build one with
//! the builder methods and hand it to the scheduler together with a strategy.

use crate::easing::{Ease, EasingSelection};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

/// Smallest duration a tween may have, in seconds
pub const MIN_DURATION: f32 = 1e-4;

/// Boundary behavior when a cycle ends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapMode {
    /// Stop at the end
    #[default]
    Once,
    /// Restart from the beginning
    Loop,
    /// Reverse direction at each end
    PingPong,
}

/// Initial playback direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayDirection {
    #[default]
    Forward,
    Backward,
}

// ============================================================================
// Owner Binding
// ============================================================================

/// Weak reference to an object whose lifetime bounds a tween or its callbacks
#[derive(Clone)]
pub struct Owner {
    inner: Weak<dyn Any + Send + Sync>,
}

impl Owner {
    pub fn new<T: Any + Send + Sync>(owner: &Arc<T>) -> Self {
        let weak: Weak<T> = Arc::downgrade(owner);
        let inner: Weak<dyn Any + Send + Sync> = weak;
        Self { inner }
    }

    /// Check if the owner is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owner")
            .field("alive", &self.is_alive())
            .finish()
    }
}

// ============================================================================
// Callbacks
// ============================================================================

/// Callback invoked with the eased progress after each apply
pub type UpdateCallback = Box<dyn FnMut(f32) + Send + Sync>;

/// Callback invoked on loop, ping-pong flip or completion
pub type EventCallback = Box<dyn FnMut() + Send + Sync>;

/// Hooks fired by a tween instance
///
/// When bound to an owner, every hook is skipped once that owner is gone.
#[derive(Default)]
pub struct TweenCallbacks {
    on_update: Option<UpdateCallback>,
    on_loop: Option<EventCallback>,
    on_ping_pong: Option<EventCallback>,
    on_complete: Option<EventCallback>,
    owner: Option<Owner>,
}

impl TweenCallbacks {
    fn live(&self) -> bool {
        self.owner.as_ref().map_or(true, Owner::is_alive)
    }

    pub(crate) fn update(&mut self, eased: f32) {
        if !self.live() {
            return;
        }
        if let Some(callback) = self.on_update.as_mut() {
            callback(eased);
        }
    }

    pub(crate) fn looped(&mut self) {
        if !self.live() {
            return;
        }
        if let Some(callback) = self.on_loop.as_mut() {
            callback();
        }
    }

    pub(crate) fn ping_ponged(&mut self) {
        if !self.live() {
            return;
        }
        if let Some(callback) = self.on_ping_pong.as_mut() {
            callback();
        }
    }

    pub(crate) fn completed(&mut self) {
        if !self.live() {
            return;
        }
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }
}

impl fmt::Debug for TweenCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenCallbacks")
            .field("on_update", &self.on_update.is_some())
            .field("on_loop", &self.on_loop.is_some())
            .field("on_ping_pong", &self.on_ping_pong.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("owner", &self.owner)
            .finish()
    }
}

// ============================================================================
// Tween Spec
// ============================================================================

/// Everything a tween instance needs besides its value strategy
///
/// # Example
///
/// ```ignore
/// use glide_tween::{Ease, TweenSpec, WrapMode};
///
/// let spec = TweenSpec::new(0.5)
///     .delay(0.1)
///     .ease(Ease::OutBack)
///     .wrap(WrapMode::PingPong)
///     .loop_count(3)
///     .on_complete(|| println!("done"));
/// ```
#[derive(Debug)]
pub struct TweenSpec {
    /// Cycle length in seconds
    pub duration: f32,
    /// Start delay in seconds
    pub delay: f32,
    /// Multiplier applied to every frame delta
    pub time_scale: f32,
    pub wrap_mode: WrapMode,
    /// Cycles (Loop) or forward-backward pairs (PingPong); 0 repeats forever
    pub loop_count: u32,
    pub direction: PlayDirection,
    pub easing: EasingSelection,
    /// Keep advancing while paused, per instance or externally
    pub tick_while_paused: bool,
    /// Advance on the unscaled frame delta
    pub unscaled_time: bool,
    /// Deactivate the tween once this owner is dropped
    pub owner: Option<Owner>,
    pub callbacks: TweenCallbacks,
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TweenSpec {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            delay: 0.0,
            time_scale: 1.0,
            wrap_mode: WrapMode::Once,
            loop_count: 0,
            direction: PlayDirection::Forward,
            easing: EasingSelection::default(),
            tick_while_paused: false,
            unscaled_time: false,
            owner: None,
            callbacks: TweenCallbacks::default(),
        }
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn wrap(mut self, mode: WrapMode) -> Self {
        self.wrap_mode = mode;
        self
    }

    /// Loop forever or `count` times
    pub fn looping(self, count: u32) -> Self {
        self.wrap(WrapMode::Loop).loop_count(count)
    }

    /// Ping-pong forever or `pairs` forward-backward pairs
    pub fn ping_pong(self, pairs: u32) -> Self {
        self.wrap(WrapMode::PingPong).loop_count(pairs)
    }

    pub fn loop_count(mut self, count: u32) -> Self {
        self.loop_count = count;
        self
    }

    pub fn direction(mut self, direction: PlayDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn reversed(self) -> Self {
        self.direction(PlayDirection::Backward)
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.easing = EasingSelection::new(ease);
        self
    }

    pub fn easing(mut self, easing: EasingSelection) -> Self {
        self.easing = easing;
        self
    }

    pub fn tick_while_paused(mut self, enabled: bool) -> Self {
        self.tick_while_paused = enabled;
        self
    }

    pub fn unscaled_time(mut self, enabled: bool) -> Self {
        self.unscaled_time = enabled;
        self
    }

    /// Tie the tween's lifetime to `owner`
    pub fn owned_by<T: Any + Send + Sync>(mut self, owner: &Arc<T>) -> Self {
        self.owner = Some(Owner::new(owner));
        self
    }

    /// Skip every callback once `owner` is dropped
    pub fn bind_callbacks<T: Any + Send + Sync>(mut self, owner: &Arc<T>) -> Self {
        self.callbacks.owner = Some(Owner::new(owner));
        self
    }

    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f32) + Send + Sync + 'static,
    {
        self.callbacks.on_update = Some(Box::new(callback));
        self
    }

    pub fn on_loop<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + Sync + 'static,
    {
        self.callbacks.on_loop = Some(Box::new(callback));
        self
    }

    pub fn on_ping_pong<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + Sync + 'static,
    {
        self.callbacks.on_ping_pong = Some(Box::new(callback));
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + Sync + 'static,
    {
        self.callbacks.on_complete = Some(Box::new(callback));
        self
    }

    /// Clamp out-of-range numbers into their valid ranges
    ///
    /// Duration at or below zero becomes [`MIN_DURATION`]; negative or
    /// non-finite delay and time scale become zero.
    pub(crate) fn sanitize(&mut self) {
        if self.duration.is_nan() || self.duration < MIN_DURATION {
            tracing::warn!(
                duration = self.duration,
                "tween duration must be positive, clamping to {}",
                MIN_DURATION
            );
            self.duration = MIN_DURATION;
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            self.delay = 0.0;
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            self.time_scale = 0.0;
        }
    }
}
