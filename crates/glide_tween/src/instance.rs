//! Tween instance state machine
//!
//! One instance plays one tween: it waits out the start delay, advances its
//! cycle time, evaluates the easing and hands the eased progress to its value
//! strategy. Boundary crossings are resolved one at a time, so a single large
//! delta (after a frame stall, say) can run through several loop or ping-pong
//! cycles and still land on the right mid-cycle position.
//!
//! ```text
//! Created ──first tick──▶ Initialized ──▶ Delaying ──▶ Running ──▶ Completed
//!                                  (Paused is orthogonal; Cancel ends any state)
//! ```

use crate::command::TweenHandle;
use crate::easing::{EasingSelection, Evaluator};
use crate::spec::{PlayDirection, TweenCallbacks, TweenSpec, WrapMode};
use crate::values::TweenStrategy;

/// Remaining time below this is treated as fully consumed
const TIME_EPSILON: f32 = 1e-6;

/// Whole cycles an endless tween resolves one by one in a single tick.
/// Beyond this the surplus cycles are skipped without callbacks.
const MAX_CROSSINGS_PER_TICK: f32 = 65_536.0;

/// A live tween
pub struct TweenInstance {
    handle: TweenHandle,
    spec: TweenSpec,
    strategy: Option<Box<dyn TweenStrategy>>,
    evaluator: Option<Evaluator>,
    delay_remaining: f32,
    cycle_time: f32,
    completed_cycles: u32,
    completed_pairs: u32,
    active: bool,
    paused: bool,
    initialized: bool,
    playing_forward: bool,
}

impl TweenInstance {
    pub fn new(
        handle: TweenHandle,
        mut spec: TweenSpec,
        strategy: Box<dyn TweenStrategy>,
        evaluator: Evaluator,
    ) -> Self {
        spec.sanitize();
        let mut instance = Self {
            handle,
            spec,
            strategy: Some(strategy),
            evaluator: Some(evaluator),
            delay_remaining: 0.0,
            cycle_time: 0.0,
            completed_cycles: 0,
            completed_pairs: 0,
            active: true,
            paused: false,
            initialized: false,
            playing_forward: true,
        };
        instance.start();
        instance
    }

    /// An inactive placeholder holding no strategy, used to pre-fill pools
    pub(crate) fn vacant() -> Self {
        Self {
            handle: TweenHandle::INVALID,
            spec: TweenSpec::default(),
            strategy: None,
            evaluator: None,
            delay_remaining: 0.0,
            cycle_time: 0.0,
            completed_cycles: 0,
            completed_pairs: 0,
            active: false,
            paused: false,
            initialized: false,
            playing_forward: true,
        }
    }

    /// Reuse this slot for a new tween
    pub(crate) fn reset(
        &mut self,
        handle: TweenHandle,
        spec: TweenSpec,
        strategy: Box<dyn TweenStrategy>,
        evaluator: Evaluator,
    ) {
        *self = Self::new(handle, spec, strategy, evaluator);
    }

    /// Compute the initial playback state: delay, cycle time, direction.
    ///
    /// Leaves the active and paused flags alone, so commands applied before
    /// activation survive.
    pub fn start(&mut self) {
        self.delay_remaining = self.spec.delay;
        self.playing_forward = self.spec.direction != PlayDirection::Backward;
        self.cycle_time = self.cycle_start();
        self.completed_cycles = 0;
        self.completed_pairs = 0;
        self.initialized = false;
    }

    /// Deactivate and drop the strategy, evaluator and callbacks
    pub(crate) fn release(&mut self) {
        self.active = false;
        self.strategy = None;
        self.evaluator = None;
        self.spec.callbacks = TweenCallbacks::default();
        self.spec.easing = EasingSelection::default();
        self.spec.owner = None;
    }

    pub fn handle(&self) -> TweenHandle {
        self.handle
    }

    pub fn spec(&self) -> &TweenSpec {
        &self.spec
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_playing_forward(&self) -> bool {
        self.playing_forward
    }

    /// Time still to wait before playback starts, in seconds
    pub fn delay_remaining(&self) -> f32 {
        self.delay_remaining
    }

    /// Elapsed time within the current cycle, in [0, duration]
    pub fn cycle_time(&self) -> f32 {
        self.cycle_time
    }

    /// Normalized position in the current cycle (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        (self.cycle_time / self.spec.duration).clamp(0.0, 1.0)
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn completed_pairs(&self) -> u32 {
        self.completed_pairs
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance by `delta` seconds; returns whether the tween is still active
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }
        if self.paused && !self.spec.tick_while_paused {
            return self.active;
        }
        if self.strategy.is_none() || self.evaluator.is_none() {
            return self.active;
        }

        if let Some(owner) = &self.spec.owner {
            if !owner.is_alive() {
                tracing::debug!(handle = %self.handle, "tween owner dropped, deactivating");
                self.release();
                return false;
            }
        }

        if !self.initialized {
            self.initialized = true;
            if let Some(strategy) = self.strategy.as_mut() {
                strategy.initialize();
                if !self.playing_forward {
                    strategy.apply_final();
                }
            }
        }

        // NaN and negative deltas advance nothing
        let mut remaining = delta.max(0.0) * self.spec.time_scale;
        if !remaining.is_finite() {
            tracing::warn!(
                handle = %self.handle,
                delta,
                time_scale = self.spec.time_scale,
                "non-finite tween delta ignored"
            );
            return true;
        }
        if remaining <= TIME_EPSILON {
            return true;
        }

        if self.delay_remaining > 0.0 {
            if remaining < self.delay_remaining {
                self.delay_remaining -= remaining;
                return true;
            }
            remaining -= self.delay_remaining;
            self.delay_remaining = 0.0;
        }

        let duration = self.spec.duration;
        remaining = self.skip_surplus_cycles(remaining);

        let mut stalled = 0;
        while remaining > TIME_EPSILON && self.active {
            let to_boundary = if self.playing_forward {
                duration - self.cycle_time
            } else {
                self.cycle_time
            };

            if remaining < to_boundary {
                let next = if self.playing_forward {
                    self.cycle_time + remaining
                } else {
                    self.cycle_time - remaining
                };
                self.cycle_time = next.clamp(0.0, duration);
                self.apply_at(self.cycle_time);
                break;
            }

            let before = remaining;
            remaining -= to_boundary;
            self.cycle_time = if self.playing_forward { duration } else { 0.0 };
            self.apply_at(self.cycle_time);
            self.handle_boundary();

            // f32 can absorb a step once remaining dwarfs the duration
            stalled = if remaining < before { 0 } else { stalled + 1 };
            if stalled > 1 && self.spec.loop_count == 0 {
                tracing::warn!(handle = %self.handle, remaining, "tween advance stalled");
                break;
            }
        }

        self.active
    }

    /// Stop playback. Idempotent: a second call does nothing.
    pub fn cancel(&mut self, apply_final: bool) {
        if !self.active {
            return;
        }
        if apply_final {
            if let Some(strategy) = self.strategy.as_mut() {
                strategy.apply_final();
            }
        }
        self.spec.callbacks.completed();
        self.active = false;
    }

    /// Drop whole periods of an endless loop or ping-pong from `remaining`.
    ///
    /// A whole period returns playback to the same position and direction, so
    /// only the counters move. Callbacks for skipped cycles do not fire.
    fn skip_surplus_cycles(&mut self, remaining: f32) -> f32 {
        if self.spec.loop_count > 0 {
            return remaining;
        }
        let period = match self.spec.wrap_mode {
            WrapMode::Once => return remaining,
            WrapMode::Loop => self.spec.duration,
            WrapMode::PingPong => self.spec.duration * 2.0,
        };
        let periods = remaining / period;
        if periods <= MAX_CROSSINGS_PER_TICK {
            return remaining;
        }

        // `as` saturates at u32::MAX
        let skipped = periods.floor() as u32;
        match self.spec.wrap_mode {
            WrapMode::Loop => {
                self.completed_cycles = self.completed_cycles.saturating_add(skipped);
            }
            _ => self.completed_pairs = self.completed_pairs.saturating_add(skipped),
        }
        tracing::debug!(handle = %self.handle, skipped, "skipped surplus tween cycles");
        remaining % period
    }

    fn cycle_start(&self) -> f32 {
        if self.spec.direction == PlayDirection::Backward {
            self.spec.duration
        } else {
            0.0
        }
    }

    fn apply_at(&mut self, cycle_time: f32) {
        let alpha = (cycle_time / self.spec.duration).clamp(0.0, 1.0);
        let Some(evaluator) = self.evaluator.as_ref() else {
            return;
        };
        let eased = evaluator.evaluate(alpha);
        if let Some(strategy) = self.strategy.as_mut() {
            strategy.apply(eased);
        }
        self.spec.callbacks.update(eased);
    }

    fn handle_boundary(&mut self) {
        match self.spec.wrap_mode {
            WrapMode::Once => self.complete(),
            WrapMode::Loop => {
                self.completed_cycles = self.completed_cycles.saturating_add(1);
                if self.spec.loop_count > 0 && self.completed_cycles >= self.spec.loop_count {
                    self.complete();
                } else {
                    self.spec.callbacks.looped();
                    self.playing_forward = self.spec.direction != PlayDirection::Backward;
                    self.cycle_time = self.cycle_start();
                }
            }
            WrapMode::PingPong => {
                self.playing_forward = !self.playing_forward;
                self.spec.callbacks.ping_ponged();

                let back_to_initial =
                    self.playing_forward == (self.spec.direction != PlayDirection::Backward);
                if back_to_initial {
                    self.completed_pairs = self.completed_pairs.saturating_add(1);
                    if self.spec.loop_count > 0 && self.completed_pairs >= self.spec.loop_count {
                        self.complete();
                        return;
                    }
                }
                self.cycle_time = if self.playing_forward {
                    0.0
                } else {
                    self.spec.duration
                };
            }
        }
    }

    /// Settle on the end value, then finish
    fn complete(&mut self) {
        if let Some(strategy) = self.strategy.as_mut() {
            strategy.apply_final();
        }
        self.spec.callbacks.completed();
        self.active = false;
        tracing::debug!(handle = %self.handle, "tween completed");
    }
}

impl std::fmt::Debug for TweenInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenInstance")
            .field("handle", &self.handle)
            .field("active", &self.active)
            .field("paused", &self.paused)
            .field("cycle_time", &self.cycle_time)
            .field("delay_remaining", &self.delay_remaining)
            .field("playing_forward", &self.playing_forward)
            .finish()
    }
}
