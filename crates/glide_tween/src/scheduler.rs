//! Tween scheduler
//!
//! Producers on any thread spawn, cancel, pause and resume tweens by pushing
//! commands; the owning thread drains the queue and advances every live tween
//! once per frame.
//!
//! Producers never touch the live pool. Only [`TweenScheduler::is_active`]
//! reads it, behind a reader/writer lock.
//!
//! Callbacks run on the ticking thread while the pool is write-locked. They may
//! spawn, cancel, pause or resume (those only enqueue), but must not call
//! `is_active` on the scheduler that is ticking them.

use crate::command::{Command, CommandQueue, TweenHandle};
use crate::config::SchedulerConfig;
use crate::easing::Evaluator;
use crate::pool::TweenPool;
use crate::spec::TweenSpec;
use crate::values::TweenStrategy;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Predicate deciding whether a tick should advance anything
pub type AdvanceGate = Box<dyn Fn() -> bool + Send + Sync>;

struct SchedulerShared {
    commands: CommandQueue,
    pool: RwLock<TweenPool>,
}

impl SchedulerShared {
    fn spawn(&self, spec: TweenSpec, strategy: Option<Box<dyn TweenStrategy>>) -> TweenHandle {
        let handle = TweenHandle::next();
        self.commands.push(Command::Spawn {
            handle,
            spec,
            strategy,
        });
        handle
    }

    fn cancel(&self, handle: TweenHandle, apply_final: bool) {
        if !handle.is_valid() {
            tracing::trace!("cancel ignored for invalid handle");
            return;
        }
        self.commands.push(Command::Cancel {
            handle,
            apply_final,
        });
    }

    fn pause(&self, handle: TweenHandle) {
        if !handle.is_valid() {
            tracing::trace!("pause ignored for invalid handle");
            return;
        }
        self.commands.push(Command::Pause(handle));
    }

    fn resume(&self, handle: TweenHandle) {
        if !handle.is_valid() {
            tracing::trace!("resume ignored for invalid handle");
            return;
        }
        self.commands.push(Command::Resume(handle));
    }

    fn is_active(&self, handle: TweenHandle) -> bool {
        handle.is_valid() && self.pool.read().is_active(handle)
    }
}

/// Owns the live tweens and advances them once per frame
///
/// # Example
///
/// ```ignore
/// use glide_tween::{FloatTween, TweenScheduler, TweenSpec};
///
/// let scheduler = TweenScheduler::new();
/// let handle = scheduler.spawn(
///     TweenSpec::new(0.3),
///     FloatTween::new(0.0, 1.0, |v| println!("opacity {v}")),
/// );
///
/// // Once per frame
/// scheduler.tick(1.0 / 60.0);
/// ```
pub struct TweenScheduler {
    shared: Arc<SchedulerShared>,
    should_advance: Option<AdvanceGate>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Create a scheduler whose pool is pre-sized from `config`
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            shared: Arc::new(SchedulerShared {
                commands: CommandQueue::new(),
                pool: RwLock::new(TweenPool::with_capacity(config.initial_capacity)),
            }),
            should_advance: None,
        }
    }

    /// A weak, cloneable producer handle for other threads
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Only advance while `gate` returns true
    pub fn set_advance_gate<F>(&mut self, gate: F)
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.should_advance = Some(Box::new(gate));
    }

    pub fn clear_advance_gate(&mut self) {
        self.should_advance = None;
    }

    // =========================================================================
    // Producer Operations
    // =========================================================================

    /// Queue a tween; the handle is valid immediately, the tween goes live on
    /// the next tick.
    pub fn spawn<S>(&self, spec: TweenSpec, strategy: S) -> TweenHandle
    where
        S: TweenStrategy + 'static,
    {
        self.shared.spawn(spec, Some(Box::new(strategy)))
    }

    /// Queue a tween with an already boxed strategy.
    ///
    /// A missing strategy still yields a handle; the spawn is dropped with a
    /// warning when the queue is drained.
    pub fn spawn_boxed(
        &self,
        spec: TweenSpec,
        strategy: Option<Box<dyn TweenStrategy>>,
    ) -> TweenHandle {
        self.shared.spawn(spec, strategy)
    }

    pub fn cancel(&self, handle: TweenHandle, apply_final: bool) {
        self.shared.cancel(handle, apply_final);
    }

    pub fn pause(&self, handle: TweenHandle) {
        self.shared.pause(handle);
    }

    pub fn resume(&self, handle: TweenHandle) {
        self.shared.resume(handle);
    }

    /// Whether `handle` names a live tween. Queued spawns are not live yet.
    ///
    /// Takes the pool's read lock. Calling it from a tween callback of this
    /// scheduler deadlocks, since the tick holds the write lock.
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.shared.is_active(handle)
    }

    // =========================================================================
    // Consumer Operations
    // =========================================================================

    /// Tick all tweens with the same delta for scaled and unscaled time
    ///
    /// Returns true if any tweens are still active.
    pub fn tick(&self, delta: f32) -> bool {
        self.advance(delta, delta, false)
    }

    /// Drain queued commands, then advance every live tween.
    ///
    /// Tweens flagged `unscaled_time` receive `unscaled_delta`, the rest
    /// `scaled_delta`. While `externally_paused` only tweens flagged
    /// `tick_while_paused` advance.
    pub fn advance(&self, unscaled_delta: f32, scaled_delta: f32, externally_paused: bool) -> bool {
        if let Some(gate) = &self.should_advance {
            if !gate() {
                return self.shared.pool.read().active_count() > 0;
            }
        }

        let mut pool = self.shared.pool.write();
        Self::apply_commands(&mut pool, self.shared.commands.drain());
        pool.promote_pending();

        pool.advance(|instance| {
            if externally_paused && !instance.spec().tick_while_paused {
                return instance.is_active();
            }
            let delta = if instance.spec().unscaled_time {
                unscaled_delta
            } else {
                scaled_delta
            };
            instance.tick(delta)
        })
    }

    /// Drain queued commands without advancing time
    pub fn process_commands(&self) {
        let mut pool = self.shared.pool.write();
        Self::apply_commands(&mut pool, self.shared.commands.drain());
        pool.promote_pending();
    }

    fn apply_commands(pool: &mut TweenPool, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Spawn {
                    handle,
                    spec,
                    strategy,
                } => {
                    let Some(strategy) = strategy else {
                        tracing::warn!(%handle, "spawn dropped: no value strategy");
                        continue;
                    };
                    let evaluator = match Evaluator::from_selection(&spec.easing) {
                        Ok(evaluator) => evaluator,
                        Err(err) => {
                            tracing::warn!(%handle, error = %err, "spawn dropped: bad easing");
                            continue;
                        }
                    };
                    tracing::debug!(%handle, duration = spec.duration, "tween spawned");
                    pool.create(handle, spec, strategy, evaluator);
                }
                Command::Cancel {
                    handle,
                    apply_final,
                } => match pool.find_mut(handle) {
                    Some(instance) => instance.cancel(apply_final),
                    None => tracing::trace!(%handle, "cancel ignored, tween not live"),
                },
                Command::Pause(handle) => {
                    if let Some(instance) = pool.find_mut(handle) {
                        instance.set_paused(true);
                    }
                }
                Command::Resume(handle) => {
                    if let Some(instance) = pool.find_mut(handle) {
                        instance.set_paused(false);
                    }
                }
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of live tweens (active or awaiting activation)
    pub fn live_count(&self) -> usize {
        self.shared.pool.read().live_count()
    }

    pub fn has_active_tweens(&self) -> bool {
        self.live_count() > 0
    }

    /// Commands queued since the last drain
    pub fn pending_commands(&self) -> usize {
        self.shared.commands.len()
    }

    /// Cancel every live tween without applying final values, then drop the
    /// pool and any unprocessed commands
    pub fn shutdown(&self) {
        let discarded = self.shared.commands.drain().len();
        let mut pool = self.shared.pool.write();
        let live = pool.live_count();
        pool.cancel_all(false);
        pool.clear();
        if live > 0 || discarded > 0 {
            tracing::debug!(live, discarded, "tween scheduler shut down");
        }
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TweenScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A weak handle to the tween scheduler
///
/// Safe to clone and send to producer threads. It won't keep the scheduler
/// alive; once the scheduler is gone, spawns return [`TweenHandle::INVALID`]
/// and everything else is a no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    shared: Weak<SchedulerShared>,
}

impl SchedulerHandle {
    pub fn spawn<S>(&self, spec: TweenSpec, strategy: S) -> TweenHandle
    where
        S: TweenStrategy + 'static,
    {
        self.spawn_boxed(spec, Some(Box::new(strategy)))
    }

    pub fn spawn_boxed(
        &self,
        spec: TweenSpec,
        strategy: Option<Box<dyn TweenStrategy>>,
    ) -> TweenHandle {
        match self.shared.upgrade() {
            Some(shared) => shared.spawn(spec, strategy),
            None => TweenHandle::INVALID,
        }
    }

    pub fn cancel(&self, handle: TweenHandle, apply_final: bool) {
        if let Some(shared) = self.shared.upgrade() {
            shared.cancel(handle, apply_final);
        }
    }

    pub fn pause(&self, handle: TweenHandle) {
        if let Some(shared) = self.shared.upgrade() {
            shared.pause(handle);
        }
    }

    pub fn resume(&self, handle: TweenHandle) {
        if let Some(shared) = self.shared.upgrade() {
            shared.resume(handle);
        }
    }

    /// Whether `handle` names a live tween; false once the scheduler is gone.
    ///
    /// Safe from any thread except inside a callback of the scheduler being
    /// ticked, where the pool is write-locked and this call would deadlock.
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.shared
            .upgrade()
            .is_some_and(|shared| shared.is_active(handle))
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
