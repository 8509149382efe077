//! Recycling tween pool
//!
//! Instances live in one of three buckets: pending activation (created during
//! the current command drain), active (advanced every tick) and recycled
//! (free slots kept warm for the next spawn). Deactivated instances go back to
//! the recycled bucket instead of being freed.

use crate::command::TweenHandle;
use crate::easing::Evaluator;
use crate::instance::TweenInstance;
use crate::spec::TweenSpec;
use crate::values::TweenStrategy;

#[derive(Debug, Default)]
pub struct TweenPool {
    active: Vec<TweenInstance>,
    pending: Vec<TweenInstance>,
    recycled: Vec<TweenInstance>,
    /// Live instances the pool expects to hold; exceeding it logs a warning
    capacity: usize,
}

impl TweenPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut pool = Self::new();
        pool.ensure_capacity(capacity);
        pool
    }

    /// Pre-allocate enough free slots to hold `capacity` live tweens
    pub fn ensure_capacity(&mut self, capacity: usize) {
        self.capacity = self.capacity.max(capacity);
        let live = self.live_count();
        let wanted = capacity.saturating_sub(live);
        if self.recycled.len() < wanted {
            self.recycled.reserve(wanted - self.recycled.len());
            self.recycled.resize_with(wanted, TweenInstance::vacant);
        }
        self.active.reserve(capacity.saturating_sub(self.active.len()));
    }

    /// Create an instance in the pending bucket, reusing a free slot if any
    pub fn create(
        &mut self,
        handle: TweenHandle,
        spec: TweenSpec,
        strategy: Box<dyn TweenStrategy>,
        evaluator: Evaluator,
    ) {
        let instance = match self.recycled.pop() {
            Some(mut slot) => {
                slot.reset(handle, spec, strategy, evaluator);
                slot
            }
            None => {
                if self.capacity > 0 && self.live_count() >= self.capacity {
                    tracing::warn!(
                        live = self.live_count(),
                        capacity = self.capacity,
                        "tween pool exhausted, allocating past reserved capacity"
                    );
                    self.capacity *= 2;
                }
                TweenInstance::new(handle, spec, strategy, evaluator)
            }
        };
        self.pending.push(instance);
    }

    /// Move pending instances into the active bucket and start them.
    ///
    /// Instances cancelled before activation go straight to the free list.
    pub fn promote_pending(&mut self) {
        for mut instance in self.pending.drain(..) {
            if instance.is_active() {
                instance.start();
                self.active.push(instance);
            } else {
                instance.release();
                self.recycled.push(instance);
            }
        }
    }

    /// Run `step` over every active instance in reverse order, recycling the
    /// ones it reports inactive.
    pub fn advance<F>(&mut self, mut step: F) -> bool
    where
        F: FnMut(&mut TweenInstance) -> bool,
    {
        let mut index = self.active.len();
        while index > 0 {
            index -= 1;
            if !step(&mut self.active[index]) {
                let mut finished = self.active.swap_remove(index);
                finished.release();
                self.recycled.push(finished);
            }
        }
        !self.active.is_empty()
    }

    /// Find a live instance (active or pending) by handle
    pub fn find_mut(&mut self, handle: TweenHandle) -> Option<&mut TweenInstance> {
        self.active
            .iter_mut()
            .chain(self.pending.iter_mut())
            .find(|instance| instance.handle() == handle)
    }

    pub fn find(&self, handle: TweenHandle) -> Option<&TweenInstance> {
        self.active
            .iter()
            .chain(self.pending.iter())
            .find(|instance| instance.handle() == handle)
    }

    /// Whether `handle` names a live, still-playing tween
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.find(handle).is_some_and(TweenInstance::is_active)
    }

    /// Cancel every live instance and recycle them all
    pub fn cancel_all(&mut self, apply_final: bool) {
        for instance in self.active.iter_mut().chain(self.pending.iter_mut()) {
            instance.cancel(apply_final);
        }
        let finished: Vec<_> = self.active.drain(..).chain(self.pending.drain(..)).collect();
        for mut instance in finished {
            instance.release();
            self.recycled.push(instance);
        }
    }

    /// Drop every instance, free slots included
    pub fn clear(&mut self) {
        self.active.clear();
        self.pending.clear();
        self.recycled.clear();
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn recycled_count(&self) -> usize {
        self.recycled.len()
    }

    pub fn live_count(&self) -> usize {
        self.active.len() + self.pending.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
