//! Sampled easing curves
//!
//! An external curve asset can drive a tween's easing by implementing
//! [`SampledCurve`]. [`KeyframeCurve`] is the built-in piecewise-linear curve.

use smallvec::SmallVec;
use std::fmt;

/// A curve sampled at normalized time
///
/// The easing adapter clamps `t` into [0, 1] before sampling.
pub trait SampledCurve: Send + Sync + fmt::Debug {
    fn sample(&self, t: f32) -> f32;
}

/// A single point on a [`KeyframeCurve`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveKey {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    pub value: f32,
}

/// Piecewise-linear curve through a set of keys
#[derive(Clone, Debug, Default)]
pub struct KeyframeCurve {
    keys: SmallVec<[CurveKey; 8]>,
}

impl KeyframeCurve {
    /// Build a curve from `(time, value)` pairs; keys are sorted by time
    pub fn new(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: SmallVec<[CurveKey; 8]> = keys
            .into_iter()
            .filter(|(time, value)| time.is_finite() && value.is_finite())
            .map(|(time, value)| CurveKey { time, value })
            .collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Add a key (builder pattern). Non-finite keys are ignored.
    pub fn key(mut self, time: f32, value: f32) -> Self {
        if !time.is_finite() || !value.is_finite() {
            return self;
        }
        let index = self.keys.partition_point(|k| k.time <= time);
        self.keys.insert(index, CurveKey { time, value });
        self
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }
}

impl SampledCurve for KeyframeCurve {
    fn sample(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return t,
        };

        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // Find surrounding keys
        let next_index = self.keys.partition_point(|k| k.time <= t);
        let (Some(prev), Some(next)) = (
            next_index.checked_sub(1).and_then(|i| self.keys.get(i)),
            self.keys.get(next_index),
        ) else {
            // Only a NaN `t` falls between no pair of keys
            return first.value;
        };

        if (next.time - prev.time).abs() < f32::EPSILON {
            return next.value;
        }

        let local = (t - prev.time) / (next.time - prev.time);
        prev.value + (next.value - prev.value) * local
    }
}
