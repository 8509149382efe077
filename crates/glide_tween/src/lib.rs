//! Glide Tween Engine
//!
//! Duration-based tweens driven by a command-queued scheduler.
//!
//! # Features
//!
//! - **Easing**: closed-form families (polynomial, sine, expo, circ, elastic,
//!   bounce, back, stepped, smoothstep), CSS-style cubic bezier and sampled curves
//! - **Value Strategies**: typed interpolation for floats, vectors, quaternions,
//!   Euler rotations, transforms and colors
//! - **Wrap Modes**: once, loop and ping-pong with loop counts, delays, time scale
//!   and reverse playback
//! - **Frame-Stall Safe**: one large delta crosses as many cycle boundaries as it
//!   covers, firing every loop and ping-pong callback in order
//! - **Thread-Safe Intake**: spawn, cancel, pause and resume from any thread;
//!   the owning thread drains commands and ticks
//! - **Recycling Pool**: finished tweens return to a free list
//! - **Presets**: TOML settings with reusable named tween specs
//!
//! # Example
//!
//! ```rust
//! use glide_tween::{Ease, FloatTween, TweenScheduler, TweenSpec};
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! let opacity = Arc::new(Mutex::new(0.0_f32));
//! let scheduler = TweenScheduler::new();
//! let handle = scheduler.spawn(
//!     TweenSpec::new(0.5).ease(Ease::OutCubic),
//!     FloatTween::shared(0.0, 1.0, opacity.clone()),
//! );
//!
//! scheduler.tick(0.25);
//! assert!(scheduler.is_active(handle));
//! scheduler.tick(0.25);
//! assert_eq!(*opacity.lock(), 1.0);
//! ```

pub mod command;
pub mod config;
pub mod curve;
pub mod easing;
pub mod error;
pub mod instance;
pub mod pool;
pub mod scheduler;
pub mod spec;
pub mod values;

pub use command::TweenHandle;
pub use config::{SchedulerConfig, TweenPreset, TweenSettings};
pub use curve::{CurveKey, KeyframeCurve, SampledCurve};
pub use easing::{ease, ease_with_params, CubicBezier, Ease, EasingSelection, Evaluator};
pub use error::{Result, TweenError};
pub use instance::TweenInstance;
pub use scheduler::{AdvanceGate, SchedulerHandle, TweenScheduler};
pub use spec::{Owner, PlayDirection, TweenCallbacks, TweenSpec, WrapMode, MIN_DURATION};
pub use values::{
    ColorTween, EulerRotation, EulerTween, FloatTween, Interpolate, QuatTween, TransformTween,
    TweenStrategy, ValueStrategy, Vec2Tween, Vec3Tween,
};

pub use glide_core::{Color, Quat, Transform, Vec2, Vec3};
