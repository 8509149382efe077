//! Tween error types

use std::io;
use thiserror::Error;

/// Errors produced outside the per-frame hot path
///
/// Spawning, cancelling and ticking never return these; the scheduler logs and
/// drops requests it cannot act on instead.
#[derive(Error, Debug)]
pub enum TweenError {
    /// A cubic bezier easing was selected without control points
    #[error("cubic bezier easing selected without control points")]
    MissingBezierPoints,

    /// Control points that cannot describe a monotonic time curve
    #[error("invalid cubic bezier control points ({x1}, {y1}), ({x2}, {y2}): x must be finite and within [0, 1]")]
    InvalidBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// A curve easing was selected without a curve to sample
    #[error("curve easing selected without a sampled curve")]
    MissingCurve,

    /// A preset name that the settings do not define
    #[error("unknown tween preset: {0}")]
    UnknownPreset(String),

    /// IO error when reading a settings file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Settings file is not valid TOML for [`crate::TweenSettings`]
    #[error("settings parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TweenError>;
