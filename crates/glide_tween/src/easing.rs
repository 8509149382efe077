//! Easing functions for tweens
//!
//! Maps normalized time in [0, 1] to eased progress. Most curves stay inside
//! [0, 1]; the elastic and back families overshoot on purpose.
//!
//! Three implementations sit behind [`Evaluator`]:
//! - closed-form families selected by an [`Ease`] tag,
//! - a CSS-style [`CubicBezier`],
//! - an injected [`SampledCurve`].

use crate::curve::SampledCurve;
use crate::error::{Result, TweenError};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::sync::Arc;

const BACK_OVERSHOOT: f32 = 1.70158;
const BACK_IN_OUT_SCALE: f32 = 1.525;
const ELASTIC_AMPLITUDE: f32 = 1.0;
const ELASTIC_PERIOD: f32 = 0.3;
const ELASTIC_IN_OUT_PERIOD: f32 = 0.45;
const DEFAULT_STEPS: f32 = 4.0;

const BOUNCE_SCALE: f32 = 7.5625;
const BOUNCE_DIVISOR: f32 = 2.75;

const BEZIER_NEWTON_ITERATIONS: usize = 8;
const BEZIER_BISECTION_ITERATIONS: usize = 24;
const BEZIER_EPSILON: f64 = 1e-6;
const BEZIER_MIN_SLOPE: f64 = 1e-6;

/// Easing family tag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    #[default]
    Linear,
    SmoothStep,
    Stepped,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
    InBack,
    OutBack,
    InOutBack,
    /// Custom cubic bezier; control points come from [`EasingSelection`]
    CubicBezier,
    /// External sampled curve; the curve comes from [`EasingSelection`]
    Curve,
}

impl Ease {
    /// Every family with a closed-form implementation
    pub const CLOSED_FORM: [Ease; 33] = [
        Ease::Linear,
        Ease::SmoothStep,
        Ease::Stepped,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InQuint,
        Ease::OutQuint,
        Ease::InOutQuint,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
        Ease::InCirc,
        Ease::OutCirc,
        Ease::InOutCirc,
        Ease::InElastic,
        Ease::OutElastic,
        Ease::InOutElastic,
        Ease::InBounce,
        Ease::OutBounce,
        Ease::InOutBounce,
        Ease::InBack,
        Ease::OutBack,
        Ease::InOutBack,
    ];

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(self, t: f32) -> f32 {
        ease(t, self)
    }
}

/// Evaluate a closed-form easing family with its default parameters.
///
/// [`Ease::CubicBezier`] and [`Ease::Curve`] need data this tag does not
/// carry and evaluate as linear here; build an [`Evaluator`] for those.
pub fn ease(t: f32, ease: Ease) -> f32 {
    match ease {
        Ease::Linear | Ease::CubicBezier | Ease::Curve => t,
        Ease::SmoothStep => smoothstep(t, 0.0, 1.0),
        Ease::Stepped => stepped(t, DEFAULT_STEPS),

        Ease::InSine => 1.0 - (t * PI / 2.0).cos(),
        Ease::OutSine => (t * PI / 2.0).sin(),
        Ease::InOutSine => -((PI * t).cos() - 1.0) / 2.0,

        Ease::InQuad => t * t,
        Ease::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        Ease::InOutQuad => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }

        Ease::InCubic => t * t * t,
        Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
        Ease::InOutCubic => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }

        Ease::InQuart => t * t * t * t,
        Ease::OutQuart => 1.0 - (1.0 - t).powi(4),
        Ease::InOutQuart => {
            if t < 0.5 {
                8.0 * t * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
            }
        }

        Ease::InQuint => t * t * t * t * t,
        Ease::OutQuint => 1.0 - (1.0 - t).powi(5),
        Ease::InOutQuint => {
            if t < 0.5 {
                16.0 * t * t * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
            }
        }

        Ease::InExpo => {
            if t <= 0.0 {
                0.0
            } else {
                2f32.powf(10.0 * t - 10.0)
            }
        }
        Ease::OutExpo => {
            if t >= 1.0 {
                1.0
            } else {
                1.0 - 2f32.powf(-10.0 * t)
            }
        }
        Ease::InOutExpo => {
            if t <= 0.0 {
                0.0
            } else if t >= 1.0 {
                1.0
            } else if t < 0.5 {
                2f32.powf(20.0 * t - 10.0) / 2.0
            } else {
                (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
            }
        }

        Ease::InCirc => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
        Ease::OutCirc => (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt(),
        Ease::InOutCirc => {
            if t < 0.5 {
                (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
            } else {
                ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
            }
        }

        Ease::InElastic => elastic_in(t, ELASTIC_AMPLITUDE, ELASTIC_PERIOD),
        Ease::OutElastic => elastic_out(t, ELASTIC_AMPLITUDE, ELASTIC_PERIOD),
        Ease::InOutElastic => elastic_in_out(t, ELASTIC_AMPLITUDE, ELASTIC_IN_OUT_PERIOD),

        Ease::InBounce => bounce_in(t),
        Ease::OutBounce => bounce_out(t),
        Ease::InOutBounce => bounce_in_out(t),

        Ease::InBack => back_in(t, BACK_OVERSHOOT),
        Ease::OutBack => back_out(t, BACK_OVERSHOOT),
        Ease::InOutBack => back_in_out(t, BACK_OVERSHOOT),
    }
}

/// Evaluate a family with explicit parameters.
///
/// `p1 == 0 && p2 == 0` is exactly [`ease`]. Otherwise:
/// - elastic: `p1` amplitude, `p2` period (a zero keeps that default)
/// - back: `p1` overshoot
/// - stepped: `p1` step count
/// - smoothstep: `p1`, `p2` lower and upper edge
///
/// Every other family ignores the parameters.
pub fn ease_with_params(t: f32, family: Ease, p1: f32, p2: f32) -> f32 {
    if p1 == 0.0 && p2 == 0.0 {
        return ease(t, family);
    }

    match family {
        Ease::InElastic => elastic_in(
            t,
            or_default(p1, ELASTIC_AMPLITUDE),
            elastic_period(p2, ELASTIC_PERIOD),
        ),
        Ease::OutElastic => elastic_out(
            t,
            or_default(p1, ELASTIC_AMPLITUDE),
            elastic_period(p2, ELASTIC_PERIOD),
        ),
        Ease::InOutElastic => elastic_in_out(
            t,
            or_default(p1, ELASTIC_AMPLITUDE),
            elastic_period(p2, ELASTIC_IN_OUT_PERIOD),
        ),
        Ease::InBack => back_in(t, or_default(p1, BACK_OVERSHOOT)),
        Ease::OutBack => back_out(t, or_default(p1, BACK_OVERSHOOT)),
        Ease::InOutBack => back_in_out(t, or_default(p1, BACK_OVERSHOOT)),
        Ease::Stepped => stepped(t, or_default(p1, DEFAULT_STEPS).round().max(1.0)),
        Ease::SmoothStep => smoothstep(t, p1, p2),
        other => ease(t, other),
    }
}

#[inline]
fn or_default(value: f32, default: f32) -> f32 {
    if value == 0.0 {
        default
    } else {
        value
    }
}

#[inline]
fn elastic_period(value: f32, default: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        default
    }
}

fn smoothstep(t: f32, edge0: f32, edge1: f32) -> f32 {
    if (edge1 - edge0).abs() < f32::EPSILON {
        return if t < edge0 { 0.0 } else { 1.0 };
    }
    let x = ((t - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

fn stepped(t: f32, steps: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    (t * steps).floor() / steps
}

/// Phase shift for the elastic families. Amplitudes below one are raised to
/// one, matching the classic Penner formulation.
fn elastic_shape(amplitude: f32, period: f32) -> (f32, f32) {
    if amplitude < 1.0 {
        (1.0, period / 4.0)
    } else {
        (amplitude, period / TAU * (1.0 / amplitude).asin())
    }
}

fn elastic_in(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (a, s) = elastic_shape(amplitude, period);
    let t = t - 1.0;
    -(a * 2f32.powf(10.0 * t) * ((t - s) * TAU / period).sin())
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (a, s) = elastic_shape(amplitude, period);
    a * 2f32.powf(-10.0 * t) * ((t - s) * TAU / period).sin() + 1.0
}

fn elastic_in_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (a, s) = elastic_shape(amplitude, period);
    let t = t * 2.0 - 1.0;
    if t < 0.0 {
        -0.5 * (a * 2f32.powf(10.0 * t) * ((t - s) * TAU / period).sin())
    } else {
        a * 2f32.powf(-10.0 * t) * ((t - s) * TAU / period).sin() * 0.5 + 1.0
    }
}

fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / BOUNCE_DIVISOR {
        BOUNCE_SCALE * t * t
    } else if t < 2.0 / BOUNCE_DIVISOR {
        let t = t - 1.5 / BOUNCE_DIVISOR;
        BOUNCE_SCALE * t * t + 0.75
    } else if t < 2.5 / BOUNCE_DIVISOR {
        let t = t - 2.25 / BOUNCE_DIVISOR;
        BOUNCE_SCALE * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_DIVISOR;
        BOUNCE_SCALE * t * t + 0.984375
    }
}

fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        bounce_in(t * 2.0) * 0.5
    } else {
        bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
    }
}

fn back_in(t: f32, s: f32) -> f32 {
    t * t * ((s + 1.0) * t - s)
}

fn back_out(t: f32, s: f32) -> f32 {
    let t = t - 1.0;
    t * t * ((s + 1.0) * t + s) + 1.0
}

fn back_in_out(t: f32, s: f32) -> f32 {
    let s = s * BACK_IN_OUT_SCALE;
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * (t * t * ((s + 1.0) * t - s))
    } else {
        let t = t - 2.0;
        0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
    }
}

// ============================================================================
// Cubic Bezier
// ============================================================================

/// CSS-style cubic bezier timing curve
///
/// P0 = (0, 0) and P3 = (1, 1) are implied; only P1 and P2 are stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// Create a curve from the two free control points.
    ///
    /// Both x coordinates must lie in [0, 1] so the curve stays a function of
    /// time; y coordinates are free, which allows overshoot.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self> {
        let finite = [x1, y1, x2, y2].iter().all(|v| v.is_finite());
        let x_in_range = (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2);
        if !finite || !x_in_range {
            return Err(TweenError::InvalidBezier { x1, y1, x2, y2 });
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn control_points(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Evaluate the curve at normalized time `t`.
    ///
    /// Solves x(p) = t with Newton-Raphson, falling back to bisection when the
    /// slope gets too flat. Computes in f64 internally; endpoints are exact.
    pub fn evaluate(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let x = t as f64;
        let x1 = self.x1 as f64;
        let y1 = self.y1 as f64;
        let x2 = self.x2 as f64;
        let y2 = self.y2 as f64;

        let mut p = x;
        for _ in 0..BEZIER_NEWTON_ITERATIONS {
            let err = bezier_sample(p, x1, x2) - x;
            if err.abs() < BEZIER_EPSILON {
                return bezier_sample(p, y1, y2) as f32;
            }
            let slope = bezier_slope(p, x1, x2);
            if slope.abs() < BEZIER_MIN_SLOPE {
                break;
            }
            p -= err / slope;
        }

        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;
        p = x;
        for _ in 0..BEZIER_BISECTION_ITERATIONS {
            let val = bezier_sample(p, x1, x2);
            if (val - x).abs() < BEZIER_EPSILON {
                break;
            }
            if val < x {
                lo = p;
            } else {
                hi = p;
            }
            p = (lo + hi) * 0.5;
        }

        bezier_sample(p, y1, y2) as f32
    }
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

// ============================================================================
// Easing Selection + Evaluator
// ============================================================================

/// How a tween picks its easing: a family tag plus the data some families need
#[derive(Clone, Debug, Default)]
pub struct EasingSelection {
    pub ease: Ease,
    /// Family parameters, see [`ease_with_params`]
    pub params: [f32; 2],
    /// `[x1, y1, x2, y2]` for [`Ease::CubicBezier`]
    pub bezier: Option<[f32; 4]>,
    /// Sampled curve for [`Ease::Curve`]
    pub curve: Option<Arc<dyn SampledCurve>>,
}

impl EasingSelection {
    pub fn new(ease: Ease) -> Self {
        Self {
            ease,
            ..Default::default()
        }
    }

    pub fn with_params(mut self, p1: f32, p2: f32) -> Self {
        self.params = [p1, p2];
        self
    }

    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            ease: Ease::CubicBezier,
            bezier: Some([x1, y1, x2, y2]),
            ..Default::default()
        }
    }

    pub fn curve(curve: Arc<dyn SampledCurve>) -> Self {
        Self {
            ease: Ease::Curve,
            curve: Some(curve),
            ..Default::default()
        }
    }
}

impl From<Ease> for EasingSelection {
    fn from(ease: Ease) -> Self {
        Self::new(ease)
    }
}

/// A constructed easing function, owned by one tween instance
#[derive(Clone)]
pub enum Evaluator {
    ClosedForm { ease: Ease, p1: f32, p2: f32 },
    Bezier(CubicBezier),
    Curve(Arc<dyn SampledCurve>),
}

impl Evaluator {
    /// Pick the implementation matching the selection's family tag
    pub fn from_selection(selection: &EasingSelection) -> Result<Self> {
        match selection.ease {
            Ease::CubicBezier => {
                let [x1, y1, x2, y2] = selection.bezier.ok_or(TweenError::MissingBezierPoints)?;
                Ok(Evaluator::Bezier(CubicBezier::new(x1, y1, x2, y2)?))
            }
            Ease::Curve => selection
                .curve
                .clone()
                .map(Evaluator::Curve)
                .ok_or(TweenError::MissingCurve),
            ease => {
                let [p1, p2] = selection.params;
                Ok(Evaluator::ClosedForm { ease, p1, p2 })
            }
        }
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            Evaluator::ClosedForm { ease, p1, p2 } => ease_with_params(t, *ease, *p1, *p2),
            Evaluator::Bezier(bezier) => bezier.evaluate(t),
            Evaluator::Curve(curve) => curve.sample(t.clamp(0.0, 1.0)),
        }
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluator::ClosedForm { ease, p1, p2 } => f
                .debug_struct("ClosedForm")
                .field("ease", ease)
                .field("p1", p1)
                .field("p2", p2)
                .finish(),
            Evaluator::Bezier(bezier) => f.debug_tuple("Bezier").field(bezier).finish(),
            Evaluator::Curve(_) => f.write_str("Curve(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::KeyframeCurve;

    fn samples() -> impl Iterator<Item = f32> {
        (0..=100).map(|i| i as f32 / 100.0)
    }

    #[test]
    fn test_linear_is_identity() {
        for t in samples() {
            assert_eq!(ease(t, Ease::Linear), t);
        }
    }

    #[test]
    fn test_endpoints() {
        for family in Ease::CLOSED_FORM {
            assert!(ease(0.0, family).abs() < 1e-5, "{:?} at 0", family);
            assert!((ease(1.0, family) - 1.0).abs() < 1e-5, "{:?} at 1", family);
        }
    }

    #[test]
    fn test_bounce_in_mirrors_out() {
        for t in samples() {
            assert_eq!(ease(t, Ease::InBounce), 1.0 - ease(1.0 - t, Ease::OutBounce));
        }
    }

    #[test]
    fn test_bounce_breakpoints() {
        // Each arc touches 1.0 at its breakpoint
        for breakpoint in [1.0 / 2.75, 2.0 / 2.75, 2.5 / 2.75, 1.0] {
            assert!((bounce_out(breakpoint) - 1.0).abs() < 1e-5);
        }
        // and bottoms out halfway between breakpoints
        assert!((bounce_out(1.5 / 2.75) - 0.75).abs() < 1e-6);
        assert!((bounce_out(2.25 / 2.75) - 0.9375).abs() < 1e-6);
        assert!((bounce_out(2.625 / 2.75) - 0.984375).abs() < 1e-6);
    }

    #[test]
    fn test_zero_params_bit_identical() {
        for family in Ease::CLOSED_FORM {
            for t in samples() {
                assert_eq!(
                    ease_with_params(t, family, 0.0, 0.0).to_bits(),
                    ease(t, family).to_bits(),
                    "{:?} at {}",
                    family,
                    t
                );
            }
        }
    }

    #[test]
    fn test_params_ignored_by_plain_families() {
        for t in samples() {
            assert_eq!(
                ease_with_params(t, Ease::InOutCubic, 3.0, 7.0),
                ease(t, Ease::InOutCubic)
            );
        }
    }

    #[test]
    fn test_stepped_quantizes() {
        assert_eq!(ease(0.0, Ease::Stepped), 0.0);
        assert_eq!(ease(0.3, Ease::Stepped), 0.25);
        assert_eq!(ease(0.99, Ease::Stepped), 0.75);
        assert_eq!(ease(1.0, Ease::Stepped), 1.0);
        assert_eq!(ease_with_params(0.55, Ease::Stepped, 2.0, 0.0), 0.5);
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(ease_with_params(0.1, Ease::SmoothStep, 0.2, 0.8), 0.0);
        assert_eq!(ease_with_params(0.9, Ease::SmoothStep, 0.2, 0.8), 1.0);
        assert!((ease_with_params(0.5, Ease::SmoothStep, 0.2, 0.8) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_elastic_and_back_overshoot() {
        let peak = samples()
            .map(|t| ease(t, Ease::OutElastic))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);

        let dip = samples().map(|t| ease(t, Ease::InBack)).fold(f32::MAX, f32::min);
        assert!(dip < 0.0);

        // Larger overshoot pulls further below zero
        let deeper = samples()
            .map(|t| ease_with_params(t, Ease::InBack, 3.0, 0.0))
            .fold(f32::MAX, f32::min);
        assert!(deeper < dip);
    }

    #[test]
    fn test_elastic_exact_endpoints_with_params() {
        for family in [Ease::InElastic, Ease::OutElastic, Ease::InOutElastic] {
            assert_eq!(ease_with_params(0.0, family, 2.0, 0.5), 0.0);
            assert_eq!(ease_with_params(1.0, family, 2.0, 0.5), 1.0);
        }
    }

    #[test]
    fn test_bezier_endpoints_exact() {
        let curves = [
            (0.25, 0.1, 0.25, 1.0),
            (0.42, 0.0, 1.0, 1.0),
            (0.0, 0.0, 0.0, 0.0),
            (1.0, -2.0, 0.0, 3.0),
            (0.68, -0.55, 0.265, 1.55),
        ];
        for (x1, y1, x2, y2) in curves {
            let bezier = CubicBezier::new(x1, y1, x2, y2).unwrap();
            assert_eq!(bezier.evaluate(0.0), 0.0);
            assert_eq!(bezier.evaluate(1.0), 1.0);
        }
    }

    #[test]
    fn test_bezier_linear_control_points() {
        let bezier = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0).unwrap();
        for t in samples() {
            assert!((bezier.evaluate(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_bezier_matches_css_ease() {
        // CSS `ease` at x = 0.5 is ~0.8024
        let bezier = CubicBezier::new(0.25, 0.1, 0.25, 1.0).unwrap();
        assert!((bezier.evaluate(0.5) - 0.8024).abs() < 1e-3);
    }

    #[test]
    fn test_bezier_rejects_out_of_range_x() {
        assert!(matches!(
            CubicBezier::new(1.5, 0.0, 0.5, 1.0),
            Err(TweenError::InvalidBezier { .. })
        ));
        assert!(CubicBezier::new(f32::NAN, 0.0, 0.5, 1.0).is_err());
    }

    #[test]
    fn test_evaluator_selection() {
        let closed = Evaluator::from_selection(&Ease::OutQuad.into()).unwrap();
        assert!((closed.evaluate(0.5) - 0.75).abs() < 1e-6);

        let selection = EasingSelection::cubic_bezier(0.42, 0.0, 0.58, 1.0);
        let bezier = Evaluator::from_selection(&selection);
        assert!(matches!(bezier, Ok(Evaluator::Bezier(_))));

        let missing = Evaluator::from_selection(&EasingSelection::new(Ease::CubicBezier));
        assert!(matches!(missing, Err(TweenError::MissingBezierPoints)));

        let missing = Evaluator::from_selection(&EasingSelection::new(Ease::Curve));
        assert!(matches!(missing, Err(TweenError::MissingCurve)));
    }

    #[test]
    fn test_curve_evaluator_clamps_input() {
        let curve = KeyframeCurve::new([(0.0, 0.0), (1.0, 2.0)]);
        let selection = EasingSelection::curve(Arc::new(curve));
        let evaluator = Evaluator::from_selection(&selection).unwrap();
        assert_eq!(evaluator.evaluate(-1.0), 0.0);
        assert_eq!(evaluator.evaluate(0.5), 1.0);
        assert_eq!(evaluator.evaluate(3.0), 2.0);
    }

    #[test]
    fn test_ease_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            ease: Ease,
        }
        let w: Wrapper = toml::from_str(r#"ease = "in-out-sine""#).unwrap();
        assert_eq!(w.ease, Ease::InOutSine);
        let w: Wrapper = toml::from_str(r#"ease = "cubic-bezier""#).unwrap();
        assert_eq!(w.ease, Ease::CubicBezier);
    }
}
