//! Animatable value types and value strategies
//!
//! [`Interpolate`] describes how a value type blends between two endpoints.
//! [`TweenStrategy`] is what a tween instance drives each frame; the generic
//! [`ValueStrategy`] implements it for any interpolatable type by writing the
//! blended value through a setter.

use glide_core::{Color, Quat, Transform, Vec2, Vec3};
use parking_lot::Mutex;
use std::sync::Arc;

/// Trait for values that can be interpolated between two endpoints
///
/// `t` is eased progress and may leave [0, 1] for overshooting easings.
pub trait Interpolate: Clone + Send + Sync + 'static {
    /// Interpolate between self and other by factor t
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// Scalar and Vector Implementations
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::lerp(self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Interpolate for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        Vec3::approx_eq(self, *other, epsilon)
    }
}

// ============================================================================
// Rotation Implementations
// ============================================================================

/// Rotations always take the spherical path
impl Interpolate for Quat {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.slerp(*other, t).normalize()
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        Quat::approx_eq(self, other, epsilon)
    }
}

/// Euler angles in radians (roll, pitch, yaw)
///
/// Interpolates through quaternion slerp and converts back, so the result
/// follows the shortest rotation rather than unwinding each axis separately.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerRotation(pub Vec3);

impl EulerRotation {
    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self(Vec3::new(roll, pitch, yaw))
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(self.0.x, self.0.y, self.0.z)
    }

    pub fn from_quat(q: Quat) -> Self {
        let (roll, pitch, yaw) = q.to_euler();
        Self::new(roll, pitch, yaw)
    }
}

impl Interpolate for EulerRotation {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        EulerRotation::from_quat(self.to_quat().lerp(&other.to_quat(), t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        Quat::approx_eq(&self.to_quat(), &other.to_quat(), epsilon)
    }
}

impl Interpolate for Transform {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.interpolate(other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.position.approx_eq(other.position, epsilon)
            && self.scale.approx_eq(other.scale, epsilon)
            && self.rotation.approx_eq(&other.rotation, epsilon)
    }
}

// ============================================================================
// Color Implementation
// ============================================================================

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        Color::approx_eq(self, other, epsilon)
    }
}

// ============================================================================
// Tween Strategies
// ============================================================================

/// Per-value-type interpolation and write-back, driven by a tween instance
pub trait TweenStrategy: Send + Sync {
    /// Write the start value to the target
    fn initialize(&mut self);

    /// Write the value at eased progress `eased`
    fn apply(&mut self, eased: f32);

    /// Force the end value
    fn apply_final(&mut self) {
        self.apply(1.0);
    }
}

type Setter<T> = Box<dyn FnMut(&T) + Send + Sync>;

/// Tweens a value of type `T` from `start` to `end`, writing through a setter
pub struct ValueStrategy<T: Interpolate> {
    start: T,
    end: T,
    setter: Setter<T>,
}

impl<T: Interpolate> ValueStrategy<T> {
    pub fn new<F>(start: T, end: T, setter: F) -> Self
    where
        F: FnMut(&T) + Send + Sync + 'static,
    {
        Self {
            start,
            end,
            setter: Box::new(setter),
        }
    }

    /// Write into a shared slot the caller reads from
    pub fn shared(start: T, end: T, target: Arc<Mutex<T>>) -> Self {
        Self::new(start, end, move |value: &T| {
            *target.lock() = value.clone();
        })
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    pub fn end(&self) -> &T {
        &self.end
    }

    /// Value at eased progress `t` without writing it
    pub fn sample(&self, t: f32) -> T {
        self.start.lerp(&self.end, t)
    }
}

impl<T: Interpolate> TweenStrategy for ValueStrategy<T> {
    fn initialize(&mut self) {
        (self.setter)(&self.start);
    }

    fn apply(&mut self, eased: f32) {
        let value = self.sample(eased);
        (self.setter)(&value);
    }

    /// Writes `end` itself rather than `lerp(1.0)`, which is not exact for
    /// spherical interpolation.
    fn apply_final(&mut self) {
        (self.setter)(&self.end);
    }
}

/// Strategy for f32 values
pub type FloatTween = ValueStrategy<f32>;

/// Strategy for Vec2 values
pub type Vec2Tween = ValueStrategy<Vec2>;

/// Strategy for Vec3 values (positions, scales)
pub type Vec3Tween = ValueStrategy<Vec3>;

/// Strategy for quaternion rotations
pub type QuatTween = ValueStrategy<Quat>;

/// Strategy for Euler rotations
pub type EulerTween = ValueStrategy<EulerRotation>;

/// Strategy for whole transforms
pub type TransformTween = ValueStrategy<Transform>;

/// Strategy for Color values
pub type ColorTween = ValueStrategy<Color>;
