//! Glide Core
//!
//! Value types animated by the Glide tween engine:
//!
//! - **Vectors**: `Vec2` and `Vec3` with component-wise interpolation
//! - **Rotations**: `Quat` with shortest-path spherical interpolation and
//!   Euler conversion
//! - **Colors**: linear RGBA `Color`
//! - **Transforms**: `Transform` composed of position, rotation and scale
//!
//! # Example
//!
//! ```rust
//! use glide_core::{Quat, Vec3};
//!
//! let a = Quat::IDENTITY;
//! let b = Quat::from_axis_angle(Vec3::UP, std::f32::consts::FRAC_PI_2);
//! let halfway = a.slerp(b, 0.5);
//! assert!((halfway.length() - 1.0).abs() < 1e-5);
//! ```

pub mod color;
pub mod geometry;
pub mod quat;
pub mod transform;

pub use color::Color;
pub use geometry::{Vec2, Vec3};
pub use quat::Quat;
pub use transform::Transform;
