//! Shared math helpers for frame-rate independent smoothing

use glam::Vec3;

/// Linear interpolation between two scalars
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Blend a scalar toward a target with an exponential-decay step.
///
/// The blend factor `rate * dt` is clamped to [0, 1] so a large `dt` can
/// never overshoot the target.
#[must_use]
pub fn blend(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    lerp(current, target, (rate * dt).clamp(0.0, 1.0))
}

/// Blend a vector toward a target with an exponential-decay step
#[must_use]
pub fn blend_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current.lerp(target, (rate * dt).clamp(0.0, 1.0))
}

/// Horizontal basis vectors for a yaw angle in radians.
///
/// Returns `(forward, right)`. Forward is -Z at yaw 0, matching the camera
/// convention; both vectors stay in the X-Z plane.
#[must_use]
pub fn yaw_basis(yaw: f32) -> (Vec3, Vec3) {
    let (sin, cos) = yaw.sin_cos();
    let forward = Vec3::new(-sin, 0.0, -cos);
    let right = Vec3::new(cos, 0.0, -sin);
    (forward, right)
}
