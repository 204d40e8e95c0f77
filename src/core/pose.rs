//! World-space pose of a moving entity.
//!
//! A pose is a plain value: position plus orientation. Poses are produced by
//! the motion state machine and curve evaluators, and consumed by movers.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation in world space.
///
/// # Example
///
/// ```rust
/// use shuttle::core::Pose;
/// use glam::Vec3;
///
/// let a = Pose::from_position(Vec3::ZERO);
/// let b = Pose::from_position(Vec3::new(10.0, 0.0, 0.0));
///
/// let mid = a.lerp(&b, 0.5);
/// assert_eq!(mid.position, Vec3::new(5.0, 0.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Origin with no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with identity rotation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Pose from a position and Euler angles given in degrees.
    ///
    /// Angles are applied Z first, then X, then Y, the usual convention for
    /// authored level data.
    pub fn from_euler_degrees(position: Vec3, euler: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::from_euler(
                EulerRot::YXZ,
                euler.y.to_radians(),
                euler.x.to_radians(),
                euler.z.to_radians(),
            ),
        }
    }

    /// Interpolate towards `target`.
    ///
    /// `t` is clamped to `[0, 1]`. Position is interpolated linearly and
    /// rotation with a normalized shortest-arc lerp. The endpoints are
    /// returned verbatim at `t = 0` and `t = 1`, and so is a pose
    /// interpolated towards itself.
    pub fn lerp(&self, target: &Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 || self == target {
            return *self;
        }
        if t >= 1.0 {
            return *target;
        }
        Pose {
            position: self.position.lerp(target.position, t),
            rotation: self.rotation.lerp(target.rotation, t),
        }
    }

    /// Approximate equality on both position and rotation.
    pub fn abs_diff_eq(&self, other: &Pose, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && (self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
                || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints_exactly() {
        let a = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
        let b = Pose::new(Vec3::new(-4.0, 0.5, 9.0), Quat::from_rotation_y(1.0));

        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn lerp_clamps_parameter() {
        let a = Pose::from_position(Vec3::ZERO);
        let b = Pose::from_position(Vec3::X * 10.0);

        assert_eq!(a.lerp(&b, -3.0), a);
        assert_eq!(a.lerp(&b, 7.5), b);
    }

    #[test]
    fn lerp_interpolates_position_linearly() {
        let a = Pose::from_position(Vec3::ZERO);
        let b = Pose::from_position(Vec3::new(10.0, 0.0, -2.0));

        let p = a.lerp(&b, 0.25);
        assert!(p.position.abs_diff_eq(Vec3::new(2.5, 0.0, -0.5), 1e-6));
    }

    #[test]
    fn lerp_rotation_stays_normalized() {
        let a = Pose::new(Vec3::ZERO, Quat::IDENTITY);
        let b = Pose::new(Vec3::ZERO, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));

        let p = a.lerp(&b, 0.5);
        assert!((p.rotation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn euler_degrees_matches_single_axis_rotation() {
        let pose = Pose::from_euler_degrees(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0));
        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        assert!(pose.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn pose_serializes_correctly() {
        let pose = Pose::from_euler_degrees(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 45.0, 0.0));
        let json = serde_json::to_string(&pose).unwrap();
        let deserialized: Pose = serde_json::from_str(&json).unwrap();
        assert_eq!(pose, deserialized);
    }
}
