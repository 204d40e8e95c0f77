//! Curve evaluation for path-following motion.
//!
//! The motion state machine treats a curve as a black box that maps a
//! normalized parameter to a pose. Any pure function of `t` will do; a
//! piecewise cubic Bézier spline is provided for authored paths.

use super::pose::Pose;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Maps a normalized curve parameter to a pose.
///
/// Implementations must be pure: the same `t` always yields the same pose.
/// Closures `Fn(f32) -> Pose` implement this trait directly.
///
/// # Example
///
/// ```rust
/// use shuttle::core::{CurveEvaluator, Pose};
/// use glam::Vec3;
///
/// let line = |t: f32| Pose::from_position(Vec3::new(t * 4.0, 0.0, 0.0));
/// assert_eq!(line.evaluate(0.5).position, Vec3::new(2.0, 0.0, 0.0));
/// ```
pub trait CurveEvaluator: Send + Sync {
    fn evaluate(&self, t: f32) -> Pose;
}

impl<F> CurveEvaluator for F
where
    F: Fn(f32) -> Pose + Send + Sync,
{
    fn evaluate(&self, t: f32) -> Pose {
        self(t)
    }
}

/// Shared handle to a curve evaluator.
pub type CurveRef = Arc<dyn CurveEvaluator>;

/// How a curve is traversed across successive move phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveMode {
    /// Every move runs the curve forward from its start.
    #[default]
    Loop,
    /// Moves alternate forward and backward along the curve.
    PingPong,
}

/// Piecewise cubic Bézier spline.
///
/// Control points are laid out as `p0, c0, c1, p1, c2, c3, p2, ...`: each
/// segment shares its last point with the next one, so a spline of `n`
/// segments has `3n + 1` points. The parameter is clamped to `[0, 1]` and
/// spread evenly across segments.
///
/// # Example
///
/// ```rust
/// use shuttle::core::{CubicBezier, CurveEvaluator};
/// use glam::Vec3;
///
/// let spline = CubicBezier::new(vec![
///     Vec3::ZERO,
///     Vec3::new(1.0, 2.0, 0.0),
///     Vec3::new(3.0, 2.0, 0.0),
///     Vec3::new(4.0, 0.0, 0.0),
/// ])
/// .unwrap();
///
/// assert_eq!(spline.evaluate(0.0).position, Vec3::ZERO);
/// assert_eq!(spline.evaluate(1.0).position, Vec3::new(4.0, 0.0, 0.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBezier")]
pub struct CubicBezier {
    points: Vec<Vec3>,
    rotation: Quat,
}

/// Control point count that cannot form a spline.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("A cubic Bézier spline needs 3n + 1 control points (n >= 1), got {0}")]
pub struct InvalidBezier(pub usize);

/// Unchecked wire form of [`CubicBezier`].
#[derive(Deserialize)]
struct RawBezier {
    points: Vec<Vec3>,
    rotation: Quat,
}

impl TryFrom<RawBezier> for CubicBezier {
    type Error = InvalidBezier;

    fn try_from(raw: RawBezier) -> Result<Self, Self::Error> {
        let count = raw.points.len();
        Self::new(raw.points)
            .map(|spline| spline.with_rotation(raw.rotation))
            .ok_or(InvalidBezier(count))
    }
}

impl CubicBezier {
    /// Build a spline from its control points.
    ///
    /// Returns `None` unless there are `3n + 1` points with `n >= 1`.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            return None;
        }
        Some(Self {
            points,
            rotation: Quat::IDENTITY,
        })
    }

    /// Orientation reported for every point of the path.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    fn point(&self, t: f32) -> Vec3 {
        let segments = self.segment_count();
        let (index, local) = if t >= 1.0 {
            (segments - 1, 1.0)
        } else {
            let scaled = t.max(0.0) * segments as f32;
            let index = (scaled as usize).min(segments - 1);
            (index, scaled - index as f32)
        };

        let i = index * 3;
        cubic(
            self.points[i],
            self.points[i + 1],
            self.points[i + 2],
            self.points[i + 3],
            local,
        )
    }
}

impl CurveEvaluator for CubicBezier {
    fn evaluate(&self, t: f32) -> Pose {
        Pose::new(self.point(t), self.rotation)
    }
}

fn cubic(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}
