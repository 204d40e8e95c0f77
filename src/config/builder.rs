//! Builder for constructing motion profiles.

use crate::config::error::ConfigError;
use crate::config::{MotionConfig, MotionKind};
use crate::core::{CurveEvaluator, CurveMode, CurveRef, Pose};
use glam::Vec3;
use std::sync::Arc;

/// Builder for motion profiles with a fluent API.
///
/// Starts from [`MotionConfig::default`]; `build()` validates the result.
pub struct MotionConfigBuilder {
    config: MotionConfig,
}

impl MotionConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MotionConfig::default(),
        }
    }

    /// Shorthand for a linear motion between two poses.
    pub fn linear(start: Pose, end: Pose) -> Self {
        Self::new().kind(MotionKind::Linear).start(start).end(end)
    }

    /// Shorthand for a curve path motion.
    pub fn curve_path<C>(curve: C, mode: CurveMode) -> Self
    where
        C: CurveEvaluator + 'static,
    {
        Self::new()
            .kind(MotionKind::CurvePath)
            .curve(curve)
            .curve_mode(mode)
    }

    pub fn kind(mut self, kind: MotionKind) -> Self {
        self.config.kind = kind;
        self
    }

    pub fn start(mut self, pose: Pose) -> Self {
        self.config.start = pose;
        self
    }

    pub fn end(mut self, pose: Pose) -> Self {
        self.config.end = pose;
        self
    }

    /// Start pose from a position and Euler angles in degrees.
    pub fn start_euler(self, position: Vec3, euler_degrees: Vec3) -> Self {
        self.start(Pose::from_euler_degrees(position, euler_degrees))
    }

    /// End pose from a position and Euler angles in degrees.
    pub fn end_euler(self, position: Vec3, euler_degrees: Vec3) -> Self {
        self.end(Pose::from_euler_degrees(position, euler_degrees))
    }

    pub fn curve<C>(mut self, curve: C) -> Self
    where
        C: CurveEvaluator + 'static,
    {
        self.config.curve = Some(Arc::new(curve));
        self
    }

    /// Use an already shared curve.
    pub fn curve_ref(mut self, curve: CurveRef) -> Self {
        self.config.curve = Some(curve);
        self
    }

    pub fn curve_mode(mut self, mode: CurveMode) -> Self {
        self.config.curve_mode = mode;
        self
    }

    /// Seconds to hold still between moves.
    pub fn wait(mut self, seconds: f32) -> Self {
        self.config.wait_duration = seconds;
        self
    }

    /// Seconds a single move takes.
    pub fn move_for(mut self, seconds: f32) -> Self {
        self.config.move_duration = seconds;
        self
    }

    /// Number of moves to perform; `0` repeats forever.
    pub fn ticks(mut self, limit: i32) -> Self {
        self.config.tick_limit = limit;
        self
    }

    /// Build the profile.
    /// Returns an error listing every violated rule.
    pub fn build(self) -> Result<MotionConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for MotionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
