//! Motion profiles and their validation.
//!
//! A [`MotionConfig`] describes one scripted motion: which kind of motion it
//! is, where it goes, how long each phase lasts and how many times it runs.
//! Profiles are authored up front and never change while a machine runs.
//!
//! Validation accumulates every violated rule with Stillwater's
//! `Validation` instead of stopping at the first one, so a broken profile
//! is reported in full.
//!
//! # Example
//!
//! ```rust
//! use shuttle::config::{MotionConfigBuilder, MotionKind};
//! use shuttle::core::Pose;
//! use glam::Vec3;
//!
//! let config = MotionConfigBuilder::new()
//!     .kind(MotionKind::Linear)
//!     .start(Pose::from_position(Vec3::ZERO))
//!     .end(Pose::from_position(Vec3::new(10.0, 0.0, 0.0)))
//!     .wait(2.0)
//!     .move_for(1.0)
//!     .ticks(0)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.is_infinite());
//! ```

use crate::core::{CurveMode, CurveRef, Pose};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod builder;
pub mod error;

pub use builder::MotionConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

/// Which motion generator drives the entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    /// Interpolate between the start and end poses.
    #[default]
    Linear,
    /// Follow a curve evaluator.
    CurvePath,
}

/// Description of one motion profile.
#[derive(Clone)]
pub struct MotionConfig {
    pub kind: MotionKind,
    /// Pose at position index 0. Linear motion only.
    pub start: Pose,
    /// Pose at position index 1. Linear motion only.
    pub end: Pose,
    /// Required for curve path motion.
    pub curve: Option<CurveRef>,
    pub curve_mode: CurveMode,
    /// Seconds spent holding still between moves.
    pub wait_duration: f32,
    /// Seconds a single move takes.
    pub move_duration: f32,
    /// Number of moves to perform. `0` repeats forever.
    pub tick_limit: i32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            kind: MotionKind::Linear,
            start: Pose::IDENTITY,
            end: Pose::from_position(Vec3::Z),
            curve: None,
            curve_mode: CurveMode::Loop,
            wait_duration: 1.0,
            move_duration: 1.0,
            tick_limit: 0,
        }
    }
}

impl fmt::Debug for MotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionConfig")
            .field("kind", &self.kind)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("curve", &self.curve.as_ref().map(|_| "<curve>"))
            .field("curve_mode", &self.curve_mode)
            .field("wait_duration", &self.wait_duration)
            .field("move_duration", &self.move_duration)
            .field("tick_limit", &self.tick_limit)
            .finish()
    }
}

impl MotionConfig {
    /// Check every rule, accumulating ALL violations.
    pub fn check(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks = vec![
            self.check_curve(),
            self.check_tick_limit(),
            check_duration("Wait", self.wait_duration),
            check_duration("Move", self.move_duration),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate the profile, reporting every violation at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.check() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => {
                let violations: Vec<ConfigViolation> = errors.iter().cloned().collect();
                tracing::warn!(
                    count = violations.len(),
                    kind = ?self.kind,
                    "Rejecting motion config",
                );
                Err(ConfigError::Invalid { violations })
            }
        }
    }

    /// Whether the motion repeats without limit.
    pub fn is_infinite(&self) -> bool {
        self.tick_limit == 0
    }

    /// Pose for a position index: 0 is the start, anything else the end.
    pub fn endpoint(&self, position_index: u8) -> Pose {
        if position_index == 0 {
            self.start
        } else {
            self.end
        }
    }

    fn check_curve(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        if self.kind == MotionKind::CurvePath && self.curve.is_none() {
            Validation::fail(ConfigViolation::MissingCurve)
        } else {
            Validation::success(())
        }
    }

    fn check_tick_limit(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        if self.tick_limit < 0 {
            Validation::fail(ConfigViolation::NegativeTickLimit(self.tick_limit))
        } else {
            Validation::success(())
        }
    }
}

fn check_duration(phase: &'static str, value: f32) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value.is_finite() && value >= 0.0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::InvalidDuration { phase, value })
    }
}
