//! Configuration errors for motion profiles.

use thiserror::Error;

/// A single rule a motion profile violates.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Curve path motion requires a curve. Call .curve(evaluator)")]
    MissingCurve,

    #[error("Tick limit must not be negative (got {0})")]
    NegativeTickLimit(i32),

    #[error("{phase} duration must be a non-negative finite number of seconds (got {value})")]
    InvalidDuration { phase: &'static str, value: f32 },
}

/// Errors raised when a motion profile is rejected.
///
/// All violations are reported together, not just the first one found.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid motion config: {}", describe(.violations))]
    Invalid { violations: Vec<ConfigViolation> },
}

impl ConfigError {
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid { violations } => violations,
        }
    }
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
