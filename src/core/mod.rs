//! Core motion value types.
//!
//! This module contains the plain values the motion machine is built from:
//! - Poses and their interpolation
//! - Motion phases
//! - Curve evaluation for path-following motion
//!
//! Everything here is pure; the stateful machine lives in `machine`.

mod curve;
mod phase;
mod pose;

pub use curve::{CubicBezier, CurveEvaluator, CurveMode, CurveRef, InvalidBezier};
pub use phase::Phase;
pub use pose::Pose;
