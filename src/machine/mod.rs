//! The motion state machine and the seams it talks through.
//!
//! [`MotionState`] owns the Wait/Move cycle of one entity. It reports
//! transitions through an [`EventBus`] and hands poses to a [`Mover`],
//! which is whatever applies them to the simulated body.

pub mod events;
pub mod motion;
pub mod mover;

pub use events::{EventBus, Listener, ListenerId, MotionEvent};
pub use motion::MotionState;
pub use mover::Mover;
