//! Shuttle: scripted kinematic motion for simulated entities
//!
//! Shuttle drives an entity back and forth between two poses, or along a
//! curve, with a timed Wait/Move cycle. A variable-rate logic tick advances
//! the phase clock; a fixed-rate physics tick asks for the pose to apply.
//! Runtime state can be captured into snapshots and restored later.
//!
//! # Core Concepts
//!
//! - **Config**: A validated [`MotionConfig`] describing one motion profile
//! - **Machine**: [`MotionState`] cycling through Waiting, Moving and Completed
//! - **Events**: Step and completion notifications delivered in order
//! - **Persistence**: [`Saveable`] entities checkpointed through a [`SaveRegistry`]
//!
//! # Example
//!
//! ```rust
//! use shuttle::config::MotionConfigBuilder;
//! use shuttle::core::{Phase, Pose};
//! use shuttle::machine::{MotionEvent, MotionState};
//! use shuttle::persistence::SaveRegistry;
//! use glam::Vec3;
//!
//! let config = MotionConfigBuilder::linear(
//!     Pose::from_position(Vec3::ZERO),
//!     Pose::from_position(Vec3::new(0.0, 4.0, 0.0)),
//! )
//! .wait(1.0)
//! .move_for(2.0)
//! .ticks(1)
//! .build()
//! .unwrap();
//!
//! let mut registry = SaveRegistry::new();
//! let mut lift = MotionState::new(config).unwrap();
//! lift.activate(&mut registry);
//! lift.subscribe(|event| {
//!     if *event == MotionEvent::Completed {
//!         println!("lift parked");
//!     }
//! });
//!
//! let mut body = Pose::IDENTITY;
//! for _ in 0..10 {
//!     lift.advance_clock(0.5);
//!     lift.physics_tick(&mut body);
//! }
//!
//! assert_eq!(lift.phase(), Phase::Completed);
//! assert_eq!(body.position, Vec3::new(0.0, 4.0, 0.0));
//! ```

pub mod config;
pub mod core;
pub mod machine;
pub mod persistence;

// Re-export commonly used types
pub use config::{ConfigError, MotionConfig, MotionConfigBuilder, MotionKind};
pub use core::{CubicBezier, CurveEvaluator, CurveMode, Phase, Pose};
pub use machine::{MotionEvent, MotionState, Mover};
pub use persistence::{EntityId, MotionSnapshot, SaveRegistry, Saveable, SnapshotError};
