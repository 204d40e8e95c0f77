//! Kinematic mover contract.

use crate::core::Pose;

/// Applies poses produced by a motion machine to the simulated world.
///
/// The body behind a mover must be kinematic while a machine drives it:
/// gravity and collisions do not perturb it.
pub trait Mover {
    /// Move towards `pose` as part of a physics step.
    fn move_to(&mut self, pose: Pose);

    /// Place the body at `pose` instantly, without interpolation.
    fn teleport(&mut self, pose: Pose);
}

/// A bare pose is the simplest mover: it just takes the latest pose.
impl Mover for Pose {
    fn move_to(&mut self, pose: Pose) {
        *self = pose;
    }

    fn teleport(&mut self, pose: Pose) {
        *self = pose;
    }
}
