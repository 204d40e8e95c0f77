//! Timed Wait/Move state machine driving one entity.

use crate::config::{ConfigError, MotionConfig, MotionKind};
use crate::core::{CurveMode, Phase, Pose};
use crate::machine::events::{EventBus, ListenerId, MotionEvent};
use crate::machine::mover::Mover;
use crate::persistence::{
    EntityId, MotionSnapshot, RuntimeData, SaveRegistry, Saveable, SnapshotError,
    SNAPSHOT_VERSION,
};
use chrono::Utc;

/// Scripted motion of a single entity.
///
/// The machine is driven by two external callbacks:
/// - a variable-rate logic tick calling [`advance_clock`](Self::advance_clock),
///   which takes at most one phase transition per call;
/// - a fixed-rate physics tick calling [`compute_pose`](Self::compute_pose)
///   (or [`physics_tick`](Self::physics_tick)), which produces the pose to
///   apply.
///
/// The machine owns the entity pose while it runs.
///
/// # Example
///
/// ```rust
/// use shuttle::config::MotionConfigBuilder;
/// use shuttle::core::{Phase, Pose};
/// use shuttle::machine::MotionState;
/// use glam::Vec3;
///
/// let config = MotionConfigBuilder::linear(
///     Pose::from_position(Vec3::ZERO),
///     Pose::from_position(Vec3::new(10.0, 0.0, 0.0)),
/// )
/// .wait(2.0)
/// .move_for(1.0)
/// .build()
/// .unwrap();
///
/// let mut platform = MotionState::new(config).unwrap();
/// assert_eq!(platform.phase(), Phase::Waiting);
///
/// platform.advance_clock(2.0);
/// assert_eq!(platform.phase(), Phase::Moving);
///
/// platform.advance_clock(0.5);
/// let pose = platform.compute_pose().unwrap();
/// assert_eq!(pose.position, Vec3::new(5.0, 0.0, 0.0));
/// ```
#[derive(Debug)]
pub struct MotionState {
    config: MotionConfig,
    id: Option<EntityId>,
    pose: Pose,
    active: bool,
    enabled: bool,

    phase: Phase,
    position_index: u8,
    elapsed: f32,
    phase_duration: f32,
    phase_origin: Pose,
    phase_target: Pose,
    paused: bool,
    stopped: bool,
    remaining_ticks: i32,
    infinite_ticks: bool,

    pending_teleport: Option<Pose>,
    events: EventBus,
}

impl MotionState {
    /// Create and initialize a machine for a motion profile.
    ///
    /// The profile is validated here; a broken profile never produces a
    /// running machine.
    pub fn new(config: MotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut machine = Self {
            config,
            id: None,
            pose: Pose::IDENTITY,
            active: true,
            enabled: true,
            phase: Phase::Waiting,
            position_index: 0,
            elapsed: 0.0,
            phase_duration: 0.0,
            phase_origin: Pose::IDENTITY,
            phase_target: Pose::IDENTITY,
            paused: false,
            stopped: false,
            remaining_ticks: 0,
            infinite_ticks: false,
            pending_teleport: None,
            events: EventBus::new(),
        };
        machine.initialize();
        Ok(machine)
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 0 targets the start pose, 1 the end pose.
    pub fn position_index(&self) -> u8 {
        self.position_index
    }

    /// Seconds spent in the current phase.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn phase_duration(&self) -> f32 {
        self.phase_duration
    }

    /// Current entity pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Origin and target of the current linear phase.
    pub fn phase_bounds(&self) -> Option<(Pose, Pose)> {
        match self.config.kind {
            MotionKind::Linear => Some((self.phase_origin, self.phase_target)),
            MotionKind::CurvePath => None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_completed(&self) -> bool {
        self.phase.is_final()
    }

    /// Move attempts left before completion, counting the aborted one.
    pub fn remaining_ticks(&self) -> i32 {
        self.remaining_ticks
    }

    pub fn is_infinite(&self) -> bool {
        self.infinite_ticks
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether ticks currently have any effect on the machine.
    pub fn is_running(&self) -> bool {
        self.active && self.enabled && !self.paused && !self.stopped
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Register a handler for phase-transition and completion events.
    pub fn subscribe<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&MotionEvent) + Send + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Advance the phase clock by one logic tick.
    ///
    /// Takes at most one phase transition, however large `delta_seconds`
    /// is; time beyond the phase end is discarded. Returns whether a
    /// transition happened.
    pub fn advance_clock(&mut self, delta_seconds: f32) -> bool {
        if !self.is_running() || self.phase.is_final() {
            return false;
        }

        self.elapsed += delta_seconds.max(0.0);
        if self.elapsed >= self.phase_duration {
            self.next_step();
            return true;
        }
        false
    }

    /// Pose to apply on this physics tick, if any.
    ///
    /// Returns `None` while paused or stopped, and for curve motion outside
    /// of a move phase.
    pub fn compute_pose(&mut self) -> Option<Pose> {
        if !self.is_running() {
            return None;
        }

        let pose = match self.config.kind {
            MotionKind::Linear => {
                let fraction = if self.phase_duration > 0.0 {
                    (self.elapsed / self.phase_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                self.phase_origin.lerp(&self.phase_target, fraction)
            }
            MotionKind::CurvePath => {
                if self.phase != Phase::Moving {
                    return None;
                }
                let curve = self.config.curve.as_ref()?;
                curve.evaluate(self.curve_parameter())
            }
        };

        self.pose = pose;
        Some(pose)
    }

    /// Run one physics tick against a mover.
    ///
    /// Delivers any pending teleport first (even while stopped), then the
    /// computed pose.
    pub fn physics_tick<M: Mover>(&mut self, mover: &mut M) -> Option<Pose> {
        if let Some(pose) = self.pending_teleport.take() {
            mover.teleport(pose);
        }
        let pose = self.compute_pose()?;
        mover.move_to(pose);
        Some(pose)
    }

    /// Toggle pause. Paused machines keep their exact state.
    pub fn pause(&mut self) {
        self.paused = !self.paused;
        tracing::debug!(entity = ?self.id, paused = self.paused, "Motion pause toggled");
    }

    /// Discard all progress and return to the start pose.
    ///
    /// The machine stays stopped until [`play`](Self::play) is called. A
    /// completed machine is revived this way.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.pose = self.start_pose();
        self.initialize();
        tracing::debug!(entity = ?self.id, "Motion stopped");
    }

    /// Resume from whatever state currently holds.
    pub fn play(&mut self) {
        self.paused = false;
        self.stopped = false;
        tracing::debug!(entity = ?self.id, phase = %self.phase, "Motion playing");
    }

    pub fn restart(&mut self) {
        self.stop();
        self.play();
    }

    /// Register with the world's save registry.
    ///
    /// Assigns a fresh identity if the machine has none yet.
    pub fn activate(&mut self, registry: &mut SaveRegistry<MotionSnapshot>) -> EntityId {
        self.active = true;
        registry.register(self)
    }

    /// Unregister from the save registry and tear the machine down.
    pub fn deactivate(self, registry: &mut SaveRegistry<MotionSnapshot>) {
        if let Some(id) = self.id {
            registry.unregister(id);
        }
    }

    fn initialize(&mut self) {
        self.phase = Phase::Waiting;
        self.elapsed = 0.0;
        self.position_index = 0;
        self.pose = self.start_pose();
        self.pending_teleport = Some(self.pose);

        self.remaining_ticks = self.config.tick_limit.saturating_add(1);
        self.infinite_ticks = self.config.is_infinite();
        self.update_target();
    }

    fn next_step(&mut self) {
        if self.phase.is_final() {
            return;
        }

        // A linear phase that ran out of time ends exactly on its target.
        if self.config.kind == MotionKind::Linear {
            self.pose = self.phase_target;
        }

        let from = self.phase;
        self.phase = self.phase.toggled();

        if self.phase == Phase::Moving {
            if !self.infinite_ticks {
                self.remaining_ticks = self.remaining_ticks.saturating_sub(1);

                if self.remaining_ticks <= 0 {
                    self.phase = Phase::Completed;
                    tracing::info!(entity = ?self.id, "Motion completed");
                    self.events.emit(MotionEvent::Completed);
                    return;
                }
            }

            self.position_index = (self.position_index + 1) % 2;
        }

        self.elapsed = 0.0;
        self.update_target();

        tracing::debug!(
            entity = ?self.id,
            from = %from,
            to = %self.phase,
            position_index = self.position_index,
            "Motion phase advanced",
        );
        self.events.emit(MotionEvent::StepTransition {
            phase: self.phase,
            position_index: self.position_index,
        });
    }

    fn update_target(&mut self) {
        self.phase_duration = match self.phase {
            Phase::Moving => self.config.move_duration,
            Phase::Waiting | Phase::Completed => self.config.wait_duration,
        };

        if self.config.kind == MotionKind::Linear {
            self.phase_origin = self.pose;
            self.phase_target = match self.phase {
                Phase::Moving => self.config.endpoint(self.position_index),
                Phase::Waiting | Phase::Completed => self.pose,
            };
        }
    }

    fn start_pose(&self) -> Pose {
        match (self.config.kind, self.config.curve.as_ref()) {
            (MotionKind::CurvePath, Some(curve)) => curve.evaluate(0.0),
            _ => self.config.start,
        }
    }

    fn curve_parameter(&self) -> f32 {
        let fraction = if self.config.move_duration > 0.0 {
            self.elapsed / self.config.move_duration
        } else {
            1.0
        };

        match self.config.curve_mode {
            CurveMode::Loop => fraction,
            CurveMode::PingPong if self.position_index == 1 => fraction,
            CurveMode::PingPong => 1.0 - fraction,
        }
    }
}

impl Saveable for MotionState {
    type Snapshot = MotionSnapshot;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn save(&self) -> Result<MotionSnapshot, SnapshotError> {
        let id = self.id.ok_or(SnapshotError::MissingIdentity)?;

        Ok(MotionSnapshot {
            version: SNAPSHOT_VERSION,
            id,
            saved_at: Utc::now(),
            pose: self.pose,
            active: self.active,
            enabled: self.enabled,
            runtime: RuntimeData {
                phase: self.phase,
                position_index: self.position_index,
                elapsed: self.elapsed,
                phase_duration: self.phase_duration,
                paused: self.paused,
                stopped: self.stopped,
                remaining_ticks: self.remaining_ticks,
                infinite_ticks: self.infinite_ticks,
            },
        })
    }

    /// Teleport to the saved pose and restore runtime fields verbatim.
    ///
    /// Phase bounds are recomputed from the restored pose, so a linear move
    /// restored halfway resumes from that pose with the saved elapsed time.
    fn load(&mut self, snapshot: &MotionSnapshot) -> Result<(), SnapshotError> {
        if let Err(err) = snapshot.validate() {
            tracing::warn!(entity = %snapshot.id, error = %err, "Rejecting motion snapshot");
            return Err(err);
        }

        if self.id.is_none() {
            self.id = Some(snapshot.id);
        }

        self.pose = snapshot.pose;
        self.pending_teleport = Some(snapshot.pose);
        self.active = snapshot.active;
        self.enabled = snapshot.enabled;

        let runtime = &snapshot.runtime;
        self.phase = runtime.phase;
        self.position_index = runtime.position_index;
        self.elapsed = runtime.elapsed;
        self.paused = runtime.paused;
        self.stopped = runtime.stopped;
        self.remaining_ticks = runtime.remaining_ticks;
        self.infinite_ticks = runtime.infinite_ticks;

        self.update_target();

        tracing::debug!(
            entity = %snapshot.id,
            phase = %self.phase,
            elapsed = self.elapsed,
            "Motion state loaded",
        );
        Ok(())
    }
}
