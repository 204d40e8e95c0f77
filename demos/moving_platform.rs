//! Moving Platform
//!
//! This example drives a platform between two poses with a fixed physics
//! rate and a jittery logic rate.
//!
//! Key concepts:
//! - Separate logic and physics ticks
//! - Tick-limited motion that parks itself
//! - Step and completion events
//! - Curve path motion with ping-pong traversal
//!
//! Run with: cargo run --example moving_platform

use glam::Vec3;
use shuttle::config::MotionConfigBuilder;
use shuttle::core::{CubicBezier, CurveMode, Pose};
use shuttle::machine::{MotionEvent, MotionState, Mover};

const PHYSICS_STEP: f32 = 0.02;

/// Stand-in for a kinematic rigid body.
#[derive(Default)]
struct Body {
    pose: Pose,
    teleports: usize,
}

impl Mover for Body {
    fn move_to(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn teleport(&mut self, pose: Pose) {
        self.pose = pose;
        self.teleports += 1;
    }
}

fn run(label: &str, machine: &mut MotionState, seconds: f32) {
    let mut body = Body::default();
    let frames = [0.016, 0.033, 0.021, 0.05];
    let mut clock = 0.0;
    let mut physics_debt = 0.0;
    let mut frame = 0;

    while clock < seconds {
        let dt = frames[frame % frames.len()];
        frame += 1;
        clock += dt;

        machine.advance_clock(dt);

        physics_debt += dt;
        while physics_debt >= PHYSICS_STEP {
            physics_debt -= PHYSICS_STEP;
            machine.physics_tick(&mut body);
        }

        if frame % 40 == 0 {
            let p = body.pose.position;
            println!(
                "  [{label}] t={clock:5.2}s phase={:<9} pos=({:6.2}, {:6.2}, {:6.2})",
                machine.phase(),
                p.x,
                p.y,
                p.z
            );
        }
    }

    println!("  [{label}] teleports applied: {}\n", body.teleports);
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Moving Platform ===\n");

    let config = MotionConfigBuilder::linear(
        Pose::from_position(Vec3::ZERO),
        Pose::from_euler_degrees(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 45.0, 0.0)),
    )
    .wait(1.0)
    .move_for(2.0)
    .ticks(3)
    .build()
    .unwrap();

    let mut platform = MotionState::new(config).unwrap();
    platform.subscribe(|event| match event {
        MotionEvent::StepTransition {
            phase,
            position_index,
        } => println!("  -> {phase} towards endpoint {position_index}"),
        MotionEvent::Completed => println!("  -> platform parked"),
    });

    println!("Linear platform, three moves:");
    run("linear", &mut platform, 12.0);

    let bezier = CubicBezier::new(vec![
        Vec3::ZERO,
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(10.0, 5.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
    ])
    .unwrap();

    let config = MotionConfigBuilder::curve_path(bezier, CurveMode::PingPong)
        .wait(0.5)
        .move_for(1.5)
        .build()
        .unwrap();
    let mut arc = MotionState::new(config).unwrap();

    println!("Curve platform, ping-pong along an arch:");
    run("curve", &mut arc, 6.0);

    println!("Pause and restart:");
    arc.pause();
    println!("  paused: {}", arc.is_paused());
    arc.restart();
    println!("  phase after restart: {}", arc.phase());

    println!("\n=== Example Complete ===");
}
