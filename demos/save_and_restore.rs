//! Save and Restore
//!
//! This example checkpoints a moving platform mid-flight, lets it keep
//! running, then rewinds it from JSON and binary snapshots.
//!
//! Key concepts:
//! - Explicit per-world save registry
//! - Snapshot encoding with serde_json and bincode
//! - Restore teleports the entity to the saved pose
//!
//! Run with: cargo run --example save_and_restore

use glam::Vec3;
use shuttle::config::MotionConfigBuilder;
use shuttle::core::Pose;
use shuttle::machine::MotionState;
use shuttle::persistence::{MotionSnapshot, SaveRegistry, Saveable};

fn describe(label: &str, machine: &MotionState) {
    let p = machine.pose().position;
    println!(
        "  {label:<10} phase={:<9} index={} elapsed={:.2}s pos=({:.2}, {:.2}, {:.2})",
        machine.phase(),
        machine.position_index(),
        machine.elapsed(),
        p.x,
        p.y,
        p.z
    );
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Save and Restore ===\n");

    let config = MotionConfigBuilder::linear(
        Pose::from_position(Vec3::ZERO),
        Pose::from_position(Vec3::new(0.0, 0.0, 20.0)),
    )
    .wait(1.0)
    .move_for(4.0)
    .ticks(5)
    .build()
    .unwrap();

    let mut registry: SaveRegistry<MotionSnapshot> = SaveRegistry::new();
    let mut platform = MotionState::new(config.clone()).unwrap();
    let id = platform.activate(&mut registry);
    println!("Registered platform {id}\n");

    platform.advance_clock(1.0);
    platform.advance_clock(1.0);
    platform.compute_pose();
    describe("checkpoint", &platform);
    registry.capture(&platform).unwrap();

    for _ in 0..6 {
        platform.advance_clock(1.0);
        platform.compute_pose();
    }
    describe("later", &platform);

    registry.restore(&mut platform).unwrap();
    describe("restored", &platform);

    println!("\nJSON snapshot:");
    let snapshot = platform.save().unwrap();
    let json = snapshot.to_json_pretty().unwrap();
    println!("{json}");

    let bytes = snapshot.to_bytes().unwrap();
    println!("\nBinary snapshot: {} bytes", bytes.len());

    let mut copy = MotionState::new(config).unwrap();
    copy.load(&MotionSnapshot::from_bytes(&bytes).unwrap()).unwrap();
    describe("copy", &copy);

    println!("\nBoth resume from the restored pose:");
    platform.advance_clock(1.0);
    copy.advance_clock(1.0);
    platform.compute_pose();
    copy.compute_pose();
    describe("platform", &platform);
    describe("copy", &copy);

    platform.deactivate(&mut registry);
    println!("\nRegistered entities after deactivate: {}", registry.len());

    println!("\n=== Example Complete ===");
}
