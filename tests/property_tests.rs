//! Property-based tests for the motion state machine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated profiles and tick sequences.

use glam::Vec3;
use proptest::prelude::*;
use shuttle::config::MotionConfigBuilder;
use shuttle::core::{CurveMode, Phase, Pose};
use shuttle::machine::{MotionEvent, MotionState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

prop_compose! {
    fn arbitrary_position()(x in -100.0f32..100.0, y in -100.0f32..100.0, z in -100.0f32..100.0) -> Vec3 {
        Vec3::new(x, y, z)
    }
}

prop_compose! {
    fn arbitrary_platform(ticks: i32)(
        start in arbitrary_position(),
        end in arbitrary_position(),
        wait in 0.0f32..3.0,
        travel in 0.05f32..3.0,
    ) -> (Pose, Pose, MotionState) {
        let start = Pose::from_position(start);
        let end = Pose::from_position(end);
        let config = MotionConfigBuilder::linear(start, end)
            .wait(wait)
            .move_for(travel)
            .ticks(ticks)
            .build()
            .unwrap();
        (start, end, MotionState::new(config).unwrap())
    }
}

fn arbitrary_deltas() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(0.0f32..1.5, 1..200)
}

proptest! {
    #[test]
    fn waiting_poses_alternate_between_endpoints(
        (start, end, mut machine) in arbitrary_platform(0),
        deltas in arbitrary_deltas(),
    ) {
        let mut expected = [end, start].into_iter().cycle();

        for dt in deltas {
            let before = machine.phase();
            machine.advance_clock(dt);
            machine.compute_pose();

            if before == Phase::Moving && machine.phase() == Phase::Waiting {
                prop_assert_eq!(Some(machine.pose()), expected.next());
            }
            prop_assert!(machine.phase() != Phase::Completed);
        }
    }

    #[test]
    fn tick_limit_runs_exact_number_of_moves(
        limit in 1i32..6,
        deltas in prop::collection::vec(0.5f32..4.0, 40..80),
    ) {
        let config = MotionConfigBuilder::linear(
            Pose::from_position(Vec3::ZERO),
            Pose::from_position(Vec3::X),
        )
        .wait(0.5)
        .move_for(0.5)
        .ticks(limit)
        .build()
        .unwrap();
        let mut machine = MotionState::new(config).unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        machine.subscribe(move |event| sink.lock().unwrap().push(*event));

        for dt in deltas {
            machine.advance_clock(dt);
        }

        prop_assert_eq!(machine.phase(), Phase::Completed);
        let events = events.lock().unwrap();
        let moves = events
            .iter()
            .filter(|e| matches!(e, MotionEvent::StepTransition { phase: Phase::Moving, .. }))
            .count();
        let completions = events.iter().filter(|e| **e == MotionEvent::Completed).count();
        prop_assert_eq!(moves, limit as usize);
        prop_assert_eq!(completions, 1);
    }

    #[test]
    fn one_tick_takes_at_most_one_transition(
        (_start, _end, mut machine) in arbitrary_platform(0),
        deltas in prop::collection::vec(0.0f32..50.0, 1..100),
    ) {
        let transitions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&transitions);
        machine.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for dt in deltas {
            let before = transitions.load(Ordering::SeqCst);
            machine.advance_clock(dt);
            prop_assert!(transitions.load(Ordering::SeqCst) - before <= 1);
        }
    }

    #[test]
    fn paused_interval_leaves_no_trace(
        (start, end, mut paused) in arbitrary_platform(0),
        deltas in arbitrary_deltas(),
        ignored in arbitrary_deltas(),
        pause_at in 0usize..200,
    ) {
        let config = MotionConfigBuilder::linear(start, end)
            .wait(paused.config().wait_duration)
            .move_for(paused.config().move_duration)
            .build()
            .unwrap();
        let mut reference = MotionState::new(config).unwrap();

        for (i, dt) in deltas.iter().enumerate() {
            if i == pause_at {
                paused.pause();
                for skipped in &ignored {
                    prop_assert!(!paused.advance_clock(*skipped));
                    prop_assert_eq!(paused.compute_pose(), None);
                }
                paused.pause();
                prop_assert!(!paused.is_paused());
            }

            reference.advance_clock(*dt);
            paused.advance_clock(*dt);
            prop_assert_eq!(reference.compute_pose(), paused.compute_pose());
            prop_assert_eq!(reference.phase(), paused.phase());
            prop_assert_eq!(reference.elapsed(), paused.elapsed());
        }
    }

    #[test]
    fn stop_always_resets_to_start(
        (start, _end, mut machine) in arbitrary_platform(2),
        deltas in arbitrary_deltas(),
    ) {
        let mut body = Pose::IDENTITY;
        for dt in deltas {
            machine.advance_clock(dt);
            machine.physics_tick(&mut body);
        }

        machine.stop();

        prop_assert_eq!(machine.phase(), Phase::Waiting);
        prop_assert_eq!(machine.position_index(), 0);
        prop_assert_eq!(machine.elapsed(), 0.0);
        prop_assert_eq!(machine.pose(), start);

        machine.physics_tick(&mut body);
        prop_assert_eq!(body, start);
    }

    #[test]
    fn ping_pong_mirrors_the_parameter(fraction in 0.0f32..0.999) {
        let curve = |t: f32| Pose::from_position(Vec3::new(t, 0.0, 0.0));
        let config = MotionConfigBuilder::curve_path(curve, CurveMode::PingPong)
            .wait(0.0)
            .move_for(1.0)
            .build()
            .unwrap();
        let mut machine = MotionState::new(config).unwrap();

        machine.advance_clock(0.0);
        prop_assert_eq!(machine.position_index(), 1);
        machine.advance_clock(fraction);
        prop_assert_eq!(machine.compute_pose(), Some(curve(fraction)));

        machine.advance_clock(1.0);
        prop_assert_eq!(machine.phase(), Phase::Waiting);
        machine.advance_clock(0.0);
        prop_assert_eq!(machine.position_index(), 0);
        machine.advance_clock(fraction);
        prop_assert_eq!(machine.compute_pose(), Some(curve(1.0 - fraction)));
    }
}
