//! End-to-end measurement walkthroughs and session invariants.

use proptest::prelude::*;
use tapmeasure_core::Point3;
use tapmeasure_session::{MeasurementSession, MeasurementState};

#[test]
fn scripted_walkthrough() {
    let mut session = MeasurementSession::new();
    assert_eq!(session.current_distance_text(), "Distance: --");

    session.toggle_measuring();
    session.on_candidate_position(Point3::new(0.0, 0.0, 0.0));
    assert_eq!(session.current_distance_text(), "Distance: --");

    session.on_candidate_position(Point3::new(3.0, 4.0, 0.0));
    assert_eq!(session.current_distance_text(), "Distance: 5.00 m");

    session.on_candidate_position(Point3::new(0.0, 0.0, 0.0));
    assert_eq!(session.current_distance_text(), "Distance: 0.00 m");

    session.toggle_measuring();
    assert_eq!(session.current_distance_text(), "Distance: --");
    assert!(!session.is_measuring());
}

#[derive(Debug, Clone)]
enum Op {
    Toggle,
    Candidate(f32, f32, f32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Toggle),
        4 => (-50.0f32..50.0, -50.0f32..50.0, -50.0f32..50.0)
            .prop_map(|(x, y, z)| Op::Candidate(x, y, z)),
    ]
}

fn apply(session: &mut MeasurementSession, ops: &[Op]) {
    for op in ops {
        match *op {
            Op::Toggle => session.toggle_measuring(),
            Op::Candidate(x, y, z) => session.on_candidate_position(Point3::new(x, y, z)),
        }
    }
}

proptest! {
    #[test]
    fn end_never_set_without_start(ops in prop::collection::vec(op(), 0..40)) {
        let mut session = MeasurementSession::new();
        apply(&mut session, &ops);
        if session.end().is_some() {
            prop_assert!(session.start().is_some());
        }
        if !session.is_measuring() {
            prop_assert_eq!(session.state(), MeasurementState::Idle);
        }
    }

    #[test]
    fn toggle_off_then_on_awaits_start(ops in prop::collection::vec(op(), 0..40)) {
        let mut session = MeasurementSession::new();
        apply(&mut session, &ops);
        if session.is_measuring() {
            session.toggle_measuring();
        }
        session.toggle_measuring();
        prop_assert_eq!(session.state(), MeasurementState::AwaitingStart);
        prop_assert_eq!(session.start(), None);
        prop_assert_eq!(session.end(), None);
    }

    #[test]
    fn distance_text_is_idempotent(ops in prop::collection::vec(op(), 0..40)) {
        let mut session = MeasurementSession::new();
        apply(&mut session, &ops);
        let first = session.current_distance_text();
        prop_assert_eq!(first, session.current_distance_text());
    }
}
