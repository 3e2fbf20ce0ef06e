//! Mirrors `original_source/FSMlibTest/Model/BasicOpsTests.cpp`: transition
//! and output mutation, removal, and path-following over the public API.

use fsmlib::{Fsm, Variant, NULL_STATE, WRONG_OUTPUT, WRONG_STATE};

fn reduced_mealy() -> Fsm {
    let mut fsm = Fsm::create(Variant::Mealy, 3, 2, 2);
    fsm.set_transition(0, 0, 1, Some(0)).unwrap();
    fsm.set_transition(0, 1, 2, Some(1)).unwrap();
    fsm.set_transition(1, 0, 0, Some(1)).unwrap();
    fsm.set_transition(1, 1, 2, Some(0)).unwrap();
    fsm.set_transition(2, 0, 1, Some(0)).unwrap();
    fsm.set_transition(2, 1, 0, Some(1)).unwrap();
    fsm
}

#[test]
fn next_state_and_output_agree_with_set_transition() {
    let fsm = reduced_mealy();
    assert_eq!(fsm.next_state(0, 0), 1);
    assert_eq!(fsm.output(0, 0), 0);
    assert_eq!(fsm.next_state(2, 1), 0);
    assert_eq!(fsm.output(2, 1), 1);
}

#[test]
fn output_along_path_follows_a_whole_sequence() {
    let fsm = reduced_mealy();
    let out = fsm.output_along_path(0, &[0, 1, 0]);
    assert_eq!(out, vec![0, 0, 1]);
}

#[test]
fn output_along_path_reports_wrong_output_past_an_undefined_transition() {
    let mut fsm = Fsm::create(Variant::Mealy, 2, 2, 2);
    fsm.set_transition(0, 0, 1, Some(0)).unwrap();
    // input 1 from state 0 is left undefined
    let out = fsm.output_along_path(0, &[0, 1, 0]);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0], 0);
    assert_eq!(out[1], WRONG_OUTPUT);
    assert_eq!(out[2], WRONG_OUTPUT);
}

#[test]
fn mealy_rejects_setting_a_state_output() {
    let mut fsm = Fsm::create(Variant::Mealy, 2, 1, 2);
    assert!(fsm.set_output(0, None, 0).is_err());
}

#[test]
fn moore_rejects_setting_a_transition_output() {
    let mut fsm = Fsm::create(Variant::Moore, 2, 1, 2);
    assert!(fsm.set_transition(0, 0, 1, Some(0)).is_err());
}

#[test]
fn remove_state_detaches_incoming_transitions() {
    let mut fsm = reduced_mealy();
    fsm.remove_state(2).unwrap();
    assert_eq!(fsm.next_state(0, 1), NULL_STATE);
    assert_eq!(fsm.next_state(1, 1), NULL_STATE);
}

#[test]
fn the_initial_state_cannot_be_removed() {
    let mut fsm = reduced_mealy();
    assert!(fsm.remove_state(0).is_err());
}

#[test]
fn out_of_range_queries_report_wrong_state_or_output() {
    let fsm = reduced_mealy();
    assert_eq!(fsm.next_state(99, 0), WRONG_STATE);
    assert_eq!(fsm.output(0, 99), WRONG_OUTPUT);
}
