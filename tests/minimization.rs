//! Mirrors `original_source/FSMlibTest/Model/MinimizationTests.cpp`.

use fsmlib::{Fsm, Variant};

/// States 1 and 2 are behaviorally equivalent (both self-loop forever
/// emitting `1`); state 0 is distinguishable from both (its first output
/// is `0`). Minimizing should collapse states 1 and 2 into one.
fn redundant_mealy() -> Fsm {
    let mut fsm = Fsm::create(Variant::Mealy, 3, 1, 1);
    fsm.set_transition(0, 0, 1, Some(0)).unwrap();
    fsm.set_transition(1, 0, 1, Some(1)).unwrap();
    fsm.set_transition(2, 0, 2, Some(1)).unwrap();
    fsm
}

#[test]
fn minimize_collapses_equivalent_states() {
    let mut fsm = redundant_mealy();
    fsm.minimize().unwrap();
    assert_eq!(fsm.state_count(), 2);
}

#[test]
fn minimize_is_idempotent() {
    let mut once = redundant_mealy();
    once.minimize().unwrap();
    let mut twice = once.clone();
    twice.minimize().unwrap();
    assert_eq!(once.state_count(), twice.state_count());
    for s in once.states() {
        assert_eq!(once.next_state(s, 0), twice.next_state(s, 0));
    }
}

#[test]
fn minimize_rejects_an_empty_machine() {
    let mut fsm = Fsm::create(Variant::Mealy, 0, 1, 1);
    assert!(fsm.minimize().is_err());
}

#[test]
fn is_reduced_is_false_before_minimizing_a_redundant_machine() {
    let fsm = redundant_mealy();
    assert!(!fsm.is_reduced());
}

#[test]
fn is_reduced_is_true_after_minimizing() {
    let mut fsm = redundant_mealy();
    fsm.minimize().unwrap();
    assert!(fsm.is_reduced());
}

#[test]
fn minimize_drops_unreachable_states_first() {
    let mut fsm = Fsm::create(Variant::Mealy, 3, 1, 1);
    fsm.set_transition(0, 0, 0, Some(0)).unwrap();
    // state 1 is unreachable, state 2 likewise.
    fsm.set_transition(1, 0, 2, Some(1)).unwrap();
    fsm.set_transition(2, 0, 1, Some(1)).unwrap();
    fsm.minimize().unwrap();
    assert_eq!(fsm.state_count(), 1);
}
