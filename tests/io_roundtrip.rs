//! Mirrors `original_source/FSMlibTest/Model/IOtests.cpp`: `.fsm` text
//! format save/load round-tripping across variants.

use fsmlib::model::{load, save, unique_name};
use fsmlib::{Fsm, Variant};
use std::env::temp_dir;

fn scratch_path(tag: &str) -> std::path::PathBuf {
    temp_dir().join(unique_name(&format!("fsmlib_io_{tag}_"), ".fsm", ""))
}

#[test]
fn mealy_round_trips_through_disk() {
    let mut fsm = Fsm::create(Variant::Mealy, 3, 2, 2);
    fsm.set_transition(0, 0, 1, Some(0)).unwrap();
    fsm.set_transition(0, 1, 2, Some(1)).unwrap();
    fsm.set_transition(1, 0, 0, Some(1)).unwrap();
    fsm.set_transition(2, 1, 0, Some(0)).unwrap();

    let path = scratch_path("mealy");
    save(&fsm, &path).unwrap();
    let loaded = load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.variant(), Variant::Mealy);
    assert_eq!(loaded.state_count(), fsm.state_count());
    for s in fsm.states() {
        for i in 0..fsm.input_count() {
            assert_eq!(loaded.next_state(s, i), fsm.next_state(s, i));
            assert_eq!(loaded.output(s, i), fsm.output(s, i));
        }
    }
}

#[test]
fn moore_round_trip_preserves_state_outputs() {
    use fsmlib::STOUT_INPUT;
    let mut fsm = Fsm::create(Variant::Moore, 2, 1, 2);
    fsm.set_output(0, None, 0).unwrap();
    fsm.set_output(1, None, 1).unwrap();
    fsm.set_transition(0, 0, 1, None).unwrap();
    fsm.set_transition(1, 0, 0, None).unwrap();

    let path = scratch_path("moore");
    save(&fsm, &path).unwrap();
    let loaded = load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.output(0, STOUT_INPUT), 0);
    assert_eq!(loaded.output(1, STOUT_INPUT), 1);
    assert_eq!(loaded.next_state(0, 0), 1);
}

#[test]
fn dfa_round_trip_preserves_accept_reject_marks() {
    use fsmlib::STOUT_INPUT;
    let mut fsm = Fsm::create(Variant::Dfa, 2, 1, 2);
    fsm.set_output(0, None, 1).unwrap();
    fsm.set_output(1, None, 0).unwrap();
    fsm.set_transition(0, 0, 1, None).unwrap();
    fsm.set_transition(1, 0, 1, None).unwrap();

    let path = scratch_path("dfa");
    save(&fsm, &path).unwrap();
    let loaded = load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.variant(), Variant::Dfa);
    assert_eq!(loaded.output(0, STOUT_INPUT), 1);
    assert_eq!(loaded.output(1, STOUT_INPUT), 0);
}

#[test]
fn loading_a_missing_file_reports_io_failure() {
    let path = scratch_path("missing_never_written");
    assert!(load(&path).is_err());
}

#[test]
fn loading_malformed_text_reports_io_failure() {
    let path = scratch_path("garbage");
    std::fs::write(&path, "not a valid fsm file\n").unwrap();
    let result = load(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}
