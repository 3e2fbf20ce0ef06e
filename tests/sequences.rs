//! Mirrors `original_source/FSMlibTest/Sequences/*.cpp`: separating
//! sequences, the splitting tree, the distinguishing-sequence family, and
//! cover construction, run against a small reduced Mealy machine and a
//! machine with a known preset distinguishing sequence.

use fsmlib::model::Fsm;
use fsmlib::sequence::{covers, distinguishing, separating, splitting_tree};
use fsmlib::Variant;

/// 3 states, pairwise distinguishable by a single input.
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
fn separating_sequences_distinguish_every_resolved_pair() {
    let fsm = reduced_mealy();
    let seps = separating::compute(&fsm);
    for (i, j) in seps.resolved_pairs() {
        let seq = seps.sequence_for(i, j);
        assert!(!seq.is_empty());
        assert_ne!(fsm.output_along_path(i, &seq), fsm.output_along_path(j, &seq));
    }
}

#[test]
fn splitting_tree_separates_every_state_pair_of_a_reduced_machine() {
    let fsm = reduced_mealy();
    let tree = splitting_tree::build(&fsm).unwrap();
    let pair_seqs = tree.state_pair_sequences();
    for s in fsm.states() {
        for t in fsm.states() {
            if s == t {
                continue;
            }
            let key = if s < t { (s, t) } else { (t, s) };
            let seq = pair_seqs.get(&key).expect("reduced machine separates every pair");
            assert_ne!(fsm.output_along_path(s, seq), fsm.output_along_path(t, seq));
        }
    }
}

#[test]
fn characterizing_set_distinguishes_all_states() {
    let fsm = reduced_mealy();
    let cset = distinguishing::characterizing_set(&fsm).unwrap();
    assert!(!cset.is_empty());
    for s in fsm.states() {
        for t in fsm.states() {
            if s == t {
                continue;
            }
            assert!(
                cset.iter().any(|seq| fsm.output_along_path(s, seq) != fsm.output_along_path(t, seq)),
                "no sequence in the characterizing set distinguishes {s} from {t}"
            );
        }
    }
}

#[test]
fn preset_distinguishing_sequence_pins_down_the_current_state() {
    let fsm = reduced_mealy();
    if let Some(seq) = distinguishing::preset_distinguishing_sequence(&fsm) {
        let mut seen = std::collections::HashSet::new();
        for s in fsm.states() {
            let out = fsm.output_along_path(s, &seq);
            assert!(seen.insert(out), "PDS must produce a distinct trace per starting state");
        }
    }
}

#[test]
fn a_single_state_machine_has_no_meaningful_separating_work() {
    let fsm = Fsm::create(Variant::Mealy, 1, 1, 1);
    let seps = separating::compute(&fsm);
    assert!(seps.resolved_pairs().is_empty());
}

#[test]
fn state_cover_reaches_every_state_from_the_initial_one() {
    let fsm = reduced_mealy();
    let cover = covers::state_cover(&fsm);
    assert_eq!(cover.len(), fsm.state_count());
    for (&state, seq) in &cover {
        assert_eq!(fsm.end_path_state(0, seq), state);
    }
}

#[test]
fn transition_cover_contains_the_state_cover_as_a_prefix_closed_subset() {
    let fsm = reduced_mealy();
    let cover = covers::state_cover(&fsm);
    let transitions = covers::transition_cover(&fsm);
    for seq in cover.values() {
        assert!(
            transitions.contains(seq) || transitions.iter().any(|t| t.starts_with(seq.as_slice())),
            "transition cover must extend every state-cover access sequence"
        );
    }
}

#[test]
fn homing_sequence_always_lands_on_an_identifiable_state() {
    let fsm = reduced_mealy();
    if let Some(seq) = distinguishing::homing_sequence(&fsm) {
        let mut traces = std::collections::HashMap::new();
        for s in fsm.states() {
            let out = fsm.output_along_path(s, &seq);
            let end = fsm.end_path_state(s, &seq);
            if let Some(&prev_end) = traces.get(&out) {
                assert_eq!(prev_end, end, "two states sharing a homing trace must land on the same state");
            } else {
                traces.insert(out, end);
            }
        }
    }
}
