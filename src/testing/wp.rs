//! The Wp-method: the state cover extended by the full characterizing
//! set (state identification), plus the remaining transition-cover edges
//! extended by traversal and the *reached state's* characterizing set
//! (transition identification) — a smaller suite than W whenever a
//! per-state characterizing set is smaller than the global one (spec
//! §4.8).

use super::{trim_to_maximal, validate};
use crate::model::{Fsm, SequenceSet, InputSeq, NULL_STATE, WRONG_STATE};
use crate::sequence::{covers, distinguishing};

pub fn wp_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    let cset = match distinguishing::characterizing_set(fsm) {
        Ok(c) => c,
        Err(_) => return SequenceSet::new(),
    };
    let scset = match distinguishing::state_characterizing_sets(fsm) {
        Ok(s) => s,
        Err(_) => return SequenceSet::new(),
    };
    let sc = covers::state_cover(fsm);
    let tc = covers::transition_cover(fsm);
    let trav = covers::traversal_set(fsm, extra_states as usize + 1);

    let mut out = SequenceSet::new();

    // Phase 1: state identification.
    for seq in sc.values() {
        for c in &cset {
            let mut full = seq.clone();
            full.extend_from_slice(c);
            out.insert(full);
        }
    }

    // Phase 2: transition identification, restricted to the cover edges
    // the state cover itself doesn't already include.
    let sc_members: SequenceSet = sc.values().cloned().collect();
    let empty = SequenceSet::new();
    for t in tc.iter().filter(|t| !sc_members.contains(*t)) {
        for w in &trav {
            let mut prefix: InputSeq = t.clone();
            prefix.extend_from_slice(w);
            let end = fsm.end_path_state(0, &prefix);
            if end == NULL_STATE || end == WRONG_STATE {
                continue;
            }
            let ids = scset.get(&end).unwrap_or(&empty);
            if ids.is_empty() {
                out.insert(prefix.clone());
                continue;
            }
            for h in ids {
                let mut full = prefix.clone();
                full.extend_from_slice(h);
                out.insert(full);
            }
        }
    }
    trim_to_maximal(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variant;

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
    fn wp_method_is_nonempty_for_a_reduced_machine() {
        let fsm = reduced_mealy();
        assert!(!wp_method(&fsm, 0).is_empty());
    }

    #[test]
    fn wp_method_and_w_method_are_both_nonempty() {
        let fsm = reduced_mealy();
        let wp = wp_method(&fsm, 0);
        let w = super::super::w::w_method(&fsm, 0);
        assert!(!wp.is_empty() && !w.is_empty());
    }

    #[test]
    fn wp_method_rejects_negative_extra_states() {
        let fsm = reduced_mealy();
        assert!(wp_method(&fsm, -1).is_empty());
    }
}
