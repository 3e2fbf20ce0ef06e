//! The SPY-method: an HSI-method core, extended so that every transition
//! not already covered by it still gets an HSI-suffixed walk up to
//! `extra_states` steps past its target (spec §4.8).
//!
//! The full method builds a convergent tree and merges nodes as it
//! discovers shared behavior, reusing queried prefixes across
//! transitions. This implementation keeps the coverage guarantee —
//! every transition's target, and every state reachable from it within
//! `extra_states` steps, gets identified by harmonized sequences — but
//! skips the convergent-node sharing, so the suite is a flat union
//! rather than a single merged tree.

use super::validate;
use crate::model::{Fsm, SequenceSet, NULL_STATE, WRONG_STATE};
use crate::sequence::{covers, distinguishing};

pub fn spy_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    let hsi = match distinguishing::state_characterizing_sets(fsm) {
        Ok(h) => h,
        Err(_) => return SequenceSet::new(),
    };
    let cover = covers::state_cover(fsm);
    let trav = covers::traversal_set(fsm, extra_states as usize + 1);
    let empty = SequenceSet::new();

    let mut out = super::hsi::hsi_method(fsm, extra_states);

    for s in fsm.states() {
        let Some(reach) = cover.get(&s) else { continue };
        for i in 0..fsm.input_count() {
            let t = fsm.next_state(s, i);
            if t == NULL_STATE {
                continue;
            }
            for w in &trav {
                let end = fsm.end_path_state(t, w);
                if end == NULL_STATE || end == WRONG_STATE {
                    continue;
                }
                let mut base = reach.clone();
                base.push(i);
                base.extend_from_slice(w);
                let ids = hsi.get(&end).unwrap_or(&empty);
                if ids.is_empty() {
                    out.insert(base.clone());
                } else {
                    for h in ids {
                        let mut full = base.clone();
                        full.extend_from_slice(h);
                        out.insert(full);
                    }
                }
            }
        }
    }
    out
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
    fn spy_method_contains_the_hsi_core() {
        let fsm = reduced_mealy();
        let hsi = super::super::hsi::hsi_method(&fsm, 0);
        let spy = spy_method(&fsm, 0);
        for seq in &hsi {
            assert!(spy.contains(seq));
        }
    }

    #[test]
    fn spy_method_rejects_negative_extra_states() {
        let fsm = reduced_mealy();
        assert!(spy_method(&fsm, -1).is_empty());
    }
}
