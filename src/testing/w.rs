//! The W-method: append the full characterizing set to every element of
//! `transition_cover × traversal_set(m)`. Always applicable to a reduced,
//! compact machine (spec §4.8).

use super::{trim_to_maximal, validate};
use crate::model::{Fsm, SequenceSet};
use crate::sequence::{covers, distinguishing};

pub fn w_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    let cset = match distinguishing::characterizing_set(fsm) {
        Ok(c) => c,
        Err(_) => return SequenceSet::new(),
    };
    let tc = covers::transition_cover(fsm);
    let trav = covers::traversal_set(fsm, extra_states as usize + 1);

    let mut out = SequenceSet::new();
    for t in &tc {
        for w in &trav {
            for c in &cset {
                let mut seq = t.clone();
                seq.extend_from_slice(w);
                seq.extend_from_slice(c);
                out.insert(seq);
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
    fn w_method_is_nonempty_for_a_reduced_machine() {
        let fsm = reduced_mealy();
        let ts = w_method(&fsm, 0);
        assert!(!ts.is_empty());
    }

    #[test]
    fn w_method_rejects_negative_extra_states() {
        let fsm = reduced_mealy();
        assert!(w_method(&fsm, -1).is_empty());
    }

    #[test]
    fn w_method_includes_transition_cover_extended_by_characterizing_set() {
        let fsm = reduced_mealy();
        let ts = w_method(&fsm, 0);
        let cset = distinguishing::characterizing_set(&fsm).unwrap();
        let tc = covers::transition_cover(&fsm);
        for t in &tc {
            for c in &cset {
                let mut seq = t.clone();
                seq.extend_from_slice(c);
                assert!(ts.contains(&seq));
            }
        }
    }
}
