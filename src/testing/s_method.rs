//! The S-method and its incremental extension S_ext (spec §4.8).
//!
//! The full S-method builds a divergence-preserving state cover directly
//! off the splitting tree and maintains it incrementally as new
//! transitions are explored. [`hsi_method`](super::hsi::hsi_method)
//! already reads its harmonized identifiers straight from the splitting
//! tree, and [`spyh_method`](super::spyh::spyh_method) already builds on
//! top of that — so under this implementation `s_method` coincides with
//! `spyh_method`, short of the incremental bookkeeping. `s_ext` models
//! "extend a partial suite without re-querying" as a plain set union: it
//! never removes anything already in `base`.

use super::validate;
use crate::model::{Fsm, SequenceSet};

pub fn s_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    super::spyh::spyh_method(fsm, extra_states)
}

/// Extends an already-computed suite `base` with additional coverage for
/// `extra_states` more states, without discarding anything already in
/// `base`.
pub fn s_ext(fsm: &Fsm, base: &SequenceSet, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return base.clone();
    }
    let mut out = base.clone();
    out.extend(s_method(fsm, extra_states));
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
    fn s_method_matches_spyh() {
        let fsm = reduced_mealy();
        assert_eq!(s_method(&fsm, 0), super::super::spyh::spyh_method(&fsm, 0));
    }

    #[test]
    fn s_ext_never_drops_entries_from_base() {
        let fsm = reduced_mealy();
        let base = s_method(&fsm, 0);
        let extended = s_ext(&fsm, &base, 1);
        for seq in &base {
            assert!(extended.contains(seq));
        }
    }
}
