//! The SPYH-method: SPY's coverage plus H's greedy pairwise refinement
//! (spec §4.8). Implemented as the union of the two, which preserves
//! both methods' coverage guarantees without the original's shared
//! convergent-node bookkeeping — see the simplifications noted in
//! [`super::spy`] and [`super::h`].

use super::validate;
use crate::model::{Fsm, SequenceSet};

pub fn spyh_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    let mut out = super::spy::spy_method(fsm, extra_states);
    out.extend(super::h::h_method(fsm, extra_states));
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
    fn spyh_method_contains_both_spy_and_h() {
        let fsm = reduced_mealy();
        let spy = super::super::spy::spy_method(&fsm, 0);
        let h = super::super::h::h_method(&fsm, 0);
        let spyh = spyh_method(&fsm, 0);
        for seq in spy.iter().chain(h.iter()) {
            assert!(spyh.contains(seq));
        }
    }
}
