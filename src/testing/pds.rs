//! The PDS-method: append the single global preset distinguishing
//! sequence to every transition-cover entry. Only applicable when a PDS
//! exists (spec §4.8).

use super::validate;
use crate::error::{notice, FsmError};
use crate::model::{Fsm, SequenceSet};
use crate::sequence::{covers, distinguishing};

pub fn pds_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    let Some(pds) = distinguishing::preset_distinguishing_sequence(fsm) else {
        notice(&FsmError::NotApplicable("no preset distinguishing sequence exists".into()));
        return SequenceSet::new();
    };
    covers::transition_cover(fsm)
        .into_iter()
        .map(|mut t| {
            t.extend_from_slice(&pds);
            t
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variant;

    fn dfa_with_pds() -> Fsm {
        let mut fsm = Fsm::create(Variant::Dfa, 3, 1, 2);
        fsm.set_transition(0, 0, 1, None).unwrap();
        fsm.set_transition(1, 0, 2, None).unwrap();
        fsm.set_transition(2, 0, 0, None).unwrap();
        fsm.set_output(0, None, 0).unwrap();
        fsm.set_output(1, None, 1).unwrap();
        fsm.set_output(2, None, 0).unwrap();
        fsm
    }

    #[test]
    fn pds_method_is_nonempty_when_a_pds_exists() {
        let fsm = dfa_with_pds();
        assert!(!pds_method(&fsm, 0).is_empty());
    }

    #[test]
    fn pds_method_fails_gracefully_without_a_pds() {
        // Two states with no distinguishing behavior difference ever.
        let mut fsm = Fsm::create(Variant::Mealy, 2, 1, 1);
        fsm.set_transition(0, 0, 1, Some(0)).unwrap();
        fsm.set_transition(1, 0, 0, Some(0)).unwrap();
        assert!(pds_method(&fsm, 0).is_empty());
    }
}
