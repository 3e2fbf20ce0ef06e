//! The SVS-method: for every state-cover entry extended by a traversal
//! word of length up to `extra_states`, append the reached state's own
//! verifying sequence; once a traversal word reaches the full length
//! `extra_states`, also append every outgoing transition's target's own
//! verifying sequence. Fails if any reached state lacks a verifying
//! sequence (spec §4.8).
//!
//! This is `SVS-method.cpp`'s `traversalSet`/per-state-SVS extension
//! phase (lines 81-120), which is what makes the suite's fault-coverage
//! guarantee hold for m = `extra_states` > 0, not only for m = 0; the
//! original's separate STOUT-input bookkeeping for output-state variants
//! is dropped since sequences here carry no state-output markers.

use super::{trim_to_maximal, validate};
use crate::error::{notice, FsmError};
use crate::model::{Fsm, InputSeq, SequenceSet, NULL_STATE, WRONG_STATE};
use crate::sequence::{covers, distinguishing};

pub fn svs_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    let sc = covers::state_cover(fsm);
    let mut traversal = covers::traversal_set(fsm, extra_states as usize);
    traversal.insert(InputSeq::new());
    let depth = extra_states as usize;

    let mut out = SequenceSet::new();
    for base in sc.values() {
        for w in &traversal {
            let mut transfer = base.clone();
            transfer.extend_from_slice(w);
            let end = fsm.end_path_state(0, &transfer);
            if end == NULL_STATE || end == WRONG_STATE {
                continue;
            }
            let svs = match distinguishing::state_verifying_sequence(fsm, end) {
                Some(svs) => svs,
                None => {
                    notice(&FsmError::NotApplicable(format!(
                        "state {end} has no verifying sequence"
                    )));
                    return SequenceSet::new();
                }
            };
            let mut full = transfer.clone();
            full.extend_from_slice(&svs);
            out.insert(full);

            if w.len() == depth {
                for i in 0..fsm.input_count() {
                    let next = fsm.next_state(end, i);
                    if next == NULL_STATE {
                        continue;
                    }
                    if let Some(next_svs) = distinguishing::state_verifying_sequence(fsm, next) {
                        let mut full = transfer.clone();
                        full.push(i);
                        full.extend_from_slice(&next_svs);
                        out.insert(full);
                    }
                }
            }
        }
    }
    trim_to_maximal(out)
}
