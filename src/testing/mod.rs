//! Checking-experiment methods (C8): each takes `(fsm, extra_states)` and
//! returns a test suite `TS` guaranteeing that any FSM with at most
//! `n + extra_states` states equivalent to `fsm` on every sequence of
//! `TS` is isomorphic to it (spec §4.8).
//!
//! Every method validates its input the same way: `extra_states` must be
//! non-negative and `fsm` must be compact (`state_count() == capacity()`,
//! i.e. already through [`crate::model::Fsm::make_compact`]). Invalid
//! input returns an empty suite and emits one diagnostic, never panics.

pub mod ads;
pub mod c_method;
pub mod h;
pub mod hsi;
pub mod pds;
pub mod s_method;
pub mod segments;
pub mod spy;
pub mod spyh;
pub mod svs;
pub mod w;
pub mod wp;

use crate::error::{notice, FsmError};
use crate::model::{Fsm, InputSeq, SequenceSet, StateId, NULL_STATE};
use crate::prefix_set::PrefixSet;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Funnels `suite` through a [`PrefixSet`] and keeps only the maximal
/// sequences, the way every C8 method's original C++ counterpart ends
/// with `pset.getMaximalSequences(TS)`.
pub(crate) fn trim_to_maximal(suite: SequenceSet) -> SequenceSet {
    let mut pset = PrefixSet::new();
    for seq in &suite {
        pset.insert(seq);
    }
    pset.maximal_sequences()
}

pub(crate) fn validate(fsm: &Fsm, extra_states: i64) -> bool {
    if extra_states < 0 {
        notice(&FsmError::InvalidArgument("extra_states must be non-negative".into()));
        return false;
    }
    if fsm.state_count() != fsm.capacity() {
        notice(&FsmError::InvalidArgument("fsm must be compact before testing".into()));
        return false;
    }
    true
}

/// Shortest input sequence from `from` to `to`, or `None` if unreachable.
/// Shared by the segment-connecting methods (Ma/Mg and friends), which
/// need to splice a detour between two segments whose states don't
/// already line up.
pub(crate) fn path_between(fsm: &Fsm, from: StateId, to: StateId) -> Option<InputSeq> {
    if from == to {
        return Some(InputSeq::new());
    }
    let mut visited = FxHashSet::default();
    visited.insert(from);
    let mut queue = VecDeque::new();
    queue.push_back((from, InputSeq::new()));
    while let Some((s, seq)) = queue.pop_front() {
        for i in 0..fsm.input_count() {
            let t = fsm.next_state(s, i);
            if t == NULL_STATE {
                continue;
            }
            if t == to {
                let mut out = seq.clone();
                out.push(i);
                return Some(out);
            }
            if visited.insert(t) {
                let mut out = seq.clone();
                out.push(i);
                queue.push_back((t, out));
            }
        }
    }
    None
}
