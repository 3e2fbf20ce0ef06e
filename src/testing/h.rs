//! The H-method: start from the transition cover, extend every entry the
//! state cover itself doesn't already reach by each traversal word up to
//! `extra_states` (the way `H-method.cpp`'s `createBasicTree` grows its
//! extension nodes to depth `extraStates` before distinguishing), and for
//! every pair of entries reaching distinct states, greedily append the
//! pair's shortest separating sequence (spec §4.8).
//!
//! This keeps the core idea — a targeted, minimal-length extension per
//! pair rather than the W-method's blanket characterizing set — but
//! simplifies away the original's prefix-sharing bookkeeping: each
//! extension is recorded as its own suite member instead of being
//! spliced into a shared convergent tree node.

use super::validate;
use crate::model::{Fsm, InputSeq, SequenceSet, NULL_STATE};
use crate::sequence::{covers, separating};

pub fn h_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    let tc: Vec<_> = covers::transition_cover(fsm).into_iter().collect();
    let sc: SequenceSet = covers::state_cover(fsm).into_values().collect();
    let sep = separating::compute(fsm);

    let mut nodes: Vec<InputSeq> = tc.clone();
    if extra_states > 0 {
        let traversal = covers::traversal_set(fsm, extra_states as usize);
        for base in tc.iter().filter(|t| !sc.contains(*t)) {
            for w in &traversal {
                if w.is_empty() {
                    continue;
                }
                let mut extended = base.clone();
                extended.extend_from_slice(w);
                nodes.push(extended);
            }
        }
    }

    let mut out: SequenceSet = nodes.iter().cloned().collect();
    for a in 0..nodes.len() {
        for b in (a + 1)..nodes.len() {
            let end_a = fsm.end_path_state(0, &nodes[a]);
            let end_b = fsm.end_path_state(0, &nodes[b]);
            if end_a == end_b || end_a == NULL_STATE || end_b == NULL_STATE {
                continue;
            }
            let extra = sep.sequence_for(end_a, end_b);
            if extra.is_empty() {
                continue;
            }
            let mut full_a = nodes[a].clone();
            full_a.extend_from_slice(&extra);
            let mut full_b = nodes[b].clone();
            full_b.extend_from_slice(&extra);
            out.insert(full_a);
            out.insert(full_b);
        }
    }
    out
}
