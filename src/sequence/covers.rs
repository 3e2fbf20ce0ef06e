// Copyright 2024 Nathan Hoos
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cover construction (C7): state covers, transition covers, and bounded
//! traversal sets, the building blocks every checking-experiment method
//! in C8 assembles its test suite from (spec §4.7).

use crate::model::{Fsm, InputId, InputSeq, SequenceSet, StateId, NULL_STATE, STOUT_INPUT};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// One input sequence per reachable state, the shortest reaching it from
/// state 0 (ties broken lexicographically by always trying inputs in
/// ascending order during the BFS).
pub fn state_cover(fsm: &Fsm) -> FxHashMap<StateId, InputSeq> {
    let mut reached: FxHashMap<StateId, InputSeq> = FxHashMap::default();
    if fsm.state_count() == 0 {
        return reached;
    }
    reached.insert(0, InputSeq::new());
    let mut queue = VecDeque::new();
    queue.push_back(0usize);
    while let Some(s) = queue.pop_front() {
        let prefix = reached[&s].clone();
        for i in 0..fsm.input_count() {
            let t = fsm.next_state(s, i);
            if t == NULL_STATE || reached.contains_key(&t) {
                continue;
            }
            let mut seq = prefix.clone();
            seq.push(i);
            reached.insert(t, seq);
            queue.push_back(t);
        }
    }
    reached
}

/// The state cover, extended by every single-input continuation from
/// each covered state (plus the empty sequence, when state 0 itself
/// emits an output worth covering).
pub fn transition_cover(fsm: &Fsm) -> SequenceSet {
    let cover = state_cover(fsm);
    let mut out = SequenceSet::new();
    if fsm.is_output_state() {
        out.insert(InputSeq::new());
    }
    for seq in cover.values() {
        out.insert(seq.clone());
    }
    for (&s, seq) in &cover {
        for i in 0..fsm.input_count() {
            if fsm.next_state(s, i) == NULL_STATE {
                continue;
            }
            let mut extended = seq.clone();
            extended.push(i);
            out.insert(extended);
        }
    }
    out
}

/// Every input word of length at most `depth` (the empty word included
/// only when `depth > 0`, per spec §4.7's convention that `depth == 0`
/// yields the empty set).
pub fn traversal_set(fsm: &Fsm, depth: usize) -> SequenceSet {
    let mut out = SequenceSet::new();
    if depth == 0 {
        return out;
    }
    let inputs: Vec<InputId> = (0..fsm.input_count()).collect();
    let mut frontier = vec![InputSeq::new()];
    out.insert(InputSeq::new());
    for _ in 0..depth {
        let mut next_frontier = Vec::new();
        for seq in &frontier {
            for &i in &inputs {
                let mut extended = seq.clone();
                extended.push(i);
                if out.insert(extended.clone()) {
                    next_frontier.push(extended);
                }
            }
        }
        frontier = next_frontier;
        if frontier.is_empty() {
            break;
        }
    }
    out
}

/// Interleaves `STOUT_INPUT` markers after every real input in `seq`, for
/// Moore-style variants whose checking-experiment methods need a state
/// output reading after each step, not just at the end.
pub fn interleave_stout(seq: &[InputId]) -> InputSeq {
    let mut out = Vec::with_capacity(seq.len() * 2);
    for &i in seq {
        out.push(i);
        out.push(STOUT_INPUT);
    }
    out
}
