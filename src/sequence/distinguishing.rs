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

//! The distinguishing-sequence family (C6): preset/adaptive distinguishing
//! sequences, state-verifying sequences, homing and synchronizing
//! sequences, and characterizing sets, plus their reduction variants
//! (spec §4.6).
//!
//! `preset_distinguishing_sequence`, `state_verifying_sequence`, and
//! `homing_sequence` share one search routine (`block_refinement_search`):
//! all three are BFS over a partition of `(initial, current)` pairs
//! refined one shared input at a time, differing only in their acceptance
//! predicate. This mirrors `FSMlibTest/Sequences/PDS.cpp`'s reference
//! checker, which re-derives the exact same block structure to validate a
//! PDS after the fact.
//!
//! A candidate input is only tried while every tracked state still has a
//! defined transition on it; partial machines that can never reach that
//! condition correctly report "no such sequence" rather than searching
//! forever (the original's PDS tests carry a `// TODO: incomplete
//! machines` marker acknowledging the same gap).

use super::splitting_tree::{self, SplittingTree};
use crate::error::FsmError;
use crate::model::{Fsm, InputId, InputSeq, OutputId, SequenceSet, StateId, NULL_STATE, STOUT_INPUT, WRONG_STATE};
use rustc_hash::FxHashMap;
use std::collections::{BTreeSet, HashSet, VecDeque};

fn candidate_inputs(fsm: &Fsm) -> Vec<InputId> {
    let mut inputs: Vec<InputId> = (0..fsm.input_count()).collect();
    if fsm.is_output_state() {
        inputs.push(STOUT_INPUT);
    }
    inputs
}

fn step(fsm: &Fsm, state: StateId, input: InputId) -> (StateId, OutputId) {
    let output = fsm.output(state, input);
    let next = if input == STOUT_INPUT { state } else { fsm.next_state(state, input) };
    (next, output)
}

#[derive(Clone)]
struct Entry {
    initial: StateId,
    current: StateId,
    block: usize,
}

fn canonical_signature(entries: &[Entry]) -> Vec<(usize, StateId)> {
    let mut remap: FxHashMap<usize, usize> = FxHashMap::default();
    entries
        .iter()
        .map(|e| {
            let n = remap.len();
            let nb = *remap.entry(e.block).or_insert(n);
            (nb, e.current)
        })
        .collect()
}

/// BFS over block-refinement states shared by PDS, HS, and SVS. Returns
/// the shortest sequence whose resulting entries satisfy `accept`, or
/// `None` if the reachable search space is exhausted first.
fn block_refinement_search(fsm: &Fsm, accept: impl Fn(&[Entry]) -> bool) -> Option<InputSeq> {
    let states = fsm.states();
    let start: Vec<Entry> = states
        .iter()
        .map(|&s| Entry { initial: s, current: s, block: 0 })
        .collect();

    if accept(&start) {
        return Some(InputSeq::new());
    }

    let inputs = candidate_inputs(fsm);
    let mut visited: HashSet<Vec<(usize, StateId)>> = HashSet::new();
    visited.insert(canonical_signature(&start));
    let mut queue: VecDeque<(Vec<Entry>, InputSeq)> = VecDeque::new();
    queue.push_back((start, InputSeq::new()));

    while let Some((entries, seq)) = queue.pop_front() {
        for &i in &inputs {
            if i != STOUT_INPUT
                && entries.iter().any(|e| {
                    let t = fsm.next_state(e.current, i);
                    t == NULL_STATE || t == WRONG_STATE
                })
            {
                continue;
            }
            let mut groups: FxHashMap<(usize, OutputId), usize> = FxHashMap::default();
            let mut next_entries = Vec::with_capacity(entries.len());
            for e in &entries {
                let (next, output) = step(fsm, e.current, i);
                let key = (e.block, output);
                let new_block = *groups.entry(key).or_insert_with(|| groups.len());
                next_entries.push(Entry { initial: e.initial, current: next, block: new_block });
            }
            let sig = canonical_signature(&next_entries);
            if visited.insert(sig) {
                let mut next_seq = seq.clone();
                next_seq.push(i);
                if accept(&next_entries) {
                    return Some(next_seq);
                }
                queue.push_back((next_entries, next_seq));
            }
        }
    }
    None
}

/// Preset distinguishing sequence: a single sequence after which every
/// state's initial identity is recoverable from the output trace alone.
pub fn preset_distinguishing_sequence(fsm: &Fsm) -> Option<InputSeq> {
    block_refinement_search(fsm, |entries| {
        let blocks: HashSet<usize> = entries.iter().map(|e| e.block).collect();
        blocks.len() == entries.len()
    })
}

/// State verifying sequence for `state`: exists iff `state`'s block
/// becomes a singleton (its behavior becomes distinguishable from every
/// other state's) under some sequence.
pub fn state_verifying_sequence(fsm: &Fsm, state: StateId) -> Option<InputSeq> {
    block_refinement_search(fsm, |entries| {
        let Some(mine) = entries.iter().find(|e| e.initial == state) else {
            return false;
        };
        entries.iter().filter(|e| e.block == mine.block).count() == 1
    })
}

/// Homing sequence: after running it, the current state is always
/// determined by the observed output trace (initials within a block may
/// still differ, but their current states must coincide).
pub fn homing_sequence(fsm: &Fsm) -> Option<InputSeq> {
    block_refinement_search(fsm, |entries| {
        let mut by_block: FxHashMap<usize, StateId> = FxHashMap::default();
        for e in entries {
            match by_block.get(&e.block) {
                Some(&c) if c != e.current => return false,
                _ => {
                    by_block.insert(e.block, e.current);
                }
            }
        }
        true
    })
}

/// Synchronizing sequence: drives every state into a single common
/// current state, found by BFS over the reachable image subsets (a
/// Černý-style reduction: each step must shrink or keep the set, and we
/// dedup visited subsets so the search terminates when exhausted).
pub fn synchronizing_sequence(fsm: &Fsm) -> Option<InputSeq> {
    let start: BTreeSet<StateId> = fsm.states().into_iter().collect();
    if start.len() <= 1 {
        return Some(InputSeq::new());
    }
    let mut visited: HashSet<BTreeSet<StateId>> = HashSet::new();
    visited.insert(start.clone());
    let mut queue: VecDeque<(BTreeSet<StateId>, InputSeq)> = VecDeque::new();
    queue.push_back((start, InputSeq::new()));

    while let Some((set, seq)) = queue.pop_front() {
        for i in 0..fsm.input_count() {
            let mut next_set = BTreeSet::new();
            let mut well_defined = true;
            for &s in &set {
                let t = fsm.next_state(s, i);
                if t == NULL_STATE || t == WRONG_STATE {
                    well_defined = false;
                    break;
                }
                next_set.insert(t);
            }
            if !well_defined {
                continue;
            }
            if next_set.len() == 1 {
                let mut out = seq.clone();
                out.push(i);
                return Some(out);
            }
            if visited.insert(next_set.clone()) {
                let mut next_seq = seq.clone();
                next_seq.push(i);
                queue.push_back((next_set, next_seq));
            }
        }
    }
    None
}

/// One node of an adaptive distinguishing sequence: either a resolved
/// initial state, or a branch that reads one more input and continues
/// down the child keyed by the observed output.
pub enum AdsNode {
    Leaf(StateId),
    Branch { input: InputId, children: FxHashMap<OutputId, AdsNode> },
}

fn build_ads(fsm: &Fsm, entries: &[(StateId, StateId)]) -> Option<AdsNode> {
    if entries.len() == 1 {
        return Some(AdsNode::Leaf(entries[0].0));
    }
    for i in candidate_inputs(fsm) {
        if i != STOUT_INPUT
            && entries.iter().any(|&(_, cur)| {
                let t = fsm.next_state(cur, i);
                t == NULL_STATE || t == WRONG_STATE
            })
        {
            continue;
        }
        let mut groups: FxHashMap<OutputId, Vec<(StateId, StateId)>> = FxHashMap::default();
        for &(initial, cur) in entries {
            let (next, output) = step(fsm, cur, i);
            groups.entry(output).or_default().push((initial, next));
        }
        if groups.len() <= 1 {
            continue;
        }
        let mut children = FxHashMap::default();
        let mut ok = true;
        for (output, members) in groups {
            match build_ads(fsm, &members) {
                Some(node) => {
                    children.insert(output, node);
                }
                None => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            return Some(AdsNode::Branch { input: i, children });
        }
    }
    None
}

/// Adaptive distinguishing sequence: exists iff a decision tree can
/// always pin down the initial state from observed outputs.
pub fn adaptive_distinguishing_sequence(fsm: &Fsm) -> Option<AdsNode> {
    let entries: Vec<(StateId, StateId)> = fsm.states().into_iter().map(|s| (s, s)).collect();
    build_ads(fsm, &entries)
}

/// Characterizing set: the union of every state pair's splitting-tree
/// separating sequence — a set guaranteed to distinguish all of `fsm`'s
/// states from one another.
pub fn characterizing_set(fsm: &Fsm) -> Result<SequenceSet, FsmError> {
    let tree = splitting_tree::build(fsm)?;
    Ok(tree.state_pair_sequences().into_values().filter(|s| !s.is_empty()).collect())
}

/// Per-state characterizing set: sequences enough to distinguish `state`
/// from every other state, read off the splitting tree's root-to-leaf
/// path for `state`.
pub fn state_characterizing_sets(
    fsm: &Fsm,
) -> Result<FxHashMap<StateId, SequenceSet>, FsmError> {
    let tree = splitting_tree::build(fsm)?;
    Ok(tree.harmonized_state_identifiers())
}

fn pairs_separated(fsm: &Fsm, pairs: &[(StateId, StateId)], seqs: &[InputSeq]) -> bool {
    pairs.iter().all(|&(si, sj)| {
        seqs.iter().any(|seq| fsm.output_along_path(si, seq) != fsm.output_along_path(sj, seq))
    })
}

fn reduce(fsm: &Fsm, pairs: &[(StateId, StateId)], set: &SequenceSet, longest_first: bool) -> SequenceSet {
    let mut seqs: Vec<InputSeq> = set.iter().cloned().collect();
    seqs.sort_by(|a, b| if longest_first { b.len().cmp(&a.len()) } else { a.len().cmp(&b.len()) });
    let mut kept = seqs.clone();
    for seq in &seqs {
        if let Some(idx) = kept.iter().position(|s| s == seq) {
            let mut candidate = kept.clone();
            candidate.remove(idx);
            if pairs_separated(fsm, pairs, &candidate) {
                kept = candidate;
            }
        }
    }
    kept.into_iter().collect()
}

fn all_pairs(states: &[StateId]) -> Vec<(StateId, StateId)> {
    let mut pairs = Vec::new();
    for a in 0..states.len() {
        for b in (a + 1)..states.len() {
            pairs.push((states[a], states[b]));
        }
    }
    pairs
}

/// Removes longest sequences first from a characterizing set, keeping a
/// removal only while the remainder still separates every pair.
pub fn reduce_cset_ls_sl(fsm: &Fsm, cset: &SequenceSet) -> SequenceSet {
    reduce(fsm, &all_pairs(&fsm.states()), cset, true)
}

/// Removes shortest sequences first (the complementary ordering to
/// [`reduce_cset_ls_sl`]).
pub fn reduce_cset_sl_ls(fsm: &Fsm, cset: &SequenceSet) -> SequenceSet {
    reduce(fsm, &all_pairs(&fsm.states()), cset, false)
}

/// Deduplicates only among the longest sequences in the set, leaving the
/// set's maximum length unchanged.
pub fn reduce_cset_equal_length(fsm: &Fsm, cset: &SequenceSet) -> SequenceSet {
    let states = fsm.states();
    let pairs = all_pairs(&states);
    let seqs: Vec<InputSeq> = cset.iter().cloned().collect();
    let max_len = seqs.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut kept = seqs.clone();
    for seq in seqs.iter().filter(|s| s.len() == max_len) {
        if let Some(idx) = kept.iter().position(|s| s == seq) {
            let mut candidate = kept.clone();
            candidate.remove(idx);
            if pairs_separated(fsm, &pairs, &candidate) {
                kept = candidate;
            }
        }
    }
    kept.into_iter().collect()
}

fn other_pairs(state: StateId, states: &[StateId]) -> Vec<(StateId, StateId)> {
    states.iter().filter(|&&s| s != state).map(|&s| (state, s)).collect()
}

/// Longest-first reduction of a single state's characterizing set.
pub fn reduce_scset_ls_sl(fsm: &Fsm, state: StateId, scset: &SequenceSet) -> SequenceSet {
    reduce(fsm, &other_pairs(state, &fsm.states()), scset, true)
}

/// Shortest-first reduction of a single state's characterizing set.
pub fn reduce_scset_sl_ls(fsm: &Fsm, state: StateId, scset: &SequenceSet) -> SequenceSet {
    reduce(fsm, &other_pairs(state, &fsm.states()), scset, false)
}
