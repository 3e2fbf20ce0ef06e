//! The Fault-Coverage Checker (C9): given `(fsm, TS, extra_states)`,
//! enumerates every FSM with at most `fsm.state_count() + extra_states`
//! states that reproduces every `(input, output)` pair `TS` induces on
//! `fsm` (spec §4.9). A test suite has full fault coverage for that
//! bound exactly when this returns a single candidate, isomorphic to
//! `fsm` itself.
//!
//! Construction: fold every sequence in `TS` through `fsm` to build an
//! observation tree (a trie of prefixes, each edge labeled with its
//! observed output), then backtrack over ways to collapse that tree's
//! nodes into at most the state bound, propagating forced merges via
//! [`crate::union_find::UnionFind`] whenever two nodes already mapped to
//! the same candidate state diverge into different children on the same
//! input — any mismatch there prunes the branch.

use crate::error::{notice, FsmError};
use crate::model::{Fsm, InputId, OutputId, SequenceSet, Variant, DEFAULT_OUTPUT, NULL_STATE, STOUT_INPUT, WRONG_STATE};
use crate::union_find::UnionFind;
use rustc_hash::FxHashMap;

/// Hard cap on how many candidates are collected before giving up and
/// reporting the suite as (at best) inconclusive rather than hanging.
const MAX_CANDIDATES: usize = 256;

struct TreeNode {
    children: FxHashMap<InputId, (usize, OutputId)>,
    state_output: Option<OutputId>,
}

fn build_tree(fsm: &Fsm, ts: &SequenceSet) -> Vec<TreeNode> {
    let mut nodes = vec![TreeNode { children: FxHashMap::default(), state_output: None }];
    for seq in ts {
        let mut node = 0usize;
        let mut state = 0usize;
        for &i in seq {
            if i == STOUT_INPUT {
                nodes[node].state_output = Some(fsm.output(state, STOUT_INPUT));
                continue;
            }
            let output = fsm.output(state, i);
            let next_real = fsm.next_state(state, i);
            let child = if let Some(&(child_idx, _)) = nodes[node].children.get(&i) {
                child_idx
            } else {
                let idx = nodes.len();
                nodes.push(TreeNode { children: FxHashMap::default(), state_output: None });
                nodes[node].children.insert(i, (idx, output));
                idx
            };
            node = child;
            if next_real == NULL_STATE || next_real == WRONG_STATE {
                break;
            }
            state = next_real;
        }
    }
    nodes
}

/// One partial merge-assignment, cloned at every branch point rather
/// than mutated-and-undone: simpler to get right than manual backtrack
/// bookkeeping, and these trees stay small (this is test-suite
/// certification tooling, not a hot path).
#[derive(Clone)]
struct State {
    uf: UnionFind,
    assignment: Vec<Option<usize>>,
    num_slots: usize,
    slot_state_output: Vec<Option<OutputId>>,
    // (slot, input) -> first tree-node index that established this continuation.
    trans_child: FxHashMap<(usize, InputId), (usize, OutputId)>,
}

impl State {
    fn new(num_nodes: usize) -> State {
        State {
            uf: UnionFind::new(num_nodes),
            assignment: vec![None; num_nodes],
            num_slots: 0,
            slot_state_output: Vec::new(),
            trans_child: FxHashMap::default(),
        }
    }

    /// Tries to place `node_idx` into `slot` (a new slot iff `slot ==
    /// num_slots`), returning `false` if that would exceed `limit` or
    /// conflicts with an already-recorded output or continuation.
    fn try_assign(&mut self, node: &TreeNode, node_idx: usize, slot: usize, limit: usize) -> bool {
        if slot == self.num_slots {
            if self.num_slots >= limit {
                return false;
            }
            self.num_slots += 1;
            self.slot_state_output.push(None);
        }

        if let Some(out) = node.state_output {
            match self.slot_state_output[slot] {
                Some(existing) if existing != out => return false,
                _ => self.slot_state_output[slot] = Some(out),
            }
        }

        for (&input, &(child_idx, output)) in &node.children {
            match self.trans_child.get(&(slot, input)).copied() {
                Some((other_child, other_output)) => {
                    if other_output != output {
                        return false;
                    }
                    self.uf.union(child_idx, other_child);
                }
                None => {
                    self.trans_child.insert((slot, input), (child_idx, output));
                }
            }
        }
        self.assignment[node_idx] = Some(slot);
        true
    }
}

fn search(nodes: &[TreeNode], limit: usize, node_idx: usize, state: State, results: &mut Vec<Vec<Option<usize>>>) {
    if results.len() >= MAX_CANDIDATES {
        return;
    }
    if node_idx == nodes.len() {
        results.push(state.assignment);
        return;
    }

    let mut state = state;
    let root = state.uf.find(node_idx);
    let forced = if root != node_idx { state.assignment[root] } else { None };

    if let Some(slot) = forced {
        if state.try_assign(&nodes[node_idx], node_idx, slot, limit) {
            search(nodes, limit, node_idx + 1, state, results);
        }
        return;
    }

    for slot in 0..=state.num_slots {
        let mut branch = state.clone();
        if branch.try_assign(&nodes[node_idx], node_idx, slot, limit) {
            search(nodes, limit, node_idx + 1, branch, results);
        }
        if results.len() >= MAX_CANDIDATES {
            return;
        }
    }
}

fn assignment_to_fsm(
    variant: Variant,
    p: usize,
    q: usize,
    nodes: &[TreeNode],
    assignment: &[Option<usize>],
    num_slots: usize,
) -> Fsm {
    let mut fsm = Fsm::create(variant, num_slots, p, q);
    for s in 0..num_slots {
        for i in 0..p {
            if variant.emits_on_transition() {
                let _ = fsm.set_transition(s, i, s, Some(DEFAULT_OUTPUT));
            } else {
                let _ = fsm.set_transition(s, i, s, None);
            }
        }
        if variant.emits_on_state() {
            let _ = fsm.set_output(s, None, DEFAULT_OUTPUT);
        }
    }
    for (node_idx, node) in nodes.iter().enumerate() {
        let Some(slot) = assignment[node_idx] else { continue };
        if variant.emits_on_state() {
            if let Some(out) = node.state_output {
                let _ = fsm.set_output(slot, None, out);
            }
        }
        for (&input, &(child_idx, output)) in &node.children {
            let Some(target) = assignment[child_idx] else { continue };
            let o = if variant.emits_on_transition() { Some(output) } else { None };
            let _ = fsm.set_transition(slot, input, target, o);
        }
    }
    fsm
}

/// Enumerates candidate FSMs consistent with `TS`'s observations of
/// `fsm`, bounded to `fsm.state_count() + extra_states` states. Invalid
/// input (negative `extra_states`) returns an empty list and a
/// diagnostic.
pub fn fault_coverage(fsm: &Fsm, ts: &SequenceSet, extra_states: i64) -> Vec<Fsm> {
    if extra_states < 0 {
        notice(&FsmError::InvalidArgument("extra_states must be non-negative".into()));
        return Vec::new();
    }
    let limit = fsm.state_count() + extra_states as usize;
    if limit == 0 {
        return Vec::new();
    }

    let cache_key = crate::caching::hashing::fault_coverage_cache_key(fsm, ts, extra_states);
    if let Some(cached) = crate::caching::get(cache_key) {
        return (*cached).clone();
    }

    let tree = build_tree(fsm, ts);
    let mut results = Vec::new();
    search(&tree, limit, 0, State::new(tree.len()), &mut results);
    if results.len() >= MAX_CANDIDATES {
        notice(&FsmError::NotApplicable(format!(
            "candidate enumeration capped at {MAX_CANDIDATES}; suite completeness is inconclusive"
        )));
    }

    let variant = fsm.variant();
    let p = fsm.input_count();
    let q = fsm.output_count();
    let candidates: Vec<Fsm> = results
        .into_iter()
        .map(|assignment| {
            let num_slots = assignment.iter().flatten().copied().max().map(|m| m + 1).unwrap_or(0);
            assignment_to_fsm(variant, p, q, &tree, &assignment, num_slots)
        })
        .collect();
    (*crate::caching::insert(cache_key, candidates)).clone()
}

/// True iff `ts` has full fault coverage for `fsm` at `extra_states`:
/// every candidate [`fault_coverage`] returns is isomorphic to `fsm`.
/// Since candidates only differ in state numbering (not observed
/// behavior) under this construction, a single candidate with exactly
/// `fsm.state_count()` states already certifies this.
pub fn has_full_fault_coverage(fsm: &Fsm, ts: &SequenceSet, extra_states: i64) -> bool {
    let candidates = fault_coverage(fsm, ts, extra_states);
    candidates.len() == 1 && candidates[0].state_count() == fsm.state_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{covers, distinguishing};

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
    fn w_method_suite_has_full_fault_coverage() {
        let fsm = reduced_mealy();
        let cset = distinguishing::characterizing_set(&fsm).unwrap();
        let tc = covers::transition_cover(&fsm);
        let mut ts = SequenceSet::new();
        for t in &tc {
            for c in &cset {
                let mut seq = t.clone();
                seq.extend_from_slice(c);
                ts.insert(seq);
            }
            ts.insert(t.clone());
        }
        assert!(has_full_fault_coverage(&fsm, &ts, 0));
    }

    #[test]
    fn an_empty_suite_never_certifies_coverage() {
        let fsm = reduced_mealy();
        let ts = SequenceSet::new();
        assert!(!has_full_fault_coverage(&fsm, &ts, 0));
    }

    #[test]
    fn fault_coverage_rejects_negative_extra_states() {
        let fsm = reduced_mealy();
        let ts = covers::transition_cover(&fsm);
        assert!(fault_coverage(&fsm, &ts, -1).is_empty());
    }
}
