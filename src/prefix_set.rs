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

//! A trie of input sequences (C2): insert, prefix-query, and
//! maximal-sequence extraction. Checking-experiment methods (C8) funnel
//! every candidate test sequence through a `PrefixSet` so the final suite
//! only keeps maximal ones — a sequence that is a prefix of another
//! already-stored sequence carries no additional fault-coverage
//! information.

use crate::model::{InputId, InputSeq, SequenceSet, STOUT_INPUT};
use rustc_hash::FxHashMap;

struct Node {
    children: FxHashMap<InputId, usize>,
    terminal: bool,
    parent: Option<usize>,
    via_input: Option<InputId>,
}

impl Node {
    fn root() -> Node {
        Node {
            children: FxHashMap::default(),
            terminal: false,
            parent: None,
            via_input: None,
        }
    }
}

/// Arena-indexed trie (spec §9's "arena-allocated nodes referenced by
/// stable indices" redesign applies here as much as to the observation
/// tree, since both are parent-linked trees built incrementally).
pub struct PrefixSet {
    nodes: Vec<Node>,
}

impl Default for PrefixSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixSet {
    /// Sentinel returned by [`PrefixSet::contains`] when `seq` itself is
    /// fully contained (as opposed to only a prefix of it being stored).
    pub const ALL: usize = usize::MAX;

    pub fn new() -> PrefixSet {
        PrefixSet {
            nodes: vec![Node::root()],
        }
    }

    /// Inserts `seq`, creating trie nodes along the path as needed.
    /// Returns `true` iff `seq` was not already a stored (terminal)
    /// sequence.
    pub fn insert(&mut self, seq: &[InputId]) -> bool {
        let mut cur = 0usize;
        for &i in seq {
            cur = match self.nodes[cur].children.get(&i) {
                Some(&next) => next,
                None => {
                    let idx = self.nodes.len();
                    self.nodes.push(Node {
                        children: FxHashMap::default(),
                        terminal: false,
                        parent: Some(cur),
                        via_input: Some(i),
                    });
                    self.nodes[cur].children.insert(i, idx);
                    idx
                }
            };
        }
        let was_terminal = self.nodes[cur].terminal;
        self.nodes[cur].terminal = true;
        !was_terminal
    }

    /// Length of the longest stored (terminal) prefix of `seq`; `0` if
    /// none; [`PrefixSet::ALL`] if `seq` is itself stored entirely.
    pub fn contains(&self, seq: &[InputId]) -> usize {
        let mut cur = 0usize;
        let mut longest_terminal = 0usize;
        for (len, &i) in seq.iter().enumerate() {
            if self.nodes[cur].terminal {
                longest_terminal = len;
            }
            match self.nodes[cur].children.get(&i) {
                Some(&next) => cur = next,
                None => return longest_terminal,
            }
        }
        if self.nodes[cur].terminal {
            Self::ALL
        } else {
            longest_terminal
        }
    }

    fn path_to(&self, mut node: usize) -> InputSeq {
        let mut rev = Vec::new();
        while let Some(parent) = self.nodes[node].parent {
            rev.push(self.nodes[node].via_input.unwrap());
            node = parent;
        }
        rev.reverse();
        rev
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.nodes[node].terminal && self.nodes[node].children.is_empty()
    }

    fn find_any_leaf(&self, from: usize) -> Option<usize> {
        if self.is_leaf(from) {
            return Some(from);
        }
        for &child in self.nodes[from].children.values() {
            if let Some(leaf) = self.find_any_leaf(child) {
                return Some(leaf);
            }
        }
        None
    }

    fn detach_leaf(&mut self, node: usize) {
        self.nodes[node].terminal = false;
        if let Some(parent) = self.nodes[node].parent {
            if let Some(input) = self.nodes[node].via_input {
                self.nodes[parent].children.remove(&input);
            }
        }
    }

    fn strip_trailing_stout(mut seq: InputSeq) -> InputSeq {
        while seq.last() == Some(&STOUT_INPUT) {
            seq.pop();
        }
        seq
    }

    /// Removes and returns any maximal (leaf) stored sequence.
    pub fn pop_maximal(&mut self) -> Option<InputSeq> {
        let leaf = self.find_any_leaf(0)?;
        let path = self.path_to(leaf);
        self.detach_leaf(leaf);
        Some(Self::strip_trailing_stout(path))
    }

    /// Removes and returns a maximal stored sequence that begins with
    /// `prefix`, or `None` if no stored sequence begins with it.
    pub fn pop_maximal_with_prefix(&mut self, prefix: &[InputId]) -> Option<InputSeq> {
        let mut cur = 0usize;
        for &i in prefix {
            cur = *self.nodes[cur].children.get(&i)?;
        }
        let leaf = self.find_any_leaf(cur)?;
        let path = self.path_to(leaf);
        self.detach_leaf(leaf);
        Some(Self::strip_trailing_stout(path))
    }

    /// All leaf paths, without trailing `STOUT_INPUT` markers.
    pub fn maximal_sequences(&self) -> SequenceSet {
        let mut out = SequenceSet::new();
        let mut stack = vec![0usize];
        while let Some(node) = stack.pop() {
            if self.is_leaf(node) {
                out.insert(Self::strip_trailing_stout(self.path_to(node)));
            }
            stack.extend(self.nodes[node].children.values().copied());
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_contains_reports_full_length() {
        let mut pset = PrefixSet::new();
        assert!(pset.insert(&[0, 1, 0]));
        assert_eq!(pset.contains(&[0, 1, 0]), PrefixSet::ALL);
        assert!(!pset.insert(&[0, 1, 0]));
    }

    #[test]
    fn contains_reports_longest_stored_prefix() {
        let mut pset = PrefixSet::new();
        pset.insert(&[0, 1]);
        assert_eq!(pset.contains(&[0, 1, 0, 1]), 2);
        assert_eq!(pset.contains(&[1, 1]), 0);
    }

    #[test]
    fn maximal_sequences_is_prefix_free() {
        let mut pset = PrefixSet::new();
        pset.insert(&[0]);
        pset.insert(&[0, 1]);
        pset.insert(&[1, 0]);
        let maximal = pset.maximal_sequences();
        // [0] is a prefix of [0,1] and must not appear as its own leaf.
        assert!(!maximal.contains(&vec![0]));
        assert!(maximal.contains(&vec![0, 1]));
        assert!(maximal.contains(&vec![1, 0]));
    }

    #[test]
    fn pop_maximal_removes_a_leaf() {
        let mut pset = PrefixSet::new();
        pset.insert(&[0, 1]);
        let popped = pset.pop_maximal().unwrap();
        assert_eq!(popped, vec![0, 1]);
        assert!(pset.is_empty() || pset.maximal_sequences().is_empty());
    }

    #[test]
    fn pop_maximal_with_prefix_filters_by_prefix() {
        let mut pset = PrefixSet::new();
        pset.insert(&[0, 0]);
        pset.insert(&[1, 1]);
        let popped = pset.pop_maximal_with_prefix(&[1]).unwrap();
        assert_eq!(popped, vec![1, 1]);
        assert!(pset.pop_maximal_with_prefix(&[9]).is_none());
    }

    #[test]
    fn trailing_stout_markers_are_stripped() {
        let mut pset = PrefixSet::new();
        pset.insert(&[0, STOUT_INPUT, STOUT_INPUT]);
        let popped = pset.pop_maximal().unwrap();
        assert_eq!(popped, vec![0]);
    }
}
