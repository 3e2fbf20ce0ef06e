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

use super::{
    InputId, OutputId, OutputSeq, StateId, DEFAULT_OUTPUT, NULL_STATE, STOUT_INPUT, WRONG_OUTPUT,
    WRONG_STATE,
};
use crate::error::{notice, FsmError};
use rand::Rng;

/// Tagged variant replacing the original's inheritance hierarchy (spec §9
/// "Polymorphism across FSM variants"): each variant carries the emission
/// capabilities that gate `set_output`/`output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Mealy-plus-Moore: outputs on both transitions and states.
    Dfsm,
    /// Output on transition only.
    Mealy,
    /// Output on state only.
    Moore,
    /// Moore with a two-valued output alphabet (accept/reject).
    Dfa,
}

impl Variant {
    pub fn emits_on_transition(self) -> bool {
        matches!(self, Variant::Dfsm | Variant::Mealy)
    }

    pub fn emits_on_state(self) -> bool {
        matches!(self, Variant::Dfsm | Variant::Moore | Variant::Dfa)
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Dfsm => "DFSM",
            Variant::Mealy => "Mealy",
            Variant::Moore => "Moore",
            Variant::Dfa => "DFA",
        }
    }

    pub fn from_name(s: &str) -> Option<Variant> {
        match s {
            "DFSM" => Some(Variant::Dfsm),
            "Mealy" => Some(Variant::Mealy),
            "Moore" => Some(Variant::Moore),
            "DFA" => Some(Variant::Dfa),
            _ => None,
        }
    }
}

/// A typed, deterministic finite state machine (spec §3/§4.1).
///
/// Storage is slot-based: `exists[s]` tells whether slot `s` is a live
/// state. `remove_state` punches holes (the machine becomes non-compact);
/// [`Fsm::make_compact`] re-indexes to `[0..n)` again.
#[derive(Debug, Clone)]
pub struct Fsm {
    variant: Variant,
    p_inputs: usize,
    q_outputs: usize,
    exists: Vec<bool>,
    transitions: Vec<Vec<StateId>>,
    trans_outputs: Vec<Vec<OutputId>>,
    state_outputs: Vec<OutputId>,
}

impl Fsm {
    /// Allocates an `n`-state, `p`-input, `q`-output machine with no
    /// transitions and `DEFAULT_OUTPUT` everywhere (spec §4.1 `create`).
    pub fn create(variant: Variant, n: usize, p: usize, q: usize) -> Fsm {
        let q = if variant == Variant::Dfa { 2 } else { q };
        Fsm {
            variant,
            p_inputs: p,
            q_outputs: q,
            exists: vec![true; n],
            transitions: vec![vec![NULL_STATE; p]; n],
            trans_outputs: vec![vec![DEFAULT_OUTPUT; p]; n],
            state_outputs: vec![DEFAULT_OUTPUT; n],
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Number of (possibly non-compact) state slots; holes included.
    pub fn capacity(&self) -> usize {
        self.exists.len()
    }

    /// Number of live states.
    pub fn state_count(&self) -> usize {
        self.exists.iter().filter(|e| **e).count()
    }

    pub fn input_count(&self) -> usize {
        self.p_inputs
    }

    pub fn output_count(&self) -> usize {
        self.q_outputs
    }

    pub fn is_output_state(&self) -> bool {
        self.variant.emits_on_state()
    }

    pub fn is_output_transition(&self) -> bool {
        self.variant.emits_on_transition()
    }

    /// Live state ids in ascending order.
    pub fn states(&self) -> Vec<StateId> {
        (0..self.exists.len()).filter(|&s| self.exists[s]).collect()
    }

    fn state_exists(&self, s: StateId) -> bool {
        s < self.exists.len() && self.exists[s]
    }

    fn check_state_input(&self, s: StateId, i: InputId) -> Result<(), FsmError> {
        if !self.state_exists(s) {
            return Err(FsmError::InvalidArgument(format!("no such state {s}")));
        }
        if i >= self.p_inputs {
            return Err(FsmError::InvalidArgument(format!("input {i} out of range")));
        }
        Ok(())
    }

    /// Sets `delta(s, i) = t` (and `lambda(s, i) = o` when the variant
    /// emits on transitions). `STOUT_INPUT` is rejected here (spec §4.1).
    pub fn set_transition(
        &mut self,
        s: StateId,
        i: InputId,
        t: StateId,
        o: Option<OutputId>,
    ) -> Result<(), FsmError> {
        if i == STOUT_INPUT {
            let e = FsmError::InvalidArgument("STOUT_INPUT not allowed in set_transition".into());
            notice(&e);
            return Err(e);
        }
        if let Err(e) = self.check_state_input(s, i) {
            notice(&e);
            return Err(e);
        }
        if !self.state_exists(t) {
            let e = FsmError::InvalidArgument(format!("no such target state {t}"));
            notice(&e);
            return Err(e);
        }
        self.transitions[s][i] = t;
        if let Some(o) = o {
            if !self.variant.emits_on_transition() {
                let e = FsmError::NotSupportedByVariant(format!(
                    "{} does not emit on transitions",
                    self.variant.name()
                ));
                notice(&e);
                return Err(e);
            }
            self.trans_outputs[s][i] = o;
        }
        Ok(())
    }

    /// Sets an output. With `i = None`, sets the state output `mu(s)`;
    /// with `i = Some(input)`, sets the transition output `lambda(s, i)`.
    pub fn set_output(
        &mut self,
        s: StateId,
        i: Option<InputId>,
        o: OutputId,
    ) -> Result<(), FsmError> {
        match i {
            None => {
                if !self.state_exists(s) {
                    let e = FsmError::InvalidArgument(format!("no such state {s}"));
                    notice(&e);
                    return Err(e);
                }
                if !self.variant.emits_on_state() {
                    let e = FsmError::NotSupportedByVariant(format!(
                        "{} does not emit on states",
                        self.variant.name()
                    ));
                    notice(&e);
                    return Err(e);
                }
                self.state_outputs[s] = o;
                Ok(())
            }
            Some(i) => {
                if let Err(e) = self.check_state_input(s, i) {
                    notice(&e);
                    return Err(e);
                }
                if !self.variant.emits_on_transition() {
                    let e = FsmError::NotSupportedByVariant(format!(
                        "{} does not emit on transitions",
                        self.variant.name()
                    ));
                    notice(&e);
                    return Err(e);
                }
                self.trans_outputs[s][i] = o;
                Ok(())
            }
        }
    }

    /// `delta(s, i)`: `NULL_STATE` if undefined, `WRONG_STATE` on bad args.
    pub fn next_state(&self, s: StateId, i: InputId) -> StateId {
        if !self.state_exists(s) || i >= self.p_inputs {
            return WRONG_STATE;
        }
        self.transitions[s][i]
    }

    /// Folds [`Fsm::next_state`] over `seq`, stopping and propagating
    /// `WRONG_STATE` the moment it occurs; `NULL_STATE` is also
    /// propagated (it is a legitimate "nowhere to go" outcome, not an
    /// error, but there is nothing further to compute from it).
    pub fn end_path_state(&self, s: StateId, seq: &[InputId]) -> StateId {
        let mut cur = s;
        for &i in seq {
            if i == STOUT_INPUT {
                continue;
            }
            cur = self.next_state(cur, i);
            if cur == WRONG_STATE || cur == NULL_STATE {
                return cur;
            }
        }
        cur
    }

    /// `lambda(s, i)` or `mu(s)` (when `i == STOUT_INPUT`).
    pub fn output(&self, s: StateId, i: InputId) -> OutputId {
        if i == STOUT_INPUT {
            if !self.state_exists(s) || !self.variant.emits_on_state() {
                return WRONG_OUTPUT;
            }
            return self.state_outputs[s];
        }
        if !self.state_exists(s) || i >= self.p_inputs {
            return WRONG_OUTPUT;
        }
        if !self.variant.emits_on_transition() {
            return DEFAULT_OUTPUT;
        }
        if self.transitions[s][i] == NULL_STATE {
            return WRONG_OUTPUT;
        }
        self.trans_outputs[s][i]
    }

    /// Runs `seq` from `s`, producing one output per input (plus, for
    /// Moore-style variants, the interleaved state outputs a caller
    /// inserted `STOUT_INPUT` markers for). Any step over an undefined
    /// transition is marked [`WRONG_OUTPUT`] and path-following stops
    /// producing real transitions from that point on (subsequent steps
    /// also read as [`WRONG_OUTPUT`]), while the returned vector's length
    /// always equals `seq.len()`.
    pub fn output_along_path(&self, s: StateId, seq: &[InputId]) -> OutputSeq {
        let mut cur = s;
        let mut broken = false;
        let mut out = Vec::with_capacity(seq.len());
        for &i in seq {
            if broken {
                out.push(WRONG_OUTPUT);
                continue;
            }
            let o = self.output(cur, i);
            out.push(o);
            if i == STOUT_INPUT {
                continue;
            }
            let next = self.next_state(cur, i);
            if next == NULL_STATE || next == WRONG_STATE {
                broken = true;
            } else {
                cur = next;
            }
        }
        out
    }

    /// Removes state `s` and every transition touching it. Fails for
    /// `s == 0` (the initial state, spec invariant) or a non-existent
    /// state. The resulting machine may be non-compact.
    pub fn remove_state(&mut self, s: StateId) -> Result<(), FsmError> {
        if s == 0 {
            let e = FsmError::InvalidArgument("cannot remove the initial state".into());
            notice(&e);
            return Err(e);
        }
        if !self.state_exists(s) {
            let e = FsmError::InvalidArgument(format!("no such state {s}"));
            notice(&e);
            return Err(e);
        }
        self.exists[s] = false;
        for row in self.transitions.iter_mut() {
            for t in row.iter_mut() {
                if *t == s {
                    *t = NULL_STATE;
                }
            }
        }
        Ok(())
    }

    /// BFS from state 0; deletes every state it cannot reach.
    pub fn remove_unreachable_states(&mut self) {
        let order = self.bfs_order();
        let reached: std::collections::HashSet<StateId> = order.iter().copied().collect();
        for s in self.states() {
            if s != 0 && !reached.contains(&s) {
                let _ = self.remove_state(s);
            }
        }
    }

    /// BFS order of live states reachable from state 0, by increasing
    /// input index at each step (spec §9 Open Question #2 pins this as
    /// the canonical traversal both `remove_unreachable_states` and
    /// `make_compact` use).
    fn bfs_order(&self) -> Vec<StateId> {
        let mut visited = vec![false; self.exists.len()];
        let mut order = Vec::new();
        if !self.state_exists(0) {
            return order;
        }
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(0usize);
        visited[0] = true;
        while let Some(s) = queue.pop_front() {
            order.push(s);
            for i in 0..self.p_inputs {
                let t = self.transitions[s][i];
                if t != NULL_STATE && t < visited.len() && !visited[t] {
                    visited[t] = true;
                    queue.push_back(t);
                }
            }
        }
        order
    }

    /// Re-indexes live states to the dense range `[0..n)`, preserving BFS
    /// order from state 0 (state 0 always maps to 0), and trims unused
    /// alphabet tails (inputs that are `NULL_STATE` in every remaining
    /// row, from the end).
    pub fn make_compact(&mut self) {
        let order = self.bfs_order();
        let mut remap = vec![NULL_STATE; self.exists.len()];
        for (new_idx, &old) in order.iter().enumerate() {
            remap[old] = new_idx;
        }

        let n = order.len();
        let mut transitions = vec![vec![NULL_STATE; self.p_inputs]; n];
        let mut trans_outputs = vec![vec![DEFAULT_OUTPUT; self.p_inputs]; n];
        let mut state_outputs = vec![DEFAULT_OUTPUT; n];

        for (new_idx, &old) in order.iter().enumerate() {
            state_outputs[new_idx] = self.state_outputs[old];
            for i in 0..self.p_inputs {
                let t = self.transitions[old][i];
                transitions[new_idx][i] = if t == NULL_STATE || t >= remap.len() || remap[t] == NULL_STATE {
                    NULL_STATE
                } else {
                    remap[t]
                };
                trans_outputs[new_idx][i] = self.trans_outputs[old][i];
            }
        }

        // Trim alphabet tail: inputs beyond the last one used anywhere.
        let mut last_used = 0usize;
        let mut any_used = false;
        for i in 0..self.p_inputs {
            if transitions.iter().any(|row| row[i] != NULL_STATE) {
                last_used = i;
                any_used = true;
            }
        }
        let new_p = if any_used { last_used + 1 } else { self.p_inputs.min(1) };
        for row in transitions.iter_mut() {
            row.truncate(new_p);
        }
        for row in trans_outputs.iter_mut() {
            row.truncate(new_p);
        }

        self.p_inputs = new_p;
        self.exists = vec![true; n];
        self.transitions = transitions;
        self.trans_outputs = trans_outputs;
        self.state_outputs = state_outputs;
    }

    /// Hopcroft-style partition refinement tailored per variant, followed
    /// by [`Fsm::make_compact`]. Returns `Ok(())` iff the machine was
    /// well-formed (every live state reachable, no `WRONG_STATE` leaking
    /// in); on failure the machine is left untouched.
    pub fn minimize(&mut self) -> Result<(), FsmError> {
        self.remove_unreachable_states();
        let states = self.states();
        let n = states.len();
        if n == 0 {
            let e = FsmError::InvalidArgument("cannot minimize an empty machine".into());
            notice(&e);
            return Err(e);
        }
        let idx_of: std::collections::HashMap<StateId, usize> =
            states.iter().enumerate().map(|(i, &s)| (s, i)).collect();

        // Initial partition: by state output (if the variant emits on
        // states); otherwise a single block.
        let mut block_of = vec![0usize; n];
        if self.variant.emits_on_state() {
            let mut seen: Vec<OutputId> = Vec::new();
            for (i, &s) in states.iter().enumerate() {
                let o = self.state_outputs[s];
                let b = match seen.iter().position(|&x| x == o) {
                    Some(b) => b,
                    None => {
                        seen.push(o);
                        seen.len() - 1
                    }
                };
                block_of[i] = b;
            }
        }

        // Refine until stable: two states are in the same block iff for
        // every input their transition outputs match and their successor
        // blocks match.
        loop {
            let mut signature: Vec<(OutputId, Vec<(usize, usize)>)> = Vec::with_capacity(n);
            for (i, &s) in states.iter().enumerate() {
                let mut succ = Vec::with_capacity(self.p_inputs);
                for input in 0..self.p_inputs {
                    let t = self.transitions[s][input];
                    let o = if self.variant.emits_on_transition() {
                        self.trans_outputs[s][input]
                    } else {
                        DEFAULT_OUTPUT
                    };
                    let tb = if t == NULL_STATE {
                        usize::MAX
                    } else {
                        idx_of
                            .get(&t)
                            .map(|&ti| block_of[ti])
                            .unwrap_or(usize::MAX)
                    };
                    succ.push((o as usize, tb));
                }
                signature.push((block_of[i] as OutputId, succ));
            }

            let mut new_blocks: Vec<(OutputId, Vec<(usize, usize)>)> = Vec::new();
            let mut new_block_of = vec![0usize; n];
            for (i, sig) in signature.iter().enumerate() {
                let b = match new_blocks.iter().position(|b| b == sig) {
                    Some(b) => b,
                    None => {
                        new_blocks.push(sig.clone());
                        new_blocks.len() - 1
                    }
                };
                new_block_of[i] = b;
            }

            if new_blocks.len() == block_of.iter().collect::<std::collections::HashSet<_>>().len()
                && new_block_of == block_of
            {
                break;
            }
            block_of = new_block_of;
        }

        // Build the quotient machine: one representative state per block.
        let num_blocks = block_of.iter().copied().max().map(|m| m + 1).unwrap_or(0);
        let mut representative = vec![0usize; num_blocks];
        for (i, &b) in block_of.iter().enumerate() {
            representative[b] = i;
        }
        let initial_block = block_of[*idx_of.get(&0).unwrap_or(&0)];

        // Reorder blocks so the initial block becomes 0 (state 0 stays
        // the initial state post-minimization).
        let mut order: Vec<usize> = (0..num_blocks).collect();
        order.swap(0, initial_block);
        let mut pos_of_block = vec![0usize; num_blocks];
        for (pos, &b) in order.iter().enumerate() {
            pos_of_block[b] = pos;
        }

        let mut quotient = Fsm::create(self.variant, num_blocks, self.p_inputs, self.q_outputs);
        for &b in &order {
            let rep = states[representative[b]];
            let new_s = pos_of_block[b];
            if self.variant.emits_on_state() {
                quotient.state_outputs[new_s] = self.state_outputs[rep];
            }
            for input in 0..self.p_inputs {
                let t = self.transitions[rep][input];
                if t == NULL_STATE {
                    continue;
                }
                let t_block = block_of[*idx_of.get(&t).unwrap()];
                let new_t = pos_of_block[t_block];
                quotient.transitions[new_s][input] = new_t;
                if self.variant.emits_on_transition() {
                    quotient.trans_outputs[new_s][input] = self.trans_outputs[rep][input];
                }
            }
        }

        *self = quotient;
        Ok(())
    }

    /// A machine is reduced when no two (live) states are behaviorally
    /// equivalent.
    pub fn is_reduced(&self) -> bool {
        let mut clone = self.clone();
        let before = clone.state_count();
        if clone.minimize().is_err() {
            return false;
        }
        clone.state_count() == before
    }

    /// True when every (live) state reaches every other.
    pub fn is_strongly_connected(&self) -> bool {
        let states = self.states();
        for &s in &states {
            let reached = self.bfs_from(s);
            if states.iter().any(|t| !reached.contains(t)) {
                return false;
            }
        }
        true
    }

    fn bfs_from(&self, start: StateId) -> std::collections::HashSet<StateId> {
        let mut visited = std::collections::HashSet::new();
        if !self.state_exists(start) {
            return visited;
        }
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(start);
        visited.insert(start);
        while let Some(s) = queue.pop_front() {
            for i in 0..self.p_inputs {
                let t = self.transitions[s][i];
                if t != NULL_STATE && self.state_exists(t) && !visited.contains(&t) {
                    visited.insert(t);
                    queue.push_back(t);
                }
            }
        }
        visited
    }

    /// All-pairs shortest path lengths (in number of inputs) over the
    /// transition graph, via repeated BFS (spec §1 C1 "shortest-path
    /// matrix"; used by Mg's segment-overlap cost matrix in C8).
    pub fn shortest_path_matrix(&self) -> Vec<Vec<Option<usize>>> {
        let states = self.states();
        let idx_of: std::collections::HashMap<StateId, usize> =
            states.iter().enumerate().map(|(i, &s)| (s, i)).collect();
        let n = states.len();
        let mut dist = vec![vec![None; n]; n];
        for (i, &s) in states.iter().enumerate() {
            let mut visited = vec![false; self.exists.len()];
            let mut queue = std::collections::VecDeque::new();
            queue.push_back((s, 0usize));
            visited[s] = true;
            while let Some((cur, d)) = queue.pop_front() {
                dist[i][idx_of[&cur]] = Some(d);
                for input in 0..self.p_inputs {
                    let t = self.transitions[cur][input];
                    if t != NULL_STATE && self.state_exists(t) && !visited[t] {
                        visited[t] = true;
                        queue.push_back((t, d + 1));
                    }
                }
            }
        }
        dist
    }

    /// Random connected machine generation (spec §4.1 `generate`): builds
    /// a random spanning walk from state 0 so every state is reachable,
    /// fills the remaining transitions uniformly at random, and (for
    /// DFSM) rejects and retries draws that violate the compatibility
    /// condition `lambda(s, i) = mu(delta(s, i))`.
    pub fn generate(variant: Variant, n: usize, p: usize, q: usize) -> Fsm {
        let q = if variant == Variant::Dfa { 2 } else { q };
        let mut rng = rand::thread_rng();
        const MAX_ATTEMPTS: usize = 10_000;

        for attempt in 0..MAX_ATTEMPTS {
            let mut fsm = Fsm::create(variant, n, p, q);

            // Random spanning walk: visit states in a random permutation,
            // wiring each newly-discovered state in via one transition
            // from an already-visited one, guaranteeing reachability.
            let mut order: Vec<StateId> = (0..n).collect();
            shuffle(&mut order, &mut rng);
            // Ensure state 0 is first so it is trivially "already visited".
            if let Some(pos) = order.iter().position(|&s| s == 0) {
                order.swap(0, pos);
            }
            for window in 1..order.len() {
                let target = order[window];
                let from = order[rng.gen_range(0..window)];
                let input = rng.gen_range(0..p);
                fsm.transitions[from][input] = target;
            }

            // Fill the rest randomly.
            for s in 0..n {
                for i in 0..p {
                    if fsm.transitions[s][i] == NULL_STATE {
                        fsm.transitions[s][i] = rng.gen_range(0..n);
                    }
                }
                if fsm.variant.emits_on_state() {
                    fsm.state_outputs[s] = rng.gen_range(0..q) as OutputId;
                }
                for i in 0..p {
                    if fsm.variant.emits_on_transition() {
                        fsm.trans_outputs[s][i] = rng.gen_range(0..q) as OutputId;
                    }
                }
            }

            // Output alphabet must be exhausted across the whole machine.
            let mut used = std::collections::HashSet::new();
            if fsm.variant.emits_on_state() {
                used.extend(fsm.state_outputs.iter().copied());
            }
            if fsm.variant.emits_on_transition() {
                for row in &fsm.trans_outputs {
                    used.extend(row.iter().copied());
                }
            }
            if used.len() < q {
                log::trace!("generate: rejected draw #{attempt}, output alphabet not exhausted");
                continue;
            }

            if variant == Variant::Dfsm && !fsm.dfsm_compatible() {
                log::trace!("generate: rejected draw #{attempt}, DFSM incompatible");
                continue;
            }

            return fsm;
        }

        log::warn!("generate: exceeded {MAX_ATTEMPTS} attempts, returning last draw uncombed");
        Fsm::create(variant, n, p, q)
    }

    /// Raw transition-table accessor used by the I/O and DOT exporters;
    /// returns `NULL_STATE` for holes and undefined transitions alike.
    pub(crate) fn raw_transition(&self, s: StateId, i: InputId) -> StateId {
        self.transitions[s][i]
    }

    pub(crate) fn raw_trans_output(&self, s: StateId, i: InputId) -> OutputId {
        self.trans_outputs[s][i]
    }

    pub(crate) fn raw_state_output(&self, s: StateId) -> OutputId {
        self.state_outputs[s]
    }

    /// Rebuilds a compact machine directly from its row tables, as used by
    /// [`super::load`]. Caller guarantees `exists` has no holes (the `.fsm`
    /// format only ever stores compact machines).
    pub(crate) fn from_tables(
        variant: Variant,
        p_inputs: usize,
        q_outputs: usize,
        transitions: Vec<Vec<StateId>>,
        trans_outputs: Vec<Vec<OutputId>>,
        state_outputs: Vec<OutputId>,
    ) -> Fsm {
        let n = transitions.len();
        Fsm {
            variant,
            p_inputs,
            q_outputs,
            exists: vec![true; n],
            transitions,
            trans_outputs,
            state_outputs,
        }
    }

    fn dfsm_compatible(&self) -> bool {
        for s in 0..self.exists.len() {
            for i in 0..self.p_inputs {
                let t = self.transitions[s][i];
                if t == NULL_STATE {
                    continue;
                }
                if self.trans_outputs[s][i] != self.state_outputs[t] {
                    return false;
                }
            }
        }
        true
    }
}

fn shuffle<T>(v: &mut [T], rng: &mut impl Rng) {
    for i in (1..v.len()).rev() {
        let j = rng.gen_range(0..=i);
        v.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_mealy() -> Fsm {
        // 2 states, 2 inputs: (0,0)->0/0 (0,1)->1/0 (1,0)->0/1 (1,1)->1/0
        let mut fsm = Fsm::create(Variant::Mealy, 2, 2, 2);
        fsm.set_transition(0, 0, 0, Some(0)).unwrap();
        fsm.set_transition(0, 1, 1, Some(0)).unwrap();
        fsm.set_transition(1, 0, 0, Some(1)).unwrap();
        fsm.set_transition(1, 1, 1, Some(0)).unwrap();
        fsm
    }

    #[test]
    fn next_state_and_output_contract() {
        let fsm = small_mealy();
        assert_eq!(fsm.next_state(0, 0), 0);
        assert_eq!(fsm.next_state(0, 5), WRONG_STATE);
        assert_eq!(fsm.next_state(9, 0), WRONG_STATE);
        assert_eq!(fsm.output(1, 0), 1);
    }

    #[test]
    fn set_output_rejects_wrong_variant_position() {
        let mut fsm = small_mealy();
        assert!(fsm.set_output(0, None, 1).is_err());
    }

    #[test]
    fn remove_state_clears_incoming_transitions() {
        let mut fsm = Fsm::create(Variant::Mealy, 3, 1, 1);
        fsm.set_transition(0, 0, 1, Some(0)).unwrap();
        fsm.set_transition(1, 0, 2, Some(0)).unwrap();
        fsm.set_transition(2, 0, 1, Some(0)).unwrap();
        fsm.remove_state(2).unwrap();
        assert_eq!(fsm.next_state(1, 0), NULL_STATE);
        assert!(fsm.remove_state(0).is_err());
    }

    #[test]
    fn make_compact_is_dense_and_keeps_state_zero() {
        let mut fsm = Fsm::create(Variant::Mealy, 4, 1, 1);
        fsm.set_transition(0, 0, 2, Some(0)).unwrap();
        fsm.set_transition(2, 0, 2, Some(0)).unwrap();
        fsm.remove_unreachable_states();
        fsm.make_compact();
        assert_eq!(fsm.states(), vec![0, 1]);
    }

    #[test]
    fn minimize_is_idempotent() {
        let mut fsm = small_mealy();
        fsm.minimize().unwrap();
        let once = fsm.clone();
        fsm.minimize().unwrap();
        assert_eq!(fsm.state_count(), once.state_count());
    }

    #[test]
    fn output_along_path_length_matches_input_and_marks_broken_steps() {
        let fsm = small_mealy();
        let seq = vec![0, 1, 0];
        let out = fsm.output_along_path(0, &seq);
        assert_eq!(out.len(), seq.len());

        let mut partial = Fsm::create(Variant::Mealy, 2, 2, 2);
        partial.set_transition(0, 0, 1, Some(0)).unwrap();
        let broken_seq = vec![0, 1, 0];
        let out = partial.output_along_path(0, &broken_seq);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], WRONG_OUTPUT);
        assert_eq!(out[2], WRONG_OUTPUT);
    }

    #[test]
    fn generate_produces_strongly_connected_reachable_machine() {
        let fsm = Fsm::generate(Variant::Mealy, 4, 2, 2);
        assert_eq!(fsm.state_count(), 4);
        let reached = fsm.bfs_from(0);
        assert_eq!(reached.len(), 4);
    }
}
