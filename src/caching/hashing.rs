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

//! Cache-key hashing for the Fault-Coverage Checker's memo (C9).

use crate::model::{Fsm, SequenceSet, STOUT_INPUT};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hashes `fsm`'s full transition/output table. Two calls with
/// structurally identical machines (same variant, counts, and every
/// transition/output) always agree.
pub fn fsm_signature(fsm: &Fsm) -> u64 {
    let mut hasher = DefaultHasher::new();
    fsm.variant().name().hash(&mut hasher);
    fsm.state_count().hash(&mut hasher);
    fsm.input_count().hash(&mut hasher);
    fsm.output_count().hash(&mut hasher);
    for s in fsm.states() {
        if fsm.is_output_state() {
            fsm.output(s, STOUT_INPUT).hash(&mut hasher);
        }
        for i in 0..fsm.input_count() {
            fsm.next_state(s, i).hash(&mut hasher);
            fsm.output(s, i).hash(&mut hasher);
        }
    }
    hasher.finish()
}

/// Hashes a test suite's contents. `SequenceSet` is a `BTreeSet`, so
/// iteration order is already canonical.
pub fn suite_signature(ts: &SequenceSet) -> u64 {
    let mut hasher = DefaultHasher::new();
    ts.len().hash(&mut hasher);
    for seq in ts {
        seq.hash(&mut hasher);
    }
    hasher.finish()
}

/// Combined cache key for one `fault_coverage(fsm, ts, extra_states)` call.
pub fn fault_coverage_cache_key(fsm: &Fsm, ts: &SequenceSet, extra_states: i64) -> u64 {
    let mut hasher = DefaultHasher::new();
    fsm_signature(fsm).hash(&mut hasher);
    suite_signature(ts).hash(&mut hasher);
    extra_states.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variant;

    #[test]
    fn identical_machines_hash_equal() {
        let mut a = Fsm::create(Variant::Dfa, 2, 1, 2);
        a.set_transition(0, 0, 1, None).unwrap();
        a.set_output(0, None, 0).unwrap();
        a.set_output(1, None, 1).unwrap();
        let mut b = Fsm::create(Variant::Dfa, 2, 1, 2);
        b.set_transition(0, 0, 1, None).unwrap();
        b.set_output(0, None, 0).unwrap();
        b.set_output(1, None, 1).unwrap();
        assert_eq!(fsm_signature(&a), fsm_signature(&b));
    }

    #[test]
    fn differing_machines_hash_differently() {
        let mut a = Fsm::create(Variant::Dfa, 2, 1, 2);
        a.set_transition(0, 0, 1, None).unwrap();
        let mut b = Fsm::create(Variant::Dfa, 2, 1, 2);
        b.set_transition(0, 0, 0, None).unwrap();
        assert_ne!(fsm_signature(&a), fsm_signature(&b));
    }
}
