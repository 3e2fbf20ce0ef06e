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

//! `TeacherRL` (spec §4.10): a reactive teacher wrapping any other
//! [`Teacher`], for sources where repeating a query has a real-world
//! cost (a hardware port, a slow subprocess) — every `output_query` is
//! answered by a full reset-and-replay of the wrapped teacher, memoized
//! by prefix so learners that revisit the same access sequence (as L*
//! and friends routinely do while closing a hypothesis) hit the cache
//! instead of re-driving the reactive source.

use super::{Teacher, TeacherCounters};
use crate::model::{Fsm, InputId, InputSeq, OutputSeq};
use rustc_hash::FxHashMap;

pub struct TeacherRl<T: Teacher> {
    inner: T,
    cache: FxHashMap<InputSeq, OutputSeq>,
    counters: TeacherCounters,
}

impl<T: Teacher> TeacherRl<T> {
    pub fn new(inner: T) -> TeacherRl<T> {
        TeacherRl {
            inner,
            cache: FxHashMap::default(),
            counters: TeacherCounters::default(),
        }
    }

    /// Number of distinct sequences answered from cache so far, without
    /// re-driving the wrapped teacher.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

impl<T: Teacher> Teacher for TeacherRl<T> {
    fn is_resettable(&self) -> bool {
        self.inner.is_resettable()
    }

    fn reset(&mut self) {
        self.counters.resets += 1;
        self.inner.reset();
    }

    fn output_query(&mut self, input_seq: &[InputId]) -> OutputSeq {
        self.counters.output_queries += 1;
        self.counters.queried_symbols += input_seq.len() as u64;
        if let Some(cached) = self.cache.get(input_seq) {
            return cached.clone();
        }
        let out = self.inner.reset_and_output_query(input_seq);
        self.cache.insert(input_seq.to_vec(), out.clone());
        out
    }

    fn equivalence_query(&mut self, conjecture: &Fsm) -> Option<InputSeq> {
        self.counters.equivalence_queries += 1;
        self.inner.equivalence_query(conjecture)
    }

    fn counters(&self) -> TeacherCounters {
        self.counters
    }
}
