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

//! `TeacherDFSM` (spec §4.10): a teacher backed directly by an in-memory
//! [`Fsm`], used to test learners in-process without any external
//! process or hardware.

use super::{Teacher, TeacherCounters};
use crate::model::{Fsm, InputId, InputSeq, OutputSeq, StateId};
use crate::testing::w::w_method;

/// Answers queries by walking `fsm` from a tracked current state;
/// answers equivalence queries by running the W-method over `fsm`
/// (sized to cover the conjecture, should it have more states) and
/// returning the first sequence the two machines disagree on.
pub struct TeacherDfsm<'a> {
    fsm: &'a Fsm,
    current: StateId,
    counters: TeacherCounters,
}

impl<'a> TeacherDfsm<'a> {
    pub fn new(fsm: &'a Fsm) -> TeacherDfsm<'a> {
        TeacherDfsm {
            fsm,
            current: 0,
            counters: TeacherCounters::default(),
        }
    }
}

impl<'a> Teacher for TeacherDfsm<'a> {
    fn is_resettable(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.counters.resets += 1;
        self.current = 0;
    }

    fn output_query(&mut self, input_seq: &[InputId]) -> OutputSeq {
        self.counters.output_queries += 1;
        self.counters.queried_symbols += input_seq.len() as u64;
        let out = self.fsm.output_along_path(self.current, input_seq);
        self.current = self.fsm.end_path_state(self.current, input_seq);
        out
    }

    fn equivalence_query(&mut self, conjecture: &Fsm) -> Option<InputSeq> {
        self.counters.equivalence_queries += 1;
        let extra = conjecture.state_count() as i64 - self.fsm.state_count() as i64;
        let suite = w_method(self.fsm, extra.max(0));
        for seq in &suite {
            if self.fsm.output_along_path(0, seq) != conjecture.output_along_path(0, seq) {
                return Some(seq.clone());
            }
        }
        None
    }

    fn counters(&self) -> TeacherCounters {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variant;

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
    fn output_query_tracks_current_state_across_calls() {
        let fsm = reduced_mealy();
        let mut teacher = TeacherDfsm::new(&fsm);
        let first = teacher.output_query(&[0]);
        let second = teacher.output_query(&[0]);
        assert_eq!(first, vec![0]);
        assert_eq!(second, vec![1]);
        assert_eq!(teacher.counters().queried_symbols, 2);
        assert_eq!(teacher.counters().output_queries, 2);
    }

    #[test]
    fn reset_returns_to_state_zero() {
        let fsm = reduced_mealy();
        let mut teacher = TeacherDfsm::new(&fsm);
        teacher.output_query(&[0, 1]);
        teacher.reset();
        assert_eq!(teacher.output_query(&[0]), vec![0]);
        assert_eq!(teacher.counters().resets, 1);
    }

    #[test]
    fn equivalence_query_accepts_an_identical_conjecture() {
        let fsm = reduced_mealy();
        let mut teacher = TeacherDfsm::new(&fsm);
        assert!(teacher.equivalence_query(&fsm).is_none());
        assert_eq!(teacher.counters().equivalence_queries, 1);
    }

    #[test]
    fn equivalence_query_rejects_a_diverging_conjecture() {
        let fsm = reduced_mealy();
        let mut wrong = reduced_mealy();
        wrong.set_transition(0, 0, 1, Some(1)).unwrap();
        let mut teacher = TeacherDfsm::new(&fsm);
        assert!(teacher.equivalence_query(&wrong).is_some());
    }
}
