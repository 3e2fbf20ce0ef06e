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

//! Teacher / BlackBox interface (C10): the thin external contract active
//! learners (L*, TTT, Discrimination Tree, Observation Pack, SPYH, ...)
//! consume. The learners themselves are sketched only, never implemented
//! here (spec §1) — this module is the contract plus the three concrete
//! teachers spec §4.10 names, and the in-process concurrency bridge
//! spec §5 requires for a `BlackBox` backed by an external driver thread.

pub mod blackbox;
pub mod dfsm_teacher;
pub mod rl_teacher;

pub use blackbox::{bridge, BlackBox, BridgeDriver, BridgeHandle, BridgeMessage, TeacherBb};
pub use dfsm_teacher::TeacherDfsm;
pub use rl_teacher::TeacherRl;

use crate::model::{Fsm, InputId, InputSeq, OutputSeq};

/// Per-teacher usage counters (spec §4.10, checked by spec §8's
/// `queried_symbols`/`resets` testable properties).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeacherCounters {
    pub resets: u64,
    pub output_queries: u64,
    pub equivalence_queries: u64,
    pub queried_symbols: u64,
}

/// The contract every active learner talks to (spec §4.10): membership
/// queries (`output_query`) and equivalence queries against a learner's
/// current conjecture, plus the counters learners report in their
/// statistics.
pub trait Teacher {
    /// Whether [`Teacher::reset`] is meaningful for this teacher.
    fn is_resettable(&self) -> bool;

    /// Returns to the initial state. A no-op when [`Teacher::is_resettable`]
    /// is `false`.
    fn reset(&mut self);

    /// Submits `input_seq` from the teacher's current state, returning one
    /// output per input (`STOUT_INPUT` entries read state outputs, as
    /// with [`Fsm::output_along_path`]).
    fn output_query(&mut self, input_seq: &[InputId]) -> OutputSeq;

    /// [`Teacher::reset`] followed by [`Teacher::output_query`].
    fn reset_and_output_query(&mut self, input_seq: &[InputId]) -> OutputSeq {
        self.reset();
        self.output_query(input_seq)
    }

    /// Checks `conjecture` against the teacher's ground truth, returning a
    /// counterexample input sequence on disagreement, `None` if the
    /// conjecture passes every check this teacher is able to perform.
    fn equivalence_query(&mut self, conjecture: &Fsm) -> Option<InputSeq>;

    /// A snapshot of this teacher's usage counters.
    fn counters(&self) -> TeacherCounters;
}
