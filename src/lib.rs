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
//! FSMlib: finite-state-machine analysis, conformance testing, and the
//! active-learning teacher contract (see `SPEC_FULL.md`).
//!
//! - [`model`] — the FSM data model (C1): variants, transitions,
//!   load/save, DOT export.
//! - [`prefix_set`] — a prefix-closed sequence set (C2).
//! - [`union_find`] — disjoint-set union (C3).
//! - [`sequence`] — separating sequences, the splitting tree,
//!   distinguishing-sequence families, and cover construction (C4–C7).
//! - [`testing`] — checking-experiment methods built on those primitives
//!   (C8).
//! - [`fault_coverage`] — the Fault-Coverage Checker (C9).
//! - [`teacher`] — the Teacher/BlackBox contract consumed by active
//!   learners, plus its concurrency bridge (C10).
//! - [`error`] — the diagnostic-handler contract (spec §7).
//! - [`env`] — environment-variable knobs (spec §6).

mod caching;
pub mod env;
pub mod error;
pub mod fault_coverage;
pub mod model;
pub mod prefix_set;
pub mod sequence;
pub mod teacher;
pub mod testing;
pub mod union_find;

pub use error::{set_error_msg_handler, FsmError};
pub use model::{
    Fsm, InputId, InputSeq, OutputId, OutputSeq, SequenceSet, StateId, Variant, DEFAULT_OUTPUT,
    EPSILON_INPUT, NULL_STATE, STOUT_INPUT, WRONG_OUTPUT, WRONG_STATE,
};