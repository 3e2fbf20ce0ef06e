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

//! `BlackBox` and `TeacherBB` (spec §4.10), plus the bridge spec §5 and
//! §9 require for the one explicit concurrency surface this library
//! exposes: a learner thread and a driver thread (owning the external
//! process or device) talking through a shared queue and response
//! buffer.
//!
//! The original couples them with one mutex and one condition variable,
//! alternating strictly: every queued input is answered before the next
//! is queued, `RESET_INPUT`/`LEARNING_COMPLETED` riding along as
//! side-band sentinels rather than observable inputs. Spec §9 flags this
//! for re-architecture ("avoid manual condition variables"); this models
//! it instead as two bounded (capacity-1) `std::sync::mpsc` channels —
//! the bound itself enforces the alternation, since a second `send`
//! blocks until the first has been received. Dropping either end of the
//! handle disconnects the other side's next `recv`, which is how
//! cancellation (spec §5's `stop`) is modeled: no consistent-checkpoint
//! guarantee is made, matching the original.

use crate::model::{InputId, InputSeq, OutputSeq};
use std::sync::mpsc::{sync_channel, Receiver, RecvError, SyncSender};

/// A message on the learner→driver channel.
pub enum BridgeMessage {
    /// Ask the driver to run `InputSeq` from its current state.
    Query(InputSeq),
    /// Side-band control: return the driven system to its initial state.
    Reset,
    /// Side-band control: the learner is done; the driver should stop.
    Complete,
}

/// The learner-facing half of the bridge.
pub struct BridgeHandle {
    to_driver: SyncSender<BridgeMessage>,
    from_driver: Receiver<OutputSeq>,
}

impl BridgeHandle {
    /// Queues `seq` and blocks for the driver's response.
    pub fn query(&self, seq: InputSeq) -> Result<OutputSeq, RecvError> {
        self.to_driver
            .send(BridgeMessage::Query(seq))
            .map_err(|_| RecvError)?;
        self.from_driver.recv()
    }

    /// Queues a reset; does not wait for acknowledgment (the original
    /// treats `RESET_INPUT` as fire-and-forget side-band control).
    pub fn reset(&self) {
        let _ = self.to_driver.send(BridgeMessage::Reset);
    }

    /// Signals completion and detaches from the driver (spec §5's
    /// `stop`). Dropping the returned handle immediately afterward
    /// disconnects the channel from the driver's side.
    pub fn complete(self) {
        let _ = self.to_driver.send(BridgeMessage::Complete);
    }
}

/// The driver-facing half of the bridge.
pub struct BridgeDriver {
    from_learner: Receiver<BridgeMessage>,
    to_learner: SyncSender<OutputSeq>,
}

impl BridgeDriver {
    /// Blocks for the next message. `Ok(None)` means the learner sent
    /// [`BridgeMessage::Complete`]; the driver loop should stop. `Err`
    /// means the learner side was dropped without completing —
    /// cancellation with no consistency guarantee, per spec §5.
    pub fn recv(&self) -> Result<Option<BridgeMessage>, RecvError> {
        match self.from_learner.recv()? {
            BridgeMessage::Complete => Ok(None),
            other => Ok(Some(other)),
        }
    }

    /// Sends the response to the most recently received
    /// [`BridgeMessage::Query`].
    pub fn respond(&self, out: OutputSeq) {
        let _ = self.to_learner.send(out);
    }
}

/// Builds a connected learner/driver pair of capacity-1 channels.
pub fn bridge() -> (BridgeHandle, BridgeDriver) {
    let (to_driver, from_learner) = sync_channel(1);
    let (to_learner, from_driver) = sync_channel(1);
    (
        BridgeHandle { to_driver, from_driver },
        BridgeDriver { from_learner, to_learner },
    )
}

/// What a black-box system under test offers (spec §4.10): `reset`,
/// `query`, and per-query counters. May be non-resettable.
pub trait BlackBox {
    fn is_resettable(&self) -> bool;
    fn reset(&mut self);
    fn query(&mut self, input_seq: &[InputId]) -> OutputSeq;
}

/// Which checking-experiment method [`TeacherBb`] uses to answer
/// equivalence queries (spec §9's "enums of strategies" redesign flag,
/// replacing function-pointer-based pluggable strategies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquivalenceStrategy {
    W,
    Wp,
    Hsi,
    H,
    Spy,
    Spyh,
}

impl EquivalenceStrategy {
    fn suite(self, fsm: &crate::model::Fsm, extra_states: i64) -> crate::model::SequenceSet {
        match self {
            EquivalenceStrategy::W => crate::testing::w::w_method(fsm, extra_states),
            EquivalenceStrategy::Wp => crate::testing::wp::wp_method(fsm, extra_states),
            EquivalenceStrategy::Hsi => crate::testing::hsi::hsi_method(fsm, extra_states),
            EquivalenceStrategy::H => crate::testing::h::h_method(fsm, extra_states),
            EquivalenceStrategy::Spy => crate::testing::spy::spy_method(fsm, extra_states),
            EquivalenceStrategy::Spyh => crate::testing::spyh::spyh_method(fsm, extra_states),
        }
    }
}

/// `TeacherBB` (spec §4.10): wraps a [`BlackBox`] and answers
/// equivalence queries by running a checking-experiment suite (derived
/// from the conjecture itself) against it.
pub struct TeacherBb<B: BlackBox> {
    bb: B,
    strategy: EquivalenceStrategy,
    extra_states: i64,
    counters: super::TeacherCounters,
}

impl<B: BlackBox> TeacherBb<B> {
    pub fn new(bb: B, strategy: EquivalenceStrategy, extra_states: i64) -> TeacherBb<B> {
        TeacherBb {
            bb,
            strategy,
            extra_states,
            counters: super::TeacherCounters::default(),
        }
    }
}

impl<B: BlackBox> super::Teacher for TeacherBb<B> {
    fn is_resettable(&self) -> bool {
        self.bb.is_resettable()
    }

    fn reset(&mut self) {
        if self.bb.is_resettable() {
            self.counters.resets += 1;
            self.bb.reset();
        }
    }

    fn output_query(&mut self, input_seq: &[InputId]) -> OutputSeq {
        self.counters.output_queries += 1;
        self.counters.queried_symbols += input_seq.len() as u64;
        self.bb.query(input_seq)
    }

    fn equivalence_query(&mut self, conjecture: &crate::model::Fsm) -> Option<InputSeq> {
        self.counters.equivalence_queries += 1;
        if !self.bb.is_resettable() {
            crate::error::notice(&crate::error::FsmError::NotApplicable(
                "equivalence queries require a resettable BlackBox".into(),
            ));
            return None;
        }
        let suite = self.strategy.suite(conjecture, self.extra_states);
        for seq in &suite {
            self.bb.reset();
            self.counters.resets += 1;
            let observed = self.bb.query(seq);
            self.counters.queried_symbols += seq.len() as u64;
            let expected = conjecture.output_along_path(0, seq);
            if observed != expected {
                return Some(seq.clone());
            }
        }
        None
    }

    fn counters(&self) -> super::TeacherCounters {
        self.counters
    }
}
