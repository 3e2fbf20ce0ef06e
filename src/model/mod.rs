//! The FSM data model (C1): a typed, variant-tagged finite state machine,
//! its storage and mutation contract, plus the `.fsm` text I/O format and
//! Graphviz export.

mod dot;
mod fsm;
mod io;

pub use dot::write_dot;
pub use fsm::{Fsm, Variant};
pub use io::{load, save, unique_name};

/// State identifier. `NULL_STATE`/`WRONG_STATE` are reserved sentinels
/// (spec §3), represented as the two highest `usize` values so that every
/// ordinary state index remains a small, dense `usize`.
pub type StateId = usize;

/// Input symbol identifier. `STOUT_INPUT`/`EPSILON_INPUT` are reserved
/// sentinels, analogous to `StateId`'s.
pub type InputId = usize;

/// Output symbol identifier. Unlike state/input ids, outputs keep a signed
/// representation because `DEFAULT_OUTPUT`/`WRONG_OUTPUT` are conventionally
/// negative in the original (`-1`, `-2`).
pub type OutputId = i32;

/// No transition is defined for this (state, input) pair.
pub const NULL_STATE: StateId = StateId::MAX;
/// The query itself was out of range (bad state id or bad input).
pub const WRONG_STATE: StateId = StateId::MAX - 1;
/// Marker input requesting a state's output rather than a transition.
pub const STOUT_INPUT: InputId = InputId::MAX;
/// Marker input for an empty transition (used by learners; reserved here).
pub const EPSILON_INPUT: InputId = InputId::MAX - 1;
/// Output value meaning "no state output configured here".
pub const DEFAULT_OUTPUT: OutputId = -1;
/// Output value marking a step that traversed an undefined transition.
pub const WRONG_OUTPUT: OutputId = -2;

/// An input sequence: an ordered list of inputs, possibly containing
/// [`STOUT_INPUT`] as a request-for-state-output marker.
pub type InputSeq = Vec<InputId>;

/// An output sequence: the aligned trace produced by running an input
/// sequence from a state.
pub type OutputSeq = Vec<OutputId>;

/// A set of input sequences, ordered the way `std::set<sequence_in_t>` is
/// in the original (lexicographic over the sequence elements) so that
/// regression vectors stay deterministic across runs.
pub type SequenceSet = std::collections::BTreeSet<InputSeq>;
