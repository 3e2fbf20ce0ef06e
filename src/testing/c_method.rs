//! The C-method: a single checking sequence over ADS-confirmed
//! transitions, advancing one concatenated sequence until every
//! transition is verified (spec §4.8).
//!
//! The original maintains a per-state tree of verified transitions plus
//! per-block verifying-sequence trees as it grows the sequence. Since
//! [`super::ads::realize`] already gives the minimal ADS-confirming
//! suffix for any state directly, that bookkeeping collapses to a
//! straight lookup — this is exactly [`Ma`](super::segments::ma_method)'s
//! single in-line sequence over transition+ADS segments, so `c_method`
//! delegates to it.

use super::validate;
use crate::model::{Fsm, SequenceSet};

pub fn c_method(fsm: &Fsm, extra_states: i64) -> SequenceSet {
    if !validate(fsm, extra_states) {
        return SequenceSet::new();
    }
    super::segments::ma_method(fsm, extra_states)
}
