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

//! Graphviz export (spec §6 "DOT export"). Out of scope beyond this single
//! contract: no rendering, no GIF animation of learning runs.

use super::fsm::Fsm;
use super::NULL_STATE;
use std::fmt::Write as _;

/// Standard Graphviz digraph: states are nodes labeled `s/out` (Moore-style
/// variants) or `s`; transitions are edges labeled `in/out` or `in`.
pub fn write_dot(fsm: &Fsm) -> String {
    let mut out = String::new();
    out.push_str("digraph FSM {\n");
    out.push_str("  rankdir=LR;\n");

    for s in fsm.states() {
        if fsm.is_output_state() {
            let _ = writeln!(out, "  {s} [label=\"{s}/{}\"];", fsm.output(s, super::STOUT_INPUT));
        } else {
            let _ = writeln!(out, "  {s} [label=\"{s}\"];");
        }
    }

    for s in fsm.states() {
        for i in 0..fsm.input_count() {
            let t = fsm.next_state(s, i);
            if t == NULL_STATE {
                continue;
            }
            if fsm.is_output_transition() {
                let o = fsm.output(s, i);
                let _ = writeln!(out, "  {s} -> {t} [label=\"{i}/{o}\"];");
            } else {
                let _ = writeln!(out, "  {s} -> {t} [label=\"{i}\"];");
            }
        }
    }

    out.push_str("}\n");
    out
}
