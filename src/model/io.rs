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

//! The `.fsm` text format (spec §6 "FSM text format") and the small
//! `Utils::hashCode`/`getUniqueName` helpers from
//! `original_source/FSMlib/FSMlib.h`, ported because `save` needs them
//! when no filename is given.

use super::fsm::{Fsm, Variant};
use super::{OutputId, DEFAULT_OUTPUT, NULL_STATE};
use crate::error::{notice, FsmError};
use anyhow::{anyhow, Context, Result as AnyResult};
use rand::Rng;
use std::path::Path;

/// Serializes `fsm` to the fixed-line text format described in spec §6.
///
/// Line 1: `<variant> <n> <p> <q>`. For state-emitting variants, one line
/// of `n` state outputs (`DEFAULT_OUTPUT` for holes, though `save` only
/// ever sees compact machines). Then, for each state in order, `p` pairs
/// `next_state output_on_transition` (output omitted for Moore/DFA).
/// Unknown transitions are written as `-1`.
pub fn save(fsm: &Fsm, path: impl AsRef<Path>) -> Result<(), FsmError> {
    match save_inner(fsm, path.as_ref()) {
        Ok(()) => Ok(()),
        Err(e) => {
            let err = FsmError::IoFailure(e.to_string());
            notice(&err);
            Err(err)
        }
    }
}

fn save_inner(fsm: &Fsm, path: &Path) -> AnyResult<()> {
    let text = encode(fsm);
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("saved FSM ({} states) to {}", fsm.state_count(), path.display());
    Ok(())
}

fn encode(fsm: &Fsm) -> String {
    let n = fsm.state_count();
    let p = fsm.input_count();
    let mut out = String::new();
    out.push_str(&format!("{} {} {} {}\n", fsm.variant().name(), n, p, fsm.output_count()));

    if fsm.is_output_state() {
        let row: Vec<String> = (0..n).map(|s| fsm.raw_state_output(s).to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }

    for s in 0..n {
        let mut row = Vec::with_capacity(p);
        for i in 0..p {
            let t = fsm.raw_transition(s, i);
            let t_str = if t == NULL_STATE {
                "-1".to_string()
            } else {
                t.to_string()
            };
            if fsm.is_output_transition() {
                row.push(format!("{} {}", t_str, fsm.raw_trans_output(s, i)));
            } else {
                row.push(t_str);
            }
        }
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Parses the `.fsm` text format. Validates ranges and variant
/// consistency; on any error, returns a diagnostic without partially
/// mutating anything (parsing builds a fresh machine before returning).
pub fn load(path: impl AsRef<Path>) -> Result<Fsm, FsmError> {
    match load_inner(path.as_ref()) {
        Ok(fsm) => Ok(fsm),
        Err(e) => {
            let err = FsmError::IoFailure(e.to_string());
            notice(&err);
            Err(err)
        }
    }
}

fn load_inner(path: &Path) -> AnyResult<Fsm> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    decode(&text)
}

fn decode(text: &str) -> AnyResult<Fsm> {
    let mut lines = text.lines();
    let header = lines.next().ok_or_else(|| anyhow!("empty .fsm file"))?;
    let mut parts = header.split_whitespace();
    let variant_tag = parts.next().ok_or_else(|| anyhow!("missing variant tag"))?;
    let variant = Variant::from_name(variant_tag)
        .ok_or_else(|| anyhow!("unknown variant tag {variant_tag}"))?;
    let n: usize = parts
        .next()
        .ok_or_else(|| anyhow!("missing state count"))?
        .parse()?;
    let p: usize = parts
        .next()
        .ok_or_else(|| anyhow!("missing input count"))?
        .parse()?;
    let q: usize = parts
        .next()
        .ok_or_else(|| anyhow!("missing output count"))?
        .parse()?;

    let mut state_outputs = vec![DEFAULT_OUTPUT; n];
    if variant.emits_on_state() {
        let line = lines
            .next()
            .ok_or_else(|| anyhow!("missing state-output line"))?;
        let values: Vec<OutputId> = line
            .split_whitespace()
            .map(|v| v.parse::<OutputId>())
            .collect::<Result<_, _>>()?;
        if values.len() != n {
            return Err(anyhow!(
                "state-output line has {} entries, expected {n}",
                values.len()
            ));
        }
        if variant == Variant::Dfa && values.iter().any(|&v| v != DEFAULT_OUTPUT && !(0..2).contains(&v)) {
            return Err(anyhow!("DFA state outputs must be in {{0,1}}"));
        }
        state_outputs = values;
    }

    let mut transitions = vec![vec![NULL_STATE; p]; n];
    let mut trans_outputs = vec![vec![DEFAULT_OUTPUT; p]; n];
    for s in 0..n {
        let line = lines
            .next()
            .ok_or_else(|| anyhow!("missing transition row for state {s}"))?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let expected = if variant.emits_on_transition() { p * 2 } else { p };
        if tokens.len() != expected {
            return Err(anyhow!(
                "state {s} row has {} tokens, expected {expected}",
                tokens.len()
            ));
        }
        for i in 0..p {
            let (t_tok, o_tok) = if variant.emits_on_transition() {
                (tokens[2 * i], Some(tokens[2 * i + 1]))
            } else {
                (tokens[i], None)
            };
            let t: i64 = t_tok.parse()?;
            transitions[s][i] = if t < 0 {
                NULL_STATE
            } else {
                let t = t as usize;
                if t >= n {
                    return Err(anyhow!("state {s} input {i} targets out-of-range state {t}"));
                }
                t
            };
            if let Some(o_tok) = o_tok {
                let o: OutputId = o_tok.parse()?;
                trans_outputs[s][i] = o;
            }
        }
    }

    Ok(Fsm::from_tables(variant, p, q, transitions, trans_outputs, state_outputs))
}

/// Generates a random sequence of alphanumeric characters, ported from
/// `FSMlib::Utils::hashCode`.
pub fn hash_code(length: usize) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Concatenates `name` with a generated hash and `suffix` so the result is
/// a filename unlikely to collide in `path`, ported from
/// `FSMlib::Utils::getUniqueName`.
pub fn unique_name(name: &str, suffix: &str, path: &str) -> String {
    let hash = hash_code(8);
    if path.is_empty() {
        format!("{name}{hash}{suffix}")
    } else {
        format!("{}/{name}{hash}{suffix}", path.trim_end_matches('/'))
    }
}
