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
use once_cell::sync::Lazy;
use std::env;

/// Maximum number of entries kept in the Fault-Coverage Checker's
/// candidate-isomorphism memo (C9).
///
/// Set via `FSMLIB_FCC_CACHE_SIZE`; defaults to 64.
pub static FCC_CACHE_SIZE: Lazy<usize> = Lazy::new(|| {
    env::var("FSMLIB_FCC_CACHE_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64)
});

/// `GUROBI_HOME`, consulted only by Mstar/Mrstar (spec §6). Its absence
/// degrades those two methods to a diagnostic plus the default greedy
/// [`crate::testing::segments::TourSolver`] rather than failing outright.
pub fn gurobi_home() -> Option<String> {
    env::var("GUROBI_HOME").ok()
}

/// `FSMLIB_DISABLE_FCC_CACHE`: when set to any non-empty value, bypasses
/// the Fault-Coverage Checker's result memo entirely (useful for
/// benchmarking or when candidate enumeration must not be short-circuited
/// by a stale entry during development).
pub fn disable_fcc_cache() -> bool {
    env::var("FSMLIB_DISABLE_FCC_CACHE")
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}
