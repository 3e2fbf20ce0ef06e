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

//! Memo of [`crate::fault_coverage::fault_coverage`] results, keyed by
//! [`super::hashing::fault_coverage_cache_key`]. Candidate enumeration
//! backtracks over an observation tree and can be costly for larger
//! suites; learners and regression tests tend to re-certify the same
//! `(fsm, TS, extra_states)` triple repeatedly, so this is worth caching.

use crate::env::FCC_CACHE_SIZE;
use crate::model::Fsm;
use lru::LruCache;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

struct ModuleState {
    cache: Mutex<LruCache<u64, Arc<Vec<Fsm>>>>,
}

static MODULE_STATE: Lazy<ModuleState> = Lazy::new(|| ModuleState {
    cache: Mutex::new(LruCache::new(
        std::num::NonZeroUsize::new(*FCC_CACHE_SIZE).unwrap_or(std::num::NonZeroUsize::MIN),
    )),
});

pub(crate) fn get(key: u64) -> Option<Arc<Vec<Fsm>>> {
    if crate::env::disable_fcc_cache() {
        return None;
    }
    MODULE_STATE.cache.lock().unwrap().get(&key).cloned()
}

pub(crate) fn insert(key: u64, candidates: Vec<Fsm>) -> Arc<Vec<Fsm>> {
    let candidates = Arc::new(candidates);
    if !crate::env::disable_fcc_cache() {
        MODULE_STATE
            .cache
            .lock()
            .unwrap()
            .put(key, Arc::clone(&candidates));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variant;

    #[test]
    fn insert_then_get_round_trips() {
        let fsm = Fsm::create(Variant::Dfa, 1, 1, 1);
        let stored = insert(424242, vec![fsm]);
        let fetched = get(424242).expect("just inserted");
        assert_eq!(fetched.len(), stored.len());
    }
}
