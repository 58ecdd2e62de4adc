//! Campaign reference selection and orphan synthesis.

use super::uuid::random_uuid_v4;
use crate::record::ORPHAN_PREFIX;
use rand::Rng;
use std::collections::HashSet;

/// Number of UUID characters kept after the orphan prefix.
const ORPHAN_SUFFIX_LEN: usize = 8;

/// The known campaign ids of one batch, indexed for collision checks.
pub struct ReferencePool<'a> {
    known: &'a [String],
    lookup: HashSet<&'a str>,
}

impl<'a> ReferencePool<'a> {
    pub fn new(known: &'a [String]) -> Self {
        Self {
            known,
            lookup: known.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains(id)
    }

    /// Uniformly pick a known id. `None` when the pool is empty.
    pub fn pick_known<R: Rng>(&self, rng: &mut R) -> Option<String> {
        if self.known.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.known.len());
        Some(self.known[idx].clone())
    }

    /// Synthesize an `ORPHAN_xxxxxxxx` id absent from the pool.
    pub fn orphan<R: Rng>(&self, rng: &mut R) -> String {
        loop {
            let uuid = random_uuid_v4(rng).to_string();
            let candidate = format!("{ORPHAN_PREFIX}{}", &uuid[..ORPHAN_SUFFIX_LEN]);
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Whether a campaign id looks like a synthesized orphan.
pub fn is_orphan_id(id: &str) -> bool {
    id.starts_with(ORPHAN_PREFIX)
}
