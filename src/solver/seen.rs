use std::hash::BuildHasherDefault;

use hashbrown::HashSet;

use crate::hash::Fingerprint;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

/// Entries are 48 bytes each; never pre-reserve more than this many even
/// for an unbounded search.
const RESERVE_CAP: u64 = 1 << 20;

/// The visited-fingerprint set. Dominates the solver's memory footprint,
/// so capacity is reserved once, sized to the state budget, and kept
/// across `clear` calls for reuse between seeds.
#[derive(Debug, Default)]
pub struct SeenStates {
    set: HashSet<Fingerprint, FastHasher>,
}

impl SeenStates {
    #[must_use]
    pub fn with_budget(max_states: u64) -> Self {
        let reserve = if max_states == 0 {
            RESERVE_CAP
        } else {
            max_states.min(RESERVE_CAP)
        };
        Self {
            set: HashSet::with_capacity_and_hasher(reserve as usize, FastHasher::default()),
        }
    }

    /// Record a fingerprint; false if it was already present.
    #[inline]
    pub fn insert(&mut self, fp: Fingerprint) -> bool {
        self.set.insert(fp)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.set.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
