use std::collections::HashMap;

use crate::types::Score;
use crate::zobrist::Fingerprint;

/// Memoized evaluator results keyed by fingerprint.
///
/// Unbounded, never evicts. Distinct positions that share a fingerprint share a score; the
/// collision is not detected.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: HashMap<Fingerprint, Score>,
    hits: u64,
    misses: u64,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fp: Fingerprint) -> Option<Score> {
        self.entries.get(&fp).copied()
    }

    /// Later writes for the same fingerprint overwrite.
    pub fn put(&mut self, fp: Fingerprint, score: Score) {
        self.entries.insert(fp, score);
    }

    /// Cached score for `fp`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, fp: Fingerprint, compute: impl FnOnce() -> Score) -> Score {
        if let Some(score) = self.get(fp) {
            self.hits += 1;
            return score;
        }
        self.misses += 1;
        let score = compute();
        self.put(fp, score);
        score
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}


// Entries hold the white-relative material balance. The search orients it to the root side on the
// way out, so the same entry serves both colors.
