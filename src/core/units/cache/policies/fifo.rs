//! First In, First Out (FIFO) Replacement Policy.
//!
//! Evicts ways in fill order, ignoring hits. Each set keeps a round-robin
//! pointer that advances whenever a line is filled.

use super::ReplacementPolicy;

/// FIFO policy state.
pub struct FifoPolicy {
    next: Vec<usize>,
    ways: usize,
}

impl FifoPolicy {
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            next: vec![0; sets],
            ways,
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn update(&mut self, _set: usize, _way: usize) {}

    fn fill(&mut self, set: usize, way: usize) {
        if way == self.next[set] {
            self.next[set] = (way + 1) % self.ways;
        }
    }

    fn get_victim(&mut self, set: usize) -> usize {
        self.next[set]
    }

    fn reset(&mut self) {
        self.next.fill(0);
    }
}
