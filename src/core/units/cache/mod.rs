//! Cache Timing Model.
//!
//! `CacheSim` is a set-associative tag store. It holds no data: the core
//! always reads and writes the true value through the memory interface and
//! only asks the cache whether the access would have hit. Writes allocate
//! (write-allocate, no write-back timing).

/// Replacement policies.
pub mod policies;

use crate::config::{CacheConfig, ReplacementPolicy as PolicyKind};
use policies::{FifoPolicy, LruPolicy, ReplacementPolicy};

#[derive(Clone, Copy, Default)]
struct CacheLine {
    tag: u32,
    valid: bool,
}

/// Hit/miss oracle for one cache.
pub struct CacheSim {
    /// Whether the cache takes part in timing at all.
    pub enabled: bool,
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_shift: u32,
    policy: Box<dyn ReplacementPolicy>,
}

impl CacheSim {
    /// Builds a cache from its configuration.
    ///
    /// The configuration is expected to have passed `Config::validate`.
    pub fn new(config: &CacheConfig) -> Self {
        let ways = config.ways.max(1) as usize;
        let num_sets = (config.num_lines as usize / ways).max(1);
        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyKind::Lru => Box::new(LruPolicy::new(num_sets, ways)),
            PolicyKind::Fifo => Box::new(FifoPolicy::new(num_sets, ways)),
        };
        Self {
            enabled: config.enabled,
            lines: vec![CacheLine::default(); num_sets * ways],
            num_sets,
            ways,
            line_shift: config.line_bytes.max(1).trailing_zeros(),
            policy,
        }
    }

    /// Returns the number of sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Returns the associativity.
    pub fn ways(&self) -> usize {
        self.ways
    }

    #[inline]
    fn locate(&self, addr: u32) -> (usize, u32) {
        let line = addr >> self.line_shift;
        let set = line as usize % self.num_sets;
        let tag = line / self.num_sets as u32;
        (set, tag)
    }

    /// Checks whether the line holding `addr` is present, without updating state.
    pub fn contains(&self, addr: u32) -> bool {
        let (set, tag) = self.locate(addr);
        self.lines[set * self.ways..(set + 1) * self.ways]
            .iter()
            .any(|l| l.valid && l.tag == tag)
    }

    /// Records an access and reports whether it hit.
    ///
    /// On a miss the line is allocated, evicting an invalid way first and
    /// otherwise the policy's victim. `_is_write` is accepted for symmetry
    /// with the access classification; reads and writes allocate alike.
    pub fn access(&mut self, addr: u32, _is_write: bool) -> bool {
        let (set, tag) = self.locate(addr);
        let base = set * self.ways;

        for way in 0..self.ways {
            let line = self.lines[base + way];
            if line.valid && line.tag == tag {
                self.policy.update(set, way);
                return true;
            }
        }

        let way = match (0..self.ways).find(|&w| !self.lines[base + w].valid) {
            Some(way) => way,
            None => self.policy.get_victim(set),
        };
        self.lines[base + way] = CacheLine { tag, valid: true };
        self.policy.fill(set, way);
        false
    }

    /// Invalidates every line and resets the replacement state.
    pub fn flush(&mut self) {
        self.lines.fill(CacheLine::default());
        self.policy.reset();
    }
}
