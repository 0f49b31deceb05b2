//! Cache Replacement Policies.
//!
//! A policy tracks per-set usage and picks the victim way when a set is
//! full. Invalid ways are always filled first by the cache itself, so a
//! policy is only asked for a victim among valid lines.

/// Least Recently Used policy.
pub mod lru;

/// First In, First Out policy.
pub mod fifo;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

/// Victim selection for a set-associative cache.
pub trait ReplacementPolicy: Send {
    /// Records an access (hit or fill) to `way` of `set`.
    fn update(&mut self, set: usize, way: usize);

    /// Records that `way` of `set` was (re)filled with a new line.
    fn fill(&mut self, set: usize, way: usize) {
        self.update(set, way);
    }

    /// Identifies the victim way to evict from `set`.
    fn get_victim(&mut self, set: usize) -> usize;

    /// Returns the policy to its initial state.
    fn reset(&mut self);
}
