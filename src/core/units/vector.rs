//! Vector-control helpers.

use crate::isa::abi::NUM_VECTOR_ENTRIES;

/// Number of lanes a vector instruction processes for a given VL value.
#[inline]
pub fn active_lanes(vl: u32) -> usize {
    (vl as usize).min(NUM_VECTOR_ENTRIES)
}

/// Source lane for PERM with a per-lane index vector (`vd[k] = va[idx]`).
#[inline]
pub fn permute_index(index: u32) -> usize {
    index as usize % NUM_VECTOR_ENTRIES
}

/// Source lane for PERM with a scalar rotation (`vd[k] = va[k + b]`).
#[inline]
pub fn rotate_index(lane: usize, amount: u32) -> usize {
    (lane + amount as usize % NUM_VECTOR_ENTRIES) % NUM_VECTOR_ENTRIES
}

/// Address of lane `lane` for a strided vector access.
#[inline]
pub fn strided_address(base: u32, stride: u32, lane: usize) -> u32 {
    base.wrapping_add(stride.wrapping_mul(lane as u32))
}
