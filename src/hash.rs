//! Supplemental hash mixing and slot indexing.

/// Spread the entropy of a raw hash code into its low bits before masking.
#[inline]
pub fn supplemental_hash(mut h: u64) -> u64 {
    h ^= (h >> 20) ^ (h >> 12);
    h ^ (h >> 7) ^ (h >> 4)
}

/// Starting probe index for `hash` in a table of `capacity` slots.
/// `capacity` must be a power of two.
#[inline]
pub fn slot_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    (supplemental_hash(hash) as usize) & (capacity - 1)
}
