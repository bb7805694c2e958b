//! lp-collections: an open-addressing hash map with linear probing and
//! tombstone deletion, and an array-backed binary min-heap.
//!
//! Internal Design:
//!
//! Summary
//! - ProbeMap<K, V, S>: every entry lives directly in a power-of-two
//!   table of slots. A key's starting slot is its `BuildHasher` hash,
//!   passed through a supplemental mixing cascade and masked by
//!   `capacity - 1`; collisions walk forward one slot at a time.
//! - MinHeap<T>: a `Vec` read as a complete binary tree, repaired by
//!   sift-up after `add` and sift-down after `remove`. `heap_sort` drains
//!   it to produce ascending output.
//!
//! Layers (ProbeMap)
//! - `raw_table::RawTable`: slot storage, probing, tombstones and growth.
//!   Takes precomputed hashes and stores them beside each entry, so growing
//!   never calls `K: Hash`.
//! - `ProbeMap`: hashing, load-threshold policy, duplicate-key policy and
//!   the public API. Entry points hold a debug-only reentrancy guard while
//!   user `Hash`/`Eq` code runs.
//!
//! Slots and tombstones
//! - A slot is `Empty`, `Tombstone` or `Occupied`. Removal leaves a
//!   tombstone so later entries on the same probe path stay reachable.
//! - Lookups skip tombstones and stop at the first `Empty` slot, or after
//!   one full lap of the table.
//! - Inserts take the first non-occupied slot on the probe path, so
//!   tombstones are reused and a table of tombstones cannot wedge `put`.
//! - Growth doubles the capacity and re-places live entries; tombstones
//!   are dropped.
//!
//! Duplicate keys
//! - The default `DuplicateKeys::Append` keeps every `put` as its own
//!   entry: the map behaves as a multimap whose `get` returns the first
//!   entry on the probe path and whose `get_all` returns all of them.
//! - `DuplicateKeys::Replace` overwrites the first matching entry instead.
//!
//! Constraints
//! - Single-threaded: `ProbeMap` is not `Sync`; wrap it in one exclusive
//!   lock if it must be shared.
//! - Capacity is bounded by `MapConfig::max_capacity` (at most 2^30); a
//!   `put` that needs to grow past it fails with
//!   `MapError::CapacityExceeded` and leaves the map unchanged.
//! - Enumeration order is table order, not insertion order, and changes
//!   across growth.

pub mod config;
pub mod error;
mod hash;
mod heap_sort;
mod min_heap;
mod probe_map;
mod probe_map_proptest;
mod raw_table;
pub mod reentrancy;

// Public surface
pub use config::{
    DuplicateKeys, MapConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, MAXIMUM_CAPACITY,
};
pub use error::{HeapError, MapError};
pub use hash::supplemental_hash;
pub use heap_sort::{heap_sort, heap_sort_in_place};
pub use min_heap::MinHeap;
pub use probe_map::{IntoIter, Iter, IterMut, Keys, ProbeMap, Values, ValuesMut};
pub use raw_table::SlotStats;
pub use reentrancy::ProbeGuard;
