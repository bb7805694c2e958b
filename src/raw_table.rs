//! RawTable: slot storage and linear probing, with no hashing of its own.
//!
//! Callers hand in a precomputed `u64` hash; the table stores it next to
//! the entry so that growing never calls back into `K: Hash`. The only
//! user code reached from here is `K: Eq` while matching keys.

use crate::error::{MapError, MapResult};
use crate::hash::slot_index;
use core::borrow::Borrow;

/// A single position in the open-addressing table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot<K, V> {
    /// Never written since the last grow or clear; ends every lookup probe.
    Empty,
    /// Held an entry that was removed; lookups probe past it, inserts reuse it.
    Tombstone,
    Occupied { hash: u64, key: K, value: V },
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    fn matches<Q>(&self, hash: u64, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        match self {
            Slot::Occupied { hash: h, key, .. } => *h == hash && key.borrow() == q,
            _ => false,
        }
    }
}

/// Counts of each slot kind, as returned by `ProbeMap::stats`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SlotStats {
    pub occupied: usize,
    pub tombstones: usize,
    pub empty: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct RawTable<K, V> {
    slots: Box<[Slot<K, V>]>,
    len: usize,
}

impl<K, V> RawTable<K, V> {
    /// `capacity` must be a non-zero power of two.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            slots: empty_slots(capacity),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<K, V>] {
        &mut self.slots
    }

    pub(crate) fn into_slots(self) -> Vec<Slot<K, V>> {
        self.slots.into_vec()
    }

    /// Every slot index exactly once, starting at the mixed index of `hash`
    /// and wrapping around the end of the table.
    #[inline]
    pub(crate) fn probe(&self, hash: u64) -> impl Iterator<Item = usize> {
        let capacity = self.capacity();
        let mask = capacity - 1;
        let start = slot_index(hash, capacity);
        (0..capacity).map(move |step| (start + step) & mask)
    }

    /// Indices on the lookup path of `hash`: stops at the first empty slot.
    fn lookup_path(&self, hash: u64) -> impl Iterator<Item = usize> + '_ {
        self.probe(hash)
            .take_while(move |&i| !self.slots[i].is_empty())
    }

    /// First occupied slot on the lookup path holding a key equal to `q`.
    pub(crate) fn find<Q>(&self, hash: u64, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.lookup_path(hash)
            .find(|&i| self.slots[i].matches(hash, q))
    }

    /// Every occupied slot on the lookup path holding a key equal to `q`,
    /// in probe order.
    pub(crate) fn find_all<'a, Q>(&'a self, hash: u64, q: &'a Q) -> impl Iterator<Item = usize> + 'a
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.lookup_path(hash)
            .filter(move |&i| self.slots[i].matches(hash, q))
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> Option<&V> {
        self.slots[index].entry().map(|(_, v)| v)
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: usize) -> Option<&mut V> {
        self.slots[index].entry_mut().map(|(_, v)| v)
    }

    /// Store an entry in the first non-occupied slot on the probe path of
    /// `hash`, reusing a tombstone if one comes first.
    ///
    /// Callers keep `len < capacity`, which guarantees such a slot exists.
    pub(crate) fn insert(&mut self, hash: u64, key: K, value: V) -> usize {
        let index = self
            .probe(hash)
            .find(|&i| !self.slots[i].is_occupied())
            .expect("probe table full: callers must grow before len reaches capacity");
        self.slots[index] = Slot::Occupied { hash, key, value };
        self.len += 1;
        index
    }

    /// Replace the value held at `index`, returning the previous one.
    pub(crate) fn replace(&mut self, index: usize, value: V) -> Option<V> {
        self.value_mut(index)
            .map(|slot| core::mem::replace(slot, value))
    }

    /// Turn the occupied slot at `index` into a tombstone.
    pub(crate) fn take(&mut self, index: usize) -> Option<(K, V)> {
        if !self.slots[index].is_occupied() {
            return None;
        }
        let slot = core::mem::replace(&mut self.slots[index], Slot::Tombstone);
        self.len -= 1;
        slot.into_entry()
    }

    /// Double the table, re-placing every live entry by its stored hash.
    /// Tombstones are dropped. Fails once `max_capacity` is reached.
    pub(crate) fn grow(&mut self, max_capacity: usize) -> MapResult<()> {
        let capacity = self.capacity();
        if capacity >= max_capacity {
            tracing::warn!(capacity, len = self.len, "probe table at maximum capacity");
            return Err(MapError::CapacityExceeded { capacity });
        }
        let new_capacity = capacity * 2;
        let old = core::mem::replace(&mut self.slots, empty_slots(new_capacity));
        let live = self.len;
        self.len = 0;
        for slot in old.into_vec() {
            if let Slot::Occupied { hash, key, value } = slot {
                self.insert(hash, key, value);
            }
        }
        debug_assert_eq!(self.len, live);
        tracing::debug!(from = capacity, to = new_capacity, len = live, "probe table grown");
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.len = 0;
    }

    pub(crate) fn stats(&self) -> SlotStats {
        self.slots
            .iter()
            .fold(SlotStats::default(), |mut acc, slot| {
                match slot {
                    Slot::Empty => acc.empty += 1,
                    Slot::Tombstone => acc.tombstones += 1,
                    Slot::Occupied { .. } => acc.occupied += 1,
                }
                acc
            })
    }
}

fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hashes chosen so that every one of them starts probing at index 0.
    const H0: u64 = 0;

    fn table_with(keys: &[&'static str]) -> RawTable<&'static str, usize> {
        let mut t = RawTable::with_capacity(8);
        for (i, k) in keys.iter().enumerate() {
            t.insert(H0, *k, i);
        }
        t
    }

    /// Invariant: colliding inserts land in consecutive slots.
    #[test]
    fn collisions_fill_consecutive_slots() {
        let t = table_with(&["a", "b", "c"]);
        let occupied: Vec<usize> = t
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_occupied())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(occupied, vec![0, 1, 2]);
        assert_eq!(t.len(), 3);
    }

    /// Invariant: lookups walk past tombstones but stop at empty slots.
    #[test]
    fn find_skips_tombstones() {
        let mut t = table_with(&["a", "b", "c"]);
        assert_eq!(t.take(1), Some(("b", 1)));
        assert_eq!(t.find(H0, &"c"), Some(2));
        assert_eq!(t.find(H0, &"b"), None);
        assert_eq!(t.stats(), SlotStats { occupied: 2, tombstones: 1, empty: 5 });
    }

    /// Invariant: inserts reuse the first tombstone on the probe path.
    #[test]
    fn insert_reuses_tombstone() {
        let mut t = table_with(&["a", "b", "c"]);
        t.take(0);
        assert_eq!(t.insert(H0, "d", 9), 0);
        assert_eq!(t.stats().tombstones, 0);
        assert_eq!(t.len(), 3);
    }

    /// Invariant: a table made of tombstones and occupied slots only still
    /// terminates lookups after one full lap.
    #[test]
    fn lookup_terminates_without_empty_slots() {
        let mut t: RawTable<u32, u32> = RawTable::with_capacity(4);
        for k in 0..4 {
            t.insert(H0, k, k);
        }
        t.take(0);
        t.take(1);
        assert_eq!(t.stats().empty, 0);
        assert_eq!(t.find(H0, &99), None);
        assert_eq!(t.find_all(H0, &3).collect::<Vec<_>>(), vec![3]);
    }

    /// Invariant: growing doubles capacity, keeps every entry and drops tombstones.
    #[test]
    fn grow_doubles_and_drops_tombstones() {
        let mut t = table_with(&["a", "b", "c"]);
        t.take(1);
        t.grow(1 << 10).unwrap();
        assert_eq!(t.capacity(), 16);
        assert_eq!(t.len(), 2);
        assert_eq!(t.stats().tombstones, 0);
        assert!(t.find(H0, &"a").is_some());
        assert!(t.find(H0, &"c").is_some());
    }

    #[test]
    fn grow_fails_at_max_capacity() {
        let mut t = table_with(&["a"]);
        assert_eq!(t.grow(8), Err(MapError::CapacityExceeded { capacity: 8 }));
        assert_eq!(t.capacity(), 8);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn find_all_collects_duplicates_in_probe_order() {
        let mut t = table_with(&["k", "x", "k"]);
        t.insert(H0, "k", 7);
        let idx: Vec<usize> = t.find_all(H0, &"k").collect();
        assert_eq!(idx, vec![0, 2, 3]);
        let vals: Vec<usize> = idx.iter().filter_map(|&i| t.value(i).copied()).collect();
        assert_eq!(vals, vec![0, 2, 7]);
    }
}
