//! ProbeMap: open-addressing hash map with linear probing and tombstones.

use crate::config::{check_load_factor, DuplicateKeys, MapConfig};
use crate::error::MapResult;
use crate::raw_table::{RawTable, Slot, SlotStats};
use crate::reentrancy::ProbeGuard;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use rustc_hash::FxBuildHasher;

/// Hash map storing every entry directly in a power-of-two table.
///
/// By default a repeated `put` of the same key stores a second entry
/// rather than overwriting ([`DuplicateKeys::Append`]); `get` returns the
/// first entry on the probe path and [`get_all`](Self::get_all) returns
/// all of them. Configure [`DuplicateKeys::Replace`] for overwrite
/// semantics.
///
/// ```
/// use lp_collections::ProbeMap;
///
/// let mut ages: ProbeMap<String, u32> = ProbeMap::new();
/// ages.put("Smith".to_string(), 30)?;
/// ages.put("Cook".to_string(), 29)?;
/// ages.put("Cook".to_string(), 129)?;
/// assert_eq!(ages.get("Smith"), Some(&30));
/// assert_eq!(ages.get_all("Cook").len(), 2);
/// # Ok::<(), lp_collections::MapError>(())
/// ```
pub struct ProbeMap<K, V, S = FxBuildHasher> {
    table: RawTable<K, V>,
    load_factor: f64,
    max_capacity: usize,
    duplicates: DuplicateKeys,
    hasher: S,
    guard: ProbeGuard,
}

impl<K, V> ProbeMap<K, V>
where
    K: Eq + Hash,
{
    /// Empty map with the default configuration (4 slots, 0.75 load factor).
    pub fn new() -> Self {
        Self::with_hasher(FxBuildHasher)
    }

    pub fn with_config(config: MapConfig) -> MapResult<Self> {
        Self::with_config_and_hasher(config, FxBuildHasher)
    }
}

impl<K, V, S> Default for ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::build(MapConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: MapConfig, hasher: S) -> MapResult<Self> {
        config.validate()?;
        Ok(Self::build(config, hasher))
    }

    fn build(config: MapConfig, hasher: S) -> Self {
        Self {
            table: RawTable::with_capacity(config.capacity),
            load_factor: config.load_factor,
            max_capacity: config.max_capacity,
            duplicates: config.duplicates,
            hasher,
            guard: ProbeGuard::new(),
        }
    }

    #[inline]
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// True when one more entry would bring the table to its load threshold,
    /// so the next insert must grow it first.
    #[inline]
    fn at_threshold(&self) -> bool {
        (self.table.len() + 1) as f64 >= self.table.capacity() as f64 * self.load_factor
    }

    /// Insert `(key, value)`.
    ///
    /// Grows the table first when the insert would bring `len` to
    /// `capacity * load_factor`, failing
    /// with [`MapError::CapacityExceeded`](crate::MapError::CapacityExceeded)
    /// if it is already at the maximum. Returns the overwritten value in
    /// [`DuplicateKeys::Replace`] mode, `None` otherwise.
    pub fn put(&mut self, key: K, value: V) -> MapResult<Option<V>> {
        let _g = self.guard.enter("put");
        let hash = self.make_hash(&key);
        if self.duplicates == DuplicateKeys::Replace {
            if let Some(i) = self.table.find(hash, &key) {
                return Ok(self.table.replace(i, value));
            }
        }
        if self.at_threshold() {
            self.table.grow(self.max_capacity)?;
        }
        self.table.insert(hash, key, value);
        Ok(None)
    }

    /// Value of the first entry for `key` on its probe path.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter("get");
        let hash = self.make_hash(key);
        let i = self.table.find(hash, key)?;
        self.table.value(i)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter("get_mut");
        let hash = self.make_hash(key);
        let i = self.table.find(hash, key)?;
        self.table.value_mut(i)
    }

    /// Values of every entry for `key`, in probe order.
    pub fn get_all<Q>(&self, key: &Q) -> Vec<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter("get_all");
        let hash = self.make_hash(key);
        self.table
            .find_all(hash, key)
            .filter_map(|i| self.table.value(i))
            .collect()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Tombstone the first entry for `key` and return its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter("remove");
        let hash = self.make_hash(key);
        let i = self.table.find(hash, key)?;
        self.table.take(i).map(|(_, v)| v)
    }

    /// Like [`remove`](Self::remove) but also returns the stored key.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter("remove_entry");
        let hash = self.make_hash(key);
        let i = self.table.find(hash, key)?;
        self.table.take(i)
    }

    /// Double the capacity and re-place every live entry, discarding
    /// tombstones.
    pub fn rehash(&mut self) -> MapResult<()> {
        let _g = self.guard.enter("rehash");
        self.table.grow(self.max_capacity)
    }

    /// `put` every pair, stopping at the first error.
    pub fn try_extend<I>(&mut self, iter: I) -> MapResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in iter {
            self.put(k, v)?;
        }
        Ok(())
    }
}

impl<K, V, S> ProbeMap<K, V, S> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Number of slots in the table; always a power of two.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor
    }

    pub fn set_load_factor_threshold(&mut self, threshold: f64) -> MapResult<()> {
        check_load_factor(threshold)?;
        self.load_factor = threshold;
        Ok(())
    }

    pub fn duplicates(&self) -> DuplicateKeys {
        self.duplicates
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Reset every slot to empty, keeping the current capacity.
    pub fn clear(&mut self) {
        let dropped = self.table.len();
        self.table.clear();
        tracing::debug!(capacity = self.table.capacity(), dropped, "probe map cleared");
    }

    /// Census of occupied, tombstoned and empty slots.
    pub fn stats(&self) -> SlotStats {
        self.table.stats()
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Live entries in table order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.table.slots().iter(),
            remaining: self.table.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.table.len();
        IterMut {
            it: self.table.slots_mut().iter_mut(),
            remaining,
        }
    }

    /// Live entries collected in table order.
    pub fn items(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<K, V, S> Clone for ProbeMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            load_factor: self.load_factor,
            max_capacity: self.max_capacity,
            duplicates: self.duplicates,
            hasher: self.hasher.clone(),
            guard: ProbeGuard::new(),
        }
    }
}

impl<K, V, S> fmt::Debug for ProbeMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders live entries in table order as `[(k1, v1), (k2, v2)]`.
impl<K, V, S> fmt::Display for ProbeMap<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (n, (k, v)) in self.iter().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({k}, {v})")?;
        }
        f.write_str("]")
    }
}

/// Iterator over live entries of a `ProbeMap`.
pub struct Iter<'a, K, V> {
    it: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.it.by_ref() {
            if let Some(entry) = slot.entry() {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over live entries with mutable values.
pub struct IterMut<'a, K, V> {
    it: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.it.by_ref() {
            if let Some(entry) = slot.entry_mut() {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Owning iterator over live entries in table order.
pub struct IntoIter<K, V> {
    it: std::vec::IntoIter<Slot<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.by_ref().find_map(Slot::into_entry)
    }
}

impl<K, V, S> IntoIterator for ProbeMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.table.into_slots().into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbeMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ProbeMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
