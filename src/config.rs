//! Construction parameters for [`ProbeMap`](crate::ProbeMap).

use crate::error::{MapError, MapResult};

/// Initial table size used by [`MapConfig::default`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

/// Load factor threshold used by [`MapConfig::default`].
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Hard upper bound on table size (2^30 slots).
pub const MAXIMUM_CAPACITY: usize = 1 << 30;

/// What `put` does when the key is already stored.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicateKeys {
    /// Store another entry for the key; lookups see the first one on the
    /// probe path and `get_all` sees every one.
    #[default]
    Append,
    /// Overwrite the value of the first matching entry on the probe path.
    Replace,
}

/// Validated settings for a [`ProbeMap`](crate::ProbeMap).
///
/// ```
/// use lp_collections::{DuplicateKeys, MapConfig};
///
/// let config = MapConfig::new()
///     .with_capacity(16)
///     .with_load_factor(0.5)
///     .with_duplicates(DuplicateKeys::Replace);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    pub capacity: usize,
    pub load_factor: f64,
    pub max_capacity: usize,
    pub duplicates: DuplicateKeys,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_MAX_LOAD_FACTOR,
            max_capacity: MAXIMUM_CAPACITY,
            duplicates: DuplicateKeys::Append,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicateKeys) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Check every field; the first violation is returned.
    pub fn validate(&self) -> MapResult<()> {
        if !self.max_capacity.is_power_of_two() || self.max_capacity > MAXIMUM_CAPACITY {
            return Err(MapError::InvalidMaxCapacity {
                max_capacity: self.max_capacity,
            });
        }
        if !self.capacity.is_power_of_two() || self.capacity > self.max_capacity {
            return Err(MapError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        check_load_factor(self.load_factor)
    }
}

pub(crate) fn check_load_factor(threshold: f64) -> MapResult<()> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(MapError::InvalidLoadFactor { threshold })
    }
}
