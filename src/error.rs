use thiserror::Error;

/// Errors returned by [`ProbeMap`](crate::ProbeMap) and
/// [`MapConfig`](crate::MapConfig).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// The load threshold was reached while the table is already at its
    /// maximum capacity.
    #[error("map capacity exceeded: table already holds {capacity} slots")]
    CapacityExceeded { capacity: usize },

    /// Capacity is zero, not a power of two, or above the maximum.
    #[error("invalid capacity {capacity}: must be a non-zero power of two within the maximum")]
    InvalidCapacity { capacity: usize },

    /// Maximum capacity is not a power of two or above `MAXIMUM_CAPACITY`.
    #[error("invalid maximum capacity {max_capacity}")]
    InvalidMaxCapacity { max_capacity: usize },

    /// Load factor threshold outside (0, 1].
    #[error("invalid load factor threshold {threshold}: must lie in (0, 1]")]
    InvalidLoadFactor { threshold: f64 },
}

/// Errors returned by [`MinHeap`](crate::MinHeap).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    #[error("heap is empty")]
    Empty,
}

pub type MapResult<T> = std::result::Result<T, MapError>;
