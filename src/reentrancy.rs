//! Debug-only guard against re-entering a map while it probes.
//!
//! Probing calls into user code through `K: Hash` and `K: Eq`. If that
//! code reaches back into the same map (through a raw pointer or shared
//! reference) while a probe walk is in flight, the walk could observe a
//! table that is being rewritten. In debug builds the guard turns this
//! into a panic naming both operations; in release builds it is a
//! zero-sized no-op.

use core::cell::Cell;

/// Per-map marker recording which operation currently holds the table.
#[derive(Debug, Default)]
pub struct ProbeGuard {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    #[cfg(not(debug_assertions))]
    _cell: core::marker::PhantomData<Cell<()>>,
}

impl ProbeGuard {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            #[cfg(not(debug_assertions))]
            _cell: core::marker::PhantomData,
        }
    }

    /// Mark `op` as running until the returned token is dropped.
    /// Panics in debug builds if another operation is already running.
    #[inline]
    pub fn enter(&self, op: &'static str) -> ProbeToken<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.get() {
                panic!("reentrant `{op}` while `{outer}` is probing the same map");
            }
            self.active.set(Some(op));
            return ProbeToken { guard: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return ProbeToken {
                _guard: core::marker::PhantomData,
            };
        }
    }

    /// Whether an operation currently holds the guard. Always `false` in
    /// release builds.
    pub fn is_active(&self) -> bool {
        #[cfg(debug_assertions)]
        {
            return self.active.get().is_some();
        }
        #[cfg(not(debug_assertions))]
        {
            return false;
        }
    }
}

/// Releases the guard on drop.
pub struct ProbeToken<'a> {
    #[cfg(debug_assertions)]
    guard: &'a ProbeGuard,
    #[cfg(not(debug_assertions))]
    _guard: core::marker::PhantomData<&'a ProbeGuard>,
}

impl Drop for ProbeToken<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.guard.active.set(None);
    }
}
