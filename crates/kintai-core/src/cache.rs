//! Time-bounded memoization for expensive loads.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct CacheSlot<T> {
    value: T,
    computed_at: Instant,
}

/// ## Summary
/// A single-value cache with a TTL window, guarded by a mutex.
///
/// The lock is held for the whole check-or-recompute, so at most one caller
/// runs the producer within a TTL window and no caller observes a partially
/// written entry. The stored value and every returned value are independent
/// clones; caller mutation cannot reach the cached copy.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    enabled: bool,
    slot: Mutex<Option<CacheSlot<T>>>,
}

impl<T: Clone> TtlCache<T> {
    /// A zero TTL disables caching, as does `enabled = false`; every call
    /// then recomputes (still serialized by the lock).
    #[must_use]
    pub fn new(ttl: Duration, enabled: bool) -> Self {
        Self {
            ttl,
            enabled,
            slot: Mutex::new(None),
        }
    }

    /// ## Summary
    /// Returns a clone of the cached value when it is still within the TTL
    /// window, otherwise runs `produce` and stores its result.
    ///
    /// ## Errors
    /// Propagates the producer's error; the previous slot is left unchanged
    /// so the next call retries.
    pub fn get_or_compute<E>(&self, produce: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if self.enabled
            && !self.ttl.is_zero()
            && let Some(entry) = slot.as_ref()
            && entry.computed_at.elapsed() <= self.ttl
        {
            return Ok(entry.value.clone());
        }

        let value = produce()?;
        *slot = Some(CacheSlot {
            value: value.clone(),
            computed_at: Instant::now(),
        });
        Ok(value)
    }
}
