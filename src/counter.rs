//! Debounced persisted counter.
//!
//! Holds one non-negative integer in memory with durable backing. In-memory
//! updates are synchronous; the durable write is debounced so a burst of
//! rapid increments coalesces into a single write carrying the final value.
//! The debounce is driven by the caller's clock (`poll` with an `Instant`),
//! which keeps it on the single cooperative thread and testable without
//! sleeping.

use crate::constants::{COUNTER_DEBOUNCE_MS, COUNTER_MAX_VALUE};
use crate::storage::KeyValueStore;
use std::time::{Duration, Instant};

/// Clamps a raw numeric input to a valid counter value: non-finite and
/// negative inputs reset to 0, values past the max clamp to the max, and
/// everything else rounds down to an integer.
pub fn validate_counter(raw: f64) -> u64 {
    if !raw.is_finite() || raw < 0.0 {
        return 0;
    }
    if raw >= COUNTER_MAX_VALUE as f64 {
        return COUNTER_MAX_VALUE;
    }
    raw.floor() as u64
}

pub struct PersistedCounter<S: KeyValueStore> {
    store: S,
    key: String,
    value: u64,
    debounce: Duration,
    /// Deadline of the pending durable write, if any. Single-shot: every
    /// update replaces it.
    deadline: Option<Instant>,
}

impl<S: KeyValueStore> PersistedCounter<S> {
    /// Loads the counter from storage. A missing or corrupt stored value
    /// silently defaults to 0.
    pub fn load(store: S, key: &str) -> Self {
        Self::with_debounce(store, key, Duration::from_millis(COUNTER_DEBOUNCE_MS))
    }

    pub fn with_debounce(store: S, key: &str, debounce: Duration) -> Self {
        let value = match store.get(key) {
            Ok(Some(raw)) => raw
                .trim()
                .parse::<f64>()
                .map(validate_counter)
                .unwrap_or(0),
            _ => 0,
        };
        Self {
            store,
            key: key.to_string(),
            value,
            debounce,
            deadline: None,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Sets the counter, updating memory immediately and arming (or
    /// re-arming) the debounce window.
    pub fn set(&mut self, raw: f64, now: Instant) {
        self.value = validate_counter(raw);
        self.deadline = Some(now + self.debounce);
    }

    pub fn increment(&mut self, by: u64, now: Instant) {
        self.set(self.value.saturating_add(by) as f64, now);
    }

    /// Performs the durable write once the debounce window has elapsed.
    /// Returns true if a write was attempted. Write failures are swallowed;
    /// the pending write is cleared either way.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let _ = self.store.set(&self.key, &self.value.to_string());
                true
            }
            _ => false,
        }
    }

    /// Cancels any pending durable write. Call on teardown; dropping the
    /// counter never flushes.
    pub fn cancel_pending(&mut self) {
        self.deadline = None;
    }

    pub fn has_pending_write(&self) -> bool {
        self.deadline.is_some()
    }
}
