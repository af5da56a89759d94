//! Background time tracking.
//!
//! Records a wall-clock timestamp when the app is suspended and computes
//! whole minutes away when it resumes. Best effort only: storage failures
//! and corrupt values degrade to "0 minutes away", never an error. Game
//! progress is owned by the save file, not by this tracker.

use crate::constants::BACKGROUND_TIME_KEY;
use crate::lifecycle::{AppState, LifecycleHub, Subscription};
use crate::storage::KeyValueStore;
use chrono::Utc;
use std::cell::RefCell;
use std::rc::Rc;

pub struct BackgroundTracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> BackgroundTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records the current instant as the backgrounding time, overwriting
    /// any previous value. Write failures are swallowed.
    pub fn save_timestamp(&mut self) {
        self.save_timestamp_at(Utc::now().timestamp_millis());
    }

    pub fn save_timestamp_at(&mut self, epoch_ms: i64) {
        let _ = self.store.set(BACKGROUND_TIME_KEY, &epoch_ms.to_string());
    }

    /// Whole minutes since the stored backgrounding time. Missing, corrupt,
    /// or future-dated values all degrade to 0.
    pub fn calculate_time_away(&self) -> i64 {
        self.time_away_at(Utc::now().timestamp_millis())
    }

    pub fn time_away_at(&self, now_ms: i64) -> i64 {
        let stored = match self.store.get(BACKGROUND_TIME_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<i64>() {
                Ok(ms) => ms,
                Err(_) => return 0,
            },
            _ => return 0,
        };
        ((now_ms - stored) / 60_000).max(0)
    }
}

/// Wires a tracker into the lifecycle hub: backgrounding saves the
/// timestamp, resuming forwards the minutes away to `on_resume`.
///
/// The caller keeps the returned [`Subscription`] and must unsubscribe it
/// when the owning view is torn down, or the listener leaks.
pub fn attach<S: KeyValueStore + 'static>(
    tracker: Rc<RefCell<BackgroundTracker<S>>>,
    hub: &mut LifecycleHub,
    mut on_resume: impl FnMut(i64) + 'static,
) -> Subscription {
    hub.subscribe(move |state| match state {
        AppState::Background => tracker.borrow_mut().save_timestamp(),
        AppState::Active => {
            let minutes = tracker.borrow().calculate_time_away();
            on_resume(minutes);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_time_away_five_minutes() {
        let store = MemoryStore::new();
        let now = 1_700_000_000_000;
        store.seed(BACKGROUND_TIME_KEY, &(now - 5 * 60_000).to_string());

        let tracker = BackgroundTracker::new(store);
        assert_eq!(tracker.time_away_at(now), 5);
    }

    #[test]
    fn test_time_away_rounds_down() {
        let store = MemoryStore::new();
        let now = 1_700_000_000_000;
        store.seed(BACKGROUND_TIME_KEY, &(now - 5 * 60_000 - 59_999).to_string());

        let tracker = BackgroundTracker::new(store);
        assert_eq!(tracker.time_away_at(now), 5);
    }

    #[test]
    fn test_missing_value_is_zero_minutes() {
        let tracker = BackgroundTracker::new(MemoryStore::new());
        assert_eq!(tracker.calculate_time_away(), 0);
    }

    #[test]
    fn test_corrupt_value_is_zero_minutes() {
        let store = MemoryStore::new();
        store.seed(BACKGROUND_TIME_KEY, "not-a-number");

        let tracker = BackgroundTracker::new(store);
        assert_eq!(tracker.calculate_time_away(), 0);
    }

    #[test]
    fn test_future_timestamp_is_zero_minutes() {
        let store = MemoryStore::new();
        let now = 1_700_000_000_000;
        store.seed(BACKGROUND_TIME_KEY, &(now + 3_600_000).to_string());

        let tracker = BackgroundTracker::new(store);
        assert_eq!(tracker.time_away_at(now), 0);
    }

    #[test]
    fn test_save_timestamp_overwrites() {
        let store = MemoryStore::new();
        let mut tracker = BackgroundTracker::new(store.clone());

        tracker.save_timestamp_at(1_000);
        tracker.save_timestamp_at(2_000);

        assert_eq!(
            store.get(BACKGROUND_TIME_KEY).unwrap().as_deref(),
            Some("2000")
        );
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let mut tracker = BackgroundTracker::new(store.clone());

        tracker.save_timestamp_at(1_000);
        assert_eq!(tracker.calculate_time_away(), 0);
    }
}
