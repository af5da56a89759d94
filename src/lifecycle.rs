//! Application lifecycle signal.
//!
//! The host platform reports visibility transitions ("active" when the game
//! is on screen, "background" when suspended). Listeners are registered
//! explicitly and must be removed with the returned [`Subscription`] handle;
//! nothing is cleaned up implicitly.

/// Visibility state reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Active,
    Background,
}

type Callback = Box<dyn FnMut(AppState)>;

/// Handle returned by [`LifecycleHub::subscribe`]. Pass it back to
/// [`LifecycleHub::unsubscribe`] to remove the listener.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

/// Dispatcher for lifecycle transitions.
///
/// Transitions are serialized by the host, so `emit` is never re-entered;
/// listeners run in subscription order on the single cooperative thread.
#[derive(Default)]
pub struct LifecycleHub {
    listeners: Vec<(u64, Callback)>,
    next_id: u64,
}

impl LifecycleHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(AppState) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        Subscription(id)
    }

    /// Removes a listener. Consumes the handle, so a subscription cannot be
    /// removed twice.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription.0);
    }

    /// Delivers a transition to every live listener.
    pub fn emit(&mut self, state: AppState) {
        for (_, callback) in &mut self.listeners {
            callback(state);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
