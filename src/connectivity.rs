//! Connectivity signal: online/offline transitions as a subscription.
//!
//! The coordinator subscribes to transitions rather than polling. Dropping
//! a receiver unsubscribes it.

use tokio::sync::watch;

/// Publisher side of the connectivity state.
#[derive(Debug)]
pub struct ConnectivitySignal {
    tx: watch::Sender<bool>,
}

impl ConnectivitySignal {
    /// Creates a signal with the given initial state.
    pub fn new(online: bool) -> Self {
        let (tx, _) = watch::channel(online);
        Self { tx }
    }

    /// Registers a subscriber. The receiver observes the current state
    /// immediately and every transition afterwards.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn set_online(&self) {
        // send_if_modified suppresses duplicate notifications for repeated
        // identical states.
        self.tx.send_if_modified(|state| {
            let changed = !*state;
            *state = true;
            changed
        });
    }

    pub fn set_offline(&self) {
        self.tx.send_if_modified(|state| {
            let changed = *state;
            *state = false;
            changed
        });
    }

    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for ConnectivitySignal {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_sees_transitions() {
        let signal = ConnectivitySignal::new(false);
        let mut rx = signal.subscribe();
        assert!(!*rx.borrow());

        signal.set_online();
        rx.changed().await.unwrap();
        assert!(*rx.borrow());

        signal.set_offline();
        rx.changed().await.unwrap();
        assert!(!*rx.borrow());
    }

    #[tokio::test]
    async fn test_duplicate_state_not_republished() {
        let signal = ConnectivitySignal::new(true);
        let mut rx = signal.subscribe();
        rx.mark_unchanged();

        signal.set_online();
        assert!(!rx.has_changed().unwrap());
    }
}
