// SPDX-License-Identifier: MIT

//! Connectivity monitor.
//!
//! The platform reports connectivity transitions as boundary events;
//! the monitor fans them out to subscribers. A subscriber's callback
//! fires only for events where the device is both connected and the
//! internet actually reachable - a captive portal or dead uplink must
//! not trigger a sync attempt.
//!
//! Subscriptions are scoped: dropping the [`Subscription`] handle stops
//! the listener task, so shutdown releases the callback without an
//! ambient global listener lingering.

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A connectivity transition reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectivityEvent {
    /// A network interface is up.
    pub is_connected: bool,
    /// Traffic actually reaches the internet over it.
    pub is_internet_reachable: bool,
}

impl ConnectivityEvent {
    /// An event with both flags set.
    pub fn online() -> Self {
        ConnectivityEvent {
            is_connected: true,
            is_internet_reachable: true,
        }
    }

    /// An event with both flags cleared.
    pub fn offline() -> Self {
        ConnectivityEvent::default()
    }

    /// True when sync should be attempted.
    pub fn is_online(&self) -> bool {
        self.is_connected && self.is_internet_reachable
    }
}

/// Fans connectivity events out to subscribers.
///
/// The platform integration calls [`report`](Self::report); the
/// composition root subscribes the sync trigger.
pub struct ConnectivityMonitor {
    tx: watch::Sender<ConnectivityEvent>,
}

impl ConnectivityMonitor {
    /// Creates a monitor with no connectivity assumed yet.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ConnectivityEvent::offline());
        ConnectivityMonitor { tx }
    }

    /// Publishes a connectivity transition to all subscribers.
    pub fn report(&self, event: ConnectivityEvent) {
        tracing::debug!(?event, "connectivity changed");
        let _ = self.tx.send(event);
    }

    /// Subscribes an async callback invoked for each online event.
    ///
    /// The returned handle owns the listener task; dropping it
    /// unsubscribes.
    pub fn subscribe<F, Fut>(&self, mut on_online: F) -> Subscription
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send,
    {
        let mut rx = self.tx.subscribe();
        let handle = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let event = *rx.borrow_and_update();
                if event.is_online() {
                    on_online().await;
                }
            }
        });

        Subscription { handle }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to an active connectivity subscription.
///
/// Dropping it aborts the listener task.
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
