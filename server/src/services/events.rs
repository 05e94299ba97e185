//! Auth-state-change notifications.
//!
//! DESIGN
//! ======
//! One process-wide `broadcast` channel carries every [`AuthEvent`]. Each
//! subscriber wraps a receiver and filters to its own user id. A slow
//! subscriber that falls behind skips the missed events and keeps going;
//! events are advisory and clients re-read state on the next request anyway.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use travel::AuthEvent;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthEvents {
    tx: broadcast::Sender<AuthEvent>,
}

impl AuthEvents {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. Returns how many subscribers were listening.
    pub fn publish(&self, event: AuthEvent) -> usize {
        tracing::debug!(kind = event.kind.as_str(), user_id = %event.user_id, "auth event");
        self.tx.send(event).unwrap_or(0)
    }

    /// Listen for events concerning `user_id`.
    #[must_use]
    pub fn subscribe(&self, user_id: Uuid) -> UserEvents {
        UserEvents { user_id, rx: self.tx.subscribe() }
    }
}

/// A single user's view of the event channel.
pub struct UserEvents {
    user_id: Uuid,
    rx: broadcast::Receiver<AuthEvent>,
}

impl UserEvents {
    /// Wait for the next event for this user. `None` once the channel closes.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.user_id == self.user_id => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(user_id = %self.user_id, skipped, "auth event subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
