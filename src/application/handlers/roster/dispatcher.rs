//! After-commit side effects of roster commands.
//!
//! Runs only once the session has been persisted. Neither notification nor
//! event-publishing failures reach the caller; they are logged and dropped.

use std::sync::Arc;

use crate::domain::foundation::SerializableDomainEvent;
use crate::domain::roster::{RosterEvent, RosterNotification};
use crate::ports::{EventPublisher, Notifier};

pub struct RosterDispatcher {
    notifier: Arc<dyn Notifier>,
    event_publisher: Arc<dyn EventPublisher>,
    notifications_enabled: bool,
}

impl RosterDispatcher {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        event_publisher: Arc<dyn EventPublisher>,
        notifications_enabled: bool,
    ) -> Self {
        Self {
            notifier,
            event_publisher,
            notifications_enabled,
        }
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Publishes `events`, then sends `notifications` if enabled.
    pub async fn dispatch(
        &self,
        events: Vec<RosterEvent>,
        notifications: Vec<RosterNotification>,
        correlation_id: &str,
    ) {
        self.publish(events, correlation_id).await;
        self.notify(notifications).await;
    }

    async fn publish(&self, events: Vec<RosterEvent>, correlation_id: &str) {
        if events.is_empty() {
            return;
        }

        let mut envelopes = Vec::with_capacity(events.len());
        for event in &events {
            match event.to_envelope() {
                Ok(envelope) => envelopes.push(envelope.with_correlation_id(correlation_id)),
                Err(e) => tracing::warn!(
                    event_type = event.change.event_type(),
                    error = %e,
                    "Failed to serialize roster event"
                ),
            }
        }

        if let Err(e) = self.event_publisher.publish_all(envelopes).await {
            tracing::warn!(
                correlation_id,
                error = %e,
                "Failed to publish roster events"
            );
        }
    }

    async fn notify(&self, notifications: Vec<RosterNotification>) {
        if !self.notifications_enabled {
            return;
        }

        for notification in notifications {
            let recipient = notification.recipient.as_ref();
            if let Err(e) = self.notifier.notify(&notification.message, recipient).await {
                tracing::warn!(
                    recipient = recipient.map(|r| r.email.as_str()).unwrap_or("broadcast"),
                    error = %e,
                    "Failed to send roster notification"
                );
            }
        }
    }
}
