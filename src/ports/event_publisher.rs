//! EventPublisher port - Interface for publishing roster change events.
//!
//! The domain publishes events without knowing the transport (in-memory
//! bus, message broker, realtime push).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (handlers may receive duplicates)
/// - Events of one `publish_all` call are delivered in order
///
/// # Example
///
/// ```ignore
/// let envelope = RosterEvent::class_canceled(&session).to_envelope()?;
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    ///
    /// Adapters without atomic delivery publish sequentially, best-effort.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
