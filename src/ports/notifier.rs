//! Notifier port - the notification collaborator.
//!
//! The roster only decides when a notification is due and who receives it.
//! Delivery (email, push, in-app) belongs to the adapter.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::roster::Recipient;

/// Port for delivering roster notifications.
///
/// Callers treat this as fire-and-forget: failures are logged and never
/// undo the roster change that triggered the notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message`; a `None` recipient means broadcast.
    async fn notify(&self, message: &str, recipient: Option<&Recipient>)
        -> Result<(), DomainError>;
}
