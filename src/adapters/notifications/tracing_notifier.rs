//! Notifier that emits each notification as a structured log line.
//!
//! Stands in for a real delivery channel; log shippers can route the
//! `notification` target wherever messages should go.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::roster::Recipient;
use crate::ports::Notifier;

#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(
        &self,
        message: &str,
        recipient: Option<&Recipient>,
    ) -> Result<(), DomainError> {
        match recipient {
            Some(recipient) => tracing::info!(
                target: "notification",
                member_id = %recipient.member_id,
                email = %recipient.email,
                body = message,
                "Targeted notification"
            ),
            None => tracing::info!(target: "notification", body = message, "Broadcast notification"),
        }
        Ok(())
    }
}
