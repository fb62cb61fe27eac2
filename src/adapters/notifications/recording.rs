//! Notifier that records every call.
//!
//! Useful in tests and local runs to see exactly what the roster decided to
//! send. Can be switched into a failing mode to exercise error handling.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::roster::{Recipient, RosterNotification};
use crate::ports::Notifier;

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RwLock<Vec<RosterNotification>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every call fails (after recording the attempt).
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.failing.store(true, Ordering::SeqCst);
        notifier
    }

    /// Notifications received so far, in call order.
    pub fn sent(&self) -> Vec<RosterNotification> {
        self.sent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn broadcasts(&self) -> Vec<RosterNotification> {
        self.sent().into_iter().filter(|n| n.is_broadcast()).collect()
    }

    /// Targeted notifications addressed to `email`.
    pub fn sent_to(&self, email: &str) -> Vec<RosterNotification> {
        self.sent()
            .into_iter()
            .filter(|n| n.recipient.as_ref().is_some_and(|r| r.email == email))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sent.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        message: &str,
        recipient: Option<&Recipient>,
    ) -> Result<(), DomainError> {
        self.sent
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RosterNotification {
                message: message.to_string(),
                recipient: recipient.cloned(),
            });

        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                "Notification channel unavailable",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MemberId;

    fn recipient() -> Recipient {
        Recipient {
            member_id: MemberId::new("m-2").unwrap(),
            email: "m2@gym.test".to_string(),
        }
    }

    #[tokio::test]
    async fn records_broadcast_and_targeted_separately() {
        let notifier = RecordingNotifier::new();

        notifier.notify("roster updated", None).await.unwrap();
        notifier.notify("you're in", Some(&recipient())).await.unwrap();

        assert_eq!(notifier.count(), 2);
        assert_eq!(notifier.broadcasts().len(), 1);
        assert_eq!(notifier.sent_to("m2@gym.test")[0].message, "you're in");
    }

    #[tokio::test]
    async fn failing_mode_records_then_errors() {
        let notifier = RecordingNotifier::failing();

        let result = notifier.notify("roster updated", None).await;

        assert!(result.is_err());
        assert_eq!(notifier.count(), 1);
    }
}
