//! CancelBookingHandler - Command handler for removing a member from a class.
//!
//! Leaving an enrolled seat promotes the head of the waitlist; each promoted
//! member gets a targeted notification.

use std::sync::Arc;

use crate::domain::foundation::{ClassSessionId, CommandMetadata, MemberId};
use crate::domain::roster::{
    CancelOutcome, ClassSession, RosterError, RosterEvent, RosterNotification,
};
use crate::ports::ClassSessionRepository;

use super::{load_session, RosterDispatcher, SessionLocks};

#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub class_session_id: ClassSessionId,
    pub member_id: MemberId,
}

#[derive(Debug, Clone)]
pub struct CancelBookingResult {
    pub session: ClassSession,
    pub outcome: CancelOutcome,
}

pub struct CancelBookingHandler {
    repository: Arc<dyn ClassSessionRepository>,
    locks: Arc<SessionLocks>,
    dispatcher: Arc<RosterDispatcher>,
}

impl CancelBookingHandler {
    pub fn new(
        repository: Arc<dyn ClassSessionRepository>,
        locks: Arc<SessionLocks>,
        dispatcher: Arc<RosterDispatcher>,
    ) -> Self {
        Self {
            repository,
            locks,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelBookingResult, RosterError> {
        let guard = self.locks.acquire(cmd.class_session_id).await;

        let mut session = load_session(self.repository.as_ref(), cmd.class_session_id).await?;
        let expected_version = session.version();

        let outcome = session.cancel(&cmd.member_id)?;

        self.repository.update(&session, expected_version).await?;
        drop(guard);

        tracing::info!(
            class_session_id = %session.id(),
            member_id = %cmd.member_id,
            removed_from = ?outcome.removed_from,
            promoted = outcome.promoted.len(),
            status = %session.status(),
            "Booking canceled"
        );

        self.dispatcher
            .dispatch(
                RosterEvent::from_cancellation(&session, &outcome),
                RosterNotification::for_cancellation(&session, &outcome),
                &metadata.correlation_id(),
            )
            .await;

        Ok(CancelBookingResult { session, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{class_with, member, Harness, MockClassSessionRepository};
    use super::*;
    use crate::domain::roster::{ClassStatus, RosterList};

    fn handler(h: &Harness) -> CancelBookingHandler {
        CancelBookingHandler::new(h.repository.clone(), h.locks.clone(), h.dispatcher.clone())
    }

    fn cmd(class: &ClassSession, n: u32) -> CancelBookingCommand {
        CancelBookingCommand {
            class_session_id: class.id(),
            member_id: member(n).id,
        }
    }

    #[tokio::test]
    async fn enrolled_cancel_promotes_and_notifies_promoted_member() {
        let class = class_with(2, 4);
        let h = Harness::new(MockClassSessionRepository::with_session(class.clone()));

        let result = handler(&h)
            .handle(cmd(&class, 1), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.outcome.removed_from, RosterList::Enrolled);
        assert_eq!(result.outcome.promoted, vec![member(3)]);

        let stored = h.repository.stored(&class.id()).unwrap();
        assert_eq!(stored.enrolled(), &[member(2), member(3)]);
        assert_eq!(stored.waitlist(), &[member(4)]);

        let targeted = h.notifier.sent_to("m3@gym.test");
        assert_eq!(targeted.len(), 1);
        assert!(targeted[0].message.contains("moved from waitlist to enrolled"));
        assert!(h.bus.has_event("roster.member_promoted.v1"));
    }

    #[tokio::test]
    async fn waitlist_cancel_does_not_promote() {
        let class = class_with(1, 3);
        let h = Harness::new(MockClassSessionRepository::with_session(class.clone()));

        let result = handler(&h)
            .handle(cmd(&class, 2), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.outcome.removed_from, RosterList::Waitlist);
        assert!(result.outcome.promoted.is_empty());
        assert_eq!(result.session.waitlist_position(&member(3).id), Some(1));
        assert!(h.bus.has_event("roster.waitlist_left.v1"));
        assert!(h.notifier.sent_to("m3@gym.test").is_empty());
    }

    #[tokio::test]
    async fn last_enrolled_leaving_reopens_class() {
        let class = class_with(1, 1);
        let h = Harness::new(MockClassSessionRepository::with_session(class.clone()));

        let result = handler(&h)
            .handle(cmd(&class, 1), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.session.status(), ClassStatus::Scheduled);
    }

    #[tokio::test]
    async fn member_not_on_roster_is_an_error() {
        let class = class_with(2, 1);
        let h = Harness::new(MockClassSessionRepository::with_session(class.clone()));

        let result = handler(&h)
            .handle(cmd(&class, 9), CommandMetadata::test_fixture())
            .await;

        assert!(matches!(result, Err(RosterError::MemberNotOnRoster { .. })));
        assert_eq!(h.repository.update_count(), 0);
        assert_eq!(h.notifier.count(), 0);
    }
}
