//! BookMemberHandler - Command handler for booking a member into a class.

use std::sync::Arc;

use crate::domain::foundation::{ClassSessionId, CommandMetadata};
use crate::domain::roster::{
    BookingOutcome, ClassSession, MemberRef, RosterError, RosterEvent, RosterNotification,
};
use crate::ports::ClassSessionRepository;

use super::{load_session, RosterDispatcher, SessionLocks};

/// Command to book a member.
#[derive(Debug, Clone)]
pub struct BookMemberCommand {
    pub class_session_id: ClassSessionId,
    pub member: MemberRef,
}

#[derive(Debug, Clone)]
pub struct BookMemberResult {
    pub session: ClassSession,
    pub outcome: BookingOutcome,
}

pub struct BookMemberHandler {
    repository: Arc<dyn ClassSessionRepository>,
    locks: Arc<SessionLocks>,
    dispatcher: Arc<RosterDispatcher>,
}

impl BookMemberHandler {
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
        cmd: BookMemberCommand,
        metadata: CommandMetadata,
    ) -> Result<BookMemberResult, RosterError> {
        let guard = self.locks.acquire(cmd.class_session_id).await;

        // 1. Load session
        let mut session = load_session(self.repository.as_ref(), cmd.class_session_id).await?;
        let expected_version = session.version();

        // 2. Place the member
        let outcome = session.book(cmd.member)?;
        if !outcome.newly_placed {
            return Ok(BookMemberResult { session, outcome });
        }

        // 3. Persist
        self.repository.update(&session, expected_version).await?;
        // Committed; side effects run without holding the session.
        drop(guard);

        tracing::info!(
            class_session_id = %session.id(),
            member_id = %outcome.member.id,
            placement = ?outcome.placement,
            status = %session.status(),
            "Member booked"
        );

        // 4. Side effects
        self.dispatcher
            .dispatch(
                RosterEvent::from_booking(&session, &outcome),
                RosterNotification::for_booking(&session, &outcome),
                &metadata.correlation_id(),
            )
            .await;

        Ok(BookMemberResult { session, outcome })
    }
}
