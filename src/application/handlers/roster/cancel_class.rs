//! CancelClassHandler - Administrative cancellation of a class.

use std::sync::Arc;

use crate::domain::foundation::{ClassSessionId, CommandMetadata};
use crate::domain::roster::{ClassSession, RosterError, RosterEvent, RosterNotification};
use crate::ports::ClassSessionRepository;

use super::{load_session, RosterDispatcher, SessionLocks};

#[derive(Debug, Clone)]
pub struct CancelClassCommand {
    pub class_session_id: ClassSessionId,
}

#[derive(Debug, Clone)]
pub struct CancelClassResult {
    pub session: ClassSession,
}

pub struct CancelClassHandler {
    repository: Arc<dyn ClassSessionRepository>,
    locks: Arc<SessionLocks>,
    dispatcher: Arc<RosterDispatcher>,
}

impl CancelClassHandler {
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
        cmd: CancelClassCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelClassResult, RosterError> {
        let guard = self.locks.acquire(cmd.class_session_id).await;

        let mut session = load_session(self.repository.as_ref(), cmd.class_session_id).await?;
        let expected_version = session.version();

        session.cancel_class()?;

        self.repository.update(&session, expected_version).await?;
        drop(guard);

        tracing::info!(
            class_session_id = %session.id(),
            enrolled = session.enrolled().len(),
            waitlisted = session.waitlist().len(),
            "Class canceled"
        );

        self.dispatcher
            .dispatch(
                vec![RosterEvent::class_canceled(&session)],
                vec![RosterNotification::class_canceled(&session)],
                &metadata.correlation_id(),
            )
            .await;

        Ok(CancelClassResult { session })
    }
}
