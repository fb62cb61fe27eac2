//! SetCapacityHandler - Administrative capacity change.
//!
//! Raising capacity promotes waitlisted members into the new seats.
//! Lowering it never evicts anyone.

use std::sync::Arc;

use crate::domain::foundation::{ClassSessionId, CommandMetadata};
use crate::domain::roster::{
    CapacityChange, ClassSession, RosterError, RosterEvent, RosterNotification,
};
use crate::ports::ClassSessionRepository;

use super::{load_session, RosterDispatcher, SessionLocks};

#[derive(Debug, Clone)]
pub struct SetCapacityCommand {
    pub class_session_id: ClassSessionId,
    pub capacity: u32,
}

#[derive(Debug, Clone)]
pub struct SetCapacityResult {
    pub session: ClassSession,
    pub change: CapacityChange,
}

pub struct SetCapacityHandler {
    repository: Arc<dyn ClassSessionRepository>,
    locks: Arc<SessionLocks>,
    dispatcher: Arc<RosterDispatcher>,
}

impl SetCapacityHandler {
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
        cmd: SetCapacityCommand,
        metadata: CommandMetadata,
    ) -> Result<SetCapacityResult, RosterError> {
        let guard = self.locks.acquire(cmd.class_session_id).await;

        let mut session = load_session(self.repository.as_ref(), cmd.class_session_id).await?;
        let expected_version = session.version();

        let change = session.set_capacity(cmd.capacity)?;
        if change.is_noop() {
            return Ok(SetCapacityResult { session, change });
        }

        self.repository.update(&session, expected_version).await?;
        drop(guard);

        if session.enrolled().len() > session.capacity() as usize {
            tracing::warn!(
                class_session_id = %session.id(),
                enrolled = session.enrolled().len(),
                capacity = session.capacity(),
                "Capacity lowered below enrollment; nobody was removed"
            );
        }
        tracing::info!(
            class_session_id = %session.id(),
            previous = change.previous,
            current = change.current,
            promoted = change.promoted.len(),
            "Capacity changed"
        );

        self.dispatcher
            .dispatch(
                RosterEvent::from_capacity_change(&session, &change),
                RosterNotification::for_capacity_change(&session, &change),
                &metadata.correlation_id(),
            )
            .await;

        Ok(SetCapacityResult { session, change })
    }
}
