//! CreateClassSessionHandler - Command handler for scheduling classes.

use std::sync::Arc;

use crate::domain::foundation::{ClassSessionId, CommandMetadata, Timestamp};
use crate::domain::roster::{ClassSession, RosterError, RosterEvent};
use crate::ports::ClassSessionRepository;

use super::RosterDispatcher;

/// Command to schedule a new class.
#[derive(Debug, Clone)]
pub struct CreateClassSessionCommand {
    pub title: String,
    pub capacity: u32,
    pub starts_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct CreateClassSessionResult {
    pub session: ClassSession,
}

pub struct CreateClassSessionHandler {
    repository: Arc<dyn ClassSessionRepository>,
    dispatcher: Arc<RosterDispatcher>,
}

impl CreateClassSessionHandler {
    pub fn new(
        repository: Arc<dyn ClassSessionRepository>,
        dispatcher: Arc<RosterDispatcher>,
    ) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateClassSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateClassSessionResult, RosterError> {
        // 1. Build the aggregate (validates title and capacity)
        let session =
            ClassSession::schedule(ClassSessionId::new(), cmd.title, cmd.capacity, cmd.starts_at)?;

        // 2. Persist
        self.repository.create(&session).await?;

        tracing::info!(
            class_session_id = %session.id(),
            capacity = session.capacity(),
            "Class session created"
        );

        // 3. Announce
        self.dispatcher
            .dispatch(
                vec![RosterEvent::class_created(&session)],
                Vec::new(),
                &metadata.correlation_id(),
            )
            .await;

        Ok(CreateClassSessionResult { session })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{Harness, MockClassSessionRepository};
    use super::*;
    use crate::domain::roster::ClassStatus;

    fn handler(h: &Harness) -> CreateClassSessionHandler {
        CreateClassSessionHandler::new(h.repository.clone(), h.dispatcher.clone())
    }

    #[tokio::test]
    async fn creates_empty_scheduled_session() {
        let h = Harness::new(MockClassSessionRepository::new());

        let result = handler(&h)
            .handle(
                CreateClassSessionCommand {
                    title: "Morning Spin".to_string(),
                    capacity: 12,
                    starts_at: None,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        let stored = h.repository.stored(&result.session.id()).unwrap();
        assert_eq!(stored.status(), ClassStatus::Scheduled);
        assert_eq!(stored.capacity(), 12);
        assert!(h.bus.has_event("roster.class_created.v1"));
        assert_eq!(h.notifier.count(), 0);
    }

    #[tokio::test]
    async fn rejects_zero_capacity() {
        let h = Harness::new(MockClassSessionRepository::new());

        let result = handler(&h)
            .handle(
                CreateClassSessionCommand {
                    title: "Yoga".to_string(),
                    capacity: 0,
                    starts_at: None,
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(result, Err(RosterError::ValidationFailed { .. })));
        assert_eq!(h.bus.event_count(), 0);
    }
}
