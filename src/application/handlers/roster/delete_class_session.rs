//! DeleteClassSessionHandler - Administrative removal of a class and its roster.

use std::sync::Arc;

use crate::domain::foundation::{ClassSessionId, ErrorCode};
use crate::domain::roster::RosterError;
use crate::ports::ClassSessionRepository;

use super::SessionLocks;

#[derive(Debug, Clone)]
pub struct DeleteClassSessionCommand {
    pub class_session_id: ClassSessionId,
}

pub struct DeleteClassSessionHandler {
    repository: Arc<dyn ClassSessionRepository>,
    locks: Arc<SessionLocks>,
}

impl DeleteClassSessionHandler {
    pub fn new(repository: Arc<dyn ClassSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: DeleteClassSessionCommand) -> Result<(), RosterError> {
        let id = cmd.class_session_id;
        let _guard = self.locks.acquire(id).await;
        self.repository.delete(&id).await.map_err(|e| match e.code {
            ErrorCode::ClassSessionNotFound => RosterError::not_found(id),
            _ => RosterError::from(e),
        })?;

        tracing::info!(class_session_id = %id, "Class session deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{class_with, Harness, MockClassSessionRepository};
    use super::*;

    #[tokio::test]
    async fn deletes_existing_session() {
        let class = class_with(2, 1);
        let h = Harness::new(MockClassSessionRepository::with_session(class.clone()));
        let handler = DeleteClassSessionHandler::new(h.repository.clone(), h.locks.clone());

        handler
            .handle(DeleteClassSessionCommand {
                class_session_id: class.id(),
            })
            .await
            .unwrap();

        assert!(h.repository.stored(&class.id()).is_none());
        assert_eq!(h.locks.tracked(), 0);
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let h = Harness::new(MockClassSessionRepository::new());
        let handler = DeleteClassSessionHandler::new(h.repository.clone(), h.locks.clone());
        let missing = ClassSessionId::new();

        let result = handler
            .handle(DeleteClassSessionCommand {
                class_session_id: missing,
            })
            .await;

        assert_eq!(result, Err(RosterError::NotFound(missing)));
        assert_eq!(h.locks.tracked(), 0);
    }
}
