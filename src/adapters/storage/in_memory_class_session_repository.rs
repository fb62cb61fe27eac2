//! In-Memory Class Session Repository
//!
//! Keeps class sessions in a process-local map. Used by tests and by
//! deployments that run without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ClassSessionId, DomainError, ErrorCode};
use crate::domain::roster::ClassSession;
use crate::ports::ClassSessionRepository;

/// In-memory storage for class sessions
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassSessionRepository {
    sessions: Arc<RwLock<HashMap<ClassSessionId, ClassSession>>>,
}

impl InMemoryClassSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

fn not_found(id: &ClassSessionId) -> DomainError {
    DomainError::new(
        ErrorCode::ClassSessionNotFound,
        format!("Class session not found: {}", id),
    )
}

#[async_trait]
impl ClassSessionRepository for InMemoryClassSessionRepository {
    async fn create(&self, session: &ClassSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Class session already exists: {}", session.id()),
            ));
        }
        sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        session: &ClassSession,
        expected_version: u64,
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(&session.id())
            .ok_or_else(|| not_found(&session.id()))?;

        if stored.version() != expected_version {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Class session {} is at version {}, expected {}",
                    session.id(),
                    stored.version(),
                    expected_version
                ),
            ));
        }

        *stored = session.clone();
        Ok(())
    }

    async fn delete(&self, id: &ClassSessionId) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> Result<Vec<ClassSession>, DomainError> {
        let mut sessions: Vec<ClassSession> =
            self.sessions.read().await.values().cloned().collect();
        // Scheduled start first (unscheduled last), then creation order.
        sessions.sort_by(|a, b| {
            let by_start = match (a.starts_at(), b.starts_at()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            by_start.then_with(|| a.created_at().cmp(&b.created_at()))
        });
        Ok(sessions)
    }
}
