//! Shared fixtures for roster handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::notifications::RecordingNotifier;
use crate::domain::foundation::{ClassSessionId, DomainError, ErrorCode, MemberId};
use crate::domain::roster::{ClassSession, MemberRef};
use crate::ports::ClassSessionRepository;

use super::{RosterDispatcher, SessionLocks};

pub struct MockClassSessionRepository {
    sessions: Mutex<HashMap<ClassSessionId, ClassSession>>,
    fail_update: bool,
    updates: Mutex<u32>,
}

impl MockClassSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            fail_update: false,
            updates: Mutex::new(0),
        }
    }

    pub fn with_session(session: ClassSession) -> Self {
        let repo = Self::new();
        repo.sessions.lock().unwrap().insert(session.id(), session);
        repo
    }

    pub fn failing_updates(session: ClassSession) -> Self {
        let mut repo = Self::with_session(session);
        repo.fail_update = true;
        repo
    }

    pub fn stored(&self, id: &ClassSessionId) -> Option<ClassSession> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    pub fn update_count(&self) -> u32 {
        *self.updates.lock().unwrap()
    }
}

#[async_trait]
impl ClassSessionRepository for MockClassSessionRepository {
    async fn create(&self, session: &ClassSession) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError> {
        Ok(self.stored(id))
    }

    async fn update(
        &self,
        session: &ClassSession,
        expected_version: u64,
    ) -> Result<(), DomainError> {
        if self.fail_update {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated update failure",
            ));
        }
        let mut sessions = self.sessions.lock().unwrap();
        let stored = sessions.get_mut(&session.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::ClassSessionNotFound, "missing")
        })?;
        if stored.version() != expected_version {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "stale version",
            ));
        }
        *stored = session.clone();
        *self.updates.lock().unwrap() += 1;
        Ok(())
    }

    async fn delete(&self, id: &ClassSessionId) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::new(ErrorCode::ClassSessionNotFound, "missing"))
    }

    async fn list(&self) -> Result<Vec<ClassSession>, DomainError> {
        Ok(self.sessions.lock().unwrap().values().cloned().collect())
    }
}

/// Ports and shared collaborators wired the way the HTTP layer wires them.
pub struct Harness {
    pub repository: Arc<MockClassSessionRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub bus: Arc<InMemoryEventBus>,
    pub locks: Arc<SessionLocks>,
    pub dispatcher: Arc<RosterDispatcher>,
}

impl Harness {
    pub fn new(repository: MockClassSessionRepository) -> Self {
        Self::with_notifier(repository, RecordingNotifier::new())
    }

    pub fn with_notifier(repository: MockClassSessionRepository, notifier: RecordingNotifier) -> Self {
        let repository = Arc::new(repository);
        let notifier = Arc::new(notifier);
        let bus = Arc::new(InMemoryEventBus::new());
        let dispatcher = Arc::new(RosterDispatcher::new(notifier.clone(), bus.clone(), true));
        Self {
            repository,
            notifier,
            bus,
            locks: Arc::new(SessionLocks::new()),
            dispatcher,
        }
    }
}

pub fn member(n: u32) -> MemberRef {
    MemberRef::new(
        MemberId::new(format!("m{}", n)).unwrap(),
        format!("Member {}", n),
        format!("m{}@gym.test", n),
    )
    .unwrap()
}

/// A class of `capacity` with members `1..=booked` booked in order.
pub fn class_with(capacity: u32, booked: u32) -> ClassSession {
    let mut class = ClassSession::schedule(ClassSessionId::new(), "Spin", capacity, None).unwrap();
    for n in 1..=booked {
        class.book(member(n)).unwrap();
    }
    class
}
