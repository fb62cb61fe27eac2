//! Class session repository port.
//!
//! Defines the contract for persisting and retrieving ClassSession
//! aggregates, roster included.
//!
//! # Design
//!
//! - **Whole-aggregate writes**: enrolled list and waitlist are stored with
//!   the session and replaced together
//! - **Optimistic concurrency**: `update` is a compare-and-swap on `version`

use crate::domain::foundation::{ClassSessionId, DomainError};
use crate::domain::roster::ClassSession;
use async_trait::async_trait;

/// Repository port for ClassSession persistence.
#[async_trait]
pub trait ClassSessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure or duplicate id
    async fn create(&self, session: &ClassSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError>;

    /// Replace a stored session if its version still equals `expected_version`.
    ///
    /// # Errors
    ///
    /// - `ClassSessionNotFound` if the session doesn't exist
    /// - `ConcurrentModification` if the stored version moved on
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &ClassSession, expected_version: u64)
        -> Result<(), DomainError>;

    /// Delete a session and its roster.
    ///
    /// # Errors
    ///
    /// - `ClassSessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &ClassSessionId) -> Result<(), DomainError>;

    /// All sessions, ordered by start time (unscheduled last), then creation.
    async fn list(&self) -> Result<Vec<ClassSession>, DomainError>;
}
