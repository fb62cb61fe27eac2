//! Roster command and query handlers.
//!
//! Mutating handlers share one `SessionLocks` (per-session serialization)
//! and one `RosterDispatcher` (after-commit notifications and events).

mod book_member;
mod cancel_booking;
mod cancel_class;
mod create_class_session;
mod delete_class_session;
mod dispatcher;
mod get_roster;
mod list_class_sessions;
mod session_locks;
mod set_capacity;

#[cfg(test)]
mod test_support;

pub use book_member::{BookMemberCommand, BookMemberHandler, BookMemberResult};
pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler, CancelBookingResult};
pub use cancel_class::{CancelClassCommand, CancelClassHandler, CancelClassResult};
pub use create_class_session::{
    CreateClassSessionCommand, CreateClassSessionHandler, CreateClassSessionResult,
};
pub use delete_class_session::{DeleteClassSessionCommand, DeleteClassSessionHandler};
pub use dispatcher::RosterDispatcher;
pub use get_roster::{GetRosterHandler, GetRosterQuery};
pub use list_class_sessions::{ListClassSessionsHandler, ListClassSessionsQuery};
pub use session_locks::{SessionGuard, SessionLocks};
pub use set_capacity::{SetCapacityCommand, SetCapacityHandler, SetCapacityResult};

use crate::domain::foundation::ClassSessionId;
use crate::domain::roster::{ClassSession, RosterError};
use crate::ports::ClassSessionRepository;

/// Loads a session or fails with `NotFound`.
async fn load_session(
    repository: &dyn ClassSessionRepository,
    id: ClassSessionId,
) -> Result<ClassSession, RosterError> {
    repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| RosterError::not_found(id))
}
