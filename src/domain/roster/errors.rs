//! Roster-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | MemberNotOnRoster | 404 |
//! | ClassCanceled | 409 |
//! | InvalidState | 409 |
//! | Conflict | 409 |
//! | ValidationFailed | 400 |
//! | InvariantViolation | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    ClassSessionId, DomainError, ErrorCode, MemberId, ValidationError,
};

/// Errors raised by roster operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Class session does not exist.
    NotFound(ClassSessionId),

    /// Member is neither enrolled nor waitlisted in the class.
    MemberNotOnRoster {
        class_session_id: ClassSessionId,
        member_id: MemberId,
    },

    /// Class was canceled; it accepts no further bookings or capacity edits.
    ClassCanceled(ClassSessionId),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Input validation failed.
    ValidationFailed { field: String, message: String },

    /// A roster invariant does not hold.
    InvariantViolation(String),

    /// The stored roster changed since it was loaded.
    Conflict(String),

    /// Persistence or other infrastructure failure.
    Infrastructure(String),
}

impl RosterError {
    pub fn not_found(id: ClassSessionId) -> Self {
        RosterError::NotFound(id)
    }

    pub fn member_not_on_roster(class_session_id: ClassSessionId, member_id: MemberId) -> Self {
        RosterError::MemberNotOnRoster {
            class_session_id,
            member_id,
        }
    }

    pub fn class_canceled(id: ClassSessionId) -> Self {
        RosterError::ClassCanceled(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        RosterError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RosterError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invariant_violation(message: impl Into<String>) -> Self {
        RosterError::InvariantViolation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        RosterError::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RosterError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RosterError::NotFound(_) => ErrorCode::ClassSessionNotFound,
            RosterError::MemberNotOnRoster { .. } => ErrorCode::MemberNotOnRoster,
            RosterError::ClassCanceled(_) => ErrorCode::ClassCanceled,
            RosterError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            RosterError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RosterError::InvariantViolation(_) => ErrorCode::InvariantViolation,
            RosterError::Conflict(_) => ErrorCode::ConcurrentModification,
            RosterError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            RosterError::NotFound(id) => format!("Class session not found: {}", id),
            RosterError::MemberNotOnRoster {
                class_session_id,
                member_id,
            } => format!(
                "Member {} is not enrolled or waitlisted in class {}",
                member_id, class_session_id
            ),
            RosterError::ClassCanceled(id) => format!("Class {} has been canceled", id),
            RosterError::InvalidState { current, attempted } => {
                format!("Cannot {} a class in {} state", attempted, current)
            }
            RosterError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RosterError::InvariantViolation(msg) => format!("Roster invariant violated: {}", msg),
            RosterError::Conflict(msg) => format!("Concurrent modification: {}", msg),
            RosterError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the caller may retry the operation as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RosterError::Conflict(_) | RosterError::Infrastructure(_)
        )
    }
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RosterError {}

impl From<ValidationError> for RosterError {
    fn from(err: ValidationError) -> Self {
        RosterError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for RosterError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => RosterError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::ConcurrentModification | ErrorCode::ClassSessionNotFound => {
                RosterError::Conflict(err.message)
            }
            ErrorCode::InvariantViolation => RosterError::InvariantViolation(err.message),
            _ => RosterError::Infrastructure(err.to_string()),
        }
    }
}

impl From<RosterError> for DomainError {
    fn from(err: RosterError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_id() -> MemberId {
        MemberId::new("member-7").unwrap()
    }

    #[test]
    fn not_found_maps_to_session_not_found_code() {
        let id = ClassSessionId::new();
        let err = RosterError::not_found(id);
        assert_eq!(err.code(), ErrorCode::ClassSessionNotFound);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn member_not_on_roster_message_names_member_and_class() {
        let class_id = ClassSessionId::new();
        let err = RosterError::member_not_on_roster(class_id, member_id());
        let msg = err.message();
        assert!(msg.contains("member-7"));
        assert!(msg.contains(&class_id.to_string()));
        assert_eq!(err.code(), ErrorCode::MemberNotOnRoster);
    }

    #[test]
    fn conflict_and_infrastructure_are_retryable() {
        assert!(RosterError::conflict("version 3 is stale").is_retryable());
        assert!(RosterError::infrastructure("pool timed out").is_retryable());
        assert!(!RosterError::validation("capacity", "must be positive").is_retryable());
        assert!(!RosterError::class_canceled(ClassSessionId::new()).is_retryable());
    }

    #[test]
    fn display_matches_message() {
        let err = RosterError::invalid_state("canceled", "cancel");
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn converts_from_validation_error_keeping_field() {
        let err: RosterError = ValidationError::empty_field("title").into();
        assert!(matches!(err, RosterError::ValidationFailed { ref field, .. } if field == "title"));
    }

    #[test]
    fn converts_concurrent_modification_to_conflict() {
        let domain_err = DomainError::new(ErrorCode::ConcurrentModification, "stale version");
        let err: RosterError = domain_err.into();
        assert_eq!(err, RosterError::Conflict("stale version".to_string()));
    }

    #[test]
    fn converts_database_error_to_infrastructure() {
        let domain_err = DomainError::new(ErrorCode::DatabaseError, "connection reset");
        let err: RosterError = domain_err.into();
        assert!(matches!(err, RosterError::Infrastructure(_)));
    }

    #[test]
    fn converts_to_domain_error() {
        let err = RosterError::class_canceled(ClassSessionId::new());
        let domain_err: DomainError = err.clone().into();
        assert_eq!(domain_err.code, err.code());
    }
}
