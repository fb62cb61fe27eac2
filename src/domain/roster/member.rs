//! Member reference carried on a class roster.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, ValidationError};

/// A member as the roster sees them: identity plus a notification address.
///
/// The roster trusts the caller that the member exists; it performs no
/// lookup or authorization of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub id: MemberId,
    pub name: String,
    pub email: String,
}

impl MemberRef {
    /// Creates a member reference, validating the notification address.
    pub fn new(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }

        Ok(Self {
            id,
            name: name.into().trim().to_string(),
            email,
        })
    }

    /// Name to show in messages, falling back to the member id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_id() -> MemberId {
        MemberId::new("m-1").unwrap()
    }

    #[test]
    fn new_trims_name_and_email() {
        let member = MemberRef::new(member_id(), "  Dana ", " dana@gym.test ").unwrap();
        assert_eq!(member.name, "Dana");
        assert_eq!(member.email, "dana@gym.test");
    }

    #[test]
    fn new_rejects_missing_email() {
        let err = MemberRef::new(member_id(), "Dana", "").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("email"));
    }

    #[test]
    fn new_rejects_malformed_email() {
        let err = MemberRef::new(member_id(), "Dana", "dana.gym.test").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let member = MemberRef::new(member_id(), "", "x@gym.test").unwrap();
        assert_eq!(member.display_name(), "m-1");
    }
}
