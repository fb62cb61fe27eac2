//! HTTP DTOs (Data Transfer Objects) for class roster endpoints.
//!
//! These types define the JSON request/response structure for the roster API.
//! They serve as the boundary between HTTP and the application layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::roster::{
    ClassSession, ClassStatus, MemberRef, Placement, RosterError, RosterList, RosterSummary,
    RosterView,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to schedule a class.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub title: String,
    pub capacity: i64,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
}

impl CreateClassRequest {
    pub fn starts_at(&self) -> Option<Timestamp> {
        self.starts_at.map(Timestamp::from_datetime)
    }
}

/// Request to book a member into a class.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub member_id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
}

impl BookingRequest {
    pub fn into_member(self) -> Result<MemberRef, RosterError> {
        let id = MemberId::new(self.member_id)?;
        Ok(MemberRef::new(id, self.name, self.email)?)
    }
}

/// Request to change a class capacity.
#[derive(Debug, Clone, Deserialize)]
pub struct CapacityRequest {
    pub capacity: i64,
}

/// Query parameters for listing classes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListClassesQuery {
    #[serde(default)]
    pub status: Option<ClassStatus>,
}

/// JSON numbers arrive signed; seats are a positive `u32` no larger than
/// `ClassSession::MAX_CAPACITY`.
pub fn parse_capacity(capacity: i64) -> Result<u32, RosterError> {
    u32::try_from(capacity)
        .ok()
        .filter(|c| (1..=ClassSession::MAX_CAPACITY).contains(c))
        .ok_or_else(|| {
            RosterError::validation(
                "capacity",
                format!(
                    "Capacity must be between 1 and {} seats",
                    ClassSession::MAX_CAPACITY
                ),
            )
        })
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ClassListResponse {
    pub classes: Vec<RosterSummary>,
}

/// Response for a booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub member_id: MemberId,
    pub placement: Placement,
    /// False when the member already held this placement.
    pub newly_placed: bool,
    pub roster: RosterView,
}

/// Response for a canceled booking.
#[derive(Debug, Clone, Serialize)]
pub struct CancelBookingResponse {
    pub member_id: MemberId,
    pub removed_from: RosterList,
    pub promoted: Vec<MemberId>,
    pub roster: RosterView,
}

/// Response for a capacity change.
#[derive(Debug, Clone, Serialize)]
pub struct CapacityResponse {
    pub previous: u32,
    pub current: u32,
    pub promoted: Vec<MemberId>,
    pub roster: RosterView,
}

/// Error body: `{code, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
