//! Outcomes of roster commands.

use serde::{Deserialize, Serialize};

use super::MemberRef;

/// Where a member sits on a class roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Placement {
    /// Holds a seat.
    Enrolled,

    /// Waiting for a seat; `position` is 1-based and derived from list order.
    Waitlisted { position: usize },
}

impl Placement {
    pub fn is_enrolled(&self) -> bool {
        matches!(self, Placement::Enrolled)
    }
}

/// Which roster list a member was removed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterList {
    Enrolled,
    Waitlist,
}

/// Result of `ClassSession::book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    pub member: MemberRef,
    pub placement: Placement,
    /// False when the member was already on the roster and nothing changed.
    pub newly_placed: bool,
}

/// Result of `ClassSession::cancel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOutcome {
    pub removed: MemberRef,
    pub removed_from: RosterList,
    /// Waitlisted members moved into the freed seats, in promotion order.
    pub promoted: Vec<MemberRef>,
}

/// Result of `ClassSession::set_capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityChange {
    pub previous: u32,
    pub current: u32,
    pub promoted: Vec<MemberRef>,
}

impl CapacityChange {
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}
