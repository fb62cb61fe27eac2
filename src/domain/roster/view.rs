//! Read-only roster projections.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassSessionId, MemberId, Timestamp};

use super::{ClassSession, ClassStatus};

/// Full roster of one class with derived waitlist positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterView {
    pub id: ClassSessionId,
    pub title: String,
    pub starts_at: Option<Timestamp>,
    pub capacity: u32,
    pub status: ClassStatus,
    pub available_seats: u32,
    pub enrolled: Vec<RosterEntry>,
    pub waitlist: Vec<WaitlistEntry>,
    pub version: u64,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub member_id: MemberId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub member_id: MemberId,
    pub name: String,
    /// 1-based.
    pub position: usize,
}

/// One line of a class listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub id: ClassSessionId,
    pub title: String,
    pub starts_at: Option<Timestamp>,
    pub capacity: u32,
    pub enrolled_count: usize,
    pub waitlist_count: usize,
    pub status: ClassStatus,
}

impl From<&ClassSession> for RosterView {
    fn from(session: &ClassSession) -> Self {
        Self {
            id: session.id(),
            title: session.title().to_string(),
            starts_at: session.starts_at(),
            capacity: session.capacity(),
            status: session.status(),
            available_seats: session.available_seats(),
            enrolled: session
                .enrolled()
                .iter()
                .map(|m| RosterEntry {
                    member_id: m.id.clone(),
                    name: m.name.clone(),
                })
                .collect(),
            waitlist: session
                .waitlist()
                .iter()
                .enumerate()
                .map(|(index, m)| WaitlistEntry {
                    member_id: m.id.clone(),
                    name: m.name.clone(),
                    position: index + 1,
                })
                .collect(),
            version: session.version(),
            updated_at: session.updated_at(),
        }
    }
}

impl From<&ClassSession> for RosterSummary {
    fn from(session: &ClassSession) -> Self {
        Self {
            id: session.id(),
            title: session.title().to_string(),
            starts_at: session.starts_at(),
            capacity: session.capacity(),
            enrolled_count: session.enrolled().len(),
            waitlist_count: session.waitlist().len(),
            status: session.status(),
        }
    }
}
