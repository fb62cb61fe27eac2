//! Roster change feed.
//!
//! Every committed roster change is described by one or more `RosterEvent`s,
//! published after the session is persisted. Subscribers use them the way a
//! realtime UI would: to refresh a roster view without polling.
//!
//! Events are named in past tense (`MemberPromoted`, not `PromoteMember`).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassSessionId, DomainEvent, EventId, MemberId, Timestamp};

use super::{BookingOutcome, CancelOutcome, CapacityChange, ClassSession, Placement, RosterList};

/// A single change to one class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEvent {
    pub event_id: EventId,
    pub class_session_id: ClassSessionId,
    /// Session version after the change was committed.
    pub version: u64,
    pub occurred_at: Timestamp,
    pub change: RosterChange,
}

/// What happened to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterChange {
    ClassCreated {
        title: String,
        capacity: u32,
    },
    MemberEnrolled {
        member_id: MemberId,
    },
    MemberWaitlisted {
        member_id: MemberId,
        position: usize,
    },
    /// A waitlisted member took a freed seat.
    MemberPromoted {
        member_id: MemberId,
    },
    EnrollmentCanceled {
        member_id: MemberId,
    },
    WaitlistLeft {
        member_id: MemberId,
    },
    CapacityChanged {
        previous: u32,
        current: u32,
    },
    ClassCanceled,
}

impl RosterChange {
    pub fn event_type(&self) -> &'static str {
        match self {
            RosterChange::ClassCreated { .. } => "roster.class_created.v1",
            RosterChange::MemberEnrolled { .. } => "roster.member_enrolled.v1",
            RosterChange::MemberWaitlisted { .. } => "roster.member_waitlisted.v1",
            RosterChange::MemberPromoted { .. } => "roster.member_promoted.v1",
            RosterChange::EnrollmentCanceled { .. } => "roster.enrollment_canceled.v1",
            RosterChange::WaitlistLeft { .. } => "roster.waitlist_left.v1",
            RosterChange::CapacityChanged { .. } => "roster.capacity_changed.v1",
            RosterChange::ClassCanceled => "roster.class_canceled.v1",
        }
    }
}

impl RosterEvent {
    fn for_session(session: &ClassSession, change: RosterChange) -> Self {
        Self {
            event_id: EventId::new(),
            class_session_id: session.id(),
            version: session.version(),
            occurred_at: session.updated_at(),
            change,
        }
    }

    pub fn class_created(session: &ClassSession) -> Self {
        Self::for_session(
            session,
            RosterChange::ClassCreated {
                title: session.title().to_string(),
                capacity: session.capacity(),
            },
        )
    }

    /// Events for a booking; empty when the booking changed nothing.
    pub fn from_booking(session: &ClassSession, outcome: &BookingOutcome) -> Vec<Self> {
        if !outcome.newly_placed {
            return Vec::new();
        }
        let member_id = outcome.member.id.clone();
        let change = match outcome.placement {
            Placement::Enrolled => RosterChange::MemberEnrolled { member_id },
            Placement::Waitlisted { position } => {
                RosterChange::MemberWaitlisted { member_id, position }
            }
        };
        vec![Self::for_session(session, change)]
    }

    /// Removal first, then one event per promotion in promotion order.
    pub fn from_cancellation(session: &ClassSession, outcome: &CancelOutcome) -> Vec<Self> {
        let member_id = outcome.removed.id.clone();
        let removal = match outcome.removed_from {
            RosterList::Enrolled => RosterChange::EnrollmentCanceled { member_id },
            RosterList::Waitlist => RosterChange::WaitlistLeft { member_id },
        };

        std::iter::once(Self::for_session(session, removal))
            .chain(Self::promotions(session, &outcome.promoted))
            .collect()
    }

    pub fn from_capacity_change(session: &ClassSession, change: &CapacityChange) -> Vec<Self> {
        if change.is_noop() {
            return Vec::new();
        }
        let resized = RosterChange::CapacityChanged {
            previous: change.previous,
            current: change.current,
        };

        std::iter::once(Self::for_session(session, resized))
            .chain(Self::promotions(session, &change.promoted))
            .collect()
    }

    pub fn class_canceled(session: &ClassSession) -> Self {
        Self::for_session(session, RosterChange::ClassCanceled)
    }

    fn promotions<'a>(
        session: &'a ClassSession,
        promoted: &'a [super::MemberRef],
    ) -> impl Iterator<Item = Self> + 'a {
        promoted.iter().map(move |member| {
            Self::for_session(
                session,
                RosterChange::MemberPromoted {
                    member_id: member.id.clone(),
                },
            )
        })
    }
}

impl DomainEvent for RosterEvent {
    fn event_type(&self) -> &'static str {
        self.change.event_type()
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> String {
        self.class_session_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "ClassSession"
    }

    fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}
