//! Messages the roster hands to the notification collaborator.
//!
//! The roster decides *when* to notify and *whom*; delivery is someone
//! else's concern. A notification without a recipient is a broadcast.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::MemberId;

use super::{BookingOutcome, CancelOutcome, CapacityChange, ClassSession, MemberRef, Placement};

/// Target of a targeted notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub member_id: MemberId,
    pub email: String,
}

impl From<&MemberRef> for Recipient {
    fn from(member: &MemberRef) -> Self {
        Self {
            member_id: member.id.clone(),
            email: member.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterNotification {
    pub message: String,
    pub recipient: Option<Recipient>,
}

impl RosterNotification {
    pub fn broadcast(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recipient: None,
        }
    }

    pub fn targeted(message: impl Into<String>, recipient: Recipient) -> Self {
        Self {
            message: message.into(),
            recipient: Some(recipient),
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.recipient.is_none()
    }

    /// Broadcast for a new booking. Idempotent re-bookings notify nobody.
    pub fn for_booking(session: &ClassSession, outcome: &BookingOutcome) -> Vec<Self> {
        if !outcome.newly_placed {
            return Vec::new();
        }
        let message = match outcome.placement {
            Placement::Enrolled => format!(
                "{} enrolled in {}",
                outcome.member.display_name(),
                session.title()
            ),
            Placement::Waitlisted { position } => format!(
                "{} joined the waitlist for {} at position {}",
                outcome.member.display_name(),
                session.title(),
                position
            ),
        };
        vec![Self::broadcast(message)]
    }

    /// Roster update broadcast plus one targeted message per promotion.
    pub fn for_cancellation(session: &ClassSession, outcome: &CancelOutcome) -> Vec<Self> {
        let update = Self::broadcast(format!(
            "{} left {}; roster updated",
            outcome.removed.display_name(),
            session.title()
        ));
        std::iter::once(update)
            .chain(Self::promotions(session, &outcome.promoted))
            .collect()
    }

    pub fn for_capacity_change(session: &ClassSession, change: &CapacityChange) -> Vec<Self> {
        if change.is_noop() {
            return Vec::new();
        }
        let update = Self::broadcast(format!(
            "Capacity for {} changed from {} to {}",
            session.title(),
            change.previous,
            change.current
        ));
        std::iter::once(update)
            .chain(Self::promotions(session, &change.promoted))
            .collect()
    }

    pub fn class_canceled(session: &ClassSession) -> Self {
        Self::broadcast(format!("{} has been canceled", session.title()))
    }

    fn promotions(session: &ClassSession, promoted: &[MemberRef]) -> Vec<Self> {
        promoted
            .iter()
            .map(|member| {
                Self::targeted(
                    format!(
                        "Good news, {}: you moved from waitlist to enrolled in {}",
                        member.display_name(),
                        session.title()
                    ),
                    Recipient::from(member),
                )
            })
            .collect()
    }
}
