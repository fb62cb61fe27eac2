//! Class status projection and state machine.
//!
//! `Scheduled` and `Full` follow the enrolled count across the capacity
//! threshold. `Canceled` is set administratively and is terminal.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display status of a class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    /// Seats are open.
    Scheduled,

    /// Every seat is taken; new bookings go to the waitlist.
    Full,

    /// Explicitly canceled by an administrator.
    Canceled,
}

impl ClassStatus {
    /// Derives the status from the roster counts.
    ///
    /// Pure function of `(enrolled_count, capacity, explicitly_canceled)`.
    pub fn project(enrolled_count: usize, capacity: u32, explicitly_canceled: bool) -> Self {
        if explicitly_canceled {
            ClassStatus::Canceled
        } else if enrolled_count >= capacity as usize {
            ClassStatus::Full
        } else {
            ClassStatus::Scheduled
        }
    }

    /// Stable lowercase name, used for storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Scheduled => "scheduled",
            ClassStatus::Full => "full",
            ClassStatus::Canceled => "canceled",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scheduled" => Some(ClassStatus::Scheduled),
            "full" => Some(ClassStatus::Full),
            "canceled" | "cancelled" => Some(ClassStatus::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for ClassStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ClassStatus::*;
        matches!(
            (self, target),
            (Scheduled, Full) | (Full, Scheduled) | (Scheduled, Canceled) | (Full, Canceled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ClassStatus::*;
        match self {
            Scheduled => vec![Full, Canceled],
            Full => vec![Scheduled, Canceled],
            Canceled => vec![],
        }
    }
}
