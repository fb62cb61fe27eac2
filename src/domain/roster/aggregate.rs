//! ClassSession aggregate: the enrollment engine.
//!
//! A class session owns its roster: the enrolled list (bounded by capacity)
//! and the waitlist (unbounded, FIFO). Every command re-derives the status
//! and bumps the version exactly once when it changes anything.
//!
//! # Invariants
//!
//! - `book` never enrolls beyond `capacity`
//! - a member id appears at most once across both lists
//! - no waitlist while seats are open (for classes that are not canceled)
//! - `status` equals `ClassStatus::project(enrolled, capacity, canceled)`
//! - waitlist order is stable FIFO
//!
//! Lowering capacity below the enrolled count does not evict anyone; the
//! class simply stays `Full` until enough members leave.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassSessionId, MemberId, StateMachine, Timestamp};

use super::{
    BookingOutcome, CancelOutcome, CapacityChange, ClassStatus, MemberRef, Placement,
    RosterError, RosterList,
};

/// A scheduled class and its roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSession {
    id: ClassSessionId,
    title: String,
    starts_at: Option<Timestamp>,
    capacity: u32,
    enrolled: Vec<MemberRef>,
    waitlist: Vec<MemberRef>,
    status: ClassStatus,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Persisted form of a class session.
///
/// Repositories store and load this; `ClassSession::restore` re-checks
/// every invariant on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSessionSnapshot {
    pub id: ClassSessionId,
    pub title: String,
    pub starts_at: Option<Timestamp>,
    pub capacity: u32,
    pub enrolled: Vec<MemberRef>,
    pub waitlist: Vec<MemberRef>,
    pub canceled: bool,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClassSession {
    /// Largest capacity any repository can store (a Postgres `INTEGER`).
    pub const MAX_CAPACITY: u32 = i32::MAX as u32;

    /// Schedules a new class with an empty roster.
    pub fn schedule(
        id: ClassSessionId,
        title: impl Into<String>,
        capacity: u32,
        starts_at: Option<Timestamp>,
    ) -> Result<Self, RosterError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(RosterError::validation("title", "Class title cannot be empty"));
        }
        validate_capacity(capacity)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            title,
            starts_at,
            capacity,
            enrolled: Vec::new(),
            waitlist: Vec::new(),
            status: ClassStatus::Scheduled,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a session from storage.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the stored roster is inconsistent.
    pub fn restore(snapshot: ClassSessionSnapshot) -> Result<Self, RosterError> {
        let status = ClassStatus::project(
            snapshot.enrolled.len(),
            snapshot.capacity,
            snapshot.canceled,
        );
        let session = Self {
            id: snapshot.id,
            title: snapshot.title,
            starts_at: snapshot.starts_at,
            capacity: snapshot.capacity,
            enrolled: snapshot.enrolled,
            waitlist: snapshot.waitlist,
            status,
            version: snapshot.version,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        };
        session.check_invariants()?;
        Ok(session)
    }

    /// Captures the persisted form of this session.
    pub fn snapshot(&self) -> ClassSessionSnapshot {
        ClassSessionSnapshot {
            id: self.id,
            title: self.title.clone(),
            starts_at: self.starts_at,
            capacity: self.capacity,
            enrolled: self.enrolled.clone(),
            waitlist: self.waitlist.clone(),
            canceled: self.is_canceled(),
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ClassSessionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn starts_at(&self) -> Option<Timestamp> {
        self.starts_at
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn enrolled(&self) -> &[MemberRef] {
        &self.enrolled
    }

    pub fn waitlist(&self) -> &[MemberRef] {
        &self.waitlist
    }

    pub fn status(&self) -> ClassStatus {
        self.status
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_canceled(&self) -> bool {
        self.status == ClassStatus::Canceled
    }

    /// Seats still free; zero when full or oversubscribed.
    pub fn available_seats(&self) -> u32 {
        (self.capacity as usize).saturating_sub(self.enrolled.len()) as u32
    }

    /// Current placement of a member, if they are on the roster.
    pub fn placement_of(&self, member_id: &MemberId) -> Option<Placement> {
        if self.enrolled.iter().any(|m| &m.id == member_id) {
            return Some(Placement::Enrolled);
        }
        self.waitlist_position(member_id)
            .map(|position| Placement::Waitlisted { position })
    }

    /// 1-based waitlist position, derived from list order.
    pub fn waitlist_position(&self, member_id: &MemberId) -> Option<usize> {
        self.waitlist
            .iter()
            .position(|m| &m.id == member_id)
            .map(|index| index + 1)
    }

    // === Commands ===

    /// Books a member into the class.
    ///
    /// Enrolls while seats are open, otherwise appends to the waitlist.
    /// Booking a member who is already on the roster returns their current
    /// placement and changes nothing.
    ///
    /// # Errors
    ///
    /// `ClassCanceled` if the class was canceled.
    pub fn book(&mut self, member: MemberRef) -> Result<BookingOutcome, RosterError> {
        if let Some(placement) = self.placement_of(&member.id) {
            return Ok(BookingOutcome {
                member,
                placement,
                newly_placed: false,
            });
        }
        if self.is_canceled() {
            return Err(RosterError::class_canceled(self.id));
        }

        let placement = if self.has_open_seat() {
            self.enrolled.push(member.clone());
            Placement::Enrolled
        } else {
            self.waitlist.push(member.clone());
            Placement::Waitlisted {
                position: self.waitlist.len(),
            }
        };

        self.commit();
        Ok(BookingOutcome {
            member,
            placement,
            newly_placed: true,
        })
    }

    /// Removes a member from the roster.
    ///
    /// Leaving the waitlist never promotes anyone. Leaving an enrolled seat
    /// promotes waitlist heads, in order, until the freed seats are taken.
    ///
    /// # Errors
    ///
    /// `MemberNotOnRoster` if the member is in neither list.
    pub fn cancel(&mut self, member_id: &MemberId) -> Result<CancelOutcome, RosterError> {
        if let Some(index) = self.waitlist.iter().position(|m| &m.id == member_id) {
            let removed = self.waitlist.remove(index);
            self.commit();
            return Ok(CancelOutcome {
                removed,
                removed_from: RosterList::Waitlist,
                promoted: Vec::new(),
            });
        }

        let index = self
            .enrolled
            .iter()
            .position(|m| &m.id == member_id)
            .ok_or_else(|| RosterError::member_not_on_roster(self.id, member_id.clone()))?;

        let removed = self.enrolled.remove(index);
        let promoted = self.fill_open_seats();
        self.commit();

        Ok(CancelOutcome {
            removed,
            removed_from: RosterList::Enrolled,
            promoted,
        })
    }

    /// Changes the class capacity.
    ///
    /// Raising it promotes waitlisted members into the new seats. Lowering it
    /// below the enrolled count evicts nobody.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` for a zero capacity, `ClassCanceled` for a
    /// canceled class.
    pub fn set_capacity(&mut self, capacity: u32) -> Result<CapacityChange, RosterError> {
        validate_capacity(capacity)?;
        if self.is_canceled() {
            return Err(RosterError::class_canceled(self.id));
        }

        let previous = self.capacity;
        if previous == capacity {
            return Ok(CapacityChange {
                previous,
                current: capacity,
                promoted: Vec::new(),
            });
        }

        self.capacity = capacity;
        let promoted = self.fill_open_seats();
        self.commit();

        Ok(CapacityChange {
            previous,
            current: capacity,
            promoted,
        })
    }

    /// Cancels the class. Terminal.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the class is already canceled.
    pub fn cancel_class(&mut self) -> Result<(), RosterError> {
        self.status = self
            .status
            .transition_to(ClassStatus::Canceled)
            .map_err(|_| RosterError::invalid_state(self.status.as_str(), "cancel"))?;
        self.commit();
        Ok(())
    }

    /// Verifies every roster invariant.
    pub fn check_invariants(&self) -> Result<(), RosterError> {
        validate_capacity(self.capacity)
            .map_err(|_| RosterError::invariant_violation("capacity must be positive"))?;

        let mut seen = HashSet::new();
        for member in self.enrolled.iter().chain(self.waitlist.iter()) {
            if !seen.insert(&member.id) {
                return Err(RosterError::invariant_violation(format!(
                    "member {} appears more than once on the roster",
                    member.id
                )));
            }
        }

        if !self.is_canceled() && !self.waitlist.is_empty() && self.has_open_seat() {
            return Err(RosterError::invariant_violation(format!(
                "{} members waitlisted while {} seats are open",
                self.waitlist.len(),
                self.available_seats()
            )));
        }

        let expected = ClassStatus::project(self.enrolled.len(), self.capacity, self.is_canceled());
        if self.status != expected {
            return Err(RosterError::invariant_violation(format!(
                "status is {} but roster counts say {}",
                self.status, expected
            )));
        }

        Ok(())
    }

    // === Internals ===

    fn has_open_seat(&self) -> bool {
        self.enrolled.len() < self.capacity as usize
    }

    /// Moves waitlist heads into open seats, earliest-joined first.
    fn fill_open_seats(&mut self) -> Vec<MemberRef> {
        let mut promoted = Vec::new();
        if self.is_canceled() {
            return promoted;
        }
        while self.has_open_seat() && !self.waitlist.is_empty() {
            let next = self.waitlist.remove(0);
            self.enrolled.push(next.clone());
            promoted.push(next);
        }
        promoted
    }

    fn refresh_status(&mut self) {
        let projected =
            ClassStatus::project(self.enrolled.len(), self.capacity, self.is_canceled());
        if projected != self.status {
            debug_assert!(self.status.can_transition_to(&projected));
            self.status = projected;
        }
    }

    fn commit(&mut self) {
        self.refresh_status();
        self.version += 1;
        self.updated_at = Timestamp::now();
        debug_assert!(
            self.check_invariants().is_ok(),
            "roster invariants violated: {:?}",
            self.check_invariants()
        );
    }
}

fn validate_capacity(capacity: u32) -> Result<(), RosterError> {
    if capacity == 0 || capacity > ClassSession::MAX_CAPACITY {
        return Err(RosterError::validation(
            "capacity",
            format!(
                "Capacity must be between 1 and {} seats",
                ClassSession::MAX_CAPACITY
            ),
        ));
    }
    Ok(())
}
