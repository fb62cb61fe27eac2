//! Roster domain module.
//!
//! Capacity-bounded class rosters with FIFO waitlists and promotion on
//! vacancy.
//!
//! # Module Structure
//!
//! - `aggregate` - ClassSession aggregate (the enrollment engine)
//! - `status` - ClassStatus projection and state machine
//! - `member` - MemberRef carried on a roster
//! - `placement` - Command outcomes (placements, removals, promotions)
//! - `events` - Roster change feed
//! - `notifications` - Messages for the notification collaborator
//! - `view` - Read-only roster projections

mod aggregate;
mod errors;
mod events;
mod member;
mod notifications;
mod placement;
mod status;
mod view;

pub use aggregate::{ClassSession, ClassSessionSnapshot};
pub use errors::RosterError;
pub use events::{RosterChange, RosterEvent};
pub use member::MemberRef;
pub use notifications::{Recipient, RosterNotification};
pub use placement::{BookingOutcome, CancelOutcome, CapacityChange, Placement, RosterList};
pub use status::ClassStatus;
pub use view::{RosterEntry, RosterSummary, RosterView, WaitlistEntry};
