//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `roster` - Class rosters, waitlists and status projection

pub mod foundation;
pub mod roster;
