//! Class Roster - enrollment, capacity and waitlist management for gym classes.
//!
//! A class session holds a fixed number of seats. Members who book a full
//! class join a first-come-first-served waitlist and are promoted, in order,
//! whenever a seat frees up. Every committed roster change is published on
//! an in-process event feed and announced through a notifier.
//!
//! # Layout
//!
//! - `domain` - `ClassSession` aggregate, placements, events, notifications
//! - `ports` - repository, notifier and event publisher traits
//! - `application` - command and query handlers
//! - `adapters` - in-memory and PostgreSQL storage, HTTP API, notifiers
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
