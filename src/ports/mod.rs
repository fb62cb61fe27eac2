//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ClassSessionRepository` - Persistence for class sessions and rosters
//! - `Notifier` - Notification collaborator (`notify(message, recipient?)`)
//! - `EventPublisher` - Roster change feed

mod class_session_repository;
mod event_publisher;
mod notifier;

pub use class_session_repository::ClassSessionRepository;
pub use event_publisher::EventPublisher;
pub use notifier::Notifier;
