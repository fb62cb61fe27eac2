//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-process roster change feed
//! - `http` - REST API (axum)
//! - `notifications` - Notifier implementations
//! - `postgres` - PostgreSQL class session repository
//! - `storage` - In-memory class session repository

pub mod events;
pub mod http;
pub mod notifications;
pub mod postgres;
pub mod storage;

pub use events::InMemoryEventBus;
pub use notifications::{RecordingNotifier, TracingNotifier};
pub use postgres::PostgresClassSessionRepository;
pub use storage::InMemoryClassSessionRepository;
