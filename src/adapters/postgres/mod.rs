//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresClassSessionRepository` - Class sessions with JSONB rosters

mod class_session_repository;

pub use class_session_repository::PostgresClassSessionRepository;
