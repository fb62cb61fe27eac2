//! In-process storage adapters.

mod in_memory_class_session_repository;

pub use in_memory_class_session_repository::InMemoryClassSessionRepository;
