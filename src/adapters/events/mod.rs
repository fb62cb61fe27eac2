//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus with a live subscriber feed

mod in_memory;

pub use in_memory::InMemoryEventBus;
