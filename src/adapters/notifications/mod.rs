//! Notifier adapters.
//!
//! - `TracingNotifier` - Writes notifications to the structured log
//! - `RecordingNotifier` - Captures notifications in memory for inspection

mod recording;
mod tracing_notifier;

pub use recording::RecordingNotifier;
pub use tracing_notifier::TracingNotifier;
