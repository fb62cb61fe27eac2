//! Command infrastructure for CQRS handlers.
//!
//! `CommandMetadata` is the context that flows through command processing
//! and onto the events a command emits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata context for command handlers.
///
/// # Example
///
/// ```ignore
/// let metadata = CommandMetadata::new()
///     .with_correlation_id(request_id)
///     .with_source("api");
///
/// handler.handle(cmd, metadata).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating a fresh one if none was set.
    ///
    /// Call once per command and reuse the value; each call on metadata
    /// without an ID yields a different one.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Test fixture with fixed correlation ID.
    pub fn test_fixture() -> Self {
        Self::new()
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_optional_fields() {
        let metadata = CommandMetadata::new();
        assert!(metadata.correlation_id_opt().is_none());
        assert!(metadata.source().is_none());
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new();
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn correlation_id_returns_set_value() {
        let metadata = CommandMetadata::new().with_correlation_id("req-42");

        assert_eq!(metadata.correlation_id(), "req-42");
        assert_eq!(metadata.correlation_id_opt(), Some("req-42"));
    }

    #[test]
    fn serializes_without_unset_fields() {
        let json = serde_json::to_string(&CommandMetadata::new().with_source("api")).unwrap();
        assert_eq!(json, r#"{"source":"api"}"#);
    }
}
