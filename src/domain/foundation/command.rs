//! Command infrastructure for CQRS handlers.
//!
//! `CommandMetadata` is the context that flows through command processing
//! and is propagated onto every event a handler emits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Metadata context for command handlers.
///
/// Carries correlation and authentication context through the command
/// processing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command (usually a moderator).
    pub user_id: UserId,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with required user ID.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture with a moderator user ID.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("moderator-1").unwrap())
            .with_correlation_id("test-correlation-id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_with_user_id_only() {
        let user_id = UserId::new("user-123").unwrap();
        let metadata = CommandMetadata::new(user_id.clone());

        assert_eq!(metadata.user_id, user_id);
        assert_ne!(metadata.correlation_id(), metadata.correlation_id());
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(UserId::new("user").unwrap());
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn correlation_id_returns_set_value() {
        let metadata = CommandMetadata::new(UserId::new("user").unwrap())
            .with_correlation_id("my-correlation-id");

        assert_eq!(metadata.correlation_id(), "my-correlation-id");
        assert_eq!(metadata.correlation_id(), metadata.correlation_id());
    }

    #[test]
    fn serialization_skips_none_fields() {
        let metadata = CommandMetadata::new(UserId::new("user-skip").unwrap());

        let json = serde_json::to_string(&metadata).unwrap();

        assert!(json.contains("user_id"));
        assert!(!json.contains("correlation_id"));
    }
}
