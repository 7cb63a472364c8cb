//! Paragraph-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ModificationId, ParagraphId};
use crate::domain::modification::ModificationStatus;
use thiserror::Error;

/// Partition invariant broken, reported by the validating mode of the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The same id sits in two partitions, or twice in one (`first == second`).
    #[error("modification {id} appears in both {first} and {second}")]
    DuplicateModification {
        id: ModificationId,
        first: ModificationStatus,
        second: ModificationStatus,
    },

    #[error("chosen modification {id} is still listed as {partition}")]
    ChosenStillPooled {
        id: ModificationId,
        partition: ModificationStatus,
    },

    /// The modification to choose is not in any partition.
    #[error("modification {id} is not in any partition")]
    MissingTarget { id: ModificationId },

    /// A side of the change would move a modification along a transition
    /// `ModificationStatus` does not allow. `from` is `None` when the
    /// modification is unknown to the aggregate.
    #[error("modification {id} cannot move from {from:?} to {to}")]
    InvalidTransition {
        id: ModificationId,
        from: Option<ModificationStatus>,
        to: ModificationStatus,
    },
}

/// Errors raised while resolving a paragraph's chosen modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphError {
    /// No paragraph with this id is visible to the statement.
    NotFound(ParagraphId),
    /// The requested modification does not belong to the paragraph's pools.
    ModificationNotFound(ModificationId),
    /// The validating mode refused the transition.
    InvariantViolation(InvariantViolation),
    /// Loader, writer or publisher failed.
    Infrastructure(String),
}

impl ParagraphError {
    pub fn not_found(id: ParagraphId) -> Self {
        ParagraphError::NotFound(id)
    }
    pub fn modification_not_found(id: ModificationId) -> Self {
        ParagraphError::ModificationNotFound(id)
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ParagraphError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ParagraphError::NotFound(_) => ErrorCode::ParagraphNotFound,
            ParagraphError::ModificationNotFound(_) => ErrorCode::ModificationNotFound,
            ParagraphError::InvariantViolation(InvariantViolation::InvalidTransition { .. }) => {
                ErrorCode::InvalidStateTransition
            }
            ParagraphError::InvariantViolation(_) => ErrorCode::InvariantViolation,
            ParagraphError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ParagraphError::NotFound(id) => format!("Paragraph not found: {}", id),
            ParagraphError::ModificationNotFound(id) => {
                format!("Modification not found on paragraph: {}", id)
            }
            ParagraphError::InvariantViolation(violation) => {
                format!("Invariant violation: {}", violation)
            }
            ParagraphError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ParagraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ParagraphError {}

impl From<InvariantViolation> for ParagraphError {
    fn from(violation: InvariantViolation) -> Self {
        ParagraphError::InvariantViolation(violation)
    }
}

impl From<DomainError> for ParagraphError {
    fn from(err: DomainError) -> Self {
        ParagraphError::Infrastructure(err.to_string())
    }
}
