//! Chosen modification writer port (write side).
//!
//! Persists the outcome of a decision after the aggregate has been mutated
//! in memory. The aggregate itself is discarded if this write fails.

use crate::domain::foundation::{DomainError, ModificationId, ParagraphId, StatementId, Timestamp};
use crate::domain::paragraph::ParagraphAggregate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a decision changes in durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenModificationChange {
    pub paragraph_id: ParagraphId,
    /// Statement whose choice changes.
    pub statement_id: StatementId,
    /// Newly accepted modification; `None` clears the choice.
    pub chosen: Option<ModificationId>,
    /// Previously accepted modification, open again.
    pub vacated: Option<ModificationId>,
    pub decided_at: Timestamp,
}

impl ChosenModificationChange {
    /// Reads the decision back from a mutated aggregate.
    pub fn from_aggregate(
        aggregate: &ParagraphAggregate,
        statement_id: StatementId,
        vacated: Option<ModificationId>,
    ) -> Self {
        Self {
            paragraph_id: *aggregate.paragraph().id(),
            statement_id,
            chosen: aggregate
                .chosen_modification()
                .map(|chosen| *chosen.modification().id()),
            vacated,
            decided_at: Timestamp::now(),
        }
    }
}

/// Persists chosen-modification decisions.
#[async_trait]
pub trait ChosenModificationWriter: Send + Sync {
    /// Applies one decision.
    ///
    /// # Errors
    ///
    /// - `ParagraphNotFound` if the paragraph is unknown to storage
    /// - `DatabaseError` on persistence failure
    async fn apply(&self, change: &ChosenModificationChange) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chosen_modification_writer_is_object_safe() {
        fn _accepts_dyn(_writer: &dyn ChosenModificationWriter) {}
    }
}
