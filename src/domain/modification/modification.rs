//! Modification entity and its accepted-wording wrapper.

use crate::domain::foundation::{
    ModificationId, ModificationStatementId, ParagraphId, StatementId, Timestamp, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A proposed alternate wording for a paragraph, authored via a statement.
///
/// Modifications are immutable once created. Equality and hashing use the
/// identity only, so two values with the same id compare equal regardless of
/// their content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modification {
    id: ModificationId,
    paragraph_id: ParagraphId,
    statement_id: StatementId,
    text: String,
    justification: Option<String>,
    created_at: Timestamp,
}

impl Modification {
    /// Creates a modification, rejecting blank proposal text.
    pub fn new(
        id: ModificationId,
        paragraph_id: ParagraphId,
        statement_id: StatementId,
        text: String,
        justification: Option<String>,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self::reconstitute(
            id,
            paragraph_id,
            statement_id,
            text,
            justification,
            created_at,
        ))
    }

    /// Reconstitute a modification from persistence (no validation).
    pub fn reconstitute(
        id: ModificationId,
        paragraph_id: ParagraphId,
        statement_id: StatementId,
        text: String,
        justification: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            paragraph_id,
            statement_id,
            text,
            justification,
            created_at,
        }
    }

    pub fn id(&self) -> &ModificationId {
        &self.id
    }

    pub fn paragraph_id(&self) -> &ParagraphId {
        &self.paragraph_id
    }

    /// Statement that authored this modification.
    pub fn statement_id(&self) -> &StatementId {
        &self.statement_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn justification(&self) -> Option<&str> {
        self.justification.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

impl PartialEq for Modification {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Modification {}

impl Hash for Modification {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Ordering of the open pool: `created_at` descending, ties by id ascending.
///
/// ```ignore
/// open.sort_by(newest_first);
/// ```
pub fn newest_first(a: &Modification, b: &Modification) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// The modification a statement currently treats as accepted for a paragraph.
///
/// At most one exists per (statement, paragraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenModification {
    statement_id: StatementId,
    modification: Modification,
    chosen_at: Timestamp,
}

impl ChosenModification {
    pub fn new(statement_id: StatementId, modification: Modification, chosen_at: Timestamp) -> Self {
        Self {
            statement_id,
            modification,
            chosen_at,
        }
    }

    /// Statement that made the choice.
    pub fn statement_id(&self) -> &StatementId {
        &self.statement_id
    }

    pub fn modification(&self) -> &Modification {
        &self.modification
    }

    pub fn chosen_at(&self) -> &Timestamp {
        &self.chosen_at
    }

    /// Unwraps the accepted modification.
    pub fn into_modification(self) -> Modification {
        self.modification
    }
}

/// Another statement that independently chose the same modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationStatement {
    id: ModificationStatementId,
    statement_id: StatementId,
    modification_id: ModificationId,
    chosen_at: Timestamp,
}

impl ModificationStatement {
    pub fn new(
        id: ModificationStatementId,
        statement_id: StatementId,
        modification_id: ModificationId,
        chosen_at: Timestamp,
    ) -> Self {
        Self {
            id,
            statement_id,
            modification_id,
            chosen_at,
        }
    }

    pub fn id(&self) -> &ModificationStatementId {
        &self.id
    }

    pub fn statement_id(&self) -> &StatementId {
        &self.statement_id
    }

    pub fn modification_id(&self) -> &ModificationId {
        &self.modification_id
    }

    pub fn chosen_at(&self) -> &Timestamp {
        &self.chosen_at
    }
}
