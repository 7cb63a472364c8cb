//! Free text entries placed around a paragraph's modification section.

use crate::domain::foundation::{FreeTextId, ParagraphId, StatementId, Timestamp};
use serde::{Deserialize, Serialize};

/// Where a free text is rendered relative to the paragraph's modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeTextPlacement {
    Before,
    After,
}

/// Commentary a statement attaches before or after a paragraph.
///
/// Display order matters; sequences of free texts are kept in the order the
/// loader produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeText {
    id: FreeTextId,
    paragraph_id: ParagraphId,
    statement_id: StatementId,
    placement: FreeTextPlacement,
    text: String,
    created_at: Timestamp,
}

impl FreeText {
    pub fn new(
        id: FreeTextId,
        paragraph_id: ParagraphId,
        statement_id: StatementId,
        placement: FreeTextPlacement,
        text: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            paragraph_id,
            statement_id,
            placement,
            text,
            created_at,
        }
    }

    pub fn id(&self) -> &FreeTextId {
        &self.id
    }

    pub fn paragraph_id(&self) -> &ParagraphId {
        &self.paragraph_id
    }

    /// Statement that authored this free text.
    pub fn statement_id(&self) -> &StatementId {
        &self.statement_id
    }

    pub fn placement(&self) -> FreeTextPlacement {
        self.placement
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
