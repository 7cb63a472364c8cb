//! Paragraph domain events.

use crate::domain::foundation::{EventId, ModificationId, ParagraphId, StatementId, Timestamp};
use serde::{Deserialize, Serialize};

/// Published when a statement's accepted modification for a paragraph changes.
///
/// `chosen_modification_id` is `None` when the choice was cleared;
/// `vacated_modification_id` is the previous choice, now open again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenModificationChanged {
    pub event_id: EventId,
    pub paragraph_id: ParagraphId,
    pub statement_id: StatementId,
    pub chosen_modification_id: Option<ModificationId>,
    pub vacated_modification_id: Option<ModificationId>,
    pub changed_at: Timestamp,
}

crate::domain_event!(
    ChosenModificationChanged,
    event_type = "paragraph.chosen_modification_changed.v1",
    aggregate_id = paragraph_id,
    aggregate_type = "Paragraph",
    occurred_at = changed_at,
    event_id = event_id
);
