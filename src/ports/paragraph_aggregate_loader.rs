//! Paragraph aggregate loader port (read side).
//!
//! Queries durable storage for one paragraph and classifies its
//! modifications from the viewing statement's point of view.
//!
//! # Contract
//!
//! - open: authored by the viewing statement, not refused, not chosen
//! - refused: refused by the viewing statement
//! - foreign: authored by another statement, not refused, not chosen
//! - the partitions are disjoint and open is sorted newest first

use crate::domain::foundation::{DomainError, ParagraphId, StatementId};
use crate::domain::paragraph::ParagraphAggregate;
use async_trait::async_trait;

/// Builds a fresh `ParagraphAggregate` per request.
#[async_trait]
pub trait ParagraphAggregateLoader: Send + Sync {
    /// Loads the aggregate for `paragraph_id` as seen by `statement_id`.
    ///
    /// Returns `None` if the paragraph does not exist.
    async fn load(
        &self,
        paragraph_id: &ParagraphId,
        statement_id: &StatementId,
    ) -> Result<Option<ParagraphAggregate>, DomainError>;
}
