//! GetParagraphHandler - Query handler for a statement's view of a paragraph.

use std::sync::Arc;

use crate::domain::foundation::{ParagraphId, StatementId};
use crate::domain::paragraph::{ParagraphAggregate, ParagraphError};
use crate::ports::ParagraphAggregateLoader;

/// Query for one paragraph as seen by a statement.
#[derive(Debug, Clone)]
pub struct GetParagraphQuery {
    pub paragraph_id: ParagraphId,
    pub statement_id: StatementId,
}

/// Handler for retrieving paragraph views.
pub struct GetParagraphHandler {
    loader: Arc<dyn ParagraphAggregateLoader>,
}

impl GetParagraphHandler {
    pub fn new(loader: Arc<dyn ParagraphAggregateLoader>) -> Self {
        Self { loader }
    }

    pub async fn handle(&self, query: GetParagraphQuery) -> Result<ParagraphAggregate, ParagraphError> {
        self.loader
            .load(&query.paragraph_id, &query.statement_id)
            .await?
            .ok_or_else(|| ParagraphError::not_found(query.paragraph_id))
    }
}
