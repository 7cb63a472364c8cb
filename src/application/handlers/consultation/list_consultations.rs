//! ListConsultationsHandler - Query handler for the consultation overview.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationFilter, StatusCounts};
use crate::domain::foundation::{DomainError, OrganisationId};
use crate::ports::{ConsultationPage, ConsultationQuery, ConsultationReader};

/// Query for one page of the consultation overview.
#[derive(Debug, Clone)]
pub struct ListConsultationsQuery {
    pub filter: ConsultationFilter,
    pub organisation_id: Option<OrganisationId>,
    pub offset: u32,
}

impl ListConsultationsQuery {
    /// First page of every public consultation.
    pub fn all() -> Self {
        Self {
            filter: ConsultationFilter::All,
            organisation_id: None,
            offset: 0,
        }
    }

    /// Builds a query from a raw filter name
    /// (`all`, `ongoing`, `planned` or `done`).
    ///
    /// An unknown name fails with `ErrorCode::InvalidFormat`.
    pub fn parse(filter: &str, offset: u32) -> Result<Self, DomainError> {
        Ok(Self {
            filter: filter.parse()?,
            organisation_id: None,
            offset,
        })
    }

    pub fn for_organisation(mut self, organisation_id: OrganisationId) -> Self {
        self.organisation_id = Some(organisation_id);
        self
    }
}

/// One overview page with the status counts and pagination state.
#[derive(Debug, Clone)]
pub struct ListConsultationsResult {
    pub page: ConsultationPage,
    pub counts: StatusCounts,
    pub filter: ConsultationFilter,
    pub offset: u32,
    /// Page size.
    pub steps: u32,
}

/// Handler for listing consultations.
pub struct ListConsultationsHandler {
    reader: Arc<dyn ConsultationReader>,
    per_page: u32,
}

impl ListConsultationsHandler {
    pub fn new(reader: Arc<dyn ConsultationReader>, per_page: u32) -> Self {
        Self { reader, per_page }
    }

    pub async fn handle(
        &self,
        query: ListConsultationsQuery,
    ) -> Result<ListConsultationsResult, DomainError> {
        let mut reader_query = ConsultationQuery::new(query.filter, query.offset, self.per_page);
        if let Some(organisation_id) = query.organisation_id {
            reader_query = reader_query.for_organisation(organisation_id);
        }

        let page = self.reader.list(&reader_query).await?;
        let counts = self.reader.count_by_status().await?;

        tracing::debug!(
            filter = ?query.filter,
            offset = query.offset,
            returned = page.items.len(),
            total = page.total,
            "Listed consultations"
        );

        Ok(ListConsultationsResult {
            page,
            counts,
            filter: query.filter,
            offset: query.offset,
            steps: self.per_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consultation::ConsultationStatus;
    use crate::domain::foundation::ErrorCode;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockReader {
        queries: Mutex<Vec<ConsultationQuery>>,
        fail: bool,
    }

    impl MockReader {
        fn new() -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn queries(&self) -> Vec<ConsultationQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConsultationReader for MockReader {
        async fn list(&self, query: &ConsultationQuery) -> Result<ConsultationPage, DomainError> {
            if self.fail {
                return Err(DomainError::new(ErrorCode::DatabaseError, "Connection refused"));
            }
            self.queries.lock().unwrap().push(query.clone());
            Ok(ConsultationPage {
                items: vec![],
                total: 0,
                has_more: false,
            })
        }

        async fn count_by_status(&self) -> Result<StatusCounts, DomainError> {
            Ok(StatusCounts::tally([
                ConsultationStatus::Ongoing,
                ConsultationStatus::PendingStatementsReport,
            ]))
        }
    }

    #[tokio::test]
    async fn forwards_page_size_and_scope() {
        let reader = Arc::new(MockReader::new());
        let handler = ListConsultationsHandler::new(reader.clone(), 8);
        let organisation = OrganisationId::new();

        let result = handler
            .handle(
                ListConsultationsQuery::parse("done", 16)
                    .unwrap()
                    .for_organisation(organisation),
            )
            .await
            .unwrap();

        assert_eq!(result.steps, 8);
        assert_eq!(result.offset, 16);
        assert_eq!(result.filter, ConsultationFilter::Done);
        assert_eq!(result.counts.done_count(), 1);
        assert_eq!(result.counts.ongoing_count(), 1);

        let queries = reader.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].limit, 8);
        assert_eq!(queries[0].offset, 16);
        assert_eq!(queries[0].organisation_id, Some(organisation));
    }

    #[test]
    fn rejects_unknown_filter() {
        let err = ListConsultationsQuery::parse("archived", 0).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.message.contains("archived"));
    }

    #[tokio::test]
    async fn propagates_reader_failure() {
        let reader = Arc::new(MockReader {
            queries: Mutex::new(Vec::new()),
            fail: true,
        });
        let handler = ListConsultationsHandler::new(reader, 8);

        let err = handler.handle(ListConsultationsQuery::all()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
