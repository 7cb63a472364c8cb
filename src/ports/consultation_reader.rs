//! Consultation reader port (read side / CQRS queries).
//!
//! Backs the consultation overview: a status-filtered, offset-paginated list
//! plus per-status counts of public consultations.

use crate::domain::consultation::{Consultation, ConsultationFilter, StatusCounts};
use crate::domain::foundation::{DomainError, OrganisationId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Query for one page of consultations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationQuery {
    pub filter: ConsultationFilter,

    /// Restrict to one organisation; `None` lists public consultations only.
    pub organisation_id: Option<OrganisationId>,

    /// Number of results to skip.
    pub offset: u32,

    /// Maximum number of results to return.
    pub limit: u32,
}

impl ConsultationQuery {
    pub fn new(filter: ConsultationFilter, offset: u32, limit: u32) -> Self {
        Self {
            filter,
            organisation_id: None,
            offset,
            limit,
        }
    }

    /// Restrict the listing to an organisation.
    pub fn for_organisation(mut self, organisation_id: OrganisationId) -> Self {
        self.organisation_id = Some(organisation_id);
        self
    }
}

/// One page of consultations, newest start date first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationPage {
    pub items: Vec<Consultation>,

    /// Total number of consultations matching the query.
    pub total: u64,

    pub has_more: bool,
}

/// Reader port for consultation listings.
#[async_trait]
pub trait ConsultationReader: Send + Sync {
    /// Lists consultations ordered by start date descending.
    async fn list(&self, query: &ConsultationQuery) -> Result<ConsultationPage, DomainError>;

    /// Counts public consultations by status.
    async fn count_by_status(&self) -> Result<StatusCounts, DomainError>;
}
