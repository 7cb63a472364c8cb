//! Consultation entity.

use crate::domain::foundation::{ConsultationId, OrganisationId, Slug, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

use super::ConsultationStatus;

/// Maximum length for consultation title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// A consultation on one or more legal texts.
///
/// Public consultations have no organisation; internal ones are scoped to
/// the organisation that runs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    id: ConsultationId,
    slug: Slug,
    title: String,
    status: ConsultationStatus,
    start_date: Timestamp,
    organisation_id: Option<OrganisationId>,
}

impl Consultation {
    /// Creates a consultation.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `OutOfRange` if the title is longer than `MAX_TITLE_LENGTH`
    pub fn new(
        id: ConsultationId,
        slug: Slug,
        title: String,
        status: ConsultationStatus,
        start_date: Timestamp,
        organisation_id: Option<OrganisationId>,
    ) -> Result<Self, ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if trimmed.len() > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i32,
                trimmed.len() as i32,
            ));
        }
        Ok(Self {
            id,
            slug,
            title,
            status,
            start_date,
            organisation_id,
        })
    }

    pub fn id(&self) -> &ConsultationId {
        &self.id
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> ConsultationStatus {
        self.status
    }

    pub fn start_date(&self) -> &Timestamp {
        &self.start_date
    }

    pub fn organisation_id(&self) -> Option<&OrganisationId> {
        self.organisation_id.as_ref()
    }

    /// A consultation without organisation is listed publicly.
    pub fn is_public(&self) -> bool {
        self.organisation_id.is_none()
    }
}
