//! In-memory consultation store.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::consultation::{Consultation, StatusCounts};
use crate::domain::foundation::DomainError;
use crate::ports::{ConsultationPage, ConsultationQuery, ConsultationReader};

/// In-memory implementation of `ConsultationReader`.
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned.
pub struct InMemoryConsultationStore {
    consultations: RwLock<Vec<Consultation>>,
}

impl InMemoryConsultationStore {
    pub fn new() -> Self {
        Self {
            consultations: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, consultation: Consultation) {
        self.consultations
            .write()
            .expect("InMemoryConsultationStore: write lock poisoned")
            .push(consultation);
    }

    pub fn len(&self) -> usize {
        self.consultations
            .read()
            .expect("InMemoryConsultationStore: lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryConsultationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConsultationReader for InMemoryConsultationStore {
    async fn list(&self, query: &ConsultationQuery) -> Result<ConsultationPage, DomainError> {
        let consultations = self
            .consultations
            .read()
            .expect("InMemoryConsultationStore: lock poisoned");

        let mut matching: Vec<&Consultation> = consultations
            .iter()
            .filter(|c| c.organisation_id() == query.organisation_id.as_ref())
            .filter(|c| query.filter.matches(c.status()))
            .collect();
        matching.sort_by(|a, b| {
            b.start_date()
                .cmp(a.start_date())
                .then_with(|| a.id().cmp(b.id()))
        });

        let total = matching.len() as u64;
        let items: Vec<Consultation> = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();
        let has_more = u64::from(query.offset) + (items.len() as u64) < total;

        Ok(ConsultationPage {
            items,
            total,
            has_more,
        })
    }

    async fn count_by_status(&self) -> Result<StatusCounts, DomainError> {
        let consultations = self
            .consultations
            .read()
            .expect("InMemoryConsultationStore: lock poisoned");

        Ok(StatusCounts::tally(
            consultations
                .iter()
                .filter(|c| c.is_public())
                .map(|c| c.status()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consultation::{ConsultationFilter, ConsultationStatus};
    use crate::domain::foundation::{ConsultationId, OrganisationId, Slug, Timestamp};

    fn consultation(
        title: &str,
        status: ConsultationStatus,
        start: i64,
        organisation_id: Option<OrganisationId>,
    ) -> Consultation {
        Consultation::new(
            ConsultationId::new(),
            Slug::new(title).unwrap(),
            title.to_string(),
            status,
            Timestamp::from_unix_secs(start),
            organisation_id,
        )
        .unwrap()
    }

    fn titles(page: &ConsultationPage) -> Vec<&str> {
        page.items.iter().map(|c| c.title()).collect()
    }

    #[tokio::test]
    async fn lists_public_consultations_newest_first() {
        let store = InMemoryConsultationStore::new();
        assert!(store.is_empty());
        store.insert(consultation("old", ConsultationStatus::Done, 10, None));
        store.insert(consultation("new", ConsultationStatus::Ongoing, 30, None));
        store.insert(consultation("mid", ConsultationStatus::Planned, 20, None));
        store.insert(consultation(
            "private",
            ConsultationStatus::Ongoing,
            40,
            Some(OrganisationId::new()),
        ));
        assert_eq!(store.len(), 4);

        let page = store
            .list(&ConsultationQuery::new(ConsultationFilter::All, 0, 8))
            .await
            .unwrap();

        assert_eq!(titles(&page), vec!["new", "mid", "old"]);
        assert_eq!(page.total, 3);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn paginates_with_offset_and_limit() {
        let store = InMemoryConsultationStore::new();
        for (i, title) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            store.insert(consultation(title, ConsultationStatus::Ongoing, i as i64, None));
        }

        let first = store
            .list(&ConsultationQuery::new(ConsultationFilter::All, 0, 2))
            .await
            .unwrap();
        assert_eq!(titles(&first), vec!["e", "d"]);
        assert!(first.has_more);

        let last = store
            .list(&ConsultationQuery::new(ConsultationFilter::All, 4, 2))
            .await
            .unwrap();
        assert_eq!(titles(&last), vec!["a"]);
        assert!(!last.has_more);
        assert_eq!(last.total, 5);
    }

    #[tokio::test]
    async fn filters_by_status_and_organisation() {
        let store = InMemoryConsultationStore::new();
        let organisation = OrganisationId::new();
        store.insert(consultation("org-done", ConsultationStatus::Done, 10, Some(organisation)));
        store.insert(consultation(
            "org-pending",
            ConsultationStatus::PendingReport,
            20,
            Some(organisation),
        ));
        store.insert(consultation("public-done", ConsultationStatus::Done, 30, None));

        let page = store
            .list(
                &ConsultationQuery::new(ConsultationFilter::Done, 0, 8)
                    .for_organisation(organisation),
            )
            .await
            .unwrap();

        assert_eq!(titles(&page), vec!["org-done"]);
    }

    #[tokio::test]
    async fn counts_only_public_consultations() {
        let store = InMemoryConsultationStore::new();
        store.insert(consultation("a", ConsultationStatus::Ongoing, 1, None));
        store.insert(consultation("b", ConsultationStatus::Done, 2, None));
        store.insert(consultation("c", ConsultationStatus::PendingReport, 3, None));
        store.insert(consultation(
            "d",
            ConsultationStatus::Ongoing,
            4,
            Some(OrganisationId::new()),
        ));

        let counts = store.count_by_status().await.unwrap();

        assert_eq!(counts.ongoing_count(), 1);
        assert_eq!(counts.done_count(), 2);
        assert_eq!(counts.planned_count(), 0);
    }
}
