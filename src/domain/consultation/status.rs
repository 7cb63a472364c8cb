//! Consultation lifecycle status and the listing filter built on it.

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Lifecycle status of a consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Planned,
    Ongoing,
    /// Closed for input; waiting for statements to be compiled.
    PendingStatementsReport,
    /// Waiting for the authority's final report.
    PendingReport,
    Done,
}

impl ConsultationStatus {
    pub const ALL: [ConsultationStatus; 5] = [
        ConsultationStatus::Planned,
        ConsultationStatus::Ongoing,
        ConsultationStatus::PendingStatementsReport,
        ConsultationStatus::PendingReport,
        ConsultationStatus::Done,
    ];

    /// Whether the consultation has closed (reported or waiting for a report).
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            ConsultationStatus::PendingStatementsReport
                | ConsultationStatus::PendingReport
                | ConsultationStatus::Done
        )
    }
}

/// Status filter accepted by the consultation listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationFilter {
    #[default]
    All,
    Ongoing,
    Planned,
    Done,
}

impl ConsultationFilter {
    /// Returns true if a consultation in `status` passes the filter.
    ///
    /// `Done` matches the `done` status only; the pending report states are
    /// counted as done in [`StatusCounts::done_count`] but not listed under it.
    pub fn matches(&self, status: ConsultationStatus) -> bool {
        match self {
            ConsultationFilter::All => true,
            ConsultationFilter::Ongoing => status == ConsultationStatus::Ongoing,
            ConsultationFilter::Planned => status == ConsultationStatus::Planned,
            ConsultationFilter::Done => status == ConsultationStatus::Done,
        }
    }
}

impl FromStr for ConsultationFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ConsultationFilter::All),
            "ongoing" => Ok(ConsultationFilter::Ongoing),
            "planned" => Ok(ConsultationFilter::Planned),
            "done" => Ok(ConsultationFilter::Done),
            other => Err(ValidationError::invalid_format(
                "filter",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

/// Number of public consultations per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    counts: HashMap<ConsultationStatus, u64>,
}

impl StatusCounts {
    /// Counts the statuses of the given consultations.
    pub fn tally(statuses: impl IntoIterator<Item = ConsultationStatus>) -> Self {
        let mut counts = HashMap::new();
        for status in statuses {
            *counts.entry(status).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, status: ConsultationStatus) -> u64 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn ongoing_count(&self) -> u64 {
        self.get(ConsultationStatus::Ongoing)
    }

    pub fn planned_count(&self) -> u64 {
        self.get(ConsultationStatus::Planned)
    }

    /// Every closed status: done plus both pending report states.
    pub fn done_count(&self) -> u64 {
        self.counts
            .iter()
            .filter(|(status, _)| status.is_closed())
            .map(|(_, count)| count)
            .sum()
    }
}
