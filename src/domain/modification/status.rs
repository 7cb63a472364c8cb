//! Modification status as observed by the paragraph resolution aggregate.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The partition a modification currently sits in.
///
/// Only the transitions the resolution aggregate performs are valid here;
/// moving between `Refused`, `Foreign` and `Open` is a moderation concern
/// that happens before the aggregate is reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationStatus {
    /// Awaiting a decision by the viewing statement.
    Open,
    /// Rejected by moderation.
    Refused,
    /// Belongs to a party the viewer does not control.
    Foreign,
    /// Currently accepted wording.
    Chosen,
}

impl ModificationStatus {
    /// Stable lowercase name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModificationStatus::Open => "open",
            ModificationStatus::Refused => "refused",
            ModificationStatus::Foreign => "foreign",
            ModificationStatus::Chosen => "chosen",
        }
    }
}

impl fmt::Display for ModificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for ModificationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ModificationStatus::*;
        matches!(
            (self, target),
            (Open, Chosen) | (Refused, Chosen) | (Foreign, Chosen) | (Chosen, Open)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ModificationStatus::*;
        match self {
            Open | Refused | Foreign => vec![Chosen],
            Chosen => vec![Open],
        }
    }
}
