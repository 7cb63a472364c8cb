//! Paragraph resolution and listing configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound for `consultations_per_page`.
pub const MAX_CONSULTATIONS_PER_PAGE: u32 = 100;

/// Behaviour switches for the decision workflow and listings
#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionConfig {
    /// Run chosen-modification changes through the validating path and
    /// refuse transitions that break the partition invariants
    #[serde(default)]
    pub strict_invariants: bool,

    /// Page size of the consultation listing
    #[serde(default = "default_consultations_per_page")]
    pub consultations_per_page: u32,
}

impl ResolutionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.consultations_per_page == 0
            || self.consultations_per_page > MAX_CONSULTATIONS_PER_PAGE
        {
            return Err(ValidationError::InvalidPageSize {
                max: MAX_CONSULTATIONS_PER_PAGE,
                actual: self.consultations_per_page,
            });
        }
        Ok(())
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            strict_invariants: false,
            consultations_per_page: default_consultations_per_page(),
        }
    }
}

fn default_consultations_per_page() -> u32 {
    8
}
