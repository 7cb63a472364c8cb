//! Consultation domain module.
//!
//! Consultations group the legal texts that statements comment on. This
//! module covers their lifecycle status and the status-based listing filter.

#[allow(clippy::module_inception)]
mod consultation;
mod status;

pub use consultation::{Consultation, MAX_TITLE_LENGTH};
pub use status::{ConsultationFilter, ConsultationStatus, StatusCounts};
