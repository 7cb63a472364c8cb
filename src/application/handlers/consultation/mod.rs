//! Consultation query handlers.

mod list_consultations;

pub use list_consultations::{
    ListConsultationsHandler, ListConsultationsQuery, ListConsultationsResult,
};
