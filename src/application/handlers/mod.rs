//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod consultation;
pub mod paragraph;

pub use consultation::{ListConsultationsHandler, ListConsultationsQuery, ListConsultationsResult};
pub use paragraph::{
    ChangeChosenModificationCommand, ChangeChosenModificationHandler,
    ChangeChosenModificationResult, GetParagraphHandler, GetParagraphQuery,
};
