//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and event plumbing
//! that form the vocabulary of the consultation domain.

mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent};
pub use ids::{
    ConsultationId, FreeTextId, LegalTextId, ModificationId, ModificationStatementId,
    OrganisationId, ParagraphId, Slug, StatementId, UserId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
