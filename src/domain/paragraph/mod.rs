//! Paragraph domain module.
//!
//! Resolves which proposed modification is accepted for a paragraph.
//!
//! # Events
//!
//! - `ChosenModificationChanged` - Published when the accepted modification
//!   of a paragraph changes or is cleared

mod aggregate;
mod errors;
mod events;

pub use aggregate::ParagraphAggregate;
pub use errors::{InvariantViolation, ParagraphError};
pub use events::ChosenModificationChanged;
