//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `legal_text` - Paragraphs and the free texts placed around them
//! - `modification` - Proposed wordings and the accepted-choice wrapper
//! - `paragraph` - Resolution of the accepted modification per paragraph
//! - `consultation` - Consultation status and listing filter

pub mod consultation;
pub mod foundation;
pub mod legal_text;
pub mod modification;
pub mod paragraph;
