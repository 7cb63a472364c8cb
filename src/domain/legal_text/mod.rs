//! Legal text module.
//!
//! Read-only views of the parts of a legal text that statements comment on:
//! paragraphs and the free texts placed around them.

mod free_text;
mod paragraph;

pub use free_text::{FreeText, FreeTextPlacement};
pub use paragraph::Paragraph;
