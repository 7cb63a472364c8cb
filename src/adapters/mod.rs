//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event bus implementations (in-memory)
//! - `memory` - In-memory storage for paragraphs and consultations

pub mod events;
pub mod memory;

pub use events::InMemoryEventBus;
pub use memory::{InMemoryConsultationStore, InMemoryParagraphStore};
