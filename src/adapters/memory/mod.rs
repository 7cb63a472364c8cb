//! In-memory storage adapters.
//!
//! - `InMemoryParagraphStore` - Paragraph loader and decision writer
//! - `InMemoryConsultationStore` - Consultation listing reader

mod consultation_store;
mod paragraph_store;

pub use consultation_store::InMemoryConsultationStore;
pub use paragraph_store::InMemoryParagraphStore;
