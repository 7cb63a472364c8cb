//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Paragraph Ports
//!
//! - `ParagraphAggregateLoader` - Builds the per-request resolution aggregate
//! - `ChosenModificationWriter` - Persists an accepted-modification decision
//!
//! ## Consultation Ports
//!
//! - `ConsultationReader` - Filtered, paginated consultation listing
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events

mod chosen_modification_writer;
mod consultation_reader;
mod event_publisher;
mod paragraph_aggregate_loader;

pub use chosen_modification_writer::{ChosenModificationChange, ChosenModificationWriter};
pub use consultation_reader::{ConsultationPage, ConsultationQuery, ConsultationReader};
pub use event_publisher::EventPublisher;
pub use paragraph_aggregate_loader::ParagraphAggregateLoader;
