//! Consultation Platform - paragraph modification resolution
//!
//! Statements propose modifications to the paragraphs of a legal text; this
//! crate partitions those modifications per viewing statement and performs
//! the transition when the accepted modification of a paragraph changes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
