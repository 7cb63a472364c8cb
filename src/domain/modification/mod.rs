//! Modification module.
//!
//! Proposed wordings for a paragraph, the wrapper marking one of them as
//! accepted, and the peer link recording that another statement chose it too.

#[allow(clippy::module_inception)]
mod modification;
mod status;

pub use modification::{newest_first, ChosenModification, Modification, ModificationStatement};
pub use status::ModificationStatus;
