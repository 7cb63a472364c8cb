//! Paragraph command and query handlers.

mod change_chosen_modification;
mod get_paragraph;

pub use change_chosen_modification::{
    ChangeChosenModificationCommand, ChangeChosenModificationHandler,
    ChangeChosenModificationResult,
};
pub use get_paragraph::{GetParagraphHandler, GetParagraphQuery};
