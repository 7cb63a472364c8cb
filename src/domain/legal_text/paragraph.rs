//! Paragraph entity.
//!
//! Paragraphs belong to a legal text aggregate that lives outside this crate;
//! here they are read-only values the resolution aggregate is built around.

use crate::domain::foundation::{LegalTextId, ParagraphId};
use serde::{Deserialize, Serialize};

/// Addressable unit of a legal text subject to proposed amendment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    id: ParagraphId,
    legal_text_id: LegalTextId,
    /// Zero-based position within the owning legal text.
    position: u32,
    text: String,
}

impl Paragraph {
    pub fn new(id: ParagraphId, legal_text_id: LegalTextId, position: u32, text: String) -> Self {
        Self {
            id,
            legal_text_id,
            position,
            text,
        }
    }

    pub fn id(&self) -> &ParagraphId {
        &self.id
    }

    pub fn legal_text_id(&self) -> &LegalTextId {
        &self.legal_text_id
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
