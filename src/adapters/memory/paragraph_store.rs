//! In-memory paragraph store.
//!
//! Holds paragraphs, free texts, modifications, refusals and per-statement
//! choices, and classifies modifications into the aggregate's partitions on
//! every load.
//!
//! # Security Note
//!
//! This adapter is for **testing and development only**. It uses `.expect()`
//! on lock operations which will panic if locks are poisoned.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, ModificationId, ModificationStatementId, ParagraphId, StatementId,
    Timestamp,
};
use crate::domain::legal_text::{FreeText, FreeTextPlacement, Paragraph};
use crate::domain::modification::{
    newest_first, ChosenModification, Modification, ModificationStatement,
};
use crate::domain::paragraph::ParagraphAggregate;
use crate::ports::{ChosenModificationChange, ChosenModificationWriter, ParagraphAggregateLoader};

#[derive(Default)]
struct StoreState {
    paragraphs: HashMap<ParagraphId, Paragraph>,
    free_texts: Vec<FreeText>,
    /// Insertion order; all paragraphs.
    modifications: Vec<Modification>,
    refusals: HashSet<(StatementId, ModificationId)>,
    choices: HashMap<(StatementId, ParagraphId), ModificationStatement>,
}

impl StoreState {
    fn modification(&self, paragraph_id: &ParagraphId, id: &ModificationId) -> Option<&Modification> {
        self.modifications
            .iter()
            .find(|m| m.id() == id && m.paragraph_id() == paragraph_id)
    }
}

/// In-memory implementation of the paragraph loader and decision writer.
///
/// Classification for a viewing statement:
/// - chosen: the statement's current choice for the paragraph
/// - refused: refused by the statement
/// - open: authored by the statement, newest first
/// - foreign: authored by any other statement
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned.
pub struct InMemoryParagraphStore {
    state: RwLock<StoreState>,
}

impl InMemoryParagraphStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    // === Seeding ===

    pub fn insert_paragraph(&self, paragraph: Paragraph) {
        self.write().paragraphs.insert(*paragraph.id(), paragraph);
    }

    pub fn insert_free_text(&self, free_text: FreeText) {
        self.write().free_texts.push(free_text);
    }

    pub fn insert_modification(&self, modification: Modification) {
        self.write().modifications.push(modification);
    }

    /// Marks `modification_id` as refused by `statement_id`.
    pub fn refuse(&self, statement_id: StatementId, modification_id: ModificationId) {
        self.write().refusals.insert((statement_id, modification_id));
    }

    /// Records a choice directly, bypassing the decision workflow.
    pub fn choose(
        &self,
        statement_id: StatementId,
        paragraph_id: ParagraphId,
        modification_id: ModificationId,
        chosen_at: Timestamp,
    ) {
        let link = ModificationStatement::new(
            ModificationStatementId::new(),
            statement_id,
            modification_id,
            chosen_at,
        );
        self.write().choices.insert((statement_id, paragraph_id), link);
    }

    // === Test Helpers ===

    /// Returns the modification `statement_id` currently accepts for the paragraph.
    pub fn chosen_for(
        &self,
        statement_id: &StatementId,
        paragraph_id: &ParagraphId,
    ) -> Option<ModificationId> {
        self.read()
            .choices
            .get(&(*statement_id, *paragraph_id))
            .map(|link| *link.modification_id())
    }

    pub fn is_refused(&self, statement_id: &StatementId, modification_id: &ModificationId) -> bool {
        self.read()
            .refusals
            .contains(&(*statement_id, *modification_id))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state
            .read()
            .expect("InMemoryParagraphStore: state lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.state
            .write()
            .expect("InMemoryParagraphStore: state write lock poisoned")
    }

    fn classify(
        state: &StoreState,
        paragraph: &Paragraph,
        statement_id: &StatementId,
    ) -> ParagraphAggregate {
        let paragraph_id = paragraph.id();

        let choice = state.choices.get(&(*statement_id, *paragraph_id));
        let chosen = choice.and_then(|link| {
            state
                .modification(paragraph_id, link.modification_id())
                .map(|m| ChosenModification::new(*statement_id, m.clone(), *link.chosen_at()))
        });
        let chosen_id = chosen.as_ref().map(|c| *c.modification().id());

        let mut open = Vec::new();
        let mut refused = Vec::new();
        let mut foreign = Vec::new();
        for modification in state
            .modifications
            .iter()
            .filter(|m| m.paragraph_id() == paragraph_id)
            .filter(|m| Some(*m.id()) != chosen_id)
        {
            if state.refusals.contains(&(*statement_id, *modification.id())) {
                refused.push(modification.clone());
            } else if modification.statement_id() == statement_id {
                open.push(modification.clone());
            } else {
                foreign.push(modification.clone());
            }
        }
        open.sort_by(newest_first);

        let free_texts = |placement: FreeTextPlacement| -> Vec<FreeText> {
            state
                .free_texts
                .iter()
                .filter(|f| f.paragraph_id() == paragraph_id)
                .filter(|f| f.statement_id() == statement_id)
                .filter(|f| f.placement() == placement)
                .cloned()
                .collect()
        };

        let peers = match chosen_id {
            Some(chosen_id) => state
                .choices
                .iter()
                .filter(|((statement, paragraph), link)| {
                    paragraph == paragraph_id
                        && statement != statement_id
                        && *link.modification_id() == chosen_id
                })
                .map(|(_, link)| link.clone())
                .collect(),
            None => Vec::new(),
        };

        ParagraphAggregate::new(
            paragraph.clone(),
            free_texts(FreeTextPlacement::Before),
            free_texts(FreeTextPlacement::After),
            open,
            refused,
            foreign,
            chosen,
            peers,
        )
    }
}

impl Default for InMemoryParagraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParagraphAggregateLoader for InMemoryParagraphStore {
    async fn load(
        &self,
        paragraph_id: &ParagraphId,
        statement_id: &StatementId,
    ) -> Result<Option<ParagraphAggregate>, DomainError> {
        let state = self.read();
        let aggregate = state
            .paragraphs
            .get(paragraph_id)
            .map(|paragraph| Self::classify(&state, paragraph, statement_id));

        tracing::debug!(
            paragraph_id = %paragraph_id,
            statement_id = %statement_id,
            found = aggregate.is_some(),
            "Loaded paragraph aggregate"
        );
        Ok(aggregate)
    }
}

#[async_trait]
impl ChosenModificationWriter for InMemoryParagraphStore {
    async fn apply(&self, change: &ChosenModificationChange) -> Result<(), DomainError> {
        let mut state = self.write();

        if !state.paragraphs.contains_key(&change.paragraph_id) {
            return Err(DomainError::new(
                ErrorCode::ParagraphNotFound,
                format!("Paragraph not found: {}", change.paragraph_id),
            )
            .with_detail("paragraph_id", change.paragraph_id.to_string()));
        }

        let key = (change.statement_id, change.paragraph_id);
        match change.chosen {
            Some(modification_id) => {
                if state
                    .modification(&change.paragraph_id, &modification_id)
                    .is_none()
                {
                    return Err(DomainError::new(
                        ErrorCode::ModificationNotFound,
                        format!("Modification not found: {}", modification_id),
                    )
                    .with_detail("paragraph_id", change.paragraph_id.to_string())
                    .with_detail("modification_id", modification_id.to_string()));
                }
                // An accepted wording is no longer refused by the same statement.
                state.refusals.remove(&(change.statement_id, modification_id));
                let link = ModificationStatement::new(
                    ModificationStatementId::new(),
                    change.statement_id,
                    modification_id,
                    change.decided_at,
                );
                state.choices.insert(key, link);
            }
            None => {
                state.choices.remove(&key);
            }
        }

        tracing::debug!(
            paragraph_id = %change.paragraph_id,
            statement_id = %change.statement_id,
            chosen = ?change.chosen,
            vacated = ?change.vacated,
            "Applied chosen modification change"
        );
        Ok(())
    }
}
