//! Paragraph modification resolution aggregate.
//!
//! A request-scoped projection of every modification proposed for one
//! paragraph, partitioned from the viewing statement's point of view. The
//! loader classifies the modifications once; when a new modification is
//! accepted the aggregate moves values between partitions in place so the
//! view can be rendered again without reloading from storage.
//!
//! # Ownership
//!
//! The aggregate is never the system of record. The command handler reads
//! the post-mutation state back and persists the decision itself.

use std::collections::HashMap;

use crate::domain::foundation::{ModificationId, StateMachine};
use crate::domain::legal_text::{FreeText, Paragraph};
use crate::domain::modification::{
    newest_first, ChosenModification, Modification, ModificationStatement, ModificationStatus,
};
use serde::{Deserialize, Serialize};

use super::errors::InvariantViolation;

/// Modification partitions for one paragraph.
///
/// # Invariants
///
/// - every modification sits in exactly one of open, refused, foreign, chosen
/// - `open` is sorted by `created_at` descending after every mutation
/// - the chosen modification is absent from open, refused and foreign
///
/// The constructor trusts the loader on the first and third point;
/// `check_invariants` verifies them on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphAggregate {
    paragraph: Paragraph,
    free_text_before: Vec<FreeText>,
    free_text_after: Vec<FreeText>,
    open: Vec<Modification>,
    refused: Vec<Modification>,
    foreign: Vec<Modification>,
    chosen: Option<ChosenModification>,
    /// Statements that chose the same modification as `chosen`.
    peers: Vec<ModificationStatement>,
}

impl ParagraphAggregate {
    /// Builds the aggregate from pre-partitioned inputs.
    ///
    /// No modification identity may appear in more than one list; this is not
    /// checked. The order of `open` is the loader's responsibility until the
    /// first mutation.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        paragraph: Paragraph,
        free_text_before: Vec<FreeText>,
        free_text_after: Vec<FreeText>,
        open: Vec<Modification>,
        refused: Vec<Modification>,
        foreign: Vec<Modification>,
        chosen: Option<ChosenModification>,
        peers: Vec<ModificationStatement>,
    ) -> Self {
        Self {
            paragraph,
            free_text_before,
            free_text_after,
            open,
            refused,
            foreign,
            chosen,
            peers,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn paragraph(&self) -> &Paragraph {
        &self.paragraph
    }

    pub fn free_text_before(&self) -> &[FreeText] {
        &self.free_text_before
    }

    pub fn free_text_after(&self) -> &[FreeText] {
        &self.free_text_after
    }

    /// Modifications awaiting a decision, newest first.
    pub fn open_modifications(&self) -> &[Modification] {
        &self.open
    }

    pub fn refused_modifications(&self) -> &[Modification] {
        &self.refused
    }

    pub fn foreign_modifications(&self) -> &[Modification] {
        &self.foreign
    }

    pub fn chosen_modification(&self) -> Option<&ChosenModification> {
        self.chosen.as_ref()
    }

    pub fn peers(&self) -> &[ModificationStatement] {
        &self.peers
    }

    /// Every pooled modification: `open ++ refused ++ foreign`.
    ///
    /// The chosen modification is not included.
    pub fn all_modifications(&self) -> Vec<&Modification> {
        self.open
            .iter()
            .chain(self.refused.iter())
            .chain(self.foreign.iter())
            .collect()
    }

    /// Returns the partition `id` currently sits in, if any.
    pub fn status_of(&self, id: &ModificationId) -> Option<ModificationStatus> {
        if self
            .chosen
            .as_ref()
            .is_some_and(|chosen| chosen.modification().id() == id)
        {
            return Some(ModificationStatus::Chosen);
        }
        self.pool_status_of(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the accepted modification in place.
    ///
    /// - `chosen` is set to `new_chosen`, or cleared when it is `None`.
    /// - The new chosen modification is removed from open, refused and
    ///   foreign (first match per list). A missing target is a no-op.
    /// - `old_modification`, the displaced choice, is appended to open no
    ///   matter where it originally came from.
    /// - Open is re-sorted newest first, ties by id ascending.
    ///
    /// The call is not idempotent: repeating it appends `old_modification`
    /// again. Duplicates of one id inside a single list lose one occurrence
    /// per call.
    pub fn change_chosen_modification(
        &mut self,
        new_chosen: Option<ChosenModification>,
        old_modification: Option<Modification>,
    ) {
        if let Some(chosen) = &new_chosen {
            let id = chosen.modification().id();
            let removed_open = remove_first(&mut self.open, id);
            let removed_refused = remove_first(&mut self.refused, id);
            let removed_foreign = remove_first(&mut self.foreign, id);
            if !(removed_open || removed_refused || removed_foreign) {
                tracing::debug!(
                    paragraph_id = %self.paragraph.id(),
                    modification_id = %id,
                    "chosen modification was not pooled"
                );
            }
        }
        self.chosen = new_chosen;

        if let Some(old) = old_modification {
            self.open.push(old);
        }

        self.open.sort_by(newest_first);
    }

    /// Validating variant of [`change_chosen_modification`](Self::change_chosen_modification).
    ///
    /// Checks the partition invariants, then walks both sides of the change
    /// through [`ModificationStatus`] transitions: the new chosen modification
    /// must be pooled (open, refused or foreign to chosen) and
    /// `old_modification` must be the current choice (chosen to open). The
    /// resulting state is verified before it is committed. On error the
    /// aggregate is left untouched.
    pub fn try_change_chosen_modification(
        &mut self,
        new_chosen: Option<ChosenModification>,
        old_modification: Option<Modification>,
    ) -> Result<(), InvariantViolation> {
        self.check_invariants()?;

        if let Some(chosen) = &new_chosen {
            let id = *chosen.modification().id();
            let from = self
                .pool_status_of(&id)
                .ok_or(InvariantViolation::MissingTarget { id })?;
            self.check_transition(id, Some(from), ModificationStatus::Chosen)?;
        }
        if let Some(old) = &old_modification {
            let id = *old.id();
            self.check_transition(id, self.status_of(&id), ModificationStatus::Open)?;
        }

        let mut next = self.clone();
        next.change_chosen_modification(new_chosen, old_modification);
        next.check_invariants()?;

        *self = next;
        Ok(())
    }

    /// Verifies that no modification id appears twice across the partitions
    /// and that the chosen modification is not pooled.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen: HashMap<ModificationId, ModificationStatus> = HashMap::new();

        for (status, pool) in self.pools() {
            for modification in pool {
                if let Some(first) = seen.insert(*modification.id(), status) {
                    return Err(InvariantViolation::DuplicateModification {
                        id: *modification.id(),
                        first,
                        second: status,
                    });
                }
            }
        }

        if let Some(chosen) = &self.chosen {
            let id = chosen.modification().id();
            if let Some(partition) = seen.get(id) {
                return Err(InvariantViolation::ChosenStillPooled {
                    id: *id,
                    partition: *partition,
                });
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn pools(&self) -> [(ModificationStatus, &[Modification]); 3] {
        [
            (ModificationStatus::Open, self.open.as_slice()),
            (ModificationStatus::Refused, self.refused.as_slice()),
            (ModificationStatus::Foreign, self.foreign.as_slice()),
        ]
    }

    fn check_transition(
        &self,
        id: ModificationId,
        from: Option<ModificationStatus>,
        to: ModificationStatus,
    ) -> Result<(), InvariantViolation> {
        match from {
            Some(status) if status.transition_to(to).is_ok() => Ok(()),
            _ => Err(InvariantViolation::InvalidTransition { id, from, to }),
        }
    }

    fn pool_status_of(&self, id: &ModificationId) -> Option<ModificationStatus> {
        self.pools()
            .into_iter()
            .find(|(_, pool)| pool.iter().any(|m| m.id() == id))
            .map(|(status, _)| status)
    }
}

/// Removes the first modification with the given id. Later duplicates stay.
fn remove_first(list: &mut Vec<Modification>, id: &ModificationId) -> bool {
    match list.iter().position(|m| m.id() == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}
