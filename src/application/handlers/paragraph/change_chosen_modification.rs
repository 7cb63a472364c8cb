//! ChangeChosenModificationHandler - Command handler for accepting a
//! modification on a paragraph, or clearing the current choice.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, EventId, ModificationId, ParagraphId, SerializableDomainEvent, StatementId,
    Timestamp,
};
use crate::domain::modification::ChosenModification;
use crate::domain::paragraph::{ChosenModificationChanged, ParagraphAggregate, ParagraphError};
use crate::ports::{
    ChosenModificationChange, ChosenModificationWriter, EventPublisher, ParagraphAggregateLoader,
};

/// Command to change the accepted modification of a paragraph.
#[derive(Debug, Clone)]
pub struct ChangeChosenModificationCommand {
    pub paragraph_id: ParagraphId,
    /// Statement on whose behalf the decision is made.
    pub statement_id: StatementId,
    /// Modification to accept; `None` clears the current choice.
    pub modification_id: Option<ModificationId>,
}

/// Result of a chosen-modification change.
///
/// `change` and `event` are `None` when the command did not change anything.
#[derive(Debug, Clone)]
pub struct ChangeChosenModificationResult {
    pub aggregate: ParagraphAggregate,
    pub change: Option<ChosenModificationChange>,
    pub event: Option<ChosenModificationChanged>,
    pub changed: bool,
}

/// Handler for chosen-modification decisions.
pub struct ChangeChosenModificationHandler {
    loader: Arc<dyn ParagraphAggregateLoader>,
    writer: Arc<dyn ChosenModificationWriter>,
    event_publisher: Arc<dyn EventPublisher>,
    strict_invariants: bool,
}

impl ChangeChosenModificationHandler {
    pub fn new(
        loader: Arc<dyn ParagraphAggregateLoader>,
        writer: Arc<dyn ChosenModificationWriter>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            loader,
            writer,
            event_publisher,
            strict_invariants: false,
        }
    }

    /// Refuse transitions that would break the partition invariants.
    pub fn with_strict_invariants(mut self, strict: bool) -> Self {
        self.strict_invariants = strict;
        self
    }

    pub async fn handle(
        &self,
        cmd: ChangeChosenModificationCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangeChosenModificationResult, ParagraphError> {
        // 1. Load the viewer's aggregate
        let mut aggregate = self
            .loader
            .load(&cmd.paragraph_id, &cmd.statement_id)
            .await?
            .ok_or_else(|| ParagraphError::not_found(cmd.paragraph_id))?;

        // 2. Re-selecting the current choice changes nothing
        let current = aggregate
            .chosen_modification()
            .map(|chosen| *chosen.modification().id());
        if cmd.modification_id == current {
            tracing::debug!(
                paragraph_id = %cmd.paragraph_id,
                statement_id = %cmd.statement_id,
                "Chosen modification unchanged"
            );
            return Ok(ChangeChosenModificationResult {
                aggregate,
                change: None,
                event: None,
                changed: false,
            });
        }

        // 3. Resolve the target among the pooled modifications
        let target = match cmd.modification_id {
            Some(id) => Some(
                aggregate
                    .all_modifications()
                    .into_iter()
                    .find(|m| m.id() == &id)
                    .cloned()
                    .ok_or_else(|| ParagraphError::modification_not_found(id))?,
            ),
            None => None,
        };

        // 4. The displaced choice goes back to open
        let old = aggregate
            .chosen_modification()
            .cloned()
            .map(ChosenModification::into_modification);
        let vacated = old.as_ref().map(|m| *m.id());
        let new_chosen =
            target.map(|m| ChosenModification::new(cmd.statement_id, m, Timestamp::now()));

        // 5. Apply in memory
        if self.strict_invariants {
            if let Err(violation) = aggregate.try_change_chosen_modification(new_chosen, old) {
                tracing::warn!(
                    paragraph_id = %cmd.paragraph_id,
                    statement_id = %cmd.statement_id,
                    error = %violation,
                    "Refused chosen modification change"
                );
                return Err(violation.into());
            }
        } else {
            aggregate.change_chosen_modification(new_chosen, old);
        }

        // 6. Persist
        let change = ChosenModificationChange::from_aggregate(&aggregate, cmd.statement_id, vacated);
        if let Err(err) = self.writer.apply(&change).await {
            tracing::warn!(
                paragraph_id = %cmd.paragraph_id,
                statement_id = %cmd.statement_id,
                error = %err,
                "Failed to persist chosen modification change"
            );
            return Err(err.into());
        }

        // 7. Publish event
        let event = ChosenModificationChanged {
            event_id: EventId::new(),
            paragraph_id: cmd.paragraph_id,
            statement_id: cmd.statement_id,
            chosen_modification_id: change.chosen,
            vacated_modification_id: change.vacated,
            changed_at: change.decided_at,
        };

        let envelope = event
            .to_envelope()
            .map_err(|e| ParagraphError::infrastructure(e.to_string()))?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        self.event_publisher.publish(envelope).await?;

        tracing::info!(
            paragraph_id = %cmd.paragraph_id,
            statement_id = %cmd.statement_id,
            chosen = ?change.chosen,
            vacated = ?change.vacated,
            "Chosen modification changed"
        );

        Ok(ChangeChosenModificationResult {
            aggregate,
            change: Some(change),
            event: Some(event),
            changed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, LegalTextId};
    use crate::domain::legal_text::Paragraph;
    use crate::domain::modification::Modification;
    use crate::domain::paragraph::InvariantViolation;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockLoader {
        aggregate: Option<ParagraphAggregate>,
    }

    #[async_trait]
    impl ParagraphAggregateLoader for MockLoader {
        async fn load(
            &self,
            paragraph_id: &ParagraphId,
            _statement_id: &StatementId,
        ) -> Result<Option<ParagraphAggregate>, DomainError> {
            Ok(self
                .aggregate
                .clone()
                .filter(|a| a.paragraph().id() == paragraph_id))
        }
    }

    struct MockWriter {
        applied: Mutex<Vec<ChosenModificationChange>>,
        fail_apply: bool,
    }

    impl MockWriter {
        fn new() -> Self {
            Self {
                applied: Mutex::new(Vec::new()),
                fail_apply: false,
            }
        }

        fn failing() -> Self {
            Self {
                applied: Mutex::new(Vec::new()),
                fail_apply: true,
            }
        }

        fn applied(&self) -> Vec<ChosenModificationChange> {
            self.applied.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChosenModificationWriter for MockWriter {
        async fn apply(&self, change: &ChosenModificationChange) -> Result<(), DomainError> {
            if self.fail_apply {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated write failure",
                ));
            }
            self.applied.lock().unwrap().push(change.clone());
            Ok(())
        }
    }

    struct MockEventPublisher {
        published_events: Mutex<Vec<EventEnvelope>>,
    }

    impl MockEventPublisher {
        fn new() -> Self {
            Self {
                published_events: Mutex::new(Vec::new()),
            }
        }

        fn published_events(&self) -> Vec<EventEnvelope> {
            self.published_events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for MockEventPublisher {
        async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
            self.published_events.lock().unwrap().push(event);
            Ok(())
        }
    }

    struct Fixture {
        paragraph_id: ParagraphId,
        viewer: StatementId,
        m1: Modification,
        m2: Modification,
        m3: Modification,
    }

    fn modification(paragraph_id: ParagraphId, author: StatementId, secs: i64) -> Modification {
        Modification::new(
            ModificationId::new(),
            paragraph_id,
            author,
            format!("wording {}", secs),
            None,
            Timestamp::from_unix_secs(secs),
        )
        .unwrap()
    }

    fn fixture() -> Fixture {
        let paragraph_id = ParagraphId::new();
        let viewer = StatementId::new();
        Fixture {
            paragraph_id,
            viewer,
            m1: modification(paragraph_id, viewer, 10),
            m2: modification(paragraph_id, viewer, 20),
            m3: modification(paragraph_id, viewer, 30),
        }
    }

    /// open=[M3, M1], refused=[M2], nothing chosen.
    fn scenario_a(f: &Fixture) -> ParagraphAggregate {
        ParagraphAggregate::new(
            Paragraph::new(f.paragraph_id, LegalTextId::new(), 1, "Article 1".to_string()),
            vec![],
            vec![],
            vec![f.m3.clone(), f.m1.clone()],
            vec![f.m2.clone()],
            vec![],
            None,
            vec![],
        )
    }

    fn handler_with(
        aggregate: Option<ParagraphAggregate>,
        writer: Arc<MockWriter>,
        publisher: Arc<MockEventPublisher>,
    ) -> ChangeChosenModificationHandler {
        ChangeChosenModificationHandler::new(Arc::new(MockLoader { aggregate }), writer, publisher)
    }

    fn command(f: &Fixture, modification_id: Option<ModificationId>) -> ChangeChosenModificationCommand {
        ChangeChosenModificationCommand {
            paragraph_id: f.paragraph_id,
            statement_id: f.viewer,
            modification_id,
        }
    }

    #[tokio::test]
    async fn chooses_refused_modification() {
        let f = fixture();
        let writer = Arc::new(MockWriter::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler_with(Some(scenario_a(&f)), writer.clone(), publisher.clone());

        let result = handler
            .handle(command(&f, Some(*f.m2.id())), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert!(result.changed);
        assert_eq!(
            result.aggregate.chosen_modification().map(|c| c.modification()),
            Some(&f.m2)
        );
        assert_eq!(result.aggregate.open_modifications(), &[f.m3.clone(), f.m1.clone()]);
        assert!(result.aggregate.refused_modifications().is_empty());

        let applied = writer.applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].chosen, Some(*f.m2.id()));
        assert_eq!(applied[0].vacated, None);
    }

    #[tokio::test]
    async fn replacing_choice_vacates_previous_into_open() {
        let f = fixture();
        let mut aggregate = scenario_a(&f);
        aggregate.change_chosen_modification(
            Some(ChosenModification::new(f.viewer, f.m2.clone(), Timestamp::now())),
            None,
        );
        let writer = Arc::new(MockWriter::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler_with(Some(aggregate), writer.clone(), publisher.clone());

        let result = handler
            .handle(command(&f, Some(*f.m1.id())), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(
            result.aggregate.chosen_modification().map(|c| c.modification()),
            Some(&f.m1)
        );
        assert_eq!(result.aggregate.open_modifications(), &[f.m3.clone(), f.m2.clone()]);
        let change = result.change.unwrap();
        assert_eq!(change.chosen, Some(*f.m1.id()));
        assert_eq!(change.vacated, Some(*f.m2.id()));
    }

    #[tokio::test]
    async fn clearing_choice_returns_it_to_open() {
        let f = fixture();
        let mut aggregate = scenario_a(&f);
        aggregate.change_chosen_modification(
            Some(ChosenModification::new(f.viewer, f.m2.clone(), Timestamp::now())),
            None,
        );
        let writer = Arc::new(MockWriter::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler_with(Some(aggregate), writer.clone(), publisher.clone());

        let result = handler
            .handle(command(&f, None), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert!(result.aggregate.chosen_modification().is_none());
        assert_eq!(
            result.aggregate.open_modifications(),
            &[f.m3.clone(), f.m2.clone(), f.m1.clone()]
        );
        assert_eq!(writer.applied()[0].chosen, None);
        assert_eq!(writer.applied()[0].vacated, Some(*f.m2.id()));
    }

    #[tokio::test]
    async fn publishes_event_with_command_metadata() {
        let f = fixture();
        let writer = Arc::new(MockWriter::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler_with(Some(scenario_a(&f)), writer, publisher.clone());

        let result = handler
            .handle(command(&f, Some(*f.m2.id())), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let events = publisher.published_events();
        assert_eq!(events.len(), 1);
        let envelope = &events[0];
        assert_eq!(envelope.event_type, "paragraph.chosen_modification_changed.v1");
        assert_eq!(envelope.aggregate_id, f.paragraph_id.to_string());
        assert_eq!(
            envelope.metadata.correlation_id.as_deref(),
            Some("test-correlation-id")
        );
        assert_eq!(envelope.metadata.user_id.as_deref(), Some("moderator-1"));
        assert_eq!(
            envelope.payload_as::<ChosenModificationChanged>().unwrap(),
            result.event.unwrap()
        );
    }

    #[tokio::test]
    async fn reselecting_current_choice_is_noop() {
        let f = fixture();
        let mut aggregate = scenario_a(&f);
        aggregate.change_chosen_modification(
            Some(ChosenModification::new(f.viewer, f.m2.clone(), Timestamp::now())),
            None,
        );
        let writer = Arc::new(MockWriter::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler_with(Some(aggregate), writer.clone(), publisher.clone());

        let result = handler
            .handle(command(&f, Some(*f.m2.id())), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert!(!result.changed);
        assert!(result.change.is_none());
        assert!(writer.applied().is_empty());
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn clearing_without_choice_is_noop() {
        let f = fixture();
        let writer = Arc::new(MockWriter::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler_with(Some(scenario_a(&f)), writer.clone(), publisher.clone());

        let result = handler
            .handle(command(&f, None), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert!(!result.changed);
        assert!(writer.applied().is_empty());
    }

    #[tokio::test]
    async fn fails_when_paragraph_missing() {
        let f = fixture();
        let handler = handler_with(
            None,
            Arc::new(MockWriter::new()),
            Arc::new(MockEventPublisher::new()),
        );

        let result = handler
            .handle(command(&f, Some(*f.m1.id())), CommandMetadata::test_fixture())
            .await;

        assert_eq!(result.unwrap_err(), ParagraphError::NotFound(f.paragraph_id));
    }

    #[tokio::test]
    async fn fails_when_modification_not_pooled() {
        let f = fixture();
        let writer = Arc::new(MockWriter::new());
        let handler = handler_with(
            Some(scenario_a(&f)),
            writer.clone(),
            Arc::new(MockEventPublisher::new()),
        );
        let unknown = ModificationId::new();

        let result = handler
            .handle(command(&f, Some(unknown)), CommandMetadata::test_fixture())
            .await;

        assert_eq!(result.unwrap_err(), ParagraphError::ModificationNotFound(unknown));
        assert!(writer.applied().is_empty());
    }

    #[tokio::test]
    async fn writer_failure_publishes_nothing() {
        let f = fixture();
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler_with(
            Some(scenario_a(&f)),
            Arc::new(MockWriter::failing()),
            publisher.clone(),
        );

        let result = handler
            .handle(command(&f, Some(*f.m2.id())), CommandMetadata::test_fixture())
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(matches!(err, ParagraphError::Infrastructure(_)));
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn strict_mode_refuses_overlapping_partitions() {
        let f = fixture();
        // M1 is both open and refused.
        let aggregate = ParagraphAggregate::new(
            Paragraph::new(f.paragraph_id, LegalTextId::new(), 1, "Article 1".to_string()),
            vec![],
            vec![],
            vec![f.m1.clone()],
            vec![f.m1.clone(), f.m2.clone()],
            vec![],
            None,
            vec![],
        );
        let writer = Arc::new(MockWriter::new());
        let handler = handler_with(
            Some(aggregate.clone()),
            writer.clone(),
            Arc::new(MockEventPublisher::new()),
        )
        .with_strict_invariants(true);

        let result = handler
            .handle(command(&f, Some(*f.m2.id())), CommandMetadata::test_fixture())
            .await;

        assert!(matches!(
            result,
            Err(ParagraphError::InvariantViolation(
                InvariantViolation::DuplicateModification { .. }
            ))
        ));
        assert!(writer.applied().is_empty());

        // The permissive path degrades silently on the same input.
        let lenient = handler_with(
            Some(aggregate),
            Arc::new(MockWriter::new()),
            Arc::new(MockEventPublisher::new()),
        );
        let result = lenient
            .handle(command(&f, Some(*f.m2.id())), CommandMetadata::test_fixture())
            .await
            .unwrap();
        assert!(result.changed);
    }
}
