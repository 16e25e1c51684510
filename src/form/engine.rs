use super::controller::{self, SubmitOutcome};
use super::draft::DraftState;
use super::notice::{Notice, NoticeBoard, NoticeKind};
use super::renderer::FieldEdit;
use super::table::{self, TableView};
use super::view::{ViewEvent, ViewMode};
use crate::config::FormConfig;
use crate::core::{FieldDescriptor, FormError, Result};
use crate::schema::{SchemaRegistry, registry_from_file, sample_registry};
use crate::storage::{Record, RecordId, RecordStore};
use tracing::{info, warn};

pub const STALE_TARGET_MESSAGE: &str =
    "This record no longer exists. Submit again to save it as a new record.";

/// Whole application state: schemas, records, the draft, the view mode and
/// the notice line. Every mutation goes through one of the named
/// transitions below.
#[derive(Debug)]
pub struct FormEngine {
    registry: SchemaRegistry,
    store: RecordStore,
    draft: DraftState,
    mode: ViewMode,
    notices: NoticeBoard,
    pending_ack: Option<String>,
}

impl FormEngine {
    pub fn new(registry: SchemaRegistry, config: &FormConfig) -> Self {
        Self {
            registry,
            store: RecordStore::new(),
            draft: DraftState::new(),
            mode: ViewMode::default(),
            notices: NoticeBoard::new(config.notice_ttl),
            pending_ack: None,
        }
    }

    /// Build from config, loading the schema file or falling back to the samples
    pub fn from_config(config: &FormConfig) -> Result<Self> {
        config.validate()?;
        let registry = match &config.schema_file {
            Some(path) => registry_from_file(path)?,
            None => sample_registry()?,
        };
        Ok(Self::new(registry, config))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notices.current()
    }

    /// Confirmation text that must be acknowledged before the notice timer starts
    pub fn pending_acknowledgement(&self) -> Option<&str> {
        self.pending_ack.as_deref()
    }

    pub fn list_types(&self) -> Vec<&str> {
        self.registry.list_types()
    }

    /// Fields of the selected type; empty when none or unknown
    pub fn active_fields(&self) -> &[FieldDescriptor] {
        self.draft
            .active_type()
            .map(|t| self.registry.fields_of(t))
            .unwrap_or(&[])
    }

    pub fn submit_label(&self) -> &'static str {
        if self.draft.is_editing() {
            "Update"
        } else {
            "Submit"
        }
    }

    pub fn tables(&self) -> Vec<TableView> {
        table::tables(&self.registry, &self.store)
    }

    /// An edit target, if any, still exists in the store
    pub fn edit_target_is_live(&self) -> bool {
        match (self.draft.active_type(), self.draft.editing_id()) {
            (Some(type_name), Some(id)) => self.store.contains(type_name, id),
            (_, None) => true,
            (None, Some(_)) => false,
        }
    }

    /// Choose the form type. Unknown types select an empty field list.
    pub fn select(&mut self, type_name: &str) {
        if !self.registry.contains(type_name) {
            warn!(type_name, "selected unregistered form type");
        }
        self.draft.select(type_name);
        self.restart_notice_timer();
    }

    pub fn apply_edit(&mut self, edit: FieldEdit) -> Result<()> {
        let type_name = self.draft.active_type().ok_or(FormError::NoActiveType)?;
        if !self.active_fields().iter().any(|f| f.name == edit.field) {
            return Err(FormError::UnknownField {
                type_name: type_name.to_string(),
                field: edit.field,
            });
        }
        self.draft.apply_edit(edit);
        Ok(())
    }

    /// Validate the draft and commit it.
    ///
    /// Failures keep the draft and the view as they are and post an error notice.
    /// Only the form accepts a submit; while browsing nothing is committed.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.mode != ViewMode::Editing {
            warn!(mode = %self.mode, "submit outside the form ignored");
            return Err(FormError::NotEditing);
        }

        let result = controller::submit(
            &self.registry,
            &mut self.store,
            self.draft.active_type(),
            self.draft.values(),
            self.draft.editing_id(),
        );

        match &result {
            Ok(outcome @ SubmitOutcome::Created(_)) => {
                self.finish_submit();
                self.notices.post_transient(Notice::success(outcome.message()));
            }
            Ok(outcome @ SubmitOutcome::Updated(_)) => {
                self.finish_submit();
                self.notices.post(Notice::success(outcome.message()));
                self.pending_ack = Some(outcome.message().to_string());
            }
            Err(FormError::StaleEditTarget { type_name, id }) => {
                warn!(type_name = %type_name, %id, "update target vanished, draft detached");
                self.draft.detach();
                self.notices.post(Notice::error(STALE_TARGET_MESSAGE));
            }
            Err(err) => self.notices.post(Notice::error(err.to_string())),
        }

        result
    }

    fn finish_submit(&mut self) {
        self.draft.reset();
        self.mode.transition(ViewEvent::Submitted);
    }

    /// Dismiss the update confirmation and start the notice timer.
    /// Returns false when nothing was waiting.
    pub fn acknowledge(&mut self) -> bool {
        if self.pending_ack.take().is_some() {
            self.notices.schedule_clear();
            true
        } else {
            false
        }
    }

    /// "Add Information": back to the form with no leftover notice
    pub fn add_new(&mut self) {
        self.pending_ack = None;
        self.notices.clear();
        self.mode.transition(ViewEvent::AddNew);
    }

    /// Load a stored record into the draft and switch to the form
    pub fn edit_record(&mut self, type_name: &str, id: RecordId) -> Result<()> {
        let record = self
            .store
            .get(type_name, id)
            .cloned()
            .ok_or_else(|| FormError::RecordNotFound {
                type_name: type_name.to_string(),
                id,
            })?;

        self.draft.select(type_name);
        self.draft.load_for_edit(&record);
        self.mode.transition(ViewEvent::EditRow);
        info!(type_name, %id, "editing record");
        Ok(())
    }

    /// Remove a record. The view stays where it is.
    pub fn delete_record(&mut self, type_name: &str, id: RecordId) -> Result<Record> {
        let removed = self.store.delete(type_name, id)?;
        self.mode.transition(ViewEvent::DeleteRow);
        Ok(removed)
    }

    /// Leave the form for the tables, discarding the draft
    pub fn cancel(&mut self) {
        self.draft.reset();
        self.mode.transition(ViewEvent::Cancel);
    }

    /// Error notices stay until replaced; only a showing success notice restarts
    fn restart_notice_timer(&mut self) {
        let showing_success = self
            .notices
            .current()
            .is_some_and(|n| n.kind == NoticeKind::Success);
        if showing_success && self.pending_ack.is_none() {
            self.notices.schedule_clear();
        }
    }
}
