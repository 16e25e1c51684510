use super::renderer::FieldEdit;
use crate::storage::{Record, RecordId, Values};
use tracing::debug;

/// In-progress values for the selected form type.
///
/// `editing_id == None` means the next submit creates a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    active_type: Option<String>,
    values: Values,
    editing_id: Option<RecordId>,
}

impl DraftState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch form type, dropping everything entered so far
    pub fn select(&mut self, type_name: impl Into<String>) {
        self.active_type = Some(type_name.into());
        self.values.clear();
        self.editing_id = None;
    }

    /// Last write wins per field
    pub fn apply_edit(&mut self, edit: FieldEdit) {
        debug!(field = %edit.field, "draft edit");
        self.values.insert(edit.field, edit.value);
    }

    /// Stage a copy of `record` for update. The caller selects its type first.
    pub fn load_for_edit(&mut self, record: &Record) {
        self.values = record.values.clone();
        self.editing_id = Some(record.id);
    }

    /// Clear values and edit target, keep the selected type
    pub fn reset(&mut self) {
        self.values.clear();
        self.editing_id = None;
    }

    /// Stop targeting a record while keeping the entered values
    pub(crate) fn detach(&mut self) {
        self.editing_id = None;
    }

    pub fn active_type(&self) -> Option<&str> {
        self.active_type.as_deref()
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn editing_id(&self) -> Option<RecordId> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::values;

    #[test]
    fn test_select_clears_values_and_target() {
        let mut draft = DraftState::new();
        draft.select("User");
        draft.apply_edit(FieldEdit::new("firstName", "Ann"));
        draft.load_for_edit(&Record::new(RecordId(3), values([("firstName", "Bo")])));

        draft.select("Address");
        assert_eq!(draft.active_type(), Some("Address"));
        assert!(draft.values().is_empty());
        assert_eq!(draft.editing_id(), None);
    }

    #[test]
    fn test_apply_edit_last_write_wins() {
        let mut draft = DraftState::new();
        draft.select("User");
        draft.apply_edit(FieldEdit::new("firstName", "Ann"));
        draft.apply_edit(FieldEdit::new("lastName", "Lee"));
        draft.apply_edit(FieldEdit::new("firstName", "Anna"));

        assert_eq!(draft.value("firstName"), Some("Anna"));
        assert_eq!(draft.value("lastName"), Some("Lee"));
        assert_eq!(draft.values().len(), 2);
    }

    #[test]
    fn test_load_for_edit_copies_record() {
        let record = Record::new(RecordId(7), values([("firstName", "Ann"), ("lastName", "Lee")]));
        let mut draft = DraftState::new();
        draft.select("User");
        draft.load_for_edit(&record);

        assert_eq!(draft.values(), &record.values);
        assert_eq!(draft.editing_id(), Some(RecordId(7)));
        assert!(draft.is_editing());
    }

    #[test]
    fn test_reset_keeps_type() {
        let mut draft = DraftState::new();
        draft.select("User");
        draft.apply_edit(FieldEdit::new("firstName", "Ann"));
        draft.reset();

        assert_eq!(draft.active_type(), Some("User"));
        assert!(draft.values().is_empty());
    }
}
