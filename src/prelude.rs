//! Everything a front end needs to drive the engine.

pub use crate::config::FormConfig;
pub use crate::core::{EntitySchema, FieldDescriptor, FieldKind, FormError, Result};
pub use crate::form::{
    Control, Direction, FieldEdit, FormEngine, Notice, NoticeKind, SubmitOutcome, TableView,
    ViewMode, control_for,
};
pub use crate::schema::{SchemaRegistry, sample_registry};
pub use crate::storage::{Record, RecordId, Values};
