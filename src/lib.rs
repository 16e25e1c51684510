// ============================================================================
// formdeck Library
// ============================================================================

pub mod config;
pub mod core;
pub mod form;
pub mod prelude;
pub mod schema;
pub mod storage;

// Re-export main types for convenience
pub use config::FormConfig;
pub use crate::core::{EntitySchema, FieldDescriptor, FieldKind, FormError, Result};
pub use form::{FieldEdit, FormEngine, SubmitOutcome, ViewMode};
pub use schema::SchemaRegistry;
pub use storage::{Record, RecordId, RecordStore, Values};
