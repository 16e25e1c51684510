use crate::storage::RecordId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Form type '{0}' is not registered")]
    UnknownType(String),

    #[error("No form type selected")]
    NoActiveType,

    #[error("The form is not open; add or edit a record first")]
    NotEditing,

    /// Reported to the user as one message; `missing` is kept for logs and callers.
    #[error("Please fill out all required fields.")]
    ValidationFailed { missing: Vec<String> },

    #[error("Field '{field}' is not part of '{type_name}'")]
    UnknownField { type_name: String, field: String },

    #[error("Record {id} of '{type_name}' no longer exists")]
    StaleEditTarget { type_name: String, id: RecordId },

    #[error("Record {id} not found in '{type_name}'")]
    RecordNotFound { type_name: String, id: RecordId },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Form type '{0}' is registered twice")]
    DuplicateType(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl FormError {
    /// Validation and stale-target failures leave the engine usable and are shown inline.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownType(_)
                | Self::UnknownField { .. }
                | Self::NoActiveType
                | Self::NotEditing
                | Self::ValidationFailed { .. }
                | Self::StaleEditTarget { .. }
                | Self::RecordNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
