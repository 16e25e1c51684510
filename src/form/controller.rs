//! Validation and submission: checks required fields and commits the draft
//! to the record store as a create or an in-place update.

use crate::core::{EntitySchema, FormError, Result};
use crate::schema::SchemaRegistry;
use crate::storage::{RecordId, RecordStore, Values};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(RecordId),
    Updated(RecordId),
}

impl SubmitOutcome {
    pub fn id(self) -> RecordId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Created(_) => "Form submitted successfully!",
            Self::Updated(_) => "Form updated successfully!",
        }
    }
}

/// Every required field must be present and non-empty
pub fn validate(schema: &EntitySchema, values: &Values) -> Result<()> {
    let missing: Vec<String> = schema
        .required_fields()
        .filter(|f| values.get(&f.name).is_none_or(|v| v.is_empty()))
        .map(|f| f.name.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::ValidationFailed { missing })
    }
}

/// Validate `values` against `active_type` and commit them.
///
/// On any error the store is left as it was.
pub fn submit(
    registry: &SchemaRegistry,
    store: &mut RecordStore,
    active_type: Option<&str>,
    values: &Values,
    editing_id: Option<RecordId>,
) -> Result<SubmitOutcome> {
    let type_name = active_type.ok_or(FormError::NoActiveType)?;
    let schema = registry.describe(type_name)?;

    if let Err(err) = validate(schema, values) {
        if let FormError::ValidationFailed { missing } = &err {
            warn!(type_name, ?missing, "submit rejected");
        }
        return Err(err);
    }

    match editing_id {
        None => Ok(SubmitOutcome::Created(store.create(type_name, values.clone()))),
        Some(id) => {
            store.update(type_name, id, values.clone())?;
            Ok(SubmitOutcome::Updated(id))
        }
    }
}
