use crate::core::{EntitySchema, FieldDescriptor, FieldKind, FormError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

lazy_static! {
    static ref FIELD_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Immutable set of entity schemas, in registration order.
///
/// Built once at startup and then only read. Cloning shares the same
/// underlying schemas.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Arc<Vec<EntitySchema>>,
    index: Arc<HashMap<String, usize>>,
}

impl SchemaRegistry {
    /// Validate and register `schemas`. Order is kept for `list_types`.
    pub fn new(schemas: Vec<EntitySchema>) -> Result<Self> {
        let mut index = HashMap::with_capacity(schemas.len());

        for (pos, schema) in schemas.iter().enumerate() {
            validate_schema(schema)?;
            if index.insert(schema.type_name.clone(), pos).is_some() {
                return Err(FormError::DuplicateType(schema.type_name.clone()));
            }
        }

        Ok(Self {
            schemas: Arc::new(schemas),
            index: Arc::new(index),
        })
    }

    pub fn describe(&self, type_name: &str) -> Result<&EntitySchema> {
        self.index
            .get(type_name)
            .map(|&pos| &self.schemas[pos])
            .ok_or_else(|| FormError::UnknownType(type_name.to_string()))
    }

    /// Fields of `type_name`; an unknown type has no fields
    pub fn fields_of(&self, type_name: &str) -> &[FieldDescriptor] {
        self.describe(type_name)
            .map(|schema| schema.fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn list_types(&self) -> Vec<&str> {
        self.schemas.iter().map(|s| s.type_name.as_str()).collect()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.index.contains_key(type_name)
    }

    pub fn schemas(&self) -> &[EntitySchema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn validate_schema(schema: &EntitySchema) -> Result<()> {
    if schema.type_name.trim().is_empty() {
        return Err(FormError::InvalidSchema(
            "type name cannot be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for field in &schema.fields {
        if !FIELD_NAME.is_match(&field.name) {
            return Err(FormError::InvalidSchema(format!(
                "field '{}' in '{}' is not a valid identifier",
                field.name, schema.type_name
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(FormError::InvalidSchema(format!(
                "field '{}' declared twice in '{}'",
                field.name, schema.type_name
            )));
        }
        if let FieldKind::SingleChoice { options } = &field.kind
            && options.is_empty()
        {
            return Err(FormError::InvalidSchema(format!(
                "choice field '{}' in '{}' has no options",
                field.name, schema.type_name
            )));
        }
    }

    Ok(())
}
