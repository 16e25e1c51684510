use super::SchemaRegistry;
use crate::core::{EntitySchema, FormError, Result};
use std::path::Path;
use tracing::info;

/// Parse a JSON array of schemas and register them in document order
pub fn registry_from_json(json: &str) -> Result<SchemaRegistry> {
    let schemas: Vec<EntitySchema> = serde_json::from_str(json)?;
    SchemaRegistry::new(schemas)
}

pub fn registry_from_file(path: impl AsRef<Path>) -> Result<SchemaRegistry> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| FormError::Io(format!("{}: {}", path.display(), e)))?;
    let registry = registry_from_json(&json)?;
    info!(path = %path.display(), types = registry.len(), "schemas loaded");
    Ok(registry)
}
