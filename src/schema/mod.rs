pub mod loader;
pub mod registry;
pub mod samples;

pub use loader::{registry_from_file, registry_from_json};
pub use registry::SchemaRegistry;
pub use samples::{sample_registry, sample_schemas};
