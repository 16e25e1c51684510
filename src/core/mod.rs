pub mod error;
pub mod types;

pub use error::{FormError, Result};
pub use types::{EntitySchema, FieldDescriptor, FieldKind};
