pub mod memory;
pub mod record;

pub use memory::RecordStore;
pub use record::{Record, RecordId, Values, values};
