pub mod controller;
pub mod draft;
pub mod engine;
pub mod notice;
pub mod renderer;
pub mod table;
pub mod view;

pub use controller::{SubmitOutcome, submit, validate};
pub use draft::DraftState;
pub use engine::FormEngine;
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use renderer::{Control, Direction, FieldEdit, InputFilter, control_for};
pub use table::{TableRow, TableView};
pub use view::{ViewEvent, ViewMode};
