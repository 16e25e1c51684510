//! Field renderer: maps a field descriptor and its current draft value to an
//! input control, and turns user input into `FieldEdit` events.
//!
//! Nothing here touches the draft. Callers apply the emitted edits.

use crate::core::{FieldDescriptor, FieldKind};

/// Label of the unselected entry shown before a concrete option is picked.
pub const UNSELECTED: &str = "-- Select --";

/// One user change to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub field: String,
    pub value: String,
}

impl FieldEdit {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Which keystrokes a free-form input accepts. The stored value stays an opaque string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFilter {
    Any,
    Numeric,
    Date,
}

impl InputFilter {
    /// Whether `c` may be typed at char position `at` of the current input
    pub fn accepts(self, c: char, at: usize) -> bool {
        match self {
            Self::Any => !c.is_control(),
            Self::Numeric => c.is_ascii_digit() || c == '.' || (c == '-' && at == 0),
            Self::Date => c.is_ascii_digit() || c == '-',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Render-ready description of the input for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control<'a> {
    Input {
        placeholder: &'a str,
        value: &'a str,
        masked: bool,
        filter: InputFilter,
    },
    /// `selected` is `None` while the sentinel is showing.
    Choice {
        options: &'a [String],
        selected: Option<usize>,
    },
}

impl Control<'_> {
    /// Text to show for the current value, masked for secrets
    pub fn display(&self) -> String {
        match self {
            Control::Input { value, masked, .. } => {
                if *masked {
                    mask(value)
                } else {
                    (*value).to_string()
                }
            }
            Control::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map_or_else(|| UNSELECTED.to_string(), Clone::clone),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, Control::Choice { .. })
    }
}

pub fn control_for<'a>(field: &'a FieldDescriptor, value: Option<&'a str>) -> Control<'a> {
    let value = value.unwrap_or("");
    let input = |masked, filter| Control::Input {
        placeholder: field.label.as_str(),
        value,
        masked,
        filter,
    };

    match &field.kind {
        FieldKind::Text => input(false, InputFilter::Any),
        FieldKind::Number => input(false, InputFilter::Numeric),
        FieldKind::Date => input(false, InputFilter::Date),
        FieldKind::Secret => input(true, InputFilter::Any),
        FieldKind::SingleChoice { options } => Control::Choice {
            options,
            selected: options.iter().position(|o| o == value),
        },
    }
}

pub fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// Step a choice list from `current`; `None` starts from the sentinel.
/// Returns `None` only for an empty list.
pub fn cycle(len: usize, current: Option<usize>, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, direction) {
        (None, Direction::Next) => 0,
        (None, Direction::Prev) => len - 1,
        (Some(i), Direction::Next) => (i + 1) % len,
        (Some(i), Direction::Prev) => (i + len - 1) % len,
    })
}

/// Pick the neighbouring option of a choice field. Never yields the sentinel.
pub fn cycle_choice(
    field: &FieldDescriptor,
    current: Option<&str>,
    direction: Direction,
) -> Option<FieldEdit> {
    let options = field.kind.options();
    let selected = current.and_then(|v| options.iter().position(|o| o == v));
    cycle(options.len(), selected, direction).map(|i| FieldEdit::new(&field.name, &options[i]))
}

/// Keystroke filter of a free-form field; `None` for choice fields
pub fn input_filter(field: &FieldDescriptor) -> Option<InputFilter> {
    match control_for(field, None) {
        Control::Input { filter, .. } => Some(filter),
        Control::Choice { .. } => None,
    }
}

/// Edit event for new raw text in a free-form field. Choice fields only
/// change through `cycle_choice`.
pub fn text_edit(field: &FieldDescriptor, raw: &str) -> Option<FieldEdit> {
    input_filter(field).map(|_| FieldEdit::new(&field.name, raw))
}

/// Today's local date in the `YYYY-MM-DD` shape date inputs use.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Fill a date field with today's date; other kinds ignore the shortcut
pub fn fill_today(field: &FieldDescriptor) -> Option<FieldEdit> {
    matches!(field.kind, FieldKind::Date).then(|| FieldEdit::new(&field.name, today()))
}
