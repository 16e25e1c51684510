use std::fmt;
use tracing::info;

/// Whether the form or the record tables are on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Editing,
    Browsing,
}

/// Events that move the view between its two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    Submitted,
    AddNew,
    EditRow,
    DeleteRow,
    Cancel,
}

impl ViewMode {
    /// Next mode after `event`. Events that do not apply leave the mode unchanged.
    pub fn on(self, event: ViewEvent) -> Self {
        match (self, event) {
            (Self::Editing, ViewEvent::Submitted | ViewEvent::Cancel) => Self::Browsing,
            (Self::Browsing, ViewEvent::AddNew | ViewEvent::EditRow) => Self::Editing,
            (mode, _) => mode,
        }
    }

    pub fn transition(&mut self, event: ViewEvent) {
        let next = self.on(event);
        if next != *self {
            info!(from = %self, to = %next, ?event, "view mode changed");
        }
        *self = next;
    }

    pub fn is_editing(self) -> bool {
        self == Self::Editing
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::Browsing => write!(f, "browsing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mode = ViewMode::default();
        assert_eq!(mode, ViewMode::Editing);
        assert_eq!(mode.on(ViewEvent::Submitted), ViewMode::Browsing);
        assert_eq!(mode.on(ViewEvent::Cancel), ViewMode::Browsing);
        assert_eq!(mode.on(ViewEvent::AddNew), ViewMode::Editing);

        let browsing = ViewMode::Browsing;
        assert_eq!(browsing.on(ViewEvent::AddNew), ViewMode::Editing);
        assert_eq!(browsing.on(ViewEvent::EditRow), ViewMode::Editing);
        assert_eq!(browsing.on(ViewEvent::DeleteRow), ViewMode::Browsing);
        assert_eq!(browsing.on(ViewEvent::Submitted), ViewMode::Browsing);
    }

    #[test]
    fn test_transition_in_place() {
        let mut mode = ViewMode::Editing;
        mode.transition(ViewEvent::Submitted);
        assert!(!mode.is_editing());
        mode.transition(ViewEvent::DeleteRow);
        assert_eq!(mode, ViewMode::Browsing);
    }
}
