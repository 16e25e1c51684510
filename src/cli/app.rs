use super::ui;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use formdeck::form::renderer::{self, Direction};
use formdeck::form::{FieldEdit, FormEngine, ViewMode};
use formdeck::{FieldDescriptor, FieldKind, FormConfig, RecordId};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    style::{Color, Style},
    widgets::{Block, Borders},
};
use std::{error::Error, io, time::Duration};
use tracing::{debug, warn};
use tui_textarea::{CursorMove, TextArea};

/// Which control of the form has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    TypeSelector,
    Field(usize),
    Submit,
}

pub struct App {
    pub engine: FormEngine,
    pub focus: Focus,
    /// Editor for the focused free-form field
    pub editor: Option<TextArea<'static>>,
    /// Index into the flattened rows of all record tables
    pub selected_row: usize,
    pub exit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(engine: FormEngine, config: &FormConfig) -> Self {
        Self {
            engine,
            focus: Focus::TypeSelector,
            editor: None,
            selected_row: 0,
            exit: false,
            tick_rate: config.tick_rate,
        }
    }

    fn new_editor(field: &FieldDescriptor, value: &str) -> TextArea<'static> {
        let mut textarea = TextArea::new(vec![value.to_string()]);
        textarea.move_cursor(CursorMove::End);
        textarea.set_placeholder_text(field.label.clone());
        textarea.set_cursor_line_style(Style::default());
        if field.kind == FieldKind::Secret {
            textarea.set_mask_char('*');
        }
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(ui::field_title(field)),
        );
        textarea
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn Error>> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        if let Err(err) = res {
            println!("{:?}", err);
        }

        Ok(())
    }

    async fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| ui::draw(f, self))?;

            // Poll so the notice timer's clear shows up without a keypress
            if event::poll(self.tick_rate)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }

            if self.exit {
                return Ok(());
            }
            tokio::task::yield_now().await;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.exit = true;
            return;
        }

        // The update confirmation blocks everything else until dismissed
        if self.engine.pending_acknowledgement().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.engine.acknowledge();
            }
            return;
        }

        match self.engine.view_mode() {
            ViewMode::Editing => self.handle_editing_key(key),
            ViewMode::Browsing => self.handle_browsing_key(key),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.engine.cancel();
                self.set_focus(Focus::TypeSelector);
            }
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.move_focus(Direction::Next),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(Direction::Prev),
            _ => match self.focus {
                Focus::TypeSelector => self.handle_selector_key(key),
                Focus::Field(index) => self.handle_field_key(index, key),
                Focus::Submit => {
                    if key.code == KeyCode::Enter {
                        self.submit();
                    }
                }
            },
        }
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        let direction = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => Direction::Next,
            KeyCode::Left => Direction::Prev,
            KeyCode::Enter => {
                self.move_focus(Direction::Next);
                return;
            }
            _ => return,
        };

        let types = self.engine.list_types();
        let current = self
            .engine
            .draft()
            .active_type()
            .and_then(|active| types.iter().position(|t| *t == active));
        if let Some(next) = renderer::cycle(types.len(), current, direction) {
            let name = types[next].to_string();
            self.engine.select(&name);
            self.editor = None;
        }
    }

    fn handle_field_key(&mut self, index: usize, key: KeyEvent) {
        let Some(field) = self.engine.active_fields().get(index).cloned() else {
            return;
        };
        let current = self.engine.draft().value(&field.name).map(str::to_string);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let edit = match (&field.kind, key.code) {
            (_, KeyCode::Enter) => {
                self.move_focus(Direction::Next);
                None
            }
            (FieldKind::SingleChoice { .. }, KeyCode::Right | KeyCode::Char(' ')) => {
                renderer::cycle_choice(&field, current.as_deref(), Direction::Next)
            }
            (FieldKind::SingleChoice { .. }, KeyCode::Left) => {
                renderer::cycle_choice(&field, current.as_deref(), Direction::Prev)
            }
            (FieldKind::SingleChoice { .. }, _) => None,
            (FieldKind::Date, KeyCode::Char('t')) if ctrl => {
                let edit = renderer::fill_today(&field);
                if let Some(edit) = &edit {
                    self.editor = Some(Self::new_editor(&field, &edit.value));
                }
                edit
            }
            _ => self.feed_editor(&field, key),
        };

        if let Some(edit) = edit {
            self.apply(edit);
        }
    }

    /// Pass a key to the focused text editor and report the resulting value
    fn feed_editor(&mut self, field: &FieldDescriptor, key: KeyEvent) -> Option<FieldEdit> {
        let filter = renderer::input_filter(field)?;
        let editor = self.editor.as_mut()?;

        if let KeyCode::Char(c) = key.code
            && !key.modifiers.contains(KeyModifiers::CONTROL)
            && !filter.accepts(c, editor.cursor().1)
        {
            debug!(field = %field.name, "keystroke rejected by input filter");
            return None;
        }

        if !editor.input(key) {
            return None;
        }
        let raw = editor.lines().join("");
        renderer::text_edit(field, &raw)
    }

    fn apply(&mut self, edit: FieldEdit) {
        if let Err(err) = self.engine.apply_edit(edit) {
            warn!(%err, "edit not applied");
        }
    }

    fn submit(&mut self) {
        if self.engine.submit().is_ok() {
            self.selected_row = 0;
            self.set_focus(Focus::TypeSelector);
        }
    }

    fn move_focus(&mut self, direction: Direction) {
        let stops = self.engine.active_fields().len() + 2;
        let position = match self.focus {
            Focus::TypeSelector => 0,
            Focus::Field(i) => i + 1,
            Focus::Submit => stops - 1,
        };
        let next = renderer::cycle(stops, Some(position), direction).unwrap_or(0);
        let focus = match next {
            0 => Focus::TypeSelector,
            n if n == stops - 1 => Focus::Submit,
            n => Focus::Field(n - 1),
        };
        self.set_focus(focus);
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.editor = match focus {
            Focus::Field(index) => self.engine.active_fields().get(index).and_then(|field| {
                renderer::input_filter(field)?;
                let value = self.engine.draft().value(&field.name).unwrap_or_default();
                Some(Self::new_editor(field, value))
            }),
            _ => None,
        };
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                let total = self.row_count();
                if total > 0 {
                    self.selected_row = (self.selected_row + 1) % total;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let total = self.row_count();
                if total > 0 {
                    self.selected_row = (self.selected_row + total - 1) % total;
                }
            }
            KeyCode::Char('a') => {
                self.engine.add_new();
                self.set_focus(Focus::TypeSelector);
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some((type_name, id)) = self.selected_record() {
                    match self.engine.edit_record(&type_name, id) {
                        Ok(()) => self.set_focus(Focus::Field(0)),
                        Err(err) => warn!(%err, "edit failed"),
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some((type_name, id)) = self.selected_record() {
                    if let Err(err) = self.engine.delete_record(&type_name, id) {
                        warn!(%err, "delete failed");
                    }
                    self.selected_row = self.selected_row.min(self.row_count().saturating_sub(1));
                }
            }
            _ => {}
        }
    }

    fn row_count(&self) -> usize {
        self.engine.tables().iter().map(|t| t.rows.len()).sum()
    }

    /// The record under the browsing cursor
    pub fn selected_record(&self) -> Option<(String, RecordId)> {
        self.engine
            .tables()
            .into_iter()
            .flat_map(|t| {
                let type_name = t.type_name;
                t.rows.into_iter().map(move |row| (type_name.clone(), row.id))
            })
            .nth(self.selected_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdeck::schema::samples::{ADDRESS_INFORMATION, USER_INFORMATION};

    fn app() -> App {
        let config = FormConfig::default();
        App::new(FormEngine::from_config(&config).unwrap(), &config)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_fill_and_submit_through_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.engine.draft().active_type(), Some(USER_INFORMATION));

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Ann");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Lee");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "4x2");
        assert_eq!(app.engine.draft().value("age"), Some("42"));

        ctrl(&mut app, 's');
        assert_eq!(app.engine.view_mode(), ViewMode::Browsing);
        let record = &app.engine.store().records(USER_INFORMATION)[0];
        assert_eq!(record.get("firstName"), Some("Ann"));
        assert_eq!(record.get("lastName"), Some("Lee"));
    }

    #[test]
    fn test_submit_button_rejects_incomplete_form() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Bo");

        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Submit);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.engine.view_mode(), ViewMode::Editing);
        assert!(app.engine.store().is_empty());
        assert_eq!(app.engine.draft().value("firstName"), Some("Bo"));
    }

    #[test]
    fn test_choice_field_cycles_options() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.engine.draft().active_type(), Some(ADDRESS_INFORMATION));

        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focus, Focus::Field(2));
        assert!(app.editor.is_none());

        type_str(&mut app, "x");
        assert_eq!(app.engine.draft().value("state"), None);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.engine.draft().value("state"), Some("Kerala"));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.engine.draft().value("state"), Some("Other"));
    }

    #[test]
    fn test_edit_acknowledge_delete_from_tables() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Ann");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Lee");
        ctrl(&mut app, 's');

        let (type_name, id) = app.selected_record().unwrap();
        assert_eq!(type_name, USER_INFORMATION);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.engine.view_mode(), ViewMode::Editing);
        assert_eq!(app.engine.submit_label(), "Update");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "-Kim");
        ctrl(&mut app, 's');

        assert!(app.engine.pending_acknowledgement().is_some());
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.engine.store().len(USER_INFORMATION), 1);
        press(&mut app, KeyCode::Enter);
        assert!(app.engine.pending_acknowledgement().is_none());

        let record = app.engine.store().get(USER_INFORMATION, id).unwrap();
        assert_eq!(record.get("lastName"), Some("Lee-Kim"));

        press(&mut app, KeyCode::Char('d'));
        assert!(app.engine.store().is_empty());
        assert_eq!(app.engine.view_mode(), ViewMode::Browsing);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.engine.view_mode(), ViewMode::Editing);
    }

    #[test]
    fn test_escape_shows_tables_then_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.engine.view_mode(), ViewMode::Browsing);
        assert!(!app.exit);
        press(&mut app, KeyCode::Esc);
        assert!(app.exit);
    }
}
