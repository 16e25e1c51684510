use super::app::{App, Focus};
use formdeck::form::renderer::{self, Control, UNSELECTED};
use formdeck::form::{NoticeKind, TableView, ViewMode};
use formdeck::FieldDescriptor;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

const BROWN: Color = Color::Rgb(0x76, 0x3A, 0x12);
const ORANGE: Color = Color::Rgb(0xE0, 0x86, 0x00);

pub fn field_title(field: &FieldDescriptor) -> String {
    if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(1),    // Form or tables
            Constraint::Length(3), // Notice
            Constraint::Length(1), // Key help
        ])
        .split(f.area());

    let title = Line::from(vec![
        Span::styled("User", Style::default().fg(BROWN).add_modifier(Modifier::BOLD)),
        Span::styled(" Form", Style::default().fg(ORANGE).add_modifier(Modifier::BOLD)),
    ])
    .alignment(Alignment::Center);
    f.render_widget(Paragraph::new(title), chunks[0]);

    match app.engine.view_mode() {
        ViewMode::Editing => draw_form(f, app, chunks[1]),
        ViewMode::Browsing => draw_tables(f, app, chunks[1]),
    }

    draw_notice(f, app, chunks[2]);

    let help = match app.engine.view_mode() {
        ViewMode::Editing => {
            "Tab/↑↓ move · ←→ choose · Ctrl+T today · Ctrl+S submit · Esc records · Ctrl+Q quit"
        }
        ViewMode::Browsing => "↑↓ select · e edit · d delete · a add information · q quit",
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );

    if let Some(text) = app.engine.pending_acknowledgement() {
        draw_acknowledgement(f, text);
    }
}

fn focused_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let fields = app.engine.active_fields();

    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    if !fields.is_empty() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    // Type selector
    let selected = app.engine.draft().active_type().unwrap_or(UNSELECTED);
    f.render_widget(
        Paragraph::new(format!("◀ {} ▶", selected)).block(focused_block(
            " Select Form Type ".to_string(),
            app.focus == Focus::TypeSelector,
        )),
        rows[0],
    );

    // The submit button only shows once a type with fields is selected
    if fields.is_empty() {
        return;
    }

    for (index, field) in fields.iter().enumerate() {
        let area = rows[index + 1];
        let focused = app.focus == Focus::Field(index);

        if focused && let Some(editor) = &app.editor {
            f.render_widget(editor, area);
            continue;
        }

        let control = renderer::control_for(field, app.engine.draft().value(&field.name));
        let text = match &control {
            Control::Input { placeholder, value, .. } if value.is_empty() => {
                Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
            }
            Control::Choice { .. } => Span::raw(format!("◀ {} ▶", control.display())),
            Control::Input { .. } => Span::raw(control.display()),
        };
        f.render_widget(
            Paragraph::new(Line::from(text)).block(focused_block(field_title(field), focused)),
            area,
        );
    }

    let button_style = if app.focus == Focus::Submit {
        Style::default()
            .fg(Color::White)
            .bg(ORANGE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ORANGE)
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {} ", app.engine.submit_label()),
            button_style,
        ))
        .alignment(Alignment::Center)
        .block(focused_block(String::new(), app.focus == Focus::Submit)),
        rows[fields.len() + 1],
    );
}

fn draw_tables(f: &mut Frame, app: &App, area: Rect) {
    let tables = app.engine.tables();

    if tables.is_empty() {
        f.render_widget(
            Paragraph::new("No records yet. Press 'a' to add information.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Records ")),
            area,
        );
        return;
    }

    let mut constraints: Vec<Constraint> = tables
        .iter()
        .map(|t| Constraint::Length(table_height(t.rows.len())))
        .collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut offset = 0;
    for (table, chunk) in tables.iter().zip(chunks.iter()) {
        let local = app
            .selected_row
            .checked_sub(offset)
            .filter(|i| *i < table.rows.len());
        draw_table(f, table, local, *chunk);
        offset += table.rows.len();
    }
}

/// Rows plus header and borders, saturating at the terminal coordinate limit
fn table_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(3)
}

fn draw_table(f: &mut Frame, view: &TableView, selected: Option<usize>, area: Rect) {
    let header = Row::new(view.columns.iter().map(|c| Cell::from(c.as_str())))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = view.rows.iter().map(|row| {
        let mut cells: Vec<Cell> = row.cells.iter().map(|c| Cell::from(c.as_str())).collect();
        cells.push(Cell::from("[e]dit  [d]elete"));
        Row::new(cells)
    });

    let widths = vec![Constraint::Fill(1); view.columns.len()];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", view.type_name),
                    Style::default().fg(ORANGE),
                )),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_notice(f: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = app.engine.notice() else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
    };
    f.render_widget(
        Paragraph::new(Span::styled(notice.text, Style::default().fg(color)))
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_acknowledgement(f: &mut Frame, text: &str) {
    let screen = f.area();
    let width = 44.min(screen.width);
    let height = 5.min(screen.height);
    let area = Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(text.to_string()),
            Line::from(Span::styled(
                "Press Enter to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ORANGE))
                .title(" Confirm "),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_height_saturates() {
        assert_eq!(table_height(0), 3);
        assert_eq!(table_height(2), 5);
        assert_eq!(table_height(65_533), u16::MAX);
        assert_eq!(table_height(1_000_000), u16::MAX);
    }
}
