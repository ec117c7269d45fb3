use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::model::{LoginField, SessionModel};

const FIELDS: [LoginField; 4] = [
    LoginField::Url,
    LoginField::Username,
    LoginField::Password,
    LoginField::ServerName,
];

/// Render the connect screen: login form on top, saved logins below
pub fn render_connect(f: &mut Frame, area: Rect, session: &SessionModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Title
            Constraint::Length(14), // Form (4 bordered fields + status)
            Constraint::Min(3),     // Saved logins
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "alistui — connect to an AList server",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, chunks[0]);

    render_form(f, chunks[1], session);
    render_history(f, chunks[2], session);
}

fn render_form(f: &mut Frame, area: Rect, session: &SessionModel) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    for (i, field) in FIELDS.iter().enumerate() {
        let focused = session.form.focus == *field && session.history_cursor.is_none();
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let shown = if *field == LoginField::Password {
            "•".repeat(session.form.password.chars().count())
        } else {
            session.form.value_of(*field).to_string()
        };
        let text = if focused {
            format!("{}▏", shown)
        } else {
            shown
        };
        let widget = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(field.label())
                .border_style(border),
        );
        f.render_widget(widget, rows[i]);
    }

    let status = if session.login_in_flight {
        Line::from(Span::styled(
            "Connecting…",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &session.error {
        Line::from(Span::styled(
            error.replace('\n', " — "),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            "Enter: connect │ Tab: next field │ ↓: saved logins │ Esc: quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(status), rows[4]);
}

fn render_history(f: &mut Frame, area: Rect, session: &SessionModel) {
    let items: Vec<ListItem> = session
        .history
        .iter()
        .map(|config| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    config.display_name().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} @ {}", config.username, config.url),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let focused = session.history_cursor.is_some();
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Saved logins (Enter: use, Ctrl-d: forget)")
                .border_style(border),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ");

    let mut state = ListState::default();
    state.select(session.history_cursor);
    f.render_stateful_widget(list, area, &mut state);
}
