use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Box width for a message line: display columns, not bytes
fn box_width(first_line: &str, available: u16) -> u16 {
    let max_width = (available as usize).min(80);
    (first_line.width() + 6).min(max_width) as u16
}

/// Render a toast notification (brief pop-up message)
pub fn render_toast(f: &mut Frame, area: Rect, message: &str) {
    // Only the first line sizes the box; guidance lines wrap below
    let first_line = message.lines().next().unwrap_or(message);
    let toast_width = box_width(first_line, area.width);
    let toast_height = 3 + message.lines().count().saturating_sub(1) as u16;

    let toast_x = (area.width.saturating_sub(toast_width)) / 2;
    let toast_y = 2; // Near the top but not touching the header

    let toast_area = Rect {
        x: area.x + toast_x,
        y: area.y + toast_y,
        width: toast_width,
        height: toast_height.min(area.height),
    };

    // Clear the area first to prevent background bleed-through
    f.render_widget(Clear, toast_area);

    // Detect error messages and use different styling
    let is_error = message.starts_with("Error:");
    let (icon, icon_color, border_color) = if is_error {
        ("✗ ", Color::Red, Color::Red)
    } else {
        ("✓ ", Color::Green, Color::Green)
    };

    let toast_line = Line::from(vec![
        Span::styled(
            icon,
            Style::default().fg(icon_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default()),
    ]);

    let toast_block = Block::default().borders(Borders::ALL).border_style(
        Style::default()
            .fg(border_color)
            .add_modifier(Modifier::BOLD),
    );

    let toast_text = Paragraph::new(vec![toast_line])
        .block(toast_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast_text, toast_area);
}
