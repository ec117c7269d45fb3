use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::centered_rect;
use crate::model::{ConfirmAction, InputPrompt};

/// Render a pending confirmation as a centered y/n dialog
pub fn render_confirm(f: &mut Frame, action: &ConfirmAction) {
    let (title, body) = match action {
        ConfirmAction::DeleteEntries { dir, names } => {
            let listed = names
                .iter()
                .take(5)
                .map(|name| format!("  - {}", name))
                .collect::<Vec<_>>()
                .join("\n");
            let more = if names.len() > 5 {
                format!("\n  ... and {} more", names.len() - 5)
            } else {
                String::new()
            };
            (
                "Confirm Delete",
                format!(
                    "Delete {} item(s) from {}?\n{}{}\n\nThis cannot be undone. Continue? (y/n)",
                    names.len(),
                    dir,
                    listed,
                    more
                ),
            )
        }
        ConfirmAction::ForgetServer { label, .. } => (
            "Forget Server",
            format!("Remove the saved login for {}? (y/n)", label),
        ),
    };

    let height = 6 + body.lines().count() as u16;
    let area = centered_rect(60, height, f.area());

    let prompt = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

/// Render a one-line input prompt
pub fn render_prompt(f: &mut Frame, prompt: &InputPrompt) {
    let area = centered_rect(60, 3, f.area());

    let body = Paragraph::new(format!("{}▏", prompt.value())).block(
        Block::default()
            .borders(Borders::ALL)
            .title(prompt.title())
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(Clear, area);
    f.render_widget(body, area);
}
