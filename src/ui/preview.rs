use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use ratatui_image::{protocol::StatefulProtocol, StatefulImage};

use crate::model::{PreviewContent, PreviewState};
use crate::utils;

/// Render the preview popup
///
/// The image protocol state lives on App (it is not Clone), so it comes
/// in separately from the model snapshot.
pub fn render_preview(
    f: &mut Frame,
    preview: &PreviewState,
    image_protocol: Option<&mut StatefulProtocol>,
) {
    let frame_area = f.area();
    let area = popup_area(frame_area);

    let title = format!(
        " {} ({}) ",
        preview.name,
        utils::format_bytes(preview.size)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    match &preview.content {
        PreviewContent::Loading => {
            let widget = Paragraph::new("Loading…").style(Style::default().fg(Color::Yellow));
            f.render_widget(widget, inner);
        }
        PreviewContent::Text { body, scroll } => {
            let widget = Paragraph::new(body.as_str())
                .wrap(Wrap { trim: false })
                .scroll((*scroll, 0));
            f.render_widget(widget, inner);
        }
        PreviewContent::Image => {
            if let Some(protocol) = image_protocol {
                f.render_stateful_widget(StatefulImage::default(), inner, protocol);
            } else {
                let widget = Paragraph::new("image state missing")
                    .style(Style::default().fg(Color::Red));
                f.render_widget(widget, inner);
            }
        }
        PreviewContent::Handoff(message) => {
            let lines = vec![
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(Color::Green),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Esc: close │ y: copy link │ w: download",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        PreviewContent::Failed(message) => {
            let widget = Paragraph::new(format!("Error: {}", message))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false });
            f.render_widget(widget, inner);
        }
    }
}

/// Preview takes most of the screen but keeps the list visible behind it
fn popup_area(area: Rect) -> Rect {
    let width = (area.width * 9 / 10).max(20).min(area.width);
    let height = (area.height * 9 / 10).max(8).min(area.height);
    super::layout::centered_rect(width, height, area)
}
