use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::logic::file_type::TypeFilter;
use crate::model::Model;

/// Render the top header line: server label and entry count
pub fn render_header(f: &mut Frame, area: Rect, model: &Model) {
    let server = model
        .session
        .active
        .as_ref()
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| "not connected".to_string());
    let visible = model.visible_entries().len();
    let total = model.listing.entries.len();
    let count = if visible == total {
        format!("{} items", total)
    } else {
        format!("{}/{} items", visible, total)
    };

    let line = Line::from(vec![
        Span::styled(server, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", count), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Render the search/filter toolbar line
pub fn render_toolbar(f: &mut Frame, area: Rect, model: &Model) {
    let mut spans = Vec::new();

    if model.ui.search_input || !model.listing.search.is_empty() {
        let cursor = if model.ui.search_input { "▏" } else { "" };
        spans.push(Span::styled("/", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!("{}{}", model.listing.search, cursor),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::raw("  "));
    }

    if model.listing.filter != TypeFilter::All {
        spans.push(Span::styled(
            format!("[{}]", model.listing.filter.label()),
            Style::default().fg(Color::Magenta),
        ));
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled(
        format!(
            "sort: {} {}{}",
            model.preferences.sort_key.as_str(),
            model.preferences.sort_order.arrow(),
            if model.preferences.folders_first {
                "  folders first"
            } else {
                ""
            }
        ),
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the bottom status line and hotkey legend
pub fn render_status(f: &mut Frame, area: Rect, model: &Model) {
    let status = if let crate::model::ListingPhase::Error(e) = &model.listing.phase {
        Line::from(Span::styled(
            format!("Error: {}", e.replace('\n', " — ")),
            Style::default().fg(Color::Red),
        ))
    } else if model.listing.is_loading() {
        Line::from(Span::styled("Loading…", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::raw(""))
    };

    let legend = if model.listing.selection_mode {
        "Space: toggle │ d: delete │ y: links │ w: download │ Esc: cancel"
    } else {
        "Enter: open │ Bksp: up │ /: search │ f: filter │ s/S: sort │ d/y/w/u: actions │ L: logout │ q: quit"
    };

    let lines = vec![
        status,
        Line::from(Span::styled(legend, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
