use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::FileEntry;
use crate::model::{ListingModel, ListingPhase, PullIndicator};
use crate::utils;

const SIZE_COL: usize = 10;
const MODIFIED_COL: usize = 16;

/// Render the directory listing
///
/// Returns the inner list rectangle and the scroll offset the list widget
/// settled on, so pointer hit tests can map rows back to entries.
pub fn render_file_list(
    f: &mut Frame,
    area: Rect,
    listing: &ListingModel,
    entries: &[FileEntry],
    pull: &PullIndicator,
) -> (Rect, usize) {
    let title = if listing.selection_mode {
        format!(" {} ({} selected) ", listing.path, listing.selected.len())
    } else {
        format!(" {} ", listing.path)
    };
    let border = match &listing.phase {
        ListingPhase::Error(_) => Style::default().fg(Color::Red),
        ListingPhase::Loading => Style::default().fg(Color::Yellow),
        ListingPhase::Ready => Style::default().fg(Color::DarkGray),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border);
    let mut inner = block.inner(area);
    f.render_widget(block, area);

    // The pull indicator pushes the rows down, like a list dragged past
    // its top edge
    let pull_rows = (pull.offset.round() as u16).min(inner.height.saturating_sub(1));
    if pull_rows > 0 {
        let indicator_area = Rect { height: pull_rows, ..inner };
        render_pull_indicator(f, indicator_area, pull);
        inner = Rect {
            y: inner.y + pull_rows,
            height: inner.height - pull_rows,
            ..inner
        };
    }

    if entries.is_empty() {
        let message = match &listing.phase {
            ListingPhase::Loading => "Loading…".to_string(),
            ListingPhase::Error(e) => format!("Error: {}", e),
            ListingPhase::Ready => "Empty directory".to_string(),
        };
        f.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return (inner, 0);
    }

    let name_width = (inner.width as usize).saturating_sub(SIZE_COL + MODIFIED_COL + 6);
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| render_row(entry, listing, name_width))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default()
        .with_offset(listing.scroll_offset)
        .with_selected(Some(listing.cursor));
    f.render_stateful_widget(list, inner, &mut state);

    (inner, state.offset())
}

fn render_row<'a>(entry: &'a FileEntry, listing: &ListingModel, name_width: usize) -> ListItem<'a> {
    let marker = if listing.selection_mode {
        if listing.selected.contains(&entry.name) {
            "[x] "
        } else {
            "[ ] "
        }
    } else {
        ""
    };
    let icon = if entry.is_dir { " " } else { "  " };
    let name = truncate_name(&entry.name, name_width);
    let padding = name_width.saturating_sub(name.width());

    let size = if entry.is_dir {
        format!("{:>width$}", "-", width = SIZE_COL)
    } else {
        format!("{:>width$}", utils::format_bytes(entry.size), width = SIZE_COL)
    };
    let modified = format!(
        " {:>width$}",
        utils::format_modified(&entry.modified),
        width = MODIFIED_COL
    );

    let name_style = if entry.is_dir {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    ListItem::new(Line::from(vec![
        Span::raw(marker),
        Span::raw(icon),
        Span::styled(name, name_style),
        Span::raw(" ".repeat(padding)),
        Span::styled(size, Style::default().fg(Color::DarkGray)),
        Span::styled(modified, Style::default().fg(Color::DarkGray)),
    ]))
}

/// Shorten a name to fit its column, keeping the extension visible
fn truncate_name(name: &str, max_width: usize) -> String {
    if name.width() <= max_width {
        return name.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in name.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn render_pull_indicator(f: &mut Frame, area: Rect, pull: &PullIndicator) {
    let text = if pull.armed {
        "⇡ release to refresh"
    } else {
        "⇣ pull to refresh"
    };
    let mut style = Style::default().fg(if pull.armed {
        Color::Green
    } else {
        Color::DarkGray
    });
    if pull.tick {
        // One-frame flash when the threshold is crossed
        style = style.add_modifier(Modifier::REVERSED);
    }
    let widget = Paragraph::new(text)
        .style(style)
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_name_keeps_short_names() {
        assert_eq!(truncate_name("short.txt", 20), "short.txt");
    }

    #[test]
    fn test_truncate_name_marks_cut() {
        let cut = truncate_name("a-very-long-file-name.tar.gz", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }

    #[test]
    fn test_truncate_handles_wide_chars() {
        let cut = truncate_name("日本語のファイル名.txt", 8);
        assert!(cut.width() <= 8);
    }
}
