use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for the browser screen
pub struct LayoutInfo {
    /// Top header line (server, path)
    pub header_area: Rect,
    /// Search/filter toolbar line
    pub toolbar_area: Rect,
    /// File list (bordered)
    pub list_area: Rect,
    /// Bottom status + legend lines
    pub status_area: Rect,
}

/// Calculate the screen layout for the browser screen
pub fn browser_layout(terminal_size: Rect) -> LayoutInfo {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header: server name and path
            Constraint::Length(1), // Toolbar: search and filter state
            Constraint::Min(3),    // File list
            Constraint::Length(2), // Status line + hotkey legend
        ])
        .split(terminal_size);

    LayoutInfo {
        header_area: chunks[0],
        toolbar_area: chunks[1],
        list_area: chunks[2],
        status_area: chunks[3],
    }
}

/// Centered popup rectangle, clamped to the terminal
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_layout_fills_height() {
        let info = browser_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(info.header_area.height, 1);
        assert_eq!(info.toolbar_area.height, 1);
        assert_eq!(info.list_area.height, 20);
        assert_eq!(info.status_area.height, 2);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect(60, 20, area);
        assert!(popup.width <= 40);
        assert!(popup.height <= 10);
        assert_eq!(popup.x, 0);
    }
}
