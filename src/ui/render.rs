use ratatui::Frame;

use super::{connect, dialogs, file_list, layout, preview, status_bar, toast};
use crate::app::App;
use crate::model::Screen;

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();

    match app.model.ui.screen {
        Screen::Connect => {
            connect::render_connect(f, size, &app.model.session);
        }
        Screen::Browser => {
            let layout_info = layout::browser_layout(size);
            status_bar::render_header(f, layout_info.header_area, &app.model);
            status_bar::render_toolbar(f, layout_info.toolbar_area, &app.model);

            let entries = app.visible_entries();
            let (list_inner, offset) = file_list::render_file_list(
                f,
                layout_info.list_area,
                &app.model.listing,
                &entries,
                &app.model.ui.pull,
            );
            // The widget may have scrolled to keep the cursor visible;
            // pointer hit tests need the offset it settled on
            app.list_area = list_inner;
            app.model.listing.scroll_offset = offset;

            status_bar::render_status(f, layout_info.status_area, &app.model);
        }
    }

    // Modal layers stack above the screen, dialogs above the preview
    if let Some(preview_state) = &app.model.ui.preview {
        preview::render_preview(f, preview_state, app.image_protocol.as_mut());
    }
    if let Some(prompt) = &app.model.ui.prompt {
        dialogs::render_prompt(f, prompt);
    }
    if let Some(confirm) = &app.model.ui.confirm {
        dialogs::render_confirm(f, confirm);
    }

    if let Some((message, _)) = &app.model.ui.toast {
        toast::render_toast(f, size, message);
    }
}
