//! Keyboard Input Handler
//!
//! Dispatch order matters: modal layers (confirmation, prompt, preview)
//! swallow keys before the active screen sees them, and the search line
//! grabs plain characters while it has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::logic::file_type::TypeFilter;
use crate::model::{ConfirmAction, InputPrompt, PreviewContent, Screen};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl-C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.model.ui.should_quit = true;
        return;
    }

    if app.model.ui.confirm.is_some() {
        handle_confirm_key(app, key);
        return;
    }
    if app.model.ui.prompt.is_some() {
        handle_prompt_key(app, key);
        return;
    }
    if app.model.ui.preview.is_some() {
        handle_preview_key(app, key);
        return;
    }

    match app.model.ui.screen {
        Screen::Connect => handle_connect_key(app, key),
        Screen::Browser => handle_browser_key(app, key),
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let action = app.model.ui.confirm.take();
            match action {
                Some(ConfirmAction::DeleteEntries { dir, names }) => {
                    app.delete_entries(dir, names);
                }
                Some(ConfirmAction::ForgetServer { index, .. }) => {
                    app.forget_server(index);
                }
                None => {}
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.model.ui.confirm = None;
        }
        // Other keys are swallowed while the dialog is up
        _ => {}
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let prompt = app.model.ui.prompt.take();
            match prompt {
                Some(InputPrompt::UploadPath { value }) => app.start_upload(value),
                Some(InputPrompt::ExtensionFilter { value }) => {
                    match TypeFilter::extension(&value) {
                        Some(filter) => {
                            app.model.listing.filter = filter;
                            let visible_len = app.visible_entries().len();
                            app.model.listing.clamp_cursor(visible_len);
                        }
                        None => app.model.show_toast("Error: not a valid extension"),
                    }
                }
                None => {}
            }
        }
        KeyCode::Esc => {
            app.model.ui.prompt = None;
        }
        KeyCode::Backspace => {
            if let Some(prompt) = app.model.ui.prompt.as_mut() {
                prompt.value_mut().pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(prompt) = app.model.ui.prompt.as_mut() {
                prompt.value_mut().push(c);
            }
        }
        _ => {}
    }
}

fn handle_preview_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_preview(),
        KeyCode::Char('j') | KeyCode::Down => scroll_preview(app, 1),
        KeyCode::Char('k') | KeyCode::Up => scroll_preview(app, -1),
        KeyCode::PageDown => scroll_preview(app, 10),
        KeyCode::PageUp => scroll_preview(app, -10),
        KeyCode::Char('y') => {
            let raw_url = app
                .model
                .ui
                .preview
                .as_ref()
                .map(|p| p.raw_url.clone())
                .unwrap_or_default();
            if raw_url.is_empty() {
                app.model.show_toast("Link not resolved yet");
            } else {
                app.copy_to_clipboard(&raw_url);
            }
        }
        KeyCode::Char('w') => {
            app.close_preview();
            app.start_download();
        }
        _ => {}
    }
}

fn scroll_preview(app: &mut App, delta: i32) {
    if let Some(preview) = app.model.ui.preview.as_mut() {
        if let PreviewContent::Text { scroll, .. } = &mut preview.content {
            let next = (*scroll as i32 + delta).max(0);
            *scroll = next.min(u16::MAX as i32) as u16;
        }
    }
}

fn handle_connect_key(app: &mut App, key: KeyEvent) {
    if app.model.session.login_in_flight && key.code != KeyCode::Esc {
        return;
    }
    match key.code {
        KeyCode::Esc => {
            if app.model.session.history_cursor.is_some() {
                app.model.session.history_cursor = None;
            } else {
                app.model.ui.should_quit = true;
            }
        }
        KeyCode::Tab => {
            app.model.session.history_cursor = None;
            app.model.session.form.focus = app.model.session.form.focus.next();
        }
        KeyCode::BackTab => {
            app.model.session.history_cursor = None;
            app.model.session.form.focus = app.model.session.form.focus.previous();
        }
        KeyCode::Down => move_history_cursor(app, 1),
        KeyCode::Up => move_history_cursor(app, -1),
        KeyCode::Enter => {
            if let Some(index) = app.model.session.history_cursor {
                if let Some(config) = app.model.session.history.get(index) {
                    let config = config.clone();
                    app.model.session.form.prefill(&config);
                    app.model.session.history_cursor = None;
                }
            } else {
                app.submit_login();
            }
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_forget_server();
        }
        KeyCode::Backspace => {
            app.model.session.form.active_value_mut().pop();
        }
        KeyCode::Char(c) => {
            app.model.session.form.active_value_mut().push(c);
        }
        _ => {}
    }
}

/// The history list sits below the form; Down from the form enters it
fn move_history_cursor(app: &mut App, delta: isize) {
    let len = app.model.session.history.len();
    if len == 0 {
        return;
    }
    let next = match app.model.session.history_cursor {
        None => {
            if delta > 0 {
                Some(0)
            } else {
                None
            }
        }
        Some(0) if delta < 0 => None,
        Some(current) => {
            let next = (current as isize + delta).clamp(0, len as isize - 1);
            Some(next as usize)
        }
    };
    app.model.session.history_cursor = next;
}

fn handle_browser_key(app: &mut App, key: KeyEvent) {
    // The search line takes plain characters while it has focus
    if app.model.ui.search_input {
        match key.code {
            KeyCode::Esc => {
                app.model.ui.search_input = false;
                app.model.listing.search.clear();
                let visible_len = app.visible_entries().len();
                app.model.listing.clamp_cursor(visible_len);
            }
            KeyCode::Enter => {
                app.model.ui.search_input = false;
            }
            KeyCode::Backspace => {
                app.model.listing.search.pop();
                let visible_len = app.visible_entries().len();
                app.model.listing.clamp_cursor(visible_len);
            }
            KeyCode::Char(c) => {
                app.model.listing.search.push(c);
                let visible_len = app.visible_entries().len();
                app.model.listing.clamp_cursor(visible_len);
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,
        KeyCode::Esc => {
            if app.model.listing.selection_mode {
                app.model.listing.exit_selection();
            } else if !app.model.listing.search.is_empty()
                || app.model.listing.filter != TypeFilter::All
            {
                app.model.listing.search.clear();
                app.model.listing.filter = TypeFilter::All;
                let visible_len = app.visible_entries().len();
                app.model.listing.clamp_cursor(visible_len);
            } else {
                app.navigate_up();
            }
        }

        KeyCode::Char('j') | KeyCode::Down => {
            let visible_len = app.visible_entries().len();
            app.model.listing.move_cursor(1, visible_len);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let visible_len = app.visible_entries().len();
            app.model.listing.move_cursor(-1, visible_len);
        }
        KeyCode::PageDown => {
            let visible_len = app.visible_entries().len();
            app.model.listing.move_cursor(10, visible_len);
        }
        KeyCode::PageUp => {
            let visible_len = app.visible_entries().len();
            app.model.listing.move_cursor(-10, visible_len);
        }
        KeyCode::Char('g') => app.model.listing.cursor = 0,
        KeyCode::Char('G') => {
            let visible_len = app.visible_entries().len();
            app.model.listing.cursor = visible_len.saturating_sub(1);
        }

        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            if app.model.listing.selection_mode {
                toggle_cursor_selection(app);
            } else {
                app.open_cursor();
            }
        }
        KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => app.navigate_up(),
        KeyCode::Char('r') => app.refresh(true),

        KeyCode::Char('/') => {
            app.model.ui.search_input = true;
        }
        KeyCode::Char('f') => {
            app.model.listing.filter = app.model.listing.filter.next();
            let visible_len = app.visible_entries().len();
            app.model.listing.clamp_cursor(visible_len);
        }
        KeyCode::Char('e') => {
            app.model.ui.prompt = Some(InputPrompt::ExtensionFilter {
                value: String::new(),
            });
        }

        KeyCode::Char('s') => app.cycle_sort_key(),
        KeyCode::Char('S') => app.toggle_sort_order(),
        KeyCode::Char('F') => app.toggle_folders_first(),

        KeyCode::Char(' ') | KeyCode::Char('v') => toggle_cursor_selection(app),

        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('y') => app.start_copy_links(),
        KeyCode::Char('w') => app.start_download(),
        KeyCode::Char('u') => app.prompt_upload(),

        KeyCode::Char('L') => app.logout(),
        _ => {}
    }
}

/// Space on an entry: enter selection mode on it, or toggle membership
fn toggle_cursor_selection(app: &mut App) {
    let visible = app.visible_entries();
    let Some(entry) = visible.get(app.model.listing.cursor) else {
        return;
    };
    let name = entry.name.clone();
    if app.model.listing.selection_mode {
        app.model.listing.toggle_selected(&name);
    } else {
        app.model.listing.enter_selection(name);
    }
}
