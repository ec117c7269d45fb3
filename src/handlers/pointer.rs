//! Mouse Input Handler
//!
//! Raw mouse events are fed through the gesture recognizer so that
//! touch-style strokes (edge swipe, pull-to-refresh, long press) come out
//! as intents. Scroll wheel events bypass the recognizer and move the
//! cursor directly.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::gesture::{GestureContext, GestureEvent};
use crate::model::{PullIndicator, Screen};

pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    if app.model.ui.screen != Screen::Browser || app.model.has_modal() {
        return;
    }

    let x = event.column as f32;
    let y = event.row as f32;
    let t = app.now();

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let ctx = GestureContext {
                at_top: app.model.listing.at_top(),
                selection_mode: app.model.listing.selection_mode,
                refreshing: app.model.listing.is_loading(),
                over_item: row_under(app, event.column, event.row),
            };
            app.recognizer.pointer_down(x, y, t, ctx);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(gesture) = app.recognizer.pointer_move(x, y, t) {
                apply_gesture(app, gesture);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(gesture) = app.recognizer.pointer_up(x, y, t) {
                apply_gesture(app, gesture);
            }
        }
        MouseEventKind::ScrollDown => {
            let visible_len = app.visible_entries().len();
            app.model.listing.move_cursor(1, visible_len);
        }
        MouseEventKind::ScrollUp => {
            let visible_len = app.visible_entries().len();
            app.model.listing.move_cursor(-1, visible_len);
        }
        _ => {}
    }
}

/// Visible row index under a terminal cell, accounting for scroll
fn row_under(app: &App, column: u16, row: u16) -> Option<usize> {
    let area = app.list_area;
    if column < area.x
        || column >= area.x + area.width
        || row < area.y
        || row >= area.y + area.height
    {
        return None;
    }
    let index = (row - area.y) as usize + app.model.listing.scroll_offset;
    if index < app.visible_entries().len() {
        Some(index)
    } else {
        None
    }
}

/// Translate a recognized gesture into a model change
pub fn apply_gesture(app: &mut App, gesture: GestureEvent) {
    match gesture {
        GestureEvent::Back => app.navigate_up(),
        GestureEvent::RefreshRequested => {
            app.model.ui.pull = PullIndicator::default();
            app.refresh(true);
        }
        GestureEvent::PullChanged { offset, armed } => {
            let was_armed = app.model.ui.pull.armed;
            app.model.ui.pull = PullIndicator {
                offset,
                armed,
                // One-frame tick when the threshold is crossed, standing in
                // for the haptic a touch device would give
                tick: armed && !was_armed,
            };
        }
        GestureEvent::PullCancelled => {
            app.model.ui.pull = PullIndicator::default();
        }
        GestureEvent::LongPress { index } => {
            let visible = app.visible_entries();
            if let Some(entry) = visible.get(index) {
                let name = entry.name.clone();
                app.model.listing.cursor = index;
                if !app.model.listing.selection_mode {
                    app.model.listing.enter_selection(name);
                }
            }
        }
        GestureEvent::Tap { index } => {
            let visible = app.visible_entries();
            let Some(entry) = visible.get(index) else {
                return;
            };
            let entry = entry.clone();
            app.model.listing.cursor = index;
            if app.model.listing.selection_mode {
                app.model.listing.toggle_selected(&entry.name);
            } else {
                app.open_entry(&entry);
            }
        }
    }
}
