// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (header, list, toolbar, status)
// - render: Main orchestration function that coordinates all rendering
// - connect: Renders the connect screen (login form + saved logins)
// - file_list: Renders the directory listing with the pull indicator
// - status_bar: Renders header, toolbar and bottom status/legend lines
// - dialogs: Renders confirmation dialogs and input prompts
// - preview: Renders the file preview popup (text, image, handoff)
// - toast: Renders toast notifications (brief pop-up messages)

pub mod connect;
pub mod dialogs;
pub mod file_list;
pub mod layout;
pub mod preview;
pub mod render;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
