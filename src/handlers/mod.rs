//! Event Handlers
//!
//! Free functions that take &mut App and process one event each:
//! - api: results coming back from the background fetch tasks
//! - keyboard: user keyboard input, modal layers first
//! - pointer: mouse events fed through the gesture recognizer

pub mod api;
pub mod keyboard;
pub mod pointer;

pub use api::handle_api_response;
pub use keyboard::handle_key;
pub use pointer::handle_mouse;
