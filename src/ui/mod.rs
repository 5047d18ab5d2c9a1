//! Terminal rendering of calculator state.
//!
//! Each renderer returns plain text; the binary decides where it goes.

mod display;
mod history;
mod keypad;

pub use display::{render_display, render_status};
pub use history::render_history;
pub use keypad::render_keypad;
