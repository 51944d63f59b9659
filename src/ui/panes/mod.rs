//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: the filtered program with the next instruction highlighted
//! - [`tape`]: a window of tape cells around the data pointer
//! - [`terminal`]: output written by `.` so far
//! - [`status`]: status bar with keybindings and execution state
//!
//! Each pane module exports a `render_*` function that draws from borrowed
//! session state and only mutates its own scroll offset.

pub mod source;
pub mod status;
pub mod tape;
pub mod terminal;

pub use source::render_program_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tape::render_tape_pane;
pub use terminal::render_terminal_pane;
