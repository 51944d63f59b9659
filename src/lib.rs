//! # Introduction
//!
//! BFX runs programs for the eight-instruction tape language (`>` `<` `+` `-`
//! `.` `,` `[` `]`), steps through them in a debugger, and translates them to
//! C or C++ source.
//!
//! ## Pipeline
//!
//! ```text
//! raw text → filter → Program → JumpMap → Machine (run / step)
//!                            └──────────→ emitter (C / C++ text)
//! ```
//!
//! 1. [`parser`]: drops comment characters and pairs brackets into a
//!    [`parser::JumpMap`].
//! 2. [`interpreter`]: [`interpreter::Machine`], a fixed-length byte tape
//!    with wrap-around or bounds-checked addressing, run-to-completion and
//!    single-step execution over one transition function.
//! 3. [`emitter`]: one line of target source per instruction.
//! 4. [`debugger`] / [`snapshot`]: a stepping session with bounded undo history.
//! 5. [`source_file`]: the saved-file layout with marker comments.
//! 6. [`ui`]: ratatui-based debugger view; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use bfx::interpreter::{interpret, ExitStatus, MachineConfig};
//!
//! let mut output = Vec::new();
//! let status = interpret(",+.", MachineConfig::default(), &mut &b"A"[..], &mut output).unwrap();
//! assert_eq!(status, ExitStatus::Success);
//! assert_eq!(output, b"B");
//! ```

pub mod debugger;
pub mod emitter;
pub mod interpreter;
pub mod parser;
pub mod snapshot;
pub mod source_file;
pub mod ui;
