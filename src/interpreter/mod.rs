//! Tape machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the [`Machine`](engine::Machine) with run-to-completion and single-step entry points
//! - [`tape`]: the fixed-length byte tape
//! - [`config`]: construction parameters (tape length, addressing, I/O formatting)
//! - [`errors`]: compile and runtime error types plus the coarse [`ExitStatus`](errors::ExitStatus)
//!
//! # Execution Model
//!
//! The instruction at the instruction pointer is executed, then the pointer
//! advances by one. Loop brackets first jump to their partner from the
//! precomputed [`JumpMap`](crate::parser::JumpMap), so the advance lands just
//! past it.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod tape;

pub use config::{AddressingPolicy, InputMode, MachineConfig, OutputFormat};
pub use engine::{interpret, Machine};
pub use errors::{CompileError, ExitStatus, RuntimeError};
