//! Source front end
//!
//! - [`program`]: the [`Instruction`] alphabet and the canonical [`Program`]
//! - [`filter`](mod@filter): raw text → [`Program`], dropping comment characters
//! - [`jumps`]: bracket pairing into a [`JumpMap`]

pub mod filter;
pub mod jumps;
pub mod program;

pub use filter::filter;
pub use jumps::JumpMap;
pub use program::{Instruction, Program};
