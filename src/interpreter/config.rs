//! Machine construction parameters
//!
//! Everything that changes instruction behaviour is fixed here when the machine
//! is built. Nothing is read from globals or the environment.

use super::constants::DEFAULT_TAPE_LEN;

/// What `<` and `>` do at the ends of the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressingPolicy {
    /// The tape is circular: moving past either end lands on the other end
    #[default]
    Wrap,
    /// Moving past either end is a [`PointerOutOfRange`](super::errors::RuntimeError::PointerOutOfRange) error
    BoundsChecked,
}

/// How `.` renders a cell on the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The cell value as one raw byte
    #[default]
    Char,
    /// The cell value in base 10 followed by a space
    Decimal,
}

/// How `,` consumes the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Every byte is delivered as-is
    #[default]
    Raw,
    /// Line breaks (`\n`, `\r`) are skipped, matching a line-buffered console
    SkipNewlines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    pub tape_len: usize,
    pub addressing: AddressingPolicy,
    pub output_format: OutputFormat,
    pub input_mode: InputMode,
}

impl MachineConfig {
    pub fn bounds_checked() -> Self {
        MachineConfig {
            addressing: AddressingPolicy::BoundsChecked,
            ..Self::default()
        }
    }

    pub fn with_tape_len(mut self, tape_len: usize) -> Self {
        self.tape_len = tape_len;
        self
    }

    pub fn with_addressing(mut self, addressing: AddressingPolicy) -> Self {
        self.addressing = addressing;
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            tape_len: DEFAULT_TAPE_LEN,
            addressing: AddressingPolicy::Wrap,
            output_format: OutputFormat::Char,
            input_mode: InputMode::Raw,
        }
    }
}
