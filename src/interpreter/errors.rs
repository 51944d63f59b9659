//! Error types for loading and executing programs
//!
//! [`CompileError`] covers bracket resolution, [`RuntimeError`] everything that can
//! stop a run. Callers that only need the coarse outcome collapse a result into an
//! [`ExitStatus`].

use std::fmt;
use std::io;
use thiserror::Error;

/// Bracket resolution failure. Terminal for the program: the caller has to supply a
/// corrected source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A `[` was never closed
    #[error("Unmatched '[' at instruction {index}")]
    UnmatchedOpenBracket { index: usize },

    /// A `]` appeared with no open loop to close
    #[error("Unmatched ']' at instruction {index}")]
    UnmatchedCloseBracket { index: usize },
}

impl CompileError {
    /// Instruction index of the offending bracket.
    pub fn index(&self) -> usize {
        match self {
            CompileError::UnmatchedOpenBracket { index }
            | CompileError::UnmatchedCloseBracket { index } => *index,
        }
    }
}

/// Direction of a data pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Errors that stop a run
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The data pointer tried to leave the tape under bounds-checked addressing
    #[error(
        "Data pointer moved {direction} past cell {data_pointer} at instruction {instruction} (tape length {tape_len})"
    )]
    PointerOutOfRange {
        instruction: usize,
        data_pointer: usize,
        tape_len: usize,
        direction: Direction,
    },

    /// Jump resolution was deferred to run time and failed
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Reading input or writing output failed on the host stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse outcome of a run-to-completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    PointerOutOfRange,
    CompileError,
}

impl ExitStatus {
    /// Process exit code: 0 success, 1 pointer out of range, 2 compile error.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::PointerOutOfRange => 1,
            ExitStatus::CompileError => 2,
        }
    }

    /// Collapse a run result. Host I/O failures are not part of the coarse status
    /// and are handed back unchanged.
    pub fn from_result(result: Result<(), RuntimeError>) -> io::Result<Self> {
        match result {
            Ok(()) => Ok(ExitStatus::Success),
            Err(RuntimeError::PointerOutOfRange { .. }) => Ok(ExitStatus::PointerOutOfRange),
            Err(RuntimeError::Compile(_)) => Ok(ExitStatus::CompileError),
            Err(RuntimeError::Io(e)) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = CompileError::UnmatchedCloseBracket { index: 3 };
        assert_eq!(e.to_string(), "Unmatched ']' at instruction 3");
        assert_eq!(e.index(), 3);

        let e = RuntimeError::PointerOutOfRange {
            instruction: 0,
            data_pointer: 0,
            tape_len: 10,
            direction: Direction::Left,
        };
        assert_eq!(
            e.to_string(),
            "Data pointer moved left past cell 0 at instruction 0 (tape length 10)"
        );
    }

    #[test]
    fn test_exit_status_codes() {
        assert_eq!(ExitStatus::from_result(Ok(())).unwrap().code(), 0);
        let out_of_range = RuntimeError::PointerOutOfRange {
            instruction: 1,
            data_pointer: 9,
            tape_len: 10,
            direction: Direction::Right,
        };
        assert_eq!(
            ExitStatus::from_result(Err(out_of_range)).unwrap(),
            ExitStatus::PointerOutOfRange
        );
        let compile = RuntimeError::from(CompileError::UnmatchedOpenBracket { index: 0 });
        assert_eq!(ExitStatus::from_result(Err(compile)).unwrap().code(), 2);
    }

    #[test]
    fn test_io_error_is_not_collapsed() {
        let io = RuntimeError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(ExitStatus::from_result(Err(io)).is_err());
    }
}
