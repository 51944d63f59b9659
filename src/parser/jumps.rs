//! Bracket resolution
//!
//! A single stack scan pairs every `[` with its `]`. Both directions are stored,
//! so the interpreter can jump forward past a loop body or back to its start in
//! one lookup. Because pairs are popped off a stack they always nest properly.

use super::program::{Instruction, Program};
use crate::interpreter::errors::CompileError;
use rustc_hash::FxHashMap;

/// Bidirectional map between matching bracket positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpMap {
    targets: FxHashMap<usize, usize>,
}

impl JumpMap {
    /// Pair up the brackets of `program`.
    ///
    /// Fails on the first `]` that has nothing to close, or, after the scan, on the
    /// earliest `[` left open.
    pub fn resolve(program: &Program) -> Result<Self, CompileError> {
        let mut targets = FxHashMap::default();
        let mut open: Vec<usize> = Vec::new();

        for (index, instruction) in program.iter().enumerate() {
            match instruction {
                Instruction::LoopStart => open.push(index),
                Instruction::LoopEnd => {
                    let start = open
                        .pop()
                        .ok_or(CompileError::UnmatchedCloseBracket { index })?;
                    targets.insert(start, index);
                    targets.insert(index, start);
                }
                _ => {}
            }
        }

        if let Some(&index) = open.first() {
            return Err(CompileError::UnmatchedOpenBracket { index });
        }

        Ok(JumpMap { targets })
    }

    /// Position of the bracket matching the one at `index`.
    pub fn target(&self, index: usize) -> Option<usize> {
        self.targets.get(&index).copied()
    }

    /// Number of bracket positions in the map (twice the number of loops).
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets.iter().map(|(&from, &to)| (from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::filter;

    #[test]
    fn test_resolve_nested() {
        let map = JumpMap::resolve(&filter("[[]+[]]")).unwrap();
        assert_eq!(map.target(0), Some(6));
        assert_eq!(map.target(6), Some(0));
        assert_eq!(map.target(1), Some(2));
        assert_eq!(map.target(4), Some(5));
        assert_eq!(map.target(3), None);
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn test_resolve_empty_program() {
        let map = JumpMap::resolve(&filter("")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_brackets_only_is_valid() {
        assert!(JumpMap::resolve(&filter("[][[]]")).is_ok());
    }

    #[test]
    fn test_unmatched_close() {
        assert_eq!(
            JumpMap::resolve(&filter("]")),
            Err(CompileError::UnmatchedCloseBracket { index: 0 })
        );
        assert_eq!(
            JumpMap::resolve(&filter("[]]")),
            Err(CompileError::UnmatchedCloseBracket { index: 2 })
        );
    }

    #[test]
    fn test_unmatched_open_reports_earliest() {
        assert_eq!(
            JumpMap::resolve(&filter("+[")),
            Err(CompileError::UnmatchedOpenBracket { index: 1 })
        );
        assert_eq!(
            JumpMap::resolve(&filter("[[]")),
            Err(CompileError::UnmatchedOpenBracket { index: 0 })
        );
    }

    #[test]
    fn test_close_before_open_is_close_error() {
        assert_eq!(
            JumpMap::resolve(&filter("][")),
            Err(CompileError::UnmatchedCloseBracket { index: 0 })
        );
    }
}
