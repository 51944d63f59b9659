//! Instruction set and the canonical program representation

use std::fmt;

/// One of the eight tape-machine instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Instruction {
    /// Map a source character to its instruction, or `None` for comment text.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(Instruction::Right),
            '<' => Some(Instruction::Left),
            '+' => Some(Instruction::Increment),
            '-' => Some(Instruction::Decrement),
            '.' => Some(Instruction::Output),
            ',' => Some(Instruction::Input),
            '[' => Some(Instruction::LoopStart),
            ']' => Some(Instruction::LoopEnd),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Instruction::Right => '>',
            Instruction::Left => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
        }
    }

    pub fn is_bracket(self) -> bool {
        matches!(self, Instruction::LoopStart | Instruction::LoopEnd)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A filtered instruction stream.
///
/// The only way to build a `Program` is through [`super::filter`] (or the
/// `From<&str>` impl that calls it), so every element is guaranteed to be one
/// of the eight instructions and the sequence never changes after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub(crate) fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Program { instructions }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.instructions.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.instructions.iter().copied()
    }
}

impl From<&str> for Program {
    fn from(source: &str) -> Self {
        super::filter(source)
    }
}

/// Canonical text: the instruction characters with nothing in between.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            write!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_mapping_is_bijective_on_alphabet() {
        for c in "><+-.,[]".chars() {
            let instruction = Instruction::from_char(c).expect("alphabet char");
            assert_eq!(instruction.as_char(), c);
        }
    }

    #[test]
    fn test_comment_characters_map_to_none() {
        for c in "abc XYZ\n\t/*#!0123456789".chars() {
            assert_eq!(Instruction::from_char(c), None, "{:?}", c);
        }
    }

    #[test]
    fn test_brackets() {
        assert!(Instruction::LoopStart.is_bracket());
        assert!(Instruction::LoopEnd.is_bracket());
        assert!(!Instruction::Output.is_bracket());
    }
}
