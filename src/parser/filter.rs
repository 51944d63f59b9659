//! Instruction filter
//!
//! Turns raw source text into a [`Program`]. Anything outside the eight-symbol
//! alphabet is comment text and is dropped; there is no comment syntax and the
//! filter cannot fail.

use super::program::{Instruction, Program};

/// Keep the instruction characters of `source`, in order, and drop everything else.
pub fn filter(source: &str) -> Program {
    let instructions = source.chars().filter_map(Instruction::from_char).collect();
    Program::from_instructions(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_strips_comments_and_whitespace() {
        let program = filter("add two: ++ \n loop [ - > + < ] done.");
        assert_eq!(program.to_string(), "++[->+<].");
    }

    #[test]
    fn test_filter_empty_and_comment_only() {
        assert!(filter("").is_empty());
        assert!(filter("just words, nothing else").len() == 1); // the comma
        assert!(filter("/* no code here */").is_empty());
    }

    #[test]
    fn test_filter_keeps_relative_order() {
        let program = filter("]x[y.z,");
        assert_eq!(
            program.instructions(),
            &[
                Instruction::LoopEnd,
                Instruction::LoopStart,
                Instruction::Output,
                Instruction::Input
            ]
        );
    }

    #[test]
    fn test_filter_ignores_non_ascii() {
        let program = filter("加一 + 减一 - ñ ü →");
        assert_eq!(program.to_string(), "+-");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter("a+b-c[d]e.f,g<h>");
        let twice = filter(&once.to_string());
        assert_eq!(once, twice);
    }
}
