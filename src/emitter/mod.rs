//! Source emitter
//!
//! Renders a [`Program`] as a self-contained C or C++ translation unit: a fixed
//! prologue declaring the memory and pointer, one indented line per instruction,
//! and an epilogue returning 0. `[` opens a native `while` block and `]` closes it.
//!
//! The walk does no nesting bookkeeping of its own. Braces balance exactly when the
//! program's brackets do, so callers that need valid output should resolve the
//! program first (see [`crate::parser::JumpMap::resolve`]).

use crate::interpreter::constants::DEFAULT_TAPE_LEN;
use crate::parser::{Instruction, Program};

/// Target surface syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// C: pointer into a `unsigned char` array, `putchar`/`getchar`
    C,
    /// C++: `std::vector<unsigned char>` with an index, `std::cout`/`std::cin`
    Cpp,
}

impl Target {
    /// Conventional file extension for emitted source
    pub fn extension(self) -> &'static str {
        match self {
            Target::C => "c",
            Target::Cpp => "cpp",
        }
    }

    fn prologue(self, out: &mut String, tape_len: usize) {
        match self {
            Target::C => {
                out.push_str("#include <stdio.h>\n\n");
                out.push_str("int main(void) {\n");
                out.push_str(&format!(
                    "    static unsigned char memory[{}];\n",
                    tape_len
                ));
                out.push_str("    unsigned char *ptr = memory;\n\n");
            }
            Target::Cpp => {
                out.push_str("#include <iostream>\n");
                out.push_str("#include <vector>\n\n");
                out.push_str("int main() {\n");
                out.push_str(&format!(
                    "    std::vector<unsigned char> memory({}, 0);\n",
                    tape_len
                ));
                out.push_str("    std::size_t data_pointer = 0;\n\n");
            }
        }
    }

    /// Both targets wrap the pointer at the ends of memory, like
    /// [`AddressingPolicy::Wrap`](crate::interpreter::AddressingPolicy::Wrap).
    fn statement(self, instruction: Instruction, tape_len: usize) -> String {
        let last = tape_len - 1;
        match (self, instruction) {
            (Target::C, Instruction::Right) => {
                format!("ptr = (ptr == memory + {}) ? memory : ptr + 1;", last)
            }
            (Target::C, Instruction::Left) => {
                format!("ptr = (ptr == memory) ? memory + {} : ptr - 1;", last)
            }
            (Target::C, Instruction::Increment) => "++*ptr;".to_string(),
            (Target::C, Instruction::Decrement) => "--*ptr;".to_string(),
            (Target::C, Instruction::Output) => "putchar(*ptr);".to_string(),
            (Target::C, Instruction::Input) => {
                "{ int c = getchar(); if (c != EOF) *ptr = (unsigned char)c; }".to_string()
            }
            (Target::C, Instruction::LoopStart) => "while (*ptr) {".to_string(),

            (Target::Cpp, Instruction::Right) => format!(
                "data_pointer = (data_pointer == {}) ? 0 : data_pointer + 1;",
                last
            ),
            (Target::Cpp, Instruction::Left) => format!(
                "data_pointer = (data_pointer == 0) ? {} : data_pointer - 1;",
                last
            ),
            (Target::Cpp, Instruction::Increment) => "memory[data_pointer]++;".to_string(),
            (Target::Cpp, Instruction::Decrement) => "memory[data_pointer]--;".to_string(),
            (Target::Cpp, Instruction::Output) => {
                "std::cout.put(static_cast<char>(memory[data_pointer]));".to_string()
            }
            (Target::Cpp, Instruction::Input) => {
                "{ char c; if (std::cin.get(c)) memory[data_pointer] = static_cast<unsigned char>(c); }"
                    .to_string()
            }
            (Target::Cpp, Instruction::LoopStart) => {
                "while (memory[data_pointer] != 0) {".to_string()
            }

            (_, Instruction::LoopEnd) => "}".to_string(),
        }
    }

    fn epilogue(self, out: &mut String) {
        if self == Target::Cpp {
            out.push_str("    std::cout.flush();\n");
        }
        out.push_str("    return 0;\n");
        out.push_str("}\n");
    }
}

/// Emitter parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitConfig {
    /// Size of the emitted memory array; zero is raised to one
    pub tape_len: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        EmitConfig {
            tape_len: DEFAULT_TAPE_LEN,
        }
    }
}

/// Render `program` as `target` source text.
pub fn emit(program: &Program, target: Target, config: &EmitConfig) -> String {
    let tape_len = config.tape_len.max(1);
    let mut out = String::new();

    target.prologue(&mut out, tape_len);
    for instruction in program.iter() {
        out.push_str("    ");
        out.push_str(&target.statement(instruction, tape_len));
        out.push('\n');
    }
    target.epilogue(&mut out);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::filter;

    fn body_lines(text: &str) -> Vec<&str> {
        text.lines()
            .skip_while(|line| !line.is_empty())
            .skip(1)
            .skip_while(|line| !line.is_empty())
            .skip(1)
            .take_while(|line| !line.trim_start().starts_with("return"))
            .map(str::trim)
            .collect()
    }

    #[test]
    fn test_c_increment_then_output() {
        let text = emit(&filter("+."), Target::C, &EmitConfig::default());
        assert!(text.starts_with("#include <stdio.h>\n"));
        assert!(text.contains("static unsigned char memory[30000];"));
        assert_eq!(body_lines(&text), vec!["++*ptr;", "putchar(*ptr);"]);
        assert!(text.ends_with("    return 0;\n}\n"));
    }

    #[test]
    fn test_one_line_per_instruction() {
        let program = filter("><+-.,[]");
        for target in [Target::C, Target::Cpp] {
            let text = emit(&program, target, &EmitConfig::default());
            let loops = text.matches("while").count();
            assert_eq!(loops, 1, "{:?}", target);
            let indented = text.lines().filter(|l| l.starts_with("    ")).count();
            // 2 prologue declarations + 8 statements + return (+ flush for C++)
            let expected = if target == Target::Cpp { 12 } else { 11 };
            assert_eq!(indented, expected, "{:?}", target);
        }
    }

    #[test]
    fn test_cpp_uses_tape_len() {
        let text = emit(&filter("<>"), Target::Cpp, &EmitConfig { tape_len: 10 });
        assert!(text.contains("std::vector<unsigned char> memory(10, 0);"));
        assert!(text.contains("data_pointer = (data_pointer == 0) ? 9 : data_pointer - 1;"));
        assert!(text.contains("data_pointer = (data_pointer == 9) ? 0 : data_pointer + 1;"));
    }

    #[test]
    fn test_c_pointer_wraps_at_both_ends() {
        let text = emit(&filter("<>"), Target::C, &EmitConfig { tape_len: 4 });
        assert_eq!(
            body_lines(&text),
            vec![
                "ptr = (ptr == memory) ? memory + 3 : ptr - 1;",
                "ptr = (ptr == memory + 3) ? memory : ptr + 1;",
            ]
        );
    }

    #[test]
    fn test_single_cell_tape_wraps_onto_itself() {
        let text = emit(&filter(">"), Target::C, &EmitConfig { tape_len: 0 });
        assert!(text.contains("static unsigned char memory[1];"));
        assert!(text.contains("ptr = (ptr == memory + 0) ? memory : ptr + 1;"));
    }

    #[test]
    fn test_unbalanced_program_is_emitted_verbatim() {
        let text = emit(&filter("[["), Target::C, &EmitConfig::default());
        assert_eq!(text.matches('{').count() - text.matches('}').count(), 2);
    }

    #[test]
    fn test_empty_program_is_prologue_and_epilogue() {
        let text = emit(&Program::default(), Target::C, &EmitConfig::default());
        assert!(text.contains("int main(void) {"));
        assert!(body_lines(&text).is_empty());
    }

    #[test]
    fn test_extension() {
        assert_eq!(Target::C.extension(), "c");
        assert_eq!(Target::Cpp.extension(), "cpp");
    }
}
