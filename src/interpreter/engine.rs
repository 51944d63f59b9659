// Execution engine for the tape machine

use crate::interpreter::config::{AddressingPolicy, InputMode, MachineConfig, OutputFormat};
use crate::interpreter::errors::{CompileError, Direction, ExitStatus, RuntimeError};
use crate::interpreter::tape::Tape;
use crate::parser::{filter, Instruction, JumpMap, Program};
use crate::snapshot::Snapshot;
use std::io::{self, Read, Write};

/// Tape machine executing one loaded [`Program`].
///
/// [`Machine::run`] and [`Machine::step`] both go through the same transition
/// function, so run-to-completion is literally "step until there is nothing left".
#[derive(Debug, Clone)]
pub struct Machine {
    config: MachineConfig,

    program: Program,

    /// `None` until the program's brackets have been resolved
    jumps: Option<JumpMap>,

    tape: Tape,

    data_pointer: usize,

    /// Index of the next instruction to execute
    instruction_pointer: usize,
}

impl Machine {
    /// Create a machine with an empty program and a zeroed tape
    pub fn new(config: MachineConfig) -> Self {
        Machine {
            config,
            program: Program::default(),
            jumps: Some(JumpMap::default()),
            tape: Tape::new(config.tape_len),
            data_pointer: 0,
            instruction_pointer: 0,
        }
    }

    /// Load `program`, resolving its brackets immediately.
    ///
    /// On failure the previously loaded program is kept untouched.
    pub fn load(&mut self, program: Program) -> Result<(), CompileError> {
        let jumps = JumpMap::resolve(&program)?;
        self.install(program, Some(jumps));
        Ok(())
    }

    /// Load `program` without resolving its brackets. Resolution happens on the
    /// first [`run`](Self::run) or [`step`](Self::step), which then report
    /// [`RuntimeError::Compile`] for unbalanced programs.
    pub fn load_deferred(&mut self, program: Program) {
        self.install(program, None);
    }

    /// Filter `source` and load the result.
    pub fn load_source(&mut self, source: &str) -> Result<(), CompileError> {
        self.load(filter(source))
    }

    fn install(&mut self, program: Program, jumps: Option<JumpMap>) {
        self.program = program;
        self.jumps = jumps;
        self.reset();
    }

    /// Zero the tape and move both pointers back to the start
    pub fn reset(&mut self) {
        self.tape.clear();
        self.data_pointer = 0;
        self.instruction_pointer = 0;
    }

    /// Run until the instruction pointer leaves the program.
    ///
    /// A pointer-range failure stops the run with the machine left exactly as it
    /// was before the failing instruction.
    pub fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<(), RuntimeError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let result = self.run_inner(input, output);
        output.flush()?;
        result
    }

    fn run_inner<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<(), RuntimeError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        while self.step(input, output)? {}
        Ok(())
    }

    /// Execute a single instruction.
    ///
    /// Returns `Ok(false)` without touching anything when the program has already
    /// finished, `Ok(true)` after executing one instruction.
    pub fn step<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<bool, RuntimeError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        self.ensure_resolved()?;

        let Some(instruction) = self.program.get(self.instruction_pointer) else {
            return Ok(false);
        };

        self.execute(instruction, input, output)?;
        self.instruction_pointer += 1;
        Ok(true)
    }

    fn ensure_resolved(&mut self) -> Result<(), CompileError> {
        if self.jumps.is_none() {
            self.jumps = Some(JumpMap::resolve(&self.program)?);
        }
        Ok(())
    }

    /// The transition function. Jumps set the instruction pointer to the matching
    /// bracket; the caller's uniform advance then lands one past it.
    fn execute<R, W>(
        &mut self,
        instruction: Instruction,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), RuntimeError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        match instruction {
            Instruction::Right => {
                self.data_pointer = self.moved_pointer(Direction::Right)?;
            }
            Instruction::Left => {
                self.data_pointer = self.moved_pointer(Direction::Left)?;
            }
            Instruction::Increment => self.tape.increment(self.data_pointer),
            Instruction::Decrement => self.tape.decrement(self.data_pointer),
            Instruction::Output => self.write_cell(output)?,
            Instruction::Input => {
                // Anything already printed should be visible before we block on input
                output.flush()?;
                if let Some(byte) = self.read_byte(input)? {
                    self.tape.set(self.data_pointer, byte);
                }
            }
            Instruction::LoopStart => {
                if self.current_cell() == 0 {
                    self.instruction_pointer = self.jump_target()?;
                }
            }
            Instruction::LoopEnd => {
                if self.current_cell() != 0 {
                    self.instruction_pointer = self.jump_target()?;
                }
            }
        }
        Ok(())
    }

    fn moved_pointer(&self, direction: Direction) -> Result<usize, RuntimeError> {
        let len = self.tape.len();
        let dp = self.data_pointer;
        let at_edge = match direction {
            Direction::Left => dp == 0,
            Direction::Right => dp + 1 == len,
        };

        if at_edge && self.config.addressing == AddressingPolicy::BoundsChecked {
            return Err(RuntimeError::PointerOutOfRange {
                instruction: self.instruction_pointer,
                data_pointer: dp,
                tape_len: len,
                direction,
            });
        }

        Ok(match direction {
            Direction::Left => (dp + len - 1) % len,
            Direction::Right => (dp + 1) % len,
        })
    }

    fn jump_target(&self) -> Result<usize, CompileError> {
        let ip = self.instruction_pointer;
        self.jumps
            .as_ref()
            .and_then(|jumps| jumps.target(ip))
            .ok_or(match self.program.get(ip) {
                Some(Instruction::LoopEnd) => CompileError::UnmatchedCloseBracket { index: ip },
                _ => CompileError::UnmatchedOpenBracket { index: ip },
            })
    }

    fn write_cell<W: Write + ?Sized>(&self, output: &mut W) -> io::Result<()> {
        let value = self.current_cell();
        match self.config.output_format {
            OutputFormat::Char => output.write_all(&[value]),
            OutputFormat::Decimal => write!(output, "{} ", value),
        }
    }

    /// Next input byte, or `None` at end of input
    fn read_byte<R: Read + ?Sized>(&self, input: &mut R) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    let skip = self.config.input_mode == InputMode::SkipNewlines
                        && matches!(buf[0], b'\n' | b'\r');
                    if !skip {
                        return Ok(Some(buf[0]));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    pub(crate) fn take_snapshot(&self, input_position: u64, output_len: usize) -> Snapshot {
        Snapshot {
            instruction_pointer: self.instruction_pointer,
            data_pointer: self.data_pointer,
            cell: self.current_cell(),
            input_position,
            output_len,
        }
    }

    /// Undo one step. A step only ever writes the cell under the data pointer it
    /// started with, so restoring that cell and both pointers is enough.
    pub(crate) fn restore_snapshot(&mut self, snapshot: &Snapshot) {
        self.instruction_pointer = snapshot.instruction_pointer;
        self.data_pointer = snapshot.data_pointer;
        self.tape.set(snapshot.data_pointer, snapshot.cell);
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn data_pointer(&self) -> usize {
        self.data_pointer
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn current_cell(&self) -> u8 {
        self.tape.cells()[self.data_pointer]
    }

    /// The instruction the next step will execute
    pub fn current_instruction(&self) -> Option<Instruction> {
        self.program.get(self.instruction_pointer)
    }

    pub fn is_finished(&self) -> bool {
        self.instruction_pointer >= self.program.len()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}

/// Filter `source`, run it to completion and report the coarse outcome.
///
/// Bracket resolution is deferred to the run, so an unbalanced program reports
/// [`ExitStatus::CompileError`] instead of failing to load.
pub fn interpret<R, W>(
    source: &str,
    config: MachineConfig,
    input: &mut R,
    output: &mut W,
) -> io::Result<ExitStatus>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut machine = Machine::new(config);
    machine.load_deferred(filter(source));
    ExitStatus::from_result(machine.run(input, output))
}
