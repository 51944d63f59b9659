//! Step debugger session
//!
//! A [`Session`] wraps a [`Machine`] together with a fixed input buffer, the
//! captured output and a bounded [`History`], so execution can be stepped
//! forward and backward and inspected between steps. It holds no terminal
//! state; the TUI in [`crate::ui`] is one consumer.

use crate::interpreter::config::MachineConfig;
use crate::interpreter::engine::Machine;
use crate::interpreter::errors::{CompileError, RuntimeError};
use crate::parser::Program;
use crate::snapshot::History;
use std::io::Cursor;

/// Default number of steps that can be undone
pub const DEFAULT_HISTORY_LIMIT: usize = 100_000;

/// Result of one step request
#[derive(Debug)]
pub enum StepOutcome {
    /// One instruction was executed
    Stepped,
    /// The program had already finished
    Finished,
    /// The instruction failed; the machine is left before it
    Failed(RuntimeError),
}

#[derive(Debug)]
pub struct Session {
    machine: Machine,
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
    history: History,
    steps: u64,
    last_error: Option<String>,
}

impl Session {
    /// Start a session over `program` with `input` queued for `,`.
    pub fn new(
        program: Program,
        config: MachineConfig,
        input: Vec<u8>,
        history_limit: usize,
    ) -> Result<Self, CompileError> {
        let mut machine = Machine::new(config);
        machine.load(program)?;
        Ok(Session {
            machine,
            input: Cursor::new(input),
            output: Vec::new(),
            history: History::new(history_limit),
            steps: 0,
            last_error: None,
        })
    }

    /// Execute one instruction, recording how to undo it
    pub fn step_forward(&mut self) -> StepOutcome {
        if self.machine.is_finished() {
            return StepOutcome::Finished;
        }

        let snapshot = self
            .machine
            .take_snapshot(self.input.position(), self.output.len());

        match self.machine.step(&mut self.input, &mut self.output) {
            Ok(true) => {
                self.history.push(snapshot);
                self.steps += 1;
                self.last_error = None;
                StepOutcome::Stepped
            }
            Ok(false) => StepOutcome::Finished,
            Err(e) => {
                self.last_error = Some(e.to_string());
                StepOutcome::Failed(e)
            }
        }
    }

    /// Undo the most recent step. Returns false when the history is exhausted.
    pub fn step_backward(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.machine.restore_snapshot(&snapshot);
        self.input.set_position(snapshot.input_position);
        self.output.truncate(snapshot.output_len);
        self.steps -= 1;
        self.last_error = None;
        true
    }

    /// Step forward until the program ends, fails, or `max_steps` steps were taken.
    /// Returns the number of steps executed.
    pub fn run_to_end(&mut self, max_steps: u64) -> u64 {
        let mut taken = 0;
        while taken < max_steps {
            match self.step_forward() {
                StepOutcome::Stepped => taken += 1,
                StepOutcome::Finished | StepOutcome::Failed(_) => break,
            }
        }
        taken
    }

    /// Step backward as far as the history allows
    pub fn rewind_to_start(&mut self) {
        while self.step_backward() {}
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Output produced so far
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Input not yet consumed by `,`
    pub fn remaining_input(&self) -> &[u8] {
        let data = self.input.get_ref();
        let pos = (self.input.position() as usize).min(data.len());
        &data[pos..]
    }

    /// Steps executed since the start (undone steps are subtracted)
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Steps that can currently be undone
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Steps whose undo records were evicted by the history limit
    pub fn dropped_snapshots(&self) -> usize {
        self.history.dropped()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.machine.is_finished()
    }
}
