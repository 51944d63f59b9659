// Integration tests for the tape machine

use bfx::debugger::{Session, StepOutcome};
use bfx::interpreter::errors::Direction;
use bfx::interpreter::{
    interpret, CompileError, ExitStatus, Machine, MachineConfig, RuntimeError,
};
use bfx::parser::{filter, JumpMap};
use bfx::source_file;
use std::io::{self, empty, Cursor};

const HELLO_HEAD: &str =
    "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.";

const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

fn run_source(source: &str, config: MachineConfig, input: &[u8]) -> (Machine, Vec<u8>) {
    let mut machine = Machine::new(config);
    machine.load_source(source).expect("Load failed");
    let mut output = Vec::new();
    machine
        .run(&mut Cursor::new(input.to_vec()), &mut output)
        .expect("Execution failed");
    (machine, output)
}

#[test]
fn test_hello_head_outputs_h_then_e() {
    let (_, output) = run_source(HELLO_HEAD, MachineConfig::default(), b"");
    assert!(output.len() >= 2);
    assert_eq!(&output[..2], b"He");
    assert_eq!(output, b"Hello");
}

#[test]
fn test_hello_world() {
    let (_, output) = run_source(HELLO_WORLD, MachineConfig::default(), b"");
    assert_eq!(output, b"Hello World!\n");
}

#[test]
fn test_hello_world_with_comments() {
    let commented = "Set cell #0 to 8\n++++++++\nLoop: [>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]\n\
                     print: >>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    let (_, output) = run_source(commented, MachineConfig::default(), b"");
    assert_eq!(output, b"Hello World!\n");
}

#[test]
fn test_echo_single_byte() {
    let mut output = Vec::new();
    let status = interpret(
        ",.",
        MachineConfig::default(),
        &mut Cursor::new(vec![65u8]),
        &mut output,
    )
    .unwrap();
    assert_eq!(status, ExitStatus::Success);
    assert_eq!(output, vec![65u8]);
}

#[test]
fn test_cat_until_eof() {
    // Echoes input until end of input leaves the cleared cell at zero
    let (_, output) = run_source(",[.[-],]", MachineConfig::default(), b"tape");
    assert_eq!(output, b"tape");
}

#[test]
fn test_empty_program_succeeds_with_blank_tape() {
    let mut machine = Machine::default();
    machine.load_source("no instructions here").unwrap();
    assert!(machine.program().is_empty());
    machine.run(&mut empty(), &mut io::sink()).unwrap();
    assert!(machine.tape().is_blank());
    assert_eq!(machine.tape().len(), 30_000);
}

#[test]
fn test_unmatched_brackets() {
    assert_eq!(
        JumpMap::resolve(&filter("]")),
        Err(CompileError::UnmatchedCloseBracket { index: 0 })
    );
    assert_eq!(
        JumpMap::resolve(&filter("+[")),
        Err(CompileError::UnmatchedOpenBracket { index: 1 })
    );
}

#[test]
fn test_bounds_checked_left_from_origin() {
    let mut machine = Machine::new(MachineConfig::bounds_checked());
    machine.load_source("<").unwrap();
    let err = machine.run(&mut empty(), &mut io::sink()).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::PointerOutOfRange {
            instruction: 0,
            data_pointer: 0,
            direction: Direction::Left,
            ..
        }
    ));
    assert!(machine.tape().is_blank());
    assert_eq!(machine.data_pointer(), 0);
    assert_eq!(
        ExitStatus::from_result(Err(err)).unwrap(),
        ExitStatus::PointerOutOfRange
    );
}

#[test]
fn test_wrap_policy_allows_left_from_origin() {
    let (machine, _) = run_source("<+", MachineConfig::default(), b"");
    assert_eq!(machine.data_pointer(), 29_999);
    assert_eq!(machine.tape().get(29_999), Some(1));
}

#[test]
fn test_deferred_compile_error_status() {
    let mut output = Vec::new();
    let status = interpret("+.[", MachineConfig::default(), &mut empty(), &mut output).unwrap();
    assert_eq!(status, ExitStatus::CompileError);
    assert!(output.is_empty());
}

#[test]
fn test_step_and_run_agree() {
    let mut stepped = Machine::default();
    stepped.load_source(HELLO_WORLD).unwrap();
    let mut stepped_output = Vec::new();
    let mut input = empty();
    while stepped.step(&mut input, &mut stepped_output).unwrap() {}

    let (ran, ran_output) = run_source(HELLO_WORLD, MachineConfig::default(), b"");
    assert_eq!(stepped_output, ran_output);
    assert_eq!(stepped.tape(), ran.tape());
    assert_eq!(stepped.data_pointer(), ran.data_pointer());
}

#[test]
fn test_debugger_session_matches_run() {
    let mut session = Session::new(
        filter(HELLO_HEAD),
        MachineConfig::default(),
        Vec::new(),
        1_000_000,
    )
    .unwrap();
    session.run_to_end(1_000_000);
    assert!(session.is_finished());
    assert_eq!(session.output(), b"Hello");
    assert!(matches!(session.step_forward(), StepOutcome::Finished));

    session.rewind_to_start();
    assert_eq!(session.steps(), 0);
    assert!(session.machine().tape().is_blank());
}

#[test]
fn test_saved_file_runs_once() {
    let saved = source_file::wrap("print A: ++++++++[>++++++++<-]>+.");
    let (_, output) = run_source(
        &source_file::unwrap(&saved),
        MachineConfig::default(),
        b"",
    );
    assert_eq!(output, b"A");
}
