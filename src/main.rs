// BFX: tape-language interpreter, step debugger and C/C++ emitter

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use bfx::debugger::{Session, DEFAULT_HISTORY_LIMIT};
use bfx::emitter::{emit, EmitConfig, Target};
use bfx::interpreter::constants::DEFAULT_TAPE_LEN;
use bfx::interpreter::{
    AddressingPolicy, ExitStatus, InputMode, Machine, MachineConfig, OutputFormat, RuntimeError,
};
use bfx::parser::{filter, JumpMap, Program};
use bfx::source_file;
use bfx::ui::App;

#[derive(Debug, Parser)]
#[command(name = "bfx", version, about = "Run, debug and translate tape-language programs")]
struct Cli {
    /// Suppress status messages on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a program to completion, reading `,` input from stdin
    Run {
        file: PathBuf,
        #[command(flatten)]
        machine: MachineArgs,
    },
    /// Step through a program in the terminal debugger
    Debug {
        file: PathBuf,
        #[command(flatten)]
        machine: MachineArgs,
        /// Bytes queued for `,`
        #[arg(long, conflicts_with = "input_file")]
        input: Option<String>,
        /// File whose contents are queued for `,`
        #[arg(long)]
        input_file: Option<PathBuf>,
        /// Number of steps that can be undone
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        history: usize,
    },
    /// Translate a program to C or C++ source
    Emit {
        file: PathBuf,
        #[arg(short, long, value_enum, default_value_t = TargetArg::C)]
        target: TargetArg,
        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_TAPE_LEN)]
        tape_len: usize,
        /// Emit even when brackets do not balance (the result will not compile)
        #[arg(long)]
        allow_unbalanced: bool,
    },
    /// Print the canonical instruction stream
    Filter { file: PathBuf },
    /// Save a program in the commented file layout
    Save {
        file: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Args)]
struct MachineArgs {
    /// Number of tape cells
    #[arg(long, default_value_t = DEFAULT_TAPE_LEN)]
    tape_len: usize,
    /// Fail instead of wrapping when the data pointer leaves the tape
    #[arg(long)]
    bounds_checked: bool,
    /// Print cells as decimal numbers instead of raw bytes
    #[arg(long)]
    decimal: bool,
    /// Skip line breaks when reading input
    #[arg(long)]
    skip_newlines: bool,
}

impl MachineArgs {
    fn config(&self) -> MachineConfig {
        MachineConfig::default()
            .with_tape_len(self.tape_len)
            .with_addressing(if self.bounds_checked {
                AddressingPolicy::BoundsChecked
            } else {
                AddressingPolicy::Wrap
            })
            .with_output_format(if self.decimal {
                OutputFormat::Decimal
            } else {
                OutputFormat::Char
            })
            .with_input_mode(if self.skip_newlines {
                InputMode::SkipNewlines
            } else {
                InputMode::Raw
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetArg {
    C,
    Cpp,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::C => Target::C,
            TargetArg::Cpp => Target::Cpp,
        }
    }
}

/// Read a program file, removing saved-file markers. Invalid UTF-8 is replaced,
/// which never affects the instruction characters.
fn read_source(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(source_file::unwrap(&String::from_utf8_lossy(&bytes)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    macro_rules! status {
        ($($arg:tt)*) => {
            if !quiet {
                eprintln!($($arg)*);
            }
        };
    }

    match cli.command {
        Command::Run { file, machine } => {
            let program = filter(&read_source(&file)?);
            status!(
                "Loaded {} instructions from {}",
                program.len(),
                file.display()
            );

            let mut vm = Machine::new(machine.config());
            vm.load_deferred(program);

            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut output = BufWriter::new(stdout.lock());
            let result = vm.run(&mut stdin.lock(), &mut output);
            drop(output);

            if let Some(message) = failure_message(&result) {
                eprintln!();
                eprintln!("Error: {}", message);
            }
            let exit = ExitStatus::from_result(result)?;
            if exit == ExitStatus::Success {
                status!("\nExecution completed successfully.");
            }
            std::process::exit(exit.code());
        }

        Command::Debug {
            file,
            machine,
            input,
            input_file,
            history,
        } => {
            let program = filter(&read_source(&file)?);
            let input = match (input, input_file) {
                (Some(text), _) => text.into_bytes(),
                (None, Some(path)) => fs::read(path)?,
                (None, None) => Vec::new(),
            };

            let session = match Session::new(program, machine.config(), input, history) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("Compile error: {}", e);
                    std::process::exit(ExitStatus::CompileError.code());
                }
            };

            run_debugger(session)?;
        }

        Command::Emit {
            file,
            target,
            output,
            tape_len,
            allow_unbalanced,
        } => {
            let program = filter(&read_source(&file)?);
            if let Err(e) = JumpMap::resolve(&program) {
                if !allow_unbalanced {
                    eprintln!("Compile error: {}", e);
                    eprintln!("Use --allow-unbalanced to emit anyway.");
                    std::process::exit(ExitStatus::CompileError.code());
                }
                status!("Warning: {}; emitted source will not compile", e);
            }

            let target = Target::from(target);
            let text = emit(&program, target, &EmitConfig { tape_len });
            match output {
                Some(path) => {
                    fs::write(&path, text)?;
                    status!("Wrote {} source to {}", target.extension(), path.display());
                }
                None => io::stdout().lock().write_all(text.as_bytes())?,
            }
        }

        Command::Filter { file } => {
            let program: Program = filter(&read_source(&file)?);
            println!("{}", program);
        }

        Command::Save { file, output } => {
            let original = read_source(&file)?;
            fs::write(&output, source_file::wrap(&original))?;
            status!("Saved {} to {}", file.display(), output.display());
        }
    }

    Ok(())
}

/// Message for a failed run. Host I/O errors are left to `main`, which reports
/// them when they propagate.
fn failure_message(result: &Result<(), RuntimeError>) -> Option<String> {
    match result {
        Ok(()) | Err(RuntimeError::Io(_)) => None,
        Err(e) => Some(e.to_string()),
    }
}

fn run_debugger(session: Session) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
