//! Main TUI application state and logic

use crate::debugger::{Session, StepOutcome};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Upper bound on steps taken by a single "run to end" key press
const RUN_TO_END_LIMIT: u64 = 10_000_000;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Program,
    Tape,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (program -> output -> tape)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Program,
        }
    }
}

/// The main application state
pub struct App {
    pub session: Session,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub program_scroll: usize,
    pub tape_offset: isize,
    pub output_scroll: usize,

    /// Keep the current instruction in view; cleared by manual scrolling
    pub follow_program: bool,

    pub should_quit: bool,

    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Delay between auto-play steps
    pub play_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            focused_pane: FocusedPane::Program,
            program_scroll: 0,
            tape_offset: 0,
            output_scroll: 0,
            follow_program: true,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            play_interval: Duration::from_millis(200),
            last_play_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval {
                if !self.step_forward() {
                    self.is_playing = false;
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        // Left column: Program (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        let machine = self.session.machine();
        let current = (!machine.is_finished()).then(|| machine.instruction_pointer());

        super::panes::render_program_pane(
            frame,
            left_rows[0],
            machine.program(),
            current,
            self.focused_pane == FocusedPane::Program,
            self.follow_program,
            &mut self.program_scroll,
        );

        super::panes::render_terminal_pane(
            frame,
            left_rows[1],
            self.session.output(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_tape_pane(
            frame,
            columns[1],
            machine.tape(),
            machine.data_pointer(),
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_offset,
        );

        let message = self
            .session
            .last_error()
            .unwrap_or(self.status_message.as_str());

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                message,
                steps: self.session.steps(),
                undo_depth: self.session.undo_depth(),
                dropped: self.session.dropped_snapshots(),
                has_error: self.session.last_error().is_some(),
                is_playing: self.is_playing,
                is_finished: self.session.is_finished(),
            },
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if !self.step_forward() {
                        break;
                    }
                    stepped += 1;
                }
                if self.session.last_error().is_none() {
                    self.status_message = format!("Stepped forward {} step(s)", stepped);
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Right => {
                self.is_playing = false;
                if self.step_forward() {
                    self.status_message = "Stepped forward".to_string();
                }
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Up => self.scroll(-1),
            KeyCode::Down => self.scroll(1),
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now()
                        .checked_sub(self.play_interval)
                        .unwrap_or_else(Instant::now);
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Char('+') => {
                self.play_interval = (self.play_interval / 2).max(Duration::from_millis(10));
                self.status_message = format!("Play interval {} ms", self.play_interval.as_millis());
            }
            KeyCode::Char('-') => {
                self.play_interval = (self.play_interval * 2).min(Duration::from_secs(2));
                self.status_message = format!("Play interval {} ms", self.play_interval.as_millis());
            }
            KeyCode::Enter => {
                self.is_playing = false;
                let taken = self.session.run_to_end(RUN_TO_END_LIMIT);
                self.after_step();
                self.status_message = if self.session.is_finished() {
                    format!("Ran {} step(s) to the end", taken)
                } else {
                    format!("Stopped after {} step(s)", taken)
                };
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.session.rewind_to_start();
                self.after_step();
                self.status_message = if self.session.steps() == 0 {
                    "Jumped to start".to_string()
                } else {
                    "Rewound as far as history allows".to_string()
                };
            }
            _ => {}
        }
    }

    fn scroll(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Program => {
                self.follow_program = false;
                self.program_scroll = self.program_scroll.saturating_add_signed(delta);
            }
            FocusedPane::Tape => {
                self.tape_offset += delta;
            }
            FocusedPane::Output => {
                self.output_scroll = self.output_scroll.saturating_add_signed(delta);
            }
        }
    }

    /// Re-anchor the views on the machine after it moved
    fn after_step(&mut self) {
        self.follow_program = true;
        self.tape_offset = 0;
        self.output_scroll = usize::MAX;
    }

    /// Step forward in execution. Returns false when nothing was executed.
    fn step_forward(&mut self) -> bool {
        let outcome = self.session.step_forward();
        self.after_step();
        match outcome {
            StepOutcome::Stepped => true,
            StepOutcome::Finished => {
                self.status_message = "Program finished".to_string();
                false
            }
            StepOutcome::Failed(_) => false,
        }
    }

    fn step_backward(&mut self) {
        if self.session.step_backward() {
            self.status_message = "Stepped backward".to_string();
        } else {
            self.status_message = "Cannot step backward: no history".to_string();
        }
        self.after_step();
    }
}
