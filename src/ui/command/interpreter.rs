use super::parser::normalize_aliases;
use super::{r#break, r#continue, step, view, watch, Command};
use crate::debugger::{ContinueOutcome, DebugFacade, Error};
use crate::ui::state::{ViewState, NOOP_COMMAND};
use log::{debug, warn};

/// Reason of the view loop termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// User typed `quit`.
    Quit,
    DebugeeExited,
    /// Input stream was closed or failed.
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Running,
    Terminated(Termination),
}

/// Result of a debugger call issued by a command.
#[derive(Debug)]
pub enum CallStatus {
    /// Command doesn't talk to the debugger.
    NotIssued,
    Succeeded,
    Failed(Error),
}

#[derive(Debug)]
pub struct Outcome {
    pub flow: Flow,
    pub call: CallStatus,
}

impl Outcome {
    fn running(call: CallStatus) -> Self {
        Self {
            flow: Flow::Running,
            call,
        }
    }

    fn terminated(reason: Termination, call: CallStatus) -> Self {
        Self {
            flow: Flow::Terminated(reason),
            call,
        }
    }
}

impl<T> From<Result<T, Error>> for CallStatus {
    fn from(res: Result<T, Error>) -> Self {
        match res {
            Ok(_) => CallStatus::Succeeded,
            Err(e) => CallStatus::Failed(e),
        }
    }
}

/// Turns a line of user input into debugger calls and view state changes.
pub struct Interpreter<'a, D: DebugFacade> {
    dbg: &'a mut D,
}

impl<'a, D: DebugFacade> Interpreter<'a, D> {
    pub fn new(debugger: &'a mut D) -> Self {
        Self { dbg: debugger }
    }

    /// Execute a trimmed input line. Empty input repeats the last command.
    ///
    /// `current_file` is the file of the current stop location, relative breakpoint targets are
    /// resolved against it.
    pub fn handle(&mut self, state: &mut ViewState, current_file: &str, input: &str) -> Outcome {
        let input = match input {
            "" if state.last_command.is_empty() => NOOP_COMMAND.to_string(),
            "" => state.last_command.clone(),
            input => input.to_string(),
        };
        let input = normalize_aliases(&input).into_owned();

        let command = Command::parse(&input);
        debug!(target: "dlvview", "execute `{input}` as {command:?}");

        let outcome = self.execute(command, state, current_file);
        if let CallStatus::Failed(ref e) = outcome.call {
            warn!(target: "dlvview", "`{input}` failed: {e:#}");
        }
        if outcome.flow == Flow::Running {
            state.last_command = input;
        }
        outcome
    }

    fn execute(&mut self, command: Command, state: &mut ViewState, current_file: &str) -> Outcome {
        match command {
            Command::Continue => match r#continue::Handler::new(self.dbg).handle() {
                Ok(ContinueOutcome::Exited) => {
                    Outcome::terminated(Termination::DebugeeExited, CallStatus::Succeeded)
                }
                Ok(ContinueOutcome::Stopped) => Outcome::running(CallStatus::Succeeded),
                Err(e) => Outcome::running(CallStatus::Failed(e)),
            },
            Command::Step(kind) => {
                Outcome::running(step::Handler::new(self.dbg).handle(kind).into())
            }
            Command::Quit => Outcome::terminated(Termination::Quit, CallStatus::NotIssued),
            Command::View(cmd) => {
                view::handle(cmd, state);
                Outcome::running(CallStatus::NotIssued)
            }
            Command::Breakpoint(cmd) => Outcome::running(
                r#break::Handler::new(self.dbg)
                    .handle(&cmd, state, current_file)
                    .into(),
            ),
            Command::Watch(cmd) => {
                watch::handle(cmd, state);
                Outcome::running(CallStatus::NotIssued)
            }
            Command::Unknown => Outcome::running(CallStatus::NotIssued),
        }
    }
}
