use crate::debugger::{Breakpoint, BreakpointRequest, DebugFacade, Error};
use crate::ui::state::ViewState;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakpointIdentity {
    /// `file:line`, a file without directories is looked up next to the current file.
    FileLine(String, u64),
    /// Line of the current file.
    Line(u64),
    Function(String),
}

impl BreakpointIdentity {
    /// Parse breakpoint target, [`None`] if the target is malformed.
    pub fn parse(target: &str) -> Option<Self> {
        if let Some((file, line)) = target.split_once(':') {
            let line = line.parse::<u64>().ok()?;
            return Some(BreakpointIdentity::FileLine(file.to_string(), line));
        }
        if let Ok(line) = target.parse::<u64>() {
            return Some(BreakpointIdentity::Line(line));
        }
        if target.is_empty() {
            return None;
        }
        Some(BreakpointIdentity::Function(target.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(BreakpointIdentity),
    /// Remove breakpoint by its debugger id.
    Remove(i64),
}

pub struct Handler<'a, D: DebugFacade> {
    dbg: &'a mut D,
}

impl<'a, D: DebugFacade> Handler<'a, D> {
    pub fn new(debugger: &'a mut D) -> Self {
        Self { dbg: debugger }
    }

    /// Execute command and keep the breakpoint index of `state` in sync with the debugger.
    pub fn handle(
        &mut self,
        cmd: &Command,
        state: &mut ViewState,
        current_file: &str,
    ) -> Result<Breakpoint, Error> {
        match cmd {
            Command::Add(identity) => {
                let (request, typed_line) = match identity {
                    BreakpointIdentity::FileLine(file, line) => (
                        BreakpointRequest::Line {
                            file: resolve_file(file, current_file),
                            line: *line,
                        },
                        Some(*line),
                    ),
                    BreakpointIdentity::Line(line) => (
                        BreakpointRequest::Line {
                            file: current_file.to_string(),
                            line: *line,
                        },
                        Some(*line),
                    ),
                    BreakpointIdentity::Function(name) => {
                        (BreakpointRequest::Function(name.clone()), None)
                    }
                };

                let brkpt = self.dbg.create_breakpoint(&request)?;
                state.record_breakpoint(&brkpt.file, typed_line.unwrap_or(brkpt.line));
                Ok(brkpt)
            }
            Command::Remove(id) => {
                let brkpt = self.dbg.clear_breakpoint(*id)?;
                state.forget_breakpoint(&brkpt.file, brkpt.line);
                Ok(brkpt)
            }
        }
    }
}

/// Bare file names are resolved against the directory of the current file.
fn resolve_file(file: &str, current_file: &str) -> String {
    if file.chars().any(std::path::is_separator) {
        return file.to_string();
    }
    match Path::new(current_file).parent() {
        Some(dir) => dir.join(file).to_string_lossy().into_owned(),
        None => file.to_string(),
    }
}
