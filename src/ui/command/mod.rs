//! Commands of the view loop.
//!
//! Contains commands and corresponding command handlers. A command either drives the debugger
//! (continue, step, breakpoints) or changes the persistent view state (panes, watches).

pub mod r#break;
pub mod r#continue;
pub mod interpreter;
pub mod parser;
pub mod step;
pub mod view;
pub mod watch;

use crate::debugger::StepKind;

/// Commands that can be typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Continue,
    Step(StepKind),
    Quit,
    View(view::Command),
    Breakpoint(r#break::Command),
    Watch(watch::Command),
    /// Anything that doesn't parse, executes as a no-op.
    Unknown,
}
