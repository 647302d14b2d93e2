//! Debugger collaborator interface.
//!
//! The view loop never talks to a debugger directly: everything it needs is expressed through
//! the [`DebugFacade`] trait. [`delve::DelveClient`] implements it on top of a headless delve
//! server, tests implement it in memory.

pub mod delve;
mod error;

pub use error::Error;

use std::path::Path;

/// Evaluation scope of variable and expression requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    pub goroutine_id: i64,
    pub frame: i64,
}

impl Scope {
    pub fn goroutine(goroutine_id: i64) -> Self {
        Self {
            goroutine_id,
            frame: 0,
        }
    }
}

/// Place where the debugee is currently stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopLocation {
    pub file: String,
    pub line: u64,
    pub pc: u64,
    /// Zero if there is no selected goroutine.
    pub goroutine_id: i64,
}

/// A variable or an evaluated expression, rendered into a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Variable without a value, used when an expression can't be evaluated.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
        }
    }
}

/// Single disassembled machine instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsmInstruction {
    pub address: u64,
    pub bytes: Vec<u8>,
    pub text: String,
    pub file: String,
    pub line: u64,
    pub at_pc: bool,
    pub breakpoint: bool,
}

impl AsmInstruction {
    /// Split instruction text into mnemonic and operands.
    pub fn mnemonic_and_operands(&self) -> (&str, &str) {
        match self.text.split_once(' ') {
            Some((mnemonic, operands)) => (mnemonic, operands),
            None => (self.text.as_str(), ""),
        }
    }
}

/// Breakpoint as the debugger knows it.
///
/// Debuggers may install internal breakpoints, those have non-positive ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakpoint {
    pub id: i64,
    pub file: String,
    pub line: u64,
    pub function: String,
}

impl Breakpoint {
    pub fn is_user_defined(&self) -> bool {
        self.id > 0
    }

    pub fn file_name(&self) -> String {
        base_name(&self.file)
    }
}

/// Last path component, or the whole string if there is none.
pub fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Place of a new breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakpointRequest {
    Line { file: String, line: u64 },
    Function(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueOutcome {
    Stopped,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Step over the current source line.
    Over,
    /// Step into the current source line.
    Into,
    /// Run until the current function returns.
    Out,
    /// Step over a single machine instruction.
    InstructionOver,
    /// Step into a single machine instruction.
    InstructionInto,
}

/// Control connection to a debugger.
///
/// Every call blocks until the debugger answers. `continue_debugee` may block for as long as
/// the debugee runs.
pub trait DebugFacade {
    fn current_stop(&mut self) -> Result<StopLocation, Error>;

    fn local_variables(&mut self, scope: Scope) -> Result<Vec<Variable>, Error>;

    fn function_arguments(&mut self, scope: Scope) -> Result<Vec<Variable>, Error>;

    /// Disassemble the function that contains `pc`.
    fn disassemble(&mut self, scope: Scope, pc: u64) -> Result<Vec<AsmInstruction>, Error>;

    fn evaluate(&mut self, scope: Scope, expression: &str) -> Result<Variable, Error>;

    fn create_breakpoint(&mut self, request: &BreakpointRequest) -> Result<Breakpoint, Error>;

    fn clear_breakpoint(&mut self, id: i64) -> Result<Breakpoint, Error>;

    fn breakpoints(&mut self) -> Result<Vec<Breakpoint>, Error>;

    fn continue_debugee(&mut self) -> Result<ContinueOutcome, Error>;

    fn step(&mut self, kind: StepKind) -> Result<(), Error>;
}

impl<D: DebugFacade + ?Sized> DebugFacade for &mut D {
    fn current_stop(&mut self) -> Result<StopLocation, Error> {
        (**self).current_stop()
    }

    fn local_variables(&mut self, scope: Scope) -> Result<Vec<Variable>, Error> {
        (**self).local_variables(scope)
    }

    fn function_arguments(&mut self, scope: Scope) -> Result<Vec<Variable>, Error> {
        (**self).function_arguments(scope)
    }

    fn disassemble(&mut self, scope: Scope, pc: u64) -> Result<Vec<AsmInstruction>, Error> {
        (**self).disassemble(scope, pc)
    }

    fn evaluate(&mut self, scope: Scope, expression: &str) -> Result<Variable, Error> {
        (**self).evaluate(scope, expression)
    }

    fn create_breakpoint(&mut self, request: &BreakpointRequest) -> Result<Breakpoint, Error> {
        (**self).create_breakpoint(request)
    }

    fn clear_breakpoint(&mut self, id: i64) -> Result<Breakpoint, Error> {
        (**self).clear_breakpoint(id)
    }

    fn breakpoints(&mut self) -> Result<Vec<Breakpoint>, Error> {
        (**self).breakpoints()
    }

    fn continue_debugee(&mut self) -> Result<ContinueOutcome, Error> {
        (**self).continue_debugee()
    }

    fn step(&mut self, kind: StepKind) -> Result<(), Error> {
        (**self).step(kind)
    }
}
