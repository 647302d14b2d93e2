use dlvview::debugger::{
    AsmInstruction, Breakpoint, BreakpointRequest, ContinueOutcome, DebugFacade, Error, Scope,
    StepKind, StopLocation, Variable,
};
use dlvview::ui::command::interpreter::Termination;
use dlvview::ui::console::editor::LineSource;
use dlvview::ui::console::AppBuilder;
use rustyline::error::ReadlineError;
use std::collections::{HashMap, VecDeque};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const WIDTH: usize = 80;
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Debugger calls that change the debugee state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateBreakpoint(BreakpointRequest),
    ClearBreakpoint(i64),
    Continue,
    Step(StepKind),
    Evaluate(String),
}

/// In-memory debugger stopped at a fixed place.
pub struct FakeDebugger {
    pub stop: StopLocation,
    pub breakpoints: Vec<Breakpoint>,
    pub arguments: Vec<Variable>,
    pub locals: Vec<Variable>,
    pub assembly: Vec<AsmInstruction>,
    /// Watch expression values, unknown expressions fail to evaluate.
    pub values: HashMap<String, String>,
    pub exit_on_continue: bool,
    /// Make every step request fail with a fatal error.
    pub broken_connection: bool,
    pub calls: Vec<Call>,
    next_id: i64,
}

impl FakeDebugger {
    pub fn stopped_at(file: &Path, line: u64) -> Self {
        let file = file.to_string_lossy().into_owned();
        Self {
            stop: StopLocation {
                file: file.clone(),
                line,
                pc: 0x4a0010,
                goroutine_id: 1,
            },
            breakpoints: vec![Breakpoint {
                id: -1,
                file: "<autogenerated>".to_string(),
                line: 1,
                function: "runtime.fatalpanic".to_string(),
            }],
            arguments: vec![Variable::new("n", "10")],
            locals: vec![Variable::new("sum", "45")],
            assembly: vec![
                AsmInstruction {
                    address: 0x4a0010,
                    bytes: vec![0x48, 0x89, 0x44, 0x24, 0x08],
                    text: "MOVQ AX, 0x8(SP)".to_string(),
                    file: file.clone(),
                    line,
                    at_pc: true,
                    breakpoint: false,
                },
                AsmInstruction {
                    address: 0x4a0015,
                    bytes: vec![0xc3],
                    text: "RET".to_string(),
                    file,
                    line: line + 1,
                    at_pc: false,
                    breakpoint: false,
                },
            ],
            values: HashMap::new(),
            exit_on_continue: false,
            broken_connection: false,
            calls: vec![],
            next_id: 0,
        }
    }

    pub fn with_value(mut self, expr: &str, value: &str) -> Self {
        self.values.insert(expr.to_string(), value.to_string());
        self
    }

    pub fn steps(&self) -> Vec<StepKind> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Step(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }
}

impl DebugFacade for FakeDebugger {
    fn current_stop(&mut self) -> Result<StopLocation, Error> {
        Ok(self.stop.clone())
    }

    fn local_variables(&mut self, _: Scope) -> Result<Vec<Variable>, Error> {
        Ok(self.locals.clone())
    }

    fn function_arguments(&mut self, _: Scope) -> Result<Vec<Variable>, Error> {
        Ok(self.arguments.clone())
    }

    fn disassemble(&mut self, _: Scope, _: u64) -> Result<Vec<AsmInstruction>, Error> {
        Ok(self.assembly.clone())
    }

    fn evaluate(&mut self, _: Scope, expression: &str) -> Result<Variable, Error> {
        self.calls.push(Call::Evaluate(expression.to_string()));
        match self.values.get(expression) {
            Some(value) => Ok(Variable::new(expression, value.clone())),
            None => Err(Error::Rpc {
                method: "Eval",
                message: format!("could not find symbol value for {expression}"),
            }),
        }
    }

    fn create_breakpoint(&mut self, request: &BreakpointRequest) -> Result<Breakpoint, Error> {
        self.calls.push(Call::CreateBreakpoint(request.clone()));
        let (file, line, function) = match request {
            BreakpointRequest::Line { line: 0, .. } => {
                return Err(Error::Rpc {
                    method: "CreateBreakpoint",
                    message: "could not find statement".to_string(),
                })
            }
            BreakpointRequest::Line { file, line } => (file.clone(), *line, "main.main"),
            BreakpointRequest::Function(name) => ("/src/app/lib.go".to_string(), 21, name.as_str()),
        };
        self.next_id += 1;
        let brkpt = Breakpoint {
            id: self.next_id,
            file,
            line,
            function: function.to_string(),
        };
        self.breakpoints.push(brkpt.clone());
        Ok(brkpt)
    }

    fn clear_breakpoint(&mut self, id: i64) -> Result<Breakpoint, Error> {
        self.calls.push(Call::ClearBreakpoint(id));
        let Some(pos) = self.breakpoints.iter().position(|b| b.id == id) else {
            return Err(Error::Rpc {
                method: "ClearBreakpoint",
                message: format!("non-existent breakpoint {id}"),
            });
        };
        Ok(self.breakpoints.remove(pos))
    }

    fn breakpoints(&mut self) -> Result<Vec<Breakpoint>, Error> {
        let mut breakpoints = self.breakpoints.clone();
        breakpoints.reverse();
        Ok(breakpoints)
    }

    fn continue_debugee(&mut self) -> Result<ContinueOutcome, Error> {
        self.calls.push(Call::Continue);
        if self.exit_on_continue {
            return Ok(ContinueOutcome::Exited);
        }
        Ok(ContinueOutcome::Stopped)
    }

    fn step(&mut self, kind: StepKind) -> Result<(), Error> {
        self.calls.push(Call::Step(kind));
        if self.broken_connection {
            return Err(Error::ConnectionClosed);
        }
        self.stop.line += 1;
        Ok(())
    }
}

/// Input lines given in advance, closed after the last one.
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(ToString::to_string).collect(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<String, ReadlineError> {
        self.lines.pop_front().ok_or(ReadlineError::Eof)
    }
}

/// Directory with a go source file and a state file location.
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut source = String::new();
        for i in 1..=60 {
            writeln!(source, "\tstatement{i}()").unwrap();
        }
        fs::write(dir.path().join("main.go"), source).unwrap();
        Self { dir }
    }

    pub fn main_go(&self) -> PathBuf {
        self.dir.path().join("main.go")
    }

    pub fn main_go_str(&self) -> String {
        self.main_go().to_string_lossy().into_owned()
    }

    pub fn state_file(&self) -> PathBuf {
        self.dir.path().join("config").join("state.toml")
    }
}

pub struct Session {
    pub result: anyhow::Result<Termination>,
    pub output: String,
}

impl Session {
    /// Frames, without the clear screen sequence.
    pub fn frames(&self) -> Vec<&str> {
        self.output
            .split(CLEAR_SCREEN)
            .skip(1)
            .map(|frame| frame.trim_start_matches("\x1b[1;1H"))
            .collect()
    }

    pub fn termination(&self) -> Termination {
        *self.result.as_ref().unwrap()
    }
}

/// Run a full session with plain rendering.
pub fn run_session(ws: &Workspace, dbg: &mut FakeDebugger, input: &[&str]) -> Session {
    let mut output = Vec::new();
    let result = AppBuilder::new()
        .state_file(ws.state_file())
        .width(WIDTH)
        .colored(false)
        .build(dbg, ScriptedInput::new(input), &mut output)
        .and_then(|app| app.run());
    Session {
        result,
        output: String::from_utf8(output).unwrap(),
    }
}

/// Lines of a frame pane, between its title and the next rule.
pub fn pane<'a>(frame: &'a str, title: &str) -> Vec<&'a str> {
    frame
        .lines()
        .skip_while(|line| !line.starts_with(&format!("━━━ {title} ")))
        .skip(1)
        .take_while(|line| !line.starts_with('━'))
        .collect()
}
