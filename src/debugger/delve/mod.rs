//! JSON-RPC client for a headless delve server (`dlv --headless --api-version=2`).
//!
//! Delve uses go `net/rpc/jsonrpc` framing: a request is a JSON object with `method`, `params`
//! and `id` fields, a response carries the same `id` together with `result` and `error`.
//! Messages are written back to back on a single stream.

mod proto;
mod variable;

use crate::debugger::{
    AsmInstruction, Breakpoint, BreakpointRequest, ContinueOutcome, DebugFacade, Error, Scope,
    StepKind, StopLocation, Variable,
};
use data_encoding::BASE64;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::de::IoRead;
use serde_json::StreamDeserializer;
use std::io::{BufReader, BufWriter, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

const API_VERSION: i64 = 2;

pub struct DelveClient<R: Read, W: Write> {
    responses: StreamDeserializer<'static, IoRead<R>, proto::Response>,
    writer: W,
    next_id: u64,
    load_config: proto::LoadConfig,
}

impl DelveClient<BufReader<TcpStream>, BufWriter<TcpStream>> {
    /// Connect to a delve server and negotiate the api version.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self, Error> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);

        let mut client = Self::new(reader, writer);
        client.call::<_, serde_json::Value>(
            "SetApiVersion",
            &proto::SetApiVersionIn {
                api_version: API_VERSION,
            },
        )?;
        Ok(client)
    }
}

impl<R: Read, W: Write> DelveClient<R, W> {
    /// Create a client over an already established connection.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            responses: serde_json::Deserializer::from_reader(reader).into_iter(),
            writer,
            next_id: 0,
            load_config: proto::LoadConfig::default(),
        }
    }

    fn call<I: Serialize, O: DeserializeOwned>(
        &mut self,
        method: &'static str,
        input: &I,
    ) -> Result<O, Error> {
        let id = self.next_id;
        self.next_id += 1;

        let request = proto::Request {
            method: format!("RPCServer.{method}"),
            params: [input],
            id,
        };
        debug!(target: "dlvview", "rpc request #{id}: {method}");
        serde_json::to_writer(&mut self.writer, &request)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        let response = self.responses.next().ok_or(Error::ConnectionClosed)??;
        if response.id != id {
            return Err(Error::ResponseMismatch {
                expected: id,
                got: response.id,
            });
        }
        if let Some(message) = response.error {
            return Err(Error::Rpc { method, message });
        }
        Ok(serde_json::from_value(response.result)?)
    }

    fn eval_scope(scope: Scope) -> proto::EvalScope {
        proto::EvalScope {
            goroutine_id: scope.goroutine_id,
            frame: scope.frame,
            deferred_call: 0,
        }
    }

    fn command(&mut self, name: &'static str) -> Result<proto::DebuggerState, Error> {
        let out: proto::CommandOut = self.call("Command", &proto::DebuggerCommand { name })?;
        Ok(out.state)
    }
}

fn line_number(line: i64) -> u64 {
    u64::try_from(line).unwrap_or_default()
}

impl From<proto::Breakpoint> for Breakpoint {
    fn from(bp: proto::Breakpoint) -> Self {
        Breakpoint {
            id: bp.id,
            file: bp.file,
            line: line_number(bp.line),
            function: bp.function_name,
        }
    }
}

impl From<&proto::Variable> for Variable {
    fn from(var: &proto::Variable) -> Self {
        Variable {
            name: var.name.clone(),
            value: variable::render_single_line(var),
        }
    }
}

impl TryFrom<proto::AsmInstruction> for AsmInstruction {
    type Error = Error;

    fn try_from(inst: proto::AsmInstruction) -> Result<Self, Self::Error> {
        let bytes = match inst.bytes {
            Some(encoded) => BASE64.decode(encoded.as_bytes())?,
            None => vec![],
        };
        Ok(AsmInstruction {
            address: inst.loc.pc,
            bytes,
            text: inst.text,
            file: inst.loc.file,
            line: line_number(inst.loc.line),
            at_pc: inst.at_pc,
            breakpoint: inst.breakpoint,
        })
    }
}

/// Debugee stopped on a tracepoint only, which means it must be resumed again.
fn stopped_at_tracepoint(state: &proto::DebuggerState) -> bool {
    let mut hit = state
        .threads
        .iter()
        .filter_map(|thread| thread.breakpoint.as_ref())
        .peekable();
    hit.peek().is_some() && hit.all(|bp| bp.tracepoint || bp.trace_return)
}

impl<R: Read, W: Write> DebugFacade for DelveClient<R, W> {
    fn current_stop(&mut self) -> Result<StopLocation, Error> {
        let out: proto::StateOut = self.call("State", &proto::StateIn {
            non_blocking: false,
        })?;
        let thread = out
            .state
            .ok_or(Error::EmptyResult("State"))?
            .current_thread
            .unwrap_or_default();

        Ok(StopLocation {
            file: thread.file,
            line: line_number(thread.line),
            pc: thread.pc,
            goroutine_id: thread.goroutine_id,
        })
    }

    fn local_variables(&mut self, scope: Scope) -> Result<Vec<Variable>, Error> {
        let out: proto::ListLocalVarsOut = self.call(
            "ListLocalVars",
            &proto::ListVarsIn {
                scope: Self::eval_scope(scope),
                cfg: self.load_config,
            },
        )?;
        Ok(out.variables.iter().map(Variable::from).collect())
    }

    fn function_arguments(&mut self, scope: Scope) -> Result<Vec<Variable>, Error> {
        let out: proto::ListFunctionArgsOut = self.call(
            "ListFunctionArgs",
            &proto::ListVarsIn {
                scope: Self::eval_scope(scope),
                cfg: self.load_config,
            },
        )?;
        Ok(out.args.iter().map(Variable::from).collect())
    }

    fn disassemble(&mut self, scope: Scope, pc: u64) -> Result<Vec<AsmInstruction>, Error> {
        let out: proto::DisassembleOut = self.call(
            "Disassemble",
            &proto::DisassembleIn {
                scope: Self::eval_scope(scope),
                start_pc: pc,
                end_pc: 0,
                flavour: proto::GO_FLAVOUR,
            },
        )?;
        out.instructions
            .into_iter()
            .map(AsmInstruction::try_from)
            .collect()
    }

    fn evaluate(&mut self, scope: Scope, expression: &str) -> Result<Variable, Error> {
        let out: proto::EvalOut = self.call(
            "Eval",
            &proto::EvalIn {
                scope: Self::eval_scope(scope),
                expr: expression,
                cfg: self.load_config,
            },
        )?;
        let var = out.variable.ok_or(Error::EmptyResult("Eval"))?;
        Ok(Variable::from(&var))
    }

    fn create_breakpoint(&mut self, request: &BreakpointRequest) -> Result<Breakpoint, Error> {
        let breakpoint = match request {
            BreakpointRequest::Line { file, line } => proto::Breakpoint {
                file: file.clone(),
                line: *line as i64,
                ..Default::default()
            },
            BreakpointRequest::Function(name) => proto::Breakpoint {
                function_name: name.clone(),
                ..Default::default()
            },
        };
        let out: proto::BreakpointOut =
            self.call("CreateBreakpoint", &proto::CreateBreakpointIn { breakpoint })?;
        Ok(out
            .breakpoint
            .ok_or(Error::EmptyResult("CreateBreakpoint"))?
            .into())
    }

    fn clear_breakpoint(&mut self, id: i64) -> Result<Breakpoint, Error> {
        let out: proto::BreakpointOut =
            self.call("ClearBreakpoint", &proto::ClearBreakpointIn { id })?;
        Ok(out
            .breakpoint
            .ok_or(Error::EmptyResult("ClearBreakpoint"))?
            .into())
    }

    fn breakpoints(&mut self) -> Result<Vec<Breakpoint>, Error> {
        let out: proto::ListBreakpointsOut =
            self.call("ListBreakpoints", &proto::ListBreakpointsIn { all: true })?;
        Ok(out.breakpoints.into_iter().map(Breakpoint::from).collect())
    }

    fn continue_debugee(&mut self) -> Result<ContinueOutcome, Error> {
        loop {
            let state = self.command("continue")?;
            if state.exited {
                debug!(target: "dlvview", "debugee exited with status {}", state.exit_status);
                return Ok(ContinueOutcome::Exited);
            }
            if !stopped_at_tracepoint(&state) {
                return Ok(ContinueOutcome::Stopped);
            }
        }
    }

    fn step(&mut self, kind: StepKind) -> Result<(), Error> {
        let name = match kind {
            StepKind::Over => "next",
            StepKind::Into => "step",
            StepKind::Out => "stepOut",
            StepKind::InstructionOver => "nextInstruction",
            StepKind::InstructionInto => "stepInstruction",
        };
        self.command(name)?;
        Ok(())
    }
}
