//! Interactive terminal: redraw a frame, read a command, execute it, repeat.

pub mod editor;
pub mod file;
pub mod print;
pub mod render;

use crate::debugger::{BreakpointRequest, DebugFacade};
use crate::ui::command::interpreter::{CallStatus, Flow, Interpreter, Termination};
use crate::ui::console::editor::LineSource;
use crate::ui::console::render::Renderer;
use crate::ui::snapshot::StopSnapshot;
use crate::ui::state::{StateStore, ViewState};
use crate::weak_error;
use anyhow::Context;
use log::{debug, info, warn};
use std::io::Write;
use std::path::PathBuf;

pub const PROMPT: &str = ">>> ";
const FALLBACK_WIDTH: usize = 80;

pub struct AppBuilder {
    state_file: Option<PathBuf>,
    width: Option<usize>,
    colored: bool,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            state_file: None,
            width: None,
            colored: true,
        }
    }

    /// Load view state from and save it into the file. Without a file the state lives in memory.
    pub fn state_file(self, path: impl Into<PathBuf>) -> Self {
        Self {
            state_file: Some(path.into()),
            ..self
        }
    }

    /// Fixed frame width, terminal width is used by default.
    pub fn width(self, width: usize) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    pub fn colored(self, colored: bool) -> Self {
        Self { colored, ..self }
    }

    pub fn build<D, L, W>(
        self,
        debugger: D,
        input: L,
        output: W,
    ) -> anyhow::Result<TerminalApplication<D, L, W>>
    where
        D: DebugFacade,
        L: LineSource,
        W: Write,
    {
        let width = self.width.unwrap_or_else(|| {
            weak_error!(crossterm::terminal::size(), "query terminal size:")
                .map(|(cols, _)| cols as usize)
                .unwrap_or(FALLBACK_WIDTH)
        });

        let store = self.state_file.map(StateStore::new);
        let state = store.as_ref().map(StateStore::load).unwrap_or_default();

        let mut renderer = Renderer::new(width);
        if !self.colored {
            renderer = renderer.plain();
        }

        Ok(TerminalApplication {
            debugger,
            input,
            output,
            store,
            state,
            renderer,
        })
    }
}

pub struct TerminalApplication<D: DebugFacade, L: LineSource, W: Write> {
    debugger: D,
    input: L,
    output: W,
    store: Option<StateStore>,
    state: ViewState,
    renderer: Renderer,
}

impl<D: DebugFacade, L: LineSource, W: Write> TerminalApplication<D, L, W> {
    /// Run the loop until the user quits, the debugee exits or the input is closed.
    ///
    /// Losing the debugger connection is an error.
    pub fn run(mut self) -> anyhow::Result<Termination> {
        self.restore_breakpoints()?;

        loop {
            let snapshot = StopSnapshot::capture(&mut self.debugger, &self.state.watch)
                .context("query debugger state")?;

            let frame = self.renderer.render(&snapshot, &self.state);
            self.output.write_all(frame.as_bytes())?;
            self.output.flush()?;

            let line = match self.input.read_line(PROMPT) {
                Ok(line) => line,
                Err(e) => {
                    debug!(target: "dlvview", "input closed: {e}");
                    return Ok(Termination::InputClosed);
                }
            };

            let outcome = Interpreter::new(&mut self.debugger).handle(
                &mut self.state,
                &snapshot.location.file,
                &line,
            );
            self.save_state();

            if let CallStatus::Failed(e) = outcome.call {
                if e.is_fatal() {
                    return Err(anyhow::Error::new(e).context("debugger connection lost"));
                }
            }
            if let Flow::Terminated(reason) = outcome.flow {
                info!(target: "dlvview", "terminate: {reason:?}");
                return Ok(reason);
            }
        }
    }

    /// Set breakpoints remembered from previous sessions. Rejected breakpoints are skipped.
    fn restore_breakpoints(&mut self) -> anyhow::Result<()> {
        for (file, lines) in &self.state.breakpoints {
            for &line in lines {
                let request = BreakpointRequest::Line {
                    file: file.clone(),
                    line,
                };
                match self.debugger.create_breakpoint(&request) {
                    Ok(brkpt) => debug!(target: "dlvview", "restore breakpoint #{}", brkpt.id),
                    Err(e) if e.is_fatal() => {
                        return Err(anyhow::Error::new(e).context("restore breakpoints"))
                    }
                    Err(e) => warn!(target: "dlvview", "restore breakpoint {file}:{line}: {e:#}"),
                }
            }
        }
        Ok(())
    }

    fn save_state(&self) {
        if let Some(ref store) = self.store {
            weak_error!(store.save(&self.state), "save view state:");
        }
    }
}
