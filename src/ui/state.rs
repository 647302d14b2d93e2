//! Persistent view configuration.
//!
//! The state lives in a TOML file under the user config directory, it's loaded once at start
//! and written back after every command.

use crate::{muted_error, weak_error};
use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Command that does nothing. Stored as the last command of a freshly loaded session.
pub const NOOP_COMMAND: &str = "?";
pub const DEFAULT_PANE_HEIGHT: usize = 9;
const HEIGHT_STEP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Source,
    Assembly,
    Variables,
    Breakpoints,
    Watch,
}

/// Panes with a configurable height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizablePane {
    Source,
    Assembly,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Panes {
    pub source: bool,
    pub assembly: bool,
    pub variables: bool,
    pub breakpoints: bool,
    pub watch: bool,
}

impl Default for Panes {
    fn default() -> Self {
        Self {
            source: true,
            assembly: true,
            variables: true,
            breakpoints: true,
            watch: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Heights {
    pub source: usize,
    pub assembly: usize,
}

impl Default for Heights {
    fn default() -> Self {
        Self {
            source: DEFAULT_PANE_HEIGHT,
            assembly: DEFAULT_PANE_HEIGHT,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ViewState {
    /// Command repeated on empty input.
    pub last_command: String,
    /// Watch expressions in display order.
    pub watch: Vec<String>,
    pub panes: Panes,
    pub heights: Heights,
    /// Breakpoints set through this front-end: file path -> line numbers.
    pub breakpoints: BTreeMap<String, Vec<u64>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            last_command: NOOP_COMMAND.to_string(),
            watch: vec![],
            panes: Panes::default(),
            heights: Heights::default(),
            breakpoints: BTreeMap::new(),
        }
    }
}

impl ViewState {
    pub fn is_visible(&self, pane: Pane) -> bool {
        match pane {
            Pane::Source => self.panes.source,
            Pane::Assembly => self.panes.assembly,
            Pane::Variables => self.panes.variables,
            Pane::Breakpoints => self.panes.breakpoints,
            Pane::Watch => self.panes.watch,
        }
    }

    pub fn toggle(&mut self, pane: Pane) {
        let flag = match pane {
            Pane::Source => &mut self.panes.source,
            Pane::Assembly => &mut self.panes.assembly,
            Pane::Variables => &mut self.panes.variables,
            Pane::Breakpoints => &mut self.panes.breakpoints,
            Pane::Watch => &mut self.panes.watch,
        };
        *flag = !*flag;
    }

    pub fn height(&self, pane: ResizablePane) -> usize {
        match pane {
            ResizablePane::Source => self.heights.source,
            ResizablePane::Assembly => self.heights.assembly,
        }
    }

    fn height_mut(&mut self, pane: ResizablePane) -> &mut usize {
        match pane {
            ResizablePane::Source => &mut self.heights.source,
            ResizablePane::Assembly => &mut self.heights.assembly,
        }
    }

    pub fn grow(&mut self, pane: ResizablePane) {
        *self.height_mut(pane) += HEIGHT_STEP;
    }

    pub fn shrink(&mut self, pane: ResizablePane) {
        let height = self.height_mut(pane);
        *height = height.saturating_sub(HEIGHT_STEP).max(1);
    }

    /// Remember a breakpoint line. Duplicates are removed on save.
    pub fn record_breakpoint(&mut self, file: &str, line: u64) {
        self.breakpoints
            .entry(file.to_string())
            .or_default()
            .push(line);
    }

    /// Forget every breakpoint at `file:line`, the file entry is dropped when it becomes empty.
    pub fn forget_breakpoint(&mut self, file: &str, line: u64) {
        if let Some(lines) = self.breakpoints.get_mut(file) {
            lines.retain(|&l| l != line);
            if lines.is_empty() {
                self.breakpoints.remove(file);
            }
        }
    }

    /// Sort and deduplicate breakpoint lines, drop empty entries and fix invalid heights.
    pub fn normalize(&mut self) {
        self.breakpoints.retain(|_, lines| {
            lines.sort_unstable();
            lines.dedup();
            !lines.is_empty()
        });
        self.heights.source = self.heights.source.max(1);
        self.heights.assembly = self.heights.assembly.max(1);
    }

    /// Copy of the state in the form it is written to disk.
    pub fn persisted(&self) -> ViewState {
        let mut state = self.clone();
        state.normalize();
        state.last_command = NOOP_COMMAND.to_string();
        state
    }
}

/// Location of the persisted [`ViewState`].
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    const DEFAULT_PATH: &'static str = ".config/dlvview/state.toml";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Per-user state file, [`None`] if home directory is unknown.
    pub fn default_location() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(Self::DEFAULT_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. A missing or malformed file gives the default state.
    pub fn load(&self) -> ViewState {
        let Some(data) = muted_error!(fs::read_to_string(&self.path), "read view state:") else {
            debug!(target: "dlvview", "use default view state");
            return ViewState::default();
        };

        let Some(mut state) =
            weak_error!(toml::from_str::<ViewState>(&data), "malformed view state:")
        else {
            return ViewState::default();
        };
        state.normalize();
        state.last_command = NOOP_COMMAND.to_string();
        state
    }

    pub fn save(&self, state: &ViewState) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create directory {}", dir.display()))?;
        }
        let data = toml::to_string_pretty(&state.persisted())?;
        fs::write(&self.path, data)
            .with_context(|| format!("write view state into {}", self.path.display()))?;
        Ok(())
    }
}
