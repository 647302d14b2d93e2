//! Frame rendering.
//!
//! A frame is a pure function of a [`StopSnapshot`], a [`ViewState`] and source files: panes are
//! drawn top to bottom, each starts with a titled rule, the whole frame ends with a plain rule.

mod asm;
mod breakpoint;
mod frame;
mod source;
mod table;
mod variables;

use crate::ui::console::file::SourceCache;
use crate::ui::snapshot::StopSnapshot;
use crate::ui::state::{Pane, ResizablePane, ViewState};
use frame::Frame;
use std::ops::Range;
use std::path::Path;

/// Indexes of the visible part of a sequence of `len` items, `height` items at most, with
/// `focus` in the middle if possible.
pub fn window(focus: usize, height: usize, len: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let focus = focus.min(len - 1);
    let start = focus.saturating_sub(height / 2);
    let end = (start + height).min(len);
    start..end
}

pub struct Renderer {
    width: usize,
    colored: bool,
    sources: SourceCache,
}

impl Renderer {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            colored: true,
            sources: SourceCache::new(),
        }
    }

    /// Render without color escapes.
    pub fn plain(self) -> Self {
        Self {
            colored: false,
            ..self
        }
    }

    /// Full frame, starting with a clear screen sequence.
    pub fn render(&self, snapshot: &StopSnapshot, state: &ViewState) -> String {
        let mut frame = Frame::new(self.width, self.colored);
        frame.clear_screen();
        self.draw(&mut frame, snapshot, state);
        frame.into_string()
    }

    /// Frame content without the clear screen sequence.
    pub fn render_panes(&self, snapshot: &StopSnapshot, state: &ViewState) -> String {
        let mut frame = Frame::new(self.width, self.colored);
        self.draw(&mut frame, snapshot, state);
        frame.into_string()
    }

    fn draw(&self, frame: &mut Frame, snapshot: &StopSnapshot, state: &ViewState) {
        if state.is_visible(Pane::Source) {
            let lines = self.sources.lines(Path::new(&snapshot.location.file));
            source::draw(
                frame,
                &lines,
                &snapshot.location,
                &snapshot.breakpoints,
                state.height(ResizablePane::Source),
            );
        }
        if state.is_visible(Pane::Assembly) {
            asm::draw(
                frame,
                &snapshot.assembly,
                state.height(ResizablePane::Assembly),
            );
        }
        if state.is_visible(Pane::Variables) {
            variables::draw_variables(frame, &snapshot.arguments, &snapshot.locals);
        }
        if state.is_visible(Pane::Watch) {
            variables::draw_watches(frame, &snapshot.watches);
        }
        if state.is_visible(Pane::Breakpoints) {
            breakpoint::draw(frame, &snapshot.breakpoints);
        }
        frame.rule();
    }
}
