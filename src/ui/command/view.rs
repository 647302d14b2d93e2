use crate::ui::state::{Pane, ResizablePane, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(Pane),
    Grow(ResizablePane),
    Shrink(ResizablePane),
}

pub fn handle(cmd: Command, state: &mut ViewState) {
    match cmd {
        Command::Toggle(pane) => state.toggle(pane),
        Command::Grow(pane) => state.grow(pane),
        Command::Shrink(pane) => state.shrink(pane),
    }
}
