use crate::ui::state::ViewState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchIdentity {
    /// One-based position in the watch list.
    Index(i64),
    Expr(String),
}

impl WatchIdentity {
    pub fn parse(target: &str) -> Self {
        match target.parse::<i64>() {
            Ok(idx) => WatchIdentity::Index(idx),
            Err(_) => WatchIdentity::Expr(target.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(WatchIdentity),
}

/// Update the watch list. Out of range indexes and unknown expressions are ignored.
pub fn handle(cmd: Command, state: &mut ViewState) {
    match cmd {
        Command::Add(expr) => state.watch.push(expr),
        Command::Remove(WatchIdentity::Index(idx)) => {
            if idx >= 1 && (idx as usize) <= state.watch.len() {
                state.watch.remove(idx as usize - 1);
            }
        }
        Command::Remove(WatchIdentity::Expr(expr)) => state.watch.retain(|w| *w != expr),
    }
}
