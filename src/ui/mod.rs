//! Terminal front-end: view state, stop snapshots, commands and the interactive loop.

pub mod command;
pub mod console;
pub mod snapshot;
pub mod state;
