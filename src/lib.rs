//! Terminal front-end for the delve debugger.
//!
//! Every command redraws a full-screen frame with source, assembly, variables, watch
//! expressions and breakpoints of the stopped program. View settings, watch expressions and
//! breakpoints survive between sessions.

pub mod debugger;
pub mod ui;
