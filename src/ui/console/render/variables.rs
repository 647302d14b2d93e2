use super::frame::Frame;
use crate::debugger::Variable;
use crate::ui::console::print::style::Style;

/// `name = value` line, values are never wrapped.
fn assignment(frame: &mut Frame, prefix: &str, var: &Variable) {
    frame.paint(Style::Gutter, prefix);
    frame.paint(Style::Text, &var.name);
    frame.paint(Style::Gutter, " = ");
    frame.paint(Style::Text, &var.value.replace(['\n', '\r'], " "));
    frame.end_line();
}

pub fn draw_variables(frame: &mut Frame, arguments: &[Variable], locals: &[Variable]) {
    frame.header("Variables");
    for arg in arguments {
        assignment(frame, "fun ", arg);
    }
    for local in locals {
        assignment(frame, "loc ", local);
    }
}

pub fn draw_watches(frame: &mut Frame, watches: &[Variable]) {
    frame.header("Watch");
    for (i, watch) in watches.iter().enumerate() {
        assignment(frame, &format!("{} ", i + 1), watch);
    }
}
