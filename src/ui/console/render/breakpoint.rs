use super::frame::Frame;
use super::table::Table;
use crate::debugger::Breakpoint;
use crate::ui::console::print::style::Style;

pub fn draw(frame: &mut Frame, breakpoints: &[Breakpoint]) {
    frame.header("Breakpoints");

    let mut table = Table::new(2);
    for brkpt in breakpoints.iter().filter(|b| b.is_user_defined()) {
        table.row(vec![
            (Style::Gutter, brkpt.id.to_string()),
            (
                Style::Text,
                format!("{}:{} ({})", brkpt.file_name(), brkpt.line, brkpt.function),
            ),
        ]);
    }
    table.render(frame);
}
