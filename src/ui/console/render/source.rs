use super::frame::Frame;
use super::window;
use crate::debugger::{Breakpoint, StopLocation};
use crate::ui::console::print::style::Style;
use std::collections::HashSet;

const MIN_GUTTER_WIDTH: usize = 3;

pub fn draw(
    frame: &mut Frame,
    lines: &[String],
    location: &StopLocation,
    breakpoints: &[Breakpoint],
    height: usize,
) {
    frame.header("Source");

    let focus = (location.line as usize).saturating_sub(1);
    let visible = window(focus, height, lines.len());
    let gutter_width = visible.end.to_string().len().max(MIN_GUTTER_WIDTH);

    let breakpoint_lines: HashSet<u64> = breakpoints
        .iter()
        .filter(|brkpt| brkpt.file == location.file)
        .map(|brkpt| brkpt.line)
        .collect();

    for idx in visible {
        let line_number = idx as u64 + 1;
        let current = line_number == location.line;
        let gutter_style = Style::for_position(
            current,
            breakpoint_lines.contains(&line_number),
            Style::Gutter,
        );
        let text_style = if current { Style::Current } else { Style::Text };

        frame.paint(gutter_style, &format!("{line_number:>gutter_width$} "));
        frame.paint(text_style, &lines[idx]);
        frame.end_line();
    }
}
