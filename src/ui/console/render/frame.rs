use crate::ui::console::print::style::{Painted, Style};
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;
use std::fmt::Write;
use unicode_width::UnicodeWidthChar;

const RULE: &str = "━";

/// Screen buffer with a fixed width. Text that doesn't fit into a line is cut.
pub struct Frame {
    buf: String,
    width: usize,
    column: usize,
    colored: bool,
}

impl Frame {
    pub fn new(width: usize, colored: bool) -> Self {
        Self {
            buf: String::new(),
            width,
            column: 0,
            colored,
        }
    }

    /// Clear screen and move cursor to the top left corner.
    pub fn clear_screen(&mut self) {
        _ = Clear(ClearType::All).write_ansi(&mut self.buf);
        _ = MoveTo(0, 0).write_ansi(&mut self.buf);
    }

    /// Number of columns left in the current line.
    pub fn remaining(&self) -> usize {
        self.width.saturating_sub(self.column)
    }

    pub fn paint(&mut self, style: Style, text: &str) {
        let (text, width) = truncate(text, self.remaining());
        if text.is_empty() {
            return;
        }
        self.column += width;
        _ = write!(self.buf, "{}", Painted::new(text, style, self.colored));
    }

    pub fn pad(&mut self, n: usize) {
        let n = n.min(self.remaining());
        self.buf.extend(std::iter::repeat(' ').take(n));
        self.column += n;
    }

    pub fn end_line(&mut self) {
        self.buf.push('\n');
        self.column = 0;
    }

    /// Titled rule: `━━━ Title ━━━━`.
    pub fn header(&mut self, title: &str) {
        self.paint(Style::Rule, &RULE.repeat(3));
        self.paint(Style::Title, &format!(" {title} "));
        self.paint(Style::Rule, &RULE.repeat(self.remaining()));
        self.end_line();
    }

    pub fn rule(&mut self) {
        self.paint(Style::Rule, &RULE.repeat(self.width));
        self.end_line();
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Longest prefix of `text` that fits into `budget` columns, together with its width.
pub fn truncate(text: &str, budget: usize) -> (&str, usize) {
    let mut width = 0;
    for (idx, c) in text.char_indices() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > budget {
            return (&text[..idx], width);
        }
        width += char_width;
    }
    (text, width)
}
