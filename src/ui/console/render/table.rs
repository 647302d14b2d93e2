use super::frame::Frame;
use crate::ui::console::print::style::Style;
use unicode_width::UnicodeWidthStr;

/// Rows of styled cells aligned into columns. The last cell of a row is never padded.
pub struct Table {
    rows: Vec<Vec<(Style, String)>>,
    gap: usize,
}

impl Table {
    pub fn new(gap: usize) -> Self {
        Self { rows: vec![], gap }
    }

    pub fn row(&mut self, cells: Vec<(Style, String)>) {
        self.rows.push(cells);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![];
        for row in &self.rows {
            for (i, (_, text)) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
                if widths.len() <= i {
                    widths.resize(i + 1, 0);
                }
                widths[i] = widths[i].max(text.width());
            }
        }
        widths
    }

    pub fn render(self, frame: &mut Frame) {
        let widths = self.column_widths();
        for row in self.rows {
            let last = row.len().saturating_sub(1);
            for (i, (style, text)) in row.into_iter().enumerate() {
                frame.paint(style, &text);
                if i < last {
                    frame.pad(widths[i] - text.width() + self.gap);
                }
            }
            frame.end_line();
        }
    }
}
