pub mod style {
    use crossterm::style::{Color, Stylize};
    use std::fmt::{Display, Formatter};

    /// Role of a text fragment in a frame, every role has its own color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Style {
        /// Horizontal rules around panes.
        Rule,
        Title,
        /// Line numbers, addresses and other auxiliary columns.
        Gutter,
        Text,
        /// Current line or instruction.
        Current,
        Breakpoint,
    }

    impl Style {
        pub fn color(self) -> Color {
            match self {
                Style::Rule => Color::Cyan,
                Style::Title => Color::Magenta,
                Style::Gutter => Color::Grey,
                Style::Text => Color::White,
                Style::Current => Color::Cyan,
                Style::Breakpoint => Color::Magenta,
            }
        }

        /// Style of a source line or an instruction. Current position wins over a breakpoint.
        pub fn for_position(current: bool, breakpoint: bool, otherwise: Style) -> Style {
            if current {
                Style::Current
            } else if breakpoint {
                Style::Breakpoint
            } else {
                otherwise
            }
        }
    }

    /// Text painted in the color of its style, or as is when colors are disabled.
    pub struct Painted<'a> {
        text: &'a str,
        style: Style,
        colored: bool,
    }

    impl<'a> Painted<'a> {
        pub fn new(text: &'a str, style: Style, colored: bool) -> Self {
            Self {
                text,
                style,
                colored,
            }
        }
    }

    impl Display for Painted<'_> {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            if self.colored {
                f.write_fmt(format_args!("{}", self.text.with(self.style.color())))
            } else {
                f.write_str(self.text)
            }
        }
    }

}
