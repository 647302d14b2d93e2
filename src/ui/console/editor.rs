use crate::ui::command::parser::{
    ASSEMBLY_PANE, ASSEMBLY_PANE_SHORT, BREAKPOINTS_PANE, BREAKPOINTS_PANE_SHORT, BREAK_COMMAND,
    BREAK_COMMAND_SHORT, CLEAR_COMMAND, CONTINUE_COMMAND, CONTINUE_COMMAND_SHORT, GROW_COMMAND,
    PANE_COMMAND, QUIT_COMMAND, QUIT_COMMAND_SHORT, SHRINK_COMMAND, SOURCE_PANE,
    SOURCE_PANE_SHORT, STEP_INSTRUCTION_COMMAND, STEP_INSTRUCTION_COMMAND_SHORT,
    STEP_INTO_COMMAND, STEP_INTO_COMMAND_SHORT, STEP_OUT_COMMAND, STEP_OUT_COMMAND_SHORT,
    STEP_OVER_COMMAND, STEP_OVER_COMMAND_SHORT, STEP_OVER_INSTRUCTION_COMMAND,
    STEP_OVER_INSTRUCTION_COMMAND_SHORT, UNWATCH_COMMAND, UNWATCH_COMMAND_SHORT,
    VARIABLES_PANE, VARIABLES_PANE_SHORT, WATCH_COMMAND, WATCH_COMMAND_SHORT, WATCH_PANE,
};
use crate::{muted_error, weak_error};
use crossterm::style::{Color, ResetColor, Stylize};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Context, Editor};
use rustyline_derive::{Helper, Hinter, Validator};
use std::borrow::Cow;
use std::borrow::Cow::{Borrowed, Owned};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// Source of user input lines.
pub trait LineSource {
    /// Read a line. `Err` means that no more input is available.
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError>;
}

struct CommandHint {
    short: Option<String>,
    long: String,
    subcommands: Vec<String>,
}

impl CommandHint {
    fn with_subcommands(mut self, subcommands: &[&str]) -> Self {
        self.subcommands = subcommands.iter().map(ToString::to_string).collect();
        self
    }

    fn display_with_short(&self) -> String {
        if let Some(ref short) = self.short {
            if self.long.starts_with(short) {
                format!(
                    "{}{}",
                    short.clone().bold().underlined(),
                    &self.long[short.len()..]
                )
            } else {
                format!("{}|{}", &self.long, short.clone().bold().underlined())
            }
        } else {
            self.long.clone()
        }
    }
}

impl From<&str> for CommandHint {
    fn from(value: &str) -> Self {
        CommandHint {
            short: None,
            long: value.to_string(),
            subcommands: vec![],
        }
    }
}

impl From<(&str, &str)> for CommandHint {
    fn from((short, long): (&str, &str)) -> Self {
        CommandHint {
            short: Some(short.to_string()),
            long: long.to_string(),
            subcommands: vec![],
        }
    }
}

pub struct CommandCompleter {
    commands: Vec<CommandHint>,
    subcommand_hints: HashMap<String, Vec<String>>,
}

impl CommandCompleter {
    fn new(commands: impl IntoIterator<Item = CommandHint>) -> Self {
        let commands: Vec<CommandHint> = commands.into_iter().collect();
        let subcommand_hints = commands
            .iter()
            .filter(|cmd| !cmd.subcommands.is_empty())
            .map(|cmd| (cmd.long.clone(), cmd.subcommands.clone()))
            .collect();

        Self {
            commands,
            subcommand_hints,
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        if let Some((cmd, subcmd_part)) = line.split_once(' ') {
            let Some(subcommands) = self.subcommand_hints.get(cmd) else {
                return Ok((0, vec![]));
            };
            let pairs = subcommands
                .iter()
                .filter(|subcmd| subcmd.starts_with(subcmd_part))
                .map(|subcmd| Pair {
                    display: subcmd.to_string(),
                    replacement: subcmd.to_string(),
                })
                .collect();
            return Ok((cmd.len() + 1, pairs));
        }

        let pairs = self
            .commands
            .iter()
            .filter(|cmd| cmd.long.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.display_with_short(),
                replacement: cmd.long.clone(),
            })
            .collect();
        Ok((0, pairs))
    }
}

#[derive(Helper, Hinter, Validator)]
pub struct RLHelper {
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    colored_prompt: String,
}

impl Completer for RLHelper {
    type Candidate = <CommandCompleter as Completer>::Candidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for RLHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored_prompt)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(format!("{}", hint.with(Color::Grey)))
    }
}

fn command_hints() -> Vec<CommandHint> {
    let panes = [
        SOURCE_PANE,
        SOURCE_PANE_SHORT,
        ASSEMBLY_PANE,
        ASSEMBLY_PANE_SHORT,
        VARIABLES_PANE,
        VARIABLES_PANE_SHORT,
        BREAKPOINTS_PANE,
        BREAKPOINTS_PANE_SHORT,
        WATCH_PANE,
    ];
    let resizable_panes = [
        SOURCE_PANE,
        SOURCE_PANE_SHORT,
        ASSEMBLY_PANE,
        ASSEMBLY_PANE_SHORT,
    ];

    vec![
        (CONTINUE_COMMAND_SHORT, CONTINUE_COMMAND).into(),
        (STEP_OVER_COMMAND_SHORT, STEP_OVER_COMMAND).into(),
        (STEP_INTO_COMMAND_SHORT, STEP_INTO_COMMAND).into(),
        (STEP_OUT_COMMAND_SHORT, STEP_OUT_COMMAND).into(),
        (
            STEP_OVER_INSTRUCTION_COMMAND_SHORT,
            STEP_OVER_INSTRUCTION_COMMAND,
        )
            .into(),
        (STEP_INSTRUCTION_COMMAND_SHORT, STEP_INSTRUCTION_COMMAND).into(),
        (BREAK_COMMAND_SHORT, BREAK_COMMAND).into(),
        CLEAR_COMMAND.into(),
        (WATCH_COMMAND_SHORT, WATCH_COMMAND).into(),
        (UNWATCH_COMMAND_SHORT, UNWATCH_COMMAND).into(),
        CommandHint::from(PANE_COMMAND).with_subcommands(&panes),
        CommandHint::from(GROW_COMMAND).with_subcommands(&resizable_panes),
        CommandHint::from(SHRINK_COMMAND).with_subcommands(&resizable_panes),
        (QUIT_COMMAND_SHORT, QUIT_COMMAND).into(),
    ]
}

/// Line editor of the interactive terminal, with command completion and a persistent history.
pub struct ConsoleEditor {
    editor: Editor<RLHelper, DefaultHistory>,
    history_file: Option<PathBuf>,
}

impl ConsoleEditor {
    const DEFAULT_HISTORY_PATH: &'static str = ".config/dlvview/history";

    /// Per-user history file, [`None`] if home directory is unknown.
    pub fn default_history_location() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(Self::DEFAULT_HISTORY_PATH))
    }

    /// Create an editor. History is loaded from and saved into `history_file` if it's set.
    pub fn new(prompt: &str, history_file: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();

        let helper = RLHelper {
            completer: CommandCompleter::new(command_hints()),
            hinter: HistoryHinter {},
            colored_prompt: format!("{}", prompt.with(Color::DarkGreen)),
        };

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(helper));
        if let Some(ref path) = history_file {
            muted_error!(editor.load_history(path), "load history:");
        }

        Ok(Self {
            editor,
            history_file,
        })
    }

    fn remember(&mut self, line: &str) {
        if line.is_empty() || line == QUIT_COMMAND || line == QUIT_COMMAND_SHORT {
            return;
        }
        weak_error!(self.editor.add_history_entry(line), "update history:");
        if let Some(ref path) = self.history_file {
            if let Some(dir) = path.parent() {
                weak_error!(std::fs::create_dir_all(dir), "create history directory:");
            }
            weak_error!(self.editor.save_history(path), "save history:");
        }
    }
}

impl LineSource for ConsoleEditor {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        weak_error!(crossterm::execute!(io::stdout(), ResetColor));
        let line = self.editor.readline(prompt)?;
        let line = line.trim().to_string();
        self.remember(&line);
        Ok(line)
    }
}
