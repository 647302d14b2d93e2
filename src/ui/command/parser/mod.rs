use super::r#break::BreakpointIdentity;
use super::watch::WatchIdentity;
use super::{r#break, view, watch, Command};
use crate::debugger::StepKind;
use crate::ui::state::{Pane, ResizablePane};
use std::borrow::Cow;

pub const CONTINUE_COMMAND: &str = "continue";
pub const CONTINUE_COMMAND_SHORT: &str = "c";
pub const STEP_OVER_COMMAND: &str = "next";
pub const STEP_OVER_COMMAND_SHORT: &str = "n";
pub const STEP_INTO_COMMAND: &str = "step";
pub const STEP_INTO_COMMAND_SHORT: &str = "s";
pub const STEP_OUT_COMMAND: &str = "stepout";
pub const STEP_OUT_COMMAND_SHORT: &str = "so";
pub const STEP_OVER_INSTRUCTION_COMMAND: &str = "nexti";
pub const STEP_OVER_INSTRUCTION_COMMAND_SHORT: &str = "ni";
pub const STEP_INSTRUCTION_COMMAND: &str = "stepi";
pub const STEP_INSTRUCTION_COMMAND_SHORT: &str = "si";
pub const QUIT_COMMAND: &str = "quit";
pub const QUIT_COMMAND_SHORT: &str = "q";
pub const PANE_COMMAND: &str = "pane";
pub const GROW_COMMAND: &str = "grow";
pub const SHRINK_COMMAND: &str = "shrink";
pub const BREAK_COMMAND: &str = "break";
pub const BREAK_COMMAND_SHORT: &str = "b";
pub const CLEAR_COMMAND: &str = "clear";
pub const CLEAR_COMMAND_SHORT: &str = "c";
pub const WATCH_COMMAND: &str = "watch";
pub const WATCH_COMMAND_SHORT: &str = "w";
pub const UNWATCH_COMMAND: &str = "unwatch";
pub const UNWATCH_COMMAND_SHORT: &str = "uw";

pub const SOURCE_PANE: &str = "source";
pub const SOURCE_PANE_SHORT: &str = "src";
pub const ASSEMBLY_PANE: &str = "assembly";
pub const ASSEMBLY_PANE_SHORT: &str = "asm";
pub const VARIABLES_PANE: &str = "variables";
pub const VARIABLES_PANE_SHORT: &str = "vars";
pub const BREAKPOINTS_PANE: &str = "breakpoints";
pub const BREAKPOINTS_PANE_SHORT: &str = "bp";
pub const WATCH_PANE: &str = "watch";

/// Short forms of commands with an argument, expanded before parsing.
const ARGUMENT_ALIASES: [(&str, &str); 4] = [
    (CLEAR_COMMAND_SHORT, CLEAR_COMMAND),
    (BREAK_COMMAND_SHORT, BREAK_COMMAND),
    (WATCH_COMMAND_SHORT, WATCH_COMMAND),
    (UNWATCH_COMMAND_SHORT, UNWATCH_COMMAND),
];

use chumsky::error::Rich;
use chumsky::prelude::{any, choice, end, just};
use chumsky::{extra, Boxed, Parser};

type Err<'a> = extra::Err<Rich<'a, char>>;

/// Expand a short command with an argument (`b 10`) into its full form (`break 10`).
///
/// A bare `c` stays untouched and means `continue`.
pub fn normalize_aliases(input: &str) -> Cow<'_, str> {
    for (short, full) in ARGUMENT_ALIASES {
        if let Some(argument) = input
            .strip_prefix(short)
            .and_then(|rest| rest.strip_prefix(' '))
        {
            return Cow::Owned(format!("{full} {argument}"));
        }
    }
    Cow::Borrowed(input)
}

/// Command without arguments, accepts both full and short forms.
fn keyword<'a>(
    full: &'static str,
    short: &'static str,
) -> impl Parser<'a, &'a str, (), Err<'a>> + Clone {
    just(full)
        .then_ignore(end())
        .or(just(short).then_ignore(end()))
        .ignored()
}

fn step<'a>(
    full: &'static str,
    short: &'static str,
    kind: StepKind,
) -> impl Parser<'a, &'a str, Command, Err<'a>> + Clone {
    keyword(full, short).to(Command::Step(kind))
}

/// Command name followed by a single space.
fn prefix<'a>(name: &'static str) -> impl Parser<'a, &'a str, (), Err<'a>> + Clone {
    just(name).then(just(' ')).ignored()
}

/// Rest of the input.
fn argument<'a>() -> impl Parser<'a, &'a str, &'a str, Err<'a>> + Clone {
    any().repeated().to_slice()
}

fn pane<'a>() -> impl Parser<'a, &'a str, Pane, Err<'a>> + Clone {
    choice((
        just(SOURCE_PANE).to(Pane::Source),
        just(SOURCE_PANE_SHORT).to(Pane::Source),
        just(ASSEMBLY_PANE).to(Pane::Assembly),
        just(ASSEMBLY_PANE_SHORT).to(Pane::Assembly),
        just(VARIABLES_PANE).to(Pane::Variables),
        just(VARIABLES_PANE_SHORT).to(Pane::Variables),
        just(BREAKPOINTS_PANE).to(Pane::Breakpoints),
        just(BREAKPOINTS_PANE_SHORT).to(Pane::Breakpoints),
        just(WATCH_PANE).to(Pane::Watch),
    ))
    .then_ignore(end())
    .labelled("pane")
}

fn resizable_pane<'a>() -> impl Parser<'a, &'a str, ResizablePane, Err<'a>> + Clone {
    choice((
        just(SOURCE_PANE).to(ResizablePane::Source),
        just(SOURCE_PANE_SHORT).to(ResizablePane::Source),
        just(ASSEMBLY_PANE).to(ResizablePane::Assembly),
        just(ASSEMBLY_PANE_SHORT).to(ResizablePane::Assembly),
    ))
    .then_ignore(end())
    .labelled("resizable pane")
}

fn command<'a, I>(ctx: &'static str, inner: I) -> Boxed<'a, 'a, &'a str, Command, Err<'a>>
where
    I: Parser<'a, &'a str, Command, Err<'a>> + 'a,
{
    inner.then_ignore(end()).labelled(ctx).boxed()
}

impl Command {
    /// Parse input string into command. Malformed input gives [`Command::Unknown`].
    ///
    /// Input is expected to be trimmed with aliases already expanded by [`normalize_aliases`].
    pub fn parse(input: &str) -> Command {
        Self::parser()
            .parse(input)
            .into_result()
            .unwrap_or(Command::Unknown)
    }

    fn parser<'a>() -> impl Parser<'a, &'a str, Command, Err<'a>> {
        let r#continue = keyword(CONTINUE_COMMAND, CONTINUE_COMMAND_SHORT).to(Command::Continue);
        let step_over = step(STEP_OVER_COMMAND, STEP_OVER_COMMAND_SHORT, StepKind::Over);
        let step_into = step(STEP_INTO_COMMAND, STEP_INTO_COMMAND_SHORT, StepKind::Into);
        let step_out = step(STEP_OUT_COMMAND, STEP_OUT_COMMAND_SHORT, StepKind::Out);
        let step_over_instruction = step(
            STEP_OVER_INSTRUCTION_COMMAND,
            STEP_OVER_INSTRUCTION_COMMAND_SHORT,
            StepKind::InstructionOver,
        );
        let step_instruction = step(
            STEP_INSTRUCTION_COMMAND,
            STEP_INSTRUCTION_COMMAND_SHORT,
            StepKind::InstructionInto,
        );
        let quit = keyword(QUIT_COMMAND, QUIT_COMMAND_SHORT).to(Command::Quit);

        let toggle = prefix(PANE_COMMAND)
            .ignore_then(pane())
            .map(|pane| Command::View(view::Command::Toggle(pane)));
        let grow = prefix(GROW_COMMAND)
            .ignore_then(resizable_pane())
            .map(|pane| Command::View(view::Command::Grow(pane)));
        let shrink = prefix(SHRINK_COMMAND)
            .ignore_then(resizable_pane())
            .map(|pane| Command::View(view::Command::Shrink(pane)));

        let r#break = prefix(BREAK_COMMAND)
            .ignore_then(argument())
            .map(|target: &str| match BreakpointIdentity::parse(target) {
                Some(identity) => Command::Breakpoint(r#break::Command::Add(identity)),
                None => Command::Unknown,
            });
        let clear = prefix(CLEAR_COMMAND)
            .ignore_then(argument())
            .map(|id: &str| match id.parse::<i64>() {
                Ok(id) => Command::Breakpoint(r#break::Command::Remove(id)),
                Err(_) => Command::Unknown,
            });

        let watch = prefix(WATCH_COMMAND)
            .ignore_then(argument())
            .map(|expr: &str| match expr {
                "" => Command::Unknown,
                expr => Command::Watch(watch::Command::Add(expr.to_string())),
            });
        let unwatch = prefix(UNWATCH_COMMAND)
            .ignore_then(argument())
            .map(|target: &str| {
                Command::Watch(watch::Command::Remove(WatchIdentity::parse(target)))
            });

        choice((
            command(CONTINUE_COMMAND, r#continue),
            command(STEP_OVER_COMMAND, step_over),
            command(STEP_INTO_COMMAND, step_into),
            command(STEP_OUT_COMMAND, step_out),
            command(STEP_OVER_INSTRUCTION_COMMAND, step_over_instruction),
            command(STEP_INSTRUCTION_COMMAND, step_instruction),
            command(QUIT_COMMAND, quit),
            command(PANE_COMMAND, toggle),
            command(GROW_COMMAND, grow),
            command(SHRINK_COMMAND, shrink),
            command(BREAK_COMMAND, r#break),
            command(CLEAR_COMMAND, clear),
            command(UNWATCH_COMMAND, unwatch),
            command(WATCH_COMMAND, watch),
        ))
    }
}
