use anyhow::Context;
use clap::Parser;
use dlvview::debugger::delve::DelveClient;
use dlvview::ui::console::editor::ConsoleEditor;
use dlvview::ui::console::{AppBuilder, PROMPT};
use dlvview::ui::state::StateStore;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address of a headless delve server
    #[arg(long, env = "DLVVIEW_ADDR", default_value_t = String::from("127.0.0.1:6060"))]
    addr: String,

    /// View state file [default: ~/.config/dlvview/state.toml]
    #[arg(long, env = "DLVVIEW_STATE")]
    state: Option<PathBuf>,

    /// Command history file [default: ~/.config/dlvview/history]
    #[arg(long, env = "DLVVIEW_HISTORY")]
    history: Option<PathBuf>,

    /// Don't save command history
    #[arg(long)]
    no_history: bool,

    /// Frame width in columns [default: terminal width]
    #[arg(long)]
    width: Option<usize>,

    /// Write logs into a file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable colors (also disabled when NO_COLOR is set)
    #[arg(long)]
    no_color: bool,
}

fn init_logger(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_file.as_deref())?;

    let debugger = DelveClient::connect(args.addr.as_str())
        .with_context(|| format!("connect to delve server at {}", args.addr))?;

    let history = if args.no_history {
        None
    } else {
        args.history
            .or_else(ConsoleEditor::default_history_location)
    };
    let editor = ConsoleEditor::new(PROMPT, history)?;

    let colored = !args.no_color && std::env::var_os("NO_COLOR").is_none();
    let mut builder = AppBuilder::new().colored(colored);
    if let Some(state) = args.state.or_else(StateStore::default_location) {
        builder = builder.state_file(state);
    }
    if let Some(width) = args.width {
        builder = builder.width(width);
    }

    let app = builder.build(debugger, editor, io::stdout())?;
    let reason = app.run()?;
    log::info!(target: "dlvview", "session finished: {reason:?}");
    Ok(())
}
