//! CLI entry point and command handlers for glory-maze.

mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

use glory_maze::console::StdinConsole;
use glory_maze::error::GameError;
use glory_maze::ui::editor::MapEditor;
use glory_maze::ui::menu::MainMenu;

use cmd::play::PlayArgs;
use cmd::Session;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_SHA"),
    " ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "glory-maze")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Turn-based multiplayer maze game", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    glory-maze                 Open the main menu\n    glory-maze play mapa_facil  Play a map directly\n    glory-maze edit            Create a new map"
)]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Use this config file instead of .glory/config.md
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for reproducible matches
    #[arg(long, global = true, value_name = "SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a match
    ///
    /// Without --player or --bots the setup questions are asked interactively.
    Play {
        /// Map name in the maps directory, or a path to a map file
        map: Option<String>,
        /// Add a human player (repeatable)
        #[arg(long = "player", value_name = "NAME")]
        players: Vec<String>,
        /// Number of bots to add
        #[arg(long, value_name = "N")]
        bots: Option<usize>,
        /// Ask each player for their entrance instead of picking one at random
        #[arg(long)]
        choose_entrance: bool,
    },
    /// Open the map editor
    Edit,
    /// List the maps in the maps directory
    Maps,
    /// Check that a map is playable
    Check {
        /// Map name in the maps directory, or a path to a map file
        map: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    // Spawn the real work on a thread with a larger stack size.
    // Windows defaults to a 1MB stack; 8MB matches the Linux default.
    const STACK_SIZE: usize = 8 * 1024 * 1024; // 8 MB

    let thread = std::thread::Builder::new()
        .stack_size(STACK_SIZE)
        .spawn(run)
        .expect("failed to spawn main thread");

    match thread.join() {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    glory_maze::logging::init(cli.verbose);

    let result = dispatch(cli);
    if let Err(err) = &result {
        let hint = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<GameError>())
            .and_then(GameError::suggestion);
        if let Some(hint) = hint {
            eprintln!("{} {}", "hint:".yellow(), hint);
        }
    }
    result
}

fn dispatch(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Some(Commands::Completions { shell }) => return cmd_completion(shell),
        other => other,
    };

    let session = Session::load(cli.config.as_deref(), cli.seed)?;
    match command {
        None => {
            let Session { config, mut dice } = session;
            let mut console = StdinConsole::new();
            MainMenu::new(&config, &mut console, &mut dice).run()
        }
        Some(Commands::Play {
            map,
            players,
            bots,
            choose_entrance,
        }) => cmd::play::cmd_play(
            session,
            PlayArgs {
                map,
                players,
                bots,
                choose_entrance,
            },
        ),
        Some(Commands::Edit) => {
            let mut console = StdinConsole::new();
            MapEditor::new(&mut console, session.config.maps_dir())
                .with_riddles_file(session.config.riddles_file())
                .run();
            Ok(())
        }
        Some(Commands::Maps) => cmd::maps::cmd_maps(&session.config),
        Some(Commands::Check { map }) => {
            let path = cmd::resolve_map(&session.config, &map);
            cmd::check::cmd_check(&session.config, &path)
        }
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "glory-maze", &mut io::stdout());
    Ok(())
}
