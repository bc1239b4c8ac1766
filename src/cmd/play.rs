//! `glory-maze play`

use anyhow::{Context, Result};
use colored::Colorize;

use glory_maze::console::{Console, StdinConsole};
use glory_maze::dice::Dice;
use glory_maze::engine::{GameEngine, MatchOutcome};
use glory_maze::ui::menu::MainMenu;

use super::{resolve_map, Session};

pub struct PlayArgs {
    pub map: Option<String>,
    pub players: Vec<String>,
    pub bots: Option<usize>,
    pub choose_entrance: bool,
}

pub fn cmd_play(session: Session, args: PlayArgs) -> Result<()> {
    let Session { config, mut dice } = session;
    let mut console = StdinConsole::new();

    let Some(map) = args.map.as_deref() else {
        // No map given: pick one from the new-game menu.
        MainMenu::new(&config, &mut console, &mut dice).new_game()?;
        return Ok(());
    };
    let path = resolve_map(&config, map);

    let mut engine = GameEngine::new(config, &mut console, &mut dice);
    let outcome = if args.players.is_empty() && args.bots.is_none() {
        engine
            .play(&path)
            .with_context(|| format!("Failed to play {}", path.display()))?
    } else {
        engine
            .load_map(&path)
            .with_context(|| format!("Failed to load map {}", path.display()))?;
        add_players(&mut engine, &args)?;
        engine.start()
    };

    report(&outcome);
    Ok(())
}

fn add_players<C, D>(engine: &mut GameEngine<C, D>, args: &PlayArgs) -> Result<()>
where
    C: Console,
    D: Dice,
{
    for name in &args.players {
        engine
            .add_human(name, args.choose_entrance)
            .with_context(|| format!("Failed to add player {}", name))?;
    }
    for i in 1..=args.bots.unwrap_or(0) {
        engine.add_bot(&format!("Bot_{}", i))?;
    }
    Ok(())
}

fn report(outcome: &MatchOutcome) {
    match outcome {
        MatchOutcome::Victory { winner } => println!("{} {}", "Winner:".green().bold(), winner),
        MatchOutcome::Defeat { player } => println!("{} {}", "Defeated:".red().bold(), player),
        MatchOutcome::Abandoned => println!("{}", "Match abandoned.".yellow()),
        MatchOutcome::NotStarted => println!("{}", "No players, nothing was played.".dimmed()),
    }
}
