//! `glory-maze maps`

use anyhow::Result;
use colored::Colorize;

use glory_maze::config::Config;
use glory_maze::storage::{load_maze, KNOWN_MAPS};
use glory_maze::ui::{colors, format};

pub fn cmd_maps(config: &Config) -> Result<()> {
    let entries = glory_maze::ui::menu::map_entries(config);
    if entries.is_empty() {
        println!(
            "{}",
            format!("No maps found in {}", config.maps_dir().display()).yellow()
        );
        return Ok(());
    }

    println!("{}", "Available maps".bold());
    println!("{}", format::separator(40));
    for (label, path) in entries {
        let known = KNOWN_MAPS
            .iter()
            .any(|known| path.file_name().is_some_and(|name| name == known.file));
        match load_maze(&path, Vec::new()) {
            Ok(maze) => println!(
                "  {} {} {}",
                if known { "*".green() } else { " ".normal() },
                colors::identifier(&label),
                colors::secondary(&format!(
                    "'{}' - {} rooms, {} corridors",
                    maze.name(),
                    maze.len(),
                    maze.corridors().len()
                ))
            ),
            Err(err) => println!(
                "  {} {} {}",
                "!".red(),
                colors::identifier(&label),
                colors::error(&err.to_string())
            ),
        }
    }
    Ok(())
}
