//! `glory-maze check`: structural report for a map file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use glory_maze::config::Config;
use glory_maze::model::{Maze, Room};
use glory_maze::storage::{load_maze, load_riddles};
use glory_maze::ui::colors;

/// Problems that make a map unplayable.
pub fn find_problems(maze: &Maze) -> Vec<String> {
    let mut problems = Vec::new();
    if maze.is_empty() {
        problems.push("the map has no rooms".to_string());
        return problems;
    }

    let entrances = maze.entrances();
    if entrances.is_empty() {
        problems.push("no entrance room".to_string());
    }
    let Some(treasure) = maze.treasure_room() else {
        problems.push("no treasure room".to_string());
        return problems;
    };

    for entrance in entrances {
        if maze.shortest_path(&entrance.id, &treasure.id).is_empty() {
            problems.push(format!(
                "treasure {} is unreachable from entrance {}",
                treasure.id, entrance.id
            ));
        }
    }
    problems
}

pub fn cmd_check(config: &Config, path: &Path) -> Result<()> {
    let riddles = load_riddles(&config.riddles_file())?;
    let maze = load_maze(path, riddles)
        .with_context(|| format!("Failed to load map {}", path.display()))?;

    let count = |pred: fn(&Room) -> bool| maze.rooms().iter().filter(|r| pred(r)).count();
    println!("{} {}", "Map:".bold(), colors::identifier(maze.name()));
    println!("  rooms:     {}", maze.len());
    println!("  entrances: {}", count(|r| r.is_entrance()));
    println!("  riddles:   {}", count(|r| r.is_riddle()));
    println!("  levers:    {}", count(|r| r.is_lever()));
    println!("  corridors: {}", maze.corridors().len());
    println!(
        "  events:    {}",
        maze.corridors().iter().filter(|c| c.event.is_some()).count()
    );
    match maze.treasure_room() {
        Some(room) => println!("  treasure:  {}", colors::identifier(&room.id)),
        None => println!("  treasure:  {}", "none".red()),
    }

    let problems = find_problems(&maze);
    if problems.is_empty() {
        println!("{}", "✓ Map is playable".green());
        return Ok(());
    }
    for problem in &problems {
        println!("{} {}", "✗".red(), problem);
    }
    anyhow::bail!("{} problem(s) found in {}", problems.len(), path.display())
}
