#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Dungeon Doors experience.

mod config;
mod render;
mod session;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dungeon_doors_core::{CellCoord, Rotation, TurnOutcome};
use dungeon_doors_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use session::{Screen, Session};

const MAP_EXTENSION: &str = "txt";

#[derive(Debug, Parser)]
#[command(name = "dungeon-doors")]
#[command(about = "Rotate the rooms, guide the knight, slay the dragons")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to ./dungeon.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the maps available in the configured maps directory
    Maps,
    /// Play a map by name (from the maps directory) or by path
    Play {
        /// Map name or path to a map file
        map: String,
        /// Advance turns automatically until the game ends or stalls
        #[arg(long)]
        auto: bool,
        /// Turn limit for --auto (overrides the config file)
        #[arg(long)]
        max_turns: Option<u32>,
        /// Print the final board as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Player input accepted by the interactive loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Input {
    Advance,
    Rotate(CellCoord, Rotation),
    Help,
    Quit,
}

/// Entry point for the Dungeon Doors command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config.log_filter);

    match cli.command {
        Commands::Maps => list_maps(&config.maps_dir),
        Commands::Play {
            map,
            auto,
            max_turns,
            json,
        } => {
            let path = resolve_map_path(&config.maps_dir, &map);
            let source = fs::read_to_string(&path)
                .with_context(|| format!("failed to read map at {}", path.display()))?;
            let mut session = Session::load(&source)
                .with_context(|| format!("failed to load map at {}", path.display()))?;
            info!(map = %path.display(), "session started");

            if auto {
                play_auto(&mut session, max_turns.unwrap_or(config.max_turns));
            } else {
                play_interactive(&mut session)?;
            }

            if json {
                let board = query::board(session.world());
                println!("{}", serde_json::to_string_pretty(&board)?);
            }
            Ok(())
        }
    }
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn list_maps(maps_dir: &Path) -> Result<()> {
    let entries = fs::read_dir(maps_dir)
        .with_context(|| format!("failed to read maps directory {}", maps_dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(MAP_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(stem.to_owned());
        }
    }
    names.sort();

    if names.is_empty() {
        println!("no maps found in {}", maps_dir.display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn resolve_map_path(maps_dir: &Path, map: &str) -> PathBuf {
    let direct = PathBuf::from(map);
    if direct.is_file() {
        return direct;
    }

    let named = maps_dir.join(map);
    if named.extension().is_some() {
        named
    } else {
        named.with_extension(MAP_EXTENSION)
    }
}

fn play_auto(session: &mut Session, max_turns: u32) {
    let mut outcome = TurnOutcome::Continue;
    while session.turns() < max_turns {
        outcome = session.advance_turn();
        if outcome != TurnOutcome::Continue {
            break;
        }
    }

    print!("{}", render::board(&query::board(session.world())));
    match outcome {
        TurnOutcome::NoPath => println!("The knight has no way forward."),
        TurnOutcome::Continue => println!("Stopped after {} turns.", session.turns()),
        TurnOutcome::Won | TurnOutcome::Lost => {}
    }
    if let Some(banner) = render::banner(outcome) {
        println!("{banner}");
    }
}

fn play_interactive(session: &mut Session) -> Result<()> {
    print!("{}", render::board(&query::board(session.world())));
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while let Screen::Playing = session.screen() {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = match parse_input(&line?) {
            Ok(input) => input,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };

        match input {
            Input::Advance => {
                let outcome = session.advance_turn();
                if outcome == TurnOutcome::NoPath {
                    println!("No target is reachable. Rotate some rooms.");
                }
            }
            Input::Rotate(cell, rotation) => {
                if let Err(error) = session.rotate(cell, rotation) {
                    println!("{error}");
                    continue;
                }
            }
            Input::Help => {
                print_help();
                continue;
            }
            Input::Quit => return Ok(()),
        }

        print!("{}", render::board(&query::board(session.world())));
        for path in session.reachable_targets() {
            println!(
                "  reachable: {} #{} in {} steps",
                path.target.kind.symbol(),
                path.target.id.get(),
                path.len().saturating_sub(1)
            );
        }
    }

    if let Screen::Over { won } = session.screen() {
        let outcome = if won {
            TurnOutcome::Won
        } else {
            TurnOutcome::Lost
        };
        if let Some(banner) = render::banner(outcome) {
            println!("{banner}");
        }
    }
    Ok(())
}

fn print_help() {
    println!("commands: [enter]/n = next turn, r X Y = rotate right, l X Y = rotate left, q = quit");
}

fn parse_input(line: &str) -> Result<Input> {
    let mut fields = line.split_whitespace();
    let input = match fields.next() {
        None | Some("n") => Input::Advance,
        Some("h") | Some("?") => Input::Help,
        Some("q") => Input::Quit,
        Some(verb @ ("r" | "l")) => {
            let rotation = if verb == "r" {
                Rotation::Clockwise
            } else {
                Rotation::CounterClockwise
            };
            let (Some(column), Some(row)) = (fields.next(), fields.next()) else {
                bail!("usage: {verb} X Y");
            };
            let column = column
                .parse::<u32>()
                .with_context(|| format!("invalid column `{column}`"))?;
            let row = row
                .parse::<u32>()
                .with_context(|| format!("invalid row `{row}`"))?;
            Input::Rotate(CellCoord::new(column, row), rotation)
        }
        Some(other) => bail!("unknown command `{other}`"),
    };

    if let Some(extra) = fields.next() {
        bail!("unexpected argument `{extra}`");
    }
    Ok(input)
}
