//! invaders-headless: run the simulation without a view.
//!
//! Loads a game document, drives the fixed-tick loop for a number of ticks
//! with a scripted command schedule, and logs score and time notifications.
//!
//! Usage:
//!   invaders-headless --difficulty medium --ticks 2400
//!   invaders-headless --config config/config_hard.json --seed 9 --fire-odds 60

use std::path::PathBuf;
use std::process;

use invaders_core::commands::Command;
use invaders_core::config::GameConfig;
use invaders_core::constants::DEFAULT_ENEMY_FIRE_ODDS;
use invaders_core::enums::{BulkDelete, Difficulty, GameOutcome};
use invaders_sim::{GameEngine, SimConfig};
use tracing_subscriber::EnvFilter;

struct Options {
    source: ConfigSource,
    ticks: u64,
    seed: u64,
    fire_odds: u32,
}

enum ConfigSource {
    File(PathBuf),
    Difficulty { dir: PathBuf, difficulty: Difficulty },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            process::exit(1);
        }
    };

    let loaded = match &options.source {
        ConfigSource::File(path) => GameConfig::load(path),
        ConfigSource::Difficulty { dir, difficulty } => GameConfig::for_difficulty(dir, *difficulty),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    run(&config, &options);
}

fn print_usage() {
    eprintln!(
        "invaders-headless: run the invaders simulation without a view\n\
         \n\
         Options:\n\
         \n\
           --config <path>        Game document to load\n\
           --difficulty <name>    easy | medium | hard (default: easy)\n\
           --config-dir <path>    Directory holding config_<difficulty>.json (default: config)\n\
           --ticks <N>            Ticks to simulate (default: 2400)\n\
           --seed <N>             RNG seed (default: 42)\n\
           --fire-odds <N>        1-in-N enemy fire chance per tick, 0 disables (default: {DEFAULT_ENEMY_FIRE_ODDS})\n\
         \n\
         Log level follows RUST_LOG (default: info).\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let source = match find_value(args, "--config") {
        Some(path) => ConfigSource::File(PathBuf::from(path)),
        None => ConfigSource::Difficulty {
            dir: PathBuf::from(find_value(args, "--config-dir").unwrap_or("config")),
            difficulty: find_value(args, "--difficulty")
                .unwrap_or("easy")
                .parse()?,
        },
    };

    Ok(Options {
        source,
        ticks: parse_number(args, "--ticks", 2400)?,
        seed: parse_number(args, "--seed", 42)?,
        fire_odds: parse_number(args, "--fire-odds", DEFAULT_ENEMY_FIRE_ODDS)?,
    })
}

fn find_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T, String> {
    match find_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("{flag} expects a number, got {raw}")),
        None => Ok(default),
    }
}

/// Commands issued before a given tick. Stands in for a keyboard.
fn scripted_commands(tick: u64) -> Vec<Command> {
    let mut commands = Vec::new();
    match tick % 480 {
        0 => commands.push(Command::MoveLeft),
        120 => commands.push(Command::StopLeft),
        240 => commands.push(Command::MoveRight),
        360 => commands.push(Command::StopRight),
        _ => {}
    }
    if tick % 50 == 0 {
        commands.push(Command::Shoot);
    }
    match tick {
        600 => commands.push(Command::Snapshot),
        900 => commands.push(Command::DeleteAll {
            category: BulkDelete::SlowProjectiles,
        }),
        1200 => commands.push(Command::Restore),
        1500 => commands.push(Command::DeleteAll {
            category: BulkDelete::FastAliens,
        }),
        _ => {}
    }
    commands
}

fn run(config: &GameConfig, options: &Options) {
    let mut engine = GameEngine::new(
        config,
        SimConfig {
            seed: options.seed,
            enemy_fire_odds: options.fire_odds,
        },
    );
    engine.attach_score_observer(|score: u32| tracing::info!(score, "score changed"));
    engine.attach_time_observer(|secs: u64| {
        tracing::info!(time = %format!("{}:{:02}", secs / 60, secs % 60), "time changed")
    });

    for tick in 0..options.ticks {
        for command in scripted_commands(tick) {
            let applied = engine.execute(command);
            tracing::debug!(tick, ?command, applied, "command");
        }

        engine.update();

        for category in BulkDelete::ALL {
            if engine.is_deletion_pending(category) {
                tracing::info!(?category, "bulk delete observed");
                engine.reset_deletion_pending(category);
            }
        }
        if engine.is_restore_pending() {
            tracing::info!(tick = engine.tick_count(), "restore observed");
            engine.reset_restore_pending();
        }
        if engine.outcome() != GameOutcome::InProgress {
            break;
        }
    }

    let view = engine.frame_view();
    tracing::info!(
        tick = view.tick,
        score = view.score,
        outcome = ?view.outcome,
        entities = view.entities.len(),
        "simulation finished"
    );
}
