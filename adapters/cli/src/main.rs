#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Lawn Defence headlessly.
//!
//! The binary loads an optional TOML tuning file, starts a session and lets a
//! scripted player defend the lawn at a fixed frame step, printing optional
//! ASCII frames and a TOML summary of the outcome.

mod autoplay;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lawn_defence_core::{Cue, SessionState, WELCOME_BANNER};
use lawn_defence_session::Session;
use serde::Serialize;
use tracing::info;

use autoplay::Autoplay;

/// Command-line arguments accepted by the Lawn Defence CLI.
#[derive(Debug, Parser)]
#[command(name = "lawn-defence", about = "Headless Lawn Defence simulation")]
struct CliArgs {
    /// TOML file overriding the default tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Session seed driving every random choice.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,

    /// Upper bound on simulated seconds before the run is abandoned.
    #[arg(long, default_value_t = 600)]
    max_seconds: u64,

    /// Print an ASCII frame every N frames.
    #[arg(long, value_name = "N")]
    render_every: Option<u64>,

    /// Leave the lawn undefended instead of running the scripted player.
    #[arg(long)]
    idle: bool,

    /// Print the effective tuning as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

/// Outcome report printed at the end of a run.
#[derive(Debug, Default, Serialize)]
struct Summary {
    outcome: String,
    seed: u64,
    elapsed_ms: u64,
    wave: u32,
    final_wave: u32,
    balance: u32,
    plants_placed: u32,
    plants_lost: u32,
    shots_fired: u32,
    enemies_destroyed: u32,
    pickups_collected: u32,
}

impl Summary {
    fn record(&mut self, cues: &[Cue]) {
        for cue in cues {
            match cue {
                Cue::PlantPlaced(_) => self.plants_placed += 1,
                Cue::PlantDestroyed(_) => self.plants_lost += 1,
                Cue::ProjectileFired => self.shots_fired += 1,
                Cue::EnemyDestroyed(_) => self.enemies_destroyed += 1,
                Cue::PickupCollected => self.pickups_collected += 1,
                Cue::EnemyHit(_)
                | Cue::PlantEaten(_)
                | Cue::GameOver
                | Cue::Victory
                | Cue::MenuClick => {}
            }
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

/// Entry point for the Lawn Defence command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let tuning = config::load_tuning(args.config.as_deref())?;
    if args.print_config {
        println!("{}", config::render_tuning(&tuning)?);
        return Ok(());
    }

    println!("{WELCOME_BANNER}");
    let mut bot = (!args.idle).then(|| Autoplay::new(&tuning.lawn.grid()));
    let mut session = Session::new(tuning, args.seed).context("failed to create session")?;
    session.start_session().context("failed to start session")?;

    let max_frames = args.max_seconds.saturating_mul(1_000) / args.frame_ms;
    let mut summary = Summary {
        seed: args.seed,
        ..Summary::default()
    };
    for frame in 0..max_frames {
        if let Some(bot) = bot.as_mut() {
            let _ = bot.act(&mut session);
        }
        session.tick(args.frame_ms);
        summary.record(&session.drain_cues());

        if let Some(every) = args.render_every.filter(|every| *every > 0) {
            if frame % every == 0 {
                println!("{}\n", render::frame(&session.snapshot()));
            }
        }
        if session.state() != SessionState::Playing {
            break;
        }
    }

    let snapshot = session.snapshot();
    summary.outcome = match snapshot.state {
        SessionState::Victory => "victory",
        SessionState::GameOver => "defeat",
        SessionState::Playing | SessionState::Menu | SessionState::Help => "abandoned",
    }
    .to_owned();
    summary.elapsed_ms = u64::try_from(snapshot.elapsed.as_millis()).unwrap_or(u64::MAX);
    summary.wave = snapshot.wave.wave;
    summary.final_wave = snapshot.wave.final_wave;
    summary.balance = snapshot.balance;
    info!(outcome = %summary.outcome, elapsed_ms = summary.elapsed_ms, "run finished");

    println!(
        "{}",
        toml::to_string_pretty(&summary).context("failed to serialize summary")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawn_defence_core::{EnemyKind, PlantKind};

    #[test]
    fn summary_counts_gameplay_cues() {
        let mut summary = Summary::default();
        summary.record(&[
            Cue::MenuClick,
            Cue::PlantPlaced(PlantKind::Shooter),
            Cue::ProjectileFired,
            Cue::EnemyHit(EnemyKind::Normal),
            Cue::EnemyDestroyed(EnemyKind::Normal),
            Cue::PickupCollected,
            Cue::PlantDestroyed(PlantKind::Shooter),
        ]);
        assert_eq!(summary.plants_placed, 1);
        assert_eq!(summary.plants_lost, 1);
        assert_eq!(summary.shots_fired, 1);
        assert_eq!(summary.enemies_destroyed, 1);
        assert_eq!(summary.pickups_collected, 1);
    }

    #[test]
    fn arguments_parse_with_defaults() {
        let args = CliArgs::try_parse_from(["lawn-defence", "--seed", "42", "--idle"])
            .expect("valid arguments");
        assert_eq!(args.seed, 42);
        assert!(args.idle);
        assert_eq!(args.frame_ms, 16);
        assert!(args.config.is_none());
        assert!(CliArgs::try_parse_from(["lawn-defence", "--frame-ms", "0"]).is_err());
    }
}
