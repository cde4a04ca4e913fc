//! Baseball simulation CLI
//!
//! Runs one game or a batch of seeds from roster files (or the built-in sample clubs) and
//! prints JSON, a box score or play-by-play. Logs go to stderr; filter with `RUST_LOG`.

use anyhow::{Context, Result};
use bb_cli::{format_box_score, format_play_by_play, load_config, load_team, BatchSummary};
use bb_core::data::{sample_away_team, sample_home_team};
use bb_core::models::Team;
use bb_core::{simulate, simulate_batch, SimulationOptions};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bb_cli")]
#[command(about = "Deterministic baseball play-by-play simulator", long_about = None)]
#[command(version = bb_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MatchupArgs {
    /// Home roster (JSON or YAML); defaults to the Bay Bombers
    #[arg(long)]
    home: Option<PathBuf>,

    /// Away roster (JSON or YAML); defaults to the Pacific City Pilots
    #[arg(long)]
    away: Option<PathBuf>,

    /// Engine tuning file (JSON or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many innings even if tied (at least 9)
    #[arg(long)]
    max_innings: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game
    Simulate {
        #[command(flatten)]
        matchup: MatchupArgs,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, value_enum, default_value_t = GameFormat::BoxScore)]
        format: GameFormat,
    },

    /// Simulate one game per seed in parallel
    Batch {
        #[command(flatten)]
        matchup: MatchupArgs,

        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: u64,

        /// First seed; games use consecutive seeds
        #[arg(long, default_value_t = 0)]
        start_seed: u64,

        #[arg(long, value_enum, default_value_t = BatchFormat::Summary)]
        format: BatchFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GameFormat {
    Json,
    BoxScore,
    Plays,
}

#[derive(Clone, Copy, ValueEnum)]
enum BatchFormat {
    Json,
    Summary,
}

impl MatchupArgs {
    fn teams(&self) -> Result<(Team, Team)> {
        let home = match &self.home {
            Some(path) => load_team(path)?,
            None => sample_home_team(),
        };
        let away = match &self.away {
            Some(path) => load_team(path)?,
            None => sample_away_team(),
        };
        Ok((home, away))
    }

    fn options(&self, seed: u64) -> Result<SimulationOptions> {
        let mut options = SimulationOptions::new(seed);
        options.max_innings = self.max_innings;
        if let Some(path) = &self.config {
            options.config = load_config(path)?;
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { matchup, seed, format } => {
            let (home, away) = matchup.teams()?;
            let options = matchup.options(seed)?;
            let result = simulate(&home, &away, &options).context("Simulation failed")?;
            info!(digest = %result.digest(), "game simulated");

            match format {
                GameFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                GameFormat::BoxScore => print!("{}", format_box_score(&result, &home, &away)),
                GameFormat::Plays => print!("{}", format_play_by_play(&result)),
            }
        }

        Commands::Batch { matchup, games, start_seed, format } => {
            let (home, away) = matchup.teams()?;
            let options = matchup.options(start_seed)?;
            let seeds: Vec<u64> = (start_seed..start_seed.saturating_add(games)).collect();
            let results = simulate_batch(&home, &away, &seeds, &options).context("Batch simulation failed")?;
            info!(games = results.len(), "batch simulated");

            match format {
                BatchFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                BatchFormat::Summary => {
                    let summary = BatchSummary::from_results(&results);
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
            }
        }
    }

    Ok(())
}
