//! # bb_core - Deterministic Baseball Play-by-Play Simulation Engine
//!
//! Simulates a full nine-inning (or longer) game pitch by pitch from two rosters and a
//! seed, producing an ordered play log plus box score.
//!
//! ## Features
//! - Deterministic: the same rosters, options and seed always produce the same game
//! - Pitch-level model with batted-ball physics, fielding, base running and bullpens
//! - Box score, linescore and scorer's notation derived from the play log
//! - JSON API and parallel batch simulation
//!
//! ## Example
//! ```rust
//! use bb_core::data::{sample_away_team, sample_home_team};
//! use bb_core::{simulate, SimulationOptions};
//!
//! let result = simulate(&sample_home_team(), &sample_away_team(), &SimulationOptions::new(42))
//!     .expect("sample rosters are valid");
//! assert!(result.innings_played >= 9);
//! ```

// Game engine APIs often require many parameters for state, rng and config
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_game_json, GameRequest, GameResponse};
pub use engine::{commentary_rng, simulate, simulate_batch, EngineConfig, SimulationOptions};
pub use error::{ConfigError, Result, RosterError, SimError};
pub use models::{AtBatOutcome, GameEnd, GameResult, PlayRecord, Player, PlayerId, Team, TeamSide};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON request/response schema version
pub const SCHEMA_VERSION: u8 = 1;
