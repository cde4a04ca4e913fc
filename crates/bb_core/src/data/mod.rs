//! Built-in data
//!
//! Sample rosters embedded in the binary, used by the CLI default run, the benchmark and
//! the whole-game tests.

pub mod sample_teams;

pub use sample_teams::{sample_away_team, sample_home_team, sample_teams, SAMPLE_TEAMS_JSON};
