//! Sample rosters
//!
//! Two fictional clubs, `Bay Bombers` and `Pacific City Pilots`, each with nine batters,
//! a starter, two relievers and a closer. Compiled in with `include_str!`, parsed once.

use crate::models::Team;
use serde::Deserialize;
use std::sync::OnceLock;

/// Roster file as shipped (~10KB).
pub const SAMPLE_TEAMS_JSON: &str = include_str!("../../data/sample_teams.json");

#[derive(Debug, Deserialize)]
struct SampleLeague {
    teams: Vec<Team>,
}

static SAMPLE_TEAMS: OnceLock<Vec<Team>> = OnceLock::new();

/// Both sample clubs, home club first.
pub fn sample_teams() -> &'static [Team] {
    SAMPLE_TEAMS.get_or_init(|| {
        let league: SampleLeague =
            serde_json::from_str(SAMPLE_TEAMS_JSON).expect("Embedded sample roster JSON is corrupted");
        league.teams
    })
}

/// Bay Bombers.
pub fn sample_home_team() -> Team {
    sample_teams()[0].clone()
}

/// Pacific City Pilots.
pub fn sample_away_team() -> Team {
    sample_teams()[1].clone()
}
