//! Game Result Data Structures
//!
//! The output of one simulated game. Renderers and serializers read this; nothing
//! here feeds back into the simulation.

use super::play::{PlayRecord, Score};
use super::player::PlayerId;
use super::stats::{PlayerGameStats, TeamTotals};
use super::team::TeamSide;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Runs per inning. A bottom half that was never played is `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Linescore {
    pub away: Vec<u32>,
    pub home: Vec<Option<u32>>,
}

impl Linescore {
    pub fn innings(&self) -> usize {
        self.away.len()
    }

    pub fn away_total(&self) -> u32 {
        self.away.iter().sum()
    }

    pub fn home_total(&self) -> u32 {
        self.home.iter().flatten().sum()
    }

    /// Single-line rendering, `X` for an unplayed bottom half.
    pub fn format_row(&self, side: TeamSide) -> String {
        match side {
            TeamSide::Away => self.away.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" "),
            TeamSide::Home => self
                .home
                .iter()
                .map(|r| r.map_or_else(|| "X".to_string(), |r| r.to_string()))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    /// Home led after the top half of the ninth or later.
    HomeLeadSkipsBottom,
    /// Home took the lead during its last turn at bat.
    WalkOff,
    /// A full inning at or after the ninth ended with the scores apart.
    Regulation,
    /// The configured inning cap was reached.
    InningCap,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameResult {
    pub seed: u64,
    /// Seed for the presentation stream. The simulation never draws from it.
    pub commentary_seed: u64,
    pub away_team: String,
    pub home_team: String,
    pub final_score: Score,
    pub innings_played: u32,
    pub end: GameEnd,
    pub plays: Vec<PlayRecord>,
    pub linescore: Linescore,
    pub away_totals: TeamTotals,
    pub home_totals: TeamTotals,
    pub player_stats: BTreeMap<PlayerId, PlayerGameStats>,
    /// Pitchers in order of appearance.
    pub away_pitchers_used: Vec<PlayerId>,
    pub home_pitchers_used: Vec<PlayerId>,
}

impl GameResult {
    pub fn winner(&self) -> Option<TeamSide> {
        use std::cmp::Ordering;
        match self.final_score.home.cmp(&self.final_score.away) {
            Ordering::Greater => Some(TeamSide::Home),
            Ordering::Less => Some(TeamSide::Away),
            Ordering::Equal => None,
        }
    }

    pub fn totals(&self, side: TeamSide) -> &TeamTotals {
        match side {
            TeamSide::Away => &self.away_totals,
            TeamSide::Home => &self.home_totals,
        }
    }

    pub fn stats_for(&self, player: &PlayerId) -> Option<&PlayerGameStats> {
        self.player_stats.get(player)
    }

    /// SHA-256 over the serialized play log, hex encoded.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for play in &self.plays {
            // PlayRecord holds only plain data, so serialization cannot fail.
            if let Ok(bytes) = serde_json::to_vec(play) {
                hasher.update(&bytes);
            }
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}
