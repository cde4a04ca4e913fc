//! Mutable game state, owned by the game loop.

use super::base_running::PlayResolution;
use super::game_loop::REGULATION_INNINGS;
use crate::models::{Bases, Half, PlayerId, Score, Situation, TeamSide, LINEUP_SIZE};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub inning: u32,
    pub half: Half,
    pub outs: u8,
    pub bases: Bases,
    pub score: Score,
    /// Next batter per side, indexed by [`TeamSide::index`].
    pub batter_index: [usize; 2],
    pub pitch_counts: BTreeMap<PlayerId, u32>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            inning: 1,
            half: Half::Top,
            outs: 0,
            bases: Bases::empty(),
            score: Score::default(),
            batter_index: [0, 0],
            pitch_counts: BTreeMap::new(),
        }
    }

    pub fn batting_side(&self) -> TeamSide {
        match self.half {
            Half::Top => TeamSide::Away,
            Half::Bottom => TeamSide::Home,
        }
    }

    pub fn fielding_side(&self) -> TeamSide {
        self.batting_side().opponent()
    }

    pub fn start_half(&mut self, half: Half) {
        self.half = half;
        self.outs = 0;
        self.bases.clear();
    }

    pub fn situation(&self) -> Situation {
        Situation { outs: self.outs, bases: self.bases.clone(), score: self.score }
    }

    pub fn runs(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Away => self.score.away,
            TeamSide::Home => self.score.home,
        }
    }

    pub fn add_runs(&mut self, side: TeamSide, runs: u32) {
        match side {
            TeamSide::Away => self.score.away += runs,
            TeamSide::Home => self.score.home += runs,
        }
    }

    pub fn home_leads(&self) -> bool {
        self.score.home > self.score.away
    }

    /// Home has gone ahead in the bottom of the ninth or later.
    pub fn walk_off_reached(&self) -> bool {
        self.half == Half::Bottom && self.inning >= REGULATION_INNINGS && self.home_leads()
    }

    pub fn current_batter(&self, side: TeamSide) -> usize {
        self.batter_index[side.index()]
    }

    pub fn next_batter(&mut self, side: TeamSide) {
        let idx = &mut self.batter_index[side.index()];
        *idx = (*idx + 1) % LINEUP_SIZE;
    }

    /// Lineup slot two ahead of `side`'s next batter, wrapping. Used for the extra-inning
    /// runner on second.
    pub fn ghost_runner_slot(&self, side: TeamSide) -> usize {
        (self.current_batter(side) + LINEUP_SIZE - 2) % LINEUP_SIZE
    }

    /// Count one pitch for `pitcher` and return the new total.
    pub fn record_pitch(&mut self, pitcher: &PlayerId) -> u32 {
        let count = self.pitch_counts.entry(pitcher.clone()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn pitch_count(&self, pitcher: &PlayerId) -> u32 {
        self.pitch_counts.get(pitcher).copied().unwrap_or(0)
    }

    /// Take bases, outs and runs from a resolved play for the batting team.
    pub fn apply(&mut self, resolution: &PlayResolution) {
        assert!(resolution.outs <= 3, "outs out of range: {}", resolution.outs);
        assert!(resolution.outs >= self.outs, "outs went backwards");
        self.outs = resolution.outs;
        self.bases = resolution.bases.clone();
        self.bases.assert_consistent();
        self.add_runs(self.batting_side(), resolution.runs);
    }

    /// Record a runner put out between pitches.
    pub fn record_out(&mut self) {
        self.outs += 1;
        assert!(self.outs <= 3, "more than three outs in a half-inning");
    }
}
