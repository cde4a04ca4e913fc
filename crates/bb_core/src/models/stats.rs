//! Box-score counters.
//!
//! Fixed structs per player and per team, updated through named operations so every
//! counted stat is visible to the compiler.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattingLine {
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub runs: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub strikeouts: u32,
    pub sacrifice_bunts: u32,
    pub sacrifice_flies: u32,
    pub stolen_bases: u32,
    pub caught_stealing: u32,
    pub grounded_into_double_play: u32,
}

impl BattingLine {
    pub fn record_plate_appearance(&mut self, official_at_bat: bool) {
        self.plate_appearances += 1;
        if official_at_bat {
            self.at_bats += 1;
        }
    }

    pub fn record_single(&mut self) {
        self.hits += 1;
    }

    pub fn record_double(&mut self) {
        self.hits += 1;
        self.doubles += 1;
    }

    pub fn record_triple(&mut self) {
        self.hits += 1;
        self.triples += 1;
    }

    pub fn record_home_run(&mut self) {
        self.hits += 1;
        self.home_runs += 1;
    }

    pub fn record_walk(&mut self) {
        self.walks += 1;
    }

    pub fn record_hit_by_pitch(&mut self) {
        self.hit_by_pitch += 1;
    }

    pub fn record_strikeout(&mut self) {
        self.strikeouts += 1;
    }

    pub fn record_sacrifice_bunt(&mut self) {
        self.sacrifice_bunts += 1;
    }

    pub fn record_sacrifice_fly(&mut self) {
        self.sacrifice_flies += 1;
    }

    pub fn record_gidp(&mut self) {
        self.grounded_into_double_play += 1;
    }

    pub fn record_rbi(&mut self, rbi: u32) {
        self.rbi += rbi;
    }

    pub fn record_run(&mut self) {
        self.runs += 1;
    }

    pub fn record_stolen_base(&mut self) {
        self.stolen_bases += 1;
    }

    pub fn record_caught_stealing(&mut self) {
        self.caught_stealing += 1;
    }

    pub fn total_bases(&self) -> u32 {
        self.hits + self.doubles + 2 * self.triples + 3 * self.home_runs
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PitchingLine {
    pub batters_faced: u32,
    pub outs: u32,
    pub pitches: u32,
    pub strikes: u32,
    pub balls: u32,
    pub hits: u32,
    pub runs: u32,
    pub walks: u32,
    pub hit_batters: u32,
    pub strikeouts: u32,
    pub home_runs: u32,
    pub wild_pitches: u32,
}

impl PitchingLine {
    pub fn record_pitch(&mut self, strike: bool) {
        self.pitches += 1;
        if strike {
            self.strikes += 1;
        } else {
            self.balls += 1;
        }
    }

    pub fn record_batter_faced(&mut self) {
        self.batters_faced += 1;
    }

    pub fn record_outs(&mut self, outs: u32) {
        self.outs += outs;
    }

    pub fn record_hit(&mut self, home_run: bool) {
        self.hits += 1;
        if home_run {
            self.home_runs += 1;
        }
    }

    pub fn record_runs(&mut self, runs: u32) {
        self.runs += runs;
    }

    pub fn record_walk(&mut self) {
        self.walks += 1;
    }

    pub fn record_hit_batter(&mut self) {
        self.hit_batters += 1;
    }

    pub fn record_strikeout(&mut self) {
        self.strikeouts += 1;
    }

    pub fn record_wild_pitch(&mut self) {
        self.wild_pitches += 1;
    }

    /// Innings pitched in the conventional `6.2` notation.
    pub fn innings_pitched(&self) -> String {
        format!("{}.{}", self.outs / 3, self.outs % 3)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldingLine {
    pub putouts: u32,
    pub assists: u32,
    pub errors: u32,
}

impl FieldingLine {
    pub fn record_putout(&mut self) {
        self.putouts += 1;
    }

    pub fn record_assist(&mut self) {
        self.assists += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn chances(&self) -> u32 {
        self.putouts + self.assists + self.errors
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerGameStats {
    pub batting: BattingLine,
    pub pitching: PitchingLine,
    pub fielding: FieldingLine,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamTotals {
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    pub left_on_base: u32,
}

impl TeamTotals {
    pub fn record_runs(&mut self, runs: u32) {
        self.runs += runs;
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn record_left_on_base(&mut self, runners: u32) {
        self.left_on_base += runners;
    }
}
