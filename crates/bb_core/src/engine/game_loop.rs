//! Game Loop
//!
//! Drives half-innings until one of the termination rules fires:
//! - after the top of the ninth or later, home already ahead: the bottom is skipped
//! - during the bottom of the ninth or later: the first play that puts home ahead ends it
//! - after a complete inning, ninth or later, with the scores apart
//! - the configured inning cap (the game may end tied)
//!
//! From the tenth inning on, every half starts with a runner on second: the batter two
//! lineup slots before that half's leadoff hitter.

use super::bullpen::{Arm, Bullpen};
use super::config::EngineConfig;
use super::fielding::Defense;
use super::rng::{game_rng, GameRng};
use super::state::GameState;
use super::stats_recorder::StatsRecorder;
use crate::error::{ConfigError, Result};
use crate::models::{validate_matchup, Base, GameEnd, GameResult, Half, PlayRecord, Team, TeamSide};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const REGULATION_INNINGS: u32 = 9;
pub const GHOST_RUNNER_FROM_INNING: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationOptions {
    pub seed: u64,
    /// Seed for renderers. Defaults to `seed` (on a separate stream).
    #[serde(default)]
    pub commentary_seed: Option<u64>,
    /// Hard stop; must be at least nine.
    #[serde(default)]
    pub max_innings: Option<u32>,
    #[serde(default)]
    pub config: EngineConfig,
}

impl SimulationOptions {
    pub fn new(seed: u64) -> Self {
        Self { seed, commentary_seed: None, max_innings: None, config: EngineConfig::default() }
    }

    pub fn with_max_innings(mut self, max_innings: u32) -> Self {
        self.max_innings = Some(max_innings);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_commentary_seed(mut self, seed: u64) -> Self {
        self.commentary_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if let Some(cap) = self.max_innings {
            if cap < REGULATION_INNINGS {
                return Err(ConfigError::InningsCapTooLow(cap));
            }
        }
        self.config.validate()
    }
}

/// Simulate one game. Rosters and options are validated first; after that the
/// simulation cannot fail.
pub fn simulate(home: &Team, away: &Team, options: &SimulationOptions) -> Result<GameResult> {
    options.validate()?;
    validate_matchup(home, away)?;
    let engine = GameEngine::new(home, away, options)?;
    Ok(engine.run())
}

/// Simulate one game per seed in parallel. Results come back in `seeds` order and match
/// sequential [`simulate`] calls exactly.
pub fn simulate_batch(
    home: &Team,
    away: &Team,
    seeds: &[u64],
    options: &SimulationOptions,
) -> Result<Vec<GameResult>> {
    options.validate()?;
    validate_matchup(home, away)?;
    seeds
        .par_iter()
        .map(|&seed| {
            let per_game = SimulationOptions { seed, commentary_seed: None, ..options.clone() };
            simulate(home, away, &per_game)
        })
        .collect()
}

pub struct GameEngine<'a> {
    pub(super) teams: [&'a Team; 2],
    pub(super) config: &'a EngineConfig,
    pub(super) seed: u64,
    commentary_seed: u64,
    max_innings: Option<u32>,
    pub(super) rng: GameRng,
    pub(super) state: GameState,
    pub(super) bullpens: [Bullpen<'a>; 2],
    pub(super) defenses: [Defense; 2],
    pub(super) plays: Vec<PlayRecord>,
    pub(super) stats: StatsRecorder,
}

impl<'a> GameEngine<'a> {
    pub fn new(home: &'a Team, away: &'a Team, options: &'a SimulationOptions) -> Result<Self> {
        let mut rng = game_rng(options.seed);
        // Shuffle order is part of the stream: home first.
        let home_pen = Bullpen::new(home, &mut rng)?;
        let away_pen = Bullpen::new(away, &mut rng)?;
        let defenses = [
            Defense::new(away, away_pen.active().player)?,
            Defense::new(home, home_pen.active().player)?,
        ];

        Ok(Self {
            teams: [away, home],
            config: &options.config,
            seed: options.seed,
            commentary_seed: options.commentary_seed.unwrap_or(options.seed),
            max_innings: options.max_innings,
            rng,
            state: GameState::new(),
            bullpens: [away_pen, home_pen],
            defenses,
            plays: Vec::new(),
            stats: StatsRecorder::new(home, away),
        })
    }

    pub fn team(&self, side: TeamSide) -> &'a Team {
        self.teams[side.index()]
    }

    /// The pitcher currently on the mound for `side`.
    pub fn active_pitcher(&self, side: TeamSide) -> Arm<'a> {
        self.bullpens[side.index()].active()
    }

    /// Once per at-bat, fielding team only.
    pub(super) fn change_pitcher_if_tired(&mut self, side: TeamSide) {
        let current = self.active_pitcher(side);
        let pitch_count = self.state.pitch_count(current.id());
        if let Some(reliever) = self.bullpens[side.index()].check_fatigue(pitch_count) {
            self.defenses[side.index()].set_pitcher(reliever.player);
            debug!(
                inning = self.state.inning,
                team = %self.team(side).name,
                out = %current.id(),
                pitches = pitch_count,
                replacement = %reliever.id(),
                "pitching change"
            );
        }
    }

    fn place_ghost_runner(&mut self) {
        let side = self.state.batting_side();
        let slot = self.state.ghost_runner_slot(side);
        let runner = &self.team(side).lineup[slot];
        self.state.bases.place(Base::Second, runner.id.clone());
        debug!(inning = self.state.inning, runner = %runner.id, "ghost runner on second");
    }

    /// Play one half-inning. Returns `true` on a walk-off.
    fn play_half(&mut self, half: Half) -> bool {
        self.state.start_half(half);
        self.stats.start_half(half);
        let batting = self.state.batting_side();
        let inning = self.state.inning;
        debug!(inning, half = half.label(), team = %self.team(batting).name, "half-inning start");

        if inning >= GHOST_RUNNER_FROM_INNING {
            self.place_ghost_runner();
        }

        let mut walk_off = false;
        loop {
            let play = self.play_at_bat();
            self.stats.record_play(&play, batting);
            self.plays.push(play);

            if self.state.walk_off_reached() {
                walk_off = true;
                break;
            }
            if self.state.outs >= 3 {
                break;
            }
        }

        self.stats.record_left_on_base(batting, self.state.bases.count());
        debug!(
            inning,
            half = half.label(),
            away = self.state.score.away,
            home = self.state.score.home,
            "half-inning end"
        );
        walk_off
    }

    pub fn run(mut self) -> GameResult {
        info!(
            seed = self.seed,
            away = %self.team(TeamSide::Away).name,
            home = %self.team(TeamSide::Home).name,
            "game start"
        );

        let end = loop {
            let inning = self.state.inning;
            self.play_half(Half::Top);
            if inning >= REGULATION_INNINGS && self.state.home_leads() {
                self.stats.skip_bottom();
                break GameEnd::HomeLeadSkipsBottom;
            }
            if self.play_half(Half::Bottom) {
                break GameEnd::WalkOff;
            }
            if inning >= REGULATION_INNINGS && self.state.score.home != self.state.score.away {
                break GameEnd::Regulation;
            }
            if self.max_innings.is_some_and(|cap| inning >= cap) {
                break GameEnd::InningCap;
            }
            self.state.inning += 1;
        };

        debug!(?end, inning = self.state.inning, "game over");
        info!(
            away = self.state.score.away,
            home = self.state.score.home,
            innings = self.state.inning,
            plays = self.plays.len(),
            "game final"
        );

        let box_score = self.stats.finish();
        GameResult {
            seed: self.seed,
            commentary_seed: self.commentary_seed,
            away_team: self.teams[0].name.clone(),
            home_team: self.teams[1].name.clone(),
            final_score: self.state.score,
            innings_played: self.state.inning,
            end,
            plays: self.plays,
            linescore: box_score.linescore,
            away_totals: box_score.away,
            home_totals: box_score.home,
            player_stats: box_score.players,
            away_pitchers_used: self.bullpens[0].used(),
            home_pitchers_used: self.bullpens[1].used(),
        }
    }
}
