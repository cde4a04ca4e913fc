//! Box-score accumulation from the play log.
//!
//! Pitch counts are recorded as pitches are thrown; everything else is derived from each
//! finished [`PlayRecord`], so the box score can never disagree with the log.

use crate::models::{
    ActionEvent, AtBatOutcome, CreditKind, Half, Linescore, MovementCause, PitchCall, PlayEvent,
    PlayRecord, PlayerGameStats, PlayerId, Team, TeamSide, TeamTotals,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct StatsRecorder {
    players: BTreeMap<PlayerId, PlayerGameStats>,
    totals: [TeamTotals; 2],
    linescore: Linescore,
}

pub struct BoxScore {
    pub players: BTreeMap<PlayerId, PlayerGameStats>,
    pub away: TeamTotals,
    pub home: TeamTotals,
    pub linescore: Linescore,
}

impl StatsRecorder {
    /// Every rostered player gets a (possibly empty) line.
    pub fn new(home: &Team, away: &Team) -> Self {
        let players = home
            .player_ids()
            .chain(away.player_ids())
            .map(|id| (id.clone(), PlayerGameStats::default()))
            .collect();
        Self { players, ..Self::default() }
    }

    fn line(&mut self, id: &PlayerId) -> &mut PlayerGameStats {
        self.players.entry(id.clone()).or_default()
    }

    pub fn record_pitch(&mut self, pitcher: &PlayerId, call: PitchCall) {
        self.line(pitcher).pitching.record_pitch(call.is_strike());
    }

    pub fn start_half(&mut self, half: Half) {
        match half {
            Half::Top => self.linescore.away.push(0),
            Half::Bottom => self.linescore.home.push(Some(0)),
        }
    }

    /// The home team did not need its last turn at bat.
    pub fn skip_bottom(&mut self) {
        self.linescore.home.push(None);
    }

    fn add_linescore_runs(&mut self, side: TeamSide, runs: u32) {
        match side {
            TeamSide::Away => {
                if let Some(cell) = self.linescore.away.last_mut() {
                    *cell += runs;
                }
            }
            TeamSide::Home => {
                if let Some(Some(cell)) = self.linescore.home.last_mut() {
                    *cell += runs;
                }
            }
        }
    }

    pub fn record_left_on_base(&mut self, side: TeamSide, runners: usize) {
        self.totals[side.index()].record_left_on_base(runners as u32);
    }

    pub fn record_play(&mut self, play: &PlayRecord, batting: TeamSide) {
        let fielding = batting.opponent();
        let outcome = &play.outcome;

        if outcome.completes_plate_appearance() {
            let batter = &mut self.line(&play.batter).batting;
            batter.record_plate_appearance(outcome.is_official_at_bat());
            match outcome {
                AtBatOutcome::Single { .. } => batter.record_single(),
                AtBatOutcome::Double { .. } => batter.record_double(),
                AtBatOutcome::Triple { .. } => batter.record_triple(),
                AtBatOutcome::HomeRun { .. } => batter.record_home_run(),
                AtBatOutcome::Walk => batter.record_walk(),
                AtBatOutcome::HitByPitch => batter.record_hit_by_pitch(),
                AtBatOutcome::Strikeout { .. } | AtBatOutcome::StrikeoutDoublePlay { .. } => {
                    batter.record_strikeout()
                }
                AtBatOutcome::SacrificeBunt { .. } => batter.record_sacrifice_bunt(),
                AtBatOutcome::SacFly { .. } => batter.record_sacrifice_fly(),
                AtBatOutcome::DoublePlay { .. } => batter.record_gidp(),
                _ => {}
            }
            batter.record_rbi(play.rbi);

            let pitcher = &mut self.line(&play.pitcher).pitching;
            pitcher.record_batter_faced();
            match outcome {
                AtBatOutcome::Walk => pitcher.record_walk(),
                AtBatOutcome::HitByPitch => pitcher.record_hit_batter(),
                o if o.is_strikeout() => pitcher.record_strikeout(),
                o if o.is_hit() => {
                    pitcher.record_hit(matches!(o, AtBatOutcome::HomeRun { .. }))
                }
                _ => {}
            }
        }

        let pitcher = &mut self.line(&play.pitcher).pitching;
        pitcher.record_outs(play.outs_recorded() as u32);
        pitcher.record_runs(play.runs);
        for event in &play.events {
            if let PlayEvent::Action(ActionEvent::WildPitch) = event {
                pitcher.record_wild_pitch();
            }
        }

        for movement in &play.movements {
            let runner = &mut self.line(&movement.runner).batting;
            if movement.scored {
                runner.record_run();
            }
            match movement.cause {
                MovementCause::StolenBase => runner.record_stolen_base(),
                MovementCause::CaughtStealing => runner.record_caught_stealing(),
                _ => {}
            }
            for credit in &movement.credits {
                let fielder = &mut self.line(&credit.player).fielding;
                match credit.kind {
                    CreditKind::Putout => fielder.record_putout(),
                    CreditKind::Assist => fielder.record_assist(),
                    CreditKind::FieldingError => {
                        fielder.record_error();
                        self.totals[fielding.index()].record_error();
                    }
                }
            }
        }

        let totals = &mut self.totals[batting.index()];
        totals.record_runs(play.runs);
        if outcome.is_hit() {
            totals.record_hit();
        }
        self.add_linescore_runs(batting, play.runs);
    }

    pub fn finish(self) -> BoxScore {
        let [away, home] = self.totals;
        BoxScore { players: self.players, away, home, linescore: self.linescore }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::play_id;
    use crate::engine::test_fixtures::{id, test_matchup};
    use crate::models::{
        Base, BattedBall, Bases, Count, Credit, Position, RunnerMovement, Score, Situation,
    };

    fn situation(outs: u8) -> Situation {
        Situation { outs, bases: Bases::empty(), score: Score::default() }
    }

    fn home_run_play() -> PlayRecord {
        PlayRecord {
            at_bat_index: 0,
            play_id: play_id(1, 0),
            inning: 1,
            half: Half::Top,
            batter: id("a-b1"),
            pitcher: id("h-sp"),
            before: situation(0),
            count: Count::new(1, 1),
            outcome: AtBatOutcome::HomeRun {
                ball: BattedBall { exit_velocity: 108.0, launch_angle: 28.0 },
            },
            notation: "HR".to_string(),
            events: Vec::new(),
            movements: vec![RunnerMovement {
                runner: id("a-b1"),
                start: Base::Home,
                end: Some(Base::Home),
                out_base: None,
                is_out: false,
                scored: true,
                rbi: true,
                cause: MovementCause::Play,
                credits: Vec::new(),
            }],
            runs: 1,
            rbi: 1,
            after: Situation { score: Score { away: 1, home: 0 }, ..situation(0) },
        }
    }

    #[test]
    fn test_home_run_lines() {
        let (home, away) = test_matchup();
        let mut stats = StatsRecorder::new(&home, &away);
        stats.start_half(Half::Top);
        stats.record_play(&home_run_play(), TeamSide::Away);
        let box_score = stats.finish();

        let batter = &box_score.players[&id("a-b1")].batting;
        assert_eq!((batter.plate_appearances, batter.at_bats, batter.hits), (1, 1, 1));
        assert_eq!((batter.home_runs, batter.rbi, batter.runs), (1, 1, 1));

        let pitcher = &box_score.players[&id("h-sp")].pitching;
        assert_eq!((pitcher.batters_faced, pitcher.hits, pitcher.home_runs, pitcher.runs), (1, 1, 1, 1));

        assert_eq!(box_score.away.runs, 1);
        assert_eq!(box_score.away.hits, 1);
        assert_eq!(box_score.linescore.away, vec![1]);
    }

    #[test]
    fn test_credits_and_errors() {
        let (home, away) = test_matchup();
        let mut stats = StatsRecorder::new(&home, &away);
        stats.start_half(Half::Top);
        let mut play = home_run_play();
        play.outcome = AtBatOutcome::FieldError {
            ball: BattedBall { exit_velocity: 85.0, launch_angle: 2.0 },
            fielder: Position::SS,
        };
        play.runs = 0;
        play.rbi = 0;
        play.movements = vec![RunnerMovement {
            runner: id("a-b1"),
            start: Base::Home,
            end: Some(Base::First),
            out_base: None,
            is_out: false,
            scored: false,
            rbi: false,
            cause: MovementCause::Play,
            credits: vec![Credit::error(&id("h-b2"), Position::SS)],
        }];
        stats.record_play(&play, TeamSide::Away);
        let box_score = stats.finish();

        assert_eq!(box_score.players[&id("h-b2")].fielding.errors, 1);
        assert_eq!(box_score.home.errors, 1);
        assert_eq!(box_score.away.hits, 0);
        assert_eq!(box_score.players[&id("a-b1")].batting.at_bats, 1);
    }

    #[test]
    fn test_skipped_bottom_half() {
        let (home, away) = test_matchup();
        let mut stats = StatsRecorder::new(&home, &away);
        stats.start_half(Half::Top);
        stats.skip_bottom();
        let box_score = stats.finish();
        assert_eq!(box_score.linescore.format_row(TeamSide::Home), "X");
    }
}
