//! At-Bat Resolution
//!
//! One plate appearance from the pitching-change check to the appended [`PlayRecord`].
//! Between pitches the running game can move runners (steals, wild pitches, passed balls);
//! those movements and any runs they score belong to the at-bat they happened in.

use super::base_running::{advance_on_misplay, resolve_play};
use super::batted_ball::resolve_contact;
use super::bullpen::Arm;
use super::fielding::{resolve_ball_in_play, scorer_notation};
use super::game_loop::GameEngine;
use super::pitch::{advance_count, hit_by_pitch, resolve_pitch, CountResult, PitchContext, PitchResolution};
use super::rng::{chance, play_id};
use super::stealing::{decide_steal, misplay_check, run_steal, StealAttempt};
use crate::models::{
    ActionEvent, AtBatOutcome, Base, BattingProfile, Count, MovementCause, PitchCall, PitchEvent,
    PlayEvent, PlayRecord, RunnerMovement, TeamSide,
};
use tracing::trace;

/// Events and between-pitch movements collected while an at-bat is in progress.
#[derive(Default)]
struct AtBatLog {
    events: Vec<PlayEvent>,
    movements: Vec<RunnerMovement>,
    pitches: u32,
    runs: u32,
}

impl AtBatLog {
    fn push_pitch(&mut self, count: Count, pitch: &PitchResolution, bunting: bool) -> &mut PitchEvent {
        self.pitches += 1;
        self.events.push(PlayEvent::Pitch(PitchEvent {
            pitch_number: self.pitches,
            count,
            pitch_type: pitch.thrown.pitch_type,
            velocity: pitch.thrown.velocity,
            spin_rate: pitch.thrown.spin_rate,
            px: pitch.thrown.px,
            pz: pitch.thrown.pz,
            in_zone: pitch.thrown.in_zone,
            call: pitch.call,
            is_bunt: bunting,
            batted_ball: None,
        }));
        match self.events.last_mut() {
            Some(PlayEvent::Pitch(event)) => event,
            _ => unreachable!("pitch event was just pushed"),
        }
    }
}

impl<'a> GameEngine<'a> {
    /// Count, resolve and record one pitch.
    fn throw_pitch(
        &mut self,
        pitcher: Arm<'a>,
        batter: &BattingProfile,
        count: Count,
        bunting: bool,
    ) -> PitchResolution {
        let pitch_count = self.state.record_pitch(pitcher.id());
        let ctx = PitchContext { batter, pitcher: pitcher.profile, pitch_count, bunting };
        let pitch = resolve_pitch(&mut self.rng, &self.config.pitch, &ctx);
        self.stats.record_pitch(pitcher.id(), pitch.call);
        trace!(
            pitcher = %pitcher.id(),
            pitch_count,
            balls = count.balls,
            strikes = count.strikes,
            pitch = pitch.thrown.pitch_type.code(),
            velocity = pitch.thrown.velocity,
            call = ?pitch.call,
            "pitch"
        );
        pitch
    }

    /// Run a steal attempt on the pitch just thrown. Returns `true` when the runner was
    /// caught.
    fn attempt_steal(&mut self, attempt: &StealAttempt, fielding: TeamSide, log: &mut AtBatLog) -> bool {
        let outcome = run_steal(&mut self.rng, attempt, &mut self.state.bases, &self.defenses[fielding.index()]);
        if !outcome.safe {
            self.state.record_out();
        }
        trace!(runner = %attempt.runner, to = attempt.to.label(), safe = outcome.safe, "steal attempt");
        log.events.push(PlayEvent::Action(outcome.event));
        log.movements.push(outcome.movement);
        !outcome.safe
    }

    /// Roll for a wild pitch or passed ball after a ball. Returns the cause when runners
    /// moved up.
    fn check_misplay(&mut self, log: &mut AtBatLog) -> Option<MovementCause> {
        let action = misplay_check(&mut self.rng, &self.config.running, &self.state.bases)?;
        let cause = match action {
            ActionEvent::WildPitch => MovementCause::WildPitch,
            _ => MovementCause::PassedBall,
        };
        let resolution = advance_on_misplay(&self.state.bases, self.state.outs, cause);
        self.state.apply(&resolution);
        trace!(?cause, runs = resolution.runs, "runners advance on misplayed pitch");
        log.runs += resolution.runs;
        log.events.push(PlayEvent::Action(action));
        log.movements.extend(resolution.movements);
        Some(cause)
    }

    /// Bunt only with fewer than two outs and a runner on first or second. The draw is
    /// skipped otherwise.
    fn decide_bunt(&mut self, batter: &BattingProfile) -> bool {
        let bases = &self.state.bases;
        let bunt_situation = self.state.outs < 2
            && (bases.is_occupied(Base::First) || bases.is_occupied(Base::Second));
        bunt_situation && chance(&mut self.rng, batter.bunt_propensity)
    }

    /// Pitch until the at-bat ends, a caught stealing ends the half-inning or a misplayed
    /// pitch ends the game.
    fn pitch_sequence(
        &mut self,
        pitcher: Arm<'a>,
        batter: &'a BattingProfile,
        batting: TeamSide,
        log: &mut AtBatLog,
    ) -> (AtBatOutcome, Count) {
        let fielding = batting.opponent();
        let batting_team = self.team(batting);

        if chance(&mut self.rng, batter.hbp_rate) {
            self.state.record_pitch(pitcher.id());
            let pitch = hit_by_pitch(&mut self.rng, &self.config.pitch, pitcher.profile);
            self.stats.record_pitch(pitcher.id(), pitch.call);
            log.push_pitch(Count::default(), &pitch, false);
            return (AtBatOutcome::HitByPitch, Count::default());
        }

        let bunting = self.decide_bunt(batter);
        let mut count = Count::default();
        loop {
            let steal = if bunting {
                None
            } else {
                decide_steal(
                    &mut self.rng,
                    &self.config.running,
                    &self.state.bases,
                    batting_team,
                    self.defenses[fielding.index()].catcher_arm,
                )
            };

            let pitch = self.throw_pitch(pitcher, batter, count, bunting);
            let result = advance_count(count, pitch.call, bunting);
            let event = log.push_pitch(count, &pitch, bunting);

            match result {
                CountResult::InPlay => {
                    // The ball in play takes precedence; the runner goes back.
                    let (ball, class) = resolve_contact(&mut self.rng, &self.config.batted_ball, batter, bunting);
                    let outcome = resolve_ball_in_play(
                        &mut self.rng,
                        &self.config.fielding,
                        &self.defenses[fielding.index()],
                        class,
                        ball,
                        &self.state.bases,
                        self.state.outs,
                    );
                    event.batted_ball = outcome.batted_ball().copied();
                    return (outcome, count);
                }
                CountResult::HitByPitch => return (AtBatOutcome::HitByPitch, count),
                CountResult::Walk => return (AtBatOutcome::Walk, Count::new(4, count.strikes)),
                CountResult::Strikeout { looking } => {
                    let final_count = Count::new(count.balls, 3);
                    if let Some(attempt) = steal.filter(|_| self.state.outs < 2) {
                        if self.attempt_steal(&attempt, fielding, log) {
                            let outcome = AtBatOutcome::StrikeoutDoublePlay {
                                looking,
                                runner: attempt.runner,
                                base: attempt.to,
                            };
                            return (outcome, final_count);
                        }
                    }
                    return (AtBatOutcome::Strikeout { looking }, final_count);
                }
                CountResult::Continue(next) => {
                    count = next;
                    if pitch.call == PitchCall::Foul {
                        continue;
                    }
                    if let Some(attempt) = steal {
                        if self.attempt_steal(&attempt, fielding, log) && self.state.outs >= 3 {
                            let outcome = AtBatOutcome::CaughtStealing { runner: attempt.runner, base: attempt.to };
                            return (outcome, count);
                        }
                    }
                    if pitch.call == PitchCall::Ball {
                        if let Some(cause) = self.check_misplay(log) {
                            if self.state.walk_off_reached() {
                                return (AtBatOutcome::WalkOffMisplay { cause }, count);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Play one at-bat for the current batter of the batting side and return its record.
    pub(super) fn play_at_bat(&mut self) -> PlayRecord {
        let batting = self.state.batting_side();
        let fielding = batting.opponent();
        self.change_pitcher_if_tired(fielding);

        let batter = &self.team(batting).lineup[self.state.current_batter(batting)];
        let pitcher = self.active_pitcher(fielding);
        let before = self.state.situation();
        let mut log = AtBatLog::default();

        let (outcome, count) = self.pitch_sequence(pitcher, &batter.batting, batting, &mut log);

        let mut rbi = 0;
        if outcome.completes_plate_appearance() {
            let resolution = resolve_play(
                &outcome,
                &batter.id,
                &self.state.bases,
                self.state.outs,
                &self.defenses[fielding.index()],
            );
            self.state.apply(&resolution);
            self.state.next_batter(batting);
            log.runs += resolution.runs;
            rbi = resolution.rbi;
            log.movements.extend(resolution.movements);
        }

        let at_bat_index = self.plays.len() as u32;
        PlayRecord {
            at_bat_index,
            play_id: play_id(self.seed, at_bat_index),
            inning: self.state.inning,
            half: self.state.half,
            batter: batter.id.clone(),
            pitcher: pitcher.id().clone(),
            before,
            count,
            notation: scorer_notation(&outcome),
            outcome,
            events: log.events,
            movements: log.movements,
            runs: log.runs,
            rbi,
            after: self.state.situation(),
        }
    }
}
