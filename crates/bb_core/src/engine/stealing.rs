//! Running game between pitches: stolen bases, caught stealing, wild pitches and
//! passed balls.

use super::config::RunningConfig;
use super::fielding::{steal_cover, Defense};
use super::rng::chance;
use crate::models::{
    ActionEvent, Base, Bases, Credit, MovementCause, PlayerId, Position, RunnerMovement, Team,
};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct StealAttempt {
    pub runner: PlayerId,
    pub from: Base,
    pub to: Base,
    pub success_probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StealOutcome {
    pub event: ActionEvent,
    pub movement: RunnerMovement,
    pub safe: bool,
}

/// Runner who may go: on first with second open, or alone on second with third open.
pub fn steal_candidate(bases: &Bases) -> Option<(Base, &PlayerId)> {
    if let Some(runner) = bases.runner(Base::First) {
        if !bases.is_occupied(Base::Second) {
            return Some((Base::First, runner));
        }
        return None;
    }
    match bases.runner(Base::Second) {
        Some(runner) if !bases.is_occupied(Base::Third) => Some((Base::Second, runner)),
        _ => None,
    }
}

pub fn success_probability(steal_success: f64, catcher_arm: f64, cfg: &RunningConfig) -> f64 {
    (steal_success - (catcher_arm - 0.5) * cfg.catcher_arm_weight).clamp(0.05, 0.98)
}

/// Decide before a pitch whether the candidate runner goes. Draws only when there is a
/// candidate.
pub fn decide_steal<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &RunningConfig,
    bases: &Bases,
    batting: &Team,
    catcher_arm: f64,
) -> Option<StealAttempt> {
    let (from, runner) = steal_candidate(bases)?;
    let profile = &batting.player(runner)?.batting;
    let mut attempt = profile.steal_tendency * cfg.steal_attempt_scale;
    if from == Base::Second {
        attempt *= cfg.steal_third_factor;
    }
    if !chance(rng, attempt) {
        return None;
    }
    Some(StealAttempt {
        runner: runner.clone(),
        from,
        to: from.next(),
        success_probability: success_probability(profile.steal_success, catcher_arm, cfg),
    })
}

/// Run the attempt: the runner is either placed on the next base or put out there.
/// The caller accounts for the out.
pub fn run_steal<R: Rng + ?Sized>(
    rng: &mut R,
    attempt: &StealAttempt,
    bases: &mut Bases,
    defense: &Defense,
) -> StealOutcome {
    let removed = bases.remove(attempt.from);
    assert_eq!(removed.as_ref(), Some(&attempt.runner), "steal runner is not on {}", attempt.from.label());

    if chance(rng, attempt.success_probability) {
        bases.place(attempt.to, attempt.runner.clone());
        return StealOutcome {
            event: ActionEvent::StolenBase { runner: attempt.runner.clone(), base: attempt.to },
            movement: RunnerMovement {
                runner: attempt.runner.clone(),
                start: attempt.from,
                end: Some(attempt.to),
                out_base: None,
                is_out: false,
                scored: false,
                rbi: false,
                cause: MovementCause::StolenBase,
                credits: Vec::new(),
            },
            safe: true,
        };
    }

    let cover = steal_cover(attempt.to);
    StealOutcome {
        event: ActionEvent::CaughtStealing { runner: attempt.runner.clone(), base: attempt.to },
        movement: RunnerMovement {
            runner: attempt.runner.clone(),
            start: attempt.from,
            end: None,
            out_base: Some(attempt.to),
            is_out: true,
            scored: false,
            rbi: false,
            cause: MovementCause::CaughtStealing,
            credits: vec![
                Credit::assist(defense.id(Position::C), Position::C),
                Credit::putout(defense.id(cover), cover),
            ],
        },
        safe: false,
    }
}

/// One draw after a ball that is not ball four, runners on: wild pitch, passed ball or
/// nothing.
pub fn misplay_check<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &RunningConfig,
    bases: &Bases,
) -> Option<ActionEvent> {
    if bases.is_empty() {
        return None;
    }
    let roll = rng.gen::<f64>();
    if roll < cfg.wild_pitch_rate {
        Some(ActionEvent::WildPitch)
    } else if roll < cfg.wild_pitch_rate + cfg.passed_ball_rate {
        Some(ActionEvent::PassedBall)
    } else {
        None
    }
}
