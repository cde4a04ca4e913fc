//! Fielding Resolver
//!
//! Turns a classified batted ball into a concrete [`AtBatOutcome`]: who fielded it,
//! whether it was booted, and which out sub-type it became (double play, force, sac fly,
//! sacrifice bunt). Base movement for the result is computed by `base_running`.

use super::batted_ball::{sample_dribbler, BattedBallClass};
use super::config::FieldingConfig;
use super::rng::{chance, weighted_pick};
use crate::error::RosterError;
use crate::models::{
    AtBatOutcome, Base, BattedBall, Bases, MovementCause, Player, PlayerId, Position, Team,
};
use rand::Rng;

/// Defensive alignment of the fielding team for one at-bat, indexed by scorer number.
#[derive(Debug, Clone)]
pub struct Defense {
    ids: [PlayerId; 9],
    fielding: [f64; 9],
    pub prowess: f64,
    pub double_play_rate: f64,
    pub catcher_arm: f64,
}

fn slot(position: Position) -> usize {
    match position.scorer_number() {
        Some(n) => n as usize - 1,
        None => unreachable!("the designated hitter never takes the field"),
    }
}

impl Defense {
    pub fn new(team: &Team, pitcher: &Player) -> Result<Self, RosterError> {
        let mut ids: [PlayerId; 9] = Default::default();
        let mut fielding = [0.0; 9];
        ids[0] = pitcher.id.clone();
        fielding[0] = pitcher.fielding;
        for position in Position::FIELDING_LINEUP {
            let player = team.fielder_at(position).ok_or_else(|| RosterError::MissingPosition {
                team: team.name.clone(),
                position: position.to_string(),
            })?;
            ids[slot(position)] = player.id.clone();
            fielding[slot(position)] = player.fielding;
        }
        let catcher_arm = team
            .fielder_at(Position::C)
            .and_then(|c| c.catcher_arm)
            .ok_or_else(|| RosterError::MissingCatcherArm { player: ids[1].to_string() })?;
        Ok(Self {
            ids,
            fielding,
            prowess: team.fielding_prowess,
            double_play_rate: team.double_play_rate,
            catcher_arm,
        })
    }

    /// Replace the pitcher after a bullpen change.
    pub fn set_pitcher(&mut self, pitcher: &Player) {
        self.ids[0] = pitcher.id.clone();
        self.fielding[0] = pitcher.fielding;
    }

    pub fn id(&self, position: Position) -> &PlayerId {
        &self.ids[slot(position)]
    }

    pub fn fielding(&self, position: Position) -> f64 {
        self.fielding[slot(position)]
    }
}

/// Fielder who takes the throw at second on a force or the pivot of a double play.
pub fn second_base_cover(fielder: Position) -> Position {
    match fielder {
        Position::SS => Position::SecondBase,
        _ => Position::SS,
    }
}

/// Standard double-play relay for the fielder who started it.
pub fn double_play_route(fielder: Position) -> Vec<Position> {
    match fielder {
        Position::SecondBase => vec![Position::SecondBase, Position::SS, Position::FirstBase],
        Position::FirstBase => vec![Position::FirstBase, Position::SS, Position::FirstBase],
        Position::ThirdBase => vec![Position::ThirdBase, Position::SecondBase, Position::FirstBase],
        Position::P => vec![Position::P, Position::SS, Position::FirstBase],
        Position::C => vec![Position::C, Position::SS, Position::FirstBase],
        _ => vec![Position::SS, Position::SecondBase, Position::FirstBase],
    }
}

/// Fielder covering the bag on a steal of `base`.
pub fn steal_cover(base: Base) -> Position {
    match base {
        Base::Third => Position::ThirdBase,
        _ => Position::SS,
    }
}

fn pick_position<R: Rng + ?Sized>(rng: &mut R, candidates: &[(Position, f64)]) -> Position {
    let weights: Vec<f64> = candidates.iter().map(|(_, w)| *w).collect();
    candidates[weighted_pick(rng, &weights)].0
}

pub fn choose_fielder<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &FieldingConfig,
    class: BattedBallClass,
) -> Position {
    let infield = |w: f64| Position::INFIELD.map(|p| (p, w));
    let outfield = |w: f64| Position::OUTFIELD.map(|p| (p, w));
    let candidates: Vec<(Position, f64)> = match class {
        BattedBallClass::Groundout | BattedBallClass::DoublePlay => {
            let mut c = infield(cfg.ground_infielder_weight).to_vec();
            c.push((Position::P, cfg.ground_pitcher_weight));
            c.push((Position::C, cfg.ground_catcher_weight));
            c
        }
        BattedBallClass::Flyout => {
            let mut c = outfield(cfg.fly_outfielder_weight).to_vec();
            c.extend(infield(cfg.fly_infielder_weight));
            c
        }
        BattedBallClass::Lineout => {
            let mut c = infield(1.0).to_vec();
            c.extend(outfield(1.0));
            c
        }
        BattedBallClass::PopOut => {
            let mut c = infield(4.0).to_vec();
            c.push((Position::C, 1.0));
            c.push((Position::P, 0.5));
            c
        }
        BattedBallClass::Bunt => vec![
            (Position::P, 3.0),
            (Position::C, 1.0),
            (Position::FirstBase, 1.5),
            (Position::ThirdBase, 1.5),
        ],
        // Hits are never fielded for an out.
        _ => outfield(1.0).to_vec(),
    };
    pick_position(rng, &candidates)
}

/// `true` when the fielder handles the chance cleanly.
pub fn clean_play<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &FieldingConfig,
    defense: &Defense,
    fielder: Position,
) -> bool {
    let sure_hands = defense.fielding(fielder) * defense.prowess * cfg.error_scale;
    rng.gen::<f64>() <= sure_hands
}

/// Resolve a batted ball against the defense and the pre-play bases/outs.
///
/// Draw order: fielder, dribbler re-sample (catcher grounders only), error check, then
/// the sub-type gate for the class (double play, force, sac fly, sacrifice).
pub fn resolve_ball_in_play<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &FieldingConfig,
    defense: &Defense,
    class: BattedBallClass,
    ball: BattedBall,
    bases: &Bases,
    outs: u8,
) -> AtBatOutcome {
    match class {
        BattedBallClass::Single => return AtBatOutcome::Single { ball },
        BattedBallClass::Double => return AtBatOutcome::Double { ball },
        BattedBallClass::Triple => return AtBatOutcome::Triple { ball },
        BattedBallClass::HomeRun => return AtBatOutcome::HomeRun { ball },
        _ => {}
    }

    let fielder = choose_fielder(rng, cfg, class);
    let ball = if class.is_ground_ball() && fielder == Position::C {
        sample_dribbler(rng)
    } else {
        ball
    };

    if !clean_play(rng, cfg, defense, fielder) {
        return AtBatOutcome::FieldError { ball, fielder };
    }

    let runner_on_first = bases.runner(Base::First).cloned();
    match class {
        BattedBallClass::Groundout | BattedBallClass::DoublePlay => match runner_on_first {
            Some(runner)
                if outs < 2
                    && (class == BattedBallClass::DoublePlay
                        || chance(rng, defense.double_play_rate)) =>
            {
                AtBatOutcome::DoublePlay { ball, route: double_play_route(fielder), runner }
            }
            Some(runner) if outs < 2 && chance(rng, cfg.force_play_rate) => {
                AtBatOutcome::Forceout { ball, fielder, runner }
            }
            _ => AtBatOutcome::Groundout { ball, fielder },
        },
        BattedBallClass::Flyout => {
            if !fielder.is_outfielder() {
                return AtBatOutcome::PopOut { ball, fielder };
            }
            match bases.runner(Base::Third) {
                Some(runner) if outs < 2 && rng.gen::<f64>() > cfg.sac_fly_gate => {
                    AtBatOutcome::SacFly { ball, fielder, runner: runner.clone() }
                }
                _ => AtBatOutcome::Flyout { ball, fielder },
            }
        }
        BattedBallClass::Lineout => AtBatOutcome::Lineout { ball, fielder },
        BattedBallClass::PopOut => AtBatOutcome::PopOut { ball, fielder },
        BattedBallClass::Bunt => {
            if outs < 2 && !bases.is_empty() && chance(rng, cfg.sac_bunt_success) {
                AtBatOutcome::SacrificeBunt { ball, fielder }
            } else {
                AtBatOutcome::BuntGroundOut { ball, fielder }
            }
        }
        BattedBallClass::Single
        | BattedBallClass::Double
        | BattedBallClass::Triple
        | BattedBallClass::HomeRun => unreachable!("hits return before fielding"),
    }
}

fn num(position: Position) -> String {
    position.scorer_number().map(|n| n.to_string()).unwrap_or_default()
}

fn throw_to_first(fielder: Position) -> String {
    if fielder == Position::FirstBase {
        "3U".to_string()
    } else {
        format!("{}-3", num(fielder))
    }
}

fn caught_stealing_notation(base: Base) -> String {
    format!("CS 2-{}", num(steal_cover(base)))
}

/// Scorer's shorthand for an outcome.
pub fn scorer_notation(outcome: &AtBatOutcome) -> String {
    match outcome {
        AtBatOutcome::Strikeout { looking: true } => "KL".to_string(),
        AtBatOutcome::Strikeout { looking: false } => "K".to_string(),
        AtBatOutcome::StrikeoutDoublePlay { looking, base, .. } => {
            let k = if *looking { "KL" } else { "K" };
            format!("{k} {}", caught_stealing_notation(*base))
        }
        AtBatOutcome::Walk => "BB".to_string(),
        AtBatOutcome::HitByPitch => "HBP".to_string(),
        AtBatOutcome::Single { .. } => "1B".to_string(),
        AtBatOutcome::Double { .. } => "2B".to_string(),
        AtBatOutcome::Triple { .. } => "3B".to_string(),
        AtBatOutcome::HomeRun { .. } => "HR".to_string(),
        AtBatOutcome::Groundout { fielder, .. } | AtBatOutcome::BuntGroundOut { fielder, .. } => {
            throw_to_first(*fielder)
        }
        AtBatOutcome::Flyout { fielder, .. } => format!("F{}", num(*fielder)),
        AtBatOutcome::Lineout { fielder, .. } => format!("L{}", num(*fielder)),
        AtBatOutcome::PopOut { fielder, .. } => format!("P{}", num(*fielder)),
        AtBatOutcome::SacFly { fielder, .. } => format!("SF{}", num(*fielder)),
        AtBatOutcome::FieldError { fielder, .. } => format!("E{}", num(*fielder)),
        AtBatOutcome::Forceout { fielder, .. } => {
            format!("{}-{}", num(*fielder), num(second_base_cover(*fielder)))
        }
        AtBatOutcome::DoublePlay { route, .. } => {
            route.iter().map(|p| num(*p)).collect::<Vec<_>>().join("-")
        }
        AtBatOutcome::SacrificeBunt { fielder, .. } => format!("SH {}", throw_to_first(*fielder)),
        AtBatOutcome::CaughtStealing { base, .. } => caught_stealing_notation(*base),
        AtBatOutcome::WalkOffMisplay { cause: MovementCause::PassedBall } => "PB".to_string(),
        AtBatOutcome::WalkOffMisplay { .. } => "WP".to_string(),
    }
}
