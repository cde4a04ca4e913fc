//! Base Running Engine
//!
//! Applies a resolved outcome to the pre-play bases and outs. Outs are recorded before
//! any advancement, and a runner can only score while fewer than three outs are on the
//! board. Runners are always moved lead runner first so nobody is overtaken.

use super::fielding::{double_play_route, second_base_cover, Defense};
use crate::models::{
    AtBatOutcome, Base, Bases, Credit, MovementCause, PlayerId, Position, RunnerMovement,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PlayResolution {
    pub movements: Vec<RunnerMovement>,
    pub bases: Bases,
    pub outs: u8,
    pub runs: u32,
    pub rbi: u32,
}

/// Bases a runner passes from `start`: the batter starts at 0, third base is 3.
fn level(base: Base) -> usize {
    match base {
        Base::Home => 0,
        b => b.index() + 1,
    }
}

fn destination(start: Base, bases_taken: usize) -> Base {
    let target = level(start) + bases_taken;
    if target >= 4 {
        Base::Home
    } else {
        Base::from_index(target - 1)
    }
}

struct PlayBuilder<'a> {
    original: &'a Bases,
    bases: Bases,
    outs: u8,
    batter: &'a PlayerId,
    cause: MovementCause,
    movements: Vec<RunnerMovement>,
    runs: u32,
    rbi: u32,
}

impl<'a> PlayBuilder<'a> {
    fn new(bases: &'a Bases, outs: u8, batter: &'a PlayerId, cause: MovementCause) -> Self {
        assert!(outs < 3, "play started with {outs} outs");
        Self {
            original: bases,
            bases: bases.clone(),
            outs,
            batter,
            cause,
            movements: Vec::new(),
            runs: 0,
            rbi: 0,
        }
    }

    fn take_runner(&mut self, start: Base) -> Option<PlayerId> {
        if start == Base::Home {
            Some(self.batter.clone())
        } else {
            self.bases.remove(start)
        }
    }

    fn put_out(&mut self, start: Base, out_base: Option<Base>, credits: Vec<Credit>) {
        let Some(runner) = self.take_runner(start) else {
            return;
        };
        self.outs += 1;
        assert!(self.outs <= 3, "more than three outs in a half-inning");
        self.movements.push(RunnerMovement {
            runner,
            start,
            end: None,
            out_base,
            is_out: true,
            scored: false,
            rbi: false,
            cause: self.cause,
            credits,
        });
    }

    /// Move the runner on `start` (the batter for `Base::Home`) forward. No-op once the
    /// third out is in.
    fn advance(&mut self, start: Base, bases_taken: usize, rbi: bool, credits: Vec<Credit>) {
        if self.outs >= 3 {
            return;
        }
        let Some(runner) = self.take_runner(start) else {
            return;
        };
        let end = destination(start, bases_taken);
        let scored = end == Base::Home;
        if scored {
            self.runs += 1;
            if rbi {
                self.rbi += 1;
            }
        } else {
            self.bases.place(end, runner.clone());
        }
        self.movements.push(RunnerMovement {
            runner,
            start,
            end: Some(end),
            out_base: None,
            is_out: false,
            scored,
            rbi: scored && rbi,
            cause: self.cause,
            credits,
        });
    }

    fn advance_all(&mut self, bases_taken: usize, rbi: bool) {
        for (base, _) in self.original.occupied_lead_first() {
            self.advance(base, bases_taken, rbi, Vec::new());
        }
    }

    /// Runners forced by the batter reaching first, lead first.
    fn advance_forced(&mut self, rbi: bool) {
        let chain = self.original.forced_chain_len();
        for i in (0..chain).rev() {
            self.advance(Base::from_index(i), 1, rbi, Vec::new());
        }
    }

    fn finish(mut self) -> PlayResolution {
        for (base, runner) in self.original.occupied_lead_first() {
            if self.movements.iter().any(|m| m.runner == runner) {
                continue;
            }
            self.movements.push(RunnerMovement {
                runner,
                start: base,
                end: Some(base),
                out_base: None,
                is_out: false,
                scored: false,
                rbi: false,
                cause: self.cause,
                credits: Vec::new(),
            });
        }
        self.bases.assert_consistent();
        PlayResolution {
            movements: self.movements,
            bases: self.bases,
            outs: self.outs,
            runs: self.runs,
            rbi: self.rbi,
        }
    }
}

/// Putout at first, with an assist unless the first baseman did it alone.
fn out_at_first(defense: &Defense, fielder: Position) -> Vec<Credit> {
    let first = Credit::putout(defense.id(Position::FirstBase), Position::FirstBase);
    if fielder == Position::FirstBase {
        vec![first]
    } else {
        vec![Credit::assist(defense.id(fielder), fielder), first]
    }
}

fn relay(defense: &Defense, from: Position, to: Position) -> Vec<Credit> {
    vec![Credit::assist(defense.id(from), from), Credit::putout(defense.id(to), to)]
}

/// Apply `outcome` for `batter` to the pre-play `bases` and `outs`.
///
/// Runners put out between pitches (caught stealing) are already off `bases`; their
/// movements are recorded where they happen.
pub fn resolve_play(
    outcome: &AtBatOutcome,
    batter: &PlayerId,
    bases: &Bases,
    outs: u8,
    defense: &Defense,
) -> PlayResolution {
    let mut play = PlayBuilder::new(bases, outs, batter, MovementCause::Play);
    match outcome {
        AtBatOutcome::Strikeout { .. } | AtBatOutcome::StrikeoutDoublePlay { .. } => {
            let catcher = Credit::putout(defense.id(Position::C), Position::C);
            play.put_out(Base::Home, Some(Base::Home), vec![catcher]);
        }
        AtBatOutcome::CaughtStealing { .. } | AtBatOutcome::WalkOffMisplay { .. } => {}
        AtBatOutcome::Walk | AtBatOutcome::HitByPitch => {
            play.advance_forced(true);
            play.advance(Base::Home, 1, false, Vec::new());
        }
        AtBatOutcome::Single { .. } => {
            play.advance_all(1, true);
            play.advance(Base::Home, 1, false, Vec::new());
        }
        AtBatOutcome::Double { .. } => {
            play.advance_all(2, true);
            play.advance(Base::Home, 2, false, Vec::new());
        }
        AtBatOutcome::Triple { .. } => {
            play.advance_all(3, true);
            play.advance(Base::Home, 3, false, Vec::new());
        }
        AtBatOutcome::HomeRun { .. } => {
            play.advance_all(4, true);
            play.advance(Base::Home, 4, true, Vec::new());
        }
        AtBatOutcome::FieldError { fielder, .. } => {
            play.advance_all(1, false);
            let error = Credit::error(defense.id(*fielder), *fielder);
            play.advance(Base::Home, 1, false, vec![error]);
        }
        AtBatOutcome::Groundout { fielder, .. } => {
            play.put_out(Base::Home, Some(Base::First), out_at_first(defense, *fielder));
            play.advance_forced(true);
        }
        AtBatOutcome::BuntGroundOut { fielder, .. } => {
            play.put_out(Base::Home, Some(Base::First), out_at_first(defense, *fielder));
        }
        AtBatOutcome::SacrificeBunt { fielder, .. } => {
            play.put_out(Base::Home, Some(Base::First), out_at_first(defense, *fielder));
            play.advance_all(1, true);
        }
        AtBatOutcome::Flyout { fielder, .. }
        | AtBatOutcome::Lineout { fielder, .. }
        | AtBatOutcome::PopOut { fielder, .. } => {
            play.put_out(Base::Home, None, vec![Credit::putout(defense.id(*fielder), *fielder)]);
        }
        AtBatOutcome::SacFly { fielder, .. } => {
            play.put_out(Base::Home, None, vec![Credit::putout(defense.id(*fielder), *fielder)]);
            play.advance(Base::Third, 1, true, Vec::new());
        }
        AtBatOutcome::Forceout { fielder, .. } => {
            let chain = bases.forced_chain_len();
            let cover = second_base_cover(*fielder);
            play.put_out(Base::First, Some(Base::Second), relay(defense, *fielder, cover));
            for i in (1..chain).rev() {
                play.advance(Base::from_index(i), 1, true, Vec::new());
            }
            play.advance(Base::Home, 1, false, Vec::new());
        }
        AtBatOutcome::DoublePlay { route, .. } => {
            let route = if route.len() == 3 {
                route.clone()
            } else {
                double_play_route(Position::SS)
            };
            play.put_out(Base::First, Some(Base::Second), relay(defense, route[0], route[1]));
            play.put_out(Base::Home, Some(Base::First), relay(defense, route[1], route[2]));
            play.advance(Base::Third, 1, false, Vec::new());
            play.advance(Base::Second, 1, false, Vec::new());
        }
    }
    play.finish()
}

/// Every runner moves up one base on a wild pitch or passed ball. No RBI.
pub fn advance_on_misplay(bases: &Bases, outs: u8, cause: MovementCause) -> PlayResolution {
    // The batter never moves on a misplayed pitch; the placeholder is never taken.
    let nobody = PlayerId::default();
    let mut play = PlayBuilder::new(bases, outs, &nobody, cause);
    play.advance_all(1, false);
    play.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{id, test_defense};
    use crate::models::{BattedBall, CreditKind};
    use proptest::prelude::*;

    fn ball() -> BattedBall {
        BattedBall { exit_velocity: 95.0, launch_angle: 15.0 }
    }

    fn bases(first: bool, second: bool, third: bool) -> Bases {
        Bases::from_runners(
            first.then(|| id("r1")),
            second.then(|| id("r2")),
            third.then(|| id("r3")),
        )
    }

    fn resolve(outcome: AtBatOutcome, before: &Bases, outs: u8) -> PlayResolution {
        resolve_play(&outcome, &id("bat"), before, outs, &test_defense("d"))
    }

    #[test]
    fn test_walk_forces_only_the_chain() {
        let res = resolve(AtBatOutcome::Walk, &bases(true, false, true), 0);
        assert_eq!(res.bases, Bases::from_runners(Some(id("bat")), Some(id("r1")), Some(id("r3"))));
        assert_eq!(res.runs, 0);

        let res = resolve(AtBatOutcome::Walk, &bases(true, true, true), 1);
        assert_eq!(res.runs, 1);
        assert_eq!(res.rbi, 1);
        assert_eq!(res.bases, Bases::from_runners(Some(id("bat")), Some(id("r1")), Some(id("r2"))));
    }

    #[test]
    fn test_walk_with_runner_on_second_only() {
        let res = resolve(AtBatOutcome::HitByPitch, &bases(false, true, false), 0);
        assert_eq!(res.bases, Bases::from_runners(Some(id("bat")), Some(id("r2")), None));
        let hold = res.movements.iter().find(|m| m.runner == id("r2")).map(|m| m.end);
        assert_eq!(hold, Some(Some(Base::Second)));
    }

    #[test]
    fn test_single_advances_everyone_one_base() {
        let res = resolve(AtBatOutcome::Single { ball: ball() }, &bases(true, true, true), 0);
        assert_eq!(res.runs, 1);
        assert_eq!(res.rbi, 1);
        assert_eq!(res.bases, Bases::from_runners(Some(id("bat")), Some(id("r1")), Some(id("r2"))));
    }

    #[test]
    fn test_double_scores_from_second() {
        let res = resolve(AtBatOutcome::Double { ball: ball() }, &bases(true, true, false), 1);
        assert_eq!(res.runs, 1);
        assert_eq!(res.bases, Bases::from_runners(None, Some(id("bat")), Some(id("r1"))));
    }

    #[test]
    fn test_grand_slam() {
        let res = resolve(AtBatOutcome::HomeRun { ball: ball() }, &bases(true, true, true), 2);
        assert_eq!(res.runs, 4);
        assert_eq!(res.rbi, 4);
        assert!(res.bases.is_empty());
        assert_eq!(res.outs, 2);
    }

    #[test]
    fn test_error_scores_without_rbi() {
        let res = resolve(
            AtBatOutcome::FieldError { ball: ball(), fielder: Position::SS },
            &bases(false, false, true),
            0,
        );
        assert_eq!(res.runs, 1);
        assert_eq!(res.rbi, 0);
        let batter = res.movements.iter().find(|m| m.runner == id("bat"));
        let kinds: Vec<CreditKind> =
            batter.map(|m| m.credits.iter().map(|c| c.kind).collect()).unwrap_or_default();
        assert_eq!(kinds, vec![CreditKind::FieldingError]);
    }

    #[test]
    fn test_groundout_advances_forced_runners() {
        let res = resolve(
            AtBatOutcome::Groundout { ball: ball(), fielder: Position::SS },
            &bases(true, false, true),
            0,
        );
        assert_eq!(res.outs, 1);
        assert_eq!(res.runs, 0);
        assert_eq!(res.bases, Bases::from_runners(None, Some(id("r1")), Some(id("r3"))));
    }

    #[test]
    fn test_third_out_groundout_scores_nobody() {
        let res = resolve(
            AtBatOutcome::Groundout { ball: ball(), fielder: Position::SecondBase },
            &bases(true, true, true),
            2,
        );
        assert_eq!(res.outs, 3);
        assert_eq!(res.runs, 0);
    }

    #[test]
    fn test_double_play_credits_and_runner_from_third() {
        let res = resolve(
            AtBatOutcome::DoublePlay {
                ball: ball(),
                route: double_play_route(Position::SS),
                runner: id("r1"),
            },
            &bases(true, false, true),
            0,
        );
        assert_eq!(res.outs, 2);
        assert_eq!(res.runs, 1);
        assert_eq!(res.rbi, 0);
        let outs: Vec<&RunnerMovement> = res.movements.iter().filter(|m| m.is_out).collect();
        assert_eq!(outs.len(), 2);
        assert_eq!(outs[0].credits[0].position, Position::SS);
        assert_eq!(outs[0].credits[1].position, Position::SecondBase);
        assert_eq!(outs[1].credits[1].position, Position::FirstBase);
    }

    #[test]
    fn test_inning_ending_double_play_scores_nobody() {
        let res = resolve(
            AtBatOutcome::DoublePlay {
                ball: ball(),
                route: double_play_route(Position::SecondBase),
                runner: id("r1"),
            },
            &bases(true, false, true),
            1,
        );
        assert_eq!(res.outs, 3);
        assert_eq!(res.runs, 0);
    }

    #[test]
    fn test_forceout_keeps_batter_on_first() {
        let res = resolve(
            AtBatOutcome::Forceout { ball: ball(), fielder: Position::ThirdBase, runner: id("r1") },
            &bases(true, true, false),
            0,
        );
        assert_eq!(res.outs, 1);
        assert_eq!(res.bases, Bases::from_runners(Some(id("bat")), None, Some(id("r2"))));
    }

    #[test]
    fn test_sac_fly_scores_runner_from_third() {
        let res = resolve(
            AtBatOutcome::SacFly { ball: ball(), fielder: Position::CF, runner: id("r3") },
            &bases(true, false, true),
            1,
        );
        assert_eq!((res.outs, res.runs, res.rbi), (2, 1, 1));
        assert_eq!(res.bases, bases(true, false, false));
    }

    #[test]
    fn test_sacrifice_bunt_moves_runners_up() {
        let res = resolve(
            AtBatOutcome::SacrificeBunt { ball: ball(), fielder: Position::P },
            &bases(true, true, false),
            0,
        );
        assert_eq!(res.outs, 1);
        assert_eq!(res.bases, Bases::from_runners(None, Some(id("r1")), Some(id("r2"))));
    }

    #[test]
    fn test_unassisted_groundout_credit() {
        let res = resolve(
            AtBatOutcome::Groundout { ball: ball(), fielder: Position::FirstBase },
            &Bases::empty(),
            0,
        );
        assert_eq!(res.movements[0].credits.len(), 1);
        assert_eq!(res.movements[0].credits[0].kind, CreditKind::Putout);
    }

    #[test]
    fn test_wild_pitch_moves_everyone() {
        let res = advance_on_misplay(&bases(true, false, true), 1, MovementCause::WildPitch);
        assert_eq!(res.runs, 1);
        assert_eq!(res.rbi, 0);
        assert_eq!(res.bases, bases(false, true, false));
        assert!(res.movements.iter().all(|m| m.cause == MovementCause::WildPitch));
    }

    fn outcome_for(kind: usize) -> AtBatOutcome {
        match kind {
            0 => AtBatOutcome::Walk,
            1 => AtBatOutcome::Single { ball: ball() },
            2 => AtBatOutcome::Double { ball: ball() },
            3 => AtBatOutcome::Triple { ball: ball() },
            4 => AtBatOutcome::HomeRun { ball: ball() },
            5 => AtBatOutcome::Groundout { ball: ball(), fielder: Position::SS },
            6 => AtBatOutcome::FieldError { ball: ball(), fielder: Position::LF },
            7 => AtBatOutcome::Flyout { ball: ball(), fielder: Position::CF },
            _ => AtBatOutcome::SacrificeBunt { ball: ball(), fielder: Position::P },
        }
    }

    proptest! {
        #[test]
        fn prop_every_runner_is_accounted_for(
            occupied in any::<[bool; 3]>(),
            outs in 0u8..3,
            kind in 0usize..9,
        ) {
            let before = bases(occupied[0], occupied[1], occupied[2]);
            let res = resolve(outcome_for(kind), &before, outs);
            res.bases.assert_consistent();
            prop_assert!(res.outs <= 3);

            let outs_added = (res.outs - outs) as usize;
            prop_assert_eq!(
                before.count() + 1,
                res.runs as usize + res.bases.count() + outs_added
            );
            prop_assert!(res.rbi <= res.runs);
            if res.outs == 3 {
                prop_assert_eq!(res.runs, 0);
            }
            let scored = res.movements.iter().filter(|m| m.scored).count();
            prop_assert_eq!(scored, res.runs as usize);
        }

        #[test]
        fn prop_walk_forces_iff_chain_behind(occupied in any::<[bool; 3]>(), outs in 0u8..3) {
            let before = bases(occupied[0], occupied[1], occupied[2]);
            let res = resolve(AtBatOutcome::Walk, &before, outs);
            prop_assert_eq!(res.bases.runner(Base::First), Some(&id("bat")));
            for (base, runner) in before.occupied_lead_first() {
                let forced = (0..base.index() + 1).all(|i| occupied[i]);
                let moved = res
                    .movements
                    .iter()
                    .any(|m| m.runner == runner && m.end != Some(base));
                prop_assert_eq!(forced, moved);
            }
        }
    }
}
