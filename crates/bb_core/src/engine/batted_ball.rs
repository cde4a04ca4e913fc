//! Batted Ball Resolver
//!
//! Samples exit velocity and launch angle for a ball put in play and classifies the pair
//! through [`OUTCOME_TABLE`], an ordered list of rules evaluated top to bottom. The first
//! rule whose band matches and whose gate (if any) passes decides the class. Gated rules
//! consume one draw when their band matches, whether or not the gate passes.

use super::config::BattedBallConfig;
use super::rng::{chance, normal, uniform};
use crate::models::{BattedBall, BattingProfile};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Re-sampled EV range for a ground ball the catcher fields.
pub const DRIBBLER_EV: (f64, f64) = (50.0, 70.0);
pub const DRIBBLER_LA: (f64, f64) = (-45.0, -20.0);

/// Qualitative result of a batted ball before fielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattedBallClass {
    Groundout,
    /// Hard grounder that turns two if the situation allows it; a groundout otherwise.
    DoublePlay,
    Flyout,
    Lineout,
    PopOut,
    Single,
    Double,
    Triple,
    HomeRun,
    Bunt,
}

impl BattedBallClass {
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            BattedBallClass::Single
                | BattedBallClass::Double
                | BattedBallClass::Triple
                | BattedBallClass::HomeRun
        )
    }

    pub fn is_ground_ball(&self) -> bool {
        matches!(self, BattedBallClass::Groundout | BattedBallClass::DoublePlay)
    }
}

pub struct OutcomeRule {
    pub name: &'static str,
    pub band: fn(f64, f64) -> bool,
    /// `Some(p)`: the rule only fires on a draw below `p`.
    pub gate: Option<f64>,
    pub class: BattedBallClass,
}

const fn rule(
    name: &'static str,
    band: fn(f64, f64) -> bool,
    gate: Option<f64>,
    class: BattedBallClass,
) -> OutcomeRule {
    OutcomeRule { name, band, gate, class }
}

/// EV/LA classification, `band(ev, la)`. Every band implicitly excludes what the
/// earlier unconditional rules already claimed.
pub static OUTCOME_TABLE: [OutcomeRule; 19] = [
    // Weak contact
    rule("weak_popup", |ev, la| ev < 65.0 && la >= 40.0, None, BattedBallClass::PopOut),
    rule("weak_grounder", |ev, la| ev < 65.0 && la < 10.0, None, BattedBallClass::Groundout),
    rule("weak_fly", |ev, _| ev < 65.0, None, BattedBallClass::Flyout),
    // Ground balls, under 12 degrees
    rule("grounder_through", |ev, la| la < 12.0 && ev >= 100.0, None, BattedBallClass::Single),
    rule("grounder_two", |ev, la| la < 12.0 && ev >= 90.0, None, BattedBallClass::DoublePlay),
    rule("lucky_finder", |ev, la| la < 12.0 && ev >= 80.0, Some(0.20), BattedBallClass::Single),
    rule("grounder", |_, la| la < 12.0, None, BattedBallClass::Groundout),
    // Line drives, 12 to 21 degrees
    rule("liner_gone", |ev, la| la < 21.0 && ev >= 107.0 && la >= 17.0, None, BattedBallClass::HomeRun),
    rule("liner_gap", |ev, la| la < 21.0 && ev >= 100.0, None, BattedBallClass::Double),
    rule("liner_hit", |ev, la| la < 21.0 && ev >= 88.0, None, BattedBallClass::Single),
    rule("liner_caught", |ev, la| la < 21.0 && ev >= 74.0, None, BattedBallClass::Lineout),
    rule("liner_topped", |_, la| la < 21.0, None, BattedBallClass::Groundout),
    // Fly balls, 21 to 46 degrees
    rule("fly_gone", |ev, la| la < 46.0 && ev >= 103.0 && la <= 38.0, None, BattedBallClass::HomeRun),
    rule("fly_wall_scraper", |ev, la| la < 46.0 && ev >= 98.0 && la <= 36.0, Some(0.45), BattedBallClass::HomeRun),
    rule("fly_corner", |ev, la| la < 46.0 && ev >= 96.0 && la < 32.0, Some(0.10), BattedBallClass::Triple),
    rule("fly_gap", |ev, la| la < 46.0 && ev >= 94.0 && la < 34.0, None, BattedBallClass::Double),
    rule("fly_blooper", |ev, la| la < 46.0 && ev < 84.0 && la < 30.0, Some(0.30), BattedBallClass::Single),
    rule("fly_caught", |_, la| la < 46.0, None, BattedBallClass::Flyout),
    // Anything steeper
    rule("popup", |_, _| true, None, BattedBallClass::PopOut),
];

/// Classify a batted ball. Bunts never come through here.
pub fn classify<R: Rng + ?Sized>(rng: &mut R, ball: &BattedBall) -> BattedBallClass {
    let (ev, la) = (ball.exit_velocity, ball.launch_angle);
    for rule in OUTCOME_TABLE.iter() {
        if !(rule.band)(ev, la) {
            continue;
        }
        match rule.gate {
            None => return rule.class,
            Some(p) if chance(rng, p) => return rule.class,
            Some(_) => {}
        }
    }
    BattedBallClass::PopOut
}

/// `EV ~ N(base + scale * power, sd)`, `LA ~ N(angle + offset, sd)`; EV first.
pub fn sample_swing<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &BattedBallConfig,
    batter: &BattingProfile,
) -> BattedBall {
    let exit_velocity = normal(rng, cfg.ev_base + cfg.ev_power_scale * batter.power, cfg.ev_sd);
    let launch_angle = normal(rng, batter.angle + cfg.la_offset, cfg.la_sd);
    BattedBall { exit_velocity, launch_angle }
}

pub fn sample_bunt<R: Rng + ?Sized>(rng: &mut R, cfg: &BattedBallConfig) -> BattedBall {
    let exit_velocity = uniform(rng, cfg.bunt_ev.0, cfg.bunt_ev.1);
    let launch_angle = uniform(rng, cfg.bunt_la.0, cfg.bunt_la.1);
    BattedBall { exit_velocity, launch_angle }
}

pub fn sample_dribbler<R: Rng + ?Sized>(rng: &mut R) -> BattedBall {
    let exit_velocity = uniform(rng, DRIBBLER_EV.0, DRIBBLER_EV.1);
    let launch_angle = uniform(rng, DRIBBLER_LA.0, DRIBBLER_LA.1);
    BattedBall { exit_velocity, launch_angle }
}

/// Sample and classify in one step.
pub fn resolve_contact<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &BattedBallConfig,
    batter: &BattingProfile,
    bunting: bool,
) -> (BattedBall, BattedBallClass) {
    if bunting {
        return (sample_bunt(rng, cfg), BattedBallClass::Bunt);
    }
    let ball = sample_swing(rng, cfg, batter);
    let class = classify(rng, &ball);
    (ball, class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::game_rng;
    use crate::engine::test_fixtures::average_batting;
    use rand::rngs::mock::StepRng;

    fn ball(ev: f64, la: f64) -> BattedBall {
        BattedBall { exit_velocity: ev, launch_angle: la }
    }

    /// Rng whose every f64 draw is 0.0, so each gate passes.
    fn always_pass() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Rng whose every f64 draw is just under 1.0, so each gate fails.
    fn always_fail() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_unconditional_bands() {
        let mut rng = always_fail();
        assert_eq!(classify(&mut rng, &ball(60.0, 45.0)), BattedBallClass::PopOut);
        assert_eq!(classify(&mut rng, &ball(60.0, 0.0)), BattedBallClass::Groundout);
        assert_eq!(classify(&mut rng, &ball(60.0, 20.0)), BattedBallClass::Flyout);
        assert_eq!(classify(&mut rng, &ball(101.0, 5.0)), BattedBallClass::Single);
        assert_eq!(classify(&mut rng, &ball(92.0, -3.0)), BattedBallClass::DoublePlay);
        assert_eq!(classify(&mut rng, &ball(85.0, 5.0)), BattedBallClass::Groundout);
        assert_eq!(classify(&mut rng, &ball(108.0, 18.0)), BattedBallClass::HomeRun);
        assert_eq!(classify(&mut rng, &ball(108.0, 14.0)), BattedBallClass::Double);
        assert_eq!(classify(&mut rng, &ball(90.0, 15.0)), BattedBallClass::Single);
        assert_eq!(classify(&mut rng, &ball(80.0, 15.0)), BattedBallClass::Lineout);
        assert_eq!(classify(&mut rng, &ball(70.0, 15.0)), BattedBallClass::Groundout);
        assert_eq!(classify(&mut rng, &ball(104.0, 30.0)), BattedBallClass::HomeRun);
        assert_eq!(classify(&mut rng, &ball(95.0, 25.0)), BattedBallClass::Double);
        assert_eq!(classify(&mut rng, &ball(90.0, 40.0)), BattedBallClass::Flyout);
        assert_eq!(classify(&mut rng, &ball(110.0, 50.0)), BattedBallClass::PopOut);
    }

    #[test]
    fn test_gates_pass_in_order() {
        let mut rng = always_pass();
        assert_eq!(classify(&mut rng, &ball(85.0, 5.0)), BattedBallClass::Single);
        assert_eq!(classify(&mut rng, &ball(99.0, 30.0)), BattedBallClass::HomeRun);
        assert_eq!(classify(&mut rng, &ball(96.5, 37.0)), BattedBallClass::Flyout);
        assert_eq!(classify(&mut rng, &ball(97.0, 25.0)), BattedBallClass::Triple);
        assert_eq!(classify(&mut rng, &ball(80.0, 25.0)), BattedBallClass::Single);
    }

    #[test]
    fn test_wall_scraper_falls_through_to_later_rules() {
        let mut rng = always_fail();
        // Fails the HR and triple gates, lands on the gap double.
        assert_eq!(classify(&mut rng, &ball(99.0, 30.0)), BattedBallClass::Double);
        assert_eq!(classify(&mut rng, &ball(80.0, 25.0)), BattedBallClass::Flyout);
    }

    #[test]
    fn test_every_rule_is_named_uniquely() {
        let mut names: Vec<&str> = OUTCOME_TABLE.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OUTCOME_TABLE.len());
    }

    #[test]
    fn test_bunt_ranges() {
        let cfg = BattedBallConfig::default();
        let mut rng = game_rng(5);
        for _ in 0..500 {
            let (b, class) = resolve_contact(&mut rng, &cfg, &average_batting(), true);
            assert_eq!(class, BattedBallClass::Bunt);
            assert!((60.0..=75.0).contains(&b.exit_velocity));
            assert!((-50.0..=-20.0).contains(&b.launch_angle));
        }
    }

    #[test]
    fn test_dribbler_ranges() {
        let mut rng = game_rng(6);
        for _ in 0..200 {
            let b = sample_dribbler(&mut rng);
            assert!((50.0..=70.0).contains(&b.exit_velocity));
            assert!((-45.0..=-20.0).contains(&b.launch_angle));
        }
    }

    #[test]
    fn test_power_raises_exit_velocity() {
        let cfg = BattedBallConfig::default();
        let mut weak = average_batting();
        weak.power = 0.1;
        let mut strong = average_batting();
        strong.power = 0.9;
        let mut rng = game_rng(7);
        let n = 4000;
        let mean = |profile: &BattingProfile, rng: &mut _| {
            (0..n).map(|_| sample_swing(rng, &cfg, profile).exit_velocity).sum::<f64>() / n as f64
        };
        let weak_mean = mean(&weak, &mut rng);
        let strong_mean = mean(&strong, &mut rng);
        assert!((weak_mean - 82.5).abs() < 1.0, "weak mean {weak_mean}");
        assert!((strong_mean - 102.5).abs() < 1.0, "strong mean {strong_mean}");
    }
}
