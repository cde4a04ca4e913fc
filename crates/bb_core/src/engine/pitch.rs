//! Pitch Resolver
//!
//! One pitch at a time: pitch selection from the arsenal, location, swing, contact and
//! the foul/in-play split. Count bookkeeping lives in [`advance_count`] so the at-bat
//! loop owns every state change.
//!
//! Draw order per pitch is fixed: type, velocity, spin gate, spin, zone, px, pz, swing,
//! contact, foul. Reordering it changes every game for a given seed.

use super::config::PitchConfig;
use super::rng::{chance, round1, round2, uniform, weighted_pick};
use crate::models::{BattingProfile, Count, PitchCall, PitchSpec, PitchType, PitchingProfile};
use rand::Rng;
use std::collections::BTreeMap;

/// Half the plate plus a ball's width, in feet.
pub const ZONE_HALF_WIDTH: f64 = 0.83;
pub const ZONE_BOTTOM: f64 = 1.5;
pub const ZONE_TOP: f64 = 3.5;

const WIDE_HALF_WIDTH: f64 = 1.6;
const WIDE_BOTTOM: f64 = 0.5;
const WIDE_TOP: f64 = 4.5;

pub struct PitchContext<'a> {
    pub batter: &'a BattingProfile,
    pub pitcher: &'a PitchingProfile,
    /// Pitcher's game pitch count including this pitch.
    pub pitch_count: u32,
    pub bunting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrownPitch {
    pub pitch_type: PitchType,
    pub velocity: f64,
    pub spin_rate: Option<u32>,
    pub px: f64,
    pub pz: f64,
    pub in_zone: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PitchResolution {
    pub thrown: ThrownPitch,
    pub call: PitchCall,
}

/// What a call does to the at-bat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountResult {
    Continue(Count),
    Walk,
    Strikeout { looking: bool },
    InPlay,
    HitByPitch,
}

/// Control lost to fatigue. Zero until the pitch count passes stamina, then linear.
pub fn fatigue_penalty(pitch_count: u32, stamina: u32, cfg: &PitchConfig) -> f64 {
    let over = pitch_count.saturating_sub(stamina) as f64;
    over / cfg.fatigue_pitch_span * cfg.fatigue_step
}

/// Chance to chase a pitch out of the zone. Patient hitters (high walk rate) chase less.
pub fn chase_probability(batter: &BattingProfile, cfg: &PitchConfig) -> f64 {
    let discipline = (batter.walk_rate / cfg.walk_rate_baseline).max(cfg.min_discipline);
    cfg.chase_base / discipline
}

/// Weighted choice over the arsenal, iterated in pitch-type order.
///
/// # Panics
/// On an empty arsenal; rosters are validated before a game starts.
pub fn select_pitch<'a, R: Rng + ?Sized>(
    rng: &mut R,
    arsenal: &'a BTreeMap<PitchType, PitchSpec>,
) -> (PitchType, &'a PitchSpec) {
    let entries: Vec<(&PitchType, &PitchSpec)> = arsenal.iter().collect();
    assert!(!entries.is_empty(), "pitch arsenal is empty");
    let weights: Vec<f64> = entries.iter().map(|(_, spec)| spec.probability).collect();
    let (pitch_type, spec) = entries[weighted_pick(rng, &weights)];
    (*pitch_type, spec)
}

fn throw<R: Rng + ?Sized>(rng: &mut R, cfg: &PitchConfig, pitcher: &PitchingProfile) -> (PitchType, f64, Option<u32>) {
    let (pitch_type, spec) = select_pitch(rng, &pitcher.arsenal);
    let velocity = round1(uniform(rng, spec.velocity.0, spec.velocity.1));
    let spin_rate = if chance(rng, cfg.missing_spin_rate) {
        None
    } else {
        Some(rng.gen_range(spec.spin.0..=spec.spin.1))
    };
    (pitch_type, velocity, spin_rate)
}

fn locate<R: Rng + ?Sized>(rng: &mut R, in_zone: bool) -> (f64, f64) {
    if in_zone {
        let px = uniform(rng, -ZONE_HALF_WIDTH, ZONE_HALF_WIDTH);
        let pz = uniform(rng, ZONE_BOTTOM, ZONE_TOP);
        return (round2(px), round2(pz));
    }
    let px = round2(uniform(rng, -WIDE_HALF_WIDTH, WIDE_HALF_WIDTH));
    let mut pz = round2(uniform(rng, WIDE_BOTTOM, WIDE_TOP));
    if is_strike_location(px, pz) {
        // Over the plate, so it missed high or low.
        pz = if pz < (ZONE_BOTTOM + ZONE_TOP) / 2.0 { pz - 1.01 } else { pz + 1.01 };
    }
    (px, round2(pz))
}

pub fn is_strike_location(px: f64, pz: f64) -> bool {
    px.abs() <= ZONE_HALF_WIDTH && (ZONE_BOTTOM..=ZONE_TOP).contains(&pz)
}

/// Resolve one pitch. Pure apart from the draws on `rng`.
pub fn resolve_pitch<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &PitchConfig,
    ctx: &PitchContext<'_>,
) -> PitchResolution {
    let (pitch_type, velocity, spin_rate) = throw(rng, cfg, ctx.pitcher);

    let fatigue = fatigue_penalty(ctx.pitch_count, ctx.pitcher.stamina, cfg);
    let in_zone = chance(rng, ctx.pitcher.control - fatigue - cfg.zone_penalty);
    let (px, pz) = locate(rng, in_zone);

    let swing = ctx.bunting
        || chance(
            rng,
            if in_zone { cfg.swing_in_zone } else { chase_probability(ctx.batter, cfg) },
        );

    let call = if !swing {
        if in_zone {
            PitchCall::CalledStrike
        } else {
            PitchCall::Ball
        }
    } else {
        let mut contact = ctx.batter.contact + cfg.contact_bonus;
        if ctx.bunting && in_zone {
            contact += cfg.bunt_zone_contact_bonus;
        }
        if !chance(rng, contact) {
            PitchCall::SwingingStrike
        } else if chance(rng, cfg.foul_share) {
            PitchCall::Foul
        } else {
            PitchCall::InPlay
        }
    };

    PitchResolution {
        thrown: ThrownPitch { pitch_type, velocity, spin_rate, px, pz, in_zone },
        call,
    }
}

/// A pitch that hits the batter. Located well inside, never in the zone.
pub fn hit_by_pitch<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &PitchConfig,
    pitcher: &PitchingProfile,
) -> PitchResolution {
    let (pitch_type, velocity, spin_rate) = throw(rng, cfg, pitcher);
    let px = round2(uniform(rng, 1.2, 1.9));
    let pz = round2(uniform(rng, 1.0, 4.0));
    PitchResolution {
        thrown: ThrownPitch { pitch_type, velocity, spin_rate, px, pz, in_zone: false },
        call: PitchCall::HitByPitch,
    }
}

/// Apply a call to the count.
///
/// A foul only adds a strike below two strikes, except a two-strike foul bunt, which is
/// a strikeout.
pub fn advance_count(count: Count, call: PitchCall, bunting: bool) -> CountResult {
    match call {
        PitchCall::Ball => {
            if count.balls + 1 >= 4 {
                CountResult::Walk
            } else {
                CountResult::Continue(Count::new(count.balls + 1, count.strikes))
            }
        }
        PitchCall::CalledStrike | PitchCall::SwingingStrike => {
            if count.strikes + 1 >= 3 {
                CountResult::Strikeout { looking: call == PitchCall::CalledStrike }
            } else {
                CountResult::Continue(Count::new(count.balls, count.strikes + 1))
            }
        }
        PitchCall::Foul => {
            if count.strikes < 2 {
                CountResult::Continue(Count::new(count.balls, count.strikes + 1))
            } else if bunting {
                CountResult::Strikeout { looking: false }
            } else {
                CountResult::Continue(count)
            }
        }
        PitchCall::InPlay => CountResult::InPlay,
        PitchCall::HitByPitch => CountResult::HitByPitch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::game_rng;
    use crate::engine::test_fixtures::{average_batting, fastball_slider_arsenal};
    use crate::models::PitcherRole;

    fn profile(control: f64) -> PitchingProfile {
        PitchingProfile {
            role: PitcherRole::Starter,
            control,
            stamina: 90,
            arsenal: fastball_slider_arsenal(),
        }
    }

    #[test]
    fn test_fatigue_is_zero_until_stamina() {
        let cfg = PitchConfig::default();
        assert_eq!(fatigue_penalty(50, 90, &cfg), 0.0);
        assert_eq!(fatigue_penalty(90, 90, &cfg), 0.0);
        assert!((fatigue_penalty(105, 90, &cfg) - 0.1).abs() < 1e-12);
        assert!((fatigue_penalty(120, 90, &cfg) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_patient_hitters_chase_less() {
        let cfg = PitchConfig::default();
        let mut patient = average_batting();
        patient.walk_rate = 0.16;
        let mut free_swinger = average_batting();
        free_swinger.walk_rate = 0.0;
        assert!(chase_probability(&patient, &cfg) < chase_probability(&average_batting(), &cfg));
        // Discipline floor keeps the chase rate finite.
        assert!((chase_probability(&free_swinger, &cfg) - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_control_always_in_zone() {
        let cfg = PitchConfig { zone_penalty: 0.0, ..PitchConfig::default() };
        let pitcher = profile(1.0);
        let batter = average_batting();
        let mut rng = game_rng(11);
        for _ in 0..500 {
            let ctx = PitchContext { batter: &batter, pitcher: &pitcher, pitch_count: 10, bunting: false };
            let pitch = resolve_pitch(&mut rng, &cfg, &ctx);
            assert!(pitch.thrown.in_zone);
            assert!(is_strike_location(pitch.thrown.px, pitch.thrown.pz));
            assert_ne!(pitch.call, PitchCall::Ball);
        }
    }

    #[test]
    fn test_no_control_never_in_zone() {
        let cfg = PitchConfig::default();
        let pitcher = profile(0.0);
        let batter = average_batting();
        let mut rng = game_rng(12);
        for _ in 0..500 {
            let ctx = PitchContext { batter: &batter, pitcher: &pitcher, pitch_count: 10, bunting: false };
            let pitch = resolve_pitch(&mut rng, &cfg, &ctx);
            assert!(!pitch.thrown.in_zone);
            assert!(!is_strike_location(pitch.thrown.px, pitch.thrown.pz));
            assert_ne!(pitch.call, PitchCall::CalledStrike);
        }
    }

    #[test]
    fn test_velocity_and_spin_come_from_arsenal() {
        let cfg = PitchConfig::default();
        let pitcher = profile(0.6);
        let batter = average_batting();
        let mut rng = game_rng(13);
        let mut missing_spin = 0;
        for _ in 0..2000 {
            let ctx = PitchContext { batter: &batter, pitcher: &pitcher, pitch_count: 1, bunting: false };
            let pitch = resolve_pitch(&mut rng, &cfg, &ctx);
            let spec = &pitcher.arsenal[&pitch.thrown.pitch_type];
            assert!(pitch.thrown.velocity >= spec.velocity.0 && pitch.thrown.velocity <= spec.velocity.1);
            assert!(((pitch.thrown.velocity * 10.0).round() - pitch.thrown.velocity * 10.0).abs() < 1e-6);
            match pitch.thrown.spin_rate {
                Some(spin) => assert!(spin >= spec.spin.0 && spin <= spec.spin.1),
                None => missing_spin += 1,
            }
        }
        assert!(missing_spin > 80 && missing_spin < 260, "missing spin {missing_spin}");
    }

    #[test]
    fn test_bunt_always_offers() {
        let cfg = PitchConfig::default();
        let pitcher = profile(0.5);
        let batter = average_batting();
        let mut rng = game_rng(14);
        for _ in 0..500 {
            let ctx = PitchContext { batter: &batter, pitcher: &pitcher, pitch_count: 1, bunting: true };
            let call = resolve_pitch(&mut rng, &cfg, &ctx).call;
            assert!(!matches!(call, PitchCall::Ball | PitchCall::CalledStrike));
        }
    }

    #[test]
    fn test_two_strike_foul_keeps_count() {
        let count = Count::new(1, 2);
        assert_eq!(advance_count(count, PitchCall::Foul, false), CountResult::Continue(count));
        assert_eq!(
            advance_count(Count::new(0, 1), PitchCall::Foul, false),
            CountResult::Continue(Count::new(0, 2))
        );
    }

    #[test]
    fn test_two_strike_foul_bunt_is_strikeout() {
        assert_eq!(
            advance_count(Count::new(2, 2), PitchCall::Foul, true),
            CountResult::Strikeout { looking: false }
        );
        assert_eq!(
            advance_count(Count::new(2, 1), PitchCall::Foul, true),
            CountResult::Continue(Count::new(2, 2))
        );
    }

    #[test]
    fn test_walk_and_strikeouts() {
        assert_eq!(advance_count(Count::new(3, 2), PitchCall::Ball, false), CountResult::Walk);
        assert_eq!(
            advance_count(Count::new(3, 2), PitchCall::CalledStrike, false),
            CountResult::Strikeout { looking: true }
        );
        assert_eq!(
            advance_count(Count::new(0, 2), PitchCall::SwingingStrike, false),
            CountResult::Strikeout { looking: false }
        );
    }

    #[test]
    fn test_hit_by_pitch_is_off_the_plate() {
        let cfg = PitchConfig::default();
        let mut rng = game_rng(15);
        let pitch = hit_by_pitch(&mut rng, &cfg, &profile(0.6));
        assert_eq!(pitch.call, PitchCall::HitByPitch);
        assert!(!pitch.thrown.in_zone);
        assert!(pitch.thrown.px > ZONE_HALF_WIDTH);
    }
}
