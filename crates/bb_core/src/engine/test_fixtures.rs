//! Test Fixtures Module
//!
//! Deterministic rosters and hand-built defenses shared by the engine tests.
//!
//! ## Usage
//! ```rust,ignore
//! use crate::engine::test_fixtures::*;
//! ```

use crate::engine::fielding::Defense;
use crate::models::{
    BattingProfile, PitchSpec, PitchType, PitcherRole, PitchingProfile, Player, PlayerId, Position,
    Team,
};
use std::collections::BTreeMap;

// =============================================================================
// Player Helpers
// =============================================================================

/// League-average hitter: rarely walks, never steals or bunts.
pub fn average_batting() -> BattingProfile {
    BattingProfile {
        contact: 0.74,
        power: 0.45,
        angle: 10.0,
        walk_rate: 0.085,
        hbp_rate: 0.01,
        steal_tendency: 0.0,
        steal_success: 0.7,
        bunt_propensity: 0.0,
    }
}

pub fn test_batter(id: &str, position: Position) -> Player {
    Player {
        id: PlayerId::new(id),
        name: format!("Batter {id}"),
        position,
        batting: average_batting(),
        pitching: None,
        fielding: 0.97,
        catcher_arm: (position == Position::C).then_some(0.5),
    }
}

pub fn fastball_slider_arsenal() -> BTreeMap<PitchType, PitchSpec> {
    let mut arsenal = BTreeMap::new();
    arsenal.insert(
        PitchType::FourSeam,
        PitchSpec { probability: 0.6, velocity: (92.0, 96.0), spin: (2200, 2450) },
    );
    arsenal.insert(
        PitchType::Slider,
        PitchSpec { probability: 0.3, velocity: (83.0, 87.0), spin: (2350, 2600) },
    );
    arsenal.insert(
        PitchType::Changeup,
        PitchSpec { probability: 0.1, velocity: (84.0, 88.0), spin: (1650, 1850) },
    );
    arsenal
}

pub fn test_pitcher(id: &str, role: PitcherRole, stamina: u32) -> Player {
    Player {
        id: PlayerId::new(id),
        name: format!("Pitcher {id}"),
        position: Position::P,
        batting: BattingProfile { contact: 0.3, power: 0.1, ..average_batting() },
        pitching: Some(PitchingProfile {
            role,
            control: 0.68,
            stamina,
            arsenal: fastball_slider_arsenal(),
        }),
        fielding: 0.95,
        catcher_arm: None,
    }
}

// =============================================================================
// Team Helpers
// =============================================================================

/// Valid nine-man lineup (C through RF plus DH) and a four-man staff:
/// `{prefix}-sp` starter, two relievers and a closer.
pub fn test_team(name: &str, prefix: &str) -> Team {
    let positions = [
        Position::CF,
        Position::SS,
        Position::FirstBase,
        Position::DH,
        Position::RF,
        Position::ThirdBase,
        Position::LF,
        Position::C,
        Position::SecondBase,
    ];
    let lineup = positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| test_batter(&format!("{prefix}-b{}", i + 1), pos))
        .collect();

    let pitchers = vec![
        test_pitcher(&format!("{prefix}-sp"), PitcherRole::Starter, 95),
        test_pitcher(&format!("{prefix}-rp1"), PitcherRole::Reliever, 30),
        test_pitcher(&format!("{prefix}-rp2"), PitcherRole::Reliever, 30),
        test_pitcher(&format!("{prefix}-cl"), PitcherRole::Closer, 25),
    ];

    Team {
        name: name.to_string(),
        lineup,
        pitchers,
        fielding_prowess: 1.0,
        double_play_rate: 0.12,
    }
}

/// `(home, away)` with disjoint player ids.
pub fn test_matchup() -> (Team, Team) {
    (test_team("Home Nine", "h"), test_team("Away Nine", "a"))
}

/// Team whose hitters run and bunt, for exercising the small-ball paths.
pub fn small_ball_team(name: &str, prefix: &str) -> Team {
    let mut team = test_team(name, prefix);
    for player in &mut team.lineup {
        player.batting.steal_tendency = 0.6;
        player.batting.steal_success = 0.75;
        player.batting.bunt_propensity = 0.25;
    }
    team
}

/// Defense built from [`test_team`] with its starter on the mound.
pub fn test_defense(prefix: &str) -> Defense {
    let team = test_team("Defense", prefix);
    let starter = team.pitchers[0].clone();
    match Defense::new(&team, &starter) {
        Ok(defense) => defense,
        Err(e) => panic!("fixture defense is invalid: {e}"),
    }
}

pub fn id(s: &str) -> PlayerId {
    PlayerId::new(s)
}
