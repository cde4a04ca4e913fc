use super::player::{PitcherRole, Player, PlayerId, Position};
use crate::error::RosterError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

pub const LINEUP_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Away,
    Home,
}

impl TeamSide {
    pub fn opponent(&self) -> Self {
        match self {
            TeamSide::Away => TeamSide::Home,
            TeamSide::Home => TeamSide::Away,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TeamSide::Away => 0,
            TeamSide::Home => 1,
        }
    }
}

/// A club as it takes the field: nine batters in order plus the pitching staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Batting order. Positions cover C through RF plus a DH.
    pub lineup: Vec<Player>,
    /// Exactly one starter; everyone else is a bullpen arm.
    pub pitchers: Vec<Player>,
    /// Team-wide multiplier on individual fielding ability.
    #[serde(default = "default_fielding_prowess")]
    pub fielding_prowess: f64,
    /// Chance a plain ground ball is turned into two when a double play is on.
    #[serde(default = "default_double_play_rate")]
    pub double_play_rate: f64,
}

fn default_fielding_prowess() -> f64 {
    1.0
}

fn default_double_play_rate() -> f64 {
    0.12
}

impl Team {
    /// Structural and attribute validation. Runs once before a game starts.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.lineup.is_empty() {
            return Err(RosterError::EmptyLineup { team: self.name.clone() });
        }
        if self.lineup.len() != LINEUP_SIZE {
            return Err(RosterError::InvalidLineupSize {
                team: self.name.clone(),
                expected: LINEUP_SIZE,
                found: self.lineup.len(),
            });
        }

        for player in self.lineup.iter().chain(self.pitchers.iter()) {
            player.validate().map_err(|e| RosterError::InvalidAttribute {
                player: player.name.clone(),
                message: e.to_string(),
            })?;
        }
        for (field, value) in
            [("fielding_prowess", self.fielding_prowess), ("double_play_rate", self.double_play_rate)]
        {
            if !(0.0..=1.5).contains(&value) {
                return Err(RosterError::InvalidAttribute {
                    player: self.name.clone(),
                    message: format!("{field} out of range: {value}"),
                });
            }
        }

        let mut seen = HashSet::new();
        for position in self.lineup.iter().map(|p| p.position) {
            if position == Position::P {
                return Err(RosterError::InvalidAttribute {
                    player: self.name.clone(),
                    message: "pitchers do not bat in a DH lineup".to_string(),
                });
            }
            if !seen.insert(position) {
                return Err(RosterError::DuplicatePosition {
                    team: self.name.clone(),
                    position: position.to_string(),
                });
            }
        }
        for position in Position::FIELDING_LINEUP {
            if !seen.contains(&position) {
                return Err(RosterError::MissingPosition {
                    team: self.name.clone(),
                    position: position.to_string(),
                });
            }
        }

        if let Some(catcher) = self.fielder_at(Position::C) {
            if catcher.catcher_arm.is_none() {
                return Err(RosterError::MissingCatcherArm { player: catcher.name.clone() });
            }
        }

        let mut starters = 0;
        for pitcher in &self.pitchers {
            let profile = pitcher
                .pitching
                .as_ref()
                .ok_or_else(|| RosterError::MissingPitchingProfile { player: pitcher.name.clone() })?;
            if profile.arsenal.is_empty() {
                return Err(RosterError::EmptyArsenal { player: pitcher.name.clone() });
            }
            for (pitch, spec) in &profile.arsenal {
                if !(spec.probability > 0.0 && spec.probability.is_finite()) {
                    return Err(RosterError::InvalidPitchWeight {
                        player: pitcher.name.clone(),
                        pitch: pitch.to_string(),
                    });
                }
                if spec.velocity.0 > spec.velocity.1 {
                    return Err(RosterError::InvertedRange {
                        player: pitcher.name.clone(),
                        pitch: pitch.to_string(),
                        field: "velocity",
                    });
                }
                if spec.spin.0 > spec.spin.1 {
                    return Err(RosterError::InvertedRange {
                        player: pitcher.name.clone(),
                        pitch: pitch.to_string(),
                        field: "spin",
                    });
                }
            }
            if profile.role == PitcherRole::Starter {
                starters += 1;
            }
        }
        match starters {
            0 => Err(RosterError::NoStarter { team: self.name.clone() }),
            1 => Ok(()),
            _ => Err(RosterError::MultipleStarters { team: self.name.clone() }),
        }
    }

    pub fn fielder_at(&self, position: Position) -> Option<&Player> {
        self.lineup.iter().find(|p| p.position == position)
    }

    pub fn starter(&self) -> Option<&Player> {
        self.pitchers.iter().find(|p| p.role() == Some(PitcherRole::Starter))
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.lineup.iter().chain(self.pitchers.iter()).find(|p| &p.id == id)
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.lineup.iter().chain(self.pitchers.iter()).map(|p| &p.id)
    }
}

/// Cross-team checks that a single team cannot see on its own.
pub fn validate_matchup(home: &Team, away: &Team) -> Result<(), RosterError> {
    home.validate()?;
    away.validate()?;

    let mut ids = HashSet::new();
    for id in home.player_ids().chain(away.player_ids()) {
        if !ids.insert(id) {
            return Err(RosterError::DuplicatePlayerId { id: id.to_string() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::test_team;

    #[test]
    fn test_fixture_team_is_valid() {
        let team = test_team("Valid", "v");
        assert!(team.validate().is_ok());
        assert_eq!(team.starter().map(|p| p.id.as_str()), Some("v-sp"));
    }

    #[test]
    fn test_empty_lineup_rejected() {
        let mut team = test_team("Empty", "e");
        team.lineup.clear();
        assert!(matches!(team.validate(), Err(RosterError::EmptyLineup { .. })));
    }

    #[test]
    fn test_short_lineup_rejected() {
        let mut team = test_team("Short", "s");
        team.lineup.pop();
        assert!(matches!(
            team.validate(),
            Err(RosterError::InvalidLineupSize { expected: 9, found: 8, .. })
        ));
    }

    #[test]
    fn test_empty_arsenal_rejected() {
        let mut team = test_team("NoPitches", "n");
        if let Some(profile) = team.pitchers[0].pitching.as_mut() {
            profile.arsenal.clear();
        }
        assert!(matches!(team.validate(), Err(RosterError::EmptyArsenal { .. })));
    }

    #[test]
    fn test_missing_pitching_profile_rejected() {
        let mut team = test_team("NoProfile", "n");
        team.pitchers[1].pitching = None;
        assert!(matches!(team.validate(), Err(RosterError::MissingPitchingProfile { .. })));
    }

    #[test]
    fn test_catcher_needs_arm() {
        let mut team = test_team("NoArm", "n");
        for player in team.lineup.iter_mut().filter(|p| p.position == Position::C) {
            player.catcher_arm = None;
        }
        assert!(matches!(team.validate(), Err(RosterError::MissingCatcherArm { .. })));
    }

    #[test]
    fn test_out_of_range_attribute_rejected() {
        let mut team = test_team("Wild", "w");
        team.lineup[0].batting.walk_rate = 2.0;
        assert!(matches!(team.validate(), Err(RosterError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_duplicate_ids_across_teams_rejected() {
        let home = test_team("Home", "same");
        let away = test_team("Away", "same");
        assert!(matches!(
            validate_matchup(&home, &away),
            Err(RosterError::DuplicatePlayerId { .. })
        ));
    }
}
