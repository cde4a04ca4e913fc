use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

/// Stable identity of a player within one game. Runners on base are tracked by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    P,
    C,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    SS,
    LF,
    CF,
    RF,
    DH,
}

impl Position {
    /// The eight positions a lineup must cover in the field (the pitcher comes from the staff).
    pub const FIELDING_LINEUP: [Position; 8] = [
        Position::C,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::SS,
        Position::LF,
        Position::CF,
        Position::RF,
    ];

    pub const INFIELD: [Position; 4] =
        [Position::FirstBase, Position::SecondBase, Position::ThirdBase, Position::SS];

    pub const OUTFIELD: [Position; 3] = [Position::LF, Position::CF, Position::RF];

    /// Scorer's number (1 = pitcher ... 9 = right field). DH never fields.
    pub fn scorer_number(&self) -> Option<u8> {
        match self {
            Position::P => Some(1),
            Position::C => Some(2),
            Position::FirstBase => Some(3),
            Position::SecondBase => Some(4),
            Position::ThirdBase => Some(5),
            Position::SS => Some(6),
            Position::LF => Some(7),
            Position::CF => Some(8),
            Position::RF => Some(9),
            Position::DH => None,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::P => "P",
            Position::C => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::SS => "SS",
            Position::LF => "LF",
            Position::CF => "CF",
            Position::RF => "RF",
            Position::DH => "DH",
        }
    }

    pub fn is_outfielder(&self) -> bool {
        matches!(self, Position::LF | Position::CF | Position::RF)
    }

    pub fn is_infielder(&self) -> bool {
        matches!(
            self,
            Position::FirstBase | Position::SecondBase | Position::ThirdBase | Position::SS
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PitchType {
    FourSeam,
    Sinker,
    Cutter,
    Slider,
    Sweeper,
    Curveball,
    KnuckleCurve,
    Changeup,
    Splitter,
}

impl PitchType {
    /// Two-letter pitch code as used in pitch-tracking feeds.
    pub fn code(&self) -> &'static str {
        match self {
            PitchType::FourSeam => "FF",
            PitchType::Sinker => "SI",
            PitchType::Cutter => "FC",
            PitchType::Slider => "SL",
            PitchType::Sweeper => "ST",
            PitchType::Curveball => "CU",
            PitchType::KnuckleCurve => "KC",
            PitchType::Changeup => "CH",
            PitchType::Splitter => "FS",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PitchType::FourSeam => "Four-Seam Fastball",
            PitchType::Sinker => "Sinker",
            PitchType::Cutter => "Cutter",
            PitchType::Slider => "Slider",
            PitchType::Sweeper => "Sweeper",
            PitchType::Curveball => "Curveball",
            PitchType::KnuckleCurve => "Knuckle Curve",
            PitchType::Changeup => "Changeup",
            PitchType::Splitter => "Splitter",
        }
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PitcherRole {
    Starter,
    Reliever,
    Closer,
}

/// Hitting and baserunning tendencies. All rates are probabilities in `[0, 1]`
/// except `angle`, the batter's mean launch angle in degrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct BattingProfile {
    #[validate(range(min = 0.0, max = 1.0))]
    pub contact: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub power: f64,
    #[validate(range(min = -30.0, max = 45.0))]
    pub angle: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub walk_rate: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub hbp_rate: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub steal_tendency: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub steal_success: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub bunt_propensity: f64,
}

/// One entry of a pitcher's arsenal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchSpec {
    /// Relative selection weight; need not sum to one across the arsenal.
    pub probability: f64,
    /// Inclusive velocity range in mph.
    pub velocity: (f64, f64),
    /// Inclusive spin range in rpm.
    #[serde(default = "default_spin_range")]
    pub spin: (u32, u32),
}

fn default_spin_range() -> (u32, u32) {
    (2000, 2500)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct PitchingProfile {
    pub role: PitcherRole,
    #[validate(range(min = 0.0, max = 1.0))]
    pub control: f64,
    /// Pitch count beyond which fatigue starts to erode control.
    pub stamina: u32,
    pub arsenal: BTreeMap<PitchType, PitchSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    #[validate]
    pub batting: BattingProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub pitching: Option<PitchingProfile>,
    /// Probability scale of turning a routine chance into an out.
    #[validate(range(min = 0.0, max = 1.0))]
    pub fielding: f64,
    /// Throwing arm behind the plate; required for catchers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub catcher_arm: Option<f64>,
}

impl Player {
    pub fn is_pitcher(&self) -> bool {
        self.position == Position::P
    }

    pub fn role(&self) -> Option<PitcherRole> {
        self.pitching.as_ref().map(|p| p.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_serde_uses_scorecard_labels() {
        let json = serde_json::to_string(&Position::FirstBase).unwrap();
        assert_eq!(json, "\"1B\"");
        let parsed: Position = serde_json::from_str("\"SS\"").unwrap();
        assert_eq!(parsed, Position::SS);
    }

    #[test]
    fn test_scorer_numbers() {
        assert_eq!(Position::P.scorer_number(), Some(1));
        assert_eq!(Position::SS.scorer_number(), Some(6));
        assert_eq!(Position::RF.scorer_number(), Some(9));
        assert_eq!(Position::DH.scorer_number(), None);
    }

    #[test]
    fn test_batting_profile_range_validation() {
        let mut profile = BattingProfile {
            contact: 0.75,
            power: 0.5,
            angle: 12.0,
            walk_rate: 0.08,
            hbp_rate: 0.01,
            steal_tendency: 0.2,
            steal_success: 0.7,
            bunt_propensity: 0.0,
        };
        assert!(profile.validate().is_ok());

        profile.contact = 1.4;
        assert!(profile.validate().is_err());
    }
}
