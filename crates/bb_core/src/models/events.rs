use super::player::{PitchType, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    pub fn new(balls: u8, strikes: u8) -> Self {
        Self { balls, strikes }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PitchCall {
    CalledStrike,
    SwingingStrike,
    Foul,
    Ball,
    InPlay,
    HitByPitch,
}

impl PitchCall {
    pub fn is_strike(&self) -> bool {
        matches!(
            self,
            PitchCall::CalledStrike | PitchCall::SwingingStrike | PitchCall::Foul | PitchCall::InPlay
        )
    }
}

/// Exit velocity (mph) and launch angle (degrees) of a ball put in play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BattedBall {
    pub exit_velocity: f64,
    pub launch_angle: f64,
}

impl BattedBall {
    pub fn trajectory(&self) -> &'static str {
        if self.launch_angle < 10.0 {
            "ground_ball"
        } else if self.launch_angle < 25.0 {
            "line_drive"
        } else if self.launch_angle < 50.0 {
            "fly_ball"
        } else {
            "popup"
        }
    }

    pub fn hardness(&self) -> &'static str {
        if self.exit_velocity < 90.0 {
            "soft"
        } else if self.exit_velocity < 105.0 {
            "medium"
        } else {
            "hard"
        }
    }
}

/// One thrown pitch and how it was called.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchEvent {
    /// 1-based within the at-bat.
    pub pitch_number: u32,
    /// Count before the pitch.
    pub count: Count,
    pub pitch_type: PitchType,
    pub velocity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spin_rate: Option<u32>,
    /// Horizontal location in feet from the middle of the plate.
    pub px: f64,
    /// Height above the ground in feet.
    pub pz: f64,
    pub in_zone: bool,
    pub call: PitchCall,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_bunt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batted_ball: Option<BattedBall>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    First,
    Second,
    Third,
    Home,
}

impl Base {
    pub fn index(&self) -> usize {
        match self {
            Base::First => 0,
            Base::Second => 1,
            Base::Third => 2,
            Base::Home => 3,
        }
    }

    pub fn from_index(idx: usize) -> Base {
        match idx {
            0 => Base::First,
            1 => Base::Second,
            2 => Base::Third,
            3 => Base::Home,
            _ => panic!("base index {idx} out of range"),
        }
    }

    pub fn next(&self) -> Base {
        match self {
            Base::First => Base::Second,
            Base::Second => Base::Third,
            Base::Third | Base::Home => Base::Home,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Base::First => "1B",
            Base::Second => "2B",
            Base::Third => "3B",
            Base::Home => "home",
        }
    }
}

/// Baserunning that happens between pitches rather than on a ball in play.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionEvent {
    StolenBase { runner: PlayerId, base: Base },
    CaughtStealing { runner: PlayerId, base: Base },
    WildPitch,
    PassedBall,
}

/// Entry in a play's event list, in the order it happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayEvent {
    Pitch(PitchEvent),
    Action(ActionEvent),
}

impl PlayEvent {
    pub fn as_pitch(&self) -> Option<&PitchEvent> {
        match self {
            PlayEvent::Pitch(p) => Some(p),
            PlayEvent::Action(_) => None,
        }
    }
}
