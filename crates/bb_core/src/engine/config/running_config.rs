//! Running game configuration (steals, wild pitches, passed balls)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunningConfig {
    /// Per-pitch steal attempt chance per unit of steal tendency (default: 0.08)
    pub steal_attempt_scale: f64,
    /// Attempts at third relative to attempts at second (default: 0.25)
    pub steal_third_factor: f64,
    /// How far a catcher's arm above/below 0.5 moves the success chance (default: 0.3)
    pub catcher_arm_weight: f64,
    /// Wild pitch chance on a ball with runners on (default: 0.012)
    pub wild_pitch_rate: f64,
    /// Passed ball chance on a ball with runners on (default: 0.005)
    pub passed_ball_rate: f64,
}

impl Default for RunningConfig {
    fn default() -> Self {
        Self {
            steal_attempt_scale: 0.08,
            steal_third_factor: 0.25,
            catcher_arm_weight: 0.3,
            wild_pitch_rate: 0.012,
            passed_ball_rate: 0.005,
        }
    }
}

impl RunningConfig {
    /// No steals, wild pitches or passed balls.
    pub fn disabled() -> Self {
        Self {
            steal_attempt_scale: 0.0,
            wild_pitch_rate: 0.0,
            passed_ball_rate: 0.0,
            ..Self::default()
        }
    }
}
