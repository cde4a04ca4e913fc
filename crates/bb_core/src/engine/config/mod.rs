//! # Engine Configuration
//!
//! Every tuning constant of the simulation in one place.
//!
//! ## Usage
//! ```rust
//! use bb_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let quiet = EngineConfig::no_running_game();
//! assert!(config.validate().is_ok());
//! assert_eq!(quiet.running.wild_pitch_rate, 0.0);
//! ```

mod batted_ball_config;
mod fielding_config;
mod pitch_config;
mod running_config;

pub use batted_ball_config::BattedBallConfig;
pub use fielding_config::FieldingConfig;
pub use pitch_config::PitchConfig;
pub use running_config::RunningConfig;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub pitch: PitchConfig,
    #[serde(default)]
    pub batted_ball: BattedBallConfig,
    #[serde(default)]
    pub fielding: FieldingConfig,
    #[serde(default)]
    pub running: RunningConfig,
}

impl EngineConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Station-to-station baseball: no steals, wild pitches or passed balls.
    pub fn no_running_game() -> Self {
        Self { running: RunningConfig::disabled(), ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pitch;
        let f = &self.fielding;
        let r = &self.running;
        for (field, value) in [
            ("pitch.zone_penalty", p.zone_penalty),
            ("pitch.swing_in_zone", p.swing_in_zone),
            ("pitch.chase_base", p.chase_base),
            ("pitch.contact_bonus", p.contact_bonus),
            ("pitch.bunt_zone_contact_bonus", p.bunt_zone_contact_bonus),
            ("pitch.foul_share", p.foul_share),
            ("pitch.missing_spin_rate", p.missing_spin_rate),
            ("fielding.sac_fly_gate", f.sac_fly_gate),
            ("fielding.force_play_rate", f.force_play_rate),
            ("fielding.sac_bunt_success", f.sac_bunt_success),
            ("running.steal_attempt_scale", r.steal_attempt_scale),
            ("running.steal_third_factor", r.steal_third_factor),
            ("running.catcher_arm_weight", r.catcher_arm_weight),
            ("running.wild_pitch_rate", r.wild_pitch_rate),
            ("running.passed_ball_rate", r.passed_ball_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }

        let b = &self.batted_ball;
        for (field, value) in [
            ("pitch.fatigue_step", p.fatigue_step),
            ("pitch.walk_rate_baseline", p.walk_rate_baseline),
            ("pitch.min_discipline", p.min_discipline),
            ("batted_ball.ev_sd", b.ev_sd),
            ("batted_ball.la_sd", b.la_sd),
            ("fielding.error_scale", f.error_scale),
            ("fielding.ground_infielder_weight", f.ground_infielder_weight),
            ("fielding.ground_pitcher_weight", f.ground_pitcher_weight),
            ("fielding.ground_catcher_weight", f.ground_catcher_weight),
            ("fielding.fly_outfielder_weight", f.fly_outfielder_weight),
            ("fielding.fly_infielder_weight", f.fly_infielder_weight),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::Negative { field, value });
            }
        }
        // Both divide something downstream.
        for (field, value) in [
            ("pitch.fatigue_pitch_span", p.fatigue_pitch_span),
            ("pitch.walk_rate_baseline", p.walk_rate_baseline),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

// ========== Tests ==========
