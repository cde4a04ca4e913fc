//! Fielding Configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldingConfig {
    /// Multiplies fielding ability x team prowess to get the clean-play chance (default: 1.02)
    pub error_scale: f64,
    /// A sac fly needs a draw above this gate (default: 0.4)
    pub sac_fly_gate: f64,
    /// Chance a non-double-play grounder with a runner on first becomes a force (default: 0.3)
    pub force_play_rate: f64,
    /// Chance a bunt with runners on is a successful sacrifice (default: 0.75)
    pub sac_bunt_success: f64,

    // === Fielder selection weights ===
    /// Each infielder on a ground ball (default: 6)
    pub ground_infielder_weight: f64,
    /// Pitcher on a ground ball (default: 1)
    pub ground_pitcher_weight: f64,
    /// Catcher on a ground ball (default: 0.25)
    pub ground_catcher_weight: f64,
    /// Each outfielder on a fly ball (default: 6)
    pub fly_outfielder_weight: f64,
    /// Each infielder on a fly ball (default: 1)
    pub fly_infielder_weight: f64,
}

impl Default for FieldingConfig {
    fn default() -> Self {
        Self {
            error_scale: 1.02,
            sac_fly_gate: 0.4,
            force_play_rate: 0.3,
            sac_bunt_success: 0.75,

            ground_infielder_weight: 6.0,
            ground_pitcher_weight: 1.0,
            ground_catcher_weight: 0.25,
            fly_outfielder_weight: 6.0,
            fly_infielder_weight: 1.0,
        }
    }
}
