//! Batted ball sampling parameters

use serde::{Deserialize, Serialize};

/// Distribution parameters for exit velocity and launch angle. The outcome table that
/// classifies the sampled values is fixed and lives with the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BattedBallConfig {
    /// EV mean at zero power, mph (default: 80)
    pub ev_base: f64,
    /// EV mean gained per unit of power (default: 25)
    pub ev_power_scale: f64,
    /// EV standard deviation (default: 8)
    pub ev_sd: f64,
    /// Added to the batter's angle for the LA mean, degrees (default: 4.5)
    pub la_offset: f64,
    /// LA standard deviation (default: 15)
    pub la_sd: f64,
    /// Uniform bunt EV range (default: 60..=75)
    pub bunt_ev: (f64, f64),
    /// Uniform bunt LA range (default: -50..=-20)
    pub bunt_la: (f64, f64),
}

impl Default for BattedBallConfig {
    fn default() -> Self {
        Self {
            ev_base: 80.0,
            ev_power_scale: 25.0,
            ev_sd: 8.0,
            la_offset: 4.5,
            la_sd: 15.0,
            bunt_ev: (60.0, 75.0),
            bunt_la: (-50.0, -20.0),
        }
    }
}
