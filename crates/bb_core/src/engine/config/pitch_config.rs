//! Pitch resolution tuning

use serde::{Deserialize, Serialize};

/// Constants for location, swing, contact and foul decisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PitchConfig {
    /// Subtracted from pitcher control to get the in-zone probability (default: 0.05)
    pub zone_penalty: f64,
    /// Pitches past stamina per fatigue step (default: 15)
    pub fatigue_pitch_span: f64,
    /// Control lost per fatigue step (default: 0.1)
    pub fatigue_step: f64,
    /// Swing probability on a pitch in the zone (default: 0.85)
    pub swing_in_zone: f64,
    /// Chase probability for a league-average eye (default: 0.14)
    pub chase_base: f64,
    /// Walk rate treated as a discipline factor of 1.0 (default: 0.08)
    pub walk_rate_baseline: f64,
    /// Floor on the discipline factor (default: 0.1)
    pub min_discipline: f64,
    /// Added to batter contact (default: 0.05)
    pub contact_bonus: f64,
    /// Extra contact for a bunt at a strike (default: 0.2)
    pub bunt_zone_contact_bonus: f64,
    /// Share of contact that goes foul (default: 0.6)
    pub foul_share: f64,
    /// Chance the spin reading is missing (default: 0.08)
    pub missing_spin_rate: f64,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            zone_penalty: 0.05,
            fatigue_pitch_span: 15.0,
            fatigue_step: 0.1,
            swing_in_zone: 0.85,
            chase_base: 0.14,
            walk_rate_baseline: 0.08,
            min_discipline: 0.1,
            contact_bonus: 0.05,
            bunt_zone_contact_bonus: 0.2,
            foul_share: 0.6,
            missing_spin_rate: 0.08,
        }
    }
}
