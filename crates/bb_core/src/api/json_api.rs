//! JSON boundary
//!
//! `simulate_game_json` takes a [`GameRequest`] document and returns a [`GameResponse`]
//! document. Engine tuning comes from `BB_ENGINE_CONFIG_PATH` when set.

use super::config_env::engine_config_from_env;
use crate::engine::game_loop::{simulate, SimulationOptions};
use crate::error::{Result, SimError};
use crate::models::{GameResult, Team};
use crate::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub max_innings: Option<u32>,
    #[serde(default)]
    pub commentary_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub schema_version: u8,
    /// SHA-256 of the play log; equal digests mean identical games.
    pub digest: String,
    #[serde(flatten)]
    pub result: GameResult,
}

impl GameRequest {
    pub fn new(seed: u64, home_team: Team, away_team: Team) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            home_team,
            away_team,
            max_innings: None,
            commentary_seed: None,
        }
    }

    fn options(&self) -> Result<SimulationOptions> {
        let mut options = SimulationOptions::new(self.seed);
        options.max_innings = self.max_innings;
        options.commentary_seed = self.commentary_seed;
        if let Some(config) = engine_config_from_env()? {
            options.config = config;
        }
        Ok(options)
    }
}

/// Run one game from a JSON request.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::UnsupportedSchema(request.schema_version));
    }

    let options = request.options()?;
    let result = simulate(&request.home_team, &request.away_team, &options)?;
    let response = GameResponse { schema_version: SCHEMA_VERSION, digest: result.digest(), result };
    serde_json::to_string(&response).map_err(|e| SimError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::test_matchup;

    fn request_json(seed: u64) -> String {
        let (home, away) = test_matchup();
        serde_json::to_string(&GameRequest::new(seed, home, away)).unwrap()
    }

    #[test]
    fn test_simulate_game_json_roundtrip() {
        let output = simulate_game_json(&request_json(42)).unwrap();
        let response: GameResponse = serde_json::from_str(&output).unwrap();
        assert_eq!(response.schema_version, SCHEMA_VERSION);
        assert_eq!(response.result.seed, 42);
        assert_eq!(response.digest, response.result.digest());
        assert!(response.result.innings_played >= 9);
    }

    #[test]
    fn test_same_request_same_output() {
        let a = simulate_game_json(&request_json(7)).unwrap();
        let b = simulate_game_json(&request_json(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_schema_version_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(&request_json(1)).unwrap();
        value["schema_version"] = serde_json::json!(2);
        let err = simulate_game_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, SimError::UnsupportedSchema(2)));
    }

    #[test]
    fn test_malformed_request_is_deserialization_error() {
        let err = simulate_game_json("{\"seed\": 1}").unwrap_err();
        assert!(matches!(err, SimError::Deserialization(_)));
    }

    #[test]
    fn test_invalid_roster_is_configuration_error() {
        let (home, mut away) = test_matchup();
        away.pitchers.clear();
        let json = serde_json::to_string(&GameRequest::new(1, home, away)).unwrap();
        let err = simulate_game_json(&json).unwrap_err();
        assert!(err.is_configuration());
    }
}
