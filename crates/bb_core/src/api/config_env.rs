use crate::engine::config::EngineConfig;
use crate::error::{Result, SimError};
use std::{env, fs};

pub(crate) const ENGINE_CONFIG_PATH_ENV: &str = "BB_ENGINE_CONFIG_PATH";

/// Engine tuning from the file named by `BB_ENGINE_CONFIG_PATH`, or `None` when the
/// variable is unset or blank.
pub(crate) fn engine_config_from_env() -> Result<Option<EngineConfig>> {
    let Ok(path) = env::var(ENGINE_CONFIG_PATH_ENV) else {
        return Ok(None);
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    load_engine_config(path).map(Some)
}

pub(crate) fn load_engine_config(path: &str) -> Result<EngineConfig> {
    let fail = |message: String| SimError::ConfigFile { path: path.to_string(), message };

    let content = fs::read_to_string(path).map_err(|e| fail(format!("read failed: {e}")))?;
    let config = EngineConfig::from_json(&content).map_err(|e| fail(format!("invalid JSON: {e}")))?;
    config.validate()?;
    Ok(config)
}
