use thiserror::Error;

/// Problems found while validating rosters at game construction.
///
/// These are fatal: a game never starts with a roster that fails here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("team '{team}' has an empty lineup")]
    EmptyLineup { team: String },

    #[error("team '{team}' lineup must have {expected} batters, found {found}")]
    InvalidLineupSize { team: String, expected: usize, found: usize },

    #[error("team '{team}' has no {position} in the lineup")]
    MissingPosition { team: String, position: String },

    #[error("team '{team}' lists {position} more than once")]
    DuplicatePosition { team: String, position: String },

    #[error("player id '{id}' appears more than once")]
    DuplicatePlayerId { id: String },

    #[error("team '{team}' has no starting pitcher")]
    NoStarter { team: String },

    #[error("team '{team}' has more than one starting pitcher")]
    MultipleStarters { team: String },

    #[error("pitcher '{player}' has no pitching profile")]
    MissingPitchingProfile { player: String },

    #[error("pitcher '{player}' has an empty pitch arsenal")]
    EmptyArsenal { player: String },

    #[error("pitcher '{player}' has non-positive selection weight for {pitch}")]
    InvalidPitchWeight { player: String, pitch: String },

    #[error("pitcher '{player}' has an inverted {field} range for {pitch}")]
    InvertedRange { player: String, pitch: String, field: &'static str },

    #[error("catcher '{player}' has no arm rating")]
    MissingCatcherArm { player: String },

    #[error("invalid attributes for '{player}': {message}")]
    InvalidAttribute { player: String, message: String },
}

/// Invalid engine tuning values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("max_innings must be at least 9, got {0}")]
    InningsCapTooLow(u32),
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Failed to load engine config from '{path}': {message}")]
    ConfigFile { path: String, message: String },
}

impl SimError {
    /// Configuration problems are the only class of error the simulation produces;
    /// everything else comes from the JSON boundary.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimError::Roster(_) | SimError::Config(_) | SimError::ConfigFile { .. })
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SimError::Deserialization(err.to_string())
        } else {
            SimError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
