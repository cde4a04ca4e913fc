pub mod at_bat;
pub mod base_running;
pub mod batted_ball;
pub mod bullpen;
pub mod config; // Tuning constants, grouped per area
pub mod fielding;
pub mod game_loop;
pub mod pitch;
pub mod rng; // Seeded streams and draw helpers
pub mod state;
pub mod stats_recorder;
pub mod stealing;

#[cfg(test)]
pub(crate) mod test_fixtures;


pub use base_running::{resolve_play, PlayResolution};
pub use batted_ball::{classify, BattedBallClass};
pub use bullpen::{Arm, Bullpen};
pub use config::{BattedBallConfig, EngineConfig, FieldingConfig, PitchConfig, RunningConfig};
pub use fielding::{scorer_notation, Defense};
pub use game_loop::{
    simulate, simulate_batch, GameEngine, SimulationOptions, GHOST_RUNNER_FROM_INNING,
    REGULATION_INNINGS,
};
pub use rng::{commentary_rng, game_rng, GameRng};
pub use state::GameState;
