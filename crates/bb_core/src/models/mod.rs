pub mod bases;
pub mod events;
pub mod game_result;
pub mod play;
pub mod player;
pub mod stats;
pub mod team;

pub use bases::Bases;
pub use events::{ActionEvent, Base, BattedBall, Count, PitchCall, PitchEvent, PlayEvent};
pub use game_result::{GameEnd, GameResult, Linescore};
pub use play::{
    AtBatOutcome, Credit, CreditKind, Half, MovementCause, PlayRecord, RunnerMovement, Score,
    Situation,
};
pub use player::{
    BattingProfile, PitchSpec, PitchType, PitcherRole, PitchingProfile, Player, PlayerId, Position,
};
pub use stats::{BattingLine, FieldingLine, PitchingLine, PlayerGameStats, TeamTotals};
pub use team::{validate_matchup, Team, TeamSide, LINEUP_SIZE};
