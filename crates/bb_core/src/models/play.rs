use super::bases::Bases;
use super::events::{Base, BattedBall, Count, PlayEvent};
use super::player::{PlayerId, Position};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    pub fn label(&self) -> &'static str {
        match self {
            Half::Top => "Top",
            Half::Bottom => "Bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Score {
    pub away: u32,
    pub home: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CreditKind {
    Putout,
    Assist,
    FieldingError,
}

/// Fielding credit for one defender on one runner's movement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credit {
    pub player: PlayerId,
    pub position: Position,
    pub kind: CreditKind,
}

impl Credit {
    pub fn putout(player: &PlayerId, position: Position) -> Self {
        Self { player: player.clone(), position, kind: CreditKind::Putout }
    }

    pub fn assist(player: &PlayerId, position: Position) -> Self {
        Self { player: player.clone(), position, kind: CreditKind::Assist }
    }

    pub fn error(player: &PlayerId, position: Position) -> Self {
        Self { player: player.clone(), position, kind: CreditKind::FieldingError }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementCause {
    Play,
    StolenBase,
    CaughtStealing,
    WildPitch,
    PassedBall,
}

/// Where one runner (or the batter) went on a play.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerMovement {
    pub runner: PlayerId,
    /// `Base::Home` for the batter.
    pub start: Base,
    /// `None` when the runner was put out.
    pub end: Option<Base>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_base: Option<Base>,
    pub is_out: bool,
    pub scored: bool,
    pub rbi: bool,
    pub cause: MovementCause,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credits: Vec<Credit>,
}

/// How an at-bat ended, with the data that only makes sense for that ending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AtBatOutcome {
    Strikeout { looking: bool },
    StrikeoutDoublePlay { looking: bool, runner: PlayerId, base: Base },
    Walk,
    HitByPitch,
    Single { ball: BattedBall },
    Double { ball: BattedBall },
    Triple { ball: BattedBall },
    HomeRun { ball: BattedBall },
    Groundout { ball: BattedBall, fielder: Position },
    Flyout { ball: BattedBall, fielder: Position },
    Lineout { ball: BattedBall, fielder: Position },
    PopOut { ball: BattedBall, fielder: Position },
    Forceout { ball: BattedBall, fielder: Position, runner: PlayerId },
    DoublePlay { ball: BattedBall, route: Vec<Position>, runner: PlayerId },
    SacrificeBunt { ball: BattedBall, fielder: Position },
    BuntGroundOut { ball: BattedBall, fielder: Position },
    SacFly { ball: BattedBall, fielder: Position, runner: PlayerId },
    FieldError { ball: BattedBall, fielder: Position },
    CaughtStealing { runner: PlayerId, base: Base },
    /// The winning run scored on a wild pitch or passed ball in the bottom of the ninth
    /// or later, ending the game before the plate appearance finished.
    WalkOffMisplay { cause: MovementCause },
}

impl AtBatOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AtBatOutcome::Strikeout { .. } => "Strikeout",
            AtBatOutcome::StrikeoutDoublePlay { .. } => "Strikeout Double Play",
            AtBatOutcome::Walk => "Walk",
            AtBatOutcome::HitByPitch => "Hit By Pitch",
            AtBatOutcome::Single { .. } => "Single",
            AtBatOutcome::Double { .. } => "Double",
            AtBatOutcome::Triple { .. } => "Triple",
            AtBatOutcome::HomeRun { .. } => "Home Run",
            AtBatOutcome::Groundout { .. } => "Groundout",
            AtBatOutcome::Flyout { .. } => "Flyout",
            AtBatOutcome::Lineout { .. } => "Lineout",
            AtBatOutcome::PopOut { .. } => "Pop Out",
            AtBatOutcome::Forceout { .. } => "Forceout",
            AtBatOutcome::DoublePlay { .. } => "Double Play",
            AtBatOutcome::SacrificeBunt { .. } => "Sacrifice Bunt",
            AtBatOutcome::BuntGroundOut { .. } => "Bunt Ground Out",
            AtBatOutcome::SacFly { .. } => "Sac Fly",
            AtBatOutcome::FieldError { .. } => "Field Error",
            AtBatOutcome::CaughtStealing { .. } => "Caught Stealing",
            AtBatOutcome::WalkOffMisplay { cause: MovementCause::PassedBall } => "Walk-off Passed Ball",
            AtBatOutcome::WalkOffMisplay { .. } => "Walk-off Wild Pitch",
        }
    }

    pub fn batted_ball(&self) -> Option<&BattedBall> {
        match self {
            AtBatOutcome::Single { ball }
            | AtBatOutcome::Double { ball }
            | AtBatOutcome::Triple { ball }
            | AtBatOutcome::HomeRun { ball }
            | AtBatOutcome::Groundout { ball, .. }
            | AtBatOutcome::Flyout { ball, .. }
            | AtBatOutcome::Lineout { ball, .. }
            | AtBatOutcome::PopOut { ball, .. }
            | AtBatOutcome::Forceout { ball, .. }
            | AtBatOutcome::DoublePlay { ball, .. }
            | AtBatOutcome::SacrificeBunt { ball, .. }
            | AtBatOutcome::BuntGroundOut { ball, .. }
            | AtBatOutcome::SacFly { ball, .. }
            | AtBatOutcome::FieldError { ball, .. } => Some(ball),
            _ => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            AtBatOutcome::Single { .. }
                | AtBatOutcome::Double { .. }
                | AtBatOutcome::Triple { .. }
                | AtBatOutcome::HomeRun { .. }
        )
    }

    pub fn is_strikeout(&self) -> bool {
        matches!(self, AtBatOutcome::Strikeout { .. } | AtBatOutcome::StrikeoutDoublePlay { .. })
    }

    /// A caught stealing that ends the half-inning or a walk-off misplay interrupts the
    /// plate appearance; every other ending completes one.
    pub fn completes_plate_appearance(&self) -> bool {
        !matches!(self, AtBatOutcome::CaughtStealing { .. } | AtBatOutcome::WalkOffMisplay { .. })
    }

    pub fn is_sacrifice(&self) -> bool {
        matches!(self, AtBatOutcome::SacrificeBunt { .. } | AtBatOutcome::SacFly { .. })
    }

    /// Plate appearances that count as official at-bats.
    pub fn is_official_at_bat(&self) -> bool {
        self.completes_plate_appearance()
            && !self.is_sacrifice()
            && !matches!(self, AtBatOutcome::Walk | AtBatOutcome::HitByPitch)
    }
}

/// Game situation at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Situation {
    pub outs: u8,
    pub bases: Bases,
    pub score: Score,
}

/// Everything that happened in one at-bat. Immutable once appended to the game log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayRecord {
    pub at_bat_index: u32,
    pub play_id: Uuid,
    pub inning: u32,
    pub half: Half,
    pub batter: PlayerId,
    pub pitcher: PlayerId,
    pub before: Situation,
    /// Count when the at-bat ended.
    pub count: Count,
    pub outcome: AtBatOutcome,
    /// Scorer's shorthand such as `6-4-3`, `F8` or `E5`.
    pub notation: String,
    pub events: Vec<PlayEvent>,
    pub movements: Vec<RunnerMovement>,
    pub runs: u32,
    pub rbi: u32,
    pub after: Situation,
}

impl PlayRecord {
    pub fn outs_recorded(&self) -> u8 {
        self.after.outs - self.before.outs
    }

    pub fn pitch_count(&self) -> usize {
        self.events.iter().filter(|e| e.as_pitch().is_some()).count()
    }

    pub fn scoring_movements(&self) -> impl Iterator<Item = &RunnerMovement> {
        self.movements.iter().filter(|m| m.scored)
    }
}
