// Rejection reasons for player-driven mutations.
//
// Each player action (`place_building`, `clear_tile`, `claim_mission_reward`
// in `sim.rs`) returns its own error enum so callers can match exhaustively
// on exactly the failures that action can produce. A rejected action leaves
// the state untouched. Messages are short tags; user-facing wording belongs
// to the presentation layer.

use thiserror::Error;

/// Why a building could not be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("tile is outside the campus grid")]
    OutOfBounds,
    #[error("building cannot be placed directly")]
    NotPlaceable,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("tile is occupied")]
    TileOccupied,
    #[error("tile is protected")]
    TileProtected,
    #[error("building unlocks on day {unlock_day}")]
    BuildingLocked { unlock_day: u32 },
}

/// Why a tile could not be cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ClearError {
    #[error("tile is outside the campus grid")]
    OutOfBounds,
    #[error("tile is empty")]
    TileEmpty,
    #[error("tile is protected")]
    TileProtected,
}

/// Why a mission reward could not be claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("no active mission")]
    NoActiveMission,
    #[error("mission not completed")]
    MissionNotCompleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_message_names_the_day() {
        let err = PlacementError::BuildingLocked { unlock_day: 730 };
        assert_eq!(err.to_string(), "building unlocks on day 730");
    }
}
