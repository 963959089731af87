use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// Invalid input received
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Game is not in a valid state for the operation
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// What happened during one simulation tick, for collaborators that
/// react to lifecycle events rather than polling state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Cells captured by a completed loop this tick
    pub cells_captured: usize,
    /// A terminal collision cost the player a life
    pub life_lost: bool,
    /// The capture threshold was reached and the level advanced
    pub leveled_up: bool,
    /// The round timer expired and a bounded enemy was added
    pub cube_spawned: bool,
    /// Lives ran out; the round state is now terminal
    pub game_over: bool,
}

/// Seam between a simulation and the loop hosting it: the host calls
/// `tick` at `tick_rate` cadence until `is_game_over`.
pub trait Game {
    fn tick(&mut self, dt_seconds: f32) -> TickResult;

    fn tick_rate(&self) -> Duration;

    fn is_game_over(&self) -> bool {
        false
    }
}
