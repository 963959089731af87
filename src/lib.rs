pub mod game;
pub mod games;

pub use game::traits::{Game, GameError, TickResult};
pub use games::xonix::{
    CellState, Direction, Enemy, EnemyKind, GridPos, RoundState, XonixConfig, XonixGame,
};
