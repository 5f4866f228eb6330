mod game;
mod grid;
mod player;

pub use game::{DropOutcome, Game, GameError};
pub use grid::{Cell, Column, ColumnError, Grid, GridError, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use player::{Player, PlayerColor, PlayerNum, Players, SetupError};
