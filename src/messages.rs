use crate::connect_four::{Grid, Player, PlayerNum};
use serde::{Deserialize, Serialize};

/// A move request from a client: the column to drop a piece into.
#[derive(Serialize, Deserialize, Copy, Clone, Debug)]
pub struct RawMove {
    pub column: usize,
}

/// End-of-game outcome from a single client's point of view.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Response {
    /// The sender's color choice was stored; waiting on the other player.
    ColorAccepted { player_num: PlayerNum },
    /// The sender's color choice was refused and must be re-picked.
    ColorRejected { reason: String },
    /// Both colors are in; the game has begun and Player 1 is to move.
    GameStart {
        grid: Grid,
        player: Player,
        player_num: PlayerNum,
    },
    /// A piece landed; sent to both clients after every accepted placement.
    PiecePlaced {
        row: usize,
        column: usize,
        player_num: PlayerNum,
        grid: Grid,
    },
    /// The chosen column is full; the move was ignored and it is still the
    /// sender's turn.
    ColumnFull { column: usize },
    /// The move was refused without touching the game.
    MoveRejected { reason: String },
    /// The game ended; the grid shows the final position.
    GameEnd { outcome: Outcome, grid: Grid },
    /// Both players asked for another game; color selection is open again.
    SetupOpen,
}
