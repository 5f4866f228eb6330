use crate::connect_four::grid::{Column, Grid};
use crate::connect_four::player::{PlayerNum, Players};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("The game is over; no further moves are accepted")]
    GameOver,
}

/// What a single drop did to the game.
///
/// ColumnFull is a legal no-op rather than an error: the move is ignored and
/// the turn stays with the same player. Moves after the game has ended are
/// rejected with GameError instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DropOutcome {
    Placed { row: usize, column: usize },
    Win { player_num: PlayerNum },
    Draw,
    ColumnFull,
}

#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    players: Players,
    current_player: PlayerNum,
    game_over: bool,
}

impl Game {
    /// Player 1 always moves first.
    pub fn new(grid: Grid, players: Players) -> Self {
        Game {
            grid,
            players,
            current_player: PlayerNum::P1,
            game_over: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn current_player(&self) -> PlayerNum {
        self.current_player
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Drop the current player's piece into the given column.
    ///
    /// The placement, win check, draw check, and turn advance happen as one
    /// step; no partially-updated state is ever observable.
    pub fn drop_piece(&mut self, column: Column) -> Result<DropOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        let row = match self.grid.open_row(column) {
            Some(row) => row,
            None => return Ok(DropOutcome::ColumnFull),
        };
        self.grid.place(row, column, self.current_player);

        // The win check must come first: a piece that completes a line while
        // filling the last cell wins rather than draws.
        if self.grid.has_connect_four(self.current_player) {
            self.game_over = true;
            return Ok(DropOutcome::Win {
                player_num: self.current_player,
            });
        }
        if self.grid.is_full() {
            self.game_over = true;
            return Ok(DropOutcome::Draw);
        }
        self.current_player = self.current_player.other();
        Ok(DropOutcome::Placed {
            row,
            column: column.index(),
        })
    }
}
