use crate::connect_four::player::PlayerNum;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 7;

pub const MAX_GRID_WIDTH: usize = 26;
pub const MAX_GRID_HEIGHT: usize = 26;

// Number of cells a winning line spans
pub const LINE_LEN: usize = 4;

#[derive(Debug)]
pub enum Dimension {
    Width(usize),
    Height(usize),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Width(w) => write!(f, "width {}", w),
            Dimension::Height(h) => write!(f, "height {}", h),
        }
    }
}

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Grid with no rows requested")]
    NoRows,
    #[error("Grid with no columns requested")]
    NoColumns,
    #[error("Grid of {dimension} exceeds the maximum of {max}")]
    TooLarge {
        dimension: Dimension,
        max: Dimension,
    },
}

#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Column index {index} exceeds grid {width}")]
    OutOfBounds { index: usize, width: Dimension },
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Piece { player_num: PlayerNum },
}

impl Cell {
    pub fn is_piece(&self, num: PlayerNum) -> bool {
        match self {
            Cell::Piece { player_num } => *player_num == num,
            Cell::Empty => false,
        }
    }
}

/// A column index validated against a grid's width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Column(usize);

impl Column {
    pub fn new(grid: &Grid, index: usize) -> Result<Self, ColumnError> {
        let width = grid.width();
        if index >= width {
            return Err(ColumnError::OutOfBounds {
                index,
                width: Dimension::Width(width),
            });
        }
        Ok(Column(index))
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// The playing grid: `height` rows of `width` cells, row 0 at the top.
/// Pieces dropped into a column stack from the bottom row upward.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Grid(Vec<Vec<Cell>>);

impl Default for Grid {
    fn default() -> Self {
        Grid(vec![vec![Cell::Empty; DEFAULT_WIDTH]; DEFAULT_HEIGHT])
    }
}

impl Grid {
    // Ensure that the requested dimensions meet the following criteria:
    // - at least one row and one column
    // - neither dimension exceeds its maximum
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        if height == 0 {
            return Err(GridError::NoRows);
        }
        if width == 0 {
            return Err(GridError::NoColumns);
        }
        if height > MAX_GRID_HEIGHT {
            return Err(GridError::TooLarge {
                dimension: Dimension::Height(height),
                max: Dimension::Height(MAX_GRID_HEIGHT),
            });
        }
        if width > MAX_GRID_WIDTH {
            return Err(GridError::TooLarge {
                dimension: Dimension::Width(width),
                max: Dimension::Width(MAX_GRID_WIDTH),
            });
        }
        Ok(Grid(vec![vec![Cell::Empty; width]; height]))
    }

    pub fn height(&self) -> usize {
        self.0.len()
    }

    pub fn width(&self) -> usize {
        self.0[0].len()
    }

    pub fn get(&self) -> &Vec<Vec<Cell>> {
        &self.0
    }

    /// The lowest empty row in the given column, or None when the column
    /// is full.
    pub fn open_row(&self, column: Column) -> Option<usize> {
        (0..self.height())
            .rev()
            .find(|&row| self.0[row][column.index()] == Cell::Empty)
    }

    // Callers find the target row via open_row, so a cell is written at
    // most once and never reverts to Empty.
    pub fn place(&mut self, row: usize, column: Column, player_num: PlayerNum) {
        self.0[row][column.index()] = Cell::Piece { player_num };
    }

    pub fn is_full(&self) -> bool {
        self.0
            .iter()
            .all(|row| row.iter().all(|cell| *cell != Cell::Empty))
    }

    /// Whether the given player owns four cells in a row anywhere on the
    /// grid: horizontally, vertically, or along either diagonal.
    pub fn has_connect_four(&self, player_num: PlayerNum) -> bool {
        // Row offset and column offset per step along a candidate line
        const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        for row in 0..self.height() {
            for col in 0..self.width() {
                for (row_step, col_step) in DIRECTIONS {
                    if self.is_line(player_num, row as i32, col as i32, row_step, col_step) {
                        return true;
                    }
                }
            }
        }
        false
    }

    // All four cells from the anchor along the direction are in bounds and
    // owned by the player
    fn is_line(&self, player_num: PlayerNum, row: i32, col: i32, row_step: i32, col_step: i32) -> bool {
        (0..LINE_LEN as i32).all(|step| {
            self.try_cell(row + step * row_step, col + step * col_step)
                .map_or(false, |cell| cell.is_piece(player_num))
        })
    }

    // Need to take signed integers because line probes may run off the grid
    fn try_cell(&self, row: i32, col: i32) -> Option<Cell> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        let cells = self.0.get(row)?;
        cells.get(col).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(grid: &Grid, index: usize) -> Column {
        Column::new(grid, index).unwrap()
    }

    #[test]
    fn test_construct_grid() {
        assert!(Grid::new(0, 7).is_err());
        assert!(Grid::new(6, 0).is_err());
        assert!(Grid::new(27, 7).is_err());
        assert!(Grid::new(6, 27).is_err());

        let min_valid_grid = Grid::new(1, 1);
        assert!(min_valid_grid.is_ok());

        let grid = Grid::new(6, 7).unwrap();
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.width(), 7);
        assert!(grid
            .get()
            .iter()
            .all(|row| row.iter().all(|cell| *cell == Cell::Empty)));

        let default_grid = Grid::default();
        assert_eq!(default_grid.height(), DEFAULT_HEIGHT);
        assert_eq!(default_grid.width(), DEFAULT_WIDTH);
    }

    #[test]
    fn test_construct_column() {
        let grid = Grid::new(6, 7).unwrap();
        assert!(Column::new(&grid, 0).is_ok());
        assert!(Column::new(&grid, 6).is_ok());
        assert!(Column::new(&grid, 7).is_err());
        assert!(Column::new(&grid, usize::MAX).is_err());
    }

    #[test]
    fn test_open_row_stacks_from_the_bottom() {
        let mut grid = Grid::new(6, 7).unwrap();
        let col = column(&grid, 3);
        assert_eq!(grid.open_row(col), Some(5));
        grid.place(5, col, PlayerNum::P1);
        assert_eq!(grid.open_row(col), Some(4));
        grid.place(4, col, PlayerNum::P2);
        assert_eq!(grid.open_row(col), Some(3));
        // Other columns are unaffected
        assert_eq!(grid.open_row(column(&grid, 2)), Some(5));
    }

    #[test]
    fn test_open_row_full_column() {
        let mut grid = Grid::new(6, 7).unwrap();
        let col = column(&grid, 0);
        for row in (0..6).rev() {
            grid.place(row, col, PlayerNum::P1);
        }
        assert_eq!(grid.open_row(col), None);
    }

    #[test]
    fn test_is_full() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(!grid.is_full());
        grid.place(1, column(&grid, 0), PlayerNum::P1);
        grid.place(0, column(&grid, 0), PlayerNum::P2);
        grid.place(1, column(&grid, 1), PlayerNum::P1);
        assert!(!grid.is_full());
        grid.place(0, column(&grid, 1), PlayerNum::P2);
        assert!(grid.is_full());
    }

    #[test]
    fn test_horizontal_line() {
        let mut grid = Grid::new(6, 7).unwrap();
        for index in 2..5 {
            grid.place(5, column(&grid, index), PlayerNum::P1);
        }
        assert!(!grid.has_connect_four(PlayerNum::P1));
        grid.place(5, column(&grid, 5), PlayerNum::P1);
        assert!(grid.has_connect_four(PlayerNum::P1));
        assert!(!grid.has_connect_four(PlayerNum::P2));
    }

    #[test]
    fn test_vertical_line() {
        let mut grid = Grid::new(6, 7).unwrap();
        let col = column(&grid, 6);
        for row in 3..6 {
            grid.place(row, col, PlayerNum::P2);
        }
        assert!(!grid.has_connect_four(PlayerNum::P2));
        grid.place(2, col, PlayerNum::P2);
        assert!(grid.has_connect_four(PlayerNum::P2));
        assert!(!grid.has_connect_four(PlayerNum::P1));
    }

    #[test]
    fn test_diagonal_down_right_line() {
        let mut grid = Grid::new(6, 7).unwrap();
        grid.place(1, column(&grid, 0), PlayerNum::P1);
        grid.place(2, column(&grid, 1), PlayerNum::P1);
        grid.place(3, column(&grid, 2), PlayerNum::P1);
        assert!(!grid.has_connect_four(PlayerNum::P1));
        grid.place(4, column(&grid, 3), PlayerNum::P1);
        assert!(grid.has_connect_four(PlayerNum::P1));
    }

    #[test]
    fn test_diagonal_down_left_line() {
        let mut grid = Grid::new(6, 7).unwrap();
        grid.place(1, column(&grid, 6), PlayerNum::P2);
        grid.place(2, column(&grid, 5), PlayerNum::P2);
        grid.place(3, column(&grid, 4), PlayerNum::P2);
        assert!(!grid.has_connect_four(PlayerNum::P2));
        grid.place(4, column(&grid, 3), PlayerNum::P2);
        assert!(grid.has_connect_four(PlayerNum::P2));
    }

    #[test]
    fn test_no_line_across_mixed_pieces() {
        let mut grid = Grid::new(6, 7).unwrap();
        // Three in a row broken by the opponent on both sides
        grid.place(5, column(&grid, 0), PlayerNum::P2);
        grid.place(5, column(&grid, 1), PlayerNum::P1);
        grid.place(5, column(&grid, 2), PlayerNum::P1);
        grid.place(5, column(&grid, 3), PlayerNum::P1);
        grid.place(5, column(&grid, 4), PlayerNum::P2);
        assert!(!grid.has_connect_four(PlayerNum::P1));
        assert!(!grid.has_connect_four(PlayerNum::P2));
    }

    #[test]
    fn test_line_never_wraps_around_the_edge() {
        let mut grid = Grid::new(6, 7).unwrap();
        // Two pieces at the right edge and two at the left of the next row
        grid.place(5, column(&grid, 5), PlayerNum::P1);
        grid.place(5, column(&grid, 6), PlayerNum::P1);
        grid.place(4, column(&grid, 0), PlayerNum::P1);
        grid.place(4, column(&grid, 1), PlayerNum::P1);
        assert!(!grid.has_connect_four(PlayerNum::P1));
    }
}
