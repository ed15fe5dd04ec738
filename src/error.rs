use std::io;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("a board needs at least one row and one column, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cannot place {mines} mines on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },

    #[error("mine index {index} is outside a board of {cells} cells")]
    MineOutOfBounds { index: usize, cells: usize },

    #[error("mine index {index} was given more than once")]
    DuplicateMine { index: usize },

    #[error("location ({row}, {column}) is not on the board")]
    OutOfBounds { row: usize, column: usize },
}

/// Anything that can end a game loop early.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("board rejected a move: {0}")]
    Board(#[from] BoardError),

    #[error("could not talk to the player: {0}")]
    Io(#[from] io::Error),
}
