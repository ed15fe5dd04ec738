use std::fmt;

use itertools::{iproduct, Itertools};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{thread_rng, Rng, SeedableRng};
use tracing::debug;

use super::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagState {
    None,
    Doubt,
    Bomb
}

impl Default for FlagState {
    fn default() -> FlagState {
        FlagState::None
    }
}

/// What a rendering layer should draw for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Covered,
    Doubt,
    Bomb,
    Empty,
    Count(usize)
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Covered => write!(f, "■"),
            Symbol::Doubt => write!(f, "x"),
            Symbol::Bomb => write!(f, "●"),
            Symbol::Empty => write!(f, "□"),
            Symbol::Count(n) => write!(f, "{}", n)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    point: Point,
    is_mine: bool,
    is_open: bool,
    flag: FlagState
}

impl Cell {
    fn create(point: Point, is_mine: bool) -> Cell {
        Cell{point, is_mine, is_open: false, flag: FlagState::default()}
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn row(&self) -> usize {
        self.point.0
    }

    pub fn column(&self) -> usize {
        self.point.1
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn flag(&self) -> FlagState {
        self.flag
    }

    pub fn is_flagged(&self) -> bool {
        self.flag != FlagState::None
    }

    pub fn is_flagged_bomb(&self) -> bool {
        self.flag == FlagState::Bomb
    }

    pub fn is_flagged_doubt(&self) -> bool {
        self.flag == FlagState::Doubt
    }

    // open or claimed as a mine; the game is won once every cell is settled
    fn is_settled(&self) -> bool {
        self.is_open || self.is_flagged_bomb()
    }
}

/// A `(row, column)` location, 0-indexed.
#[derive(Debug, Eq, PartialEq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    rows: usize,
    columns: usize
}

impl BoardSize {
    pub fn new(rows: usize, columns: usize) -> Result<BoardSize, BoardError> {
        match rows.checked_mul(columns) {
            Some(area) if area > 0 => Ok(BoardSize{rows, columns}),
            _ => Err(BoardError::InvalidDimensions{rows, columns})
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.0 < self.rows && point.1 < self.columns
    }

    /// Row-major order, matching the layout of the board's cells.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let columns = self.columns;
        (0..self.area()).map(move |x| Point(x / columns, x % columns))
    }

    pub fn point_from_index(&self, x: usize) -> Option<Point> {
        if x >= self.area() {
            return None
        }
        Some(Point(x / self.columns, x % self.columns))
    }

    pub fn index_of(&self, point: &Point) -> Option<usize> {
        if !self.contains(point) {
            return None
        }
        Some(point.0 * self.columns + point.1)
    }

    /// The up-to-8 in-bounds neighbours of `point`, without wraparound.
    pub fn neighbor_points(&self, point: &Point) -> Vec<Point> {
        iproduct!(-1i64..=1, -1i64..=1)
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .map(|(dr, dc)| (point.0 as i64 + dr, point.1 as i64 + dc))
            .filter(|&(r, c)| r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.columns)
            .map(|(r, c)| Point(r as usize, c as usize))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
    mine_count: usize
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, |point| self.symbol_at(point).to_string())
    }
}

/// Every mine and every safe cell laid bare, for the end of a game.
pub struct Solution<'a> {
    board: &'a Board
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.board.render(f, |point| {
            match self.board.retrieve_cell(point).is_mine {
                true => String::from("☹"),
                false => String::from("□")
            }
        })
    }
}

impl Board {
    pub fn new(rows: usize, columns: usize, mine_count: usize) -> Result<Board, BoardError> {
        Board::with_rng(rows, columns, mine_count, &mut thread_rng())
    }

    /// Same placement every time for a given seed.
    pub fn with_seed(rows: usize, columns: usize, mine_count: usize, seed: u64) -> Result<Board, BoardError> {
        Board::with_rng(rows, columns, mine_count, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(rows: usize, columns: usize, mine_count: usize, rng: &mut R) -> Result<Board, BoardError> {
        let size = BoardSize::new(rows, columns)?;
        if mine_count > size.area() {
            return Err(BoardError::TooManyMines{mines: mine_count, cells: size.area()})
        }

        let mut layout = vec![false; size.area()];
        for x in index::sample(rng, size.area(), mine_count) {
            layout[x] = true;
        }
        debug!(rows, columns, mines = mine_count, "placed mines at random");
        Ok(Board::from_layout(size, layout))
    }

    /// Builds a board with mines at exactly the given row-major indices.
    pub fn from_mine_indices(rows: usize, columns: usize, mines: &[usize]) -> Result<Board, BoardError> {
        let size = BoardSize::new(rows, columns)?;
        let mut layout = vec![false; size.area()];
        for &x in mines {
            let slot = layout.get_mut(x)
                .ok_or(BoardError::MineOutOfBounds{index: x, cells: size.area()})?;
            if *slot {
                return Err(BoardError::DuplicateMine{index: x})
            }
            *slot = true;
        }
        debug!(rows, columns, mines = mines.len(), "placed mines by index");
        Ok(Board::from_layout(size, layout))
    }

    fn from_layout(size: BoardSize, layout: Vec<bool>) -> Board {
        let cells: Vec<Cell> = size.points()
            .zip(layout)
            .map(|(point, is_mine)| Cell::create(point, is_mine))
            .collect();
        let mine_count = cells.iter().filter(|cell| cell.is_mine).count();
        Board {size, cells, mine_count}
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    pub fn columns(&self) -> usize {
        self.size.columns
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell, BoardError> {
        let point = self.checked_point(row, column)?;
        Ok(self.retrieve_cell(&point))
    }

    /// Mines not yet claimed by a bomb flag. Goes negative when the player
    /// over-flags.
    pub fn remaining_mines(&self) -> i64 {
        let flagged = self.cells.iter().filter(|cell| cell.is_flagged_bomb()).count();
        self.mine_count as i64 - flagged as i64
    }

    pub fn is_valid_location(&self, row: usize, column: usize) -> bool {
        self.size.contains(&Point(row, column))
    }

    pub fn location_is_mine(&self, row: usize, column: usize) -> Result<bool, BoardError> {
        Ok(self.cell(row, column)?.is_mine)
    }

    pub fn count_mines_around(&self, row: usize, column: usize) -> Result<usize, BoardError> {
        let point = self.checked_point(row, column)?;
        Ok(self.mined_neighbors(&point))
    }

    /// Opens a cell and, when it touches no mines, keeps opening outward
    /// until the zero region is bordered by numbered cells. Open and
    /// flagged cells are left alone. Returns how many cells were opened.
    ///
    /// Whether the cell was a mine is not checked here.
    pub fn open_location(&mut self, row: usize, column: usize) -> Result<usize, BoardError> {
        let start = self.checked_point(row, column)?;
        let mut pending = vec![start];
        let mut opened = 0;

        while let Some(point) = pending.pop() {
            let cell = self.retrieve_cell_mutable(&point);
            if cell.is_open || cell.is_flagged() {
                continue;
            }
            cell.is_open = true;
            opened += 1;

            if self.mined_neighbors(&point) == 0 {
                let closed = self.size.neighbor_points(&point).into_iter()
                    .filter(|neighbor| {
                        let neighbor = self.retrieve_cell(neighbor);
                        !neighbor.is_open && !neighbor.is_flagged()
                    });
                pending.extend(closed);
            }
        }
        debug!(row, column, opened, "opened location");
        Ok(opened)
    }

    pub fn mark_as_flagged_bomb(&mut self, row: usize, column: usize) -> Result<(), BoardError> {
        self.set_flag(row, column, FlagState::Bomb)
    }

    pub fn mark_as_flagged_doubt(&mut self, row: usize, column: usize) -> Result<(), BoardError> {
        self.set_flag(row, column, FlagState::Doubt)
    }

    pub fn unmark_location(&mut self, row: usize, column: usize) -> Result<(), BoardError> {
        self.set_flag(row, column, FlagState::None)
    }

    fn set_flag(&mut self, row: usize, column: usize, flag: FlagState) -> Result<(), BoardError> {
        let point = self.checked_point(row, column)?;
        let cell = self.retrieve_cell_mutable(&point);
        if !cell.is_open {
            cell.flag = flag;
        }
        Ok(())
    }

    pub fn only_mines_left(&self) -> bool {
        self.cells.iter().all(Cell::is_settled)
    }

    pub fn display_symbol(&self, row: usize, column: usize) -> Result<Symbol, BoardError> {
        let point = self.checked_point(row, column)?;
        Ok(self.symbol_at(&point))
    }

    pub fn solution(&self) -> Solution<'_> {
        Solution{board: self}
    }

    fn symbol_at(&self, point: &Point) -> Symbol {
        let cell = self.retrieve_cell(point);
        match (cell.is_open, cell.flag) {
            (false, FlagState::None) => Symbol::Covered,
            (false, FlagState::Doubt) => Symbol::Doubt,
            (false, FlagState::Bomb) => Symbol::Bomb,
            (true, _) => match self.mined_neighbors(point) {
                0 => Symbol::Empty,
                n => Symbol::Count(n)
            }
        }
    }

    fn mined_neighbors(&self, point: &Point) -> usize {
        self.size.neighbor_points(point).iter()
            .filter(|neighbor| self.retrieve_cell(neighbor).is_mine)
            .count()
    }

    fn checked_point(&self, row: usize, column: usize) -> Result<Point, BoardError> {
        let point = Point(row, column);
        match self.size.contains(&point) {
            true => Ok(point),
            false => Err(BoardError::OutOfBounds{row, column})
        }
    }

    // callers only pass points that are known to be on the board
    fn retrieve_cell(&self, point: &Point) -> &Cell {
        &self.cells[point.0 * self.size.columns + point.1]
    }

    fn retrieve_cell_mutable(&mut self, point: &Point) -> &mut Cell {
        &mut self.cells[point.0 * self.size.columns + point.1]
    }

    fn render<F>(&self, f: &mut fmt::Formatter<'_>, symbol: F) -> fmt::Result
        where F: Fn(&Point) -> String
    {
        let label_width = (self.size.rows - 1).to_string().len();
        let cell_width = (self.size.columns - 1).to_string().len();

        let header = (0..self.size.columns)
            .map(|column| format!("{:>w$}", column, w = cell_width))
            .join(" ");
        writeln!(f, "{:w$} {}", "", header, w = label_width)?;
        for row in 0..self.size.rows {
            let line = (0..self.size.columns)
                .map(|column| format!("{:>w$}", symbol(&Point(row, column)), w = cell_width))
                .join(" ");
            writeln!(f, "{:>w$} {}", row, line, w = label_width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
use proptest::prelude::*;
