use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use super::board::Board;
use super::error::BoardError;
use super::interaction::prompt_number;

/// Environment variable consulted for a seed when none was passed.
pub const SEED_VAR: &str = "MINESWEEPER_SEED";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("expected ROWS COLUMNS MINES [SEED], got {0} arguments")]
    WrongArgumentCount(usize),

    #[error("{name} must be a non-negative whole number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub mines: usize,
    pub seed: Option<u64>
}

impl GameConfig {
    /// `Ok(None)` when no arguments were given, so the caller can fall
    /// back to prompting.
    pub fn from_args<I, S>(args: I) -> Result<Option<GameConfig>, ConfigError>
        where I: IntoIterator<Item = S>, S: AsRef<str>
    {
        let args: Vec<S> = args.into_iter().collect();
        match args.len() {
            0 => return Ok(None),
            3 | 4 => {},
            n => return Err(ConfigError::WrongArgumentCount(n))
        }

        let rows = parse_number("ROWS", args[0].as_ref())?;
        let columns = parse_number("COLUMNS", args[1].as_ref())?;
        let mines = parse_number("MINES", args[2].as_ref())?;
        let seed = match args.get(3) {
            Some(seed) => Some(parse_number("SEED", seed.as_ref())?),
            None => None
        };
        Ok(Some(GameConfig{rows, columns, mines, seed}))
    }

    pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<GameConfig>> {
        let mut numbers = Vec::with_capacity(3);
        for label in ["Rows", "Columns", "Mines"].iter() {
            match prompt_number(input, output, label)? {
                Some(n) => numbers.push(n),
                None => return Ok(None)
            }
        }
        Ok(Some(GameConfig{rows: numbers[0], columns: numbers[1], mines: numbers[2], seed: None}))
    }

    pub fn with_seed_from_env(self) -> GameConfig {
        self.with_seed_from(env::var(SEED_VAR).ok())
    }

    fn with_seed_from(mut self, value: Option<String>) -> GameConfig {
        if self.seed.is_some() {
            return self
        }
        if let Some(value) = value {
            match value.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => warn!(%value, "ignoring unparsable {}", SEED_VAR)
            }
        }
        self
    }

    pub fn build_board(&self) -> Result<Board, BoardError> {
        match self.seed {
            Some(seed) => Board::with_seed(self.rows, self.columns, self.mines, seed),
            None => Board::new(self.rows, self.columns, self.mines)
        }
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber{name, value: value.to_owned()})
}
