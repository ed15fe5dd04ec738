use std::env;
use std::io;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use minesweeper_board::config::GameConfig;
use minesweeper_board::{game_loop, Outcome};

fn main() -> Result<()> {
    // the board goes to stdout, so logs stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let config = match GameConfig::from_args(env::args().skip(1)).context("reading command-line arguments")? {
        Some(config) => config,
        None => match GameConfig::prompt(&mut input, &mut output).context("reading board settings")? {
            Some(config) => config,
            None => return Ok(())
        }
    };
    let config = config.with_seed_from_env();

    let mut board = config.build_board()
        .with_context(|| format!("cannot build a {}x{} board with {} mines", config.rows, config.columns, config.mines))?;
    info!(rows = config.rows, columns = config.columns, mines = config.mines, seed = ?config.seed, "starting game");

    match game_loop(&mut board, &mut input, &mut output).context("playing the game")? {
        Outcome::Won | Outcome::Lost => {},
        Outcome::Abandoned => println!("Bye.")
    }
    Ok(())
}
