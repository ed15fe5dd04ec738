pub mod board;
pub mod config;
pub mod error;
pub mod interaction;

use std::io::{BufRead, Write};
use tracing::{debug, info};

use board::{Board, Point};
use error::GameError;
use interaction::ActionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    /// The input ran out before the game was decided.
    Abandoned
}

/// Plays one game on `board`, reading commands from `input` and drawing to
/// `output` until the player wins, opens a mine, or stops typing.
pub fn game_loop<R: BufRead, W: Write>(board: &mut Board, input: &mut R, output: &mut W) -> Result<Outcome, GameError> {
    let outcome = loop {
        writeln!(output, "Mines left: {}", board.remaining_mines())?;
        writeln!(output, "{}", board)?;
        writeln!(output, "{}", interaction::USAGE)?;

        let line = match interaction::read_line(input)? {
            Some(line) => line,
            None => break Outcome::Abandoned
        };
        let action = match interaction::parse_action(&line) {
            Some(action) => action,
            None => {
                writeln!(output, "Must be of the form: S|M|B|U ROW COLUMN")?;
                continue;
            }
        };
        let Point(row, column) = action.point();
        if !board.is_valid_location(row, column) {
            writeln!(output, "({}, {}) is not on the board", row, column)?;
            continue;
        }
        debug!(?action, "applying move");

        match action {
            ActionType::Open(_) => {
                if board.location_is_mine(row, column)? {
                    writeln!(output, "Busted")?;
                    writeln!(output, "{}", board.solution())?;
                    break Outcome::Lost;
                }
                board.open_location(row, column)?;
            }
            ActionType::FlagDoubt(_) => board.mark_as_flagged_doubt(row, column)?,
            ActionType::FlagBomb(_) => board.mark_as_flagged_bomb(row, column)?,
            ActionType::Unflag(_) => board.unmark_location(row, column)?
        }

        if board.only_mines_left() {
            writeln!(output, "Congratulations! You Won.")?;
            writeln!(output, "{}", board)?;
            writeln!(output, "{}", board.solution())?;
            break Outcome::Won;
        }
    };
    info!(?outcome, "game over");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(board: &mut Board, script: &str) -> (Outcome, String) {
        let mut input = Cursor::new(script.to_owned());
        let mut output = Vec::new();
        let outcome = game_loop(board, &mut input, &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn flood_fill_then_flag_wins() {
        let mut board = Board::from_mine_indices(3, 3, &[8]).unwrap();
        let (outcome, output) = play(&mut board, "s 0 0\nb 2 2\n");
        assert_eq!(outcome, Outcome::Won);
        assert!(output.contains("Congratulations! You Won."));
        assert!(output.contains("2 □ 1 ●"));
        assert!(output.contains("2 □ □ ☹"));
    }

    #[test]
    fn opening_a_mine_loses_without_touching_the_board() {
        let mut board = Board::from_mine_indices(3, 3, &[4]).unwrap();
        let (outcome, output) = play(&mut board, "S 1 1\ns 0 0\n");
        assert_eq!(outcome, Outcome::Lost);
        assert!(output.contains("Busted"));
        assert!(output.contains("1 □ ☹ □"));
        assert!(board.cells().all(|cell| !cell.is_open()));
    }

    #[test]
    fn running_out_of_input_abandons() {
        let mut board = Board::from_mine_indices(3, 3, &[4]).unwrap();
        let (outcome, _) = play(&mut board, "");
        assert_eq!(outcome, Outcome::Abandoned);
        let (outcome, _) = play(&mut board, "s 0 0\n");
        assert_eq!(outcome, Outcome::Abandoned);
        assert!(board.cell(0, 0).unwrap().is_open());
    }

    #[test]
    fn bad_commands_and_locations_are_reported() {
        let mut board = Board::from_mine_indices(3, 3, &[4]).unwrap();
        let (outcome, output) = play(&mut board, "dig here\ns 3 0\ns 0 7\n");
        assert_eq!(outcome, Outcome::Abandoned);
        assert!(output.contains("Must be of the form"));
        assert!(output.contains("(3, 0) is not on the board"));
        assert!(output.contains("(0, 7) is not on the board"));
        assert!(board.cells().all(|cell| !cell.is_open()));
    }

    #[test]
    fn flags_are_applied_and_cleared() {
        let mut board = Board::from_mine_indices(3, 3, &[4]).unwrap();
        let (_, output) = play(&mut board, "m 0 0\nb 0 1\n");
        assert!(board.cell(0, 0).unwrap().is_flagged_doubt());
        assert!(board.cell(0, 1).unwrap().is_flagged_bomb());
        assert!(output.contains("0 x ● ■"));
        assert!(output.contains("Mines left: 0"));

        play(&mut board, "u 0 0\nu 0 1\n");
        assert!(board.cells().all(|cell| !cell.is_flagged()));
    }

    #[test]
    fn flagged_cells_stay_closed_when_opened() {
        let mut board = Board::from_mine_indices(3, 3, &[8]).unwrap();
        let (outcome, _) = play(&mut board, "b 0 0\ns 0 0\n");
        assert_eq!(outcome, Outcome::Abandoned);
        assert!(!board.cell(0, 0).unwrap().is_open());
    }
}
