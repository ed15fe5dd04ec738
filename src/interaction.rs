use regex::Regex;
use std::io::{self, BufRead, Write};
use super::board::Point;

pub const USAGE: &str = "Enter (S,x,y) location to open;\n (M,x,y) to mark as Doubt;\n (B,x,y) to mark as Bomb;\n (U,x,y) to unmark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Open(Point),
    FlagDoubt(Point),
    FlagBomb(Point),
    Unflag(Point)
}

impl ActionType {
    pub fn point(&self) -> Point {
        match *self {
            ActionType::Open(point)
            | ActionType::FlagDoubt(point)
            | ActionType::FlagBomb(point)
            | ActionType::Unflag(point) => point
        }
    }
}

/// Reads `LETTER ROW COLUMN`, e.g. `s 3 4` or `(B,0,2)`.
pub fn parse_action(input: &str) -> Option<ActionType> {
    let re = Regex::new(r"^\s*\(?\s*([smbuSMBU])\s*[\s,]\s*(\d+)\s*[\s,]\s*(\d+)\s*\)?\s*$")
        .expect("command pattern is valid");
    let cap = re.captures(input)?;
    let row: usize = cap[2].parse().ok()?;
    let column: usize = cap[3].parse().ok()?;
    extract_type_from_letter(&cap[1], Point(row, column))
}

fn extract_type_from_letter(letter: &str, point: Point) -> Option<ActionType> {
    match letter.to_ascii_lowercase().as_str() {
        "s" => Some(ActionType::Open(point)),
        "m" => Some(ActionType::FlagDoubt(point)),
        "b" => Some(ActionType::FlagBomb(point)),
        "u" => Some(ActionType::Unflag(point)),
        _ => None
    }
}

/// One line without its terminator, or `None` once the input is exhausted.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    match input.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_owned()))
    }
}

/// Asks for `label` until a non-negative whole number comes back.
pub fn prompt_number<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<Option<usize>> {
    loop {
        write!(output, "Enter No. of {}: ", label)?;
        output.flush()?;
        let line = match read_line(input)? {
            None => return Ok(None),
            Some(line) => line
        };
        match line.trim().parse() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => writeln!(output, "Must be a non-negative whole number")?
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_every_command_letter() {
        assert_eq!(parse_action("s 1 2"), Some(ActionType::Open(Point(1, 2))));
        assert_eq!(parse_action("m 0 0"), Some(ActionType::FlagDoubt(Point(0, 0))));
        assert_eq!(parse_action("b 3 9"), Some(ActionType::FlagBomb(Point(3, 9))));
        assert_eq!(parse_action("u 4 4"), Some(ActionType::Unflag(Point(4, 4))));
    }

    #[test]
    fn accepts_uppercase_commas_and_parentheses() {
        assert_eq!(parse_action("S,2,3"), Some(ActionType::Open(Point(2, 3))));
        assert_eq!(parse_action("(B, 10, 0)\n"), Some(ActionType::FlagBomb(Point(10, 0))));
        assert_eq!(parse_action("  u   5 6  "), Some(ActionType::Unflag(Point(5, 6))));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(parse_action(""), None);
        assert_eq!(parse_action("x 1 1"), None);
        assert_eq!(parse_action("s 1"), None);
        assert_eq!(parse_action("s -1 2"), None);
        assert_eq!(parse_action("s 1 2 3"), None);
        assert_eq!(parse_action("open 1 2"), None);
        assert_eq!(parse_action("s 1 99999999999999999999999999"), None);
    }

    #[test]
    fn action_exposes_its_point() {
        assert_eq!(ActionType::FlagDoubt(Point(7, 1)).point(), Point(7, 1));
    }

    #[test]
    fn read_line_strips_terminators() {
        let mut input = Cursor::new("s 1 1\r\nlast");
        assert_eq!(read_line(&mut input).unwrap(), Some(String::from("s 1 1")));
        assert_eq!(read_line(&mut input).unwrap(), Some(String::from("last")));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn prompt_number_retries_until_valid() {
        let mut input = Cursor::new("ten\n-3\n 12 \n");
        let mut output = Vec::new();
        let n = prompt_number(&mut input, &mut output, "Rows").unwrap();
        assert_eq!(n, Some(12));
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Enter No. of Rows: ").count(), 3);
        assert_eq!(output.matches("Must be a non-negative whole number").count(), 2);
    }

    #[test]
    fn prompt_number_gives_up_at_end_of_input() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(prompt_number(&mut input, &mut output, "Mines").unwrap(), None);
    }
}
