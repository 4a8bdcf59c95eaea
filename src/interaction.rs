use regex::Regex;
use std::io::{self, BufRead};
use super::board::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Click(Point),
    Flag(Point),
    Hint
}

/// Parses `click ROW COL`, `flag ROW COL` or `hint`.
pub fn parse_action(input: &str) -> Option<Action>{
    let re = Regex::new(r"^\s*(?:(click|flag)\s+(\d+)\s+(\d+)|(hint))\s*$").expect("move pattern is valid");
    let cap = re.captures(input)?;
    if cap.get(4).is_some() {
        return Some(Action::Hint)
    }
    let row: usize = cap[2].parse().ok()?;
    let col: usize = cap[3].parse().ok()?;
    let point = Point(row, col);
    match &cap[1] {
        "click" => Some(Action::Click(point)),
        "flag" => Some(Action::Flag(point)),
        _ => None
    }
}

/// Prompts until a well-formed action is read. `None` at end of input.
pub fn read_action<B: BufRead>(input: &mut B) -> io::Result<Option<Action>> {
    loop {
        println!("Please input your move: click ROW COL | flag ROW COL | hint");
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None)
        }
        match parse_action(&line) {
            Some(action) => return Ok(Some(action)),
            None => println!("Must be of the form: click ROW COL, flag ROW COL or hint")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_action() {
        assert_eq!(parse_action("click 3 4\n"), Some(Action::Click(Point(3, 4))));
        assert_eq!(parse_action("flag 0 12"), Some(Action::Flag(Point(0, 12))));
        assert_eq!(parse_action("  hint  "), Some(Action::Hint));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_action("chord 1 1"), None);
        assert_eq!(parse_action("click 1"), None);
        assert_eq!(parse_action("click -1 2"), None);
        assert_eq!(parse_action("click 99999999999999999999999 1"), None);
    }

    #[test]
    fn read_action_skips_bad_lines() {
        let mut input = io::Cursor::new("nonsense\nflag 2 1\n");
        assert_eq!(read_action(&mut input).unwrap(), Some(Action::Flag(Point(2, 1))));
        assert_eq!(read_action(&mut input).unwrap(), None);
    }
}
