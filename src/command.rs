//! Line commands for the headless runner.

use sandwich_stack::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Lift the stack at `from` onto `to`, then settle
    Move { from: Coord, to: Coord },
    Restart,
    NextLevel,
    Json,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    ///
    /// - `r1 c1 r2 c2`: move
    /// - `r` / `restart`, `n` / `next`, `j` / `json`, `h` / `help`, `q` / `quit`
    pub fn parse(line: &str) -> Option<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [word] => match word.to_lowercase().as_str() {
                "r" | "restart" => Some(Command::Restart),
                "n" | "next" => Some(Command::NextLevel),
                "j" | "json" => Some(Command::Json),
                "h" | "help" | "?" => Some(Command::Help),
                "q" | "quit" | "exit" => Some(Command::Quit),
                _ => None,
            },
            [r1, c1, r2, c2] => {
                let from = Coord::new(r1.parse().ok()?, c1.parse().ok()?);
                let to = Coord::new(r2.parse().ok()?, c2.parse().ok()?);
                Some(Command::Move { from, to })
            }
            _ => None,
        }
    }
}

pub const HELP: &str = "\
commands:
  r1 c1 r2 c2   move the stack at (r1, c1) onto (r2, c2) and settle
  r             restart the level
  n             next level
  j             print the grid as JSON
  q             quit";
