// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of the line commands accepted by the CLI

use anyhow::{anyhow, bail, Result};
use meshgo_core::{Color, Topology};

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Place a stone; `None` plays for the side to move
    Play { color: Option<Color>, point: usize },
    Pass(Option<Color>),
    Resign(Option<Color>),
    Undo,
    Score,
    Show,
    /// Replace the position with a canonical string
    Load { canonical: String, turn: Color },
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  play [b|w] <point>     place a stone (point: index, col,row or vertex like D4)
  pass [b|w]             pass the turn
  resign [b|w]           resign the game
  undo                   take back the last action
  score                  area score of the current position
  show                   print the board
  load <digits> [b|w]    load a position (0 empty, 1 black, 2 white)
  reset                  start a new game
  help                   show this help
  quit                   exit";

/// Parse one input line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_command(line: &str, topology: &Topology) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match verb.as_str() {
        "play" | "p" => match args.as_slice() {
            [point] => Command::Play {
                color: None,
                point: parse_point(point, topology)?,
            },
            [color, point] => Command::Play {
                color: Some(parse_color(color)?),
                point: parse_point(point, topology)?,
            },
            _ => bail!("Usage: play [b|w] <point>"),
        },
        "pass" => Command::Pass(optional_color(&args, "pass [b|w]")?),
        "resign" => Command::Resign(optional_color(&args, "resign [b|w]")?),
        "undo" | "u" => Command::Undo,
        "score" => Command::Score,
        "show" | "board" => Command::Show,
        "load" => match args.as_slice() {
            [canonical] => Command::Load {
                canonical: canonical.to_string(),
                turn: Color::Black,
            },
            [canonical, turn] => Command::Load {
                canonical: canonical.to_string(),
                turn: parse_color(turn)?,
            },
            _ => bail!("Usage: load <digits> [b|w]"),
        },
        "reset" | "new" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("Unknown command '{}'. Type 'help' for a list.", other),
    };
    Ok(Some(command))
}

fn optional_color(args: &[&str], usage: &str) -> Result<Option<Color>> {
    match args {
        [] => Ok(None),
        [color] => parse_color(color).map(Some),
        _ => bail!("Usage: {}", usage),
    }
}

/// Parse `b`, `black`, `w` or `white`
pub fn parse_color(input: &str) -> Result<Color> {
    match input.to_lowercase().as_str() {
        "b" | "black" => Ok(Color::Black),
        "w" | "white" => Ok(Color::White),
        _ => Err(anyhow!("Invalid color '{}'. Use b or w.", input)),
    }
}

/// Parse a point as a raw index, a `col,row` pair or a grid vertex like `D4`
pub fn parse_point(input: &str, topology: &Topology) -> Result<usize> {
    let input = input.trim();

    if let Ok(index) = input.parse::<usize>() {
        if !topology.contains(index) {
            bail!("Point {} is outside the board (0..{})", index, topology.len());
        }
        return Ok(index);
    }

    if let Some((col, row)) = input.split_once(',') {
        let col = col
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow!("Invalid column '{}'", col.trim()))?;
        let row = row
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow!("Invalid row '{}'", row.trim()))?;
        return grid_point(topology, col, row);
    }

    let mut chars = input.chars();
    let col_char = chars
        .next()
        .ok_or_else(|| anyhow!("Empty point"))?
        .to_ascii_lowercase();
    let col = column_from_char(col_char)
        .ok_or_else(|| anyhow!("Invalid column '{}'. Must be A-Z (excluding I).", col_char))?;
    let row = match chars.as_str().parse::<usize>() {
        Ok(r) if r > 0 => r - 1,
        _ => bail!("Invalid move format. Examples: 'D4', '3,3', '40'."),
    };
    grid_point(topology, col, row)
}

fn grid_point(topology: &Topology, col: usize, row: usize) -> Result<usize> {
    if topology.grid_size().is_none() {
        bail!("Coordinates need a grid board; use a point index");
    }
    topology
        .grid_point(col, row)
        .ok_or_else(|| anyhow!("Coordinate ({}, {}) is outside the board", col, row))
}

/// Column index for a vertex letter (A-Z, skipping I)
fn column_from_char(c: char) -> Option<usize> {
    match c {
        'a'..='h' => Some(c as usize - 'a' as usize),
        'j'..='z' => Some(c as usize - 'a' as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_forms() {
        let topo = Topology::grid(19, 19);
        assert_eq!(parse_point("40", &topo).unwrap(), 40);
        assert_eq!(parse_point("3,3", &topo).unwrap(), 60);
        assert_eq!(parse_point("D4", &topo).unwrap(), 60);
        assert_eq!(parse_point("j1", &topo).unwrap(), 8);
        assert_eq!(parse_point("T19", &topo).unwrap(), 360);
        assert!(parse_point("361", &topo).is_err());
        assert!(parse_point("I5", &topo).is_err());
        assert!(parse_point("D0", &topo).is_err());
        assert!(parse_point("D20", &topo).is_err());
    }

    #[test]
    fn test_coordinates_need_grid() {
        let topo = Topology::parse("0,0,0,0,1\n1,1,0,0,0\n").unwrap();
        assert_eq!(parse_point("1", &topo).unwrap(), 1);
        assert!(parse_point("A1", &topo).is_err());
        assert!(parse_point("0,0", &topo).is_err());
    }

    #[test]
    fn test_parse_commands() {
        let topo = Topology::grid(9, 9);
        assert_eq!(
            parse_command("play b D4", &topo).unwrap(),
            Some(Command::Play {
                color: Some(Color::Black),
                point: 30
            })
        );
        assert_eq!(
            parse_command("  PLAY 0 ", &topo).unwrap(),
            Some(Command::Play {
                color: None,
                point: 0
            })
        );
        assert_eq!(
            parse_command("pass white", &topo).unwrap(),
            Some(Command::Pass(Some(Color::White)))
        );
        assert_eq!(parse_command("resign", &topo).unwrap(), Some(Command::Resign(None)));
        assert_eq!(
            parse_command("load 012 w", &topo).unwrap(),
            Some(Command::Load {
                canonical: "012".to_string(),
                turn: Color::White
            })
        );
        assert_eq!(parse_command("", &topo).unwrap(), None);
        assert_eq!(parse_command("# note", &topo).unwrap(), None);
        assert!(parse_command("fly", &topo).is_err());
        assert!(parse_command("play x D4", &topo).is_err());
        assert!(parse_command("pass b w", &topo).is_err());
    }
}
