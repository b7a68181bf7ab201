// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use meshgo_core::{Engine, Stone};

/// Status line followed by the board
pub fn render(engine: &Engine) -> String {
    let mut output = render_status(engine);
    output.push('\n');
    match engine.topology().grid_size() {
        Some((width, height)) => output.push_str(&render_grid(engine, width, height)),
        None => output.push_str(&render_points(engine)),
    }
    output
}

/// One-line summary of turn, move number and captures
pub fn render_status(engine: &Engine) -> String {
    let captures = engine.captures();
    let state = if engine.is_game_over() {
        "game over".to_string()
    } else {
        format!("{} to move", engine.turn())
    };
    format!(
        "Move {} - {} - Captures: black {} white {}",
        engine.move_number(),
        state,
        captures.black,
        captures.white
    )
}

fn symbol(stone: Stone) -> char {
    match stone {
        Stone::Black => '●',
        Stone::White => '○',
        Stone::Empty => '+',
    }
}

/// Render a grid board with row 1 at the bottom. The last placed stone is
/// wrapped in parentheses.
pub fn render_grid(engine: &Engine, width: usize, height: usize) -> String {
    let topology = engine.topology();
    let last = engine.last_move();
    let mut output = String::new();

    let labels = column_labels(width);
    output.push_str(&labels);

    for row in (0..height).rev() {
        output.push_str(&format!("{:2}", row + 1));

        let mut after_last = false;
        for col in 0..width {
            let point = match topology.grid_point(col, row) {
                Some(point) => point,
                None => continue,
            };
            let stone = engine.stone_at(point).unwrap_or_default();
            let is_last = last == Some(point);

            let separator = if is_last {
                '('
            } else if after_last {
                ')'
            } else {
                ' '
            };
            let mark = if stone.is_empty() && is_star_point(col, row, width, height) {
                '*'
            } else {
                symbol(stone)
            };
            output.push(separator);
            output.push(mark);
            after_last = is_last;
        }

        output.push(if after_last { ')' } else { ' ' });
        output.push_str(&format!("{}", row + 1));
        output.push('\n');
    }

    output.push_str(&labels);
    output
}

/// Render a non-grid board as one line per point
pub fn render_points(engine: &Engine) -> String {
    let topology = engine.topology();
    let last = engine.last_move();
    let mut output = String::new();

    for point in 0..topology.len() {
        let stone = engine.stone_at(point).unwrap_or_default();
        let [x, y, z] = topology.position(point).unwrap_or_default();
        let neighbors: Vec<String> = topology
            .neighbors(point)
            .iter()
            .map(|n| n.to_string())
            .collect();
        output.push_str(&format!(
            "{}{:4} {} ({:.2}, {:.2}, {:.2}) -> {}\n",
            if last == Some(point) { '>' } else { ' ' },
            point,
            symbol(stone),
            x,
            y,
            z,
            neighbors.join(" ")
        ));
    }
    output
}

fn column_labels(width: usize) -> String {
    let mut output = String::from("  ");
    for col in 0..width {
        output.push(' ');
        output.push(coord_to_column_char(col).unwrap_or('?'));
    }
    output.push('\n');
    output
}

/// Convert a column index to a column character (A-Z, skipping I)
fn coord_to_column_char(col: usize) -> Option<char> {
    let offset = match col {
        0..=7 => col,
        8..=24 => col + 1,
        _ => return None,
    };
    char::from_u32('A' as u32 + offset as u32)
}

/// Check if a point is a star point on a standard square board
fn is_star_point(col: usize, row: usize, width: usize, height: usize) -> bool {
    if width != height {
        return false;
    }
    let lines: &[usize] = match width {
        9 => &[2, 4, 6],
        13 => &[3, 6, 9],
        19 => &[3, 9, 15],
        _ => return false,
    };
    if width == 9 && (col == 4) != (row == 4) {
        // 9x9 has no side star points
        return false;
    }
    lines.contains(&col) && lines.contains(&row)
}
