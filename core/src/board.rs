// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mutable board state: per-point occupancy plus turn and move counters

use serde::{Deserialize, Serialize};

use crate::{Color, Stone};

/// Stones captured by each player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captures {
    /// Stones captured by Black
    pub black: u32,
    /// Stones captured by White
    pub white: u32,
}

impl Captures {
    /// Credit `count` captured stones to `color`
    pub fn add(&mut self, color: Color, count: u32) {
        match color {
            Color::Black => self.black += count,
            Color::White => self.white += count,
        }
    }

    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }
}

/// Occupancy and bookkeeping for one position of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// One entry per topology point
    stones: Vec<Stone>,
    /// The player whose turn it is
    pub turn: Color,
    /// Number of committed placements and passes
    pub move_number: u32,
    /// Passes since the last placement
    pub consecutive_passes: u32,
    /// Set after two consecutive passes or a resignation
    pub game_over: bool,
    /// Point of the most recent placement
    pub last_move: Option<usize>,
    /// Running capture counts
    pub captures: Captures,
}

impl BoardState {
    /// Create an empty board with `points` points, Black to move
    pub fn new(points: usize) -> Self {
        Self::with_stones(vec![Stone::Empty; points], Color::Black)
    }

    /// Create a fresh state around an existing stone array
    pub fn with_stones(stones: Vec<Stone>, turn: Color) -> Self {
        Self {
            stones,
            turn,
            move_number: 0,
            consecutive_passes: 0,
            game_over: false,
            last_move: None,
            captures: Captures::default(),
        }
    }

    /// Number of points on the board
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Get the stone at `point`, `None` when out of range
    pub fn get(&self, point: usize) -> Option<Stone> {
        self.stones.get(point).copied()
    }

    /// The whole stone array
    pub fn stones(&self) -> &[Stone] {
        &self.stones
    }

    /// Replace the stone array after a committed placement
    pub(crate) fn set_stones(&mut self, stones: Vec<Stone>) {
        debug_assert_eq!(stones.len(), self.stones.len());
        self.stones = stones;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = BoardState::new(9);
        assert_eq!(board.len(), 9);
        assert!(board.stones().iter().all(Stone::is_empty));
        assert_eq!(board.turn, Color::Black);
        assert_eq!(board.last_move, None);
        assert_eq!(board.get(9), None);
    }

    #[test]
    fn test_with_stones() {
        let stones = vec![Stone::Black, Stone::White, Stone::Black, Stone::Empty];
        let board = BoardState::with_stones(stones, Color::White);
        assert_eq!(board.turn, Color::White);
        assert_eq!(board.get(2), Some(Stone::Black));
        assert_eq!(board.get(3), Some(Stone::Empty));
        assert_eq!(board.move_number, 0);
    }

    #[test]
    fn test_captures() {
        let mut captures = Captures::default();
        captures.add(Color::White, 3);
        captures.add(Color::Black, 1);
        captures.add(Color::White, 2);
        assert_eq!(captures.get(Color::White), 5);
        assert_eq!(captures.get(Color::Black), 1);
    }
}
