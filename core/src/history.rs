// SPDX-License-Identifier: MIT OR Apache-2.0

//! Position history: canonical encodings, the superko set and the undo stack
//!
//! Every snapshot carries the superko set as it stood at that moment. The
//! set is an `im` persistent hash set, so pushing a snapshot shares structure
//! with its predecessor instead of deep-copying it.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::{EngineError, Stone};

/// One ASCII digit per point: `0` empty, `1` black, `2` white
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalState(String);

impl CanonicalState {
    /// Encode a stone array
    pub fn from_stones(stones: &[Stone]) -> Self {
        let encoded = stones
            .iter()
            .map(|s| match s {
                Stone::Empty => '0',
                Stone::Black => '1',
                Stone::White => '2',
            })
            .collect();
        Self(encoded)
    }

    /// Decode a canonical string of exactly `points` characters
    pub fn parse(text: &str, points: usize) -> Result<Vec<Stone>, EngineError> {
        let text = text.trim();
        if text.len() != points {
            return Err(EngineError::MalformedState(format!(
                "expected {} points, found {}",
                points,
                text.len()
            )));
        }

        text.chars()
            .enumerate()
            .map(|(i, c)| match c {
                '0' => Ok(Stone::Empty),
                '1' => Ok(Stone::Black),
                '2' => Ok(Stone::White),
                other => Err(EngineError::MalformedState(format!(
                    "unexpected '{}' at point {}",
                    other, i
                ))),
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CanonicalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete state after one committed action
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub board: BoardState,
    /// Every position that has occurred on the timeline up to this snapshot
    pub superko: ImHashSet<CanonicalState>,
}

/// Stack of snapshots; the top is always the live state
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Start a history whose base is `initial`
    pub fn new(initial: &BoardState) -> Self {
        let mut superko = ImHashSet::new();
        superko.insert(CanonicalState::from_stones(initial.stones()));
        Self {
            snapshots: vec![Snapshot {
                board: initial.clone(),
                superko,
            }],
        }
    }

    /// Whether `state` already occurred on the current timeline
    pub fn seen(&self, state: &CanonicalState) -> bool {
        self.current().superko.contains(state)
    }

    /// The snapshot representing the live state
    pub fn current(&self) -> &Snapshot {
        // The base snapshot is never popped
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Push the state after a committed action.
    ///
    /// `position` is the new canonical state for placements and `None` for
    /// passes, which leave the superko set untouched.
    pub fn push(&mut self, board: &BoardState, position: Option<CanonicalState>) {
        let superko = match position {
            Some(position) => self.current().superko.update(position),
            None => self.current().superko.clone(),
        };
        self.snapshots.push(Snapshot {
            board: board.clone(),
            superko,
        });
    }

    /// Drop the top snapshot and return the one now live
    pub fn undo(&mut self) -> Result<&Snapshot, EngineError> {
        if self.snapshots.len() <= 1 {
            return Err(EngineError::NothingToUndo);
        }
        self.snapshots.pop();
        Ok(self.current())
    }

    /// Number of snapshots, including the base
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Number of distinct positions in the live superko set
    pub fn superko_len(&self) -> usize {
        self.current().superko.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_encoding() {
        let stones = [Stone::Empty, Stone::Black, Stone::White, Stone::Empty];
        let state = CanonicalState::from_stones(&stones);
        assert_eq!(state.as_str(), "0120");
        assert_eq!(CanonicalState::parse("0120", 4).unwrap(), stones.to_vec());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            CanonicalState::parse("012", 4),
            Err(EngineError::MalformedState(_))
        ));
        assert!(matches!(
            CanonicalState::parse("01x0", 4),
            Err(EngineError::MalformedState(_))
        ));
    }

    #[test]
    fn test_push_and_undo() {
        let mut board = BoardState::new(3);
        let mut history = History::new(&board);
        assert_eq!(history.superko_len(), 1);
        assert_eq!(history.undo().err(), Some(EngineError::NothingToUndo));

        board.set_stones(vec![Stone::Black, Stone::Empty, Stone::Empty]);
        board.move_number = 1;
        let position = CanonicalState::from_stones(board.stones());
        history.push(&board, Some(position.clone()));
        assert!(history.seen(&position));
        assert_eq!(history.superko_len(), 2);

        // A pass shares the set unchanged
        board.move_number = 2;
        history.push(&board, None);
        assert_eq!(history.superko_len(), 2);
        assert_eq!(history.depth(), 3);

        assert_eq!(history.undo().unwrap().board.move_number, 1);
        let base = history.undo().unwrap();
        assert_eq!(base.board.move_number, 0);
        assert!(!history.seen(&position));
        assert_eq!(history.superko_len(), 1);
    }
}
