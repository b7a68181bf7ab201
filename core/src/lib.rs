// SPDX-License-Identifier: MIT OR Apache-2.0

//! meshgo core - Go rules on an arbitrary board graph
//!
//! This crate provides the rules engine only:
//! - board topology (regular grids and loaded adjacency tables)
//! - group and liberty analysis
//! - placement with capture, suicide and positional superko checks
//! - a snapshot history with full undo
//! - area scoring
//! - the [`Engine`] facade with its event stream
//!
//! Rendering, input mapping and network relaying are left to the caller.

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod archiver;
pub mod board;
pub mod cbor;
pub mod config;
pub mod engine;
pub mod groups;
pub mod history;
pub mod rules;
pub mod scoring;
pub mod topology;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

/// Player color in a Go game (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (moves first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// The stone this color places on the board
    pub fn stone(&self) -> Stone {
        match self {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Occupant of a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Stone {
    #[default]
    Empty = 0,
    Black = 1,
    White = 2,
}

impl Stone {
    /// Color of the stone, `None` for an empty point
    pub fn color(&self) -> Option<Color> {
        match self {
            Stone::Empty => None,
            Stone::Black => Some(Color::Black),
            Stone::White => Some(Color::White),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Stone::Empty)
    }
}

/// A committed action in the game record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Place a stone at the point with the given index
    Place { point: usize, color: Color },
    /// Pass the turn
    Pass { color: Color },
    /// Resign the game
    Resign { color: Color },
}

impl Move {
    /// The color that made the move
    pub fn color(&self) -> Color {
        match self {
            Move::Place { color, .. } | Move::Pass { color } | Move::Resign { color } => *color,
        }
    }
}

/// Events emitted by the [`Engine`] to its subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A placement or pass was committed
    MoveCommitted {
        /// The move that was made
        mv: Move,
        /// Points emptied by the move, in ascending order
        captured: Vec<usize>,
        /// Move number after the commit
        move_number: u32,
    },
    /// A placement was refused by the rules; the board is unchanged
    MoveRejected {
        point: usize,
        color: Color,
        reason: IllegalMove,
    },
    /// The game has ended by double pass or resignation
    GameEnded {
        result: GameResult,
    },
    /// The last action was taken back
    UndoPerformed {
        /// Side to move after the undo
        turn: Color,
        move_number: u32,
    },
}

/// Rule violations that reject a placement
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllegalMove {
    /// The point already holds a stone
    #[error("Point already occupied")]
    Occupied,

    /// The placed group would be left without liberties
    #[error("Move would result in self-capture")]
    Suicide,

    /// The resulting position already occurred in this game
    #[error("Move recreates an earlier board position")]
    SuperKo,
}

/// Errors returned by [`Engine`] operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The placement breaks a rule of the game
    #[error("Illegal move: {0}")]
    Illegal(#[from] IllegalMove),

    /// Only the initial position is left on the history stack
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The point index is outside the board
    #[error("Point index {index} out of range for a board of {len} points")]
    OutOfRangeIndex { index: usize, len: usize },

    /// The game has already finished
    #[error("Game is over")]
    GameOver,

    /// A color tried to act out of turn
    #[error("It is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Color, got: Color },

    /// A canonical board string could not be loaded
    #[error("Malformed board state: {0}")]
    MalformedState(String),
}

pub use archiver::{archive_finished_game, read_game_archive, GameRecord};
pub use board::{BoardState, Captures};
pub use config::EngineConfig;
pub use engine::{Engine, GameResult, MoveOutcome, ResultReason, TurnStatus};
pub use groups::{Group, GroupMap};
pub use history::{CanonicalState, History, Snapshot};
pub use scoring::ScoreBreakdown;
pub use topology::{Topology, TopologyError, TopologyRow};
