// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine facade: the single owner of a game's board, history and event stream
//!
//! One [`Engine`] exists per game. Input handlers and relay layers hold a
//! reference to it and call its operations; each operation either commits
//! completely or returns an error without changing anything.

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use crate::archiver::GameRecord;
use crate::board::{BoardState, Captures};
use crate::config::EngineConfig;
use crate::groups::{Group, GroupMap};
use crate::history::{CanonicalState, History};
use crate::rules::RuleValidator;
use crate::scoring::{calculate_area_score, ScoreBreakdown};
use crate::topology::Topology;
use crate::{Color, EngineError, GameEvent, Move, Stone};

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultReason {
    /// Two consecutive passes, followed by area scoring
    DoublePass(ScoreBreakdown),
    /// One side resigned
    Resignation { resigned: Color },
}

/// Outcome of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// `None` for a drawn score
    pub winner: Option<Color>,
    pub reason: ResultReason,
}

/// State a caller needs to refresh its display after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStatus {
    pub turn: Color,
    pub move_number: u32,
    pub game_over: bool,
}

/// Result of an accepted placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub point: usize,
    pub color: Color,
    /// Every point emptied by the move, ascending
    pub captured: Vec<usize>,
    /// Liberties of the placed group, ascending
    pub liberties: Vec<usize>,
    pub status: TurnStatus,
}

/// Rules engine for one game on one topology
pub struct Engine {
    topology: Topology,
    config: EngineConfig,
    board: BoardState,
    history: History,
    /// Committed actions, including a trailing resignation
    moves: Vec<Move>,
    result: Option<GameResult>,
    subscribers: Vec<Sender<GameEvent>>,
}

impl Engine {
    /// Create an engine with an empty board, Black to move
    pub fn new(topology: Topology, config: EngineConfig) -> Self {
        let board = BoardState::new(topology.len());
        let history = History::new(&board);
        Self {
            topology,
            config,
            board,
            history,
            moves: Vec::new(),
            result: None,
            subscribers: Vec::new(),
        }
    }

    /// Receive every event emitted from now on
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Place a stone of `color` at `point`
    pub fn place_stone(&mut self, point: usize, color: Color) -> Result<MoveOutcome, EngineError> {
        self.check_point(point)?;
        self.check_turn(color)?;

        let evaluated = RuleValidator::new(&self.topology, &self.history, self.config.allow_suicide)
            .check_move(self.board.stones(), point, color);

        let placement = match evaluated {
            Ok(placement) => placement,
            Err(reason) => {
                tracing::debug!(point, color = ?color, reason = %reason, "Move rejected");
                self.emit(GameEvent::MoveRejected {
                    point,
                    color,
                    reason,
                });
                return Err(reason.into());
            }
        };

        let mut captured = placement.captured.clone();
        captured.extend_from_slice(&placement.self_captured);
        captured.sort_unstable();
        let liberties = placement.liberties.clone();

        placement.commit(&mut self.board, &mut self.history);
        let mv = Move::Place { point, color };
        self.moves.push(mv);

        tracing::debug!(
            point,
            color = ?color,
            captured = captured.len(),
            move_number = self.board.move_number,
            "Stone placed"
        );
        self.emit(GameEvent::MoveCommitted {
            mv,
            captured: captured.clone(),
            move_number: self.board.move_number,
        });

        Ok(MoveOutcome {
            point,
            color,
            captured,
            liberties,
            status: self.status(),
        })
    }

    /// Pass the turn; two consecutive passes end and score the game
    pub fn pass(&mut self, color: Color) -> Result<TurnStatus, EngineError> {
        self.check_turn(color)?;

        self.board.move_number += 1;
        self.board.consecutive_passes += 1;
        self.board.turn = color.opposite();
        if self.board.consecutive_passes >= 2 {
            self.board.game_over = true;
        }
        self.history.push(&self.board, None);

        let mv = Move::Pass { color };
        self.moves.push(mv);
        self.emit(GameEvent::MoveCommitted {
            mv,
            captured: Vec::new(),
            move_number: self.board.move_number,
        });

        if self.board.game_over {
            let score = self.calculate_area_score(self.config.komi);
            tracing::info!(
                black = score.black_score,
                white = score.white_score,
                margin = score.margin(),
                winner = ?score.winner,
                "Game ended by double pass"
            );
            self.finish(GameResult {
                winner: score.winner,
                reason: ResultReason::DoublePass(score),
            });
        }

        Ok(self.status())
    }

    /// Resign on behalf of `color`, which may be either side
    pub fn resign(&mut self, color: Color) -> Result<TurnStatus, EngineError> {
        if self.board.game_over {
            return Err(EngineError::GameOver);
        }

        self.board.game_over = true;
        self.moves.push(Move::Resign { color });
        tracing::info!(resigned = %color, "Game ended by resignation");
        self.finish(GameResult {
            winner: Some(color.opposite()),
            reason: ResultReason::Resignation { resigned: color },
        });

        Ok(self.status())
    }

    /// Take back the last action.
    ///
    /// After a resignation only the resignation is revoked.
    pub fn undo(&mut self) -> Result<TurnStatus, EngineError> {
        let resigned = matches!(
            self.result,
            Some(GameResult {
                reason: ResultReason::Resignation { .. },
                ..
            })
        );

        let restored = if resigned {
            self.history.current().board.clone()
        } else {
            match self.history.undo() {
                Ok(snapshot) => snapshot.board.clone(),
                Err(e) => {
                    tracing::debug!("Undo requested with no history");
                    return Err(e);
                }
            }
        };

        self.board = restored;
        let undone = self.moves.pop();
        self.result = None;

        tracing::debug!(
            move_number = self.board.move_number,
            by = ?undone.map(|mv| mv.color()),
            "Undo performed"
        );
        self.emit(GameEvent::UndoPerformed {
            turn: self.board.turn,
            move_number: self.board.move_number,
        });

        Ok(self.status())
    }

    /// Area score of the current position with the given komi
    pub fn calculate_area_score(&self, komi: f32) -> ScoreBreakdown {
        calculate_area_score(&self.topology, self.board.stones(), komi)
    }

    /// Run the placement rules for `color` at `point` without committing
    pub fn check_move(&self, point: usize, color: Color) -> Result<(), EngineError> {
        self.check_point(point)?;
        if self.board.game_over {
            return Err(EngineError::GameOver);
        }
        RuleValidator::new(&self.topology, &self.history, self.config.allow_suicide)
            .check_move(self.board.stones(), point, color)?;
        Ok(())
    }

    /// Every point where `color` could legally place now
    pub fn legal_points(&self, color: Color) -> Vec<usize> {
        if self.board.game_over {
            return Vec::new();
        }
        let validator = RuleValidator::new(&self.topology, &self.history, self.config.allow_suicide);
        (0..self.topology.len())
            .filter(|&p| validator.check_move(self.board.stones(), p, color).is_ok())
            .collect()
    }

    /// Replace the game with the position encoded in `canonical`.
    ///
    /// History restarts from the loaded position. Positions containing a
    /// group without liberties are refused.
    pub fn load_board_state(&mut self, canonical: &str, turn: Color) -> Result<(), EngineError> {
        let stones = CanonicalState::parse(canonical, self.topology.len())?;

        let groups = GroupMap::compute(&self.topology, &stones);
        if let Some(dead) = groups.groups().iter().find(|g| g.is_dead()) {
            return Err(EngineError::MalformedState(format!(
                "group at point {} has no liberties",
                dead.representative()
            )));
        }

        self.board = BoardState::with_stones(stones, turn);
        self.history = History::new(&self.board);
        self.moves.clear();
        self.result = None;
        tracing::info!(points = self.topology.len(), turn = %turn, "Loaded board state");
        Ok(())
    }

    /// Start a new game on the same topology
    pub fn reset(&mut self) {
        self.board = BoardState::new(self.topology.len());
        self.history = History::new(&self.board);
        self.moves.clear();
        self.result = None;
        tracing::info!(points = self.topology.len(), "New game");
    }

    /// Stone at `point`, `None` when out of range
    pub fn stone_at(&self, point: usize) -> Option<Stone> {
        self.board.get(point)
    }

    /// Group containing `point`, recomputed from the live board
    pub fn group_at(&self, point: usize) -> Option<Group> {
        if !self.topology.contains(point) {
            return None;
        }
        GroupMap::compute(&self.topology, self.board.stones())
            .group_at(point)
            .cloned()
    }

    pub fn turn(&self) -> Color {
        self.board.turn
    }

    pub fn is_game_over(&self) -> bool {
        self.board.game_over
    }

    /// Point of the most recent placement
    pub fn last_move(&self) -> Option<usize> {
        self.board.last_move
    }

    pub fn move_number(&self) -> u32 {
        self.board.move_number
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.board.consecutive_passes
    }

    pub fn captures(&self) -> Captures {
        self.board.captures
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> TurnStatus {
        TurnStatus {
            turn: self.board.turn,
            move_number: self.board.move_number,
            game_over: self.board.game_over,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn canonical_state(&self) -> CanonicalState {
        CanonicalState::from_stones(self.board.stones())
    }

    /// Distinct positions remembered for superko
    pub fn superko_history_len(&self) -> usize {
        self.history.superko_len()
    }

    /// Snapshots on the undo stack, including the initial one
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Snapshot of the game for archiving or relaying
    pub fn record(&self) -> GameRecord {
        GameRecord {
            points: self.topology.len(),
            komi: self.config.komi,
            moves: self.moves.clone(),
            final_position: self.canonical_state(),
            result: self.result.clone(),
        }
    }

    fn check_point(&self, point: usize) -> Result<(), EngineError> {
        if self.topology.contains(point) {
            Ok(())
        } else {
            Err(EngineError::OutOfRangeIndex {
                index: point,
                len: self.topology.len(),
            })
        }
    }

    fn check_turn(&self, color: Color) -> Result<(), EngineError> {
        if self.board.game_over {
            return Err(EngineError::GameOver);
        }
        if color != self.board.turn {
            return Err(EngineError::WrongTurn {
                expected: self.board.turn,
                got: color,
            });
        }
        Ok(())
    }

    fn finish(&mut self, result: GameResult) {
        self.result = Some(result.clone());
        self.emit(GameEvent::GameEnded { result });
    }

    fn emit(&mut self, event: GameEvent) {
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            tracing::warn!(dropped, "Removed disconnected event subscribers");
        }
    }
}
