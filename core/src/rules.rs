// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placement rules: capture, suicide and positional superko
//!
//! A placement is evaluated on a working copy of the stone array in a fixed
//! order: occupancy, tentative placement, opponent captures, own-liberty
//! check, superko check. The live board is only touched by
//! [`Placement::commit`], so a rejected move never leaves a trace.

use std::collections::HashSet;

use crate::board::BoardState;
use crate::groups::GroupMap;
use crate::history::{CanonicalState, History};
use crate::topology::Topology;
use crate::{Color, IllegalMove, Stone};

/// Validates placements against the rules of Go
pub struct RuleValidator<'a> {
    /// Board graph
    topology: &'a Topology,
    /// Positions already seen on this timeline
    history: &'a History,
    /// Whether a group may be placed without liberties
    allow_suicide: bool,
}

/// The fully evaluated result of a legal placement, ready to commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub point: usize,
    pub color: Color,
    /// Stone array after captures
    pub stones: Vec<Stone>,
    /// Opponent stones removed, ascending
    pub captured: Vec<usize>,
    /// The mover's own stones removed when suicide is allowed, ascending
    pub self_captured: Vec<usize>,
    /// Liberties of the placed group after captures, ascending
    pub liberties: Vec<usize>,
    /// Canonical encoding of `stones`
    pub position: CanonicalState,
}

impl<'a> RuleValidator<'a> {
    /// Create a new rules validator
    pub fn new(topology: &'a Topology, history: &'a History, allow_suicide: bool) -> Self {
        Self {
            topology,
            history,
            allow_suicide,
        }
    }

    /// Evaluate placing `color` at `point` on `stones`.
    ///
    /// `point` must be in range for the topology.
    pub fn check_move(
        &self,
        stones: &[Stone],
        point: usize,
        color: Color,
    ) -> Result<Placement, IllegalMove> {
        // 1. Occupancy
        if !stones[point].is_empty() {
            return Err(IllegalMove::Occupied);
        }

        // 2. Tentative placement on a working copy
        let mut working = stones.to_vec();
        working[point] = color.stone();

        // 3. Remove opponent groups left without liberties
        let opponent = color.opposite();
        let groups = GroupMap::compute(self.topology, &working);
        let mut handled = HashSet::new();
        let mut captured = Vec::new();

        for &n in self.topology.neighbors(point) {
            if working[n].color() != Some(opponent) {
                continue;
            }
            let id = match groups.group_id(n) {
                Some(id) => id,
                None => continue,
            };
            if !handled.insert(id) {
                continue;
            }
            if let Some(group) = groups.get(id) {
                if group.is_dead() {
                    captured.extend_from_slice(&group.stones);
                }
            }
        }
        for &p in &captured {
            working[p] = Stone::Empty;
        }
        captured.sort_unstable();

        // 4. Own liberties, evaluated after captures
        let groups = GroupMap::compute(self.topology, &working);
        let own = groups
            .group_at(point)
            .expect("placed stone always belongs to a group");
        let mut self_captured = Vec::new();
        let mut liberties: Vec<usize> = own.liberties.iter().copied().collect();

        if own.is_dead() {
            if !self.allow_suicide {
                tracing::debug!(point, color = ?color, "Suicide rejected");
                return Err(IllegalMove::Suicide);
            }
            self_captured = own.stones.clone();
            self_captured.sort_unstable();
            for &p in &self_captured {
                working[p] = Stone::Empty;
            }
            liberties.clear();
        }

        // 5. Positional superko
        let position = CanonicalState::from_stones(&working);
        if self.history.seen(&position) {
            tracing::debug!(point, color = ?color, "Superko violation detected");
            return Err(IllegalMove::SuperKo);
        }

        Ok(Placement {
            point,
            color,
            stones: working,
            captured,
            self_captured,
            liberties,
            position,
        })
    }
}

impl Placement {
    /// Apply the placement to the live board and record it in history
    pub fn commit(self, board: &mut BoardState, history: &mut History) {
        board.set_stones(self.stones);
        board.captures.add(self.color, self.captured.len() as u32);
        board
            .captures
            .add(self.color.opposite(), self.self_captured.len() as u32);
        board.move_number += 1;
        board.consecutive_passes = 0;
        board.last_move = Some(self.point);
        board.turn = self.color.opposite();
        history.push(board, Some(self.position));
    }
}
