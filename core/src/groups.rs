// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group analysis: connected components of like-colored stones and their liberties
//!
//! Groups are derived values. They are recomputed from a stone array every
//! time a rules decision needs them and never cached across mutations.

use std::collections::{BTreeSet, VecDeque};

use crate::topology::Topology;
use crate::{Color, Stone};

/// A maximal connected set of same-colored stones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    /// Member points in traversal order; the first entry is the representative
    pub stones: Vec<usize>,
    /// Empty points adjacent to any member
    pub liberties: BTreeSet<usize>,
}

impl Group {
    /// The lowest point index in the group, where its traversal started
    pub fn representative(&self) -> usize {
        self.stones[0]
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    pub fn is_dead(&self) -> bool {
        self.liberties.is_empty()
    }
}

/// Partition of every stone on a board into groups.
///
/// Groups live in an arena; each point maps to the arena index of its group.
#[derive(Debug, Clone, Default)]
pub struct GroupMap {
    groups: Vec<Group>,
    owner: Vec<Option<usize>>,
}

impl GroupMap {
    /// Compute all groups of `stones` over `topology`
    pub fn compute(topology: &Topology, stones: &[Stone]) -> Self {
        debug_assert_eq!(topology.len(), stones.len());

        let mut groups = Vec::new();
        let mut owner = vec![None; stones.len()];
        let mut queue = VecDeque::new();

        for start in 0..stones.len() {
            let color = match stones[start].color() {
                Some(color) => color,
                None => continue,
            };
            if owner[start].is_some() {
                continue;
            }

            let id = groups.len();
            let mut members = Vec::new();
            let mut liberties = BTreeSet::new();

            owner[start] = Some(id);
            queue.push_back(start);

            while let Some(point) = queue.pop_front() {
                members.push(point);
                for &n in topology.neighbors(point) {
                    match stones[n].color() {
                        None => {
                            liberties.insert(n);
                        }
                        Some(c) if c == color && owner[n].is_none() => {
                            owner[n] = Some(id);
                            queue.push_back(n);
                        }
                        _ => {}
                    }
                }
            }

            groups.push(Group {
                color,
                stones: members,
                liberties,
            });
        }

        Self { groups, owner }
    }

    /// Arena index of the group holding `point`
    pub fn group_id(&self, point: usize) -> Option<usize> {
        self.owner.get(point).copied().flatten()
    }

    /// The group holding `point`, if it is a stone
    pub fn group_at(&self, point: usize) -> Option<&Group> {
        self.group_id(point).map(|id| &self.groups[id])
    }

    pub fn get(&self, id: usize) -> Option<&Group> {
        self.groups.get(id)
    }

    /// All groups, in order of their lowest point index
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
