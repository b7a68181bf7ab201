// SPDX-License-Identifier: MIT OR Apache-2.0

//! Area scoring: stones on the board plus exclusively bordered empty regions

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::topology::Topology;
use crate::{Color, Stone};

/// Final score breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub black_stones: u32,
    pub white_stones: u32,
    pub black_territory: u32,
    pub white_territory: u32,
    /// Empty points bordered by both colors or by neither
    pub neutral: u32,
    pub komi: f32,
    pub black_score: f32,
    pub white_score: f32,
    /// `None` on equal totals
    pub winner: Option<Color>,
}

impl ScoreBreakdown {
    /// Winning margin, positive for Black
    pub fn margin(&self) -> f32 {
        self.black_score - self.white_score
    }
}

/// Score `stones` on `topology` by area rules, adding `komi` to White
pub fn calculate_area_score(topology: &Topology, stones: &[Stone], komi: f32) -> ScoreBreakdown {
    let mut black_stones = 0u32;
    let mut white_stones = 0u32;
    let mut black_territory = 0u32;
    let mut white_territory = 0u32;
    let mut neutral = 0u32;
    let mut seen = HashSet::new();

    for (point, stone) in stones.iter().enumerate() {
        match stone {
            Stone::Black => black_stones += 1,
            Stone::White => white_stones += 1,
            Stone::Empty => {
                if seen.contains(&point) {
                    continue;
                }
                let (region, borders) = region_and_borders(topology, stones, point, &mut seen);
                let size = region.len() as u32;
                match (borders.contains(&Color::Black), borders.contains(&Color::White)) {
                    (true, false) => black_territory += size,
                    (false, true) => white_territory += size,
                    _ => neutral += size,
                }
            }
        }
    }

    let black_score = (black_stones + black_territory) as f32;
    let white_score = (white_stones + white_territory) as f32 + komi;
    let winner = if black_score > white_score {
        Some(Color::Black)
    } else if white_score > black_score {
        Some(Color::White)
    } else {
        None
    };

    ScoreBreakdown {
        black_stones,
        white_stones,
        black_territory,
        white_territory,
        neutral,
        komi,
        black_score,
        white_score,
        winner,
    }
}

/// BFS over empty points; returns (region points, bordering stone colours)
fn region_and_borders(
    topology: &Topology,
    stones: &[Stone],
    start: usize,
    global_seen: &mut HashSet<usize>,
) -> (Vec<usize>, HashSet<Color>) {
    let mut q = VecDeque::from([start]);
    let mut region = vec![start];
    let mut borders = HashSet::new();
    global_seen.insert(start);

    while let Some(p) = q.pop_front() {
        for &n in topology.neighbors(p) {
            match stones[n].color() {
                Some(color) => {
                    borders.insert(color);
                }
                None => {
                    if global_seen.insert(n) {
                        region.push(n);
                        q.push_back(n);
                    }
                }
            }
        }
    }
    (region, borders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_neutral() {
        let topo = Topology::grid(9, 9);
        let score = calculate_area_score(&topo, &[Stone::Empty; 81], 6.5);
        assert_eq!(score.neutral, 81);
        assert_eq!(score.black_score, 0.0);
        assert_eq!(score.white_score, 6.5);
        assert_eq!(score.winner, Some(Color::White));
    }

    #[test]
    fn test_shared_region_scores_for_nobody() {
        // B . W on a line
        let topo = Topology::grid(3, 1);
        let stones = [Stone::Black, Stone::Empty, Stone::White];
        let score = calculate_area_score(&topo, &stones, 0.0);
        assert_eq!(score.black_territory, 0);
        assert_eq!(score.white_territory, 0);
        assert_eq!(score.neutral, 1);
        assert_eq!(score.winner, None);
        assert_eq!(score.margin(), 0.0);
    }

    #[test]
    fn test_single_stone_owns_board() {
        let topo = Topology::grid(5, 5);
        let mut stones = vec![Stone::Empty; 25];
        stones[12] = Stone::Black;
        let score = calculate_area_score(&topo, &stones, 7.5);
        assert_eq!(score.black_stones, 1);
        assert_eq!(score.black_territory, 24);
        assert_eq!(score.black_score, 25.0);
        assert_eq!(score.winner, Some(Color::Black));
    }
}
