// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board topology: the immutable graph of points and their neighbours
//!
//! A topology is either generated as a regular grid or loaded from an
//! adjacency table with one row per point:
//!
//! ```text
//! # index, x, y, z, neighbour*
//! 0, 0.0, 0.0, 0.0, 1, -1, 3
//! ```
//!
//! Negative neighbour values mean "no neighbour in this direction".

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use thiserror::Error;

/// Errors raised while building a topology
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Topology has no points")]
    Empty,

    #[error("Point {0} is listed more than once")]
    DuplicateIndex(usize),

    #[error("Point {0} is missing; indices must be dense")]
    MissingIndex(usize),

    #[error("Point {point} lists neighbour {neighbor}, which does not exist")]
    NeighborOutOfRange { point: usize, neighbor: usize },

    #[error("Point {0} lists itself as a neighbour")]
    SelfLoop(usize),

    #[error("Point {point} lists {neighbor} as a neighbour but not the reverse")]
    Asymmetric { point: usize, neighbor: usize },

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Failed to read topology: {0}")]
    Io(String),
}

/// One row of an adjacency table
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyRow {
    pub index: usize,
    pub position: [f32; 3],
    /// `None` marks the "no neighbour" sentinel
    pub neighbors: Vec<Option<usize>>,
}

#[derive(Debug, Clone, PartialEq)]
struct PointInfo {
    position: [f32; 3],
    neighbors: Vec<usize>,
}

/// Immutable adjacency graph of board points
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    points: Vec<PointInfo>,
    /// (width, height) when generated by [`Topology::grid`]
    grid: Option<(usize, usize)>,
}

impl Topology {
    /// Build a `width` x `height` grid.
    ///
    /// Point index is `col + row * width`. Positions are centred on the
    /// origin in the x/z plane, and neighbours are listed up, down, left,
    /// right with off-board directions omitted.
    pub fn grid(width: usize, height: usize) -> Self {
        let x_off = (width as f32 - 1.0) / 2.0;
        let z_off = (height as f32 - 1.0) / 2.0;
        let mut points = Vec::with_capacity(width * height);

        for row in 0..height {
            for col in 0..width {
                let mut neighbors = Vec::with_capacity(4);
                // Up
                if row + 1 < height {
                    neighbors.push(col + (row + 1) * width);
                }
                // Down
                if row > 0 {
                    neighbors.push(col + (row - 1) * width);
                }
                // Left
                if col > 0 {
                    neighbors.push(col - 1 + row * width);
                }
                // Right
                if col + 1 < width {
                    neighbors.push(col + 1 + row * width);
                }

                points.push(PointInfo {
                    position: [col as f32 - x_off, 0.0, row as f32 - z_off],
                    neighbors,
                });
            }
        }

        Self {
            points,
            grid: Some((width, height)),
        }
    }

    /// Build a topology from adjacency rows, validating them.
    ///
    /// Rows may come in any order but their indices must cover `[0, N)`
    /// exactly once. Adjacency must be symmetric.
    pub fn from_rows(rows: Vec<TopologyRow>) -> Result<Self, TopologyError> {
        if rows.is_empty() {
            return Err(TopologyError::Empty);
        }

        let mut by_index = BTreeMap::new();
        for row in rows {
            let index = row.index;
            if by_index.insert(index, row).is_some() {
                return Err(TopologyError::DuplicateIndex(index));
            }
        }

        let len = by_index.len();
        for expected in 0..len {
            if !by_index.contains_key(&expected) {
                return Err(TopologyError::MissingIndex(expected));
            }
        }

        let mut points = Vec::with_capacity(len);
        for (index, row) in by_index {
            let mut neighbors = Vec::with_capacity(row.neighbors.len());
            for neighbor in row.neighbors.into_iter().flatten() {
                if neighbor >= len {
                    return Err(TopologyError::NeighborOutOfRange {
                        point: index,
                        neighbor,
                    });
                }
                if neighbor == index {
                    return Err(TopologyError::SelfLoop(index));
                }
                if neighbors.contains(&neighbor) {
                    tracing::debug!(point = index, neighbor, "Collapsing duplicate neighbour entry");
                    continue;
                }
                neighbors.push(neighbor);
            }
            points.push(PointInfo {
                position: row.position,
                neighbors,
            });
        }

        for (point, info) in points.iter().enumerate() {
            for &neighbor in &info.neighbors {
                if !points[neighbor].neighbors.contains(&point) {
                    return Err(TopologyError::Asymmetric { point, neighbor });
                }
            }
        }

        Ok(Self { points, grid: None })
    }

    /// Parse an adjacency table
    pub fn parse(text: &str) -> Result<Self, TopologyError> {
        let mut rows = Vec::new();

        for (line_no, raw) in text.lines().enumerate() {
            let line_no = line_no + 1;
            let line = match raw.find('#') {
                Some(pos) => &raw[..pos],
                None => raw,
            };
            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|f| !f.is_empty())
                .collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 4 {
                return Err(TopologyError::Parse {
                    line: line_no,
                    message: format!("expected index and x, y, z; found {} fields", fields.len()),
                });
            }

            let index = fields[0].parse::<usize>().map_err(|e| TopologyError::Parse {
                line: line_no,
                message: format!("bad index '{}': {}", fields[0], e),
            })?;

            let mut position = [0.0f32; 3];
            for (slot, field) in position.iter_mut().zip(&fields[1..4]) {
                *slot = field.parse::<f32>().map_err(|e| TopologyError::Parse {
                    line: line_no,
                    message: format!("bad coordinate '{}': {}", field, e),
                })?;
            }

            let mut neighbors = Vec::with_capacity(fields.len() - 4);
            for field in &fields[4..] {
                let value = field.parse::<i64>().map_err(|e| TopologyError::Parse {
                    line: line_no,
                    message: format!("bad neighbour '{}': {}", field, e),
                })?;
                neighbors.push(usize::try_from(value).ok());
            }

            rows.push(TopologyRow {
                index,
                position,
                neighbors,
            });
        }

        Self::from_rows(rows)
    }

    /// Read and parse an adjacency table from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TopologyError::Io(format!("{}: {}", path.display(), e)))?;
        let topology = Self::parse(&text)?;
        tracing::info!(
            path = %path.display(),
            points = topology.len(),
            edges = topology.edge_count() / 2,
            components = topology.component_count(),
            "Loaded board topology"
        );
        Ok(topology)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether `point` is a valid index
    pub fn contains(&self, point: usize) -> bool {
        point < self.points.len()
    }

    /// Neighbour indices of `point`.
    ///
    /// # Panics
    /// Panics if `point` is out of range.
    pub fn neighbors(&self, point: usize) -> &[usize] {
        &self.points[point].neighbors
    }

    /// 3D position of `point`, if it exists
    pub fn position(&self, point: usize) -> Option<[f32; 3]> {
        self.points.get(point).map(|p| p.position)
    }

    /// (width, height) for grid topologies
    pub fn grid_size(&self) -> Option<(usize, usize)> {
        self.grid
    }

    /// Index of the grid point at (`col`, `row`)
    pub fn grid_point(&self, col: usize, row: usize) -> Option<usize> {
        let (width, height) = self.grid?;
        (col < width && row < height).then(|| col + row * width)
    }

    /// Total number of adjacency entries, counting both directions
    pub fn edge_count(&self) -> usize {
        self.points.iter().map(|p| p.neighbors.len()).sum()
    }

    /// Connected components of the point graph
    pub fn component_count(&self) -> usize {
        let mut seen = HashSet::new();
        let mut components = 0;
        for start in 0..self.len() {
            if !seen.insert(start) {
                continue;
            }
            components += 1;
            let mut stack = vec![start];
            while let Some(p) = stack.pop() {
                for &n in self.neighbors(p) {
                    if seen.insert(n) {
                        stack.push(n);
                    }
                }
            }
        }
        components
    }
}
