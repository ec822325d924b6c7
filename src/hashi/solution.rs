//! Solution representation for Hashi puzzles

use crate::puzzle::{Island, Puzzle, PuzzleFile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A bridge between the islands at `(x1, y1)` and `(x2, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bridge {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
    /// 1 or 2
    pub bridges: u8,
}

impl Bridge {
    pub fn new(from: (usize, usize), to: (usize, usize), bridges: u8) -> Self {
        Self {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            bridges,
        }
    }

    pub fn from_position(&self) -> (usize, usize) {
        (self.x1, self.y1)
    }

    pub fn to_position(&self) -> (usize, usize) {
        (self.x2, self.y2)
    }

    /// Endpoints in a fixed order, so `a-b` and `b-a` compare equal
    pub fn endpoints(&self) -> ((usize, usize), (usize, usize)) {
        let (from, to) = (self.from_position(), self.to_position());
        if from <= to {
            (from, to)
        } else {
            (to, from)
        }
    }
}

/// A solved puzzle: the input islands and the bridges that satisfy them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub width: usize,
    pub height: usize,
    pub islands: Vec<Island>,
    pub solution: Vec<Bridge>,
}

impl Solution {
    /// Create a new solution
    pub fn new(puzzle: &Puzzle, bridges: Vec<Bridge>) -> Self {
        Self {
            width: puzzle.width,
            height: puzzle.height,
            islands: puzzle.islands.clone(),
            solution: bridges,
        }
    }

    /// The puzzle this solution answers
    pub fn puzzle(&self) -> Puzzle {
        Puzzle {
            width: self.width,
            height: self.height,
            islands: self.islands.clone(),
        }
    }

    /// Total bridges touching each position
    pub fn degrees(&self) -> HashMap<(usize, usize), usize> {
        let mut degrees = HashMap::new();
        for bridge in &self.solution {
            *degrees.entry(bridge.from_position()).or_insert(0) += bridge.bridges as usize;
            *degrees.entry(bridge.to_position()).or_insert(0) += bridge.bridges as usize;
        }
        degrees
    }

    /// Sum of bridge multiplicities
    pub fn total_bridges(&self) -> usize {
        self.solution.iter().map(|b| b.bridges as usize).sum()
    }

    /// Bridge count between two positions, in either direction
    pub fn bridges_between(&self, a: (usize, usize), b: (usize, usize)) -> u8 {
        self.solution
            .iter()
            .filter(|bridge| {
                (bridge.from_position() == a && bridge.to_position() == b)
                    || (bridge.from_position() == b && bridge.to_position() == a)
            })
            .map(|bridge| bridge.bridges)
            .sum()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

/// Solution file written by batch runs.
///
/// Islands are copied verbatim from the puzzle file, extra fields included.
/// An unsolved puzzle is written with an empty `solution` list and
/// `solved: false`; an empty puzzle is solved with no bridges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub width: usize,
    pub height: usize,
    pub islands: Vec<serde_json::Value>,
    pub solution: Vec<Bridge>,
    #[serde(default)]
    pub solved: bool,
}

impl SolutionReport {
    pub fn new(file: &PuzzleFile, solution: Option<&Solution>) -> Self {
        Self {
            width: file.puzzle.width,
            height: file.puzzle.height,
            islands: file.raw_islands.clone(),
            solution: solution.map(|s| s.solution.clone()).unwrap_or_default(),
            solved: solution.is_some(),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
