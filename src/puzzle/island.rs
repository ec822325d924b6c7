//! Island and puzzle representation

use crate::error::{HashiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Smallest bridge count an island may demand
pub const MIN_REQUIRED: u8 = 1;
/// Largest bridge count an island may demand (four directions, two bridges each)
pub const MAX_REQUIRED: u8 = 8;

/// A numbered island on the puzzle grid.
///
/// Serialized as the array `[x, y, required]`. Deserialization accepts
/// trailing extra fields and ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<serde_json::Value>", into = "[usize; 3]")]
pub struct Island {
    pub x: usize,
    pub y: usize,
    pub required: u8,
}

impl Island {
    pub fn new(x: usize, y: usize, required: u8) -> Self {
        Self { x, y, required }
    }

    /// Grid position as `(x, y)`
    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

impl TryFrom<Vec<serde_json::Value>> for Island {
    type Error = String;

    fn try_from(fields: Vec<serde_json::Value>) -> std::result::Result<Self, Self::Error> {
        if fields.len() < 3 {
            return Err(format!(
                "island needs [x, y, required], got {} fields",
                fields.len()
            ));
        }

        let field = |index: usize, name: &str| {
            fields[index]
                .as_u64()
                .ok_or_else(|| format!("island {} must be a non-negative integer, got {}", name, fields[index]))
        };

        let x = field(0, "x")? as usize;
        let y = field(1, "y")? as usize;
        let required = u8::try_from(field(2, "required")?)
            .map_err(|_| format!("island required count {} is too large", fields[2]))?;

        Ok(Island::new(x, y, required))
    }
}

impl From<Island> for [usize; 3] {
    fn from(island: Island) -> Self {
        [island.x, island.y, island.required as usize]
    }
}

/// A Hashi puzzle: grid dimensions plus its islands.
///
/// Island identity is the index into `islands`. The core only reads a puzzle,
/// it never mutates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub width: usize,
    pub height: usize,
    pub islands: Vec<Island>,
}

impl Puzzle {
    /// Build a puzzle and check it against the input contract
    pub fn new(width: usize, height: usize, islands: Vec<Island>) -> Result<Self> {
        let puzzle = Self {
            width,
            height,
            islands,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Build a puzzle from `[x, y, required]` triples
    pub fn from_triples(width: usize, height: usize, triples: &[[usize; 3]]) -> Result<Self> {
        let mut islands = Vec::with_capacity(triples.len());
        for (index, &[x, y, required]) in triples.iter().enumerate() {
            let required = u8::try_from(required).map_err(|_| {
                HashiError::InvalidPuzzle(format!(
                    "island {} requires {} bridges, expected {}..={}",
                    index, required, MIN_REQUIRED, MAX_REQUIRED
                ))
            })?;
            islands.push(Island::new(x, y, required));
        }
        Self::new(width, height, islands)
    }

    /// Reject coordinates outside the grid, stacked islands and bad bridge counts
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HashiError::InvalidPuzzle(format!(
                "grid dimensions {}x{} must be positive",
                self.width, self.height
            )));
        }

        let mut occupied = HashSet::with_capacity(self.islands.len());
        for (index, island) in self.islands.iter().enumerate() {
            if island.x >= self.width || island.y >= self.height {
                return Err(HashiError::InvalidPuzzle(format!(
                    "island {} at ({}, {}) lies outside the {}x{} grid",
                    index, island.x, island.y, self.width, self.height
                )));
            }
            if !(MIN_REQUIRED..=MAX_REQUIRED).contains(&island.required) {
                return Err(HashiError::InvalidPuzzle(format!(
                    "island {} requires {} bridges, expected {}..={}",
                    index, island.required, MIN_REQUIRED, MAX_REQUIRED
                )));
            }
            if !occupied.insert(island.position()) {
                return Err(HashiError::InvalidPuzzle(format!(
                    "island {} duplicates position ({}, {})",
                    index, island.x, island.y
                )));
            }
        }

        Ok(())
    }

    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    /// Find the island index at a grid position
    pub fn island_at(&self, x: usize, y: usize) -> Option<usize> {
        self.islands.iter().position(|island| island.x == x && island.y == y)
    }

    /// Total number of bridge ends demanded by all islands
    pub fn total_required(&self) -> usize {
        self.islands.iter().map(|island| island.required as usize).sum()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                if x > 0 {
                    write!(f, " ")?;
                }
                match self.island_at(x, y) {
                    Some(index) => write!(f, "{}", self.islands[index].required)?,
                    None => write!(f, "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_puzzle() {
        let puzzle = Puzzle::from_triples(4, 4, &[[0, 0, 4], [0, 2, 2], [1, 0, 3]]).unwrap();
        assert_eq!(puzzle.island_count(), 3);
        assert_eq!(puzzle.island_at(0, 2), Some(1));
        assert_eq!(puzzle.island_at(3, 3), None);
        assert_eq!(puzzle.total_required(), 9);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let result = Puzzle::from_triples(3, 3, &[[0, 0, 1], [3, 0, 1]]);
        assert!(matches!(result, Err(HashiError::InvalidPuzzle(_))));

        let result = Puzzle::from_triples(3, 3, &[[0, 5, 1]]);
        assert!(matches!(result, Err(HashiError::InvalidPuzzle(_))));
    }

    #[test]
    fn test_required_range_rejected() {
        assert!(Puzzle::from_triples(3, 3, &[[0, 0, 0]]).is_err());
        assert!(Puzzle::from_triples(3, 3, &[[0, 0, 9]]).is_err());
        assert!(Puzzle::from_triples(3, 3, &[[0, 0, 300]]).is_err());
        assert!(Puzzle::from_triples(3, 3, &[[0, 0, 8]]).is_ok());
    }

    #[test]
    fn test_duplicate_position_rejected() {
        let result = Puzzle::from_triples(3, 3, &[[1, 1, 2], [1, 1, 3]]);
        assert!(matches!(result, Err(HashiError::InvalidPuzzle(msg)) if msg.contains("duplicates")));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(Puzzle::new(0, 3, Vec::new()).is_err());
    }

    #[test]
    fn test_island_serde() {
        let island: Island = serde_json::from_str("[2, 3, 4]").unwrap();
        assert_eq!(island, Island::new(2, 3, 4));

        let with_id: Island = serde_json::from_str(r#"[2, 3, 4, "A7"]"#).unwrap();
        assert_eq!(with_id, Island::new(2, 3, 4));

        assert!(serde_json::from_str::<Island>("[2, 3]").is_err());
        assert!(serde_json::from_str::<Island>("[2, -3, 1]").is_err());

        assert_eq!(serde_json::to_string(&Island::new(1, 0, 2)).unwrap(), "[1,0,2]");
    }

    #[test]
    fn test_display() {
        let puzzle = Puzzle::from_triples(3, 2, &[[0, 0, 2], [2, 0, 2]]).unwrap();
        assert_eq!(puzzle.to_string(), "2 - 2\n- - -\n");
    }
}
