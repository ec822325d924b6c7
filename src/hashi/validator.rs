//! Independent solution checking for Hashi puzzles
//!
//! Works from the puzzle rules alone and never looks at the SAT encoding.

use super::Solution;
use crate::puzzle::{candidate_edges, CandidateEdge, Puzzle};
use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Validates solutions to Hashi puzzles
#[derive(Debug, Default, Clone, Copy)]
pub struct SolutionValidator;

/// Result of solution validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    IslandMismatch,
    UnknownEndpoint {
        bridge: usize,
        position: (usize, usize),
    },
    BadMultiplicity {
        bridge: usize,
        bridges: u8,
    },
    NotCandidate {
        bridge: usize,
    },
    DuplicatePair {
        first: usize,
        second: usize,
    },
    Crossing {
        first: usize,
        second: usize,
    },
    DegreeMismatch {
        island: usize,
        required: u8,
        actual: usize,
    },
    Disconnected {
        reached: usize,
        total: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DimensionMismatch { expected, actual } => write!(
                f,
                "grid is {}x{}, puzzle is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Violation::IslandMismatch => write!(f, "islands differ from the puzzle"),
            Violation::UnknownEndpoint { bridge, position } => write!(
                f,
                "bridge {} ends at ({}, {}) which is not an island",
                bridge, position.0, position.1
            ),
            Violation::BadMultiplicity { bridge, bridges } => {
                write!(f, "bridge {} has multiplicity {}", bridge, bridges)
            }
            Violation::NotCandidate { bridge } => write!(
                f,
                "bridge {} does not join two islands in a clear straight line",
                bridge
            ),
            Violation::DuplicatePair { first, second } => {
                write!(f, "bridges {} and {} join the same islands", first, second)
            }
            Violation::Crossing { first, second } => {
                write!(f, "bridges {} and {} cross", first, second)
            }
            Violation::DegreeMismatch {
                island,
                required,
                actual,
            } => write!(
                f,
                "island {} needs {} bridges but has {}",
                island, required, actual
            ),
            Violation::Disconnected { reached, total } => write!(
                f,
                "only {} of {} islands are connected",
                reached, total
            ),
        }
    }
}

impl ValidationResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    /// All violations joined into one line
    pub fn error_message(&self) -> Option<String> {
        if self.is_valid {
            None
        } else {
            Some(self.violations.iter().map(|v| v.to_string()).join("; "))
        }
    }
}

impl SolutionValidator {
    /// Create a new solution validator
    pub fn new() -> Self {
        Self
    }

    /// Check `solution` against every rule of `puzzle`
    pub fn validate(&self, puzzle: &Puzzle, solution: &Solution) -> ValidationResult {
        let mut violations = Vec::new();

        if (solution.width, solution.height) != (puzzle.width, puzzle.height) {
            violations.push(Violation::DimensionMismatch {
                expected: (puzzle.width, puzzle.height),
                actual: (solution.width, solution.height),
            });
        }
        if solution.islands != puzzle.islands {
            violations.push(Violation::IslandMismatch);
        }

        let candidates: HashSet<CandidateEdge> = candidate_edges(&puzzle.islands).into_iter().collect();

        // bridge index -> candidate edge, for bridges whose endpoints resolve
        let mut resolved: Vec<(usize, CandidateEdge, u8)> = Vec::new();
        for (index, bridge) in solution.solution.iter().enumerate() {
            if !(1..=2).contains(&bridge.bridges) {
                violations.push(Violation::BadMultiplicity {
                    bridge: index,
                    bridges: bridge.bridges,
                });
            }

            let from = puzzle.island_at(bridge.x1, bridge.y1);
            let to = puzzle.island_at(bridge.x2, bridge.y2);
            let (Some(a), Some(b)) = (from, to) else {
                let position = if from.is_none() {
                    bridge.from_position()
                } else {
                    bridge.to_position()
                };
                violations.push(Violation::UnknownEndpoint {
                    bridge: index,
                    position,
                });
                continue;
            };

            let edge = CandidateEdge::new(a, b);
            if a == b || !candidates.contains(&edge) {
                violations.push(Violation::NotCandidate { bridge: index });
                continue;
            }
            resolved.push((index, edge, bridge.bridges));
        }

        let mut seen: HashMap<CandidateEdge, usize> = HashMap::new();
        for &(index, edge, _) in &resolved {
            if let Some(&first) = seen.get(&edge) {
                violations.push(Violation::DuplicatePair {
                    first,
                    second: index,
                });
            } else {
                seen.insert(edge, index);
            }
        }

        for (&(first, e, _), &(second, f, _)) in resolved.iter().tuple_combinations() {
            if e.segment(&puzzle.islands).crosses(&f.segment(&puzzle.islands)) {
                violations.push(Violation::Crossing { first, second });
            }
        }

        let mut degrees = vec![0usize; puzzle.island_count()];
        let mut graph: UnGraphMap<usize, ()> = UnGraphMap::new();
        for island in 0..puzzle.island_count() {
            graph.add_node(island);
        }
        for &(_, edge, bridges) in &resolved {
            degrees[edge.a] += bridges as usize;
            degrees[edge.b] += bridges as usize;
            graph.add_edge(edge.a, edge.b, ());
        }

        for (island, (data, &actual)) in puzzle.islands.iter().zip(&degrees).enumerate() {
            if data.required as usize != actual {
                violations.push(Violation::DegreeMismatch {
                    island,
                    required: data.required,
                    actual,
                });
            }
        }

        let total = puzzle.island_count();
        if total > 0 {
            let reached = count_reachable(&graph, 0);
            if reached != total {
                violations.push(Violation::Disconnected { reached, total });
            }
        }

        ValidationResult::from_violations(violations)
    }
}

fn count_reachable(graph: &UnGraphMap<usize, ()>, start: usize) -> usize {
    let mut dfs = Dfs::new(graph, start);
    let mut reached = 0;
    while dfs.next(graph).is_some() {
        reached += 1;
    }
    reached
}
