//! Hashiwokakero SAT Solver
//!
//! Encodes a Hashi puzzle as CNF (bridge tiers, crossing exclusion, exact
//! island degrees and layered connectivity), hands it to a SAT engine and
//! decodes the model back into bridges.

pub mod config;
pub mod error;
pub mod hashi;
pub mod puzzle;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::HashiError;
pub use hashi::{Bridge, HashiProblem, Solution, SolutionValidator};
pub use puzzle::{Island, Puzzle};

use config::SolverConfig;

/// Solve a puzzle with default solver settings.
///
/// Every call runs its own session with a fresh variable space. `Ok(None)`
/// means the puzzle has no solution.
pub fn solve_hashi(puzzle: &Puzzle) -> Result<Option<Solution>, HashiError> {
    solve_hashi_with(puzzle, SolverConfig::default())
}

/// Solve a puzzle with explicit solver settings
pub fn solve_hashi_with(
    puzzle: &Puzzle,
    config: SolverConfig,
) -> Result<Option<Solution>, HashiError> {
    let mut problem = HashiProblem::new(puzzle.clone(), config)?;
    problem.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{candidate_edges, crossing_pairs};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn scenario_a() -> Puzzle {
        Puzzle::from_triples(
            4,
            4,
            &[[0, 0, 4], [0, 2, 2], [1, 0, 3], [1, 1, 4], [1, 2, 1], [3, 1, 3], [3, 2, 1]],
        )
        .unwrap()
    }

    fn degrees(puzzle: &Puzzle, solution: &Solution) -> Vec<usize> {
        let degrees = solution.degrees();
        puzzle
            .islands
            .iter()
            .map(|i| degrees.get(&i.position()).copied().unwrap_or(0))
            .collect()
    }

    #[test]
    fn test_scenario_a_solvable() {
        let puzzle = scenario_a();
        let solution = solve_hashi(&puzzle).unwrap().unwrap();

        assert!(SolutionValidator::new().validate(&puzzle, &solution).is_valid);
        let required: Vec<usize> = puzzle.islands.iter().map(|i| i.required as usize).collect();
        assert_eq!(degrees(&puzzle, &solution), required);
        assert!(solution.solution.iter().all(|b| (1..=2).contains(&b.bridges)));
    }

    #[test]
    fn test_disconnected_degrees_unsolvable() {
        let puzzle = Puzzle::from_triples(
            4,
            4,
            &[[0, 0, 1], [0, 2, 1], [1, 1, 1], [1, 3, 1], [2, 3, 2], [3, 3, 1]],
        )
        .unwrap();
        assert_eq!(solve_hashi(&puzzle).unwrap(), None);
    }

    #[test]
    fn test_forced_crossing_unsolvable() {
        let puzzle = Puzzle::from_triples(
            3,
            3,
            &[[0, 0, 1], [0, 1, 1], [1, 0, 2], [1, 2, 2], [2, 1, 2], [2, 2, 2]],
        )
        .unwrap();
        assert!(!crossing_pairs(&puzzle.islands, &candidate_edges(&puzzle.islands)).is_empty());
        assert_eq!(solve_hashi(&puzzle).unwrap(), None);
    }

    #[test]
    fn test_square_unique_solution() {
        let puzzle = Puzzle::from_triples(7, 7, &[[1, 1, 3], [4, 1, 4], [1, 4, 2], [4, 4, 3]]).unwrap();
        let solution = solve_hashi(&puzzle).unwrap().unwrap();

        assert_eq!(solution.bridges_between((1, 1), (4, 1)), 2);
        assert_eq!(solution.bridges_between((4, 1), (4, 4)), 2);
        assert_eq!(solution.bridges_between((1, 1), (1, 4)), 1);
        assert_eq!(solution.bridges_between((1, 4), (4, 4)), 1);
    }

    #[test]
    fn test_l_shape() {
        let puzzle = Puzzle::from_triples(3, 3, &[[0, 0, 2], [0, 1, 2], [0, 2, 1], [1, 0, 1]]).unwrap();
        let solution = solve_hashi(&puzzle).unwrap().unwrap();
        assert_eq!(solution.solution.len(), 3);
        assert!(solution.solution.iter().all(|b| b.bridges == 1));
    }

    #[test]
    fn test_single_island() {
        let puzzle = Puzzle::from_triples(1, 1, &[[0, 0, 1]]).unwrap();
        assert_eq!(solve_hashi(&puzzle).unwrap(), None);
    }

    #[test]
    fn test_empty_puzzle_has_empty_solution() {
        let puzzle = Puzzle::new(2, 2, vec![]).unwrap();
        let solution = solve_hashi(&puzzle).unwrap().unwrap();
        assert!(solution.solution.is_empty());
    }

    #[test]
    fn test_two_islands_double_bridge() {
        let puzzle = Puzzle::from_triples(5, 1, &[[0, 0, 2], [4, 0, 2]]).unwrap();
        let solution = solve_hashi(&puzzle).unwrap().unwrap();
        assert_eq!(solution.solution, vec![Bridge::new((0, 0), (4, 0), 2)]);
    }

    #[test]
    fn test_root_choice_does_not_change_verdict() {
        let puzzle = scenario_a();
        for root in 0..puzzle.island_count() {
            let config = SolverConfig {
                root_island: root,
                ..SolverConfig::default()
            };
            let solution = solve_hashi_with(&puzzle, config).unwrap().unwrap();
            assert!(SolutionValidator::new().validate(&puzzle, &solution).is_valid);
        }
    }

    #[test]
    fn test_invalid_input_rejected() {
        let puzzle = Puzzle {
            width: 3,
            height: 3,
            islands: vec![Island::new(0, 0, 9)],
        };
        assert!(matches!(solve_hashi(&puzzle), Err(HashiError::InvalidPuzzle(_))));
    }

    #[test]
    fn test_sessions_are_independent() {
        let first = solve_hashi(&scenario_a()).unwrap();
        let second = solve_hashi(&scenario_a()).unwrap();
        assert!(first.is_some());
        assert!(second.is_some());
    }

    #[test]
    fn test_crossing_candidates_never_both_used() {
        // plus through the centre of a ring: the arms cross, only one can carry bridges
        let puzzle = Puzzle::from_triples(
            5,
            5,
            &[
                [0, 0, 2],
                [2, 0, 3],
                [4, 0, 2],
                [0, 2, 2],
                [4, 2, 2],
                [0, 4, 2],
                [2, 4, 3],
                [4, 4, 2],
            ],
        )
        .unwrap();
        let edges = candidate_edges(&puzzle.islands);
        assert_eq!(crossing_pairs(&puzzle.islands, &edges).len(), 1);

        let solution = solve_hashi(&puzzle).unwrap().unwrap();
        assert!(SolutionValidator::new().validate(&puzzle, &solution).is_valid);

        let vertical = solution.bridges_between((2, 0), (2, 4));
        let horizontal = solution.bridges_between((0, 2), (4, 2));
        assert!(vertical == 0 || horizontal == 0);
    }

    #[test]
    fn test_stranded_pair_unsolvable() {
        let puzzle = Puzzle::from_triples(
            5,
            5,
            &[[0, 0, 1], [0, 2, 2], [1, 0, 2], [1, 2, 1], [2, 1, 1], [3, 1, 2]],
        )
        .unwrap();
        assert!(solve_hashi(&puzzle).unwrap().is_none());
    }

    /// Every assignment of 0, 1 or 2 bridges per candidate edge that validates
    fn brute_force_solvable(puzzle: &Puzzle) -> bool {
        let edges = candidate_edges(&puzzle.islands);
        let validator = SolutionValidator::new();
        let mut counts = vec![0u8; edges.len()];

        loop {
            let bridges: Vec<Bridge> = edges
                .iter()
                .zip(&counts)
                .filter(|(_, count)| **count > 0)
                .map(|(edge, &count)| {
                    Bridge::new(
                        puzzle.islands[edge.a].position(),
                        puzzle.islands[edge.b].position(),
                        count,
                    )
                })
                .collect();
            if validator.validate(puzzle, &Solution::new(puzzle, bridges)).is_valid {
                return true;
            }

            // next assignment in base 3
            let mut carry = true;
            for count in counts.iter_mut() {
                if *count == 2 {
                    *count = 0;
                } else {
                    *count += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                return false;
            }
        }
    }

    fn small_puzzle() -> impl Strategy<Value = Puzzle> {
        proptest::collection::vec((0usize..4, 0usize..4, 1u8..=4), 1..=6).prop_map(|triples| {
            let mut seen = HashSet::new();
            let islands = triples
                .into_iter()
                .filter(|&(x, y, _)| seen.insert((x, y)))
                .map(|(x, y, required)| Island::new(x, y, required))
                .collect();
            Puzzle {
                width: 4,
                height: 4,
                islands,
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn solver_agrees_with_brute_force(puzzle in small_puzzle()) {
            prop_assume!(candidate_edges(&puzzle.islands).len() <= 10);

            let expected = brute_force_solvable(&puzzle);
            let solution = solve_hashi(&puzzle).unwrap();
            prop_assert_eq!(solution.is_some(), expected);
            if let Some(solution) = solution {
                let result = SolutionValidator::new().validate(&puzzle, &solution);
                prop_assert!(result.is_valid, "{:?}", result.violations);
            }
        }
    }
}
