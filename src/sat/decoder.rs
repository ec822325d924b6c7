//! Turn a satisfying assignment back into bridges

use super::variables::VariableType;
use super::{SolverSolution, VariableManager};
use crate::error::Result;
use crate::hashi::{Bridge, Solution};
use crate::puzzle::{CandidateEdge, Puzzle};

/// Bridge count carried by `edge` under `model`: 2, 1 or 0
pub fn bridge_count(edge: usize, variables: &VariableManager, model: &SolverSolution) -> Result<u8> {
    let double = variables.existing_variable(VariableType::Double { edge })?;
    let exists = variables.existing_variable(VariableType::Exists { edge })?;

    Ok(if model.is_true(double) {
        2
    } else if model.is_true(exists) {
        1
    } else {
        0
    })
}

/// Realized bridges in candidate-edge order; edges without a bridge are omitted
pub fn decode_bridges(
    puzzle: &Puzzle,
    edges: &[CandidateEdge],
    variables: &VariableManager,
    model: &SolverSolution,
) -> Result<Vec<Bridge>> {
    let mut bridges = Vec::new();

    for (index, edge) in edges.iter().enumerate() {
        let count = bridge_count(index, variables, model)?;
        if count > 0 {
            let (a, b) = (&puzzle.islands[edge.a], &puzzle.islands[edge.b]);
            bridges.push(Bridge::new(a.position(), b.position(), count));
        }
    }

    Ok(bridges)
}

/// Decode an engine verdict into a solution.
///
/// `None` in means unsatisfiable and stays `None` out, which keeps "no
/// solution" apart from a solution that happens to have no bridges.
pub fn decode_solution(
    puzzle: &Puzzle,
    edges: &[CandidateEdge],
    variables: &VariableManager,
    model: Option<&SolverSolution>,
) -> Result<Option<Solution>> {
    let Some(model) = model else {
        return Ok(None);
    };

    let bridges = decode_bridges(puzzle, edges, variables, model)?;
    Ok(Some(Solution::new(puzzle, bridges)))
}
