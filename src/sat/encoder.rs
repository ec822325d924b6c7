//! SAT encoder for Hashi puzzles

use super::decoder::decode_solution;
use super::solver::{SolverOptions, SolverResultType, SolverSolution, SolverStatistics};
use super::solver_factory::UnifiedSatSolver;
use super::{Clause, ConstraintGenerator};
use crate::config::{SolverBackend, SolverConfig};
use crate::error::Result;
use crate::hashi::Solution;
use crate::puzzle::{candidate_edges, Puzzle};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Main SAT encoder: owns one puzzle, one variable space and one solve
pub struct SatEncoder {
    puzzle: Puzzle,
    constraint_generator: ConstraintGenerator,
    backend: SolverBackend,
    solver_options: SolverOptions,
    clauses: Option<Vec<Clause>>,
    solver_statistics: Option<SolverStatistics>,
}

impl SatEncoder {
    /// Create a new SAT encoder for a validated puzzle
    pub fn new(puzzle: Puzzle, config: &SolverConfig) -> Result<Self> {
        puzzle.validate()?;

        let edges = candidate_edges(&puzzle.islands);
        let constraint_generator =
            ConstraintGenerator::new(puzzle.islands.clone(), edges, config.root_island)?;

        let solver_options = SolverOptions {
            timeout: match config.timeout_seconds {
                0 => None,
                seconds => Some(Duration::from_secs(seconds)),
            },
        };

        Ok(Self {
            puzzle,
            constraint_generator,
            backend: config.backend,
            solver_options,
            clauses: None,
            solver_statistics: None,
        })
    }

    /// Build the CNF instance; repeated calls return the same clauses
    pub fn encode(&mut self) -> Result<&[Clause]> {
        if self.clauses.is_none() {
            let clauses = self.constraint_generator.generate_all_constraints()?;
            debug!(
                clauses = clauses.len(),
                variables = self.constraint_generator.variable_manager().variable_count(),
                "encoded puzzle"
            );
            self.clauses = Some(clauses);
        }

        Ok(self.clauses.as_deref().unwrap_or_default())
    }

    /// Encode, run the SAT engine once and decode its answer
    pub fn solve(&mut self) -> Result<Option<Solution>> {
        let backend = self.backend;
        let options = self.solver_options.clone();
        let clauses = self.encode()?;

        let mut solver = UnifiedSatSolver::new(backend);
        solver.configure(&options);
        solver.add_clauses(clauses)?;
        let variable_count = solver.variable_count();
        let clause_count = solver.clause_count();

        info!(
            islands = self.puzzle.island_count(),
            edges = self.constraint_generator.edges().len(),
            clauses = clause_count,
            ?backend,
            "starting SAT solver"
        );

        let start_time = Instant::now();
        let outcome = solver.solve();
        let result = match &outcome {
            Ok(Some(_)) => SolverResultType::Satisfiable,
            Ok(None) => SolverResultType::Unsatisfiable,
            Err(_) => SolverResultType::Interrupted,
        };
        self.solver_statistics = Some(SolverStatistics {
            variable_count,
            clause_count,
            solve_time: start_time.elapsed(),
            result,
        });
        let model = outcome?;

        match &model {
            Some(_) => info!("solution found"),
            None => info!("puzzle has no solution"),
        }

        self.decode(model.as_ref())
    }

    /// Decode a model produced for this encoding
    pub fn decode(&self, model: Option<&SolverSolution>) -> Result<Option<Solution>> {
        decode_solution(
            &self.puzzle,
            self.constraint_generator.edges(),
            self.constraint_generator.variable_manager(),
            model,
        )
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Get encoding statistics
    pub fn statistics(&self) -> EncodingStatistics {
        let constraints = self.constraint_generator.statistics();
        let variables = self.constraint_generator.variable_manager().statistics();

        EncodingStatistics {
            grid_width: self.puzzle.width,
            grid_height: self.puzzle.height,
            islands: constraints.islands,
            candidate_edges: constraints.candidate_edges,
            crossing_pairs: constraints.crossing_pairs,
            total_variables: variables.total_variables,
            bridge_variables: variables.bridge_variables,
            reach_variables: variables.reach_variables,
            step_variables: variables.step_variables,
            auxiliary_variables: variables.auxiliary_variables,
            total_clauses: constraints.total_clauses(),
            solver: self.solver_statistics.clone(),
        }
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub grid_width: usize,
    pub grid_height: usize,
    pub islands: usize,
    pub candidate_edges: usize,
    pub crossing_pairs: usize,
    pub total_variables: usize,
    pub bridge_variables: usize,
    pub reach_variables: usize,
    pub step_variables: usize,
    pub auxiliary_variables: usize,
    pub total_clauses: usize,
    pub solver: Option<SolverStatistics>,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Grid: {}x{}", self.grid_width, self.grid_height)?;
        writeln!(f, "  Islands: {}", self.islands)?;
        writeln!(f, "  Candidate edges: {}", self.candidate_edges)?;
        writeln!(f, "  Crossing pairs: {}", self.crossing_pairs)?;
        writeln!(
            f,
            "  Variables: {} (bridge {}, reach {}, step {}, auxiliary {})",
            self.total_variables,
            self.bridge_variables,
            self.reach_variables,
            self.step_variables,
            self.auxiliary_variables
        )?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        if let Some(solver) = &self.solver {
            write!(f, "{}", solver)?;
        }
        Ok(())
    }
}
