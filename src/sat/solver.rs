//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use crate::error::{HashiError, Result};
use cadical::{Solver, Timeout};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL.
///
/// A wrapper is filled with clauses and then consumed by a single `solve`,
/// so the native solver is released on every exit path.
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    timeout: Option<Duration>,
}

/// Result of SAT solving: the full assignment reported by the engine
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub assignment: HashMap<i32, bool>,
    pub solve_time: Duration,
}

impl SolverSolution {
    /// Whether `variable` is true in the model; unassigned variables read as false
    pub fn is_true(&self, variable: i32) -> bool {
        self.assignment.get(&variable).copied().unwrap_or(false)
    }

    /// Sorted list of the variables set to true
    pub fn true_variables(&self) -> Vec<i32> {
        let mut variables: Vec<i32> = self
            .assignment
            .iter()
            .filter(|(_, &value)| value)
            .map(|(&variable, _)| variable)
            .collect();
        variables.sort_unstable();
        variables
    }
}

/// Statistics about the solving process
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub solve_time: Duration,
    pub result: SolverResultType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverResultType {
    Satisfiable,
    Unsatisfiable,
    Interrupted,
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            timeout: None,
        }
    }

    /// Set solving timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            return Err(HashiError::Encoding(
                "cannot add empty clause to the solver".to_string(),
            ));
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());

        self.clause_count += 1;
        Ok(())
    }

    /// Solve the SAT problem, consuming the solver.
    ///
    /// `Ok(None)` means unsatisfiable. A search cut short by the timeout is an
    /// engine failure, never a "no solution" verdict.
    pub fn solve(mut self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();

        if let Some(timeout) = self.timeout {
            self.solver
                .set_callbacks(Some(Timeout::new(timeout.as_secs_f32())));
        }

        let result = self.solver.solve();
        let solve_time = start_time.elapsed();

        match result {
            Some(true) => {
                let assignment = self.extract_assignment();
                Ok(Some(SolverSolution {
                    assignment,
                    solve_time,
                }))
            }
            Some(false) => Ok(None),
            None => Err(HashiError::Engine(format!(
                "CaDiCaL stopped without a verdict after {:.3}s",
                solve_time.as_secs_f64()
            ))),
        }
    }

    /// Extract variable assignment from the solver
    fn extract_assignment(&self) -> HashMap<i32, bool> {
        let mut assignment = HashMap::with_capacity(self.variable_count);

        for var in 1..=self.variable_count as i32 {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }

        assignment
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Set solver configuration options
    pub fn configure(&mut self, options: &SolverOptions) {
        if let Some(timeout) = options.timeout {
            self.set_timeout(timeout);
        }
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration options for the SAT solver
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    pub timeout: Option<Duration>,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(f, "  Result: {:?}", self.result)?;
        Ok(())
    }
}

impl std::fmt::Display for SolverSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solution:")?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(f, "  Variables assigned: {}", self.assignment.len())?;

        let mut vars: Vec<_> = self.assignment.keys().collect();
        vars.sort();

        write!(f, "  Sample assignments: ")?;
        for (i, &var) in vars.iter().take(10).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let value = self.assignment[var];
            write!(f, "{}={}", var, if value { "T" } else { "F" })?;
        }
        if vars.len() > 10 {
            write!(f, ", ...")?;
        }
        writeln!(f)?;

        Ok(())
    }
}
