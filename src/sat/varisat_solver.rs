//! Varisat SAT solver integration

use super::constraints::Clause;
use super::solver::{SolverOptions, SolverSolution};
use crate::error::{HashiError, Result};
use std::collections::HashMap;
use std::time::Instant;
use tracing::warn;
use varisat::{CnfFormula, ExtendFormula, Lit, Solver};

/// SAT solver wrapper for the pure-Rust Varisat engine
pub struct VarisatSatSolver {
    formula: CnfFormula,
    variable_count: usize,
    clause_count: usize,
}

impl VarisatSatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            formula: CnfFormula::new(),
            variable_count: 0,
            clause_count: 0,
        }
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

        let literals: Vec<Lit> = clause
            .literals
            .iter()
            .map(|&literal| Lit::from_dimacs(literal as isize))
            .collect();
        self.formula.add_clause(&literals);

        self.clause_count += 1;
        Ok(())
    }

    /// Solve the SAT problem, consuming the solver
    pub fn solve(self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();

        let mut solver = Solver::new();
        solver.add_formula(&self.formula);

        let satisfiable = solver
            .solve()
            .map_err(|e| HashiError::Engine(format!("Varisat failed: {}", e)))?;
        let solve_time = start_time.elapsed();

        if !satisfiable {
            return Ok(None);
        }

        let model = solver
            .model()
            .ok_or_else(|| HashiError::Engine("Varisat reported SAT without a model".to_string()))?;

        let mut assignment = HashMap::with_capacity(model.len());
        for lit in model {
            assignment.insert(lit.var().to_dimacs() as i32, lit.is_positive());
        }

        Ok(Some(SolverSolution {
            assignment,
            solve_time,
        }))
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
        if options.timeout.is_some() {
            warn!("Varisat has no time limit support, ignoring the configured timeout");
        }
    }
}

impl Default for VarisatSatSolver {
    fn default() -> Self {
        Self::new()
    }
}
