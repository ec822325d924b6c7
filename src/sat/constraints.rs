//! Constraint generation for the Hashi SAT encoding

use super::cardinality::exactly_k;
use super::VariableManager;
use crate::error::{HashiError, Result};
use crate::puzzle::{crossing_pairs, incidence, CandidateEdge, Island};
use tracing::debug;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Whether the clause holds under a predicate telling which variables are true
    pub fn is_satisfied_by<F: Fn(i32) -> bool>(&self, is_true: F) -> bool {
        self.literals
            .iter()
            .any(|&literal| is_true(literal.abs()) == (literal > 0))
    }
}

/// Generates the four clause families of the Hashi encoding over one shared
/// variable space: bridge tiers, crossings, island cardinality and connectivity.
pub struct ConstraintGenerator {
    variable_manager: VariableManager,
    islands: Vec<Island>,
    edges: Vec<CandidateEdge>,
    /// Candidate edge indices touching each island
    incident: Vec<Vec<usize>>,
    root: usize,
    statistics: ConstraintStatistics,
}

impl ConstraintGenerator {
    /// Create a new constraint generator.
    ///
    /// `root` anchors the connectivity encoding and must index an island
    /// whenever the puzzle has any.
    pub fn new(islands: Vec<Island>, edges: Vec<CandidateEdge>, root: usize) -> Result<Self> {
        if !islands.is_empty() && root >= islands.len() {
            return Err(HashiError::InvalidPuzzle(format!(
                "root island {} out of range ({} islands)",
                root,
                islands.len()
            )));
        }

        let variable_manager = VariableManager::new(islands.len(), edges.len());
        let incident = incidence(islands.len(), &edges);
        let statistics = ConstraintStatistics {
            islands: islands.len(),
            candidate_edges: edges.len(),
            ..ConstraintStatistics::default()
        };

        Ok(Self {
            variable_manager,
            islands,
            edges,
            incident,
            root,
            statistics,
        })
    }

    /// Generate all constraints for the puzzle
    pub fn generate_all_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        // Bridge variables first so every edge owns a literal even if no
        // generator below happens to mention it.
        for edge in 0..self.edges.len() {
            self.variable_manager.exists_variable(edge)?;
            self.variable_manager.double_variable(edge)?;
        }

        // 1. A double bridge implies a bridge
        let tier = self.generate_tier_constraints()?;
        self.statistics.tier_clauses = tier.len();
        clauses.extend(tier);

        // 2. Crossing bridges exclude each other
        let crossing = self.generate_crossing_constraints()?;
        self.statistics.crossing_clauses = crossing.len();
        clauses.extend(crossing);

        // 3. Every island carries exactly its required count
        let cardinality = self.generate_cardinality_constraints()?;
        self.statistics.cardinality_clauses = cardinality.len();
        clauses.extend(cardinality);

        // 4. The bridge graph is connected
        let connectivity = self.generate_connectivity_constraints()?;
        self.statistics.connectivity_clauses = connectivity.len();
        clauses.extend(connectivity);

        debug!(
            tier = self.statistics.tier_clauses,
            crossing = self.statistics.crossing_clauses,
            cardinality = self.statistics.cardinality_clauses,
            connectivity = self.statistics.connectivity_clauses,
            variables = self.variable_manager.variable_count(),
            "generated Hashi constraints"
        );

        Ok(clauses)
    }

    /// `double(e) -> exists(e)` for every candidate edge
    pub fn generate_tier_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.edges.len());

        for edge in 0..self.edges.len() {
            let exists = self.variable_manager.exists_variable(edge)?;
            let double = self.variable_manager.double_variable(edge)?;
            clauses.push(Clause::binary(-double, exists));
        }

        Ok(clauses)
    }

    /// `¬exists(e1) ∨ ¬exists(e2)` for every geometrically crossing pair
    pub fn generate_crossing_constraints(&mut self) -> Result<Vec<Clause>> {
        let pairs = crossing_pairs(&self.islands, &self.edges);
        self.statistics.crossing_pairs = pairs.len();

        let mut clauses = Vec::with_capacity(pairs.len());
        for (e1, e2) in pairs {
            let first = self.variable_manager.exists_variable(e1)?;
            let second = self.variable_manager.exists_variable(e2)?;
            clauses.push(Clause::binary(-first, -second));
        }

        Ok(clauses)
    }

    /// Exactly `required` true literals among `exists`/`double` of the incident edges.
    ///
    /// An island demanding more than its edges can carry gets a contradiction,
    /// which makes the puzzle unsatisfiable instead of failing the encoding.
    pub fn generate_cardinality_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for island in 0..self.islands.len() {
            let mut literals = Vec::with_capacity(2 * self.incident[island].len());
            for &edge in &self.incident[island] {
                literals.push(self.variable_manager.exists_variable(edge)?);
                literals.push(self.variable_manager.double_variable(edge)?);
            }

            let required = self.islands[island].required as usize;
            if required > literals.len() {
                debug!(
                    island,
                    required,
                    capacity = literals.len(),
                    "island cannot reach its bridge count"
                );
                let contradiction = self.variable_manager.fresh_auxiliary()?;
                clauses.push(Clause::unit(contradiction));
                clauses.push(Clause::unit(-contradiction));
                continue;
            }

            clauses.extend(exactly_k(&literals, required, &mut self.variable_manager)?);
        }

        Ok(clauses)
    }

    /// Layered reachability from the root island.
    ///
    /// `reach(v, t)` holds iff `v` is within `t` bridge hops of the root, with
    /// `step(e, v, t) <-> exists(e) ∧ reach(other(e, v), t - 1)`. Forcing
    /// `reach(v, n - 1)` for every island makes the bridge graph connected,
    /// since a shortest path never needs more than `n - 1` edges.
    pub fn generate_connectivity_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        let island_count = self.islands.len();
        if island_count == 0 {
            return Ok(clauses);
        }

        let last_step = island_count - 1;
        let root = self.root;

        // Base layer: only the root is reachable with zero hops
        for island in 0..island_count {
            let reach = self.variable_manager.reach_variable(island, 0)?;
            clauses.push(Clause::unit(if island == root { reach } else { -reach }));
        }

        for step in 1..=last_step {
            for island in 0..island_count {
                let reach_now = self.variable_manager.reach_variable(island, step)?;
                let reach_before = self.variable_manager.reach_variable(island, step - 1)?;

                let mut support = vec![-reach_now, reach_before];
                for &edge in &self.incident[island] {
                    let other = match self.edges[edge].other(island) {
                        Some(other) => other,
                        None => {
                            return Err(HashiError::Encoding(format!(
                                "edge {} listed as incident to island {} it does not touch",
                                edge, island
                            )))
                        }
                    };

                    let hop = self.variable_manager.step_variable(edge, island, step)?;
                    let exists = self.variable_manager.exists_variable(edge)?;
                    let other_before = self.variable_manager.reach_variable(other, step - 1)?;

                    clauses.push(Clause::binary(-hop, exists));
                    clauses.push(Clause::binary(-hop, other_before));
                    clauses.push(Clause::new(vec![-exists, -other_before, hop]));

                    clauses.push(Clause::binary(-hop, reach_now));
                    support.push(hop);
                }

                // Reachability never shrinks
                clauses.push(Clause::binary(-reach_before, reach_now));
                // ...and only grows through a step literal
                clauses.push(Clause::new(support));
            }
        }

        for island in 0..island_count {
            clauses.push(Clause::unit(self.variable_manager.reach_variable(island, last_step)?));
        }

        Ok(clauses)
    }

    pub fn edges(&self) -> &[CandidateEdge] {
        &self.edges
    }

    /// Get the variable manager (for decoding)
    pub fn variable_manager(&self) -> &VariableManager {
        &self.variable_manager
    }

    /// Get constraint generation statistics
    pub fn statistics(&self) -> ConstraintStatistics {
        ConstraintStatistics {
            total_variables: self.variable_manager.variable_count(),
            ..self.statistics.clone()
        }
    }
}

/// Statistics about constraint generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintStatistics {
    pub islands: usize,
    pub candidate_edges: usize,
    pub crossing_pairs: usize,
    pub tier_clauses: usize,
    pub crossing_clauses: usize,
    pub cardinality_clauses: usize,
    pub connectivity_clauses: usize,
    pub total_variables: usize,
}

impl ConstraintStatistics {
    pub fn total_clauses(&self) -> usize {
        self.tier_clauses + self.crossing_clauses + self.cardinality_clauses + self.connectivity_clauses
    }
}

impl std::fmt::Display for ConstraintStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Constraint Generation Statistics:")?;
        writeln!(f, "  Islands: {}", self.islands)?;
        writeln!(f, "  Candidate edges: {}", self.candidate_edges)?;
        writeln!(f, "  Crossing pairs: {}", self.crossing_pairs)?;
        writeln!(f, "  Tier clauses: {}", self.tier_clauses)?;
        writeln!(f, "  Crossing clauses: {}", self.crossing_clauses)?;
        writeln!(f, "  Cardinality clauses: {}", self.cardinality_clauses)?;
        writeln!(f, "  Connectivity clauses: {}", self.connectivity_clauses)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        Ok(())
    }
}
