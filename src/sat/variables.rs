//! Variable management for the SAT encoding

use crate::error::{encoding_bail, Result};
use std::collections::HashMap;

/// Types of variables used in the SAT encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariableType {
    /// At least one bridge on candidate edge `edge`
    Exists { edge: usize },
    /// Exactly two bridges on candidate edge `edge`
    Double { edge: usize },
    /// `island` is reachable from the root within `step` hops
    Reach { island: usize, step: usize },
    /// `edge` exists and its far endpoint was reachable at `step - 1`, seen from `island`
    Step { edge: usize, island: usize, step: usize },
    /// Helper variable owned by a cardinality encoding
    Auxiliary { serial: usize },
}

/// Manages SAT variables and their mapping to integers.
///
/// One manager belongs to exactly one puzzle-solve session. Creating a fresh
/// manager per puzzle keeps literals from leaking between unrelated encodings.
#[derive(Debug)]
pub struct VariableManager {
    /// Map from variable type to SAT variable ID (positive integer)
    variable_map: HashMap<VariableType, i32>,
    /// Next available variable ID
    next_id: i32,
    /// Next free auxiliary serial
    next_auxiliary: usize,
    island_count: usize,
    edge_count: usize,
    /// Largest reachability step (islands - 1)
    max_step: usize,
}

impl VariableManager {
    /// Create a new variable manager for a puzzle with the given island and edge counts
    pub fn new(island_count: usize, edge_count: usize) -> Self {
        Self {
            variable_map: HashMap::new(),
            next_id: 1, // SAT variables start from 1
            next_auxiliary: 0,
            island_count,
            edge_count,
            max_step: island_count.saturating_sub(1),
        }
    }

    /// Get or create a variable ID for the given variable type
    pub fn get_variable(&mut self, var_type: VariableType) -> Result<i32> {
        if let Some(&id) = self.variable_map.get(&var_type) {
            return Ok(id);
        }

        self.validate_variable(&var_type)?;

        let id = self.next_id;
        self.next_id = match self.next_id.checked_add(1) {
            Some(next) => next,
            None => encoding_bail!("variable space exhausted"),
        };
        self.variable_map.insert(var_type, id);
        Ok(id)
    }

    /// Look up a variable that must already have been created
    pub fn existing_variable(&self, var_type: VariableType) -> Result<i32> {
        match self.variable_map.get(&var_type) {
            Some(&id) => Ok(id),
            None => encoding_bail!("variable {:?} was never defined", var_type),
        }
    }

    pub fn exists_variable(&mut self, edge: usize) -> Result<i32> {
        self.get_variable(VariableType::Exists { edge })
    }

    pub fn double_variable(&mut self, edge: usize) -> Result<i32> {
        self.get_variable(VariableType::Double { edge })
    }

    pub fn reach_variable(&mut self, island: usize, step: usize) -> Result<i32> {
        self.get_variable(VariableType::Reach { island, step })
    }

    pub fn step_variable(&mut self, edge: usize, island: usize, step: usize) -> Result<i32> {
        self.get_variable(VariableType::Step { edge, island, step })
    }

    /// Allocate a helper variable that no other key can ever map to
    pub fn fresh_auxiliary(&mut self) -> Result<i32> {
        let serial = self.next_auxiliary;
        self.next_auxiliary += 1;
        self.get_variable(VariableType::Auxiliary { serial })
    }

    /// Get the total number of variables created
    pub fn variable_count(&self) -> usize {
        (self.next_id - 1) as usize
    }

    /// Get puzzle dimensions as `(islands, edges, max_step)`
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.island_count, self.edge_count, self.max_step)
    }

    /// Validate that a variable type is within bounds
    fn validate_variable(&self, var_type: &VariableType) -> Result<()> {
        match *var_type {
            VariableType::Exists { edge } | VariableType::Double { edge } => {
                if edge >= self.edge_count {
                    encoding_bail!("edge {} out of bounds (edges: {})", edge, self.edge_count);
                }
            }
            VariableType::Reach { island, step } => {
                if island >= self.island_count {
                    encoding_bail!("island {} out of bounds (islands: {})", island, self.island_count);
                }
                if step > self.max_step {
                    encoding_bail!("step {} out of bounds (max step: {})", step, self.max_step);
                }
            }
            VariableType::Step { edge, island, step } => {
                if edge >= self.edge_count {
                    encoding_bail!("edge {} out of bounds (edges: {})", edge, self.edge_count);
                }
                if island >= self.island_count {
                    encoding_bail!("island {} out of bounds (islands: {})", island, self.island_count);
                }
                if step == 0 || step > self.max_step {
                    encoding_bail!("step {} out of bounds (1..={})", step, self.max_step);
                }
            }
            VariableType::Auxiliary { .. } => {}
        }
        Ok(())
    }

    /// Get statistics about variable usage
    pub fn statistics(&self) -> VariableStatistics {
        let mut stats = VariableStatistics {
            total_variables: self.variable_count(),
            ..VariableStatistics::default()
        };

        for var_type in self.variable_map.keys() {
            match var_type {
                VariableType::Exists { .. } | VariableType::Double { .. } => stats.bridge_variables += 1,
                VariableType::Reach { .. } => stats.reach_variables += 1,
                VariableType::Step { .. } => stats.step_variables += 1,
                VariableType::Auxiliary { .. } => stats.auxiliary_variables += 1,
            }
        }

        stats
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub bridge_variables: usize,
    pub reach_variables: usize,
    pub step_variables: usize,
    pub auxiliary_variables: usize,
}

impl std::fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Bridge variables: {}", self.bridge_variables)?;
        writeln!(f, "  Reach variables: {}", self.reach_variables)?;
        writeln!(f, "  Step variables: {}", self.step_variables)?;
        writeln!(f, "  Auxiliary variables: {}", self.auxiliary_variables)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashiError;

    #[test]
    fn test_variable_creation() {
        let mut vm = VariableManager::new(3, 2);

        let var1 = vm.exists_variable(0).unwrap();
        let var2 = vm.double_variable(0).unwrap();

        assert_eq!(var1, 1);
        assert_eq!(var2, 2);

        // Same key returns the same ID
        assert_eq!(vm.exists_variable(0).unwrap(), var1);
        assert_eq!(vm.variable_count(), 2);
    }

    #[test]
    fn test_roles_do_not_collide() {
        let mut vm = VariableManager::new(3, 3);

        let exists = vm.exists_variable(1).unwrap();
        let double = vm.double_variable(1).unwrap();
        let reach = vm.reach_variable(1, 1).unwrap();
        let step = vm.step_variable(1, 1, 1).unwrap();
        let aux = vm.fresh_auxiliary().unwrap();

        let mut ids = vec![exists, double, reach, step, aux];
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_fresh_auxiliaries_are_distinct() {
        let mut vm = VariableManager::new(1, 0);
        let a = vm.fresh_auxiliary().unwrap();
        let b = vm.fresh_auxiliary().unwrap();
        assert_ne!(a, b);
        assert_eq!(vm.statistics().auxiliary_variables, 2);
    }

    #[test]
    fn test_variable_bounds() {
        let mut vm = VariableManager::new(3, 2);

        assert!(vm.exists_variable(1).is_ok());
        assert!(vm.reach_variable(2, 2).is_ok());
        assert!(vm.step_variable(0, 0, 1).is_ok());

        assert!(vm.exists_variable(2).is_err());
        assert!(vm.reach_variable(3, 0).is_err());
        assert!(vm.reach_variable(0, 3).is_err());
        assert!(vm.step_variable(0, 0, 0).is_err());
        assert!(matches!(vm.double_variable(5), Err(HashiError::Encoding(_))));
    }

    #[test]
    fn test_existing_variable() {
        let mut vm = VariableManager::new(2, 1);
        let exists = vm.exists_variable(0).unwrap();

        assert_eq!(vm.existing_variable(VariableType::Exists { edge: 0 }).unwrap(), exists);
        assert!(matches!(
            vm.existing_variable(VariableType::Double { edge: 0 }),
            Err(HashiError::Encoding(_))
        ));
    }

    #[test]
    fn test_statistics() {
        let mut vm = VariableManager::new(2, 1);

        vm.exists_variable(0).unwrap();
        vm.double_variable(0).unwrap();
        vm.reach_variable(0, 0).unwrap();
        vm.reach_variable(1, 1).unwrap();
        vm.step_variable(0, 1, 1).unwrap();

        let stats = vm.statistics();
        assert_eq!(stats.total_variables, 5);
        assert_eq!(stats.bridge_variables, 2);
        assert_eq!(stats.reach_variables, 2);
        assert_eq!(stats.step_variables, 1);
        assert_eq!(vm.dimensions(), (2, 1, 1));
    }
}
