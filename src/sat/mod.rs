//! SAT solving components for Hashi puzzles

pub mod variables;
pub mod cardinality;
pub mod constraints;
pub mod encoder;
pub mod decoder;
pub mod solver;
pub mod varisat_solver;
pub mod solver_factory;

pub use variables::{VariableManager, VariableType};
pub use constraints::{Clause, ConstraintGenerator, ConstraintStatistics};
pub use encoder::{EncodingStatistics, SatEncoder};
pub use solver::{SatSolver, SolverOptions, SolverResultType, SolverSolution, SolverStatistics};
pub use solver_factory::UnifiedSatSolver;
