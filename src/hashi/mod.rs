//! Hashi puzzle solving: sessions, solutions, validation and batch runs

pub mod batch;
pub mod problem;
pub mod solution;
pub mod validator;

pub use batch::{run_batch, BatchEntry, BatchReport, BatchStatistics, PuzzleOutcome};
pub use problem::HashiProblem;
pub use solution::{Bridge, Solution, SolutionReport};
pub use validator::{SolutionValidator, ValidationResult, Violation};
