//! One Hashi solve session

use super::{Solution, SolutionValidator};
use crate::config::SolverConfig;
use crate::error::{HashiError, Result};
use crate::puzzle::Puzzle;
use crate::sat::{EncodingStatistics, SatEncoder};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A puzzle bound to its own encoder and variable space.
///
/// Sessions share nothing, so any number may run at once on different threads.
pub struct HashiProblem {
    config: SolverConfig,
    encoder: SatEncoder,
    validator: SolutionValidator,
    solve_time: Option<Duration>,
}

impl HashiProblem {
    /// Create a new problem; fails with `InvalidPuzzle` on malformed input
    pub fn new(puzzle: Puzzle, config: SolverConfig) -> Result<Self> {
        let encoder = SatEncoder::new(puzzle, &config)?;

        Ok(Self {
            config,
            encoder,
            validator: SolutionValidator::new(),
            solve_time: None,
        })
    }

    /// Solve the puzzle.
    ///
    /// `Ok(None)` means the puzzle has no solution.
    pub fn solve(&mut self) -> Result<Option<Solution>> {
        let start_time = Instant::now();

        let puzzle = self.encoder.puzzle();
        info!(
            width = puzzle.width,
            height = puzzle.height,
            islands = puzzle.island_count(),
            "solving Hashi puzzle"
        );

        let solution = self.encoder.solve();
        self.solve_time = Some(start_time.elapsed());
        let Some(solution) = solution? else {
            return Ok(None);
        };

        if self.config.verify_solutions {
            let result = self.validator.validate(self.encoder.puzzle(), &solution);
            if !result.is_valid {
                let message = result.error_message().unwrap_or_default();
                warn!(%message, "decoded solution failed validation");
                return Err(HashiError::Encoding(format!(
                    "decoded solution breaks the puzzle rules: {}",
                    message
                )));
            }
        }

        info!(
            bridges = solution.solution.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "solution verified"
        );
        Ok(Some(solution))
    }

    /// Get the puzzle
    pub fn puzzle(&self) -> &Puzzle {
        self.encoder.puzzle()
    }

    /// Get the solver settings
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Wall time of the last `solve`, encoding included
    pub fn solve_time(&self) -> Option<Duration> {
        self.solve_time
    }

    /// Get encoding statistics
    pub fn encoding_statistics(&self) -> EncodingStatistics {
        self.encoder.statistics()
    }
}
