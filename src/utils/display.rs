//! Display and output formatting utilities

use crate::hashi::{BatchStatistics, Solution};
use crate::puzzle::{Orientation, Puzzle, Segment};

/// Format puzzles and solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "=== Solution {}x{} ===\n",
            solution.width, solution.height
        ));
        output.push_str(&format!("Islands: {}\n", solution.islands.len()));
        output.push_str(&format!(
            "Bridges: {} on {} edges\n\n",
            solution.total_bridges(),
            solution.solution.len()
        ));
        output.push_str(&Self::format_grid(solution));

        output
    }

    /// Format an unsolved puzzle: islands only
    pub fn format_puzzle(puzzle: &Puzzle) -> String {
        let cells = Self::island_cells(puzzle.width, puzzle.height, &puzzle.islands);
        Self::join_rows(&cells)
    }

    /// Format the grid with islands and bridges.
    ///
    /// Single bridges draw as `-` or `|`, doubles as `=` or `‖`, empty water as `·`.
    pub fn format_grid(solution: &Solution) -> String {
        let mut cells = Self::island_cells(solution.width, solution.height, &solution.islands);
        let puzzle = solution.puzzle();

        for bridge in &solution.solution {
            let (Some(a), Some(b)) = (
                puzzle.island_at(bridge.x1, bridge.y1),
                puzzle.island_at(bridge.x2, bridge.y2),
            ) else {
                continue;
            };
            let segment = Segment::between(&puzzle.islands[a], &puzzle.islands[b]);
            let symbol = match (segment.orientation, bridge.bridges) {
                (Orientation::Horizontal, 1) => '-',
                (Orientation::Horizontal, _) => '=',
                (Orientation::Vertical, 1) => '|',
                (Orientation::Vertical, _) => '‖',
            };

            for along in segment.low + 1..segment.high {
                let (x, y) = match segment.orientation {
                    Orientation::Horizontal => (along, segment.fixed),
                    Orientation::Vertical => (segment.fixed, along),
                };
                if let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *cell = symbol;
                }
            }
        }

        Self::join_rows(&cells)
    }

    /// Format batch statistics as a short report
    pub fn format_batch_summary(stats: &BatchStatistics) -> String {
        let mut output = String::new();

        output.push_str("Batch Summary:\n");
        output.push_str("Total | Solved | Unsolved | Errors | Time(s)\n");
        output.push_str("------|--------|----------|--------|--------\n");
        output.push_str(&format!(
            "{:5} | {:6} | {:8} | {:6} | {:7.3}\n",
            stats.total,
            stats.solved,
            stats.unsolved,
            stats.errors,
            stats.total_time.as_secs_f64()
        ));

        output
    }

    fn island_cells(width: usize, height: usize, islands: &[crate::puzzle::Island]) -> Vec<Vec<char>> {
        let mut cells = vec![vec!['·'; width]; height];
        for island in islands {
            if let Some(cell) = cells.get_mut(island.y).and_then(|row| row.get_mut(island.x)) {
                *cell = char::from_digit(island.required as u32, 10).unwrap_or('?');
            }
        }
        cells
    }

    fn join_rows(cells: &[Vec<char>]) -> String {
        let mut output = String::new();
        for row in cells {
            output.extend(row.iter());
            output.push('\n');
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    /// Format a heading
    pub fn heading(text: &str) -> String {
        Self::colored(text, Color::Cyan)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Cyan => 36,
        }
    }
}
