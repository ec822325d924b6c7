//! Hashi puzzle model: islands, bridge geometry and puzzle files

pub mod geometry;
pub mod island;
pub mod io;

pub use geometry::{candidate_edges, crossing_pairs, incidence, CandidateEdge, Orientation, Segment};
pub use island::{Island, Puzzle, MAX_REQUIRED, MIN_REQUIRED};
pub use io::{create_example_puzzles, load_puzzle_from_file, save_puzzle_to_file, PuzzleFile};
